use std::time::Duration;

use clap::Subcommand;
use hydrate_core::{
    Config, MotionRunner, NeutralOrientation, OrientationSource, SyntheticOrientation,
    TiltSimulator,
};

#[derive(Subcommand)]
pub enum MotionAction {
    /// Step the simulator deterministically and print one JSON line per tick
    Simulate {
        /// Number of ticks to run
        #[arg(long, default_value = "120")]
        ticks: u32,
        /// Seed for the synthetic orientation signal
        #[arg(long, default_value = "42")]
        seed: u64,
        /// Use a constant tilt target instead of the synthetic signal
        #[arg(long)]
        target: Option<f64>,
    },
    /// Run the live tick loop and print snapshots until the time is up
    Watch {
        /// How long to run, in seconds
        #[arg(long, default_value = "5")]
        seconds: u64,
        /// Seed for the synthetic orientation signal
        #[arg(long, default_value = "42")]
        seed: u64,
        /// Run without an orientation source (resting surface)
        #[arg(long)]
        neutral: bool,
    },
}

pub fn run(action: MotionAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        MotionAction::Simulate {
            ticks,
            seed,
            target,
        } => {
            let mut sim = TiltSimulator::new();
            let mut source = SyntheticOrientation::seeded(seed);
            for _ in 0..ticks {
                let tilt_target = match target {
                    Some(t) => t,
                    None => source.sample().unwrap_or(0.0),
                };
                let state = sim.step(tilt_target);
                println!("{}", serde_json::to_string(&state)?);
            }
        }
        MotionAction::Watch {
            seconds,
            seed,
            neutral,
        } => {
            let tick_hz = Config::load_or_default().motion.tick_hz;
            let runtime = tokio::runtime::Runtime::new()?;
            runtime.block_on(async {
                let runner = if neutral {
                    MotionRunner::start_at(NeutralOrientation, tick_hz)
                } else {
                    MotionRunner::start_at(SyntheticOrientation::seeded(seed), tick_hz)
                };
                let mut printer = tokio::time::interval(Duration::from_millis(100));
                let deadline = tokio::time::Instant::now() + Duration::from_secs(seconds);
                while tokio::time::Instant::now() < deadline {
                    printer.tick().await;
                    println!(
                        "{}",
                        serde_json::to_string(&runner.state()).unwrap_or_default()
                    );
                }
                runner.stop();
            });
        }
    }
    Ok(())
}
