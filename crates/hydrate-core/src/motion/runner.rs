//! Live tick loop for the tilt simulator.
//!
//! The runner owns the frame clock: it spawns a tokio task ticking at the
//! nominal rate the spring constants are tuned for, samples the
//! orientation source once per tick, and publishes each snapshot through
//! a watch channel. The intake command path shares no state with this
//! loop; consumers just read the latest snapshot.

use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use super::orientation::OrientationSource;
use super::spring::{SimulationState, TiltSimulator, NOMINAL_TICK_HZ};

/// Handle to a running tilt simulation.
///
/// Dropping the handle leaves the task running; call
/// [`MotionRunner::stop`] to tear it down. Must be created inside a tokio
/// runtime.
pub struct MotionRunner {
    task: JoinHandle<()>,
    state_rx: watch::Receiver<SimulationState>,
}

impl MotionRunner {
    /// Start ticking at the nominal rate with the given orientation source.
    ///
    /// The simulation always begins from rest; a source reporting `None`
    /// is treated as a neutral target, so a missing sensor still yields an
    /// undisturbed surface instead of a stall.
    pub fn start<S: OrientationSource>(source: S) -> Self {
        Self::start_at(source, NOMINAL_TICK_HZ)
    }

    /// Start ticking at an explicit rate (see `Config::motion.tick_hz`).
    ///
    /// The spring constants are rescaled to the requested cadence so
    /// settling time stays equivalent to the nominal tuning.
    pub fn start_at<S: OrientationSource>(mut source: S, tick_hz: u32) -> Self {
        let tick_hz = tick_hz.max(1);
        let (state_tx, state_rx) = watch::channel(SimulationState::default());
        let period = Duration::from_secs_f64(1.0 / f64::from(tick_hz));
        let task = tokio::spawn(async move {
            let mut sim = TiltSimulator::with_tick_rate(tick_hz);
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                ticker.tick().await;
                let target = source.sample().unwrap_or(0.0);
                if state_tx.send(sim.step(target)).is_err() {
                    break;
                }
            }
        });
        Self { task, state_rx }
    }

    /// Latest published snapshot.
    pub fn state(&self) -> SimulationState {
        *self.state_rx.borrow()
    }

    /// A receiver that observes every published snapshot.
    pub fn subscribe(&self) -> watch::Receiver<SimulationState> {
        self.state_rx.clone()
    }

    /// Stop the tick loop and release the frame clock.
    pub fn stop(self) {
        self.task.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::motion::orientation::{FixedOrientation, NeutralOrientation};

    #[tokio::test]
    async fn runner_tracks_a_fixed_target() {
        let runner = MotionRunner::start(FixedOrientation(1.0));
        // ~30 ticks; the spring reaches the clamp well before that.
        tokio::time::sleep(Duration::from_millis(500)).await;
        let state = runner.state();
        assert!(state.tilt > 0.9, "tilt {} after 500 ms", state.tilt);
        runner.stop();
    }

    #[tokio::test]
    async fn runner_honors_configured_tick_rate() {
        let runner = MotionRunner::start_at(FixedOrientation(1.0), 120);
        tokio::time::sleep(Duration::from_millis(500)).await;
        let state = runner.state();
        assert!(state.tilt > 0.9, "tilt {} after 500 ms at 120 Hz", state.tilt);
        runner.stop();
    }

    #[tokio::test]
    async fn missing_sensor_keeps_surface_at_rest() {
        let runner = MotionRunner::start(NeutralOrientation);
        tokio::time::sleep(Duration::from_millis(200)).await;
        let state = runner.state();
        assert_eq!(state.tilt, 0.0);
        assert_eq!(state.agitation, 0.0);
        runner.stop();
    }

    #[tokio::test]
    async fn subscriber_sees_updates() {
        let runner = MotionRunner::start(FixedOrientation(0.5));
        let mut rx = runner.subscribe();
        rx.changed().await.unwrap();
        assert!(rx.borrow().tilt > 0.0);
        runner.stop();
    }
}
