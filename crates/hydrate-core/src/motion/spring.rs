//! Spring-damper tilt simulation.
//!
//! A discrete-time critically-damped spring tracks a target tilt signal
//! and derives an agitation (wave-intensity) value from its velocity.
//! `step()` is deterministic and clock-free; the caller supplies the
//! cadence. The constants are tuned for a 60 Hz tick, settling to within
//! 5% of a step change in roughly half a second to a second.

use serde::{Deserialize, Serialize};

/// Spring constant pulling tilt toward the target.
pub const STIFFNESS: f64 = 0.1;
/// Velocity decay applied each tick.
pub const DAMPING: f64 = 0.92;
/// Scale from spring velocity to agitation.
pub const VELOCITY_GAIN: f64 = 12.0;
/// Tick rate the constants are tuned for.
pub const NOMINAL_TICK_HZ: u32 = 60;

/// Published per-tick simulation snapshot.
///
/// `tilt` is clamped to `[-1, 1]`, `agitation` to `[0, 1]`. The spring
/// velocity is simulator-private.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SimulationState {
    pub tilt: f64,
    pub agitation: f64,
}

/// Critically-damped spring tracking a target tilt.
///
/// Every session starts from rest (`tilt = 0`, zero velocity); nothing is
/// persisted.
#[derive(Debug, Clone)]
pub struct TiltSimulator {
    tilt: f64,
    velocity: f64,
    stiffness: f64,
    damping: f64,
}

impl Default for TiltSimulator {
    fn default() -> Self {
        Self {
            tilt: 0.0,
            velocity: 0.0,
            stiffness: STIFFNESS,
            damping: DAMPING,
        }
    }
}

impl TiltSimulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulator for a tick rate other than the nominal 60 Hz.
    ///
    /// The per-tick constants are rescaled so settling time in wall-clock
    /// terms matches the nominal tuning; the raw constants must not be
    /// reused at a different cadence.
    pub fn with_tick_rate(tick_hz: u32) -> Self {
        let scale = f64::from(NOMINAL_TICK_HZ) / f64::from(tick_hz.max(1));
        Self {
            tilt: 0.0,
            velocity: 0.0,
            stiffness: STIFFNESS * scale * scale,
            damping: DAMPING.powf(scale),
        }
    }

    /// Advance one tick toward `target_tilt` (clamped to `[-1, 1]`).
    pub fn step(&mut self, target_tilt: f64) -> SimulationState {
        let target = target_tilt.clamp(-1.0, 1.0);
        let accel = self.stiffness * (target - self.tilt);
        self.velocity = (self.velocity + accel) * self.damping;
        self.tilt = (self.tilt + self.velocity).clamp(-1.0, 1.0);
        self.state()
    }

    /// Advance `ticks` ticks with a constant target. Test and demo helper.
    pub fn advance(&mut self, target_tilt: f64, ticks: u32) -> SimulationState {
        for _ in 0..ticks {
            self.step(target_tilt);
        }
        self.state()
    }

    pub fn state(&self) -> SimulationState {
        SimulationState {
            tilt: self.tilt,
            agitation: (self.velocity.abs() * VELOCITY_GAIN).clamp(0.0, 1.0),
        }
    }
}
