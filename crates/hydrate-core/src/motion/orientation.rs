//! Orientation signal sources.
//!
//! The simulator consumes a scalar tilt target in `[-1, 1]` sampled once
//! per tick. A real deployment maps device gravity onto that range before
//! it reaches the simulator; here the sources are a neutral stand-in and a
//! seeded synthetic signal for demos and deterministic tests.

use rand::Rng;
use rand_pcg::Pcg32;

/// Supplies one tilt target per simulator tick.
///
/// `None` means the sensor is unavailable; the simulator treats that as a
/// neutral `0.0` target rather than an error.
pub trait OrientationSource: Send + 'static {
    fn sample(&mut self) -> Option<f64>;
}

/// Source with no sensor behind it. Always reports absence, which the
/// simulator resolves to a resting surface.
#[derive(Debug, Default, Clone, Copy)]
pub struct NeutralOrientation;

impl OrientationSource for NeutralOrientation {
    fn sample(&mut self) -> Option<f64> {
        None
    }
}

/// Constant tilt target. Test helper.
#[derive(Debug, Clone, Copy)]
pub struct FixedOrientation(pub f64);

impl OrientationSource for FixedOrientation {
    fn sample(&mut self) -> Option<f64> {
        Some(self.0)
    }
}

/// Seeded noisy orientation signal: a damped random walk clamped to
/// `[-1, 1]`, smooth enough to look like a hand holding a phone.
#[derive(Debug, Clone)]
pub struct SyntheticOrientation {
    rng: Pcg32,
    target: f64,
    drift: f64,
}

impl SyntheticOrientation {
    pub fn seeded(seed: u64) -> Self {
        use rand::SeedableRng;
        Self {
            rng: Pcg32::seed_from_u64(seed),
            target: 0.0,
            drift: 0.0,
        }
    }
}

impl OrientationSource for SyntheticOrientation {
    fn sample(&mut self) -> Option<f64> {
        self.drift = (self.drift + self.rng.gen_range(-0.01..0.01)) * 0.98;
        self.target = (self.target + self.drift).clamp(-1.0, 1.0);
        Some(self.target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn neutral_source_reports_absence() {
        assert_eq!(NeutralOrientation.sample(), None);
    }

    #[test]
    fn synthetic_source_is_deterministic_per_seed() {
        let mut a = SyntheticOrientation::seeded(7);
        let mut b = SyntheticOrientation::seeded(7);
        for _ in 0..100 {
            assert_eq!(a.sample(), b.sample());
        }
    }

    #[test]
    fn synthetic_source_stays_in_range() {
        let mut source = SyntheticOrientation::seeded(42);
        for _ in 0..10_000 {
            let target = source.sample().unwrap();
            assert!((-1.0..=1.0).contains(&target));
        }
    }
}
