//! # Movement Model
//!
//! Every tick each "other" person takes one random step on both axes.
//! The step is a uniform integer in `[-half_range, half_range)` scaled by
//! `step_scale` degrees, drawn from a seeded ChaCha stream so runs are
//! reproducible.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Parameters of the random walk.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MovementConfig {
    /// Seed for the step generator.
    pub seed: u64,
    /// Degrees per integer step.
    pub step_scale: f64,
    /// Steps are drawn from `[-half_range, half_range)`. Zero disables movement.
    pub half_range: u32,
}

impl Default for MovementConfig {
    fn default() -> Self {
        Self {
            seed: 0x00C0_FFEE,
            step_scale: 1.0e-4,
            half_range: 50,
        }
    }
}

impl MovementConfig {
    /// Largest distance, in degrees, a person can move on one axis per tick.
    #[must_use]
    pub fn max_step(&self) -> f64 {
        f64::from(self.half_range) * self.step_scale
    }
}

/// Deterministic random-walk step generator.
#[derive(Clone, Debug)]
pub struct RandomWalk {
    rng: ChaCha8Rng,
    config: MovementConfig,
}

impl RandomWalk {
    /// Creates a generator seeded from `config.seed`.
    #[must_use]
    pub fn new(config: MovementConfig) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            config,
        }
    }

    /// Draws one step in degrees.
    #[inline]
    pub fn step(&mut self) -> f64 {
        if self.config.half_range == 0 {
            return 0.0;
        }
        let half = i64::from(self.config.half_range);
        #[allow(clippy::cast_precision_loss)]
        let units = self.rng.gen_range(-half..half) as f64;
        units * self.config.step_scale
    }

    /// The parameters this generator was built from.
    #[must_use]
    pub const fn config(&self) -> &MovementConfig {
        &self.config
    }
}

impl Default for RandomWalk {
    fn default() -> Self {
        Self::new(MovementConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_steps_stay_in_range() {
        let mut walk = RandomWalk::default();
        let max = walk.config().max_step();

        for _ in 0..10_000 {
            let step = walk.step();
            assert!(step >= -max && step < max, "step {step} outside ±{max}");
        }
    }

    #[test]
    fn test_same_seed_same_steps() {
        let mut a = RandomWalk::new(MovementConfig { seed: 7, ..Default::default() });
        let mut b = RandomWalk::new(MovementConfig { seed: 7, ..Default::default() });

        for _ in 0..100 {
            assert_eq!(a.step().to_bits(), b.step().to_bits());
        }
    }

    #[test]
    fn test_zero_range_is_still() {
        let mut walk = RandomWalk::new(MovementConfig { half_range: 0, ..Default::default() });
        assert_eq!(walk.step(), 0.0);
    }
}
