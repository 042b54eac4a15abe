// Copyright (c) The esop-min Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use proptest::{
    strategy::{Strategy, ValueTree},
    test_runner::{Config, RngAlgorithm, TestRng, TestRunner},
};
use std::hash::{Hash, Hasher};
use twox_hash::XxHash64;

/// Generates values from proptest strategies, deterministically for a given seed.
pub struct ValueGenerator {
    runner: TestRunner,
}

impl ValueGenerator {
    /// Creates a generator whose RNG is seeded from a hash of `seed`.
    pub fn from_seed(seed: impl Hash) -> Self {
        let mut hasher = XxHash64::default();
        seed.hash(&mut hasher);
        let seed = hasher.finish();

        let mut seed_bytes = [0u8; 32];
        seed_bytes[0..8].copy_from_slice(&seed.to_be_bytes());
        Self {
            runner: TestRunner::new_with_rng(
                Config::default(),
                TestRng::from_seed(RngAlgorithm::ChaCha, &seed_bytes),
            ),
        }
    }

    /// Forks off a generator whose RNG is derived from, but independent of, this one.
    pub fn partial_clone(&mut self) -> Self {
        Self {
            runner: TestRunner::new_with_rng(Config::default(), self.runner.new_rng()),
        }
    }

    /// Generates a single value from `strategy`.
    pub fn generate<S: Strategy>(&mut self, strategy: S) -> S::Value {
        strategy
            .new_tree(&mut self.runner)
            .expect("creating a new value should succeed")
            .current()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_deterministic() {
        let strategy = prop::collection::vec(any::<u32>(), 16);
        let a = ValueGenerator::from_seed("esop").generate(&strategy);
        let b = ValueGenerator::from_seed("esop").generate(&strategy);
        let c = ValueGenerator::from_seed("other").generate(&strategy);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_partial_clone() {
        let strategy = prop::collection::vec(any::<u32>(), 16);
        let mut parent = ValueGenerator::from_seed("esop");
        let first = parent.partial_clone().generate(&strategy);
        let second = parent.partial_clone().generate(&strategy);
        assert_ne!(first, second);

        let mut again = ValueGenerator::from_seed("esop");
        assert_eq!(again.partial_clone().generate(&strategy), first);
        assert_eq!(again.partial_clone().generate(&strategy), second);
    }
}
