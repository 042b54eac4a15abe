// Copyright (c) The esop-min Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

/// The default bound on rewrite iterations.
pub const DEFAULT_ITERATION_LIMIT: usize = 1_000_000;

/// How a pair of cubes at distance 2 is rewritten.
///
/// Both variants replace the pair `(first, second)`, differing at positions `p < q`,
/// with two cubes. The first new cube is always `first` with `p` raised to a don't care.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SplitRule {
    /// The second new cube is `first` with `q` raised to a don't care.
    ///
    /// This discards the literals of `second`, so the rewritten cover does not in general
    /// compute the same function.
    FirstCube,

    /// The second new cube is `second` with `q` raised to a don't care.
    ///
    /// With literals `u`, `v` of `first` at `p`, `q` and remaining product `R`,
    /// `Ruv ^ Ru'v' = Rv ^ Ru'`, so the cover's function is preserved.
    Exact,
}

impl Default for SplitRule {
    fn default() -> Self {
        Self::FirstCube
    }
}

/// Configuration for [`crate::exorcism::Exorcism`].
///
/// ```
/// use esop_min::exorcism::{ExorcismConfig, SplitRule};
///
/// let config = ExorcismConfig::default()
///     .with_split_rule(SplitRule::Exact)
///     .with_iteration_limit(500);
/// assert_eq!(config.split_rule(), SplitRule::Exact);
/// assert_eq!(config.iteration_limit(), 500);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExorcismConfig {
    split_rule: SplitRule,
    iteration_limit: usize,
}

impl ExorcismConfig {
    pub fn with_split_rule(mut self, split_rule: SplitRule) -> Self {
        self.split_rule = split_rule;
        self
    }

    /// Sets the number of iterations after which minimization gives up with
    /// [`crate::errors::EsopError::IterationLimit`].
    pub fn with_iteration_limit(mut self, iteration_limit: usize) -> Self {
        self.iteration_limit = iteration_limit;
        self
    }

    #[inline]
    pub fn split_rule(&self) -> SplitRule {
        self.split_rule
    }

    #[inline]
    pub fn iteration_limit(&self) -> usize {
        self.iteration_limit
    }
}

impl Default for ExorcismConfig {
    fn default() -> Self {
        Self {
            split_rule: SplitRule::default(),
            iteration_limit: DEFAULT_ITERATION_LIMIT,
        }
    }
}
