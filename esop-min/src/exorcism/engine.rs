// Copyright (c) The esop-min Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::{
    cube::Cube,
    errors::EsopError,
    esop::EsopCover,
    exorcism::{rules, ExorcismConfig, LogObserver, RewriteObserver, RuleOutcome},
    pla,
};
use bitvec::{slice::BitSlice, vec::BitVec};
use log::{info, trace};

/// Where an [`Exorcism`] is in its lifecycle.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum EngineState {
    /// Constructed, never minimized.
    Fresh,
    /// Inside the rewrite loop, or the last `minimize()` call failed.
    Minimizing,
    /// The last `minimize()` call reached a fixed point.
    Done,
}

/// Initial and minimized cover sizes, as returned by [`Exorcism::cost_reduction`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct CostReduction {
    pub initial_cost: usize,
    pub minimized_cost: usize,
    /// `initial_cost / minimized_cost`, or infinity if the minimized cover is empty.
    pub ratio: f64,
}

/// A greedy ESOP minimizer.
///
/// The engine keeps a snapshot of the cover it was built from, which is used for
/// equivalence checking and cost reporting, and a live cover that `minimize()` rewrites.
///
/// # Examples
///
/// ```
/// use esop_min::exorcism::Exorcism;
///
/// let mut exorcism = Exorcism::from_strs(["10", "00"]).unwrap();
/// let minimized: Vec<_> = exorcism.minimize().unwrap().iter().map(|c| c.to_string()).collect();
/// assert_eq!(minimized, ["-0"]);
/// assert!(exorcism.is_equivalent().unwrap());
///
/// let cost = exorcism.cost_reduction().unwrap();
/// assert_eq!((cost.initial_cost, cost.minimized_cost), (2, 1));
/// ```
#[derive(Clone, Debug)]
pub struct Exorcism {
    initial: EsopCover,
    current: EsopCover,
    config: ExorcismConfig,
    state: EngineState,
    // The unlink rule fires at most once over the lifetime of the engine.
    unlinked: bool,
    minimized_cost: Option<usize>,
}

impl Exorcism {
    pub fn new(cover: EsopCover) -> Self {
        Self {
            current: cover.clone(),
            initial: cover,
            config: ExorcismConfig::default(),
            state: EngineState::Fresh,
            unlinked: false,
            minimized_cost: None,
        }
    }

    /// Builds an engine over `cubes`, which must all have the same width.
    pub fn from_cubes(cubes: impl IntoIterator<Item = Cube>) -> Result<Self, EsopError> {
        Ok(Self::new(EsopCover::new(cubes)?))
    }

    pub fn from_strs<S: AsRef<str>>(cubes: impl IntoIterator<Item = S>) -> Result<Self, EsopError> {
        Ok(Self::new(EsopCover::from_strs(cubes)?))
    }

    /// Builds an engine over the on-set rows of a PLA description.
    ///
    /// Malformed rows are skipped; rows of differing widths are an error.
    pub fn from_pla_lines<S: AsRef<str>>(
        lines: impl IntoIterator<Item = S>,
    ) -> Result<Self, EsopError> {
        Self::from_cubes(pla::parse_on_set(lines))
    }

    #[inline]
    pub fn from_pla_str(text: &str) -> Result<Self, EsopError> {
        Self::from_pla_lines(text.lines())
    }

    pub fn with_config(mut self, config: ExorcismConfig) -> Self {
        self.config = config;
        self
    }

    #[inline]
    pub fn config(&self) -> &ExorcismConfig {
        &self.config
    }

    #[inline]
    pub fn state(&self) -> EngineState {
        self.state
    }

    /// Returns true if the unlink rule has fired on this engine.
    #[inline]
    pub fn has_unlinked(&self) -> bool {
        self.unlinked
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.initial.width()
    }

    /// The cover the engine was constructed from.
    #[inline]
    pub fn initial(&self) -> &EsopCover {
        &self.initial
    }

    /// The live cover. After a successful `minimize()` this is the minimized cover.
    #[inline]
    pub fn current(&self) -> &EsopCover {
        &self.current
    }

    #[inline]
    pub fn initial_cost(&self) -> usize {
        self.initial.cube_count()
    }

    #[inline]
    pub fn minimized_cost(&self) -> Option<usize> {
        self.minimized_cost
    }

    /// Runs the rewrite loop to a fixed point and returns the minimized cubes, reporting
    /// each rewrite to the `log` facade.
    #[inline]
    pub fn minimize(&mut self) -> Result<&[Cube], EsopError> {
        self.minimize_with(&mut LogObserver)
    }

    /// Runs the rewrite loop to a fixed point, reporting each rewrite to `observer`.
    ///
    /// Calling this again restarts the loop from the current cubes. The unlink rule is
    /// not re-armed, so a second call can behave differently from the first.
    pub fn minimize_with(
        &mut self,
        mut observer: impl RewriteObserver,
    ) -> Result<&[Cube], EsopError> {
        self.state = EngineState::Minimizing;
        self.minimized_cost = None;
        info!(
            "starting minimization: {} cubes of width {}",
            self.current.cube_count(),
            self.current.width()
        );

        let limit = self.config.iteration_limit();
        for iteration in 0..limit {
            let outcome = self.step();
            trace!(
                "iteration {}: {} cubes after {:?}",
                iteration,
                self.current.cube_count(),
                outcome
            );
            if !outcome.is_change() {
                let minimized_cost = self.current.cube_count();
                self.minimized_cost = Some(minimized_cost);
                self.state = EngineState::Done;
                info!(
                    "minimization complete after {} iterations: {} cubes remain (from {})",
                    iteration,
                    minimized_cost,
                    self.initial_cost()
                );
                return Ok(self.current.cubes());
            }
            observer.on_rule_applied(iteration, &outcome);
        }

        Err(EsopError::IterationLimit { limit })
    }

    /// Applies the highest-priority rule that fires.
    fn step(&mut self) -> RuleOutcome {
        let split_rule = self.config.split_rule();
        let cubes = self.current.cubes_mut();

        if let Some(removed) = rules::cancel_duplicates(cubes) {
            return RuleOutcome::Cancelled { removed };
        }
        if let Some(outcome) = rules::link_first_pair(cubes, split_rule) {
            return outcome;
        }
        if !self.unlinked {
            if let Some(outcome) = rules::unlink_first(cubes) {
                self.unlinked = true;
                return outcome;
            }
        }
        RuleOutcome::NoChange
    }

    /// Evaluates the initial cover on `assignment`.
    pub fn evaluate(&self, assignment: &BitSlice) -> Result<bool, EsopError> {
        self.require_done("evaluate")?;
        self.initial.evaluate(assignment)
    }

    /// Evaluates the minimized cover on `assignment`.
    pub fn minimized_evaluate(&self, assignment: &BitSlice) -> Result<bool, EsopError> {
        self.require_done("minimized_evaluate")?;
        self.current.evaluate(assignment)
    }

    /// Returns the first assignment on which the initial and minimized covers differ.
    pub fn check_equivalent(&self) -> Result<Option<BitVec>, EsopError> {
        self.require_done("check_equivalent")?;
        self.initial.find_counterexample(&self.current)
    }

    /// Exhaustively checks that the minimized cover computes the same function as the
    /// initial one.
    pub fn is_equivalent(&self) -> Result<bool, EsopError> {
        self.require_done("is_equivalent")?;
        self.initial.is_logically_equivalent(&self.current)
    }

    pub fn cost_reduction(&self) -> Result<CostReduction, EsopError> {
        self.require_done("cost_reduction")?;
        let initial_cost = self.initial_cost();
        let minimized_cost = self
            .minimized_cost
            .ok_or(EsopError::NotMinimized {
                operation: "cost_reduction",
            })?;
        let ratio = if minimized_cost == 0 {
            f64::INFINITY
        } else {
            initial_cost as f64 / minimized_cost as f64
        };
        Ok(CostReduction {
            initial_cost,
            minimized_cost,
            ratio,
        })
    }

    fn require_done(&self, operation: &'static str) -> Result<(), EsopError> {
        match self.state {
            EngineState::Done => Ok(()),
            EngineState::Fresh | EngineState::Minimizing => {
                Err(EsopError::NotMinimized { operation })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exorcism::{RewriteEvent, SplitRule};
    use bitvec::prelude::*;
    use pretty_assertions::assert_eq;

    fn minimized(exorcism: &mut Exorcism) -> Vec<String> {
        exorcism
            .minimize()
            .expect("minimization succeeds")
            .iter()
            .map(|c| c.to_string())
            .collect()
    }

    fn exact() -> ExorcismConfig {
        ExorcismConfig::default().with_split_rule(SplitRule::Exact)
    }

    #[test]
    fn test_merge_distance_one() {
        let mut exorcism = Exorcism::from_strs(["10", "00"]).unwrap();
        let mut events: Vec<RewriteEvent> = Vec::new();
        exorcism.minimize_with(&mut events).unwrap();
        assert_eq!(exorcism.current().matrix_display().to_string(), "-0\n");

        // merge, unlink the merged cube, merge again
        let rules: Vec<_> = events
            .iter()
            .map(|event| match event.outcome {
                RuleOutcome::Merged { .. } => "merge",
                RuleOutcome::Unlinked { .. } => "unlink",
                _ => "other",
            })
            .collect();
        assert_eq!(rules, ["merge", "unlink", "merge"]);
        assert_eq!(exorcism.state(), EngineState::Done);
        assert_eq!(exorcism.minimized_cost(), Some(1));
    }

    #[test]
    fn test_duplicate_cancellation() {
        let mut exorcism = Exorcism::from_strs(["111", "111", "010"]).unwrap();
        let mut events: Vec<RewriteEvent> = Vec::new();
        exorcism.minimize_with(&mut events).unwrap();
        assert_eq!(
            events[0],
            RewriteEvent {
                iteration: 0,
                outcome: RuleOutcome::Cancelled { removed: 2 },
            }
        );
        assert_eq!(minimized(&mut exorcism), ["010"]);
        assert!(exorcism.is_equivalent().unwrap());

        // Non-adjacent copies cancel too.
        let mut exorcism = Exorcism::from_strs(["0-1", "110", "100", "0-1"]).unwrap();
        assert!(!minimized(&mut exorcism).contains(&"0-1".to_owned()));
        assert!(exorcism.is_equivalent().unwrap());
    }

    #[test]
    fn test_single_cube() {
        let mut exorcism = Exorcism::from_strs(["110"]).unwrap();
        let mut events: Vec<RewriteEvent> = Vec::new();
        exorcism.minimize_with(&mut events).unwrap();
        assert!(events.is_empty());
        assert_eq!(exorcism.current().cubes(), &["110".parse::<Cube>().unwrap()]);

        // A don't care is unlinked exactly once, then merged back.
        let mut exorcism = Exorcism::from_strs(["1-0"]).unwrap();
        let mut events: Vec<RewriteEvent> = Vec::new();
        exorcism.minimize_with(&mut events).unwrap();
        assert_eq!(
            events[0].outcome,
            RuleOutcome::Unlinked {
                cube: "1-0".parse().unwrap(),
                position: 1,
                produced: ("100".parse().unwrap(), "110".parse().unwrap()),
            }
        );
        assert_eq!(
            events
                .iter()
                .filter(|e| matches!(e.outcome, RuleOutcome::Unlinked { .. }))
                .count(),
            1
        );
        assert_eq!(exorcism.current().matrix_display().to_string(), "1-0\n");
        assert!(exorcism.is_equivalent().unwrap());
    }

    #[test]
    fn test_split_first_cube_regression() {
        // The default split rule derives both cubes from the first cube of the pair, which
        // changes the function. Pin the current output.
        let mut exorcism = Exorcism::from_strs(["101", "011"]).unwrap();
        assert_eq!(minimized(&mut exorcism), ["1-1", "-01"]);
        assert!(!exorcism.is_equivalent().unwrap());
        assert_eq!(exorcism.check_equivalent().unwrap(), Some(bitvec![0, 0, 1]));
    }

    #[test]
    fn test_split_exact() {
        let mut exorcism = Exorcism::from_strs(["101", "011"]).unwrap().with_config(exact());
        assert_eq!(minimized(&mut exorcism), ["0-1", "-01"]);
        assert!(exorcism.is_equivalent().unwrap());
        assert_eq!(exorcism.check_equivalent().unwrap(), None);
    }

    #[test]
    fn test_four_cube_example() {
        let cubes = ["011", "100", "101", "110"];

        let mut exorcism = Exorcism::from_strs(cubes).unwrap().with_config(exact());
        assert_eq!(minimized(&mut exorcism), ["1--", "-11"]);
        assert!(exorcism.is_equivalent().unwrap());
        for assignment in crate::esop::Assignments::new(3).unwrap() {
            assert_eq!(
                exorcism.evaluate(&assignment).unwrap(),
                exorcism.minimized_evaluate(&assignment).unwrap(),
                "assignment {:?}",
                assignment
            );
        }
        let cost = exorcism.cost_reduction().unwrap();
        assert_eq!(
            cost,
            CostReduction {
                initial_cost: 4,
                minimized_cost: 2,
                ratio: 2.0,
            }
        );

        let mut exorcism = Exorcism::from_strs(cubes).unwrap();
        assert_eq!(minimized(&mut exorcism), ["--1", "0--", "-11"]);
        assert!(!exorcism.is_equivalent().unwrap());
    }

    #[test]
    fn test_preconditions() {
        let exorcism = Exorcism::from_strs(["01", "10"]).unwrap();
        assert_eq!(exorcism.state(), EngineState::Fresh);
        assert_eq!(
            exorcism.is_equivalent(),
            Err(EsopError::NotMinimized {
                operation: "is_equivalent"
            })
        );
        assert!(matches!(
            exorcism.cost_reduction(),
            Err(EsopError::NotMinimized { .. })
        ));
        assert!(exorcism.evaluate(bits![0, 1]).is_err());
        assert!(exorcism.minimized_evaluate(bits![0, 1]).is_err());
        assert!(exorcism.check_equivalent().is_err());
    }

    #[test]
    fn test_width_validation() {
        assert_eq!(
            Exorcism::from_strs(["01", "101"]).unwrap_err(),
            EsopError::WidthMismatch {
                expected: 2,
                got: 3,
                index: Some(1),
            }
        );
        assert!(Exorcism::from_pla_str(".i 2\n01 1\n101 1\n").is_err());

        let mut exorcism = Exorcism::from_strs(["01"]).unwrap();
        exorcism.minimize().unwrap();
        assert!(matches!(
            exorcism.evaluate(bits![0, 1, 1]),
            Err(EsopError::WidthMismatch { index: None, .. })
        ));
    }

    #[test]
    fn test_from_pla() {
        let mut exorcism =
            Exorcism::from_pla_lines([".i 2", "00 0", "01 1", "10 1", "11 0", ".e"]).unwrap();
        assert_eq!(exorcism.initial_cost(), 2);
        // 01 ^ 10 is a distance-2 pair.
        minimized(&mut exorcism);
        assert_eq!(exorcism.state(), EngineState::Done);
    }

    #[test]
    fn test_empty_cover() {
        let mut exorcism = Exorcism::from_cubes(Vec::new()).unwrap();
        assert!(minimized(&mut exorcism).is_empty());
        assert!(exorcism.is_equivalent().unwrap());
        let cost = exorcism.cost_reduction().unwrap();
        assert_eq!(cost.minimized_cost, 0);
        assert!(cost.ratio.is_infinite());

        // Everything cancels.
        let mut exorcism = Exorcism::from_strs(["1-", "1-"]).unwrap();
        assert!(minimized(&mut exorcism).is_empty());
        assert_eq!(exorcism.cost_reduction().unwrap().ratio, f64::INFINITY);
    }

    #[test]
    fn test_unlink_is_one_shot() {
        let mut exorcism = Exorcism::from_strs(["1-0"]).unwrap();
        minimized(&mut exorcism);
        assert!(exorcism.has_unlinked());

        // A second call starts from the minimized cubes and never unlinks again.
        let mut events: Vec<RewriteEvent> = Vec::new();
        exorcism.minimize_with(&mut events).unwrap();
        assert!(events.is_empty());
        assert_eq!(exorcism.current().matrix_display().to_string(), "1-0\n");
        assert_eq!(exorcism.state(), EngineState::Done);
    }

    #[test]
    fn test_iteration_limit() {
        let mut exorcism = Exorcism::from_strs(["10", "00"])
            .unwrap()
            .with_config(ExorcismConfig::default().with_iteration_limit(2));
        assert_eq!(
            exorcism.minimize().unwrap_err(),
            EsopError::IterationLimit { limit: 2 }
        );
        assert_eq!(exorcism.state(), EngineState::Minimizing);
        assert!(exorcism.is_equivalent().is_err());

        // Four iterations: three rewrites and the final check.
        let mut exorcism = Exorcism::from_strs(["10", "00"])
            .unwrap()
            .with_config(ExorcismConfig::default().with_iteration_limit(4));
        assert!(exorcism.minimize().is_ok());
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use crate::{
        exorcism::{RewriteEvent, SplitRule},
        proptest_helpers::EsopCoverParams,
    };
    use proptest::prelude::*;

    fn covers() -> impl Strategy<Value = EsopCover> {
        (1_usize..=5).prop_flat_map(|width| {
            any_with::<EsopCover>(EsopCoverParams {
                width,
                min_size: 0,
                max_size: 12,
            })
        })
    }

    proptest! {
        #[test]
        fn exact_split_preserves_function(cover in covers()) {
            let mut exorcism = Exorcism::new(cover)
                .with_config(ExorcismConfig::default().with_split_rule(SplitRule::Exact));
            exorcism.minimize().unwrap();
            prop_assert_eq!(exorcism.check_equivalent().unwrap(), None);
        }

        #[test]
        fn runs_without_splits_preserve_function(cover in covers()) {
            let mut exorcism = Exorcism::new(cover);
            let mut events: Vec<RewriteEvent> = Vec::new();
            exorcism.minimize_with(&mut events).unwrap();
            let split = events
                .iter()
                .any(|event| matches!(event.outcome, RuleOutcome::Split { .. }));
            if !split {
                prop_assert!(exorcism.is_equivalent().unwrap());
            }
        }

        #[test]
        fn result_is_a_fixed_point(cover in covers()) {
            let mut exorcism = Exorcism::new(cover);
            let cubes = exorcism.minimize().unwrap().to_vec();
            for (ix, a) in cubes.iter().enumerate() {
                for b in &cubes[ix + 1..] {
                    prop_assert_ne!(a, b);
                    let distance = a.link_distance(b).distance();
                    prop_assert!(
                        !matches!(distance, Some(1) | Some(2)),
                        "{} and {} are still linkable", a, b
                    );
                }
            }
        }
    }
}
