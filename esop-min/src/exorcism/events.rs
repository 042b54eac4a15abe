// Copyright (c) The esop-min Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::exorcism::RuleOutcome;
use log::debug;

/// Receives a notification each time a rewrite rule fires during minimization.
pub trait RewriteObserver {
    fn on_rule_applied(&mut self, iteration: usize, outcome: &RuleOutcome);
}

impl<'a, T: RewriteObserver + ?Sized> RewriteObserver for &'a mut T {
    fn on_rule_applied(&mut self, iteration: usize, outcome: &RuleOutcome) {
        (**self).on_rule_applied(iteration, outcome)
    }
}

/// Forwards every rewrite to the `log` facade at debug level.
#[derive(Copy, Clone, Debug, Default)]
pub struct LogObserver;

impl RewriteObserver for LogObserver {
    fn on_rule_applied(&mut self, iteration: usize, outcome: &RuleOutcome) {
        debug!("iteration {}: {}", iteration, outcome);
    }
}

/// A rewrite recorded by the `Vec<RewriteEvent>` observer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RewriteEvent {
    pub iteration: usize,
    pub outcome: RuleOutcome,
}

impl RewriteObserver for Vec<RewriteEvent> {
    fn on_rule_applied(&mut self, iteration: usize, outcome: &RuleOutcome) {
        self.push(RewriteEvent {
            iteration,
            outcome: outcome.clone(),
        });
    }
}
