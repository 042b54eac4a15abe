// Copyright (c) The esop-min Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The ESOP minimization engine.
//!
//! [`Exorcism`] repeatedly applies local rewrite rules to a cover until none of them
//! fires. Each iteration applies exactly one rule, in priority order:
//!
//! 1. duplicate cancellation (`A ^ A = 0`),
//! 2. merging of a distance-1 pair or splitting of a distance-2 pair,
//! 3. unlinking of one don't care, at most once per engine.

mod config;
mod engine;
mod events;
mod rules;

pub use config::*;
pub use engine::*;
pub use events::*;
pub use rules::RuleOutcome;
