// Copyright (c) The esop-min Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Greedy minimization of exclusive-sum-of-products (ESOP) covers.
//!
//! An ESOP is the XOR of a multiset of cubes. [`exorcism::Exorcism`] rewrites such a
//! multiset into a smaller one by cancelling duplicates, merging and splitting pairs of
//! nearby cubes, and unlinking one don't care. [`circuit::PhaseCircuit`] maps the result
//! onto multi-controlled phase rotations.
//!
//! ```
//! use esop_min::exorcism::{Exorcism, ExorcismConfig, SplitRule};
//!
//! let pla = ".i 3\n.o 1\n011 1\n100 1\n101 1\n110 1\n.e\n";
//! let mut exorcism = Exorcism::from_pla_str(pla)
//!     .unwrap()
//!     .with_config(ExorcismConfig::default().with_split_rule(SplitRule::Exact));
//! exorcism.minimize().unwrap();
//! assert_eq!(exorcism.minimized_cost(), Some(2));
//! assert!(exorcism.is_equivalent().unwrap());
//! ```

pub mod circuit;
pub mod cube;
pub mod errors;
pub mod esop;
pub mod exorcism;
pub mod pla;
#[cfg(any(test, feature = "proptest1"))]
pub mod proptest_helpers;
