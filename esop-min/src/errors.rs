// Copyright (c) The esop-min Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use thiserror::Error;

/// Errors returned by cube parsing, cover construction and the minimization engine.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum EsopError {
    /// A cube literal string contained a character outside `{0, 1, -}`.
    #[error("invalid cube `{cube}`: unexpected character {found:?} at position {position}")]
    InvalidCube {
        cube: String,
        position: usize,
        found: char,
    },

    /// A cube (or an assignment) does not have the width shared by the rest of the cover.
    ///
    /// `index` is the position of the offending cube in its input list, or `None` for
    /// assignments.
    #[error("width mismatch{}: expected {expected} literals, got {got}", index_suffix(.index))]
    WidthMismatch {
        expected: usize,
        got: usize,
        index: Option<usize>,
    },

    /// An operation that needs a minimized cover was called before `minimize()` completed.
    #[error("`{operation}` requires a completed minimize() call")]
    NotMinimized { operation: &'static str },

    /// The rewrite loop ran for more iterations than allowed.
    #[error("minimization did not reach a fixed point within {limit} iterations")]
    IterationLimit { limit: usize },

    /// Exhaustive evaluation over `2^width` assignments is not supported at this width.
    #[error("cannot enumerate assignments of width {width} (maximum is {max})")]
    TooWide { width: usize, max: usize },
}

fn index_suffix(index: &Option<usize>) -> String {
    match index {
        Some(index) => format!(" for cube {}", index),
        None => String::new(),
    }
}
