// Copyright (c) The esop-min Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::{cube::Cube, esop::EsopCover};
use proptest::prelude::*;

/// The width used by `any::<Cube>()`.
pub const DEFAULT_ARBITRARY_WIDTH: usize = 4;

impl Arbitrary for Cube {
    /// The width of the generated cube, or `DEFAULT_ARBITRARY_WIDTH`.
    type Parameters = Option<usize>;
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(width: Self::Parameters) -> Self::Strategy {
        let width = width.unwrap_or(DEFAULT_ARBITRARY_WIDTH);
        prop::collection::vec(any::<Option<bool>>(), width)
            .prop_map(|literals| Cube::new(literals))
            .boxed()
    }
}

/// Parameters for generating an [`EsopCover`].
#[derive(Copy, Clone, Debug)]
pub struct EsopCoverParams {
    pub width: usize,
    pub min_size: usize,
    /// Exclusive upper bound on the number of cubes.
    pub max_size: usize,
}

impl Default for EsopCoverParams {
    fn default() -> Self {
        Self {
            width: DEFAULT_ARBITRARY_WIDTH,
            min_size: 0,
            max_size: 16,
        }
    }
}

impl Arbitrary for EsopCover {
    type Parameters = EsopCoverParams;
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(params: Self::Parameters) -> Self::Strategy {
        let EsopCoverParams {
            width,
            min_size,
            max_size,
        } = params;
        // Small widths make duplicate and adjacent cubes likely, which is what exercises
        // the rewrite rules.
        prop::collection::vec(any_with::<Cube>(Some(width)), min_size..max_size)
            .prop_map(move |cubes| {
                EsopCover::with_width(width, cubes).expect("all cubes have the same width")
            })
            .boxed()
    }
}
