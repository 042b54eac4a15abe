// Copyright (c) The esop-min Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::{
    cube::Cube,
    errors::EsopError,
    esop::{Assignments, EsopAlgebraicDisplay, EsopMatrixDisplay, EsopPlaDisplay},
};
use bitvec::{slice::BitSlice, vec::BitVec};

/// An exclusive sum of products: the XOR of a multiset of cubes that share one width.
///
/// Duplicates are meaningful. Two copies of a cube cancel each other out, so the cover
/// is kept as an ordered list rather than a set.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EsopCover {
    width: usize,
    cubes: Vec<Cube>,
}

impl EsopCover {
    /// Creates a cover whose width is that of the first cube (0 if there are none).
    ///
    /// Returns an error if any cube has a different width.
    pub fn new(cubes: impl IntoIterator<Item = Cube>) -> Result<Self, EsopError> {
        let cubes: Vec<_> = cubes.into_iter().collect();
        let width = cubes.first().map_or(0, Cube::width);
        Self::from_vec(width, cubes)
    }

    /// Creates a cover of the given width.
    pub fn with_width(
        width: usize,
        cubes: impl IntoIterator<Item = Cube>,
    ) -> Result<Self, EsopError> {
        Self::from_vec(width, cubes.into_iter().collect())
    }

    /// Parses every string as a cube and creates a cover from the result.
    ///
    /// ```
    /// use esop_min::esop::EsopCover;
    ///
    /// let cover = EsopCover::from_strs(["011", "1-0"]).unwrap();
    /// assert_eq!(cover.width(), 3);
    /// assert!(EsopCover::from_strs(["011", "10"]).is_err());
    /// ```
    pub fn from_strs<S: AsRef<str>>(cubes: impl IntoIterator<Item = S>) -> Result<Self, EsopError> {
        let cubes = cubes
            .into_iter()
            .map(|s| s.as_ref().parse())
            .collect::<Result<Vec<Cube>, _>>()?;
        Self::new(cubes)
    }

    fn from_vec(width: usize, cubes: Vec<Cube>) -> Result<Self, EsopError> {
        if let Some((index, cube)) = cubes
            .iter()
            .enumerate()
            .find(|(_, cube)| cube.width() != width)
        {
            return Err(EsopError::WidthMismatch {
                expected: width,
                got: cube.width(),
                index: Some(index),
            });
        }
        Ok(Self { width, cubes })
    }

    /// Mutable access to the cubes, without re-validation. Callers must preserve the width.
    #[inline]
    pub(crate) fn cubes_mut(&mut self) -> &mut Vec<Cube> {
        &mut self.cubes
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn cube_count(&self) -> usize {
        self.cubes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cubes.is_empty()
    }

    #[inline]
    pub fn cubes(&self) -> &[Cube] {
        &self.cubes
    }

    #[inline]
    pub fn into_cubes(self) -> Vec<Cube> {
        self.cubes
    }

    #[inline]
    pub fn matrix_display(&self) -> EsopMatrixDisplay<'_> {
        EsopMatrixDisplay::new(self)
    }

    #[inline]
    pub fn algebraic_display(&self) -> EsopAlgebraicDisplay<'_> {
        EsopAlgebraicDisplay::new(self)
    }

    #[inline]
    pub fn pla_display(&self) -> EsopPlaDisplay<'_> {
        EsopPlaDisplay::new(self)
    }

    /// Returns the parity of the number of cubes matching `assignment`.
    pub fn evaluate(&self, assignment: &BitSlice) -> Result<bool, EsopError> {
        if assignment.len() != self.width {
            return Err(EsopError::WidthMismatch {
                expected: self.width,
                got: assignment.len(),
                index: None,
            });
        }
        Ok(self.evaluate_unchecked(assignment))
    }

    fn evaluate_unchecked(&self, assignment: &BitSlice) -> bool {
        self.cubes
            .iter()
            .fold(false, |acc, cube| acc ^ cube.matches(assignment))
    }

    /// Returns the first assignment (in counting order) on which `self` and `other`
    /// differ, or `None` if they compute the same function.
    pub fn find_counterexample(&self, other: &Self) -> Result<Option<BitVec>, EsopError> {
        if self.width != other.width {
            return Err(EsopError::WidthMismatch {
                expected: self.width,
                got: other.width,
                index: None,
            });
        }
        for assignment in Assignments::new(self.width)? {
            if self.evaluate_unchecked(&assignment) != other.evaluate_unchecked(&assignment) {
                return Ok(Some(assignment));
            }
        }
        Ok(None)
    }

    #[inline]
    pub fn is_logically_equivalent(&self, other: &Self) -> Result<bool, EsopError> {
        Ok(self.find_counterexample(other)?.is_none())
    }
}
