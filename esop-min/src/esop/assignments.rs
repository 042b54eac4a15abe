// Copyright (c) The esop-min Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::errors::EsopError;
use bitvec::vec::BitVec;

/// The largest width for which every assignment can be enumerated.
pub const MAX_EXHAUSTIVE_WIDTH: usize = 32;

/// Iterator over all `2^width` assignments in counting order.
///
/// Position 0 is the most significant bit, so for width 2 the order is `00`, `01`, `10`,
/// `11`.
#[derive(Clone, Debug)]
pub struct Assignments {
    width: usize,
    next: u64,
    end: u64,
}

impl Assignments {
    pub fn new(width: usize) -> Result<Self, EsopError> {
        if width > MAX_EXHAUSTIVE_WIDTH {
            return Err(EsopError::TooWide {
                width,
                max: MAX_EXHAUSTIVE_WIDTH,
            });
        }
        Ok(Self {
            width,
            next: 0,
            end: 1_u64 << width,
        })
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }
}

impl Iterator for Assignments {
    type Item = BitVec;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.end {
            return None;
        }
        let bits = self.next;
        self.next += 1;

        let mut assignment = BitVec::repeat(false, self.width);
        for position in 0..self.width {
            let shift = self.width - 1 - position;
            assignment.set(position, (bits >> shift) & 1 == 1);
        }
        Some(assignment)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.end - self.next) as usize;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Assignments {}
