// Copyright (c) The esop-min Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::errors::EsopError;
use bitvec::slice::BitSlice;
use std::{borrow::Cow, fmt, str::FromStr};

/// A product term over `width()` input variables.
///
/// Each literal is `Some(false)` (the variable appears complemented), `Some(true)` (the
/// variable appears uncomplemented) or `None` (don't care).
#[derive(Clone, Debug, PartialEq, Eq, Hash, Ord, PartialOrd)]
pub struct Cube {
    pub literals: Vec<Option<bool>>,
}

impl Cube {
    #[inline]
    pub fn new(literals: impl IntoIterator<Item = Option<bool>>) -> Self {
        Self {
            literals: literals.into_iter().collect(),
        }
    }

    // Uses the representation in the Espresso book.
    pub fn from_numeric(numeric: &[u8]) -> Result<Self, EsopError> {
        let mut literals = Vec::with_capacity(numeric.len());
        for (position, &val) in numeric.iter().enumerate() {
            match val {
                0 => literals.push(Some(false)),
                1 => literals.push(Some(true)),
                2 => literals.push(None),
                _ => {
                    return Err(EsopError::InvalidCube {
                        cube: numeric.iter().map(|v| v.to_string()).collect(),
                        position,
                        found: char::from_digit(val as u32, 10).unwrap_or('?'),
                    });
                }
            }
        }
        Ok(Self { literals })
    }

    /// The cube with every literal set to don't care.
    pub fn universe(width: usize) -> Self {
        Self {
            literals: vec![None; width],
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.literals.len()
    }

    /// Returns true if every literal is a don't care.
    ///
    /// Such a cube matches every assignment, so in a phase polynomial it only contributes a
    /// global phase.
    pub fn is_universe(&self) -> bool {
        self.literals.iter().all(|lit| lit.is_none())
    }

    #[inline]
    pub fn dont_care_count(&self) -> usize {
        self.literals.iter().filter(|lit| lit.is_none()).count()
    }

    #[inline]
    pub fn first_dont_care(&self) -> Option<usize> {
        self.literals.iter().position(|lit| lit.is_none())
    }

    #[inline]
    pub fn matrix_display(&self) -> CubeMatrixDisplay<'_> {
        CubeMatrixDisplay::new(self)
    }

    #[inline]
    pub fn algebraic_display(&self) -> CubeAlgebraicDisplay<'_> {
        CubeAlgebraicDisplay::new(self)
    }

    /// Returns true if every concrete literal equals the corresponding assignment bit.
    ///
    /// Panics if `assignment` is shorter than the cube.
    pub fn matches(&self, assignment: &BitSlice) -> bool {
        assert!(
            assignment.len() >= self.width(),
            "assignment of length {} is too short for a cube of width {}",
            assignment.len(),
            self.width()
        );
        for (literal, value) in self.literals.iter().zip(assignment.iter()) {
            match (literal, *value) {
                (Some(v), value) => {
                    if *v != value {
                        return false;
                    }
                }
                (None, _) => {}
            }
        }
        true
    }

    /// Computes the distance used by the merge and split rules.
    ///
    /// Two cubes are comparable only if every position where they differ holds a
    /// concrete literal on both sides; a don't care facing a `0` or `1` makes the pair
    /// incomparable.
    ///
    /// # Examples
    ///
    /// ```
    /// use esop_min::cube::{Cube, LinkDistance};
    ///
    /// let a: Cube = "1-0".parse().unwrap();
    /// let b: Cube = "1-1".parse().unwrap();
    /// let c: Cube = "0-1".parse().unwrap();
    /// let d: Cube = "1-1-".parse().unwrap();
    /// let e: Cube = "0-11".parse().unwrap();
    ///
    /// assert_eq!(a.link_distance(&b), LinkDistance::Comparable(vec![2]));
    /// assert_eq!(a.link_distance(&c), LinkDistance::Comparable(vec![0, 2]));
    /// assert_eq!(d.link_distance(&e), LinkDistance::Incomparable);
    /// ```
    ///
    /// Panics if the cubes have different widths.
    pub fn link_distance(&self, other: &Cube) -> LinkDistance {
        assert_eq!(
            self.width(),
            other.width(),
            "cubes of different widths cannot be compared"
        );
        let mut positions = Vec::new();
        for (ix, (&c, &d)) in self.literals.iter().zip(&other.literals).enumerate() {
            match (c, d) {
                (c, d) if c == d => {}
                (Some(_), Some(_)) => positions.push(ix),
                (None, _) | (_, None) => return LinkDistance::Incomparable,
            }
        }
        LinkDistance::Comparable(positions)
    }

    /// Returns a copy of this cube with the literal at `position` replaced.
    pub fn with_literal(&self, position: usize, literal: Option<bool>) -> Self {
        let mut literals = self.literals.clone();
        literals[position] = literal;
        Self { literals }
    }

    /// Returns a copy of this cube with `position` raised to a don't care.
    #[inline]
    pub fn raise(&self, position: usize) -> Self {
        self.with_literal(position, None)
    }

    /// Expands `position` into its two concrete specialisations, `0` first.
    #[inline]
    pub fn expand(&self, position: usize) -> (Self, Self) {
        (
            self.with_literal(position, Some(false)),
            self.with_literal(position, Some(true)),
        )
    }
}

impl FromStr for Cube {
    type Err = EsopError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let literals = s
            .chars()
            .enumerate()
            .map(|(position, ch)| match ch {
                '0' => Ok(Some(false)),
                '1' => Ok(Some(true)),
                '-' => Ok(None),
                found => Err(EsopError::InvalidCube {
                    cube: s.to_owned(),
                    position,
                    found,
                }),
            })
            .collect::<Result<_, _>>()?;
        Ok(Self { literals })
    }
}

impl fmt::Display for Cube {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.matrix_display())
    }
}

/// Result of [`Cube::link_distance`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LinkDistance {
    /// The cubes differ only in concrete literals, at these positions (ascending).
    Comparable(Vec<usize>),
    /// A don't care faces a concrete literal somewhere.
    Incomparable,
}

impl LinkDistance {
    /// The number of differing positions, or `None` for incomparable cubes.
    pub fn distance(&self) -> Option<usize> {
        match self {
            Self::Comparable(positions) => Some(positions.len()),
            Self::Incomparable => None,
        }
    }
}

pub struct CubeMatrixDisplay<'a> {
    cube: &'a Cube,
    format: MatrixDisplayFormat,
    internal_separator: Cow<'a, str>,
}

impl<'a> CubeMatrixDisplay<'a> {
    pub fn new(cube: &'a Cube) -> Self {
        Self {
            cube,
            format: MatrixDisplayFormat::default(),
            internal_separator: Cow::Borrowed(""),
        }
    }

    pub fn with_format(mut self, format: MatrixDisplayFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_internal_separator(mut self, separator: impl Into<Cow<'a, str>>) -> Self {
        self.internal_separator = separator.into();
        self
    }
}

impl<'a> fmt::Display for CubeMatrixDisplay<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let width = self.cube.width();
        for (ix, &literal) in self.cube.literals.iter().enumerate() {
            write!(f, "{}", self.format.char_for_literal(literal))?;
            if ix + 1 < width {
                write!(f, "{}", self.internal_separator)?;
            }
        }
        Ok(())
    }
}

#[derive(Copy, Clone, Debug)]
pub enum MatrixDisplayFormat {
    /// Display a cube using the format `100-1`, with dashes representing don't cares.
    Dashes,

    /// Display a cube using the format `10021`, with `2` representing don't cares.
    Numeric,
}

impl MatrixDisplayFormat {
    /// Returns the character that would be displayed for a literal.
    pub fn char_for_literal(self, literal: Option<bool>) -> char {
        match literal {
            Some(true) => '1',
            Some(false) => '0',
            None => match self {
                Self::Dashes => '-',
                Self::Numeric => '2',
            },
        }
    }
}

impl Default for MatrixDisplayFormat {
    fn default() -> Self {
        Self::Dashes
    }
}

pub struct CubeAlgebraicDisplay<'a> {
    cube: &'a Cube,
}

impl<'a> CubeAlgebraicDisplay<'a> {
    pub fn new(cube: &'a Cube) -> Self {
        Self { cube }
    }
}

impl<'a> fmt::Display for CubeAlgebraicDisplay<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.cube.is_universe() {
            return write!(f, "1");
        }
        for (ix, literal) in self.cube.literals.iter().enumerate() {
            match literal {
                Some(true) => write!(f, "{}", AlgebraicSymbol::input(ix))?,
                Some(false) => write!(f, "{}'", AlgebraicSymbol::input(ix))?,
                None => {}
            };
        }
        Ok(())
    }
}

const INPUT_ALGEBRAIC_SYMBOLS: [char; 26] = [
    'a', 'b', 'c', 'd', 'e', 'f', 'g', 'h', 'i', 'j', 'k', 'l', 'm', 'n', 'o', 'p', 'q', 'r', 's',
    't', 'u', 'v', 'w', 'x', 'y', 'z',
];

#[derive(Debug)]
pub(crate) enum AlgebraicSymbol {
    Char(char),
    String(String),
}

impl AlgebraicSymbol {
    pub(crate) fn input(ix: usize) -> Self {
        if ix < 26 {
            return Self::Char(INPUT_ALGEBRAIC_SYMBOLS[ix]);
        }
        let last_ch = INPUT_ALGEBRAIC_SYMBOLS[ix % 26];

        match Self::input(ix / 26 - 1) {
            Self::Char(ch) => Self::String(format!("{}{}", ch, last_ch)),
            Self::String(mut s) => {
                s.push(last_ch);
                Self::String(s)
            }
        }
    }
}

impl fmt::Display for AlgebraicSymbol {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Char(ch) => write!(f, "{}", *ch),
            Self::String(s) => write!(f, "{}", s),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bitvec::prelude::*;

    fn cube(s: &str) -> Cube {
        s.parse().expect("valid cube")
    }

    #[test]
    fn test_parse_and_display() {
        let c = cube("1-0");
        assert_eq!(c.literals, vec![Some(true), None, Some(false)]);
        assert_eq!(c.to_string(), "1-0");
        assert_eq!(
            c.matrix_display()
                .with_format(MatrixDisplayFormat::Numeric)
                .with_internal_separator(" ")
                .to_string(),
            "1 2 0"
        );
        assert_eq!(c, Cube::from_numeric(&[1, 2, 0]).unwrap());
        assert_eq!(cube("").width(), 0);

        let err = "1x0".parse::<Cube>().unwrap_err();
        assert_eq!(
            err,
            EsopError::InvalidCube {
                cube: "1x0".to_owned(),
                position: 1,
                found: 'x',
            }
        );
        assert!(Cube::from_numeric(&[0, 3]).is_err());
    }

    #[test]
    fn test_algebraic_display() {
        assert_eq!(cube("1-0").algebraic_display().to_string(), "ac'");
        assert_eq!(cube("---").algebraic_display().to_string(), "1");
        assert_eq!(AlgebraicSymbol::input(26).to_string(), "aa");
        assert_eq!(AlgebraicSymbol::input(27).to_string(), "ab");
        assert_eq!(AlgebraicSymbol::input(52).to_string(), "ba");
    }

    #[test]
    fn test_link_distance() {
        // Concrete difference at one position, shared don't care elsewhere.
        assert_eq!(cube("1-0").link_distance(&cube("1-1")).distance(), Some(1));
        // A don't care aligned with a concrete literal.
        assert_eq!(
            cube("1-0").link_distance(&cube("10-")),
            LinkDistance::Incomparable
        );
        assert_eq!(cube("-10").link_distance(&cube("010")).distance(), None);
        assert_eq!(
            cube("101").link_distance(&cube("011")),
            LinkDistance::Comparable(vec![0, 1])
        );
        assert_eq!(cube("101").link_distance(&cube("101")).distance(), Some(0));
    }

    #[test]
    #[should_panic(expected = "different widths")]
    fn test_link_distance_width_mismatch() {
        cube("10").link_distance(&cube("100"));
    }

    #[test]
    fn test_matches() {
        let c = cube("1-0");
        assert!(c.matches(bits![1, 0, 0]));
        assert!(c.matches(bits![1, 1, 0]));
        assert!(!c.matches(bits![0, 1, 0]));
        assert!(!c.matches(bits![1, 1, 1]));
        assert!(Cube::universe(3).matches(bits![0, 1, 1]));
    }

    #[test]
    fn test_raise_and_expand() {
        let c = cube("1-0");
        assert_eq!(c.first_dont_care(), Some(1));
        assert_eq!(c.dont_care_count(), 1);
        assert_eq!(c.raise(0), cube("--0"));
        assert_eq!(c.expand(1), (cube("100"), cube("110")));
        assert!(!c.is_universe());
        assert!(Cube::universe(2).is_universe());
        assert_eq!(cube("101").first_dont_care(), None);
    }
}
