// Copyright (c) The esop-min Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::{cube::MatrixDisplayFormat, esop::EsopCover};
use itertools::{Itertools, Position};
use std::{borrow::Cow, fmt};

#[derive(Clone, Debug)]
pub struct EsopMatrixDisplay<'a> {
    cover: &'a EsopCover,
    format: MatrixDisplayFormat,
    internal_separator: Cow<'a, str>,
    cube_separator: (Cow<'a, str>, bool),
}

impl<'a> EsopMatrixDisplay<'a> {
    pub fn new(cover: &'a EsopCover) -> Self {
        Self {
            cover,
            format: MatrixDisplayFormat::default(),
            internal_separator: Cow::Borrowed(""),
            cube_separator: (Cow::Borrowed("\n"), true),
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

    pub fn with_cube_separator(
        mut self,
        separator: impl Into<Cow<'a, str>>,
        print_last: bool,
    ) -> Self {
        self.cube_separator = (separator.into(), print_last);
        self
    }
}

impl<'a> fmt::Display for EsopMatrixDisplay<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let cube_count = self.cover.cube_count();
        for (cube_ix, cube) in self.cover.cubes().iter().enumerate() {
            let cube_display = cube
                .matrix_display()
                .with_format(self.format)
                .with_internal_separator(&*self.internal_separator);
            write!(f, "{}", cube_display)?;

            let (cube_separator, print_last) = &self.cube_separator;
            if *print_last || cube_ix < cube_count - 1 {
                write!(f, "{}", cube_separator)?;
            }
        }

        Ok(())
    }
}

/// Displays a cover as an XOR of products, for example `ab' ^ c`.
pub struct EsopAlgebraicDisplay<'a> {
    cover: &'a EsopCover,
}

impl<'a> EsopAlgebraicDisplay<'a> {
    pub fn new(cover: &'a EsopCover) -> Self {
        Self { cover }
    }
}

impl<'a> fmt::Display for EsopAlgebraicDisplay<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.cover.is_empty() {
            return write!(f, "0");
        }
        for elem in self.cover.cubes().iter().with_position() {
            match elem {
                Position::First(cube) | Position::Middle(cube) => {
                    write!(f, "{} ^ ", cube.algebraic_display())?;
                }
                Position::Last(cube) | Position::Only(cube) => {
                    write!(f, "{}", cube.algebraic_display())?;
                }
            }
        }
        Ok(())
    }
}

/// Displays a cover as a single-output PLA of type `esop`.
///
/// The output parses back with [`crate::pla::parse_on_set_str`].
pub struct EsopPlaDisplay<'a> {
    cover: &'a EsopCover,
}

impl<'a> EsopPlaDisplay<'a> {
    pub fn new(cover: &'a EsopCover) -> Self {
        Self { cover }
    }
}

impl<'a> fmt::Display for EsopPlaDisplay<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, ".i {}", self.cover.width())?;
        writeln!(f, ".o 1")?;
        writeln!(f, ".p {}", self.cover.cube_count())?;
        writeln!(f, ".type esop")?;
        for cube in self.cover.cubes() {
            writeln!(f, "{} 1", cube)?;
        }
        writeln!(f, ".e")
    }
}
