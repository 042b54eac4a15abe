// Copyright (c) The esop-min Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Extraction of the on-set cubes from a single-output PLA description.
//!
//! Parsing is permissive: directives (`.i`, `.o`, `.type`, `.e`, ...), blank lines, rows
//! whose output is not `1` and rows that do not look like `<cube> <output>` are skipped
//! without an error.

use crate::cube::Cube;
use log::trace;

/// Returns the cubes of every row whose output is `1`, in input order.
///
/// ```
/// use esop_min::pla::parse_on_set;
///
/// let cubes = parse_on_set([".i 2", "00 0", "01 1", "10 1", "11 0", ".e"]);
/// let cubes: Vec<_> = cubes.iter().map(|c| c.to_string()).collect();
/// assert_eq!(cubes, ["01", "10"]);
/// ```
pub fn parse_on_set<S: AsRef<str>>(lines: impl IntoIterator<Item = S>) -> Vec<Cube> {
    lines
        .into_iter()
        .enumerate()
        .filter_map(|(line_ix, line)| parse_row(line_ix, line.as_ref()))
        .collect()
}

/// Same as [`parse_on_set`], splitting `text` into lines first.
#[inline]
pub fn parse_on_set_str(text: &str) -> Vec<Cube> {
    parse_on_set(text.lines())
}

fn parse_row(line_ix: usize, line: &str) -> Option<Cube> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('.') {
        return None;
    }

    let mut fields = line.split_whitespace();
    let (cube, output) = match (fields.next(), fields.next(), fields.next()) {
        (Some(cube), Some(output), None) => (cube, output),
        _ => {
            trace!("line {}: skipping row {:?}", line_ix + 1, line);
            return None;
        }
    };
    if output != "1" {
        return None;
    }
    match cube.parse() {
        Ok(cube) => Some(cube),
        Err(err) => {
            trace!("line {}: skipping row: {}", line_ix + 1, err);
            None
        }
    }
}
