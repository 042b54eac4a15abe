// Copyright (c) The esop-min Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::{
    cube::{Cube, LinkDistance},
    exorcism::SplitRule,
};
use itertools::Itertools;
use std::fmt;

/// The result of one rewrite iteration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RuleOutcome {
    /// No rule applies: the cover is at a fixed point.
    NoChange,

    /// Cubes occurring an even number of times were dropped, and cubes occurring an odd
    /// number of times were reduced to one copy.
    Cancelled { removed: usize },

    /// Two cubes differing in one concrete position were replaced by one cube.
    Merged {
        first: Cube,
        second: Cube,
        position: usize,
        merged: Cube,
    },

    /// Two cubes differing in two concrete positions were replaced by two cubes.
    Split {
        first: Cube,
        second: Cube,
        positions: (usize, usize),
        produced: (Cube, Cube),
    },

    /// A cube was replaced by its two specialisations at its first don't care.
    Unlinked {
        cube: Cube,
        position: usize,
        produced: (Cube, Cube),
    },
}

impl RuleOutcome {
    #[inline]
    pub fn is_change(&self) -> bool {
        !matches!(self, Self::NoChange)
    }
}

impl fmt::Display for RuleOutcome {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::NoChange => write!(f, "no change"),
            Self::Cancelled { removed } => write!(f, "removed {} duplicate cubes", removed),
            Self::Merged {
                first,
                second,
                merged,
                ..
            } => write!(f, "merged {} and {} into {}", first, second, merged),
            Self::Split {
                first,
                second,
                produced: (a, b),
                ..
            } => write!(f, "split {} and {} into {}, {}", first, second, a, b),
            Self::Unlinked {
                cube,
                produced: (a, b),
                ..
            } => write!(f, "unlinked {} into {}, {}", cube, a, b),
        }
    }
}

/// Keeps one copy of every cube that occurs an odd number of times, in order of first
/// occurrence. Returns the number of cubes removed, or `None` if nothing changed.
pub(super) fn cancel_duplicates(cubes: &mut Vec<Cube>) -> Option<usize> {
    let counts = cubes.iter().counts();
    if counts.len() == cubes.len() {
        return None;
    }

    let survivors: Vec<Cube> = cubes
        .iter()
        .unique()
        .filter(|cube| counts[cube] % 2 == 1)
        .cloned()
        .collect();
    let removed = cubes.len() - survivors.len();
    *cubes = survivors;
    Some(removed)
}

/// Finds the first pair `(i, j)`, `i < j`, at comparable distance 1 or 2 and rewrites it.
///
/// The rewritten list holds the untouched cubes in their original order, followed by the
/// cubes produced by the rewrite.
pub(super) fn link_first_pair(cubes: &mut Vec<Cube>, split_rule: SplitRule) -> Option<RuleOutcome> {
    let (i, j, outcome) = (0..cubes.len())
        .tuple_combinations()
        .find_map(|(i, j)| link_pair(&cubes[i], &cubes[j], split_rule).map(|o| (i, j, o)))?;

    let mut rebuilt: Vec<Cube> = cubes
        .drain(..)
        .enumerate()
        .filter_map(|(ix, cube)| (ix != i && ix != j).then(|| cube))
        .collect();
    match &outcome {
        RuleOutcome::Merged { merged, .. } => rebuilt.push(merged.clone()),
        RuleOutcome::Split {
            produced: (a, b), ..
        } => rebuilt.extend([a.clone(), b.clone()]),
        _ => unreachable!("link_pair only merges or splits"),
    }
    *cubes = rebuilt;
    Some(outcome)
}

fn link_pair(first: &Cube, second: &Cube, split_rule: SplitRule) -> Option<RuleOutcome> {
    let positions = match first.link_distance(second) {
        LinkDistance::Comparable(positions) => positions,
        LinkDistance::Incomparable => return None,
    };

    match *positions.as_slice() {
        [position] => Some(RuleOutcome::Merged {
            first: first.clone(),
            second: second.clone(),
            position,
            merged: first.raise(position),
        }),
        [p, q] => {
            let produced = match split_rule {
                SplitRule::FirstCube => (first.raise(p), first.raise(q)),
                SplitRule::Exact => (first.raise(p), second.raise(q)),
            };
            Some(RuleOutcome::Split {
                first: first.clone(),
                second: second.clone(),
                positions: (p, q),
                produced,
            })
        }
        _ => None,
    }
}

/// Replaces the first cube containing a don't care with its two specialisations at that
/// position, appended to the end of the list.
pub(super) fn unlink_first(cubes: &mut Vec<Cube>) -> Option<RuleOutcome> {
    let (index, position) = cubes
        .iter()
        .enumerate()
        .find_map(|(index, cube)| cube.first_dont_care().map(|position| (index, position)))?;

    let cube = cubes.remove(index);
    let (zero, one) = cube.expand(position);
    cubes.extend([zero.clone(), one.clone()]);
    Some(RuleOutcome::Unlinked {
        cube,
        position,
        produced: (zero, one),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn cubes(strs: &[&str]) -> Vec<Cube> {
        strs.iter().map(|s| s.parse().unwrap()).collect()
    }

    fn strings(cubes: &[Cube]) -> Vec<String> {
        cubes.iter().map(|c| c.to_string()).collect()
    }

    #[test]
    fn test_cancel_duplicates() {
        let mut list = cubes(&["111", "010", "111", "1-1", "1-1", "1-1"]);
        assert_eq!(cancel_duplicates(&mut list), Some(4));
        assert_eq!(strings(&list), ["010", "1-1"]);

        let mut list = cubes(&["111", "010"]);
        assert_eq!(cancel_duplicates(&mut list), None);
        assert_eq!(strings(&list), ["111", "010"]);
    }

    #[test]
    fn test_merge() {
        let mut list = cubes(&["011", "1-0", "1-1", "0-0"]);
        let outcome = link_first_pair(&mut list, SplitRule::FirstCube).unwrap();
        assert_eq!(
            outcome,
            RuleOutcome::Merged {
                first: "1-0".parse().unwrap(),
                second: "1-1".parse().unwrap(),
                position: 2,
                merged: "1--".parse().unwrap(),
            }
        );
        assert_eq!(strings(&list), ["011", "0-0", "1--"]);
    }

    #[test]
    fn test_dont_care_alignment() {
        let mut list = cubes(&["1-0", "0-1"]);
        let outcome = link_first_pair(&mut list, SplitRule::FirstCube).unwrap();
        assert!(matches!(outcome, RuleOutcome::Split { positions: (0, 2), .. }));

        let mut list = cubes(&["1-0", "01-"]);
        assert_eq!(link_first_pair(&mut list, SplitRule::FirstCube), None);
        assert_eq!(strings(&list), ["1-0", "01-"]);
    }

    #[test]
    fn test_split_first_cube() {
        // Both produced cubes come from the first cube of the pair.
        let mut list = cubes(&["101", "011"]);
        let outcome = link_first_pair(&mut list, SplitRule::FirstCube).unwrap();
        assert_eq!(outcome.to_string(), "split 101 and 011 into -01, 1-1");
        assert_eq!(strings(&list), ["-01", "1-1"]);
    }

    #[test]
    fn test_split_exact() {
        let mut list = cubes(&["101", "011"]);
        link_first_pair(&mut list, SplitRule::Exact).unwrap();
        assert_eq!(strings(&list), ["-01", "0-1"]);
    }

    #[test]
    fn test_first_pair_wins() {
        // (0, 1) is at distance 3, (0, 2) at distance 1 and (1, 2) at distance 2.
        let mut list = cubes(&["000", "111", "001"]);
        let outcome = link_first_pair(&mut list, SplitRule::FirstCube).unwrap();
        assert!(matches!(outcome, RuleOutcome::Merged { position: 2, .. }));
        assert_eq!(strings(&list), ["111", "00-"]);
    }

    #[test]
    fn test_unlink_first() {
        let mut list = cubes(&["101", "1-0", "--1"]);
        let outcome = unlink_first(&mut list).unwrap();
        assert_eq!(outcome.to_string(), "unlinked 1-0 into 100, 110");
        assert_eq!(strings(&list), ["101", "--1", "100", "110"]);

        let mut list = cubes(&["101", "010"]);
        assert_eq!(unlink_first(&mut list), None);
    }
}
