// Copyright (c) The esop-min Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::value_generator::ValueGenerator;
use color_eyre::{eyre::bail, Result};
use itertools::Itertools;
use proptest::prelude::*;
use std::fmt;

/// A signed product of Pauli Z operators, `±Z_i Z_j ...`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ZTerm {
    pub negative: bool,
    pub qubits: Vec<usize>,
}

impl ZTerm {
    /// Returns true if the term's eigenvalue on `bits` is -1.
    pub fn evaluate(&self, bits: &[bool]) -> bool {
        let parity = self.qubits.iter().filter(|&&qubit| bits[qubit]).count() % 2 == 1;
        parity ^ self.negative
    }
}

impl fmt::Display for ZTerm {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}1*", if self.negative { '-' } else { '+' })?;
        for qubit in &self.qubits {
            write!(f, "Z{}", qubit)?;
        }
        Ok(())
    }
}

/// A boolean function given as the XOR of `[term == -1]` over a set of Z terms.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ZFunction {
    width: usize,
    terms: Vec<ZTerm>,
}

impl ZFunction {
    pub fn new(width: usize, terms: Vec<ZTerm>) -> Self {
        Self { width, terms }
    }

    /// Picks `num_terms` distinct terms over `width` qubits, each acting on between 1 and
    /// `max_locality` qubits, with random signs.
    pub fn random(
        width: usize,
        num_terms: usize,
        max_locality: usize,
        gen: &mut ValueGenerator,
    ) -> Result<Self> {
        let all_terms: Vec<Vec<usize>> = (1..=max_locality.min(width))
            .flat_map(|locality| (0..width).combinations(locality))
            .collect();
        if num_terms > all_terms.len() {
            bail!(
                "num_terms={} is larger than the total possible unique terms={} for n={}, max_locality={}",
                num_terms,
                all_terms.len(),
                width,
                max_locality
            );
        }

        let selected = gen.generate(prop::sample::subsequence(all_terms, num_terms).prop_shuffle());
        let signs = gen.generate(prop::collection::vec(any::<bool>(), num_terms));
        let terms = selected
            .into_iter()
            .zip(signs)
            .map(|(qubits, negative)| ZTerm { negative, qubits })
            .collect();
        Ok(Self { width, terms })
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn terms(&self) -> &[ZTerm] {
        &self.terms
    }

    pub fn evaluate(&self, bits: &[bool]) -> bool {
        self.terms
            .iter()
            .fold(false, |acc, term| acc ^ term.evaluate(bits))
    }

    /// Renders the truth table of this function as a PLA.
    pub fn to_pla(&self) -> String {
        truth_table_pla(self.width, |bits| self.evaluate(bits))
    }
}

impl fmt::Display for ZFunction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.terms.iter().join(" "))
    }
}

/// Renders the full truth table of `f` over `width` inputs as a single-output PLA.
///
/// Rows are in counting order with input 0 as the most significant bit.
pub fn truth_table_pla(width: usize, f: impl Fn(&[bool]) -> bool) -> String {
    TruthTablePla::new(width, f).to_string()
}

/// A single-output PLA truth table, with optional `.ilb` and `.ob` labels.
///
/// ```
/// use fixture_details::TruthTablePla;
///
/// let pla = TruthTablePla::new(1, |bits: &[bool]| !bits[0])
///     .with_input_labels(["a"])
///     .with_output_label("f");
/// assert_eq!(pla.to_string(), ".i 1\n.o 1\n.ilb a\n.ob f\n0 1\n1 0\n.e\n");
/// ```
pub struct TruthTablePla<F> {
    width: usize,
    f: F,
    input_labels: Vec<String>,
    output_label: Option<String>,
}

impl<F: Fn(&[bool]) -> bool> TruthTablePla<F> {
    pub fn new(width: usize, f: F) -> Self {
        Self {
            width,
            f,
            input_labels: Vec::new(),
            output_label: None,
        }
    }

    /// Names the inputs in a `.ilb` line. No line is written if `labels` is empty.
    pub fn with_input_labels(mut self, labels: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.input_labels = labels.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_output_label(mut self, label: impl Into<String>) -> Self {
        self.output_label = Some(label.into());
        self
    }
}

impl<F: Fn(&[bool]) -> bool> fmt::Display for TruthTablePla<F> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, ".i {}", self.width)?;
        writeln!(f, ".o 1")?;
        if !self.input_labels.is_empty() {
            writeln!(f, ".ilb {}", self.input_labels.iter().join(" "))?;
        }
        if let Some(label) = &self.output_label {
            writeln!(f, ".ob {}", label)?;
        }

        let mut bits = vec![false; self.width];
        for row in 0..(1_u64 << self.width) {
            for (ix, bit) in bits.iter_mut().enumerate() {
                *bit = (row >> (self.width - 1 - ix)) & 1 == 1;
            }
            for &bit in &bits {
                write!(f, "{}", bit as u8)?;
            }
            writeln!(f, " {}", (self.f)(&bits) as u8)?;
        }
        writeln!(f, ".e")
    }
}

/// The majority function: true if more than half of the inputs are set.
pub fn majority(width: usize) -> impl Fn(&[bool]) -> bool {
    move |bits| bits.iter().filter(|&&b| b).count() > width / 2
}
