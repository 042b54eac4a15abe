// Copyright (c) The esop-min Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mapping of ESOP cubes onto multi-controlled phase rotations.
//!
//! Every cube becomes one `Rz` rotation controlled by the qubits the cube fixes. Qubits
//! fixed to `0` are conjugated with `X` gates so that the control fires on `|0>`. Cubes
//! made only of don't cares contribute a global phase and are skipped.

use crate::{cube::Cube, errors::EsopError};
use std::fmt;

#[derive(Clone, Debug, PartialEq)]
pub enum PhaseGate {
    X {
        qubit: usize,
    },
    Rz {
        target: usize,
        theta: f64,
        controls: Vec<usize>,
    },
}

impl fmt::Display for PhaseGate {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::X { qubit } => write!(f, "x q{}", qubit),
            Self::Rz {
                target,
                theta,
                controls,
            } => {
                write!(f, "rz({}) q{}", theta, target)?;
                if !controls.is_empty() {
                    write!(f, " ctrl[")?;
                    for (ix, control) in controls.iter().enumerate() {
                        if ix > 0 {
                            write!(f, ",")?;
                        }
                        write!(f, "q{}", control)?;
                    }
                    write!(f, "]")?;
                }
                Ok(())
            }
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct PhaseCircuit {
    qubit_count: usize,
    gates: Vec<PhaseGate>,
}

impl PhaseCircuit {
    pub fn new(qubit_count: usize) -> Self {
        Self {
            qubit_count,
            gates: Vec::new(),
        }
    }

    /// Builds a circuit with one phase rotation by `theta` per cube.
    ///
    /// ```
    /// use esop_min::{circuit::PhaseCircuit, cube::Cube};
    ///
    /// let cubes: [Cube; 2] = ["1-0".parse().unwrap(), "---".parse().unwrap()];
    /// let circuit = PhaseCircuit::from_esop(&cubes, 3, 0.5).unwrap();
    /// assert_eq!(circuit.to_string(), "x q2\nrz(0.5) q1 ctrl[q0,q2]\nx q2\n");
    /// ```
    pub fn from_esop<'a>(
        cubes: impl IntoIterator<Item = &'a Cube>,
        qubit_count: usize,
        theta: f64,
    ) -> Result<Self, EsopError> {
        let mut circuit = Self::new(qubit_count);
        for (index, cube) in cubes.into_iter().enumerate() {
            if cube.width() != qubit_count {
                return Err(EsopError::WidthMismatch {
                    expected: qubit_count,
                    got: cube.width(),
                    index: Some(index),
                });
            }
            if cube.is_universe() {
                continue;
            }
            circuit.add_cube_phase(cube, theta);
        }
        Ok(circuit)
    }

    fn add_cube_phase(&mut self, cube: &Cube, theta: f64) {
        let mut controls = Vec::new();
        let mut flips = Vec::new();
        for (qubit, literal) in cube.literals.iter().enumerate() {
            match literal {
                Some(true) => controls.push(qubit),
                Some(false) => {
                    controls.push(qubit);
                    flips.push(qubit);
                }
                None => {}
            }
        }

        // The target is the first qubit the cube leaves free. A cube without don't cares
        // targets qubit 0, which then stops being a control.
        let target = match cube.first_dont_care() {
            Some(qubit) => qubit,
            None => {
                controls.retain(|&qubit| qubit != 0);
                0
            }
        };

        self.gates
            .extend(flips.iter().map(|&qubit| PhaseGate::X { qubit }));
        self.gates.push(PhaseGate::Rz {
            target,
            theta,
            controls,
        });
        self.gates
            .extend(flips.iter().map(|&qubit| PhaseGate::X { qubit }));
    }

    #[inline]
    pub fn qubit_count(&self) -> usize {
        self.qubit_count
    }

    #[inline]
    pub fn gates(&self) -> &[PhaseGate] {
        &self.gates
    }

    /// The number of `Rz` rotations, which equals the number of non-trivial cubes.
    pub fn rotation_count(&self) -> usize {
        self.gates
            .iter()
            .filter(|gate| matches!(gate, PhaseGate::Rz { .. }))
            .count()
    }
}

impl fmt::Display for PhaseCircuit {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for gate in &self.gates {
            writeln!(f, "{}", gate)?;
        }
        Ok(())
    }
}
