// Copyright (c) The esop-min Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use camino::Utf8PathBuf;
use clap::Parser;
use color_eyre::{
    eyre::{bail, WrapErr},
    Result,
};
use esop_min::{
    circuit::PhaseCircuit,
    esop::EsopCover,
    exorcism::{Exorcism, ExorcismConfig, SplitRule},
    pla::parse_on_set_str,
};
use fixture_details::{declared_width, AllFixtures, ValueGenerator, ZFunction};
use env_logger::{Builder, Env};
use log::{info, LevelFilter};
use std::fs;

#[derive(Debug, Parser)]
pub struct FixtureManagerApp {
    /// Log every rewrite the minimizer applies.
    #[clap(long, short, global = true)]
    verbose: bool,

    #[clap(subcommand)]
    command: FixtureManagerCommand,
}

#[derive(Debug, Parser)]
pub enum FixtureManagerCommand {
    /// Write seeded PLA inputs to the fixtures directory.
    GenerateInputs {
        #[clap(long, short, default_value_t = 64)]
        count: usize,
        #[clap(long, short, default_value_t = 4)]
        width: usize,
    },
    /// Minimize every fixture input and write the results.
    GenerateOutputs,
    /// Minimize a single PLA file and print the result.
    Minimize {
        file: Utf8PathBuf,
        /// Use the function-preserving variant of the split rule.
        #[clap(long)]
        exact_split: bool,
        /// Also print the phase circuit for the minimized cover.
        #[clap(long)]
        circuit: bool,
        #[clap(long, default_value_t = 1.0)]
        theta: f64,
    },
    /// Minimize the truth table of a random Z-term function and print its circuit.
    Demo {
        #[clap(long, default_value_t = 4)]
        sites: usize,
        #[clap(long, default_value_t = 4)]
        terms: usize,
        #[clap(long, default_value_t = 0)]
        seed: u64,
        #[clap(long, default_value_t = 1.0)]
        theta: f64,
    },
}

impl FixtureManagerApp {
    pub fn exec(self) -> Result<()> {
        logger_builder(self.verbose, Env::default()).init();
        self.command.exec()
    }
}

impl FixtureManagerCommand {
    pub fn exec(self) -> Result<()> {
        match self {
            Self::GenerateInputs { count, width } => {
                AllFixtures::get().generate_inputs(count, width)?;
                Ok(())
            }
            Self::GenerateOutputs => {
                for summary in AllFixtures::get().generate_outputs()? {
                    println!(
                        "{}: {} -> {} cubes",
                        summary.name, summary.initial_cost, summary.minimized_cost
                    );
                }
                Ok(())
            }
            Self::Minimize {
                file,
                exact_split,
                circuit,
                theta,
            } => {
                let text =
                    fs::read_to_string(&file).wrap_err_with(|| format!("failed to read {}", file))?;
                let cubes = parse_on_set_str(&text);
                let cover = match declared_width(&text) {
                    Some(width) => EsopCover::with_width(width, cubes)?,
                    None => EsopCover::new(cubes)?,
                };
                let split_rule = if exact_split {
                    SplitRule::Exact
                } else {
                    SplitRule::FirstCube
                };
                let exorcism = minimize(cover, split_rule)?;
                print!("{}", exorcism.current().pla_display());
                if circuit {
                    print_circuit(&exorcism, theta)?;
                }
                Ok(())
            }
            Self::Demo {
                sites,
                terms,
                seed,
                theta,
            } => {
                let mut gen = ValueGenerator::from_seed(seed);
                let function = ZFunction::random(sites, terms, sites, &mut gen)?;
                info!("function: {}", function);

                let cover = EsopCover::with_width(sites, parse_on_set_str(&function.to_pla()))?;
                let exorcism = minimize(cover, SplitRule::Exact)?;
                if let Some(counterexample) = exorcism.check_equivalent()? {
                    bail!("minimized cover differs on {:?}", counterexample);
                }
                println!("{}", exorcism.current().algebraic_display());
                print_circuit(&exorcism, theta)
            }
        }
    }
}

/// The level picked by `--verbose` applies unless `env` carries a filter.
fn logger_builder(verbose: bool, env: Env<'_>) -> Builder {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    let mut builder = Builder::new();
    builder.filter_level(level).parse_env(env);
    builder
}

fn minimize(cover: EsopCover, split_rule: SplitRule) -> Result<Exorcism> {
    let mut exorcism =
        Exorcism::new(cover).with_config(ExorcismConfig::default().with_split_rule(split_rule));
    exorcism.minimize()?;
    let cost = exorcism.cost_reduction()?;
    info!(
        "{} -> {} cubes (ratio {:.2})",
        cost.initial_cost, cost.minimized_cost, cost.ratio
    );
    Ok(exorcism)
}

fn print_circuit(exorcism: &Exorcism, theta: f64) -> Result<()> {
    let circuit = PhaseCircuit::from_esop(exorcism.current().cubes(), exorcism.width(), theta)?;
    info!("{} rotations", circuit.rotation_count());
    print!("{}", circuit);
    Ok(())
}
