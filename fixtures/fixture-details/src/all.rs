// Copyright (c) The esop-min Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::{generation::ZFunction, value_generator::ValueGenerator};
use camino::{Utf8Path, Utf8PathBuf};
use color_eyre::{
    eyre::{bail, WrapErr},
    Result,
};
use esop_min::{
    esop::EsopCover,
    exorcism::{Exorcism, ExorcismConfig, SplitRule},
    pla::parse_on_set_str,
    proptest_helpers::EsopCoverParams,
};
use log::info;
use once_cell::sync::Lazy;
use proptest::prelude::*;
use std::{convert::TryFrom, fs};

/// The fixture corpus: PLA inputs and their minimized ESOP outputs.
pub struct AllFixtures {
    dir: Utf8PathBuf,
}

static ALL_FIXTURES_STATIC: Lazy<AllFixtures> = Lazy::new(AllFixtures::init);

/// One minimized fixture.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FixtureSummary {
    pub name: String,
    pub initial_cost: usize,
    pub minimized_cost: usize,
}

impl AllFixtures {
    pub fn get() -> &'static Self {
        &*ALL_FIXTURES_STATIC
    }

    fn init() -> Self {
        let dir: Utf8PathBuf = env!("CARGO_MANIFEST_DIR").into();
        let dir = dir
            .parent()
            .expect("fixture-details lives inside the fixtures directory")
            .join("data");
        Self::with_dir(dir)
    }

    /// A corpus rooted somewhere other than `fixtures/data`.
    pub fn with_dir(dir: impl Into<Utf8PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    #[inline]
    pub fn dir(&self) -> &Utf8Path {
        &self.dir
    }

    pub fn inputs_dir(&self) -> Utf8PathBuf {
        self.dir.join("inputs")
    }

    pub fn outputs_dir(&self) -> Utf8PathBuf {
        self.dir.join("outputs")
    }

    /// Writes `count` seeded inputs of the given width.
    ///
    /// Even-numbered inputs are truth tables of random Z-term functions; odd-numbered
    /// ones are random ESOP covers, which contain duplicates and don't cares. A width of
    /// zero is rejected.
    pub fn generate_inputs(&self, count: usize, width: usize) -> Result<Vec<Utf8PathBuf>> {
        if width == 0 {
            bail!("fixture width must be at least 1");
        }
        let inputs_dir = self.inputs_dir();
        fs::create_dir_all(&inputs_dir)
            .wrap_err_with(|| format!("failed to create {}", inputs_dir))?;

        let mut value_gen = ValueGenerator::from_seed(("esop-min", width));
        let mut paths = Vec::with_capacity(count);
        for index in 0..count {
            let mut gen = value_gen.partial_clone();
            let contents = if index % 2 == 0 {
                let num_terms = gen.generate(1..=width);
                ZFunction::random(width, num_terms, width, &mut gen)?.to_pla()
            } else {
                let cover = gen.generate(any_with::<EsopCover>(EsopCoverParams {
                    width,
                    min_size: 1,
                    max_size: 4 * width + 1,
                }));
                cover.pla_display().to_string()
            };

            let path = inputs_dir.join(format!("{:03}.pla", index));
            fs::write(&path, contents).wrap_err_with(|| format!("failed to write {}", path))?;
            paths.push(path);
        }

        info!("wrote {} inputs to {}", count, inputs_dir);
        Ok(paths)
    }

    /// Minimizes every input with the exact split rule and writes the result next to it.
    ///
    /// Fails if any minimized cover is not equivalent to its input.
    pub fn generate_outputs(&self) -> Result<Vec<FixtureSummary>> {
        let outputs_dir = self.outputs_dir();
        fs::create_dir_all(&outputs_dir)
            .wrap_err_with(|| format!("failed to create {}", outputs_dir))?;

        let mut summaries = Vec::new();
        for input in self.input_paths()? {
            let name = input.file_stem().unwrap_or_default().to_owned();
            let text =
                fs::read_to_string(&input).wrap_err_with(|| format!("failed to read {}", input))?;
            let width = declared_width(&text)
                .ok_or_else(|| color_eyre::eyre::eyre!("{} has no .i directive", input))?;

            let cover = EsopCover::with_width(width, parse_on_set_str(&text))
                .wrap_err_with(|| format!("invalid cover in {}", input))?;
            let mut exorcism = Exorcism::new(cover)
                .with_config(ExorcismConfig::default().with_split_rule(SplitRule::Exact));
            exorcism.minimize()?;
            if let Some(counterexample) = exorcism.check_equivalent()? {
                bail!(
                    "minimized {} differs from its input on {:?}",
                    input,
                    counterexample
                );
            }

            let path = outputs_dir.join(format!("{}.esop", name));
            fs::write(&path, exorcism.current().pla_display().to_string())
                .wrap_err_with(|| format!("failed to write {}", path))?;

            let cost = exorcism.cost_reduction()?;
            summaries.push(FixtureSummary {
                name,
                initial_cost: cost.initial_cost,
                minimized_cost: cost.minimized_cost,
            });
        }

        info!("wrote {} outputs to {}", summaries.len(), outputs_dir);
        Ok(summaries)
    }

    fn input_paths(&self) -> Result<Vec<Utf8PathBuf>> {
        let inputs_dir = self.inputs_dir();
        let mut paths = Vec::new();
        for entry in
            fs::read_dir(&inputs_dir).wrap_err_with(|| format!("failed to read {}", inputs_dir))?
        {
            let path = Utf8PathBuf::try_from(entry?.path())?;
            if path.extension() == Some("pla") {
                paths.push(path);
            }
        }
        paths.sort();
        Ok(paths)
    }
}

/// Returns the input count from a PLA's `.i` directive.
pub fn declared_width(text: &str) -> Option<usize> {
    text.lines().find_map(|line| {
        let mut fields = line.split_whitespace();
        match (fields.next(), fields.next()) {
            (Some(".i"), Some(width)) => width.parse().ok(),
            _ => None,
        }
    })
}
