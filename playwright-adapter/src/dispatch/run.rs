// Copyright (c) The playwright-adapter Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The `run` and `parse` commands.

use super::base::BaseApp;
use crate::{ExpectedError, Result, output::OutputWriter};
use camino::Utf8PathBuf;
use clap::Args;
use owo_colors::OwoColorize;
use playwright_metadata::AdapterExitCode;
use playwright_runner::{
    normalize::{NormalizedResults, ReportNormalizer, ResultStatus},
    projects::ProjectSelection,
    runner::{RunRequest, TestRun},
};
use std::io::Read;
use tracing::{debug, info};

/// Options for `playwright-adapter run`.
#[derive(Debug, Args)]
pub(crate) struct RunOpts {
    /// Test file to run
    #[arg(value_name = "FILE")]
    file: Utf8PathBuf,

    /// Test filter passed to Playwright, e.g. `tests/example.spec.ts:12` [default: FILE]
    #[arg(long, value_name = "FILTER")]
    filter: Option<String>,

    /// Playwright projects to run (may be repeated) [default: saved selection, or `projects` from
    /// the config]
    #[arg(long = "project", short = 'p', value_name = "NAME")]
    projects: Vec<String>,

    /// Extra arguments passed to Playwright
    #[arg(last = true, value_name = "ARGS")]
    extra_args: Vec<String>,
}

impl RunOpts {
    pub(crate) fn exec(self, base: BaseApp, output_writer: &mut OutputWriter) -> Result<i32> {
        let state = base.load_user_state()?;
        let selection = ProjectSelection::resolve(&self.projects, &base.config, &state);
        if !selection.is_all() {
            debug!(
                "running projects {:?} (from {})",
                selection.projects(),
                selection.source()
            );
        }

        let run = TestRun::new(&base.config, &self.file)?;
        let results = run.exec(&RunRequest {
            filter: self.filter.as_deref(),
            projects: selection.projects(),
            extra_args: &self.extra_args,
        })?;

        log_summary(&base, &results);
        base.message_format
            .write(&results, output_writer.results_writer())?;

        Ok(AdapterExitCode::OK)
    }
}

/// Options for `playwright-adapter parse`.
#[derive(Debug, Args)]
pub(crate) struct ParseOpts {
    /// Path to a JSON report, or `-` for standard input [default: -]
    #[arg(long, short, value_name = "PATH")]
    input: Option<Utf8PathBuf>,
}

impl ParseOpts {
    pub(crate) fn exec(self, base: BaseApp, output_writer: &mut OutputWriter) -> Result<i32> {
        let json = self.read_input()?;
        let results = ReportNormalizer::new(base.config.key_strategy()).normalize_json(&json)?;

        log_summary(&base, &results);
        base.message_format
            .write(&results, output_writer.results_writer())?;

        Ok(AdapterExitCode::OK)
    }

    fn read_input(&self) -> Result<String> {
        match self.input.as_deref() {
            Some(path) if path.as_str() != "-" => {
                debug!("reading report from {path}");
                std::fs::read_to_string(path).map_err(|err| ExpectedError::InputReadFailed {
                    path: Some(path.to_owned()),
                    err,
                })
            }
            _ => {
                debug!("reading report from standard input");
                let mut json = String::new();
                std::io::stdin()
                    .read_to_string(&mut json)
                    .map_err(|err| ExpectedError::InputReadFailed { path: None, err })?;
                Ok(json)
            }
        }
    }
}

fn log_summary(base: &BaseApp, results: &NormalizedResults) {
    let styles = base.output.stderr_styles();
    info!(
        "{} results: {} passed, {} failed, {} skipped",
        results.len().style(styles.bold),
        results.count(ResultStatus::Passed).style(styles.passed),
        results.count(ResultStatus::Failed).style(styles.failed),
        results.count(ResultStatus::Skipped).style(styles.skipped),
    );
}
