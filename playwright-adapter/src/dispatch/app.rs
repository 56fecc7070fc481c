// Copyright (c) The playwright-adapter Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Top-level application and command routing.

use super::{
    base::{BaseApp, CommonOpts},
    projects::ProjectsCommand,
    run::{ParseOpts, RunOpts},
};
use crate::{
    Result,
    output::{OutputContext, OutputWriter},
};
use clap::{Parser, Subcommand};

/// Runs Playwright tests and reports their results as a flat JSON map.
///
/// Results are keyed by test identity and carry a passed, failed or skipped status along with any
/// error messages, ready for consumption by editor test integrations.
#[derive(Debug, Parser)]
#[command(
    version,
    name = "playwright-adapter",
    styles = crate::output::clap_styles::style(),
    max_term_width = 100,
)]
pub struct PlaywrightAdapterApp {
    #[clap(flatten)]
    common: CommonOpts,

    #[clap(subcommand)]
    command: Command,
}

impl PlaywrightAdapterApp {
    /// Initializes the output context.
    pub fn init_output(&self) -> OutputContext {
        self.common.output.init()
    }

    /// Executes the app.
    ///
    /// Returns the exit code.
    pub fn exec(self, output: OutputContext, output_writer: &mut OutputWriter) -> Result<i32> {
        let base = BaseApp::new(output, self.common)?;
        match self.command {
            Command::Run(opts) => opts.exec(base, output_writer),
            Command::Parse(opts) => opts.exec(base, output_writer),
            Command::Projects { command } => command.exec(base, output_writer),
        }
    }
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run Playwright for a test file and print normalized results
    ///
    /// Playwright is located in the nearest `node_modules` directory and run from the directory
    /// containing the nearest Playwright config. Failing tests are reported as `failed` results;
    /// they do not make this command fail.
    Run(Box<RunOpts>),

    /// Normalize an existing Playwright JSON report
    ///
    /// The report is typically produced by `playwright test --reporter=json`.
    Parse(ParseOpts),

    /// List or select Playwright projects
    Projects {
        #[clap(subcommand)]
        command: ProjectsCommand,
    },
}
