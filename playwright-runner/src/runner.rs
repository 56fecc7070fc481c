// Copyright (c) The playwright-adapter Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Running Playwright for a test file and normalizing the report it produces.

use crate::{
    command::PlaywrightCommand,
    config::AdapterConfig,
    errors::{LocateBinaryError, RunError},
    finders::Locator,
    normalize::{DefaultReportWarnings, NormalizedResults, ReportNormalizer, ReportWarnings},
    projects::project_names,
};
use camino::{Utf8Path, Utf8PathBuf};
use playwright_metadata::Report;
use tracing::{debug, info};

/// What to run in a [`TestRun`].
#[derive(Clone, Copy, Debug, Default)]
pub struct RunRequest<'a> {
    /// The test filter passed to Playwright. Defaults to the test file.
    pub filter: Option<&'a str>,

    /// Projects to run. Empty means all projects.
    pub projects: &'a [String],

    /// Arguments appended after the configured extra arguments.
    pub extra_args: &'a [String],
}

/// A Playwright invocation context for a single test file.
///
/// Created by resolving the Playwright binary, config file and working directory for the file.
#[derive(Clone, Debug)]
pub struct TestRun<'cfg> {
    config: &'cfg AdapterConfig,
    file_path: Utf8PathBuf,
    binary: Utf8PathBuf,
    playwright_config: Option<Utf8PathBuf>,
    cwd: Option<Utf8PathBuf>,
    normalizer: ReportNormalizer,
}

impl<'cfg> TestRun<'cfg> {
    /// Resolves the binary, config file and working directory for `file_path`.
    ///
    /// Relative file paths are resolved against the project directory.
    pub fn new(
        config: &'cfg AdapterConfig,
        file_path: impl AsRef<Utf8Path>,
    ) -> Result<Self, LocateBinaryError> {
        let file_path = config.project_dir().join(file_path.as_ref());
        let locator = Locator::new(config);

        let binary = locator.locate_binary(&file_path)?;
        let playwright_config = locator.locate_config(&file_path);
        if playwright_config.is_none() {
            info!("unable to locate Playwright config file for {file_path}");
        }
        let cwd = locator.derive_cwd(&file_path);

        debug!(
            "test run for {file_path}: binary {binary}, config {:?}, cwd {:?}",
            playwright_config, cwd
        );

        Ok(Self {
            config,
            file_path,
            binary,
            playwright_config,
            cwd,
            normalizer: ReportNormalizer::new(config.key_strategy()),
        })
    }

    /// Returns the test file this run is for.
    pub fn file_path(&self) -> &Utf8Path {
        &self.file_path
    }

    /// Returns the Playwright binary.
    pub fn binary(&self) -> &Utf8Path {
        &self.binary
    }

    /// Returns the Playwright config file, if one was found.
    pub fn playwright_config(&self) -> Option<&Utf8Path> {
        self.playwright_config.as_deref()
    }

    /// Returns the working directory Playwright runs in, if one was derived.
    pub fn cwd(&self) -> Option<&Utf8Path> {
        self.cwd.as_deref()
    }

    /// Returns the normalizer applied to reports.
    pub fn normalizer(&self) -> ReportNormalizer {
        self.normalizer
    }

    /// Builds the command that runs the request.
    pub fn command(&self, request: &RunRequest<'_>) -> PlaywrightCommand {
        let mut command = self.base_command(PlaywrightCommand::new(&self.binary));
        command
            .projects(request.projects)
            .extra_args(self.config.extra_args())
            .extra_args(request.extra_args)
            .test_filter(request.filter.unwrap_or(self.file_path.as_str()));
        command
    }

    /// Runs the request and returns the normalized results.
    pub fn exec(&self, request: &RunRequest<'_>) -> Result<NormalizedResults, RunError> {
        self.exec_with_warnings(request, &mut DefaultReportWarnings)
    }

    /// Runs the request and returns the normalized results, with custom warning handling.
    pub fn exec_with_warnings(
        &self,
        request: &RunRequest<'_>,
        warnings: &mut impl ReportWarnings,
    ) -> Result<NormalizedResults, RunError> {
        let stdout = self.command(request).exec()?;
        let results = self
            .normalizer
            .normalize_json_with_warnings(&stdout, warnings)?;
        Ok(results)
    }

    /// Asks Playwright for the projects declared in its config, without running any tests.
    pub fn list_projects(&self) -> Result<Vec<String>, RunError> {
        let stdout = self
            .base_command(PlaywrightCommand::list_projects(&self.binary))
            .exec()?;
        let report = Report::parse_json(&stdout)?;
        Ok(project_names(&report))
    }

    fn base_command(&self, mut command: PlaywrightCommand) -> PlaywrightCommand {
        if let Some(config) = &self.playwright_config {
            command.config(config);
        }
        if let Some(cwd) = &self.cwd {
            command.cwd(cwd);
        }
        command.envs(self.config.env());
        command
    }
}
