// Copyright (c) The playwright-adapter Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Building and running `playwright test` commands.

use crate::errors::RunCommandError;
use camino::{Utf8Path, Utf8PathBuf};
use std::collections::BTreeMap;
use tracing::debug;

/// Playwright exits with this code when the run completed but some tests failed.
const TESTS_FAILED_EXIT_CODE: i32 = 1;

/// A test filter that matches no files, used to list projects without collecting tests.
pub const NO_MATCH_FILTER: &str = "./does-not-exist";

/// What a [`PlaywrightCommand`] does.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum CommandMode {
    /// Run tests.
    #[default]
    Run,

    /// List tests without running them.
    List,
}

/// A `playwright test` invocation that writes a JSON report to stdout.
#[derive(Clone, Debug)]
pub struct PlaywrightCommand {
    binary: Utf8PathBuf,
    mode: CommandMode,
    config: Option<Utf8PathBuf>,
    projects: Vec<String>,
    extra_args: Vec<String>,
    env: BTreeMap<String, String>,
    cwd: Option<Utf8PathBuf>,
    test_filter: Option<String>,
}

impl PlaywrightCommand {
    /// Creates a new command that runs the given Playwright binary.
    pub fn new(binary: impl Into<Utf8PathBuf>) -> Self {
        Self {
            binary: binary.into(),
            mode: CommandMode::Run,
            config: None,
            projects: Vec::new(),
            extra_args: Vec::new(),
            env: BTreeMap::new(),
            cwd: None,
            test_filter: None,
        }
    }

    /// Creates a command that lists the configured projects without collecting any tests.
    pub fn list_projects(binary: impl Into<Utf8PathBuf>) -> Self {
        let mut command = Self::new(binary);
        command.mode(CommandMode::List).test_filter(NO_MATCH_FILTER);
        command
    }

    /// Sets the mode.
    pub fn mode(&mut self, mode: CommandMode) -> &mut Self {
        self.mode = mode;
        self
    }

    /// Sets the Playwright config file.
    pub fn config(&mut self, config: impl Into<Utf8PathBuf>) -> &mut Self {
        self.config = Some(config.into());
        self
    }

    /// Adds projects to run. No projects means all projects.
    pub fn projects(&mut self, projects: impl IntoIterator<Item = impl Into<String>>) -> &mut Self {
        self.projects.extend(projects.into_iter().map(Into::into));
        self
    }

    /// Adds arguments passed to Playwright after the generated ones.
    pub fn extra_args(&mut self, args: impl IntoIterator<Item = impl Into<String>>) -> &mut Self {
        self.extra_args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Adds environment variables for the Playwright process.
    pub fn envs(
        &mut self,
        env: impl IntoIterator<Item = (impl Into<String>, impl Into<String>)>,
    ) -> &mut Self {
        self.env
            .extend(env.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    /// Sets the working directory.
    pub fn cwd(&mut self, cwd: impl Into<Utf8PathBuf>) -> &mut Self {
        self.cwd = Some(cwd.into());
        self
    }

    /// Sets the test filter, typically a file path or `file:line`.
    pub fn test_filter(&mut self, test_filter: impl Into<String>) -> &mut Self {
        self.test_filter = Some(test_filter.into());
        self
    }

    /// Returns the binary this command runs.
    pub fn binary(&self) -> &Utf8Path {
        &self.binary
    }

    /// Returns the working directory, if set.
    pub fn cwd_path(&self) -> Option<&Utf8Path> {
        self.cwd.as_deref()
    }

    /// Returns the arguments passed to the binary.
    pub fn args(&self) -> Vec<String> {
        let mut args = vec!["test".to_owned()];
        if self.mode == CommandMode::List {
            args.push("--list".to_owned());
        }
        args.push("--reporter=json".to_owned());
        if let Some(config) = &self.config {
            args.push(format!("--config={config}"));
        }
        args.extend(
            self.projects
                .iter()
                .map(|project| format!("--project={project}")),
        );
        args.extend(self.extra_args.iter().cloned());
        if let Some(test_filter) = &self.test_filter {
            args.push(test_filter.clone());
        }
        args
    }

    /// Returns the command line as a shell-quoted string.
    pub fn command_str(&self) -> String {
        shell_words::join(std::iter::once(self.binary.to_string()).chain(self.args()))
    }

    /// Runs the command to completion and returns its standard output.
    ///
    /// Standard output is returned both when all tests passed and when some tests failed.
    pub fn exec(&self) -> Result<String, RunCommandError> {
        let command_str = self.command_str();
        debug!("running `{command_str}`");

        let mut expression = duct::cmd(self.binary.as_std_path(), self.args())
            .stdout_capture()
            .stderr_capture()
            .unchecked();
        if let Some(cwd) = &self.cwd {
            expression = expression.dir(cwd.as_std_path());
        }
        for (key, value) in &self.env {
            expression = expression.env(key, value);
        }

        let output = expression.run().map_err(|error| RunCommandError::Exec {
            command: command_str.clone(),
            error,
        })?;

        let exit_code = output.status.code();
        debug!("`{command_str}` exited with {exit_code:?}");
        if !matches!(exit_code, Some(0 | TESTS_FAILED_EXIT_CODE)) {
            return Err(RunCommandError::CommandFailed {
                command: command_str,
                exit_code,
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            });
        }

        String::from_utf8(output.stdout).map_err(|error| RunCommandError::NonUtf8Output {
            command: command_str,
            error,
        })
    }
}
