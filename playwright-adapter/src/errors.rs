// Copyright (c) The playwright-adapter Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::output::{NO_HEADING_TARGET, StderrStyles};
use camino::{FromPathBufError, Utf8PathBuf};
use owo_colors::OwoColorize;
use playwright_metadata::{AdapterExitCode, DecodeError};
use playwright_runner::errors::{
    ConfigParseError, LocateBinaryError, RunCommandError, RunError, UserStateError,
};
use std::error::Error;
use thiserror::Error;
use tracing::{error, info};

pub(crate) type Result<T, E = ExpectedError> = std::result::Result<T, E>;

// Note that the #[error()] strings are mostly placeholder messages -- the expected way to print out
// errors is with the display_to_stderr method, which colorizes errors.

/// An expected failure: a problem with the environment, the input or Playwright itself, rather than
/// a bug in playwright-adapter.
#[derive(Debug, Error)]
#[doc(hidden)]
pub enum ExpectedError {
    #[error("could not determine current directory")]
    CurrentDirFailed {
        #[source]
        err: std::io::Error,
    },
    #[error("current directory is not valid UTF-8")]
    CurrentDirNotUtf8 {
        #[source]
        err: FromPathBufError,
    },
    #[error("config parse error")]
    ConfigParseError {
        #[from]
        err: ConfigParseError,
    },
    #[error("user state error")]
    UserStateError {
        #[from]
        err: UserStateError,
    },
    #[error("unable to locate Playwright binary")]
    LocateBinaryError {
        #[from]
        err: LocateBinaryError,
    },
    #[error("running Playwright failed")]
    CommandFailed {
        #[from]
        err: RunCommandError,
    },
    #[error("decoding Playwright report failed")]
    ReportDecodeFailed {
        #[from]
        err: DecodeError,
    },
    #[error("failed to read report input")]
    InputReadFailed {
        path: Option<Utf8PathBuf>,
        #[source]
        err: std::io::Error,
    },
    #[error("error writing output")]
    WriteOutputError {
        #[source]
        err: std::io::Error,
    },
    #[error("error serializing output")]
    SerializeOutputError {
        #[source]
        err: serde_json::Error,
    },
    #[error("error reading prompt")]
    DialoguerError {
        #[source]
        err: dialoguer::Error,
    },
    #[error("no projects to select from")]
    NoProjectsFound { file_path: Utf8PathBuf },
    #[error("project selection cancelled")]
    SelectionCancelled,
}

impl From<RunError> for ExpectedError {
    fn from(error: RunError) -> Self {
        match error {
            RunError::LocateBinary(err) => Self::LocateBinaryError { err },
            RunError::Command(err) => Self::CommandFailed { err },
            RunError::Decode(err) => Self::ReportDecodeFailed { err },
        }
    }
}

impl ExpectedError {
    pub(crate) fn write_output_error(err: std::io::Error) -> Self {
        Self::WriteOutputError { err }
    }

    /// Returns the exit code for the process.
    pub fn process_exit_code(&self) -> i32 {
        match self {
            Self::CurrentDirFailed { .. }
            | Self::CurrentDirNotUtf8 { .. }
            | Self::ConfigParseError { .. }
            | Self::UserStateError { .. }
            | Self::InputReadFailed { .. }
            | Self::NoProjectsFound { .. } => AdapterExitCode::SETUP_ERROR,
            Self::LocateBinaryError { .. } => AdapterExitCode::BINARY_NOT_FOUND,
            Self::CommandFailed { .. } => AdapterExitCode::COMMAND_FAILED,
            Self::ReportDecodeFailed { .. } => AdapterExitCode::REPORT_DECODE_FAILED,
            Self::WriteOutputError { .. } | Self::SerializeOutputError { .. } => {
                AdapterExitCode::WRITE_OUTPUT_ERROR
            }
            Self::DialoguerError { .. } | Self::SelectionCancelled => {
                AdapterExitCode::SELECTION_CANCELLED
            }
        }
    }

    /// Displays this error to stderr.
    pub fn display_to_stderr(&self, styles: &StderrStyles) {
        let mut next_error = match &self {
            Self::CurrentDirFailed { err } => {
                error!("could not determine current directory");
                Some(err as &dyn Error)
            }
            Self::CurrentDirNotUtf8 { err } => {
                error!("current directory is not valid UTF-8");
                Some(err as &dyn Error)
            }
            Self::ConfigParseError { err } => {
                error!(
                    "failed to load config file `{}`",
                    err.config_file().style(styles.bold)
                );
                err.source()
            }
            Self::UserStateError { err } => {
                error!("{err}");
                err.source()
            }
            Self::LocateBinaryError { err } => {
                error!("{err}");
                info!(
                    "set `{}` in `{}` to use a Playwright binary outside `node_modules`",
                    "playwright-binary".style(styles.bold),
                    playwright_runner::config::AdapterConfig::CONFIG_PATH.style(styles.bold),
                );
                None
            }
            Self::CommandFailed { err } => {
                error!("{err}");
                if let RunCommandError::CommandFailed { stderr, .. } = err
                    && !stderr.trim().is_empty()
                {
                    error!(target: NO_HEADING_TARGET, "{}", stderr.trim_end());
                }
                err.source()
            }
            Self::ReportDecodeFailed { err } => {
                error!("{err}");
                err.source()
            }
            Self::InputReadFailed { path, err } => {
                match path {
                    Some(path) => error!("failed to read report from `{}`", path.style(styles.bold)),
                    None => error!("failed to read report from standard input"),
                }
                Some(err as &dyn Error)
            }
            Self::WriteOutputError { err } => {
                error!("error writing output");
                Some(err as &dyn Error)
            }
            Self::SerializeOutputError { err } => {
                error!("error serializing output");
                Some(err as &dyn Error)
            }
            Self::DialoguerError { err } => {
                error!("error reading input prompt");
                Some(err as &dyn Error)
            }
            Self::NoProjectsFound { file_path } => {
                error!(
                    "Playwright config for `{}` declares no projects",
                    file_path.style(styles.bold)
                );
                None
            }
            Self::SelectionCancelled => {
                error!("project selection cancelled");
                None
            }
        };

        while let Some(err) = next_error {
            error!(target: NO_HEADING_TARGET, "\nCaused by:\n  {}", err);
            next_error = err.source();
        }
    }
}
