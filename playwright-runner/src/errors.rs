// Copyright (c) The playwright-adapter Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Errors produced by playwright-runner.

use camino::{FromPathBufError, Utf8PathBuf};
use playwright_metadata::DecodeError;
use std::{io, string::FromUtf8Error};
use thiserror::Error;

/// An error that occurred while parsing the adapter config.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigParseError {
    /// The config file could not be read.
    #[error("failed to read config file `{config_file}`")]
    Read {
        /// The config file.
        config_file: Utf8PathBuf,

        /// The underlying error.
        #[source]
        error: io::Error,
    },

    /// The config file could not be parsed.
    #[error("failed to parse config file `{config_file}`")]
    Parse {
        /// The config file.
        config_file: Utf8PathBuf,

        /// The underlying error.
        #[source]
        error: toml::de::Error,
    },
}

impl ConfigParseError {
    /// Returns the config file this error is for.
    pub fn config_file(&self) -> &Utf8PathBuf {
        match self {
            Self::Read { config_file, .. } | Self::Parse { config_file, .. } => config_file,
        }
    }
}

/// An error that occurs while locating the Playwright binary.
#[derive(Clone, Debug, Error)]
pub enum LocateBinaryError {
    /// No ancestor of the test file contains a `node_modules` directory.
    #[error("no `node_modules` directory found in any ancestor of `{file_path}`")]
    NodeModulesNotFound {
        /// The test file the search started from.
        file_path: Utf8PathBuf,
    },

    /// A `node_modules` directory was found, but it does not contain the Playwright binary.
    #[error("Playwright binary does not exist at `{expected}`")]
    BinaryNotFound {
        /// The path where the binary was expected.
        expected: Utf8PathBuf,
    },
}

/// An error that occurs while running a Playwright command.
#[derive(Debug, Error)]
pub enum RunCommandError {
    /// Executing the process resulted in an error.
    #[error("failed to execute `{command}`")]
    Exec {
        /// The command that was run.
        command: String,

        /// The underlying error.
        #[source]
        error: io::Error,
    },

    /// The command exited with an unexpected code.
    ///
    /// Exit code 1 is expected: Playwright uses it to indicate that some tests failed.
    #[error("command `{command}` exited{}", exit_code_str(.exit_code.as_ref()))]
    CommandFailed {
        /// The command that was run.
        command: String,

        /// The exit code for the process, or `None` if it was terminated by a signal.
        exit_code: Option<i32>,

        /// Standard error for the process.
        stderr: String,
    },

    /// The command produced output that isn't valid UTF-8.
    #[error("command `{command}` produced non-UTF-8 output")]
    NonUtf8Output {
        /// The command that was run.
        command: String,

        /// The underlying error.
        #[source]
        error: FromUtf8Error,
    },
}

fn exit_code_str(exit_code: Option<&i32>) -> String {
    match exit_code {
        Some(code) => format!(" with code {code}"),
        None => " because of a signal".to_owned(),
    }
}

/// An error that occurs while running tests and normalizing the results.
#[derive(Debug, Error)]
pub enum RunError {
    /// The Playwright binary could not be located.
    #[error("unable to locate Playwright binary")]
    LocateBinary(#[from] LocateBinaryError),

    /// Running Playwright failed.
    #[error("running Playwright failed")]
    Command(#[from] RunCommandError),

    /// The report produced by Playwright could not be decoded.
    #[error("decoding Playwright report failed")]
    Decode(#[from] DecodeError),
}

/// An error that occurs while reading or writing user state.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum UserStateError {
    /// The user state path is not valid UTF-8.
    #[error("user state path is not valid UTF-8")]
    NonUtf8Path {
        /// The underlying error.
        #[source]
        error: FromPathBufError,
    },

    /// The user state file could not be read.
    #[error("failed to read user state from `{path}`")]
    Read {
        /// The path to the state file.
        path: Utf8PathBuf,

        /// The underlying error.
        #[source]
        error: io::Error,
    },

    /// The user state file could not be parsed.
    #[error("failed to parse user state at `{path}`")]
    Parse {
        /// The path to the state file.
        path: Utf8PathBuf,

        /// The underlying error.
        #[source]
        error: toml::de::Error,
    },

    /// The user state could not be serialized.
    #[error("failed to serialize user state for `{path}`")]
    Serialize {
        /// The path to the state file.
        path: Utf8PathBuf,

        /// The underlying error.
        #[source]
        error: toml::ser::Error,
    },

    /// The directory containing the user state file could not be created.
    #[error("failed to create user state directory `{dir}`")]
    CreateDir {
        /// The directory.
        dir: Utf8PathBuf,

        /// The underlying error.
        #[source]
        error: io::Error,
    },

    /// The user state file could not be written.
    #[error("failed to write user state to `{path}`")]
    Write {
        /// The path to the state file.
        path: Utf8PathBuf,

        /// The underlying error.
        #[source]
        error: atomicwrites::Error<io::Error>,
    },
}
