// Copyright (c) The playwright-adapter Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use std::{error, fmt};

/// serde_json's default recursion limit.
const JSON_NESTING_LIMIT: usize = 128;

/// An error that occurs while decoding a Playwright JSON report.
///
/// Playwright may produce truncated, empty or non-JSON output if it crashes, so this is expected to
/// happen in practice.
#[derive(Debug)]
pub struct DecodeError {
    path: Option<String>,
    err: serde_json::Error,
}

impl DecodeError {
    pub(crate) fn from_path_error(err: serde_path_to_error::Error<serde_json::Error>) -> Self {
        let path = err.path().to_string();
        // "." is the path to the root, which is not useful to report.
        let path = (path != ".").then_some(path);
        Self {
            path,
            err: err.into_inner(),
        }
    }

    pub(crate) fn trailing(err: serde_json::Error) -> Self {
        Self { path: None, err }
    }

    /// Returns the path to the field that failed to decode, if the error was not at the root.
    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    /// Returns true if the input ended before a complete document was read.
    pub fn is_eof(&self) -> bool {
        self.err.is_eof()
    }

    /// Returns true if the report nests more deeply than the JSON decoder allows.
    ///
    /// Each `describe` block adds two levels of JSON nesting, so this happens with roughly 60 or
    /// more nested blocks.
    pub fn is_nesting_too_deep(&self) -> bool {
        // serde_json doesn't expose its error codes, only their messages.
        self.err.is_syntax() && self.err.to_string().starts_with("recursion limit exceeded")
    }
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.path {
            Some(path) => write!(f, "failed to parse Playwright JSON report at `{path}`")?,
            None => write!(f, "failed to parse Playwright JSON report")?,
        }
        if self.is_nesting_too_deep() {
            write!(
                f,
                ": describe blocks are nested too deeply \
                 (JSON nesting is limited to {JSON_NESTING_LIMIT} levels)"
            )?;
        }
        Ok(())
    }
}

impl error::Error for DecodeError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        Some(&self.err)
    }
}
