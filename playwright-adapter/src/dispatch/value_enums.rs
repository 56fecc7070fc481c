// Copyright (c) The playwright-adapter Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Value enums shared across commands.

use crate::{ExpectedError, Result};
use clap::ValueEnum;
use serde::Serialize;
use std::io::Write;

/// Message format options.
#[derive(Copy, Clone, Debug, Default, ValueEnum)]
pub(crate) enum MessageFormatOpts {
    /// JSON with no whitespace.
    #[default]
    Json,
    /// JSON, prettified.
    JsonPretty,
}

impl MessageFormatOpts {
    /// Writes `value` in this format, followed by a newline.
    pub(crate) fn write(self, value: &impl Serialize, mut writer: impl Write) -> Result<()> {
        let res = match self {
            Self::Json => serde_json::to_writer(&mut writer, value),
            Self::JsonPretty => serde_json::to_writer_pretty(&mut writer, value),
        };
        res.map_err(|err| {
            if err.is_io() {
                ExpectedError::write_output_error(err.into())
            } else {
                ExpectedError::SerializeOutputError { err }
            }
        })?;

        writeln!(writer).map_err(ExpectedError::write_output_error)?;
        writer.flush().map_err(ExpectedError::write_output_error)
    }
}
