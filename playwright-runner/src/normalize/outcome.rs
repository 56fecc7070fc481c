// Copyright (c) The playwright-adapter Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use super::{NormalizedResult, ResultError, ResultStatus};
use playwright_metadata::{ReportError, ReportSpec};

impl NormalizedResult {
    /// Computes the verdict, summary and errors for a spec.
    pub fn from_spec(spec: &ReportSpec) -> Self {
        let status = spec_status(spec);
        let errors = spec_errors(spec).map(ResultError::from_report_error).collect();

        Self {
            status,
            short: format!("{}: {status}", spec.title),
            errors,
        }
    }
}

impl ResultError {
    /// Converts a report error, stripping terminal escapes and making the line number 0-based.
    pub fn from_report_error(error: &ReportError) -> Self {
        let line = error
            .location
            .as_ref()
            .and_then(|location| location.line)
            .map_or(0, |line| line.saturating_sub(1));

        Self {
            message: strip_ansi_escapes::strip_str(&error.message),
            line,
        }
    }
}

/// Only the first variant is consulted for skips: a spec whose first variant passed and whose
/// second was skipped is reported as passed.
fn spec_status(spec: &ReportSpec) -> ResultStatus {
    if !spec.ok {
        ResultStatus::Failed
    } else if spec.tests.first().is_some_and(|test| test.is_skipped()) {
        ResultStatus::Skipped
    } else {
        ResultStatus::Passed
    }
}

/// Errors from every attempt of every variant, in encounter order.
fn spec_errors(spec: &ReportSpec) -> impl Iterator<Item = &ReportError> {
    spec.tests
        .iter()
        .flat_map(|test| &test.results)
        .flat_map(|attempt| &attempt.errors)
}
