// Copyright (c) The playwright-adapter Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use camino::{Utf8Path, Utf8PathBuf};
use playwright_runner::normalize::{NormalizedResult, ResultError, ResultStatus};

/// Returns the path to a JSON report under `fixtures/reports`.
pub(crate) fn report_path(name: &str) -> Utf8PathBuf {
    Utf8Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("../fixtures/reports")
        .join(name)
}

pub(crate) fn read_report(name: &str) -> String {
    let path = report_path(name);
    std::fs::read_to_string(&path).unwrap_or_else(|err| panic!("failed to read {path}: {err}"))
}

pub(crate) fn result(
    title: &str,
    status: ResultStatus,
    errors: &[(&str, u32)],
) -> NormalizedResult {
    NormalizedResult {
        status,
        short: format!("{title}: {status}"),
        errors: errors
            .iter()
            .map(|(message, line)| ResultError {
                message: (*message).to_owned(),
                line: *line,
            })
            .collect(),
    }
}

pub(crate) const TIMEOUT_MESSAGE: &str = "TimeoutError: locator.click: Timeout 5000ms exceeded.";
pub(crate) const EXPECT_MESSAGE: &str =
    "Error: expect(received).toBe(expected)\n\nExpected: 2\nReceived: 1";

/// Expected results for `basic.json`, keyed by file path.
pub(crate) fn basic_results() -> Vec<(String, NormalizedResult)> {
    let file = "/home/user/app/tests/example.spec.ts";
    vec![
        (
            format!("{file}::has title"),
            result("has title", ResultStatus::Passed, &[]),
        ),
        (
            format!("{file}::navigation::get started link"),
            result(
                "get started link",
                ResultStatus::Failed,
                &[(TIMEOUT_MESSAGE, 17), (TIMEOUT_MESSAGE, 17)],
            ),
        ),
        (
            format!("{file}::navigation::retries until stable"),
            result(
                "retries until stable",
                ResultStatus::Passed,
                &[(EXPECT_MESSAGE, 0)],
            ),
        ),
        (
            format!("{file}::visual diff"),
            result("visual diff", ResultStatus::Skipped, &[]),
        ),
    ]
}
