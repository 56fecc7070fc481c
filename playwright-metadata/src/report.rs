// Copyright (c) The playwright-adapter Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::DecodeError;
use camino::Utf8PathBuf;
use serde::{Deserialize, Deserializer};
use std::fmt;

/// Root of a report produced by `playwright test --reporter=json`.
///
/// Obtained through [`Report::parse_json`].
#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "camelCase")]
#[non_exhaustive]
pub struct Report {
    /// The resolved Playwright configuration.
    pub config: ReportConfig,

    /// Top-level suites, one per test file.
    #[serde(default, deserialize_with = "null_as_default")]
    pub suites: Vec<ReportSuite>,

    /// Global errors not attached to any test, for example errors thrown while
    /// loading a config or a test file.
    #[serde(default, deserialize_with = "null_as_default")]
    pub errors: Vec<ReportError>,
}

impl Report {
    /// Parses a report from the JSON text emitted by Playwright.
    ///
    /// `null` in place of a list or an optional field is treated the same as an absent field.
    pub fn parse_json(json: impl AsRef<str>) -> Result<Self, DecodeError> {
        let json = json.as_ref();
        let mut deserializer = serde_json::Deserializer::from_str(json);
        let report: Self = serde_path_to_error::deserialize(&mut deserializer)
            .map_err(DecodeError::from_path_error)?;
        deserializer.end().map_err(DecodeError::trailing)?;
        Ok(report)
    }

    /// Returns the root suite, if the report has any suites.
    pub fn root_suite(&self) -> Option<&ReportSuite> {
        self.suites.first()
    }

    /// Returns the names of the projects declared in the Playwright configuration, in order.
    pub fn project_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.config.projects.iter().map(|project| project.name.as_str())
    }
}

/// The subset of the resolved Playwright configuration that is included in a report.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "camelCase")]
#[non_exhaustive]
pub struct ReportConfig {
    /// Absolute path that spec file paths are relative to.
    pub root_dir: Utf8PathBuf,

    /// The configured projects.
    #[serde(default, deserialize_with = "null_as_default")]
    pub projects: Vec<ProjectSummary>,
}

/// A Playwright project, as listed in the report configuration.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "camelCase")]
#[non_exhaustive]
pub struct ProjectSummary {
    /// The project name, as passed to `--project`.
    pub name: String,
}

/// A named grouping node: either a file-level suite or a `describe` block.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "camelCase")]
#[non_exhaustive]
pub struct ReportSuite {
    /// The suite title. For file-level suites this is the file path relative to the root dir.
    pub title: String,

    /// Specs declared directly in this suite.
    #[serde(default, deserialize_with = "null_as_default")]
    pub specs: Vec<ReportSpec>,

    /// Nested suites. Omitted by Playwright for leaf suites.
    #[serde(default, deserialize_with = "null_as_default")]
    pub suites: Vec<ReportSuite>,
}

/// One logical test case as declared in source.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "camelCase")]
#[non_exhaustive]
pub struct ReportSpec {
    /// Stable identifier assigned by Playwright.
    pub id: String,

    /// The test title.
    pub title: String,

    /// The file the spec is declared in, relative to [`ReportConfig::root_dir`].
    pub file: String,

    /// True if every test of this spec had an expected outcome.
    pub ok: bool,

    /// One entry per project the spec ran in.
    #[serde(default, deserialize_with = "null_as_default")]
    pub tests: Vec<ReportTest>,

    /// 1-based line the spec is declared on.
    #[serde(default)]
    pub line: Option<u32>,

    /// 1-based column the spec is declared on.
    #[serde(default)]
    pub column: Option<u32>,

    /// Tags attached to the spec.
    #[serde(default, deserialize_with = "null_as_default")]
    pub tags: Vec<String>,
}

/// One execution variant of a spec, typically one per project.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "camelCase")]
#[non_exhaustive]
pub struct ReportTest {
    /// The overall status of this variant across all of its attempts.
    pub status: TestStatus,

    /// One entry per attempt, including retries.
    #[serde(default, deserialize_with = "null_as_default")]
    pub results: Vec<TestAttempt>,

    /// The project this variant ran in.
    #[serde(default)]
    pub project_name: Option<String>,

    /// The status the test was expected to have, for example `failed` for `test.fail()`.
    #[serde(default)]
    pub expected_status: Option<String>,
}

impl ReportTest {
    /// Returns true if this variant was skipped.
    pub fn is_skipped(&self) -> bool {
        self.status == TestStatus::Skipped
    }
}

/// The outcome of a test variant.
#[derive(Copy, Clone, Debug, Deserialize, Eq, Hash, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum TestStatus {
    /// The test behaved as expected.
    Expected,

    /// The test did not behave as expected.
    Unexpected,

    /// The test behaved as expected only after a retry.
    Flaky,

    /// The test was skipped.
    Skipped,
}

impl TestStatus {
    /// Returns the string used for this status in reports.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Expected => "expected",
            Self::Unexpected => "unexpected",
            Self::Flaky => "flaky",
            Self::Skipped => "skipped",
        }
    }
}

impl fmt::Display for TestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One attempt at running a test variant.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "camelCase")]
#[non_exhaustive]
pub struct TestAttempt {
    /// Errors raised during this attempt.
    #[serde(default, deserialize_with = "null_as_default")]
    pub errors: Vec<ReportError>,

    /// The raw attempt status, for example `passed` or `timedOut`.
    #[serde(default)]
    pub status: Option<String>,

    /// The retry index, 0 for the first attempt.
    #[serde(default)]
    pub retry: Option<u32>,

    /// Wall-clock duration in milliseconds.
    #[serde(default)]
    pub duration: Option<u64>,
}

/// An error raised by a test or by the test run as a whole.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "camelCase")]
#[non_exhaustive]
pub struct ReportError {
    /// The error message. May contain ANSI escape sequences.
    #[serde(default, deserialize_with = "null_as_default")]
    pub message: String,

    /// Where the error was raised, if known.
    #[serde(default)]
    pub location: Option<ErrorLocation>,
}

/// A source location attached to an error.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "camelCase")]
#[non_exhaustive]
pub struct ErrorLocation {
    /// Absolute path to the file.
    #[serde(default)]
    pub file: Option<Utf8PathBuf>,

    /// 1-based line number.
    #[serde(default)]
    pub line: Option<u32>,

    /// 1-based column number.
    #[serde(default)]
    pub column: Option<u32>,
}

// Playwright (and some wrappers around it) emit `null` for fields that have no value.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
