// Copyright (c) The playwright-adapter Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, fmt};

/// Normalized results for a test run, keyed by test identity.
///
/// Serializes to a JSON object whose keys are sorted.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(transparent)]
pub struct NormalizedResults {
    results: BTreeMap<String, NormalizedResult>,
}

impl NormalizedResults {
    /// Creates a new, empty set of results.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a result, returning the result previously stored under the same key.
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        result: NormalizedResult,
    ) -> Option<NormalizedResult> {
        self.results.insert(key.into(), result)
    }

    /// Returns the result for the given key.
    pub fn get(&self, key: &str) -> Option<&NormalizedResult> {
        self.results.get(key)
    }

    /// Returns the number of results.
    pub fn len(&self) -> usize {
        self.results.len()
    }

    /// Returns true if there are no results.
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Iterates over keys and results, in key order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = (&str, &NormalizedResult)> + '_ {
        self.results.iter().map(|(key, result)| (key.as_str(), result))
    }

    /// Returns the number of results with the given status.
    pub fn count(&self, status: ResultStatus) -> usize {
        self.results
            .values()
            .filter(|result| result.status == status)
            .count()
    }
}

impl IntoIterator for NormalizedResults {
    type Item = (String, NormalizedResult);
    type IntoIter = std::collections::btree_map::IntoIter<String, NormalizedResult>;

    fn into_iter(self) -> Self::IntoIter {
        self.results.into_iter()
    }
}

impl FromIterator<(String, NormalizedResult)> for NormalizedResults {
    fn from_iter<T: IntoIterator<Item = (String, NormalizedResult)>>(iter: T) -> Self {
        Self {
            results: iter.into_iter().collect(),
        }
    }
}

/// The verdict and errors for a single spec.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct NormalizedResult {
    /// The overall status.
    pub status: ResultStatus,

    /// A one-line summary, `"{title}: {status}"`.
    pub short: String,

    /// Errors from every attempt of every variant, in encounter order.
    pub errors: Vec<ResultError>,
}

/// A tri-state test verdict.
#[derive(Copy, Clone, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ResultStatus {
    /// The spec passed.
    Passed,
    /// The spec failed.
    Failed,
    /// The spec was skipped.
    Skipped,
}

impl ResultStatus {
    /// Returns the string form of this status.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Passed => "passed",
            Self::Failed => "failed",
            Self::Skipped => "skipped",
        }
    }
}

impl fmt::Display for ResultStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An error attached to a result.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct ResultError {
    /// The error message, with terminal escape sequences removed.
    pub message: String,

    /// 0-based line number, or 0 if the error had no location.
    pub line: u32,
}
