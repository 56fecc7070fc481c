// Copyright (c) The playwright-adapter Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use super::{KeyStrategy, NormalizedResult, NormalizedResults, flatten_specs};
use camino::Utf8Path;
use playwright_metadata::{DecodeError, Report, ReportError, ReportSuite};
use tracing::{debug, warn};

/// Trait for handling irregularities found while normalizing a report.
///
/// None of these stop normalization. This trait allows for different handling strategies, such as
/// logging warnings (the default behavior) or collecting them for testing purposes.
pub trait ReportWarnings {
    /// The report contained more than one global error.
    ///
    /// Global errors are not attached to any result.
    fn global_errors(&mut self, errors: &[ReportError]);

    /// The report contained no suites, so no results were produced.
    fn no_suites(&mut self);

    /// Two specs produced the same key. The later spec's result replaced the earlier one.
    fn key_collision(&mut self, key: &str);
}

/// Default implementation of [`ReportWarnings`] that logs warnings using the tracing crate.
#[derive(Copy, Clone, Debug, Default)]
pub struct DefaultReportWarnings;

impl ReportWarnings for DefaultReportWarnings {
    fn global_errors(&mut self, errors: &[ReportError]) {
        warn!("global errors found in report ({} errors)", errors.len());
        for error in errors {
            debug!(
                "global error: {}",
                strip_ansi_escapes::strip_str(&error.message)
            );
        }
    }

    fn no_suites(&mut self) {
        warn!("no test suites found in report");
    }

    fn key_collision(&mut self, key: &str) {
        warn!("multiple tests map to result key `{key}`, keeping the last one");
    }
}

/// Converts Playwright reports into [`NormalizedResults`].
///
/// A normalizer is a pure function of its inputs: normalizing the same report twice produces the
/// same results.
#[derive(Copy, Clone, Debug, Default)]
pub struct ReportNormalizer {
    key_strategy: KeyStrategy,
}

impl ReportNormalizer {
    /// Creates a new normalizer with the given key strategy.
    pub fn new(key_strategy: KeyStrategy) -> Self {
        Self { key_strategy }
    }

    /// Returns the key strategy used by this normalizer.
    pub fn key_strategy(&self) -> KeyStrategy {
        self.key_strategy
    }

    /// Decodes and normalizes the JSON text of a report.
    ///
    /// Returns an error, and no results, if the text is not a valid report.
    pub fn normalize_json(&self, json: &str) -> Result<NormalizedResults, DecodeError> {
        self.normalize_json_with_warnings(json, &mut DefaultReportWarnings)
    }

    /// Decodes and normalizes the JSON text of a report with custom warning handling.
    pub fn normalize_json_with_warnings(
        &self,
        json: &str,
        warnings: &mut impl ReportWarnings,
    ) -> Result<NormalizedResults, DecodeError> {
        let report = Report::parse_json(json)?;
        Ok(self.normalize_with_warnings(&report, warnings))
    }

    /// Normalizes a decoded report.
    pub fn normalize(&self, report: &Report) -> NormalizedResults {
        self.normalize_with_warnings(report, &mut DefaultReportWarnings)
    }

    /// Normalizes a decoded report with custom warning handling.
    pub fn normalize_with_warnings(
        &self,
        report: &Report,
        warnings: &mut impl ReportWarnings,
    ) -> NormalizedResults {
        if report.errors.len() > 1 {
            warnings.global_errors(&report.errors);
        }

        let Some(root) = report.root_suite() else {
            warnings.no_suites();
            return NormalizedResults::new();
        };

        self.normalize_suite(root, &report.config.root_dir, warnings)
    }

    /// Normalizes every spec reachable from `suite`.
    ///
    /// `root_dir` is the report's root directory, used for file path keys.
    pub fn normalize_suite(
        &self,
        suite: &ReportSuite,
        root_dir: &Utf8Path,
        warnings: &mut impl ReportWarnings,
    ) -> NormalizedResults {
        let mut results = NormalizedResults::new();

        for flat in flatten_specs(suite) {
            let key = self.key_strategy.key_for(root_dir, &flat);
            let result = NormalizedResult::from_spec(flat.spec);
            if results.insert(key.clone(), result).is_some() {
                warnings.key_collision(&key);
            }
        }

        debug!(
            "normalized {} results from suite `{}`",
            results.len(),
            suite.title
        );
        results
    }
}
