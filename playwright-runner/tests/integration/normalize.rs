// Copyright (c) The playwright-adapter Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::fixtures::{basic_results, read_report};
use playwright_metadata::{Report, ReportError};
use playwright_runner::normalize::{
    KeyStrategy, NormalizedResults, ReportNormalizer, ReportWarnings, ResultStatus,
};
use pretty_assertions::assert_eq;

#[derive(Debug, Default)]
struct CollectedWarnings {
    global_errors: Vec<String>,
    no_suites: bool,
    key_collisions: Vec<String>,
}

impl ReportWarnings for CollectedWarnings {
    fn global_errors(&mut self, errors: &[ReportError]) {
        self.global_errors
            .extend(errors.iter().map(|error| error.message.clone()));
    }

    fn no_suites(&mut self) {
        self.no_suites = true;
    }

    fn key_collision(&mut self, key: &str) {
        self.key_collisions.push(key.to_owned());
    }
}

#[test]
fn basic_file_path_keys() {
    let mut warnings = CollectedWarnings::default();
    let results = ReportNormalizer::new(KeyStrategy::FilePath)
        .normalize_json_with_warnings(&read_report("basic.json"), &mut warnings)
        .expect("fixture is a valid report");

    let expected: NormalizedResults = basic_results().into_iter().collect();
    assert_eq!(results, expected);

    assert_eq!(results.count(ResultStatus::Passed), 2);
    assert_eq!(results.count(ResultStatus::Failed), 1);
    assert_eq!(results.count(ResultStatus::Skipped), 1);
    assert!(warnings.global_errors.is_empty());
    assert!(!warnings.no_suites);
    assert!(warnings.key_collisions.is_empty());
}

#[test]
fn basic_spec_id_keys() {
    let results = ReportNormalizer::new(KeyStrategy::SpecId)
        .normalize_json(&read_report("basic.json"))
        .expect("fixture is a valid report");

    let keys: Vec<_> = results.iter().map(|(key, _)| key).collect();
    assert_eq!(
        keys,
        [
            "3d6b0bd4ee8c5d5a1c2a-0c4d7a99e1b2f3a4c5d6",
            "3d6b0bd4ee8c5d5a1c2a-1a2b3c4d5e6f7a8b9c0d",
            "3d6b0bd4ee8c5d5a1c2a-7f3e2d1c0b9a8f7e6d5c",
            "3d6b0bd4ee8c5d5a1c2a-9e1b2c7f00e8a7d1b3f4",
        ]
    );

    // The key strategy only changes keys, never results.
    let by_path: Vec<_> = basic_results().into_iter().map(|(_, result)| result).collect();
    for result in results.iter().map(|(_, result)| result) {
        assert!(by_path.contains(result), "unexpected result: {result:?}");
    }
}

#[test]
fn global_errors_without_suites() {
    let mut warnings = CollectedWarnings::default();
    let results = ReportNormalizer::default()
        .normalize_json_with_warnings(&read_report("global-errors.json"), &mut warnings)
        .expect("fixture is a valid report");

    assert!(results.is_empty());
    assert!(warnings.no_suites);
    assert_eq!(
        warnings.global_errors,
        [
            "\u{1b}[31mError: Cannot find module './helpers'\u{1b}[39m",
            "Error: No tests found",
        ]
    );
}

#[test]
fn results_serialize_as_object() {
    let results = ReportNormalizer::default()
        .normalize_json(&read_report("basic.json"))
        .expect("fixture is a valid report");

    let json = serde_json::to_value(&results).expect("results serialize");
    assert_eq!(
        json["/home/user/app/tests/example.spec.ts::navigation::get started link"],
        serde_json::json!({
            "status": "failed",
            "short": "get started link: failed",
            "errors": [
                { "message": crate::fixtures::TIMEOUT_MESSAGE, "line": 17 },
                { "message": crate::fixtures::TIMEOUT_MESSAGE, "line": 17 },
            ],
        })
    );
}

#[test]
fn projects_from_list_output() {
    let report = Report::parse_json(read_report("list-projects.json")).expect("valid report");
    assert_eq!(
        playwright_runner::projects::project_names(&report),
        ["chromium", "firefox", "Mobile Safari"]
    );
}
