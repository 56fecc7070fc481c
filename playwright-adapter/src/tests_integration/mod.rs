// Copyright (c) The playwright-adapter Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests
//!
//! These run the app in-process, capturing its output with [`OutputWriter::new_test`], instead of
//! spawning the built binary.

use crate::{
    ExpectedError, OutputWriter, PlaywrightAdapterApp,
    output::{Color, OutputContext},
};
use camino::{Utf8Path, Utf8PathBuf};
use camino_tempfile::{Utf8TempDir, tempdir};
use clap::Parser;
use playwright_metadata::AdapterExitCode;
use pretty_assertions::assert_eq;
use serde_json::{Value, json};

fn report_path(name: &str) -> Utf8PathBuf {
    Utf8Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("../fixtures/reports")
        .join(name)
}

fn test_output() -> OutputContext {
    OutputContext {
        color: Color::Never,
    }
}

/// Runs the app with `args` and returns the exit code and the captured result document.
fn exec(args: &[&str]) -> Result<(i32, String), ExpectedError> {
    let app = PlaywrightAdapterApp::try_parse_from(
        ["playwright-adapter", "--user-state-file", "none"]
            .iter()
            .chain(args),
    )
    .unwrap_or_else(|error| panic!("{args:?} should parse: {error}"));

    let mut output = OutputWriter::new_test();
    let code = app.exec(test_output(), &mut output)?;
    let stdout = output.captured().expect("output is UTF-8").to_owned();
    Ok((code, stdout))
}

fn project_dir() -> Utf8TempDir {
    tempdir().unwrap()
}

#[test]
fn parse_file_path_keys() {
    let project_dir = project_dir();
    let (code, stdout) = exec(&[
        "--project-dir",
        project_dir.path().as_str(),
        "parse",
        "--input",
        report_path("basic.json").as_str(),
    ])
    .expect("parse succeeds");

    assert_eq!(code, AdapterExitCode::OK);
    assert!(stdout.ends_with('\n'));
    assert_eq!(stdout.lines().count(), 1, "json output is a single line");

    let results: Value = serde_json::from_str(&stdout).expect("stdout is JSON");
    let file = "/home/user/app/tests/example.spec.ts";
    assert_eq!(
        results[format!("{file}::has title")],
        json!({ "status": "passed", "short": "has title: passed", "errors": [] })
    );
    assert_eq!(
        results[format!("{file}::visual diff")]["status"],
        json!("skipped")
    );
    assert_eq!(
        results[format!("{file}::navigation::get started link")]["status"],
        json!("failed")
    );
    assert_eq!(
        results[format!("{file}::navigation::retries until stable")]["errors"][0]["line"],
        json!(0)
    );
    assert_eq!(results.as_object().map(|map| map.len()), Some(4));
}

#[test]
fn parse_spec_id_keys_pretty() {
    let project_dir = project_dir();
    let config_file = project_dir.path().join("adapter.toml");
    std::fs::write(&config_file, "enable-dynamic-test-discovery = true\n").unwrap();

    let (_, stdout) = exec(&[
        "--project-dir",
        project_dir.path().as_str(),
        "--config-file",
        config_file.as_str(),
        "--message-format",
        "json-pretty",
        "parse",
        "--input",
        report_path("basic.json").as_str(),
    ])
    .expect("parse succeeds");

    assert!(stdout.lines().count() > 1, "json-pretty output spans lines");
    let results: Value = serde_json::from_str(&stdout).expect("stdout is JSON");
    assert_eq!(
        results["3d6b0bd4ee8c5d5a1c2a-9e1b2c7f00e8a7d1b3f4"]["short"],
        json!("has title: passed")
    );
}

#[test]
fn parse_without_suites_is_empty() {
    let project_dir = project_dir();
    let (code, stdout) = exec(&[
        "--project-dir",
        project_dir.path().as_str(),
        "parse",
        "--input",
        report_path("global-errors.json").as_str(),
    ])
    .expect("a report without suites is not an error");

    assert_eq!(code, AdapterExitCode::OK);
    assert_eq!(stdout, "{}\n");
}

#[test]
fn parse_errors() {
    let project_dir = project_dir();
    let invalid = project_dir.path().join("invalid.json");
    std::fs::write(&invalid, "{\"config\": {\"rootDir\": \"/proj\"}, \"suites\": [").unwrap();

    let error = exec(&[
        "--project-dir",
        project_dir.path().as_str(),
        "parse",
        "--input",
        invalid.as_str(),
    ])
    .expect_err("truncated report");
    assert!(
        matches!(error, ExpectedError::ReportDecodeFailed { .. }),
        "unexpected error: {error:?}"
    );
    assert_eq!(
        error.process_exit_code(),
        AdapterExitCode::REPORT_DECODE_FAILED
    );

    let error = exec(&[
        "--project-dir",
        project_dir.path().as_str(),
        "parse",
        "--input",
        project_dir.path().join("missing.json").as_str(),
    ])
    .expect_err("missing input");
    assert!(
        matches!(error, ExpectedError::InputReadFailed { path: Some(_), .. }),
        "unexpected error: {error:?}"
    );
    assert_eq!(error.process_exit_code(), AdapterExitCode::SETUP_ERROR);
}

#[test]
fn invalid_config_is_a_setup_error() {
    let project_dir = project_dir();
    let config_dir = project_dir.path().join(".config");
    std::fs::create_dir_all(&config_dir).unwrap();
    std::fs::write(config_dir.join("playwright-adapter.toml"), "projects = 1\n").unwrap();

    let error = exec(&[
        "--project-dir",
        project_dir.path().as_str(),
        "parse",
        "--input",
        report_path("basic.json").as_str(),
    ])
    .expect_err("invalid config");
    assert!(
        matches!(error, ExpectedError::ConfigParseError { .. }),
        "unexpected error: {error:?}"
    );
    assert_eq!(error.process_exit_code(), AdapterExitCode::SETUP_ERROR);
}

#[test]
fn run_without_node_modules() {
    let project_dir = project_dir();
    std::fs::write(project_dir.path().join("a.spec.ts"), "").unwrap();

    let error = exec(&[
        "--project-dir",
        project_dir.path().as_str(),
        "run",
        "a.spec.ts",
    ])
    .expect_err("no Playwright binary");
    assert_eq!(error.process_exit_code(), AdapterExitCode::BINARY_NOT_FOUND);
}

#[cfg(unix)]
mod fake_playwright {
    use super::*;
    use std::{fs, os::unix::fs::PermissionsExt};

    /// Creates a project whose Playwright binary prints the `report` fixture and exits with 1.
    fn fake_project(report: &str) -> Utf8TempDir {
        let temp_dir = tempdir().unwrap();
        let root = temp_dir.path();

        let bin_dir = root.join("node_modules/.bin");
        fs::create_dir_all(&bin_dir).unwrap();
        let binary = bin_dir.join("playwright");
        fs::write(
            &binary,
            format!(
                "#!/bin/sh\necho \"$*\" > '{root}/args.txt'\ncat '{}'\nexit 1\n",
                report_path(report)
            ),
        )
        .unwrap();
        fs::set_permissions(&binary, fs::Permissions::from_mode(0o755)).unwrap();

        fs::write(root.join("playwright.config.ts"), "").unwrap();
        fs::create_dir_all(root.join("tests")).unwrap();
        fs::write(root.join("tests/example.spec.ts"), "").unwrap();
        temp_dir
    }

    #[test]
    fn run_reports_failures_as_results() {
        let project = fake_project("basic.json");
        let root = project.path();

        let (code, stdout) = exec(&[
            "--project-dir",
            root.as_str(),
            "run",
            "tests/example.spec.ts",
            "--project",
            "firefox",
            "--",
            "--headed",
        ])
        .expect("run succeeds");

        assert_eq!(code, AdapterExitCode::OK);
        let results: Value = serde_json::from_str(&stdout).expect("stdout is JSON");
        assert_eq!(results.as_object().map(|map| map.len()), Some(4));

        let args = fs::read_to_string(root.join("args.txt")).unwrap();
        assert_eq!(
            args.trim_end(),
            format!(
                "test --reporter=json --config={root}/playwright.config.ts --project=firefox \
                 --headed {root}/tests/example.spec.ts"
            )
        );
    }

    #[test]
    fn projects_list() {
        let project = fake_project("list-projects.json");

        let (code, stdout) = exec(&[
            "--project-dir",
            project.path().as_str(),
            "projects",
            "list",
            "tests/example.spec.ts",
        ])
        .expect("projects are listed");

        assert_eq!(code, AdapterExitCode::OK);
        assert_eq!(stdout, "[\"chromium\",\"firefox\",\"Mobile Safari\"]\n");
    }
}
