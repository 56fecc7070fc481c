// Copyright (c) The playwright-adapter Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::fixtures::{basic_results, report_path};
use camino::Utf8Path;
use camino_tempfile::{Utf8TempDir, tempdir};
use indoc::formatdoc;
use playwright_runner::{
    config::AdapterConfig,
    errors::{RunCommandError, RunError},
    normalize::NormalizedResults,
    runner::{RunRequest, TestRun},
};
use pretty_assertions::assert_eq;
use std::{fs, os::unix::fs::PermissionsExt};

/// Creates a project whose Playwright binary prints `report` and exits with `exit_code`.
///
/// The binary records its arguments and working directory in `invocation.txt`.
fn fake_project(report: &str, exit_code: i32) -> Utf8TempDir {
    let temp_dir = tempdir().unwrap();
    let root = temp_dir.path();

    let bin_dir = root.join("node_modules/.bin");
    fs::create_dir_all(&bin_dir).unwrap();
    let binary = bin_dir.join("playwright");
    fs::write(
        &binary,
        formatdoc! {r#"
            #!/bin/sh
            echo "cwd=$(pwd)" > '{root}/invocation.txt'
            echo "args=$*" >> '{root}/invocation.txt'
            echo "env=$ADAPTER_MARKER" >> '{root}/invocation.txt'
            cat '{report}'
            exit {exit_code}
        "#,
            root = root,
            report = report_path(report),
            exit_code = exit_code,
        },
    )
    .unwrap();
    fs::set_permissions(&binary, fs::Permissions::from_mode(0o755)).unwrap();

    fs::create_dir_all(root.join("e2e/tests")).unwrap();
    fs::write(root.join("e2e/playwright.config.ts"), "").unwrap();
    fs::write(root.join("e2e/tests/example.spec.ts"), "").unwrap();
    fs::create_dir_all(root.join(".config")).unwrap();
    fs::write(
        root.join(".config/playwright-adapter.toml"),
        formatdoc! {r#"
            extra-args = ["--workers=1"]

            [env]
            ADAPTER_MARKER = "from-config"
        "#},
    )
    .unwrap();

    temp_dir
}

fn invocation(root: &Utf8Path) -> Vec<String> {
    fs::read_to_string(root.join("invocation.txt"))
        .unwrap()
        .lines()
        .map(ToOwned::to_owned)
        .collect()
}

#[test]
fn run_with_failures_normalizes_report() {
    let temp_dir = fake_project("basic.json", 1);
    let root = temp_dir.path();
    let config = AdapterConfig::from_sources(root, None).expect("config is valid");

    let run = TestRun::new(&config, "e2e/tests/example.spec.ts").expect("binary exists");
    let projects = vec!["chromium".to_owned()];
    let results = run
        .exec(&RunRequest {
            projects: &projects,
            ..RunRequest::default()
        })
        .expect("exit code 1 still produces results");

    let expected: NormalizedResults = basic_results().into_iter().collect();
    assert_eq!(results, expected);

    let e2e = root.join("e2e").canonicalize_utf8().unwrap();
    assert_eq!(
        invocation(root),
        [
            format!("cwd={e2e}"),
            format!(
                "args=test --reporter=json --config={root}/e2e/playwright.config.ts \
                 --project=chromium --workers=1 {root}/e2e/tests/example.spec.ts"
            ),
            "env=from-config".to_owned(),
        ]
    );
}

#[test]
fn list_projects() {
    let temp_dir = fake_project("list-projects.json", 1);
    let root = temp_dir.path();
    let config = AdapterConfig::from_sources(root, None).expect("config is valid");

    let run = TestRun::new(&config, "e2e/tests/example.spec.ts").expect("binary exists");
    let projects = run.list_projects().expect("projects are listed");
    assert_eq!(projects, ["chromium", "firefox", "Mobile Safari"]);

    let invocation = invocation(root);
    assert_eq!(
        invocation[1],
        format!("args=test --list --reporter=json --config={root}/e2e/playwright.config.ts ./does-not-exist")
    );
}

#[test]
fn unexpected_exit_code_is_an_error() {
    let temp_dir = fake_project("basic.json", 3);
    let config = AdapterConfig::from_sources(temp_dir.path(), None).expect("config is valid");

    let run = TestRun::new(&config, "e2e/tests/example.spec.ts").expect("binary exists");
    let error = run
        .exec(&RunRequest::default())
        .expect_err("exit code 3 is a failure");
    assert!(
        matches!(
            error,
            RunError::Command(RunCommandError::CommandFailed {
                exit_code: Some(3),
                ..
            })
        ),
        "unexpected error: {error:?}"
    );
}

#[test]
fn invalid_report_is_an_error() {
    let temp_dir = tempdir().unwrap();
    let root = temp_dir.path();
    fs::write(root.join("not-a-report.json"), "Error: Playwright Test did not expect test()").unwrap();
    let bin_dir = root.join("node_modules/.bin");
    fs::create_dir_all(&bin_dir).unwrap();
    let binary = bin_dir.join("playwright");
    fs::write(&binary, format!("#!/bin/sh\ncat '{root}/not-a-report.json'\n")).unwrap();
    fs::set_permissions(&binary, fs::Permissions::from_mode(0o755)).unwrap();
    fs::write(root.join("a.spec.ts"), "").unwrap();

    let config = AdapterConfig::default_config(root);
    let run = TestRun::new(&config, "a.spec.ts").expect("binary exists");
    let error = run
        .exec(&RunRequest::default())
        .expect_err("output is not a report");
    assert!(
        matches!(error, RunError::Decode(_)),
        "unexpected error: {error:?}"
    );
}
