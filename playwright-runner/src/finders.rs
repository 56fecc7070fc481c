// Copyright (c) The playwright-adapter Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Locating the Playwright binary, config file and working directory for a test file.

use crate::{config::AdapterConfig, errors::LocateBinaryError};
use camino::{Utf8Path, Utf8PathBuf};
use tracing::debug;

/// File names recognized as Playwright config files, in order of preference.
pub const CONFIG_FILE_NAMES: &[&str] = &[
    "playwright.config.ts",
    "playwright.config.js",
    "playwright.config.mts",
    "playwright.config.mjs",
    "playwright.config.cts",
    "playwright.config.cjs",
];

#[cfg(windows)]
const BINARY_NAME: &str = "playwright.cmd";
#[cfg(not(windows))]
const BINARY_NAME: &str = "playwright";

/// Returns the nearest directory, starting at `start` and walking up, that contains an entry named
/// `name`.
///
/// If `start` is a file, the search starts at its parent directory. If `is_dir` is true, only
/// directories named `name` match; otherwise only files do.
pub fn find_ancestor(start: &Utf8Path, name: &str, is_dir: bool) -> Option<Utf8PathBuf> {
    let start = if start.is_dir() {
        start
    } else {
        start.parent()?
    };

    start
        .ancestors()
        .find(|dir| {
            let candidate = dir.join(name);
            if is_dir {
                candidate.is_dir()
            } else {
                candidate.is_file()
            }
        })
        .map(ToOwned::to_owned)
}

fn find_config_ancestor(file_path: &Utf8Path) -> Option<Utf8PathBuf> {
    let start = if file_path.is_dir() {
        file_path
    } else {
        file_path.parent()?
    };

    start.ancestors().find_map(|dir| {
        CONFIG_FILE_NAMES
            .iter()
            .map(|name| dir.join(name))
            .find(|candidate| candidate.is_file())
    })
}

/// Locates the Playwright binary, config file and working directory for test files.
///
/// Paths set in the [`AdapterConfig`] take precedence over lookup.
#[derive(Clone, Copy, Debug)]
pub struct Locator<'cfg> {
    config: &'cfg AdapterConfig,
}

impl<'cfg> Locator<'cfg> {
    /// Creates a new locator.
    pub fn new(config: &'cfg AdapterConfig) -> Self {
        Self { config }
    }

    /// Returns the path to the Playwright binary used for `file_path`.
    ///
    /// Looks for `node_modules/.bin/playwright` in the nearest ancestor that has a
    /// `node_modules` directory.
    pub fn locate_binary(&self, file_path: &Utf8Path) -> Result<Utf8PathBuf, LocateBinaryError> {
        if let Some(binary) = self.config.playwright_binary() {
            debug!("using configured Playwright binary {binary}");
            return Ok(binary.to_owned());
        }

        let root = find_ancestor(file_path, "node_modules", true).ok_or_else(|| {
            LocateBinaryError::NodeModulesNotFound {
                file_path: file_path.to_owned(),
            }
        })?;

        let binary = root.join("node_modules").join(".bin").join(BINARY_NAME);
        if binary.is_file() {
            debug!("located Playwright binary at {binary}");
            Ok(binary)
        } else {
            Err(LocateBinaryError::BinaryNotFound { expected: binary })
        }
    }

    /// Returns the path to the Playwright config file used for `file_path`, if one exists.
    pub fn locate_config(&self, file_path: &Utf8Path) -> Option<Utf8PathBuf> {
        if let Some(config) = self.config.playwright_config() {
            return Some(config.to_owned());
        }

        // The nearest directory with any config file wins, regardless of extension.
        let config = find_config_ancestor(file_path);
        if let Some(config) = &config {
            debug!("located Playwright config at {config}");
        }
        config
    }

    /// Returns the directory Playwright should be run from for `file_path`: the configured
    /// `playwright-cwd`, or else the directory containing its config file.
    pub fn derive_cwd(&self, file_path: &Utf8Path) -> Option<Utf8PathBuf> {
        if let Some(cwd) = self.config.playwright_cwd() {
            debug!("using configured working directory {cwd}");
            return Some(cwd.to_owned());
        }

        self.locate_config(file_path)
            .and_then(|config| config.parent().map(ToOwned::to_owned))
    }
}
