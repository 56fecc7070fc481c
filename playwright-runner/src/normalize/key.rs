// Copyright (c) The playwright-adapter Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use super::FlatSpec;
use camino::Utf8Path;

/// How result keys are derived for specs.
///
/// The strategy is chosen once per run and applied to every spec in that run.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum KeyStrategy {
    /// Build keys from the spec's file path, parent suite title and title.
    ///
    /// Keys have the form `{root_dir}/{file}::{suite}::{title}` for specs inside a `describe`
    /// block, or `{root_dir}/{file}::{title}` for specs at the top level of a file.
    ///
    /// Only the immediate parent suite is part of the key, so two specs with the same title in
    /// identically-named `describe` blocks within the same file get the same key.
    #[default]
    FilePath,

    /// Use the identifier Playwright assigned to the spec.
    SpecId,
}

impl KeyStrategy {
    /// Returns the strategy corresponding to the `enable-dynamic-test-discovery` setting.
    pub fn from_dynamic_discovery(enabled: bool) -> Self {
        if enabled {
            Self::SpecId
        } else {
            Self::FilePath
        }
    }

    /// Computes the key for a spec.
    pub fn key_for(self, root_dir: &Utf8Path, flat: &FlatSpec<'_>) -> String {
        let spec = flat.spec;
        match self {
            Self::SpecId => spec.id.clone(),
            Self::FilePath => {
                // File-level suites are titled with the file path.
                if flat.suite_title != spec.file {
                    format!(
                        "{root_dir}/{}::{}::{}",
                        spec.file, flat.suite_title, spec.title
                    )
                } else {
                    format!("{root_dir}/{}::{}", spec.file, spec.title)
                }
            }
        }
    }
}
