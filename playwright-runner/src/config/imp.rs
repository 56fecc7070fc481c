// Copyright (c) The playwright-adapter Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::{errors::ConfigParseError, normalize::KeyStrategy};
use camino::{Utf8Path, Utf8PathBuf};
use itertools::Itertools;
use serde::Deserialize;
use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, warn};

/// Trait for handling configuration warnings.
///
/// This trait allows for different warning handling strategies, such as logging warnings
/// (the default behavior) or collecting them for testing purposes.
pub trait ConfigWarnings {
    /// Handle unknown configuration keys found in a config file.
    fn unknown_config_keys(
        &mut self,
        config_file: &Utf8Path,
        project_dir: &Utf8Path,
        unknown: &BTreeSet<String>,
    );
}

/// Default implementation of ConfigWarnings that logs warnings using the tracing crate.
pub struct DefaultConfigWarnings;

impl ConfigWarnings for DefaultConfigWarnings {
    fn unknown_config_keys(
        &mut self,
        config_file: &Utf8Path,
        project_dir: &Utf8Path,
        unknown: &BTreeSet<String>,
    ) {
        let unknown_str = match unknown.iter().exactly_one() {
            // Print this on the same line.
            Ok(key) => format!("key: {key}"),
            Err(keys) => {
                let mut unknown_str = "keys:\n".to_owned();
                for key in keys {
                    unknown_str.push_str("\n  - ");
                    unknown_str.push_str(key);
                }
                unknown_str
            }
        };

        warn!(
            "in config file {}, ignoring unknown configuration {unknown_str}",
            config_file.strip_prefix(project_dir).unwrap_or(config_file),
        );
    }
}

/// Configuration for playwright-adapter.
///
/// Repository-specific configuration in [`CONFIG_PATH`](Self::CONFIG_PATH) is layered on top of
/// the embedded [default config](Self::DEFAULT_CONFIG).
#[derive(Clone, Debug)]
pub struct AdapterConfig {
    project_dir: Utf8PathBuf,
    enable_dynamic_test_discovery: bool,
    projects: Vec<String>,
    persist_project_selection: bool,
    extra_args: Vec<String>,
    env: BTreeMap<String, String>,
    playwright_binary: Option<Utf8PathBuf>,
    playwright_config: Option<Utf8PathBuf>,
    playwright_cwd: Option<Utf8PathBuf>,
}

impl AdapterConfig {
    /// The default location of the config within the project directory.
    pub const CONFIG_PATH: &'static str = ".config/playwright-adapter.toml";

    /// Contains the default config as a TOML file.
    pub const DEFAULT_CONFIG: &'static str = include_str!("../../default-config.toml");

    /// Reads the config from the given file, or if not specified from
    /// [`CONFIG_PATH`](Self::CONFIG_PATH) in the project directory.
    ///
    /// If no config file is specified and the project directory doesn't have one, uses the
    /// default config options.
    pub fn from_sources(
        project_dir: impl Into<Utf8PathBuf>,
        config_file: Option<&Utf8Path>,
    ) -> Result<Self, ConfigParseError> {
        Self::from_sources_with_warnings(project_dir, config_file, &mut DefaultConfigWarnings)
    }

    /// Load configuration from the given sources with custom warning handling.
    pub fn from_sources_with_warnings(
        project_dir: impl Into<Utf8PathBuf>,
        config_file: Option<&Utf8Path>,
        warnings: &mut impl ConfigWarnings,
    ) -> Result<Self, ConfigParseError> {
        let project_dir = project_dir.into();
        let default_config = DefaultAdapterConfig::from_embedded();

        let deserialized = match config_file {
            Some(config_file) => Some(DeserializedAdapterConfig::from_path(
                config_file,
                &project_dir,
                warnings,
            )?),
            None => {
                let config_file = project_dir.join(Self::CONFIG_PATH);
                if config_file.exists() {
                    Some(DeserializedAdapterConfig::from_path(
                        &config_file,
                        &project_dir,
                        warnings,
                    )?)
                } else {
                    debug!("config: no config file at {config_file}, using defaults");
                    None
                }
            }
        };

        Ok(Self::resolve(
            project_dir,
            default_config,
            deserialized.unwrap_or_default(),
        ))
    }

    /// Returns the default config for the given project directory.
    pub fn default_config(project_dir: impl Into<Utf8PathBuf>) -> Self {
        Self::resolve(
            project_dir.into(),
            DefaultAdapterConfig::from_embedded(),
            DeserializedAdapterConfig::default(),
        )
    }

    fn resolve(
        project_dir: Utf8PathBuf,
        default_config: DefaultAdapterConfig,
        deserialized: DeserializedAdapterConfig,
    ) -> Self {
        let mut env = default_config.env;
        env.extend(deserialized.env);

        // Relative paths are relative to the project directory.
        let playwright_binary = deserialized
            .playwright_binary
            .map(|path| project_dir.join(path));
        let playwright_config = deserialized
            .playwright_config
            .map(|path| project_dir.join(path));
        let playwright_cwd = deserialized
            .playwright_cwd
            .map(|path| project_dir.join(path));

        Self {
            enable_dynamic_test_discovery: deserialized
                .enable_dynamic_test_discovery
                .unwrap_or(default_config.enable_dynamic_test_discovery),
            projects: deserialized.projects.unwrap_or(default_config.projects),
            persist_project_selection: deserialized
                .persist_project_selection
                .unwrap_or(default_config.persist_project_selection),
            extra_args: deserialized
                .extra_args
                .unwrap_or(default_config.extra_args),
            env,
            playwright_binary,
            playwright_config,
            playwright_cwd,
            project_dir,
        }
    }

    /// Returns the project directory this config was loaded for.
    pub fn project_dir(&self) -> &Utf8Path {
        &self.project_dir
    }

    /// Returns true if results should be keyed by Playwright's test identifiers.
    pub fn enable_dynamic_test_discovery(&self) -> bool {
        self.enable_dynamic_test_discovery
    }

    /// Returns the key strategy to use for a run.
    pub fn key_strategy(&self) -> KeyStrategy {
        KeyStrategy::from_dynamic_discovery(self.enable_dynamic_test_discovery)
    }

    /// Returns the configured projects.
    pub fn projects(&self) -> &[String] {
        &self.projects
    }

    /// Returns true if project selections should be persisted.
    pub fn persist_project_selection(&self) -> bool {
        self.persist_project_selection
    }

    /// Returns extra arguments for every Playwright invocation.
    pub fn extra_args(&self) -> &[String] {
        &self.extra_args
    }

    /// Returns environment variables for the Playwright process.
    pub fn env(&self) -> &BTreeMap<String, String> {
        &self.env
    }

    /// Returns the Playwright binary override, if any.
    pub fn playwright_binary(&self) -> Option<&Utf8Path> {
        self.playwright_binary.as_deref()
    }

    /// Returns the Playwright config file override, if any.
    pub fn playwright_config(&self) -> Option<&Utf8Path> {
        self.playwright_config.as_deref()
    }

    /// Returns the working directory override for Playwright, if any.
    pub fn playwright_cwd(&self) -> Option<&Utf8Path> {
        self.playwright_cwd.as_deref()
    }
}

/// The embedded default config. Keys without a default value are not listed here.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "kebab-case")]
struct DefaultAdapterConfig {
    enable_dynamic_test_discovery: bool,
    projects: Vec<String>,
    persist_project_selection: bool,
    extra_args: Vec<String>,
    #[serde(default)]
    env: BTreeMap<String, String>,
}

impl DefaultAdapterConfig {
    fn from_embedded() -> Self {
        toml::from_str(AdapterConfig::DEFAULT_CONFIG).expect("embedded default config is valid")
    }
}

/// Repository config (deserialized form). Unset keys fall back to the default config.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
struct DeserializedAdapterConfig {
    enable_dynamic_test_discovery: Option<bool>,
    projects: Option<Vec<String>>,
    persist_project_selection: Option<bool>,
    extra_args: Option<Vec<String>>,
    #[serde(default)]
    env: BTreeMap<String, String>,
    playwright_binary: Option<Utf8PathBuf>,
    playwright_config: Option<Utf8PathBuf>,
    playwright_cwd: Option<Utf8PathBuf>,
}

impl DeserializedAdapterConfig {
    fn from_path(
        config_file: &Utf8Path,
        project_dir: &Utf8Path,
        warnings: &mut impl ConfigWarnings,
    ) -> Result<Self, ConfigParseError> {
        debug!("config: loading from {config_file}");
        let contents = std::fs::read_to_string(config_file).map_err(|error| {
            ConfigParseError::Read {
                config_file: config_file.to_owned(),
                error,
            }
        })?;

        let (config, unknown) =
            Self::deserialize_toml(&contents).map_err(|error| ConfigParseError::Parse {
                config_file: config_file.to_owned(),
                error,
            })?;

        if !unknown.is_empty() {
            warnings.unknown_config_keys(config_file, project_dir, &unknown);
        }

        Ok(config)
    }

    /// Deserializes TOML content and returns the config along with any unknown keys.
    fn deserialize_toml(contents: &str) -> Result<(Self, BTreeSet<String>), toml::de::Error> {
        let deserializer = toml::Deserializer::parse(contents)?;
        let mut unknown = BTreeSet::new();
        let config: DeserializedAdapterConfig =
            serde_ignored::deserialize(deserializer, |path| {
                unknown.insert(path.to_string());
            })?;
        Ok((config, unknown))
    }
}
