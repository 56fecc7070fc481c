// Copyright (c) The playwright-adapter Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Listing Playwright projects and choosing which ones to run.

use crate::{config::AdapterConfig, user_state::UserState};
use playwright_metadata::Report;
use std::fmt;

/// Returns the names of the projects declared in a report's config, in declaration order.
pub fn project_names(report: &Report) -> Vec<String> {
    report.project_names().map(ToOwned::to_owned).collect()
}

/// Where a [`ProjectSelection`] came from.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ProjectSource {
    /// Projects passed on the command line.
    Cli,

    /// Projects previously selected and saved in user state.
    Persisted,

    /// The `projects` key in the adapter config.
    Config,
}

impl fmt::Display for ProjectSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cli => write!(f, "command line"),
            Self::Persisted => write!(f, "saved selection"),
            Self::Config => write!(f, "config"),
        }
    }
}

/// The projects a run is restricted to. An empty selection runs all projects.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ProjectSelection {
    projects: Vec<String>,
    source: ProjectSource,
}

impl ProjectSelection {
    /// Resolves the projects to run.
    ///
    /// In order of precedence:
    ///
    /// 1. Projects passed on the command line.
    /// 2. The saved selection for the project directory, if `persist-project-selection` is set.
    /// 3. The configured `projects`.
    pub fn resolve(cli_projects: &[String], config: &AdapterConfig, state: &UserState) -> Self {
        if !cli_projects.is_empty() {
            return Self {
                projects: cli_projects.to_vec(),
                source: ProjectSource::Cli,
            };
        }

        if config.persist_project_selection()
            && let Some(selected) = state.selected_projects(config.project_dir())
        {
            return Self {
                projects: selected.to_vec(),
                source: ProjectSource::Persisted,
            };
        }

        Self {
            projects: config.projects().to_vec(),
            source: ProjectSource::Config,
        }
    }

    /// Returns the selected projects.
    pub fn projects(&self) -> &[String] {
        &self.projects
    }

    /// Returns where the selection came from.
    pub fn source(&self) -> ProjectSource {
        self.source
    }

    /// Returns true if all projects should run.
    pub fn is_all(&self) -> bool {
        self.projects.is_empty()
    }
}
