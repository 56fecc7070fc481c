// Copyright (c) The playwright-adapter Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The `projects` command.

use super::base::BaseApp;
use crate::{ExpectedError, Result, output::OutputWriter};
use camino::Utf8PathBuf;
use clap::Subcommand;
use dialoguer::{
    MultiSelect,
    theme::{ColorfulTheme, SimpleTheme, Theme},
};
use owo_colors::OwoColorize;
use playwright_metadata::AdapterExitCode;
use playwright_runner::{projects::ProjectSelection, runner::TestRun};
use tracing::info;

#[derive(Debug, Subcommand)]
pub(crate) enum ProjectsCommand {
    /// List the projects declared in the Playwright config for a test file
    List {
        /// Test file whose Playwright config is inspected
        #[arg(value_name = "FILE")]
        file: Utf8PathBuf,
    },

    /// Interactively choose the projects to run
    ///
    /// The choice is saved if `persist-project-selection` is enabled in the config, and is then
    /// used by `run` when no `--project` is passed.
    Select {
        /// Test file whose Playwright config is inspected
        #[arg(value_name = "FILE")]
        file: Utf8PathBuf,
    },
}

impl ProjectsCommand {
    pub(crate) fn exec(self, base: BaseApp, output_writer: &mut OutputWriter) -> Result<i32> {
        match self {
            Self::List { file } => {
                let projects = TestRun::new(&base.config, &file)?.list_projects()?;
                base.message_format
                    .write(&projects, output_writer.results_writer())?;
                Ok(AdapterExitCode::OK)
            }
            Self::Select { file } => {
                let projects = TestRun::new(&base.config, &file)?.list_projects()?;
                if projects.is_empty() {
                    return Err(ExpectedError::NoProjectsFound { file_path: file });
                }

                let mut state = base.load_user_state()?;
                let current = ProjectSelection::resolve(&[], &base.config, &state);
                let defaults: Vec<bool> = projects
                    .iter()
                    .map(|project| current.projects().contains(project))
                    .collect();

                let colorful_theme = ColorfulTheme::default();
                let theme: &dyn Theme = if base
                    .output
                    .color
                    .should_colorize(supports_color::Stream::Stderr)
                {
                    &colorful_theme
                } else {
                    &SimpleTheme
                };

                let chosen = MultiSelect::with_theme(theme)
                    .with_prompt("select projects to run")
                    .items(&projects)
                    .defaults(&defaults)
                    .interact_opt()
                    .map_err(|err| ExpectedError::DialoguerError { err })?;
                let Some(indexes) = chosen else {
                    return Err(ExpectedError::SelectionCancelled);
                };

                let selected: Vec<String> = indexes
                    .into_iter()
                    .map(|index| projects[index].clone())
                    .collect();

                let styles = base.output.stderr_styles();
                if base.config.persist_project_selection() {
                    state.set_selected_projects(base.project_dir(), selected.clone());
                    state.save()?;
                    if let Some(path) = state.path() {
                        info!("saved project selection to {}", path.style(styles.bold));
                    }
                } else {
                    info!(
                        "not saving project selection: `{}` is disabled",
                        "persist-project-selection".style(styles.bold)
                    );
                }

                base.message_format
                    .write(&selected, output_writer.results_writer())?;
                Ok(AdapterExitCode::OK)
            }
        }
    }
}
