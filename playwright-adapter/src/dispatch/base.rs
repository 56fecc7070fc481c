// Copyright (c) The playwright-adapter Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! State shared by every command.

use super::value_enums::MessageFormatOpts;
use crate::{ExpectedError, Result, output::OutputContext};
use camino::{Utf8Path, Utf8PathBuf};
use clap::Args;
use playwright_runner::{
    config::AdapterConfig,
    user_state::{UserState, UserStateLocation},
};
use tracing::debug;

/// Options shared by every command.
#[derive(Debug, Args)]
pub(crate) struct CommonOpts {
    /// Project directory [default: current directory]
    #[arg(long, global = true, value_name = "DIR")]
    pub(crate) project_dir: Option<Utf8PathBuf>,

    #[clap(flatten)]
    pub(crate) output: crate::output::OutputOpts,

    #[clap(flatten)]
    pub(crate) config_opts: ConfigOpts,

    /// Output format
    #[arg(
        long,
        value_enum,
        default_value_t,
        global = true,
        value_name = "FMT",
        help_heading = "Output options"
    )]
    pub(crate) message_format: MessageFormatOpts,
}

/// Configuration options.
#[derive(Debug, Args)]
#[command(next_help_heading = "Config options")]
pub(crate) struct ConfigOpts {
    /// Config file [default: project-dir/.config/playwright-adapter.toml]
    #[arg(long, global = true, value_name = "PATH")]
    pub(crate) config_file: Option<Utf8PathBuf>,

    /// User state file, or "none" to neither read nor save project selections
    /// [default: data-dir/playwright-adapter/state.toml]
    #[arg(
        long,
        global = true,
        value_name = "PATH",
        env = "PLAYWRIGHT_ADAPTER_USER_STATE_FILE"
    )]
    pub(crate) user_state_file: Option<String>,
}

/// A loaded config plus the output context for a command.
pub(crate) struct BaseApp {
    pub(crate) output: OutputContext,
    pub(crate) config: AdapterConfig,
    pub(crate) message_format: MessageFormatOpts,
    user_state_file: Option<String>,
}

impl BaseApp {
    pub(crate) fn new(output: OutputContext, common: CommonOpts) -> Result<Self> {
        let project_dir = match common.project_dir {
            Some(project_dir) => project_dir,
            None => current_dir()?,
        };
        debug!("project directory: {project_dir}");

        let config =
            AdapterConfig::from_sources(project_dir, common.config_opts.config_file.as_deref())?;

        Ok(Self {
            output,
            config,
            message_format: common.message_format,
            user_state_file: common.config_opts.user_state_file,
        })
    }

    pub(crate) fn project_dir(&self) -> &Utf8Path {
        self.config.project_dir()
    }

    pub(crate) fn user_state_location(&self) -> UserStateLocation<'_> {
        UserStateLocation::from_cli_or_env(self.user_state_file.as_deref())
    }

    /// Loads user state, or returns empty state if project selections aren't persisted.
    pub(crate) fn load_user_state(&self) -> Result<UserState> {
        if !self.config.persist_project_selection() {
            return Ok(UserState::default());
        }
        Ok(UserState::load(self.user_state_location())?)
    }
}

fn current_dir() -> Result<Utf8PathBuf> {
    let current_dir =
        std::env::current_dir().map_err(|err| ExpectedError::CurrentDirFailed { err })?;
    Utf8PathBuf::try_from(current_dir).map_err(|err| ExpectedError::CurrentDirNotUtf8 { err })
}
