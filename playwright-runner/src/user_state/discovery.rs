// Copyright (c) The playwright-adapter Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::errors::UserStateError;
use camino::Utf8PathBuf;
use etcetera::{BaseStrategy, HomeDirError};

/// Returns the default path of the user state file, or `None` if the home directory could not
/// be determined.
pub fn user_state_path() -> Result<Option<Utf8PathBuf>, UserStateError> {
    let strategy = match etcetera::choose_base_strategy() {
        Ok(strategy) => strategy,
        Err(HomeDirError) => return Ok(None),
    };

    let state_path = strategy
        .data_dir()
        .join("playwright-adapter")
        .join("state.toml");

    Utf8PathBuf::try_from(state_path)
        .map(Some)
        .map_err(|error| UserStateError::NonUtf8Path { error })
}
