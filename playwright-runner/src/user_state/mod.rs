// Copyright (c) The playwright-adapter Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Per-user state for playwright-adapter.
//!
//! User state holds choices that shouldn't be version-controlled, currently the Playwright
//! projects selected for each project directory. It is separate from the repository config
//! (`.config/playwright-adapter.toml`).
//!
//! ## State file location
//!
//! - **Unix/macOS**: `$XDG_DATA_HOME/playwright-adapter/state.toml` or
//!   `~/.local/share/playwright-adapter/state.toml`
//! - **Windows**: `%APPDATA%\playwright-adapter\state.toml`

mod discovery;
mod imp;

pub use discovery::*;
pub use imp::*;
