// Copyright (c) The playwright-adapter Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Command dispatch and execution.

mod app;
mod base;
mod projects;
mod run;
mod value_enums;

pub use app::PlaywrightAdapterApp;
