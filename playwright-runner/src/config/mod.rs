// Copyright (c) The playwright-adapter Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration support for playwright-adapter.
//!
//! Configuration is read from `.config/playwright-adapter.toml` in the project directory. See
//! [`AdapterConfig`] for more.

mod imp;

pub use imp::*;
