// Copyright (c) The playwright-adapter Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Runs Playwright tests and reports their results as a flat map keyed by test identity.
//!
//! This crate is the command-line front end. The report model lives in `playwright-metadata`,
//! and locating, running and normalizing live in `playwright-runner`.

#![warn(missing_docs)]

mod dispatch;
mod errors;
mod output;
#[cfg(test)]
mod tests_integration;

#[doc(hidden)]
pub use dispatch::*;
#[doc(hidden)]
pub use errors::*;
#[doc(hidden)]
pub use output::OutputWriter;
