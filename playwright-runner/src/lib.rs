// Copyright (c) The playwright-adapter Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

#![warn(missing_docs)]

//! Core functionality for playwright-adapter: locating Playwright for a test file, running it
//! with the JSON reporter, and turning the report into a flat map of results.
//!
//! The basic flow is:
//!
//! 1. Load an [`AdapterConfig`](config::AdapterConfig) for the project directory.
//! 2. Create a [`TestRun`](runner::TestRun) for a test file. This locates the Playwright binary,
//!    config file and working directory.
//! 3. Call [`TestRun::exec`](runner::TestRun::exec), which runs Playwright and normalizes the
//!    report with a [`ReportNormalizer`](normalize::ReportNormalizer).
//!
//! Reports produced elsewhere can be normalized directly with
//! [`ReportNormalizer::normalize_json`](normalize::ReportNormalizer::normalize_json).

pub mod command;
pub mod config;
pub mod errors;
pub mod finders;
pub mod normalize;
pub mod projects;
pub mod runner;
pub mod user_state;
