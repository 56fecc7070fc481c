// Copyright (c) The playwright-adapter Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

#![warn(missing_docs)]

//! Structured access to the machine-readable output of `playwright test --reporter=json`.
//!
//! The entry point is [`Report::parse_json`]. Report types mirror the shape of Playwright's JSON
//! reporter: a [`Report`] holds [`ReportSuite`]s, which hold nested suites and [`ReportSpec`]s.
//! Each spec has one [`ReportTest`] per project it ran in, and each test has one [`TestAttempt`]
//! per try.
//!
//! Fields that `playwright-adapter` does not consume are ignored while decoding.

mod errors;
mod exit_codes;
mod report;

pub use errors::*;
pub use exit_codes::*;
pub use report::*;
