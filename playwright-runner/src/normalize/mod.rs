// Copyright (c) The playwright-adapter Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Normalization of Playwright reports into [`NormalizedResults`].
//!
//! The pipeline runs in one direction: report text is decoded into a
//! [`Report`](playwright_metadata::Report), the root suite is flattened into [`FlatSpec`]s, and each
//! spec is mapped to a key (see [`KeyStrategy`]) and a [`NormalizedResult`].
//!
//! Normalization performs no I/O. Structural irregularities in a report are not errors: they are
//! reported through [`ReportWarnings`], and processing continues.

mod flatten;
mod imp;
mod key;
mod outcome;
mod results;

pub use flatten::*;
pub use imp::*;
pub use key::*;
pub use results::*;
