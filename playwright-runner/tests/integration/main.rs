// Copyright (c) The playwright-adapter Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

mod fixtures;
mod normalize;
#[cfg(unix)]
mod run;
