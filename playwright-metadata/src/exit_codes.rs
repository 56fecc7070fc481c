// Copyright (c) The playwright-adapter Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

/// Documented exit codes for `playwright-adapter` failures.
///
/// `playwright-adapter` runs may fail for a variety of reasons. This structure documents the exit
/// codes that may occur in case of expected failures.
///
/// Failing tests are not an adapter failure: they are reported as `failed` results, and the
/// adapter exits with [`OK`](Self::OK).
///
/// Unknown/unexpected failures will always result in exit code 1.
pub enum AdapterExitCode {}

impl AdapterExitCode {
    /// No errors occurred and the adapter exited normally.
    pub const OK: i32 = 0;

    /// The Playwright binary could not be located.
    pub const BINARY_NOT_FOUND: i32 = 102;

    /// Spawning Playwright failed, or it exited with an unexpected code.
    pub const COMMAND_FAILED: i32 = 101;

    /// The report produced by Playwright could not be decoded.
    pub const REPORT_DECODE_FAILED: i32 = 104;

    /// Writing data to stdout or stderr produced an error.
    pub const WRITE_OUTPUT_ERROR: i32 = 110;

    /// A user issue happened while setting up an adapter invocation, for example an invalid
    /// config file.
    pub const SETUP_ERROR: i32 = 96;

    /// The interactive project selection was cancelled or could not be shown.
    pub const SELECTION_CANCELLED: i32 = 82;
}
