// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use super::CommonResult;

/// Install a global `tracing` subscriber writing human-readable output to
/// stderr. Call once from a binary or test harness; library code only ever
/// emits events and never installs subscribers.
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed.
pub fn try_initialize_logging() -> CommonResult<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|err| miette::miette!("failed to install tracing subscriber: {err}"))
}
