// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Shared ambient plumbing: result alias and logging bootstrap.

// Attach sources.
pub mod common_result;
pub mod log_support;

// Re-export.
pub use common_result::*;
pub use log_support::*;
