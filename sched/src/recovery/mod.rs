// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Best-effort failure recovery for render passes.

// Attach sources.
pub mod recovery_controller;

// Re-export.
pub use recovery_controller::*;
