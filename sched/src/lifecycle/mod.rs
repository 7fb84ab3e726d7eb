// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Per-instance lifecycle state machine.

// Attach sources.
pub mod lifecycle_state;

// Re-export.
pub use lifecycle_state::*;
