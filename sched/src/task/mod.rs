// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! In-flight render pass tracking for one component instance.

// Attach sources.
pub mod task_registry;

// Re-export.
pub use task_registry::*;
