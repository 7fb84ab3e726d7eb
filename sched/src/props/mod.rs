// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Props model for the render scheduler.
//!
//! A render pass accumulates a [`PropsSnapshot`]: a key-value mapping of
//! [`PropValue`]s threaded through the middleware pipeline, plus two structural
//! fields ([`PropsSnapshot::recovery_handler`] and [`PropsSnapshot::error`])
//! that replace the duck-typed markers a dynamic host environment would probe
//! for.

// Attach sources.
pub mod prop_value;
pub mod props_snapshot;

// Re-export.
pub use prop_value::*;
pub use props_snapshot::*;
