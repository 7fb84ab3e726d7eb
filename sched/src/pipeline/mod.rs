// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Middleware pipeline for the render scheduler.
//!
//! One render pass = one left-to-right fold of a [`crate::PropsSnapshot`]
//! through an ordered [`Middleware`] list. Steps run strictly sequentially
//! (later steps may depend on earlier output); each step receives a
//! [`StepCtx`] carrying the instance-bound helpers (`render`, `notify`,
//! `previous`, `resolved`, `abort`).
//!
//! Failure is expressed as [`RenderError`]: the cancellation signal
//! ([`RenderError::Aborted`]) is distinguished from real middleware failures
//! by kind, never by message text.

// Attach sources.
pub mod executor;
pub mod middleware;
pub mod render_error;

// Re-export.
pub use executor::*;
pub use middleware::*;
pub use render_error::*;
