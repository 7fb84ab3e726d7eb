// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! The render orchestrator and its collaborator seams.
//!
//! [`RenderScheduler`] is the public-facing coordinator for one component
//! instance: it owns the connect/disconnect lifecycle hooks and the `render`
//! entry point, and composes the task registry, lifecycle state, middleware
//! pipeline, and error recovery per pass.
//!
//! ```text
//! render() ──▶ pipeline executor ──▶ success: commit (flag + notify + view)
//!                                └──▶ failure: recovery controller
//!                           always ──▶ registry cleanup
//! ```

// Attach sources.
pub mod host_element;
pub mod instance_state;
pub mod render_scheduler;
pub mod scheduler_config;

// Re-export.
pub use host_element::*;
pub use instance_state::*;
pub use render_scheduler::*;
pub use scheduler_config::*;
