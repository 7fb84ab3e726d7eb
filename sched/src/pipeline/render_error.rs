// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::{error::Error, sync::Arc};

/// Result type for middleware steps and the pipeline executor.
pub type RenderResult<T> = Result<T, RenderError>;

/// Errors a render pass can fail with.
///
/// The two variants are treated very differently by the scheduler's failure
/// protocol:
///
/// | Variant        | Meaning                              | Scheduler reaction                                    |
/// | :------------- | :----------------------------------- | :---------------------------------------------------- |
/// | [`Aborted`]    | Voluntary cancellation of this pass  | Silent: no state transition, no notification, no log  |
/// | [`Middleware`] | A step raised a real failure         | Lifecycle goes to `Error`, recovery controller runs   |
///
/// [`Aborted`]: Self::Aborted
/// [`Middleware`]: Self::Middleware
///
/// The error is `Clone` (the middleware failure source is held in an [`Arc`])
/// because a single failure fans out to several places: the recovery handler's
/// props, the persisted "previous props", and the diagnostic log.
#[derive(Debug, Clone, thiserror::Error, miette::Diagnostic)]
pub enum RenderError {
    /// The cancellation signal. Raised only via [`crate::StepCtx::abort`];
    /// recognized by kind, never by message text.
    #[error("render pass aborted by a middleware step")]
    #[diagnostic(
        code(r3bl_sched::pass_aborted),
        help(
            "Cancellation is a deliberate, silent short-circuit. \
             If you are seeing this error outside the owning render pass, \
             a middleware step is leaking it instead of returning it."
        )
    )]
    Aborted,

    /// A middleware step failed with a real error.
    #[error("middleware step {step} failed")]
    #[diagnostic(
        code(r3bl_sched::middleware_failed),
        help(
            "The failing step's position in the pipeline is zero-based. \
             Register a recovery handler (from any earlier render pass) to \
             get a chance to render fallback output."
        )
    )]
    Middleware {
        /// Zero-based position of the failing step in the middleware list.
        step: usize,
        #[source]
        source: Arc<dyn Error + Send + Sync>,
    },
}

impl RenderError {
    /// Build a step-tagged middleware failure from any error-ish source
    /// (including plain `&str` / `String` messages).
    #[must_use]
    pub fn step_failure(
        step: usize,
        source: impl Into<Box<dyn Error + Send + Sync>>,
    ) -> Self {
        RenderError::Middleware {
            step,
            source: Arc::from(source.into()),
        }
    }

    /// Is this the cancellation signal?
    #[must_use]
    pub fn is_cancellation(&self) -> bool { matches!(self, RenderError::Aborted) }
}
