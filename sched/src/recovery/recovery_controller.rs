// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::{fmt, sync::Arc};

use tokio::task::JoinHandle;

use crate::{PropsSnapshot, RenderError, RenderOutcome, RenderScheduler};

/// A middleware-declared callback given a chance to react to an unrecovered
/// failure (typically by rendering fallback output and resetting the
/// lifecycle state via the supplied callback). Invocation is fire-and-forget:
/// the controller does not supervise the handler's own effects.
pub type RecoveryHandler = Arc<dyn Fn(RecoveryProps) + Send + Sync>;

/// Reset-capable render callback handed to a recovery handler. Calling it
/// first transitions the lifecycle state `Error -> Normal`, then delegates to
/// the instance's normal render entry point with the supplied overrides. The
/// spawned pass's handle is returned so the caller may await its outcome.
pub type RestartRender =
    Arc<dyn Fn(Option<PropsSnapshot>) -> JoinHandle<RenderOutcome> + Send + Sync>;

/// Everything a recovery handler gets to work with.
pub struct RecoveryProps {
    /// The registered snapshot merged with the failure — the same value that
    /// was just persisted as "previous props", so the next render pass sees
    /// the error in its seed.
    pub props: PropsSnapshot,
    /// The failure that triggered recovery.
    pub error: RenderError,
    /// See [`RestartRender`].
    pub render: RestartRender,
}

impl fmt::Debug for RecoveryProps {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecoveryProps")
            .field("props", &self.props)
            .field("error", &self.error)
            .finish()
    }
}

/// Dispatch an unrecovered render failure for `scheduler`'s instance.
///
/// Looks up the instance's recovery registration — the *last* snapshot any
/// middleware step returned with a handler attached, which is not necessarily
/// from the currently failing pass.
///
/// - No registration: one best-effort diagnostic log; no state change.
/// - Registration found: persist "previous props" as the registered snapshot
///   merged with the error, then invoke the handler with that snapshot, the
///   error, and a [`RestartRender`] callback. Not guaranteed to recover,
///   merely given the opportunity.
pub(crate) fn handle_failure(scheduler: &RenderScheduler, error: &RenderError) {
    let state = scheduler.state();

    let Some(registered) = state.recovery_registration() else {
        tracing::error!("recovery: render pass failed with no handler registered: {error}");
        return;
    };
    let Some(handler) = registered.recovery_handler().cloned() else {
        // A registration is only ever stored with a handler attached.
        tracing::error!("recovery: registration present but handler missing: {error}");
        return;
    };

    let merged = registered.with_error(error.clone());
    state.persist_previous(merged.clone());

    let restart: RestartRender = {
        let scheduler = scheduler.clone();
        Arc::new(move |overrides| {
            scheduler.state().reset_lifecycle();
            scheduler.spawn_render(overrides)
        })
    };

    tracing::debug!("recovery: invoking registered handler");
    handler(RecoveryProps {
        props: merged,
        error: error.clone(),
        render: restart,
    });
}
