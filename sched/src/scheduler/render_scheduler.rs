// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::{fmt, sync::Arc};

use tokio::task::JoinHandle;

use super::{HostElement, InstanceState, SchedulerConfig, ViewRenderer};
use crate::{
    Middleware, MiddlewareList, PropValue, PropsSnapshot,
    pipeline::run_pipeline,
    recovery::handle_failure,
    task::{TaskId, TaskOutcome},
};

/// How one render pass ended. Returned by [`RenderScheduler::render`] for
/// observability; callers that only care about "done" can ignore it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum_macros::Display)]
pub enum RenderOutcome {
    /// The pipeline completed and the snapshot was persisted. Visible side
    /// effects were committed if the host was attached, skipped if detached.
    Committed,
    /// The instance was in `Error` state; nothing ran.
    Skipped,
    /// The task was evicted while the pipeline ran; the result was discarded
    /// silently.
    Discarded,
    /// A middleware step raised the cancellation signal; silent short-circuit.
    Cancelled,
    /// A middleware step raised a real error; the failure protocol ran.
    Failed,
}

/// The per-component render scheduler.
///
/// One scheduler exists per component instance; it exclusively owns that
/// instance's [`InstanceState`] (task registry, lifecycle state, previous
/// props, recovery registration) and composes the middleware pipeline,
/// commit step, and error recovery per pass.
///
/// The handle is cheap to clone — clones share the same instance. This is
/// what makes bound re-entry (`StepCtx::render`, the recovery handler's
/// reset-capable callback) possible without self-referential borrows.
///
/// # Failure semantics
///
/// - Cancellation ([`crate::RenderError::Aborted`]) is recoverable-by-design
///   and invisible: no state transition, no notification, no log.
/// - Any other pipeline error moves the instance into `Error` state and is
///   handed to the recovery controller; a `resolved` notification still fires
///   (it reports pass completion, not pass success).
/// - While in `Error` state, further [`Self::render`] calls are inert until a
///   recovery handler's callback resets the state. There is no automatic
///   self-healing.
#[derive(Clone)]
pub struct RenderScheduler {
    inner: Arc<SchedulerInner>,
}

struct SchedulerInner {
    host: Arc<dyn HostElement>,
    view: Arc<dyn ViewRenderer>,
    middleware: MiddlewareList,
    config: SchedulerConfig,
    state: InstanceState,
}

impl RenderScheduler {
    #[must_use]
    pub fn new(
        host: Arc<dyn HostElement>,
        view: Arc<dyn ViewRenderer>,
        middleware: impl IntoIterator<Item = Arc<dyn Middleware>>,
        config: SchedulerConfig,
    ) -> Self {
        Self {
            inner: Arc::new(SchedulerInner {
                host,
                view,
                middleware: middleware.into_iter().collect(),
                config,
                state: InstanceState::new(),
            }),
        }
    }

    // ╔═══════════════════╗
    // ║ Queries           ║
    // ╚═══════════════════╝

    /// Is the instance currently in `Error` state?
    #[must_use]
    pub fn is_error(&self) -> bool { self.inner.state.is_error() }

    /// Is the task registry empty? Useful for teardown synchronization and
    /// tests.
    #[must_use]
    pub fn is_idle(&self) -> bool { self.inner.state.is_idle() }

    /// Handles of all still-pending render passes.
    #[must_use]
    pub fn pending_task_ids(&self) -> Vec<TaskId> { self.inner.state.pending_task_ids() }

    pub(crate) fn state(&self) -> &InstanceState { &self.inner.state }

    pub(crate) fn host(&self) -> &Arc<dyn HostElement> { &self.inner.host }

    // ╔═══════════════════╗
    // ║ Pre-emption       ║
    // ╚═══════════════════╝

    /// Pre-empt a still-pending pass: its middleware runs to completion, but
    /// its commit is suppressed. Idempotent. Superseding an older pass with a
    /// newer one is a caller policy, not automatic.
    pub fn evict_task(&self, id: TaskId) {
        tracing::debug!("scheduler: evicting {id:?}");
        self.inner.state.evict_task(id);
    }

    /// Pre-empt every still-pending pass (e.g. at teardown).
    pub fn evict_all_tasks(&self) {
        for id in self.inner.state.pending_task_ids() {
            self.inner.state.evict_task(id);
        }
    }

    // ╔═══════════════════╗
    // ║ Lifecycle hooks   ║
    // ╚═══════════════════╝

    /// The instance became attached; triggers exactly one render pass.
    pub async fn on_connect(&self) -> RenderOutcome {
        tracing::debug!("scheduler: connect");
        self.render(None).await
    }

    /// The instance is detaching. Triggers exactly one render pass (so
    /// teardown-time middleware gets to run), then unconditionally clears the
    /// resolved visual flag, regardless of the pass's outcome.
    pub async fn on_disconnect(&self) -> RenderOutcome {
        tracing::debug!("scheduler: disconnect");
        let outcome = self.render(None).await;
        self.inner
            .host
            .remove_visual_flag(&self.inner.config.resolved_flag_name);
        outcome
    }

    // ╔═══════════════════╗
    // ║ Render entry point║
    // ╚═══════════════════╝

    /// Fire-and-forget variant of [`Self::render`] for re-entrant call sites
    /// (middleware, recovery handlers). Returns the spawned pass's handle so
    /// interested callers can still await its outcome.
    pub fn spawn_render(&self, overrides: Option<PropsSnapshot>) -> JoinHandle<RenderOutcome> {
        let this = self.clone();
        tokio::spawn(async move { this.render(overrides).await })
    }

    /// The central entry point. Callable any number of times, concurrently,
    /// while prior calls are still pending; each call owns an independent
    /// task handle and an independent seed snapshot read at start time.
    pub async fn render(&self, overrides: Option<PropsSnapshot>) -> RenderOutcome {
        let inner = &self.inner;

        // 1. In error state a render attempt is a no-op: no task, no
        //    middleware, no visible effect.
        if inner.state.is_error() {
            tracing::debug!("scheduler: render skipped, instance is in error state");
            return RenderOutcome::Skipped;
        }

        // 2. Register this pass as a cancellable unit of work.
        let (task_id, resolved_rx) = inner.state.enqueue_task();

        // 3. Seed snapshot: previous fields, overridden by caller overrides.
        //    The instance-bound helpers ride in the StepCtx each step gets.
        let previous = inner.state.previous_props();
        let seed = match (previous.clone(), overrides) {
            (Some(prev), Some(over)) => prev.merged(over),
            (Some(prev), None) => prev,
            (None, Some(over)) => over,
            (None, None) => PropsSnapshot::new(),
        };

        // 4. Run the middleware fold.
        let result = run_pipeline(
            self,
            task_id,
            resolved_rx,
            previous,
            seed,
            &inner.middleware,
        )
        .await;

        // 5.-7. Commit, recover, or stay silent; always deregister the task.
        match result {
            Ok(snapshot) => self.commit(task_id, &snapshot).await,
            Err(error) if error.is_cancellation() => {
                inner.state.complete_task(task_id, TaskOutcome::PreEmpted);
                RenderOutcome::Cancelled
            }
            Err(error) => {
                tracing::debug!("scheduler: {task_id:?} failed: {error}");
                inner.state.mark_error();
                handle_failure(self, &error);
                inner.host.notify(
                    &inner.config.resolved_notification_name,
                    PropValue::Bool(false),
                );
                inner.state.complete_task(task_id, TaskOutcome::PreEmpted);
                RenderOutcome::Failed
            }
        }
    }

    /// Success path of one pass. The snapshot was already persisted by the
    /// pipeline executor; what's left is deciding whether the visible side
    /// effects may land.
    async fn commit(&self, task_id: TaskId, snapshot: &PropsSnapshot) -> RenderOutcome {
        let inner = &self.inner;

        // Evicted while the pipeline ran: discard silently.
        if inner.state.task_is_invalid(task_id) {
            tracing::debug!("scheduler: {task_id:?} was evicted mid-flight, discarding");
            return RenderOutcome::Discarded;
        }

        if inner.host.is_attached() {
            inner.view.render(snapshot).await;
            inner.host.add_visual_flag(&inner.config.resolved_flag_name);
            inner.host.notify(
                &inner.config.resolved_notification_name,
                PropValue::Bool(true),
            );
        }

        inner.state.complete_task(task_id, TaskOutcome::Completed);
        RenderOutcome::Committed
    }
}

impl fmt::Debug for RenderScheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RenderScheduler")
            .field("config", &self.inner.config)
            .field("middleware_len", &self.inner.middleware.len())
            .field("state", &self.inner.state)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{
        middleware_fn,
        test_fixtures::{HostEvent, MockHostElement, RecordingViewRenderer},
    };

    fn fixture(
        middleware: Vec<Arc<dyn Middleware>>,
    ) -> (RenderScheduler, Arc<MockHostElement>, Arc<RecordingViewRenderer>) {
        let host = Arc::new(MockHostElement::new());
        let view = Arc::new(RecordingViewRenderer::new());
        let scheduler = RenderScheduler::new(
            host.clone(),
            view.clone(),
            middleware,
            SchedulerConfig::default(),
        );
        (scheduler, host, view)
    }

    #[tokio::test]
    async fn test_committed_pass_renders_flags_and_notifies_once() {
        let (scheduler, host, view) = fixture(vec![middleware_fn(|_ctx, props| {
            Box::pin(async move { Ok(props.with("ready", true)) })
        })]);

        let outcome = scheduler.render(None).await;
        assert_eq!(outcome, RenderOutcome::Committed);
        assert_eq!(view.render_count(), 1);
        assert_eq!(host.flag_add_count("resolved"), 1);
        assert_eq!(host.notification_count("resolved"), 1);
        assert!(scheduler.is_idle());
    }

    #[tokio::test]
    async fn test_detached_pass_persists_but_commits_nothing_visible() {
        let (scheduler, host, view) = fixture(vec![middleware_fn(|_ctx, props| {
            Box::pin(async move { Ok(props.with("ready", true)) })
        })]);
        host.detach();

        let outcome = scheduler.render(None).await;
        assert_eq!(outcome, RenderOutcome::Committed);
        assert_eq!(view.render_count(), 0);
        assert_eq!(host.events().len(), 0);
        // The asymmetry is intentional: persistence happens regardless of
        // attachment, visible commits do not.
        assert!(scheduler.state().previous_props().unwrap().contains("ready"));
    }

    #[tokio::test]
    async fn test_cancelled_pass_is_silent_and_leaves_state_normal() {
        let (scheduler, host, view) = fixture(vec![middleware_fn(|ctx, _props| {
            let signal = ctx.abort();
            Box::pin(async move { Err(signal) })
        })]);

        let outcome = scheduler.render(None).await;
        assert_eq!(outcome, RenderOutcome::Cancelled);
        assert!(!scheduler.is_error());
        assert_eq!(view.render_count(), 0);
        assert_eq!(host.events().len(), 0);
        assert!(scheduler.is_idle());
    }

    #[tokio::test]
    async fn test_render_while_in_error_state_is_inert() {
        let (scheduler, host, view) = fixture(vec![middleware_fn(|ctx, _props| {
            let error = ctx.fail("boom");
            Box::pin(async move { Err(error) })
        })]);

        assert_eq!(scheduler.render(None).await, RenderOutcome::Failed);
        assert!(scheduler.is_error());
        let events_after_failure = host.events().len();

        assert_eq!(scheduler.render(None).await, RenderOutcome::Skipped);
        assert_eq!(scheduler.render(None).await, RenderOutcome::Skipped);
        assert!(scheduler.is_idle());
        assert_eq!(view.render_count(), 0);
        assert_eq!(host.events().len(), events_after_failure);
    }

    #[tokio::test]
    async fn test_disconnect_clears_flag_even_after_failure() {
        let (scheduler, host, _view) = fixture(vec![middleware_fn(|ctx, _props| {
            let error = ctx.fail("teardown middleware failed");
            Box::pin(async move { Err(error) })
        })]);

        assert_eq!(scheduler.on_disconnect().await, RenderOutcome::Failed);
        assert!(
            host.events()
                .contains(&HostEvent::FlagRemoved("resolved".into()))
        );
    }

    #[tokio::test]
    async fn test_overrides_win_over_previous_props() {
        let (scheduler, _host, view) = fixture(vec![middleware_fn(|_ctx, props| {
            Box::pin(async move { Ok(props) })
        })]);

        scheduler
            .render(Some(PropsSnapshot::new().with("count", 1_i64)))
            .await;
        scheduler
            .render(Some(PropsSnapshot::new().with("count", 2_i64)))
            .await;

        let last = view.last_props().unwrap();
        assert_eq!(last.get("count").and_then(PropValue::as_int), Some(2));
    }
}
