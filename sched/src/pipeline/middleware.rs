// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::{error::Error, fmt, sync::Arc};

use futures_util::future::BoxFuture;
use smallvec::SmallVec;
use tokio::task::JoinHandle;

use super::{RenderError, RenderResult};
use crate::{
    PropValue, PropsSnapshot, RenderOutcome, RenderScheduler, TaskId,
    task::{ResolvedReceiver, await_resolved},
};

/// One ordered transformation step over the props snapshot.
///
/// Steps are composed into a pipeline and run strictly sequentially: the
/// executor always awaits a step's output before starting the next one. A
/// step may complete synchronously (return an already-ready future) or
/// suspend; either way it consumes the accumulated snapshot and produces the
/// next one, or fails with a [`RenderError`].
///
/// Most call sites don't implement this trait by hand — see
/// [`middleware_fn`].
pub trait Middleware: Send + Sync {
    fn run<'a>(
        &'a self,
        ctx: &'a StepCtx,
        props: PropsSnapshot,
    ) -> BoxFuture<'a, RenderResult<PropsSnapshot>>;
}

/// Ordered middleware list for one component definition. Component pipelines
/// are short, so the list is inline up to 4 steps.
pub type MiddlewareList = SmallVec<[Arc<dyn Middleware>; 4]>;

/// Lift a plain closure into a boxed [`Middleware`].
///
/// # Example
///
/// ```
/// use r3bl_sched::middleware_fn;
///
/// let step = middleware_fn(|_ctx, props| Box::pin(async move { Ok(props) }));
/// ```
pub fn middleware_fn<F>(f: F) -> Arc<dyn Middleware>
where
    F: for<'a> Fn(&'a StepCtx, PropsSnapshot) -> BoxFuture<'a, RenderResult<PropsSnapshot>>
        + Send
        + Sync
        + 'static,
{
    struct FnMiddleware<F>(F);

    impl<F> Middleware for FnMiddleware<F>
    where
        F: for<'a> Fn(
                &'a StepCtx,
                PropsSnapshot,
            ) -> BoxFuture<'a, RenderResult<PropsSnapshot>>
            + Send
            + Sync,
    {
        fn run<'a>(
            &'a self,
            ctx: &'a StepCtx,
            props: PropsSnapshot,
        ) -> BoxFuture<'a, RenderResult<PropsSnapshot>> {
            (self.0)(ctx, props)
        }
    }

    Arc::new(FnMiddleware(f))
}

/// Per-step view of the running render pass, handed to every [`Middleware`]
/// step alongside the accumulated snapshot.
///
/// This carries the instance-bound helpers the snapshot itself would carry in
/// a dynamically-typed host environment:
///
/// | Helper               | Purpose                                                       |
/// | :------------------- | :------------------------------------------------------------ |
/// | [`Self::render`]     | Bound re-entry: start another pass on the same instance       |
/// | [`Self::notify`]     | Bound outbound dispatch through the host element              |
/// | [`Self::previous`]   | The instance's last committed snapshot, if any                |
/// | [`Self::resolved`]   | Did *this* task complete, or was it pre-empted?               |
/// | [`Self::abort`]      | The cancellation signal for this pass                         |
/// | [`Self::fail`]       | A step-tagged middleware failure                              |
///
/// The ctx also exposes the step's own position and a self-reference to the
/// currently running step, so a step can introspect or re-run itself against
/// its own output.
pub struct StepCtx {
    scheduler: RenderScheduler,
    task_id: TaskId,
    step_index: usize,
    current_step: Arc<dyn Middleware>,
    previous: Option<PropsSnapshot>,
    resolved_rx: ResolvedReceiver,
}

impl StepCtx {
    #[must_use]
    pub(crate) fn new(
        scheduler: RenderScheduler,
        task_id: TaskId,
        step_index: usize,
        current_step: Arc<dyn Middleware>,
        previous: Option<PropsSnapshot>,
        resolved_rx: ResolvedReceiver,
    ) -> Self {
        Self {
            scheduler,
            task_id,
            step_index,
            current_step,
            previous,
            resolved_rx,
        }
    }

    #[must_use]
    pub fn task_id(&self) -> TaskId { self.task_id }

    /// Zero-based position of the currently running step in the pipeline.
    #[must_use]
    pub fn step_index(&self) -> usize { self.step_index }

    /// Self-reference to the currently running step.
    #[must_use]
    pub fn current_step(&self) -> &Arc<dyn Middleware> { &self.current_step }

    /// The instance's last committed snapshot at the moment this pass started.
    #[must_use]
    pub fn previous(&self) -> Option<&PropsSnapshot> { self.previous.as_ref() }

    /// Bound re-entry into the owning scheduler: starts a new, independent
    /// render pass and returns its pending completion. The new pass never
    /// affects the pass this step belongs to.
    pub fn render(&self, overrides: Option<PropsSnapshot>) -> JoinHandle<RenderOutcome> {
        self.scheduler.spawn_render(overrides)
    }

    /// Bound outbound dispatch through the host element. Returns whatever the
    /// host's transport reports.
    pub fn notify(&self, name: &str, payload: PropValue) -> bool {
        self.scheduler.host().notify(name, payload)
    }

    /// Suspends until this pass's task either completes or is pre-empted,
    /// yielding `true` only if it actually completed.
    ///
    /// Intended to be handed out of the pipeline (e.g. stored in a snapshot
    /// payload for an outside observer). Awaiting it *inside* a step of the
    /// same pass suspends that pass on its own completion and never makes
    /// progress.
    pub async fn resolved(&self) -> bool { await_resolved(self.resolved_rx.clone()).await }

    /// The cancellation signal: a middleware step's voluntary way to stop
    /// this pass. Return it as the step's error:
    ///
    /// ```ignore
    /// return Err(ctx.abort());
    /// ```
    #[must_use]
    pub fn abort(&self) -> RenderError { RenderError::Aborted }

    /// A real failure raised by this step, tagged with the step's position.
    #[must_use]
    pub fn fail(&self, source: impl Into<Box<dyn Error + Send + Sync>>) -> RenderError {
        RenderError::step_failure(self.step_index, source)
    }
}

impl fmt::Debug for StepCtx {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StepCtx")
            .field("task_id", &self.task_id)
            .field("step_index", &self.step_index)
            .field("has_previous", &self.previous.is_some())
            .finish()
    }
}
