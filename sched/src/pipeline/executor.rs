// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::sync::Arc;

use super::{Middleware, RenderResult, StepCtx};
use crate::{PropsSnapshot, TaskId, task::ResolvedReceiver};

/// Fold `seed` left-to-right through `middleware`, strictly sequentially.
///
/// Two side effects happen on the owning instance as the fold progresses:
///
/// 1. After *each* step, if the step's output snapshot carries a recovery
///    handler, the entire snapshot (handler included) overwrites the
///    instance's recovery registration. The registration is never cleared
///    between renders — latest wins, and it persists across failures until
///    overwritten.
/// 2. After the *final* step, the resulting snapshot is persisted as the
///    instance's "previous props" — the seed for the next pass. This happens
///    on success only: a step failing aborts the fold immediately and leaves
///    the previous snapshot untouched. (The recovery controller is the one
///    exception: it explicitly persists the registered snapshot merged with
///    the error.)
pub(crate) async fn run_pipeline(
    scheduler: &crate::RenderScheduler,
    task_id: TaskId,
    resolved_rx: ResolvedReceiver,
    previous: Option<PropsSnapshot>,
    seed: PropsSnapshot,
    middleware: &[Arc<dyn Middleware>],
) -> RenderResult<PropsSnapshot> {
    let state = scheduler.state();
    let mut acc = seed;

    for (step_index, step) in middleware.iter().enumerate() {
        let ctx = StepCtx::new(
            scheduler.clone(),
            task_id,
            step_index,
            Arc::clone(step),
            previous.clone(),
            resolved_rx.clone(),
        );
        acc = step.run(&ctx, acc).await?;

        if acc.recovery_handler().is_some() {
            tracing::debug!(
                "pipeline: step {step_index} of task {task_id:?} declared a recovery handler"
            );
            state.register_recovery(acc.clone());
        }
    }

    state.persist_previous(acc.clone());
    Ok(acc)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use pretty_assertions::assert_eq;

    use crate::{
        PropValue, PropsSnapshot, RenderScheduler, SchedulerConfig, middleware_fn,
        test_fixtures::{MockHostElement, RecordingViewRenderer},
    };

    fn make_scheduler(
        middleware: Vec<Arc<dyn crate::Middleware>>,
    ) -> (RenderScheduler, Arc<MockHostElement>) {
        let host = Arc::new(MockHostElement::new());
        let view = Arc::new(RecordingViewRenderer::new());
        let scheduler = RenderScheduler::new(
            host.clone(),
            view,
            middleware,
            SchedulerConfig::default(),
        );
        (scheduler, host)
    }

    #[tokio::test]
    async fn test_steps_fold_left_to_right() {
        let appender = |tag: &'static str| {
            middleware_fn(move |_ctx, props| {
                let mut trail = props
                    .get("trail")
                    .and_then(|it| it.as_text().map(String::from))
                    .unwrap_or_default();
                trail.push_str(tag);
                Box::pin(async move { Ok(props.with("trail", trail)) })
            })
        };

        let (scheduler, _host) =
            make_scheduler(vec![appender("a"), appender("b"), appender("c")]);
        scheduler.render(None).await;

        let previous = scheduler.state().previous_props().unwrap();
        assert_eq!(previous.get("trail"), Some(&PropValue::Text("abc".into())));
    }

    #[tokio::test]
    async fn test_failed_pass_leaves_previous_props_untouched() {
        let ok_step = middleware_fn(|_ctx, props| {
            Box::pin(async move { Ok(props.with("seen", true)) })
        });
        let (scheduler, _host) = make_scheduler(vec![ok_step]);
        scheduler.render(None).await;
        assert!(scheduler.state().previous_props().unwrap().contains("seen"));

        // Swap in a failing pipeline on a second instance sharing no state:
        // same assertion shape, different pass.
        let failing = middleware_fn(|ctx, _props| {
            let error = ctx.fail("boom");
            Box::pin(async move { Err(error) })
        });
        let (scheduler, _host) = make_scheduler(vec![
            middleware_fn(|_ctx, props| {
                Box::pin(async move { Ok(props.with("partial", true)) })
            }),
            failing,
        ]);
        scheduler.render(None).await;
        assert!(scheduler.state().previous_props().is_none());
    }

    #[tokio::test]
    async fn test_recovery_registration_captures_latest_snapshot() {
        let register = middleware_fn(|_ctx, props| {
            let props = props
                .with("generation", 1_i64)
                .with_recovery_handler(Arc::new(|_args| {}));
            Box::pin(async move { Ok(props) })
        });
        let enrich = middleware_fn(|_ctx, props| {
            Box::pin(async move { Ok(props.with("generation", 2_i64)) })
        });

        let (scheduler, _host) = make_scheduler(vec![register, enrich]);
        scheduler.render(None).await;

        // The registration reflects the snapshot as of the *declaring* step's
        // output, then gets re-captured (handler rides through the merge) as
        // later steps re-declare it by returning it unchanged.
        let registered = scheduler.state().recovery_registration().unwrap();
        assert_eq!(registered.get("generation"), Some(&PropValue::Int(2)));
    }
}
