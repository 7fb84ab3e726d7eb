// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::sync::Arc;

use tokio::sync::Notify;

use crate::{Middleware, PropValue, RecoveryHandler, middleware_fn};

/// A step that returns its input unchanged.
#[must_use]
pub fn pass_through() -> Arc<dyn Middleware> {
    middleware_fn(|_ctx, props| Box::pin(async move { Ok(props) }))
}

/// A step that inserts one key-value pair into the snapshot.
#[must_use]
pub fn insert_value(
    key: impl Into<String>,
    value: impl Into<PropValue>,
) -> Arc<dyn Middleware> {
    let key = key.into();
    let value = value.into();
    middleware_fn(move |_ctx, props| {
        let props = props.with(key.clone(), value.clone());
        Box::pin(async move { Ok(props) })
    })
}

/// A step that raises the cancellation signal.
#[must_use]
pub fn abort_step() -> Arc<dyn Middleware> {
    middleware_fn(|ctx, _props| {
        let signal = ctx.abort();
        Box::pin(async move { Err(signal) })
    })
}

/// A step that fails with a plain (non-cancellation) error.
#[must_use]
pub fn failing_step(message: &'static str) -> Arc<dyn Middleware> {
    middleware_fn(move |ctx, _props| {
        let error = ctx.fail(message);
        Box::pin(async move { Err(error) })
    })
}

/// A step that suspends until `gate` is notified, then passes its input
/// through. Lets a test hold a pass open mid-pipeline (e.g. to evict its
/// task) before releasing it with [`Notify::notify_one`].
#[must_use]
pub fn gated_step(gate: Arc<Notify>) -> Arc<dyn Middleware> {
    middleware_fn(move |_ctx, props| {
        let gate = gate.clone();
        Box::pin(async move {
            gate.notified().await;
            Ok(props)
        })
    })
}

/// A step that attaches `handler` to its returned snapshot, causing the
/// executor to register the snapshot for error recovery.
#[must_use]
pub fn declare_recovery(handler: RecoveryHandler) -> Arc<dyn Middleware> {
    middleware_fn(move |_ctx, props| {
        let props = props.with_recovery_handler(handler.clone());
        Box::pin(async move { Ok(props) })
    })
}
