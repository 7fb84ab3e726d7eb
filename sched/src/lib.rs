// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// cspell:words smallvec strum preempt preempted

//! # r3bl_sched
//!
//! Per-component render scheduler: given a component that must re-render in
//! response to external triggers, guarantee that each render pass
//!
//! 1. runs an ordered middleware pipeline to build a props snapshot,
//! 2. is tracked as a cancellable unit of work,
//! 3. commits visible side effects (visual flags, outbound notifications)
//!    only if the pass is still valid, and
//! 4. recovers gracefully from failures without corrupting the component's
//!    lifecycle state.
//!
//! The scheduler decides *whether and when* a pass's output may be committed.
//! It never decides *what* to render — view construction and diffing live
//! behind the [`ViewRenderer`] seam, and the host element's capabilities
//! (attachment, visual flags, notification transport) behind [`HostElement`].
//!
//! # Architecture
//!
//! ```text
//! RenderScheduler::render(overrides)
//!        │
//!        ├─ LifecycleState == Error? ──▶ no-op (Skipped)
//!        │
//!        ├─ TaskRegistry::enqueue ────▶ TaskId + resolved channel
//!        │
//!        ├─ pipeline: fold seed through Middleware list (StepCtx per step)
//!        │      │
//!        │      ├─ Ok ──▶ task still valid? ──▶ commit: view + flag + notify
//!        │      │                        └────▶ evicted: discard silently
//!        │      ├─ Err(Aborted) ──▶ silent (Cancelled)
//!        │      └─ Err(_) ──▶ LifecycleState = Error ──▶ recovery controller
//!        │
//!        └─ TaskRegistry::complete (always, exactly once)
//! ```
//!
//! | Piece                | Type(s)                                     | Job                                            |
//! | :------------------- | :------------------------------------------ | :--------------------------------------------- |
//! | Task registry        | [`TaskRegistry`], [`TaskId`]                | Track in-flight passes; external pre-emption   |
//! | Lifecycle state      | [`LifecycleState`]                          | Gate rendering after unrecovered failures      |
//! | Pipeline executor    | [`Middleware`], [`StepCtx`]                 | Sequential left-to-right props fold            |
//! | Recovery controller  | [`RecoveryProps`], [`RestartRender`]        | Hand failures to the registered handler        |
//! | Orchestrator         | [`RenderScheduler`], [`RenderOutcome`]      | Compose all of the above, per pass             |
//!
//! # Concurrency model
//!
//! Single-threaded cooperative: passes interleave at `.await` points and
//! never preempt each other mid-step. Any number of `render` calls may be
//! outstanding at once; each owns an independent task handle and seed
//! snapshot, and commits (or discards) based solely on its own handle's
//! validity at completion time. Cancellation is self-initiated only, via
//! [`StepCtx::abort`], and never affects other passes.

#![cfg_attr(not(test), deny(clippy::unwrap_in_result))]

// Attach sources.
pub mod common;
pub mod lifecycle;
pub mod pipeline;
pub mod props;
pub mod recovery;
pub mod scheduler;
pub mod task;
pub mod test_fixtures;

// Re-export to provide a flat public API.
pub use common::*;
pub use lifecycle::*;
pub use pipeline::*;
pub use props::*;
pub use recovery::*;
pub use scheduler::*;
pub use task::*;
