// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::{
    LifecycleState, PropsSnapshot, TaskRegistry,
    task::{ResolvedReceiver, TaskId, TaskOutcome},
};

/// The mutable, instance-scoped resources shared by the orchestrator,
/// pipeline executor, and recovery controller. Exactly one of these exists
/// per component instance, created with the instance and retained until
/// teardown.
///
/// The side tables a garbage-collected host environment would key off the
/// component object (previous props, recovery registration) are owned fields
/// here: the instance record *is* the arena slot, and teardown of the
/// instance drops them.
///
/// Scheduling is single-threaded cooperative: passes interleave only at
/// `.await` points. Locks are therefore held for short synchronous sections,
/// never across a suspension point, which preserves "never preempt mid-step"
/// semantics.
#[derive(Debug, Default)]
pub struct InstanceState {
    lifecycle: Mutex<LifecycleState>,
    registry: Mutex<TaskRegistry>,
    previous_props: Mutex<Option<PropsSnapshot>>,
    recovery_registration: Mutex<Option<PropsSnapshot>>,
}

/// Poisoning can only come from a panic inside one of these short critical
/// sections; the data is still coherent, so recover the guard instead of
/// propagating the panic.
fn relock<'a, T>(
    result: Result<MutexGuard<'a, T>, PoisonError<MutexGuard<'a, T>>>,
) -> MutexGuard<'a, T> {
    result.unwrap_or_else(PoisonError::into_inner)
}

impl InstanceState {
    #[must_use]
    pub fn new() -> Self { Self::default() }

    // ╔═══════════════════╗
    // ║ Lifecycle state   ║
    // ╚═══════════════════╝

    #[must_use]
    pub fn lifecycle(&self) -> LifecycleState { *relock(self.lifecycle.lock()) }

    #[must_use]
    pub fn is_error(&self) -> bool { self.lifecycle().is_error() }

    pub fn mark_error(&self) {
        *relock(self.lifecycle.lock()) = LifecycleState::Error;
    }

    /// `Error -> Normal`. Only the recovery handler's reset-capable render
    /// callback has business calling this.
    pub fn reset_lifecycle(&self) {
        *relock(self.lifecycle.lock()) = LifecycleState::Normal;
    }

    // ╔═══════════════════╗
    // ║ Task registry     ║
    // ╚═══════════════════╝

    pub fn enqueue_task(&self) -> (TaskId, ResolvedReceiver) {
        relock(self.registry.lock()).enqueue()
    }

    #[must_use]
    pub fn task_is_invalid(&self, id: TaskId) -> bool {
        relock(self.registry.lock()).is_invalid(id)
    }

    #[must_use]
    pub fn is_idle(&self) -> bool { relock(self.registry.lock()).is_empty() }

    #[must_use]
    pub fn pending_task_ids(&self) -> Vec<TaskId> {
        relock(self.registry.lock()).task_ids()
    }

    pub fn evict_task(&self, id: TaskId) { relock(self.registry.lock()).evict(id); }

    pub fn complete_task(&self, id: TaskId, outcome: TaskOutcome) {
        relock(self.registry.lock()).complete(id, outcome);
    }

    // ╔═══════════════════╗
    // ║ Previous props    ║
    // ╚═══════════════════╝

    /// The last persisted snapshot, or `None` before the first successful
    /// pass. Each pass reads this once, at start time; concurrent passes may
    /// race on the read, but each write is atomic.
    #[must_use]
    pub fn previous_props(&self) -> Option<PropsSnapshot> {
        relock(self.previous_props.lock()).clone()
    }

    pub fn persist_previous(&self, snapshot: PropsSnapshot) {
        *relock(self.previous_props.lock()) = Some(snapshot);
    }

    // ╔═══════════════════════╗
    // ║ Recovery registration ║
    // ╚═══════════════════════╝

    /// The most recent snapshot that declared a recovery handler, if any.
    /// Not cleared between renders: latest wins and persists across failures
    /// until overwritten.
    #[must_use]
    pub fn recovery_registration(&self) -> Option<PropsSnapshot> {
        relock(self.recovery_registration.lock()).clone()
    }

    pub fn register_recovery(&self, snapshot: PropsSnapshot) {
        *relock(self.recovery_registration.lock()) = Some(snapshot);
    }
}
