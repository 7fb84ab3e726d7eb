// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::{collections::HashMap, fmt};

use tokio::sync::watch;

/// Stable handle for one render pass. Monotonically allocated per registry;
/// never reused for the registry's lifetime.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskId(u64);

impl fmt::Debug for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "task-{}", self.0)
    }
}

/// How a render pass's task ended.
///
/// - [`Completed`]: the pipeline ran to completion while the task was still
///   registered (the pass was eligible to commit).
/// - [`PreEmpted`]: the task was evicted mid-flight, or the pass failed or
///   was cancelled.
///
/// [`Completed`]: Self::Completed
/// [`PreEmpted`]: Self::PreEmpted
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum_macros::Display)]
pub enum TaskOutcome {
    Completed,
    PreEmpted,
}

/// Receiver side of a task's completion channel. Backs the `resolved()`
/// helper handed to middleware; see [`await_resolved`].
pub type ResolvedReceiver = watch::Receiver<Option<TaskOutcome>>;

/// Suspend until the task's outcome is published, yielding `true` only for
/// [`TaskOutcome::Completed`].
pub async fn await_resolved(mut rx: ResolvedReceiver) -> bool {
    loop {
        if let Some(outcome) = *rx.borrow() {
            return outcome == TaskOutcome::Completed;
        }
        if rx.changed().await.is_err() {
            // Sender side went away without publishing an outcome.
            return false;
        }
    }
}

/// Set-like membership tracker for the in-flight render passes of one
/// component instance.
///
/// No ordering is imposed among concurrently registered tasks; each pass
/// commits (or discards) strictly based on its own handle's validity at
/// completion time, not on submission order. The registry is the sole
/// cross-pass coordination primitive: an external actor may [`Self::evict`] a
/// still-pending task to pre-empt its eventual commit.
pub struct TaskRegistry {
    next_id: u64,
    tasks: HashMap<TaskId, watch::Sender<Option<TaskOutcome>>>,
}

impl Default for TaskRegistry {
    fn default() -> Self { Self::new() }
}

impl TaskRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self {
            next_id: 0,
            tasks: HashMap::new(),
        }
    }

    /// Create and register a new task; valid by default. Returns the task's
    /// handle and the receiver backing its `resolved()` helper.
    pub fn enqueue(&mut self) -> (TaskId, ResolvedReceiver) {
        let id = TaskId(self.next_id);
        self.next_id += 1;
        let (tx, rx) = watch::channel(None);
        self.tasks.insert(id, tx);
        (id, rx)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool { self.tasks.is_empty() }

    #[must_use]
    pub fn len(&self) -> usize { self.tasks.len() }

    /// True iff the handle is no longer registered — either
    /// completed-and-removed, or explicitly evicted.
    #[must_use]
    pub fn is_invalid(&self, id: TaskId) -> bool { !self.tasks.contains_key(&id) }

    /// Handles of all still-pending tasks, in no particular order.
    #[must_use]
    pub fn task_ids(&self) -> Vec<TaskId> { self.tasks.keys().copied().collect() }

    /// External pre-emption: remove the task without waiting for pipeline
    /// completion. Idempotent. The pre-empted pass still runs its middleware
    /// to completion, but its final commit step is suppressed.
    pub fn evict(&mut self, id: TaskId) {
        if let Some(tx) = self.tasks.remove(&id) {
            tx.send(Some(TaskOutcome::PreEmpted)).ok();
        }
    }

    /// Internal completion: remove the task (if still registered) and publish
    /// its outcome. Called exactly once per pass, at pipeline completion.
    pub fn complete(&mut self, id: TaskId, outcome: TaskOutcome) {
        if let Some(tx) = self.tasks.remove(&id) {
            tx.send(Some(outcome)).ok();
        }
    }
}

impl fmt::Debug for TaskRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TaskRegistry")
            .field("pending", &self.task_ids())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_enqueue_registers_a_valid_task() {
        let mut registry = TaskRegistry::new();
        assert!(registry.is_empty());

        let (id, _rx) = registry.enqueue();
        assert!(!registry.is_empty());
        assert!(!registry.is_invalid(id));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_evict_invalidates_and_is_idempotent() {
        let mut registry = TaskRegistry::new();
        let (id, _rx) = registry.enqueue();

        registry.evict(id);
        assert!(registry.is_invalid(id));
        assert!(registry.is_empty());

        // Second evict is a no-op.
        registry.evict(id);
        assert!(registry.is_empty());
    }

    #[test]
    fn test_handles_are_never_reused() {
        let mut registry = TaskRegistry::new();
        let (first, _rx1) = registry.enqueue();
        registry.complete(first, TaskOutcome::Completed);
        let (second, _rx2) = registry.enqueue();
        assert_ne!(first, second);
    }

    #[tokio::test]
    async fn test_resolved_yields_true_for_completed() {
        let mut registry = TaskRegistry::new();
        let (id, rx) = registry.enqueue();
        registry.complete(id, TaskOutcome::Completed);
        assert!(await_resolved(rx).await);
    }

    #[tokio::test]
    async fn test_resolved_yields_false_for_pre_empted() {
        let mut registry = TaskRegistry::new();
        let (id, rx) = registry.enqueue();
        registry.evict(id);
        assert!(!await_resolved(rx).await);
    }

    #[tokio::test]
    async fn test_resolved_suspends_until_outcome_published() {
        let mut registry = TaskRegistry::new();
        let (id, rx) = registry.enqueue();

        let waiter = tokio::spawn(await_resolved(rx));
        tokio::task::yield_now().await;
        assert!(!waiter.is_finished());

        registry.complete(id, TaskOutcome::Completed);
        assert!(waiter.await.unwrap());
    }
}
