// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

/// Two-state machine gating whether new render passes may produce visible
/// output.
///
/// Transitions:
/// - `Normal -> Error`: the scheduler observed a pipeline failure that is not
///   the cancellation signal.
/// - `Error -> Normal`: only from inside a successfully invoked recovery
///   handler, via the reset-capable render callback it receives.
///
/// There is no "rendering"/"idle" distinction here — concurrency is tracked
/// by the [`crate::TaskRegistry`], not by lifecycle state. While in `Error`,
/// `render` calls are inert until a recovery resets the state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, strum_macros::Display)]
pub enum LifecycleState {
    #[default]
    Normal,
    Error,
}

impl LifecycleState {
    #[must_use]
    pub fn is_error(&self) -> bool { matches!(self, LifecycleState::Error) }
}
