// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

/// Names the scheduler uses for its visible commit side effects.
///
/// Both default to `"resolved"`: a committed pass adds the visual flag and
/// emits the notification under the same name, mirroring the way a class
/// flag and a DOM-style event would be paired on a host element.
#[derive(Clone, Debug)]
pub struct SchedulerConfig {
    /// Visual flag added on commit, removed unconditionally on disconnect.
    pub resolved_flag_name: String,
    /// Outbound notification emitted when a pass completes (success *or*
    /// unrecovered failure — the notification reports pass completion, not
    /// pass success).
    pub resolved_notification_name: String,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            resolved_flag_name: "resolved".into(),
            resolved_notification_name: "resolved".into(),
        }
    }
}
