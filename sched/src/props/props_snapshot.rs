// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::{collections::HashMap, fmt};

use super::PropValue;
use crate::{pipeline::RenderError, recovery::RecoveryHandler};

/// The accumulated result of one middleware pipeline run.
///
/// A snapshot is seeded from the instance's previous snapshot, overridden by
/// caller-supplied overrides, then threaded left-to-right through the
/// middleware list. Each step receives the current snapshot and returns the
/// next one.
///
/// Two structural fields ride alongside the named values:
///
/// - [`Self::recovery_handler`] — a step that wants a chance to recover from a
///   later failure attaches a handler to its returned snapshot. The pipeline
///   executor registers the *entire* snapshot (handler included) as the
///   instance's recovery registration.
/// - [`Self::error`] — populated only by the recovery path, so the next pass
///   (and the recovery handler itself) sees the failure in its seed props.
///
/// Keys are unique; insertion order is irrelevant. Snapshots are cheap to
/// clone: values are scalars or [`std::sync::Arc`]-shared payloads.
#[derive(Clone, Default)]
pub struct PropsSnapshot {
    values: HashMap<String, PropValue>,
    recovery_handler: Option<RecoveryHandler>,
    error: Option<RenderError>,
}

impl PropsSnapshot {
    #[must_use]
    pub fn new() -> Self { Self::default() }

    /// Builder-style insert, handy for seeding override props.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<PropValue>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<PropValue>) {
        self.values.insert(key.into(), value.into());
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&PropValue> { self.values.get(key) }

    #[must_use]
    pub fn contains(&self, key: &str) -> bool { self.values.contains_key(key) }

    #[must_use]
    pub fn len(&self) -> usize { self.values.len() }

    #[must_use]
    pub fn is_empty(&self) -> bool { self.values.is_empty() }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    /// Merge `overrides` on top of `self`.
    ///
    /// - Named values: the override wins on key collision.
    /// - Recovery handler and error: latest-wins — the override's field is
    ///   taken when present, otherwise the existing one is kept.
    #[must_use]
    pub fn merged(mut self, overrides: PropsSnapshot) -> Self {
        self.values.extend(overrides.values);
        self.recovery_handler = overrides.recovery_handler.or(self.recovery_handler);
        self.error = overrides.error.or(self.error);
        self
    }

    #[must_use]
    pub fn recovery_handler(&self) -> Option<&RecoveryHandler> {
        self.recovery_handler.as_ref()
    }

    pub fn set_recovery_handler(&mut self, handler: RecoveryHandler) {
        self.recovery_handler = Some(handler);
    }

    #[must_use]
    pub fn with_recovery_handler(mut self, handler: RecoveryHandler) -> Self {
        self.set_recovery_handler(handler);
        self
    }

    #[must_use]
    pub fn error(&self) -> Option<&RenderError> { self.error.as_ref() }

    #[must_use]
    pub fn with_error(mut self, error: RenderError) -> Self {
        self.error = Some(error);
        self
    }
}

impl fmt::Debug for PropsSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PropsSnapshot")
            .field("values", &self.values)
            .field("has_recovery_handler", &self.recovery_handler.is_some())
            .field("error", &self.error)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_override_values_win_on_merge() {
        let base = PropsSnapshot::new().with("count", 1_i64).with("label", "a");
        let overrides = PropsSnapshot::new().with("count", 2_i64);

        let merged = base.merged(overrides);
        assert_eq!(merged.get("count"), Some(&PropValue::Int(2)));
        assert_eq!(merged.get("label"), Some(&PropValue::Text("a".into())));
        assert_eq!(merged.len(), 2);
    }

    #[test]
    fn test_merge_keeps_existing_handler_when_override_has_none() {
        let handler: RecoveryHandler = Arc::new(|_args| {});
        let base = PropsSnapshot::new().with_recovery_handler(handler);
        let merged = base.merged(PropsSnapshot::new());
        assert!(merged.recovery_handler().is_some());
    }

    #[test]
    fn test_merge_takes_override_handler_when_present() {
        let old: RecoveryHandler = Arc::new(|_args| {});
        let new: RecoveryHandler = Arc::new(|_args| {});
        let base = PropsSnapshot::new().with_recovery_handler(old);
        let merged = base.merged(PropsSnapshot::new().with_recovery_handler(Arc::clone(&new)));
        let kept = merged.recovery_handler().unwrap();
        assert!(Arc::ptr_eq(kept, &new));
    }

    #[test]
    fn test_error_rides_through_merge() {
        let failed = PropsSnapshot::new().with_error(RenderError::Aborted);
        let merged = failed.merged(PropsSnapshot::new().with("x", 1_i64));
        assert!(matches!(merged.error(), Some(RenderError::Aborted)));
    }
}
