// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::{any::Any, fmt, sync::Arc};

/// A single value in a [`super::PropsSnapshot`].
///
/// This is a closed enum rather than an open "anything goes" map value. The
/// common scalar shapes are first-class variants; anything else rides in
/// [`PropValue::Shared`] behind an [`Arc`], which keeps snapshots cheap to
/// clone when concurrent render passes each take their own copy.
#[derive(Clone, Default)]
pub enum PropValue {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    List(Vec<PropValue>),
    /// Opaque payload shared across snapshots. Equality is pointer identity.
    Shared(Arc<dyn Any + Send + Sync>),
}

impl PropValue {
    #[must_use]
    pub fn is_null(&self) -> bool { matches!(self, PropValue::Null) }

    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            PropValue::Bool(it) => Some(*it),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_int(&self) -> Option<i64> {
        match self {
            PropValue::Int(it) => Some(*it),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_float(&self) -> Option<f64> {
        match self {
            PropValue::Float(it) => Some(*it),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            PropValue::Text(it) => Some(it.as_str()),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_list(&self) -> Option<&[PropValue]> {
        match self {
            PropValue::List(it) => Some(it.as_slice()),
            _ => None,
        }
    }

    /// Downcast a [`PropValue::Shared`] payload to a concrete type.
    #[must_use]
    pub fn as_shared<T: Any + Send + Sync>(&self) -> Option<Arc<T>> {
        match self {
            PropValue::Shared(it) => Arc::clone(it).downcast::<T>().ok(),
            _ => None,
        }
    }
}

impl PartialEq for PropValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (PropValue::Null, PropValue::Null) => true,
            (PropValue::Bool(lhs), PropValue::Bool(rhs)) => lhs == rhs,
            (PropValue::Int(lhs), PropValue::Int(rhs)) => lhs == rhs,
            (PropValue::Float(lhs), PropValue::Float(rhs)) => lhs == rhs,
            (PropValue::Text(lhs), PropValue::Text(rhs)) => lhs == rhs,
            (PropValue::List(lhs), PropValue::List(rhs)) => lhs == rhs,
            (PropValue::Shared(lhs), PropValue::Shared(rhs)) => Arc::ptr_eq(lhs, rhs),
            _ => false,
        }
    }
}

impl fmt::Debug for PropValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropValue::Null => write!(f, "Null"),
            PropValue::Bool(it) => write!(f, "Bool({it})"),
            PropValue::Int(it) => write!(f, "Int({it})"),
            PropValue::Float(it) => write!(f, "Float({it})"),
            PropValue::Text(it) => write!(f, "Text({it:?})"),
            PropValue::List(it) => f.debug_tuple("List").field(it).finish(),
            PropValue::Shared(_) => write!(f, "Shared(..)"),
        }
    }
}

impl From<bool> for PropValue {
    fn from(it: bool) -> Self { PropValue::Bool(it) }
}

impl From<i64> for PropValue {
    fn from(it: i64) -> Self { PropValue::Int(it) }
}

impl From<f64> for PropValue {
    fn from(it: f64) -> Self { PropValue::Float(it) }
}

impl From<&str> for PropValue {
    fn from(it: &str) -> Self { PropValue::Text(it.to_string()) }
}

impl From<String> for PropValue {
    fn from(it: String) -> Self { PropValue::Text(it) }
}

impl From<Vec<PropValue>> for PropValue {
    fn from(it: Vec<PropValue>) -> Self { PropValue::List(it) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_scalar_equality() {
        assert_eq!(PropValue::from(42_i64), PropValue::Int(42));
        assert_eq!(PropValue::from("on"), PropValue::Text("on".into()));
        assert_ne!(PropValue::Int(1), PropValue::Bool(true));
    }

    #[test]
    fn test_shared_equality_is_pointer_identity() {
        let payload: Arc<dyn Any + Send + Sync> = Arc::new(String::from("view model"));
        let lhs = PropValue::Shared(Arc::clone(&payload));
        let rhs = PropValue::Shared(payload);
        assert_eq!(lhs, rhs);

        let other = PropValue::Shared(Arc::new(String::from("view model")));
        assert_ne!(lhs, other);
    }

    #[test]
    fn test_shared_downcast() {
        let value = PropValue::Shared(Arc::new(1234_u32));
        assert_eq!(value.as_shared::<u32>().map(|it| *it), Some(1234));
        assert!(value.as_shared::<String>().is_none());
    }

    #[test]
    fn test_accessors() {
        assert_eq!(PropValue::Bool(true).as_bool(), Some(true));
        assert_eq!(PropValue::Int(7).as_int(), Some(7));
        assert_eq!(PropValue::Text("x".into()).as_text(), Some("x"));
        assert!(PropValue::default().is_null());
        assert!(PropValue::Null.as_bool().is_none());
    }
}
