// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::sync::{
    Mutex,
    atomic::{AtomicBool, AtomicUsize, Ordering},
};

use futures_util::future::BoxFuture;

use crate::{HostElement, PropValue, PropsSnapshot, ViewRenderer};

/// Everything a [`MockHostElement`] was asked to do, in call order.
#[derive(Clone, Debug, PartialEq)]
pub enum HostEvent {
    FlagAdded(String),
    FlagRemoved(String),
    Notified { name: String, payload: PropValue },
}

/// In-memory [`HostElement`] that records every visible side effect. Starts
/// attached; [`Self::detach`] simulates removal from the display surface.
#[derive(Debug, Default)]
pub struct MockHostElement {
    attached: AtomicBool,
    events: Mutex<Vec<HostEvent>>,
}

impl MockHostElement {
    #[must_use]
    pub fn new() -> Self {
        Self {
            attached: AtomicBool::new(true),
            events: Mutex::new(Vec::new()),
        }
    }

    pub fn detach(&self) { self.attached.store(false, Ordering::SeqCst); }

    pub fn reattach(&self) { self.attached.store(true, Ordering::SeqCst); }

    /// Snapshot of the recorded events, in call order.
    #[must_use]
    pub fn events(&self) -> Vec<HostEvent> { self.events.lock().unwrap().clone() }

    #[must_use]
    pub fn notification_count(&self, name: &str) -> usize {
        self.events()
            .iter()
            .filter(|it| matches!(it, HostEvent::Notified { name: n, .. } if n == name))
            .count()
    }

    #[must_use]
    pub fn flag_add_count(&self, name: &str) -> usize {
        self.events()
            .iter()
            .filter(|it| matches!(it, HostEvent::FlagAdded(n) if n == name))
            .count()
    }

    fn record(&self, event: HostEvent) { self.events.lock().unwrap().push(event); }
}

impl HostElement for MockHostElement {
    fn is_attached(&self) -> bool { self.attached.load(Ordering::SeqCst) }

    fn add_visual_flag(&self, name: &str) {
        self.record(HostEvent::FlagAdded(name.to_string()));
    }

    fn remove_visual_flag(&self, name: &str) {
        self.record(HostEvent::FlagRemoved(name.to_string()));
    }

    fn notify(&self, name: &str, payload: PropValue) -> bool {
        self.record(HostEvent::Notified {
            name: name.to_string(),
            payload,
        });
        true
    }
}

/// [`ViewRenderer`] that records how often it ran and the last snapshot it
/// was handed, without producing any actual output.
#[derive(Debug, Default)]
pub struct RecordingViewRenderer {
    render_count: AtomicUsize,
    last_props: Mutex<Option<PropsSnapshot>>,
}

impl RecordingViewRenderer {
    #[must_use]
    pub fn new() -> Self { Self::default() }

    #[must_use]
    pub fn render_count(&self) -> usize { self.render_count.load(Ordering::SeqCst) }

    #[must_use]
    pub fn last_props(&self) -> Option<PropsSnapshot> {
        self.last_props.lock().unwrap().clone()
    }
}

impl ViewRenderer for RecordingViewRenderer {
    fn render<'a>(&'a self, props: &'a PropsSnapshot) -> BoxFuture<'a, ()> {
        Box::pin(async move {
            self.render_count.fetch_add(1, Ordering::SeqCst);
            *self.last_props.lock().unwrap() = Some(props.clone());
        })
    }
}
