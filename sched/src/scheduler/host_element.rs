// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use futures_util::future::BoxFuture;

use crate::{PropValue, PropsSnapshot};

/// Capability set of the element hosting a component instance.
///
/// The scheduler never constructs or patches a visual tree itself; it only
/// decides *whether and when* a pass's output may be committed, then drives
/// these capabilities. Shadow-boundary attachment, stylesheet loading, and
/// tag registration are assumed to have already happened on the other side of
/// this trait.
pub trait HostElement: Send + Sync {
    /// Is the instance currently attached to a live display surface?
    /// Visible commits (visual flag, notification, view render) are skipped
    /// while detached; props persistence is not.
    fn is_attached(&self) -> bool;

    fn add_visual_flag(&self, name: &str);

    fn remove_visual_flag(&self, name: &str);

    /// Outbound notification dispatch. The concrete transport is the host's
    /// business; the return value reports whatever the transport reports
    /// (e.g. "not swallowed by a listener").
    fn notify(&self, name: &str, payload: PropValue) -> bool;
}

/// External view renderer: turns a committed props snapshot into visual
/// output. Invoked once per committed pass; may suspend.
pub trait ViewRenderer: Send + Sync {
    fn render<'a>(&'a self, props: &'a PropsSnapshot) -> BoxFuture<'a, ()>;
}
