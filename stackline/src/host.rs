// Copyright 2025 the Stackline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Host lifecycle signals.
//!
//! The host (an activity, a window, a terminal session) tells controllers when it is
//! resumed, paused, or destroyed. A [`LifecycleHub`] fans those [`HostEvent`]s out to
//! every subscribed [`HostListener`]; each listener filters by [`HostId`].
//!
//! Listeners are held weakly, so a dropped controller silently falls off the hub.
//!
//! ```
//! use stackline::host::{HostEvent, HostId, HostSignal, LifecycleHub};
//!
//! let hub = LifecycleHub::new();
//! let main = HostId::new(1);
//! hub.emit(HostEvent { host: main, signal: HostSignal::Paused });
//! assert_eq!(hub.listener_count(), 0);
//! ```

use alloc::rc::{Rc, Weak};
use alloc::vec::Vec;
use core::cell::RefCell;

/// Identifies a host context.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct HostId(u64);

impl HostId {
    /// Wrap a host-chosen identifier.
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Raw value.
    pub const fn get(self) -> u64 {
        self.0
    }
}

/// What happened to the host.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum HostSignal {
    /// The host came to the foreground.
    Resumed,
    /// The host left the foreground.
    Paused,
    /// The host is going away.
    Destroyed,
}

/// A host signal scoped to one host.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct HostEvent {
    /// Which host.
    pub host: HostId,
    /// What happened.
    pub signal: HostSignal,
}

/// Receives host events from a [`LifecycleHub`].
pub trait HostListener {
    /// Handle one event. Events for other hosts arrive too; ignore them.
    fn on_host_event(&self, event: HostEvent);
}

/// Subscription handle returned by [`LifecycleHub::subscribe`].
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct ListenerId(u64);

#[derive(Default)]
struct HubState {
    next: u64,
    listeners: Vec<(ListenerId, Weak<dyn HostListener>)>,
}

/// Fans host events out to weakly-held listeners.
///
/// Cloning is cheap; clones share the listener list.
#[derive(Clone, Default)]
pub struct LifecycleHub {
    inner: Rc<RefCell<HubState>>,
}

impl core::fmt::Debug for LifecycleHub {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("LifecycleHub")
            .field("listeners", &self.inner.borrow().listeners.len())
            .finish()
    }
}

impl LifecycleHub {
    /// Create a hub with no listeners.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener.
    pub fn subscribe(&self, listener: Weak<dyn HostListener>) -> ListenerId {
        let mut state = self.inner.borrow_mut();
        state.next += 1;
        let id = ListenerId(state.next);
        state.listeners.push((id, listener));
        id
    }

    /// Remove a listener. Returns false if it was not registered.
    pub fn unsubscribe(&self, id: ListenerId) -> bool {
        let mut state = self.inner.borrow_mut();
        let before = state.listeners.len();
        state.listeners.retain(|(l, _)| *l != id);
        state.listeners.len() != before
    }

    /// Number of registered listeners that are still alive.
    pub fn listener_count(&self) -> usize {
        self.inner
            .borrow()
            .listeners
            .iter()
            .filter(|(_, l)| l.strong_count() > 0)
            .count()
    }

    /// Deliver `event` to every live listener.
    ///
    /// Listeners may subscribe or unsubscribe while the event is delivered; the change
    /// takes effect from the next event.
    pub fn emit(&self, event: HostEvent) {
        let snapshot: Vec<_> = {
            let mut state = self.inner.borrow_mut();
            state.listeners.retain(|(_, l)| l.strong_count() > 0);
            state.listeners.iter().map(|(_, l)| l.clone()).collect()
        };
        log::trace!("host {}: {:?} to {} listener(s)", event.host.get(), event.signal, snapshot.len());
        for listener in snapshot {
            if let Some(listener) = listener.upgrade() {
                listener.on_host_event(event);
            }
        }
    }

    /// Shorthand for emitting [`HostSignal::Resumed`].
    pub fn resumed(&self, host: HostId) {
        self.emit(HostEvent {
            host,
            signal: HostSignal::Resumed,
        });
    }

    /// Shorthand for emitting [`HostSignal::Paused`].
    pub fn paused(&self, host: HostId) {
        self.emit(HostEvent {
            host,
            signal: HostSignal::Paused,
        });
    }

    /// Shorthand for emitting [`HostSignal::Destroyed`].
    pub fn destroyed(&self, host: HostId) {
        self.emit(HostEvent {
            host,
            signal: HostSignal::Destroyed,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::cell::Cell;

    #[derive(Default)]
    struct Count(Cell<u32>);

    impl HostListener for Count {
        fn on_host_event(&self, _event: HostEvent) {
            self.0.set(self.0.get() + 1);
        }
    }

    #[test]
    fn emit_reaches_live_listeners_only() {
        let hub = LifecycleHub::new();
        let kept = Rc::new(Count::default());
        let weak: Weak<dyn HostListener> = Rc::downgrade(&kept) as Weak<dyn HostListener>;
        hub.subscribe(weak);
        {
            let dropped = Rc::new(Count::default());
            hub.subscribe(Rc::downgrade(&dropped) as Weak<dyn HostListener>);
            assert_eq!(hub.listener_count(), 2);
        }
        hub.resumed(HostId::new(9));
        assert_eq!(kept.0.get(), 1);
        assert_eq!(hub.listener_count(), 1);
    }

    #[test]
    fn unsubscribe_stops_delivery() {
        let hub = LifecycleHub::new();
        let count = Rc::new(Count::default());
        let id = hub.subscribe(Rc::downgrade(&count) as Weak<dyn HostListener>);
        assert!(hub.unsubscribe(id));
        assert!(!hub.unsubscribe(id));
        hub.destroyed(HostId::new(1));
        assert_eq!(count.0.get(), 0);
    }
}
