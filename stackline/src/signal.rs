// Copyright 2025 the Stackline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Decoupled panel → controller signalling.
//!
//! ## Overview
//!
//! Panels do not hold their controller. They post a [`PanelSignal`] scoped to their own
//! [`PanelId`] on a [`SignalBus`]; the controller subscribes to both signal kinds for
//! every panel it owns, from start until destruction, and drains what was posted for
//! it in [`NavigationController::process_signals`](crate::NavigationController::process_signals).
//!
//! This keeps a panel's input handler from re-entering the controller while the
//! controller is in the middle of a mutation: posting only queues.
//!
//! A signal posted by a panel with no live subscription for that kind is dropped on the
//! spot. A queued signal whose subscription disappears before it is drained is dropped
//! at drain time.
//!
//! ```
//! use stackline::signal::{PanelSignal, SignalBus, SignalKind};
//! # use stackline::PanelId;
//! # fn demo(bus: &SignalBus, panel: PanelId, controller: stackline::ControllerId) {
//! bus.subscribe(controller, panel, SignalKind::Finish);
//! bus.sender(panel).send(PanelSignal::Finish);
//! assert_eq!(bus.pending(), 1);
//! # }
//! ```

use alloc::collections::{BTreeMap, VecDeque};
use alloc::rc::Rc;
use alloc::vec::Vec;
use core::cell::RefCell;

use crate::controller::ControllerId;
use crate::extras::Extras;
use crate::panel::{PanelFactory, PanelId};

/// The two named signals a panel can post.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub enum SignalKind {
    /// See [`PanelSignal::Finish`].
    Finish,
    /// See [`PanelSignal::StartSibling`].
    StartSibling,
}

/// A request from a panel to its controller.
#[derive(Clone, Debug)]
pub enum PanelSignal {
    /// Finish the posting panel.
    Finish,
    /// Start another panel on the posting panel's controller.
    StartSibling {
        /// What to build.
        factory: PanelFactory,
        /// Parameters for the new panel.
        extras: Extras,
    },
}

impl PanelSignal {
    /// The kind this signal is subscribed under.
    pub fn kind(&self) -> SignalKind {
        match self {
            Self::Finish => SignalKind::Finish,
            Self::StartSibling { .. } => SignalKind::StartSibling,
        }
    }
}

#[derive(Debug, Default)]
struct BusState {
    queue: VecDeque<(PanelId, PanelSignal)>,
    subscriptions: BTreeMap<(PanelId, SignalKind), ControllerId>,
}

/// Shared queue of panel signals.
///
/// Cloning is cheap; clones share the queue. One bus may serve several controllers.
#[derive(Clone, Debug, Default)]
pub struct SignalBus {
    inner: Rc<RefCell<BusState>>,
}

impl SignalBus {
    /// Create an empty bus.
    pub fn new() -> Self {
        Self::default()
    }

    /// Route `kind` signals posted by `panel` to `controller`.
    pub fn subscribe(&self, controller: ControllerId, panel: PanelId, kind: SignalKind) {
        self.inner
            .borrow_mut()
            .subscriptions
            .insert((panel, kind), controller);
    }

    /// Drop every subscription of `panel`.
    pub fn unsubscribe_panel(&self, panel: PanelId) {
        self.inner
            .borrow_mut()
            .subscriptions
            .retain(|(p, _), _| *p != panel);
    }

    /// Returns true if `kind` signals from `panel` currently reach a controller.
    pub fn is_subscribed(&self, panel: PanelId, kind: SignalKind) -> bool {
        self.inner
            .borrow()
            .subscriptions
            .contains_key(&(panel, kind))
    }

    /// Post `signal` on behalf of `from`.
    pub fn post(&self, from: PanelId, signal: PanelSignal) {
        let mut state = self.inner.borrow_mut();
        if !state.subscriptions.contains_key(&(from, signal.kind())) {
            log::trace!("{from}: dropping {:?} signal, nobody subscribed", signal.kind());
            return;
        }
        log::trace!("{from}: posted {:?}", signal.kind());
        state.queue.push_back((from, signal));
    }

    /// A sender bound to `panel`.
    pub fn sender(&self, panel: PanelId) -> SignalSender {
        SignalSender {
            bus: self.clone(),
            from: panel,
        }
    }

    /// Number of queued signals, for every controller.
    pub fn pending(&self) -> usize {
        self.inner.borrow().queue.len()
    }

    /// Take, in posting order, the queued signals routed to `controller`.
    pub(crate) fn drain_for(&self, controller: ControllerId) -> Vec<(PanelId, PanelSignal)> {
        let mut state = self.inner.borrow_mut();
        let BusState {
            queue,
            subscriptions,
        } = &mut *state;
        let mut taken = Vec::new();
        queue.retain(|(from, signal)| {
            match subscriptions.get(&(*from, signal.kind())) {
                Some(owner) if *owner == controller => {
                    taken.push((*from, signal.clone()));
                    false
                }
                Some(_) => true,
                None => {
                    log::trace!("{from}: discarding {:?}, subscription gone", signal.kind());
                    false
                }
            }
        });
        taken
    }
}

/// Posts signals on behalf of one panel.
#[derive(Clone, Debug)]
pub struct SignalSender {
    bus: SignalBus,
    from: PanelId,
}

impl SignalSender {
    /// Post `signal`.
    pub fn send(&self, signal: PanelSignal) {
        self.bus.post(self.from, signal);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids() -> (ControllerId, ControllerId, PanelId, PanelId) {
        (
            ControllerId::next(),
            ControllerId::next(),
            PanelId::next(),
            PanelId::next(),
        )
    }

    #[test]
    fn unsubscribed_signals_are_dropped() {
        let bus = SignalBus::new();
        let (_, _, a, _) = ids();
        bus.sender(a).send(PanelSignal::Finish);
        assert_eq!(bus.pending(), 0);
    }

    #[test]
    fn drain_only_takes_own_signals_in_order() {
        let bus = SignalBus::new();
        let (c1, c2, a, b) = ids();
        bus.subscribe(c1, a, SignalKind::Finish);
        bus.subscribe(c1, a, SignalKind::StartSibling);
        bus.subscribe(c2, b, SignalKind::Finish);

        bus.post(b, PanelSignal::Finish);
        bus.post(a, PanelSignal::Finish);
        bus.post(
            a,
            PanelSignal::StartSibling {
                factory: PanelFactory::new("x", |_| Err(crate::PanelError::failed("unused"))),
                extras: Extras::new(),
            },
        );

        let mine = bus.drain_for(c1);
        let kinds: Vec<_> = mine.iter().map(|(_, s)| s.kind()).collect();
        assert_eq!(kinds, [SignalKind::Finish, SignalKind::StartSibling]);
        assert_eq!(bus.pending(), 1, "the other controller's signal stays queued");
        assert_eq!(bus.drain_for(c2).len(), 1);
    }

    #[test]
    fn unsubscribe_discards_queued_signals() {
        let bus = SignalBus::new();
        let (c1, _, a, _) = ids();
        bus.subscribe(c1, a, SignalKind::Finish);
        bus.post(a, PanelSignal::Finish);
        bus.unsubscribe_panel(a);
        assert!(!bus.is_subscribed(a, SignalKind::Finish));
        assert!(bus.drain_for(c1).is_empty());
        assert_eq!(bus.pending(), 0);
    }
}
