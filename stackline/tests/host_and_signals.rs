// Copyright 2025 the Stackline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Host lifecycle signals and panel-posted signals.

mod support;

use std::rc::Rc;

use stackline::{
    HostId, LifecycleHub, NavigationController, Options, PanelList, SignalBus, SignalKind,
};
use support::{HOST, Harness, Journal, Recorder, probe};

fn hosted(hub: &LifecycleHub) -> (NavigationController<PanelList>, Journal) {
    let journal = Journal::default();
    let nav = NavigationController::builder(HOST, PanelList::new())
        .callback(Rc::new(Recorder(journal.clone())))
        .lifecycle(hub)
        .build();
    (nav, journal)
}

fn start(nav: &NavigationController<PanelList>, journal: &Journal, name: &str) {
    let extras = stackline::Extras::builder()
        .insert("journal", journal.clone())
        .insert("name", name.to_owned())
        .build();
    nav.start_panel(&probe(), Options::new().no_animation(), extras)
        .expect("start");
}

#[test]
fn host_signals_for_other_hosts_are_ignored() {
    let hub = LifecycleHub::new();
    let (nav, journal) = hosted(&hub);
    start(&nav, &journal, "A");
    journal.take();

    let elsewhere = HostId::new(2);
    hub.paused(elsewhere);
    hub.resumed(elsewhere);
    hub.destroyed(elsewhere);
    assert!(journal.take().is_empty());
    assert_eq!(nav.len(), 1);
}

#[test]
fn host_pause_and_resume_reach_the_top_when_visible() {
    let hub = LifecycleHub::new();
    let (nav, journal) = hosted(&hub);
    start(&nav, &journal, "A");
    start(&nav, &journal, "B");
    journal.take();

    hub.paused(HOST);
    hub.resumed(HOST);
    assert_eq!(journal.take(), ["B.on_pause", "B.on_resume"]);

    nav.set_visible(false);
    journal.take();
    hub.paused(HOST);
    hub.resumed(HOST);
    assert!(journal.take().is_empty(), "a hidden container ignores host pause/resume");
}

#[test]
fn host_destroy_drains_and_detaches() {
    let hub = LifecycleHub::new();
    let (nav, journal) = hosted(&hub);
    start(&nav, &journal, "A");
    start(&nav, &journal, "B");
    journal.take();
    assert_eq!(hub.listener_count(), 1);

    hub.destroyed(HOST);
    assert_eq!(journal.take(), ["B.on_destroy", "A.on_destroy"]);
    assert!(nav.is_empty());
    assert_eq!(hub.listener_count(), 0);

    // Detached: later host signals no longer arrive.
    start(&nav, &journal, "C");
    journal.take();
    hub.paused(HOST);
    assert!(journal.take().is_empty());
}

#[test]
fn dropped_controllers_fall_off_the_hub() {
    let hub = LifecycleHub::new();
    let (nav, _journal) = hosted(&hub);
    let clone = nav.clone();
    drop(nav);
    assert_eq!(hub.listener_count(), 1, "a clone keeps the controller alive");
    drop(clone);
    assert_eq!(hub.listener_count(), 0);
    hub.destroyed(HOST);
}

#[test]
fn finish_signal_waits_for_processing() {
    let h = Harness::new();
    let [a, b] = <[_; 2]>::try_from(h.stack(&["A", "B"])).unwrap();

    b.finish();
    assert_eq!(h.nav.len(), 2, "posting never mutates the stack");
    assert_eq!(h.nav.signal_bus().pending(), 1);

    assert_eq!(h.nav.process_signals(), 1);
    assert_eq!(h.nav.get_panels(), [a.clone()]);
    h.pending.fire_all();
    assert!(b.is_destroyed());
    assert!(a.is_top());

    // The destroyed panel is unsubscribed; its signals go nowhere.
    assert!(!h.nav.signal_bus().is_subscribed(b.id(), SignalKind::Finish));
    b.finish();
    assert_eq!(h.nav.signal_bus().pending(), 0);
    assert_eq!(h.nav.process_signals(), 0);
}

#[test]
fn start_sibling_signal_starts_on_the_same_controller() {
    let h = Harness::immediate();
    let a = h.stack(&["A"]).remove(0);
    a.start_sibling(probe(), h.extras("S").build());
    assert_eq!(h.nav.len(), 1);
    h.nav.process_signals();
    assert_eq!(h.names(), ["A", "S"]);
    assert!(h.nav.top().unwrap().is_top());
    assert!(!a.is_top());
}

#[test]
fn signals_are_processed_in_posting_order() {
    let h = Harness::immediate();
    let [a, b] = <[_; 2]>::try_from(h.stack(&["A", "B"])).unwrap();
    a.start_sibling(probe(), h.extras("S").build());
    b.finish();
    h.nav.process_signals();
    assert_eq!(h.names(), ["A", "S"]);
    assert!(b.is_destroyed());
}

#[test]
fn a_shared_bus_routes_signals_to_their_own_controller() {
    let bus = SignalBus::new();
    let journal = Journal::default();
    let left = NavigationController::builder(HOST, PanelList::new())
        .signal_bus(bus.clone())
        .build();
    let right = NavigationController::builder(HOST, PanelList::new())
        .signal_bus(bus.clone())
        .build();
    start(&left, &journal, "L");
    start(&right, &journal, "R");

    right.top().unwrap().finish();
    assert_eq!(left.process_signals(), 0);
    assert_eq!(bus.pending(), 1);
    assert_eq!(right.process_signals(), 1);
    assert!(right.is_empty());
    assert_eq!(left.len(), 1);
}

#[test]
fn signals_from_a_panel_finishing_itself_in_on_create_are_kept() {
    use stackline::{PanelBehavior, PanelContext, PanelError, PanelFactory};

    struct Ephemeral;

    impl PanelBehavior for Ephemeral {
        fn on_create(&mut self, cx: &PanelContext) -> Result<(), PanelError> {
            cx.finish();
            Ok(())
        }
    }

    let h = Harness::immediate();
    let factory = PanelFactory::new("ephemeral", |_| Ok(Box::new(Ephemeral)));
    let panel = h
        .nav
        .start_panel(&factory, Options::new(), stackline::Extras::new())
        .unwrap();
    assert!(panel.is_top());
    assert_eq!(h.nav.process_signals(), 1);
    assert!(panel.is_destroyed());
}
