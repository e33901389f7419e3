// Copyright 2025 the Stackline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Host lifecycle and panel signals.
//!
//! Two controllers follow the same lifecycle hub but belong to different hosts.
//! A panel asks its controller for a sibling, and the host going away tears
//! everything down.
//!
//! Run:
//! - `RUST_LOG=debug cargo run -p stackline_demos --example host_lifecycle`

use std::rc::Rc;

use stackline::{
    HostId, LifecycleHub, NavigationCallback, NavigationController, Options, Panel,
    PanelBehavior, PanelContext, PanelError, PanelFactory, PanelList, StartRequest, extras,
};

struct Menu;

impl PanelBehavior for Menu {
    fn on_resume(&mut self, cx: &PanelContext) -> Result<(), PanelError> {
        if cx.get_extra("open_settings", false) {
            cx.start_sibling(settings(), extras! { "from" => "menu" });
        }
        Ok(())
    }
}

struct Settings;

impl PanelBehavior for Settings {}

fn menu() -> PanelFactory {
    PanelFactory::new("menu", |_| Ok(Box::new(Menu)))
}

fn settings() -> PanelFactory {
    PanelFactory::new("settings", |_| Ok(Box::new(Settings)))
}

struct Announce(&'static str);

impl NavigationCallback for Announce {
    fn after_start(&self, request: &StartRequest, panel: &Panel) {
        println!("[{}] started {} as {}", self.0, request.factory.name(), panel.id());
    }

    fn after_finish(&self, panel: &Panel) {
        println!("[{}] finished {}", self.0, panel.id());
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();

    let hub = LifecycleHub::new();
    let (main_host, other_host) = (HostId::new(1), HostId::new(2));

    let main = NavigationController::builder(main_host, PanelList::new())
        .callback(Rc::new(Announce("main")))
        .lifecycle(&hub)
        .build();
    let other = NavigationController::builder(other_host, PanelList::new())
        .callback(Rc::new(Announce("other")))
        .lifecycle(&hub)
        .build();

    main.start_panel(&menu(), Options::new(), extras! { "open_settings" => true });
    other.start_panel(&menu(), Options::new(), extras!());

    log::info!("processing signals");
    main.process_signals();
    other.process_signals();
    println!("main holds {} panels, other holds {}", main.len(), other.len());

    log::info!("main host paused and resumed");
    hub.paused(main_host);
    hub.resumed(main_host);

    log::info!("main host destroyed");
    hub.destroyed(main_host);
    println!("main holds {} panels, other holds {}", main.len(), other.len());
    println!("hub listeners left: {}", hub.listener_count());

    other.on_destroy();
}
