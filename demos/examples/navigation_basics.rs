// Copyright 2025 the Stackline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Navigation basics.
//!
//! Start a few panels, finish a buried one, bring another to the front, and
//! go back until the stack is empty.
//!
//! Run:
//! - `RUST_LOG=trace cargo run -p stackline_demos --example navigation_basics`

use stackline::{
    HostId, NavigationController, Options, PanelBehavior, PanelContext, PanelError,
    PanelFactory, PanelList, PanelType, extras,
};

/// A page that prints its lifecycle.
struct Page {
    title: String,
}

impl PanelType for Page {
    fn construct(cx: &PanelContext) -> Result<Self, PanelError> {
        let title = cx
            .extras()
            .get_str("title")
            .ok_or_else(|| PanelError::missing_extra("title"))?;
        Ok(Self {
            title: title.to_owned(),
        })
    }
}

impl PanelBehavior for Page {
    fn on_resume(&mut self, _cx: &PanelContext) -> Result<(), PanelError> {
        println!("  {} is now on top", self.title);
        Ok(())
    }

    fn on_pause(&mut self, _cx: &PanelContext) -> Result<(), PanelError> {
        println!("  {} paused", self.title);
        Ok(())
    }

    fn on_destroy(&mut self, _cx: &PanelContext) -> Result<(), PanelError> {
        println!("  {} destroyed", self.title);
        Ok(())
    }
}

fn titles(nav: &NavigationController<PanelList>) -> Vec<String> {
    nav.get_panels()
        .iter()
        .filter_map(|p| p.with_behavior(|page: &Page| page.title.clone()))
        .collect()
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let nav = NavigationController::new(HostId::new(1), PanelList::new());
    let page = PanelFactory::of::<Page>();

    log::info!("start inbox, thread, message");
    let inbox = nav
        .start_panel(&page, Options::new(), extras! { "title" => "inbox" })
        .expect("inbox");
    nav.start_panel(&page, Options::new(), extras! { "title" => "thread" });
    let message = nav
        .start_panel(&page, Options::new(), extras! { "title" => "message" })
        .expect("message");
    println!("stack: {:?}", titles(&nav));

    log::info!("a start without a title fails and changes nothing");
    assert!(nav.start_panel(&page, Options::new(), extras!()).is_none());
    println!("stack: {:?}", titles(&nav));

    log::info!("bring inbox to the front");
    nav.bring_to_front(&inbox);
    println!("stack: {:?}", titles(&nav));

    log::info!("finish the buried message");
    nav.finish_panel(&message, Options::new());
    println!("stack: {:?}", titles(&nav));

    log::info!("back until empty");
    while nav.on_back_pressed() {
        println!("stack: {:?}", titles(&nav));
    }
    assert!(nav.is_empty());
}
