// Copyright 2025 the Stackline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Slide transitions on a surface.
//!
//! Drive a `SlideAnimator` at 60 frames per second and print where each panel
//! sits and what the surface needs to repaint.
//!
//! Run:
//! - `cargo run -p stackline_demos --example slide_frames`

use std::time::Duration;

use kurbo::Rect;
use stackline::{
    HostId, NavigationController, Options, PanelBehavior, PanelFactory, PanelId, SlideAnimator,
    SlideConfig, extras,
};
use stackline_surface::Surface;

struct Card;

impl PanelBehavior for Card {}

const FRAME: Duration = Duration::from_millis(16);

fn report(nav: &NavigationController<Surface<PanelId>>) {
    nav.with_container_mut(|surface| {
        let placed: Vec<_> = surface
            .keys()
            .filter_map(|key| {
                let id = surface.find(key)?;
                Some((key.get(), surface.local_transform(id)?.translation().x.round()))
            })
            .collect();
        let damage = surface.take_damage();
        println!("  x offsets {placed:?}, repaint {:?}", damage.union_rect());
    });
}

fn run_frames(nav: &NavigationController<Surface<PanelId>>) {
    let mut frame = 0;
    while nav.advance_animations(FRAME) {
        frame += 1;
        print!("frame {frame:>2}:");
        report(nav);
    }
    print!("settled: ");
    report(nav);
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let bounds = Rect::new(0.0, 0.0, 360.0, 640.0);
    let nav = NavigationController::builder(HostId::new(1), Surface::new(bounds))
        .animator(SlideAnimator::new(SlideConfig {
            extent: bounds.width(),
            ..SlideConfig::default()
        }))
        .build();
    let card = PanelFactory::new("card", |_| Ok(Box::new(Card)));

    nav.start_panel(&card, Options::new(), extras!()).unwrap();
    log::info!("push");
    let second = nav.start_panel(&card, Options::new(), extras!()).unwrap();
    run_frames(&nav);

    log::info!("pop");
    nav.finish_panel(&second, Options::new());
    run_frames(&nav);
}
