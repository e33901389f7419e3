// Copyright 2025 the Stackline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Frame-driven slide transitions on a surface container.

use std::time::Duration;

use kurbo::{Affine, Rect};
use stackline::{
    HostId, NavigationController, Options, Panel, PanelBehavior, PanelFactory, SlideAnimator,
    SlideAxis, SlideConfig,
};
use stackline_surface::Surface;

struct Blank;

impl PanelBehavior for Blank {}

fn blank() -> PanelFactory {
    PanelFactory::new("blank", |_| Ok(Box::new(Blank)))
}

fn controller() -> NavigationController<Surface<stackline::PanelId>> {
    NavigationController::builder(HostId::new(3), Surface::new(Rect::new(0.0, 0.0, 320.0, 480.0)))
        .animator(SlideAnimator::new(SlideConfig {
            extent: 320.0,
            duration: Duration::from_millis(100),
            parallax: 0.25,
            axis: SlideAxis::Horizontal,
        }))
        .build()
}

fn transform(nav: &NavigationController<Surface<stackline::PanelId>>, panel: &Panel) -> Option<Affine> {
    nav.with_container(|s| s.find(panel.id()).and_then(|id| s.local_transform(id)))
}

#[test]
fn start_slides_the_new_panel_in_from_the_edge() {
    let nav = controller();
    let a = nav.start_panel(&blank(), Options::new(), stackline::extras!()).unwrap();
    let b = nav.start_panel(&blank(), Options::new(), stackline::extras!()).unwrap();

    assert!(nav.is_transitioning());
    assert_eq!(transform(&nav, &b), Some(Affine::translate((320.0, 0.0))));
    assert!(a.is_top(), "the old top stays resumed while sliding");

    assert!(nav.advance_animations(Duration::from_millis(50)));
    let mid = transform(&nav, &b).unwrap().translation();
    assert!(mid.x > 0.0 && mid.x < 160.0, "ease-out is past halfway: {mid:?}");
    let behind = transform(&nav, &a).unwrap().translation();
    assert!(behind.x < 0.0 && behind.x > -80.0);

    assert!(!nav.advance_animations(Duration::from_millis(50)));
    assert!(!nav.is_transitioning());
    assert!(b.is_top() && !a.is_top());
    assert_eq!(transform(&nav, &a), Some(Affine::IDENTITY));
    assert_eq!(transform(&nav, &b), Some(Affine::IDENTITY));
    let visible: Vec<_> = nav.with_container(|s| s.visible_keys().collect());
    assert_eq!(visible, [b.id()]);
}

#[test]
fn finish_slides_the_top_out_then_unmounts_it() {
    let nav = controller();
    let a = nav.start_panel(&blank(), Options::new(), stackline::extras!()).unwrap();
    let b = nav
        .start_panel(&blank(), Options::new().no_animation(), stackline::extras!())
        .unwrap();
    let _ = nav.with_container_mut(Surface::take_damage);

    nav.finish_panel(&b, Options::new());
    assert!(!nav.is_transitioning(), "starts stay open while sliding out");
    assert_eq!(nav.get_panels(), [a.clone()]);
    assert!(transform(&nav, &b).is_some(), "still mounted while sliding out");

    let mut frames = 0;
    while nav.advance_animations(Duration::from_millis(16)) {
        frames += 1;
        assert!(frames < 100, "slide never ended");
    }
    assert!(b.is_destroyed());
    assert!(a.is_top());
    assert_eq!(transform(&nav, &b), None);
    assert!(nav.with_container_mut(Surface::take_damage).union_rect().is_some());
}

#[test]
fn starts_are_rejected_until_the_slide_ends() {
    let nav = controller();
    nav.start_panel(&blank(), Options::new(), stackline::extras!()).unwrap();
    nav.start_panel(&blank(), Options::new(), stackline::extras!()).unwrap();
    assert!(nav.start_panel(&blank(), Options::new(), stackline::extras!()).is_none());
    nav.advance_animations(Duration::from_secs(1));
    assert!(nav.start_panel(&blank(), Options::new(), stackline::extras!()).is_some());
    assert_eq!(nav.len(), 3);
}
