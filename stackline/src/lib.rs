// Copyright 2025 the Stackline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=stackline --heading-base-level=0

//! Stackline: stack navigation between panels inside a single container.
//!
//! ## Overview
//!
//! A [`NavigationController`] keeps an ordered stack of [`Panel`]s mounted in one
//! [`Container`]. Only the top panel is resumed and visible; starting a panel covers the
//! current top, finishing the top uncovers the one below. Panels get an Activity-like
//! lifecycle (`on_create`, `on_resume`, `on_pause`, `on_destroy`) driven by the
//! controller and by the host it is bound to.
//!
//! ## Pieces
//!
//! - [`PanelBehavior`]: what a panel does. Implement the hooks you need.
//! - [`PanelFactory`]: how a panel is built from its [`PanelContext`] and [`Extras`].
//! - [`NavigationController`]: the stack, the start guard, and every navigation
//!   operation. Configure it with [`ControllerBuilder`].
//! - [`Animator`]: animates two-phase transitions; [`Immediate`] and [`SlideAnimator`]
//!   are provided.
//! - [`signal`]: the channel panels use to ask their controller to finish them or start
//!   another panel.
//! - [`host`]: the host lifecycle source controllers follow.
//!
//! ## Transition guard
//!
//! Starting a panel on a non-empty stack leaves the controller *transitioning* until
//! the start's transition step runs. Further starts are rejected in the meantime: [`NavigationController::start_panel`] returns `None` and
//! the stack is unchanged. An animator that never fires its [`Completion`] therefore
//! blocks starts for good.
//!
//! ## Example
//!
//! ```
//! use stackline::{
//!     extras, HostId, NavigationController, Options, PanelBehavior, PanelContext, PanelError,
//!     PanelFactory, PanelList, PanelType,
//! };
//!
//! struct Article {
//!     title: String,
//! }
//!
//! impl PanelBehavior for Article {}
//!
//! impl PanelType for Article {
//!     fn construct(cx: &PanelContext) -> Result<Self, PanelError> {
//!         let title = cx
//!             .extras()
//!             .get_str("title")
//!             .ok_or_else(|| PanelError::missing_extra("title"))?;
//!         Ok(Self { title: title.to_owned() })
//!     }
//! }
//!
//! let nav = NavigationController::new(HostId::new(1), PanelList::new());
//! let article = PanelFactory::of::<Article>();
//!
//! let first = nav.start_panel(&article, Options::new(), extras! { "title" => "One" }).unwrap();
//! let second = nav.start_panel(&article, Options::new(), extras! { "title" => "Two" }).unwrap();
//! assert_eq!(nav.top(), Some(second.clone()));
//! assert!(!first.is_top());
//!
//! // A missing parameter fails construction; nothing is stacked.
//! assert!(nav.start_panel(&article, Options::new(), extras!()).is_none());
//! assert_eq!(nav.len(), 2);
//!
//! // The default back handler finishes the top.
//! assert!(nav.on_back_pressed());
//! assert!(second.is_destroyed());
//! assert_eq!(first.with_behavior(|a: &Article| a.title.clone()).as_deref(), Some("One"));
//! ```
//!
//! ## Logging
//!
//! Diagnostics go through the [`log`] facade: construction and hook failures at error
//! level, re-entrant animator use at warn, ignored requests at debug, and every
//! lifecycle transition at trace. No logger is installed.
//!
//! ## Features
//!
//! - `std` (default): enables `std` in dependencies.
//! - `libm`: `no_std` float math for kurbo.
//! - `surface_adapter` (default): implements [`Container`] for
//!   [`stackline_surface::Surface`].
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod adapters;
pub mod animation;
pub mod container;
pub mod controller;
mod error;
mod extras;
pub mod host;
pub mod panel;
pub mod signal;

pub use animation::{AnimationFrame, Animator, Completion, Immediate, SlideAnimator, SlideAxis, SlideConfig};
pub use container::{Container, PanelList};
pub use controller::{
    ControllerBuilder, ControllerId, NavigationCallback, NavigationController, NoCallback,
    Options, StartRequest,
};
pub use error::{NavError, PanelError, StartError};
pub use extras::{Extras, ExtrasBuilder};
pub use host::{HostEvent, HostId, HostListener, HostSignal, LifecycleHub};
pub use panel::{
    LifecycleStage, Panel, PanelBehavior, PanelContext, PanelFactory, PanelId, PanelState,
    PanelType,
};
pub use signal::{PanelSignal, SignalBus, SignalKind};
