// Copyright 2025 the Stackline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=stackline_surface --heading-base-level=0

//! Stackline Surface: a Kurbo-native container surface for stacked content.
//!
//! Stackline Surface is the in-memory stand-in for a platform container view (a frame
//! layout, a window region, a terminal pane). It holds one slot per mounted key,
//! stacked in mount order, and tracks what a renderer needs to know about them.
//!
//! - Slots carry visibility and input flags, an optional local bounds override, and a
//!   local transform used for transition offsets.
//! - The surface has its own visibility switch.
//! - Every change that affects pixels records coarse damage, drained with
//!   [`Surface::take_damage`].
//!
//! ## Not a layout engine
//!
//! This crate does not measure or arrange content. Callers decide what each slot shows;
//! the surface only records where it is, whether it is shown, and what needs repainting.
//!
//! ## API overview
//!
//! - [`Surface`]: the container.
//! - [`LocalSlot`]: per-slot placement (bounds, transform, flags).
//! - [`SlotFlags`]: visibility and input controls.
//! - [`SlotId`]: generational handle of a slot.
//! - [`Damage`]: repaint regions.
//!
//! ## Minimal usage
//!
//! ```
//! use stackline_surface::{LocalSlot, Surface};
//! use kurbo::{Affine, Rect, Vec2};
//!
//! let mut surface: Surface<u32> = Surface::new(Rect::new(0.0, 0.0, 320.0, 480.0));
//!
//! let home = surface.mount(1, LocalSlot::default());
//! let detail = surface.mount(2, LocalSlot::default());
//!
//! // Hide what is underneath, slide the new slot in from the right.
//! surface.set_slot_visible(home, false);
//! surface.set_local_transform(detail, Affine::translate(Vec2::new(320.0, 0.0)));
//! surface.set_local_transform(detail, Affine::IDENTITY);
//!
//! assert_eq!(surface.top_interactive(), Some(2));
//! assert!(surface.take_damage().union_rect().is_some());
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod damage;
mod surface;
mod types;

pub use damage::Damage;
pub use surface::Surface;
pub use types::{LocalSlot, SlotFlags, SlotId};
