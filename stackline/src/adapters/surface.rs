// Copyright 2025 the Stackline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! [`Container`] implementation for Stackline Surface.
//!
//! ## Feature
//!
//! Enable with `surface_adapter` (on by default).
//!
//! ## Notes
//!
//! Each panel is one surface slot keyed by its [`PanelId`]. Slots are mounted with
//! [`LocalSlot::default`] (no local bounds, identity transform, visible and
//! interactive); panel visibility maps to [`SlotFlags::VISIBLE`] and placements to the
//! slot's local transform, so animations show up in the surface's damage.
//!
//! [`SlotFlags::VISIBLE`]: stackline_surface::SlotFlags::VISIBLE

use alloc::vec::Vec;

use kurbo::Affine;
use stackline_surface::{LocalSlot, Surface};

use crate::container::Container;
use crate::panel::PanelId;

impl Container for Surface<PanelId> {
    fn mount(&mut self, panel: PanelId) {
        Self::mount(self, panel, LocalSlot::default());
    }

    fn unmount(&mut self, panel: PanelId) -> bool {
        self.unmount_key(panel)
    }

    fn contains(&self, panel: PanelId) -> bool {
        self.find(panel).is_some()
    }

    fn set_panel_visible(&mut self, panel: PanelId, visible: bool) {
        if let Some(id) = self.find(panel) {
            self.set_slot_visible(id, visible);
        }
    }

    fn is_panel_visible(&self, panel: PanelId) -> bool {
        self.find(panel).is_some_and(|id| self.is_slot_visible(id))
    }

    fn set_placement(&mut self, panel: PanelId, placement: Affine) {
        if let Some(id) = self.find(panel) {
            self.set_local_transform(id, placement);
        }
    }

    fn set_visible(&mut self, visible: bool) {
        Self::set_visible(self, visible);
    }

    fn is_visible(&self) -> bool {
        Self::is_visible(self)
    }

    fn panels(&self) -> Vec<PanelId> {
        self.keys().collect()
    }
}
