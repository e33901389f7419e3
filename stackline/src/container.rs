// Copyright 2025 the Stackline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The view a controller mounts its panels into.
//!
//! A [`Container`] only tracks which panels are mounted, in mount order, and whether
//! each of them (and the container as a whole) is visible. The controller keeps the
//! container and its stack in step: a panel is mounted exactly while it is stacked,
//! plus the duration of an animated finish.
//!
//! [`PanelList`] is a plain in-memory implementation. With the `surface_adapter`
//! feature, [`stackline_surface::Surface`] implements the trait too.

use alloc::vec::Vec;

use kurbo::Affine;

use crate::panel::PanelId;

/// Host view holding mounted panels.
pub trait Container {
    /// Mount `panel` above every mounted panel. Mounted panels start visible.
    fn mount(&mut self, panel: PanelId);

    /// Unmount `panel`. Returns false if it was not mounted.
    fn unmount(&mut self, panel: PanelId) -> bool;

    /// Returns true if `panel` is mounted.
    fn contains(&self, panel: PanelId) -> bool;

    /// Show or hide one mounted panel.
    fn set_panel_visible(&mut self, panel: PanelId, visible: bool);

    /// Returns true if `panel` is mounted and shown.
    fn is_panel_visible(&self, panel: PanelId) -> bool;

    /// Position a mounted panel relative to the container. Used by animators.
    fn set_placement(&mut self, _panel: PanelId, _placement: Affine) {}

    /// Show or hide the container itself.
    fn set_visible(&mut self, visible: bool);

    /// Container visibility.
    fn is_visible(&self) -> bool;

    /// Mounted panels, bottom to top.
    fn panels(&self) -> Vec<PanelId>;
}

#[derive(Copy, Clone, Debug, PartialEq)]
struct Entry {
    panel: PanelId,
    visible: bool,
    placement: Affine,
}

/// A container that is just a list.
#[derive(Clone, Debug)]
pub struct PanelList {
    entries: Vec<Entry>,
    visible: bool,
}

impl Default for PanelList {
    fn default() -> Self {
        Self::new()
    }
}

impl PanelList {
    /// An empty, visible container.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            visible: true,
        }
    }

    /// Last placement applied to `panel`.
    pub fn placement(&self, panel: PanelId) -> Option<Affine> {
        self.entry(panel).map(|e| e.placement)
    }

    fn entry(&self, panel: PanelId) -> Option<&Entry> {
        self.entries.iter().find(|e| e.panel == panel)
    }

    fn entry_mut(&mut self, panel: PanelId) -> Option<&mut Entry> {
        self.entries.iter_mut().find(|e| e.panel == panel)
    }
}

impl Container for PanelList {
    fn mount(&mut self, panel: PanelId) {
        if self.contains(panel) {
            return;
        }
        self.entries.push(Entry {
            panel,
            visible: true,
            placement: Affine::IDENTITY,
        });
    }

    fn unmount(&mut self, panel: PanelId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.panel != panel);
        self.entries.len() != before
    }

    fn contains(&self, panel: PanelId) -> bool {
        self.entry(panel).is_some()
    }

    fn set_panel_visible(&mut self, panel: PanelId, visible: bool) {
        if let Some(e) = self.entry_mut(panel) {
            e.visible = visible;
        }
    }

    fn is_panel_visible(&self, panel: PanelId) -> bool {
        self.entry(panel).is_some_and(|e| e.visible)
    }

    fn set_placement(&mut self, panel: PanelId, placement: Affine) {
        if let Some(e) = self.entry_mut(panel) {
            e.placement = placement;
        }
    }

    fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    fn is_visible(&self) -> bool {
        self.visible
    }

    fn panels(&self) -> Vec<PanelId> {
        self.entries.iter().map(|e| e.panel).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mount_is_idempotent_and_ordered() {
        let mut list = PanelList::new();
        let (a, b) = (PanelId::next(), PanelId::next());
        list.mount(a);
        list.mount(b);
        list.mount(a);
        assert_eq!(list.panels(), [a, b]);
        assert!(list.unmount(a));
        assert!(!list.unmount(a));
        assert_eq!(list.panels(), [b]);
    }

    #[test]
    fn visibility_and_placement_need_a_mounted_panel() {
        let mut list = PanelList::new();
        let a = PanelId::next();
        list.set_panel_visible(a, true);
        assert!(!list.is_panel_visible(a));
        list.mount(a);
        assert!(list.is_panel_visible(a));
        list.set_panel_visible(a, false);
        assert!(!list.is_panel_visible(a));
        list.set_placement(a, Affine::translate((4.0, 0.0)));
        assert_eq!(list.placement(a), Some(Affine::translate((4.0, 0.0))));
    }
}
