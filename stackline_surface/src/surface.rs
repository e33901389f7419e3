// Copyright 2025 the Stackline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core surface implementation: mounting, visibility, placement, queries.

use alloc::vec::Vec;
use kurbo::{Affine, Point, Rect};

use crate::damage::Damage;
use crate::types::{LocalSlot, SlotFlags, SlotId};

#[derive(Clone, Debug)]
struct Slot<K> {
    generation: u32,
    key: K,
    local: LocalSlot,
}

/// A single container surface holding keyed slots in mount order.
///
/// Later mounts are stacked above earlier ones. The surface itself has a visibility
/// switch that is independent of the per-slot [`SlotFlags::VISIBLE`] bit: a hidden
/// surface renders nothing, whatever its slots say.
pub struct Surface<K> {
    slots: Vec<Option<Slot<K>>>, // generational slots
    generations: Vec<u32>,       // last generation per slot (persists across frees)
    free_list: Vec<usize>,
    order: Vec<SlotId>, // bottom → top
    bounds: Rect,
    visible: bool,
    damage: Damage,
}

impl<K> core::fmt::Debug for Surface<K> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let alive = self.order.len();
        f.debug_struct("Surface")
            .field("slots_total", &self.slots.len())
            .field("slots_alive", &alive)
            .field("free_list", &self.free_list.len())
            .field("bounds", &self.bounds)
            .field("visible", &self.visible)
            .finish_non_exhaustive()
    }
}

impl<K: Copy + Eq> Default for Surface<K> {
    fn default() -> Self {
        Self::new(Rect::ZERO)
    }
}

impl<K: Copy + Eq> Surface<K> {
    /// Create an empty, visible surface covering `bounds`.
    pub fn new(bounds: Rect) -> Self {
        Self {
            slots: Vec::new(),
            generations: Vec::new(),
            free_list: Vec::new(),
            order: Vec::new(),
            bounds,
            visible: true,
            damage: Damage::default(),
        }
    }

    /// Surface bounds.
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Resize the surface; the whole old and new area is damaged.
    pub fn set_bounds(&mut self, bounds: Rect) {
        if self.bounds != bounds {
            self.damage.push(self.bounds);
            self.bounds = bounds;
            self.damage.push(bounds);
        }
    }

    /// Mount `key` on top of every existing slot.
    ///
    /// A key may only be mounted once; mounting it again returns the existing slot.
    pub fn mount(&mut self, key: K, local: LocalSlot) -> SlotId {
        if let Some(existing) = self.find(key) {
            return existing;
        }
        let (idx, generation) = if let Some(idx) = self.free_list.pop() {
            let generation = self.generations[idx].saturating_add(1);
            self.generations[idx] = generation;
            #[allow(
                clippy::cast_possible_truncation,
                reason = "SlotId uses 32-bit indices by design."
            )]
            (idx as u32, generation)
        } else {
            let generation = 1_u32;
            self.slots.push(None);
            self.generations.push(generation);
            #[allow(
                clippy::cast_possible_truncation,
                reason = "SlotId uses 32-bit indices by design."
            )]
            ((self.slots.len() - 1) as u32, generation)
        };
        let id = SlotId::new(idx, generation);
        self.slots[id.idx()] = Some(Slot {
            generation,
            key,
            local,
        });
        self.order.push(id);
        self.damage_slot(id);
        id
    }

    /// Unmount a slot, returning its key. Stale ids are ignored.
    pub fn unmount(&mut self, id: SlotId) -> Option<K> {
        if !self.is_alive(id) {
            return None;
        }
        self.damage_slot(id);
        self.order.retain(|s| *s != id);
        let slot = self.slots[id.idx()].take()?;
        self.free_list.push(id.idx());
        Some(slot.key)
    }

    /// Unmount the slot holding `key`, if any.
    pub fn unmount_key(&mut self, key: K) -> bool {
        match self.find(key) {
            Some(id) => self.unmount(id).is_some(),
            None => false,
        }
    }

    /// Find the live slot holding `key`.
    pub fn find(&self, key: K) -> Option<SlotId> {
        self.order
            .iter()
            .copied()
            .find(|id| self.slot(*id).is_some_and(|s| s.key == key))
    }

    /// Key held by a live slot.
    pub fn key(&self, id: SlotId) -> Option<K> {
        self.slot(id).map(|s| s.key)
    }

    /// Position of the slot in the stacking order (0 is the bottom).
    pub fn index_of(&self, id: SlotId) -> Option<usize> {
        self.order.iter().position(|s| *s == id)
    }

    /// Number of mounted slots.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Returns true if nothing is mounted.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Mounted keys from bottom to top.
    pub fn keys(&self) -> impl Iterator<Item = K> + '_ {
        self.order.iter().filter_map(|id| self.key(*id))
    }

    /// Keys whose slots are flagged [`SlotFlags::VISIBLE`], bottom to top.
    ///
    /// Empty while the surface itself is hidden.
    pub fn visible_keys(&self) -> impl Iterator<Item = K> + '_ {
        let shown = self.visible;
        self.order.iter().filter_map(move |id| {
            let slot = self.slot(*id)?;
            (shown && slot.local.flags.contains(SlotFlags::VISIBLE)).then_some(slot.key)
        })
    }

    /// The topmost visible, interactive key. This is the slot that should receive input.
    pub fn top_interactive(&self) -> Option<K> {
        if !self.visible {
            return None;
        }
        self.order.iter().rev().find_map(|id| {
            let slot = self.slot(*id)?;
            slot.local
                .flags
                .contains(SlotFlags::VISIBLE | SlotFlags::INTERACTIVE)
                .then_some(slot.key)
        })
    }

    /// Update slot flags.
    pub fn set_flags(&mut self, id: SlotId, flags: SlotFlags) {
        let changed = match self.slot_mut(id) {
            Some(s) if s.local.flags != flags => {
                s.local.flags = flags;
                true
            }
            _ => false,
        };
        if changed {
            self.damage_slot(id);
        }
    }

    /// Slot flags, if the id is live.
    pub fn flags(&self, id: SlotId) -> Option<SlotFlags> {
        self.slot(id).map(|s| s.local.flags)
    }

    /// Show or hide a single slot.
    pub fn set_slot_visible(&mut self, id: SlotId, visible: bool) {
        if let Some(mut flags) = self.flags(id) {
            flags.set(SlotFlags::VISIBLE, visible);
            self.set_flags(id, flags);
        }
    }

    /// Returns true if the slot is flagged visible (ignores surface visibility).
    pub fn is_slot_visible(&self, id: SlotId) -> bool {
        self.flags(id)
            .is_some_and(|f| f.contains(SlotFlags::VISIBLE))
    }

    /// Update the slot transform. Old and new world bounds are damaged.
    pub fn set_local_transform(&mut self, id: SlotId, transform: Affine) {
        let changed = match self.slot(id) {
            Some(s) => s.local.local_transform != transform,
            None => false,
        };
        if changed {
            self.damage_slot(id);
            if let Some(s) = self.slot_mut(id) {
                s.local.local_transform = transform;
            }
            self.damage_slot(id);
        }
    }

    /// Current slot transform.
    pub fn local_transform(&self, id: SlotId) -> Option<Affine> {
        self.slot(id).map(|s| s.local.local_transform)
    }

    /// Update local bounds (`None` fills the surface).
    pub fn set_local_bounds(&mut self, id: SlotId, bounds: Option<Rect>) {
        self.damage_slot(id);
        if let Some(s) = self.slot_mut(id) {
            s.local.local_bounds = bounds;
        }
        self.damage_slot(id);
    }

    /// Surface-space bounds of a slot after its transform, clipped to the surface.
    pub fn world_bounds(&self, id: SlotId) -> Option<Rect> {
        let slot = self.slot(id)?;
        let local = slot.local.local_bounds.unwrap_or(self.bounds);
        let world = transform_rect_bbox(slot.local.local_transform, local);
        Some(world.intersect(self.bounds))
    }

    /// Show or hide the whole surface.
    pub fn set_visible(&mut self, visible: bool) {
        if self.visible != visible {
            self.visible = visible;
            self.damage.push(self.bounds);
        }
    }

    /// Returns true if the surface is shown.
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Returns true if `id` refers to a mounted slot.
    ///
    /// A `SlotId` is considered live if its slot exists and its generation matches
    /// the current generation stored in that slot.
    pub fn is_alive(&self, id: SlotId) -> bool {
        self.slot(id).is_some()
    }

    /// Take the damage accumulated since the last call.
    pub fn take_damage(&mut self) -> Damage {
        core::mem::take(&mut self.damage)
    }

    // --- internals ---

    fn slot(&self, id: SlotId) -> Option<&Slot<K>> {
        self.slots
            .get(id.idx())?
            .as_ref()
            .filter(|s| s.generation == id.1)
    }

    fn slot_mut(&mut self, id: SlotId) -> Option<&mut Slot<K>> {
        self.slots
            .get_mut(id.idx())?
            .as_mut()
            .filter(|s| s.generation == id.1)
    }

    fn damage_slot(&mut self, id: SlotId) {
        if let Some(rect) = self.world_bounds(id) {
            self.damage.push(rect);
        }
    }
}

/// Transform an axis-aligned `Rect` by an `Affine` and return a conservative
/// axis-aligned bounding box.
fn transform_rect_bbox(affine: Affine, rect: Rect) -> Rect {
    let p0 = affine * Point::new(rect.x0, rect.y0);
    let p1 = affine * Point::new(rect.x1, rect.y0);
    let p2 = affine * Point::new(rect.x0, rect.y1);
    let p3 = affine * Point::new(rect.x1, rect.y1);
    let min_x = p0.x.min(p1.x).min(p2.x).min(p3.x);
    let min_y = p0.y.min(p1.y).min(p2.y).min(p3.y);
    let max_x = p0.x.max(p1.x).max(p2.x).max(p3.x);
    let max_y = p0.y.max(p1.y).max(p2.y).max(p3.y);
    Rect::new(min_x, min_y, max_x, max_y)
}
