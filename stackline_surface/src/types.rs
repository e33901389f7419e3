// Copyright 2025 the Stackline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for the surface: slot identifiers, flags, and local placement.

use kurbo::{Affine, Rect};

/// Identifier for a mounted slot in a [`Surface`](crate::Surface).
///
/// This is a small, copyable handle that stays stable while the slot is mounted but
/// becomes invalid once it is unmounted.
/// It consists of a slot index and a generation counter.
///
/// ## Semantics
///
/// - On mount, a fresh slot is allocated with generation `1`.
/// - On unmount, the slot is freed; any existing `SlotId` that pointed to that slot is now stale.
/// - On reuse of a freed slot, its generation is incremented, producing a new, distinct `SlotId`.
///
/// Use [`Surface::is_alive`](crate::Surface::is_alive) to check whether a `SlotId` still
/// refers to a mounted slot. Stale ids never alias a different live slot because the
/// generation must match.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct SlotId(pub(crate) u32, pub(crate) u32);

impl SlotId {
    pub(crate) const fn new(idx: u32, generation: u32) -> Self {
        Self(idx, generation)
    }

    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }

    /// Generation of this identifier.
    pub const fn generation(self) -> u32 {
        self.1
    }
}

bitflags::bitflags! {
    /// Slot flags controlling visibility and input.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct SlotFlags: u8 {
        /// Slot is visible (participates in rendering).
        const VISIBLE     = 0b0000_0001;
        /// Slot receives input when it is the topmost visible slot.
        const INTERACTIVE = 0b0000_0010;
    }
}

impl Default for SlotFlags {
    fn default() -> Self {
        Self::VISIBLE | Self::INTERACTIVE
    }
}

/// Local placement for a slot.
#[derive(Clone, Debug)]
pub struct LocalSlot {
    /// Local (untransformed) bounds. `None` fills the surface bounds.
    pub local_bounds: Option<Rect>,
    /// Transform applied on top of the surface origin, used for transition offsets.
    pub local_transform: Affine,
    /// Visibility and input flags.
    pub flags: SlotFlags,
}

impl Default for LocalSlot {
    fn default() -> Self {
        Self {
            local_bounds: None,
            local_transform: Affine::IDENTITY,
            flags: SlotFlags::default(),
        }
    }
}
