// Copyright 2025 the Stackline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Adapters to integrate with other Stackline crates.
//!
//! Enabled via feature flags to keep the core small and `no_std` by default.

#[cfg(feature = "surface_adapter")]
pub mod surface;
