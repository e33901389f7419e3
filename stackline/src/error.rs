// Copyright 2025 the Stackline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error types.

use alloc::string::String;
use thiserror::Error;

use crate::panel::{LifecycleStage, PanelId};

/// Failure reported by a panel factory or a lifecycle hook.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PanelError {
    /// A required parameter was not supplied.
    #[error("missing required extra `{key}`")]
    MissingExtra {
        /// The parameter name.
        key: String,
    },
    /// Any other failure, described for the log.
    #[error("{0}")]
    Failed(String),
}

impl PanelError {
    /// Build a [`PanelError::Failed`] from a message.
    pub fn failed(message: impl Into<String>) -> Self {
        Self::Failed(message.into())
    }

    /// Build a [`PanelError::MissingExtra`] for `key`.
    pub fn missing_extra(key: impl Into<String>) -> Self {
        Self::MissingExtra { key: key.into() }
    }
}

/// Why a start request produced no panel.
#[derive(Debug, Error)]
pub enum StartError {
    /// Another start (or an animated finish) is still in flight.
    #[error("a transition is already in flight")]
    Busy,
    /// The factory or `on_create` failed.
    #[error("unable to construct panel `{panel}`: {source}")]
    Construction {
        /// Factory name.
        panel: &'static str,
        /// Underlying failure.
        #[source]
        source: PanelError,
    },
}

/// A lifecycle hook failed while the controller was mutating the stack.
///
/// The mutation itself is always committed; this only reports the hook.
#[derive(Debug, Error)]
#[error("{stage} hook of {panel} failed: {source}")]
pub struct NavError {
    /// Panel whose hook failed.
    pub panel: PanelId,
    /// Which hook failed.
    pub stage: LifecycleStage,
    /// The hook's error.
    #[source]
    pub source: PanelError,
}
