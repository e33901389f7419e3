// Copyright 2025 the Stackline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Immutable panel parameters.
//!
//! [`Extras`] is the parameter bag handed to a panel when it is started. It is built
//! once, then frozen: the panel, its factory and the navigation callbacks all see the
//! same shared, read-only map.
//!
//! ```
//! use stackline::{extras, Extras};
//!
//! let extras = extras! { "user_id" => 42_u64, "title" => "Profile" };
//! assert_eq!(extras.get("user_id", 0_u64), 42);
//! assert_eq!(extras.get_str("title"), Some("Profile"));
//! assert_eq!(extras.get("missing", 7_i32), 7);
//!
//! // Absent optional values are never stored.
//! let sparse = Extras::builder().insert_opt("avatar", None::<&str>).build();
//! assert!(sparse.is_empty());
//! ```

use alloc::collections::BTreeMap;
use alloc::rc::Rc;
use alloc::string::String;
use core::any::Any;

/// Immutable mapping from string keys to values of arbitrary type.
///
/// Cloning is cheap; clones share the same entries.
#[derive(Clone, Default)]
pub struct Extras {
    entries: Rc<BTreeMap<String, Rc<dyn Any>>>,
}

impl core::fmt::Debug for Extras {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_set().entries(self.entries.keys()).finish()
    }
}

impl Extras {
    /// An empty parameter bag.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start building a parameter bag.
    pub fn builder() -> ExtrasBuilder {
        ExtrasBuilder::default()
    }

    /// Value stored under `key`, or `default` if the key is absent or holds a
    /// different type.
    pub fn get<T: Any + Clone>(&self, key: &str, default: T) -> T {
        self.get_ref::<T>(key).cloned().unwrap_or(default)
    }

    /// Borrow the value stored under `key` if it has type `T`.
    pub fn get_ref<T: Any>(&self, key: &str) -> Option<&T> {
        let value = self.entries.get(key)?;
        (**value).downcast_ref::<T>()
    }

    /// String value stored under `key`, whether it was inserted as `String` or `&'static str`.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        let value = self.entries.get(key)?;
        if let Some(s) = (**value).downcast_ref::<String>() {
            return Some(s.as_str());
        }
        (**value).downcast_ref::<&'static str>().copied()
    }

    /// Returns true if a value is stored under `key`.
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Stored keys in sorted order.
    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.keys().map(String::as_str)
    }

    /// Number of stored values.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl From<Option<Self>> for Extras {
    fn from(extras: Option<Self>) -> Self {
        extras.unwrap_or_default()
    }
}

/// Builder for [`Extras`].
#[derive(Default)]
pub struct ExtrasBuilder {
    entries: BTreeMap<String, Rc<dyn Any>>,
}

impl core::fmt::Debug for ExtrasBuilder {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_set().entries(self.entries.keys()).finish()
    }
}

impl ExtrasBuilder {
    /// Store `value` under `key`, replacing any earlier value.
    #[must_use]
    pub fn insert<T: Any>(mut self, key: impl Into<String>, value: T) -> Self {
        self.entries.insert(key.into(), Rc::new(value));
        self
    }

    /// Store `value` under `key` if present; `None` leaves the key absent.
    #[must_use]
    pub fn insert_opt<T: Any>(self, key: impl Into<String>, value: Option<T>) -> Self {
        match value {
            Some(value) => self.insert(key, value),
            None => self,
        }
    }

    /// Freeze the entries.
    pub fn build(self) -> Extras {
        Extras {
            entries: Rc::new(self.entries),
        }
    }
}

/// Build [`Extras`] from `key => value` pairs.
///
/// ```
/// let extras = stackline::extras! { "page" => 3_u32 };
/// assert_eq!(extras.get("page", 0_u32), 3);
/// assert!(stackline::extras!().is_empty());
/// ```
#[macro_export]
macro_rules! extras {
    () => {
        $crate::Extras::new()
    };
    ($($key:expr => $value:expr),+ $(,)?) => {
        $crate::Extras::builder()$(.insert($key, $value))+.build()
    };
}
