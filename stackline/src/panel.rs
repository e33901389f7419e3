// Copyright 2025 the Stackline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Panels: navigable content units with an Activity-like lifecycle.
//!
//! ## Overview
//!
//! A panel is split in two halves:
//!
//! - [`PanelBehavior`] is what you implement. It owns the panel's content and overrides
//!   whichever hooks it cares about.
//! - [`Panel`] is the handle the controller hands back. It owns the behavior, the frozen
//!   [`Extras`], and the lifecycle bookkeeping (`is_top`, state), which it applies
//!   around every hook so an override can never get it wrong.
//!
//! ## Lifecycle
//!
//! ```text
//! created ──resume──▶ resumed ──pause──▶ paused ──resume──▶ resumed …
//!    │                   │                 │
//!    └───────────────────┴──── destroy ────┴──▶ destroyed (terminal)
//! ```
//!
//! `on_create` runs once, inside construction. `on_resume`/`on_pause` run on every
//! visibility change. `on_destroy` runs exactly once, after the panel has left the
//! container; the behavior is dropped right after it, even when the hook fails.
//!
//! ## Talking to the controller
//!
//! Panels never call their controller. [`PanelContext::finish`] and
//! [`PanelContext::start_sibling`] post signals on the controller's
//! [`SignalBus`](crate::signal::SignalBus); the controller acts on them in
//! [`NavigationController::process_signals`](crate::NavigationController::process_signals).

use alloc::boxed::Box;
use alloc::rc::Rc;
use core::any::Any;
use core::cell::{Cell, RefCell};
use core::sync::atomic::{AtomicU64, Ordering};

use crate::controller::ControllerId;
use crate::error::PanelError;
use crate::extras::Extras;
use crate::host::HostId;
use crate::signal::{PanelSignal, SignalSender};

/// Process-unique panel identifier, used for logging and signal scoping.
///
/// Panel identity itself is the [`Panel`] handle; ids are never reused.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct PanelId(u64);

static NEXT_PANEL_ID: AtomicU64 = AtomicU64::new(1);

impl PanelId {
    pub(crate) fn next() -> Self {
        Self(NEXT_PANEL_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Raw value.
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl core::fmt::Display for PanelId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "panel#{}", self.0)
    }
}

/// Where a panel is in its lifecycle.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum PanelState {
    /// Constructed, `on_create` done, never shown.
    Created,
    /// Visible on top of the stack.
    Resumed,
    /// Hidden, or covered by another panel.
    Paused,
    /// Removed for good. Terminal.
    Destroyed,
}

/// A lifecycle hook, as reported in [`NavError`](crate::NavError).
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum LifecycleStage {
    /// `on_create`.
    Create,
    /// `on_resume`.
    Resume,
    /// `on_pause`.
    Pause,
    /// `on_destroy`.
    Destroy,
}

impl core::fmt::Display for LifecycleStage {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(match self {
            Self::Create => "on_create",
            Self::Resume => "on_resume",
            Self::Pause => "on_pause",
            Self::Destroy => "on_destroy",
        })
    }
}

/// The overridable half of a panel.
///
/// Every hook has a default. Lifecycle hooks are fallible; a failure is logged by the
/// controller at the operation boundary and never reaches the caller.
pub trait PanelBehavior: Any {
    /// Runs once while the panel is constructed. An error aborts the start.
    fn on_create(&mut self, _cx: &PanelContext) -> Result<(), PanelError> {
        Ok(())
    }

    /// The panel became the visible top. `is_top` is already true.
    fn on_resume(&mut self, _cx: &PanelContext) -> Result<(), PanelError> {
        Ok(())
    }

    /// The panel stopped being the visible top. `is_top` is already false.
    fn on_pause(&mut self, _cx: &PanelContext) -> Result<(), PanelError> {
        Ok(())
    }

    /// The panel left its container for good.
    ///
    /// Release external resources here. The behavior itself is dropped right after
    /// this returns, whether it succeeded or not.
    fn on_destroy(&mut self, _cx: &PanelContext) -> Result<(), PanelError> {
        Ok(())
    }

    /// Back navigation. The default finishes the panel and reports it handled.
    ///
    /// Return `false` to let the host handle it.
    fn on_back_pressed(&mut self, cx: &PanelContext) -> bool {
        cx.finish();
        true
    }

    /// A result delivered to the host. Return `true` if the panel consumed it.
    fn on_activity_result(
        &mut self,
        _cx: &PanelContext,
        _request_code: i32,
        _result_code: i32,
        _data: &Extras,
    ) -> bool {
        false
    }
}

/// A panel type with a standard constructor, usable with [`PanelFactory::of`].
pub trait PanelType: PanelBehavior + Sized {
    /// Build the panel from its context. Read parameters from [`PanelContext::extras`].
    fn construct(cx: &PanelContext) -> Result<Self, PanelError>;
}

type BuildFn = dyn Fn(&PanelContext) -> Result<Box<dyn PanelBehavior>, PanelError>;

/// Constructs panels of one type.
///
/// This is the construction contract: given the host context, the owning controller
/// and the extras (all carried by [`PanelContext`]), return the panel or an error.
#[derive(Clone)]
pub struct PanelFactory {
    name: &'static str,
    build: Rc<BuildFn>,
}

impl core::fmt::Debug for PanelFactory {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("PanelFactory")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

impl PanelFactory {
    /// Factory from a closure.
    pub fn new<F>(name: &'static str, build: F) -> Self
    where
        F: Fn(&PanelContext) -> Result<Box<dyn PanelBehavior>, PanelError> + 'static,
    {
        Self {
            name,
            build: Rc::new(build),
        }
    }

    /// Factory for a [`PanelType`].
    pub fn of<T: PanelType>() -> Self {
        Self::new(core::any::type_name::<T>(), |cx| {
            T::construct(cx).map(|panel| Box::new(panel) as Box<dyn PanelBehavior>)
        })
    }

    /// Name used in logs and errors.
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub(crate) fn build(&self, cx: &PanelContext) -> Result<Box<dyn PanelBehavior>, PanelError> {
        (self.build)(cx)
    }
}

/// Everything a panel knows about where it lives.
#[derive(Clone, Debug)]
pub struct PanelContext {
    panel: PanelId,
    host: HostId,
    controller: ControllerId,
    extras: Extras,
    signals: SignalSender,
}

impl PanelContext {
    pub(crate) fn new(
        panel: PanelId,
        host: HostId,
        controller: ControllerId,
        extras: Extras,
        signals: SignalSender,
    ) -> Self {
        Self {
            panel,
            host,
            controller,
            extras,
            signals,
        }
    }

    /// This panel's id.
    pub fn id(&self) -> PanelId {
        self.panel
    }

    /// The host the owning controller is bound to.
    pub fn host(&self) -> HostId {
        self.host
    }

    /// The owning controller.
    pub fn controller(&self) -> ControllerId {
        self.controller
    }

    /// Parameters supplied at start.
    pub fn extras(&self) -> &Extras {
        &self.extras
    }

    /// Shorthand for [`Extras::get`].
    pub fn get_extra<T: Any + Clone>(&self, key: &str, default: T) -> T {
        self.extras.get(key, default)
    }

    /// Ask the owning controller to finish this panel.
    ///
    /// Nothing happens until the controller processes its signals.
    pub fn finish(&self) {
        self.signals.send(PanelSignal::Finish);
    }

    /// Ask the owning controller to start another panel on top of this one.
    pub fn start_sibling(&self, factory: PanelFactory, extras: Extras) {
        self.signals
            .send(PanelSignal::StartSibling { factory, extras });
    }
}

struct PanelInner {
    cx: PanelContext,
    type_name: &'static str,
    state: Cell<PanelState>,
    behavior: RefCell<Option<Box<dyn PanelBehavior>>>,
}

/// Handle to a started panel.
///
/// Handles compare by identity: two handles are equal only if they refer to the same
/// panel instance.
#[derive(Clone)]
pub struct Panel {
    inner: Rc<PanelInner>,
}

impl PartialEq for Panel {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Eq for Panel {}

impl core::fmt::Debug for Panel {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Panel")
            .field("id", &self.inner.cx.panel)
            .field("type", &self.inner.type_name)
            .field("state", &self.inner.state.get())
            .finish_non_exhaustive()
    }
}

impl Panel {
    /// Run the factory and `on_create`. The panel starts in [`PanelState::Created`].
    pub(crate) fn create(factory: &PanelFactory, cx: PanelContext) -> Result<Self, PanelError> {
        let mut behavior = factory.build(&cx)?;
        behavior.on_create(&cx)?;
        log::trace!("{} created ({})", cx.panel, factory.name());
        Ok(Self {
            inner: Rc::new(PanelInner {
                cx,
                type_name: factory.name(),
                state: Cell::new(PanelState::Created),
                behavior: RefCell::new(Some(behavior)),
            }),
        })
    }

    /// This panel's id.
    pub fn id(&self) -> PanelId {
        self.inner.cx.panel
    }

    /// Name of the factory that built this panel.
    pub fn type_name(&self) -> &'static str {
        self.inner.type_name
    }

    /// The panel's context.
    pub fn context(&self) -> &PanelContext {
        &self.inner.cx
    }

    /// Parameters supplied at start.
    pub fn extras(&self) -> &Extras {
        &self.inner.cx.extras
    }

    /// Parameter `key`, or `default` if absent.
    pub fn get_extra<T: Any + Clone>(&self, key: &str, default: T) -> T {
        self.inner.cx.extras.get(key, default)
    }

    /// Current lifecycle state.
    pub fn state(&self) -> PanelState {
        self.inner.state.get()
    }

    /// True between `on_resume` and the next `on_pause`/`on_destroy`.
    pub fn is_top(&self) -> bool {
        self.state() == PanelState::Resumed
    }

    /// Same as [`Panel::is_top`].
    pub fn is_resumed(&self) -> bool {
        self.is_top()
    }

    /// Returns true once `on_destroy` has run.
    pub fn is_destroyed(&self) -> bool {
        self.state() == PanelState::Destroyed
    }

    /// Ask the owning controller to finish this panel.
    pub fn finish(&self) {
        self.inner.cx.finish();
    }

    /// Ask the owning controller to start another panel.
    pub fn start_sibling(&self, factory: PanelFactory, extras: Extras) {
        self.inner.cx.start_sibling(factory, extras);
    }

    /// Borrow the behavior as its concrete type.
    ///
    /// Returns `None` if the type does not match, the panel is destroyed, or a hook
    /// of this panel is currently running.
    pub fn with_behavior<B: PanelBehavior, R>(&self, f: impl FnOnce(&B) -> R) -> Option<R> {
        let slot = self.inner.behavior.try_borrow().ok()?;
        let behavior: &dyn Any = &**slot.as_ref()?;
        behavior.downcast_ref::<B>().map(f)
    }

    /// Mutably borrow the behavior as its concrete type.
    pub fn with_behavior_mut<B: PanelBehavior, R>(
        &self,
        f: impl FnOnce(&mut B) -> R,
    ) -> Option<R> {
        let mut slot = self.inner.behavior.try_borrow_mut().ok()?;
        let behavior: &mut dyn Any = &mut **slot.as_mut()?;
        behavior.downcast_mut::<B>().map(f)
    }

    pub(crate) fn resume(&self) -> Result<(), PanelError> {
        if self.is_destroyed() {
            return Ok(());
        }
        self.inner.state.set(PanelState::Resumed);
        log::trace!("{} resumed", self.id());
        self.call(|b, cx| b.on_resume(cx)).unwrap_or(Ok(()))
    }

    pub(crate) fn pause(&self) -> Result<(), PanelError> {
        if self.is_destroyed() {
            return Ok(());
        }
        self.inner.state.set(PanelState::Paused);
        log::trace!("{} paused", self.id());
        self.call(|b, cx| b.on_pause(cx)).unwrap_or(Ok(()))
    }

    /// Run `on_destroy` once and drop the behavior, whatever the hook returns.
    pub(crate) fn destroy(&self) -> Result<(), PanelError> {
        if self.is_destroyed() {
            return Ok(());
        }
        self.inner.state.set(PanelState::Destroyed);
        let behavior = match self.inner.behavior.try_borrow_mut() {
            Ok(mut slot) => slot.take(),
            Err(_) => {
                log::warn!("{} destroyed from inside its own hook", self.id());
                None
            }
        };
        log::trace!("{} destroyed", self.id());
        match behavior {
            Some(mut behavior) => behavior.on_destroy(&self.inner.cx),
            None => Ok(()),
        }
    }

    pub(crate) fn back_pressed(&self) -> bool {
        self.call(|b, cx| b.on_back_pressed(cx)).unwrap_or(false)
    }

    pub(crate) fn activity_result(&self, request_code: i32, result_code: i32, data: &Extras) -> bool {
        self.call(|b, cx| b.on_activity_result(cx, request_code, result_code, data))
            .unwrap_or(false)
    }

    /// Invoke a hook; `None` if there is no behavior to call or the panel is re-entered.
    fn call<R>(&self, hook: impl FnOnce(&mut dyn PanelBehavior, &PanelContext) -> R) -> Option<R> {
        let Ok(mut slot) = self.inner.behavior.try_borrow_mut() else {
            log::warn!("{} re-entered while one of its hooks was running", self.id());
            return None;
        };
        let behavior = slot.as_mut()?;
        Some(hook(&mut **behavior, &self.inner.cx))
    }
}
