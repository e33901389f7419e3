// Copyright 2025 the Stackline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The navigation controller.
//!
//! ## Stack and container
//!
//! A [`NavigationController`] owns an ordered stack of [`Panel`]s and the [`Container`]
//! they are mounted in. The two are always mutated together, before any hook runs:
//! a panel is mounted exactly while it is stacked, plus the length of an animated
//! finish. The last stacked panel is the top; once its transition has completed it is
//! the only resumed panel and the only visible one.
//!
//! ## Transitions
//!
//! Starting a panel on a non-empty stack and finishing the top of a stack with more
//! than one panel are two-phase. The first phase mounts and stacks (or unstacks) and
//! returns. The second phase, the transition step, pauses the outgoing panel and
//! resumes the incoming one; it runs right away with [`Options::no_animation`], and
//! otherwise when the [`Animator`] fires its [`Completion`].
//!
//! While a two-phase start is in flight the controller is *transitioning*, and further
//! starts are rejected. Finishes and [`bring_to_front`] are never rejected, and an
//! animated finish does not hold the guard. A transition step whose incoming panel is
//! no longer the top leaves visibility and lifecycle alone, and a start whose panel was
//! finished meanwhile gets no `after_start`.
//!
//! ## Failures
//!
//! Nothing here panics or propagates a hook failure by default. Construction failures
//! are logged and [`start_panel`] returns `None`; failing lifecycle hooks are logged and
//! the rest of the sequence still runs. [`try_start_panel`] and [`try_finish_panel`]
//! return the first failure as well.
//!
//! [`bring_to_front`]: NavigationController::bring_to_front
//! [`start_panel`]: NavigationController::start_panel
//! [`try_start_panel`]: NavigationController::try_start_panel
//! [`try_finish_panel`]: NavigationController::try_finish_panel

use alloc::boxed::Box;
use alloc::rc::{Rc, Weak};
use alloc::vec::Vec;
use core::cell::{Cell, RefCell};
use core::sync::atomic::{AtomicU32, Ordering};
use core::time::Duration;

use crate::animation::{Animator, Completion, Immediate};
use crate::container::Container;
use crate::error::{NavError, PanelError, StartError};
use crate::extras::Extras;
use crate::host::{HostEvent, HostId, HostListener, HostSignal, LifecycleHub, ListenerId};
use crate::panel::{LifecycleStage, Panel, PanelContext, PanelFactory, PanelId};
use crate::signal::{PanelSignal, SignalBus, SignalKind};

/// Process-unique controller identifier.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct ControllerId(u32);

static NEXT_CONTROLLER_ID: AtomicU32 = AtomicU32::new(1);

impl ControllerId {
    pub(crate) fn next() -> Self {
        Self(NEXT_CONTROLLER_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Raw value.
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl core::fmt::Display for ControllerId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "controller#{}", self.0)
    }
}

/// Per-call navigation options.
///
/// ```
/// use stackline::Options;
///
/// let options = Options::new().new_stack().no_animation();
/// assert!(options.new_stack && options.no_animation);
/// assert_eq!(Options::default(), Options::new());
/// ```
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct Options {
    /// Finish every stacked panel before starting the new one.
    pub new_stack: bool,
    /// Run the transition step immediately instead of through the animator.
    pub no_animation: bool,
}

impl Options {
    /// No options set.
    pub const fn new() -> Self {
        Self {
            new_stack: false,
            no_animation: false,
        }
    }

    /// Set [`Options::new_stack`].
    #[must_use]
    pub const fn new_stack(mut self) -> Self {
        self.new_stack = true;
        self
    }

    /// Set [`Options::no_animation`].
    #[must_use]
    pub const fn no_animation(mut self) -> Self {
        self.no_animation = true;
        self
    }
}

/// A start request as seen by [`NavigationCallback`].
#[derive(Clone, Debug)]
pub struct StartRequest {
    /// What is being started.
    pub factory: PanelFactory,
    /// Options of the call.
    pub options: Options,
    /// Parameters handed to the panel.
    pub extras: Extras,
}

/// Observes starts and finishes. Every method defaults to doing nothing.
///
/// `before_*` runs once the request is accepted and, for starts, the panel is
/// constructed. `after_*` runs at the end of the transition step.
pub trait NavigationCallback {
    /// A panel is about to be stacked.
    fn before_start(&self, _request: &StartRequest) {}

    /// `panel` is now the resumed top.
    fn after_start(&self, _request: &StartRequest, _panel: &Panel) {}

    /// `panel` is about to be unstacked.
    fn before_finish(&self, _panel: &Panel) {}

    /// `panel` has been destroyed.
    fn after_finish(&self, _panel: &Panel) {}
}

/// The default callback.
#[derive(Copy, Clone, Debug, Default)]
pub struct NoCallback;

impl NavigationCallback for NoCallback {}

/// Remembers the first hook failure of a sequence and logs all of them.
#[derive(Default)]
struct Failures {
    first: Option<NavError>,
}

impl Failures {
    fn note(&mut self, panel: &Panel, stage: LifecycleStage, result: Result<(), PanelError>) {
        let Err(source) = result else {
            return;
        };
        log::error!("{}: {stage} failed: {source}", panel.id());
        if self.first.is_none() {
            self.first = Some(NavError {
                panel: panel.id(),
                stage,
                source,
            });
        }
    }

    fn into_result(self) -> Result<(), NavError> {
        self.first.map_or(Ok(()), Err)
    }
}

#[derive(Default)]
struct Stack {
    /// Bottom to top.
    panels: Vec<Panel>,
    /// A start whose transition step has not run yet.
    starting: bool,
    /// Unstacked panels still mounted while their finish animates.
    leaving: Vec<Panel>,
}

struct Shared<C> {
    me: Weak<Self>,
    id: ControllerId,
    host: HostId,
    stack: RefCell<Stack>,
    container: RefCell<C>,
    animator: RefCell<Option<Box<dyn Animator>>>,
    callback: Rc<dyn NavigationCallback>,
    bus: SignalBus,
    hub: Option<LifecycleHub>,
    listener: Cell<Option<ListenerId>>,
}

/// Configures and builds a [`NavigationController`].
pub struct ControllerBuilder<C> {
    host: HostId,
    container: C,
    animator: Box<dyn Animator>,
    callback: Rc<dyn NavigationCallback>,
    bus: Option<SignalBus>,
    hub: Option<LifecycleHub>,
}

impl<C> core::fmt::Debug for ControllerBuilder<C> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ControllerBuilder")
            .field("host", &self.host)
            .field("bus", &self.bus)
            .field("hub", &self.hub)
            .finish_non_exhaustive()
    }
}

impl<C: Container + 'static> ControllerBuilder<C> {
    /// A builder bound to `host` and mounting into `container`.
    pub fn new(host: HostId, container: C) -> Self {
        Self {
            host,
            container,
            animator: Box::new(Immediate),
            callback: Rc::new(NoCallback),
            bus: None,
            hub: None,
        }
    }

    /// Animate two-phase transitions with `animator`. Defaults to [`Immediate`].
    #[must_use]
    pub fn animator(mut self, animator: impl Animator + 'static) -> Self {
        self.animator = Box::new(animator);
        self
    }

    /// Report starts and finishes to `callback`.
    #[must_use]
    pub fn callback(mut self, callback: Rc<dyn NavigationCallback>) -> Self {
        self.callback = callback;
        self
    }

    /// Share `bus` with other controllers. Each controller gets its own bus otherwise.
    #[must_use]
    pub fn signal_bus(mut self, bus: SignalBus) -> Self {
        self.bus = Some(bus);
        self
    }

    /// Follow host lifecycle signals from `hub`.
    #[must_use]
    pub fn lifecycle(mut self, hub: &LifecycleHub) -> Self {
        self.hub = Some(hub.clone());
        self
    }

    /// Build the controller and subscribe it to the lifecycle hub, if any.
    pub fn build(self) -> NavigationController<C> {
        let id = ControllerId::next();
        let shared = Rc::new_cyclic(|me| Shared {
            me: me.clone(),
            id,
            host: self.host,
            stack: RefCell::new(Stack::default()),
            container: RefCell::new(self.container),
            animator: RefCell::new(Some(self.animator)),
            callback: self.callback,
            bus: self.bus.unwrap_or_default(),
            hub: self.hub,
            listener: Cell::new(None),
        });
        if let Some(hub) = &shared.hub {
            let weak: Weak<Shared<C>> = Rc::downgrade(&shared);
            let weak: Weak<dyn HostListener> = weak;
            shared.listener.set(Some(hub.subscribe(weak)));
        }
        log::debug!("{id}: bound to host {}", self.host.get());
        NavigationController { shared }
    }
}

/// Manages a stack of panels inside one container.
///
/// Cloning is cheap; clones drive the same controller.
///
/// ```
/// use stackline::{extras, HostId, NavigationController, Options, PanelFactory, PanelList};
/// # use stackline::{PanelBehavior, PanelContext, PanelError, PanelType};
/// # struct Page;
/// # impl PanelBehavior for Page {}
/// # impl PanelType for Page {
/// #     fn construct(_cx: &PanelContext) -> Result<Self, PanelError> { Ok(Page) }
/// # }
///
/// let nav = NavigationController::new(HostId::new(1), PanelList::new());
/// let home = nav.start_panel(&PanelFactory::of::<Page>(), Options::new(), extras!()).unwrap();
/// let detail = nav
///     .start_panel(&PanelFactory::of::<Page>(), Options::new(), extras! { "id" => 7_u32 })
///     .unwrap();
/// assert!(detail.is_top() && !home.is_top());
///
/// nav.finish_panel(&detail, Options::new());
/// assert!(home.is_top());
/// assert!(detail.is_destroyed());
/// ```
pub struct NavigationController<C: Container + 'static> {
    shared: Rc<Shared<C>>,
}

impl<C: Container + 'static> Clone for NavigationController<C> {
    fn clone(&self) -> Self {
        Self {
            shared: self.shared.clone(),
        }
    }
}

impl<C: Container + 'static> core::fmt::Debug for NavigationController<C> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let stack = self.shared.stack.borrow();
        let ids: Vec<_> = stack.panels.iter().map(Panel::id).collect();
        f.debug_struct("NavigationController")
            .field("id", &self.shared.id)
            .field("host", &self.shared.host)
            .field("panels", &ids)
            .field("starting", &stack.starting)
            .finish_non_exhaustive()
    }
}

impl<C: Container + 'static> NavigationController<C> {
    /// A controller with the default animator and no callback.
    pub fn new(host: HostId, container: C) -> Self {
        ControllerBuilder::new(host, container).build()
    }

    /// Start configuring a controller.
    pub fn builder(host: HostId, container: C) -> ControllerBuilder<C> {
        ControllerBuilder::new(host, container)
    }

    /// This controller's id.
    pub fn id(&self) -> ControllerId {
        self.shared.id
    }

    /// The host this controller is bound to.
    pub fn host(&self) -> HostId {
        self.shared.host
    }

    /// The bus panels post their signals on.
    pub fn signal_bus(&self) -> &SignalBus {
        &self.shared.bus
    }

    /// Construct a panel and push it on top of the stack.
    ///
    /// Returns `None`, after logging, if another start is in flight or construction
    /// fails. See [`try_start_panel`](Self::try_start_panel).
    pub fn start_panel(
        &self,
        factory: &PanelFactory,
        options: Options,
        extras: Extras,
    ) -> Option<Panel> {
        self.try_start_panel(factory, options, extras).ok()
    }

    /// Construct a panel and push it on top of the stack.
    ///
    /// On an empty stack the panel is resumed immediately. Otherwise it is mounted above
    /// the current top, and the current top is hidden and paused, and the new panel
    /// resumed, once the transition step runs.
    ///
    /// The returned panel is stacked even when one of its later hooks fails; such
    /// failures are only logged.
    pub fn try_start_panel(
        &self,
        factory: &PanelFactory,
        options: Options,
        extras: Extras,
    ) -> Result<Panel, StartError> {
        let shared = &self.shared;
        {
            let mut stack = shared.stack.borrow_mut();
            if stack.starting {
                log::debug!(
                    "{}: start of `{}` rejected, another start is in flight",
                    shared.id,
                    factory.name()
                );
                return Err(StartError::Busy);
            }
            stack.starting = true;
        }

        if options.new_stack {
            self.finish_all_panels();
        }

        let id = PanelId::next();
        shared.bus.subscribe(shared.id, id, SignalKind::Finish);
        shared.bus.subscribe(shared.id, id, SignalKind::StartSibling);
        let cx = PanelContext::new(
            id,
            shared.host,
            shared.id,
            extras.clone(),
            shared.bus.sender(id),
        );
        let panel = match Panel::create(factory, cx) {
            Ok(panel) => panel,
            Err(source) => {
                shared.bus.unsubscribe_panel(id);
                self.release();
                log::error!("{}: unable to start `{}`: {source}", shared.id, factory.name());
                return Err(StartError::Construction {
                    panel: factory.name(),
                    source,
                });
            }
        };

        let request = StartRequest {
            factory: factory.clone(),
            options,
            extras,
        };
        shared.callback.before_start(&request);

        let current = {
            let mut stack = shared.stack.borrow_mut();
            let current = stack.panels.last().cloned();
            stack.panels.push(panel.clone());
            current
        };
        shared.container.borrow_mut().mount(id);

        match current {
            None => {
                let mut failures = Failures::default();
                failures.note(&panel, LifecycleStage::Resume, panel.resume());
                self.release();
                shared.callback.after_start(&request, &panel);
            }
            Some(current) if options.no_animation => {
                self.complete_start(&current, &panel, &request);
            }
            Some(current) => {
                let weak = Rc::downgrade(shared);
                let (outgoing, incoming) = (current.clone(), panel.clone());
                let done = Completion::new("start", move || {
                    if let Some(nav) = Self::upgrade(&weak) {
                        nav.complete_start(&outgoing, &incoming, &request);
                    }
                });
                self.animate(
                    |animator, done| animator.animate_for_starting(&current, &panel, done),
                    done,
                );
            }
        }
        Ok(panel)
    }

    fn complete_start(&self, current: &Panel, next: &Panel, request: &StartRequest) {
        let shared = &self.shared;
        if self.top().as_ref() == Some(next) {
            shared
                .container
                .borrow_mut()
                .set_panel_visible(current.id(), false);
            let mut failures = Failures::default();
            failures.note(current, LifecycleStage::Pause, current.pause());
            failures.note(next, LifecycleStage::Resume, next.resume());
        } else {
            log::debug!("{}: {} left the top before its start completed", shared.id, next.id());
        }
        self.release();
        if next.is_destroyed() {
            return;
        }
        shared.callback.after_start(request, next);
    }

    /// Remove `panel` from the stack and destroy it. Failures are logged.
    ///
    /// See [`try_finish_panel`](Self::try_finish_panel).
    pub fn finish_panel(&self, panel: &Panel, options: Options) {
        let _ = self.try_finish_panel(panel, options);
    }

    /// Remove `panel` from the stack and destroy it.
    ///
    /// - Not stacked: nothing happens.
    /// - The only panel: it is unmounted, paused and destroyed.
    /// - The top of a larger stack: the panel below is shown, and the transition step
    ///   (unmount, pause and destroy the old top, resume the new one) runs immediately
    ///   or when the animation completes.
    /// - Buried: it is unstacked and unmounted, then paused and destroyed. No
    ///   animation, and no other panel is touched.
    ///
    /// Returns the first hook failure among the steps that ran before returning.
    pub fn try_finish_panel(&self, panel: &Panel, options: Options) -> Result<(), NavError> {
        let shared = &self.shared;
        if !self.contains(panel) {
            log::debug!("{}: finish of unstacked {} ignored", shared.id, panel.id());
            return Ok(());
        }
        shared.callback.before_finish(panel);

        let previous = {
            let mut stack = shared.stack.borrow_mut();
            let Some(position) = stack.panels.iter().position(|p| p == panel) else {
                return Ok(());
            };
            let was_top = position + 1 == stack.panels.len();
            stack.panels.remove(position);
            let previous = if was_top {
                stack.panels.last().cloned()
            } else {
                None
            };
            if previous.is_some() {
                stack.leaving.push(panel.clone());
            }
            previous
        };

        let mut failures = Failures::default();
        match previous {
            None => {
                shared.container.borrow_mut().unmount(panel.id());
                failures.note(panel, LifecycleStage::Pause, panel.pause());
                self.dispose(panel, &mut failures);
                shared.callback.after_finish(panel);
            }
            Some(previous) => {
                shared
                    .container
                    .borrow_mut()
                    .set_panel_visible(previous.id(), true);
                if options.no_animation {
                    self.complete_finish(panel, &previous, &mut failures);
                } else {
                    let weak = Rc::downgrade(shared);
                    let (outgoing, incoming) = (panel.clone(), previous.clone());
                    let done = Completion::new("finish", move || {
                        if let Some(nav) = Self::upgrade(&weak) {
                            nav.complete_finish(&outgoing, &incoming, &mut Failures::default());
                        }
                    });
                    self.animate(
                        |animator, done| animator.animate_for_finishing(panel, &previous, done),
                        done,
                    );
                }
            }
        }
        failures.into_result()
    }

    fn complete_finish(&self, current: &Panel, previous: &Panel, failures: &mut Failures) {
        let shared = &self.shared;
        shared.stack.borrow_mut().leaving.retain(|p| p != current);
        shared.container.borrow_mut().unmount(current.id());
        failures.note(current, LifecycleStage::Pause, current.pause());
        self.dispose(current, failures);
        if self.top().as_ref() == Some(previous) {
            failures.note(previous, LifecycleStage::Resume, previous.resume());
        }
        shared.callback.after_finish(current);
    }

    /// Move a stacked, mounted panel to the top without animation.
    ///
    /// The old top is hidden and paused, then `panel` is shown and resumed. Nothing
    /// happens if `panel` is not stacked, not mounted, or already the top.
    pub fn bring_to_front(&self, panel: &Panel) {
        let shared = &self.shared;
        if !shared.container.borrow().contains(panel.id()) {
            log::debug!("{}: {} is not mounted", shared.id, panel.id());
            return;
        }
        let old_top = {
            let mut stack = shared.stack.borrow_mut();
            let Some(position) = stack.panels.iter().position(|p| p == panel) else {
                log::debug!("{}: {} is not stacked", shared.id, panel.id());
                return;
            };
            if position + 1 == stack.panels.len() {
                return;
            }
            let old_top = stack.panels.last().cloned();
            let moved = stack.panels.remove(position);
            stack.panels.push(moved);
            old_top
        };
        let Some(old_top) = old_top else {
            return;
        };

        let mut failures = Failures::default();
        shared
            .container
            .borrow_mut()
            .set_panel_visible(old_top.id(), false);
        failures.note(&old_top, LifecycleStage::Pause, old_top.pause());
        shared
            .container
            .borrow_mut()
            .set_panel_visible(panel.id(), true);
        failures.note(panel, LifecycleStage::Resume, panel.resume());
    }

    /// Resume the top panel.
    pub fn on_resume(&self) {
        match self.top() {
            Some(top) => Failures::default().note(&top, LifecycleStage::Resume, top.resume()),
            None => log::debug!("{}: on_resume with an empty stack", self.shared.id),
        }
    }

    /// Pause the top panel.
    pub fn on_pause(&self) {
        match self.top() {
            Some(top) => Failures::default().note(&top, LifecycleStage::Pause, top.pause()),
            None => log::debug!("{}: on_pause with an empty stack", self.shared.id),
        }
    }

    /// Destroy every panel, top to bottom, and stop following host signals.
    ///
    /// Idempotent. The controller can still be used afterwards.
    pub fn on_destroy(&self) {
        self.drain();
        let shared = &self.shared;
        if let (Some(hub), Some(listener)) = (&shared.hub, shared.listener.take()) {
            hub.unsubscribe(listener);
            log::debug!("{}: detached from host {}", shared.id, shared.host.get());
        }
    }

    /// Pause the top panel if the container is visible, then destroy every panel.
    pub fn finish_all_panels(&self) {
        if self.is_visible() {
            self.on_pause();
        }
        self.drain();
    }

    fn drain(&self) {
        let shared = &self.shared;
        let mut failures = Failures::default();
        loop {
            let next = {
                let mut stack = shared.stack.borrow_mut();
                stack.leaving.pop().or_else(|| stack.panels.pop())
            };
            let Some(panel) = next else {
                break;
            };
            shared.container.borrow_mut().unmount(panel.id());
            self.dispose(&panel, &mut failures);
        }
    }

    fn dispose(&self, panel: &Panel, failures: &mut Failures) {
        failures.note(panel, LifecycleStage::Destroy, panel.destroy());
        self.shared.bus.unsubscribe_panel(panel.id());
    }

    /// Forward back navigation to the top panel.
    ///
    /// Returns false on an empty stack. Signals the panel posts are processed before
    /// returning, so the default handler finishes the top right away.
    pub fn on_back_pressed(&self) -> bool {
        let Some(top) = self.top() else {
            log::debug!("{}: back pressed with an empty stack", self.shared.id);
            return false;
        };
        let handled = top.back_pressed();
        self.process_signals();
        handled
    }

    /// Forward a host result to the top panel. Returns false on an empty stack.
    pub fn on_activity_result(&self, request_code: i32, result_code: i32, data: &Extras) -> bool {
        let Some(top) = self.top() else {
            log::debug!("{}: result {request_code} with an empty stack", self.shared.id);
            return false;
        };
        let handled = top.activity_result(request_code, result_code, data);
        self.process_signals();
        handled
    }

    /// Act on the signals panels of this controller have posted, in posting order.
    ///
    /// Returns the number of signals taken off the bus. Signals posted while this
    /// runs wait for the next call.
    pub fn process_signals(&self) -> usize {
        let batch = self.shared.bus.drain_for(self.shared.id);
        let count = batch.len();
        for (from, signal) in batch {
            let Some(panel) = self.panel(from) else {
                log::debug!("{}: {from} is no longer stacked", self.shared.id);
                continue;
            };
            log::trace!("{}: {from} -> {:?}", self.shared.id, signal.kind());
            match signal {
                PanelSignal::Finish => self.finish_panel(&panel, Options::new()),
                PanelSignal::StartSibling { factory, extras } => {
                    let _ = self.start_panel(&factory, Options::new(), extras);
                }
            }
        }
        count
    }

    /// Step the animator by `dt`, apply its placements and fire finished completions.
    ///
    /// Returns true while an animation is still running.
    pub fn advance_animations(&self, dt: Duration) -> bool {
        let shared = &self.shared;
        let taken = shared.animator.borrow_mut().take();
        let Some(mut animator) = taken else {
            return false;
        };
        let frame = animator.advance(dt);
        *shared.animator.borrow_mut() = Some(animator);

        if !frame.placements.is_empty() {
            let mut container = shared.container.borrow_mut();
            for (panel, placement) in frame.placements {
                container.set_placement(panel, placement);
            }
        }
        for done in frame.finished {
            done.complete();
        }
        shared
            .animator
            .borrow()
            .as_ref()
            .is_some_and(|a| a.is_animating())
    }

    fn animate(&self, run: impl FnOnce(&mut dyn Animator, Completion), done: Completion) {
        let taken = self.shared.animator.borrow_mut().take();
        let Some(mut animator) = taken else {
            log::warn!(
                "{}: animator re-entered, completing {} without animation",
                self.shared.id,
                done.label()
            );
            done.complete();
            return;
        };
        run(&mut *animator, done);
        *self.shared.animator.borrow_mut() = Some(animator);
        self.advance_animations(Duration::ZERO);
    }

    fn release(&self) {
        let mut stack = self.shared.stack.borrow_mut();
        stack.starting = false;
    }

    fn upgrade(weak: &Weak<Shared<C>>) -> Option<Self> {
        match weak.upgrade() {
            Some(shared) => Some(Self { shared }),
            None => {
                log::warn!("completion fired after its controller was dropped");
                None
            }
        }
    }

    /// Show or hide the container. Showing resumes the top, hiding pauses it.
    pub fn set_visible(&self, visible: bool) {
        {
            let mut container = self.shared.container.borrow_mut();
            if container.is_visible() == visible {
                return;
            }
            container.set_visible(visible);
        }
        if visible {
            self.on_resume();
        } else {
            self.on_pause();
        }
    }

    /// Container visibility.
    pub fn is_visible(&self) -> bool {
        self.shared.container.borrow().is_visible()
    }

    /// Snapshot of the stack, bottom to top.
    pub fn get_panels(&self) -> Vec<Panel> {
        self.shared.stack.borrow().panels.clone()
    }

    /// The top panel.
    pub fn top(&self) -> Option<Panel> {
        self.shared.stack.borrow().panels.last().cloned()
    }

    /// The stacked panel with `id`.
    pub fn panel(&self, id: PanelId) -> Option<Panel> {
        self.shared
            .stack
            .borrow()
            .panels
            .iter()
            .find(|p| p.id() == id)
            .cloned()
    }

    /// Returns true if `panel` is stacked here.
    pub fn contains(&self, panel: &Panel) -> bool {
        self.shared.stack.borrow().panels.contains(panel)
    }

    /// Number of stacked panels.
    pub fn len(&self) -> usize {
        self.shared.stack.borrow().panels.len()
    }

    /// Returns true if no panel is stacked.
    pub fn is_empty(&self) -> bool {
        self.shared.stack.borrow().panels.is_empty()
    }

    /// Returns true while a start or finish waits for its transition step.
    pub fn is_transitioning(&self) -> bool {
        self.shared.stack.borrow().starting
    }

    /// Inspect the container.
    ///
    /// Do not call back into the controller from `f`.
    pub fn with_container<R>(&self, f: impl FnOnce(&C) -> R) -> R {
        let container = self.shared.container.borrow();
        f(&container)
    }

    /// Mutate the container directly, for instance to resize a surface.
    ///
    /// Do not mount or unmount panels from `f`, and do not call back into the
    /// controller.
    pub fn with_container_mut<R>(&self, f: impl FnOnce(&mut C) -> R) -> R {
        let mut container = self.shared.container.borrow_mut();
        f(&mut container)
    }
}

impl<C: Container + 'static> HostListener for Shared<C> {
    fn on_host_event(&self, event: HostEvent) {
        if event.host != self.host {
            log::debug!(
                "{}: ignoring {:?} for host {}",
                self.id,
                event.signal,
                event.host.get()
            );
            return;
        }
        let Some(shared) = self.me.upgrade() else {
            return;
        };
        let nav = NavigationController { shared };
        match event.signal {
            HostSignal::Resumed => {
                if nav.is_visible() {
                    nav.on_resume();
                }
            }
            HostSignal::Paused => {
                if nav.is_visible() {
                    nav.on_pause();
                }
            }
            HostSignal::Destroyed => nav.on_destroy(),
        }
    }
}
