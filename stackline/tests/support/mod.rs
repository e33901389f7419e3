// Copyright 2025 the Stackline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Recording panels, callback and animator shared by the integration tests.

#![allow(dead_code, reason = "not every test file uses every helper")]
#![allow(unreachable_pub, reason = "helpers are shared between test binaries")]

use std::cell::RefCell;
use std::rc::Rc;

use stackline::{
    Animator, Completion, Extras, ExtrasBuilder, HostId, Immediate, LifecycleStage,
    NavigationCallback, NavigationController, Options, Panel, PanelBehavior, PanelContext,
    PanelError, PanelFactory, PanelList, StartRequest,
};

pub const HOST: HostId = HostId::new(1);

/// Ordered log of hooks and callbacks.
#[derive(Clone, Debug, Default)]
pub struct Journal(Rc<RefCell<Vec<String>>>);

impl Journal {
    pub fn push(&self, entry: impl Into<String>) {
        self.0.borrow_mut().push(entry.into());
    }

    /// Everything recorded so far; the journal is left empty.
    pub fn take(&self) -> Vec<String> {
        std::mem::take(&mut *self.0.borrow_mut())
    }

    pub fn count(&self, entry: &str) -> usize {
        self.0.borrow().iter().filter(|e| *e == entry).count()
    }
}

/// Records every hook as `NAME.on_xxx`, failing the stage named by the `fail_on` extra.
pub struct Probe {
    name: String,
    journal: Journal,
    fail_on: Option<LifecycleStage>,
}

impl Probe {
    fn record(&self, stage: LifecycleStage) -> Result<(), PanelError> {
        self.journal.push(format!("{}.{stage}", self.name));
        if self.fail_on == Some(stage) {
            return Err(PanelError::failed(format!("{} refused {stage}", self.name)));
        }
        Ok(())
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl PanelBehavior for Probe {
    fn on_create(&mut self, _cx: &PanelContext) -> Result<(), PanelError> {
        self.record(LifecycleStage::Create)
    }

    fn on_resume(&mut self, _cx: &PanelContext) -> Result<(), PanelError> {
        self.record(LifecycleStage::Resume)
    }

    fn on_pause(&mut self, _cx: &PanelContext) -> Result<(), PanelError> {
        self.record(LifecycleStage::Pause)
    }

    fn on_destroy(&mut self, _cx: &PanelContext) -> Result<(), PanelError> {
        self.record(LifecycleStage::Destroy)
    }

    fn on_activity_result(
        &mut self,
        cx: &PanelContext,
        request_code: i32,
        result_code: i32,
        _data: &Extras,
    ) -> bool {
        self.journal
            .push(format!("{}.result({request_code},{result_code})", self.name));
        cx.get_extra("consume_results", false)
    }
}

pub fn probe() -> PanelFactory {
    PanelFactory::new("probe", |cx| {
        let journal = cx
            .extras()
            .get_ref::<Journal>("journal")
            .cloned()
            .ok_or_else(|| PanelError::missing_extra("journal"))?;
        Ok(Box::new(Probe {
            name: cx.extras().get_str("name").unwrap_or("?").to_owned(),
            journal,
            fail_on: cx.extras().get_ref::<LifecycleStage>("fail_on").copied(),
        }))
    })
}

fn name_of(extras: &Extras) -> &str {
    extras.get_str("name").unwrap_or("?")
}

/// Records callbacks as `before_start:NAME` and so on.
pub struct Recorder(pub Journal);

impl NavigationCallback for Recorder {
    fn before_start(&self, request: &StartRequest) {
        self.0.push(format!("before_start:{}", name_of(&request.extras)));
    }

    fn after_start(&self, request: &StartRequest, _panel: &Panel) {
        self.0.push(format!("after_start:{}", name_of(&request.extras)));
    }

    fn before_finish(&self, panel: &Panel) {
        self.0.push(format!("before_finish:{}", name_of(panel.extras())));
    }

    fn after_finish(&self, panel: &Panel) {
        self.0.push(format!("after_finish:{}", name_of(panel.extras())));
    }
}

/// Completions held by a [`Manual`] animator.
#[derive(Clone, Debug, Default)]
pub struct Pending(Rc<RefCell<Vec<Completion>>>);

impl Pending {
    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    /// Fire everything held, oldest first.
    pub fn fire_all(&self) {
        let held = std::mem::take(&mut *self.0.borrow_mut());
        for done in held {
            done.complete();
        }
    }

    /// Drop everything held without firing.
    pub fn drop_all(&self) {
        let held = std::mem::take(&mut *self.0.borrow_mut());
        drop(held);
    }
}

/// Animator that holds completions until the test fires them.
#[derive(Debug, Default)]
pub struct Manual(pub Pending);

impl Animator for Manual {
    fn animate_for_starting(&mut self, _current: &Panel, _next: &Panel, done: Completion) {
        self.0.0.borrow_mut().push(done);
    }

    fn animate_for_finishing(&mut self, _current: &Panel, _next: &Panel, done: Completion) {
        self.0.0.borrow_mut().push(done);
    }
}

pub struct Harness {
    pub nav: NavigationController<PanelList>,
    pub journal: Journal,
    pub pending: Pending,
}

impl Harness {
    /// Animated transitions wait for [`Pending::fire_all`].
    pub fn new() -> Self {
        let pending = Pending::default();
        Self::with_animator(Manual(pending.clone()), pending)
    }

    /// Animated transitions complete on the spot.
    pub fn immediate() -> Self {
        Self::with_animator(Immediate, Pending::default())
    }

    fn with_animator(animator: impl Animator + 'static, pending: Pending) -> Self {
        let journal = Journal::default();
        let nav = NavigationController::builder(HOST, PanelList::new())
            .animator(animator)
            .callback(Rc::new(Recorder(journal.clone())))
            .build();
        Self {
            nav,
            journal,
            pending,
        }
    }

    pub fn extras(&self, name: &str) -> ExtrasBuilder {
        Extras::builder()
            .insert("journal", self.journal.clone())
            .insert("name", name.to_owned())
    }

    /// Start `name` without animation.
    pub fn start(&self, name: &str) -> Option<Panel> {
        self.start_with(name, Options::new().no_animation())
    }

    pub fn start_with(&self, name: &str, options: Options) -> Option<Panel> {
        self.nav
            .start_panel(&probe(), options, self.extras(name).build())
    }

    /// Start each name in turn without animation, then clear the journal.
    pub fn stack(&self, names: &[&str]) -> Vec<Panel> {
        let panels = names
            .iter()
            .map(|name| self.start(name).expect("start"))
            .collect();
        self.journal.take();
        panels
    }

    pub fn names(&self) -> Vec<String> {
        self.nav
            .get_panels()
            .iter()
            .map(|p| p.extras().get_str("name").unwrap_or("?").to_owned())
            .collect()
    }

    pub fn visible(&self) -> Vec<stackline::PanelId> {
        self.nav.with_container(|c| {
            use stackline::Container;
            c.panels()
                .into_iter()
                .filter(|p| c.is_panel_visible(*p))
                .collect()
        })
    }
}
