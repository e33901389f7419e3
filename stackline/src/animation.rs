// Copyright 2025 the Stackline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Transition animations.
//!
//! ## Completions
//!
//! Animated starts and finishes hand the [`Animator`] a [`Completion`]. The transition
//! step (pause the outgoing panel, resume the incoming one, release the start guard,
//! run the after-hook) only happens once the completion is fired.
//!
//! A completion is a move-only token: [`Completion::complete`] consumes it, so firing
//! twice does not compile. Dropping one without firing leaves the controller stuck in
//! its transition; the drop is logged at error level.
//!
//! ## Provided animators
//!
//! - [`Immediate`] fires every completion on the spot.
//! - [`SlideAnimator`] slides the incoming panel over the outgoing one. It is frame
//!   driven: the host calls
//!   [`NavigationController::advance_animations`](crate::NavigationController::advance_animations)
//!   once per frame, which applies the returned placements to the container and fires
//!   completions whose slide has ended.

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::time::Duration;

use kurbo::{Affine, Vec2};

use crate::panel::{Panel, PanelId};

/// Fires the rest of a transition. Must be completed exactly once.
#[must_use = "dropping a completion stalls the controller"]
pub struct Completion {
    label: &'static str,
    action: Option<Box<dyn FnOnce()>>,
}

impl core::fmt::Debug for Completion {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Completion")
            .field("label", &self.label)
            .field("pending", &self.action.is_some())
            .finish()
    }
}

impl Completion {
    pub(crate) fn new(label: &'static str, action: impl FnOnce() + 'static) -> Self {
        Self {
            label,
            action: Some(Box::new(action)),
        }
    }

    /// What this completion finishes, for logs: `"start"` or `"finish"`.
    pub fn label(&self) -> &'static str {
        self.label
    }

    /// Run the rest of the transition.
    pub fn complete(mut self) {
        if let Some(action) = self.action.take() {
            action();
        }
    }
}

impl Drop for Completion {
    fn drop(&mut self) {
        if self.action.is_some() {
            log::error!(
                "{} completion dropped without firing; the controller stays in transition",
                self.label
            );
        }
    }
}

/// Output of one [`Animator::advance`] step.
#[derive(Debug, Default)]
pub struct AnimationFrame {
    /// Transforms to apply to mounted panels.
    pub placements: Vec<(PanelId, Affine)>,
    /// Completions whose animation ended during this step, in the order they ended.
    pub finished: Vec<Completion>,
}

impl AnimationFrame {
    /// Returns true if the step produced nothing.
    pub fn is_empty(&self) -> bool {
        self.placements.is_empty() && self.finished.is_empty()
    }
}

/// Animates panel transitions.
///
/// Both the outgoing and the incoming panel are mounted and visible for the whole
/// animation. Every call must eventually result in `done` being completed, either
/// directly or through [`AnimationFrame::finished`].
pub trait Animator {
    /// `next` is being started on top of `current`.
    fn animate_for_starting(&mut self, current: &Panel, next: &Panel, done: Completion);

    /// `current` is being finished, uncovering `next`.
    fn animate_for_finishing(&mut self, current: &Panel, next: &Panel, done: Completion);

    /// Move running animations forward by `dt`.
    fn advance(&mut self, _dt: Duration) -> AnimationFrame {
        AnimationFrame::default()
    }

    /// Returns true while any animation is running.
    fn is_animating(&self) -> bool {
        false
    }
}

/// Completes every transition synchronously.
#[derive(Copy, Clone, Debug, Default)]
pub struct Immediate;

impl Animator for Immediate {
    fn animate_for_starting(&mut self, _current: &Panel, _next: &Panel, done: Completion) {
        done.complete();
    }

    fn animate_for_finishing(&mut self, _current: &Panel, _next: &Panel, done: Completion) {
        done.complete();
    }
}

/// Direction a [`SlideAnimator`] moves panels in.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum SlideAxis {
    /// Incoming panels enter from the right.
    #[default]
    Horizontal,
    /// Incoming panels enter from the bottom.
    Vertical,
}

/// Parameters for [`SlideAnimator`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SlideConfig {
    /// Distance travelled by the incoming panel, usually the container width or height.
    pub extent: f64,
    /// Length of one slide.
    pub duration: Duration,
    /// Fraction of `extent` the covered panel moves, against the slide.
    pub parallax: f64,
    /// Slide direction.
    pub axis: SlideAxis,
}

impl Default for SlideConfig {
    fn default() -> Self {
        Self {
            extent: 360.0,
            duration: Duration::from_millis(250),
            parallax: 0.3,
            axis: SlideAxis::Horizontal,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
enum Direction {
    Forward,
    Backward,
}

#[derive(Debug)]
struct Slide {
    outgoing: PanelId,
    incoming: PanelId,
    direction: Direction,
    elapsed: Duration,
    done: Completion,
}

/// Frame-driven slide transition.
#[derive(Debug, Default)]
pub struct SlideAnimator {
    config: SlideConfig,
    slides: Vec<Slide>,
}

impl SlideAnimator {
    /// Create an animator with `config`.
    pub fn new(config: SlideConfig) -> Self {
        Self {
            config,
            slides: Vec::new(),
        }
    }

    /// Current configuration.
    pub fn config(&self) -> &SlideConfig {
        &self.config
    }

    fn offset(&self, distance: f64) -> Affine {
        let v = match self.config.axis {
            SlideAxis::Horizontal => Vec2::new(distance, 0.0),
            SlideAxis::Vertical => Vec2::new(0.0, distance),
        };
        Affine::translate(v)
    }

    fn progress(&self, elapsed: Duration) -> f64 {
        let total = self.config.duration.as_secs_f64();
        if total <= 0.0 {
            return 1.0;
        }
        (elapsed.as_secs_f64() / total).min(1.0)
    }

    fn push(&mut self, current: &Panel, next: &Panel, direction: Direction, done: Completion) {
        self.slides.push(Slide {
            outgoing: current.id(),
            incoming: next.id(),
            direction,
            elapsed: Duration::ZERO,
            done,
        });
    }
}

/// Cubic ease-out.
fn ease_out(t: f64) -> f64 {
    let u = 1.0 - t;
    1.0 - u * u * u
}

impl Animator for SlideAnimator {
    fn animate_for_starting(&mut self, current: &Panel, next: &Panel, done: Completion) {
        self.push(current, next, Direction::Forward, done);
    }

    fn animate_for_finishing(&mut self, current: &Panel, next: &Panel, done: Completion) {
        self.push(current, next, Direction::Backward, done);
    }

    fn advance(&mut self, dt: Duration) -> AnimationFrame {
        let mut frame = AnimationFrame::default();
        let slides = core::mem::take(&mut self.slides);
        for mut slide in slides {
            slide.elapsed = slide.elapsed.saturating_add(dt);
            let t = self.progress(slide.elapsed);
            if t >= 1.0 {
                frame.placements.push((slide.outgoing, Affine::IDENTITY));
                frame.placements.push((slide.incoming, Affine::IDENTITY));
                frame.finished.push(slide.done);
                continue;
            }
            let e = ease_out(t);
            let extent = self.config.extent;
            let behind = extent * self.config.parallax;
            let (outgoing, incoming) = match slide.direction {
                Direction::Forward => (-behind * e, extent * (1.0 - e)),
                Direction::Backward => (extent * e, -behind * (1.0 - e)),
            };
            frame.placements.push((slide.outgoing, self.offset(outgoing)));
            frame.placements.push((slide.incoming, self.offset(incoming)));
            self.slides.push(slide);
        }
        frame
    }

    fn is_animating(&self) -> bool {
        !self.slides.is_empty()
    }
}
