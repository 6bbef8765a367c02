//! Scroll-triggered reveals.
//!
//! One observer per page watches every `.animate-on-scroll` element plus the
//! `#achievements` section. A generic element gets `is-visible` the first time
//! enough of it is in view and is then dropped from observation. The
//! achievements section stays observed; its `is-animated` class guards the
//! trophy animation so it plays once.

mod trophies;

pub use trophies::{animate_texts, animate_trophies};

use std::collections::BTreeSet;

use tracing::debug;

use crate::component::{Component, Context, Event};
use crate::config::RevealConfig;
use crate::constants::*;
use crate::document::{Document, ElementId};
use crate::scheduler::{Task, TimerHandle};

pub struct ScrollReveal {
    config: RevealConfig,
    observed: BTreeSet<ElementId>,
    special: Option<ElementId>,
    texts_timer: Option<TimerHandle>,
}

impl ScrollReveal {
    pub fn new(config: &RevealConfig) -> Self {
        Self {
            config: config.clone(),
            observed: BTreeSet::new(),
            special: None,
            texts_timer: None,
        }
    }

    /// Observes the page's `.animate-on-scroll` elements and `#achievements`.
    pub fn mount<D: Document>(doc: &D, config: &RevealConfig) -> Self {
        let mut reveal = Self::new(config);
        for el in doc.elements_by_class(ANIMATE_ON_SCROLL_CLASS) {
            reveal.observe(el);
        }
        if let Some(achievements) = doc.element_by_id(ACHIEVEMENTS_ID) {
            reveal.special = Some(achievements);
            reveal.observe(achievements);
        }
        debug!(observed = reveal.observed.len(), "scroll reveal mounted");
        reveal
    }

    pub fn observe(&mut self, el: ElementId) {
        self.observed.insert(el);
    }

    pub fn unobserve(&mut self, el: ElementId) {
        self.observed.remove(&el);
    }

    pub fn is_observed(&self, el: ElementId) -> bool {
        self.observed.contains(&el)
    }

    /// Elements whose intersection changes the host should report.
    pub fn observed(&self) -> impl Iterator<Item = ElementId> + '_ {
        self.observed.iter().copied()
    }

    fn on_intersection<D: Document>(&mut self, cx: &mut Context<'_, D>, target: ElementId, ratio: f32) {
        if !self.is_observed(target) || ratio <= 0.0 || ratio < self.config.threshold {
            return;
        }

        if Some(target) == self.special {
            if cx.doc.has_class(target, IS_ANIMATED_CLASS) {
                return;
            }
            cx.doc.add_class(target, IS_ANIMATED_CLASS);
            debug!("trophy animation started");
            self.texts_timer = Some(animate_trophies(cx.doc, cx.timers, &self.config));
        } else {
            cx.doc.add_class(target, IS_VISIBLE_CLASS);
            self.unobserve(target);
        }
    }
}

impl<D: Document> Component<D> for ScrollReveal {
    fn name(&self) -> &'static str {
        "scroll-reveal"
    }

    fn on_event(&mut self, event: &Event, cx: &mut Context<'_, D>) {
        if let Event::Intersection { target, ratio } = event {
            self.on_intersection(cx, *target, *ratio);
        }
    }

    fn on_timer(&mut self, timer: TimerHandle, task: &Task, cx: &mut Context<'_, D>) {
        if *task == Task::RevealTrophyTexts && self.texts_timer == Some(timer) {
            self.texts_timer = None;
            let now = cx.now_ms();
            animate_texts(cx.doc, now, &self.config);
        }
    }

    fn teardown(&mut self, cx: &mut Context<'_, D>) {
        if let Some(handle) = self.texts_timer.take() {
            cx.timers.cancel(handle);
        }
        self.observed.clear();
    }
}
