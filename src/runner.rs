//! Frame loop over a simulated page.
//!
//! Each frame advances the page clock by `dt`, lets the simulated document
//! finish CSS transitions, then reports intersection changes for observed
//! elements. This is the host side of the page: on a real browser the same
//! events come from the engine.

use std::collections::HashMap;

use tracing::{debug, trace};

use crate::component::Event;
use crate::config::Config;
use crate::document::{Document, ElementId};
use crate::page::Page;
use crate::sim::SimDocument;

pub struct Runner {
    page: Page<SimDocument>,
    elapsed: f64, // seconds, fractional ms carried between frames
    ratios: HashMap<ElementId, f32>,
}

impl Runner {
    pub fn new(doc: SimDocument, config: &Config) -> Self {
        let mut runner = Self {
            page: Page::load(doc, config),
            elapsed: 0.0,
            ratios: HashMap::new(),
        };
        runner.report_intersections();
        runner
    }

    pub fn page(&self) -> &Page<SimDocument> {
        &self.page
    }

    pub fn page_mut(&mut self) -> &mut Page<SimDocument> {
        &mut self.page
    }

    pub fn doc(&self) -> &SimDocument {
        self.page.doc()
    }

    /// Advances one frame of `dt` seconds.
    pub fn step(&mut self, dt: f32) {
        self.elapsed += f64::from(dt);
        let target = (self.elapsed * 1000.0).floor() as u64;
        self.run_to(target);
    }

    /// Runs up to `until_ms`, stopping at every timer and transition
    /// deadline on the way so events interleave as they would on a real page.
    pub fn run_to(&mut self, until_ms: u64) {
        while let Some(deadline) = self.next_deadline().filter(|t| *t <= until_ms) {
            let deadline = deadline.max(self.page.now_ms());
            self.page.doc_mut().set_time(deadline);
            self.page.advance_to(deadline);
            self.pump_transitions();
        }
        self.page.doc_mut().set_time(until_ms);
        self.page.advance_to(until_ms);
        self.pump_transitions();
        self.report_intersections();
        self.elapsed = self.elapsed.max(until_ms as f64 / 1000.0);
    }

    fn next_deadline(&self) -> Option<u64> {
        let transition = self.page.doc().next_transition_end();
        let timer = self.page.timers().next_due();
        match (transition, timer) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    fn pump_transitions(&mut self) {
        let now = self.page.now_ms();
        self.page.doc_mut().set_time(now);
        for (target, property) in self.page.doc_mut().drain_transition_ends() {
            debug!(?target, %property, at = now, "transition ended");
            self.page.dispatch(Event::TransitionEnd { target, property });
        }
    }

    /// Sends an intersection event for every observed element whose visible
    /// ratio changed since the last report.
    fn report_intersections(&mut self) {
        let observed: Vec<ElementId> = self.page.reveal().observed().collect();
        for el in observed {
            let ratio = self.page.doc().intersection_ratio(el);
            let previous = self.ratios.insert(el, ratio);
            if previous != Some(ratio) {
                trace!(?el, ratio, "intersection changed");
                self.page.dispatch(Event::Intersection { target: el, ratio });
            }
        }
    }

    pub fn scroll_to(&mut self, y: f32) {
        self.page.doc_mut().scroll_to(y);
        self.report_intersections();
    }

    pub fn scroll_by(&mut self, dy: f32) {
        let y = self.page.doc().scroll_y() + dy;
        self.scroll_to(y);
    }

    /// Clicks the element with the given id, if there is one.
    pub fn click_id(&mut self, id: &str) -> bool {
        match self.page.doc().element_by_id(id) {
            Some(el) => {
                self.page.click(el);
                true
            }
            None => false,
        }
    }

    /// Clicks whatever is under a viewport point.
    pub fn click_at(&mut self, x: f32, y: f32) -> Option<ElementId> {
        let el = self.page.doc().element_at(x, y)?;
        self.page.click(el);
        Some(el)
    }
}
