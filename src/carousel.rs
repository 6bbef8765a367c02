use tracing::{debug, trace};

use crate::component::{Component, Context, Event};
use crate::constants::*;
use crate::document::{Document, ElementId, set_displayed};
use crate::scheduler::{Scheduler, Task, TimerHandle};
use crate::state::Cursor;

/// Timed slide rotation with optional next/prev controls.
pub struct Carousel {
    slides: Vec<ElementId>,
    cursor: Cursor,
    next_control: Option<ElementId>,
    prev_control: Option<ElementId>,
    autoplay: Option<TimerHandle>,
}

impl Carousel {
    pub fn new(slides: Vec<ElementId>) -> Self {
        let cursor = Cursor::new(slides.len());
        Self {
            slides,
            cursor,
            next_control: None,
            prev_control: None,
            autoplay: None,
        }
    }

    pub fn with_controls(mut self, next: Option<ElementId>, prev: Option<ElementId>) -> Self {
        self.next_control = next;
        self.prev_control = prev;
        self
    }

    /// Collects `.carousel-slide` elements, shows the first one and starts
    /// autoplay. An empty page gets an inert carousel and no timer.
    pub fn mount<D: Document>(doc: &mut D, timers: &mut Scheduler, interval_ms: u64) -> Self {
        let slides = doc.elements_by_class(SLIDE_CLASS);
        let next = doc.elements_by_class(SLIDE_NEXT_CLASS).into_iter().next();
        let prev = doc.elements_by_class(SLIDE_PREV_CLASS).into_iter().next();
        let mut carousel = Self::new(slides).with_controls(next, prev);
        carousel.start(doc, timers, interval_ms);
        carousel
    }

    pub fn start<D: Document>(&mut self, doc: &mut D, timers: &mut Scheduler, interval_ms: u64) {
        if self.slides.is_empty() {
            return;
        }
        self.show(doc, self.cursor.index());
        self.autoplay = Some(timers.every(interval_ms, Task::CarouselAdvance));
        debug!(slides = self.slides.len(), interval_ms, "carousel autoplay started");
    }

    /// Displays slide `index` and hides every other one.
    pub fn show<D: Document>(&self, doc: &mut D, index: usize) {
        for (i, slide) in self.slides.iter().enumerate() {
            set_displayed(doc, *slide, i == index);
        }
    }

    pub fn advance<D: Document>(&mut self, doc: &mut D, delta: isize) {
        if self.slides.is_empty() {
            return;
        }
        let index = self.cursor.step(delta);
        trace!(index, "carousel advanced");
        self.show(doc, index);
    }

    pub fn current_index(&self) -> usize {
        self.cursor.index()
    }

    pub fn len(&self) -> usize {
        self.slides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    pub fn autoplay(&self) -> Option<TimerHandle> {
        self.autoplay
    }
}

impl<D: Document> Component<D> for Carousel {
    fn name(&self) -> &'static str {
        "carousel"
    }

    fn on_event(&mut self, event: &Event, cx: &mut Context<'_, D>) {
        let Event::Click(target) = event else { return };
        if Some(*target) == self.next_control {
            self.advance(cx.doc, 1);
        } else if Some(*target) == self.prev_control {
            self.advance(cx.doc, -1);
        }
    }

    fn on_timer(&mut self, timer: TimerHandle, task: &Task, cx: &mut Context<'_, D>) {
        if *task == Task::CarouselAdvance && Some(timer) == self.autoplay {
            self.advance(cx.doc, 1);
        }
    }

    fn teardown(&mut self, cx: &mut Context<'_, D>) {
        if let Some(handle) = self.autoplay.take() {
            cx.timers.cancel(handle);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::SimDocument;

    fn page(n: usize) -> (SimDocument, Vec<ElementId>) {
        let mut doc = SimDocument::default();
        let slides = (0..n)
            .map(|_| doc.insert(None, "div", None, "carousel-slide"))
            .collect();
        (doc, slides)
    }

    fn shown(doc: &SimDocument, slides: &[ElementId]) -> Vec<usize> {
        slides
            .iter()
            .enumerate()
            .filter(|(_, s)| doc.style(**s, "display").as_deref() == Some("block"))
            .map(|(i, _)| i)
            .collect()
    }

    fn tick(carousel: &mut Carousel, doc: &mut SimDocument, timers: &mut Scheduler, until: u64) {
        while let Some((handle, task)) = timers.pop_due(until) {
            let mut cx = Context::new(&mut *doc, &mut *timers);
            carousel.on_timer(handle, &task, &mut cx);
        }
    }

    #[test]
    fn autoplay_three_ticks_lands_on_slide_three() {
        let (mut doc, slides) = page(5);
        let mut timers = Scheduler::new();
        let mut carousel = Carousel::mount(&mut doc, &mut timers, 4000);
        assert_eq!(shown(&doc, &slides), vec![0]);

        tick(&mut carousel, &mut doc, &mut timers, 12_000);
        assert_eq!(carousel.current_index(), 3);
        assert_eq!(shown(&doc, &slides), vec![3]);
    }

    #[test]
    fn any_walk_keeps_exactly_one_slide_shown() {
        for n in 1..6 {
            let (mut doc, slides) = page(n);
            let mut timers = Scheduler::new();
            let mut carousel = Carousel::mount(&mut doc, &mut timers, 4000);
            for step in 0..20 {
                carousel.advance(&mut doc, if step % 4 == 1 { -1 } else { 1 });
                assert!(carousel.current_index() < n);
                assert_eq!(shown(&doc, &slides), vec![carousel.current_index()]);
            }
        }
    }

    #[test]
    fn show_is_idempotent() {
        let (mut doc, slides) = page(4);
        let carousel = Carousel::new(slides.clone());
        carousel.show(&mut doc, 2);
        carousel.show(&mut doc, 2);
        assert_eq!(shown(&doc, &slides), vec![2]);
    }

    #[test]
    fn prev_from_first_wraps_to_last() {
        let (mut doc, slides) = page(3);
        let mut carousel = Carousel::new(slides.clone());
        carousel.advance(&mut doc, -1);
        assert_eq!(carousel.current_index(), 2);
        assert_eq!(shown(&doc, &slides), vec![2]);
    }

    #[test]
    fn empty_carousel_starts_no_timer() {
        let (mut doc, _) = page(0);
        let mut timers = Scheduler::new();
        let mut carousel = Carousel::mount(&mut doc, &mut timers, 4000);
        assert!(carousel.autoplay().is_none());
        assert_eq!(timers.pending(), 0);
        carousel.advance(&mut doc, 1);
        assert_eq!(carousel.current_index(), 0);
    }

    #[test]
    fn controls_step_both_ways() {
        let (mut doc, slides) = page(3);
        let next = doc.insert(None, "button", None, "carousel-next");
        let prev = doc.insert(None, "button", None, "carousel-prev");
        let mut timers = Scheduler::new();
        let mut carousel = Carousel::mount(&mut doc, &mut timers, 4000);

        let mut cx = Context::new(&mut doc, &mut timers);
        carousel.on_event(&Event::Click(next), &mut cx);
        carousel.on_event(&Event::Click(next), &mut cx);
        carousel.on_event(&Event::Click(prev), &mut cx);
        assert_eq!(carousel.current_index(), 1);
        assert_eq!(shown(&doc, &slides), vec![1]);
    }

    #[test]
    fn teardown_cancels_autoplay() {
        let (mut doc, _) = page(2);
        let mut timers = Scheduler::new();
        let mut carousel = Carousel::mount(&mut doc, &mut timers, 4000);
        let handle = carousel.autoplay().unwrap();
        carousel.teardown(&mut Context::new(&mut doc, &mut timers));
        assert!(!timers.is_pending(handle));
        tick(&mut carousel, &mut doc, &mut timers, 20_000);
        assert_eq!(carousel.current_index(), 0);
    }
}
