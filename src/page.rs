//! One loaded page: its document, its clock and every mounted component.

use tracing::{debug, info, trace};

use crate::calendar::CalendarSwitcher;
use crate::card_stack::CardStack;
use crate::carousel::Carousel;
use crate::component::{Component, Context, Event};
use crate::config::{Config, PageVariant};
use crate::document::{Document, ElementId};
use crate::intro::{self, IntroSequencer};
use crate::reveal::ScrollReveal;
use crate::scheduler::Scheduler;
use crate::toggle::VisibilityToggle;

pub struct Page<D: Document> {
    doc: D,
    timers: Scheduler,
    intro: Option<IntroSequencer>,
    reveal: ScrollReveal,
    card_stack: Option<CardStack>,
    carousel: Carousel,
    calendar: Option<CalendarSwitcher>,
    menu: Option<VisibilityToggle>,
}

impl<D: Document> Page<D> {
    /// Runs the page-load behavior: intro timeline or immediate reveal
    /// depending on the variant, then scroll reveal, card stack, carousel,
    /// calendar and menu, each mounting only if its elements are present.
    pub fn load(mut doc: D, config: &Config) -> Self {
        let mut timers = Scheduler::new();

        let intro = match config.variant {
            PageVariant::Index => {
                let mut intro = IntroSequencer::mount(&doc, &config.intro);
                if let Some(intro) = intro.as_mut() {
                    intro.start(&mut timers);
                }
                intro
            }
            PageVariant::Static => {
                intro::reveal_immediately(&mut doc);
                None
            }
        };

        let reveal = ScrollReveal::mount(&doc, &config.reveal);
        let card_stack = CardStack::mount(&mut doc);
        let carousel = Carousel::mount(&mut doc, &mut timers, config.carousel.interval_ms);
        let calendar = CalendarSwitcher::mount(&mut doc, config.calendar.default_key.as_deref());
        let menu = VisibilityToggle::mount_menu(&doc);

        info!(
            variant = ?config.variant,
            intro = intro.is_some(),
            cards = card_stack.as_ref().map_or(0, |s| s.cards().len()),
            slides = carousel.len(),
            calendar = calendar.is_some(),
            menu = menu.is_some(),
            "page loaded"
        );

        Self {
            doc,
            timers,
            intro,
            reveal,
            card_stack,
            carousel,
            calendar,
            menu,
        }
    }

    pub fn doc(&self) -> &D {
        &self.doc
    }

    pub fn doc_mut(&mut self) -> &mut D {
        &mut self.doc
    }

    pub fn now_ms(&self) -> u64 {
        self.timers.now_ms()
    }

    pub fn timers(&self) -> &Scheduler {
        &self.timers
    }

    pub fn intro(&self) -> Option<&IntroSequencer> {
        self.intro.as_ref()
    }

    pub fn reveal(&self) -> &ScrollReveal {
        &self.reveal
    }

    pub fn card_stack(&self) -> Option<&CardStack> {
        self.card_stack.as_ref()
    }

    pub fn carousel(&self) -> &Carousel {
        &self.carousel
    }

    pub fn calendar(&self) -> Option<&CalendarSwitcher> {
        self.calendar.as_ref()
    }

    fn components(&mut self) -> (Vec<&mut dyn Component<D>>, Context<'_, D>) {
        let mut components: Vec<&mut dyn Component<D>> = Vec::new();
        components.push(&mut self.reveal);
        components.push(&mut self.carousel);
        if let Some(intro) = self.intro.as_mut() {
            components.push(intro);
        }
        if let Some(stack) = self.card_stack.as_mut() {
            components.push(stack);
        }
        if let Some(calendar) = self.calendar.as_mut() {
            components.push(calendar);
        }
        if let Some(menu) = self.menu.as_mut() {
            components.push(menu);
        }
        (components, Context::new(&mut self.doc, &mut self.timers))
    }

    /// Delivers an event to every mounted component.
    pub fn dispatch(&mut self, event: Event) {
        trace!(?event, "dispatch");
        let (components, mut cx) = self.components();
        for component in components {
            component.on_event(&event, &mut cx);
        }
    }

    pub fn click(&mut self, el: ElementId) {
        self.dispatch(Event::Click(el));
    }

    /// Moves time forward by `ms`, running every timer that comes due.
    pub fn advance(&mut self, ms: u64) {
        let until = self.timers.now_ms() + ms;
        self.advance_to(until);
    }

    pub fn advance_to(&mut self, until_ms: u64) {
        while let Some((handle, task)) = self.timers.pop_due(until_ms) {
            trace!(?task, at = self.timers.now_ms(), "timer fired");
            let (components, mut cx) = self.components();
            for component in components {
                component.on_timer(handle, &task, &mut cx);
            }
        }
        self.timers.set_now(until_ms);
    }

    /// Cancels every pending timer and stops observing.
    pub fn teardown(&mut self) {
        let (components, mut cx) = self.components();
        for component in components {
            debug!(component = component.name(), "teardown");
            component.teardown(&mut cx);
        }
    }

    pub fn into_document(self) -> D {
        self.doc
    }
}
