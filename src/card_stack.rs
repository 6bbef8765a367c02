//! The 3D event card stack on the home page.
//!
//! One card is active; its neighbours on either side (wrapping) are marked
//! `is-prev` and `is-next` so the stylesheet can fan them out. The active
//! card's title and details are mirrored into a details pane, and one dot per
//! card tracks the position.

use tracing::debug;

use crate::component::{Component, Context, Event};
use crate::constants::*;
use crate::document::{Document, ElementId};
use crate::scheduler::{Task, TimerHandle};
use crate::state::{Cursor, wrap};

/// Roles a card holds for a given active index. For fewer than three cards
/// the roles overlap: with two cards the other card is both prev and next,
/// with one card it is all three.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CardMarks {
    pub active: bool,
    pub prev: bool,
    pub next: bool,
}

pub fn classify(index: usize, active: usize, len: usize) -> CardMarks {
    if len == 0 {
        return CardMarks::default();
    }
    CardMarks {
        active: index == active,
        prev: index == wrap(active, -1, len),
        next: index == wrap(active, 1, len),
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct DetailsPane {
    pub title: Option<ElementId>,
    pub text: Option<ElementId>,
}

pub struct CardStack {
    cards: Vec<ElementId>,
    cursor: Cursor,
    dots: Vec<ElementId>,
    details: DetailsPane,
    next_control: Option<ElementId>,
    prev_control: Option<ElementId>,
}

impl CardStack {
    /// Mounts on `#event-card-stack`. Creates the dots, then activates the
    /// first card. Absent container or no cards: nothing to mount.
    pub fn mount<D: Document>(doc: &mut D) -> Option<Self> {
        let container = doc.element_by_id(CARD_STACK_ID)?;
        let cards = doc.descendants_by_class(container, CARD_CLASS);
        if cards.is_empty() {
            debug!("card stack has no cards");
            return None;
        }

        let details = DetailsPane {
            title: doc.element_by_id(DETAILS_TITLE_ID),
            text: doc.element_by_id(DETAILS_TEXT_ID),
        };
        let dots = match doc.element_by_id(CARD_DOTS_ID) {
            Some(dots_container) => create_dots(doc, dots_container, cards.len()),
            None => Vec::new(),
        };

        let mut stack = Self {
            cursor: Cursor::new(cards.len()),
            cards,
            dots,
            details,
            next_control: doc.element_by_id(CARD_NEXT_ID),
            prev_control: doc.element_by_id(CARD_PREV_ID),
        };
        stack.set_active(doc, 0);
        debug!(cards = stack.cards.len(), dots = stack.dots.len(), "card stack mounted");
        Some(stack)
    }

    /// Makes card `index` active and refreshes marks, details and dots.
    pub fn set_active<D: Document>(&mut self, doc: &mut D, index: usize) {
        let active = self.cursor.set(index);
        let len = self.cards.len();

        for (i, card) in self.cards.iter().enumerate() {
            let marks = classify(i, active, len);
            for (class, on) in [
                (IS_ACTIVE_CLASS, marks.active),
                (IS_PREV_CLASS, marks.prev),
                (IS_NEXT_CLASS, marks.next),
            ] {
                if on {
                    doc.add_class(*card, class);
                } else {
                    doc.remove_class(*card, class);
                }
            }
        }

        self.mirror_details(doc, self.cards[active]);

        for (i, dot) in self.dots.iter().enumerate() {
            if i == active {
                doc.add_class(*dot, IS_ACTIVE_CLASS);
            } else {
                doc.remove_class(*dot, IS_ACTIVE_CLASS);
            }
        }
    }

    fn mirror_details<D: Document>(&self, doc: &mut D, card: ElementId) {
        let title = doc
            .descendants_by_tag(card, &["h3"])
            .first()
            .and_then(|h3| doc.text(*h3));
        let content = doc
            .descendants_by_class(card, CARD_DETAILS_CLASS)
            .first()
            .and_then(|details| doc.inner_html(*details));

        if let (Some(sink), Some(title)) = (self.details.title, title) {
            doc.set_text(sink, &title);
        }
        if let (Some(sink), Some(content)) = (self.details.text, content) {
            doc.set_inner_html(sink, &content);
        }
    }

    pub fn next<D: Document>(&mut self, doc: &mut D) {
        let index = self.cursor.offset(1);
        self.set_active(doc, index);
    }

    pub fn prev<D: Document>(&mut self, doc: &mut D) {
        let index = self.cursor.offset(-1);
        self.set_active(doc, index);
    }

    pub fn active_index(&self) -> usize {
        self.cursor.index()
    }

    pub fn cards(&self) -> &[ElementId] {
        &self.cards
    }

    pub fn dots(&self) -> &[ElementId] {
        &self.dots
    }
}

fn create_dots<D: Document>(doc: &mut D, container: ElementId, count: usize) -> Vec<ElementId> {
    (0..count)
        .map(|i| {
            let dot = doc.create_element("button");
            doc.add_class(dot, DOT_CLASS);
            doc.set_attribute(dot, "aria-label", &format!("Go to card {}", i + 1));
            doc.append_child(container, dot);
            dot
        })
        .collect()
}

impl<D: Document> Component<D> for CardStack {
    fn name(&self) -> &'static str {
        "card-stack"
    }

    fn on_event(&mut self, event: &Event, cx: &mut Context<'_, D>) {
        let Event::Click(target) = event else { return };
        let target = Some(*target);
        if target == self.next_control {
            self.next(cx.doc);
        } else if target == self.prev_control {
            self.prev(cx.doc);
        } else if let Some(i) = self.dots.iter().position(|d| Some(*d) == target) {
            self.set_active(cx.doc, i);
        }
    }

    fn on_timer(&mut self, _timer: TimerHandle, _task: &Task, _cx: &mut Context<'_, D>) {}
}
