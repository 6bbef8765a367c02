use tracing::debug;

use crate::component::{Component, Context, Event};
use crate::constants::*;
use crate::document::{Document, ElementId};
use crate::scheduler::{Task, TimerHandle};

/// Click on a control flips a class on a target (the hamburger menu).
pub struct VisibilityToggle {
    control: ElementId,
    target: Option<ElementId>,
    class: String,
}

impl VisibilityToggle {
    pub fn new(control: ElementId, target: Option<ElementId>, class: &str) -> Self {
        Self { control, target, class: class.to_string() }
    }

    /// The site's menu: `.hamburger-menu-toggle` toggles `show` on `.hamburger-menu`.
    pub fn mount_menu<D: Document>(doc: &D) -> Option<Self> {
        let control = doc.elements_by_class(MENU_TOGGLE_CLASS).into_iter().next()?;
        let target = doc.elements_by_class(MENU_CLASS).into_iter().next();
        Some(Self::new(control, target, SHOW_CLASS))
    }

    pub fn toggle<D: Document>(&self, doc: &mut D) -> Option<bool> {
        let target = self.target?;
        let shown = doc.toggle_class(target, &self.class);
        debug!(shown, "menu toggled");
        Some(shown)
    }
}

impl<D: Document> Component<D> for VisibilityToggle {
    fn name(&self) -> &'static str {
        "toggle"
    }

    fn on_event(&mut self, event: &Event, cx: &mut Context<'_, D>) {
        if *event == Event::Click(self.control) {
            self.toggle(cx.doc);
        }
    }

    fn on_timer(&mut self, _timer: TimerHandle, _task: &Task, _cx: &mut Context<'_, D>) {}
}
