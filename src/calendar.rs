use tracing::debug;

use crate::component::{Component, Context, Event};
use crate::constants::*;
use crate::document::{Document, ElementId, set_displayed};
use crate::scheduler::{Task, TimerHandle};

/// Month buttons selecting one calendar panel at a time.
///
/// Each `.nav-btn` names its panel in `data-month`; the panel is the element
/// with that id. Panels are the `.calendar-flashcard` elements.
pub struct CalendarSwitcher {
    controls: Vec<ElementId>,
    panels: Vec<ElementId>,
    selected: Option<String>,
}

impl CalendarSwitcher {
    pub fn new(controls: Vec<ElementId>, panels: Vec<ElementId>) -> Self {
        Self { controls, panels, selected: None }
    }

    /// Mounts on `.nav-btn` controls. With `default_key`, that month is
    /// selected right away; otherwise nothing is until the first click.
    pub fn mount<D: Document>(doc: &mut D, default_key: Option<&str>) -> Option<Self> {
        let controls = doc.elements_by_class(MONTH_BUTTON_CLASS);
        if controls.is_empty() {
            return None;
        }
        let panels = doc.elements_by_class(MONTH_PANEL_CLASS);
        let mut switcher = Self::new(controls, panels);
        if let Some(key) = default_key {
            switcher.select_key(doc, key);
        }
        Some(switcher)
    }

    /// Handles a click on `control`: it becomes the only active button, every
    /// panel is hidden, then the panel named by its `data-month` is shown.
    pub fn activate<D: Document>(&mut self, doc: &mut D, control: ElementId) {
        for btn in &self.controls {
            doc.remove_class(*btn, ACTIVE_CLASS);
        }
        doc.add_class(control, ACTIVE_CLASS);

        let key = doc.attribute(control, MONTH_ATTRIBUTE);
        self.show_panel(doc, key.as_deref());
        self.selected = key;
    }

    /// Selects `key` as if its button were clicked; without a button the panel
    /// is still switched.
    pub fn select_key<D: Document>(&mut self, doc: &mut D, key: &str) {
        let control = self
            .controls
            .iter()
            .copied()
            .find(|c| doc.attribute(*c, MONTH_ATTRIBUTE).as_deref() == Some(key));
        match control {
            Some(control) => self.activate(doc, control),
            None => {
                self.show_panel(doc, Some(key));
                self.selected = Some(key.to_string());
            }
        }
    }

    fn show_panel<D: Document>(&self, doc: &mut D, key: Option<&str>) {
        for panel in &self.panels {
            set_displayed(doc, *panel, false);
        }
        match key.and_then(|k| doc.element_by_id(k)) {
            Some(panel) => set_displayed(doc, panel, true),
            None => debug!(?key, "no calendar panel for month"),
        }
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }
}

impl<D: Document> Component<D> for CalendarSwitcher {
    fn name(&self) -> &'static str {
        "calendar"
    }

    fn on_event(&mut self, event: &Event, cx: &mut Context<'_, D>) {
        if let Event::Click(target) = event {
            if self.controls.contains(target) {
                self.activate(cx.doc, *target);
            }
        }
    }

    fn on_timer(&mut self, _timer: TimerHandle, _task: &Task, _cx: &mut Context<'_, D>) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::is_displayed;
    use crate::sim::SimDocument;

    struct Page {
        doc: SimDocument,
        november_btn: ElementId,
        december_btn: ElementId,
        january_btn: ElementId,
        november: ElementId,
        december: ElementId,
    }

    fn page() -> Page {
        let mut doc = SimDocument::default();
        let november_btn = doc.insert(None, "button", None, "nav-btn");
        doc.set_attribute(november_btn, "data-month", "november");
        let december_btn = doc.insert(None, "button", None, "nav-btn");
        doc.set_attribute(december_btn, "data-month", "december");
        let january_btn = doc.insert(None, "button", None, "nav-btn");
        doc.set_attribute(january_btn, "data-month", "january");
        let november = doc.insert(None, "section", Some("november"), "calendar-flashcard");
        let december = doc.insert(None, "section", Some("december"), "calendar-flashcard");
        Page { doc, november_btn, december_btn, january_btn, november, december }
    }

    fn active_buttons(p: &Page) -> Vec<ElementId> {
        [p.november_btn, p.december_btn, p.january_btn]
            .into_iter()
            .filter(|b| p.doc.has_class(*b, "active"))
            .collect()
    }

    #[test]
    fn no_default_selects_nothing() {
        let mut p = page();
        let switcher = CalendarSwitcher::mount(&mut p.doc, None).unwrap();
        assert_eq!(switcher.selected(), None);
        assert!(active_buttons(&p).is_empty());
        assert_eq!(p.doc.style(p.november, "display"), None);
    }

    #[test]
    fn default_key_preselects_panel_and_button() {
        let mut p = page();
        let switcher = CalendarSwitcher::mount(&mut p.doc, Some("november")).unwrap();
        assert_eq!(switcher.selected(), Some("november"));
        assert_eq!(active_buttons(&p), vec![p.november_btn]);
        assert!(is_displayed(&p.doc, p.november));
        assert!(!is_displayed(&p.doc, p.december));
    }

    #[test]
    fn click_shows_exactly_one_panel() {
        let mut p = page();
        let mut switcher = CalendarSwitcher::mount(&mut p.doc, Some("november")).unwrap();
        switcher.activate(&mut p.doc, p.december_btn);

        assert_eq!(active_buttons(&p), vec![p.december_btn]);
        assert!(!is_displayed(&p.doc, p.november));
        assert!(is_displayed(&p.doc, p.december));
    }

    #[test]
    fn missing_panel_hides_all_but_still_marks_button() {
        let mut p = page();
        let mut switcher = CalendarSwitcher::mount(&mut p.doc, Some("november")).unwrap();
        switcher.activate(&mut p.doc, p.january_btn);

        assert_eq!(active_buttons(&p), vec![p.january_btn]);
        assert!(!is_displayed(&p.doc, p.november));
        assert!(!is_displayed(&p.doc, p.december));
        assert_eq!(switcher.selected(), Some("january"));
    }

    #[test]
    fn no_buttons_mounts_nothing() {
        let mut doc = SimDocument::default();
        doc.insert(None, "section", Some("november"), "calendar-flashcard");
        assert!(CalendarSwitcher::mount(&mut doc, Some("november")).is_none());
    }
}
