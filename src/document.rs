//! The page as an injected capability.
//!
//! Components never reach for a global page. They receive a `Document` and
//! address elements through copyable [`ElementId`] handles handed out by it.
//! Every lookup returns `Option`/`Vec`, and every mutation on a handle the
//! document no longer knows is a silent no-op: a missing element is the only
//! failure this layer has, and it is always tolerated.

use crate::animation::Animation;

/// Opaque handle to one element of a [`Document`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(pub usize);

pub trait Document {
    /// Element whose `id` attribute equals `id`.
    fn element_by_id(&self, id: &str) -> Option<ElementId>;

    /// All attached elements carrying `class`, in document order.
    fn elements_by_class(&self, class: &str) -> Vec<ElementId>;

    /// Descendants of `parent` carrying `class`, in document order.
    fn descendants_by_class(&self, parent: ElementId, class: &str) -> Vec<ElementId>;

    /// Descendants of `parent` whose tag is any of `tags`, in document order.
    fn descendants_by_tag(&self, parent: ElementId, tags: &[&str]) -> Vec<ElementId>;

    fn attribute(&self, el: ElementId, name: &str) -> Option<String>;
    fn set_attribute(&mut self, el: ElementId, name: &str, value: &str);

    fn has_class(&self, el: ElementId, class: &str) -> bool;
    fn add_class(&mut self, el: ElementId, class: &str);
    fn remove_class(&mut self, el: ElementId, class: &str);

    /// Flips `class` on `el` and returns whether it is now present.
    fn toggle_class(&mut self, el: ElementId, class: &str) -> bool {
        if self.has_class(el, class) {
            self.remove_class(el, class);
            false
        } else {
            self.add_class(el, class);
            true
        }
    }

    fn style(&self, el: ElementId, property: &str) -> Option<String>;
    fn set_style(&mut self, el: ElementId, property: &str, value: &str);

    fn text(&self, el: ElementId) -> Option<String>;
    fn set_text(&mut self, el: ElementId, text: &str);
    fn inner_html(&self, el: ElementId) -> Option<String>;
    fn set_inner_html(&mut self, el: ElementId, html: &str);

    /// Creates a detached element.
    fn create_element(&mut self, tag: &str) -> ElementId;
    fn append_child(&mut self, parent: ElementId, child: ElementId);
    /// Detaches `el` (and its subtree) from the page.
    fn remove(&mut self, el: ElementId);
    fn is_attached(&self, el: ElementId) -> bool;

    /// Starts a keyframe animation on `el`.
    fn animate(&mut self, el: ElementId, animation: Animation);
}

/// Fades an element in: `visibility: visible` and `opacity: 1`.
pub fn show<D: Document + ?Sized>(doc: &mut D, el: Option<ElementId>) {
    if let Some(el) = el {
        doc.set_style(el, "visibility", "visible");
        doc.set_style(el, "opacity", "1");
    }
}

/// Sets only `opacity: 1` on an optional element.
pub fn fade_in<D: Document + ?Sized>(doc: &mut D, el: Option<ElementId>) {
    if let Some(el) = el {
        doc.set_style(el, "opacity", "1");
    }
}

/// Sets `display` to `block` or `none`.
pub fn set_displayed<D: Document + ?Sized>(doc: &mut D, el: ElementId, displayed: bool) {
    doc.set_style(el, "display", if displayed { "block" } else { "none" });
}

pub fn is_displayed<D: Document + ?Sized>(doc: &D, el: ElementId) -> bool {
    doc.style(el, "display").as_deref() != Some("none")
}
