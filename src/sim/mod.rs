//! In-memory page used by the tests and the binary.
//!
//! Besides implementing [`Document`], the simulated page knows a little about
//! layout: each element has a box in page coordinates, which is enough to
//! compute intersection ratios against a scrolled viewport and to hit-test
//! clicks. Elements can also declare CSS transitions; a class change on such an
//! element starts them, and [`SimDocument::drain_transition_ends`] reports the
//! ones that have finished.

mod markup;

pub use markup::{ElementSpec, Markup, ViewportSpec};

use std::collections::BTreeMap;

use crate::animation::{Animation, Viewport};
use crate::constants::*;
use crate::document::{Document, ElementId};

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.left && x < self.left + self.width && y >= self.top && y < self.top + self.height
    }
}

#[derive(Debug, Clone, Default)]
pub struct Node {
    pub tag: String,
    pub classes: Vec<String>,
    pub attributes: BTreeMap<String, String>,
    pub styles: BTreeMap<String, String>,
    pub text: String,
    pub html: String,
    pub rect: Rect,
    pub parent: Option<ElementId>,
    pub children: Vec<ElementId>,
    pub attached: bool,
    pub animations: Vec<Animation>,
    /// Declared transitions: property name to duration (ms).
    pub transitions: BTreeMap<String, u64>,
}

#[derive(Debug, Clone, PartialEq)]
struct RunningTransition {
    target: ElementId,
    property: String,
    ends_at: u64,
}

#[derive(Debug, Clone)]
pub struct SimDocument {
    nodes: Vec<Node>,
    root: ElementId,
    viewport: Viewport,
    scroll_y: f32,
    now_ms: u64,
    transitions: Vec<RunningTransition>,
}

impl Default for SimDocument {
    fn default() -> Self {
        Self::new(Viewport { width: VIEWPORT_WIDTH, height: VIEWPORT_HEIGHT })
    }
}

impl SimDocument {
    pub fn new(viewport: Viewport) -> Self {
        let body = Node {
            tag: "body".to_string(),
            attached: true,
            ..Node::default()
        };
        Self {
            nodes: vec![body],
            root: ElementId(0),
            viewport,
            scroll_y: 0.0,
            now_ms: 0,
            transitions: Vec::new(),
        }
    }

    pub fn root(&self) -> ElementId {
        self.root
    }

    pub fn node(&self, el: ElementId) -> Option<&Node> {
        self.nodes.get(el.0)
    }

    fn node_mut(&mut self, el: ElementId) -> Option<&mut Node> {
        self.nodes.get_mut(el.0)
    }

    /// Creates an element with an optional id and space-separated classes and
    /// appends it under `parent` (the body when `None`).
    pub fn insert(&mut self, parent: Option<ElementId>, tag: &str, id: Option<&str>, class: &str) -> ElementId {
        let el = self.create_element(tag);
        if let Some(id) = id {
            self.set_attribute(el, "id", id);
        }
        for class in class.split_whitespace() {
            self.add_class(el, class);
        }
        self.append_child(parent.unwrap_or(self.root), el);
        el
    }

    pub fn set_rect(&mut self, el: ElementId, rect: Rect) {
        if let Some(node) = self.node_mut(el) {
            node.rect = rect;
        }
    }

    pub fn declare_transition(&mut self, el: ElementId, property: &str, duration_ms: u64) {
        if let Some(node) = self.node_mut(el) {
            node.transitions.insert(property.to_string(), duration_ms);
        }
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn scroll_y(&self) -> f32 {
        self.scroll_y
    }

    pub fn scroll_to(&mut self, y: f32) {
        self.scroll_y = y.max(0.0);
    }

    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    pub fn set_time(&mut self, now_ms: u64) {
        self.now_ms = self.now_ms.max(now_ms);
    }

    /// Attached elements in document order, body excluded.
    pub fn elements(&self) -> Vec<ElementId> {
        let mut out = Vec::new();
        self.walk(self.root, &mut out);
        out.retain(|el| *el != self.root);
        out
    }

    fn walk(&self, el: ElementId, out: &mut Vec<ElementId>) {
        out.push(el);
        if let Some(node) = self.node(el) {
            for child in &node.children {
                self.walk(*child, out);
            }
        }
    }

    fn descendants(&self, parent: ElementId) -> Vec<ElementId> {
        let mut out = Vec::new();
        if self.is_attached(parent) {
            self.walk(parent, &mut out);
            out.remove(0);
        }
        out
    }

    /// Fraction of `el`'s box inside the scrolled viewport.
    pub fn intersection_ratio(&self, el: ElementId) -> f32 {
        let Some(node) = self.node(el).filter(|n| n.attached) else {
            return 0.0;
        };
        let rect = node.rect;
        if rect.height <= 0.0 {
            return 0.0;
        }
        let top = rect.top.max(self.scroll_y);
        let bottom = (rect.top + rect.height).min(self.scroll_y + self.viewport.height);
        ((bottom - top).max(0.0) / rect.height).min(1.0)
    }

    /// Deepest attached element whose box contains the viewport point.
    pub fn element_at(&self, x: f32, y: f32) -> Option<ElementId> {
        let page_y = y + self.scroll_y;
        self.elements()
            .into_iter()
            .rev()
            .find(|el| self.node(*el).is_some_and(|n| n.rect.contains(x, page_y)))
    }

    /// Finished transitions, oldest first.
    pub fn drain_transition_ends(&mut self) -> Vec<(ElementId, String)> {
        let now = self.now_ms;
        let (done, running): (Vec<_>, Vec<_>) = self.transitions.drain(..).partition(|t| t.ends_at <= now);
        self.transitions = running;
        done.into_iter().map(|t| (t.target, t.property)).collect()
    }

    pub fn next_transition_end(&self) -> Option<u64> {
        self.transitions.iter().map(|t| t.ends_at).min()
    }

    pub fn running_transitions(&self) -> usize {
        self.transitions.len()
    }

    fn start_transitions(&mut self, el: ElementId) {
        let now = self.now_ms;
        let Some(node) = self.node(el) else { return };
        let started: Vec<RunningTransition> = node
            .transitions
            .iter()
            .map(|(property, duration)| RunningTransition {
                target: el,
                property: property.clone(),
                ends_at: now + duration,
            })
            .collect();
        for transition in started {
            // A restarted transition replaces the running one
            self.transitions
                .retain(|t| !(t.target == transition.target && t.property == transition.property));
            self.transitions.push(transition);
        }
    }

    /// Most recent animation on `el`, if any.
    pub fn animation(&self, el: ElementId) -> Option<&Animation> {
        self.node(el).and_then(|n| n.animations.last())
    }

    pub fn classes(&self, el: ElementId) -> Vec<String> {
        self.node(el).map(|n| n.classes.clone()).unwrap_or_default()
    }
}

impl Document for SimDocument {
    fn element_by_id(&self, id: &str) -> Option<ElementId> {
        self.elements()
            .into_iter()
            .find(|el| self.attribute(*el, "id").as_deref() == Some(id))
    }

    fn elements_by_class(&self, class: &str) -> Vec<ElementId> {
        self.descendants_by_class(self.root, class)
    }

    fn descendants_by_class(&self, parent: ElementId, class: &str) -> Vec<ElementId> {
        self.descendants(parent)
            .into_iter()
            .filter(|el| self.has_class(*el, class))
            .collect()
    }

    fn descendants_by_tag(&self, parent: ElementId, tags: &[&str]) -> Vec<ElementId> {
        self.descendants(parent)
            .into_iter()
            .filter(|el| self.node(*el).is_some_and(|n| tags.contains(&n.tag.as_str())))
            .collect()
    }

    fn attribute(&self, el: ElementId, name: &str) -> Option<String> {
        self.node(el)?.attributes.get(name).cloned()
    }

    fn set_attribute(&mut self, el: ElementId, name: &str, value: &str) {
        if let Some(node) = self.node_mut(el) {
            node.attributes.insert(name.to_string(), value.to_string());
        }
    }

    fn has_class(&self, el: ElementId, class: &str) -> bool {
        self.node(el).is_some_and(|n| n.classes.iter().any(|c| c == class))
    }

    fn add_class(&mut self, el: ElementId, class: &str) {
        let Some(node) = self.node_mut(el) else { return };
        if !node.classes.iter().any(|c| c == class) {
            node.classes.push(class.to_string());
            self.start_transitions(el);
        }
    }

    fn remove_class(&mut self, el: ElementId, class: &str) {
        let Some(node) = self.node_mut(el) else { return };
        let before = node.classes.len();
        node.classes.retain(|c| c != class);
        if node.classes.len() != before {
            self.start_transitions(el);
        }
    }

    fn style(&self, el: ElementId, property: &str) -> Option<String> {
        self.node(el)?.styles.get(property).cloned()
    }

    fn set_style(&mut self, el: ElementId, property: &str, value: &str) {
        if let Some(node) = self.node_mut(el) {
            node.styles.insert(property.to_string(), value.to_string());
        }
    }

    fn text(&self, el: ElementId) -> Option<String> {
        self.node(el).map(|n| n.text.clone())
    }

    fn set_text(&mut self, el: ElementId, text: &str) {
        if let Some(node) = self.node_mut(el) {
            node.text = text.to_string();
        }
    }

    fn inner_html(&self, el: ElementId) -> Option<String> {
        self.node(el).map(|n| n.html.clone())
    }

    fn set_inner_html(&mut self, el: ElementId, html: &str) {
        if let Some(node) = self.node_mut(el) {
            node.html = html.to_string();
        }
    }

    fn create_element(&mut self, tag: &str) -> ElementId {
        self.nodes.push(Node {
            tag: tag.to_string(),
            ..Node::default()
        });
        ElementId(self.nodes.len() - 1)
    }

    fn append_child(&mut self, parent: ElementId, child: ElementId) {
        if parent == child || self.node(parent).is_none() || self.node(child).is_none() {
            return;
        }
        if let Some(old) = self.node(child).and_then(|n| n.parent) {
            if let Some(old) = self.node_mut(old) {
                old.children.retain(|c| *c != child);
            }
        }
        let attached = self.is_attached(parent);
        if let Some(node) = self.node_mut(parent) {
            node.children.push(child);
        }
        if let Some(node) = self.node_mut(child) {
            node.parent = Some(parent);
        }
        self.set_attached(child, attached);
    }

    fn remove(&mut self, el: ElementId) {
        if el == self.root {
            return;
        }
        if let Some(parent) = self.node(el).and_then(|n| n.parent) {
            if let Some(parent) = self.node_mut(parent) {
                parent.children.retain(|c| *c != el);
            }
        }
        if let Some(node) = self.node_mut(el) {
            node.parent = None;
        }
        self.set_attached(el, false);
        self.transitions.retain(|t| t.target != el);
    }

    fn is_attached(&self, el: ElementId) -> bool {
        self.node(el).is_some_and(|n| n.attached)
    }

    fn animate(&mut self, el: ElementId, animation: Animation) {
        if let Some(node) = self.node_mut(el) {
            node.animations.push(animation);
        }
    }
}

impl SimDocument {
    fn set_attached(&mut self, el: ElementId, attached: bool) {
        let Some(node) = self.node_mut(el) else { return };
        node.attached = attached;
        let children = node.children.clone();
        for child in children {
            self.set_attached(child, attached);
        }
    }
}
