use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use super::{Rect, SimDocument};
use crate::animation::Viewport;
use crate::constants::*;
use crate::document::{Document, ElementId};

/// A page described in TOML:
///
/// ```toml
/// [viewport]
/// width = 1280
/// height = 720
///
/// [[element]]
/// tag = "header"
/// id = "main-header"
/// class = "logo-center animation-element"
/// rect = { top = 0, height = 120 }
/// transitions = { transform = 800 }
///
/// [[element.children]]
/// tag = "img"
/// id = "blossoms-logo"
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Markup {
    #[serde(default)]
    pub viewport: Option<ViewportSpec>,
    #[serde(default, rename = "element")]
    pub elements: Vec<ElementSpec>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct ViewportSpec {
    pub width: f32,
    pub height: f32,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RectSpec {
    #[serde(default)]
    pub left: f32,
    #[serde(default)]
    pub top: f32,
    pub width: Option<f32>,
    #[serde(default)]
    pub height: f32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ElementSpec {
    #[serde(default = "default_tag")]
    pub tag: String,
    pub id: Option<String>,
    #[serde(default)]
    pub class: String,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub html: String,
    #[serde(default)]
    pub attributes: BTreeMap<String, String>,
    #[serde(default)]
    pub style: BTreeMap<String, String>,
    pub rect: Option<RectSpec>,
    #[serde(default)]
    pub transitions: BTreeMap<String, u64>,
    #[serde(default)]
    pub children: Vec<ElementSpec>,
}

fn default_tag() -> String {
    "div".to_string()
}

impl Markup {
    pub fn parse(source: &str) -> Result<Self> {
        toml::from_str(source).context("Failed to parse page markup")
    }

    pub fn build(&self) -> SimDocument {
        let viewport = self
            .viewport
            .map(|v| Viewport { width: v.width, height: v.height })
            .unwrap_or(Viewport { width: VIEWPORT_WIDTH, height: VIEWPORT_HEIGHT });
        let mut doc = SimDocument::new(viewport);
        let root = doc.root();
        for spec in &self.elements {
            build_element(&mut doc, root, spec);
        }
        doc
    }
}

fn build_element(doc: &mut SimDocument, parent: ElementId, spec: &ElementSpec) -> ElementId {
    let el = doc.insert(Some(parent), &spec.tag, spec.id.as_deref(), &spec.class);
    for (name, value) in &spec.attributes {
        doc.set_attribute(el, name, value);
    }
    for (property, value) in &spec.style {
        doc.set_style(el, property, value);
    }
    if !spec.text.is_empty() {
        doc.set_text(el, &spec.text);
    }
    if !spec.html.is_empty() {
        doc.set_inner_html(el, &spec.html);
    }
    if let Some(rect) = &spec.rect {
        let width = rect.width.unwrap_or(doc.viewport().width - rect.left);
        doc.set_rect(el, Rect { left: rect.left, top: rect.top, width, height: rect.height });
    }
    for (property, duration) in &spec.transitions {
        doc.declare_transition(el, property, *duration);
    }
    for child in &spec.children {
        build_element(doc, el, child);
    }
    el
}

impl SimDocument {
    pub fn from_markup(source: &str) -> Result<Self> {
        Ok(Markup::parse(source)?.build())
    }

    pub fn load(path: &Path) -> Result<Self> {
        let source = fs::read_to_string(path)
            .with_context(|| format!("Failed to read page markup {}", path.display()))?;
        Markup::parse(&source)
            .with_context(|| format!("Invalid page markup in {}", path.display()))
            .map(|markup| markup.build())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"
        [viewport]
        width = 800
        height = 600

        [[element]]
        tag = "header"
        id = "main-header"
        class = "logo-center animation-element"
        transitions = { transform = 800 }
        rect = { top = 0, height = 100 }

        [[element.children]]
        tag = "img"
        id = "blossoms-logo"
        style = { opacity = "0" }

        [[element]]
        tag = "button"
        class = "nav-btn"
        attributes = { "data-month" = "november" }
        text = "November"
    "#;

    #[test]
    fn builds_nested_elements() {
        let doc = SimDocument::from_markup(PAGE).unwrap();
        let header = doc.element_by_id("main-header").unwrap();
        let logo = doc.element_by_id("blossoms-logo").unwrap();

        assert_eq!(doc.viewport(), Viewport { width: 800.0, height: 600.0 });
        assert!(doc.has_class(header, "logo-center"));
        assert!(doc.has_class(header, "animation-element"));
        assert_eq!(doc.descendants_by_tag(header, &["img"]), vec![logo]);
        assert_eq!(doc.style(logo, "opacity").as_deref(), Some("0"));
        assert_eq!(doc.node(header).unwrap().rect.width, 800.0);
        assert_eq!(doc.node(header).unwrap().transitions.get("transform"), Some(&800));

        let button = doc.elements_by_class("nav-btn")[0];
        assert_eq!(doc.attribute(button, "data-month").as_deref(), Some("november"));
        assert_eq!(doc.text(button).as_deref(), Some("November"));
    }

    #[test]
    fn rejects_malformed_markup() {
        assert!(SimDocument::from_markup("[[element]]\ntag = 3").is_err());
    }

    #[test]
    fn empty_markup_is_an_empty_page() {
        let doc = SimDocument::from_markup("").unwrap();
        assert!(doc.elements().is_empty());
    }
}
