//! HTML fragment → element tree absorption.
//!
//! Fetched fragments arrive as HTML text. This module parses them
//! leniently and grafts the result under a mount element, mapping tags
//! to [`Role`]s and keeping only the attributes the behaviors query:
//! `id`, `class`, `data-cursor`, `href`, and `name`.

use scraper::{ElementRef, Html, Node};

use vitrine_types::{Document, Element, ElementId, HoverFlavor, Role};

/// Replaces the children of `mount` with the parsed content of `html`.
///
/// Re-injection is idempotent: the previous subtree is unlinked first.
pub fn inject_fragment(doc: &mut Document, mount: ElementId, html: &str) {
    doc.clear_children(mount);
    let parsed = Html::parse_fragment(html);
    absorb_children(doc, mount, parsed.root_element());
}

fn absorb_children(doc: &mut Document, parent: ElementId, element: ElementRef<'_>) {
    for child in element.children() {
        match child.value() {
            Node::Element(_) => {
                if let Some(el) = ElementRef::wrap(child) {
                    absorb_element(doc, parent, el);
                }
            }
            Node::Text(text) => {
                let collapsed = collapse_whitespace(text);
                if !collapsed.is_empty() {
                    append_text(doc, parent, &collapsed);
                }
            }
            _ => {}
        }
    }
}

fn absorb_element(doc: &mut Document, parent: ElementId, el: ElementRef<'_>) {
    let tag = el.value().name();

    // Non-content elements contribute nothing to the tree.
    if matches!(tag, "script" | "style" | "noscript" | "template") {
        return;
    }

    let mut element = Element::new(role_for_tag(tag));
    if let Some(id) = el.value().attr("id") {
        element.dom_id = Some(id.to_string());
    }
    if let Some(class) = el.value().attr("class") {
        element.classes = class.split_whitespace().map(str::to_string).collect();
    }
    if let Some(hint) = el.value().attr("data-cursor") {
        element.cursor_hint = Some(HoverFlavor::parse(hint));
    }
    if let Some(href) = el.value().attr("href") {
        element.href = Some(href.to_string());
    }
    if let Some(name) = el.value().attr("name") {
        element.name = Some(name.to_string());
    }

    let id = doc.push(parent, element);
    absorb_children(doc, id, el);
}

fn role_for_tag(tag: &str) -> Role {
    match tag {
        "section" => Role::Section,
        "nav" => Role::Nav,
        "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => Role::Heading,
        "p" | "span" | "label" | "pre" | "code" | "strong" | "em" | "small" => Role::Text,
        "a" => Role::Link,
        "button" => Role::Button,
        "ul" | "ol" => Role::List,
        "li" => Role::Item,
        "form" => Role::Form,
        "input" | "textarea" | "select" => Role::Field,
        _ => Role::Block,
    }
}

fn append_text(doc: &mut Document, id: ElementId, text: &str) {
    let Some(element) = doc.get_mut(id) else {
        return;
    };
    if !element.text.is_empty() {
        element.text.push(' ');
    }
    element.text.push_str(text);
}

/// Collapse whitespace to single spaces.
fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}
