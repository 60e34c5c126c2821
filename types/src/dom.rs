//! In-memory element tree.
//!
//! The page is modeled as an arena of elements addressed by [`ElementId`].
//! Queries mirror the lookups the behaviors need: by DOM id, by marker
//! class, by role, and scoped to an injected subtree.

use std::fmt;

use crate::pointer::HoverFlavor;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct ElementId(u32);

impl ElementId {
    #[must_use]
    pub fn new(id: u32) -> Self {
        Self(id)
    }

    #[must_use]
    pub fn value(self) -> u32 {
        self.0
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Structural role of an element, the coarse equivalent of a tag name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Role {
    #[default]
    Block,
    Section,
    Nav,
    Heading,
    Text,
    Link,
    Button,
    List,
    Item,
    Form,
    Field,
}

/// One node of the page tree.
///
/// `dom_id`, `classes`, and `cursor_hint` carry the attributes the binding
/// pass queries on; everything else is presentation data.
#[derive(Debug, Clone, Default)]
pub struct Element {
    pub role: Role,
    pub dom_id: Option<String>,
    pub classes: Vec<String>,
    pub cursor_hint: Option<HoverFlavor>,
    pub href: Option<String>,
    /// Form field name, used as the payload key on submit.
    pub name: Option<String>,
    pub text: String,
    pub children: Vec<ElementId>,
}

impl Element {
    #[must_use]
    pub fn new(role: Role) -> Self {
        Self {
            role,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_dom_id(mut self, id: impl Into<String>) -> Self {
        self.dom_id = Some(id.into());
        self
    }

    #[must_use]
    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.classes.push(class.into());
        self
    }

    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    #[must_use]
    pub fn with_href(mut self, href: impl Into<String>) -> Self {
        self.href = Some(href.into());
        self
    }

    #[must_use]
    pub fn with_cursor_hint(mut self, flavor: HoverFlavor) -> Self {
        self.cursor_hint = Some(flavor);
        self
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }
}

/// Element arena rooted at a single block node.
///
/// Nodes are never freed; unlinking a subtree (see [`Document::clear_children`])
/// leaves its nodes unreachable, which is fine for a page-lifetime tree.
#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<Element>,
}

impl Document {
    #[must_use]
    pub fn new() -> Self {
        Self {
            nodes: vec![Element::new(Role::Block)],
        }
    }

    #[must_use]
    pub fn root(&self) -> ElementId {
        ElementId(0)
    }

    /// Appends `element` as the last child of `parent`.
    pub fn push(&mut self, parent: ElementId, element: Element) -> ElementId {
        let id = ElementId(self.nodes.len() as u32);
        self.nodes.push(element);
        if let Some(node) = self.nodes.get_mut(parent.0 as usize) {
            node.children.push(id);
        }
        id
    }

    #[must_use]
    pub fn get(&self, id: ElementId) -> Option<&Element> {
        self.nodes.get(id.0 as usize)
    }

    pub fn get_mut(&mut self, id: ElementId) -> Option<&mut Element> {
        self.nodes.get_mut(id.0 as usize)
    }

    /// Unlinks all children of `id`. The old subtree stays allocated but
    /// becomes unreachable from the root.
    pub fn clear_children(&mut self, id: ElementId) {
        if let Some(node) = self.nodes.get_mut(id.0 as usize) {
            node.children.clear();
        }
    }

    pub fn set_text(&mut self, id: ElementId, text: impl Into<String>) {
        if let Some(node) = self.nodes.get_mut(id.0 as usize) {
            node.text = text.into();
        }
    }

    /// Preorder walk of every element reachable from the root.
    #[must_use]
    pub fn walk(&self) -> Vec<ElementId> {
        self.walk_from(self.root())
    }

    /// Preorder walk of the subtree rooted at `start` (inclusive).
    #[must_use]
    pub fn walk_from(&self, start: ElementId) -> Vec<ElementId> {
        let mut order = Vec::new();
        let mut stack = vec![start];
        while let Some(id) = stack.pop() {
            let Some(node) = self.get(id) else { continue };
            order.push(id);
            for child in node.children.iter().rev() {
                stack.push(*child);
            }
        }
        order
    }

    /// First element (document order) whose `dom_id` matches.
    #[must_use]
    pub fn element_by_dom_id(&self, dom_id: &str) -> Option<ElementId> {
        self.walk()
            .into_iter()
            .find(|id| self.get(*id).and_then(|n| n.dom_id.as_deref()) == Some(dom_id))
    }

    /// Like [`Document::element_by_dom_id`] but restricted to one subtree.
    #[must_use]
    pub fn descendant_by_dom_id(&self, root: ElementId, dom_id: &str) -> Option<ElementId> {
        self.walk_from(root)
            .into_iter()
            .find(|id| self.get(*id).and_then(|n| n.dom_id.as_deref()) == Some(dom_id))
    }

    /// All reachable elements carrying `class`, in document order.
    #[must_use]
    pub fn elements_with_class(&self, class: &str) -> Vec<ElementId> {
        self.walk()
            .into_iter()
            .filter(|id| self.get(*id).is_some_and(|n| n.has_class(class)))
            .collect()
    }

    /// All reachable elements of `role`, in document order.
    #[must_use]
    pub fn elements_with_role(&self, role: Role) -> Vec<ElementId> {
        self.walk()
            .into_iter()
            .filter(|id| self.get(*id).is_some_and(|n| n.role == role))
            .collect()
    }

    /// Links anywhere under `root` (exclusive of `root` itself unless it is a link).
    #[must_use]
    pub fn links_under(&self, root: ElementId) -> Vec<ElementId> {
        self.walk_from(root)
            .into_iter()
            .filter(|id| self.get(*id).is_some_and(|n| n.role == Role::Link))
            .collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}
