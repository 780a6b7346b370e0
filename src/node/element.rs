//! Element type - the core building block of the content tree.

use compact_str::CompactString;

use crate::attr::Attrs;

use super::{Children, Node, Text};

/// HTML tag name.
pub type Tag = CompactString;

// =============================================================================
// Element
// =============================================================================

/// HTML element with attributes and children.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    /// HTML tag name (lowercase)
    pub tag: Tag,
    /// Element attributes
    pub attrs: Attrs,
    /// Child nodes
    pub children: Children,
}

impl Element {
    /// Create an element with no attributes or children.
    pub fn new(tag: impl AsRef<str>) -> Self {
        Self {
            tag: Tag::from(tag.as_ref()),
            attrs: Attrs::new(),
            children: Children::new(),
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Builder API
    // ─────────────────────────────────────────────────────────────────────────

    /// Set an attribute (builder form).
    pub fn attr(mut self, name: impl Into<CompactString>, value: impl Into<String>) -> Self {
        self.attrs.set(name, value);
        self
    }

    /// Set the `class` attribute (builder form).
    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.attrs.set("class", class);
        self
    }

    /// Append a child element (builder form).
    pub fn child(mut self, elem: Element) -> Self {
        self.children.push(Node::Element(Box::new(elem)));
        self
    }

    /// Append a text child (builder form).
    pub fn text(mut self, content: impl Into<String>) -> Self {
        self.children.push(Node::Text(Text::new(content)));
        self
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Attribute access
    // ─────────────────────────────────────────────────────────────────────────

    /// Get attribute value by name.
    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attrs.get(name)
    }

    /// Set attribute value (update if exists, add if not).
    pub fn set_attr(&mut self, name: impl Into<CompactString>, value: impl Into<String>) {
        self.attrs.set(name, value);
    }

    /// Remove attribute by name, returning the old value if it existed.
    pub fn remove_attr(&mut self, name: &str) -> Option<String> {
        self.attrs.remove(name)
    }

    /// Check if attribute exists.
    pub fn has_attr(&self, name: &str) -> bool {
        self.attrs.has(name)
    }

    /// The `class` attribute value, if any.
    pub fn class(&self) -> Option<&str> {
        self.attrs.get("class")
    }

    /// Check whether the class list contains a token.
    pub fn has_class(&self, class: &str) -> bool {
        self.attrs.has_class(class)
    }

    /// Add a class token if missing. Idempotent.
    pub fn add_class(&mut self, class: &str) {
        self.attrs.add_class(class);
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Inline style helpers
    // ─────────────────────────────────────────────────────────────────────────

    /// Get a single declaration value from the `style` attribute.
    pub fn style_prop(&self, name: &str) -> Option<String> {
        let style = self.get_attr("style")?;
        for decl in style.split(';') {
            let mut parts = decl.splitn(2, ':');
            let key = parts.next()?.trim();
            if key.eq_ignore_ascii_case(name) {
                return parts.next().map(|v| v.trim().to_string());
            }
        }
        None
    }

    /// Set a single declaration in the `style` attribute, preserving the rest.
    pub fn set_style_prop(&mut self, name: &str, value: &str) {
        let mut decls = self.style_decls();
        if let Some(decl) = decls.iter_mut().find(|(k, _)| k.eq_ignore_ascii_case(name)) {
            decl.1 = value.to_string();
        } else {
            decls.push((name.to_string(), value.to_string()));
        }
        self.write_style_decls(decls);
    }

    /// Remove a single declaration; drops the `style` attribute when empty.
    pub fn remove_style_prop(&mut self, name: &str) {
        let decls: Vec<(String, String)> = self
            .style_decls()
            .into_iter()
            .filter(|(k, _)| !k.eq_ignore_ascii_case(name))
            .collect();
        self.write_style_decls(decls);
    }

    fn style_decls(&self) -> Vec<(String, String)> {
        let Some(style) = self.get_attr("style") else {
            return Vec::new();
        };
        style
            .split(';')
            .filter_map(|decl| {
                let mut parts = decl.splitn(2, ':');
                let key = parts.next()?.trim();
                let value = parts.next()?.trim();
                if key.is_empty() {
                    None
                } else {
                    Some((key.to_string(), value.to_string()))
                }
            })
            .collect()
    }

    fn write_style_decls(&mut self, decls: Vec<(String, String)>) {
        if decls.is_empty() {
            self.remove_attr("style");
            return;
        }
        let style = decls
            .iter()
            .map(|(k, v)| format!("{k}: {v}"))
            .collect::<Vec<_>>()
            .join("; ");
        self.set_attr("style", style);
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Children access
    // ─────────────────────────────────────────────────────────────────────────

    /// Check if element has no children.
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Number of direct children (all node types).
    pub fn len(&self) -> usize {
        self.children.len()
    }

    /// Append a child element.
    pub fn push_elem(&mut self, elem: Element) {
        self.children.push(Node::Element(Box::new(elem)));
    }

    /// Append a text child.
    pub fn push_text(&mut self, content: impl Into<String>) {
        self.children.push(Node::Text(Text::new(content)));
    }

    /// Insert a node at a child index (append when out of range).
    pub fn insert_child(&mut self, index: usize, node: Node) {
        let index = index.min(self.children.len());
        self.children.insert(index, node);
    }

    /// Remove and return the child at an index, if in range.
    pub fn remove_child(&mut self, index: usize) -> Option<Node> {
        if index < self.children.len() {
            Some(self.children.remove(index))
        } else {
            None
        }
    }

    /// First child element, if any.
    pub fn first_child(&self) -> Option<&Element> {
        self.children.iter().find_map(|n| n.as_element())
    }

    /// Iterate over child element references.
    pub fn children_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|n| n.as_element())
    }

    /// Iterate over child element mutable references.
    pub fn children_elements_mut(&mut self) -> impl Iterator<Item = &mut Element> {
        self.children.iter_mut().filter_map(|n| n.as_element_mut())
    }

    /// Text content of this element, concatenated from all text descendants.
    pub fn text_content(&self) -> String {
        let mut result = String::new();
        self.collect_text(&mut result);
        result
    }

    fn collect_text(&self, buf: &mut String) {
        for child in &self.children {
            match child {
                Node::Text(t) => buf.push_str(&t.content),
                Node::Element(e) => e.collect_text(buf),
            }
        }
    }

    /// Replace all children with a single text node.
    pub fn set_text(&mut self, content: impl Into<String>) {
        self.children.clear();
        self.children.push(Node::Text(Text::new(content)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_element_basics() {
        let elem = Element::new("div");
        assert_eq!(elem.tag, "div");
        assert!(elem.is_empty());
        assert_eq!(elem.len(), 0);
    }

    #[test]
    fn test_element_builder() {
        let elem = Element::new("div")
            .attr("id", "main")
            .with_class("container")
            .child(Element::new("span"))
            .text("Hello");

        assert_eq!(elem.get_attr("id"), Some("main"));
        assert_eq!(elem.class(), Some("container"));
        assert_eq!(elem.len(), 2);
        assert_eq!(elem.text_content(), "Hello");
        assert_eq!(elem.first_child().map(|e| &*e.tag), Some("span"));
    }

    #[test]
    fn test_style_props() {
        let mut elem = Element::new("img");
        elem.set_style_prop("max-width", "100%");
        elem.set_style_prop("height", "auto");
        assert_eq!(elem.style_prop("max-width").as_deref(), Some("100%"));
        assert_eq!(
            elem.get_attr("style"),
            Some("max-width: 100%; height: auto")
        );

        elem.set_style_prop("max-width", "50%");
        assert_eq!(elem.style_prop("max-width").as_deref(), Some("50%"));

        elem.remove_style_prop("max-width");
        elem.remove_style_prop("height");
        assert!(!elem.has_attr("style"));
    }

    #[test]
    fn test_child_insert_remove() {
        let mut parent = Element::new("p");
        parent.push_text("one");
        parent.push_elem(Element::new("b"));
        parent.insert_child(1, Node::Text(Text::new("mid")));

        assert_eq!(parent.len(), 3);
        let removed = parent.remove_child(1).unwrap();
        assert_eq!(removed.as_text().map(|t| t.content.as_str()), Some("mid"));
        assert!(parent.remove_child(5).is_none());
    }
}
