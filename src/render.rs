//! HTML serialization for content trees.
//!
//! The string boundary out of the tree: fragments serialize to bare markup,
//! documents serialize with their doctype declaration.

use crate::node::{Document, Element, Node};

// =============================================================================
// Rendering
// =============================================================================

/// Render a document to an HTML string, doctype included when present.
pub fn render_document(doc: &Document) -> String {
    let mut output = String::new();
    if let Some(name) = &doc.doctype {
        output.push_str("<!DOCTYPE ");
        output.push_str(name);
        output.push_str(">\n");
    }
    render_element(&doc.root, &mut output);
    output
}

/// Render a list of nodes to an HTML fragment string.
pub fn render_fragment(nodes: &[Node]) -> String {
    let mut output = String::new();
    for node in nodes {
        render_node(node, &mut output);
    }
    output
}

/// Render a single element to an HTML string.
pub fn render_element_string(elem: &Element) -> String {
    let mut output = String::new();
    render_element(elem, &mut output);
    output
}

fn render_element(elem: &Element, output: &mut String) {
    output.push('<');
    output.push_str(&elem.tag);

    for (name, value) in elem.attrs.iter() {
        output.push(' ');
        output.push_str(name);
        output.push_str("=\"");
        output.push_str(&escape_attr(value));
        output.push('"');
    }

    // Void elements carry no children and no closing tag
    if is_void_element(&elem.tag) {
        output.push_str(" />");
        return;
    }

    output.push('>');

    for child in &elem.children {
        render_node(child, output);
    }

    output.push_str("</");
    output.push_str(&elem.tag);
    output.push('>');
}

fn render_node(node: &Node, output: &mut String) {
    match node {
        Node::Element(elem) => render_element(elem, output),
        Node::Text(text) => {
            if text.is_raw() {
                output.push_str(&text.content);
            } else {
                output.push_str(&escape_html(&text.content));
            }
        }
    }
}

// =============================================================================
// Escaping
// =============================================================================

/// Escape HTML special characters in text content.
pub fn escape_html(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            _ => result.push(c),
        }
    }
    result
}

/// Escape attribute value special characters.
pub fn escape_attr(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '"' => result.push_str("&quot;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            _ => result.push(c),
        }
    }
    result
}

/// Check if element is a void element (self-closing).
pub fn is_void_element(tag: &str) -> bool {
    matches!(
        tag,
        "area"
            | "base"
            | "br"
            | "col"
            | "embed"
            | "hr"
            | "img"
            | "input"
            | "link"
            | "meta"
            | "param"
            | "source"
            | "track"
            | "wbr"
    )
}
