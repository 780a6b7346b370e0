//! HTML string → content tree conversion.
//!
//! Parsing goes through `scraper` (html5ever underneath), which
//! error-recovers on any input: there is no failure mode, malformed markup
//! degrades to whatever tree the recovery produces.

use compact_str::CompactString;
use ego_tree::NodeRef;
use scraper::Html;
use scraper::node::Node as HtmlNode;

use crate::node::{Children, Document, Element, Node, Text};

type DomRef<'a> = NodeRef<'a, HtmlNode>;

/// Parse a bare markup fragment into a list of nodes.
pub fn parse_fragment(html: &str) -> Children {
    let parsed = Html::parse_fragment(html);
    let root = parsed.tree.root();
    // html5ever wraps fragment content in a synthetic <html> element
    let container = root
        .children()
        .find(|n| matches!(n.value(), HtmlNode::Element(e) if e.name() == "html"));
    let mut out = Children::new();
    convert_children(container.unwrap_or(root), &mut out);
    out
}

/// Parse a complete HTML document into a tree rooted at `<html>`.
pub fn parse_document(html: &str) -> Document {
    let parsed = Html::parse_document(html);
    let root = parsed.tree.root();

    let mut doctype = None;
    let mut html_node = None;
    for child in root.children() {
        match child.value() {
            HtmlNode::Doctype(d) => doctype = Some(CompactString::from(d.name())),
            HtmlNode::Element(_) if html_node.is_none() => html_node = Some(child),
            _ => {}
        }
    }

    let root_elem = if let Some(node) = html_node
        && let HtmlNode::Element(el) = node.value()
    {
        convert_element(node, el)
    } else {
        // Recovery produced no element at all; keep whatever nodes exist
        let mut body = Element::new("body");
        convert_children(root, &mut body.children);
        body
    };

    Document {
        doctype,
        root: root_elem,
    }
}

fn convert_element(node: DomRef<'_>, el: &scraper::node::Element) -> Element {
    let mut elem = Element::new(el.name());
    for (name, value) in el.attrs() {
        elem.set_attr(name, value);
    }
    // script/style content is raw text, never entity-escaped on re-render
    if matches!(el.name(), "script" | "style") {
        for child in node.children() {
            if let HtmlNode::Text(t) = child.value() {
                elem.children.push(Node::Text(Text::raw(t.to_string())));
            }
        }
    } else {
        convert_children(node, &mut elem.children);
    }
    elem
}

fn convert_children(node: DomRef<'_>, out: &mut Children) {
    for child in node.children() {
        match child.value() {
            HtmlNode::Element(el) => {
                out.push(Node::Element(Box::new(convert_element(child, el))));
            }
            HtmlNode::Text(t) => out.push(Node::Text(Text::new(t.to_string()))),
            // Comments, nested doctypes and processing instructions are dropped
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::render_fragment;

    #[test]
    fn test_parse_fragment_structure() {
        let nodes = parse_fragment("<p>Hello <strong>world</strong></p>");
        assert_eq!(nodes.len(), 1);
        let p = nodes[0].as_element().unwrap();
        assert_eq!(p.tag, "p");
        assert_eq!(p.text_content(), "Hello world");
    }

    #[test]
    fn test_parse_fragment_round_trip() {
        let html = "<p>Hello <strong>world</strong></p><div class=\"x\">more</div>";
        let nodes = parse_fragment(html);
        assert_eq!(render_fragment(&nodes), html);
    }

    #[test]
    fn test_parse_attribute_order_deterministic() {
        // The parser hands attributes back in hash order; storage sorts
        // them, so re-rendering the same markup is stable across runs
        let html = "<p style=\"color: red\" id=\"a\" data-x=\"1\" class=\"b\">x</p>";
        let rendered = render_fragment(&parse_fragment(html));
        assert_eq!(
            rendered,
            "<p class=\"b\" data-x=\"1\" id=\"a\" style=\"color: red\">x</p>"
        );
        assert_eq!(render_fragment(&parse_fragment(&rendered)), rendered);
    }

    #[test]
    fn test_parse_document_with_doctype() {
        let doc = parse_document(
            "<!DOCTYPE html><html><head><title>T</title></head><body><p>x</p></body></html>",
        );
        assert_eq!(doc.doctype.as_deref(), Some("html"));
        assert_eq!(doc.root.tag, "html");
        assert!(doc.any(|e| e.tag == "title"));
        assert!(doc.any(|e| e.tag == "p"));
    }

    #[test]
    fn test_parse_malformed_recovers() {
        // Unclosed tags never error, they produce a recovered tree
        let nodes = parse_fragment("<div><p>unclosed");
        assert_eq!(nodes.len(), 1);
        assert_eq!(nodes[0].text_content(), "unclosed");
    }

    #[test]
    fn test_parse_entities_decoded() {
        let nodes = parse_fragment("<p>a &amp; b</p>");
        assert_eq!(nodes[0].text_content(), "a & b");
        // Re-render escapes again
        assert_eq!(render_fragment(&nodes), "<p>a &amp; b</p>");
    }
}
