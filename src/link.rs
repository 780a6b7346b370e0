//! Hyperlink creation, editing, and plain-text auto-linking.

use std::ops::Range;
use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::command::split_wrap_text;
use crate::error::{EditResult, EditorError};
use crate::node::{Document, Element, Node, NodePath, Text};
use crate::selection::{Caret, SelectionRange};

static URL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)\bhttps?://[^\s<>"']+"#).expect("URL_RE: hardcoded regex is valid")
});

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b[a-z0-9._%+-]+@[a-z0-9.-]+\.[a-z]{2,}\b")
        .expect("EMAIL_RE: hardcoded regex is valid")
});

/// Editable attributes of an anchor element. Only `href` is required;
/// empty optional fields leave (or clear) the corresponding attribute.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkAttrs {
    pub href: String,
    /// Anchor text; empty falls back to the href (on create) or keeps the
    /// current text (on edit)
    pub text: String,
    pub target: String,
    pub rel: String,
    pub title: String,
    pub class: String,
}

impl LinkAttrs {
    pub fn new(href: impl Into<String>) -> Self {
        Self {
            href: href.into(),
            ..Self::default()
        }
    }
}

/// The anchor containing a position, if any.
pub fn anchor_at(doc: &Document, path: &NodePath) -> Option<NodePath> {
    doc.ancestor_with_tag(path, "a")
}

/// Read the editable attributes back off an anchor element.
pub fn link_attrs(anchor: &Element) -> LinkAttrs {
    let attr = |name: &str| anchor.get_attr(name).unwrap_or_default().to_string();
    LinkAttrs {
        href: attr("href"),
        text: anchor.text_content(),
        target: attr("target"),
        rel: attr("rel"),
        title: attr("title"),
        class: attr("class"),
    }
}

/// Build a standalone anchor element.
pub fn build_anchor(attrs: &LinkAttrs) -> EditResult<Element> {
    if attrs.href.trim().is_empty() {
        return Err(EditorError::EmptyHref);
    }
    let mut anchor = Element::new("a");
    set_anchor_attrs(&mut anchor, attrs);
    let text = if attrs.text.is_empty() {
        attrs.href.as_str()
    } else {
        attrs.text.as_str()
    };
    anchor.push_text(text);
    Ok(anchor)
}

fn set_anchor_attrs(anchor: &mut Element, attrs: &LinkAttrs) {
    anchor.set_attr("href", &*attrs.href);
    set_opt(anchor, "target", &attrs.target);
    set_opt(anchor, "rel", &attrs.rel);
    set_opt(anchor, "title", &attrs.title);
    set_opt(anchor, "class", &attrs.class);
}

fn set_opt(anchor: &mut Element, name: &str, value: &str) {
    if value.is_empty() {
        anchor.remove_attr(name);
    } else {
        anchor.set_attr(name, value.to_string());
    }
}

/// Create or edit a link at the selection.
///
/// Inside an existing anchor the attributes are applied in place and a
/// non-empty `text` replaces the anchor content wholesale. Otherwise a
/// non-collapsed selection within one text node is wrapped, and a
/// collapsed caret gets a fresh anchor inserted at its position. Returns
/// whether the tree changed.
pub fn apply_link(doc: &mut Document, sel: &SelectionRange, attrs: &LinkAttrs) -> EditResult<bool> {
    if attrs.href.trim().is_empty() {
        return Err(EditorError::EmptyHref);
    }
    let (start, end) = sel.normalized();

    if let Some(path) = anchor_at(doc, &start.path) {
        let Some(anchor) = doc.element_at_mut(&path) else {
            return Ok(false);
        };
        set_anchor_attrs(anchor, attrs);
        if !attrs.text.is_empty() {
            anchor.set_text(&*attrs.text);
        }
        debug!(href = %attrs.href, "edited link in place");
        return Ok(true);
    }

    if !sel.is_collapsed() && start.path == end.path {
        let attrs = attrs.clone();
        let path = start.path.clone();
        let changed = split_wrap_text(doc, &path, start.offset, end.offset, move |mid| {
            let mut anchor = Element::new("a");
            set_anchor_attrs(&mut anchor, &attrs);
            anchor.push_text(mid);
            Node::Element(Box::new(anchor))
        });
        return Ok(changed.is_some());
    }

    let anchor = build_anchor(attrs)?;
    Ok(insert_at_caret(doc, start, Node::Element(Box::new(anchor))))
}

/// Unwrap the anchor containing a position into its plain text.
pub fn remove_link(doc: &mut Document, path: &NodePath) -> bool {
    let Some(anchor_path) = anchor_at(doc, path) else {
        return false;
    };
    let text = match doc.element_at(&anchor_path) {
        Some(anchor) => anchor.text_content(),
        None => return false,
    };
    doc.splice_at(&anchor_path, vec![Node::Text(Text::new(text))])
}

/// Insert a node at a caret position: splits the text node the caret sits
/// in, or inserts as a child of the addressed element, or appends to the
/// root when the path resolves to nothing.
pub(crate) fn insert_at_caret(doc: &mut Document, caret: &Caret, node: Node) -> bool {
    if let Some(text) = doc.node_at(&caret.path).and_then(|n| n.as_text()) {
        let content = text.content.clone();
        let mut at = caret.offset.min(content.len());
        while at > 0 && !content.is_char_boundary(at) {
            at -= 1;
        }
        let mut replacement = Vec::with_capacity(3);
        if at > 0 {
            replacement.push(Node::Text(Text::new(&content[..at])));
        }
        replacement.push(node);
        if at < content.len() {
            replacement.push(Node::Text(Text::new(&content[at..])));
        }
        return doc.splice_at(&caret.path, replacement);
    }
    if doc.node_at(&caret.path).is_some() {
        if let Some(elem) = doc.element_at_mut(&caret.path) {
            elem.insert_child(caret.offset, node);
            return true;
        }
        return false;
    }
    doc.root.children.push(node);
    true
}

// =============================================================================
// Auto-linking
// =============================================================================

enum Detected {
    Url,
    Email,
}

/// Convert bare URLs and email addresses in text content into anchors.
/// Text already inside an anchor is left alone, so the pass is idempotent.
/// Returns the number of anchors created.
pub fn autolink(doc: &mut Document) -> usize {
    let created = autolink_children(&mut doc.root);
    if created > 0 {
        debug!(anchors = created, "auto-linked plain text");
    }
    created
}

fn autolink_children(elem: &mut Element) -> usize {
    if elem.tag == "a" {
        return 0;
    }
    let mut created = 0;
    let mut idx = 0;
    while idx < elem.children.len() {
        let replacement = match &elem.children[idx] {
            Node::Text(text) if !text.is_raw() => {
                let spans = link_spans(&text.content);
                if spans.is_empty() {
                    None
                } else {
                    Some(splice_spans(&text.content, &spans))
                }
            }
            _ => None,
        };
        match replacement {
            Some(nodes) => {
                created += nodes.iter().filter(|n| n.is_element()).count();
                let count = nodes.len();
                elem.children.remove(idx);
                for (k, node) in nodes.into_iter().enumerate() {
                    elem.children.insert(idx + k, node);
                }
                idx += count;
            }
            None => {
                if let Node::Element(child) = &mut elem.children[idx] {
                    created += autolink_children(child);
                }
                idx += 1;
            }
        }
    }
    created
}

/// Non-overlapping linkable spans in source order. URLs win overlaps
/// against emails (a URL can contain an @).
fn link_spans(text: &str) -> Vec<(Range<usize>, Detected)> {
    let mut spans: Vec<(Range<usize>, Detected)> = URL_RE
        .find_iter(text)
        .map(|m| {
            let mut range = m.range();
            trim_url_tail(text, &mut range);
            (range, Detected::Url)
        })
        .filter(|(r, _)| !r.is_empty())
        .collect();
    for m in EMAIL_RE.find_iter(text) {
        let range = m.range();
        let clear = spans
            .iter()
            .all(|(u, _)| range.end <= u.start || range.start >= u.end);
        if clear {
            spans.push((range, Detected::Email));
        }
    }
    spans.sort_by_key(|(r, _)| r.start);
    spans
}

/// Trailing sentence punctuation belongs to the prose, not the URL.
fn trim_url_tail(text: &str, range: &mut Range<usize>) {
    while range.end > range.start
        && matches!(
            text.as_bytes()[range.end - 1],
            b'.' | b',' | b';' | b':' | b'!' | b'?' | b')'
        )
    {
        range.end -= 1;
    }
}

fn splice_spans(content: &str, spans: &[(Range<usize>, Detected)]) -> Vec<Node> {
    let mut nodes = Vec::new();
    let mut last = 0;
    for (range, kind) in spans {
        if range.start > last {
            nodes.push(Node::Text(Text::new(&content[last..range.start])));
        }
        let matched = &content[range.clone()];
        let mut anchor = Element::new("a");
        match kind {
            Detected::Url => {
                anchor.set_attr("href", matched);
                anchor.set_attr("target", "_blank");
                anchor.set_attr("rel", "noopener noreferrer");
            }
            Detected::Email => {
                anchor.set_attr("href", format!("mailto:{matched}"));
            }
        }
        anchor.push_text(matched);
        nodes.push(Node::Element(Box::new(anchor)));
        last = range.end;
    }
    if last < content.len() {
        nodes.push(Node::Text(Text::new(&content[last..])));
    }
    nodes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::render_fragment;
    use crate::selection::Caret;

    fn surface(html: &str) -> Document {
        let mut root = Element::new("body");
        root.children = crate::parse::parse_fragment(html);
        Document::new(root)
    }

    fn text_range(path: &[usize], start: usize, end: usize) -> SelectionRange {
        SelectionRange::new(
            Caret::new(path.iter().copied().collect(), start),
            Caret::new(path.iter().copied().collect(), end),
        )
    }

    #[test]
    fn test_build_anchor_requires_href() {
        assert!(build_anchor(&LinkAttrs::new("")).is_err());
        assert!(build_anchor(&LinkAttrs::new("  ")).is_err());

        let anchor = build_anchor(&LinkAttrs::new("https://example.com")).unwrap();
        // Text falls back to the href
        assert_eq!(anchor.text_content(), "https://example.com");
    }

    #[test]
    fn test_apply_link_wraps_selection() {
        let mut doc = surface("<p>visit here today</p>");
        let sel = text_range(&[0, 0], 6, 10);
        let mut attrs = LinkAttrs::new("https://example.com");
        attrs.target = "_blank".to_string();
        assert!(apply_link(&mut doc, &sel, &attrs).unwrap());
        assert_eq!(
            render_fragment(&doc.root.children),
            "<p>visit <a href=\"https://example.com\" target=\"_blank\">here</a> today</p>"
        );
    }

    #[test]
    fn test_apply_link_edits_existing_anchor() {
        let mut doc = surface("<p><a href=\"https://old.example\">old text</a></p>");
        // Caret inside the anchor's text node
        let sel = SelectionRange::caret(Caret::new([0, 0, 0].iter().copied().collect(), 3));
        let mut attrs = LinkAttrs::new("https://new.example");
        attrs.text = "new text".to_string();
        attrs.title = "New".to_string();
        assert!(apply_link(&mut doc, &sel, &attrs).unwrap());
        assert_eq!(
            render_fragment(&doc.root.children),
            "<p><a href=\"https://new.example\" title=\"New\">new text</a></p>"
        );
    }

    #[test]
    fn test_apply_link_inserts_at_caret() {
        let mut doc = surface("<p>before after</p>");
        let sel = SelectionRange::caret(Caret::new([0, 0].iter().copied().collect(), 7));
        assert!(apply_link(&mut doc, &sel, &LinkAttrs::new("https://x.example")).unwrap());
        assert_eq!(
            render_fragment(&doc.root.children),
            "<p>before <a href=\"https://x.example\">https://x.example</a>after</p>"
        );
    }

    #[test]
    fn test_apply_link_collapsed_with_text() {
        let mut doc = surface("<p>x</p>");
        let sel = SelectionRange::caret(Caret::new([0, 0].iter().copied().collect(), 1));
        let mut attrs = LinkAttrs::new("https://example.com");
        attrs.text = "Example".to_string();
        assert!(apply_link(&mut doc, &sel, &attrs).unwrap());

        let anchor = doc.find(|e| e.tag == "a").unwrap();
        assert_eq!(anchor.get_attr("href"), Some("https://example.com"));
        assert_eq!(anchor.text_content(), "Example");
    }

    #[test]
    fn test_apply_link_rejects_empty_href() {
        let mut doc = surface("<p>text</p>");
        let sel = text_range(&[0, 0], 0, 4);
        assert!(apply_link(&mut doc, &sel, &LinkAttrs::new("")).is_err());
    }

    #[test]
    fn test_remove_link_unwraps_to_text() {
        let mut doc = surface("<p>see <a href=\"https://e.example\">the <em>docs</em></a></p>");
        let path: NodePath = [0, 1, 0].iter().copied().collect();
        assert!(remove_link(&mut doc, &path));
        assert_eq!(render_fragment(&doc.root.children), "<p>see the docs</p>");
    }

    #[test]
    fn test_autolink_urls_and_emails() {
        let mut doc = surface("<p>See https://example.com/docs, mail me@example.com.</p>");
        assert_eq!(autolink(&mut doc), 2);
        assert_eq!(
            render_fragment(&doc.root.children),
            "<p>See <a href=\"https://example.com/docs\" rel=\"noopener noreferrer\" \
             target=\"_blank\">https://example.com/docs</a>, \
             mail <a href=\"mailto:me@example.com\">me@example.com</a>.</p>"
        );
    }

    #[test]
    fn test_autolink_idempotent() {
        let mut doc = surface("<p>go to https://example.com now</p>");
        assert_eq!(autolink(&mut doc), 1);
        let once = render_fragment(&doc.root.children);
        assert_eq!(autolink(&mut doc), 0);
        assert_eq!(render_fragment(&doc.root.children), once);
    }

    #[test]
    fn test_autolink_skips_existing_anchors() {
        let mut doc = surface("<p><a href=\"https://a.example\">https://a.example</a></p>");
        assert_eq!(autolink(&mut doc), 0);
    }

    #[test]
    fn test_autolink_trims_trailing_punctuation() {
        let mut doc = surface("<p>(see https://example.com).</p>");
        assert_eq!(autolink(&mut doc), 1);
        let html = render_fragment(&doc.root.children);
        assert!(html.contains("href=\"https://example.com\""));
        assert!(html.ends_with(").</p>"));
    }
}
