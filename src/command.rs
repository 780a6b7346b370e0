//! Formatting commands applied to the current selection.
//!
//! Each command is a pure rewrite of the live tree: inline toggles split
//! text nodes and wrap or unwrap formatting elements, block commands retag
//! or restyle the top-level block containing the selection. The editor
//! wraps every invocation in selection save/restore and emits exactly one
//! change notification, no-op results included.

use smallvec::smallvec;

use crate::node::{Document, Element, Node, NodePath, Tag, Text};
use crate::selection::{Caret, SelectionRange};

// =============================================================================
// Command
// =============================================================================

/// Horizontal alignment for block content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alignment {
    Left,
    Center,
    Right,
}

impl Alignment {
    /// CSS `text-align` value.
    pub fn as_css(&self) -> &'static str {
        match self {
            Alignment::Left => "left",
            Alignment::Center => "center",
            Alignment::Right => "right",
        }
    }
}

/// A formatting operation against the current selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Bold,
    Italic,
    Underline,
    /// Block format change to a heading, level 1-3
    Heading(u8),
    Align(Alignment),
    UnorderedList,
    OrderedList,
    /// Foreground color (any CSS color value)
    ForeColor(String),
    /// Background/highlight color
    BackColor(String),
    Blockquote,
    CodeBlock,
}

/// Apply a formatting command to the selection. Returns the selection
/// remapped onto the rewritten tree, so a caret inside moved text keeps
/// addressing the same content, or `None` when the tree did not change
/// (commands on an empty selection are legitimate no-ops).
pub fn apply_command(
    doc: &mut Document,
    sel: &SelectionRange,
    cmd: &Command,
) -> Option<SelectionRange> {
    match cmd {
        Command::Bold => toggle_inline(doc, sel, "strong"),
        Command::Italic => toggle_inline(doc, sel, "em"),
        Command::Underline => toggle_inline(doc, sel, "u"),
        Command::ForeColor(color) => style_span(doc, sel, "color", color),
        Command::BackColor(color) => style_span(doc, sel, "background-color", color),
        Command::Heading(level) => set_block_tag(doc, sel, heading_tag(*level)),
        Command::Align(align) => align_block(doc, sel, *align),
        Command::Blockquote => toggle_block_wrap(doc, sel, "blockquote"),
        Command::CodeBlock => toggle_block_wrap(doc, sel, "pre"),
        Command::UnorderedList => toggle_list(doc, sel, "ul"),
        Command::OrderedList => toggle_list(doc, sel, "ol"),
    }
}

fn heading_tag(level: u8) -> &'static str {
    match level {
        0 | 1 => "h1",
        2 => "h2",
        _ => "h3",
    }
}

// =============================================================================
// Inline formatting
// =============================================================================

fn toggle_inline(doc: &mut Document, sel: &SelectionRange, tag: &str) -> Option<SelectionRange> {
    let (start, _) = sel.normalized();

    // Already inside the formatting element: unwrap it in place
    if let Some(existing) = doc.ancestor_with_tag(&start.path, tag)
        && !existing.is_empty()
    {
        let children: Vec<Node> = doc
            .node_at(&existing)
            .and_then(|n| n.as_element())?
            .children
            .iter()
            .cloned()
            .collect();
        if !doc.splice_at(&existing, children) {
            return None;
        }
        return Some(map_range(sel, |c| lift_caret(c, &existing)));
    }

    wrap_selection(doc, sel, || Element::new(tag))
}

fn style_span(
    doc: &mut Document,
    sel: &SelectionRange,
    prop: &str,
    value: &str,
) -> Option<SelectionRange> {
    let (start, _) = sel.normalized();

    // Inside a span already carrying the declaration: update it in place
    for len in (1..=start.path.len()).rev() {
        let prefix: NodePath = start.path[..len].iter().copied().collect();
        let hit = doc
            .element_at(&prefix)
            .is_some_and(|e| e.tag == "span" && e.style_prop(prop).is_some());
        if hit && let Some(elem) = doc.element_at_mut(&prefix) {
            elem.set_style_prop(prop, value);
            return Some(sel.clone());
        }
    }

    wrap_selection(doc, sel, || {
        let mut span = Element::new("span");
        span.set_style_prop(prop, value);
        span
    })
}

/// Wrap the selected content in a fresh element produced by `make`.
/// The returned selection covers the wrapped content.
fn wrap_selection(
    doc: &mut Document,
    sel: &SelectionRange,
    make: impl Fn() -> Element,
) -> Option<SelectionRange> {
    let (start, end) = sel.normalized();

    if start.path == end.path {
        let (wrapped, len) = split_wrap_text(doc, &start.path, start.offset, end.offset, |mid| {
            let mut elem = make();
            elem.push_text(mid);
            Node::Element(Box::new(elem))
        })?;
        let mut inner = wrapped;
        inner.push(0);
        return Some(SelectionRange::new(
            Caret::new(inner.clone(), 0),
            Caret::new(inner, len),
        ));
    }

    // Selection spans nodes: wrap the covered children of the deepest
    // common ancestor. Whole nodes only; partial edge coverage rounds out.
    let (container, from, to) = common_cover(&start.path, &end.path)?;
    let container_elem = doc.element_at_mut(&container)?;
    if from >= container_elem.children.len() {
        return None;
    }
    let to = to.min(container_elem.children.len() - 1);
    let covered: Vec<Node> = container_elem.children.drain(from..=to).collect();
    let mut wrapper = make();
    wrapper.children.extend(covered);
    container_elem
        .children
        .insert(from, Node::Element(Box::new(wrapper)));

    // Covered children now sit one level down inside the wrapper
    Some(map_range(sel, |c| {
        if c.path.len() > container.len() && c.path[..container.len()] == container[..] {
            let j = c.path[container.len()];
            if (from..=to).contains(&j) {
                let mut path: NodePath = container.iter().copied().collect();
                path.push(from);
                path.push(j - from);
                path.extend(c.path[container.len() + 1..].iter().copied());
                return Caret::new(path, c.offset);
            }
        }
        c.clone()
    }))
}

/// Split a text node at `[start, end)` and replace the middle with the node
/// `wrap` builds from it. Offsets are clamped to char boundaries; an empty
/// span is a no-op. Returns the path of the wrapping node and the byte
/// length of the wrapped text.
pub(crate) fn split_wrap_text(
    doc: &mut Document,
    path: &NodePath,
    start: usize,
    end: usize,
    wrap: impl FnOnce(&str) -> Node,
) -> Option<(NodePath, usize)> {
    let last = *path.last()?;
    let text = doc.node_at(path).and_then(|n| n.as_text())?;
    let content = text.content.clone();
    let start = clamp_boundary(&content, start);
    let end = clamp_boundary(&content, end.max(start));
    if start == end {
        return None;
    }

    let mut replacement = Vec::with_capacity(3);
    if start > 0 {
        replacement.push(Node::Text(Text::new(&content[..start])));
    }
    replacement.push(wrap(&content[start..end]));
    if end < content.len() {
        replacement.push(Node::Text(Text::new(&content[end..])));
    }
    if !doc.splice_at(path, replacement) {
        return None;
    }
    let mut wrapped: NodePath = path[..path.len() - 1].iter().copied().collect();
    wrapped.push(last + usize::from(start > 0));
    Some((wrapped, end - start))
}

/// Remap a caret after the node at `at` was replaced by its own children.
fn lift_caret(caret: &Caret, at: &NodePath) -> Caret {
    if caret.path.len() > at.len() && caret.path[..at.len()] == at[..] {
        let mut path: NodePath = at[..at.len() - 1].iter().copied().collect();
        path.push(at[at.len() - 1] + caret.path[at.len()]);
        path.extend(caret.path[at.len() + 1..].iter().copied());
        return Caret::new(path, caret.offset);
    }
    caret.clone()
}

/// Remap a caret after the node at `at` was wrapped under `levels` new
/// single-child ancestors.
fn sink_caret(caret: &Caret, at: &NodePath, levels: usize) -> Caret {
    if caret.path.len() >= at.len() && caret.path[..at.len()] == at[..] {
        let mut path: NodePath = at.iter().copied().collect();
        path.extend(std::iter::repeat(0).take(levels));
        path.extend(caret.path[at.len()..].iter().copied());
        return Caret::new(path, caret.offset);
    }
    caret.clone()
}

fn map_range(sel: &SelectionRange, f: impl Fn(&Caret) -> Caret) -> SelectionRange {
    SelectionRange::new(f(&sel.anchor), f(&sel.focus))
}

fn clamp_boundary(s: &str, mut i: usize) -> usize {
    i = i.min(s.len());
    while i > 0 && !s.is_char_boundary(i) {
        i -= 1;
    }
    i
}

/// Deepest common ancestor of two paths with the covered sibling range.
/// `None` when one path is an ancestor of the other.
fn common_cover(a: &NodePath, b: &NodePath) -> Option<(NodePath, usize, usize)> {
    let mut prefix = 0;
    while prefix < a.len() && prefix < b.len() && a[prefix] == b[prefix] {
        prefix += 1;
    }
    let ai = *a.get(prefix)?;
    let bi = *b.get(prefix)?;
    let container: NodePath = a[..prefix].iter().copied().collect();
    Some((container, ai.min(bi), ai.max(bi)))
}

// =============================================================================
// Block formatting
// =============================================================================

fn top_block_path(sel: &SelectionRange) -> Option<NodePath> {
    let (start, _) = sel.normalized();
    start.path.first().map(|&idx| smallvec![idx])
}

fn set_block_tag(doc: &mut Document, sel: &SelectionRange, tag: &str) -> Option<SelectionRange> {
    let path = top_block_path(sel)?;
    let node = doc.node_at_mut(&path)?;
    match node {
        Node::Element(elem) => {
            // Re-applying the same heading toggles back to a paragraph
            elem.tag = if elem.tag == tag {
                Tag::from("p")
            } else {
                Tag::from(tag)
            };
            Some(sel.clone())
        }
        Node::Text(text) => {
            let content = std::mem::take(&mut text.content);
            *node = Node::Element(Box::new(Element::new(tag).text(content)));
            Some(map_range(sel, |c| sink_caret(c, &path, 1)))
        }
    }
}

fn align_block(doc: &mut Document, sel: &SelectionRange, align: Alignment) -> Option<SelectionRange> {
    let path = top_block_path(sel)?;
    let node = doc.node_at_mut(&path)?;
    let mut wrapped_text = false;
    if let Node::Text(text) = node {
        // Bare top-level text gets a block wrapper to carry the style
        let content = std::mem::take(&mut text.content);
        *node = Node::Element(Box::new(Element::new("p").text(content)));
        wrapped_text = true;
    }
    let elem = node.as_element_mut()?;
    elem.set_style_prop("text-align", align.as_css());
    if wrapped_text {
        Some(map_range(sel, |c| sink_caret(c, &path, 1)))
    } else {
        Some(sel.clone())
    }
}

fn toggle_block_wrap(doc: &mut Document, sel: &SelectionRange, tag: &str) -> Option<SelectionRange> {
    let path = top_block_path(sel)?;

    let unwrapped: Option<Vec<Node>> = doc
        .node_at(&path)
        .and_then(|n| n.as_element())
        .filter(|e| e.tag == tag)
        .map(|e| e.children.iter().cloned().collect());
    if let Some(children) = unwrapped {
        if !doc.splice_at(&path, children) {
            return None;
        }
        return Some(map_range(sel, |c| lift_caret(c, &path)));
    }

    let node = doc.remove_at(&path)?;
    let mut wrapper = Element::new(tag);
    wrapper.children.push(node);
    if !doc.insert_at(&path, Node::Element(Box::new(wrapper))) {
        return None;
    }
    Some(map_range(sel, |c| sink_caret(c, &path, 1)))
}

fn toggle_list(doc: &mut Document, sel: &SelectionRange, kind: &str) -> Option<SelectionRange> {
    let path = top_block_path(sel)?;
    let other = if kind == "ul" { "ol" } else { "ul" };

    enum ListState {
        /// Replacement blocks plus, per list child index, the block index
        /// it became and whether the item's single block was kept as-is
        Same(Vec<Node>, Vec<Option<(usize, bool)>>),
        Other,
        NotAList,
    }
    let state = match doc.node_at(&path).and_then(|n| n.as_element()) {
        Some(e) if e.tag == kind => {
            let mut blocks = Vec::new();
            let mut child_map = Vec::new();
            for child in &e.children {
                let Some(li) = child.as_element() else {
                    child_map.push(None);
                    continue;
                };
                let block = match li.children.as_slice() {
                    // An item holding exactly one block keeps it as-is;
                    // re-wrapping would nest blocks on every toggle cycle
                    [Node::Element(block)] => Node::Element(block.clone()),
                    _ => {
                        let mut block = Element::new("p");
                        block.children.extend(li.children.iter().cloned());
                        Node::Element(Box::new(block))
                    }
                };
                let direct = matches!(li.children.as_slice(), [Node::Element(_)]);
                child_map.push(Some((blocks.len(), direct)));
                blocks.push(block);
            }
            ListState::Same(blocks, child_map)
        }
        Some(e) if e.tag == other => ListState::Other,
        _ => ListState::NotAList,
    };

    match state {
        // Toggling off: each item becomes its own block
        ListState::Same(blocks, child_map) => {
            if !doc.splice_at(&path, blocks) {
                return None;
            }
            Some(map_range(sel, |c| {
                if c.path.len() > path.len() && c.path[..path.len()] == path[..] {
                    let j = c.path[path.len()];
                    if let Some(Some((block_idx, direct))) = child_map.get(j) {
                        let mut mapped: NodePath =
                            path[..path.len() - 1].iter().copied().collect();
                        mapped.push(path[path.len() - 1] + block_idx);
                        let rest = &c.path[path.len() + 1..];
                        // A directly kept block absorbs the li level
                        let skip = usize::from(*direct);
                        mapped.extend(rest.iter().skip(skip).copied());
                        return Caret::new(mapped, c.offset);
                    }
                }
                c.clone()
            }))
        }
        // ul <-> ol is a retag, items stay
        ListState::Other => {
            let elem = doc.element_at_mut(&path)?;
            elem.tag = Tag::from(kind);
            Some(sel.clone())
        }
        ListState::NotAList => {
            let node = doc.remove_at(&path)?;
            let mut item = Element::new("li");
            item.children.push(node);
            let mut list = Element::new(kind);
            list.push_elem(item);
            if !doc.insert_at(&path, Node::Element(Box::new(list))) {
                return None;
            }
            Some(map_range(sel, |c| sink_caret(c, &path, 2)))
        }
    }
}
