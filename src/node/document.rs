//! Document type - root container with query and path-addressed access.

use compact_str::CompactString;

use super::{Element, Node, NodePath};

// =============================================================================
// Document
// =============================================================================

/// Root container for a content tree.
///
/// For full HTML documents the root is the `<html>` element and `doctype`
/// carries the declaration name. The editor's live surface uses a `<body>`
/// root with no doctype; only its children are serialized.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    /// Doctype name, e.g. `html`, when the source carried a declaration
    pub doctype: Option<CompactString>,
    /// Root element
    pub root: Element,
}

impl Document {
    /// Create a new document with a root element and no doctype.
    pub fn new(root: Element) -> Self {
        Self {
            doctype: None,
            root,
        }
    }

    /// Set the doctype name (builder form).
    pub fn with_doctype(mut self, name: impl AsRef<str>) -> Self {
        self.doctype = Some(CompactString::from(name.as_ref()));
        self
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Query API
    // ─────────────────────────────────────────────────────────────────────────

    /// Find first element matching predicate (depth-first).
    pub fn find<F>(&self, predicate: F) -> Option<&Element>
    where
        F: Fn(&Element) -> bool,
    {
        Self::find_in(&self.root, &predicate)
    }

    fn find_in<'a, F>(elem: &'a Element, predicate: &F) -> Option<&'a Element>
    where
        F: Fn(&Element) -> bool,
    {
        if predicate(elem) {
            return Some(elem);
        }
        for child in &elem.children {
            if let Some(child_elem) = child.as_element()
                && let Some(found) = Self::find_in(child_elem, predicate)
            {
                return Some(found);
            }
        }
        None
    }

    /// Find all elements matching predicate.
    pub fn find_all<F>(&self, predicate: F) -> Vec<&Element>
    where
        F: Fn(&Element) -> bool,
    {
        let mut results = Vec::new();
        Self::collect_in(&self.root, &predicate, &mut results);
        results
    }

    fn collect_in<'a, F>(elem: &'a Element, predicate: &F, results: &mut Vec<&'a Element>)
    where
        F: Fn(&Element) -> bool,
    {
        if predicate(elem) {
            results.push(elem);
        }
        for child in &elem.children {
            if let Some(child_elem) = child.as_element() {
                Self::collect_in(child_elem, predicate, results);
            }
        }
    }

    /// Check if any element matches predicate.
    pub fn any<F>(&self, predicate: F) -> bool
    where
        F: Fn(&Element) -> bool,
    {
        self.find(predicate).is_some()
    }

    /// Find the path of the first element matching predicate (depth-first).
    pub fn find_path<F>(&self, predicate: F) -> Option<NodePath>
    where
        F: Fn(&Element) -> bool,
    {
        let mut path = NodePath::new();
        if Self::find_path_in(&self.root, &predicate, &mut path) {
            Some(path)
        } else {
            None
        }
    }

    fn find_path_in<F>(elem: &Element, predicate: &F, path: &mut NodePath) -> bool
    where
        F: Fn(&Element) -> bool,
    {
        if predicate(elem) {
            return true;
        }
        for (i, child) in elem.children.iter().enumerate() {
            if let Some(child_elem) = child.as_element() {
                path.push(i);
                if Self::find_path_in(child_elem, predicate, path) {
                    return true;
                }
                path.pop();
            }
        }
        false
    }

    /// Count total elements in the document.
    pub fn element_count(&self) -> usize {
        Self::count_elements(&self.root)
    }

    fn count_elements(elem: &Element) -> usize {
        let mut count = 1;
        for child in &elem.children {
            if let Some(child_elem) = child.as_element() {
                count += Self::count_elements(child_elem);
            }
        }
        count
    }

    /// Iterate over all elements (depth-first, left to right).
    pub fn elements(&self) -> impl Iterator<Item = &Element> {
        ElementIterator::new(&self.root)
    }

    /// Visit all elements with a closure (read-only).
    pub fn for_each_element<F>(&self, mut f: F)
    where
        F: FnMut(&Element),
    {
        Self::visit(&self.root, &mut f);
    }

    fn visit<F>(elem: &Element, f: &mut F)
    where
        F: FnMut(&Element),
    {
        f(elem);
        for child in &elem.children {
            if let Some(child_elem) = child.as_element() {
                Self::visit(child_elem, f);
            }
        }
    }

    /// Visit all elements with a closure (mutable).
    pub fn for_each_element_mut<F>(&mut self, mut f: F)
    where
        F: FnMut(&mut Element),
    {
        Self::visit_mut(&mut self.root, &mut f);
    }

    fn visit_mut<F>(elem: &mut Element, f: &mut F)
    where
        F: FnMut(&mut Element),
    {
        f(elem);
        for child in &mut elem.children {
            if let Some(child_elem) = child.as_element_mut() {
                Self::visit_mut(child_elem, f);
            }
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Path-addressed access
    // ─────────────────────────────────────────────────────────────────────────

    /// Resolve a non-empty path to the node it addresses.
    pub fn node_at(&self, path: &NodePath) -> Option<&Node> {
        let (&last, init) = path.split_last()?;
        let mut container = &self.root;
        for &idx in init {
            container = container.children.get(idx)?.as_element()?;
        }
        container.children.get(last)
    }

    /// Resolve a non-empty path to the node it addresses (mutable).
    pub fn node_at_mut(&mut self, path: &NodePath) -> Option<&mut Node> {
        let (&last, init) = path.split_last()?;
        let mut container = &mut self.root;
        for &idx in init {
            container = container.children.get_mut(idx)?.as_element_mut()?;
        }
        container.children.get_mut(last)
    }

    /// Resolve a path to an element; the empty path addresses the root.
    pub fn element_at(&self, path: &NodePath) -> Option<&Element> {
        if path.is_empty() {
            return Some(&self.root);
        }
        self.node_at(path)?.as_element()
    }

    /// Resolve a path to an element (mutable); empty path addresses the root.
    pub fn element_at_mut(&mut self, path: &NodePath) -> Option<&mut Element> {
        if path.is_empty() {
            return Some(&mut self.root);
        }
        self.node_at_mut(path)?.as_element_mut()
    }

    /// The element containing the node a non-empty path addresses,
    /// together with the node's child index.
    pub fn parent_of_mut(&mut self, path: &NodePath) -> Option<(&mut Element, usize)> {
        let (&last, init) = path.split_last()?;
        let parent_path: NodePath = init.iter().copied().collect();
        let parent = self.element_at_mut(&parent_path)?;
        if last < parent.children.len() {
            Some((parent, last))
        } else {
            None
        }
    }

    /// Insert a node so that it becomes the child the path addresses.
    /// Returns false when the parent path does not resolve.
    pub fn insert_at(&mut self, path: &NodePath, node: Node) -> bool {
        let Some((&last, init)) = path.split_last() else {
            return false;
        };
        let parent_path: NodePath = init.iter().copied().collect();
        match self.element_at_mut(&parent_path) {
            Some(parent) => {
                parent.insert_child(last, node);
                true
            }
            None => false,
        }
    }

    /// Remove and return the node a path addresses.
    pub fn remove_at(&mut self, path: &NodePath) -> Option<Node> {
        let (parent, idx) = self.parent_of_mut(path)?;
        parent.remove_child(idx)
    }

    /// Replace the node a path addresses with zero or more nodes in place.
    pub fn splice_at(&mut self, path: &NodePath, replacement: Vec<Node>) -> bool {
        let Some((parent, idx)) = self.parent_of_mut(path) else {
            return false;
        };
        parent.children.remove(idx);
        for (offset, node) in replacement.into_iter().enumerate() {
            parent.children.insert(idx + offset, node);
        }
        true
    }

    /// Longest prefix of a path whose element carries the given tag.
    ///
    /// Checks the addressed node itself first, then each ancestor up to and
    /// including the root.
    pub fn ancestor_with_tag(&self, path: &NodePath, tag: &str) -> Option<NodePath> {
        for len in (0..=path.len()).rev() {
            let prefix: NodePath = path[..len].iter().copied().collect();
            if let Some(elem) = self.element_at(&prefix)
                && elem.tag == tag
            {
                return Some(prefix);
            }
        }
        None
    }
}

// =============================================================================
// ElementIterator - depth-first element traversal
// =============================================================================

/// Depth-first iterator over elements.
pub struct ElementIterator<'a> {
    stack: Vec<&'a Element>,
}

impl<'a> ElementIterator<'a> {
    fn new(root: &'a Element) -> Self {
        Self { stack: vec![root] }
    }
}

impl<'a> Iterator for ElementIterator<'a> {
    type Item = &'a Element;

    fn next(&mut self) -> Option<Self::Item> {
        let elem = self.stack.pop()?;
        // Push children in reverse order so they're visited left-to-right
        for child in elem.children.iter().rev() {
            if let Some(child_elem) = child.as_element() {
                self.stack.push(child_elem);
            }
        }
        Some(elem)
    }
}
