//! Node types for the content tree.
//!
//! The tree is a concrete owned structure: elements own their children, and
//! positions within the tree are addressed by [`NodePath`] index chains
//! rather than references. All editing operations are rewrites against this
//! tree; the string boundary lives in [`crate::parse`] and [`crate::render`].

mod document;
mod element;
mod text;

pub use document::Document;
pub use element::{Element, Tag};
pub use text::{Text, TextKind};

use smallvec::SmallVec;

/// Node in a content tree - either Element or Text.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Element(Box<Element>),
    Text(Text),
}

impl Node {
    /// Check if this is an element node.
    #[inline]
    pub fn is_element(&self) -> bool {
        matches!(self, Node::Element(_))
    }

    /// Check if this is a text node.
    #[inline]
    pub fn is_text(&self) -> bool {
        matches!(self, Node::Text(_))
    }

    /// Get as element reference.
    #[inline]
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(e) => Some(e),
            _ => None,
        }
    }

    /// Get as mutable element reference.
    #[inline]
    pub fn as_element_mut(&mut self) -> Option<&mut Element> {
        match self {
            Node::Element(e) => Some(e),
            _ => None,
        }
    }

    /// Get as text reference.
    #[inline]
    pub fn as_text(&self) -> Option<&Text> {
        match self {
            Node::Text(t) => Some(t),
            _ => None,
        }
    }

    /// Get as mutable text reference.
    #[inline]
    pub fn as_text_mut(&mut self) -> Option<&mut Text> {
        match self {
            Node::Text(t) => Some(t),
            _ => None,
        }
    }

    /// Text content of this node and its descendants.
    pub fn text_content(&self) -> String {
        match self {
            Node::Element(e) => e.text_content(),
            Node::Text(t) => t.content.clone(),
        }
    }
}

/// Type alias for children collection.
pub type Children = SmallVec<[Node; 8]>;

/// Child-index path from the document root to a node.
///
/// An empty path addresses the root element itself; each component selects
/// a child by index. Paths are positional: any structural mutation above a
/// path invalidates it.
pub type NodePath = SmallVec<[usize; 8]>;
