//! Explicit caret/selection positions.
//!
//! Positions are (path, byte offset) pairs into the live tree rather than
//! references into an ambient global. A selection is ephemeral: it is
//! captured immediately before a mutating operation, restored immediately
//! after, and never persisted across external content replacement.

use std::cmp::Ordering;

use crate::node::NodePath;

// =============================================================================
// Caret
// =============================================================================

/// A single insertion point: a node path plus a byte offset into that node's
/// text content (0 for element positions).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Caret {
    /// Path to the node holding the caret
    pub path: NodePath,
    /// Byte offset within the node's text
    pub offset: usize,
}

impl Caret {
    /// Create a caret position.
    pub fn new(path: NodePath, offset: usize) -> Self {
        Self { path, offset }
    }

    /// Document-order comparison: path lexicographic, then offset.
    pub fn position_cmp(&self, other: &Caret) -> Ordering {
        self.path
            .iter()
            .cmp(other.path.iter())
            .then(self.offset.cmp(&other.offset))
    }
}

// =============================================================================
// SelectionRange
// =============================================================================

/// A selection between two carets. `anchor` is where the selection started,
/// `focus` where it ends; they may be in either document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionRange {
    pub anchor: Caret,
    pub focus: Caret,
}

impl SelectionRange {
    /// Create a range from anchor to focus.
    pub fn new(anchor: Caret, focus: Caret) -> Self {
        Self { anchor, focus }
    }

    /// Create a collapsed range (a plain caret).
    pub fn caret(at: Caret) -> Self {
        Self {
            anchor: at.clone(),
            focus: at,
        }
    }

    /// Check whether anchor and focus coincide.
    pub fn is_collapsed(&self) -> bool {
        self.anchor == self.focus
    }

    /// The range in document order as (start, end).
    pub fn normalized(&self) -> (&Caret, &Caret) {
        match self.anchor.position_cmp(&self.focus) {
            Ordering::Greater => (&self.focus, &self.anchor),
            _ => (&self.anchor, &self.focus),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use smallvec::smallvec;

    #[test]
    fn test_caret_ordering() {
        let a = Caret::new(smallvec![0, 1], 3);
        let b = Caret::new(smallvec![0, 2], 0);
        let c = Caret::new(smallvec![0, 1], 5);

        assert_eq!(a.position_cmp(&b), Ordering::Less);
        assert_eq!(a.position_cmp(&c), Ordering::Less);
        assert_eq!(b.position_cmp(&a), Ordering::Greater);
        assert_eq!(a.position_cmp(&a), Ordering::Equal);

        // A parent position orders before its children
        let parent = Caret::new(smallvec![0], 0);
        assert_eq!(parent.position_cmp(&a), Ordering::Less);
    }

    #[test]
    fn test_range_normalized() {
        let early = Caret::new(smallvec![0], 1);
        let late = Caret::new(smallvec![2], 0);

        let forward = SelectionRange::new(early.clone(), late.clone());
        let backward = SelectionRange::new(late.clone(), early.clone());

        assert_eq!(forward.normalized(), (&early, &late));
        assert_eq!(backward.normalized(), (&early, &late));
        assert!(!forward.is_collapsed());
        assert!(SelectionRange::caret(early).is_collapsed());
    }
}
