//! Prelude module for common imports.
//!
//! ```ignore
//! use richdoc::prelude::*;
//! ```

// Node types
pub use crate::node::{Children, Document, Element, Node, NodePath, Tag, Text, TextKind};

// Attributes
pub use crate::attr::Attrs;

// Parsing and rendering
pub use crate::parse::{parse_document, parse_fragment};
pub use crate::render::{render_document, render_element_string, render_fragment};

// Round trip
pub use crate::extract::{
    ContentKind, MetaData, content_kind, export_document, extract_fragment, extract_meta,
    inject_meta, is_full_document,
};

// Selection
pub use crate::selection::{Caret, SelectionRange};

// Host environment
pub use crate::host::{HostEnv, HostError, MemoryHost};

// Commands
pub use crate::command::{Alignment, Command, apply_command};

// Structural editing
pub use crate::image::ImageAttrs;
pub use crate::link::LinkAttrs;
pub use crate::table::CellAddress;

// Editor
pub use crate::editor::{Editor, EditorConfig};

// Error
pub use crate::error::{EditResult, EditorError};
