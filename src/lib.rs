//! richdoc - Rich HTML content editing core
//!
//! A browser-independent engine for rich content editing: a typed HTML
//! tree, full-document/fragment round-tripping with SEO metadata, and
//! structural editing of tables, images, and links, all driven by an
//! [`Editor`] controller that talks to its surroundings through a
//! [`HostEnv`] capability trait.
//!
//! ## Modules
//! - `node`: Document/Element/Node/Text tree types and path addressing
//! - `attr`: Attribute storage with class and inline-style helpers
//! - `parse` / `render`: HTML in and out of the tree
//! - `extract`: Fragment extraction, meta injection, export assembly
//! - `selection`: Caret and range positions expressed as node paths
//! - `host`: Host environment capabilities and an in-memory test double
//! - `command`: Formatting commands over the selection
//! - `table` / `image` / `link`: Structural editing operations
//! - `editor`: The controller tying all of the above together
//!
//! ## Usage
//!
//! ```ignore
//! use richdoc::prelude::*;
//!
//! let mut editor = Editor::new(MemoryHost::new(), EditorConfig::default());
//! editor.mount("<!DOCTYPE html><html><head><title>Hi</title></head>\
//!               <body><p>Hello</p></body></html>");
//!
//! assert_eq!(editor.meta().title, "Hi");
//! editor.insert_table(2, 3)?;
//! let html = inject_meta(&editor.surface_html(), editor.meta());
//! # Ok::<(), richdoc::EditorError>(())
//! ```

// =============================================================================
// Core modules
// =============================================================================

/// Node types: Document, Element, Node, Text
pub mod node;

/// Attribute storage
pub mod attr;

/// HTML parsing into the tree
pub mod parse;

/// HTML rendering
pub mod render;

/// Full-document/fragment round trip and meta handling
pub mod extract;

/// Caret and selection ranges
pub mod selection;

/// Host environment capabilities
pub mod host;

/// Formatting commands
pub mod command;

/// Table construction and structural mutation
pub mod table;

/// Image insertion and attribute editing
pub mod image;

/// Hyperlink editing and auto-linking
pub mod link;

/// The editor controller
pub mod editor;

/// Error types
pub mod error;

/// Prelude for common imports
pub mod prelude;

// =============================================================================
// Re-exports
// =============================================================================

// Node types
pub use node::{Children, Document, Element, Node, NodePath, Tag, Text, TextKind};

// Attributes
pub use attr::Attrs;

// Round trip
pub use extract::{ContentKind, MetaData};

// Selection
pub use selection::{Caret, SelectionRange};

// Host environment
pub use host::{HostEnv, HostError, MemoryHost};

// Commands
pub use command::{Alignment, Command};

// Structural editing
pub use image::ImageAttrs;
pub use link::LinkAttrs;
pub use table::CellAddress;

// Editor
pub use editor::{Editor, EditorConfig};

// Error types
pub use error::{EditResult, EditorError};
