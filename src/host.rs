//! Host environment capability interface.
//!
//! The editor core never touches an ambient clipboard, selection global or
//! file system. Everything environmental goes through [`HostEnv`], injected
//! at construction, so the transformation logic runs and tests against any
//! rendering surface. [`MemoryHost`] is the in-process implementation used
//! in tests and headless embedding.

use std::collections::HashMap;

use thiserror::Error;

use crate::selection::SelectionRange;

// =============================================================================
// HostError
// =============================================================================

/// Failures raised by the host environment.
///
/// These are all non-fatal to the editor: a clipboard or upload failure
/// degrades to a no-op, never to content corruption.
#[derive(Debug, Error)]
pub enum HostError {
    /// Clipboard read was denied or unsupported
    #[error("clipboard unavailable: {0}")]
    Clipboard(String),

    /// A selected upload could not be read
    #[error("upload failed: {0}")]
    Upload(String),

    /// The export artifact could not be delivered
    #[error("download failed: {0}")]
    Download(String),
}

// =============================================================================
// HostEnv
// =============================================================================

/// Capabilities the hosting surface provides to the editor core.
pub trait HostEnv {
    /// Read plain text from the system clipboard.
    fn read_clipboard_text(&mut self) -> Result<String, HostError>;

    /// Read a user-selected upload as a data URL, keyed by name.
    fn read_upload(&mut self, name: &str) -> Result<String, HostError>;

    /// Deliver an export artifact under a filename.
    fn download(&mut self, filename: &str, contents: &str) -> Result<(), HostError>;

    /// The current live selection, if any.
    fn selection(&self) -> Option<SelectionRange>;

    /// Reinstate a selection on the live surface.
    fn set_selection(&mut self, range: SelectionRange);

    /// Drop the live selection.
    fn clear_selection(&mut self);

    /// Return input focus to the editable surface.
    fn focus_editable(&mut self);
}

// =============================================================================
// MemoryHost
// =============================================================================

/// In-process host for tests and headless use.
#[derive(Debug, Default)]
pub struct MemoryHost {
    /// Clipboard contents; `None` simulates a denied/unsupported clipboard
    pub clipboard: Option<String>,
    /// Named uploads available as data URLs
    pub uploads: HashMap<String, String>,
    /// Delivered export artifacts as (filename, contents)
    pub downloads: Vec<(String, String)>,
    /// How many times focus was requested
    pub focus_count: usize,
    selection: Option<SelectionRange>,
}

impl MemoryHost {
    /// Create an empty host.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the clipboard (builder form).
    pub fn with_clipboard(mut self, text: impl Into<String>) -> Self {
        self.clipboard = Some(text.into());
        self
    }

    /// Register an upload under a name (builder form).
    pub fn with_upload(mut self, name: impl Into<String>, data_url: impl Into<String>) -> Self {
        self.uploads.insert(name.into(), data_url.into());
        self
    }
}

impl HostEnv for MemoryHost {
    fn read_clipboard_text(&mut self) -> Result<String, HostError> {
        self.clipboard
            .clone()
            .ok_or_else(|| HostError::Clipboard("permission denied".into()))
    }

    fn read_upload(&mut self, name: &str) -> Result<String, HostError> {
        self.uploads
            .get(name)
            .cloned()
            .ok_or_else(|| HostError::Upload(format!("no upload named {name}")))
    }

    fn download(&mut self, filename: &str, contents: &str) -> Result<(), HostError> {
        self.downloads.push((filename.to_string(), contents.to_string()));
        Ok(())
    }

    fn selection(&self) -> Option<SelectionRange> {
        self.selection.clone()
    }

    fn set_selection(&mut self, range: SelectionRange) {
        self.selection = Some(range);
    }

    fn clear_selection(&mut self) {
        self.selection = None;
    }

    fn focus_editable(&mut self) {
        self.focus_count += 1;
    }
}
