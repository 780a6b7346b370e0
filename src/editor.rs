//! Editor controller: owns the editing surface, the host environment, and
//! the document metadata, and turns UI intents into tree rewrites.
//!
//! Every mutating operation follows the same shape: refuse in preview
//! mode, save the host selection, rewrite the tree, restore selection and
//! focus, then emit exactly one change notification. Formatting rewrites
//! hand back a selection remapped onto the new tree, so the restored
//! position keeps addressing the same text. Callers subscribe
//! with [`Editor::on_change`] and receive the serialized fragment; the
//! full document with metadata only materializes on [`Editor::apply_meta`]
//! and [`Editor::export`].

use tracing::{debug, warn};

use crate::command::{Command, apply_command};
use crate::error::EditResult;
use crate::extract::{
    MetaData, content_kind, export_document, extract_fragment, extract_meta, inject_meta,
    is_full_document,
};
use crate::host::HostEnv;
use crate::image::{self, ImageAttrs};
use crate::link::{self, LinkAttrs, insert_at_caret};
use crate::node::{Document, Element, Node, NodePath, Text};
use crate::parse::parse_fragment;
use crate::render::render_fragment;
use crate::table::{self, CellAddress};

// =============================================================================
// Configuration
// =============================================================================

/// Static editor configuration.
#[derive(Debug, Clone)]
pub struct EditorConfig {
    /// Shown when the surface has no content
    pub placeholder: String,
    /// Metadata used when content carries none
    pub default_meta: MetaData,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            placeholder: "Start typing...".to_string(),
            default_meta: MetaData::new("Untitled Document", ""),
        }
    }
}

// =============================================================================
// Editor
// =============================================================================

type ChangeFn = Box<dyn FnMut(&str)>;

/// The editing controller, generic over its host environment.
pub struct Editor<H: HostEnv> {
    host: H,
    /// Last known serialized content
    value: String,
    /// Live editing tree, rooted at a synthetic body element
    surface: Document,
    meta: MetaData,
    defaults: MetaData,
    placeholder: String,
    preview: bool,
    active_cell: Option<NodePath>,
    selected_image: Option<NodePath>,
    on_change: Option<ChangeFn>,
}

impl<H: HostEnv> Editor<H> {
    pub fn new(host: H, config: EditorConfig) -> Self {
        Self {
            host,
            value: String::new(),
            surface: Document::new(Element::new("body")),
            meta: config.default_meta.clone(),
            defaults: config.default_meta,
            placeholder: config.placeholder,
            preview: false,
            active_cell: None,
            selected_image: None,
            on_change: None,
        }
    }

    /// Subscribe to content changes. The callback receives the serialized
    /// fragment after every mutation.
    pub fn on_change(&mut self, f: impl FnMut(&str) + 'static) {
        self.on_change = Some(Box::new(f));
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Content lifecycle
    // ─────────────────────────────────────────────────────────────────────────

    /// Load initial content. An empty initial value seeds a skeleton
    /// document from the default metadata and emits it once; anything
    /// else loads without emitting.
    pub fn mount(&mut self, initial: &str) {
        if initial.trim().is_empty() {
            self.meta = self.defaults.clone();
            self.value = inject_meta("", &self.meta);
            self.surface = Document::new(Element::new("body"));
            debug!("mounted empty, seeded default document");
            self.emit();
            return;
        }
        self.load_external(initial);
    }

    /// Replace content from outside the editor. Values matching the
    /// current content (either the last known value or the live surface
    /// serialization) are absorbed without a reload, so feeding emitted
    /// values back is cheap and lossless.
    pub fn set_value(&mut self, value: &str) {
        if value == self.value {
            return;
        }
        if value == self.surface_html() {
            self.value = value.to_string();
            return;
        }
        self.load_external(value);
    }

    fn load_external(&mut self, value: &str) {
        let kind = content_kind(value);
        let fragment = match kind {
            crate::extract::ContentKind::FullDocument => {
                self.meta = extract_meta(value, &self.defaults);
                extract_fragment(value).to_string()
            }
            crate::extract::ContentKind::Fragment => value.to_string(),
        };
        self.surface.root.children = parse_fragment(&fragment);
        table::enhance_tables(&mut self.surface);
        self.active_cell = None;
        self.selected_image = None;
        self.host.clear_selection();
        self.value = value.to_string();
        debug!(?kind, bytes = value.len(), "loaded external content");
    }

    /// Last known serialized content.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Current surface serialization (the editable fragment).
    pub fn surface_html(&self) -> String {
        render_fragment(&self.surface.root.children)
    }

    /// Direct access to the editing tree.
    pub fn surface(&self) -> &Document {
        &self.surface
    }

    /// Current document metadata.
    pub fn meta(&self) -> &MetaData {
        &self.meta
    }

    /// The placeholder to display, when the surface holds no content.
    pub fn placeholder(&self) -> Option<&str> {
        let empty = self.surface.root.children.iter().all(|n| match n {
            Node::Text(t) => t.is_whitespace(),
            Node::Element(_) => false,
        });
        (empty && !self.placeholder.is_empty()).then_some(self.placeholder.as_str())
    }

    /// Host environment access, mainly for inspecting test doubles.
    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    fn emit(&mut self) {
        if let Some(cb) = &mut self.on_change {
            cb(&self.value);
        }
    }

    /// Reserialize the surface and notify subscribers once.
    fn notify(&mut self) {
        self.value = self.surface_html();
        self.emit();
    }

    /// Run a tree rewrite with the host selection saved around it, then
    /// hand focus back to the surface.
    fn preserved<T>(&mut self, f: impl FnOnce(&mut Self) -> T) -> T {
        let saved = self.host.selection();
        let out = f(self);
        if let Some(sel) = saved {
            self.host.set_selection(sel);
        }
        self.host.focus_editable();
        out
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Formatting
    // ─────────────────────────────────────────────────────────────────────────

    /// Apply a formatting command to the host's current selection.
    /// Ignored entirely in preview mode; otherwise notifies exactly once,
    /// no-op rewrites included. The rewrite hands back a selection
    /// remapped onto the new tree, which replaces the stale one in the
    /// host before focus returns to the surface.
    pub fn exec(&mut self, cmd: &Command) {
        if self.preview {
            return;
        }
        if let Some(sel) = self.host.selection() {
            let adjusted = apply_command(&mut self.surface, &sel, cmd);
            debug!(?cmd, changed = adjusted.is_some(), "executed command");
            self.host.set_selection(adjusted.unwrap_or(sel));
        }
        self.host.focus_editable();
        self.notify();
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Tables
    // ─────────────────────────────────────────────────────────────────────────

    /// Insert a fresh table at the caret (or append when there is none).
    pub fn insert_table(&mut self, rows: usize, cols: usize) -> EditResult<()> {
        if self.preview {
            return Ok(());
        }
        let built = table::build_table(rows, cols)?;
        self.preserved(|ed| {
            ed.insert_node(Node::Element(Box::new(built)));
        });
        self.notify();
        Ok(())
    }

    /// Mark the cell containing a position as active for structural
    /// operations. Clears the active cell when the position is outside
    /// any cell.
    pub fn select_cell(&mut self, path: &NodePath) -> bool {
        let cell = self
            .surface
            .ancestor_with_tag(path, "td")
            .or_else(|| self.surface.ancestor_with_tag(path, "th"));
        self.active_cell = cell;
        self.active_cell.is_some()
    }

    pub fn add_table_row(&mut self) -> bool {
        self.table_op(|t, _| table::add_row(t))
    }

    pub fn add_table_column(&mut self) -> bool {
        self.table_op(|t, _| table::add_column(t))
    }

    pub fn delete_table_row(&mut self) -> bool {
        self.table_op(|t, addr| table::delete_row(t, addr.row))
    }

    pub fn delete_table_column(&mut self) -> bool {
        self.table_op(|t, addr| table::delete_column(t, addr.col))
    }

    /// Merge from the active cell to the given grid address.
    pub fn merge_table_cells(&mut self, end: CellAddress) -> bool {
        self.table_op(|t, addr| table::merge_cells(t, addr, end))
    }

    /// Split the active cell back into unit cells.
    pub fn split_table_cell(&mut self) -> bool {
        self.table_op(|t, addr| table::split_cell(t, addr))
    }

    /// Remove the table containing the active cell.
    pub fn delete_table(&mut self) -> bool {
        if self.preview {
            return false;
        }
        let Some(cell) = self.active_cell.take() else {
            return false;
        };
        let Some(table_path) = self.surface.ancestor_with_tag(&cell, "table") else {
            return false;
        };
        let removed = self.surface.remove_at(&table_path).is_some();
        if removed {
            self.notify();
        }
        removed
    }

    fn table_op(&mut self, f: impl FnOnce(&mut Element, CellAddress) -> bool) -> bool {
        if self.preview {
            return false;
        }
        let changed = self.with_active_table(f).unwrap_or(false);
        if changed {
            self.notify();
        }
        changed
    }

    fn with_active_table<T>(&mut self, f: impl FnOnce(&mut Element, CellAddress) -> T) -> Option<T> {
        let cell = self.active_cell.clone()?;
        let table_path = self.surface.ancestor_with_tag(&cell, "table")?;
        let rel: Vec<usize> = cell[table_path.len()..].to_vec();
        let addr = table::address_of(self.surface.element_at(&table_path)?, &rel)?;
        let elem = self.surface.element_at_mut(&table_path)?;
        Some(f(elem, addr))
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Images
    // ─────────────────────────────────────────────────────────────────────────

    pub fn insert_image(&mut self, attrs: &ImageAttrs) -> EditResult<()> {
        if self.preview {
            return Ok(());
        }
        let img = image::build_image(attrs)?;
        self.preserved(|ed| {
            ed.insert_node(Node::Element(Box::new(img)));
        });
        self.notify();
        Ok(())
    }

    /// Insert an image from a named host upload. Failures are logged and
    /// swallowed so a broken file picker never breaks the surface.
    pub fn insert_image_from_upload(&mut self, name: &str) -> bool {
        if self.preview {
            return false;
        }
        match self.host.read_upload(name) {
            Ok(data_url) => {
                let mut attrs = ImageAttrs::new(data_url);
                attrs.alt = name.to_string();
                self.insert_image(&attrs).is_ok()
            }
            Err(err) => {
                warn!(%err, name, "upload read failed");
                false
            }
        }
    }

    /// Mark the image at a path as selected for attribute editing.
    pub fn select_image(&mut self, path: &NodePath) -> bool {
        let hit = self
            .surface
            .element_at(path)
            .is_some_and(image::is_image);
        self.selected_image = hit.then(|| path.clone());
        hit
    }

    /// Current attributes of the selected image, if any.
    pub fn selected_image_attrs(&self) -> Option<ImageAttrs> {
        let path = self.selected_image.as_ref()?;
        self.surface.element_at(path).map(image::image_attrs)
    }

    /// Apply attribute edits to the selected image.
    pub fn update_image(&mut self, attrs: &ImageAttrs) -> EditResult<bool> {
        if self.preview {
            return Ok(false);
        }
        let Some(path) = self.selected_image.clone() else {
            return Ok(false);
        };
        let Some(img) = self.surface.element_at_mut(&path) else {
            return Ok(false);
        };
        image::apply_image_attrs(img, attrs)?;
        self.notify();
        Ok(true)
    }

    pub fn delete_image(&mut self) -> bool {
        if self.preview {
            return false;
        }
        let Some(path) = self.selected_image.take() else {
            return false;
        };
        let removed = self.surface.remove_at(&path).is_some();
        if removed {
            self.notify();
        }
        removed
    }

    /// Toggle the selected image between constrained and full-width.
    pub fn toggle_image_expanded(&mut self) -> bool {
        if self.preview {
            return false;
        }
        let Some(path) = self.selected_image.clone() else {
            return false;
        };
        let Some(img) = self.surface.element_at_mut(&path) else {
            return false;
        };
        let expanded = image::is_expanded(img);
        image::set_expanded(img, !expanded);
        self.notify();
        true
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Links
    // ─────────────────────────────────────────────────────────────────────────

    /// Create or edit a link at the host's current selection.
    pub fn apply_link(&mut self, attrs: &LinkAttrs) -> EditResult<bool> {
        if self.preview {
            return Ok(false);
        }
        let changed = self.preserved(|ed| match ed.host.selection() {
            Some(sel) => link::apply_link(&mut ed.surface, &sel, attrs),
            None => Ok(false),
        })?;
        if changed {
            self.notify();
        }
        Ok(changed)
    }

    /// Unwrap the link at the host's current selection.
    pub fn remove_link(&mut self) -> bool {
        if self.preview {
            return false;
        }
        let changed = self.preserved(|ed| match ed.host.selection() {
            Some(sel) => {
                let (start, _) = sel.normalized();
                link::remove_link(&mut ed.surface, &start.path)
            }
            None => false,
        });
        if changed {
            self.notify();
        }
        changed
    }

    /// Auto-link bare URLs and emails across the whole surface.
    pub fn autolink(&mut self) -> usize {
        if self.preview {
            return 0;
        }
        let created = link::autolink(&mut self.surface);
        if created > 0 {
            self.notify();
        }
        created
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Clipboard
    // ─────────────────────────────────────────────────────────────────────────

    /// Paste from the host clipboard. A full HTML document replaces the
    /// surface and adopts its metadata; anything else is inserted as
    /// plain text at the caret. A denied clipboard read is silent.
    pub fn paste(&mut self) {
        if self.preview {
            return;
        }
        let Ok(text) = self.host.read_clipboard_text() else {
            return;
        };
        if is_full_document(&text) {
            self.load_external(&text);
            self.notify();
        } else {
            self.preserved(|ed| {
                ed.insert_node(Node::Text(Text::new(&text)));
            });
            self.notify();
        }
    }

    fn insert_node(&mut self, node: Node) {
        match self.host.selection() {
            Some(sel) => {
                let (start, _) = sel.normalized();
                insert_at_caret(&mut self.surface, start, node);
            }
            None => self.surface.root.children.push(node),
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Metadata, preview, export
    // ─────────────────────────────────────────────────────────────────────────

    /// Replace the document metadata and emit the recombined full
    /// document as the new value.
    pub fn apply_meta(&mut self, meta: MetaData) {
        self.meta = meta;
        self.value = inject_meta(&self.surface_html(), &self.meta);
        self.emit();
    }

    pub fn is_preview(&self) -> bool {
        self.preview
    }

    /// Switch between editing and read-only preview.
    pub fn toggle_preview(&mut self) {
        self.preview = !self.preview;
        debug!(preview = self.preview, "toggled preview");
    }

    /// Keyboard shortcut dispatch. Returns whether the chord was handled.
    pub fn handle_shortcut(&mut self, ctrl: bool, shift: bool, key: char) -> bool {
        if ctrl && shift && key.eq_ignore_ascii_case(&'p') {
            self.toggle_preview();
            return true;
        }
        false
    }

    /// Export the current document through the host download channel.
    pub fn export(&mut self) -> EditResult<()> {
        let html = export_document(&self.surface_html(), &self.meta);
        self.host.download("content.html", &html)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::host::MemoryHost;
    use crate::selection::{Caret, SelectionRange};

    fn editor() -> Editor<MemoryHost> {
        Editor::new(MemoryHost::new(), EditorConfig::default())
    }

    fn emissions(ed: &mut Editor<MemoryHost>) -> Rc<RefCell<Vec<String>>> {
        let log = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&log);
        ed.on_change(move |v| sink.borrow_mut().push(v.to_string()));
        log
    }

    fn text_selection(path: &[usize], start: usize, end: usize) -> SelectionRange {
        SelectionRange::new(
            Caret::new(path.iter().copied().collect(), start),
            Caret::new(path.iter().copied().collect(), end),
        )
    }

    #[test]
    fn test_mount_empty_seeds_default_document_once() {
        let mut ed = editor();
        let log = emissions(&mut ed);
        ed.mount("");

        let emitted = log.borrow();
        assert_eq!(emitted.len(), 1);
        assert!(emitted[0].contains("<title>Untitled Document</title>"));
        assert!(emitted[0].starts_with("<!DOCTYPE html>"));
    }

    #[test]
    fn test_mount_full_document_extracts_meta_and_fragment() {
        let mut ed = editor();
        let log = emissions(&mut ed);
        ed.mount(
            "<!DOCTYPE html><html><head><title>My Page</title>\
             <meta name=\"description\" content=\"About\"></head>\
             <body><p>Hi</p></body></html>",
        );

        assert_eq!(ed.meta().title, "My Page");
        assert_eq!(ed.meta().description, "About");
        assert_eq!(ed.surface_html(), "<p>Hi</p>");
        // Loading existing content is not a change
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn test_set_value_absorbs_own_output() {
        let mut ed = editor();
        ed.mount("<p>Hello</p>");
        let surface_before = ed.surface_html();

        ed.set_value(&surface_before);
        assert_eq!(ed.value(), surface_before);
        assert_eq!(ed.surface_html(), surface_before);
    }

    #[test]
    fn test_set_value_enhances_external_tables() {
        let mut ed = editor();
        ed.mount("<p>x</p>");
        ed.set_value("<table><tr><td>a</td></tr></table>");
        let html = ed.surface_html();
        assert!(html.contains(table::TABLE_MARKER_CLASS));
        assert!(html.contains("contenteditable=\"true\""));
    }

    #[test]
    fn test_exec_preserves_selection_and_notifies_once() {
        let mut ed = editor();
        ed.mount("<p>Hello world</p>");
        let log = emissions(&mut ed);
        ed.host_mut().set_selection(text_selection(&[0, 0], 6, 11));

        ed.exec(&Command::Bold);

        assert_eq!(ed.surface_html(), "<p>Hello <strong>world</strong></p>");
        assert_eq!(log.borrow().len(), 1);
        assert_eq!(ed.host().focus_count, 1);
        // Selection restored remapped into the wrapped text
        let restored = ed.host().selection().unwrap();
        let (start, end) = restored.normalized();
        assert_eq!(start.path.as_slice(), &[0, 1, 0]);
        assert_eq!((start.offset, end.offset), (0, 5));
    }

    #[test]
    fn test_color_command_keeps_caret_in_text() {
        let mut ed = editor();
        ed.mount("<p>colored text</p>");
        ed.host_mut().set_selection(text_selection(&[0, 0], 0, 7));

        ed.exec(&Command::ForeColor("red".into()));

        let restored = ed.host().selection().unwrap();
        let (start, end) = restored.normalized();
        let node = ed.surface().node_at(&start.path).unwrap();
        assert!(node.is_text());
        assert_eq!(node.text_content(), "colored");
        assert_eq!((start.offset, end.offset), (0, 7));
    }

    #[test]
    fn test_exec_without_selection_still_notifies() {
        let mut ed = editor();
        ed.mount("<p>x</p>");
        let log = emissions(&mut ed);
        ed.exec(&Command::Bold);
        assert_eq!(log.borrow().len(), 1);
    }

    #[test]
    fn test_preview_blocks_edits() {
        let mut ed = editor();
        ed.mount("<p>Hello</p>");
        ed.host_mut().set_selection(text_selection(&[0, 0], 0, 5));
        ed.toggle_preview();

        ed.exec(&Command::Bold);
        assert!(ed.insert_table(2, 2).is_ok());
        assert_eq!(ed.autolink(), 0);
        assert_eq!(ed.surface_html(), "<p>Hello</p>");

        ed.toggle_preview();
        ed.exec(&Command::Bold);
        assert_eq!(ed.surface_html(), "<p><strong>Hello</strong></p>");
    }

    #[test]
    fn test_shortcut_toggles_preview() {
        let mut ed = editor();
        ed.mount("<p>draft</p>");
        let before = ed.value().to_string();

        assert!(ed.handle_shortcut(true, true, 'P'));
        assert!(ed.is_preview());
        assert!(!ed.handle_shortcut(true, false, 'p'));
        assert!(ed.is_preview());

        // Toggling twice is a pure state flip, content untouched
        assert!(ed.handle_shortcut(true, true, 'p'));
        assert!(!ed.is_preview());
        assert_eq!(ed.value(), before);
        assert_eq!(ed.surface_html(), "<p>draft</p>");
    }

    #[test]
    fn test_table_lifecycle_through_active_cell() {
        let mut ed = editor();
        ed.mount("<p>x</p>");
        ed.insert_table(2, 2).unwrap();

        // Activate the first data cell: table is root child 1, then
        // tbody, row 1, cell 0, text 0
        let path: NodePath = [1, 0, 1, 0, 0].iter().copied().collect();
        assert!(ed.select_cell(&path));

        assert!(ed.add_table_row());
        assert!(ed.add_table_column());
        assert!(ed.delete_table_column());
        assert!(ed.delete_table_row());

        assert!(ed.merge_table_cells(CellAddress::new(0, 1)));
        assert!(ed.delete_table());
        assert!(!ed.surface_html().contains("<table"));
    }

    #[test]
    fn test_image_lifecycle() {
        let mut ed = editor();
        ed.mount("<p>x</p>");
        ed.insert_image(&ImageAttrs::new("pic.png")).unwrap();

        let path: NodePath = [1].iter().copied().collect();
        assert!(ed.select_image(&path));
        assert_eq!(ed.selected_image_attrs().unwrap().src, "pic.png");

        assert!(ed.toggle_image_expanded());
        let attrs = ed.selected_image_attrs().unwrap();
        assert!(attrs.style.as_deref().unwrap().contains("width: 100%"));

        let mut edit = ImageAttrs::new("pic.png");
        edit.alt = "A pic".to_string();
        assert!(ed.update_image(&edit).unwrap());
        assert!(ed.surface_html().contains("alt=\"A pic\""));

        assert!(ed.delete_image());
        assert!(!ed.surface_html().contains("<img"));
    }

    #[test]
    fn test_image_from_upload() {
        let host = MemoryHost::new().with_upload("photo.png", "data:image/png;base64,AAAA");
        let mut ed = Editor::new(host, EditorConfig::default());
        ed.mount("<p>x</p>");

        assert!(ed.insert_image_from_upload("photo.png"));
        assert!(ed.surface_html().contains("data:image/png;base64,AAAA"));
        // Missing uploads are non-fatal
        assert!(!ed.insert_image_from_upload("nope.png"));
    }

    #[test]
    fn test_paste_full_document_replaces_surface() {
        let host = MemoryHost::new().with_clipboard(
            "<!DOCTYPE html><html><head><title>Pasted</title></head>\
             <body><p>Pasted body</p></body></html>",
        );
        let mut ed = Editor::new(host, EditorConfig::default());
        ed.mount("<p>old</p>");
        let log = emissions(&mut ed);

        ed.paste();
        assert_eq!(ed.meta().title, "Pasted");
        assert_eq!(ed.surface_html(), "<p>Pasted body</p>");
        assert_eq!(log.borrow().len(), 1);
    }

    #[test]
    fn test_paste_plain_text_inserts_at_caret() {
        let host = MemoryHost::new().with_clipboard("pasted");
        let mut ed = Editor::new(host, EditorConfig::default());
        ed.mount("<p>ab</p>");
        ed.host_mut()
            .set_selection(text_selection(&[0, 0], 1, 1));

        ed.paste();
        assert_eq!(ed.surface_html(), "<p>apastedb</p>");
    }

    #[test]
    fn test_paste_denied_clipboard_is_silent() {
        let mut ed = editor();
        ed.mount("<p>keep</p>");
        let log = emissions(&mut ed);
        ed.paste();
        assert_eq!(ed.surface_html(), "<p>keep</p>");
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn test_apply_link_and_remove() {
        let mut ed = editor();
        ed.mount("<p>click here</p>");
        ed.host_mut().set_selection(text_selection(&[0, 0], 6, 10));

        assert!(ed.apply_link(&LinkAttrs::new("https://e.example")).unwrap());
        assert!(ed.surface_html().contains("<a href=\"https://e.example\">here</a>"));

        // Caret inside the new anchor text
        ed.host_mut().set_selection(SelectionRange::caret(Caret::new(
            [0, 1, 0].iter().copied().collect(),
            1,
        )));
        assert!(ed.remove_link());
        assert_eq!(ed.surface_html(), "<p>click here</p>");
    }

    #[test]
    fn test_apply_meta_emits_full_document() {
        let mut ed = editor();
        ed.mount("<p>Body</p>");
        let log = emissions(&mut ed);

        ed.apply_meta(MetaData::new("New Title", "New description"));

        let emitted = log.borrow();
        assert_eq!(emitted.len(), 1);
        assert!(emitted[0].contains("<title>New Title</title>"));
        assert!(emitted[0].contains("content=\"New description\""));
        assert!(emitted[0].contains("<p>Body</p>"));
    }

    #[test]
    fn test_export_downloads_through_host() {
        let mut ed = editor();
        ed.mount("<p>Exported</p>");
        ed.apply_meta(MetaData::new("Export Title", ""));
        ed.export().unwrap();

        let downloads = &ed.host().downloads;
        assert_eq!(downloads.len(), 1);
        assert_eq!(downloads[0].0, "content.html");
        assert!(downloads[0].1.contains("og:title"));
        assert!(downloads[0].1.contains("<p>Exported</p>"));
    }

    #[test]
    fn test_placeholder_only_when_empty() {
        let mut ed = editor();
        ed.mount("");
        assert_eq!(ed.placeholder(), Some("Start typing..."));
        ed.set_value("<p>content</p>");
        assert_eq!(ed.placeholder(), None);
    }
}
