//! Full-document / fragment round-trip: extraction, meta injection, export.
//!
//! A content value is either a bare fragment or a complete HTML document;
//! [`content_kind`] decides which by marker scan. Extraction and injection
//! are inverse boundary operations on the string form: the fragment is kept
//! byte-exact through a `inject` → `extract` round trip, and injection is
//! idempotent because it rewrites the canonical tags it would itself emit.

use std::sync::LazyLock;

use regex::Regex;
use scraper::{Html, Selector};

use crate::render::{escape_attr, escape_html};

// =============================================================================
// Content kind detection
// =============================================================================

/// Whether a content value is a bare fragment or a complete document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentKind {
    /// Markup snippet intended for embedding
    Fragment,
    /// Markup with a doctype/html wrapper
    FullDocument,
}

/// Classify a content value by its document markers.
pub fn content_kind(html: &str) -> ContentKind {
    if find_ci(html, "<!doctype").is_some() || find_ci(html, "<html").is_some() {
        ContentKind::FullDocument
    } else {
        ContentKind::Fragment
    }
}

/// Check whether a content value is a complete document.
pub fn is_full_document(html: &str) -> bool {
    content_kind(html) == ContentKind::FullDocument
}

// =============================================================================
// Meta-data record
// =============================================================================

/// SEO title/description pair associated with a piece of content.
///
/// Both fields are always strings; absence in source markup falls back to
/// host-supplied defaults, never to missing values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MetaData {
    pub title: String,
    pub description: String,
}

impl MetaData {
    /// Create a meta-data record.
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
        }
    }
}

// =============================================================================
// Extraction
// =============================================================================

/// Extract the body fragment from a content value.
///
/// Fragments pass through unchanged, which makes the operation idempotent.
/// For full documents the inner `<body>` markup is returned; a document
/// with a `</head>` but no body wrapper yields everything after the head
/// (closing wrapper tags stripped); anything else falls back to the input.
pub fn extract_fragment(html: &str) -> &str {
    if !is_full_document(html) {
        return html;
    }

    if let Some(open) = find_ci(html, "<body")
        && let Some(gt) = html[open..].find('>')
    {
        let start = open + gt + 1;
        if let Some(end) = rfind_ci(&html[start..], "</body>") {
            return &html[start..start + end];
        }
    }

    if let Some(head_end) = find_ci(html, "</head>") {
        let mut tail = &html[head_end + "</head>".len()..];
        if let Some(p) = rfind_ci(tail, "</html>") {
            tail = &tail[..p];
        }
        if let Some(p) = rfind_ci(tail, "</body>") {
            tail = &tail[..p];
        }
        return tail;
    }

    html
}

/// Read back the title and description of a full document.
///
/// Absent or empty values are substituted with the supplied defaults.
pub fn extract_meta(html: &str, defaults: &MetaData) -> MetaData {
    let doc = Html::parse_document(html);

    let title = Selector::parse("title")
        .ok()
        .and_then(|s| doc.select(&s).next())
        .map(|el| el.text().collect::<String>().trim().to_string())
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| defaults.title.clone());

    let description = Selector::parse(r#"meta[name="description"]"#)
        .ok()
        .and_then(|s| doc.select(&s).next())
        .and_then(|el| el.value().attr("content"))
        .map(|c| c.trim().to_string())
        .filter(|c| !c.is_empty())
        .unwrap_or_else(|| defaults.description.clone());

    MetaData { title, description }
}

// =============================================================================
// Injection
// =============================================================================

static HEAD_OPEN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<head[^>]*>").expect("HEAD_OPEN_RE: hardcoded regex is valid")
});

static HTML_OPEN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<html[^>]*>").expect("HTML_OPEN_RE: hardcoded regex is valid")
});

static DOCTYPE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<!doctype[^>]*>").expect("DOCTYPE_RE: hardcoded regex is valid")
});

static TITLE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<title[^>]*>.*?</title>").expect("TITLE_RE: hardcoded regex is valid")
});

static DESC_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?is)<meta\s[^>]*name\s*=\s*["']?description["']?[^>]*>"#)
        .expect("DESC_RE: hardcoded regex is valid")
});

/// Merge a meta-data record into a content value.
///
/// A fragment is wrapped into a minimal complete document; a full document
/// gets its `<title>` and `<meta name="description">` overwritten in place
/// (created if missing). Re-running with the same record is idempotent.
pub fn inject_meta(content: &str, meta: &MetaData) -> String {
    if !is_full_document(content) {
        return wrap_fragment(content, meta);
    }

    let mut doc = content.to_string();

    if !HEAD_OPEN_RE.is_match(&doc) {
        let insert_at = HTML_OPEN_RE
            .find(&doc)
            .map(|m| m.end())
            .or_else(|| DOCTYPE_RE.find(&doc).map(|m| m.end()))
            .unwrap_or(0);
        doc.insert_str(insert_at, "<head></head>");
    }

    let title_tag = format!("<title>{}</title>", escape_html(&meta.title));
    if let Some(range) = TITLE_RE.find(&doc).map(|m| m.range()) {
        doc.replace_range(range, &title_tag);
    } else if let Some(at) = HEAD_OPEN_RE.find(&doc).map(|m| m.end()) {
        doc.insert_str(at, &title_tag);
    }

    let desc_tag = format!(
        "<meta name=\"description\" content=\"{}\">",
        escape_attr(&meta.description)
    );
    if let Some(range) = DESC_RE.find(&doc).map(|m| m.range()) {
        doc.replace_range(range, &desc_tag);
    } else if let Some(at) = TITLE_RE.find(&doc).map(|m| m.end()) {
        doc.insert_str(at, &desc_tag);
    } else if let Some(at) = HEAD_OPEN_RE.find(&doc).map(|m| m.end()) {
        doc.insert_str(at, &desc_tag);
    }

    doc
}

fn wrap_fragment(fragment: &str, meta: &MetaData) -> String {
    format!(
        "<!DOCTYPE html>\n\
         <html lang=\"en\">\n\
         <head>\n\
         <meta charset=\"UTF-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n\
         <title>{}</title>\n\
         <meta name=\"description\" content=\"{}\">\n\
         </head>\n\
         <body>{}</body>\n\
         </html>",
        escape_html(&meta.title),
        escape_attr(&meta.description),
        fragment
    )
}

// =============================================================================
// Export
// =============================================================================

/// Assemble a downloadable complete document with the full SEO tag set
/// (title, description, Open Graph, Twitter card).
pub fn export_document(content: &str, meta: &MetaData) -> String {
    let fragment = extract_fragment(content);
    let title = escape_html(&meta.title);
    let title_attr = escape_attr(&meta.title);
    let desc = escape_attr(&meta.description);
    format!(
        "<!DOCTYPE html>\n\
         <html lang=\"en\">\n\
         <head>\n\
         <meta charset=\"UTF-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n\
         <title>{title}</title>\n\
         <meta name=\"description\" content=\"{desc}\">\n\
         <meta property=\"og:title\" content=\"{title_attr}\">\n\
         <meta property=\"og:description\" content=\"{desc}\">\n\
         <meta property=\"og:type\" content=\"article\">\n\
         <meta name=\"twitter:card\" content=\"summary\">\n\
         <meta name=\"twitter:title\" content=\"{title_attr}\">\n\
         <meta name=\"twitter:description\" content=\"{desc}\">\n\
         </head>\n\
         <body>{fragment}</body>\n\
         </html>"
    )
}

// =============================================================================
// Case-insensitive marker search
// =============================================================================

fn find_ci(haystack: &str, needle: &str) -> Option<usize> {
    let (h, n) = (haystack.as_bytes(), needle.as_bytes());
    if n.is_empty() || h.len() < n.len() {
        return None;
    }
    h.windows(n.len()).position(|w| w.eq_ignore_ascii_case(n))
}

fn rfind_ci(haystack: &str, needle: &str) -> Option<usize> {
    let (h, n) = (haystack.as_bytes(), needle.as_bytes());
    if n.is_empty() || h.len() < n.len() {
        return None;
    }
    h.windows(n.len()).rposition(|w| w.eq_ignore_ascii_case(n))
}
