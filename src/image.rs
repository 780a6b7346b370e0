//! Image insertion and attribute editing.
//!
//! Images are inserted size-constrained (`max-width: 100%`) and can be
//! toggled to expanded (`width: 100%`). The expanded state is derived from
//! the style attribute rather than stored separately, so externally loaded
//! markup reports it correctly.

use crate::error::{EditResult, EditorError};
use crate::node::Element;

/// Editable attributes of an image element.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImageAttrs {
    pub src: String,
    pub alt: String,
    /// Pixel width; omitted when unset or unparseable
    pub width: Option<u32>,
    /// Pixel height; omitted when unset or unparseable
    pub height: Option<u32>,
    /// Raw inline style, if any
    pub style: Option<String>,
}

impl ImageAttrs {
    pub fn new(src: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            ..Self::default()
        }
    }
}

/// Check whether an element is an image.
pub fn is_image(elem: &Element) -> bool {
    elem.tag == "img"
}

/// Build an image element in the constrained default state.
pub fn build_image(attrs: &ImageAttrs) -> EditResult<Element> {
    if attrs.src.trim().is_empty() {
        return Err(EditorError::EmptySource);
    }
    let mut img = Element::new("img");
    apply_image_attrs(&mut img, attrs)?;
    if img.style_prop("width").is_none() && img.style_prop("max-width").is_none() {
        img.set_style_prop("max-width", "100%");
    }
    Ok(img)
}

/// Parse a dimension attribute value into pixels. Accepts bare integers
/// and a `px` suffix; anything else (percentages, garbage, zero) is
/// treated as unset.
pub fn parse_dimension(value: &str) -> Option<u32> {
    let trimmed = value.trim();
    let digits = trimmed.strip_suffix("px").map(str::trim).unwrap_or(trimmed);
    digits.parse::<u32>().ok().filter(|&v| v > 0)
}

/// Read the editable attributes back off an image element.
pub fn image_attrs(img: &Element) -> ImageAttrs {
    ImageAttrs {
        src: img.get_attr("src").unwrap_or_default().to_string(),
        alt: img.get_attr("alt").unwrap_or_default().to_string(),
        width: img.get_attr("width").and_then(parse_dimension),
        height: img.get_attr("height").and_then(parse_dimension),
        style: img.get_attr("style").map(str::to_string),
    }
}

/// Apply a full attribute set to an existing image. Unset fields remove
/// the corresponding attribute; an absent style leaves the current one
/// untouched.
pub fn apply_image_attrs(img: &mut Element, attrs: &ImageAttrs) -> EditResult<()> {
    if attrs.src.trim().is_empty() {
        return Err(EditorError::EmptySource);
    }
    img.set_attr("src", &*attrs.src);
    if attrs.alt.is_empty() {
        img.remove_attr("alt");
    } else {
        img.set_attr("alt", &*attrs.alt);
    }
    match attrs.width {
        Some(w) => img.set_attr("width", w.to_string()),
        None => {
            img.remove_attr("width");
        }
    }
    match attrs.height {
        Some(h) => img.set_attr("height", h.to_string()),
        None => {
            img.remove_attr("height");
        }
    }
    if let Some(style) = &attrs.style {
        if style.trim().is_empty() {
            img.remove_attr("style");
        } else {
            img.set_attr("style", &**style);
        }
    }
    Ok(())
}

/// Whether an image is in the expanded (full-width) state.
pub fn is_expanded(img: &Element) -> bool {
    img.style_prop("width").as_deref() == Some("100%") && img.style_prop("max-width").is_none()
}

/// Toggle between expanded (`width: 100%`) and the constrained default
/// (`max-width: 100%`).
pub fn set_expanded(img: &mut Element, expanded: bool) {
    if expanded {
        img.remove_style_prop("max-width");
        img.set_style_prop("width", "100%");
    } else {
        img.remove_style_prop("width");
        img.set_style_prop("max-width", "100%");
    }
}
