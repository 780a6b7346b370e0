//! Attribute storage for tree elements.
//!
//! Attributes are kept as a name-sorted list of key-value pairs. Linear
//! scans are fine at HTML attribute counts, and the sorted order makes
//! serialization deterministic: the upstream parser hands attributes back
//! in hash order, so parse and render stay a fixed point only if storage
//! imposes an order of its own.

use compact_str::CompactString;

/// Element attributes as name-sorted key-value pairs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attrs(Vec<(CompactString, String)>);

impl Attrs {
    /// Create an empty attribute list.
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Number of attributes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if there are no attributes.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Get an attribute value by name.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Check if an attribute exists.
    pub fn has(&self, name: &str) -> bool {
        self.0.iter().any(|(k, _)| k == name)
    }

    /// Set an attribute value (update if present, insert in name order if
    /// not).
    pub fn set(&mut self, name: impl Into<CompactString>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.0.binary_search_by(|(k, _)| k.as_str().cmp(name.as_str())) {
            Ok(pos) => self.0[pos].1 = value,
            Err(pos) => self.0.insert(pos, (name, value)),
        }
    }

    /// Remove an attribute by name, returning the old value if present.
    pub fn remove(&mut self, name: &str) -> Option<String> {
        self.0
            .iter()
            .position(|(k, _)| k == name)
            .map(|pos| self.0.remove(pos).1)
    }

    /// Iterate over attribute pairs in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Class list helpers
    // ─────────────────────────────────────────────────────────────────────────

    /// Check whether the `class` attribute contains a class token.
    pub fn has_class(&self, class: &str) -> bool {
        self.get("class")
            .is_some_and(|list| list.split_ascii_whitespace().any(|c| c == class))
    }

    /// Add a class token if not already present. Idempotent.
    pub fn add_class(&mut self, class: &str) {
        if self.has_class(class) {
            return;
        }
        match self.get("class") {
            Some(existing) if !existing.trim().is_empty() => {
                let merged = format!("{} {}", existing.trim(), class);
                self.set("class", merged);
            }
            _ => self.set("class", class),
        }
    }

    /// Remove a class token, dropping the attribute when it empties.
    pub fn remove_class(&mut self, class: &str) {
        let Some(existing) = self.get("class") else {
            return;
        };
        let remaining: Vec<&str> = existing
            .split_ascii_whitespace()
            .filter(|c| *c != class)
            .collect();
        if remaining.is_empty() {
            self.remove("class");
        } else {
            self.set("class", remaining.join(" "));
        }
    }
}
