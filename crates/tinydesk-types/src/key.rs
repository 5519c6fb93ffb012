//! Case-folded keys.
//!
//! Command names and window slots are both compared without regard to case.
//! Folding happens once, at construction, so lookups compare plain strings.

use std::borrow::Borrow;

/// Fold a name for case-insensitive comparison.
pub fn fold(name: &str) -> String {
    name.to_lowercase()
}

/// A case-folded key naming one window slot (e.g. `"terminal"`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WindowKey(String);

impl WindowKey {
    pub fn new(raw: &str) -> Self {
        Self(fold(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for WindowKey {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl From<&String> for WindowKey {
    fn from(raw: &String) -> Self {
        Self::new(raw)
    }
}

impl From<&WindowKey> for WindowKey {
    fn from(key: &WindowKey) -> Self {
        key.clone()
    }
}

impl Borrow<str> for WindowKey {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for WindowKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
