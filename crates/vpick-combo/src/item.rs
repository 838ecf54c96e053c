#![forbid(unsafe_code)]

//! Item model.
//!
//! Items are opaque to the engine: a stable identifier plus a display
//! label. Identity is always the identifier. Two items with the same id
//! are the same item no matter where they sit in the collection, and a
//! selection survives re-filtering because it is compared by id, not by
//! index or reference.

use std::fmt;

/// Stable unique identifier for an [`Item`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemId(pub u64);

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One selectable entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    /// Stable identity.
    pub id: ItemId,
    /// Display label.
    pub name: String,
}

impl Item {
    /// Create an item.
    pub fn new(id: u64, name: impl Into<String>) -> Self {
        Self {
            id: ItemId(id),
            name: name.into(),
        }
    }

    /// Identity comparison, independent of position or label.
    #[must_use]
    pub fn same_as(&self, other: &Item) -> bool {
        self.id == other.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_is_the_id() {
        let a = Item::new(1, "Springfield");
        let b = Item::new(1, "Springfield (renamed)");
        let c = Item::new(2, "Springfield");
        assert!(a.same_as(&b));
        assert!(!a.same_as(&c));
    }

    #[test]
    fn id_displays_with_hash() {
        assert_eq!(ItemId(42).to_string(), "#42");
    }
}
