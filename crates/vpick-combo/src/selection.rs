#![forbid(unsafe_code)]

//! Highlight and selection state machine.
//!
//! Two independent axes: a transient highlight (an index into the current
//! collection) and a durable selection (an owned item, compared by id).
//! The highlight must always be a valid index or `None`; whoever replaces
//! the collection calls [`SelectionState::clamp_to`] to re-establish that.
//!
//! Keyboard navigation wraps: stepping past the last index lands on the
//! first and vice versa. With no highlight yet, next starts at the first
//! item and prev at the last.

use crate::item::Item;

/// Result of an activation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Activation {
    /// The highlighted item became the selection.
    Selected(Item),
    /// Nothing was highlighted; the selection was cleared instead.
    Cleared,
}

/// Highlight plus selection over the current item collection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionState {
    highlighted: Option<usize>,
    selected: Option<Item>,
}

impl SelectionState {
    /// Fresh state: nothing highlighted, nothing selected.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Currently highlighted index, if any.
    #[must_use]
    pub fn highlighted(&self) -> Option<usize> {
        self.highlighted
    }

    /// Currently selected item, if any.
    #[must_use]
    pub fn selected(&self) -> Option<&Item> {
        self.selected.as_ref()
    }

    /// Move the highlight one step down, wrapping at the end.
    pub fn highlight_next(&mut self, len: usize) {
        if len == 0 {
            self.highlighted = None;
            return;
        }
        self.highlighted = Some(match self.highlighted {
            Some(i) => (i + 1) % len,
            None => 0,
        });
    }

    /// Move the highlight one step up, wrapping at the start.
    pub fn highlight_prev(&mut self, len: usize) {
        if len == 0 {
            self.highlighted = None;
            return;
        }
        self.highlighted = Some(match self.highlighted {
            Some(i) => (i + len - 1) % len,
            None => len - 1,
        });
    }

    /// Set the highlight directly; out-of-range indices clear it.
    pub fn set_highlight(&mut self, index: Option<usize>, len: usize) {
        self.highlighted = index.filter(|&i| i < len);
    }

    /// Re-establish the highlight invariant after the collection changed.
    ///
    /// A highlight at or beyond `len` resets to `None`; it never clamps to
    /// the last row, because after a re-filter the old index points at an
    /// unrelated item.
    pub fn clamp_to(&mut self, len: usize) {
        if let Some(i) = self.highlighted
            && i >= len
        {
            self.highlighted = None;
        }
    }

    /// Turn the highlight into a selection.
    ///
    /// With no highlight (or a highlight pointing past `items`, which the
    /// invariant should prevent) this clears the selection instead of
    /// failing.
    pub fn activate(&mut self, items: &[Item]) -> Activation {
        match self.highlighted.and_then(|i| items.get(i)) {
            Some(item) => {
                self.selected = Some(item.clone());
                Activation::Selected(item.clone())
            }
            None => {
                self.selected = None;
                Activation::Cleared
            }
        }
    }

    /// Drop both highlight and selection.
    pub fn clear(&mut self) {
        self.highlighted = None;
        self.selected = None;
    }

    /// Whether `item` is the current selection, compared by id.
    #[must_use]
    pub fn is_selected(&self, item: &Item) -> bool {
        self.selected.as_ref().is_some_and(|s| s.id == item.id)
    }
}


#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;

    #[derive(Debug, Clone, Copy)]
    enum Op {
        Next,
        Prev,
        Set(usize),
        Clamp(usize),
    }

    fn op() -> impl Strategy<Value = Op> {
        prop_oneof![
            Just(Op::Next),
            Just(Op::Prev),
            (0usize..40).prop_map(Op::Set),
            (0usize..40).prop_map(Op::Clamp),
        ]
    }

    proptest! {
        /// The highlight is a valid index or `None` after any sequence of
        /// transitions, and next/prev never clear an existing highlight on
        /// a non-empty collection.
        #[test]
        fn highlight_stays_in_bounds(
            initial_len in 0usize..30,
            ops in proptest::collection::vec(op(), 1..40),
        ) {
            let mut sel = SelectionState::new();
            let mut len = initial_len;
            for op in ops {
                match op {
                    Op::Next => sel.highlight_next(len),
                    Op::Prev => sel.highlight_prev(len),
                    Op::Set(i) => sel.set_highlight(Some(i), len),
                    Op::Clamp(new_len) => {
                        len = new_len;
                        sel.clamp_to(len);
                    }
                }
                if let Some(i) = sel.highlighted() {
                    prop_assert!(i < len);
                }
                if len > 0 && matches!(op, Op::Next | Op::Prev) {
                    prop_assert!(sel.highlighted().is_some());
                }
            }
        }
    }
}
