#![forbid(unsafe_code)]

//! Visible-window computation and scroll-to-index.
//!
//! A [`Virtualizer`] owns the viewport state (scroll offset and height, both
//! in pixels) alongside an [`OffsetIndex`] and derives the set of rows a host
//! must mount. Rows are recomputed from scratch on every [`Virtualizer::window`]
//! call; nothing is cached between calls, so the result is a pure function of
//! the current state.

use std::fmt;

use crate::offsets::OffsetIndex;

/// A requested index outside the collection bounds.
///
/// Callers are expected to clamp before asking; when they don't, the
/// operation fails without touching any state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutOfRange {
    /// The rejected index.
    pub index: usize,
    /// Collection length at the time of the call.
    pub len: usize,
}

impl fmt::Display for OutOfRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "index {} out of range for {} items", self.index, self.len)
    }
}

impl std::error::Error for OutOfRange {}

/// One materialized row: where it goes and how tall it is.
///
/// Derived data with no persistent identity: a fresh set is produced by
/// every [`Virtualizer::window`] call. `start` is absolute within the
/// virtual content, so hosts can position rows independently of one another
/// (the contract does not require the set to be contiguous, even though
/// this engine always produces a contiguous range).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VirtualRow {
    /// Index into the item collection.
    pub index: usize,
    /// Absolute start offset in pixels.
    pub start: u64,
    /// Row size in pixels.
    pub size: u32,
}

/// The derived render set for one viewport state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Window {
    /// Rows to mount, ascending by index.
    pub rows: Vec<VirtualRow>,
    /// Total virtual content size (drives the host's spacer/scrollbar).
    pub total_size: u64,
}

/// Computes which rows of a collection must exist for the current viewport.
#[derive(Debug, Clone)]
pub struct Virtualizer {
    index: OffsetIndex,
    scroll_offset: u64,
    viewport_height: u32,
    overscan: usize,
}

impl Virtualizer {
    /// Create a virtualizer over `index` with the given viewport height in
    /// pixels.
    #[must_use]
    pub fn new(index: OffsetIndex, viewport_height: u32) -> Self {
        Self {
            index,
            scroll_offset: 0,
            viewport_height,
            overscan: 0,
        }
    }

    /// Set the number of extra rows kept mounted beyond each viewport edge.
    #[must_use]
    pub fn with_overscan(mut self, overscan: usize) -> Self {
        self.overscan = overscan;
        self
    }

    /// Number of items in the collection.
    #[must_use]
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Whether the collection is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Current scroll offset in pixels.
    #[must_use]
    pub fn scroll_offset(&self) -> u64 {
        self.scroll_offset
    }

    /// Current viewport height in pixels.
    #[must_use]
    pub fn viewport_height(&self) -> u32 {
        self.viewport_height
    }

    /// Overscan row count.
    #[must_use]
    pub fn overscan(&self) -> usize {
        self.overscan
    }

    /// The offset table currently in use.
    #[must_use]
    pub fn offset_index(&self) -> &OffsetIndex {
        &self.index
    }

    /// Replace the offset table after the collection changed.
    ///
    /// The scroll offset is clamped against the new content size, never
    /// reset, so the viewport stays as close as possible to where the user
    /// left it.
    pub fn replace_index(&mut self, index: OffsetIndex) {
        self.index = index;
        self.scroll_offset = self.scroll_offset.min(self.max_scroll());
    }

    /// Set the scroll offset, clamped to the scrollable range.
    pub fn set_scroll_offset(&mut self, offset: u64) {
        self.scroll_offset = offset.min(self.max_scroll());
    }

    /// Set the viewport height, re-clamping the scroll offset.
    pub fn set_viewport_height(&mut self, height: u32) {
        self.viewport_height = height;
        self.scroll_offset = self.scroll_offset.min(self.max_scroll());
    }

    /// Largest useful scroll offset: content size minus one viewport.
    #[must_use]
    pub fn max_scroll(&self) -> u64 {
        self.index
            .total_size()
            .saturating_sub(u64::from(self.viewport_height))
    }

    /// Compute the rows that must exist for the current viewport.
    ///
    /// The visible range is the minimal contiguous index span covering
    /// `[scroll_offset, scroll_offset + viewport_height)`, expanded by
    /// `overscan` rows on each side and clamped to the collection bounds.
    #[must_use]
    pub fn window(&self) -> Window {
        #[cfg(feature = "tracing")]
        let _span = tracing::trace_span!(
            "window",
            items = self.index.len(),
            offset = self.scroll_offset,
            height = self.viewport_height
        )
        .entered();

        let total_size = self.index.total_size();
        if self.index.is_empty() || self.viewport_height == 0 || self.scroll_offset >= total_size {
            return Window {
                rows: Vec::new(),
                total_size,
            };
        }

        let top = self.scroll_offset;
        let bottom = top + u64::from(self.viewport_height);
        let first_visible = self.index.index_at(top);
        let last_visible = self.index.index_at(bottom.saturating_sub(1));

        let first = first_visible.saturating_sub(self.overscan);
        let last = last_visible
            .saturating_add(self.overscan)
            .min(self.index.len() - 1);

        let mut rows = Vec::with_capacity(last - first + 1);
        for index in first..=last {
            rows.push(VirtualRow {
                index,
                start: self.index.start_of(index),
                size: self.index.size_of(index),
            });
        }
        Window { rows, total_size }
    }

    /// Adjust the scroll offset so `index` lies fully inside the viewport.
    ///
    /// Nearest-edge placement: a row already fully visible is left alone
    /// (`Ok(false)`); a row above the viewport is aligned with the top; a
    /// row below (or straddling the bottom edge) is aligned with the
    /// bottom, so a row one step out of view moves the viewport by one
    /// step instead of jumping it to the top. Returns `Ok(true)` when the
    /// offset moved.
    ///
    /// # Errors
    ///
    /// [`OutOfRange`] when `index >= len`; the viewport is left untouched.
    pub fn scroll_to_index(&mut self, index: usize) -> Result<bool, OutOfRange> {
        if index >= self.index.len() {
            return Err(OutOfRange {
                index,
                len: self.index.len(),
            });
        }

        let start = self.index.start_of(index);
        let end = start + u64::from(self.index.size_of(index));
        let top = self.scroll_offset;
        let bottom = top + u64::from(self.viewport_height);

        if start >= top && end <= bottom {
            return Ok(false);
        }

        let target = if start < top {
            start
        } else {
            end.saturating_sub(u64::from(self.viewport_height))
        };
        self.scroll_offset = target.min(self.max_scroll());
        Ok(true)
    }
}
