#![forbid(unsafe_code)]

//! Picker composition.
//!
//! [`Picker`] wires the pieces together: query text feeds an [`ItemSource`]
//! through the fetch controller, the resolved collection feeds the
//! virtualizer, and the selection controller keeps the highlight valid and
//! visible. It is a [`Model`]: hosts deliver [`Msg`] values through an
//! executor and read [`PickerProps`] snapshots back.
//!
//! Ownership is deliberately one-way. The picker is the only writer of the
//! query, the collection, the viewport state, and the selection; the
//! windowing and selection components receive those as inputs and hand back
//! derived values. Item sources run inside `Cmd::Task` and communicate
//! exclusively through [`Msg::FetchDone`].

use std::fmt;
use std::sync::Arc;

use vpick_runtime::{Cmd, Completion, FetchController, FetchStatus, FetchTicket, Model};
use vpick_virtual::{OffsetIndex, VirtualRow, Virtualizer};

use crate::item::Item;
use crate::selection::{Activation, SelectionState};
use crate::source::{FetchError, ItemSource};

/// Per-item size estimator: display size in pixels for one item.
pub type SizeEstimator = dyn Fn(&Item) -> u32 + Send + Sync;

/// Tunables for a [`Picker`].
pub struct PickerConfig {
    /// Uniform row size in pixels, used when no estimator is set.
    pub row_size: u32,
    /// Rows kept mounted beyond each viewport edge.
    pub overscan: usize,
    /// Initial viewport height in pixels.
    pub viewport_height: u32,
    estimator: Option<Box<SizeEstimator>>,
}

impl Default for PickerConfig {
    fn default() -> Self {
        Self {
            row_size: 20,
            overscan: 10,
            viewport_height: 200,
            estimator: None,
        }
    }
}

impl fmt::Debug for PickerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PickerConfig")
            .field("row_size", &self.row_size)
            .field("overscan", &self.overscan)
            .field("viewport_height", &self.viewport_height)
            .field("estimator", &self.estimator.as_ref().map(|_| "..."))
            .finish()
    }
}

impl PickerConfig {
    /// Set the uniform row size in pixels.
    #[must_use]
    pub fn with_row_size(mut self, row_size: u32) -> Self {
        self.row_size = row_size;
        self
    }

    /// Set the overscan row count.
    #[must_use]
    pub fn with_overscan(mut self, overscan: usize) -> Self {
        self.overscan = overscan;
        self
    }

    /// Set the initial viewport height in pixels.
    #[must_use]
    pub fn with_viewport_height(mut self, height: u32) -> Self {
        self.viewport_height = height;
        self
    }

    /// Size rows per item instead of uniformly.
    ///
    /// The estimator runs once per item each time the collection is
    /// replaced, never per window read.
    #[must_use]
    pub fn with_estimator(mut self, estimate: impl Fn(&Item) -> u32 + Send + Sync + 'static) -> Self {
        self.estimator = Some(Box::new(estimate));
        self
    }
}

/// Messages a host (or a task completion) delivers to the picker.
#[derive(Debug)]
pub enum Msg {
    /// The search text changed.
    QueryChanged(String),
    /// A fetch issued earlier completed.
    FetchDone {
        /// Identity of the completed request.
        ticket: FetchTicket,
        /// What the item source produced.
        result: Result<Vec<Item>, FetchError>,
    },
    /// Move the highlight one row down (wraps).
    HighlightNext,
    /// Move the highlight one row up (wraps).
    HighlightPrev,
    /// Put the highlight on a specific row (pointer hover/press).
    HighlightTo(usize),
    /// Turn the highlight into the selection (Enter/click).
    Activate,
    /// Drop the selection, reset the query, re-fetch everything.
    ClearSelection,
    /// The host's scroll container moved.
    Scrolled(u64),
    /// The host's viewport was resized.
    Resized(u32),
}

/// User-visible side effect of the latest activation or clear.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Announcement {
    /// An item was selected.
    Selected(Item),
    /// The selection was cleared.
    SelectionCleared,
}

/// Read-only snapshot for the host rendering boundary.
///
/// `rows` carry absolute `start` offsets; hosts position each row
/// absolutely against a single spacer of `total_size` so the scrollbar
/// reflects the whole collection without mounting it.
#[derive(Debug)]
pub struct PickerProps<'a> {
    /// Current search text.
    pub query: &'a str,
    /// Status of the latest fetch.
    pub status: FetchStatus,
    /// The current item collection (last resolved).
    pub items: &'a [Item],
    /// Highlighted index into `items`, if any.
    pub highlighted: Option<usize>,
    /// Selected item, if any.
    pub selected: Option<&'a Item>,
    /// Rows that must be mounted right now.
    pub rows: Vec<VirtualRow>,
    /// Total virtual content size in pixels.
    pub total_size: u64,
}

/// Headless searchable single-select picker.
pub struct Picker<S> {
    source: Arc<S>,
    config: PickerConfig,
    query: String,
    fetch: FetchController<Vec<Item>, FetchError>,
    virt: Virtualizer,
    selection: SelectionState,
    announcement: Option<Announcement>,
}

impl<S: ItemSource + 'static> Picker<S> {
    /// Create a picker over `source` with default config.
    pub fn new(source: S) -> Self {
        Self::with_config(source, PickerConfig::default())
    }

    /// Create a picker with explicit tunables.
    pub fn with_config(source: S, config: PickerConfig) -> Self {
        let virt = Virtualizer::new(OffsetIndex::empty(), config.viewport_height)
            .with_overscan(config.overscan);
        Self {
            source: Arc::new(source),
            config,
            query: String::new(),
            fetch: FetchController::new(),
            virt,
            selection: SelectionState::new(),
            announcement: None,
        }
    }

    /// Current search text.
    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    /// The current item collection: the most recently resolved one.
    #[must_use]
    pub fn items(&self) -> &[Item] {
        self.fetch.data().map_or(&[], Vec::as_slice)
    }

    /// Number of items in the current collection.
    #[must_use]
    pub fn item_count(&self) -> usize {
        self.fetch.data().map_or(0, Vec::len)
    }

    /// Status of the latest fetch.
    #[must_use]
    pub fn fetch_status(&self) -> FetchStatus {
        self.fetch.status()
    }

    /// Error from the latest fetch, if it was rejected.
    #[must_use]
    pub fn fetch_error(&self) -> Option<&FetchError> {
        self.fetch.error()
    }

    /// Highlighted index, if any.
    #[must_use]
    pub fn highlighted(&self) -> Option<usize> {
        self.selection.highlighted()
    }

    /// Selected item, if any.
    #[must_use]
    pub fn selected(&self) -> Option<&Item> {
        self.selection.selected()
    }

    /// Current scroll offset in pixels.
    #[must_use]
    pub fn scroll_offset(&self) -> u64 {
        self.virt.scroll_offset()
    }

    /// Take the pending announcement, if one was emitted since the last
    /// call.
    pub fn take_announcement(&mut self) -> Option<Announcement> {
        self.announcement.take()
    }

    /// Build the read-only props snapshot for the host.
    #[must_use]
    pub fn props(&self) -> PickerProps<'_> {
        let window = self.virt.window();
        PickerProps {
            query: &self.query,
            status: self.fetch.status(),
            items: self.items(),
            highlighted: self.selection.highlighted(),
            selected: self.selection.selected(),
            rows: window.rows,
            total_size: window.total_size,
        }
    }

    fn issue_fetch(&mut self) -> Cmd<Msg> {
        let ticket = self.fetch.begin();
        #[cfg(feature = "tracing")]
        tracing::debug!(query = %self.query, "issuing item fetch");
        let source = Arc::clone(&self.source);
        let query = self.query.clone();
        Cmd::task(move || Msg::FetchDone {
            ticket,
            result: source.fetch(&query),
        })
    }

    /// Rebuild the offset table after the collection was replaced.
    ///
    /// This is the only place the size estimator runs, so window reads stay
    /// free of estimator calls no matter how often the host re-renders.
    fn rebuild_offsets(&mut self) {
        let index = {
            let items = self.items();
            match self.config.estimator.as_deref() {
                Some(estimate) => OffsetIndex::build(items.len(), |i| estimate(&items[i])),
                None => OffsetIndex::uniform(items.len(), self.config.row_size),
            }
        };
        self.virt.replace_index(index);
    }

    fn scroll_highlight_into_view(&mut self) {
        let Some(index) = self.selection.highlighted() else {
            return;
        };
        if self.virt.scroll_to_index(index).is_err() {
            // The highlight invariant keeps the index in bounds; landing
            // here means a transition skipped clamp_to. The viewport is
            // left untouched.
            #[cfg(feature = "tracing")]
            tracing::debug!(index, "highlight outside collection bounds, scroll skipped");
        }
    }
}

impl<S: ItemSource + 'static> Model for Picker<S> {
    type Message = Msg;

    /// Issue the initial empty-query fetch.
    fn init(&mut self) -> Cmd<Msg> {
        self.issue_fetch()
    }

    fn update(&mut self, msg: Msg) -> Cmd<Msg> {
        match msg {
            Msg::QueryChanged(query) => {
                if query == self.query {
                    return Cmd::none();
                }
                self.query = query;
                self.issue_fetch()
            }
            Msg::FetchDone { ticket, result } => {
                if self.fetch.complete(ticket, result) == Completion::Stale {
                    return Cmd::none();
                }
                if self.fetch.status() == FetchStatus::Resolved {
                    self.selection.clamp_to(self.item_count());
                    self.rebuild_offsets();
                }
                Cmd::none()
            }
            Msg::HighlightNext => {
                self.selection.highlight_next(self.item_count());
                self.scroll_highlight_into_view();
                Cmd::none()
            }
            Msg::HighlightPrev => {
                self.selection.highlight_prev(self.item_count());
                self.scroll_highlight_into_view();
                Cmd::none()
            }
            Msg::HighlightTo(index) => {
                let len = self.item_count();
                if index < len {
                    self.selection.set_highlight(Some(index), len);
                    self.scroll_highlight_into_view();
                }
                Cmd::none()
            }
            Msg::Activate => {
                let outcome = self.selection.activate(self.fetch.data().map_or(&[], Vec::as_slice));
                self.announcement = Some(match outcome {
                    Activation::Selected(item) => Announcement::Selected(item),
                    Activation::Cleared => Announcement::SelectionCleared,
                });
                Cmd::none()
            }
            Msg::ClearSelection => {
                self.selection.clear();
                self.query.clear();
                self.announcement = Some(Announcement::SelectionCleared);
                self.issue_fetch()
            }
            Msg::Scrolled(offset) => {
                self.virt.set_scroll_offset(offset);
                Cmd::none()
            }
            Msg::Resized(height) => {
                self.virt.set_viewport_height(height);
                Cmd::none()
            }
        }
    }
}
