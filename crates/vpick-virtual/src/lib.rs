#![forbid(unsafe_code)]

//! Windowing engine for virtualized lists.
//!
//! This crate answers one question: given a large ordered collection, which
//! rows must exist right now, and where do they go? Everything is computed
//! in the pixel domain from four inputs (item count, per-item sizes, scroll
//! offset, viewport height), so a host can mount a handful of absolutely
//! positioned rows against a single full-height spacer instead of
//! materializing the whole collection.
//!
//! # Core Types
//!
//! - [`OffsetIndex`]: cumulative pixel offsets, rebuilt once per collection
//!   change, binary-searched per query
//! - [`Virtualizer`]: viewport state plus the visible-window computation
//! - [`VirtualRow`] / [`Window`]: the derived render set; recomputed, never
//!   patched
//!
//! # Invariants
//!
//! 1. `window()` returns a contiguous ascending index range within
//!    `[0, len)`, possibly empty.
//! 2. `window()` is a pure function of its inputs: identical state yields
//!    identical output.
//! 3. `Window::total_size` equals the sum of every item size, whether or
//!    not any row is visible.
//! 4. A failed `scroll_to_index` leaves the viewport untouched.
//!
//! # Example
//!
//! ```
//! use vpick_virtual::{OffsetIndex, Virtualizer};
//!
//! let mut virt = Virtualizer::new(OffsetIndex::uniform(1000, 20), 200).with_overscan(10);
//! let window = virt.window();
//! assert_eq!(window.total_size, 20_000);
//! assert_eq!(window.rows.first().map(|r| r.index), Some(0));
//! assert_eq!(window.rows.last().map(|r| r.index), Some(19));
//!
//! virt.scroll_to_index(500).unwrap();
//! assert!(virt.window().rows.iter().any(|r| r.index == 500));
//! ```

pub mod offsets;
pub mod window;

pub use offsets::OffsetIndex;
pub use window::{OutOfRange, VirtualRow, Virtualizer, Window};
