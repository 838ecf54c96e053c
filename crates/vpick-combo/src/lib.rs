#![forbid(unsafe_code)]

//! Searchable single-select picker over a virtualized list.
//!
//! This crate composes the windowing engine (`vpick-virtual`) and the
//! command runtime (`vpick-runtime`) into one headless widget model:
//!
//! - typing re-fetches the collection through an [`ItemSource`], with
//!   last-issued-wins supersession and the previous collection shown while
//!   the new one loads;
//! - arrow navigation moves a wrap-around highlight, and every highlight
//!   change scrolls the highlighted row into view even when that row is
//!   not currently materialized;
//! - activation turns the highlight into a selection and announces it;
//!   clearing resets the query and re-fetches.
//!
//! Hosts send [`Msg`] values through an executor and read
//! [`PickerProps`] snapshots back. See the crate-level example in the
//! repository README.

pub mod fixtures;
pub mod item;
pub mod picker;
pub mod selection;
pub mod source;

pub use item::{Item, ItemId};
pub use picker::{Announcement, Msg, Picker, PickerConfig, PickerProps};
pub use selection::{Activation, SelectionState};
pub use source::{FetchError, ItemSource, StaticSource};
