#![forbid(unsafe_code)]

//! Elm-style command runtime for headless models.
//!
//! State lives in a [`Model`]; every transition goes through
//! `update(msg) -> Cmd`, so pure computation stays separate from effect
//! execution. Two executors are provided:
//!
//! - [`Simulator`]: fully synchronous and deterministic; `Task` closures
//!   run inline. The right choice for tests and for hosts that already own
//!   an event loop.
//! - [`Dispatcher`]: runs `Task` closures on worker threads and funnels
//!   their completion messages back over a channel; all model mutation
//!   still happens on the pumping thread.
//!
//! The [`fetch`] module builds on this with a supersession controller for
//! asynchronous data loading: only the most recently issued request may
//! mutate state, no matter in which order completions arrive.

pub mod dispatch;
pub mod fetch;
pub mod program;
pub mod simulator;

pub use dispatch::Dispatcher;
pub use fetch::{Completion, FetchController, FetchStatus, FetchTicket};
pub use program::{Cmd, Model};
pub use simulator::Simulator;
