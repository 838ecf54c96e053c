#![forbid(unsafe_code)]

//! Last-issued-wins supersession for asynchronous fetches.
//!
//! The controller tracks one logical "current" request through a
//! monotonically increasing ticket. Completions carry their ticket back;
//! any completion that is not the most recently issued request is
//! discarded silently, so out-of-order arrival can never let an old
//! request clobber newer state. Previously resolved data is retained while
//! a new request is pending (stale-while-revalidate) and across
//! rejections.
//!
//! # Invariants
//!
//! 1. Only the latest ticket's completion can change status or data.
//! 2. `begin()` never drops resolved data.
//! 3. A rejected completion records its error but keeps the last-good
//!    data.
//!
//! There is no cancellation and no timeout: a superseded request keeps
//! running to completion and is dropped on arrival; a request that never
//! completes leaves the controller pending indefinitely.

use tracing::debug;

/// Status of the current logical request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchStatus {
    /// A request has been issued and has not completed yet.
    Pending,
    /// The latest request completed successfully.
    Resolved,
    /// The latest request failed.
    Rejected,
}

/// Identity of one issued request.
///
/// Opaque to callers: thread it through to [`FetchController::complete`]
/// unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    seq: u64,
}

/// Outcome of handing a completion to the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    /// The completion belonged to the latest request and was applied.
    Applied,
    /// The completion was superseded and discarded. Not an error.
    Stale,
}

/// Supersession state machine over fetches producing `T` or failing with
/// `E`.
#[derive(Debug)]
pub struct FetchController<T, E> {
    seq: u64,
    status: FetchStatus,
    data: Option<T>,
    error: Option<E>,
}

impl<T, E> Default for FetchController<T, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, E> FetchController<T, E> {
    /// Create a controller with no data and no request in flight yet.
    ///
    /// The initial status is `Pending`: a picker issues its first request
    /// immediately, and "empty, loading" is the honest description of the
    /// time before that request completes.
    #[must_use]
    pub fn new() -> Self {
        Self {
            seq: 0,
            status: FetchStatus::Pending,
            data: None,
            error: None,
        }
    }

    /// Issue a new logical request, superseding any in-flight one.
    ///
    /// Status becomes `Pending`; resolved data from earlier requests is
    /// retained for display continuity.
    pub fn begin(&mut self) -> FetchTicket {
        self.seq += 1;
        self.status = FetchStatus::Pending;
        self.error = None;
        FetchTicket { seq: self.seq }
    }

    /// Apply a completion if its ticket is still current.
    ///
    /// Superseded completions return [`Completion::Stale`] and change
    /// nothing, regardless of arrival order.
    pub fn complete(&mut self, ticket: FetchTicket, result: Result<T, E>) -> Completion {
        if ticket.seq != self.seq {
            debug!(
                ticket = ticket.seq,
                current = self.seq,
                "discarding superseded fetch completion"
            );
            return Completion::Stale;
        }
        match result {
            Ok(data) => {
                self.data = Some(data);
                self.status = FetchStatus::Resolved;
                self.error = None;
            }
            Err(err) => {
                self.status = FetchStatus::Rejected;
                self.error = Some(err);
            }
        }
        Completion::Applied
    }

    /// Whether `ticket` still identifies the latest request.
    #[must_use]
    pub fn is_current(&self, ticket: FetchTicket) -> bool {
        ticket.seq == self.seq
    }

    /// Status of the latest request.
    #[must_use]
    pub fn status(&self) -> FetchStatus {
        self.status
    }

    /// Data from the most recent *resolved* request, if any.
    ///
    /// Survives `begin()` and rejections.
    #[must_use]
    pub fn data(&self) -> Option<&T> {
        self.data.as_ref()
    }

    /// Error from the latest request, if it was rejected.
    #[must_use]
    pub fn error(&self) -> Option<&E> {
        self.error.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type Ctl = FetchController<Vec<u32>, String>;

    #[test]
    fn starts_pending_and_empty() {
        let ctl = Ctl::new();
        assert_eq!(ctl.status(), FetchStatus::Pending);
        assert!(ctl.data().is_none());
        assert!(ctl.error().is_none());
    }

    #[test]
    fn resolve_applies_data() {
        let mut ctl = Ctl::new();
        let ticket = ctl.begin();
        assert_eq!(ctl.complete(ticket, Ok(vec![1, 2])), Completion::Applied);
        assert_eq!(ctl.status(), FetchStatus::Resolved);
        assert_eq!(ctl.data(), Some(&vec![1, 2]));
    }

    #[test]
    fn begin_retains_previous_data_while_pending() {
        let mut ctl = Ctl::new();
        let first = ctl.begin();
        ctl.complete(first, Ok(vec![1]));

        let _second = ctl.begin();
        assert_eq!(ctl.status(), FetchStatus::Pending);
        assert_eq!(ctl.data(), Some(&vec![1]));
    }

    #[test]
    fn superseded_completion_is_discarded() {
        let mut ctl = Ctl::new();
        let a = ctl.begin();
        let b = ctl.begin();

        // A resolves after B was issued: dropped.
        assert_eq!(ctl.complete(a, Ok(vec![1])), Completion::Stale);
        assert_eq!(ctl.status(), FetchStatus::Pending);
        assert!(ctl.data().is_none());

        // B is still authoritative.
        assert_eq!(ctl.complete(b, Ok(vec![2])), Completion::Applied);
        assert_eq!(ctl.data(), Some(&vec![2]));
    }

    #[test]
    fn out_of_order_arrival_keeps_newest_result() {
        let mut ctl = Ctl::new();
        let a = ctl.begin();
        let b = ctl.begin();

        // B arrives first, then A limps in late.
        assert_eq!(ctl.complete(b, Ok(vec![2])), Completion::Applied);
        assert_eq!(ctl.complete(a, Ok(vec![1])), Completion::Stale);
        assert_eq!(ctl.status(), FetchStatus::Resolved);
        assert_eq!(ctl.data(), Some(&vec![2]));
    }

    #[test]
    fn stale_rejection_cannot_mark_rejected() {
        let mut ctl = Ctl::new();
        let a = ctl.begin();
        let b = ctl.begin();
        ctl.complete(b, Ok(vec![2]));

        assert_eq!(ctl.complete(a, Err("boom".into())), Completion::Stale);
        assert_eq!(ctl.status(), FetchStatus::Resolved);
        assert!(ctl.error().is_none());
    }

    #[test]
    fn rejection_keeps_last_good_data() {
        let mut ctl = Ctl::new();
        let first = ctl.begin();
        ctl.complete(first, Ok(vec![1]));

        let second = ctl.begin();
        assert_eq!(
            ctl.complete(second, Err("boom".into())),
            Completion::Applied
        );
        assert_eq!(ctl.status(), FetchStatus::Rejected);
        assert_eq!(ctl.data(), Some(&vec![1]));
        assert_eq!(ctl.error(), Some(&"boom".to_string()));
    }

    #[test]
    fn resolve_after_rejection_clears_error() {
        let mut ctl = Ctl::new();
        let first = ctl.begin();
        ctl.complete(first, Err("boom".into()));

        let second = ctl.begin();
        assert!(ctl.error().is_none(), "begin clears the previous error");
        ctl.complete(second, Ok(vec![3]));
        assert_eq!(ctl.status(), FetchStatus::Resolved);
        assert_eq!(ctl.data(), Some(&vec![3]));
    }

    #[test]
    fn is_current_tracks_latest_ticket() {
        let mut ctl = Ctl::new();
        let a = ctl.begin();
        assert!(ctl.is_current(a));
        let b = ctl.begin();
        assert!(!ctl.is_current(a));
        assert!(ctl.is_current(b));
    }
}
