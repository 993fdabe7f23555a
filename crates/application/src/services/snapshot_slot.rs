//! The currently displayed snapshot and its superseded-result guard
//!
//! Each query takes a ticket carrying a generation number. Only the outcome
//! of the newest ticket is allowed to land; older outcomes are dropped.

use std::sync::Arc;

use domain::entities::ConsolidatedSnapshot;
use domain::value_objects::LocationQuery;
use parking_lot::Mutex;
use tracing::{debug, info};

use crate::error::AggregateFetchError;

/// What the slot currently shows
#[derive(Debug, Clone, Default, PartialEq)]
pub enum SlotState {
    /// Nothing fetched yet
    #[default]
    Empty,
    /// The last query succeeded
    Ready {
        /// Query the snapshot belongs to
        query: LocationQuery,
        /// The consolidated snapshot
        snapshot: Arc<ConsolidatedSnapshot>,
    },
    /// The last query failed; any previous snapshot is gone
    Failed {
        /// Query that failed
        query: LocationQuery,
        /// Why it failed
        reason: AggregateFetchError,
    },
}

impl SlotState {
    /// Snapshot if the last query succeeded
    #[must_use]
    pub fn snapshot(&self) -> Option<&Arc<ConsolidatedSnapshot>> {
        match self {
            Self::Ready { snapshot, .. } => Some(snapshot),
            Self::Empty | Self::Failed { .. } => None,
        }
    }

    /// Query the state belongs to
    #[must_use]
    pub const fn query(&self) -> Option<&LocationQuery> {
        match self {
            Self::Empty => None,
            Self::Ready { query, .. } | Self::Failed { query, .. } => Some(query),
        }
    }
}

/// Handle for one in-flight query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryTicket {
    generation: u64,
    query: LocationQuery,
}

impl QueryTicket {
    /// Generation number assigned when the query started
    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    /// The query this ticket was issued for
    #[must_use]
    pub const fn query(&self) -> &LocationQuery {
        &self.query
    }
}

/// Result of trying to publish an outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublishOutcome {
    /// The outcome is now displayed
    Applied,
    /// A newer query started since; the outcome was dropped
    Superseded,
}

#[derive(Debug, Default)]
struct SlotInner {
    latest: u64,
    state: SlotState,
}

/// Single writer-at-a-time holder of the displayed state
#[derive(Debug, Default)]
pub struct SnapshotSlot {
    inner: Mutex<SlotInner>,
}

impl SnapshotSlot {
    /// Create an empty slot
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new query, superseding every earlier ticket
    pub fn begin(&self, query: LocationQuery) -> QueryTicket {
        let mut inner = self.inner.lock();
        inner.latest += 1;
        debug!(generation = inner.latest, query = %query, "Query started");
        QueryTicket {
            generation: inner.latest,
            query,
        }
    }

    /// Publish the outcome for `ticket` if it is still the newest
    ///
    /// A failure replaces whatever was shown before, so stale data never
    /// outlives a failed query.
    pub fn publish(
        &self,
        ticket: QueryTicket,
        outcome: Result<ConsolidatedSnapshot, AggregateFetchError>,
    ) -> PublishOutcome {
        if self.publish_state(ticket, outcome).is_some() {
            PublishOutcome::Applied
        } else {
            PublishOutcome::Superseded
        }
    }

    /// Like `publish`, but return the state written under the same lock
    ///
    /// `None` means the ticket was superseded. The returned state belongs to
    /// `ticket` even if a newer outcome lands right after.
    pub fn publish_state(
        &self,
        ticket: QueryTicket,
        outcome: Result<ConsolidatedSnapshot, AggregateFetchError>,
    ) -> Option<SlotState> {
        let mut inner = self.inner.lock();
        if ticket.generation != inner.latest {
            debug!(
                generation = ticket.generation,
                latest = inner.latest,
                query = %ticket.query,
                "Dropping superseded result"
            );
            return None;
        }

        inner.state = match outcome {
            Ok(snapshot) => {
                info!(query = %ticket.query, "Snapshot published");
                SlotState::Ready {
                    query: ticket.query,
                    snapshot: Arc::new(snapshot),
                }
            },
            Err(reason) => {
                info!(query = %ticket.query, error = %reason, "Snapshot cleared after failure");
                SlotState::Failed {
                    query: ticket.query,
                    reason,
                }
            },
        };
        Some(inner.state.clone())
    }

    /// Copy of the current state
    #[must_use]
    pub fn state(&self) -> SlotState {
        self.inner.lock().state.clone()
    }

    /// Current snapshot, if the last applied outcome was a success
    #[must_use]
    pub fn snapshot(&self) -> Option<Arc<ConsolidatedSnapshot>> {
        self.inner.lock().state.snapshot().cloned()
    }

    /// Generation of the newest ticket handed out
    #[must_use]
    pub fn latest_generation(&self) -> u64 {
        self.inner.lock().latest
    }
}
