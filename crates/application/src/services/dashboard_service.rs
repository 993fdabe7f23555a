//! Dashboard use case
//!
//! Ties the coordinator to the displayed slot and derives the report the
//! presentation layer renders.

use std::sync::Arc;

use domain::classification::ClassificationConfig;
use domain::report::SnapshotReport;
use domain::value_objects::LocationQuery;
use tracing::instrument;

use super::snapshot_service::SnapshotService;
use super::snapshot_slot::{PublishOutcome, SlotState, SnapshotSlot};
use crate::error::ApplicationError;
use crate::ports::SourceGatewayPort;

/// Search-and-display service
#[derive(Debug)]
pub struct DashboardService {
    snapshots: SnapshotService,
    slot: SnapshotSlot,
    classification: ClassificationConfig,
}

impl DashboardService {
    /// Create a dashboard over the given gateway and tables
    #[must_use]
    pub fn new(gateway: Arc<dyn SourceGatewayPort>, classification: ClassificationConfig) -> Self {
        Self {
            snapshots: SnapshotService::new(gateway),
            slot: SnapshotSlot::new(),
            classification,
        }
    }

    /// Run one aggregate fetch and publish its outcome
    ///
    /// Returns `Superseded` when another search started while this one was
    /// in flight; the slot then keeps the newer search's outcome.
    pub async fn search(&self, query: LocationQuery) -> PublishOutcome {
        if self.search_state(query).await.is_some() {
            PublishOutcome::Applied
        } else {
            PublishOutcome::Superseded
        }
    }

    /// Run one aggregate fetch and return the state it published
    ///
    /// `None` when superseded. Render from the returned state rather than
    /// re-reading the slot, which a newer search may already have replaced.
    #[instrument(skip(self), fields(query = %query))]
    pub async fn search_state(&self, query: LocationQuery) -> Option<SlotState> {
        let ticket = self.slot.begin(query);
        let outcome = self.snapshots.fetch_snapshot(ticket.query()).await;
        self.slot.publish_state(ticket, outcome)
    }

    /// Validate raw input and search for it
    ///
    /// Blank input is rejected before any source is contacted.
    pub async fn search_text(&self, raw: &str) -> Result<PublishOutcome, ApplicationError> {
        let query = LocationQuery::new(raw)?;
        Ok(self.search(query).await)
    }

    /// What is currently displayed
    #[must_use]
    pub fn state(&self) -> SlotState {
        self.slot.state()
    }

    /// Report for the displayed snapshot
    ///
    /// Fails with the aggregate error if the last search failed, or with
    /// `NoSnapshot` if nothing has been fetched yet.
    pub fn report(&self) -> Result<SnapshotReport, ApplicationError> {
        self.report_for(&self.slot.state())
    }

    /// Report for a previously captured state
    pub fn report_for(&self, state: &SlotState) -> Result<SnapshotReport, ApplicationError> {
        match state {
            SlotState::Ready { snapshot, .. } => {
                Ok(SnapshotReport::build(snapshot, &self.classification))
            },
            SlotState::Failed { reason, .. } => Err(reason.clone().into()),
            SlotState::Empty => Err(ApplicationError::NoSnapshot),
        }
    }

    /// Tables and cutoff in use
    #[must_use]
    pub const fn classification(&self) -> &ClassificationConfig {
        &self.classification
    }
}
