//! Application services - Use case implementations

mod dashboard_service;
mod snapshot_service;
mod snapshot_slot;

pub use dashboard_service::DashboardService;
pub use snapshot_service::SnapshotService;
pub use snapshot_slot::{PublishOutcome, QueryTicket, SlotState, SnapshotSlot};
