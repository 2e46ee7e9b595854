//! Host-facing services over the pure domain layer.

pub mod match_flow;
pub mod match_registry;
pub mod snapshot_hub;

pub use match_flow::MatchFlowService;
pub use match_registry::{MatchRegistry, MatchSession};
pub use snapshot_hub::{SnapshotHub, SnapshotListener};
