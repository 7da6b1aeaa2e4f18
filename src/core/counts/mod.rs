mod count_store;
mod snapshot;

pub use count_store::CountStore;
pub use snapshot::{SnapshotError, StateSnapshot, snapshot_schema};
