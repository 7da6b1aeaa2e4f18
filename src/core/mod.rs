pub mod counts;
pub mod observation;

pub use counts::{CountStore, SnapshotError, StateSnapshot};
pub use observation::Observation;
