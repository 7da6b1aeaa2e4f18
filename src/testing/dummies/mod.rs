mod observations;

pub use observations::{shapes_csv, shapes_observations};
