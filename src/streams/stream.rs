use crate::core::Observation;
use std::io::Error;

/// Pull-based interface for sources that produce `Observation`s.
///
/// Implementations may represent finite datasets (e.g., files) or unbounded
/// generators. Observations from one stream draw on a fixed set of feature
/// names, but individual observations may omit features: absence is a valid
/// value for this data model, not an error.
pub trait Stream: std::fmt::Debug {
    /// The feature names this stream can mention, immutable for the life of
    /// the stream.
    fn feature_names(&self) -> &[String];

    /// Indicates whether the stream *may* produce more observations.
    ///
    /// Finite streams return `false` once exhausted; unbounded generators
    /// typically return `true` always. Cheap and side effect free; once it
    /// returns `false`, [`next_observation`](Stream::next_observation) must
    /// return `None`.
    fn has_more_observations(&self) -> bool;

    /// Produces the next observation, or `None` when exhausted.
    fn next_observation(&mut self) -> Option<Observation>;

    /// Resets the stream to its initial state.
    ///
    /// File-backed streams rewind to the first data row; generators re-seed
    /// their RNG and clear counters. Feature names remain unchanged.
    fn restart(&mut self) -> Result<(), Error>;
}
