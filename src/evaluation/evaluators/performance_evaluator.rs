use crate::evaluation::Measurement;
use std::collections::BTreeMap;

/// Online evaluator of predictive performance.
///
/// Consumes ground-truth attribute values together with the vote
/// distribution the classifier produced for them, and exposes aggregated
/// metrics via [`performance`](PerformanceEvaluator::performance).
pub trait PerformanceEvaluator: std::fmt::Debug {
    /// Clears all accumulated metrics.
    fn reset(&mut self);

    /// Feeds one scored example: the true attribute value and the classifier's
    /// votes over candidate attributes. An all-zero or empty vote map counts
    /// as an abstention, which is always wrong.
    fn add_result(&mut self, truth: &str, votes: &BTreeMap<String, f64>);

    /// Fraction of examples classified correctly so far; `NaN` before the
    /// first example.
    fn accuracy(&self) -> f64;

    /// Snapshot of the current metrics.
    fn performance(&self) -> Vec<Measurement>;
}
