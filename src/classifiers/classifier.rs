use crate::core::Observation;
use std::collections::BTreeMap;

/// Incremental classifier over discrete, string-valued features.
pub trait Classifier: std::fmt::Debug {
    /// Probability distribution over the known attribute values of `feature`,
    /// optionally conditioned on other features of `conditioning`.
    ///
    /// An unknown feature yields an empty map. Values are in `[0, 1]` and sum
    /// to 1, except when no attribute has any support under the supplied
    /// conditioning, in which case every value is 0.
    fn votes_for(&self, feature: &str, conditioning: Option<&Observation>)
    -> BTreeMap<String, f64>;

    /// Folds one observation into the model.
    fn train_on_observation(&mut self, observation: &Observation);

    /// Most probable attribute of `feature` given `conditioning`, or `None`
    /// when nothing has any support. Ties resolve to the first attribute in
    /// lexicographic order.
    fn predict(&self, feature: &str, conditioning: &Observation) -> Option<String> {
        let votes = self.votes_for(feature, Some(conditioning));
        let mut best: Option<(&String, f64)> = None;
        for (attribute, &p) in &votes {
            if p > 0.0 && best.is_none_or(|(_, bp)| p > bp) {
                best = Some((attribute, p));
            }
        }
        best.map(|(attribute, _)| attribute.clone())
    }
}
