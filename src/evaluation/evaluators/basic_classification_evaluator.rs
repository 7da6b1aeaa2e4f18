use crate::evaluation::estimators::Estimator;
use crate::evaluation::{Measurement, PerformanceEvaluator};
use std::collections::{BTreeMap, HashMap};

/// Basic online classification evaluator.
///
/// Tracks overall accuracy plus the truth/prediction marginals needed for
/// Cohen's kappa. Classes are attribute strings and are registered on first
/// sight, so nothing about the label set has to be known up front; this
/// matches a classifier whose schema grows during the run.
///
/// The prediction taken from a vote map is the highest strictly positive
/// vote, ties resolving to the first attribute in lexicographic order. A vote
/// map with no positive entry is an abstention and scores as incorrect.
#[derive(Debug)]
pub struct BasicClassificationEvaluator<E: Estimator + Default> {
    weight_correct: E,
    class_index: HashMap<String, usize>,
    truth_counts: Vec<u64>,
    predicted_counts: Vec<u64>,
    total: u64,
}

impl<E: Estimator + Default> BasicClassificationEvaluator<E> {
    pub fn new() -> Self {
        Self {
            weight_correct: E::default(),
            class_index: HashMap::new(),
            truth_counts: Vec::new(),
            predicted_counts: Vec::new(),
            total: 0,
        }
    }

    pub fn observations_seen(&self) -> u64 {
        self.total
    }

    fn register(&mut self, class: &str) -> usize {
        if let Some(&index) = self.class_index.get(class) {
            return index;
        }
        let index = self.truth_counts.len();
        self.class_index.insert(class.to_string(), index);
        self.truth_counts.push(0);
        self.predicted_counts.push(0);
        index
    }

    fn predicted<'a>(votes: &'a BTreeMap<String, f64>) -> Option<&'a str> {
        let mut best: Option<(&str, f64)> = None;
        for (attribute, &p) in votes {
            if p > 0.0 && best.is_none_or(|(_, bp)| p > bp) {
                best = Some((attribute, p));
            }
        }
        best.map(|(attribute, _)| attribute)
    }

    /// Chance-corrected agreement between truth and predictions.
    ///
    /// Returns 0 when expected agreement is total (single-class runs), where
    /// kappa has no discriminative meaning.
    pub fn kappa(&self) -> f64 {
        if self.total == 0 {
            return f64::NAN;
        }
        let n = self.total as f64;
        let expected: f64 = self
            .truth_counts
            .iter()
            .zip(&self.predicted_counts)
            .map(|(&t, &p)| (t as f64 / n) * (p as f64 / n))
            .sum();
        let observed = self.accuracy();
        if (1.0 - expected).abs() < f64::EPSILON {
            return 0.0;
        }
        (observed - expected) / (1.0 - expected)
    }
}

impl<E: Estimator + Default> Default for BasicClassificationEvaluator<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Estimator + Default> PerformanceEvaluator for BasicClassificationEvaluator<E> {
    fn reset(&mut self) {
        *self = Self::new();
    }

    fn add_result(&mut self, truth: &str, votes: &BTreeMap<String, f64>) {
        let truth_index = self.register(truth);
        self.total += 1;
        self.truth_counts[truth_index] += 1;

        match Self::predicted(votes) {
            Some(predicted) => {
                let predicted = predicted.to_string();
                let predicted_index = self.register(&predicted);
                self.predicted_counts[predicted_index] += 1;
                self.weight_correct
                    .add(if predicted == truth { 1.0 } else { 0.0 });
            }
            None => self.weight_correct.add(0.0),
        }
    }

    fn accuracy(&self) -> f64 {
        self.weight_correct.estimation()
    }

    fn performance(&self) -> Vec<Measurement> {
        vec![
            Measurement::new("observations", self.total as f64),
            Measurement::new("accuracy", self.accuracy()),
            Measurement::new("kappa", self.kappa()),
        ]
    }
}
