use crate::classifiers::classifier::Classifier;
use crate::core::counts::{CountStore, SnapshotError, StateSnapshot};
use crate::core::observation::Observation;
use std::collections::BTreeMap;

/// Naive Bayes classifier over discrete features.
///
/// The model is nothing more than the frequency tables in a [`CountStore`]:
/// training accumulates marginal and pairwise joint counts, classification
/// turns them into a conditional distribution under the naive independence
/// assumption. Any feature of an observation can later be the classification
/// target; there is no fixed class column and no fixed schema, new features
/// and attribute values are absorbed as they appear.
#[derive(Debug, Clone, Default)]
pub struct NaiveBayes {
    counts: CountStore,
}

impl NaiveBayes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resumes from previously captured state.
    pub fn from_snapshot(snapshot: StateSnapshot) -> Result<Self, SnapshotError> {
        Ok(Self {
            counts: snapshot.into_store()?,
        })
    }

    /// Captures the current state for external persistence.
    pub fn snapshot(&self) -> StateSnapshot {
        StateSnapshot::capture(&self.counts)
    }

    /// Read access to the underlying frequency tables.
    pub fn counts(&self) -> &CountStore {
        &self.counts
    }

    /// Folds one observation into the frequency tables.
    ///
    /// The novelty scan runs before any mutation so the expansion decision
    /// reflects pre-training state; the expensive schema expansion then runs
    /// at most once per call, and only when the observation actually
    /// introduced a feature or attribute value never seen before.
    pub fn train(&mut self, observation: &Observation) {
        let needs_expansion = observation
            .iter()
            .any(|(feature, attribute)| !self.counts.has_pair(feature, attribute));

        for (feature, attribute) in observation.iter() {
            self.counts.bump_marginal(feature, attribute);
        }

        for (feature, attribute) in observation.iter() {
            for (peer, peer_attribute) in observation.iter() {
                if feature == peer {
                    continue;
                }
                self.counts.bump_joint(feature, attribute, peer, peer_attribute);
            }
        }

        if needs_expansion {
            self.counts.expand_schema();
        }
    }

    /// Estimates the distribution over the known attributes of `feature`.
    ///
    /// With no conditioning (or none left after dropping the target feature
    /// itself) this is the maximum-likelihood marginal estimate. Otherwise
    /// each attribute is scored by the product of its per-evidence
    /// conditionals; evidence never observed jointly with `feature`
    /// contributes zero support, which can drive the whole result to zero.
    pub fn classify(
        &self,
        feature: &str,
        conditioning: Option<&Observation>,
    ) -> BTreeMap<String, f64> {
        let Some(attributes) = self.counts.attributes_of(feature) else {
            return BTreeMap::new();
        };

        let evidence: Vec<(&str, &str)> = conditioning
            .into_iter()
            .flat_map(|observation| observation.iter())
            .filter(|(peer, _)| *peer != feature)
            .collect();

        if evidence.is_empty() {
            let total = self.counts.marginal_total(feature) as f64;
            return attributes
                .iter()
                .map(|(attribute, &count)| (attribute.clone(), count as f64 / total))
                .collect();
        }

        let mut scores: BTreeMap<String, f64> = BTreeMap::new();
        for attribute in attributes.keys() {
            let mut score = 1.0;
            for &(peer, peer_attribute) in &evidence {
                let total = self.counts.joint_total(feature, peer, peer_attribute);
                if total == 0 {
                    score = 0.0;
                    break;
                }
                let joint = self.counts.joint_count(feature, attribute, peer, peer_attribute);
                score *= joint as f64 / total as f64;
                if score == 0.0 {
                    break;
                }
            }
            scores.insert(attribute.clone(), score);
        }

        let sum: f64 = scores.values().sum();
        if sum > 0.0 {
            for score in scores.values_mut() {
                *score /= sum;
            }
        }
        scores
    }
}

impl Classifier for NaiveBayes {
    fn votes_for(
        &self,
        feature: &str,
        conditioning: Option<&Observation>,
    ) -> BTreeMap<String, f64> {
        self.classify(feature, conditioning)
    }

    fn train_on_observation(&mut self, observation: &Observation) {
        self.train(observation);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn obs(pairs: &[(&str, &str)]) -> Observation {
        pairs.iter().copied().collect()
    }

    /// Three shapes: two red (circle, square), one blue circle.
    fn shapes_model() -> NaiveBayes {
        let mut model = NaiveBayes::new();
        for observation in crate::testing::dummies::shapes_observations() {
            model.train(&observation);
        }
        model
    }

    #[test]
    fn unknown_feature_yields_empty_distribution() {
        let model = shapes_model();
        assert!(model.classify("texture", None).is_empty());
        assert!(
            model
                .classify("texture", Some(&obs(&[("shape", "circle")])))
                .is_empty()
        );
    }

    #[test]
    fn marginal_distribution_without_conditioning() {
        let model = shapes_model();
        let votes = model.classify("color", None);
        assert!((votes["red"] - 2.0 / 3.0).abs() < EPS);
        assert!((votes["blue"] - 1.0 / 3.0).abs() < EPS);
        assert!((votes.values().sum::<f64>() - 1.0).abs() < EPS);
    }

    #[test]
    fn empty_conditioning_is_the_marginal_path() {
        let model = shapes_model();
        assert_eq!(
            model.classify("color", Some(&Observation::new())),
            model.classify("color", None),
        );
    }

    #[test]
    fn conditioning_on_shared_evidence_splits_support() {
        let model = shapes_model();
        let votes = model.classify("color", Some(&obs(&[("shape", "circle")])));
        assert!((votes["red"] - 0.5).abs() < EPS);
        assert!((votes["blue"] - 0.5).abs() < EPS);
    }

    #[test]
    fn unseen_evidence_zeroes_every_attribute() {
        let model = shapes_model();
        let votes = model.classify("color", Some(&obs(&[("shape", "triangle")])));
        assert_eq!(votes["red"], 0.0);
        assert_eq!(votes["blue"], 0.0);
        assert_eq!(votes.len(), 2);
    }

    #[test]
    fn product_rule_combines_independent_evidence() {
        let mut model = NaiveBayes::new();
        model.train(&obs(&[("color", "red"), ("shape", "circle"), ("size", "small")]));
        model.train(&obs(&[("color", "red"), ("shape", "square"), ("size", "small")]));
        model.train(&obs(&[("color", "blue"), ("shape", "circle"), ("size", "large")]));

        // shape=circle splits 1/2 vs 1/2, size=small is all red: the product
        // leaves blue with no support.
        let votes = model.classify("color", Some(&obs(&[("shape", "circle"), ("size", "small")])));
        assert!((votes["red"] - 1.0).abs() < EPS);
        assert_eq!(votes["blue"], 0.0);
    }

    #[test]
    fn conditioning_on_the_target_feature_alone_falls_back_to_marginals() {
        let model = shapes_model();
        assert_eq!(
            model.classify("color", Some(&obs(&[("color", "red")]))),
            model.classify("color", None),
        );
    }

    #[test]
    fn normalization_holds_under_seen_evidence() {
        let model = shapes_model();
        for evidence in [
            obs(&[("shape", "circle")]),
            obs(&[("shape", "square")]),
            obs(&[("color", "blue"), ("shape", "circle")]),
        ] {
            let votes = model.classify("color", Some(&evidence));
            assert!((votes.values().sum::<f64>() - 1.0).abs() < EPS);
        }
    }

    #[test]
    fn joint_counts_stay_symmetric() {
        let model = shapes_model();
        let counts = model.counts();
        for feature in ["color", "shape"] {
            let attributes: Vec<String> =
                counts.attributes_of(feature).unwrap().keys().cloned().collect();
            for attribute in &attributes {
                for peer in ["color", "shape"] {
                    if peer == feature {
                        continue;
                    }
                    for peer_attribute in counts.attributes_of(peer).unwrap().keys() {
                        assert_eq!(
                            counts.joint_count(feature, attribute, peer, peer_attribute),
                            counts.joint_count(peer, peer_attribute, feature, attribute),
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn every_known_pair_has_a_defined_joint_entry() {
        let mut model = shapes_model();
        // A feature/attribute pair arriving late, sharing no observation with
        // the earlier ones.
        model.train(&obs(&[("size", "small")]));

        let counts = model.counts();
        let features: Vec<String> = counts.features().map(str::to_string).collect();
        for feature in &features {
            for attribute in counts.attributes_of(feature).unwrap().keys() {
                for peer in &features {
                    if peer == feature {
                        continue;
                    }
                    for peer_attribute in counts.attributes_of(peer).unwrap().keys() {
                        assert!(
                            counts
                                .joint_entry(feature, attribute, peer, peer_attribute)
                                .is_some(),
                            "missing joint entry ({feature}={attribute}) x ({peer}={peer_attribute})",
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn schema_expansion_is_lazy() {
        let mut model = NaiveBayes::new();
        let first = obs(&[("color", "red"), ("shape", "circle")]);
        model.train(&first);
        assert_eq!(model.counts().expansions(), 1);

        // Nothing new: no expansion.
        model.train(&first);
        assert_eq!(model.counts().expansions(), 1);

        // A new attribute value: exactly one more expansion.
        model.train(&obs(&[("color", "green"), ("shape", "circle")]));
        assert_eq!(model.counts().expansions(), 2);
    }

    #[test]
    fn training_on_empty_observation_changes_nothing() {
        let mut model = shapes_model();
        let before = model.snapshot();
        model.train(&Observation::new());
        let after = model.snapshot();
        assert_eq!(before.marginal, after.marginal);
        assert_eq!(before.joint, after.joint);
    }

    #[test]
    fn single_feature_observation_records_marginals_only() {
        let mut model = NaiveBayes::new();
        model.train(&obs(&[("color", "red")]));
        assert_eq!(model.counts().marginal_count("color", "red"), 1);
        let votes = model.classify("color", None);
        assert!((votes["red"] - 1.0).abs() < EPS);
    }

    #[test]
    fn snapshot_round_trip_resumes_training() {
        let model = shapes_model();
        let mut resumed = NaiveBayes::from_snapshot(model.snapshot()).unwrap();
        assert_eq!(
            resumed.classify("color", Some(&obs(&[("shape", "circle")]))),
            model.classify("color", Some(&obs(&[("shape", "circle")]))),
        );

        // A third circle observation tips the conditional toward blue.
        resumed.train(&obs(&[("color", "blue"), ("shape", "circle")]));
        let votes = resumed.classify("color", Some(&obs(&[("shape", "circle")])));
        assert!((votes["blue"] - 2.0 / 3.0).abs() < EPS);
        assert!((votes["red"] - 1.0 / 3.0).abs() < EPS);
    }

    #[test]
    fn predict_picks_the_supported_attribute() {
        let model = shapes_model();
        assert_eq!(
            model.predict("color", &obs(&[("shape", "square")])),
            Some("red".to_string()),
        );
        // All-zero support: no prediction.
        assert_eq!(model.predict("color", &obs(&[("shape", "triangle")])), None);
    }
}
