use crate::core::counts::count_store::CountStore;
use chrono::{DateTime, Utc};
use schemars::{JsonSchema, Schema, schema_for};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

type MarginalTable = BTreeMap<String, BTreeMap<String, u64>>;
type JointTable = BTreeMap<String, BTreeMap<String, BTreeMap<String, BTreeMap<String, u64>>>>;

/// Structural problems found while restoring a [`StateSnapshot`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SnapshotError {
    #[error("joint table records feature '{0}' against itself")]
    SelfPair(String),

    #[error(
        "joint entry ({feature}={attribute}) x ({peer}={peer_attribute}) disagrees with its mirrored entry"
    )]
    AsymmetricJoint {
        feature: String,
        attribute: String,
        peer: String,
        peer_attribute: String,
    },

    #[error("joint table references ({feature}={attribute}), unknown to the marginal table")]
    UnknownPair { feature: String, attribute: String },
}

/// Serializable copy of a classifier's frequency tables.
///
/// This is the only externally visible shape of the trained state: callers may
/// persist it however they like (the crate itself never touches storage) and
/// hand it back to resume training. The capture timestamp travels with the
/// tables so persistence layers can tell snapshots apart.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct StateSnapshot {
    pub captured_at: DateTime<Utc>,
    pub marginal: MarginalTable,
    pub joint: JointTable,
}

/// JSON schema for the snapshot blob, for persistence layers that want to
/// validate stored state before handing it back.
pub fn snapshot_schema() -> Schema {
    schema_for!(StateSnapshot)
}

impl StateSnapshot {
    pub(crate) fn capture(store: &CountStore) -> Self {
        Self {
            captured_at: Utc::now(),
            marginal: store.marginal.clone(),
            joint: store.joint.clone(),
        }
    }

    fn knows_pair(&self, feature: &str, attribute: &str) -> bool {
        self.marginal
            .get(feature)
            .is_some_and(|attrs| attrs.contains_key(attribute))
    }

    /// Checks the invariants a well-formed snapshot must satisfy: no feature
    /// paired with itself, every joint entry mirrored with an equal count, and
    /// no joint entry naming a feature/attribute the marginal table does not
    /// know.
    pub fn validate(&self) -> Result<(), SnapshotError> {
        for (feature, attributes) in &self.joint {
            for (attribute, peers) in attributes {
                if !self.knows_pair(feature, attribute) {
                    return Err(SnapshotError::UnknownPair {
                        feature: feature.clone(),
                        attribute: attribute.clone(),
                    });
                }
                for (peer, peer_attributes) in peers {
                    if peer == feature {
                        return Err(SnapshotError::SelfPair(feature.clone()));
                    }
                    for (peer_attribute, count) in peer_attributes {
                        if !self.knows_pair(peer, peer_attribute) {
                            return Err(SnapshotError::UnknownPair {
                                feature: peer.clone(),
                                attribute: peer_attribute.clone(),
                            });
                        }
                        let mirrored = self
                            .joint
                            .get(peer)
                            .and_then(|attrs| attrs.get(peer_attribute))
                            .and_then(|ps| ps.get(feature))
                            .and_then(|counts| counts.get(attribute));
                        if mirrored != Some(count) {
                            return Err(SnapshotError::AsymmetricJoint {
                                feature: feature.clone(),
                                attribute: attribute.clone(),
                                peer: peer.clone(),
                                peer_attribute: peer_attribute.clone(),
                            });
                        }
                    }
                }
            }
        }
        Ok(())
    }

    /// Validates and rebuilds the frequency tables.
    ///
    /// Missing zero entries are tolerated and backfilled with one schema
    /// expansion, so snapshots taken by older writers that skipped the final
    /// backfill still restore; asymmetry, self pairs and unknown attributes
    /// are treated as corruption instead.
    pub(crate) fn into_store(self) -> Result<CountStore, SnapshotError> {
        self.validate()?;
        let mut store = CountStore {
            marginal: self.marginal,
            joint: self.joint,
            expansions: 0,
        };
        store.expand_schema();
        Ok(store)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_store() -> CountStore {
        let mut store = CountStore::new();
        store.bump_marginal("color", "red");
        store.bump_marginal("shape", "circle");
        store.bump_joint("color", "red", "shape", "circle");
        store.bump_joint("shape", "circle", "color", "red");
        store.expand_schema();
        store
    }

    #[test]
    fn capture_then_restore_preserves_counts() {
        let snapshot = StateSnapshot::capture(&sample_store());
        let restored = snapshot.into_store().unwrap();
        assert_eq!(restored.marginal_count("color", "red"), 1);
        assert_eq!(restored.joint_count("color", "red", "shape", "circle"), 1);
        assert_eq!(restored.joint_count("shape", "circle", "color", "red"), 1);
    }

    #[test]
    fn json_round_trip() {
        let snapshot = StateSnapshot::capture(&sample_store());
        let text = serde_json::to_string(&snapshot).unwrap();
        let back: StateSnapshot = serde_json::from_str(&text).unwrap();
        assert_eq!(back.marginal, snapshot.marginal);
        assert_eq!(back.joint, snapshot.joint);
        assert_eq!(back.captured_at, snapshot.captured_at);
    }

    #[test]
    fn restore_backfills_missing_zero_entries() {
        let mut snapshot = StateSnapshot::capture(&sample_store());
        // Simulate an older writer that never backfilled this direction.
        snapshot
            .joint
            .get_mut("shape")
            .unwrap()
            .get_mut("circle")
            .unwrap()
            .get_mut("color")
            .unwrap()
            .remove("red");
        snapshot
            .joint
            .get_mut("color")
            .unwrap()
            .get_mut("red")
            .unwrap()
            .get_mut("shape")
            .unwrap()
            .remove("circle");
        let restored = snapshot.into_store().unwrap();
        assert_eq!(restored.joint_count("color", "red", "shape", "circle"), 0);
        assert_eq!(restored.joint_count("shape", "circle", "color", "red"), 0);
    }

    #[test]
    fn rejects_self_pairs() {
        let mut snapshot = StateSnapshot::capture(&sample_store());
        let own = snapshot.joint["color"]["red"]["shape"].clone();
        snapshot
            .joint
            .get_mut("color")
            .unwrap()
            .get_mut("red")
            .unwrap()
            .insert("color".to_string(), own);
        assert_eq!(
            snapshot.validate(),
            Err(SnapshotError::SelfPair("color".to_string()))
        );
    }

    #[test]
    fn rejects_asymmetric_counts() {
        let mut snapshot = StateSnapshot::capture(&sample_store());
        *snapshot
            .joint
            .get_mut("color")
            .unwrap()
            .get_mut("red")
            .unwrap()
            .get_mut("shape")
            .unwrap()
            .get_mut("circle")
            .unwrap() = 7;
        assert!(matches!(
            snapshot.validate(),
            Err(SnapshotError::AsymmetricJoint { .. })
        ));
    }

    #[test]
    fn rejects_joint_pairs_unknown_to_marginals() {
        let mut snapshot = StateSnapshot::capture(&sample_store());
        snapshot.marginal.get_mut("color").unwrap().remove("red");
        assert_eq!(
            snapshot.validate(),
            Err(SnapshotError::UnknownPair {
                feature: "color".to_string(),
                attribute: "red".to_string(),
            })
        );
    }

    #[test]
    fn schema_document_mentions_tables() {
        let schema = snapshot_schema();
        let text = serde_json::to_string(&schema).unwrap();
        assert!(text.contains("marginal"));
        assert!(text.contains("joint"));
    }
}
