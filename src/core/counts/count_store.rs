use std::collections::BTreeMap;

/// Attribute value -> number of observations that carried it.
pub type AttributeCounts = BTreeMap<String, u64>;

/// Peer feature -> peer attribute -> co-occurrence count.
pub type PeerCounts = BTreeMap<String, AttributeCounts>;

/// Frequency tables backing the classifier.
///
/// Holds the marginal counts (feature -> attribute -> count) and the pairwise
/// joint counts (feature -> attribute -> peer feature -> peer attribute ->
/// count) accumulated over all training observations. The joint table is kept
/// symmetric, never records a feature against itself, and is complete between
/// mutations: every known `(feature, attribute)` has a defined entry, possibly
/// zero, against every attribute of every other known feature. Completeness is
/// restored by [`expand_schema`](CountStore::expand_schema) whenever training
/// introduces a new feature or attribute.
///
/// Counts only ever grow; there is no decrement or removal operation.
#[derive(Debug, Clone, Default)]
pub struct CountStore {
    pub(super) marginal: BTreeMap<String, AttributeCounts>,
    pub(super) joint: BTreeMap<String, BTreeMap<String, PeerCounts>>,
    pub(super) expansions: u64,
}

impl CountStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.marginal.is_empty()
    }

    /// Known feature names, in order.
    pub fn features(&self) -> impl Iterator<Item = &str> {
        self.marginal.keys().map(String::as_str)
    }

    /// Marginal counts for every known attribute of `feature`, or `None` if
    /// the feature was never trained.
    pub fn attributes_of(&self, feature: &str) -> Option<&AttributeCounts> {
        self.marginal.get(feature)
    }

    /// Whether `(feature, attribute)` has been seen by any training call.
    pub fn has_pair(&self, feature: &str, attribute: &str) -> bool {
        self.marginal
            .get(feature)
            .is_some_and(|attrs| attrs.contains_key(attribute))
    }

    pub fn marginal_count(&self, feature: &str, attribute: &str) -> u64 {
        self.marginal
            .get(feature)
            .and_then(|attrs| attrs.get(attribute))
            .copied()
            .unwrap_or(0)
    }

    /// Total number of observations that assigned any attribute to `feature`.
    pub fn marginal_total(&self, feature: &str) -> u64 {
        self.marginal
            .get(feature)
            .map(|attrs| attrs.values().sum())
            .unwrap_or(0)
    }

    /// Creates the `(feature, attribute)` marginal slot if absent, then
    /// increments it.
    pub fn bump_marginal(&mut self, feature: &str, attribute: &str) {
        let slot = self
            .marginal
            .entry(feature.to_string())
            .or_default()
            .entry(attribute.to_string())
            .or_insert(0);
        *slot += 1;
    }

    /// Creates the directed joint slot if absent, then increments it.
    ///
    /// Only the `(feature, attribute) -> (peer, peer_attribute)` direction is
    /// touched; symmetry comes from the trainer issuing the mirrored call for
    /// every ordered pair. Self pairs are never recorded.
    pub fn bump_joint(&mut self, feature: &str, attribute: &str, peer: &str, peer_attribute: &str) {
        if feature == peer {
            return;
        }
        let slot = self
            .joint
            .entry(feature.to_string())
            .or_default()
            .entry(attribute.to_string())
            .or_default()
            .entry(peer.to_string())
            .or_default()
            .entry(peer_attribute.to_string())
            .or_insert(0);
        *slot += 1;
    }

    /// The joint slot for `(feature, attribute)` against
    /// `(peer, peer_attribute)`, if every level of the nested table exists.
    ///
    /// `Some(0)` (a backfilled zero) and `None` (never part of the schema)
    /// are different answers; inference treats both as zero support.
    pub fn joint_entry(
        &self,
        feature: &str,
        attribute: &str,
        peer: &str,
        peer_attribute: &str,
    ) -> Option<u64> {
        self.joint
            .get(feature)
            .and_then(|attrs| attrs.get(attribute))
            .and_then(|peers| peers.get(peer))
            .and_then(|counts| counts.get(peer_attribute))
            .copied()
    }

    /// Joint count for `(feature, attribute)` against `(peer, peer_attribute)`,
    /// reading missing entries at any level as 0.
    pub fn joint_count(
        &self,
        feature: &str,
        attribute: &str,
        peer: &str,
        peer_attribute: &str,
    ) -> u64 {
        self.joint_entry(feature, attribute, peer, peer_attribute)
            .unwrap_or(0)
    }

    /// Sum of joint counts over all attributes of `feature` against the fixed
    /// `(peer, peer_attribute)` evidence.
    pub fn joint_total(&self, feature: &str, peer: &str, peer_attribute: &str) -> u64 {
        match self.marginal.get(feature) {
            Some(attrs) => attrs
                .keys()
                .map(|attribute| self.joint_count(feature, attribute, peer, peer_attribute))
                .sum(),
            None => 0,
        }
    }

    /// Backfills zero-valued joint entries so that every known
    /// `(feature, attribute)` pair has a defined count against every attribute
    /// of every other known feature, in both directions.
    ///
    /// Quadratic in the number of known feature/attribute pairs; the trainer
    /// calls this only when an observation actually introduced a new pair.
    pub fn expand_schema(&mut self) {
        let schema: Vec<(String, Vec<String>)> = self
            .marginal
            .iter()
            .map(|(feature, attrs)| (feature.clone(), attrs.keys().cloned().collect()))
            .collect();

        for (feature, attributes) in &schema {
            for (peer, peer_attributes) in &schema {
                if feature == peer {
                    continue;
                }
                for attribute in attributes {
                    let counts = self
                        .joint
                        .entry(feature.clone())
                        .or_default()
                        .entry(attribute.clone())
                        .or_default()
                        .entry(peer.clone())
                        .or_default();
                    for peer_attribute in peer_attributes {
                        counts.entry(peer_attribute.clone()).or_insert(0);
                    }
                }
            }
        }
        self.expansions += 1;
    }

    /// Number of times [`expand_schema`](CountStore::expand_schema) has run on
    /// this store.
    pub fn expansions(&self) -> u64 {
        self.expansions
    }
}
