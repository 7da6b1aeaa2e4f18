use crate::ui::types::choices::UIChoice;
use schemars::{JsonSchema, Schema, schema_for};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use strum_macros::{Display, EnumDiscriminants, EnumIter, EnumMessage, EnumString, IntoStaticStr};

fn default_sample_frequency() -> u64 {
    100
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, Default)]
pub struct PrequentialParameters {
    #[schemars(
        title = "Target Feature",
        description = "Feature whose attribute each observation is scored on"
    )]
    pub target_feature: String,

    #[serde(default)]
    #[schemars(
        title = "Max Observations",
        description = "Stop after this many observations; empty = until the stream ends"
    )]
    pub max_observations: Option<u64>,

    #[serde(default)]
    #[schemars(
        title = "Max Seconds",
        description = "Stop after this many seconds; empty = no time limit"
    )]
    pub max_seconds: Option<u64>,

    #[serde(default = "default_sample_frequency")]
    #[schemars(
        title = "Sample Frequency",
        description = "Learning-curve snapshot every N observations",
        range(min = 1),
        default = "default_sample_frequency"
    )]
    pub sample_frequency: u64,
}

/// Empty parameter object so the wizard can still look under "params".
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, Default)]
pub struct NoTaskParams {}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, EnumDiscriminants)]
#[serde(tag = "type", content = "params", rename_all = "kebab-case")]
#[strum_discriminants(name(TaskKind))]
#[strum_discriminants(derive(EnumIter, EnumString, Display, IntoStaticStr, EnumMessage))]
#[strum_discriminants(strum(serialize_all = "kebab-case"))]
pub enum TaskChoice {
    #[strum_discriminants(strum(
        message = "Prequential Evaluation",
        detailed_message = "Test-then-train over the stream, tracking accuracy and kappa."
    ))]
    Prequential(PrequentialParameters),

    #[strum_discriminants(strum(
        message = "Interactive Classification",
        detailed_message = "Train on the whole stream, then classify features on demand."
    ))]
    Classify(NoTaskParams),
}

impl UIChoice for TaskChoice {
    type Kind = TaskKind;

    fn schema() -> Schema {
        schema_for!(TaskChoice)
    }

    fn prompt_label() -> &'static str {
        "Choose a task:"
    }

    fn default_params(kind: Self::Kind) -> Value {
        match kind {
            TaskKind::Prequential => {
                serde_json::to_value(PrequentialParameters::default()).unwrap()
            }
            TaskKind::Classify => serde_json::to_value(NoTaskParams::default()).unwrap(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prequential_defaults_fill_in() {
        let choice = TaskChoice::from_parts(
            TaskKind::Prequential,
            serde_json::json!({ "target_feature": "label" }),
        )
        .unwrap();
        match choice {
            TaskChoice::Prequential(p) => {
                assert_eq!(p.target_feature, "label");
                assert_eq!(p.sample_frequency, 100);
                assert_eq!(p.max_observations, None);
            }
            other => panic!("unexpected choice: {other:?}"),
        }
    }

    #[test]
    fn classify_takes_no_params() {
        let choice = TaskChoice::from_parts(TaskKind::Classify, serde_json::json!({})).unwrap();
        assert!(matches!(choice, TaskChoice::Classify(_)));
    }
}
