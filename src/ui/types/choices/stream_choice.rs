use crate::ui::types::choices::UIChoice;
use schemars::{JsonSchema, Schema, schema_for};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::PathBuf;
use strum_macros::{Display, EnumDiscriminants, EnumIter, EnumMessage, EnumString, IntoStaticStr};

const DEFAULT_SEED: u64 = 42;
fn default_seed() -> u64 {
    DEFAULT_SEED
}

fn default_shapes_function() -> u8 {
    1
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, Default)]
pub struct CsvFileParameters {
    #[schemars(
        with = "String",
        title = "CSV Path",
        description = "Path to a delimited file whose first line names the features",
        extend(
            "format" = "path",
            "x-file" = true,
            "x-must-exist" = true,
            "x-extensions" = ["csv"]
        )
    )]
    pub path: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, Default)]
pub struct ShapesParameters {
    #[serde(default = "default_shapes_function")]
    #[schemars(
        title = "Function",
        description = "Labeling rule used for the shapes stream (1-3)",
        range(min = 1, max = 3),
        default = "default_shapes_function"
    )]
    pub function_id: u8,

    #[schemars(title = "Balance", description = "Alternate accepted/rejected labels?")]
    pub balance: bool,

    #[schemars(
        title = "Noise (%)",
        description = "Percentage of labels flipped after applying the rule",
        range(min = 0, max = 100)
    )]
    pub noise_pct: u32,

    #[serde(default)]
    #[schemars(
        title = "Max Observations",
        description = "Upper bound on observations; empty = infinite"
    )]
    pub max_observations: Option<u64>,

    #[serde(default = "default_seed")]
    #[schemars(title = "Seed", description = "PRNG seed", default = "default_seed")]
    pub seed: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, EnumDiscriminants)]
#[serde(tag = "type", content = "params", rename_all = "kebab-case")]
#[strum_discriminants(name(StreamKind))]
#[strum_discriminants(derive(EnumIter, EnumString, Display, IntoStaticStr, EnumMessage))]
#[strum_discriminants(strum(serialize_all = "kebab-case"))]
pub enum StreamChoice {
    #[strum_discriminants(strum(
        message = "CSV File Stream",
        detailed_message = "Observations read from a delimited text file."
    ))]
    CsvFile(CsvFileParameters),

    #[strum_discriminants(strum(
        message = "Shapes Generator",
        detailed_message = "Synthetic colored shapes labeled by one of three rules."
    ))]
    ShapesGenerator(ShapesParameters),
}

impl UIChoice for StreamChoice {
    type Kind = StreamKind;

    fn schema() -> Schema {
        schema_for!(StreamChoice)
    }

    fn prompt_label() -> &'static str {
        "Choose a stream:"
    }

    fn default_params(kind: Self::Kind) -> Value {
        match kind {
            StreamKind::CsvFile => serde_json::to_value(CsvFileParameters::default()).unwrap(),
            StreamKind::ShapesGenerator => {
                serde_json::to_value(ShapesParameters::default()).unwrap()
            }
        }
    }
}
