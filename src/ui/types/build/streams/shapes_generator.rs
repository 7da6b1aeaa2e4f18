use crate::streams::generators::{ShapesFunction, ShapesGenerator};
use crate::ui::types::build::BuildError;
use crate::ui::types::choices::ShapesParameters;

impl TryFrom<ShapesParameters> for ShapesGenerator {
    type Error = BuildError;

    fn try_from(p: ShapesParameters) -> Result<Self, Self::Error> {
        let function = match p.function_id {
            1 => ShapesFunction::F1,
            2 => ShapesFunction::F2,
            3 => ShapesFunction::F3,
            other => {
                return Err(BuildError::InvalidParameter(format!(
                    "shapes function must be in 1..=3, got {other}"
                )));
            }
        };
        Ok(ShapesGenerator::new(
            function,
            p.balance,
            p.noise_pct,
            p.max_observations.map(|n| n as usize),
            p.seed,
        )?)
    }
}
