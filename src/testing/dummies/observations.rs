use crate::core::Observation;

/// Two red shapes and one blue circle.
pub fn shapes_observations() -> Vec<Observation> {
    [
        [("color", "red"), ("shape", "circle")],
        [("color", "red"), ("shape", "square")],
        [("color", "blue"), ("shape", "circle")],
    ]
    .into_iter()
    .map(|pairs| pairs.into_iter().collect())
    .collect()
}

/// Same fixture as [`shapes_observations`], in file form.
pub fn shapes_csv() -> &'static str {
    "color,shape\nred,circle\nred,square\nblue,circle\n"
}
