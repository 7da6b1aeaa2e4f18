/// Labeling rule used by the shapes generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapesFunction {
    F1,
    F2,
    F3,
}

impl ShapesFunction {
    pub(crate) fn label(self, color: &str, shape: &str, size: &str) -> &'static str {
        let accepted = match self {
            ShapesFunction::F1 => color == "red" || shape == "circle",
            ShapesFunction::F2 => size == "large" && color != "blue",
            ShapesFunction::F3 => shape == "triangle" || (color == "green" && size == "small"),
        };
        if accepted { "accept" } else { "reject" }
    }
}
