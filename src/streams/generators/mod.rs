mod shapes;

pub use shapes::{ShapesFunction, ShapesGenerator};
