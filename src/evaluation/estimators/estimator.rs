/// Online scalar estimator fed one value at a time.
pub trait Estimator: std::fmt::Debug {
    /// Incorporates a new observation.
    fn add(&mut self, v: f64);

    /// Current estimate; `NaN` before the first observation.
    fn estimation(&self) -> f64;
}
