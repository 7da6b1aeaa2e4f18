use anyhow::Result;

/// Seam between the wizard and the terminal, so flows can be exercised with
/// scripted answers in tests.
pub trait PromptDriver {
    fn ask_bool(&self, title: &str, help: &str, default: bool) -> Result<bool>;

    fn ask_string(&self, title: &str, help: &str, default: &str) -> Result<String>;

    fn ask_u64(
        &self,
        title: &str,
        help: &str,
        default: u64,
        min: Option<u64>,
        max: Option<u64>,
    ) -> Result<u64>;

    /// Presents `items` and returns the index of the chosen one.
    fn select(&self, title: &str, help: Option<&str>, items: &[String]) -> Result<usize>;
}
