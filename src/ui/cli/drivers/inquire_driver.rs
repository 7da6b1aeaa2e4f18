use crate::ui::cli::drivers::PromptDriver;
use anyhow::Result;
use inquire::{Confirm, CustomType, Select, Text, validator::Validation};

pub struct InquireDriver;

impl PromptDriver for InquireDriver {
    fn ask_bool(&self, title: &str, help: &str, default: bool) -> Result<bool> {
        Ok(Confirm::new(title)
            .with_default(default)
            .with_help_message(help)
            .prompt()?)
    }

    fn ask_string(&self, title: &str, help: &str, default: &str) -> Result<String> {
        Ok(Text::new(title)
            .with_initial_value(default)
            .with_help_message(help)
            .prompt()?)
    }

    fn ask_u64(
        &self,
        title: &str,
        help: &str,
        default: u64,
        min: Option<u64>,
        max: Option<u64>,
    ) -> Result<u64> {
        let mut q = CustomType::<u64>::new(title)
            .with_default(default)
            .with_help_message(help);

        if min.is_some() || max.is_some() {
            let lo = min.unwrap_or(u64::MIN);
            let hi = max.unwrap_or(u64::MAX);
            q = q.with_validator(move |x: &u64| {
                if (lo..=hi).contains(x) {
                    Ok(Validation::Valid)
                } else {
                    Ok(Validation::Invalid(
                        format!("Must be between {lo} and {hi}").into(),
                    ))
                }
            });
        }

        Ok(q.prompt()?)
    }

    fn select(&self, title: &str, help: Option<&str>, items: &[String]) -> Result<usize> {
        let mut q = Select::new(title, items.to_vec());
        if let Some(help) = help {
            q = q.with_help_message(help);
        }
        Ok(q.raw_prompt()?.index)
    }
}
