use crate::ui::cli::drivers::PromptDriver;
use anyhow::{Result, bail};
use std::cell::RefCell;
use std::collections::VecDeque;

/// Prompt driver that replays canned answers, one queue per answer type.
#[derive(Default)]
pub struct ScriptedDriver {
    bools: RefCell<VecDeque<bool>>,
    strings: RefCell<VecDeque<String>>,
    numbers: RefCell<VecDeque<u64>>,
    selections: RefCell<VecDeque<usize>>,
}

impl ScriptedDriver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_bool(self, answer: bool) -> Self {
        self.bools.borrow_mut().push_back(answer);
        self
    }

    pub fn with_string<S: Into<String>>(self, answer: S) -> Self {
        self.strings.borrow_mut().push_back(answer.into());
        self
    }

    pub fn with_number(self, answer: u64) -> Self {
        self.numbers.borrow_mut().push_back(answer);
        self
    }

    pub fn with_selection(self, index: usize) -> Self {
        self.selections.borrow_mut().push_back(index);
        self
    }
}

impl PromptDriver for ScriptedDriver {
    fn ask_bool(&self, title: &str, _help: &str, _default: bool) -> Result<bool> {
        match self.bools.borrow_mut().pop_front() {
            Some(answer) => Ok(answer),
            None => bail!("no scripted bool left for '{title}'"),
        }
    }

    fn ask_string(&self, title: &str, _help: &str, _default: &str) -> Result<String> {
        match self.strings.borrow_mut().pop_front() {
            Some(answer) => Ok(answer),
            None => bail!("no scripted string left for '{title}'"),
        }
    }

    fn ask_u64(
        &self,
        title: &str,
        _help: &str,
        _default: u64,
        min: Option<u64>,
        max: Option<u64>,
    ) -> Result<u64> {
        let Some(answer) = self.numbers.borrow_mut().pop_front() else {
            bail!("no scripted number left for '{title}'");
        };
        if min.is_some_and(|lo| answer < lo) || max.is_some_and(|hi| answer > hi) {
            bail!("scripted number {answer} out of range for '{title}'");
        }
        Ok(answer)
    }

    fn select(&self, title: &str, _help: Option<&str>, items: &[String]) -> Result<usize> {
        let Some(index) = self.selections.borrow_mut().pop_front() else {
            bail!("no scripted selection left for '{title}'");
        };
        if index >= items.len() {
            bail!("scripted selection {index} out of bounds for '{title}'");
        }
        Ok(index)
    }
}
