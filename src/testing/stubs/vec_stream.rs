use crate::core::Observation;
use crate::streams::Stream;
use std::io::Error;

/// Stream over a fixed vector of observations.
#[derive(Debug)]
pub struct VecStream {
    feature_names: Vec<String>,
    observations: Vec<Observation>,
    cursor: usize,
}

impl VecStream {
    pub fn new(feature_names: Vec<String>, observations: Vec<Observation>) -> Self {
        Self {
            feature_names,
            observations,
            cursor: 0,
        }
    }
}

impl Stream for VecStream {
    fn feature_names(&self) -> &[String] {
        &self.feature_names
    }

    fn has_more_observations(&self) -> bool {
        self.cursor < self.observations.len()
    }

    fn next_observation(&mut self) -> Option<Observation> {
        let observation = self.observations.get(self.cursor)?;
        self.cursor += 1;
        Some(observation.clone())
    }

    fn restart(&mut self) -> Result<(), Error> {
        self.cursor = 0;
        Ok(())
    }
}
