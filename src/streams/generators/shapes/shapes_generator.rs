use crate::core::Observation;
use crate::streams::generators::shapes::ShapesFunction;
use crate::streams::stream::Stream;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::io::{Error, ErrorKind};

const COLOR: [&str; 3] = ["red", "green", "blue"];
const SHAPE: [&str; 3] = ["circle", "square", "triangle"];
const SIZE: [&str; 2] = ["small", "large"];

/// Synthetic categorical stream.
///
/// Draws `color`, `shape` and `size` uniformly, derives a `label` feature
/// from the chosen [`ShapesFunction`], and optionally flips the label with a
/// configurable noise percentage. With `balance_labels`, accepted and
/// rejected observations strictly alternate. Deterministic under a fixed
/// seed.
#[derive(Debug)]
pub struct ShapesGenerator {
    seed: u64,
    rng: StdRng,
    function: ShapesFunction,
    balance_labels: bool,
    next_should_accept: bool,
    noise_percentage: u32,
    feature_names: Vec<String>,
    max_observations: Option<usize>,
    produced: usize,
}

impl ShapesGenerator {
    pub fn new(
        function: ShapesFunction,
        balance_labels: bool,
        noise_percentage: u32,
        max_observations: Option<usize>,
        seed: u64,
    ) -> Result<Self, Error> {
        if noise_percentage > 100 {
            return Err(Error::new(
                ErrorKind::InvalidInput,
                "Noise percentage must be in [0, 100]",
            ));
        }

        Ok(Self {
            seed,
            rng: StdRng::seed_from_u64(seed),
            function,
            balance_labels,
            next_should_accept: false,
            noise_percentage,
            feature_names: ["color", "shape", "size", "label"]
                .map(str::to_string)
                .to_vec(),
            max_observations,
            produced: 0,
        })
    }

    fn draw(&mut self) -> (&'static str, &'static str, &'static str, &'static str) {
        let color = COLOR[self.rng.random_range(0..COLOR.len())];
        let shape = SHAPE[self.rng.random_range(0..SHAPE.len())];
        let size = SIZE[self.rng.random_range(0..SIZE.len())];
        let mut label = self.function.label(color, shape, size);
        if self.noise_percentage > 0 && self.rng.random_range(0..100) < self.noise_percentage {
            label = if label == "accept" { "reject" } else { "accept" };
        }
        (color, shape, size, label)
    }
}

impl Stream for ShapesGenerator {
    fn feature_names(&self) -> &[String] {
        &self.feature_names
    }

    fn has_more_observations(&self) -> bool {
        match self.max_observations {
            Some(max) => self.produced < max,
            None => true,
        }
    }

    fn next_observation(&mut self) -> Option<Observation> {
        if !self.has_more_observations() {
            return None;
        }

        let (color, shape, size, label) = loop {
            let candidate = self.draw();
            if !self.balance_labels || (candidate.3 == "accept") == self.next_should_accept {
                break candidate;
            }
        };
        self.next_should_accept = !self.next_should_accept;
        self.produced += 1;

        let mut observation = Observation::new();
        observation.insert("color", color);
        observation.insert("shape", shape);
        observation.insert("size", size);
        observation.insert("label", label);
        Some(observation)
    }

    fn restart(&mut self) -> Result<(), Error> {
        self.rng = StdRng::seed_from_u64(self.seed);
        self.next_should_accept = false;
        self.produced = 0;
        Ok(())
    }
}
