use crate::classifiers::Classifier;
use crate::evaluation::{LearningCurve, Measurement, PerformanceEvaluator, ProgressSnapshot};
use crate::streams::Stream;
use std::io::{Error, ErrorKind};
use std::sync::mpsc::Sender;
use std::time::Instant;

/// Interleaved test-then-train evaluation of one classifier on one stream.
///
/// Each observation is first classified on its non-target features and scored
/// against the attribute it actually carries for the target feature, then fed
/// to the classifier for training. Observations that lack the target feature
/// cannot be scored; they are counted separately and still trained on.
#[derive(Debug)]
pub struct PrequentialEvaluator {
    learner: Box<dyn Classifier>,
    stream: Box<dyn Stream>,
    evaluator: Box<dyn PerformanceEvaluator>,
    target_feature: String,

    curve: LearningCurve,

    max_observations: Option<u64>,
    max_seconds: Option<u64>,
    sample_frequency: u64,

    processed: u64,
    unscored: u64,
    start_time: Instant,

    progress_tx: Option<Sender<ProgressSnapshot>>,
}

impl PrequentialEvaluator {
    pub fn new(
        learner: Box<dyn Classifier>,
        stream: Box<dyn Stream>,
        evaluator: Box<dyn PerformanceEvaluator>,
        target_feature: &str,
        max_observations: Option<u64>,
        max_seconds: Option<u64>,
        sample_frequency: u64,
    ) -> Result<Self, Error> {
        if sample_frequency == 0 {
            return Err(Error::new(
                ErrorKind::InvalidInput,
                "sample_frequency must be > 0",
            ));
        }
        if !stream.feature_names().iter().any(|f| f == target_feature) {
            return Err(Error::new(
                ErrorKind::InvalidInput,
                format!("stream has no feature named '{target_feature}'"),
            ));
        }

        Ok(Self {
            learner,
            stream,
            evaluator,
            target_feature: target_feature.to_string(),
            curve: LearningCurve::default(),
            max_observations,
            max_seconds,
            sample_frequency,
            processed: 0,
            unscored: 0,
            start_time: Instant::now(),
            progress_tx: None,
        })
    }

    pub fn with_progress(mut self, tx: Sender<ProgressSnapshot>) -> Self {
        self.progress_tx = Some(tx);
        self
    }

    pub fn run(&mut self) -> Result<(), Error> {
        self.start_time = Instant::now();

        while self.stream.has_more_observations() {
            if let Some(n) = self.max_observations {
                if self.processed >= n {
                    break;
                }
            }
            if let Some(s) = self.max_seconds {
                if self.start_time.elapsed().as_secs() >= s {
                    break;
                }
            }
            let Some(observation) = self.stream.next_observation() else {
                break;
            };
            self.processed += 1;

            let mut conditioning = observation.clone();
            match conditioning.remove(&self.target_feature) {
                Some(truth) => {
                    let votes = self
                        .learner
                        .votes_for(&self.target_feature, Some(&conditioning));
                    self.evaluator.add_result(&truth, &votes);
                }
                None => self.unscored += 1,
            }

            self.learner.train_on_observation(&observation);

            if self.processed % self.sample_frequency == 0 {
                self.sample();
            }
        }

        if self.processed > 0 && self.processed % self.sample_frequency != 0 {
            self.sample();
        }
        Ok(())
    }

    fn sample(&mut self) {
        let snapshot = ProgressSnapshot {
            observations_seen: self.processed,
            accuracy: self.evaluator.accuracy(),
            kappa: self.metric("kappa"),
            seconds: self.start_time.elapsed().as_secs_f64(),
        };
        self.curve.push(snapshot);
        if let Some(tx) = &self.progress_tx {
            // A dropped receiver only means nobody is watching anymore.
            let _ = tx.send(snapshot);
        }
    }

    fn metric(&self, name: &str) -> f64 {
        self.evaluator
            .performance()
            .into_iter()
            .find(|m| m.name == name)
            .map(|m| m.value)
            .unwrap_or(f64::NAN)
    }

    pub fn curve(&self) -> &LearningCurve {
        &self.curve
    }

    pub fn performance(&self) -> Vec<Measurement> {
        self.evaluator.performance()
    }

    pub fn processed(&self) -> u64 {
        self.processed
    }

    /// Observations that lacked the target feature and were only trained on.
    pub fn unscored(&self) -> u64 {
        self.unscored
    }
}
