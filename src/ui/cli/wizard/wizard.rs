use anyhow::{Context, Result, bail};
use serde_json::{Map, Value};
use strum::{EnumMessage, IntoEnumIterator};

use crate::classifiers::NaiveBayes;
use crate::core::Observation;
use crate::evaluation::{BasicClassificationEvaluator, BasicEstimator};
use crate::streams::Stream;
use crate::tasks::PrequentialEvaluator;
use crate::ui::cli::drivers::PromptDriver;
use crate::ui::types::build::build_stream;
use crate::ui::types::choices::{
    PrequentialParameters, StreamChoice, StreamKind, TaskChoice, TaskKind, UIChoice,
};

const DIM_ITALIC: &str = "\x1b[2m\x1b[3m";
const RESET: &str = "\x1b[0m";

fn kind_items<K>() -> (Vec<K>, Vec<String>)
where
    K: Copy + Into<&'static str> + EnumMessage + IntoEnumIterator,
{
    let kinds: Vec<K> = K::iter().collect();
    let items = kinds
        .iter()
        .map(|&k| {
            let label = k.get_message().unwrap_or_else(|| k.into());
            let desc = k.get_detailed_message().unwrap_or("");
            if desc.is_empty() {
                label.to_string()
            } else {
                format!("{label}  {DIM_ITALIC}{desc}{RESET}")
            }
        })
        .collect();
    (kinds, items)
}

fn choose_kind<C: UIChoice, D: PromptDriver>(driver: &D) -> Result<C::Kind> {
    let (kinds, items) = kind_items::<C::Kind>();
    let index = driver.select(C::prompt_label(), C::prompt_help(), &items)?;
    Ok(kinds[index])
}

fn ask_optional_u64<D: PromptDriver>(driver: &D, title: &str, help: &str) -> Result<Option<u64>> {
    let answer = driver.ask_string(title, &format!("{help}\n(leave blank for none)"), "")?;
    let answer = answer.trim();
    if answer.is_empty() {
        return Ok(None);
    }
    let n: u64 = answer
        .parse()
        .with_context(|| format!("invalid integer for {title}"))?;
    Ok(Some(n))
}

fn prompt_stream<D: PromptDriver>(driver: &D) -> Result<StreamChoice> {
    let kind = choose_kind::<StreamChoice, D>(driver)?;
    let mut params = Map::new();
    match kind {
        StreamKind::CsvFile => {
            let path = driver.ask_string(
                "CSV Path",
                "Path to a delimited file whose first line names the features",
                "",
            )?;
            params.insert("path".into(), Value::from(path.trim()));
        }
        StreamKind::ShapesGenerator => {
            let function = driver.ask_u64(
                "Function",
                "Labeling rule used for the shapes stream (1-3)",
                1,
                Some(1),
                Some(3),
            )?;
            let balance = driver.ask_bool(
                "Balance",
                "Alternate accepted/rejected labels?",
                false,
            )?;
            let noise = driver.ask_u64(
                "Noise (%)",
                "Percentage of labels flipped after applying the rule",
                0,
                Some(0),
                Some(100),
            )?;
            let max = ask_optional_u64(driver, "Max Observations", "Upper bound on observations")?;
            let seed = driver.ask_u64("Seed", "PRNG seed", 42, None, None)?;

            params.insert("function_id".into(), Value::from(function));
            params.insert("balance".into(), Value::Bool(balance));
            params.insert("noise_pct".into(), Value::from(noise));
            if let Some(max) = max {
                params.insert("max_observations".into(), Value::from(max));
            }
            params.insert("seed".into(), Value::from(seed));
        }
    }
    StreamChoice::from_parts(kind, Value::Object(params))
}

fn prompt_task<D: PromptDriver>(driver: &D) -> Result<TaskChoice> {
    let kind = choose_kind::<TaskChoice, D>(driver)?;
    let mut params = Map::new();
    if let TaskKind::Prequential = kind {
        let target = driver.ask_string(
            "Target Feature",
            "Feature whose attribute each observation is scored on",
            "",
        )?;
        let max_observations =
            ask_optional_u64(driver, "Max Observations", "Stop after this many observations")?;
        let max_seconds = ask_optional_u64(driver, "Max Seconds", "Stop after this many seconds")?;
        let sample_frequency = driver.ask_u64(
            "Sample Frequency",
            "Learning-curve snapshot every N observations",
            100,
            Some(1),
            None,
        )?;

        params.insert("target_feature".into(), Value::from(target.trim()));
        if let Some(n) = max_observations {
            params.insert("max_observations".into(), Value::from(n));
        }
        if let Some(s) = max_seconds {
            params.insert("max_seconds".into(), Value::from(s));
        }
        params.insert("sample_frequency".into(), Value::from(sample_frequency));
    }
    TaskChoice::from_parts(kind, Value::Object(params))
}

/// Walks the user through stream and task selection, then runs the task.
pub fn run<D: PromptDriver>(driver: &D) -> Result<()> {
    let stream_choice = prompt_stream(driver)?;
    let stream = build_stream(stream_choice).context("failed to build the stream")?;

    match prompt_task(driver)? {
        TaskChoice::Prequential(p) => run_prequential(stream, p),
        TaskChoice::Classify(_) => run_classify(driver, stream),
    }
}

fn run_prequential(stream: Box<dyn Stream>, params: PrequentialParameters) -> Result<()> {
    let evaluator = Box::new(BasicClassificationEvaluator::<BasicEstimator>::new());
    let mut task = PrequentialEvaluator::new(
        Box::new(NaiveBayes::new()),
        stream,
        evaluator,
        &params.target_feature,
        params.max_observations,
        params.max_seconds,
        params.sample_frequency,
    )
    .context("failed to configure the prequential run")?;

    task.run()?;

    println!("processed {} observations ({} unscored)", task.processed(), task.unscored());
    for measurement in task.performance() {
        println!("{measurement}");
    }
    Ok(())
}

fn run_classify<D: PromptDriver>(driver: &D, mut stream: Box<dyn Stream>) -> Result<()> {
    let mut model = NaiveBayes::new();
    let mut trained = 0u64;
    while let Some(observation) = stream.next_observation() {
        model.train(&observation);
        trained += 1;
    }
    println!("trained on {trained} observations");

    loop {
        let feature = driver.ask_string("Feature to classify", "empty to finish", "")?;
        let feature = feature.trim().to_string();
        if feature.is_empty() {
            return Ok(());
        }
        let raw = driver.ask_string(
            "Conditioning",
            "feature=value pairs separated by commas; empty for marginals",
            "",
        )?;
        let conditioning = match parse_conditioning(&raw) {
            Ok(conditioning) => conditioning,
            Err(e) => {
                println!("{e}");
                continue;
            }
        };

        let votes = model.classify(&feature, conditioning.as_ref());
        if votes.is_empty() {
            println!("unknown feature '{feature}'");
            continue;
        }
        for (attribute, p) in &votes {
            println!("  {attribute}: {p:.4}");
        }
    }
}

fn parse_conditioning(raw: &str) -> Result<Option<Observation>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    let mut observation = Observation::new();
    for pair in raw.split(',') {
        let Some((feature, attribute)) = pair.split_once('=') else {
            bail!("expected feature=value, got '{}'", pair.trim());
        };
        let (feature, attribute) = (feature.trim(), attribute.trim());
        if feature.is_empty() || attribute.is_empty() {
            bail!("empty feature or value in '{}'", pair.trim());
        }
        observation.insert(feature, attribute);
    }
    Ok(Some(observation))
}
