use std::env;
use std::fmt::Display;
use std::str::FromStr;

use log::info;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use rust_logreg::{Error, Features, Labels, LogisticRegression, RegressionConfig, Result};

const NUM_CLASSES: usize = 3;
const CENTERS: [[f32; 2]; NUM_CLASSES] = [[-1.0, -1.0], [1.0, -1.0], [0.0, 1.0]];

fn main() -> Result<()> {
    env_logger::init();

    let defaults = RegressionConfig::default();
    let config = RegressionConfig {
        learning_rate: env_or("LEARNING_RATE", 1.0)?,
        iterations: env_or("ITERATIONS", 40)?,
        batch_size: env_or("BATCH_SIZE", 32)?,
        ..defaults
    };
    let per_class: usize = env_or("SAMPLES_PER_CLASS", 200)?;
    let seed: u64 = env_or("SEED", 0)?;

    let (train_x, train_y) = blobs(per_class, seed)?;
    let (test_x, test_y) = blobs(per_class / 4 + 1, seed.wrapping_add(1))?;
    info!(
        "generated {} training and {} test examples",
        train_x.len(),
        test_x.len()
    );

    let mut model = LogisticRegression::new(&train_x, &train_y, config)?;
    let plan = model.batch_plan();
    if plan.dropped_examples > 0 {
        info!(
            "{} examples do not fill a batch and are skipped every epoch",
            plan.dropped_examples
        );
    }

    let report = model.train();
    let accuracy = model.test(&test_x, &test_y)?;
    println!(
        "final_cost={} learning_rate={} accuracy={accuracy}",
        report.final_cost, report.final_learning_rate
    );

    write_cost_history(&model)?;
    Ok(())
}

fn env_or<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: Display,
{
    match env::var(key) {
        Ok(raw) => raw
            .parse()
            .map_err(|e| Error::InvalidConfig(format!("{key}={raw}: {e}"))),
        Err(_) => Ok(default),
    }
}

/// Three uniform blobs in 2D, plus a constant column standing in for an always-blank
/// pixel.
fn blobs(per_class: usize, seed: u64) -> Result<(Features, Labels)> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut xs = Vec::with_capacity(per_class * NUM_CLASSES * 3);
    let mut classes = Vec::with_capacity(per_class * NUM_CLASSES);

    // Interleave classes so every contiguous batch sees all of them.
    for _ in 0..per_class {
        for (class, center) in CENTERS.iter().enumerate() {
            xs.push(center[0] + rng.gen_range(-0.4..0.4));
            xs.push(center[1] + rng.gen_range(-0.4..0.4));
            xs.push(0.0);
            classes.push(class);
        }
    }

    Ok((
        Features::from_flat(xs, 3)?,
        Labels::one_hot(&classes, NUM_CLASSES)?,
    ))
}

#[cfg(feature = "serde")]
fn write_cost_history(model: &LogisticRegression) -> Result<()> {
    let Ok(path) = env::var("COST_HISTORY_PATH") else {
        return Ok(());
    };
    let costs: Vec<f32> = model.cost_history().chronological().collect();
    let json = serde_json::to_string_pretty(&costs)
        .map_err(|e| Error::InvalidData(format!("failed to serialize cost history: {e}")))?;
    std::fs::write(&path, json)
        .map_err(|e| Error::InvalidData(format!("failed to write {path}: {e}")))?;
    info!("cost history written to {path}");
    Ok(())
}

#[cfg(not(feature = "serde"))]
fn write_cost_history(model: &LogisticRegression) -> Result<()> {
    if env::var("COST_HISTORY_PATH").is_ok() {
        log::warn!("COST_HISTORY_PATH is set but the `serde` feature is disabled");
    }
    for (epoch, cost) in model.cost_history().chronological().enumerate() {
        log::debug!("epoch {epoch}: cost {cost}");
    }
    Ok(())
}
