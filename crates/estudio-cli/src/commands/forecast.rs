//! Forecast command: constant leaves vs model tree vs one straight line.

use crate::error::{CliError, Result};
use crate::output;
use estudio::dataset::{self, samples};
use estudio::metrics::pearson;
use estudio::primitives::{Matrix, Vector};
use estudio::tree::{least_squares, LeafKind, RegressionTree};
use std::path::Path;

/// Pruning knobs shared by both trees in the comparison.
const MIN_GAIN: f32 = 1.0;
const MIN_SAMPLES_LEAF: usize = 20;

/// Run the forecast command
pub(crate) fn run(train: Option<&Path>, test: Option<&Path>, seed: Option<u64>) -> Result<()> {
    let (x_train, y_train, x_test, y_test) = load_pair(train, test, seed)?;

    output::section("Forecast Comparison");
    output::kv("train samples", x_train.n_rows());
    output::kv("test samples", x_test.n_rows());
    output::kv(
        "pruning",
        format!("min gain {MIN_GAIN}, min samples per leaf {MIN_SAMPLES_LEAF}"),
    );

    let mut constant_tree = RegressionTree::new()
        .with_min_gain(MIN_GAIN)
        .with_min_samples_leaf(MIN_SAMPLES_LEAF);
    constant_tree.fit(&x_train, &y_train)?;
    let constant_r = pearson(&constant_tree.predict(&x_test)?, &y_test);

    let mut model_tree = RegressionTree::new()
        .with_min_gain(MIN_GAIN)
        .with_min_samples_leaf(MIN_SAMPLES_LEAF)
        .with_leaf_model(LeafKind::Linear);
    model_tree.fit(&x_train, &y_train)?;
    let model_r = pearson(&model_tree.predict(&x_test)?, &y_test);

    let weights = least_squares(&x_train, &y_train)?;
    let line_predictions = x_test.with_intercept_column().matvec(&weights)?;
    let line_r = pearson(&line_predictions, &y_test);

    output::kv("constant-leaf tree", format!("R = {constant_r:.4}"));
    output::kv("model tree", format!("R = {model_r:.4}"));
    output::kv("straight line", format!("R = {line_r:.4}"));

    let (best_name, best_r) = best_of(&[
        ("constant-leaf tree", constant_r),
        ("model tree", model_r),
        ("straight line", line_r),
    ]);
    output::success(&format!("best fit: {best_name} (R = {best_r:.4})"));
    Ok(())
}

/// Highest correlation wins; NaN entries (a degenerate forecast) never do.
fn best_of(candidates: &[(&'static str, f32)]) -> (&'static str, f32) {
    let mut best = candidates[0];
    for &candidate in &candidates[1..] {
        if best.1.is_nan() || candidate.1 > best.1 {
            best = candidate;
        }
    }
    best
}

fn load_pair(
    train: Option<&Path>,
    test: Option<&Path>,
    seed: Option<u64>,
) -> Result<(Matrix<f32>, Vector<f32>, Matrix<f32>, Vector<f32>)> {
    match (train, test) {
        (Some(train), Some(test)) => {
            super::validate_path(train)?;
            super::validate_path(test)?;
            let (x_train, y_train) = dataset::load_xy(train)?;
            let (x_test, y_test) = dataset::load_xy(test)?;
            if x_train.n_cols() != x_test.n_cols() {
                return Err(CliError::InvalidArgument(format!(
                    "train has {} features but test has {}",
                    x_train.n_cols(),
                    x_test.n_cols()
                )));
            }
            Ok((x_train, y_train, x_test, y_test))
        }
        (None, None) => {
            let s = seed.unwrap_or(super::DATA_SEED);
            let (train_x, train_y) = samples::noisy_sine(150, s);
            let (test_x, test_y) = samples::noisy_sine(50, s + 1);
            Ok((column(&train_x)?, train_y, column(&test_x)?, test_y))
        }
        _ => Err(CliError::InvalidArgument(
            "--train and --test must be given together".to_string(),
        )),
    }
}

fn column(xs: &Vector<f32>) -> Result<Matrix<f32>> {
    Ok(Matrix::from_vec(xs.len(), 1, xs.as_slice().to_vec())?)
}
