//! Boundary command: fit the toy 2-D set and chart the decision line.

use crate::error::{CliError, Result};
use crate::output;
use crate::OptimizerKind;
use estudio::dataset::{self, samples};
use estudio::explore::chart::{padded_range, Chart};
use estudio::logistic::{GradientAscent, LogisticRegression};
use estudio::primitives::Matrix;
use std::path::Path;

const CHART_WIDTH: usize = 64;
const CHART_HEIGHT: usize = 20;

/// Run the boundary command
pub(crate) fn run(
    data: Option<&Path>,
    optimizer: OptimizerKind,
    epochs: Option<usize>,
    seed: Option<u64>,
    quiet: bool,
) -> Result<()> {
    let (x, y) = match data {
        Some(path) => {
            super::validate_path(path)?;
            dataset::load_labeled(path)?
        }
        None => samples::toy_classification(100, seed.unwrap_or(super::DATA_SEED)),
    };
    if x.n_cols() != 2 {
        return Err(CliError::InvalidArgument(format!(
            "the boundary chart needs exactly 2 features, got {}",
            x.n_cols()
        )));
    }

    let strategy = match optimizer {
        OptimizerKind::Batch => GradientAscent::Batch {
            learning_rate: 0.001,
            max_cycles: epochs.unwrap_or(500),
        },
        OptimizerKind::Sgd => GradientAscent::Stochastic {
            learning_rate: 0.001,
        },
        OptimizerKind::SgdDecay => GradientAscent::StochasticDecay {
            epochs: epochs.unwrap_or(150),
            seed,
        },
    };
    if optimizer == OptimizerKind::Sgd && epochs.is_some() {
        output::warning("--epochs is ignored for sgd (it makes a single pass)");
    }

    let mut model = LogisticRegression::new().with_optimizer(strategy);
    model.fit(&x, &y)?;

    let accuracy = model.score(&x, &y)?;
    let (slope, intercept) = model.decision_boundary()?;

    output::section("Decision Boundary");
    output::kv("samples", x.n_rows());
    output::kv("optimizer", describe(optimizer));
    output::kv("weights", format_weights(model.weights()?.as_slice()));
    output::kv("boundary", format!("x2 = {slope:.4} * x1 + {intercept:.4}"));
    output::kv("training accuracy", format!("{:.1}%", accuracy * 100.0));

    if !quiet {
        println!("\n{}", scatter_chart(&x, &y, slope, intercept));
        println!("  ● class 1   ○ class 0   + boundary");
    }
    Ok(())
}

fn describe(optimizer: OptimizerKind) -> &'static str {
    match optimizer {
        OptimizerKind::Batch => "batch gradient ascent",
        OptimizerKind::Sgd => "stochastic gradient ascent (one pass)",
        OptimizerKind::SgdDecay => "stochastic gradient ascent with decaying step",
    }
}

fn format_weights(weights: &[f32]) -> String {
    let parts: Vec<String> = weights.iter().map(|w| format!("{w:.4}")).collect();
    format!("[{}]", parts.join(", "))
}

/// Scatter both classes, then lay the fitted line across the x-range.
fn scatter_chart(x: &Matrix<f32>, y: &[usize], slope: f32, intercept: f32) -> String {
    let mut x0 = Vec::new();
    let mut y0 = Vec::new();
    let mut x1 = Vec::new();
    let mut y1 = Vec::new();
    for (i, &label) in y.iter().enumerate() {
        if label == 1 {
            x1.push(x.get(i, 0));
            y1.push(x.get(i, 1));
        } else {
            x0.push(x.get(i, 0));
            y0.push(x.get(i, 1));
        }
    }

    let all_x = x.column(0);
    let all_y = x.column(1);
    let x_range = padded_range(all_x.as_slice());
    let y_range = padded_range(all_y.as_slice());

    // One boundary point per column; the canvas clips whatever falls outside.
    let mut line_x = Vec::with_capacity(CHART_WIDTH);
    let mut line_y = Vec::with_capacity(CHART_WIDTH);
    let span = x_range.1 - x_range.0;
    for col in 0..CHART_WIDTH {
        let t = x_range.0 + span * (col as f32) / ((CHART_WIDTH - 1) as f32);
        line_x.push(t);
        line_y.push(slope * t + intercept);
    }

    let mut chart = Chart::new(CHART_WIDTH, CHART_HEIGHT, x_range, y_range);
    chart.scatter(&x0, &y0, '○');
    chart.scatter(&x1, &y1, '●');
    chart.line(&line_x, &line_y, '+');
    chart.render()
}
