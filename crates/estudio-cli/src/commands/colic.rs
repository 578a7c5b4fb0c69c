//! Colic command: horse-colic mortality with the decaying stochastic optimizer.

use crate::error::{CliError, Result};
use crate::output;
use estudio::dataset::{self, samples};
use estudio::logistic::{GradientAscent, LogisticRegression};
use estudio::primitives::Matrix;
use std::path::Path;

/// Run the colic command
pub(crate) fn run(
    train: Option<&Path>,
    test: Option<&Path>,
    runs: usize,
    epochs: usize,
    seed: Option<u64>,
    quiet: bool,
) -> Result<()> {
    if runs == 0 {
        return Err(CliError::InvalidArgument(
            "--runs must be at least 1".to_string(),
        ));
    }
    let (x_train, y_train, x_test, y_test) = load_pair(train, test, seed)?;

    output::section("Horse Colic Mortality");
    output::kv("train samples", x_train.n_rows());
    output::kv("test samples", x_test.n_rows());
    output::kv("features", x_train.n_cols());
    output::kv("optimizer", format!("decaying stochastic, {epochs} epochs"));

    let mut total = 0.0;
    for run in 0..runs {
        // Each run gets its own stream so the average is over distinct shuffles.
        let run_seed = seed.map(|s| s + run as u64);
        let mut model =
            LogisticRegression::new().with_optimizer(GradientAscent::StochasticDecay {
                epochs,
                seed: run_seed,
            });
        model.fit(&x_train, &y_train)?;
        let rate = model.error_rate(&x_test, &y_test)?;
        total += rate;
        if !quiet {
            output::kv(&format!("run {}", run + 1), format!("error rate {rate:.3}"));
        }
    }

    let average = total / runs as f32;
    output::kv("average error rate", format!("{average:.3}"));
    if average < 0.5 {
        output::success(&format!("{runs} runs averaged below a coin flip"));
    } else {
        output::fail("the average error rate is no better than chance");
    }
    Ok(())
}

fn load_pair(
    train: Option<&Path>,
    test: Option<&Path>,
    seed: Option<u64>,
) -> Result<(Matrix<f32>, Vec<usize>, Matrix<f32>, Vec<usize>)> {
    match (train, test) {
        (Some(train), Some(test)) => {
            super::validate_path(train)?;
            super::validate_path(test)?;
            let (x_train, y_train) = dataset::load_labeled(train)?;
            let (x_test, y_test) = dataset::load_labeled(test)?;
            if x_train.n_cols() != x_test.n_cols() {
                return Err(CliError::InvalidArgument(format!(
                    "train has {} features but test has {}",
                    x_train.n_cols(),
                    x_test.n_cols()
                )));
            }
            Ok((x_train, y_train, x_test, y_test))
        }
        // 299 training and 67 test rows, the sizes of the classic dataset.
        (None, None) => Ok(samples::colic_like(
            299,
            67,
            seed.unwrap_or(super::DATA_SEED),
        )),
        _ => Err(CliError::InvalidArgument(
            "--train and --test must be given together".to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_pair_defaults_to_generated_data() {
        let (x_train, y_train, x_test, y_test) = load_pair(None, None, Some(7)).unwrap();
        assert_eq!(x_train.n_rows(), 299);
        assert_eq!(x_test.n_rows(), 67);
        assert_eq!(y_train.len(), 299);
        assert_eq!(y_test.len(), 67);
        assert_eq!(x_train.n_cols(), samples::N_COLIC_FEATURES);
    }

    #[test]
    fn test_load_pair_requires_both_files() {
        let result = load_pair(Some(Path::new("train.txt")), None, None);
        assert!(matches!(result, Err(CliError::InvalidArgument(_))));
    }

    #[test]
    fn test_load_pair_rejects_feature_mismatch() {
        let mut train = tempfile::NamedTempFile::new().unwrap();
        writeln!(train, "1.0\t2.0\t0").unwrap();
        writeln!(train, "2.0\t1.0\t1").unwrap();
        let mut test = tempfile::NamedTempFile::new().unwrap();
        writeln!(test, "1.0\t0").unwrap();

        let result = load_pair(Some(train.path()), Some(test.path()), None);
        assert!(matches!(result, Err(CliError::InvalidArgument(_))));
    }
}
