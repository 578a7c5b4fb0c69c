//! Binary logistic regression trained by gradient ascent.
//!
//! Implements the three textbook optimizers: full-batch ascent on the
//! log-likelihood, a single in-order stochastic pass, and the improved
//! stochastic pass with a decaying step size and random sample order.
//!
//! # Example
//!
//! ```
//! use estudio::logistic::{GradientAscent, LogisticRegression};
//! use estudio::primitives::Matrix;
//!
//! let x = Matrix::from_vec(4, 2, vec![
//!     -1.0, -1.5,
//!     -0.8, -1.2,
//!     1.1, 0.9,
//!     1.4, 1.3,
//! ]).expect("Matrix dimensions match data length");
//! let y = vec![0, 0, 1, 1];
//!
//! let mut model = LogisticRegression::new().with_optimizer(GradientAscent::Batch {
//!     learning_rate: 0.01,
//!     max_cycles: 2000,
//! });
//! model.fit(&x, &y).expect("Training data is valid");
//! let acc = model.score(&x, &y).expect("Model is fitted");
//! assert!(acc >= 0.75);
//! ```

use crate::error::{EstudioError, Result};
use crate::metrics;
use crate::primitives::{Matrix, Vector};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Optimizer strategy for [`LogisticRegression`].
///
/// All three ascend the log-likelihood; they differ in how many samples feed
/// each weight update and how the step size evolves over the run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GradientAscent {
    /// Full-batch ascent: every cycle updates on all samples at once.
    Batch {
        /// Step size α
        learning_rate: f32,
        /// Number of full passes over the data
        max_cycles: usize,
    },
    /// One deterministic pass over the samples in order.
    Stochastic {
        /// Step size α
        learning_rate: f32,
    },
    /// Epochs of without-replacement random passes with a decaying step.
    ///
    /// At epoch j, step i the rate is `4 / (1 + j + i) + 0.001`: early
    /// updates move fast, the constant floor keeps late updates alive.
    StochasticDecay {
        /// Number of epochs
        epochs: usize,
        /// RNG seed; `None` draws fresh entropy
        seed: Option<u64>,
    },
}

impl Default for GradientAscent {
    fn default() -> Self {
        Self::Batch {
            learning_rate: 0.001,
            max_cycles: 500,
        }
    }
}

/// Logistic regression classifier for binary labels.
///
/// Weights start at 1.0 (the textbook initialization) and move by gradient
/// ascent; see [`GradientAscent`] for the optimizer choices. With
/// `fit_intercept` on (the default) the model prepends a constant-1 column,
/// so the first fitted weight is the bias.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogisticRegression {
    /// Fitted weights, bias first when `fit_intercept` is on
    weights: Option<Vector<f32>>,
    /// Optimizer strategy
    optimizer: GradientAscent,
    /// Whether fit prepends a constant-1 feature column
    fit_intercept: bool,
}

impl LogisticRegression {
    /// Creates a classifier with the batch optimizer defaults.
    #[must_use]
    pub fn new() -> Self {
        Self {
            weights: None,
            optimizer: GradientAscent::default(),
            fit_intercept: true,
        }
    }

    /// Sets the optimizer strategy.
    #[must_use]
    pub fn with_optimizer(mut self, optimizer: GradientAscent) -> Self {
        self.optimizer = optimizer;
        self
    }

    /// Sets whether fit prepends a constant-1 feature column.
    #[must_use]
    pub fn with_fit_intercept(mut self, fit_intercept: bool) -> Self {
        self.fit_intercept = fit_intercept;
        self
    }

    /// Fits the model to training data.
    ///
    /// # Arguments
    ///
    /// * `x` - Feature matrix (`n_samples` × `n_features`)
    /// * `y` - Binary labels (`n_samples`), must be 0 or 1
    ///
    /// # Errors
    ///
    /// Returns an error for mismatched sample counts, zero samples, a label
    /// outside {0, 1}, or an invalid optimizer hyperparameter.
    pub fn fit(&mut self, x: &Matrix<f32>, y: &[usize]) -> Result<()> {
        let (n_samples, _) = x.shape();

        if n_samples != y.len() {
            return Err(EstudioError::dimension_mismatch(
                "samples",
                n_samples,
                y.len(),
            ));
        }
        if n_samples == 0 {
            return Err(EstudioError::empty_input("cannot fit with zero samples"));
        }
        for &label in y {
            if label != 0 && label != 1 {
                return Err(format!("labels must be 0 or 1, got {label}").into());
            }
        }
        self.validate_optimizer()?;

        let design = if self.fit_intercept {
            x.with_intercept_column()
        } else {
            x.clone()
        };

        let weights = match self.optimizer {
            GradientAscent::Batch {
                learning_rate,
                max_cycles,
            } => batch_ascent(&design, y, learning_rate, max_cycles),
            GradientAscent::Stochastic { learning_rate } => {
                stochastic_ascent(&design, y, learning_rate)
            }
            GradientAscent::StochasticDecay { epochs, seed } => {
                stochastic_decay_ascent(&design, y, epochs, seed)
            }
        };

        self.weights = Some(weights);
        Ok(())
    }

    /// Predicts the probability of class 1 for each sample.
    ///
    /// # Errors
    ///
    /// Returns `NotFitted` before `fit`, or a dimension error when the
    /// feature count differs from training.
    pub fn predict_proba(&self, x: &Matrix<f32>) -> Result<Vector<f32>> {
        let weights = self
            .weights
            .as_ref()
            .ok_or_else(|| EstudioError::not_fitted("predict_proba"))?;

        let offset = usize::from(self.fit_intercept);
        let n_features = weights.len() - offset;
        if x.n_cols() != n_features {
            return Err(EstudioError::dimension_mismatch(
                "features",
                n_features,
                x.n_cols(),
            ));
        }

        let mut probas = Vec::with_capacity(x.n_rows());
        for i in 0..x.n_rows() {
            let mut z = if self.fit_intercept { weights[0] } else { 0.0 };
            for j in 0..n_features {
                z += weights[j + offset] * x.get(i, j);
            }
            probas.push(sigmoid(z));
        }

        Ok(Vector::from_vec(probas))
    }

    /// Predicts class labels for samples.
    ///
    /// A probability strictly greater than 0.5 classifies as 1; the tie at
    /// exactly 0.5 classifies as 0.
    ///
    /// # Errors
    ///
    /// Same conditions as [`predict_proba`](Self::predict_proba).
    pub fn predict(&self, x: &Matrix<f32>) -> Result<Vec<usize>> {
        let probas = self.predict_proba(x)?;
        Ok(probas.as_slice().iter().map(|&p| classify(p)).collect())
    }

    /// Computes accuracy on test data.
    ///
    /// # Errors
    ///
    /// Same conditions as [`predict`](Self::predict), plus a dimension error
    /// when `y` does not match the sample count.
    pub fn score(&self, x: &Matrix<f32>, y: &[usize]) -> Result<f32> {
        let predictions = self.predict(x)?;
        if predictions.len() != y.len() {
            return Err(EstudioError::dimension_mismatch(
                "samples",
                predictions.len(),
                y.len(),
            ));
        }
        Ok(metrics::accuracy(&predictions, y))
    }

    /// Computes the misclassification rate (1 - accuracy) on test data.
    ///
    /// # Errors
    ///
    /// Same conditions as [`score`](Self::score).
    pub fn error_rate(&self, x: &Matrix<f32>, y: &[usize]) -> Result<f32> {
        let predictions = self.predict(x)?;
        if predictions.len() != y.len() {
            return Err(EstudioError::dimension_mismatch(
                "samples",
                predictions.len(),
                y.len(),
            ));
        }
        Ok(metrics::error_rate(&predictions, y))
    }

    /// Returns the fitted weights, bias first when `fit_intercept` is on.
    ///
    /// # Errors
    ///
    /// Returns `NotFitted` before `fit`.
    pub fn weights(&self) -> Result<&Vector<f32>> {
        self.weights
            .as_ref()
            .ok_or_else(|| EstudioError::not_fitted("weights"))
    }

    /// Returns the 2-D decision boundary as `(slope, intercept)`.
    ///
    /// For three fitted weights `w0 + w1·x + w2·y = 0` rearranges to
    /// `y = -(w0 + w1·x) / w2`, the line drawn over the toy scatter.
    ///
    /// # Errors
    ///
    /// Returns `NotFitted` before `fit`, a dimension error unless exactly
    /// three weights were fitted, and an error when the second feature
    /// weight is zero (vertical boundary).
    pub fn decision_boundary(&self) -> Result<(f32, f32)> {
        let weights = self
            .weights
            .as_ref()
            .ok_or_else(|| EstudioError::not_fitted("decision_boundary"))?;

        if weights.len() != 3 {
            return Err(EstudioError::dimension_mismatch(
                "weights",
                3,
                weights.len(),
            ));
        }
        if weights[2] == 0.0 {
            return Err("decision boundary is vertical: second feature weight is zero".into());
        }

        let slope = -weights[1] / weights[2];
        let intercept = -weights[0] / weights[2];
        Ok((slope, intercept))
    }

    /// Saves the model as JSON.
    ///
    /// # Errors
    ///
    /// Returns an error when serialization or file writing fails.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| EstudioError::Serialization(e.to_string()))?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Loads a model from JSON.
    ///
    /// # Errors
    ///
    /// Returns an error when the file cannot be read or parsed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        serde_json::from_str(&json).map_err(|e| EstudioError::Serialization(e.to_string()))
    }

    fn validate_optimizer(&self) -> Result<()> {
        match self.optimizer {
            GradientAscent::Batch {
                learning_rate,
                max_cycles,
            } => {
                positive("learning_rate", learning_rate)?;
                at_least_one("max_cycles", max_cycles)
            }
            GradientAscent::Stochastic { learning_rate } => positive("learning_rate", learning_rate),
            GradientAscent::StochasticDecay { epochs, .. } => at_least_one("epochs", epochs),
        }
    }
}

impl Default for LogisticRegression {
    fn default() -> Self {
        Self::new()
    }
}

impl crate::traits::Classifier for LogisticRegression {
    fn fit(&mut self, x: &Matrix<f32>, y: &[usize]) -> Result<()> {
        LogisticRegression::fit(self, x, y)
    }

    fn predict(&self, x: &Matrix<f32>) -> Result<Vec<usize>> {
        LogisticRegression::predict(self, x)
    }
}

/// Numerically stable sigmoid: σ(z) = 1 / (1 + e^(-z)).
///
/// The two-branch form never exponentiates a large positive argument, so
/// extreme inputs saturate instead of overflowing.
fn sigmoid(z: f32) -> f32 {
    if z >= 0.0 {
        1.0 / (1.0 + (-z).exp())
    } else {
        let e = z.exp();
        e / (1.0 + e)
    }
}

/// Classification rule: strictly above one half is class 1.
fn classify(proba: f32) -> usize {
    usize::from(proba > 0.5)
}

/// Full-batch gradient ascent: `w += α · Xᵀ(y − σ(Xw))`.
fn batch_ascent(x: &Matrix<f32>, y: &[usize], alpha: f32, max_cycles: usize) -> Vector<f32> {
    let (n_samples, n_features) = x.shape();
    let mut w = vec![1.0_f32; n_features];

    for _ in 0..max_cycles {
        let mut errors = Vec::with_capacity(n_samples);
        for i in 0..n_samples {
            let z = row_dot(x, i, &w);
            errors.push(y[i] as f32 - sigmoid(z));
        }
        for (j, wj) in w.iter_mut().enumerate() {
            let mut grad = 0.0;
            for (i, error) in errors.iter().enumerate() {
                grad += x.get(i, j) * error;
            }
            *wj += alpha * grad;
        }
    }

    Vector::from_vec(w)
}

/// One in-order pass, one sample per update.
fn stochastic_ascent(x: &Matrix<f32>, y: &[usize], alpha: f32) -> Vector<f32> {
    let (n_samples, n_features) = x.shape();
    let mut w = vec![1.0_f32; n_features];

    for i in 0..n_samples {
        let z = row_dot(x, i, &w);
        let error = y[i] as f32 - sigmoid(z);
        for (j, wj) in w.iter_mut().enumerate() {
            *wj += alpha * error * x.get(i, j);
        }
    }

    Vector::from_vec(w)
}

/// Epochs of without-replacement random passes with a decaying step size.
fn stochastic_decay_ascent(
    x: &Matrix<f32>,
    y: &[usize],
    epochs: usize,
    seed: Option<u64>,
) -> Vector<f32> {
    let (n_samples, n_features) = x.shape();
    let mut w = vec![1.0_f32; n_features];
    let mut rng = match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_entropy(),
    };

    for j in 0..epochs {
        let mut pool: Vec<usize> = (0..n_samples).collect();
        for i in 0..n_samples {
            let alpha = 4.0 / (1.0 + j as f32 + i as f32) + 0.001;
            let pick = rng.gen_range(0..pool.len());
            let idx = pool.swap_remove(pick);

            let z = row_dot(x, idx, &w);
            let error = y[idx] as f32 - sigmoid(z);
            for (k, wk) in w.iter_mut().enumerate() {
                *wk += alpha * error * x.get(idx, k);
            }
        }
    }

    Vector::from_vec(w)
}

fn row_dot(x: &Matrix<f32>, row: usize, w: &[f32]) -> f32 {
    let mut z = 0.0;
    for (j, wj) in w.iter().enumerate() {
        z += wj * x.get(row, j);
    }
    z
}

fn positive(param: &str, value: f32) -> Result<()> {
    if value > 0.0 {
        Ok(())
    } else {
        Err(EstudioError::InvalidHyperparameter {
            param: param.to_string(),
            value: value.to_string(),
            constraint: "must be positive".to_string(),
        })
    }
}

fn at_least_one(param: &str, value: usize) -> Result<()> {
    if value > 0 {
        Ok(())
    } else {
        Err(EstudioError::InvalidHyperparameter {
            param: param.to_string(),
            value: value.to_string(),
            constraint: "must be at least 1".to_string(),
        })
    }
}

#[cfg(test)]
mod tests;
