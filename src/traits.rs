//! Core traits for the two études' models.
//!
//! These traits define the fit/predict/score contracts so walkthrough code
//! can swap models behind one seam.

use crate::metrics;
use crate::primitives::{Matrix, Vector};
use crate::Result;

/// Supervised regression estimator.
///
/// # Examples
///
/// ```
/// use estudio::prelude::*;
///
/// fn train_and_score<E: Estimator>(
///     model: &mut E,
///     x: &Matrix<f32>,
///     y: &Vector<f32>,
/// ) -> f32 {
///     model.fit(x, y).expect("Training data is valid");
///     model.score(x, y).expect("Model is fitted")
/// }
///
/// let x = Matrix::from_vec(8, 1, vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0]).unwrap();
/// let y = Vector::from_slice(&[0.0, 0.0, 0.0, 0.0, 10.0, 10.0, 10.0, 10.0]);
///
/// let mut model = RegressionTree::new().with_min_samples_leaf(2);
/// assert!(train_and_score(&mut model, &x, &y) > 0.99);
/// ```
pub trait Estimator {
    /// Fits the model to training data.
    ///
    /// # Errors
    ///
    /// Returns an error when fitting fails (dimension mismatch, singular
    /// matrix, invalid hyperparameters).
    fn fit(&mut self, x: &Matrix<f32>, y: &Vector<f32>) -> Result<()>;

    /// Predicts target values for input data.
    ///
    /// # Errors
    ///
    /// Returns an error before `fit`.
    fn predict(&self, x: &Matrix<f32>) -> Result<Vector<f32>>;

    /// Computes the R² score against true targets.
    ///
    /// # Errors
    ///
    /// Returns an error before `fit`.
    fn score(&self, x: &Matrix<f32>, y: &Vector<f32>) -> Result<f32>;
}

/// Supervised binary classifier over 0/1 labels.
///
/// # Examples
///
/// ```
/// use estudio::prelude::*;
///
/// fn accuracy_of<C: Classifier>(model: &mut C, x: &Matrix<f32>, y: &[usize]) -> f32 {
///     model.fit(x, y).expect("Training data is valid");
///     model.score(x, y).expect("Model is fitted")
/// }
///
/// let x = Matrix::from_vec(4, 2, vec![
///     -1.0, -1.5,
///     -0.8, -1.2,
///     1.1, 0.9,
///     1.4, 1.3,
/// ]).unwrap();
/// let y = vec![0, 0, 1, 1];
///
/// let mut model = LogisticRegression::new();
/// assert!(accuracy_of(&mut model, &x, &y) >= 0.75);
/// ```
pub trait Classifier {
    /// Fits the model to training data with 0/1 labels.
    ///
    /// # Errors
    ///
    /// Returns an error when fitting fails (dimension mismatch, labels
    /// outside {0, 1}, invalid hyperparameters).
    fn fit(&mut self, x: &Matrix<f32>, y: &[usize]) -> Result<()>;

    /// Predicts a class label for every row.
    ///
    /// # Errors
    ///
    /// Returns an error before `fit`.
    fn predict(&self, x: &Matrix<f32>) -> Result<Vec<usize>>;

    /// Computes classification accuracy against true labels.
    ///
    /// # Errors
    ///
    /// Returns an error before `fit`.
    fn score(&self, x: &Matrix<f32>, y: &[usize]) -> Result<f32> {
        let predictions = self.predict(x)?;
        Ok(metrics::accuracy(&predictions, y))
    }

    /// Fraction of misclassified samples, the complement of `score`.
    ///
    /// # Errors
    ///
    /// Returns an error before `fit`.
    fn error_rate(&self, x: &Matrix<f32>, y: &[usize]) -> Result<f32> {
        Ok(1.0 - self.score(x, y)?)
    }
}
