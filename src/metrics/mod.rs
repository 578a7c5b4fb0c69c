//! Evaluation metrics for both études.
//!
//! Classification metrics (accuracy, error rate) back the gradient-ascent
//! study; regression metrics (MSE, RMSE, R², Pearson correlation) back the
//! regression-tree study.

use crate::primitives::Vector;

/// Compute classification accuracy.
///
/// accuracy = `correct_predictions` / `total_predictions`
///
/// # Examples
///
/// ```
/// use estudio::metrics::accuracy;
///
/// let y_true = vec![0, 1, 1, 0];
/// let y_pred = vec![0, 1, 0, 0];
/// let acc = accuracy(&y_pred, &y_true);
/// assert!((acc - 0.75).abs() < 1e-6);
/// ```
///
/// # Panics
///
/// Panics if slices have different lengths or are empty.
#[must_use]
pub fn accuracy(y_pred: &[usize], y_true: &[usize]) -> f32 {
    assert_eq!(y_pred.len(), y_true.len(), "Slices must have same length");
    assert!(!y_true.is_empty(), "Slices cannot be empty");

    let correct = y_pred
        .iter()
        .zip(y_true.iter())
        .filter(|(p, t)| p == t)
        .count();

    correct as f32 / y_true.len() as f32
}

/// Compute classification error rate.
///
/// `error_rate` = 1 - accuracy, the fraction of misclassified samples.
///
/// # Examples
///
/// ```
/// use estudio::metrics::error_rate;
///
/// let y_true = vec![0, 1, 1, 0];
/// let y_pred = vec![0, 1, 0, 0];
/// let err = error_rate(&y_pred, &y_true);
/// assert!((err - 0.25).abs() < 1e-6);
/// ```
///
/// # Panics
///
/// Panics if slices have different lengths or are empty.
#[must_use]
pub fn error_rate(y_pred: &[usize], y_true: &[usize]) -> f32 {
    1.0 - accuracy(y_pred, y_true)
}

/// Computes the Mean Squared Error (MSE).
///
/// MSE = (1/n) * `Σ(y_true` - `y_pred)²`
///
/// # Examples
///
/// ```
/// use estudio::metrics::mse;
/// use estudio::primitives::Vector;
///
/// let y_true = Vector::from_slice(&[3.0, -0.5, 2.0, 7.0]);
/// let y_pred = Vector::from_slice(&[2.5, 0.0, 2.0, 8.0]);
/// let error = mse(&y_pred, &y_true);
/// assert!(error < 1.0);
/// ```
///
/// # Panics
///
/// Panics if vectors have different lengths or are empty.
#[must_use]
pub fn mse(y_pred: &Vector<f32>, y_true: &Vector<f32>) -> f32 {
    assert_eq!(y_pred.len(), y_true.len(), "Vectors must have same length");
    assert!(!y_true.is_empty(), "Vectors cannot be empty");

    let n = y_true.len() as f32;

    let sum_sq_error: f32 = y_true
        .as_slice()
        .iter()
        .zip(y_pred.as_slice().iter())
        .map(|(t, p)| (t - p).powi(2))
        .sum();

    sum_sq_error / n
}

/// Computes the Root Mean Squared Error (RMSE).
///
/// RMSE = sqrt(MSE)
///
/// # Examples
///
/// ```
/// use estudio::metrics::rmse;
/// use estudio::primitives::Vector;
///
/// let y_true = Vector::from_slice(&[3.0, -0.5, 2.0, 7.0]);
/// let y_pred = Vector::from_slice(&[2.5, 0.0, 2.0, 8.0]);
/// let error = rmse(&y_pred, &y_true);
/// assert!(error < 1.0);
/// ```
///
/// # Panics
///
/// Panics if vectors have different lengths or are empty.
#[must_use]
pub fn rmse(y_pred: &Vector<f32>, y_true: &Vector<f32>) -> f32 {
    mse(y_pred, y_true).sqrt()
}

/// Computes the coefficient of determination (R²).
///
/// R² = 1 - (`SS_res` / `SS_tot`)
///
/// where `SS_res` is the residual sum of squares and `SS_tot` is the total
/// sum of squares.
///
/// # Examples
///
/// ```
/// use estudio::metrics::r_squared;
/// use estudio::primitives::Vector;
///
/// let y_true = Vector::from_slice(&[3.0, -0.5, 2.0, 7.0]);
/// let y_pred = Vector::from_slice(&[2.5, 0.0, 2.0, 8.0]);
/// let r2 = r_squared(&y_pred, &y_true);
/// assert!(r2 > 0.9);
/// ```
///
/// # Panics
///
/// Panics if vectors have different lengths.
#[must_use]
pub fn r_squared(y_pred: &Vector<f32>, y_true: &Vector<f32>) -> f32 {
    assert_eq!(y_pred.len(), y_true.len(), "Vectors must have same length");

    let y_mean = y_true.mean();

    let ss_res: f32 = y_true
        .as_slice()
        .iter()
        .zip(y_pred.as_slice().iter())
        .map(|(t, p)| (t - p).powi(2))
        .sum();

    let ss_tot: f32 = y_true.as_slice().iter().map(|t| (t - y_mean).powi(2)).sum();

    if ss_tot == 0.0 {
        return 0.0;
    }

    1.0 - (ss_res / ss_tot)
}

/// Computes the Pearson correlation coefficient between two series.
///
/// r = cov(x, y) / (`σ_x` · `σ_y`)
///
/// Returns 0.0 when either series is constant.
///
/// # Examples
///
/// ```
/// use estudio::metrics::pearson;
/// use estudio::primitives::Vector;
///
/// let y_true = Vector::from_slice(&[1.0, 2.0, 3.0, 4.0]);
/// let y_pred = Vector::from_slice(&[1.1, 2.0, 2.9, 4.2]);
/// let r = pearson(&y_pred, &y_true);
/// assert!(r > 0.99);
/// ```
///
/// # Panics
///
/// Panics if vectors have different lengths or are empty.
#[must_use]
pub fn pearson(y_pred: &Vector<f32>, y_true: &Vector<f32>) -> f32 {
    assert_eq!(y_pred.len(), y_true.len(), "Vectors must have same length");
    assert!(!y_true.is_empty(), "Vectors cannot be empty");

    let mean_p = y_pred.mean();
    let mean_t = y_true.mean();

    let mut cov = 0.0;
    let mut var_p = 0.0;
    let mut var_t = 0.0;
    for (p, t) in y_pred.as_slice().iter().zip(y_true.as_slice().iter()) {
        let dp = p - mean_p;
        let dt = t - mean_t;
        cov += dp * dt;
        var_p += dp * dp;
        var_t += dt * dt;
    }

    let denom = (var_p * var_t).sqrt();
    if denom == 0.0 {
        return 0.0;
    }
    cov / denom
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accuracy_perfect() {
        let y = vec![0, 1, 1, 0, 1];
        assert!((accuracy(&y, &y) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_accuracy_partial() {
        let y_true = vec![0, 1, 1, 0];
        let y_pred = vec![0, 0, 1, 1];
        assert!((accuracy(&y_pred, &y_true) - 0.5).abs() < 1e-6);
    }

    #[test]
    #[should_panic(expected = "same length")]
    fn test_accuracy_length_mismatch() {
        accuracy(&[0, 1], &[0, 1, 1]);
    }

    #[test]
    fn test_error_rate_complements_accuracy() {
        let y_true = vec![0, 1, 1, 0, 1, 0];
        let y_pred = vec![0, 1, 0, 0, 1, 1];
        let acc = accuracy(&y_pred, &y_true);
        let err = error_rate(&y_pred, &y_true);
        assert!((acc + err - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_mse_known_value() {
        let y_true = Vector::from_slice(&[1.0, 2.0, 3.0]);
        let y_pred = Vector::from_slice(&[2.0, 2.0, 4.0]);
        assert!((mse(&y_pred, &y_true) - 2.0 / 3.0).abs() < 1e-6);
    }

    #[test]
    fn test_mse_perfect_prediction() {
        let y = Vector::from_slice(&[1.5, -2.0, 0.0]);
        assert!(mse(&y, &y).abs() < 1e-6);
    }

    #[test]
    fn test_rmse_is_sqrt_of_mse() {
        let y_true = Vector::from_slice(&[0.0, 0.0, 0.0, 0.0]);
        let y_pred = Vector::from_slice(&[2.0, 2.0, 2.0, 2.0]);
        assert!((rmse(&y_pred, &y_true) - 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_r_squared_perfect_fit() {
        let y = Vector::from_slice(&[1.0, 2.0, 3.0, 4.0]);
        assert!((r_squared(&y, &y) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_r_squared_constant_target() {
        let y_true = Vector::from_slice(&[2.0, 2.0, 2.0]);
        let y_pred = Vector::from_slice(&[1.0, 2.0, 3.0]);
        assert!(r_squared(&y_pred, &y_true).abs() < 1e-6);
    }

    #[test]
    fn test_pearson_perfect_positive() {
        let y_true = Vector::from_slice(&[1.0, 2.0, 3.0]);
        let y_pred = Vector::from_slice(&[2.0, 4.0, 6.0]);
        assert!((pearson(&y_pred, &y_true) - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_pearson_perfect_negative() {
        let y_true = Vector::from_slice(&[1.0, 2.0, 3.0]);
        let y_pred = Vector::from_slice(&[3.0, 2.0, 1.0]);
        assert!((pearson(&y_pred, &y_true) + 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_pearson_constant_series() {
        let y_true = Vector::from_slice(&[1.0, 2.0, 3.0]);
        let y_pred = Vector::from_slice(&[5.0, 5.0, 5.0]);
        assert!(pearson(&y_pred, &y_true).abs() < 1e-6);
    }
}
