//! Convenience re-exports for common usage.
//!
//! # Usage
//!
//! ```
//! use estudio::prelude::*;
//! ```

pub use crate::explore::ExplorerSession;
pub use crate::logistic::{GradientAscent, LogisticRegression};
pub use crate::metrics::{accuracy, error_rate, mse, pearson, r_squared, rmse};
pub use crate::primitives::{Matrix, Vector};
pub use crate::traits::{Classifier, Estimator};
pub use crate::tree::{LeafKind, RegressionTree};
