//! Estudio: two classic machine-learning études in pure Rust.
//!
//! Étude (a) is binary logistic regression trained by gradient ascent in
//! three flavors (full batch, one-pass stochastic, decaying stochastic),
//! walked through a toy 2-D point cloud and a horse-colic survival table.
//! Étude (b) is a CART regression tree with constant or linear-model
//! leaves, interactive pre-pruning knobs and error-based post-pruning,
//! explored over a noisy sine curve from the terminal.
//!
//! # Quick Start
//!
//! ```
//! use estudio::prelude::*;
//!
//! // Two point clouds on either side of the origin.
//! let x = Matrix::from_vec(4, 2, vec![
//!     -1.0, -1.5,
//!     -0.8, -1.2,
//!     1.1, 0.9,
//!     1.4, 1.3,
//! ]).unwrap();
//! let y = vec![0, 0, 1, 1];
//!
//! let mut model = LogisticRegression::new();
//! model.fit(&x, &y).unwrap();
//!
//! let accuracy = model.score(&x, &y).unwrap();
//! assert!(accuracy >= 0.75);
//! ```
//!
//! # Modules
//!
//! - [`primitives`]: Core Vector and Matrix types
//! - [`dataset`]: Plain-text table loading and synthetic sample generators
//! - [`logistic`]: Logistic regression by gradient ascent
//! - [`tree`]: CART regression trees with pruning and model-tree leaves
//! - [`explore`]: Terminal explorer session over the tree knobs
//! - [`metrics`]: Evaluation metrics
//! - [`error`]: Crate-wide error type

pub mod dataset;
pub mod error;
pub mod explore;
pub mod logistic;
pub mod metrics;
pub mod prelude;
pub mod primitives;
pub mod traits;
pub mod tree;

pub use error::{EstudioError, Result};
pub use primitives::{Matrix, Vector};
pub use traits::{Classifier, Estimator};
