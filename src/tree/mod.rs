//! CART regression trees with the pruning controls the explorer exposes.
//!
//! Trees are grown by scanning every feature and every distinct value it
//! takes, keeping the split that most reduces the leaf-model error. Growth
//! stops when the best reduction falls below `min_gain` or a side would
//! hold fewer than `min_samples_leaf` samples. Two leaf models are
//! available: constant leaves predicting the target mean, and linear leaves
//! holding a least-squares fit (the model tree). Overfit constant-leaf
//! trees can be post-pruned against held-out data.
//!
//! # Example
//!
//! ```
//! use estudio::primitives::{Matrix, Vector};
//! use estudio::tree::RegressionTree;
//!
//! let x = Matrix::from_vec(8, 1, vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0])
//!     .expect("Matrix dimensions match data length");
//! let y = Vector::from_slice(&[0.0, 0.1, -0.1, 0.0, 10.0, 10.1, 9.9, 10.0]);
//!
//! let mut tree = RegressionTree::new().with_min_samples_leaf(2);
//! tree.fit(&x, &y).expect("Training data is valid");
//!
//! assert_eq!(tree.n_leaves(), 2);
//! let hat = tree.predict_one(&[6.5]).expect("Model is fitted");
//! assert!((hat - 10.0).abs() < 0.5);
//! ```

use crate::error::{EstudioError, Result};
use crate::metrics;
use crate::primitives::{Matrix, Vector};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Which leaf model `fit` produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LeafKind {
    /// Constant leaves predicting the mean target of their samples
    Constant,
    /// Linear leaves holding a least-squares fit (the model tree)
    Linear,
}

/// Fitted payload of a leaf.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum LeafModel {
    /// Mean of the targets that reached the leaf
    Constant(f32),
    /// Least-squares weights over the intercept-augmented features
    Linear(Vector<f32>),
}

/// Internal node: a binary split on one feature.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SplitNode {
    /// Index of the feature to split on
    pub feature_idx: usize,
    /// Split value; samples strictly above it go left
    pub threshold: f32,
    /// Subtree for samples with feature value greater than the threshold
    pub left: Box<TreeNode>,
    /// Subtree for samples with feature value at or below the threshold
    pub right: Box<TreeNode>,
}

/// Terminal node holding a fitted leaf model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeafNode {
    /// Leaf model fitted on the training samples that reached this leaf
    pub model: LeafModel,
    /// Number of training samples that reached this leaf
    pub n_samples: usize,
}

/// A node in a regression tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TreeNode {
    /// Internal split node
    Split(SplitNode),
    /// Terminal leaf node
    Leaf(LeafNode),
}

impl TreeNode {
    /// Returns the depth of the subtree rooted at this node.
    ///
    /// A leaf has depth 0.
    pub fn depth(&self) -> usize {
        match self {
            TreeNode::Leaf(_) => 0,
            TreeNode::Split(split) => 1 + split.left.depth().max(split.right.depth()),
        }
    }

    /// Returns the number of leaves in the subtree rooted at this node.
    pub fn n_leaves(&self) -> usize {
        match self {
            TreeNode::Leaf(_) => 1,
            TreeNode::Split(split) => split.left.n_leaves() + split.right.n_leaves(),
        }
    }
}

/// CART regression tree.
///
/// `min_gain` is the smallest error reduction worth splitting for, and
/// `min_samples_leaf` the smallest side a split may produce. Together they
/// are the pre-pruning knobs the explorer lets you vary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegressionTree {
    root: Option<TreeNode>,
    min_gain: f32,
    min_samples_leaf: usize,
    leaf_kind: LeafKind,
}

impl RegressionTree {
    /// Creates an unfitted tree with constant leaves, `min_gain` 1.0 and
    /// `min_samples_leaf` 4.
    pub fn new() -> Self {
        Self {
            root: None,
            min_gain: 1.0,
            min_samples_leaf: 4,
            leaf_kind: LeafKind::Constant,
        }
    }

    /// Sets the smallest total-error reduction a split must achieve.
    #[must_use]
    pub fn with_min_gain(mut self, min_gain: f32) -> Self {
        self.min_gain = min_gain;
        self
    }

    /// Sets the smallest number of samples a split may leave on a side.
    #[must_use]
    pub fn with_min_samples_leaf(mut self, min_samples_leaf: usize) -> Self {
        self.min_samples_leaf = min_samples_leaf;
        self
    }

    /// Chooses between constant leaves and linear-model leaves.
    #[must_use]
    pub fn with_leaf_model(mut self, kind: LeafKind) -> Self {
        self.leaf_kind = kind;
        self
    }

    /// Returns the configured minimum split gain.
    pub fn min_gain(&self) -> f32 {
        self.min_gain
    }

    /// Returns the configured minimum samples per leaf.
    pub fn min_samples_leaf(&self) -> usize {
        self.min_samples_leaf
    }

    /// Returns the configured leaf kind.
    pub fn leaf_kind(&self) -> LeafKind {
        self.leaf_kind
    }

    /// Grows the tree on the training data.
    ///
    /// # Errors
    ///
    /// Mismatched sample counts, empty data or a `min_samples_leaf` of
    /// zero are rejected. With linear leaves, an underdetermined leaf fit
    /// surfaces as `SingularMatrix`.
    pub fn fit(&mut self, x: &Matrix<f32>, y: &Vector<f32>) -> Result<()> {
        let n_samples = x.n_rows();
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
        if self.min_samples_leaf == 0 {
            return Err(EstudioError::InvalidHyperparameter {
                param: "min_samples_leaf".to_string(),
                value: "0".to_string(),
                constraint: "must be at least 1".to_string(),
            });
        }
        if !self.min_gain.is_finite() || self.min_gain < 0.0 {
            return Err(EstudioError::InvalidHyperparameter {
                param: "min_gain".to_string(),
                value: self.min_gain.to_string(),
                constraint: "must be non-negative".to_string(),
            });
        }

        self.root = Some(build_tree(
            x,
            y.as_slice(),
            self.min_gain,
            self.min_samples_leaf,
            self.leaf_kind,
        )?);
        Ok(())
    }

    /// Predicts targets for every row of `x`.
    ///
    /// # Errors
    ///
    /// Returns `NotFitted` if `fit` has not been called.
    pub fn predict(&self, x: &Matrix<f32>) -> Result<Vector<f32>> {
        let root = self
            .root
            .as_ref()
            .ok_or_else(|| EstudioError::not_fitted("predict"))?;
        let (n_samples, n_features) = x.shape();
        let mut predictions = Vec::with_capacity(n_samples);
        for row in 0..n_samples {
            let sample: Vec<f32> = (0..n_features).map(|col| x.get(row, col)).collect();
            predictions.push(predict_node(root, &sample));
        }
        Ok(Vector::from_vec(predictions))
    }

    /// Predicts the target for a single sample.
    ///
    /// # Errors
    ///
    /// Returns `NotFitted` if `fit` has not been called.
    pub fn predict_one(&self, sample: &[f32]) -> Result<f32> {
        let root = self
            .root
            .as_ref()
            .ok_or_else(|| EstudioError::not_fitted("predict_one"))?;
        Ok(predict_node(root, sample))
    }

    /// Computes the R² score against true targets.
    ///
    /// # Errors
    ///
    /// Returns `NotFitted` if `fit` has not been called.
    pub fn score(&self, x: &Matrix<f32>, y: &Vector<f32>) -> Result<f32> {
        let predictions = self.predict(x)?;
        Ok(metrics::r_squared(&predictions, y))
    }

    /// Post-prunes the tree against held-out data.
    ///
    /// Descends with the matching test partition; where both children end
    /// up as constant leaves, they merge into their average whenever the
    /// merged squared error on the test rows is strictly below the
    /// split's. A subtree no test row reaches collapses to its pairwise
    /// mean. Pruning a tree that is already a single leaf changes nothing.
    ///
    /// # Errors
    ///
    /// Returns `NotFitted` before `fit`, and `InvalidHyperparameter` for
    /// linear-leaf trees, which this pruning scheme does not cover.
    pub fn prune(&mut self, x_test: &Matrix<f32>, y_test: &Vector<f32>) -> Result<()> {
        if self.leaf_kind == LeafKind::Linear {
            return Err(EstudioError::InvalidHyperparameter {
                param: "leaf_model".to_string(),
                value: "linear".to_string(),
                constraint: "pruning requires constant leaves".to_string(),
            });
        }
        let n_samples = x_test.n_rows();
        if n_samples != y_test.len() {
            return Err(EstudioError::dimension_mismatch(
                "samples",
                n_samples,
                y_test.len(),
            ));
        }
        let root = self
            .root
            .take()
            .ok_or_else(|| EstudioError::not_fitted("prune"))?;

        let indices: Vec<usize> = (0..n_samples).collect();
        self.root = Some(prune_node(root, x_test, y_test.as_slice(), &indices));
        Ok(())
    }

    /// Returns the number of leaves, or 0 before fitting.
    pub fn n_leaves(&self) -> usize {
        self.root.as_ref().map_or(0, TreeNode::n_leaves)
    }

    /// Returns the tree depth, or 0 before fitting.
    pub fn depth(&self) -> usize {
        self.root.as_ref().map_or(0, TreeNode::depth)
    }

    /// Returns the root node once fitted.
    pub fn root(&self) -> Option<&TreeNode> {
        self.root.as_ref()
    }

    /// Saves the tree to a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the write fails.
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| EstudioError::Serialization(e.to_string()))?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Loads a tree from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the read or deserialization fails.
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        let tree = serde_json::from_str(&json)
            .map_err(|e| EstudioError::Serialization(e.to_string()))?;
        Ok(tree)
    }
}

impl Default for RegressionTree {
    fn default() -> Self {
        Self::new()
    }
}

impl crate::traits::Estimator for RegressionTree {
    fn fit(&mut self, x: &Matrix<f32>, y: &Vector<f32>) -> Result<()> {
        RegressionTree::fit(self, x, y)
    }

    fn predict(&self, x: &Matrix<f32>) -> Result<Vector<f32>> {
        RegressionTree::predict(self, x)
    }

    fn score(&self, x: &Matrix<f32>, y: &Vector<f32>) -> Result<f32> {
        RegressionTree::score(self, x, y)
    }
}

/// Least-squares weights over intercept-augmented features.
///
/// Solves the normal equations on `[1 | x]`. This is both the model-tree
/// leaf fit and the flat linear baseline in the forecast comparison.
///
/// # Errors
///
/// A singular system reports the same remedy the explorer suggests:
/// raising `min_samples_leaf`.
pub fn least_squares(x: &Matrix<f32>, y: &Vector<f32>) -> Result<Vector<f32>> {
    let design = x.with_intercept_column();
    let design_t = design.transpose();
    let gram = design_t.matmul(&design)?;
    let moment = design_t.matvec(y)?;
    gram.solve(&moment).map_err(|_| EstudioError::SingularMatrix {
        hint: "try raising min_samples_leaf".to_string(),
    })
}

/// Forecasts a fitted tree over an evenly stepped grid on `[start, stop)`.
///
/// Returns the grid positions and the forecast at each one. The explorer's
/// canvas samples one forecast per column; this keeps the fixed-step
/// variant for scripted use.
///
/// # Errors
///
/// Returns `NotFitted` before `fit`, and `InvalidHyperparameter` for a
/// step that is not a positive finite number.
pub fn forecast_grid(
    tree: &RegressionTree,
    start: f32,
    stop: f32,
    step: f32,
) -> Result<(Vector<f32>, Vector<f32>)> {
    if !step.is_finite() || step <= 0.0 {
        return Err(EstudioError::InvalidHyperparameter {
            param: "step".to_string(),
            value: step.to_string(),
            constraint: "must be positive".to_string(),
        });
    }
    let mut grid = Vec::new();
    let mut forecasts = Vec::new();
    let mut x = start;
    while x < stop {
        grid.push(x);
        forecasts.push(tree.predict_one(&[x])?);
        x += step;
    }
    Ok((Vector::from_vec(grid), Vector::from_vec(forecasts)))
}

/// Outcome of scanning one subset for its best split.
enum BestSplit {
    /// No worthwhile split; become a leaf with this model
    Leaf(LeafModel),
    /// Split on this feature at this value
    Split { feature_idx: usize, threshold: f32 },
}

/// Recursively grows a subtree over the given subset.
fn build_tree(
    x: &Matrix<f32>,
    y: &[f32],
    min_gain: f32,
    min_samples_leaf: usize,
    leaf_kind: LeafKind,
) -> Result<TreeNode> {
    match choose_best_split(x, y, min_gain, min_samples_leaf, leaf_kind)? {
        BestSplit::Leaf(model) => Ok(TreeNode::Leaf(LeafNode {
            model,
            n_samples: y.len(),
        })),
        BestSplit::Split {
            feature_idx,
            threshold,
        } => {
            let (left_idx, right_idx) = partition_rows(x, x.n_rows(), feature_idx, threshold);
            let (left_x, left_y) = take_rows(x, y, &left_idx);
            let (right_x, right_y) = take_rows(x, y, &right_idx);
            let left = build_tree(&left_x, &left_y, min_gain, min_samples_leaf, leaf_kind)?;
            let right = build_tree(&right_x, &right_y, min_gain, min_samples_leaf, leaf_kind)?;
            Ok(TreeNode::Split(SplitNode {
                feature_idx,
                threshold,
                left: Box::new(left),
                right: Box::new(right),
            }))
        }
    }
}

/// Scans every feature and distinct value for the lowest-error split.
///
/// Candidates leaving fewer than `min_samples_leaf` samples on a side are
/// skipped; if the best surviving candidate reduces the subset error by
/// less than `min_gain`, the subset becomes a leaf.
fn choose_best_split(
    x: &Matrix<f32>,
    y: &[f32],
    min_gain: f32,
    min_samples_leaf: usize,
    leaf_kind: LeafKind,
) -> Result<BestSplit> {
    if all_equal(y) {
        return Ok(BestSplit::Leaf(fit_leaf(x, y, leaf_kind)?));
    }

    let (n_samples, n_features) = x.shape();
    let current_error = subset_error(x, y, leaf_kind)?;

    let mut best_error = f32::INFINITY;
    let mut best_feature = 0;
    let mut best_threshold = 0.0;
    for feature_idx in 0..n_features {
        for threshold in distinct_feature_values(x, feature_idx, n_samples) {
            let (left_idx, right_idx) = partition_rows(x, n_samples, feature_idx, threshold);
            if left_idx.len() < min_samples_leaf || right_idx.len() < min_samples_leaf {
                continue;
            }
            let (left_x, left_y) = take_rows(x, y, &left_idx);
            let (right_x, right_y) = take_rows(x, y, &right_idx);
            let split_error = subset_error(&left_x, &left_y, leaf_kind)?
                + subset_error(&right_x, &right_y, leaf_kind)?;
            if split_error < best_error {
                best_error = split_error;
                best_feature = feature_idx;
                best_threshold = threshold;
            }
        }
    }

    // Covers the no-candidate case too: best_error stays infinite.
    if current_error - best_error < min_gain {
        return Ok(BestSplit::Leaf(fit_leaf(x, y, leaf_kind)?));
    }
    Ok(BestSplit::Split {
        feature_idx: best_feature,
        threshold: best_threshold,
    })
}

/// Fits the configured leaf model on a subset.
fn fit_leaf(x: &Matrix<f32>, y: &[f32], leaf_kind: LeafKind) -> Result<LeafModel> {
    match leaf_kind {
        LeafKind::Constant => Ok(LeafModel::Constant(mean_f32(y))),
        LeafKind::Linear => Ok(LeafModel::Linear(least_squares(
            x,
            &Vector::from_slice(y),
        )?)),
    }
}

/// Leaf-model error of a subset: total squared error around the mean for
/// constant leaves, residual sum of squares of the fit for linear leaves.
fn subset_error(x: &Matrix<f32>, y: &[f32], leaf_kind: LeafKind) -> Result<f32> {
    match leaf_kind {
        LeafKind::Constant => Ok(total_squared_error(y)),
        LeafKind::Linear => {
            let weights = least_squares(x, &Vector::from_slice(y))?;
            let mut rss = 0.0;
            for (row, &target) in y.iter().enumerate() {
                let sample = x.row(row);
                let residual = target - linear_value(sample.as_slice(), &weights);
                rss += residual * residual;
            }
            Ok(rss)
        }
    }
}

/// Evaluates a linear leaf on one sample: `w · [1, sample]`.
fn linear_value(sample: &[f32], weights: &Vector<f32>) -> f32 {
    let mut value = weights[0];
    for (j, &v) in sample.iter().enumerate() {
        value += weights[j + 1] * v;
    }
    value
}

/// Walks a sample down to its leaf and evaluates the leaf model.
fn predict_node(root: &TreeNode, sample: &[f32]) -> f32 {
    let mut node = root;
    loop {
        match node {
            TreeNode::Leaf(leaf) => {
                return match &leaf.model {
                    LeafModel::Constant(value) => *value,
                    LeafModel::Linear(weights) => linear_value(sample, weights),
                };
            }
            TreeNode::Split(split) => {
                node = if sample[split.feature_idx] > split.threshold {
                    &split.left
                } else {
                    &split.right
                };
            }
        }
    }
}

/// Post-prunes a subtree against the test rows listed in `indices`.
fn prune_node(node: TreeNode, x_test: &Matrix<f32>, y_test: &[f32], indices: &[usize]) -> TreeNode {
    let split = match node {
        TreeNode::Leaf(leaf) => return TreeNode::Leaf(leaf),
        TreeNode::Split(split) => split,
    };
    if indices.is_empty() {
        return collapse_to_mean(&TreeNode::Split(split));
    }

    let (left_idx, right_idx) =
        partition_indices(x_test, indices, split.feature_idx, split.threshold);
    let left = prune_node(*split.left, x_test, y_test, &left_idx);
    let right = prune_node(*split.right, x_test, y_test, &right_idx);

    if let (TreeNode::Leaf(left_leaf), TreeNode::Leaf(right_leaf)) = (&left, &right) {
        if let (LeafModel::Constant(left_value), LeafModel::Constant(right_value)) =
            (&left_leaf.model, &right_leaf.model)
        {
            let split_error = squared_error_against(y_test, &left_idx, *left_value)
                + squared_error_against(y_test, &right_idx, *right_value);
            let merged_value = (left_value + right_value) / 2.0;
            let merged_error = squared_error_against(y_test, indices, merged_value);
            if merged_error < split_error {
                return TreeNode::Leaf(LeafNode {
                    model: LeafModel::Constant(merged_value),
                    n_samples: left_leaf.n_samples + right_leaf.n_samples,
                });
            }
        }
    }

    TreeNode::Split(SplitNode {
        feature_idx: split.feature_idx,
        threshold: split.threshold,
        left: Box::new(left),
        right: Box::new(right),
    })
}

/// Collapses a subtree into a single constant leaf at its pairwise mean.
fn collapse_to_mean(node: &TreeNode) -> TreeNode {
    TreeNode::Leaf(LeafNode {
        model: LeafModel::Constant(subtree_mean(node)),
        n_samples: subtree_samples(node),
    })
}

/// Pairwise subtree mean: each split averages its two sides regardless of
/// their sample counts.
fn subtree_mean(node: &TreeNode) -> f32 {
    match node {
        TreeNode::Leaf(leaf) => match &leaf.model {
            LeafModel::Constant(value) => *value,
            // prune rejects linear-leaf trees, so only constants reach here
            LeafModel::Linear(weights) => weights[0],
        },
        TreeNode::Split(split) => (subtree_mean(&split.left) + subtree_mean(&split.right)) / 2.0,
    }
}

/// Counts the training samples held by a subtree's leaves.
fn subtree_samples(node: &TreeNode) -> usize {
    match node {
        TreeNode::Leaf(leaf) => leaf.n_samples,
        TreeNode::Split(split) => subtree_samples(&split.left) + subtree_samples(&split.right),
    }
}

/// Splits all row indices of `x` by a threshold: strictly greater goes left.
fn partition_rows(
    x: &Matrix<f32>,
    n_samples: usize,
    feature_idx: usize,
    threshold: f32,
) -> (Vec<usize>, Vec<usize>) {
    let mut left = Vec::new();
    let mut right = Vec::new();
    for row in 0..n_samples {
        if x.get(row, feature_idx) > threshold {
            left.push(row);
        } else {
            right.push(row);
        }
    }
    (left, right)
}

/// Splits a subset of row indices by a threshold: strictly greater goes left.
fn partition_indices(
    x: &Matrix<f32>,
    indices: &[usize],
    feature_idx: usize,
    threshold: f32,
) -> (Vec<usize>, Vec<usize>) {
    let mut left = Vec::new();
    let mut right = Vec::new();
    for &idx in indices {
        if x.get(idx, feature_idx) > threshold {
            left.push(idx);
        } else {
            right.push(idx);
        }
    }
    (left, right)
}

/// Copies the selected rows into a fresh matrix and target buffer.
fn take_rows(x: &Matrix<f32>, y: &[f32], indices: &[usize]) -> (Matrix<f32>, Vec<f32>) {
    let n_features = x.n_cols();
    let mut data = Vec::with_capacity(indices.len() * n_features);
    let mut targets = Vec::with_capacity(indices.len());
    for &idx in indices {
        for col in 0..n_features {
            data.push(x.get(idx, col));
        }
        targets.push(y[idx]);
    }
    let subset = Matrix::from_vec(indices.len(), n_features, data)
        .expect("Internal error: subset size mismatch");
    (subset, targets)
}

/// Distinct values of one feature column, each a candidate threshold.
fn distinct_feature_values(x: &Matrix<f32>, feature_idx: usize, n_samples: usize) -> Vec<f32> {
    let mut values: Vec<f32> = (0..n_samples).map(|row| x.get(row, feature_idx)).collect();
    values.sort_by(|a, b| a.partial_cmp(b).expect("f32 values should be comparable"));
    values.dedup();
    values
}

/// Total squared error of a subset around its mean.
fn total_squared_error(y: &[f32]) -> f32 {
    let mean = mean_f32(y);
    y.iter().map(|&v| (v - mean).powi(2)).sum()
}

/// Squared error of the listed test rows against one predicted value.
fn squared_error_against(y: &[f32], indices: &[usize], value: f32) -> f32 {
    indices.iter().map(|&idx| (y[idx] - value).powi(2)).sum()
}

/// Computes the mean of a slice of f32 values.
fn mean_f32(values: &[f32]) -> f32 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f32>() / values.len() as f32
    }
}

fn all_equal(values: &[f32]) -> bool {
    values.windows(2).all(|pair| pair[0] == pair[1])
}
