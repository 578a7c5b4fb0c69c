//! Integration tests for the estudio library.
//!
//! These tests verify end-to-end workflows combining multiple components.

use estudio::dataset::{self, samples};
use estudio::prelude::*;
use estudio::tree::least_squares;
use std::io::Write;

#[test]
fn test_logistic_boundary_workflow() {
    // 1. Generate the toy 2-D set
    let (x, y) = samples::toy_classification(100, 42);
    assert_eq!(x.shape(), (100, 2));

    // 2. Train with full-batch gradient ascent
    let mut model = LogisticRegression::new();
    model.fit(&x, &y).expect("Failed to fit model");

    // 3. Fitted weights are bias plus one weight per feature
    let weights = model.weights().expect("weights after fit");
    assert_eq!(weights.len(), 3);

    // 4. The clouds are well separated, so training accuracy is high
    let accuracy = model.score(&x, &y).expect("score after fit");
    assert!(accuracy > 0.85, "accuracy too low: {accuracy}");

    // 5. The decision boundary is a finite line in the plane
    let (slope, intercept) = model.decision_boundary().expect("boundary for 2-D data");
    assert!(slope.is_finite());
    assert!(intercept.is_finite());
}

#[test]
fn test_optimizers_agree_on_separable_data() {
    let (x, y) = samples::toy_classification(100, 42);

    let optimizers = [
        GradientAscent::Batch {
            learning_rate: 0.001,
            max_cycles: 500,
        },
        GradientAscent::StochasticDecay {
            epochs: 150,
            seed: Some(42),
        },
    ];

    for optimizer in optimizers {
        let mut model = LogisticRegression::new().with_optimizer(optimizer);
        model.fit(&x, &y).expect("Failed to fit model");
        let accuracy = model.score(&x, &y).expect("score after fit");
        assert!(accuracy > 0.85, "{optimizer:?} accuracy too low: {accuracy}");
    }
}

#[test]
fn test_colic_mortality_workflow() {
    // 1. A train/test pair in the colic schema, missing values included
    let (x_train, y_train, x_test, y_test) = samples::colic_like(200, 60, 7);

    // 2. Train with the decaying stochastic optimizer
    let mut model = LogisticRegression::new().with_optimizer(GradientAscent::StochasticDecay {
        epochs: 150,
        seed: Some(7),
    });
    model.fit(&x_train, &y_train).expect("Failed to fit model");

    // 3. Beat a coin flip on held-out data
    let error = model.error_rate(&x_test, &y_test).expect("error rate");
    assert!(error < 0.5, "error rate should beat chance: {error}");
}

#[test]
fn test_explorer_workflow() {
    // 1. Curve data in the explorer's shape
    let (xs, ys) = samples::noisy_sine(200, 42);

    // 2. Redraw with the default knobs
    let mut session = ExplorerSession::new(xs, ys).expect("valid series");
    let report = session.redraw().expect("redraw with defaults");
    let default_leaves = report.n_leaves;
    assert!(default_leaves >= 1);
    assert!(report.r_squared > 0.5, "fit too loose: {}", report.r_squared);

    // 3. Coarser pruning gives a smaller tree
    assert!(session.set_min_samples_leaf("80").is_none());
    let coarse = session.redraw().expect("redraw after knob change");
    assert!(coarse.n_leaves <= default_leaves);

    // 4. The chart carries both the scatter and the fitted curve
    assert!(coarse.chart.contains('·'));
    assert!(coarse.chart.contains('●'));
}

#[test]
fn test_model_tree_forecast_workflow() {
    // Two linear segments with different slopes: exact for a model tree,
    // stepped for a constant-leaf tree, poor for one straight line.
    let mut data = Vec::new();
    let mut targets = Vec::new();
    for i in 0..40 {
        let x = i as f32 * 0.5;
        data.push(x);
        targets.push(if x < 10.0 { 2.0 * x } else { 30.0 - x });
    }
    let x = Matrix::from_vec(40, 1, data).unwrap();
    let y = Vector::from_vec(targets);

    let mut constant = RegressionTree::new()
        .with_min_gain(0.5)
        .with_min_samples_leaf(8);
    constant.fit(&x, &y).expect("Failed to fit constant tree");
    let constant_r = pearson(&constant.predict(&x).expect("predict"), &y);

    let mut model = RegressionTree::new()
        .with_min_gain(0.5)
        .with_min_samples_leaf(8)
        .with_leaf_model(LeafKind::Linear);
    model.fit(&x, &y).expect("Failed to fit model tree");
    let model_r = pearson(&model.predict(&x).expect("predict"), &y);

    let weights = least_squares(&x, &y).expect("global line");
    let line_pred = x.with_intercept_column().matvec(&weights).expect("matvec");
    let line_r = pearson(&line_pred, &y);

    assert!(model_r > 0.999, "model tree should be exact: {model_r}");
    assert!(model_r >= constant_r);
    assert!(line_r < model_r, "a bent curve beats one line: {line_r}");
}

#[test]
fn test_prune_workflow() {
    // 1. Overfit: no gain threshold, single-sample leaves
    let (xs, ys) = samples::noisy_sine(150, 1);
    let x_train = Matrix::from_vec(150, 1, xs.as_slice().to_vec()).unwrap();
    let mut tree = RegressionTree::new()
        .with_min_gain(0.0)
        .with_min_samples_leaf(1);
    tree.fit(&x_train, &ys).expect("Failed to fit tree");
    let leaves_before = tree.n_leaves();
    assert!(leaves_before > 20, "expected an overgrown tree");

    // 2. Prune against an independent draw
    let (test_xs, test_ys) = samples::noisy_sine(40, 2);
    let x_test = Matrix::from_vec(40, 1, test_xs.as_slice().to_vec()).unwrap();
    let score_before = tree.score(&x_test, &test_ys).expect("score");
    tree.prune(&x_test, &test_ys).expect("prune");

    // 3. The tree shrinks and held-out fit does not get worse
    assert!(tree.n_leaves() < leaves_before);
    let score_after = tree.score(&x_test, &test_ys).expect("score");
    assert!(score_after >= score_before - 1e-6);
}

#[test]
fn test_flat_file_workflow() {
    // 1. Write a two-plateau dataset as tab-separated text
    let mut file = tempfile::NamedTempFile::new().unwrap();
    for i in 0..10 {
        let x = i as f32;
        let y = if i < 5 { 0.0 } else { 10.0 };
        writeln!(file, "{x}\t{y}").unwrap();
    }

    // 2. Load features and target
    let (x, y) = dataset::load_xy(file.path()).expect("load_xy");
    assert_eq!(x.shape(), (10, 1));
    assert_eq!(y.len(), 10);

    // 3. Fit a tree and recover the plateaus
    let mut tree = RegressionTree::new()
        .with_min_gain(1.0)
        .with_min_samples_leaf(2);
    tree.fit(&x, &y).expect("Failed to fit tree");
    assert_eq!(tree.n_leaves(), 2);
    assert!((tree.predict_one(&[1.0]).unwrap() - 0.0).abs() < 1e-6);
    assert!((tree.predict_one(&[8.0]).unwrap() - 10.0).abs() < 1e-6);
}

#[test]
fn test_save_load_workflow() {
    let (x, y) = samples::toy_classification(60, 9);
    let mut model = LogisticRegression::new();
    model.fit(&x, &y).expect("Failed to fit model");

    let file = tempfile::NamedTempFile::new().unwrap();
    model.save(file.path()).expect("save");
    let restored = LogisticRegression::load(file.path()).expect("load");

    let original = model.predict(&x).expect("predict");
    let reloaded = restored.predict(&x).expect("predict");
    assert_eq!(original, reloaded);
}

#[test]
fn test_metrics_consistency() {
    let actual = Vector::from_slice(&[1.0, 2.0, 3.0, 4.0, 5.0]);
    let predicted = Vector::from_slice(&[1.1, 2.2, 2.9, 4.1, 4.8]);

    let r2 = r_squared(&predicted, &actual);
    let mse_val = mse(&predicted, &actual);
    let rmse_val = rmse(&predicted, &actual);
    let r = pearson(&predicted, &actual);

    // Verify relationships
    assert!((rmse_val - mse_val.sqrt()).abs() < 1e-6);
    assert!(r2 > 0.0 && r2 <= 1.0);
    assert!(mse_val >= 0.0);
    assert!(r > 0.99, "near-identical series should correlate: {r}");

    // Classification metrics complement each other
    let y_pred = vec![0, 1, 1, 0];
    let y_true = vec![0, 1, 0, 0];
    let total = accuracy(&y_pred, &y_true) + error_rate(&y_pred, &y_true);
    assert!((total - 1.0).abs() < 1e-6);
}
