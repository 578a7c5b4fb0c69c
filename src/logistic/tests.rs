//! Tests for the logistic regression module.

use super::*;
use crate::dataset::samples;

#[test]
fn test_sigmoid() {
    assert!((sigmoid(0.0) - 0.5).abs() < 1e-6);
    assert!(sigmoid(10.0) > 0.99);
    assert!(sigmoid(-10.0) < 0.01);
}

#[test]
fn test_sigmoid_saturates_instead_of_overflowing() {
    assert!((sigmoid(1000.0) - 1.0).abs() < 1e-6);
    assert!(sigmoid(-1000.0).abs() < 1e-6);
    assert!(sigmoid(1000.0).is_finite());
    assert!(sigmoid(-1000.0).is_finite());
}

#[test]
fn test_classify_tie_goes_to_zero() {
    assert_eq!(classify(0.5), 0);
    assert_eq!(classify(0.500_1), 1);
    assert_eq!(classify(0.4), 0);
}

#[test]
fn test_new_defaults() {
    let model = LogisticRegression::new();
    assert!(model.weights.is_none());
    assert!(model.fit_intercept);
    assert_eq!(model.optimizer, GradientAscent::default());
}

#[test]
fn test_gradient_ascent_default() {
    assert_eq!(
        GradientAscent::default(),
        GradientAscent::Batch {
            learning_rate: 0.001,
            max_cycles: 500,
        }
    );
}

#[test]
fn test_builder() {
    let model = LogisticRegression::new()
        .with_optimizer(GradientAscent::Stochastic { learning_rate: 0.01 })
        .with_fit_intercept(false);

    assert_eq!(
        model.optimizer,
        GradientAscent::Stochastic { learning_rate: 0.01 }
    );
    assert!(!model.fit_intercept);
}

#[test]
fn test_batch_learns_toy_clouds() {
    let (x, y) = samples::toy_classification(100, 42);

    let mut model = LogisticRegression::new();
    model.fit(&x, &y).expect("Training should succeed");

    let acc = model.score(&x, &y).expect("Model is fitted");
    assert!(acc >= 0.85, "batch accuracy too low: {acc}");
}

#[test]
fn test_stochastic_pass_is_deterministic() {
    let (x, y) = samples::toy_classification(60, 3);
    let optimizer = GradientAscent::Stochastic {
        learning_rate: 0.001,
    };

    let mut a = LogisticRegression::new().with_optimizer(optimizer);
    let mut b = LogisticRegression::new().with_optimizer(optimizer);
    a.fit(&x, &y).expect("Training should succeed");
    b.fit(&x, &y).expect("Training should succeed");

    let wa = a.weights().expect("Model is fitted");
    let wb = b.weights().expect("Model is fitted");
    assert_eq!(wa.as_slice(), wb.as_slice());
    assert!(wa.as_slice().iter().all(|w| w.is_finite()));
    // The pass moved at least one weight off the all-ones start.
    assert!(wa.as_slice().iter().any(|&w| w != 1.0));
}

#[test]
fn test_stochastic_decay_reproducible_with_seed() {
    let (x, y) = samples::toy_classification(60, 3);

    let mut a = LogisticRegression::new().with_optimizer(GradientAscent::StochasticDecay {
        epochs: 20,
        seed: Some(9),
    });
    let mut b = LogisticRegression::new().with_optimizer(GradientAscent::StochasticDecay {
        epochs: 20,
        seed: Some(9),
    });
    let mut c = LogisticRegression::new().with_optimizer(GradientAscent::StochasticDecay {
        epochs: 20,
        seed: Some(10),
    });
    a.fit(&x, &y).expect("Training should succeed");
    b.fit(&x, &y).expect("Training should succeed");
    c.fit(&x, &y).expect("Training should succeed");

    assert_eq!(
        a.weights().expect("fitted").as_slice(),
        b.weights().expect("fitted").as_slice()
    );
    assert_ne!(
        a.weights().expect("fitted").as_slice(),
        c.weights().expect("fitted").as_slice()
    );
}

#[test]
fn test_stochastic_decay_learns_toy_clouds() {
    let (x, y) = samples::toy_classification(100, 7);

    let mut model = LogisticRegression::new().with_optimizer(GradientAscent::StochasticDecay {
        epochs: 150,
        seed: Some(42),
    });
    model.fit(&x, &y).expect("Training should succeed");

    let acc = model.score(&x, &y).expect("Model is fitted");
    assert!(acc >= 0.8, "decay accuracy too low: {acc}");
}

#[test]
fn test_predict_before_fit_errors() {
    let model = LogisticRegression::new();
    let x = Matrix::from_vec(1, 2, vec![0.0, 0.0]).expect("1x2 matrix");

    assert!(matches!(
        model.predict(&x),
        Err(EstudioError::NotFitted { .. })
    ));
    assert!(matches!(
        model.weights(),
        Err(EstudioError::NotFitted { .. })
    ));
    assert!(matches!(
        model.decision_boundary(),
        Err(EstudioError::NotFitted { .. })
    ));
}

#[test]
fn test_fit_rejects_bad_labels() {
    let x = Matrix::from_vec(2, 2, vec![0.0, 0.0, 1.0, 1.0]).expect("2x2 matrix");
    let y = vec![0, 2];

    let mut model = LogisticRegression::new();
    let result = model.fit(&x, &y);

    assert_eq!(
        result.expect_err("Should fail with invalid label value"),
        "labels must be 0 or 1, got 2"
    );
}

#[test]
fn test_fit_rejects_mismatched_samples() {
    let x = Matrix::from_vec(2, 2, vec![0.0, 0.0, 1.0, 1.0]).expect("2x2 matrix");
    let y = vec![0];

    let mut model = LogisticRegression::new();
    assert!(matches!(
        model.fit(&x, &y),
        Err(EstudioError::DimensionMismatch { .. })
    ));
}

#[test]
fn test_fit_rejects_zero_samples() {
    let x = Matrix::from_vec(0, 2, vec![]).expect("0x2 empty matrix");
    let y = vec![];

    let mut model = LogisticRegression::new();
    assert!(model.fit(&x, &y).is_err());
}

#[test]
fn test_fit_rejects_nonpositive_learning_rate() {
    let x = Matrix::from_vec(2, 1, vec![0.0, 1.0]).expect("2x1 matrix");
    let y = vec![0, 1];

    let mut model = LogisticRegression::new().with_optimizer(GradientAscent::Batch {
        learning_rate: 0.0,
        max_cycles: 500,
    });
    match model.fit(&x, &y) {
        Err(EstudioError::InvalidHyperparameter { param, .. }) => {
            assert_eq!(param, "learning_rate");
        }
        other => panic!("unexpected result: {other:?}"),
    }
}

#[test]
fn test_fit_rejects_zero_cycles() {
    let x = Matrix::from_vec(2, 1, vec![0.0, 1.0]).expect("2x1 matrix");
    let y = vec![0, 1];

    let mut model = LogisticRegression::new().with_optimizer(GradientAscent::Batch {
        learning_rate: 0.001,
        max_cycles: 0,
    });
    match model.fit(&x, &y) {
        Err(EstudioError::InvalidHyperparameter { param, .. }) => {
            assert_eq!(param, "max_cycles");
        }
        other => panic!("unexpected result: {other:?}"),
    }
}

#[test]
fn test_fit_rejects_zero_epochs() {
    let x = Matrix::from_vec(2, 1, vec![0.0, 1.0]).expect("2x1 matrix");
    let y = vec![0, 1];

    let mut model = LogisticRegression::new().with_optimizer(GradientAscent::StochasticDecay {
        epochs: 0,
        seed: None,
    });
    match model.fit(&x, &y) {
        Err(EstudioError::InvalidHyperparameter { param, .. }) => {
            assert_eq!(param, "epochs");
        }
        other => panic!("unexpected result: {other:?}"),
    }
}

#[test]
fn test_predict_feature_mismatch() {
    let (x, y) = samples::toy_classification(20, 1);
    let mut model = LogisticRegression::new();
    model.fit(&x, &y).expect("Training should succeed");

    let wide = Matrix::from_vec(1, 3, vec![0.0, 0.0, 0.0]).expect("1x3 matrix");
    assert!(matches!(
        model.predict(&wide),
        Err(EstudioError::DimensionMismatch { .. })
    ));
}

#[test]
fn test_decision_boundary_separates_cloud_centers() {
    let (x, y) = samples::toy_classification(100, 42);
    let mut model = LogisticRegression::new();
    model.fit(&x, &y).expect("Training should succeed");

    let (slope, intercept) = model.decision_boundary().expect("fitted 2-D model");
    assert!(slope.is_finite());
    assert!(intercept.is_finite());

    // The cloud centers sit on opposite sides of the fitted line.
    let side = |px: f32, py: f32| py - (slope * px + intercept);
    assert!(side(-1.5, 8.0) * side(1.5, 4.0) < 0.0);
}

#[test]
fn test_decision_boundary_needs_three_weights() {
    let x = Matrix::from_vec(
        4,
        3,
        vec![
            0.0, 0.0, 0.0, //
            0.0, 1.0, 0.0, //
            1.0, 0.0, 1.0, //
            1.0, 1.0, 1.0,
        ],
    )
    .expect("4x3 matrix");
    let y = vec![0, 0, 1, 1];

    let mut model = LogisticRegression::new();
    model.fit(&x, &y).expect("Training should succeed");

    assert!(matches!(
        model.decision_boundary(),
        Err(EstudioError::DimensionMismatch { .. })
    ));
}

#[test]
fn test_error_rate_complements_score() {
    let (x, y) = samples::toy_classification(80, 5);
    let mut model = LogisticRegression::new();
    model.fit(&x, &y).expect("Training should succeed");

    let acc = model.score(&x, &y).expect("Model is fitted");
    let err = model.error_rate(&x, &y).expect("Model is fitted");
    assert!((acc + err - 1.0).abs() < 1e-6);
}

#[test]
fn test_explicit_intercept_column_matches_builtin() {
    let (x, y) = samples::toy_classification(40, 11);

    let mut with_builtin = LogisticRegression::new();
    with_builtin.fit(&x, &y).expect("Training should succeed");

    let design = x.with_intercept_column();
    let mut with_explicit = LogisticRegression::new().with_fit_intercept(false);
    with_explicit.fit(&design, &y).expect("Training should succeed");

    // Batch ascent is deterministic, so the two runs see the same design
    // matrix and land on the same weights.
    assert_eq!(
        with_builtin.weights().expect("fitted").as_slice(),
        with_explicit.weights().expect("fitted").as_slice()
    );
    assert_eq!(with_explicit.weights().expect("fitted").len(), 3);
}

#[test]
fn test_save_load_round_trip() {
    let (x, y) = samples::toy_classification(50, 13);
    let mut model = LogisticRegression::new();
    model.fit(&x, &y).expect("Training should succeed");

    let file = tempfile::NamedTempFile::new().expect("create temp file");
    model.save(file.path()).expect("save should succeed");

    let loaded = LogisticRegression::load(file.path()).expect("load should succeed");
    assert_eq!(
        model.predict(&x).expect("fitted"),
        loaded.predict(&x).expect("fitted")
    );
}
