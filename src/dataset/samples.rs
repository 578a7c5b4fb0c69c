//! Deterministic sample generators mirroring the bundled data files.
//!
//! Each generator takes an explicit seed so tests and demos reproduce the
//! same data everywhere.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::primitives::{Matrix, Vector};

/// Number of features in the colic schema.
pub const N_COLIC_FEATURES: usize = 21;

/// Two Gaussian clouds in 2-D with alternating 0/1 labels.
///
/// The same shape as `data/toy_set.txt`: two features per sample, linearly
/// separable up to cloud overlap.
#[must_use]
pub fn toy_classification(n: usize, seed: u64) -> (Matrix<f32>, Vec<usize>) {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut data = Vec::with_capacity(n * 2);
    let mut labels = Vec::with_capacity(n);

    for i in 0..n {
        let label = i % 2;
        let (cx, cy) = if label == 0 { (-1.5, 8.0) } else { (1.5, 4.0) };
        data.push(normal(&mut rng, cx, 1.2));
        data.push(normal(&mut rng, cy, 1.2));
        labels.push(label);
    }

    let x = Matrix::from_vec(n, 2, data).expect("generated data has matching dimensions");
    (x, labels)
}

/// A noisy sine curve with a growing amplitude envelope.
///
/// The same shape as `data/sine.txt`: x uniform on [0, 5), one target per
/// sample. This is the explorer's curve dataset.
#[must_use]
pub fn noisy_sine(n: usize, seed: u64) -> (Vector<f32>, Vector<f32>) {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut xs = Vec::with_capacity(n);
    let mut ys = Vec::with_capacity(n);

    for _ in 0..n {
        let x = rng.gen_range(0.0_f32..5.0);
        let y = (1.5 * x).sin() * (1.0 + 0.2 * x) + normal(&mut rng, 0.0, 0.1);
        xs.push(x);
        ys.push(y);
    }

    (Vector::from_vec(xs), Vector::from_vec(ys))
}

/// A train/test pair with the colic schema: 21 features, labels from a fixed
/// ground-truth weight vector plus noise, a share of entries zeroed to
/// imitate missing values.
///
/// Returns `(x_train, y_train, x_test, y_test)`.
#[must_use]
pub fn colic_like(
    n_train: usize,
    n_test: usize,
    seed: u64,
) -> (Matrix<f32>, Vec<usize>, Matrix<f32>, Vec<usize>) {
    let mut rng = StdRng::seed_from_u64(seed);

    // One fixed weight vector (intercept first) keeps train and test drawn
    // from the same model.
    let true_w: Vec<f32> = (0..=N_COLIC_FEATURES)
        .map(|i| (i as f32 * 0.7).sin())
        .collect();

    let (x_train, y_train) = colic_block(n_train, &true_w, &mut rng);
    let (x_test, y_test) = colic_block(n_test, &true_w, &mut rng);
    (x_train, y_train, x_test, y_test)
}

fn colic_block(n: usize, true_w: &[f32], rng: &mut StdRng) -> (Matrix<f32>, Vec<usize>) {
    let mut data = Vec::with_capacity(n * N_COLIC_FEATURES);
    let mut labels = Vec::with_capacity(n);

    for _ in 0..n {
        let row: Vec<f32> = (0..N_COLIC_FEATURES)
            .map(|_| normal(rng, 0.0, 1.0))
            .collect();

        let mut margin = true_w[0];
        for (w, v) in true_w[1..].iter().zip(row.iter()) {
            margin += w * v;
        }
        margin += normal(rng, 0.0, 0.5);
        labels.push(usize::from(margin > 0.0));

        // Labels come from the full row; masking afterwards imitates
        // measurements lost after the outcome was recorded.
        for v in row {
            if rng.gen_range(0.0_f32..1.0) < 0.1 {
                data.push(0.0);
            } else {
                data.push(v);
            }
        }
    }

    let x = Matrix::from_vec(n, N_COLIC_FEATURES, data)
        .expect("generated data has matching dimensions");
    (x, labels)
}

// Box-Muller transform for normal samples
fn normal(rng: &mut StdRng, mean: f32, std: f32) -> f32 {
    let u1: f32 = rng.gen_range(0.0001_f32..1.0_f32);
    let u2: f32 = rng.gen_range(0.0_f32..1.0_f32);
    let z = (-2.0_f32 * u1.ln()).sqrt() * (2.0_f32 * std::f32::consts::PI * u2).cos();
    mean + std * z
}
