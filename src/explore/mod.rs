//! Interactive regression-tree explorer session.
//!
//! `ExplorerSession` holds a 1-D curve dataset and the two pre-pruning
//! knobs, refitting a [`RegressionTree`] and rendering scatter plus fitted
//! curve into a `String` chart on every redraw. Knob setters take raw user
//! text and fall back to their defaults with a corrective message when the
//! text does not parse, so a typo never ends the session. [`Command`]
//! parses the one-line instructions a terminal front end reads.
//!
//! # Example
//!
//! ```
//! use estudio::dataset::samples;
//! use estudio::explore::ExplorerSession;
//!
//! let (xs, ys) = samples::noisy_sine(200, 7);
//! let mut session = ExplorerSession::new(xs, ys).expect("Curve data is valid");
//! assert!(session.set_min_samples_leaf("15").is_none());
//!
//! let report = session.redraw().expect("Tree fits the curve data");
//! assert!(report.n_leaves >= 1);
//! assert!(report.chart.contains('\n'));
//! ```

pub mod chart;

use crate::error::{EstudioError, Result};
use crate::primitives::{Matrix, Vector};
use crate::tree::{LeafKind, RegressionTree};
use chart::Chart;

const DEFAULT_MIN_SAMPLES_LEAF: usize = 10;
const DEFAULT_MIN_GAIN: f32 = 1.0;
const CHART_WIDTH: usize = 64;
const CHART_HEIGHT: usize = 20;
const SCATTER_GLYPH: char = '·';
const CURVE_GLYPH: char = '●';

/// One parsed explorer instruction.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// `leaf <n>`: set the minimum samples per leaf from raw text
    Leaf(String),
    /// `gain <x>`: set the minimum split gain from raw text
    Gain(String),
    /// `model on` / `model off`: toggle linear-model leaves
    Model(bool),
    /// `draw`: refit and redraw the chart
    Draw,
    /// `help`: show the command summary
    Help,
    /// `quit`: leave the explorer
    Quit,
}

impl Command {
    /// Parses one input line; anything unrecognized earns the help text.
    pub fn parse(line: &str) -> std::result::Result<Self, String> {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        match tokens.as_slice() {
            ["leaf", text] => Ok(Self::Leaf((*text).to_string())),
            ["gain", text] => Ok(Self::Gain((*text).to_string())),
            ["model", "on"] => Ok(Self::Model(true)),
            ["model", "off"] => Ok(Self::Model(false)),
            ["draw"] => Ok(Self::Draw),
            ["help"] => Ok(Self::Help),
            ["quit"] => Ok(Self::Quit),
            _ => Err(help_text().to_string()),
        }
    }
}

/// Command summary shown for `help` and for unrecognized input.
pub fn help_text() -> &'static str {
    "commands:\n  \
     leaf <n>   smallest sample count a split may leave on a side\n  \
     gain <x>   smallest error reduction worth splitting for\n  \
     model on   fit linear models in the leaves\n  \
     model off  constant leaves\n  \
     draw       refit the tree and redraw the chart\n  \
     help       show this text\n  \
     quit       leave the explorer"
}

/// What one redraw produced.
#[derive(Debug, Clone)]
pub struct ExplorerReport {
    /// Rendered scatter-plus-curve chart
    pub chart: String,
    /// Leaf count of the freshly fitted tree
    pub n_leaves: usize,
    /// Depth of the freshly fitted tree
    pub depth: usize,
    /// Training R² of the fitted curve
    pub r_squared: f32,
}

/// Interactive session over one curve dataset.
#[derive(Debug, Clone)]
pub struct ExplorerSession {
    xs: Vector<f32>,
    ys: Vector<f32>,
    min_samples_leaf: usize,
    min_gain: f32,
    model_tree: bool,
}

impl ExplorerSession {
    /// Creates a session over (x, y) curve data with the explorer defaults.
    ///
    /// # Errors
    ///
    /// Mismatched series lengths and empty data are rejected.
    pub fn new(xs: Vector<f32>, ys: Vector<f32>) -> Result<Self> {
        if xs.len() != ys.len() {
            return Err(EstudioError::dimension_mismatch(
                "samples",
                xs.len(),
                ys.len(),
            ));
        }
        if xs.is_empty() {
            return Err(EstudioError::empty_input(
                "explorer needs at least one sample",
            ));
        }
        Ok(Self {
            xs,
            ys,
            min_samples_leaf: DEFAULT_MIN_SAMPLES_LEAF,
            min_gain: DEFAULT_MIN_GAIN,
            model_tree: false,
        })
    }

    /// Sets the minimum samples per leaf from raw user text.
    ///
    /// Unparsable text falls back to the default of 10 and returns the
    /// corrective message to show the user.
    pub fn set_min_samples_leaf(&mut self, text: &str) -> Option<String> {
        match text.trim().parse::<usize>() {
            Ok(value) => {
                self.min_samples_leaf = value;
                None
            }
            Err(_) => {
                self.min_samples_leaf = DEFAULT_MIN_SAMPLES_LEAF;
                Some(format!(
                    "enter an integer for leaf; reset to {DEFAULT_MIN_SAMPLES_LEAF}"
                ))
            }
        }
    }

    /// Sets the minimum split gain from raw user text.
    ///
    /// Unparsable text falls back to the default of 1.0 and returns the
    /// corrective message to show the user.
    pub fn set_min_gain(&mut self, text: &str) -> Option<String> {
        match text.trim().parse::<f32>() {
            Ok(value) => {
                self.min_gain = value;
                None
            }
            Err(_) => {
                self.min_gain = DEFAULT_MIN_GAIN;
                Some(format!("enter a number for gain; reset to {DEFAULT_MIN_GAIN:.1}"))
            }
        }
    }

    /// Switches between constant leaves and linear-model leaves.
    pub fn set_model_tree(&mut self, on: bool) {
        self.model_tree = on;
    }

    /// Returns the current minimum samples per leaf as entered.
    pub fn min_samples_leaf(&self) -> usize {
        self.min_samples_leaf
    }

    /// Returns the current minimum split gain.
    pub fn min_gain(&self) -> f32 {
        self.min_gain
    }

    /// Returns whether linear-model leaves are enabled.
    pub fn model_tree(&self) -> bool {
        self.model_tree
    }

    /// Refits the tree with the current knobs and renders the chart.
    ///
    /// The fitted curve is sampled once per canvas column across the
    /// padded x-range.
    ///
    /// # Errors
    ///
    /// Surfaces any fit or prediction error from the underlying tree.
    pub fn redraw(&self) -> Result<ExplorerReport> {
        let x = Matrix::from_vec(self.xs.len(), 1, self.xs.as_slice().to_vec())?;
        let mut tree = RegressionTree::new()
            .with_min_gain(self.min_gain)
            .with_min_samples_leaf(self.effective_min_samples_leaf());
        if self.model_tree {
            tree = tree.with_leaf_model(LeafKind::Linear);
        }
        tree.fit(&x, &self.ys)?;

        let (x_lo, x_hi) = chart::padded_range(self.xs.as_slice());
        let mut grid_xs = Vec::with_capacity(CHART_WIDTH);
        let mut grid_ys = Vec::with_capacity(CHART_WIDTH);
        for col in 0..CHART_WIDTH {
            let t = col as f32 / (CHART_WIDTH - 1) as f32;
            let grid_x = x_lo + t * (x_hi - x_lo);
            grid_xs.push(grid_x);
            grid_ys.push(tree.predict_one(&[grid_x])?);
        }

        let (data_lo, data_hi) = chart::padded_range(self.ys.as_slice());
        let (curve_lo, curve_hi) = chart::padded_range(&grid_ys);
        let y_range = (data_lo.min(curve_lo), data_hi.max(curve_hi));

        let mut canvas = Chart::new(CHART_WIDTH, CHART_HEIGHT, (x_lo, x_hi), y_range);
        canvas.scatter(self.xs.as_slice(), self.ys.as_slice(), SCATTER_GLYPH);
        canvas.line(&grid_xs, &grid_ys, CURVE_GLYPH);

        Ok(ExplorerReport {
            chart: canvas.render(),
            n_leaves: tree.n_leaves(),
            depth: tree.depth(),
            r_squared: tree.score(&x, &self.ys)?,
        })
    }

    /// Leaf floor actually used: model trees need at least 2 samples to
    /// fit a line, so values below 2 are raised while the toggle is on.
    fn effective_min_samples_leaf(&self) -> usize {
        if self.model_tree {
            self.min_samples_leaf.max(2)
        } else {
            self.min_samples_leaf
        }
    }
}
