//! estudio - terminal études from a classic machine-learning textbook
//!
//! Usage:
//!   estudio boundary                     # logistic fit on the toy 2-D set
//!   estudio boundary --optimizer sgd     # one stochastic pass instead
//!   estudio colic                        # horse-colic mortality, 10 runs
//!   estudio explore                      # interactive regression-tree explorer
//!   estudio explore --once --model-tree  # one chart, no loop
//!   estudio forecast                     # tree vs model tree vs straight line

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::process::ExitCode;

mod commands;
mod error;
mod output;

use commands::{boundary, colic, explore, forecast};

/// estudio - gradient ascent and regression trees, rendered in the terminal
#[derive(Parser)]
#[command(name = "estudio")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Quiet mode (skip charts and per-run detail)
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Seed every random draw for reproducible runs
    #[arg(long, global = true, value_name = "N")]
    seed: Option<u64>,
}

#[derive(Subcommand)]
enum Commands {
    /// Fit the toy 2-D set and chart the decision boundary
    Boundary {
        /// Data file (x1 x2 label per line); a built-in cloud when omitted
        #[arg(long, value_name = "FILE")]
        data: Option<PathBuf>,

        /// Gradient-ascent flavor
        #[arg(long, value_enum, default_value_t = OptimizerKind::Batch)]
        optimizer: OptimizerKind,

        /// Cycles (batch) or epochs (sgd-decay) to run
        #[arg(long, value_name = "N")]
        epochs: Option<usize>,
    },

    /// Predict horse-colic mortality and report the averaged test error rate
    Colic {
        /// Training file (features + 0/1 label per line); built-in data when omitted
        #[arg(long, value_name = "FILE", requires = "test")]
        train: Option<PathBuf>,

        /// Test file in the same format
        #[arg(long, value_name = "FILE", requires = "train")]
        test: Option<PathBuf>,

        /// Shuffled training runs to average
        #[arg(long, value_name = "N", default_value = "10")]
        runs: usize,

        /// Epochs per run
        #[arg(long, value_name = "N", default_value = "500")]
        epochs: usize,
    },

    /// Interactively tune a regression tree over a scatter of points
    Explore {
        /// Data file (x y per line); a built-in noisy sine when omitted
        #[arg(long, value_name = "FILE")]
        data: Option<PathBuf>,

        /// Starting minimum samples per leaf
        #[arg(long, value_name = "N", default_value = "10")]
        leaf: String,

        /// Starting minimum split gain
        #[arg(long, value_name = "X", default_value = "1.0")]
        gain: String,

        /// Start with linear-model leaves
        #[arg(long)]
        model_tree: bool,

        /// Render one chart and exit instead of looping
        #[arg(long)]
        once: bool,
    },

    /// Compare constant-leaf tree, model tree, and straight-line forecasts
    Forecast {
        /// Training file (x y per line); a built-in split when omitted
        #[arg(long, value_name = "FILE", requires = "test")]
        train: Option<PathBuf>,

        /// Test file in the same format
        #[arg(long, value_name = "FILE", requires = "train")]
        test: Option<PathBuf>,
    },
}

/// The three textbook optimizers, addressable from the command line.
#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum OptimizerKind {
    /// Full-batch ascent
    Batch,
    /// One in-order stochastic pass
    Sgd,
    /// Shuffled epochs with a decaying step size
    SgdDecay,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Boundary {
            data,
            optimizer,
            epochs,
        } => boundary::run(data.as_deref(), optimizer, epochs, cli.seed, cli.quiet),

        Commands::Colic {
            train,
            test,
            runs,
            epochs,
        } => colic::run(
            train.as_deref(),
            test.as_deref(),
            runs,
            epochs,
            cli.seed,
            cli.quiet,
        ),

        Commands::Explore {
            data,
            leaf,
            gain,
            model_tree,
            once,
        } => explore::run(
            data.as_deref(),
            &leaf,
            &gain,
            model_tree,
            once,
            cli.seed,
            cli.quiet,
        ),

        Commands::Forecast { train, test } => {
            forecast::run(train.as_deref(), test.as_deref(), cli.seed)
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            output::error(&e.to_string());
            e.exit_code()
        }
    }
}
