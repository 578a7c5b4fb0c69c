//! Explore command: the interactive regression-tree explorer.

use crate::error::{CliError, Result};
use crate::output;
use estudio::dataset::{self, samples};
use estudio::explore::{help_text, Command, ExplorerReport, ExplorerSession};
use estudio::primitives::Vector;
use std::io::{self, BufRead, Write};
use std::path::Path;

/// Run the explore command
pub(crate) fn run(
    data: Option<&Path>,
    leaf: &str,
    gain: &str,
    model_tree: bool,
    once: bool,
    seed: Option<u64>,
    quiet: bool,
) -> Result<()> {
    let (xs, ys) = load_points(data, seed)?;
    let mut session = ExplorerSession::new(xs, ys)?;

    // The knobs reuse the session's text parsing, so a bad flag value
    // falls back to the default with a warning instead of aborting.
    if let Some(msg) = session.set_min_samples_leaf(leaf) {
        output::warning(&msg);
    }
    if let Some(msg) = session.set_min_gain(gain) {
        output::warning(&msg);
    }
    session.set_model_tree(model_tree);

    let report = session.redraw()?;
    print_report(&session, &report, quiet);
    if once {
        return Ok(());
    }

    println!("\n{}", help_text());
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!("> ");
        io::stdout().flush()?;
        let Some(line) = lines.next() else { break };
        let line = line?;

        match Command::parse(&line) {
            Ok(Command::Leaf(text)) => {
                if let Some(msg) = session.set_min_samples_leaf(&text) {
                    output::warning(&msg);
                }
            }
            Ok(Command::Gain(text)) => {
                if let Some(msg) = session.set_min_gain(&text) {
                    output::warning(&msg);
                }
            }
            Ok(Command::Model(on)) => {
                session.set_model_tree(on);
                output::info(if on { "model tree on" } else { "model tree off" });
            }
            Ok(Command::Draw) => match session.redraw() {
                Ok(report) => print_report(&session, &report, quiet),
                // A bad knob (say leaf 0) should not end the session.
                Err(e) => output::error(&e.to_string()),
            },
            Ok(Command::Help) => println!("{}", help_text()),
            Ok(Command::Quit) => break,
            Err(help) => println!("{help}"),
        }
    }
    Ok(())
}

fn load_points(data: Option<&Path>, seed: Option<u64>) -> Result<(Vector<f32>, Vector<f32>)> {
    match data {
        Some(path) => {
            super::validate_path(path)?;
            let (x, y) = dataset::load_xy(path)?;
            if x.n_cols() != 1 {
                return Err(CliError::InvalidArgument(format!(
                    "the explorer plots one feature against the target; {} has {} feature columns",
                    path.display(),
                    x.n_cols()
                )));
            }
            Ok((x.column(0), y))
        }
        None => Ok(samples::noisy_sine(200, seed.unwrap_or(super::DATA_SEED))),
    }
}

fn print_report(session: &ExplorerSession, report: &ExplorerReport, quiet: bool) {
    if !quiet {
        println!("\n{}", report.chart);
    }
    output::kv("min samples per leaf", session.min_samples_leaf());
    output::kv("min gain", session.min_gain());
    output::kv("model tree", session.model_tree());
    output::kv("leaves", report.n_leaves);
    output::kv("depth", report.depth);
    output::kv("r squared", format!("{:.4}", report.r_squared));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_points_defaults_to_noisy_sine() {
        let (xs, ys) = load_points(None, Some(3)).unwrap();
        assert_eq!(xs.len(), 200);
        assert_eq!(ys.len(), 200);
    }

    #[test]
    fn test_load_points_reads_two_column_files() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "0.0\t1.0").unwrap();
        writeln!(file, "1.0\t2.0").unwrap();
        writeln!(file, "2.0\t3.0").unwrap();

        let (xs, ys) = load_points(Some(file.path()), None).unwrap();
        assert_eq!(xs.len(), 3);
        assert_eq!(ys.as_slice(), &[1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_load_points_rejects_extra_feature_columns() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "0.0\t1.0\t5.0").unwrap();
        writeln!(file, "1.0\t2.0\t6.0").unwrap();

        let result = load_points(Some(file.path()), None);
        assert!(matches!(result, Err(CliError::InvalidArgument(_))));
    }
}
