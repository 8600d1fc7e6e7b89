//! `equity`: Monte Carlo equity between two starting hands.

use std::io::Write;

use holdem_engine::equity::calculate_equity_parallel;
use tracing::info;

use crate::error::CliError;

pub fn handle_equity_command(
    hand1: &str,
    hand2: &str,
    iterations: u64,
    seed: Option<u64>,
    tasks: usize,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    let seed = seed.unwrap_or_else(rand::random);
    info!(seed, tasks, iterations, "estimating equity");
    let report = calculate_equity_parallel(hand1, hand2, iterations, seed, tasks)?;

    writeln!(out, "{} vs {}: {:.4}", hand1, hand2, report.equity())?;
    writeln!(
        out,
        "wins {}, ties {}, losses {} over {} iterations",
        report.wins, report.ties, report.losses, report.iterations
    )?;
    Ok(())
}
