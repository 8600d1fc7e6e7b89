//! # holdem CLI Library
//!
//! Command-line driver for the `holdem-engine` crate: plays single hands,
//! runs batch simulations and tournaments, and estimates equity between
//! starting hands.
//!
//! ## Main Entry Point
//!
//! The primary entry point is the [`run`] function, which parses command-line
//! arguments and executes the appropriate subcommand.
//!
//! ```
//! let mut out = Vec::new();
//! let mut err = Vec::new();
//! let args = ["holdem", "hand", "--players", "3", "--seed", "42"];
//! let code = holdem_cli::run(args, &mut out, &mut err);
//! assert_eq!(code, 0);
//! ```
//!
//! ## Available Subcommands
//!
//! - `hand`: Play one hand and print its record as a JSON line
//! - `sim`: Play many hands and summarise each seat
//! - `tournament`: Run a freezeout with escalating blinds
//! - `equity`: Monte Carlo equity of one hand against another
//! - `cfg`: Display the resolved configuration

use std::io::Write;

use clap::Parser;

pub mod cli;
pub mod commands;
pub mod config;
mod error;
pub mod exit_code;
pub mod logging;
pub mod ui;

use cli::{Commands, HoldemCli};
use commands::{
    handle_cfg_command, handle_equity_command, handle_hand_command, handle_sim_command,
    handle_tournament_command,
};
use config::Overrides;

pub use error::CliError;

/// Main entry point for the CLI application.
///
/// # Arguments
///
/// * `args` - Iterator over command-line arguments (typically `std::env::args()`)
/// * `out` - Output stream for command output (typically `stdout`)
/// * `err` - Output stream for error messages (typically `stderr`)
///
/// # Returns
///
/// Exit code: `0` for success, `2` for any error
pub fn run<I, S>(args: I, out: &mut dyn Write, err: &mut dyn Write) -> i32
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let argv: Vec<String> = args.into_iter().map(|s| s.as_ref().to_string()).collect();

    let cli = match HoldemCli::try_parse_from(&argv) {
        Ok(cli) => cli,
        Err(e) => {
            use clap::error::ErrorKind;

            // Help and version should print to stdout and exit 0
            return match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                    if write!(out, "{}", e).is_err() {
                        return exit_code::ERROR;
                    }
                    exit_code::SUCCESS
                }
                _ => {
                    let _ = write!(err, "{}", e);
                    exit_code::ERROR
                }
            };
        }
    };

    match dispatch(cli.cmd, out, err) {
        Ok(()) => exit_code::SUCCESS,
        Err(e) => {
            let _ = ui::write_error(err, &e.to_string());
            exit_code::ERROR
        }
    }
}

fn dispatch(cmd: Commands, out: &mut dyn Write, err: &mut dyn Write) -> Result<(), CliError> {
    match cmd {
        Commands::Hand { table } => {
            let resolved = config::resolve(&table.overrides())?;
            handle_hand_command(&resolved.config, &table.human_seats, out)
        }
        Commands::Sim { hands, json, table } => {
            let resolved = config::resolve(&table.overrides())?;
            handle_sim_command(&resolved.config, hands, json, &table.human_seats, out, err)
        }
        Commands::Tournament {
            hands_per_level,
            max_hands,
            table,
        } => {
            let resolved = config::resolve(&table.overrides())?;
            handle_tournament_command(
                &resolved.config,
                hands_per_level,
                max_hands,
                &table.human_seats,
                out,
            )
        }
        Commands::Equity {
            hand1,
            hand2,
            iterations,
            seed,
            tasks,
        } => {
            let seed = match seed {
                Some(s) => Some(s),
                None => config::resolve_seed()?,
            };
            handle_equity_command(&hand1, &hand2, iterations, seed, tasks, out)
        }
        Commands::Cfg => {
            let resolved = config::resolve(&Overrides::default())?;
            handle_cfg_command(&resolved, out)
        }
    }
}
