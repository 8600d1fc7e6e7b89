//! Command handler modules for the `holdem` CLI.
//!
//! Each command lives in its own file and follows the same pattern:
//!
//! - Public handler function: `pub fn handle_COMMAND_command(...) -> Result<(), CliError>`
//! - Output streams (`&mut dyn Write`) passed in by the caller
//! - Errors propagated via `CliError`

pub mod cfg;
pub mod equity;
pub mod hand;
pub mod sim;
pub mod tournament;

pub use cfg::handle_cfg_command;
pub use equity::handle_equity_command;
pub use hand::handle_hand_command;
pub use sim::handle_sim_command;
pub use tournament::handle_tournament_command;

use holdem_engine::player::Player;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use tracing::info;

use crate::config::Config;
use crate::error::CliError;

/// Generator for a run, seeded from `seed` or from entropy. The seed actually
/// used is logged so any run can be replayed.
pub(crate) fn seeded_rng(seed: Option<u64>) -> ChaCha20Rng {
    let seed = seed.unwrap_or_else(rand::random);
    info!(seed, "rng seeded");
    ChaCha20Rng::seed_from_u64(seed)
}

/// Seats `"Player 1"`.. with the configured stack; `human_seats` get the
/// interactive stub, everyone else the heuristic policy.
pub(crate) fn seat_players(cfg: &Config, human_seats: &[usize]) -> Result<Vec<Player>, CliError> {
    check_human_seats(cfg.players, human_seats)?;
    Ok((0..cfg.players)
        .map(|i| {
            let name = format!("Player {}", i + 1);
            if human_seats.contains(&i) {
                Player::human(name, cfg.starting_stack)
            } else {
                Player::automated(name, cfg.starting_stack)
            }
        })
        .collect())
}

pub(crate) fn check_human_seats(players: usize, human_seats: &[usize]) -> Result<(), CliError> {
    match human_seats.iter().find(|&&s| s >= players) {
        Some(seat) => Err(CliError::InvalidInput(format!(
            "--human {seat} is outside a table of {players}"
        ))),
        None => Ok(()),
    }
}
