//! `tournament`: freezeout until one player holds every chip.

use std::io::Write;

use holdem_engine::tournament::{
    doubling_schedule, Tournament, TournamentConfig, DEFAULT_HANDS_PER_LEVEL, DEFAULT_MAX_HANDS,
};

use crate::commands::{check_human_seats, seeded_rng};
use crate::config::Config;
use crate::error::CliError;

/// Runs a tournament whose blinds start at the configured level and double
/// twice, then prints the winner and how long it took.
pub fn handle_tournament_command(
    cfg: &Config,
    hands_per_level: Option<u64>,
    max_hands: Option<u64>,
    human_seats: &[usize],
    out: &mut dyn Write,
) -> Result<(), CliError> {
    check_human_seats(cfg.players, human_seats)?;
    let config = TournamentConfig {
        players: cfg.players,
        starting_stack: cfg.starting_stack,
        blind_schedule: doubling_schedule(cfg.small_blind, cfg.big_blind),
        hands_per_level: hands_per_level.unwrap_or(DEFAULT_HANDS_PER_LEVEL),
        max_hands: max_hands.unwrap_or(DEFAULT_MAX_HANDS),
        human_seats: human_seats.to_vec(),
    };
    let mut tournament = Tournament::new(config)?;
    let mut rng = seeded_rng(cfg.seed);
    let result = tournament.run(&mut rng)?;

    writeln!(out, "Tournament winner: {}", result.winner)?;
    writeln!(out, "Winning stack: {}", result.winner_stack)?;
    writeln!(out, "Total hands played: {}", result.hands_played)?;
    let (sb, bb) = tournament.blinds();
    writeln!(out, "Final blind level: {} ({}/{})", result.final_level + 1, sb, bb)?;
    if !result.eliminated.is_empty() {
        writeln!(out, "Eliminated: {}", result.eliminated.join(", "))?;
    }
    Ok(())
}
