//! `sim`: many hands at fixed blinds with a per-seat summary.
//!
//! Stacks carry over from hand to hand. A seat that runs out of chips sits
//! out the rest of the run, and the run stops early once fewer than two
//! seats have chips.

use std::io::Write;

use holdem_engine::game::PokerGame;
use holdem_engine::player::Player;
use tracing::info;

use crate::commands::{seat_players, seeded_rng};
use crate::config::Config;
use crate::error::CliError;
use crate::ui;

pub fn handle_sim_command(
    cfg: &Config,
    hands: u64,
    json: bool,
    human_seats: &[usize],
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    if hands == 0 {
        ui::write_error(err, "hands must be >= 1")?;
        return Err(CliError::InvalidInput("hands must be >= 1".to_string()));
    }

    let mut players = seat_players(cfg, human_seats)?;
    let seating: Vec<String> = players.iter().map(|p| p.name().to_string()).collect();
    let mut busted: Vec<Player> = Vec::new();
    let mut game = PokerGame::new(cfg.hand_config())?;
    let mut rng = seeded_rng(cfg.seed);
    let mut played = 0u64;
    let mut lost_to_splits = 0u64;

    while played < hands {
        let (solvent, broke): (Vec<Player>, Vec<Player>) =
            players.into_iter().partition(|p| p.stack() > 0);
        for p in &broke {
            info!(player = p.name(), hands = played, "player busted");
        }
        players = solvent;
        busted.extend(broke);
        if players.len() < 2 {
            ui::display_warning(
                err,
                &format!("stopped after {played} hands: only one player has chips"),
            )?;
            break;
        }

        let result = game.play_hand(&mut players, &mut rng)?;
        lost_to_splits += u64::from(result.split_remainder);
        played += 1;
        if json {
            writeln!(out, "{}", result.to_json_line()?)?;
        }
    }

    writeln!(out, "Simulated: {} hands", played)?;
    writeln!(out, "Chips lost to split remainders: {}", lost_to_splits)?;
    for name in &seating {
        let Some(p) = players
            .iter()
            .chain(busted.iter())
            .find(|p| p.name() == name)
        else {
            continue;
        };
        let s = p.stats();
        writeln!(
            out,
            "{}: stack {}, won {} ({:.1}%), showdowns {}, vpip {:.1}%, profit {:+}",
            p.name(),
            p.stack(),
            s.hands_won,
            s.win_rate() * 100.0,
            s.showdown_count,
            s.vpip() * 100.0,
            s.total_profit
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cfg() -> Config {
        Config {
            players: 3,
            seed: Some(7),
            ..Config::default()
        }
    }

    #[test]
    fn summary_lists_every_seat() {
        let mut out = Vec::new();
        let mut err = Vec::new();
        handle_sim_command(&cfg(), 20, false, &[], &mut out, &mut err).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Simulated: 20 hands"));
        for name in ["Player 1", "Player 2", "Player 3"] {
            assert!(text.contains(&format!("{name}: stack")), "{text}");
        }
    }

    #[test]
    fn json_mode_prints_each_hand() {
        let mut out = Vec::new();
        let mut err = Vec::new();
        handle_sim_command(&cfg(), 5, true, &[], &mut out, &mut err).unwrap();
        let text = String::from_utf8(out).unwrap();
        let records = text.lines().filter(|l| l.starts_with('{')).count();
        assert_eq!(records, 5);
    }

    #[test]
    fn zero_hands_is_invalid() {
        let mut out = Vec::new();
        let mut err = Vec::new();
        let e = handle_sim_command(&cfg(), 0, false, &[], &mut out, &mut err).unwrap_err();
        assert!(matches!(e, CliError::InvalidInput(_)));
        assert!(String::from_utf8(err).unwrap().contains("hands must be >= 1"));
    }
}
