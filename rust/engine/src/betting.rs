//! Betting street engine.
//!
//! A street is resolved in a single pass over the table in seating order.
//! Every player who is still active and not all-in acts exactly once; there is
//! no re-raise loop, so a player who faces a new bet after acting does not
//! act again on that street.

use rand::Rng;
use tracing::debug;

use crate::hand::HandOracle;
use crate::player::{Player, PlayerAction};
use crate::policy::{human_decision, Decision, Policy};
use crate::rules::HandState;

/// Resolves the current street of `state`, appending one action per eligible
/// player to `history` and moving chips into the pot.
///
/// Each automated player consumes exactly one uniform draw from `rng`; human
/// seats consume none.
pub fn play_street<O, R>(
    state: &mut HandState,
    players: &mut [Player],
    big_blind: u32,
    oracle: &O,
    rng: &mut R,
    history: &mut Vec<PlayerAction>,
) where
    O: HandOracle + ?Sized,
    R: Rng + ?Sized,
{
    let street = state.street;
    debug!(%street, pot = state.pot, current_bet = state.current_bet, "street opens");

    for player in players.iter_mut() {
        if !player.is_in_hand() {
            continue;
        }

        let to_call = player.call_amount(state.current_bet);
        let decision = match (player.policy(), player.hole_cards()) {
            (Policy::Human, _) => human_decision(to_call, player.stack()),
            (Policy::Automated(ai), Some(hole)) => {
                let strength = ai.hand_strength(oracle, street, &hole, &state.community_cards);
                let r: f64 = rng.random();
                ai.decide(strength, to_call, player.stack(), state.pot, big_blind, r)
            }
            // no cards to judge: never put chips in
            (Policy::Automated(_), None) if to_call > 0 => Decision::Fold,
            (Policy::Automated(_), None) => Decision::Check,
        };

        let stack_before = player.stack();
        let action = match decision {
            Decision::Fold => player.fold(street),
            Decision::Check => player.check(street),
            Decision::Call(amount) => player.call(amount, street),
            Decision::Bet(amount) => player.bet(amount, street),
        };
        let paid = stack_before - player.stack();
        state.pot += paid;
        state.current_bet = state.current_bet.max(player.total_bet());

        debug!(
            player = player.name(),
            action = action.kind.as_str(),
            amount = action.amount,
            pot = state.pot,
            "{action}"
        );
        history.push(action);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hand::HandEvaluator;
    use crate::player::ActionKind;
    use crate::policy::AutoPolicy;
    use crate::rules::Street;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    fn dealt(mut p: Player, a: &str, b: &str) -> Player {
        p.receive_cards([a.parse().unwrap(), b.parse().unwrap()]);
        p
    }

    #[test]
    fn humans_call_or_fold_and_each_acts_once() {
        let mut state = HandState::new();
        state.current_bet = 20;
        state.pot = 30;
        let mut players = vec![
            dealt(Player::human("A", 1000), "2c", "7d"),
            dealt(Player::human("B", 10), "3c", "8d"),
            dealt(Player::human("C", 1000), "4c", "9d"),
        ];
        players[0].post_blind(10);
        let mut history = Vec::new();
        let mut rng = ChaCha20Rng::seed_from_u64(1);

        play_street(&mut state, &mut players, 20, &HandEvaluator, &mut rng, &mut history);

        let lines: Vec<String> = history.iter().map(|a| a.to_string()).collect();
        assert_eq!(lines, vec!["A calls 10", "B folds", "C calls 20"]);
        assert_eq!(state.pot, 60);
        assert_eq!(state.current_bet, 20);
        assert!(!players[1].is_active());
    }

    #[test]
    fn folded_and_all_in_players_are_skipped() {
        let mut state = HandState::new();
        let mut players = vec![
            dealt(Player::human("A", 100), "2c", "7d"),
            dealt(Player::human("B", 100), "3c", "8d"),
        ];
        players[0].fold(Street::Preflop);
        players[1].all_in(Street::Preflop);
        let mut history = Vec::new();
        let mut rng = ChaCha20Rng::seed_from_u64(1);

        play_street(&mut state, &mut players, 20, &HandEvaluator, &mut rng, &mut history);
        assert!(history.is_empty());
    }

    #[test]
    fn late_bet_does_not_reopen_action() {
        // an automated player at full aggression with aces always bets into an
        // unopened pot; the human who acted before does not get another turn
        let mut state = HandState::new();
        state.pot = 40;
        let mut players = vec![
            dealt(Player::human("H", 1000), "2c", "7d"),
            dealt(
                Player::new("Bot", 1000, Policy::Automated(AutoPolicy::new(1.0))),
                "Ah",
                "As",
            ),
        ];
        let mut history = Vec::new();
        let mut rng = ChaCha20Rng::seed_from_u64(5);

        play_street(&mut state, &mut players, 20, &HandEvaluator, &mut rng, &mut history);

        assert_eq!(history.len(), 2);
        assert_eq!(history[0].kind, ActionKind::Check);
        assert_eq!(history[1].kind, ActionKind::Bet);
        assert_eq!(history[1].amount, 20);
        assert_eq!(state.current_bet, 20);
        assert_eq!(state.pot, 60);
        assert_eq!(players[0].call_amount(state.current_bet), 20);
    }
}
