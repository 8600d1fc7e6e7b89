//! Command-line surface of the `holdem` binary.

use clap::{Args, Parser, Subcommand};

use crate::config::Overrides;

#[derive(Parser, Debug)]
#[command(
    name = "holdem",
    version,
    about = "Texas Hold'em hand simulator and equity estimator"
)]
pub struct HoldemCli {
    #[command(subcommand)]
    pub cmd: Commands,
}

/// Table settings shared by the commands that deal hands. Each flag
/// overrides the config file and environment.
#[derive(Args, Debug, Clone, Default)]
pub struct TableArgs {
    /// Number of seats
    #[arg(long, value_parser = clap::value_parser!(u64).range(2..=22))]
    pub players: Option<u64>,
    /// Starting stack for every seat
    #[arg(long)]
    pub stack: Option<u32>,
    /// RNG seed; a random seed is drawn and logged when absent
    #[arg(long)]
    pub seed: Option<u64>,
    #[arg(long)]
    pub sb: Option<u32>,
    #[arg(long)]
    pub bb: Option<u32>,
    #[arg(long)]
    pub ante: Option<u32>,
    /// Zero-based seat played by the interactive stub (repeatable)
    #[arg(long = "human")]
    pub human_seats: Vec<usize>,
}

impl TableArgs {
    pub fn overrides(&self) -> Overrides {
        Overrides {
            players: self.players.map(|p| p as usize),
            starting_stack: self.stack,
            seed: self.seed,
            small_blind: self.sb,
            big_blind: self.bb,
            ante: self.ante,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Play one hand and print its record as a JSON line
    Hand {
        #[command(flatten)]
        table: TableArgs,
    },
    /// Play many hands at fixed blinds and summarise each seat
    Sim {
        #[arg(long, default_value_t = 100)]
        hands: u64,
        /// Also print every hand record as a JSON line
        #[arg(long)]
        json: bool,
        #[command(flatten)]
        table: TableArgs,
    },
    /// Run a freezeout with blinds doubling twice from --sb/--bb
    Tournament {
        #[arg(long)]
        hands_per_level: Option<u64>,
        #[arg(long)]
        max_hands: Option<u64>,
        #[command(flatten)]
        table: TableArgs,
    },
    /// Estimate the equity of one starting hand against another
    Equity {
        /// First hand, e.g. AhKh, QQ, AKs or T9o
        hand1: String,
        /// Second hand
        hand2: String,
        #[arg(long, default_value_t = 10_000)]
        iterations: u64,
        #[arg(long)]
        seed: Option<u64>,
        /// Worker threads
        #[arg(long, default_value_t = 1)]
        tasks: usize,
    },
    /// Show the resolved configuration and where each value came from
    Cfg,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_subcommand_parses() {
        let commands = vec![
            vec!["holdem", "hand"],
            vec!["holdem", "hand", "--players", "6", "--seed", "1", "--human", "0"],
            vec!["holdem", "sim", "--hands", "10", "--json"],
            vec!["holdem", "tournament", "--players", "4", "--hands-per-level", "5"],
            vec!["holdem", "equity", "AA", "KK", "--iterations", "100", "--tasks", "2"],
            vec!["holdem", "cfg"],
        ];
        for args in commands {
            let result = HoldemCli::try_parse_from(&args);
            assert!(result.is_ok(), "Failed to parse: {:?}", args);
        }
    }

    #[test]
    fn player_count_is_range_checked() {
        assert!(HoldemCli::try_parse_from(["holdem", "hand", "--players", "1"]).is_err());
        assert!(HoldemCli::try_parse_from(["holdem", "hand", "--players", "23"]).is_err());
    }

    #[test]
    fn table_flags_become_overrides() {
        let cli = HoldemCli::try_parse_from(["holdem", "hand", "--stack", "500", "--bb", "50"])
            .unwrap();
        let Commands::Hand { table } = cli.cmd else {
            panic!("expected hand");
        };
        let o = table.overrides();
        assert_eq!(o.starting_stack, Some(500));
        assert_eq!(o.big_blind, Some(50));
        assert_eq!(o.players, None);
    }
}
