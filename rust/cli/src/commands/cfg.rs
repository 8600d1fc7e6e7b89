//! Configuration command handler.
//!
//! Prints the resolved table configuration with the layer each value came
//! from (default, file, env or flag).
//!
//! # Example Output
//!
//! ```json
//! {
//!   "players": {
//!     "value": 2,
//!     "source": "default"
//!   },
//!   "seed": {
//!     "value": 123,
//!     "source": "env"
//!   },
//!   ...
//! }
//! ```

use std::io::Write;

use crate::config::ConfigResolved;
use crate::error::CliError;

pub fn handle_cfg_command(resolved: &ConfigResolved, out: &mut dyn Write) -> Result<(), CliError> {
    let ConfigResolved { config, sources } = resolved;
    let display = serde_json::json!({
        "players": {
            "value": config.players,
            "source": sources.players,
        },
        "starting_stack": {
            "value": config.starting_stack,
            "source": sources.starting_stack,
        },
        "seed": {
            "value": config.seed,
            "source": sources.seed,
        },
        "small_blind": {
            "value": config.small_blind,
            "source": sources.small_blind,
        },
        "big_blind": {
            "value": config.big_blind,
            "source": sources.big_blind,
        },
        "ante": {
            "value": config.ante,
            "source": sources.ante,
        }
    });
    let json_str = serde_json::to_string_pretty(&display)?;
    writeln!(out, "{}", json_str)?;
    Ok(())
}
