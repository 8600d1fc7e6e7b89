use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Record of one completed hand, as handed back to callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HandResult {
    /// Names of the winners in seating order
    pub winners: Vec<String>,
    /// Pot size at showdown, before distribution
    pub pot: u32,
    /// Board cards in dealing order, e.g. `"Ah"`
    pub community_cards: Vec<String>,
    /// Human-readable actions in the order they happened, blinds included
    pub hand_history: Vec<String>,
    /// Hole cards per player, e.g. `"Ah Kd"`
    pub player_hands: BTreeMap<String, String>,
    /// Chips not credited to anyone by the integer pot split
    #[serde(default)]
    pub split_remainder: u32,
}

impl HandResult {
    /// Serializes the record as a single JSON line (no trailing newline).
    pub fn to_json_line(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn is_winner(&self, name: &str) -> bool {
        self.winners.iter().any(|w| w == name)
    }
}
