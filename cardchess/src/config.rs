use serde::{Deserialize, Serialize};

use crate::{PlayerKind, HAND_CEILING};

/// Settings for one game.
///
/// Every field has a default, so a config file only needs to list what it changes:
/// ```
/// # use cardchess::{GameConfig, PlayerKind};
/// let config: GameConfig = serde_json::from_str(r#"{ "think_delay_ms": 0 }"#).unwrap();
/// assert_eq!(config.think_delay_ms, 0);
/// assert_eq!(config.second_player, PlayerKind::Automated);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Cards dealt to each player at the start.
    pub initial_hand_size: usize,
    /// How many cards of each archetype go into a deck.
    pub copies_per_archetype: usize,
    /// How long the decision maker "thinks" before moving.
    pub think_delay_ms: u64,
    /// Start with the 32 pieces of a regular chess game instead of an empty board.
    pub standard_setup: bool,
    pub first_player: PlayerKind,
    pub second_player: PlayerKind,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            initial_hand_size: HAND_CEILING,
            copies_per_archetype: 1,
            think_delay_ms: 1000,
            standard_setup: false,
            first_player: PlayerKind::Human,
            second_player: PlayerKind::Automated,
        }
    }
}
