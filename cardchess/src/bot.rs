use rand::rngs::StdRng;
use rand::seq::{IteratorRandom, SliceRandom};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{Board, CardDefinition, Coordinate, Player, BOT_CANDIDATES};

/// What a decision maker wants to do with its turn.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BotMove {
    /// Spawn a piece from `card` onto the empty cell `coord`.
    Place { card: CardDefinition, coord: Coordinate },
    /// Nothing to do, e.g. the board is full.
    Pass,
}

/// Chooses moves for an automated player.
pub trait DecisionMaker {
    fn decide(&mut self, board: &Board, player: &Player) -> BotMove;
}

/// Places a random piece kind on a random empty cell.
///
/// The card does not come from the player's hand or deck.
pub struct RandomBot {
    rng: StdRng,
}

impl RandomBot {
    pub fn new(rng: StdRng) -> Self {
        Self { rng }
    }
}

impl DecisionMaker for RandomBot {
    fn decide(&mut self, board: &Board, player: &Player) -> BotMove {
        let Some(coord) = board.empty_cells().into_iter().choose(&mut self.rng) else {
            debug!(player = %player.id, "No empty cell left, passing");
            return BotMove::Pass;
        };
        // BOT_CANDIDATES is a non-empty constant
        let archetype = BOT_CANDIDATES.choose(&mut self.rng).unwrap_or(&BOT_CANDIDATES[0]);
        let card = archetype.card_for(player.side);
        debug!(player = %player.id, kind = %card.kind, %coord, "Decided");
        BotMove::Place { card, coord }
    }
}
