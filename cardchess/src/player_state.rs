use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::{draw_card, CardDefinition, Deck, DrawOutcome, Entity, Hand, IllegalMove, Side};

/// Identifies one of the two players of a game.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub u8);

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "player {}", self.0 + 1)
    }
}

/// Who makes the decisions for a player.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlayerKind {
    Human,
    Automated,
}

/// The state for a single player during one game.
#[derive(Clone, Debug)]
pub struct Player {
    pub id: PlayerId,
    pub kind: PlayerKind,
    pub side: Side,
    deck: Deck,
    hand: Hand,
    captured: Vec<Entity>,
    /// Always the sum of the point values of `captured`.
    score: u32,
}

impl Player {
    pub fn new(id: PlayerId, kind: PlayerKind, side: Side, deck: Deck) -> Self {
        Self {
            id,
            kind,
            side,
            deck,
            hand: Hand::new(),
            captured: Vec::new(),
            score: 0,
        }
    }

    pub fn is_automated(&self) -> bool {
        self.kind == PlayerKind::Automated
    }

    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    pub fn hand(&self) -> &Hand {
        &self.hand
    }

    pub fn captured(&self) -> &[Entity] {
        &self.captured
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    /// Draws one card from this player's deck into their hand.
    ///
    /// Never blocks or retries: an empty deck or a full hand just
    /// comes back as the corresponding [`DrawOutcome`].
    pub fn draw_card(&mut self) -> DrawOutcome {
        let outcome = draw_card(&mut self.deck, &mut self.hand);
        match &outcome {
            DrawOutcome::Drawn(card) => {
                debug!(player = %self.id, kind = %card.kind, texture = %card.texture, "Drew card")
            }
            DrawOutcome::DeckExhausted => info!(player = %self.id, "Deck is empty"),
            DrawOutcome::HandFull => debug!(player = %self.id, "Hand is full, not drawing"),
        }
        outcome
    }

    /// Draws up to `count` cards, stopping early once nothing more can be drawn.
    ///
    /// Returns how many cards were drawn.
    pub fn draw_initial_hand(&mut self, count: usize) -> usize {
        let mut drawn = 0;
        while drawn < count {
            match self.draw_card() {
                DrawOutcome::Drawn(_) => drawn += 1,
                DrawOutcome::DeckExhausted | DrawOutcome::HandFull => break,
            }
        }
        drawn
    }

    /// Removes the card at `index` from the hand.
    pub fn play_card(&mut self, index: usize) -> Result<CardDefinition, IllegalMove> {
        self.hand.play(index)
    }

    /// Adds a captured entity and returns the points it was worth.
    pub fn record_capture(&mut self, entity: Entity) -> u32 {
        self.captured.push(entity);
        self.score = self.captured.iter().map(|e| e.kind.point_value()).sum();
        entity.kind.point_value()
    }
}
