use std::collections::BTreeMap;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use crate::{CardDefinition, IllegalMove, PieceKind, Side, ARCHETYPES};

/// The most cards a player may hold at once.
pub const HAND_CEILING: usize = 7;

/// A player's draw pile.
///
/// Built and shuffled once at the start of a game; afterwards it only shrinks.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deck {
    /// The top of the deck is the last element.
    cards: Vec<CardDefinition>,
}

impl Deck {
    /// One card per archetype, shuffled.
    pub fn standard(side: Side, rng: &mut StdRng) -> Self {
        Self::with_copies(side, 1, rng)
    }

    /// `copies` cards per archetype, shuffled.
    pub fn with_copies(side: Side, copies: usize, rng: &mut StdRng) -> Self {
        let mut deck = Self::from_cards(
            ARCHETYPES
                .iter()
                .flat_map(|archetype| std::iter::repeat(archetype.card_for(side)).take(copies))
                .collect(),
        );
        deck.shuffle(rng);
        deck
    }

    /// A deck in exactly the given order. The last card is drawn first.
    pub fn from_cards(cards: Vec<CardDefinition>) -> Self {
        Self { cards }
    }

    /// Uniform Fisher-Yates shuffle.
    pub fn shuffle(&mut self, rng: &mut StdRng) {
        self.cards.shuffle(rng);
    }

    pub fn pop(&mut self) -> Option<CardDefinition> {
        self.cards.pop()
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// The remaining cards, bottom first.
    pub fn cards(&self) -> &[CardDefinition] {
        &self.cards
    }

    /// How many of each piece kind are left.
    pub fn stats(&self) -> BTreeMap<PieceKind, usize> {
        let mut stats = BTreeMap::new();
        for card in &self.cards {
            *stats.entry(card.kind).or_insert(0) += 1;
        }
        stats
    }
}

/// The cards a player currently holds, never more than [`HAND_CEILING`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hand {
    cards: Vec<CardDefinition>,
}

impl Hand {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.cards.len() >= HAND_CEILING
    }

    pub fn get(&self, index: usize) -> Option<&CardDefinition> {
        self.cards.get(index)
    }

    pub fn cards(&self) -> &[CardDefinition] {
        &self.cards
    }

    /// Adds a card unless the hand is full. Gives the card back on failure.
    pub fn push(&mut self, card: CardDefinition) -> Result<(), CardDefinition> {
        if self.is_full() {
            return Err(card);
        }
        self.cards.push(card);
        Ok(())
    }

    /// Removes and returns the card at `index`.
    pub fn play(&mut self, index: usize) -> Result<CardDefinition, IllegalMove> {
        if index >= self.cards.len() {
            return Err(IllegalMove::InvalidHandIndex {
                index,
                hand_size: self.cards.len(),
            });
        }
        Ok(self.cards.remove(index))
    }
}

/// The result of trying to draw one card.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DrawOutcome {
    Drawn(CardDefinition),
    /// Nothing left to draw. The hand is unchanged.
    DeckExhausted,
    /// The hand is at [`HAND_CEILING`]. The deck is unchanged.
    HandFull,
}

impl DrawOutcome {
    pub fn card(self) -> Option<CardDefinition> {
        match self {
            DrawOutcome::Drawn(card) => Some(card),
            _ => None,
        }
    }
}

/// Moves the top card of `deck` into `hand`, if both allow it.
pub fn draw_card(deck: &mut Deck, hand: &mut Hand) -> DrawOutcome {
    if hand.is_full() {
        return DrawOutcome::HandFull;
    }
    match deck.pop() {
        Some(card) => {
            // Can't fail, the hand was checked above
            let _ = hand.push(card.clone());
            DrawOutcome::Drawn(card)
        }
        None => DrawOutcome::DeckExhausted,
    }
}
