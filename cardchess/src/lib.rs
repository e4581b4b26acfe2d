//! Core of a turn-based chess variant where pieces enter the board by playing cards.
//!
//! [`GameState`] is the entry point: it owns the [`Board`] and both [`Player`]s
//! and is the only way to change them during a game.

pub use board::*;
pub use bot::*;
pub use cards::*;
pub use config::*;
pub use deck::*;
pub use errors::*;
pub use game::*;
pub use input::*;
pub use player_state::*;
pub use renderer::*;
pub use rules::*;
pub use turn::*;
pub use visualization::*;

#[cfg(test)]
mod arbitrary;
mod bitset;
mod board;
mod bot;
mod cards;
mod config;
mod deck;
mod errors;
mod game;
mod input;
mod player_state;
mod renderer;
mod rules;
mod turn;
mod visualization;
