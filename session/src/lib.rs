mod config;
mod game;
mod player;
mod recording;
pub use config::*;
pub use game::*;
pub use player::*;
pub use recording::*;
