use crate::{Coordinate, IllegalPlacement, PlayerId, Side};

/// The error type for one attempted turn action.
///
/// None of these change the game state: a rejected action leaves the board,
/// the hands and the turn exactly as they were.
#[derive(Debug, PartialEq, Eq)]
pub enum IllegalMove {
    NotYourTurn { player: PlayerId, active: Side },
    UnknownPlayer { player: PlayerId },
    InvalidHandIndex { index: usize, hand_size: usize },
    NotYourPiece { coord: Coordinate },
    IllegalPlacement { err: IllegalPlacement },
}

impl std::error::Error for IllegalMove {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            IllegalMove::IllegalPlacement { err } => Some(err),
            _ => None,
        }
    }
}

impl std::fmt::Display for IllegalMove {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IllegalMove::NotYourTurn { player, active } => {
                write!(f, "It is not {}'s turn, {} is to move", player, active)
            }
            IllegalMove::UnknownPlayer { player } => write!(f, "There is no {} in this game", player),
            IllegalMove::InvalidHandIndex { index, hand_size } => write!(
                f,
                "Tried to play card {} from a hand of {} cards",
                index, hand_size
            ),
            IllegalMove::NotYourPiece { coord } => {
                write!(f, "The piece on {} belongs to the other side", coord)
            }
            IllegalMove::IllegalPlacement { .. } => write!(f, "The piece cannot go there"),
        }
    }
}

impl From<IllegalPlacement> for IllegalMove {
    fn from(err: IllegalPlacement) -> Self {
        IllegalMove::IllegalPlacement { err }
    }
}
