use crate::{Coordinate, Entity};

/// The error type for placing, moving, or removing a single entity on the board.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum IllegalPlacement {
    OutOfBounds { x: i8, z: i8 },
    Occupied { coord: Coordinate, occupant: Entity },
    EmptyCell { coord: Coordinate },
}

impl std::error::Error for IllegalPlacement {}

impl std::fmt::Display for IllegalPlacement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IllegalPlacement::OutOfBounds { x, z } =>
                write!(f, "Cell ({}, {}) is outside of the 8x8 board", x, z),
            IllegalPlacement::Occupied { coord, occupant } =>
                write!(f, "Cell {} is already occupied by a {} {}", coord, occupant.side, occupant.kind),
            IllegalPlacement::EmptyCell { coord } =>
                write!(f, "There is no piece on cell {}", coord),
        }
    }
}
