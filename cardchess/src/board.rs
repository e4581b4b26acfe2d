mod bitboard;
mod coordinate;
mod error;

pub use bitboard::*;
pub use coordinate::*;
pub use error::*;

use serde::{Deserialize, Serialize};

use crate::{PieceKind, Side};

/// A piece standing on the board.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    pub kind: PieceKind,
    pub side: Side,
    /// Kept in sync with the cell the board stores the entity in.
    position: Coordinate,
}

impl Entity {
    pub fn new(kind: PieceKind, side: Side, position: Coordinate) -> Self {
        Self {
            kind,
            side,
            position,
        }
    }

    pub fn position(&self) -> Coordinate {
        self.position
    }
}

/// The 8x8 occupancy grid.
///
/// Every cell holds at most one [`Entity`], and the stored position of each
/// entity always equals the cell it is stored in. This is a placement-only
/// model: nothing here knows how pieces are allowed to move, see
/// [`candidate_moves()`](crate::candidate_moves) for that.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    cells: [Option<Entity>; 64],
    /// Derived from `cells`.
    occupancy: BitBoard,
}

// The back rank, from file a to file h.
const BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// Creates an empty board.
    pub fn new() -> Self {
        Self {
            cells: [None; 64],
            occupancy: BitBoard::empty(),
        }
    }

    /// Creates a board with the 32 pieces of a regular chess game.
    ///
    /// The first side's back rank is on `z = 0` and its pawns on `z = 1`;
    /// the second side's pawns are on `z = 6` and its back rank on `z = 7`.
    pub fn standard_setup() -> Self {
        let mut board = Self::new();
        for (x, &kind) in BACK_RANK.iter().enumerate() {
            let x = x as i8;
            for (side, back_z, pawn_z) in [(Side::First, 0, 1), (Side::Second, 7, 6)] {
                board.put(Entity::new(kind, side, Self::cell(x, back_z)));
                board.put(Entity::new(PieceKind::Pawn, side, Self::cell(x, pawn_z)));
            }
        }
        board
    }

    /// Records `entity` at `coord` and updates its stored position.
    ///
    /// Fails without changing anything if the cell is taken.
    pub fn place_entity(&mut self, mut entity: Entity, coord: Coordinate) -> Result<(), IllegalPlacement> {
        if let Some(occupant) = self.entity_at(coord) {
            return Err(IllegalPlacement::Occupied {
                coord,
                occupant: *occupant,
            });
        }
        entity.position = coord;
        self.put(entity);
        Ok(())
    }

    /// Like [`Self::place_entity()`], for coordinates that have not been bounds-checked yet.
    pub fn place_entity_at(&mut self, entity: Entity, x: i8, z: i8) -> Result<(), IllegalPlacement> {
        self.place_entity(entity, Coordinate::new(x, z)?)
    }

    /// Detaches the entity at `coord`, if any, and frees the cell.
    pub fn remove_entity(&mut self, coord: Coordinate) -> Option<Entity> {
        let entity = self.cells[coord.index()].take()?;
        self.occupancy = self.occupancy.remove(coord);
        Some(entity)
    }

    pub fn entity_at(&self, coord: Coordinate) -> Option<&Entity> {
        self.cells[coord.index()].as_ref()
    }

    /// Moves the entity at `from` to `to` in one step.
    ///
    /// There is no path or legality check. Fails without changing anything if
    /// `from` is empty or `to` is taken.
    pub fn move_entity(&mut self, from: Coordinate, to: Coordinate) -> Result<(), IllegalPlacement> {
        if self.entity_at(from).is_none() {
            return Err(IllegalPlacement::EmptyCell { coord: from });
        }
        if let Some(occupant) = self.entity_at(to) {
            return Err(IllegalPlacement::Occupied {
                coord: to,
                occupant: *occupant,
            });
        }
        if let Some(mut entity) = self.remove_entity(from) {
            entity.position = to;
            self.put(entity);
        }
        Ok(())
    }

    pub fn occupancy(&self) -> BitBoard {
        self.occupancy
    }

    pub fn empty_cells(&self) -> BitBoard {
        !self.occupancy
    }

    pub fn is_full(&self) -> bool {
        self.occupancy == BitBoard::full()
    }

    pub fn num_entities(&self) -> u32 {
        self.occupancy.num_entries()
    }

    /// All entities, in row-major order of their cells.
    pub fn entities(&self) -> impl Iterator<Item = &Entity> {
        self.cells.iter().flatten()
    }

    pub fn entities_of(&self, side: Side) -> impl Iterator<Item = &Entity> {
        self.entities().filter(move |e| e.side == side)
    }

    // Callers guarantee the cell is free.
    fn put(&mut self, entity: Entity) {
        debug_assert!(self.cells[entity.position.index()].is_none());
        self.occupancy = self.occupancy.insert(entity.position);
        self.cells[entity.position.index()] = Some(entity);
    }

    fn cell(x: i8, z: i8) -> Coordinate {
        Coordinate::from_index((z * BOARD_SIZE + x) as usize)
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&crate::visualize_board(self))
    }
}
