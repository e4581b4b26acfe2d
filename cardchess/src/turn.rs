use serde::{Deserialize, Serialize};

use crate::{Coordinate, PieceKind, Side};

/// One entry of the move history. Never changed after it was recorded.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnRecord {
    /// The turn counter at the time of the move.
    pub turn: u32,
    pub side: Side,
    pub kind: PieceKind,
    pub to: Coordinate,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub from: Option<Coordinate>,
    pub capture: bool,
    /// The piece came onto the board from a card instead of moving.
    pub placement: bool,
    /// Algebraic-style description, for logs and transcripts only.
    pub notation: String,
}

/// Builds the notation for a move.
///
/// Moves are written like `Nxd4` or `e5`, placements like `Q@d4` or `@e5`.
pub fn notation(kind: PieceKind, to: Coordinate, capture: bool, placement: bool) -> String {
    let mut s = String::from(kind.notation_letter());
    if placement {
        s.push('@');
    } else if capture {
        s.push('x');
    }
    s += &to.to_string();
    s
}

/// Summarizes a turn switch.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnChange {
    /// The side that is now to move.
    pub side: Side,
    pub turn: u32,
    /// The side now to move is controlled by a decision maker, which should be
    /// asked for a move.
    pub automated: bool,
}

/// Append-only list of moves, kept per side.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct MoveHistory {
    records: [Vec<TurnRecord>; 2],
}

impl MoveHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, record: TurnRecord) -> &TurnRecord {
        let records = &mut self.records[record.side.index()];
        records.push(record);
        // Just pushed, so there is a last element
        &records[records.len() - 1]
    }

    pub fn of(&self, side: Side) -> &[TurnRecord] {
        &self.records[side.index()]
    }

    pub fn len(&self) -> usize {
        self.records[0].len() + self.records[1].len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Both sides' moves in the order they were played.
    pub fn chronological(&self) -> Vec<&TurnRecord> {
        let mut all: Vec<&TurnRecord> = self.records.iter().flatten().collect();
        // Each turn produces at most one record
        all.sort_by_key(|record| record.turn);
        all
    }
}
