use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The kind of a piece on the board, and the kind of piece a card spawns.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum PieceKind {
    Pawn,
    Rook,
    Knight,
    Bishop,
    Queen,
    King,
}

/// One of the two opponents in a match.
///
/// `First` always moves first and is drawn as white.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Side {
    #[serde(rename = "white")]
    First,
    #[serde(rename = "black")]
    Second,
}

impl PieceKind {
    pub const ALL: [PieceKind; 6] = [
        PieceKind::Pawn,
        PieceKind::Rook,
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Queen,
        PieceKind::King,
    ];

    /// Points awarded to the side that captures a piece of this kind.
    pub fn point_value(self) -> u32 {
        match self {
            PieceKind::Pawn => 1,
            PieceKind::Knight | PieceKind::Bishop => 3,
            PieceKind::Rook => 5,
            PieceKind::Queen => 9,
            PieceKind::King => 0,
        }
    }

    /// The piece letter used in move notation. Pawns have none.
    pub fn notation_letter(self) -> &'static str {
        match self {
            PieceKind::Pawn => "",
            PieceKind::Rook => "R",
            PieceKind::Knight => "N",
            PieceKind::Bishop => "B",
            PieceKind::Queen => "Q",
            PieceKind::King => "K",
        }
    }

    /// Render this piece as a Unicode chess symbol.
    pub fn unicode_char(self, side: Side) -> char {
        // https://en.wikipedia.org/wiki/Chess_symbols_in_Unicode
        let base = match side {
            Side::First => 0x2654,
            Side::Second => 0x265A,
        };
        let offset = match self {
            PieceKind::King => 0,
            PieceKind::Queen => 1,
            PieceKind::Rook => 2,
            PieceKind::Bishop => 3,
            PieceKind::Knight => 4,
            PieceKind::Pawn => 5,
        };
        char::from_u32(base + offset).unwrap_or('?')
    }
}

impl std::fmt::Display for PieceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            PieceKind::Pawn => "pawn",
            PieceKind::Rook => "rook",
            PieceKind::Knight => "knight",
            PieceKind::Bishop => "bishop",
            PieceKind::Queen => "queen",
            PieceKind::King => "king",
        };
        f.write_str(name)
    }
}

/// The error type for the [`FromStr`] instance of [`PieceKind`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnknownPieceKind(pub String);

impl std::error::Error for UnknownPieceKind {}

impl std::fmt::Display for UnknownPieceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "'{}' is not a piece kind", self.0)
    }
}

impl FromStr for PieceKind {
    type Err = UnknownPieceKind;

    /// Accepts the lowercase name (`"knight"`) or the notation letter (`"N"`, `"P"` for pawns).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pawn" | "P" => Ok(PieceKind::Pawn),
            "rook" | "R" => Ok(PieceKind::Rook),
            "knight" | "N" => Ok(PieceKind::Knight),
            "bishop" | "B" => Ok(PieceKind::Bishop),
            "queen" | "Q" => Ok(PieceKind::Queen),
            "king" | "K" => Ok(PieceKind::King),
            _ => Err(UnknownPieceKind(String::from(s))),
        }
    }
}

impl Side {
    pub fn other(self) -> Self {
        match self {
            Side::First => Side::Second,
            Side::Second => Side::First,
        }
    }

    /// The label shown to players, e.g. in "Turn 3: Black's turn".
    pub fn label(self) -> &'static str {
        match self {
            Side::First => "White",
            Side::Second => "Black",
        }
    }

    /// Index into per-side arrays. `First` is 0.
    pub fn index(self) -> usize {
        self as usize
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// A drawable, playable template that spawns an entity when placed.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CardDefinition {
    pub kind: PieceKind,
    pub side: Side,
    /// Name of the card art, without extension.
    pub texture: String,
}

/// A card design with a fixed piece kind. A deck holds cards built from these.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Archetype {
    pub texture: &'static str,
    pub kind: PieceKind,
}

impl Archetype {
    pub fn card_for(&self, side: Side) -> CardDefinition {
        CardDefinition {
            kind: self.kind,
            side,
            texture: String::from(self.texture),
        }
    }
}

/// Every archetype, in the order a fresh deck is built before shuffling.
pub static ARCHETYPES: [Archetype; 7] = [
    Archetype {
        texture: "Ace_kunoichi",
        kind: PieceKind::Rook,
    },
    Archetype {
        texture: "Chroma_king",
        kind: PieceKind::King,
    },
    Archetype {
        texture: "Chroma_Queen",
        kind: PieceKind::Queen,
    },
    Archetype {
        texture: "Faithful_Pal",
        kind: PieceKind::Pawn,
    },
    Archetype {
        texture: "Chroma_Dragon",
        kind: PieceKind::Pawn,
    },
    Archetype {
        texture: "Wicked_Assassin",
        kind: PieceKind::Knight,
    },
    Archetype {
        texture: "Ye_Old_Bishop",
        kind: PieceKind::Bishop,
    },
];

/// The pool the automated opponent picks from. One archetype per piece kind.
pub static BOT_CANDIDATES: [Archetype; 6] = [
    Archetype {
        texture: "Chroma_Dragon",
        kind: PieceKind::Pawn,
    },
    Archetype {
        texture: "Ace_kunoichi",
        kind: PieceKind::Rook,
    },
    Archetype {
        texture: "Ye_Old_Bishop",
        kind: PieceKind::Bishop,
    },
    Archetype {
        texture: "Wicked_Assassin",
        kind: PieceKind::Knight,
    },
    Archetype {
        texture: "Chroma_Queen",
        kind: PieceKind::Queen,
    },
    Archetype {
        texture: "Chroma_king",
        kind: PieceKind::King,
    },
];
