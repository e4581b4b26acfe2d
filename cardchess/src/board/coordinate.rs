use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::IllegalPlacement;

/// Number of cells along each edge of the board.
pub const BOARD_SIZE: i8 = 8;

/// A cell on the 8x8 board.
///
/// `x` is the file (`a` to `h`), `z` the rank (`1` to `8`). Both are always in
/// `0..8`; the only way to get a `Coordinate` is through a bounds check.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "(i8, i8)", into = "(i8, i8)")]
pub struct Coordinate {
    x: i8,
    z: i8,
}

impl Coordinate {
    pub fn new(x: i8, z: i8) -> Result<Self, IllegalPlacement> {
        if Self::in_bounds(x, z) {
            Ok(Self { x, z })
        } else {
            Err(IllegalPlacement::OutOfBounds { x, z })
        }
    }

    pub fn in_bounds(x: i8, z: i8) -> bool {
        (0..BOARD_SIZE).contains(&x) && (0..BOARD_SIZE).contains(&z)
    }

    pub fn x(self) -> i8 {
        self.x
    }

    pub fn z(self) -> i8 {
        self.z
    }

    /// The cell `(dx, dz)` away from this one, if it is still on the board.
    pub fn offset(self, dx: i8, dz: i8) -> Option<Self> {
        let x = self.x.checked_add(dx)?;
        let z = self.z.checked_add(dz)?;
        Self::new(x, z).ok()
    }

    /// Row-major index in `0..64`.
    pub fn index(self) -> usize {
        (self.z * BOARD_SIZE + self.x) as usize
    }

    pub(crate) fn from_index(idx: usize) -> Self {
        debug_assert!(idx < 64);
        Self {
            x: (idx % 8) as i8,
            z: (idx / 8) as i8,
        }
    }

    /// All 64 cells in row-major order.
    pub fn all() -> impl Iterator<Item = Coordinate> {
        (0..64).map(Self::from_index)
    }
}

impl TryFrom<(i8, i8)> for Coordinate {
    type Error = IllegalPlacement;

    fn try_from((x, z): (i8, i8)) -> Result<Self, Self::Error> {
        Self::new(x, z)
    }
}

impl From<Coordinate> for (i8, i8) {
    fn from(coord: Coordinate) -> Self {
        (coord.x, coord.z)
    }
}

/// Algebraic form, e.g. `(3, 3)` is `d4`.
impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let file = (b'a' + self.x as u8) as char;
        write!(f, "{}{}", file, self.z + 1)
    }
}

/// The error type for the [`FromStr`] instance of [`Coordinate`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CoordinateFromStrErr {
    WrongLength,
    InvalidFile,
    InvalidRank,
}

impl std::error::Error for CoordinateFromStrErr {}

impl std::fmt::Display for CoordinateFromStrErr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CoordinateFromStrErr::WrongLength => write!(f, "A cell is written as two characters"),
            CoordinateFromStrErr::InvalidFile => write!(f, "The file must be a letter from a to h"),
            CoordinateFromStrErr::InvalidRank => write!(f, "The rank must be a digit from 1 to 8"),
        }
    }
}

impl FromStr for Coordinate {
    type Err = CoordinateFromStrErr;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let file = chars.next().ok_or(CoordinateFromStrErr::WrongLength)?;
        let rank = chars.next().ok_or(CoordinateFromStrErr::WrongLength)?;
        if chars.next().is_some() {
            return Err(CoordinateFromStrErr::WrongLength);
        }
        let x = match file {
            'a'..='h' => file as i8 - 'a' as i8,
            _ => return Err(CoordinateFromStrErr::InvalidFile),
        };
        let z = match rank {
            '1'..='8' => rank as i8 - '1' as i8,
            _ => return Err(CoordinateFromStrErr::InvalidRank),
        };
        Ok(Coordinate { x, z })
    }
}

/// Shorthand for creating coordinates from their algebraic form.
///
/// This macro is just calling the [`FromStr`] instance of [`Coordinate`].
/// ```
/// # use cardchess::{coord, Coordinate};
/// assert_eq!(coord!("d4"), Coordinate::new(3, 3).unwrap());
/// ```
#[macro_export]
macro_rules! coord {
    ($s:literal) => {
        <$crate::Coordinate as std::str::FromStr>::from_str($s)
            .expect("Invalid cell given to coord! macro")
    };
}
// Lets the crate refer to the macro by path, as `crate::coord`
#[allow(unused_imports)]
pub(crate) use coord;
