use quickcheck::{Arbitrary, Gen};

use crate::{Coordinate, Entity, PieceKind, Side};

/// One step of a random board workout.
#[derive(Clone, Debug)]
pub enum BoardOp {
    Place(Entity, Coordinate),
    Remove(Coordinate),
    Move(Coordinate, Coordinate),
}

impl Arbitrary for BoardOp {
    fn arbitrary(g: &mut Gen) -> Self {
        // Placing more often than removing, so that boards fill up
        match u8::arbitrary(g) % 4 {
            0 | 1 => BoardOp::Place(Entity::arbitrary(g), Coordinate::arbitrary(g)),
            2 => BoardOp::Remove(Coordinate::arbitrary(g)),
            _ => BoardOp::Move(Coordinate::arbitrary(g), Coordinate::arbitrary(g)),
        }
    }
}

impl Arbitrary for Coordinate {
    fn arbitrary(g: &mut Gen) -> Self {
        Coordinate::from_index(usize::from(u8::arbitrary(g) % 64))
    }

    fn shrink(&self) -> Box<dyn Iterator<Item = Self>> {
        // Towards a1
        let coord = *self;
        Box::new(
            [coord.offset(-1, 0), coord.offset(0, -1)]
                .into_iter()
                .flatten(),
        )
    }
}

impl Arbitrary for PieceKind {
    fn arbitrary(g: &mut Gen) -> Self {
        *g.choose(&PieceKind::ALL).unwrap()
    }
}

impl Arbitrary for Side {
    fn arbitrary(g: &mut Gen) -> Self {
        *g.choose(&[Side::First, Side::Second]).unwrap()
    }
}

impl Arbitrary for Entity {
    fn arbitrary(g: &mut Gen) -> Self {
        Entity::new(
            PieceKind::arbitrary(g),
            Side::arbitrary(g),
            Coordinate::arbitrary(g),
        )
    }
}
