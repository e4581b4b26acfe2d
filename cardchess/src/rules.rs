use crate::{Board, Coordinate, PieceKind, Side};

const ORTHOGONAL: [(i8, i8); 4] = [(0, 1), (0, -1), (1, 0), (-1, 0)];
const DIAGONAL: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];
const KNIGHT_JUMPS: [(i8, i8); 8] = [
    (1, 2),
    (2, 1),
    (2, -1),
    (1, -2),
    (-1, -2),
    (-2, -1),
    (-2, 1),
    (-1, 2),
];

/// The cells the piece on `from` could move to, ignoring check.
///
/// This is advisory, used to highlight cells for a selected piece. Committing a
/// move does not consult it.
///
/// Pawns of the first side move towards higher `z`, pawns of the second side
/// towards lower `z`; a pawn on its starting rank may advance two cells.
/// Cells held by the mover's own side are never included.
pub fn candidate_moves(board: &Board, from: Coordinate) -> Vec<Coordinate> {
    let Some(piece) = board.entity_at(from) else {
        return Vec::new();
    };
    let side = piece.side;
    let mut moves = Vec::new();
    match piece.kind {
        PieceKind::Pawn => pawn_moves(board, from, side, &mut moves),
        PieceKind::Rook => slide(board, from, side, &ORTHOGONAL, &mut moves),
        PieceKind::Bishop => slide(board, from, side, &DIAGONAL, &mut moves),
        PieceKind::Queen => {
            slide(board, from, side, &ORTHOGONAL, &mut moves);
            slide(board, from, side, &DIAGONAL, &mut moves);
        }
        PieceKind::Knight => step(board, from, side, &KNIGHT_JUMPS, &mut moves),
        PieceKind::King => {
            step(board, from, side, &ORTHOGONAL, &mut moves);
            step(board, from, side, &DIAGONAL, &mut moves);
        }
    }
    moves
}

fn is_enemy(board: &Board, coord: Coordinate, side: Side) -> bool {
    board.entity_at(coord).is_some_and(|e| e.side != side)
}

fn pawn_moves(board: &Board, from: Coordinate, side: Side, moves: &mut Vec<Coordinate>) {
    let (dir, start_z) = match side {
        Side::First => (1, 1),
        Side::Second => (-1, 6),
    };
    if let Some(one) = from.offset(0, dir).filter(|&c| board.entity_at(c).is_none()) {
        moves.push(one);
        if from.z() == start_z {
            if let Some(two) = one.offset(0, dir).filter(|&c| board.entity_at(c).is_none()) {
                moves.push(two);
            }
        }
    }
    for dx in [-1, 1] {
        if let Some(target) = from.offset(dx, dir).filter(|&c| is_enemy(board, c, side)) {
            moves.push(target);
        }
    }
}

// Rays stop at the first occupied cell, which is included if it holds an enemy.
fn slide(board: &Board, from: Coordinate, side: Side, dirs: &[(i8, i8)], moves: &mut Vec<Coordinate>) {
    for &(dx, dz) in dirs {
        let mut cursor = from;
        while let Some(next) = cursor.offset(dx, dz) {
            match board.entity_at(next) {
                None => moves.push(next),
                Some(e) => {
                    if e.side != side {
                        moves.push(next);
                    }
                    break;
                }
            }
            cursor = next;
        }
    }
}

fn step(board: &Board, from: Coordinate, side: Side, offsets: &[(i8, i8)], moves: &mut Vec<Coordinate>) {
    for &(dx, dz) in offsets {
        if let Some(target) = from.offset(dx, dz) {
            if board.entity_at(target).map_or(true, |e| e.side != side) {
                moves.push(target);
            }
        }
    }
}
