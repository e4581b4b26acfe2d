use crate::{Board, Coordinate, BOARD_SIZE};

/// Draws the board as text, highest rank on top, with file and rank labels.
///
/// Pieces use the chess unicode symbols; empty cells are dots.
pub fn visualize_board(board: &Board) -> String {
    let files: String = (0..BOARD_SIZE)
        .map(|x| format!("{} ", (b'a' + x as u8) as char))
        .collect();
    let mut result = format!("    {}\n  ╭", files.trim_end());
    for _ in 0..BOARD_SIZE {
        result += "──";
    }
    result += "─╮\n";
    for z in (0..BOARD_SIZE).rev() {
        result += &format!("{} │", z + 1);
        for x in 0..BOARD_SIZE {
            let symbol = Coordinate::new(x, z)
                .ok()
                .and_then(|coord| board.entity_at(coord))
                .map_or('·', |e| e.kind.unicode_char(e.side));
            result.push(' ');
            result.push(symbol);
        }
        result += &format!(" │ {}\n", z + 1);
    }
    result += "  ╰";
    for _ in 0..BOARD_SIZE {
        result += "──";
    }
    result += "─╯\n    ";
    result += files.trim_end();
    result
}
