use ratatui::style::Color;
use crate::constants::{BOARD_WIDTH, BOARD_HEIGHT};
use crate::game::piece::{ActivePiece, Shape};

#[derive(Clone, Copy, PartialEq, Debug)]
pub enum Cell {
    Empty,
    Filled(Color),
}

pub type Board = [[Cell; BOARD_WIDTH]; BOARD_HEIGHT];

pub fn empty_board() -> Board {
    [[Cell::Empty; BOARD_WIDTH]; BOARD_HEIGHT]
}

/// Returns true when `shape` placed at (`x`, `y`) leaves the side walls, drops
/// below the floor, or lands on a filled cell. Rows above the board are only
/// bounds-checked horizontally so pieces may spawn partly off-screen.
pub fn collides(shape: &Shape, x: i32, y: i32, board: &Board) -> bool {
    for (i, row) in shape.iter().enumerate() {
        for (j, &cell) in row.iter().enumerate() {
            if !cell {
                continue;
            }
            let bx = x + j as i32;
            let by = y + i as i32;
            if bx < 0 || bx >= BOARD_WIDTH as i32 || by >= BOARD_HEIGHT as i32 {
                return true;
            }
            if by >= 0 && board[by as usize][bx as usize] != Cell::Empty {
                return true;
            }
        }
    }
    false
}

/// Writes the piece into the board, then clears full rows.
pub fn lock(active: &ActivePiece, mut board: Board) -> (Board, u32) {
    for (x, y) in active.get_blocks() {
        if y >= 0 && y < BOARD_HEIGHT as i32 && x >= 0 && x < BOARD_WIDTH as i32 {
            board[y as usize][x as usize] = Cell::Filled(active.piece.color);
        }
    }
    clear_lines(board)
}

/// Drops every full row, keeps the rest in order, and pads the top with as
/// many empty rows as were removed.
pub fn clear_lines(mut board: Board) -> (Board, u32) {
    let mut lines_cleared = 0;
    let mut write_row = BOARD_HEIGHT;

    // Start from bottom and work up, copying non-full rows down
    for read_row in (0..BOARD_HEIGHT).rev() {
        if board[read_row].iter().all(|&cell| cell != Cell::Empty) {
            lines_cleared += 1;
        } else {
            write_row -= 1;
            board[write_row] = board[read_row];
        }
    }

    for row in board.iter_mut().take(write_row) {
        *row = [Cell::Empty; BOARD_WIDTH];
    }

    (board, lines_cleared)
}
