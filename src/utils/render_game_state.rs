//! Text renderers for diagnostics.
//!
//! Creates a framed board view and a flag summary for debugging, tests and
//! the command-line driver. Neither output is a stable format.

use crate::game_state::board::{Board, BoardMode};
use crate::game_state::chess_types::*;

/// Render the board as a framed grid of two-letter codes.
///
/// Each square prints its color code (`W`, `B`, or `x` when empty) followed
/// by its type code (`P N B R Q K`, or `x`). Rank 8 is printed first.
pub fn render_board(board: &Board) -> String {
    let mut out = String::new();

    out.push_str("  +-------------------------+\n");

    for (rank, row) in board.squares().chunks(8).enumerate().rev() {
        out.push(char::from(b'1' + rank as u8));
        out.push_str(" | ");

        for &square in row {
            let (color, kind) = square_codes(square);
            out.push(color);
            out.push(kind);
            out.push(' ');
        }

        out.push_str("|\n");
    }

    out.push_str("  +-------------------------+\n");
    out.push_str("    A  B  C  D  E  F  G  H");

    out
}

/// Turn, check and checkmate flags, and board mode, one per line.
pub fn render_state(board: &Board) -> String {
    let mode = match board.mode() {
        BoardMode::Live => "live",
        BoardMode::Probe => "probe",
    };
    format!(
        "turn: {}\nin_check: {}\ncheck_mate: {}\nmode: {}",
        board.turn(),
        board.is_in_check(),
        board.is_check_mate(),
        mode
    )
}

fn square_codes(piece: Option<Piece>) -> (char, char) {
    match piece {
        Some(piece) => (piece.color.code(), piece.kind.code()),
        None => ('x', 'x'),
    }
}
