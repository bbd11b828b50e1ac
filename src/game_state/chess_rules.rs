//! Canonical chess-rule constants.
//!
//! Start layout, home squares and the fixed castle squares used by the
//! validator and the board.

use crate::game_state::chess_types::{Color, Square};

/// Standard starting layout as a FEN placement field (rank 8 first).
pub const STARTING_PLACEMENT: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR";

/// King home square for each side (`E1` / `E8`).
#[inline]
pub const fn king_home(color: Color) -> Square {
    match color {
        Color::White => 4,
        Color::Black => 60,
    }
}

/// Rank index pawns of `color` start on (rank 2 / rank 7).
#[inline]
pub const fn pawn_start_rank(color: Color) -> i8 {
    match color {
        Color::White => 1,
        Color::Black => 6,
    }
}

/// King-side castle: king target, rook origin, rook target.
#[inline]
pub const fn king_side_castle(color: Color) -> (Square, Square, Square) {
    let home = king_home(color);
    (home + 2, home + 3, home + 1)
}

/// Queen-side castle: king target, rook origin, rook target.
#[inline]
pub const fn queen_side_castle(color: Color) -> (Square, Square, Square) {
    let home = king_home(color);
    (home - 2, home - 4, home - 1)
}
