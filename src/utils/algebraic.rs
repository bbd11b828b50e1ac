//! Square conversions for algebraic coordinates.
//!
//! Converts between human-readable coordinates (`E4`) and square indices.
//! Files are upper-case `A`..`H` and matched case-sensitively.

use crate::errors::ChessErrors;
use crate::game_state::chess_types::{Square, BOARD_SIZE};

/// Convert algebraic notation (for example: "E4") to a square index.
#[inline]
pub fn algebraic_to_square(square: &str) -> Result<Square, ChessErrors> {
    let bytes = square.as_bytes();
    if bytes.len() != 2 {
        return Err(ChessErrors::InvalidNotation(square.to_owned()));
    }

    let file = bytes[0];
    let rank = bytes[1];

    if !(b'A'..=b'H').contains(&file) || !(b'1'..=b'8').contains(&rank) {
        return Err(ChessErrors::InvalidNotation(square.to_owned()));
    }

    let file_index = file - b'A';
    let rank_index = rank - b'1';
    Ok(rank_index * 8 + file_index)
}

/// Convert a square index (`0..=63`) to algebraic notation (for example: "E4").
#[inline]
pub fn square_to_algebraic(square: Square) -> Result<String, ChessErrors> {
    if square as usize >= BOARD_SIZE {
        return Err(ChessErrors::InvalidNotation(square.to_string()));
    }

    let file = square % 8;
    let rank = square / 8;
    let file_char = char::from(b'A' + file);
    let rank_char = char::from(b'1' + rank);

    Ok(format!("{file_char}{rank_char}"))
}

/// Parse a move written as two squares, `"E2 E4"`, `"E2E4"` or `"E2-E4"`.
pub fn parse_move_text(text: &str) -> Result<(Square, Square), ChessErrors> {
    let compact: String = text
        .chars()
        .filter(|ch| !ch.is_whitespace() && *ch != '-')
        .collect();
    if compact.len() != 4 || !compact.is_ascii() {
        return Err(ChessErrors::InvalidNotation(text.to_owned()));
    }
    let (from, to) = compact.split_at(2);
    Ok((algebraic_to_square(from)?, algebraic_to_square(to)?))
}
