//! Attack probes, in-check detection and the checkmate search.
//!
//! Attack probes go through `MoveValidator::attacks`, which never mutates the
//! board. The checkmate search replays candidate moves on probe snapshots so
//! the live board is never touched and probes never recurse into another
//! checkmate search.

use crate::game_state::board::Board;
use crate::game_state::chess_types::*;
use crate::move_generation::move_validator::MoveValidator;

#[inline]
pub fn king_square(board: &Board, color: Color) -> Option<Square> {
    (0..BOARD_SIZE as Square).find(|&square| {
        board
            .piece(square)
            .is_some_and(|piece| piece.is(color, PieceKind::King))
    })
}

/// Whether any piece of `attacker_color` attacks `square`. Stops at the
/// first attacker found.
pub fn is_square_attacked(board: &Board, square: Square, attacker_color: Color) -> bool {
    let mut validator = MoveValidator::new(board);
    (0..BOARD_SIZE as Square).any(|from| {
        if !board
            .piece(from)
            .is_some_and(|piece| piece.color == attacker_color)
        {
            return false;
        }
        validator.set_positions(from, square);
        validator.attacks()
    })
}

/// Whether `color`'s king is attacked. A side without a king is never in
/// check.
#[inline]
pub fn is_king_in_check(board: &Board, color: Color) -> bool {
    let Some(king_sq) = king_square(board, color) else {
        return false;
    };
    is_square_attacked(board, king_sq, color.opposite())
}

/// Every square holding a piece of `attacker_color` that attacks `square`.
pub fn attackers_to_square(board: &Board, square: Square, attacker_color: Color) -> Vec<Square> {
    let mut validator = MoveValidator::new(board);
    (0..BOARD_SIZE as Square)
        .filter(|&from| {
            if !board
                .piece(from)
                .is_some_and(|piece| piece.color == attacker_color)
            {
                return false;
            }
            validator.set_positions(from, square);
            validator.attacks()
        })
        .collect()
}

/// Whether the side to move has at least one move that `make_move` accepts.
/// Each candidate is tried on a fresh probe snapshot; the first accepted one
/// ends the search.
pub fn has_escape(board: &Board) -> bool {
    let side = board.turn();
    let probe = board.probe();

    for from in 0..BOARD_SIZE as Square {
        if !board.piece(from).is_some_and(|piece| piece.color == side) {
            continue;
        }
        for to in 0..BOARD_SIZE as Square {
            if from == to {
                continue;
            }
            let mut trial = probe.clone();
            if trial.make_move(from, to).is_ok() {
                return true;
            }
        }
    }
    false
}

/// Checkmate holds when the side to move is in check and has no escape.
pub fn is_check_mate(board: &Board) -> bool {
    board.is_in_check() && !has_escape(board)
}
