//! Legal move enumeration.
//!
//! Tries every `(from, to)` pair for the side to move on a probe snapshot and
//! keeps the ones `make_move` accepts, so the result agrees with the move
//! executor by construction.

use crate::game_state::board::Board;
use crate::game_state::chess_types::*;
use crate::move_generation::move_kind::MoveKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LegalMove {
    pub from: Square,
    pub to: Square,
    pub kind: MoveKind,
    pub captured: Option<Piece>,
    pub gives_check: bool,
}

pub fn generate_legal_moves(board: &Board) -> Vec<LegalMove> {
    let mut legal = Vec::<LegalMove>::with_capacity(64);
    for from in 0..BOARD_SIZE as Square {
        collect_from(board, from, &mut legal);
    }
    legal
}

/// Legal destinations for the piece on `from`; empty if that square does not
/// hold a piece of the side to move.
pub fn legal_moves_from(board: &Board, from: Square) -> Vec<LegalMove> {
    let mut legal = Vec::<LegalMove>::new();
    collect_from(board, from, &mut legal);
    legal
}

fn collect_from(board: &Board, from: Square, out: &mut Vec<LegalMove>) {
    if !board
        .piece(from)
        .is_some_and(|piece| piece.color == board.turn())
    {
        return;
    }

    let probe = board.probe();
    for to in 0..BOARD_SIZE as Square {
        if to == from {
            continue;
        }
        let mut trial = probe.clone();
        if let Ok(outcome) = trial.make_move(from, to) {
            out.push(LegalMove {
                from,
                to,
                kind: outcome.kind,
                captured: outcome.captured,
                gives_check: outcome.gives_check,
            });
        }
    }
}
