use crate::game_state::chess_types::{Piece, Square};

/// Category a move attempt falls into once classified. Each category has its
/// own legality predicate and its own commit routine in `Board::apply`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveKind {
    Regular,
    Castle { rook_from: Square, rook_to: Square },
    EnPassant { captured: Square },
}

/// What an accepted move did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveOutcome {
    pub from: Square,
    pub to: Square,
    pub kind: MoveKind,
    pub captured: Option<Piece>,
    pub gives_check: bool,
    pub gives_mate: bool,
}
