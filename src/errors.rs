//! Errors used throughout the rules engine.
//!
//! `ChessErrors` is the single error type returned by board mutation, move
//! validation, notation parsing and position setup. Every rejection is
//! recoverable: the board is guaranteed unchanged when any of these variants
//! is returned from `Board::make_move`.
//!
//! Usage guidelines:
//! - Parsing variants (`InvalidNotation`, `InvalidPlacement`, `IllegalType`)
//!   are raised before any board state is touched and are suitable for showing
//!   to end users verbatim.
//! - `IllegalMove` covers structural preconditions (bounds, empty source,
//!   turn order); `IllegalPosition` covers piece-movement rules.
//! - `SelfCheck` and `StillInCheck` are raised only after the tentative move
//!   has been rolled back.

use crate::game_state::chess_types::Square;

/// Unified error type for the rules engine.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ChessErrors {
    /// Malformed algebraic square (wrong length, file outside `A`..`H`, rank
    /// outside `1`..`8`).
    ///
    /// Payload: the offending input.
    #[error("invalid notation: {0:?}")]
    InvalidNotation(String),

    /// A structural precondition of the move was violated.
    #[error("illegal move {from} -> {to}: {reason}")]
    IllegalMove {
        from: Square,
        to: Square,
        reason: MoveRejection,
    },

    /// The piece on `from` cannot legally reach `to`.
    #[error("illegal position {from} -> {to}: {reason}")]
    IllegalPosition {
        from: Square,
        to: Square,
        reason: PositionRejection,
    },

    /// The move would expose the mover's own king.
    #[error("move {from} -> {to} puts own king in check")]
    SelfCheck { from: Square, to: Square },

    /// The mover was in check and the move does not resolve it.
    #[error("move {from} -> {to} leaves own king in check")]
    StillInCheck { from: Square, to: Square },

    /// The side to move is checkmated; no further moves are accepted.
    #[error("game over: side to move is checkmated")]
    GameOver,

    /// A piece type code outside the known set.
    ///
    /// Payload: the offending character.
    #[error("illegal piece type code {0:?}")]
    IllegalType(char),

    /// A board placement field could not be parsed.
    #[error("invalid placement: {0}")]
    InvalidPlacement(String),
}

/// Why a move failed its structural preconditions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum MoveRejection {
    #[error("square outside the board")]
    OutOfBounds,
    #[error("source square is empty")]
    EmptySource,
    #[error("piece does not belong to the side to move")]
    WrongTurn,
}

/// Which movement rule a move broke.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum PositionRejection {
    #[error("square outside the board")]
    OffBoard,
    #[error("no piece on the source square")]
    NoPiece,
    #[error("cannot capture a piece of the same color")]
    SameColorCapture,
    #[error("a piece is blocking the path")]
    PathBlocked,
    #[error("pawn can only advance one square, or two from its start rank, onto empty squares")]
    PawnAdvance,
    #[error("pawn can only capture one square diagonally forward")]
    PawnCapture,
    #[error("knight must jump two squares one way and one the other")]
    KnightJump,
    #[error("bishop can only move diagonally")]
    BishopDiagonal,
    #[error("rook can only move along a rank or file")]
    RookLine,
    #[error("queen can only move along a rank, file or diagonal")]
    QueenLine,
    #[error("king can only move one square")]
    KingStep,
    #[error("cannot castle out of check")]
    CastleOutOfCheck,
    #[error("king cannot castle through an attacked square")]
    CastleThroughCheck,
}
