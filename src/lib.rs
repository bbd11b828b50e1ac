//! Crate root module declarations for the chess rules engine.
//!
//! This file exposes the board state machine, move validation and check
//! detection, and the notation/rendering helpers so the command-line driver,
//! benches and external front ends can import stable module paths.

pub mod errors;

pub mod game_state {
    pub mod board;
    pub mod chess_rules;
    pub mod chess_types;
}

pub mod move_generation {
    pub mod check_detection;
    pub mod legal_move_generator;
    pub mod move_kind;
    pub mod move_validator;
}

pub mod utils {
    pub mod algebraic;
    pub mod placement_parser;
    pub mod render_game_state;
}

pub use errors::ChessErrors;
pub use game_state::board::{Board, BoardMode};
pub use game_state::chess_types::{Color, Piece, PieceKind, Square};
pub use move_generation::move_kind::{MoveKind, MoveOutcome};
