//! Move legality checks.
//!
//! A `MoveValidator` is bound by reference to one `Board` and one from/to
//! pair. It classifies the move (regular, castle, en-passant) and verifies
//! piece-movement rules. It never mutates the board, so the same routines
//! serve real move attempts and the attack probes used by check detection.

use crate::errors::{ChessErrors, PositionRejection};
use crate::game_state::board::Board;
use crate::game_state::chess_rules::{
    king_home, king_side_castle, pawn_start_rank, queen_side_castle,
};
use crate::game_state::chess_types::*;
use crate::move_generation::move_kind::MoveKind;

pub struct MoveValidator<'a> {
    board: &'a Board,
    from: Square,
    to: Square,
    diff: i16,
}

impl<'a> MoveValidator<'a> {
    pub fn new(board: &'a Board) -> Self {
        Self {
            board,
            from: 0,
            to: 0,
            diff: 0,
        }
    }

    /// Shorthand for `new` followed by `set_positions`.
    pub fn bound(board: &'a Board, from: Square, to: Square) -> Self {
        let mut validator = Self::new(board);
        validator.set_positions(from, to);
        validator
    }

    pub fn set_positions(&mut self, from: Square, to: Square) {
        self.from = from;
        self.to = to;
        self.diff = i16::from(to) - i16::from(from);
    }

    /// Sorts the move into its category. Castling and en-passant are detected
    /// by their own predicates; everything else must pass `verify`.
    pub fn classify(&self) -> Result<MoveKind, ChessErrors> {
        if let Some(kind) = self.castling() {
            return Ok(kind);
        }
        if let Some(kind) = self.en_passant() {
            return Ok(kind);
        }
        self.verify()?;
        Ok(MoveKind::Regular)
    }

    /// Castle variant if the king on `from` may castle onto `to`.
    pub fn castling(&self) -> Option<MoveKind> {
        let king = self.board.piece(self.from)?;
        if king.kind != PieceKind::King || king.has_moved || self.from != king_home(king.color) {
            return None;
        }

        let (_, rook_from, rook_to) = [king_side_castle(king.color), queen_side_castle(king.color)]
            .into_iter()
            .find(|(king_to, _, _)| *king_to == self.to)?;

        let (low, high) = if rook_from < self.from {
            (rook_from, self.from)
        } else {
            (self.from, rook_from)
        };
        if (low + 1..high).any(|square| self.board.piece(square).is_some()) {
            return None;
        }

        let rook = self.board.piece(rook_from)?;
        if !rook.is(king.color, PieceKind::Rook) || rook.has_moved {
            return None;
        }

        Some(MoveKind::Castle { rook_from, rook_to })
    }

    /// En-passant variant if the pawn on `from` may capture onto the empty
    /// `to` square, taking the pawn that double-stepped past it last ply.
    pub fn en_passant(&self) -> Option<MoveKind> {
        let pawn = self.board.piece(self.from)?;
        if pawn.kind != PieceKind::Pawn || self.to as usize >= BOARD_SIZE {
            return None;
        }
        if self.board.piece(self.to).is_some() {
            return None;
        }

        let (d_file, d_rank) = self.deltas();
        if d_file.abs() != 1 || d_rank != pawn.color.forward() {
            return None;
        }

        let captured = square_at(file_of(self.to), rank_of(self.from))?;
        let victim = self.board.piece(captured)?;
        if !victim.is(pawn.color.opposite(), PieceKind::Pawn) {
            return None;
        }
        if self.board.last_double_step() != Some(captured) {
            return None;
        }

        Some(MoveKind::EnPassant { captured })
    }

    /// Full movement check for a regular move.
    pub fn verify(&self) -> Result<(), ChessErrors> {
        if self.from as usize >= BOARD_SIZE || self.to as usize >= BOARD_SIZE {
            return Err(self.reject(PositionRejection::OffBoard));
        }

        let piece = self
            .board
            .piece(self.from)
            .ok_or_else(|| self.reject(PositionRejection::NoPiece))?;
        let target = self.board.piece(self.to);

        if target.is_some_and(|t| t.color == piece.color) {
            return Err(self.reject(PositionRejection::SameColorCapture));
        }

        if !piece.kind.jumps() && !self.path_is_clear() {
            return Err(self.reject(PositionRejection::PathBlocked));
        }

        match self.shape_error(piece, target.is_some()) {
            Some(reason) => Err(self.reject(reason)),
            None => Ok(()),
        }
    }

    /// Whether the piece on `from` attacks `to`, regardless of what stands
    /// there. Pawns attack diagonally even onto empty squares.
    pub fn attacks(&self) -> bool {
        if self.from as usize >= BOARD_SIZE || self.to as usize >= BOARD_SIZE || self.from == self.to
        {
            return false;
        }
        let Some(piece) = self.board.piece(self.from) else {
            return false;
        };

        if piece.kind == PieceKind::Pawn {
            let (d_file, d_rank) = self.deltas();
            return d_file.abs() == 1 && d_rank == piece.color.forward();
        }

        (piece.kind.jumps() || self.path_is_clear()) && self.shape_error(piece, true).is_none()
    }

    fn shape_error(&self, piece: Piece, occupied: bool) -> Option<PositionRejection> {
        let (d_file, d_rank) = self.deltas();
        let forward = piece.color.forward();

        let legal = match piece.kind {
            PieceKind::Pawn if occupied => d_file.abs() == 1 && d_rank == forward,
            PieceKind::Pawn => {
                d_file == 0
                    && (d_rank == forward
                        || (d_rank == 2 * forward
                            && rank_of(self.from) == pawn_start_rank(piece.color)))
            }
            PieceKind::Knight => matches!((d_file.abs(), d_rank.abs()), (1, 2) | (2, 1)),
            PieceKind::Bishop => self.is_diagonal(),
            PieceKind::Rook => self.is_straight(),
            PieceKind::Queen => self.is_diagonal() || self.is_straight(),
            PieceKind::King => self.diff != 0 && d_file.abs() <= 1 && d_rank.abs() <= 1,
        };

        if legal {
            return None;
        }

        Some(match piece.kind {
            PieceKind::Pawn if occupied => PositionRejection::PawnCapture,
            PieceKind::Pawn => PositionRejection::PawnAdvance,
            PieceKind::Knight => PositionRejection::KnightJump,
            PieceKind::Bishop => PositionRejection::BishopDiagonal,
            PieceKind::Rook => PositionRejection::RookLine,
            PieceKind::Queen => PositionRejection::QueenLine,
            PieceKind::King => PositionRejection::KingStep,
        })
    }

    /// Equal file and rank deltas. An offset of 7 or 9 that wraps around an
    /// edge changes shade and fails this test.
    fn is_diagonal(&self) -> bool {
        let (d_file, d_rank) = self.deltas();
        let diagonal = d_file != 0 && d_file.abs() == d_rank.abs();
        debug_assert!(!diagonal || square_shade(self.from) == square_shade(self.to));
        diagonal
    }

    fn is_straight(&self) -> bool {
        let (d_file, d_rank) = self.deltas();
        self.diff != 0 && (d_file == 0 || d_rank == 0)
    }

    /// Per-square index step along the move's rank, file or diagonal.
    fn line_step(&self) -> Option<i16> {
        let (d_file, d_rank) = self.deltas();
        if self.diff == 0 {
            return None;
        }
        if d_file == 0 || d_rank == 0 || d_file.abs() == d_rank.abs() {
            Some(i16::from(d_rank.signum()) * 8 + i16::from(d_file.signum()))
        } else {
            None
        }
    }

    /// Every square strictly between `from` and `to` is empty. Moves that
    /// follow no line are left for the shape check to reject.
    fn path_is_clear(&self) -> bool {
        let Some(step) = self.line_step() else {
            return true;
        };

        let to = i16::from(self.to);
        let mut square = i16::from(self.from) + step;
        while square != to {
            if self.board.piece(square as Square).is_some() {
                return false;
            }
            square += step;
        }
        true
    }

    #[inline]
    fn deltas(&self) -> (i8, i8) {
        (
            file_of(self.to) - file_of(self.from),
            rank_of(self.to) - rank_of(self.from),
        )
    }

    fn reject(&self, reason: PositionRejection) -> ChessErrors {
        ChessErrors::IllegalPosition {
            from: self.from,
            to: self.to,
            reason,
        }
    }
}
