//! Board state and the top-level move executor.
//!
//! `Board` owns the square array, the side to move, the check and checkmate
//! flags, and the single-ply en-passant record. `make_move` classifies a move
//! through `MoveValidator`, applies it, rolls it back if it leaves the mover's
//! king attacked, and otherwise commits it and re-derives check state for the
//! new side to move.

use std::fmt;

use crate::errors::{ChessErrors, MoveRejection, PositionRejection};
use crate::game_state::chess_types::*;
use crate::move_generation::check_detection::{
    has_escape, is_check_mate, is_king_in_check, is_square_attacked,
};
use crate::move_generation::legal_move_generator::{generate_legal_moves, LegalMove};
use crate::move_generation::move_kind::{MoveKind, MoveOutcome};
use crate::move_generation::move_validator::MoveValidator;
use crate::utils::algebraic::algebraic_to_square;
use crate::utils::placement_parser::parse_placement;
use crate::utils::render_game_state::{render_board, render_state};

/// Whether a board is the real game or a throwaway snapshot used to try
/// candidate moves. Probe boards never run the checkmate search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardMode {
    Live,
    Probe,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    squares: [Option<Piece>; BOARD_SIZE],
    turn: Color,
    in_check: bool,
    check_mate: bool,
    mode: BoardMode,
    // Square of the pawn that double-stepped on the previous ply.
    last_double_step: Option<Square>,
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// A live board in the standard starting position, White to move.
    pub fn new() -> Self {
        const BACK_RANK: [PieceKind; 8] = [
            PieceKind::Rook,
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Queen,
            PieceKind::King,
            PieceKind::Bishop,
            PieceKind::Knight,
            PieceKind::Rook,
        ];

        let mut squares = [None; BOARD_SIZE];
        for (file, kind) in BACK_RANK.into_iter().enumerate() {
            squares[file] = Some(Piece::new(Color::White, kind));
            squares[8 + file] = Some(Piece::new(Color::White, PieceKind::Pawn));
            squares[48 + file] = Some(Piece::new(Color::Black, PieceKind::Pawn));
            squares[56 + file] = Some(Piece::new(Color::Black, kind));
        }

        Self {
            squares,
            turn: Color::White,
            in_check: false,
            check_mate: false,
            mode: BoardMode::Live,
            last_double_step: None,
        }
    }

    /// A live board from a FEN placement field with `turn` to move. Check and
    /// checkmate are derived for the side to move.
    ///
    /// Every parsed piece starts unmoved, so a king and rook on their home
    /// squares keep castling rights. The placement field cannot revoke them.
    pub fn from_placement(placement: &str, turn: Color) -> Result<Self, ChessErrors> {
        let mut board = Self {
            squares: parse_placement(placement)?,
            turn,
            in_check: false,
            check_mate: false,
            mode: BoardMode::Live,
            last_double_step: None,
        };
        board.refresh_status();
        Ok(board)
    }

    /// Back to the starting position.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Snapshot for trying candidate moves. Shares nothing with `self`.
    pub fn probe(&self) -> Self {
        Self {
            squares: self.squares,
            turn: self.turn,
            in_check: self.in_check,
            check_mate: self.check_mate,
            mode: BoardMode::Probe,
            last_double_step: self.last_double_step,
        }
    }

    #[inline]
    pub fn piece(&self, square: Square) -> Option<Piece> {
        self.squares.get(square as usize).copied().flatten()
    }

    #[inline]
    pub fn squares(&self) -> &[Option<Piece>; BOARD_SIZE] {
        &self.squares
    }

    #[inline]
    pub fn turn(&self) -> Color {
        self.turn
    }

    /// Whether the side to move is in check.
    #[inline]
    pub fn is_in_check(&self) -> bool {
        self.in_check
    }

    /// Whether the side to move is checkmated.
    #[inline]
    pub fn is_check_mate(&self) -> bool {
        self.check_mate
    }

    #[inline]
    pub fn mode(&self) -> BoardMode {
        self.mode
    }

    #[inline]
    pub fn last_double_step(&self) -> Option<Square> {
        self.last_double_step
    }

    /// True on the ply right after a two-square pawn advance.
    #[inline]
    pub fn en_passant_available(&self) -> bool {
        self.last_double_step.is_some()
    }

    /// Side to move is not in check but has no legal move.
    pub fn is_stalemate(&self) -> bool {
        !self.in_check && !has_escape(self)
    }

    pub fn legal_moves(&self) -> Vec<LegalMove> {
        generate_legal_moves(self)
    }

    pub fn state_summary(&self) -> String {
        render_state(self)
    }

    /// `make_move` with algebraic squares (`"E2"`, `"E4"`). Both squares are
    /// parsed before the board is touched.
    pub fn make_move_notation(&mut self, from: &str, to: &str) -> Result<MoveOutcome, ChessErrors> {
        let from = algebraic_to_square(from)?;
        let to = algebraic_to_square(to)?;
        self.make_move(from, to)
    }

    /// Moves the piece on `from` to `to` if the move is legal for the side to
    /// move. On any error the board is left exactly as it was.
    pub fn make_move(&mut self, from: Square, to: Square) -> Result<MoveOutcome, ChessErrors> {
        if self.check_mate {
            return Err(ChessErrors::GameOver);
        }
        if from as usize >= BOARD_SIZE || to as usize >= BOARD_SIZE {
            return Err(illegal_move(from, to, MoveRejection::OutOfBounds));
        }

        let piece = self
            .piece(from)
            .ok_or_else(|| illegal_move(from, to, MoveRejection::EmptySource))?;
        if piece.color != self.turn {
            return Err(illegal_move(from, to, MoveRejection::WrongTurn));
        }

        let kind = MoveValidator::bound(self, from, to).classify()?;
        if let MoveKind::Castle { .. } = kind {
            self.check_castle_path(from, to)?;
        }

        let before = self.squares;
        let captured = self.apply(from, to, kind);

        if is_king_in_check(self, piece.color) {
            self.squares = before;
            return Err(if self.in_check {
                ChessErrors::StillInCheck { from, to }
            } else {
                ChessErrors::SelfCheck { from, to }
            });
        }

        let double_step = piece.kind == PieceKind::Pawn && from.abs_diff(to) == 16;
        self.last_double_step = double_step.then_some(to);
        self.turn = self.turn.opposite();
        self.refresh_status();

        Ok(MoveOutcome {
            from,
            to,
            kind,
            captured,
            gives_check: self.in_check,
            gives_mate: self.check_mate,
        })
    }

    /// The king may not castle out of check or across an attacked square.
    fn check_castle_path(&self, from: Square, to: Square) -> Result<(), ChessErrors> {
        let reject = |reason| ChessErrors::IllegalPosition { from, to, reason };
        if self.in_check {
            return Err(reject(PositionRejection::CastleOutOfCheck));
        }
        let crossed = (from + to) / 2;
        if is_square_attacked(self, crossed, self.turn.opposite()) {
            return Err(reject(PositionRejection::CastleThroughCheck));
        }
        Ok(())
    }

    /// Relocates pieces for a classified move and returns what was captured.
    fn apply(&mut self, from: Square, to: Square, kind: MoveKind) -> Option<Piece> {
        match kind {
            MoveKind::Regular => {
                let captured = self.squares[to as usize].take();
                self.relocate(from, to);
                captured
            }
            MoveKind::Castle { rook_from, rook_to } => {
                self.relocate(from, to);
                self.relocate(rook_from, rook_to);
                None
            }
            MoveKind::EnPassant { captured } => {
                let taken = self.squares[captured as usize].take();
                self.relocate(from, to);
                taken
            }
        }
    }

    #[inline]
    fn relocate(&mut self, from: Square, to: Square) {
        self.squares[to as usize] = self.squares[from as usize].take().map(Piece::moved);
    }

    fn refresh_status(&mut self) {
        self.update_in_check();
        self.update_check_mate();
    }

    fn update_in_check(&mut self) {
        self.in_check = is_king_in_check(self, self.turn);
    }

    fn update_check_mate(&mut self) {
        self.check_mate = self.mode == BoardMode::Live && is_check_mate(self);
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&render_board(self))
    }
}

fn illegal_move(from: Square, to: Square, reason: MoveRejection) -> ChessErrors {
    ChessErrors::IllegalMove { from, to, reason }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::seq::IndexedRandom;
    use rand::{Rng, SeedableRng};

    use super::*;
    use crate::game_state::chess_rules::STARTING_PLACEMENT;

    fn play(board: &mut Board, moves: &[(Square, Square)]) {
        for &(from, to) in moves {
            board
                .make_move(from, to)
                .unwrap_or_else(|e| panic!("{from}->{to} should be legal: {e}"));
        }
    }

    fn position_reason(result: Result<MoveOutcome, ChessErrors>) -> PositionRejection {
        match result {
            Err(ChessErrors::IllegalPosition { reason, .. }) => reason,
            other => panic!("expected IllegalPosition, got {other:?}"),
        }
    }

    #[test]
    fn new_board_is_live_with_white_to_move() {
        let board = Board::new();
        assert_eq!(board.turn(), Color::White);
        assert_eq!(board.mode(), BoardMode::Live);
        assert!(!board.is_in_check());
        assert!(!board.is_check_mate());
        assert!(!board.en_passant_available());
        assert_eq!(
            Board::from_placement(STARTING_PLACEMENT, Color::White)
                .expect("start placement should parse"),
            board
        );
    }

    #[test]
    fn structural_preconditions_fail_fast() {
        let mut board = Board::new();
        assert_eq!(
            board.make_move(20, 28),
            Err(ChessErrors::IllegalMove {
                from: 20,
                to: 28,
                reason: MoveRejection::EmptySource
            })
        );
        assert_eq!(
            board.make_move(52, 44),
            Err(ChessErrors::IllegalMove {
                from: 52,
                to: 44,
                reason: MoveRejection::WrongTurn
            })
        );
        assert_eq!(
            board.make_move(12, 64),
            Err(ChessErrors::IllegalMove {
                from: 12,
                to: 64,
                reason: MoveRejection::OutOfBounds
            })
        );
        assert_eq!(board, Board::new());
    }

    #[test]
    fn regular_move_relocates_and_flags_piece() {
        let mut board = Board::new();
        let outcome = board.make_move(6, 21).expect("Ng1-f3 should be legal");
        assert_eq!(outcome.kind, MoveKind::Regular);
        assert_eq!(outcome.captured, None);
        assert_eq!(board.piece(6), None);
        let knight = board.piece(21).expect("knight should be on F3");
        assert!(knight.is(Color::White, PieceKind::Knight));
        assert!(knight.has_moved);
        assert_eq!(board.turn(), Color::Black);
    }

    #[test]
    fn notation_moves_reject_bad_squares_before_touching_state() {
        let mut board = Board::new();
        assert_eq!(
            board.make_move_notation("E2", "E9"),
            Err(ChessErrors::InvalidNotation("E9".to_owned()))
        );
        assert_eq!(
            board.make_move_notation("e2", "E4"),
            Err(ChessErrors::InvalidNotation("e2".to_owned()))
        );
        assert_eq!(board, Board::new());
        board
            .make_move_notation("E2", "E4")
            .expect("E2-E4 should be legal");
        assert!(board.piece(28).is_some());
    }

    #[test]
    fn rook_path_is_blocked_by_own_pawn() {
        let mut board = Board::new();
        assert_eq!(position_reason(board.make_move(0, 16)), PositionRejection::PathBlocked);
        assert_eq!(position_reason(board.make_move(0, 24)), PositionRejection::PathBlocked);
        assert_eq!(board, Board::new());
    }

    #[test]
    fn en_passant_is_legal_only_on_the_next_ply() {
        let setup = [(10, 26), (48, 40), (26, 34), (51, 35)];

        let mut board = Board::new();
        play(&mut board, &setup);
        assert_eq!(board.last_double_step(), Some(35));
        assert!(board.en_passant_available());
        let outcome = board.make_move(34, 43).expect("c5xd6 e.p. should be legal");
        assert_eq!(outcome.kind, MoveKind::EnPassant { captured: 35 });
        assert!(outcome
            .captured
            .is_some_and(|p| p.is(Color::Black, PieceKind::Pawn)));
        assert_eq!(board.piece(35), None);
        assert_eq!(board.piece(34), None);
        assert!(board
            .piece(43)
            .is_some_and(|p| p.is(Color::White, PieceKind::Pawn)));

        let mut late = Board::new();
        play(&mut late, &setup);
        play(&mut late, &[(8, 16), (40, 32)]);
        assert!(!late.en_passant_available());
        let before = late.clone();
        assert_eq!(position_reason(late.make_move(34, 43)), PositionRejection::PawnAdvance);
        assert_eq!(late, before);
    }

    #[test]
    fn en_passant_requires_the_pawn_that_just_double_stepped() {
        // Black's E-pawn double-stepped long ago; the last double step was on H.
        let mut board = Board::from_placement("4k3/8/8/3Pp3/8/8/7P/4K3", Color::White)
            .expect("placement should parse");
        play(&mut board, &[(15, 31), (60, 59)]);
        assert_eq!(position_reason(board.make_move(35, 44)), PositionRejection::PawnAdvance);
    }

    #[test]
    fn black_en_passant_removes_the_pawn_above_the_target() {
        let mut board = Board::from_placement("4k3/8/8/8/3p4/8/4P3/4K3", Color::White)
            .expect("placement should parse");
        play(&mut board, &[(12, 28)]);
        assert_eq!(board.last_double_step(), Some(28));

        let outcome = board.make_move(27, 20).expect("d4xe3 e.p. should be legal");
        assert_eq!(outcome.kind, MoveKind::EnPassant { captured: 28 });
        assert!(outcome
            .captured
            .is_some_and(|p| p.is(Color::White, PieceKind::Pawn)));
        assert_eq!(board.piece(28), None);
        assert_eq!(board.piece(27), None);
        assert!(board
            .piece(20)
            .is_some_and(|p| p.is(Color::Black, PieceKind::Pawn)));
    }

    #[test]
    fn placed_king_and_rook_on_home_squares_may_castle() {
        let mut board = Board::from_placement("4k3/8/8/8/8/8/8/4K2R", Color::White)
            .expect("placement should parse");
        let outcome = board.make_move(4, 6).expect("O-O should be legal");
        assert_eq!(
            outcome.kind,
            MoveKind::Castle {
                rook_from: 7,
                rook_to: 5
            }
        );
    }

    #[test]
    fn en_passant_exposing_the_king_restores_both_pawns() {
        // Both pawns leave the fifth rank, opening it between the H5 rook and the A5 king.
        let mut board = Board::from_placement("4k3/2p5/8/KP5r/8/8/8/8", Color::Black)
            .expect("placement should parse");
        play(&mut board, &[(50, 34)]);
        let before = board.clone();

        assert_eq!(
            board.make_move(33, 42),
            Err(ChessErrors::SelfCheck { from: 33, to: 42 })
        );
        assert_eq!(board, before);
        assert!(board
            .piece(34)
            .is_some_and(|p| p.is(Color::Black, PieceKind::Pawn)));
        assert!(board.en_passant_available());
    }

    #[test]
    fn castling_moves_king_and_rook_together() {
        let mut board = Board::new();
        play(
            &mut board,
            &[(12, 28), (52, 36), (6, 21), (57, 42), (5, 26), (62, 45)],
        );
        let outcome = board.make_move(4, 6).expect("O-O should be legal");
        assert_eq!(
            outcome.kind,
            MoveKind::Castle {
                rook_from: 7,
                rook_to: 5
            }
        );
        assert!(board.piece(6).is_some_and(|p| p.is(Color::White, PieceKind::King)));
        assert!(board.piece(5).is_some_and(|p| p.is(Color::White, PieceKind::Rook)));
        assert_eq!(board.piece(4), None);
        assert_eq!(board.piece(7), None);
        assert_eq!(board.turn(), Color::Black);
    }

    #[test]
    fn castling_after_rook_moved_is_a_plain_king_step() {
        let mut board = Board::new();
        play(
            &mut board,
            &[
                (12, 28),
                (52, 36),
                (6, 21),
                (57, 42),
                (5, 26),
                (62, 45),
                (7, 6),
                (48, 40),
                (6, 7),
                (40, 32),
            ],
        );
        let before = board.clone();
        assert_eq!(position_reason(board.make_move(4, 6)), PositionRejection::KingStep);
        assert_eq!(board, before);
    }

    #[test]
    fn queen_side_castle_for_black() {
        let mut board = Board::from_placement("r3k3/8/8/8/8/8/8/4K3", Color::Black)
            .expect("placement should parse");
        board.make_move(60, 58).expect("O-O-O should be legal");
        assert!(board.piece(58).is_some_and(|p| p.is(Color::Black, PieceKind::King)));
        assert!(board.piece(59).is_some_and(|p| p.is(Color::Black, PieceKind::Rook)));
        assert_eq!(board.piece(56), None);
    }

    #[test]
    fn castling_out_of_or_through_check_is_rejected() {
        let mut checked = Board::from_placement("4r2k/8/8/8/8/8/8/4K2R", Color::White)
            .expect("placement should parse");
        assert!(checked.is_in_check());
        assert_eq!(
            position_reason(checked.make_move(4, 6)),
            PositionRejection::CastleOutOfCheck
        );

        let mut crossed = Board::from_placement("5r1k/8/8/8/8/8/8/4K2R", Color::White)
            .expect("placement should parse");
        let before = crossed.clone();
        assert_eq!(
            position_reason(crossed.make_move(4, 6)),
            PositionRejection::CastleThroughCheck
        );
        assert_eq!(crossed, before);
    }

    #[test]
    fn castling_into_check_is_self_check() {
        let mut board = Board::from_placement("6rk/8/8/8/8/8/8/4K2R", Color::White)
            .expect("placement should parse");
        assert_eq!(
            board.make_move(4, 6),
            Err(ChessErrors::SelfCheck { from: 4, to: 6 })
        );
        assert!(board.piece(4).is_some_and(|p| !p.has_moved));
        assert!(board.piece(7).is_some_and(|p| !p.has_moved));
    }

    #[test]
    fn fools_mate_ends_the_game() {
        let mut board = Board::new();
        play(&mut board, &[(13, 21), (52, 36), (14, 30)]);
        let outcome = board.make_move(59, 31).expect("Qd8-h4 should be legal");
        assert!(outcome.gives_check);
        assert!(outcome.gives_mate);
        assert_eq!(board.turn(), Color::White);
        assert!(board.is_in_check());
        assert!(board.is_check_mate());
        assert!(!board.is_stalemate());
        assert!(board.legal_moves().is_empty());

        let before = board.clone();
        assert_eq!(board.make_move(8, 16), Err(ChessErrors::GameOver));
        assert_eq!(board.make_move(4, 13), Err(ChessErrors::GameOver));
        assert_eq!(board.make_move(20, 28), Err(ChessErrors::GameOver));
        assert_eq!(board, before);
    }

    #[test]
    fn uncovering_own_king_is_self_check() {
        // The E3 knight shields E1 from the E8 rook; taking on D5 exposes it.
        let mut board = Board::from_placement("4r2k/8/8/3p4/8/4N3/8/4K3", Color::White)
            .expect("placement should parse");
        assert!(!board.is_in_check());
        let before = board.clone();
        assert_eq!(
            board.make_move(20, 35),
            Err(ChessErrors::SelfCheck { from: 20, to: 35 })
        );
        assert_eq!(board, before);
        assert!(!board.is_in_check());
        assert!(board.piece(35).is_some_and(|p| p.is(Color::Black, PieceKind::Pawn)));
    }

    #[test]
    fn king_cannot_step_into_attack() {
        let mut board = Board::from_placement("3r3k/8/8/8/8/8/8/4K3", Color::White)
            .expect("placement should parse");
        assert_eq!(
            board.make_move(4, 3),
            Err(ChessErrors::SelfCheck { from: 4, to: 3 })
        );
        board.make_move(4, 5).expect("Ke1-f1 should be legal");
    }

    #[test]
    fn unrelated_move_in_check_is_still_in_check() {
        let mut board = Board::from_placement("4r2k/8/8/8/8/8/P7/4K3", Color::White)
            .expect("placement should parse");
        assert!(board.is_in_check());
        let before = board.clone();
        assert_eq!(
            board.make_move(8, 16),
            Err(ChessErrors::StillInCheck { from: 8, to: 16 })
        );
        assert_eq!(board, before);
        assert!(board.is_in_check());

        let outcome = board.make_move(4, 3).expect("Ke1-d1 should escape");
        assert!(!outcome.gives_check);
        assert!(!board.is_in_check());
        assert_eq!(board.turn(), Color::Black);
    }

    #[test]
    fn capturing_the_checker_escapes() {
        let mut board = Board::from_placement("7k/8/8/8/8/8/3q4/4K3", Color::White)
            .expect("placement should parse");
        assert!(board.is_in_check());
        assert!(!board.is_check_mate());
        let outcome = board.make_move(4, 11).expect("Kxd2 should be legal");
        assert!(outcome
            .captured
            .is_some_and(|p| p.is(Color::Black, PieceKind::Queen)));
    }

    #[test]
    fn stalemate_is_reported_without_check() {
        let board = Board::from_placement("7k/5Q2/6K1/8/8/8/8/8", Color::Black)
            .expect("placement should parse");
        assert!(!board.is_in_check());
        assert!(!board.is_check_mate());
        assert!(board.is_stalemate());
        assert!(!Board::new().is_stalemate());
    }

    #[test]
    fn probe_snapshot_is_independent_and_skips_mate_search() {
        let board = Board::new();
        let mut probe = board.probe();
        assert_eq!(probe.mode(), BoardMode::Probe);
        probe.make_move(12, 28).expect("E2-E4 should be legal on a probe");
        assert_eq!(board, Board::new());
        assert_eq!(board.turn(), Color::White);

        let mut mating = Board::new();
        play(&mut mating, &[(13, 21), (52, 36), (14, 30)]);
        let mut probe = mating.probe();
        let outcome = probe.make_move(59, 31).expect("Qd8-h4 should be legal");
        assert!(outcome.gives_check);
        assert!(!outcome.gives_mate);
        assert!(!probe.is_check_mate());
    }

    #[test]
    fn display_and_state_summary_render() {
        let mut board = Board::new();
        board.reset();
        let text = board.to_string();
        assert!(text.contains("1 | WR WN WB WQ WK WB WN WR |"));
        assert!(board.state_summary().starts_with("turn: white"));
    }

    #[test]
    fn random_playouts_alternate_turns_and_roll_back_rejections() {
        let mut rng = StdRng::seed_from_u64(0x5eed);

        for _game in 0..4 {
            let mut board = Board::new();
            for _ply in 0..40 {
                // A few random attempts first; rejections must not change anything.
                for _ in 0..8 {
                    let from = rng.random_range(0..64u8);
                    let to = rng.random_range(0..64u8);
                    let before = board.clone();
                    match board.make_move(from, to) {
                        Ok(outcome) => {
                            assert_eq!(board.turn(), before.turn().opposite());
                            assert_eq!(outcome.gives_check, board.is_in_check());
                            assert_eq!(outcome.gives_mate, board.is_check_mate());
                            break;
                        }
                        Err(_) => assert_eq!(board, before),
                    }
                }

                if board.is_check_mate() {
                    assert_eq!(board.make_move(0, 0), Err(ChessErrors::GameOver));
                    break;
                }

                let moves = board.legal_moves();
                let Some(choice) = moves.choose(&mut rng) else {
                    assert!(board.is_stalemate());
                    break;
                };
                let turn = board.turn();
                board
                    .make_move(choice.from, choice.to)
                    .unwrap_or_else(|e| panic!("generated move should be legal: {e}"));
                assert_eq!(board.turn(), turn.opposite());
                assert!(!is_king_in_check(&board, turn));
            }
        }
    }
}
