//! Core value types shared by the board, the validator and the notation
//! utilities.

/// Board square index (`0..=63`), `0 == A1`, `7 == H1`, `63 == H8`.
pub type Square = u8;

/// Number of squares on the board.
pub const BOARD_SIZE: usize = 64;

/// Side of a piece, and side to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    White,
    Black,
}

impl Color {
    #[inline]
    pub const fn opposite(self) -> Self {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// Rank delta of a single pawn advance.
    #[inline]
    pub const fn forward(self) -> i8 {
        match self {
            Color::White => 1,
            Color::Black => -1,
        }
    }

    /// Single-letter code used by the text renderer.
    #[inline]
    pub const fn code(self) -> char {
        match self {
            Color::White => 'W',
            Color::Black => 'B',
        }
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Color::White => write!(f, "white"),
            Color::Black => write!(f, "black"),
        }
    }
}

/// Piece kind (color is carried separately on `Piece`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    /// Upper-case letter code (`P N B R Q K`).
    #[inline]
    pub const fn code(self) -> char {
        match self {
            PieceKind::Pawn => 'P',
            PieceKind::Knight => 'N',
            PieceKind::Bishop => 'B',
            PieceKind::Rook => 'R',
            PieceKind::Queen => 'Q',
            PieceKind::King => 'K',
        }
    }

    /// Decodes a letter code, case-insensitively.
    pub fn from_code(code: char) -> Result<Self, crate::errors::ChessErrors> {
        match code.to_ascii_uppercase() {
            'P' => Ok(PieceKind::Pawn),
            'N' => Ok(PieceKind::Knight),
            'B' => Ok(PieceKind::Bishop),
            'R' => Ok(PieceKind::Rook),
            'Q' => Ok(PieceKind::Queen),
            'K' => Ok(PieceKind::King),
            _ => Err(crate::errors::ChessErrors::IllegalType(code)),
        }
    }

    /// Sliding pieces (and pawns) must have a clear path; knights jump.
    #[inline]
    pub const fn jumps(self) -> bool {
        matches!(self, PieceKind::Knight)
    }
}

/// The occupant of a square. Empty squares are `None` in the board array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub color: Color,
    pub kind: PieceKind,
    pub has_moved: bool,
}

impl Piece {
    #[inline]
    pub const fn new(color: Color, kind: PieceKind) -> Self {
        Self {
            color,
            kind,
            has_moved: false,
        }
    }

    #[inline]
    pub const fn moved(self) -> Self {
        Self {
            has_moved: true,
            ..self
        }
    }

    #[inline]
    pub fn is(&self, color: Color, kind: PieceKind) -> bool {
        self.color == color && self.kind == kind
    }
}

#[inline]
pub const fn file_of(square: Square) -> i8 {
    (square % 8) as i8
}

#[inline]
pub const fn rank_of(square: Square) -> i8 {
    (square / 8) as i8
}

/// Checkerboard parity: `A1` is a dark square (`false`), `B1` a light one.
#[inline]
pub const fn square_shade(square: Square) -> bool {
    (file_of(square) + rank_of(square)) % 2 == 1
}

/// Square at `(file, rank)` if both lie on the board.
#[inline]
pub fn square_at(file: i8, rank: i8) -> Option<Square> {
    if (0..8).contains(&file) && (0..8).contains(&rank) {
        Some((rank * 8 + file) as Square)
    } else {
        None
    }
}
