//! FEN placement-field parser.
//!
//! Reads the first field of a FEN string (`rnbqkbnr/pppppppp/8/...`, rank 8
//! first) into a square array. Only the piece layout is read; side to move is
//! supplied separately by the caller.

use crate::errors::ChessErrors;
use crate::game_state::chess_types::*;

pub fn parse_placement(placement: &str) -> Result<[Option<Piece>; BOARD_SIZE], ChessErrors> {
    let ranks: Vec<&str> = placement.trim().split('/').collect();
    if ranks.len() != 8 {
        return Err(ChessErrors::InvalidPlacement(format!(
            "expected 8 ranks, found {}",
            ranks.len()
        )));
    }

    let mut squares = [None; BOARD_SIZE];

    for (fen_rank_idx, rank_str) in ranks.iter().enumerate() {
        let board_rank = 7usize - fen_rank_idx;
        let mut file = 0usize;

        for ch in rank_str.chars() {
            if let Some(empty_count) = ch.to_digit(10) {
                if !(1..=8).contains(&empty_count) {
                    return Err(ChessErrors::InvalidPlacement(format!(
                        "invalid empty-square count '{ch}'"
                    )));
                }
                file += empty_count as usize;
                continue;
            }

            let piece = piece_from_fen_char(ch)?;

            if file >= 8 {
                return Err(ChessErrors::InvalidPlacement(format!(
                    "rank {} has too many files",
                    board_rank + 1
                )));
            }

            squares[board_rank * 8 + file] = Some(piece);
            file += 1;
        }

        if file != 8 {
            return Err(ChessErrors::InvalidPlacement(format!(
                "rank {} does not sum to 8 files",
                board_rank + 1
            )));
        }
    }

    Ok(squares)
}

fn piece_from_fen_char(ch: char) -> Result<Piece, ChessErrors> {
    let color = if ch.is_ascii_uppercase() {
        Color::White
    } else if ch.is_ascii_lowercase() {
        Color::Black
    } else {
        return Err(ChessErrors::IllegalType(ch));
    };

    Ok(Piece::new(color, PieceKind::from_code(ch)?))
}

#[cfg(test)]
mod tests {
    use super::parse_placement;
    use crate::errors::ChessErrors;
    use crate::game_state::chess_rules::STARTING_PLACEMENT;
    use crate::game_state::chess_types::*;

    #[test]
    fn starting_placement_puts_pieces_on_home_squares() {
        let squares = parse_placement(STARTING_PLACEMENT).expect("start placement should parse");
        assert_eq!(squares[4], Some(Piece::new(Color::White, PieceKind::King)));
        assert_eq!(squares[59], Some(Piece::new(Color::Black, PieceKind::Queen)));
        assert_eq!(squares[8], Some(Piece::new(Color::White, PieceKind::Pawn)));
        assert_eq!(squares[55], Some(Piece::new(Color::Black, PieceKind::Pawn)));
        assert_eq!(squares.iter().filter(|sq| sq.is_some()).count(), 32);
        assert!(squares[16..48].iter().all(Option::is_none));
    }

    #[test]
    fn malformed_placements_are_rejected() {
        assert!(matches!(
            parse_placement("8/8/8"),
            Err(ChessErrors::InvalidPlacement(_))
        ));
        assert!(matches!(
            parse_placement("9/8/8/8/8/8/8/8"),
            Err(ChessErrors::InvalidPlacement(_))
        ));
        assert!(matches!(
            parse_placement("ppppppppp/8/8/8/8/8/8/8"),
            Err(ChessErrors::InvalidPlacement(_))
        ));
        assert!(matches!(
            parse_placement("7/8/8/8/8/8/8/8"),
            Err(ChessErrors::InvalidPlacement(_))
        ));
        assert_eq!(
            parse_placement("x7/8/8/8/8/8/8/8"),
            Err(ChessErrors::IllegalType('x'))
        );
    }
}
