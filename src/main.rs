//! Line-oriented driver for the rules engine.
//!
//! Usage:
//! `cargo run -- [--placement <FEN placement>] [--turn white|black] [--quiet]`
//!
//! Reads one command per line from stdin: a move (`E2 E4`, `E2E4`, `E2-E4`)
//! or one of `board`, `state`, `moves`, `reset`, `quit`.

use std::io::{self, BufRead, Write};

use chess_rules::utils::algebraic::{parse_move_text, square_to_algebraic};
use chess_rules::{Board, Color, MoveKind, MoveOutcome, Square};
use clap::{Parser, ValueEnum};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Starting layout as a FEN placement field (rank 8 first).
    #[arg(short, long)]
    placement: Option<String>,

    /// Side to move when `--placement` is given.
    #[arg(short, long, value_enum, default_value_t = Side::White)]
    turn: Side,

    /// Do not print the board after each accepted move.
    #[arg(short, long)]
    quiet: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Side {
    White,
    Black,
}

impl From<Side> for Color {
    fn from(side: Side) -> Self {
        match side {
            Side::White => Color::White,
            Side::Black => Color::Black,
        }
    }
}

fn main() -> Result<(), String> {
    let args = Args::parse();

    let initial = match &args.placement {
        Some(placement) => {
            Board::from_placement(placement, args.turn.into()).map_err(|e| e.to_string())?
        }
        None => Board::new(),
    };
    let mut board = initial.clone();

    let stdout = io::stdout();
    let mut out = stdout.lock();
    writeln!(out, "{board}").map_err(|e| e.to_string())?;
    writeln!(out, "info string {} to move", board.turn()).map_err(|e| e.to_string())?;

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line.map_err(|e| e.to_string())?;
        let command = line.trim();
        if command.is_empty() {
            continue;
        }

        let response = match command {
            "quit" => break,
            "board" => board.to_string(),
            "state" => board.state_summary(),
            "reset" => {
                board = initial.clone();
                format!("info string reset, {} to move", board.turn())
            }
            "moves" => describe_legal_moves(&board),
            _ => match parse_move_text(command).and_then(|(from, to)| board.make_move(from, to)) {
                Ok(outcome) => {
                    let mut text = describe_outcome(&outcome, &board);
                    if !args.quiet {
                        text.push('\n');
                        text.push_str(&board.to_string());
                    }
                    text
                }
                Err(e) => format!("error {e}"),
            },
        };

        writeln!(out, "{response}").map_err(|e| e.to_string())?;
        out.flush().map_err(|e| e.to_string())?;
    }

    Ok(())
}

fn notation(square: Square) -> String {
    square_to_algebraic(square).unwrap_or_else(|_| square.to_string())
}

fn describe_outcome(outcome: &MoveOutcome, board: &Board) -> String {
    let kind = match outcome.kind {
        MoveKind::Regular => "regular",
        MoveKind::Castle { .. } => "castle",
        MoveKind::EnPassant { .. } => "en_passant",
    };
    let mut text = format!(
        "info string move {}{} kind {} captured {}",
        notation(outcome.from),
        notation(outcome.to),
        kind,
        outcome.captured.is_some()
    );
    if outcome.gives_mate {
        text.push_str(" checkmate");
    } else if outcome.gives_check {
        text.push_str(" check");
    } else if board.is_stalemate() {
        text.push_str(" stalemate");
    }
    text.push_str(&format!(", {} to move", board.turn()));
    text
}

fn describe_legal_moves(board: &Board) -> String {
    let moves = board.legal_moves();
    let listed: Vec<String> = moves
        .iter()
        .map(|mv| format!("{}{}", notation(mv.from), notation(mv.to)))
        .collect();
    format!("info string legal_moves {} {}", moves.len(), listed.join(" "))
}
