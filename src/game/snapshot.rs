//! Immutable game-state snapshots
//!
//! The engine thread owns the live state privately and publishes a fresh
//! [`GameSnapshot`] after every completed mutation. Readers on the
//! interactive side hold an `Arc` to one snapshot for the length of a single
//! computation and re-fetch on the next event.

use super::captured::CapturedPieces;
use super::error::{GameError, GameResult};
use super::pieces::{Piece, PieceColor, PieceType, BACK_ROW};
use super::rules::{self, Board};
use crate::grid::{Grid, Position};
use crate::interaction::BoardView;
use serde::{Deserialize, Serialize};

/// Overall game status after the latest move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GameStatus {
    #[default]
    InProgress,
    Checkmate {
        winner: PieceColor,
    },
    Stalemate,
}

impl GameStatus {
    pub fn is_over(self) -> bool {
        !matches!(self, GameStatus::InProgress)
    }
}

/// Record of a move for history display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRecord {
    pub piece: Piece,
    pub from: Position,
    pub to: Position,
    pub captured: Option<PieceType>,
    pub promotion: Option<PieceType>,
    /// Whether the move left the opponent in check
    pub gives_check: bool,
}

impl MoveRecord {
    /// Long algebraic form, e.g. `Pe7xd8=Q+`
    pub fn notation(&self) -> String {
        let square = |p: Position| p.to_algebraic().unwrap_or_else(|| p.to_string());
        let mut text = format!(
            "{}{}{}{}",
            self.piece.piece_type.symbol(PieceColor::White),
            square(self.from),
            if self.captured.is_some() { "x" } else { "-" },
            square(self.to)
        );
        if let Some(promoted) = self.promotion {
            text.push('=');
            text.push(promoted.symbol(PieceColor::White));
        }
        if self.gives_check {
            text.push('+');
        }
        text
    }
}

/// Everything a reader needs to know about the game at one instant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameSnapshot {
    board: Board,
    turn: PieceColor,
    status: GameStatus,
    captured: CapturedPieces,
    history: Vec<MoveRecord>,
}

impl GameSnapshot {
    /// Standard chess starting position, White to move
    pub fn standard() -> Self {
        let mut cells: [[Option<Piece>; 8]; 8] = [[None; 8]; 8];
        for (col, piece_type) in BACK_ROW.iter().enumerate() {
            cells[0][col] = Some(Piece::new(PieceColor::Black, *piece_type));
            cells[1][col] = Some(Piece::new(PieceColor::Black, PieceType::Pawn));
            cells[6][col] = Some(Piece::new(PieceColor::White, PieceType::Pawn));
            cells[7][col] = Some(Piece::new(PieceColor::White, *piece_type));
        }
        Self::from_board(Grid::from(cells), PieceColor::White)
    }

    /// Arbitrary position with `turn` to move; the status is evaluated immediately
    pub fn from_board(board: Board, turn: PieceColor) -> Self {
        let mut snapshot = Self {
            board,
            turn,
            status: GameStatus::InProgress,
            captured: CapturedPieces::default(),
            history: Vec::new(),
        };
        snapshot.status = snapshot.evaluate_status();
        snapshot
    }

    /// Build a position from raw rows, failing on empty or jagged input
    pub fn from_rows(rows: Vec<Vec<Option<Piece>>>, turn: PieceColor) -> GameResult<Self> {
        let board = Grid::from_rows(rows).map_err(GameError::from)?;
        Ok(Self::from_board(board, turn))
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn turn(&self) -> PieceColor {
        self.turn
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn captured(&self) -> &CapturedPieces {
        &self.captured
    }

    pub fn history(&self) -> &[MoveRecord] {
        &self.history
    }

    pub fn last_move(&self) -> Option<&MoveRecord> {
        self.history.last()
    }

    pub fn is_in_check(&self, color: PieceColor) -> bool {
        rules::is_in_check(&self.board, color)
    }

    pub(crate) fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    pub(crate) fn captured_mut(&mut self) -> &mut CapturedPieces {
        &mut self.captured
    }

    /// Hand the turn over after a completed move and re-evaluate the status
    pub(crate) fn finish_move(&mut self, record: MoveRecord) {
        self.history.push(record);
        self.turn = self.turn.opponent();
        self.status = self.evaluate_status();
    }

    fn evaluate_status(&self) -> GameStatus {
        if rules::has_any_legal_move(&self.board, self.turn) {
            GameStatus::InProgress
        } else if rules::is_in_check(&self.board, self.turn) {
            GameStatus::Checkmate {
                winner: self.turn.opponent(),
            }
        } else {
            GameStatus::Stalemate
        }
    }
}

impl BoardView for GameSnapshot {
    fn rows(&self) -> usize {
        self.board.rows()
    }

    fn cols(&self) -> usize {
        self.board.cols()
    }

    fn occupant_at(&self, position: Position) -> Option<Piece> {
        self.board.get(position).copied().flatten()
    }

    fn turn_color(&self) -> PieceColor {
        self.turn
    }

    fn legal_destinations(&self, position: Position) -> Vec<Position> {
        match self.occupant_at(position) {
            Some(piece) if piece.color == self.turn && !self.status.is_over() => {
                rules::legal_destinations(&self.board, position)
            }
            _ => Vec::new(),
        }
    }

    fn legal_destinations_ignoring_turn(&self, position: Position) -> Vec<Position> {
        rules::legal_destinations(&self.board, position)
    }

    fn is_game_over(&self) -> bool {
        self.status.is_over()
    }
}
