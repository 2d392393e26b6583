//! Chess piece movement rules
//!
//! Contains the rules for how each piece can move, expressed with the grid
//! geometry primitives. Pure functions with no side effects - easy to test.
//!
//! Castling and en passant are not generated.

use crate::game::pieces::{Piece, PieceColor, PieceType};
use crate::grid::{
    adjacent_positions, copy_grid, find_all_occupants, in_bounds, project_line_until_blocked,
    Direction, Grid, Position,
};

/// Board representation used by the rules: `None` is an empty square
pub type Board = Grid<Option<Piece>>;

const KNIGHT_OFFSETS: [(isize, isize); 8] = [
    (-2, -1),
    (-2, 1),
    (-1, -2),
    (-1, 2),
    (1, -2),
    (1, 2),
    (2, -1),
    (2, 1),
];

fn piece_at(board: &Board, position: Position) -> Option<Piece> {
    board.get(position).copied().flatten()
}

fn is_ally(board: &Board, position: Position, color: PieceColor) -> bool {
    piece_at(board, position).is_some_and(|p| p.color == color)
}

fn is_enemy(board: &Board, position: Position, color: PieceColor) -> bool {
    piece_at(board, position).is_some_and(|p| p.color != color)
}

/// Sliding moves along each direction, stopping on (and capturing) the first
/// enemy and stopping short of the first ally
fn slide(board: &Board, from: Position, color: PieceColor, directions: &[Direction]) -> Vec<Position> {
    let reach = board.rows().max(board.cols());
    directions
        .iter()
        .flat_map(|d| project_line_until_blocked(from, *d, reach, board, Option::is_some, true))
        .filter(|to| !is_ally(board, *to, color))
        .collect()
}

fn knight_targets(board: &Board, from: Position) -> Vec<Position> {
    KNIGHT_OFFSETS
        .iter()
        .filter_map(|(dr, dc)| {
            let row = from.row.checked_add_signed(*dr)?;
            let col = from.col.checked_add_signed(*dc)?;
            Some(Position::new(row, col))
        })
        .filter(|to| in_bounds(*to, board.rows(), board.cols()))
        .collect()
}

/// Forward-diagonal squares a pawn attacks, occupied or not
fn pawn_attacks(board: &Board, from: Position, color: PieceColor) -> Vec<Position> {
    [-1, 1]
        .into_iter()
        .filter_map(|d_col| Direction::new(color.forward(), d_col).ok())
        .filter_map(|d| from.offset(d, 1))
        .filter(|to| in_bounds(*to, board.rows(), board.cols()))
        .collect()
}

fn pawn_moves(board: &Board, from: Position, color: PieceColor) -> Vec<Position> {
    let Ok(forward) = Direction::new(color.forward(), 0) else {
        return Vec::new();
    };
    let max_steps = if from.row == color.pawn_row(board.rows()) { 2 } else { 1 };

    let mut moves = project_line_until_blocked(from, forward, max_steps, board, Option::is_some, false);
    moves.extend(
        pawn_attacks(board, from, color)
            .into_iter()
            .filter(|to| is_enemy(board, *to, color)),
    );
    moves
}

/// Every destination the piece on `from` could reach, ignoring king safety
pub fn pseudo_legal_destinations(board: &Board, from: Position) -> Vec<Position> {
    let Some(piece) = piece_at(board, from) else {
        return Vec::new();
    };
    let color = piece.color;

    match piece.piece_type {
        PieceType::Rook => slide(board, from, color, &Direction::CARDINAL),
        PieceType::Bishop => slide(board, from, color, &Direction::DIAGONAL),
        PieceType::Queen => slide(board, from, color, &Direction::ALL),
        PieceType::King => adjacent_positions(from, board.rows(), board.cols(), true)
            .into_iter()
            .filter(|to| !is_ally(board, *to, color))
            .collect(),
        PieceType::Knight => knight_targets(board, from)
            .into_iter()
            .filter(|to| !is_ally(board, *to, color))
            .collect(),
        PieceType::Pawn => pawn_moves(board, from, color),
    }
}

/// Squares the piece on `from` attacks
///
/// Identical to [`pseudo_legal_destinations`] except for pawns, which attack
/// diagonally whether or not the square is occupied and never attack forward.
pub fn attacked_squares(board: &Board, from: Position) -> Vec<Position> {
    match piece_at(board, from) {
        Some(piece) if piece.piece_type == PieceType::Pawn => pawn_attacks(board, from, piece.color),
        Some(_) => pseudo_legal_destinations(board, from),
        None => Vec::new(),
    }
}

pub fn find_king(board: &Board, color: PieceColor) -> Option<Position> {
    find_all_occupants(board, |cell| {
        *cell == Some(Piece::new(color, PieceType::King))
    })
    .into_iter()
    .next()
}

/// Whether any piece of `attacker` attacks `square`
pub fn is_square_attacked(board: &Board, square: Position, attacker: PieceColor) -> bool {
    find_all_occupants(board, |cell| cell.is_some_and(|p| p.color == attacker))
        .into_iter()
        .any(|from| attacked_squares(board, from).contains(&square))
}

pub fn is_in_check(board: &Board, color: PieceColor) -> bool {
    find_king(board, color).is_some_and(|king| is_square_attacked(board, king, color.opponent()))
}

/// Play `from -> to` on a copy of `board` and report whether the mover's king
/// is left attacked
pub fn leaves_king_in_check(board: &Board, from: Position, to: Position) -> bool {
    let Some(piece) = piece_at(board, from) else {
        return false;
    };
    let mut hypothetical = copy_grid(board);
    hypothetical.replace(from, None);
    hypothetical.replace(to, Some(piece));
    is_in_check(&hypothetical, piece.color)
}

/// Destinations for the piece on `from` that keep its own king safe
pub fn legal_destinations(board: &Board, from: Position) -> Vec<Position> {
    pseudo_legal_destinations(board, from)
        .into_iter()
        .filter(|to| !leaves_king_in_check(board, from, *to))
        .collect()
}

pub fn has_any_legal_move(board: &Board, color: PieceColor) -> bool {
    find_all_occupants(board, |cell| cell.is_some_and(|p| p.color == color))
        .into_iter()
        .any(|from| !legal_destinations(board, from).is_empty())
}

/// Check if a move lands a pawn on its promotion row
pub fn is_promotion_move(piece: Piece, to: Position, rows: usize) -> bool {
    piece.piece_type == PieceType::Pawn && to.row == piece.color.promotion_row(rows)
}
