//! Chess rules module - pure move generation over the grid toolkit
//!
//! Move validation is written as pure functions over a [`Board`] so it can be
//! evaluated on hypothetical copies without touching shared state.
//!
//! # Module Structure
//!
//! - `piece_moves` - movement rules for each piece type and king-safety checks

pub mod piece_moves;


pub use piece_moves::{
    attacked_squares, find_king, has_any_legal_move, is_in_check, is_promotion_move,
    is_square_attacked, leaves_king_in_check, legal_destinations, pseudo_legal_destinations,
    Board,
};
