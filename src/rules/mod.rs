//! Game rules for Isolation
//!
//! Queens move like chess queens onto empty cells, never jumping over a
//! destroyed cell or the other queen. A side without a legal move loses.

pub mod movement;

// Re-exports for convenient access
pub use movement::{
    count_legal_moves, has_legal_move, is_legal, legal_moves_from, MAX_MOVES, QUEEN_DIRECTIONS,
};
