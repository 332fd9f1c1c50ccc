//! Search module for the Isolation AI
//!
//! Contains:
//! - Zobrist hashing for position identification
//! - Persistent transposition cache of chosen moves
//! - Minimax search with alpha-beta pruning and a progress-based depth bound

pub mod alphabeta;
pub mod cache;
pub mod zobrist;

pub use alphabeta::{depth_limit, SearchResult, SearchStats, Searcher};
pub use cache::TranspositionCache;
pub use zobrist::{HashScheme, ZobristTable};
