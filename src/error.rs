//! Error types for the Isolation engine

use std::path::PathBuf;

use crate::board::{Player, Pos};

/// Engine errors
#[derive(thiserror::Error, Debug)]
pub enum IsolationError {
    /// Move rejected by the legality check or played out of turn
    #[error("illegal move for player {}: {from} -> {to}", .player.number())]
    IllegalMove { player: Player, from: Pos, to: Pos },

    /// `locate` found zero or several cells for a player (corrupt board)
    #[error("expected exactly one cell for player {}, found {found}", .player.number())]
    MissingPlayer { player: Player, found: usize },

    /// Transposition cache file could not be read
    #[error("cannot read transposition cache {}: {source}", .path.display())]
    CacheLoad {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Transposition cache file is not valid JSON for the expected layout
    #[error("malformed transposition cache: {0}")]
    CacheFormat(#[from] serde_json::Error),

    /// Transposition cache written by an incompatible format version
    #[error("unsupported transposition cache version {0}")]
    CacheVersion(u32),

    /// Transposition cache could not be written
    #[error("cannot write transposition cache {}: {source}", .path.display())]
    CachePersist {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Text diagram could not be parsed into a board
    #[error("invalid board diagram: {0}")]
    BoardParse(String),
}

/// Result type for engine operations
pub type IsolationResult<T> = Result<T, IsolationError>;
