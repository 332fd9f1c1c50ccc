//! Engine and session configuration

use std::path::PathBuf;
use std::time::Duration;

use crate::board::Player;
use crate::search::HashScheme;

/// Seed for the Zobrist keys. A persisted cache is only meaningful to
/// engines built with the same seed.
pub const DEFAULT_SEED: u64 = 0x1234_5678_9ABC_DEF0;

/// Where the transposition cache lives between runs
pub const DEFAULT_CACHE_PATH: &str = "transposition_cache.json";

/// Search and hashing configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    /// Zobrist key seed
    pub seed: u64,
    /// Fold the side to move into position hashes
    pub hash_side_to_move: bool,
    /// Alpha-beta cutoffs; `false` runs plain minimax
    pub pruning: bool,
    /// Per-move deadline. `None` always searches to the full depth bound.
    pub time_limit: Option<Duration>,
}

impl EngineConfig {
    #[inline]
    pub fn hash_scheme(&self) -> HashScheme {
        HashScheme {
            seed: self.seed,
            include_side_to_move: self.hash_side_to_move,
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            hash_side_to_move: false,
            pruning: true,
            time_limit: None,
        }
    }
}

/// Everything a [`GameSession`](crate::GameSession) needs at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    pub engine: EngineConfig,
    pub cache_path: PathBuf,
    /// Side played by the engine
    pub ai_player: Player,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            engine: EngineConfig::default(),
            cache_path: PathBuf::from(DEFAULT_CACHE_PATH),
            ai_player: Player::Two,
        }
    }
}
