//! Main AI engine integrating hashing, caching and search
//!
//! Move selection for the side to move:
//!
//! 1. **Cache**: hash the position and reuse a stored move if it is still
//!    legal here
//! 2. **Search**: otherwise run the alpha-beta search and store its best
//!    move under the pre-move hash
//!
//! # Example
//!
//! ```
//! use isolation::{AIEngine, Board, MoveSource};
//!
//! let mut engine = AIEngine::new();
//! let mut board = Board::new();
//!
//! let first = engine.choose_move(&mut board).unwrap();
//! assert_eq!(first.source, MoveSource::Search);
//!
//! // Same position again: answered from the cache
//! let second = engine.choose_move(&mut board).unwrap();
//! assert_eq!(second.source, MoveSource::Cache);
//! assert_eq!(first.best_move, second.best_move);
//! ```

use std::time::Instant;

use log::{debug, warn};

use crate::board::{Board, Pos};
use crate::config::EngineConfig;
use crate::error::IsolationResult;
use crate::rules::is_legal;
use crate::search::{SearchResult, Searcher, TranspositionCache, ZobristTable};

/// Where a chosen move came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveSource {
    /// Stored by an earlier search of the same position
    Cache,
    /// Fresh alpha-beta search
    Search,
}

/// Result of a move selection with diagnostics.
#[derive(Debug, Clone)]
pub struct MoveResult {
    /// Chosen move, `None` if the side to move is stuck
    pub best_move: Option<Pos>,
    /// Search score; cache hits carry none
    pub score: Option<i32>,
    pub source: MoveSource,
    /// Hash of the position the move was chosen for
    pub hash: u64,
    /// Time taken in milliseconds
    pub time_ms: u64,
    /// Number of nodes searched
    pub nodes: u64,
}

impl MoveResult {
    #[inline]
    fn from_cache(pos: Pos, hash: u64, time_ms: u64) -> Self {
        Self {
            best_move: Some(pos),
            score: None,
            source: MoveSource::Cache,
            hash,
            time_ms,
            nodes: 0,
        }
    }

    #[inline]
    fn from_search(result: SearchResult, hash: u64, time_ms: u64) -> Self {
        Self {
            best_move: result.best_move,
            score: Some(result.score),
            source: MoveSource::Search,
            hash,
            time_ms,
            nodes: result.nodes,
        }
    }
}

/// Main AI engine for Isolation.
///
/// Owns the Zobrist table, the transposition cache and the searcher. The
/// board is always passed in; the engine keeps no game state of its own.
pub struct AIEngine {
    zobrist: ZobristTable,
    cache: TranspositionCache,
    searcher: Searcher,
}

impl AIEngine {
    /// Engine with the default configuration and an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(&EngineConfig::default())
    }

    /// Engine for `config` with an empty cache.
    #[must_use]
    pub fn with_config(config: &EngineConfig) -> Self {
        Self::with_cache(config, TranspositionCache::new(config.hash_scheme()))
    }

    /// Engine for `config` reusing `cache`.
    ///
    /// A cache built under a different hash scheme is dropped.
    #[must_use]
    pub fn with_cache(config: &EngineConfig, cache: TranspositionCache) -> Self {
        let scheme = config.hash_scheme();
        let cache = if cache.scheme() == scheme {
            cache
        } else {
            warn!(
                "discarding {} cached positions built for {:?}",
                cache.len(),
                cache.scheme()
            );
            TranspositionCache::new(scheme)
        };

        Self {
            zobrist: ZobristTable::new(scheme),
            cache,
            searcher: Searcher::from_config(config),
        }
    }

    #[inline]
    pub fn zobrist(&self) -> &ZobristTable {
        &self.zobrist
    }

    #[inline]
    pub fn cache(&self) -> &TranspositionCache {
        &self.cache
    }

    /// Hash of `board` under this engine's scheme
    #[inline]
    pub fn hash(&self, board: &Board) -> u64 {
        self.zobrist.hash(board)
    }

    /// Forget every cached move
    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    /// Choose a move for the side to move without playing it.
    ///
    /// The board is borrowed mutably for simulation and is unchanged on
    /// return. A searched move is stored in the cache under the hash of
    /// `board` as passed in.
    pub fn choose_move(&mut self, board: &mut Board) -> IsolationResult<MoveResult> {
        let start = Instant::now();
        let hash = self.zobrist.hash(board);
        let me = board.turn();
        let from = board.locate(me)?;

        if let Some(cached) = self.cache.lookup(hash) {
            if is_legal(board, from, cached) {
                debug!("cache hit {hash:#018x}: player {} -> {cached}", me.number());
                return Ok(MoveResult::from_cache(
                    cached,
                    hash,
                    start.elapsed().as_millis() as u64,
                ));
            }
            warn!("cached move {cached} for {hash:#018x} is illegal here, searching instead");
        }

        let result = self.searcher.search_root(board)?;
        if let Some(best) = result.best_move {
            self.cache.store(hash, best);
        }

        debug!(
            "searched {hash:#018x}: player {} -> {:?} score {} depth {} nodes {} cutoffs {}",
            me.number(),
            result.best_move,
            result.score,
            result.depth_limit,
            result.nodes,
            result.stats.cutoffs,
        );
        Ok(MoveResult::from_search(
            result,
            hash,
            start.elapsed().as_millis() as u64,
        ))
    }

    /// Choose a move and play it as the real move on `board`.
    pub fn play(&mut self, board: &mut Board) -> IsolationResult<MoveResult> {
        let result = self.choose_move(board)?;
        if let Some(best) = result.best_move {
            let me = board.turn();
            board.apply(best, me)?;
        }
        Ok(result)
    }
}

impl Default for AIEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Cell, Player};
    use crate::search::HashScheme;

    #[test]
    fn test_engine_creation() {
        let engine = AIEngine::new();
        assert!(engine.cache().is_empty());
        assert_eq!(engine.zobrist().scheme(), HashScheme::default());
    }

    #[test]
    fn test_search_result_cached_under_pre_move_hash() {
        let mut engine = AIEngine::new();
        let mut board = Board::new();
        let pre_hash = engine.hash(&board);

        let result = engine.choose_move(&mut board).unwrap();
        assert_eq!(result.source, MoveSource::Search);
        assert_eq!(result.hash, pre_hash);
        assert!(result.best_move.is_some());
        assert_eq!(engine.cache().lookup(pre_hash), result.best_move);
        assert_eq!(board, Board::new());
    }

    #[test]
    fn test_cache_hit_skips_search() {
        let mut engine = AIEngine::new();
        let mut board = Board::new();

        let first = engine.choose_move(&mut board).unwrap();
        let second = engine.choose_move(&mut board).unwrap();
        assert_eq!(second.source, MoveSource::Cache);
        assert_eq!(second.best_move, first.best_move);
        assert_eq!(second.nodes, 0);
        assert_eq!(second.score, None);
    }

    #[test]
    fn test_play_applies_real_move() {
        let mut engine = AIEngine::new();
        let mut board = Board::new();

        let result = engine.play(&mut board).unwrap();
        let to = result.best_move.unwrap();
        assert_eq!(board.turn(), Player::Two);
        assert_eq!(board.move_count(), 1);
        assert_eq!(board.get(Pos::new(0, 0)), Cell::Destroyed);
        assert_eq!(board.get(to), Cell::Occupied(Player::One));
    }

    #[test]
    fn test_illegal_cached_move_is_ignored() {
        let mut engine = AIEngine::new();
        let mut board = Board::new();
        let hash = engine.hash(&board);

        // Knight jump: never legal for a queen
        engine.cache.store(hash, Pos::new(1, 2));
        let result = engine.choose_move(&mut board).unwrap();
        assert_eq!(result.source, MoveSource::Search);

        let best = result.best_move.unwrap();
        assert_ne!(best, Pos::new(1, 2));
        assert_eq!(engine.cache().lookup(hash), Some(best));
    }

    #[test]
    fn test_stuck_side_stores_nothing() {
        let mut engine = AIEngine::new();
        let mut board = Board::from_rows(
            &[
                "1#....", //
                "##....",
                "......",
                "......",
                "......",
                ".....2",
            ],
            Player::One,
        )
        .unwrap();

        let result = engine.play(&mut board).unwrap();
        assert_eq!(result.best_move, None);
        assert!(engine.cache().is_empty());
        assert_eq!(board.move_count(), 0);
    }

    #[test]
    fn test_foreign_cache_discarded() {
        let foreign = HashScheme {
            seed: 1,
            include_side_to_move: true,
        };
        let mut cache = TranspositionCache::new(foreign);
        cache.store(1, Pos::new(0, 1));

        let engine = AIEngine::with_cache(&EngineConfig::default(), cache);
        assert!(engine.cache().is_empty());
        assert_eq!(engine.cache().scheme(), HashScheme::default());
    }

    #[test]
    fn test_side_to_move_hash_separates_turns() {
        let config = EngineConfig {
            hash_side_to_move: true,
            ..EngineConfig::default()
        };
        let mut engine = AIEngine::with_config(&config);
        let mut board = Board::new();
        engine.choose_move(&mut board).unwrap();

        // Same layout, other side to move: a different key
        board.set_turn(Player::Two);
        let result = engine.choose_move(&mut board).unwrap();
        assert_eq!(result.source, MoveSource::Search);
        assert_eq!(engine.cache().len(), 2);
    }

    #[test]
    fn test_turn_insensitive_hash_shares_key() {
        let mut engine = AIEngine::new();
        let mut board = Board::new();
        let hash = engine.hash(&board);
        engine.cache.store(hash, Pos::new(0, 1));

        // Default scheme ignores the turn, so Player Two hits Player One's
        // entry; (0,1) is unreachable from (5,5) and a search runs.
        board.set_turn(Player::Two);
        assert_eq!(engine.hash(&board), hash);
        let result = engine.choose_move(&mut board).unwrap();
        assert_eq!(result.source, MoveSource::Search);
        assert_eq!(engine.cache().len(), 1);
        assert_eq!(engine.cache().lookup(hash), result.best_move);
    }

    #[test]
    fn test_clear_cache_forces_search() {
        let mut engine = AIEngine::new();
        let mut board = Board::new();
        engine.choose_move(&mut board).unwrap();
        assert_eq!(engine.cache().len(), 1);

        engine.clear_cache();
        assert!(engine.cache().is_empty());
        assert_eq!(engine.cache().scheme(), HashScheme::default());

        let again = engine.choose_move(&mut board).unwrap();
        assert_eq!(again.source, MoveSource::Search);
        assert_eq!(engine.cache().len(), 1);
    }

    #[test]
    fn test_engine_alternating_sides() {
        let mut engine = AIEngine::new();
        let mut board = Board::new();
        for _ in 0..4 {
            let mover = board.turn();
            let result = engine.play(&mut board).unwrap();
            assert!(result.best_move.is_some());
            assert_eq!(board.turn(), mover.opponent());
        }
        assert_eq!(board.move_count(), 4);
    }
}
