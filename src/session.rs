//! Game session: one board, one engine, one persisted cache
//!
//! Everything a running game needs lives here and is passed around by
//! reference. The presentation layer and the headless driver both talk to
//! the game through this type only.

use std::path::{Path, PathBuf};

use log::{error, info};

use crate::board::{Board, Player, Pos};
use crate::config::SessionConfig;
use crate::engine::{AIEngine, MoveResult};
use crate::error::{IsolationError, IsolationResult};
use crate::search::TranspositionCache;

/// A game between a human and the engine (or the engine and itself).
pub struct GameSession {
    board: Board,
    engine: AIEngine,
    ai_player: Player,
    cache_path: PathBuf,
    last_result: Option<MoveResult>,
}

impl GameSession {
    /// Start a game from the initial position, loading the cache from
    /// `config.cache_path`. A missing or unusable file starts empty.
    pub fn new(config: SessionConfig) -> Self {
        Self::with_board(config, Board::new())
    }

    /// Like [`new`](Self::new), but resume from `board`.
    pub fn with_board(config: SessionConfig, board: Board) -> Self {
        let scheme = config.engine.hash_scheme();
        let cache = TranspositionCache::load_or_empty(&config.cache_path, scheme);

        Self {
            board,
            engine: AIEngine::with_cache(&config.engine, cache),
            ai_player: config.ai_player,
            cache_path: config.cache_path,
            last_result: None,
        }
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[inline]
    pub fn engine(&self) -> &AIEngine {
        &self.engine
    }

    #[inline]
    pub fn ai_player(&self) -> Player {
        self.ai_player
    }

    #[inline]
    pub fn cache_path(&self) -> &Path {
        &self.cache_path
    }

    /// Diagnostics of the most recent engine move
    #[inline]
    pub fn last_result(&self) -> Option<&MoveResult> {
        self.last_result.as_ref()
    }

    #[inline]
    pub fn is_ai_turn(&self) -> bool {
        self.board.turn() == self.ai_player
    }

    /// Move the human's queen to `to`.
    ///
    /// Rejected with [`IsolationError::IllegalMove`] when it is the engine's
    /// turn or the move is not legal; the board is untouched in that case.
    pub fn human_move(&mut self, to: Pos) -> IsolationResult<()> {
        let player = self.board.turn();
        if player == self.ai_player {
            let from = self.board.locate(player)?;
            return Err(IsolationError::IllegalMove { player, from, to });
        }
        self.board.apply(to, player)
    }

    /// Let the engine play for the side to move.
    ///
    /// Returns `None` without touching the board when the game is over.
    pub fn play_engine_turn(&mut self) -> IsolationResult<Option<MoveResult>> {
        if self.game_over()?.is_some() {
            return Ok(None);
        }

        let result = self.engine.play(&mut self.board)?;
        self.last_result = Some(result.clone());
        Ok(Some(result))
    }

    /// Winner, once the side to move is stuck
    pub fn game_over(&mut self) -> IsolationResult<Option<Player>> {
        self.board.is_game_over()
    }

    /// Back to the initial position. The cache is kept.
    pub fn restart(&mut self) {
        self.board = Board::new();
        self.last_result = None;
    }

    /// Engine plays both sides until someone is stuck.
    ///
    /// `on_move` sees the board after every move.
    pub fn self_play<F>(&mut self, mut on_move: F) -> IsolationResult<Player>
    where
        F: FnMut(&Board, &MoveResult),
    {
        loop {
            if let Some(winner) = self.game_over()? {
                info!(
                    "player {} wins after {} moves",
                    winner.number(),
                    self.board.move_count()
                );
                return Ok(winner);
            }
            if let Some(result) = self.play_engine_turn()? {
                on_move(&self.board, &result);
            }
        }
    }

    /// Forget every cached move. The file on disk is rewritten at the next
    /// [`persist`](Self::persist).
    pub fn clear_cache(&mut self) {
        info!("clearing {} cached positions", self.engine.cache().len());
        self.engine.clear_cache();
    }

    /// Write the cache to the session's cache path.
    pub fn persist(&self) -> IsolationResult<()> {
        self.engine.cache().save(&self.cache_path)
    }

    /// Persist the cache, logging instead of failing.
    pub fn shutdown(&self) {
        if let Err(err) = self.persist() {
            error!("{err}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Cell;
    use crate::config::EngineConfig;
    use crate::engine::MoveSource;
    use std::time::Duration;

    fn config_in(dir: &tempfile::TempDir, ai_player: Player) -> SessionConfig {
        SessionConfig {
            engine: EngineConfig::default(),
            cache_path: dir.path().join("cache.json"),
            ai_player,
        }
    }

    #[test]
    fn test_new_session_without_cache_file() {
        let dir = tempfile::tempdir().unwrap();
        let session = GameSession::new(config_in(&dir, Player::Two));

        assert_eq!(session.board(), &Board::new());
        assert!(session.engine().cache().is_empty());
        assert!(!session.is_ai_turn());
        assert!(session.last_result().is_none());
    }

    #[test]
    fn test_human_move_then_ai_turn() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = GameSession::new(config_in(&dir, Player::Two));

        session.human_move(Pos::new(0, 3)).unwrap();
        assert!(session.is_ai_turn());
        assert_eq!(session.board().get(Pos::new(0, 0)), Cell::Destroyed);
        assert_eq!(session.board().get(Pos::new(0, 3)), Cell::Occupied(Player::One));
    }

    #[test]
    fn test_illegal_human_move_leaves_board() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = GameSession::new(config_in(&dir, Player::Two));

        let err = session.human_move(Pos::new(1, 2)).unwrap_err();
        assert!(matches!(err, IsolationError::IllegalMove { .. }));
        assert_eq!(session.board(), &Board::new());
    }

    #[test]
    fn test_human_cannot_move_for_engine() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = GameSession::new(config_in(&dir, Player::One));

        assert!(session.is_ai_turn());
        assert!(session.human_move(Pos::new(0, 1)).is_err());
        assert_eq!(session.board().move_count(), 0);
    }

    #[test]
    fn test_engine_turn_after_human_move() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = GameSession::new(config_in(&dir, Player::Two));

        session.human_move(Pos::new(1, 1)).unwrap();
        let result = session.play_engine_turn().unwrap().unwrap();
        assert_eq!(result.source, MoveSource::Search);
        assert!(result.best_move.is_some());
        assert_eq!(session.board().move_count(), 2);
        assert_eq!(session.board().turn(), Player::One);
        assert!(session.last_result().is_some());
        assert_eq!(session.engine().cache().len(), 1);
    }

    #[test]
    fn test_cache_survives_sessions() {
        let dir = tempfile::tempdir().unwrap();

        let mut first = GameSession::new(config_in(&dir, Player::One));
        let played = first.play_engine_turn().unwrap().unwrap();
        first.shutdown();

        let mut second = GameSession::new(config_in(&dir, Player::One));
        assert_eq!(second.engine().cache().len(), 1);
        let replayed = second.play_engine_turn().unwrap().unwrap();
        assert_eq!(replayed.source, MoveSource::Cache);
        assert_eq!(replayed.best_move, played.best_move);
    }

    #[test]
    fn test_shutdown_tolerates_unwritable_path() {
        let dir = tempfile::tempdir().unwrap();
        let config = SessionConfig {
            cache_path: dir.path().join("missing/dir/cache.json"),
            ..config_in(&dir, Player::Two)
        };
        let session = GameSession::new(config);

        assert!(matches!(
            session.persist(),
            Err(IsolationError::CachePersist { .. })
        ));
        session.shutdown();
    }

    #[test]
    fn test_restart_keeps_cache() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = GameSession::new(config_in(&dir, Player::One));

        session.play_engine_turn().unwrap();
        session.restart();
        assert_eq!(session.board(), &Board::new());
        assert!(session.last_result().is_none());
        assert_eq!(session.engine().cache().len(), 1);
    }

    #[test]
    fn test_clear_cache_persists_empty() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = GameSession::new(config_in(&dir, Player::One));
        session.play_engine_turn().unwrap();
        session.shutdown();

        session.clear_cache();
        assert!(session.engine().cache().is_empty());
        session.shutdown();

        let reloaded = GameSession::new(config_in(&dir, Player::One));
        assert!(reloaded.engine().cache().is_empty());
    }

    #[test]
    fn test_with_board_resumes_position() {
        let dir = tempfile::tempdir().unwrap();
        let mut board = Board::new();
        board.apply(Pos::new(2, 2), Player::One).unwrap();

        let session = GameSession::with_board(config_in(&dir, Player::Two), board.clone());
        assert_eq!(session.board(), &board);
        assert!(session.is_ai_turn());
    }

    #[test]
    fn test_no_engine_move_when_game_over() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = GameSession::new(config_in(&dir, Player::One));
        session.board = Board::from_rows(
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

        assert_eq!(session.play_engine_turn().unwrap().map(|r| r.best_move), None);
        assert_eq!(session.game_over().unwrap(), Some(Player::Two));
    }

    #[test]
    fn test_self_play_reaches_a_winner() {
        let dir = tempfile::tempdir().unwrap();
        let config = SessionConfig {
            engine: EngineConfig {
                time_limit: Some(Duration::from_millis(20)),
                ..EngineConfig::default()
            },
            ..config_in(&dir, Player::Two)
        };
        let mut session = GameSession::new(config);

        let mut moves = 0u32;
        let winner = session.self_play(|_, _| moves += 1).unwrap();

        assert_eq!(moves, session.board().move_count());
        // The loser is the side left to move
        assert_eq!(winner, session.board().turn().opponent());
        assert!(moves <= 34);
    }
}
