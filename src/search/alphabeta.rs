//! Minimax search with alpha-beta pruning
//!
//! The side to move on the real board is the engine's side for the whole
//! search: simulated moves never change `Board::turn`, so every node reads
//! the engine's side and the depth bound straight from the board.
//!
//! Children are explored by simulating a move in place and letting the
//! [`Simulation`](crate::board::Simulation) guard restore the board when it
//! goes out of scope. That holds on every exit path, including cutoffs and
//! `?` propagation, so siblings always see the parent position.
//!
//! # Example
//!
//! ```
//! use isolation::board::Board;
//! use isolation::search::Searcher;
//!
//! let mut searcher = Searcher::new(true, None);
//! let mut board = Board::new();
//!
//! let result = searcher.search_root(&mut board).unwrap();
//! assert!(result.best_move.is_some());
//! assert_eq!(board, Board::new());
//! ```

use std::time::{Duration, Instant};

use crate::board::{Board, Pos};
use crate::config::EngineConfig;
use crate::error::IsolationResult;
use crate::eval::{evaluate, INF, WIN_SCORE};
use crate::rules::{has_legal_move, legal_moves_from};

/// Depth at which the search stops and evaluates.
///
/// Grows with the number of real moves played: fewer open cells means a
/// smaller tree, so the horizon can move out.
#[inline]
pub fn depth_limit(moves_played: u32) -> u32 {
    (f64::from(moves_played).powf(1.6) / 17.0).ceil() as u32 + 1
}

/// Search diagnostics
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Siblings skipped by an alpha or beta cutoff
    pub cutoffs: u64,
    /// Nodes evaluated early because the deadline had passed
    pub deadline_hits: u64,
}

/// Root search outcome.
#[derive(Debug, Clone)]
pub struct SearchResult {
    /// Best move found; `None` when the side to move is stuck
    pub best_move: Option<Pos>,
    /// Score of the best move from the mover's point of view
    pub score: i32,
    /// Depth bound used for this search
    pub depth_limit: u32,
    /// Total nodes visited
    pub nodes: u64,
    pub stats: SearchStats,
}

/// Alpha-beta searcher.
///
/// Holds configuration and counters only; positions are passed in.
pub struct Searcher {
    pruning: bool,
    time_limit: Option<Duration>,
    deadline: Option<Instant>,
    nodes: u64,
    stats: SearchStats,
}

impl Searcher {
    /// Create a searcher. With `pruning` off this is plain minimax.
    #[must_use]
    pub fn new(pruning: bool, time_limit: Option<Duration>) -> Self {
        Self {
            pruning,
            time_limit,
            deadline: None,
            nodes: 0,
            stats: SearchStats::default(),
        }
    }

    #[must_use]
    pub fn from_config(config: &EngineConfig) -> Self {
        Self::new(config.pruning, config.time_limit)
    }

    #[inline]
    pub fn nodes(&self) -> u64 {
        self.nodes
    }

    #[inline]
    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    /// Whether the per-move deadline (if any) has passed.
    #[inline]
    fn out_of_time(&self) -> bool {
        self.deadline.is_some_and(|deadline| Instant::now() >= deadline)
    }

    /// Pick the best move for the side to move.
    ///
    /// Every legal move is simulated and scored by [`search`](Self::search)
    /// from the opponent's perspective with a full window. The first move
    /// reaching the best score wins ties; a winning score ends the loop.
    /// The board is unchanged on return.
    pub fn search_root(&mut self, board: &mut Board) -> IsolationResult<SearchResult> {
        self.nodes = 0;
        self.stats = SearchStats::default();
        self.deadline = self.time_limit.map(|limit| Instant::now() + limit);

        let me = board.turn();
        let from = board.locate(me)?;

        let mut best_move = None;
        let mut best_score = -INF;

        for to in legal_moves_from(board, from) {
            let score = {
                let mut child = board.simulate(from, to, me);
                self.search(&mut child, 0, -INF, INF, false)?
            };

            if score > best_score {
                best_score = score;
                best_move = Some(to);
            }
            if best_score == WIN_SCORE {
                break;
            }
        }

        Ok(SearchResult {
            best_move,
            score: best_score,
            depth_limit: depth_limit(board.move_count()),
            nodes: self.nodes,
            stats: self.stats.clone(),
        })
    }

    /// Score `board` for the engine's side (`board.turn()`).
    ///
    /// `maximizing` selects whose move it is at this node: the engine's
    /// side when true, the opponent's otherwise. Returns `-WIN_SCORE` if the
    /// engine's side is stuck and `WIN_SCORE` if the opponent is, checked
    /// in that order at every node.
    pub fn search(
        &mut self,
        board: &mut Board,
        depth: u32,
        mut alpha: i32,
        mut beta: i32,
        maximizing: bool,
    ) -> IsolationResult<i32> {
        self.nodes += 1;

        let me = board.turn();
        let opponent = me.opponent();
        let my_pos = board.locate(me)?;
        let their_pos = board.locate(opponent)?;

        if !has_legal_move(board, my_pos) {
            return Ok(-WIN_SCORE);
        }
        if !has_legal_move(board, their_pos) {
            return Ok(WIN_SCORE);
        }

        if depth >= depth_limit(board.move_count()) {
            return evaluate(board, me);
        }
        if self.out_of_time() {
            self.stats.deadline_hits += 1;
            return evaluate(board, me);
        }

        let (mover, from) = if maximizing {
            (me, my_pos)
        } else {
            (opponent, their_pos)
        };
        let mut best = if maximizing { -INF } else { INF };

        for to in legal_moves_from(board, from) {
            let score = {
                let mut child = board.simulate(from, to, mover);
                self.search(&mut child, depth + 1, alpha, beta, !maximizing)?
            };

            best = if maximizing { best.max(score) } else { best.min(score) };

            if self.pruning && ((maximizing && best > beta) || (!maximizing && best < alpha)) {
                self.stats.cutoffs += 1;
                break;
            }
            if maximizing {
                alpha = alpha.max(best);
            } else {
                beta = beta.min(best);
            }
        }

        Ok(best)
    }
}

impl Default for Searcher {
    fn default() -> Self {
        Self::from_config(&EngineConfig::default())
    }
}
