//! Isolation engine: queen-move Isolation on a 6x6 board
//!
//! Two queens start in opposite corners. On each turn the side to move
//! slides its queen like a chess queen to an empty cell, and the cell it
//! left is destroyed for the rest of the game. A player who cannot move
//! loses.
//!
//! # Architecture
//!
//! The engine is organized into several modules:
//! - [`board`]: Board representation, move application and simulation
//! - [`rules`]: Queen-movement legality and move enumeration
//! - [`eval`]: Mobility evaluation and score sentinels
//! - [`search`]: Zobrist hashing, persistent transposition cache, alpha-beta
//! - [`engine`]: Main AI engine integrating all components
//! - [`session`]: One running game with its engine and cache file
//!
//! # Quick Start
//!
//! ```
//! use isolation::{AIEngine, Board, Player, Pos};
//!
//! let mut board = Board::new();
//! let mut engine = AIEngine::new();
//!
//! // Human (Player One) slides right along the top row
//! board.apply(Pos::new(0, 3), Player::One).unwrap();
//!
//! // Engine answers as Player Two
//! let result = engine.play(&mut board).unwrap();
//! if let Some(pos) = result.best_move {
//!     println!("engine moves to {pos}");
//! }
//! assert_eq!(board.turn(), Player::One);
//! ```
//!
//! # Move Selection
//!
//! 1. Transposition cache lookup by Zobrist hash (reused only if legal)
//! 2. Minimax with alpha-beta pruning to a depth that grows with the
//!    number of moves played

pub mod board;
pub mod config;
pub mod engine;
pub mod error;
pub mod eval;
pub mod rules;
pub mod search;
pub mod session;
pub mod ui;

// Re-export commonly used types for convenience
pub use board::{Board, Cell, Player, Pos, BOARD_SIZE};
pub use config::{EngineConfig, SessionConfig};
pub use engine::{AIEngine, MoveResult, MoveSource};
pub use error::{IsolationError, IsolationResult};
pub use session::GameSession;
