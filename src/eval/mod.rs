//! Position evaluation for Isolation
//!
//! Leaf positions are scored by mobility: how many more moves the engine's
//! side has than its opponent. Decided positions score `±WIN_SCORE`.

use crate::board::{Board, Player};
use crate::error::IsolationResult;
use crate::rules::count_legal_moves;

/// Score of a won position. Any mobility difference is far below this.
pub const WIN_SCORE: i32 = 100;

/// Search window bound, strictly outside every reachable score
pub const INF: i32 = 1000;

/// Mobility difference from `player`'s point of view.
pub fn evaluate(board: &Board, player: Player) -> IsolationResult<i32> {
    let own = count_legal_moves(board, board.locate(player)?);
    let theirs = count_legal_moves(board, board.locate(player.opponent())?);
    Ok(own as i32 - theirs as i32)
}
