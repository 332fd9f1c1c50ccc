//! Zobrist hashing for position identification
//!
//! Every (cell, occupant) pair gets an independent 64-bit key drawn from a
//! seeded generator, and a position hashes to the XOR of the keys of its
//! non-empty cells. The same seed always produces the same table, so hashes
//! stay valid across runs that share a persisted cache.
//!
//! # Example
//!
//! ```
//! use isolation::board::{Board, Player, Pos};
//! use isolation::search::{HashScheme, ZobristTable};
//!
//! let zt = ZobristTable::new(HashScheme::default());
//! let mut board = Board::new();
//! let before = zt.hash(&board);
//!
//! board.apply(Pos::new(0, 3), Player::One).unwrap();
//! assert_ne!(zt.hash(&board), before);
//! ```

use rand::{RngCore, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;
use serde::{Deserialize, Serialize};

use crate::board::{Board, Cell, Player, Pos, TOTAL_CELLS};
use crate::config::DEFAULT_SEED;

/// Occupant kinds that contribute to a hash: Player One, Player Two, Destroyed
const CELL_KINDS: usize = 3;

/// How keys are generated and which state they cover.
///
/// Two engines produce comparable hashes only if their schemes are equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HashScheme {
    pub seed: u64,
    /// XOR a side-to-move key in when Player Two is to move
    pub include_side_to_move: bool,
}

impl Default for HashScheme {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            include_side_to_move: false,
        }
    }
}

/// Zobrist key table.
///
/// Generated once per engine and immutable afterwards.
pub struct ZobristTable {
    scheme: HashScheme,
    /// Keys per cell: [player one, player two, destroyed]
    keys: [[u64; CELL_KINDS]; TOTAL_CELLS],
    /// XORed in when Player Two is to move (if the scheme asks for it)
    side_to_move: u64,
}

impl ZobristTable {
    /// Build the table for `scheme`, drawing keys from a generator seeded
    /// with `scheme.seed`.
    #[must_use]
    pub fn new(scheme: HashScheme) -> Self {
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(scheme.seed);

        let mut keys = [[0u64; CELL_KINDS]; TOTAL_CELLS];
        for cell in keys.iter_mut() {
            for key in cell.iter_mut() {
                *key = rng.next_u64();
            }
        }

        Self {
            scheme,
            keys,
            side_to_move: rng.next_u64(),
        }
    }

    #[inline]
    pub fn scheme(&self) -> HashScheme {
        self.scheme
    }

    /// Key for `cell` standing on `pos`; empty cells contribute nothing.
    #[inline]
    #[must_use]
    pub fn key(&self, pos: Pos, cell: Cell) -> u64 {
        cell.kind_index()
            .map_or(0, |kind| self.keys[pos.to_index()][kind])
    }

    /// Hash of the occupant layout alone. Turn and move count are ignored.
    #[must_use]
    pub fn layout_hash(&self, board: &Board) -> u64 {
        board
            .cells()
            .fold(0u64, |h, (pos, cell)| h ^ self.key(pos, cell))
    }

    /// Hash used to key the transposition cache.
    ///
    /// Equal to [`layout_hash`](Self::layout_hash) unless the scheme folds in
    /// the side to move.
    #[must_use]
    pub fn hash(&self, board: &Board) -> u64 {
        let h = self.layout_hash(board);
        if self.scheme.include_side_to_move && board.turn() == Player::Two {
            h ^ self.side_to_move
        } else {
            h
        }
    }
}

impl Default for ZobristTable {
    fn default() -> Self {
        Self::new(HashScheme::default())
    }
}
