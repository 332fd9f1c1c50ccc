//! Board structure with turn and game-progress tracking

use std::fmt;
use std::ops::{Deref, DerefMut};

use log::debug;

use super::{Cell, Player, Pos, BOARD_SIZE, TOTAL_CELLS};
use crate::error::{IsolationError, IsolationResult};
use crate::rules::{has_legal_move, is_legal, legal_moves_from};

/// Game board.
///
/// Invariant: outside of a live [`Simulation`], exactly one cell holds
/// each player, and a `Destroyed` cell never changes again.
///
/// Cells only change through [`apply`](Board::apply) and
/// [`simulate`](Board::simulate); there is no public raw write.
///
/// ```compile_fail
/// use isolation::{Board, Cell, Pos};
///
/// let mut board = Board::new();
/// board.place(Pos::new(2, 2), Cell::Destroyed);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    cells: [Cell; TOTAL_CELLS],
    /// Side to move
    turn: Player,
    /// Real moves played so far (simulated moves are not counted)
    move_count: u32,
    /// Set once a side is found without legal moves
    winner: Option<Player>,
}

impl Board {
    /// Starting position: Player One top-left, Player Two bottom-right.
    pub fn new() -> Self {
        let last = (BOARD_SIZE - 1) as u8;
        let mut board = Self::empty();
        board.place(Pos::new(0, 0), Cell::Occupied(Player::One));
        board.place(Pos::new(last, last), Cell::Occupied(Player::Two));
        board
    }

    /// Board with every cell empty and no players, for setting up positions.
    pub fn empty() -> Self {
        Self {
            cells: [Cell::Empty; TOTAL_CELLS],
            turn: Player::One,
            move_count: 0,
            winner: None,
        }
    }

    /// Parse a text diagram, one string per row using `.`, `1`, `2` and `#`.
    /// Whitespace inside a row is ignored.
    ///
    /// ```
    /// use isolation::{Board, Player, Pos, Cell};
    ///
    /// let board = Board::from_rows(
    ///     &["1.....", "......", "..##..", "......", "......", ".....2"],
    ///     Player::One,
    /// )
    /// .unwrap();
    /// assert_eq!(board.get(Pos::new(2, 2)), Cell::Destroyed);
    /// ```
    pub fn from_rows(rows: &[&str], turn: Player) -> IsolationResult<Self> {
        if rows.len() != BOARD_SIZE {
            return Err(IsolationError::BoardParse(format!(
                "expected {BOARD_SIZE} rows, got {}",
                rows.len()
            )));
        }

        let mut board = Self::empty();
        board.turn = turn;
        for (row, line) in rows.iter().enumerate() {
            let cells: Vec<char> = line.chars().filter(|c| !c.is_whitespace()).collect();
            if cells.len() != BOARD_SIZE {
                return Err(IsolationError::BoardParse(format!(
                    "row {row} has {} cells, expected {BOARD_SIZE}",
                    cells.len()
                )));
            }
            for (col, c) in cells.into_iter().enumerate() {
                let cell = Cell::from_char(c).ok_or_else(|| {
                    IsolationError::BoardParse(format!("unknown cell '{c}' at ({row}, {col})"))
                })?;
                board.place(Pos::new(row as u8, col as u8), cell);
            }
        }
        Ok(board)
    }

    #[inline]
    pub fn size(&self) -> usize {
        BOARD_SIZE
    }

    /// Get cell contents at position.
    ///
    /// `pos` must be on the board; this panics otherwise. Use
    /// [`cell_at`](Self::cell_at) for unchecked input.
    #[inline]
    pub fn get(&self, pos: Pos) -> Cell {
        self.cells[pos.to_index()]
    }

    /// Cell lookup by coordinates, for renderers. `None` off the board.
    #[inline]
    pub fn cell_at(&self, row: u8, col: u8) -> Option<Cell> {
        let pos = Pos { row, col };
        pos.in_bounds().then(|| self.get(pos))
    }

    #[inline]
    pub fn is_empty(&self, pos: Pos) -> bool {
        self.get(pos) == Cell::Empty
    }

    #[inline]
    pub fn is_occupied_or_blocked(&self, pos: Pos) -> bool {
        !self.is_empty(pos)
    }

    /// Overwrite a cell (no legality checks, no turn change).
    /// Use `apply` for game moves.
    #[inline]
    pub(crate) fn place(&mut self, pos: Pos, cell: Cell) {
        self.cells[pos.to_index()] = cell;
    }

    #[inline]
    pub fn turn(&self) -> Player {
        self.turn
    }

    #[cfg(test)]
    pub(crate) fn set_turn(&mut self, player: Player) {
        self.turn = player;
    }

    #[inline]
    pub fn move_count(&self) -> u32 {
        self.move_count
    }

    #[cfg(test)]
    pub(crate) fn set_move_count(&mut self, moves: u32) {
        self.move_count = moves;
    }

    #[inline]
    pub fn winner(&self) -> Option<Player> {
        self.winner
    }

    /// Iterate over `(pos, cell)` in row-major order
    pub fn cells(&self) -> impl Iterator<Item = (Pos, Cell)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(|(idx, &cell)| (Pos::from_index(idx), cell))
    }

    /// Find the single cell holding `player`.
    ///
    /// Zero or several matches means the board is corrupt.
    pub fn locate(&self, player: Player) -> IsolationResult<Pos> {
        let mark = Cell::Occupied(player);
        let mut found = None;
        let mut count = 0;
        for (pos, cell) in self.cells() {
            if cell == mark {
                found = Some(pos);
                count += 1;
            }
        }
        match (found, count) {
            (Some(pos), 1) => Ok(pos),
            _ => Err(IsolationError::MissingPlayer { player, found: count }),
        }
    }

    /// Legal destinations for `player` from its current cell, row-major.
    pub fn legal_moves(&self, player: Player) -> IsolationResult<Vec<Pos>> {
        let from = self.locate(player)?;
        Ok(legal_moves_from(self, from))
    }

    /// Play a real move for `player`: its old cell is destroyed, the move
    /// counter advances and the turn passes to the opponent.
    pub fn apply(&mut self, to: Pos, player: Player) -> IsolationResult<()> {
        let from = self.locate(player)?;
        if player != self.turn || !is_legal(self, from, to) {
            return Err(IsolationError::IllegalMove { player, from, to });
        }

        self.place(to, Cell::Occupied(player));
        self.place(from, Cell::Destroyed);
        self.move_count += 1;
        self.turn = player.opponent();
        Ok(())
    }

    /// Input-handler entry point: move the side to move from `from` to `to`.
    /// Returns `false` (board untouched) when the move is not allowed.
    pub fn apply_human_move(&mut self, from: Pos, to: Pos) -> bool {
        let player = self.turn;
        match self.locate(player) {
            Ok(current) if current == from => {}
            _ => {
                debug!("rejected move {from} -> {to}: {from} is not player {}", player.number());
                return false;
            }
        }
        match self.apply(to, player) {
            Ok(()) => true,
            Err(err) => {
                debug!("rejected move: {err}");
                false
            }
        }
    }

    /// Speculatively move `player` from `from` to `to`.
    ///
    /// Turn and move counter are left alone. The returned guard derefs to
    /// the board and puts both touched cells back when dropped.
    #[inline]
    pub fn simulate(&mut self, from: Pos, to: Pos, player: Player) -> Simulation<'_> {
        debug_assert_eq!(self.get(from), Cell::Occupied(player));
        debug_assert!(is_legal(self, from, to));

        self.place(to, Cell::Occupied(player));
        self.place(from, Cell::Destroyed);
        Simulation {
            board: self,
            from,
            to,
            player,
        }
    }

    /// True when `player` cannot move. Records the opponent as winner.
    pub fn is_terminal_for(&mut self, player: Player) -> IsolationResult<bool> {
        let from = self.locate(player)?;
        if has_legal_move(self, from) {
            return Ok(false);
        }
        self.winner = Some(player.opponent());
        Ok(true)
    }

    /// Winner if the game has ended (the side to move is stuck).
    pub fn is_game_over(&mut self) -> IsolationResult<Option<Player>> {
        if self.winner.is_none() {
            self.is_terminal_for(self.turn)?;
        }
        Ok(self.winner)
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..BOARD_SIZE as u8 {
            for col in 0..BOARD_SIZE as u8 {
                if col > 0 {
                    write!(f, " ")?;
                }
                write!(f, "{}", self.get(Pos::new(row, col)).to_char())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// A simulated move in progress. Restores the board on drop.
pub struct Simulation<'a> {
    board: &'a mut Board,
    from: Pos,
    to: Pos,
    player: Player,
}

impl Deref for Simulation<'_> {
    type Target = Board;

    fn deref(&self) -> &Board {
        self.board
    }
}

impl DerefMut for Simulation<'_> {
    fn deref_mut(&mut self) -> &mut Board {
        self.board
    }
}

impl Drop for Simulation<'_> {
    fn drop(&mut self) {
        self.board.place(self.from, Cell::Occupied(self.player));
        self.board.place(self.to, Cell::Empty);
    }
}
