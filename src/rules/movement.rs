//! Queen-movement legality for Isolation
//!
//! A queen moves any distance along a rank, file or diagonal to an empty
//! cell. Every cell strictly between source and destination must be empty:
//! destroyed cells and the other queen block the path.

use crate::board::{Board, Pos, BOARD_SIZE};

/// The eight queen directions as (row delta, col delta)
pub const QUEEN_DIRECTIONS: [(i32, i32); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Check whether a queen on `from` may move to `to`.
///
/// Off-board positions are never legal.
pub fn is_legal(board: &Board, from: Pos, to: Pos) -> bool {
    if !from.in_bounds() || !to.in_bounds() {
        return false;
    }

    let dr = to.row as i32 - from.row as i32;
    let dc = to.col as i32 - from.col as i32;

    // Zero-length moves are never legal, whatever `from` holds
    if dr == 0 && dc == 0 {
        return false;
    }

    if !board.is_empty(to) {
        return false;
    }

    if dr != 0 && dc != 0 && dr.abs() != dc.abs() {
        return false;
    }

    let (step_r, step_c) = (dr.signum(), dc.signum());
    let distance = dr.abs().max(dc.abs());
    (1..distance).all(|i| {
        let r = from.row as i32 + step_r * i;
        let c = from.col as i32 + step_c * i;
        board.is_empty(Pos::new(r as u8, c as u8))
    })
}

/// All legal destinations from `from`, scanned in row-major order.
pub fn legal_moves_from(board: &Board, from: Pos) -> Vec<Pos> {
    let mut moves = Vec::with_capacity(MAX_MOVES);
    moves.extend(Pos::all().filter(|&to| is_legal(board, from, to)));
    moves
}

/// Number of legal destinations from `from`.
///
/// Walks the eight rays instead of scanning the board; the result equals
/// `legal_moves_from(board, from).len()`.
pub fn count_legal_moves(board: &Board, from: Pos) -> usize {
    let mut count = 0;
    for (dr, dc) in QUEEN_DIRECTIONS {
        let mut r = from.row as i32 + dr;
        let mut c = from.col as i32 + dc;
        while Pos::is_valid(r, c) && board.is_empty(Pos::new(r as u8, c as u8)) {
            count += 1;
            r += dr;
            c += dc;
        }
    }
    count
}

/// Whether any legal move exists from `from`.
///
/// A queen can move at all iff one of its neighbours is empty.
#[inline]
pub fn has_legal_move(board: &Board, from: Pos) -> bool {
    QUEEN_DIRECTIONS.iter().any(|&(dr, dc)| {
        let r = from.row as i32 + dr;
        let c = from.col as i32 + dc;
        Pos::is_valid(r, c) && board.is_empty(Pos::new(r as u8, c as u8))
    })
}

/// Upper bound on legal moves from any cell (used for buffer sizing)
pub const MAX_MOVES: usize = 4 * (BOARD_SIZE - 1);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Cell, Player, TOTAL_CELLS};
    use proptest::prelude::*;

    fn start() -> Board {
        Board::new()
    }

    #[test]
    fn test_opening_moves_from_corner() {
        let board = start();
        let moves = legal_moves_from(&board, Pos::new(0, 0));

        // 5 along the row, 5 along the column, 4 along the diagonal
        // (the diagonal stops short of the opponent at (5, 5))
        let row = moves.iter().filter(|p| p.row == 0).count();
        let col = moves.iter().filter(|p| p.col == 0).count();
        let diag = moves.iter().filter(|p| p.row == p.col).count();
        assert_eq!(row, 5);
        assert_eq!(col, 5);
        assert_eq!(diag, 4);
        assert_eq!(moves.len(), row + col + diag);
        assert_eq!(moves.len(), count_legal_moves(&board, Pos::new(0, 0)));
    }

    #[test]
    fn test_moves_are_row_major() {
        let board = start();
        let moves = legal_moves_from(&board, Pos::new(0, 0));
        let mut sorted = moves.clone();
        sorted.sort();
        assert_eq!(moves, sorted);
    }

    #[test]
    fn test_zero_length_move_rejected() {
        let mut board = Board::empty();
        let pos = Pos::new(2, 2);
        board.place(pos, Cell::Occupied(Player::One));
        assert!(!is_legal(&board, pos, pos));

        // Still illegal when the cell itself happens to be empty
        board.place(pos, Cell::Empty);
        assert!(!is_legal(&board, pos, pos));
    }

    #[test]
    fn test_off_board_positions_rejected() {
        let board = start();
        assert!(!is_legal(&board, Pos::new(0, 0), Pos { row: 0, col: 6 }));
        assert!(!is_legal(&board, Pos::new(0, 0), Pos { row: 6, col: 6 }));
        assert!(!is_legal(&board, Pos { row: 0, col: 7 }, Pos::new(0, 3)));
        assert!(Pos::new(5, 5).in_bounds());
        assert!(!Pos { row: 6, col: 0 }.in_bounds());
    }

    #[test]
    fn test_non_queen_direction_rejected() {
        let board = start();
        // Knight jump
        assert!(!is_legal(&board, Pos::new(0, 0), Pos::new(1, 2)));
        assert!(!is_legal(&board, Pos::new(0, 0), Pos::new(2, 5)));
    }

    #[test]
    fn test_destination_must_be_empty() {
        let mut board = start();
        board.place(Pos::new(0, 3), Cell::Destroyed);
        assert!(!is_legal(&board, Pos::new(0, 0), Pos::new(0, 3)));
        // Opponent's cell
        assert!(!is_legal(&board, Pos::new(0, 0), Pos::new(5, 5)));
    }

    #[test]
    fn test_destroyed_cell_blocks_path() {
        let mut board = start();
        board.place(Pos::new(0, 2), Cell::Destroyed);
        assert!(is_legal(&board, Pos::new(0, 0), Pos::new(0, 1)));
        assert!(!is_legal(&board, Pos::new(0, 0), Pos::new(0, 3)));
        assert!(!is_legal(&board, Pos::new(0, 0), Pos::new(0, 5)));
    }

    #[test]
    fn test_opponent_blocks_path() {
        let mut board = Board::empty();
        board.place(Pos::new(0, 0), Cell::Occupied(Player::One));
        board.place(Pos::new(2, 2), Cell::Occupied(Player::Two));
        assert!(is_legal(&board, Pos::new(0, 0), Pos::new(1, 1)));
        assert!(!is_legal(&board, Pos::new(0, 0), Pos::new(3, 3)));
    }

    #[test]
    fn test_backwards_diagonal() {
        let mut board = Board::empty();
        board.place(Pos::new(4, 1), Cell::Occupied(Player::One));
        assert!(is_legal(&board, Pos::new(4, 1), Pos::new(1, 4)));
        board.place(Pos::new(2, 3), Cell::Destroyed);
        assert!(!is_legal(&board, Pos::new(4, 1), Pos::new(1, 4)));
        assert!(is_legal(&board, Pos::new(4, 1), Pos::new(3, 2)));
    }

    #[test]
    fn test_has_legal_move_when_boxed_in() {
        let mut board = Board::empty();
        let pos = Pos::new(0, 0);
        board.place(pos, Cell::Occupied(Player::One));
        board.place(Pos::new(0, 1), Cell::Destroyed);
        board.place(Pos::new(1, 0), Cell::Destroyed);
        assert!(has_legal_move(&board, pos));

        board.place(Pos::new(1, 1), Cell::Occupied(Player::Two));
        assert!(!has_legal_move(&board, pos));
        assert_eq!(count_legal_moves(&board, pos), 0);
        assert!(legal_moves_from(&board, pos).is_empty());
    }

    #[test]
    fn test_max_moves_bound() {
        let mut board = Board::empty();
        let center = Pos::new(2, 2);
        board.place(center, Cell::Occupied(Player::One));
        assert!(count_legal_moves(&board, center) <= MAX_MOVES);
    }

    fn arb_board() -> impl Strategy<Value = (Board, Pos, Pos)> {
        (
            proptest::collection::vec(prop_oneof![3 => Just(Cell::Empty), 1 => Just(Cell::Destroyed)], TOTAL_CELLS),
            0..TOTAL_CELLS,
            0..TOTAL_CELLS,
        )
            .prop_map(|(cells, from, to)| {
                let mut board = Board::empty();
                for (idx, cell) in cells.into_iter().enumerate() {
                    board.place(Pos::from_index(idx), cell);
                }
                let from = Pos::from_index(from);
                board.place(from, Cell::Occupied(Player::One));
                (board, from, Pos::from_index(to))
            })
    }

    /// Reference: walk each ray until the first non-empty cell.
    fn reachable(board: &Board, from: Pos) -> Vec<Pos> {
        let mut out = Vec::new();
        for (dr, dc) in QUEEN_DIRECTIONS {
            let mut r = from.row as i32 + dr;
            let mut c = from.col as i32 + dc;
            while Pos::is_valid(r, c) && board.is_empty(Pos::new(r as u8, c as u8)) {
                out.push(Pos::new(r as u8, c as u8));
                r += dr;
                c += dc;
            }
        }
        out.sort();
        out
    }

    proptest! {
        #[test]
        fn prop_legal_iff_unobstructed_ray((board, from, to) in arb_board()) {
            let expected = reachable(&board, from).contains(&to);
            prop_assert_eq!(is_legal(&board, from, to), expected);
        }

        #[test]
        fn prop_scan_matches_ray_walk((board, from, _to) in arb_board()) {
            let scanned = legal_moves_from(&board, from);
            prop_assert_eq!(&scanned, &reachable(&board, from));
            prop_assert_eq!(count_legal_moves(&board, from), scanned.len());
            prop_assert_eq!(has_legal_move(&board, from), !scanned.is_empty());
        }
    }
}
