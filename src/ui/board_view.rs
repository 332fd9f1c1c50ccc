//! Board rendering for the Isolation GUI

use egui::{Align2, CornerRadius, FontId, Painter, Pos2, Rect, Sense, Stroke, Vec2};

use crate::board::{Board, Cell, Player, Pos, BOARD_SIZE};

use super::theme::*;

/// Board view handles rendering and input for the game board
pub struct BoardView {
    /// Side of one square in points
    cell_size: f32,
    /// Area covered by the 6x6 squares (margin excluded)
    grid_rect: Rect,
}

impl Default for BoardView {
    fn default() -> Self {
        Self {
            cell_size: 60.0,
            grid_rect: Rect::NOTHING,
        }
    }
}

impl BoardView {
    /// Render the board and return the clicked cell, if any.
    ///
    /// Clicks are reported whether or not the move is legal; the caller
    /// decides. Nothing is reported once the game is over.
    pub fn show(&mut self, ui: &mut egui::Ui, board: &Board, game_over: bool) -> Option<Pos> {
        let available = ui.available_size();
        let side = available.x.min(available.y) - 20.0;
        self.cell_size = (side - 2.0 * BOARD_MARGIN) / BOARD_SIZE as f32;

        let (response, painter) = ui.allocate_painter(Vec2::splat(side), Sense::click());
        self.grid_rect = Rect::from_min_size(
            response.rect.min + Vec2::splat(BOARD_MARGIN),
            Vec2::splat(self.cell_size * BOARD_SIZE as f32),
        );

        painter.rect_filled(response.rect, CornerRadius::same(4), BOARD_FRAME);
        self.draw_squares(&painter, board);
        self.draw_coordinates(&painter);

        let turn = board.turn();
        let hints = if game_over {
            Vec::new()
        } else {
            board.legal_moves(turn).unwrap_or_default()
        };
        for &pos in &hints {
            self.draw_hint(&painter, pos, legal_hint(), HINT_RADIUS_RATIO);
        }

        for (pos, cell) in board.cells() {
            if let Cell::Occupied(player) = cell {
                self.draw_queen(&painter, pos, player, player == turn && !game_over);
            }
        }

        if game_over {
            return None;
        }

        let hovered = response
            .hover_pos()
            .and_then(|p| cell_at_point(self.grid_rect, self.cell_size, p));
        if let Some(pos) = hovered {
            if hints.contains(&pos) {
                self.draw_hint(&painter, pos, hover_legal(), QUEEN_RADIUS_RATIO);
            }
            if response.clicked() {
                return Some(pos);
            }
        }
        None
    }

    fn cell_rect(&self, pos: Pos) -> Rect {
        let min = self.grid_rect.min
            + Vec2::new(pos.col as f32 * self.cell_size, pos.row as f32 * self.cell_size);
        Rect::from_min_size(min, Vec2::splat(self.cell_size))
    }

    /// Checkerboard with destroyed cells blacked out and crossed in red
    fn draw_squares(&self, painter: &Painter, board: &Board) {
        for (pos, cell) in board.cells() {
            let rect = self.cell_rect(pos);
            if cell == Cell::Destroyed {
                painter.rect_filled(rect, CornerRadius::ZERO, DESTROYED);
                let inset = rect.shrink(self.cell_size * CROSS_INSET_RATIO);
                let stroke = Stroke::new(3.0, DESTROYED_CROSS);
                painter.line_segment([inset.left_top(), inset.right_bottom()], stroke);
                painter.line_segment([inset.right_top(), inset.left_bottom()], stroke);
            } else {
                let fill = if (pos.row + pos.col) % 2 == 0 {
                    LIGHT_SQUARE
                } else {
                    DARK_SQUARE
                };
                painter.rect_filled(rect, CornerRadius::ZERO, fill);
            }
        }
    }

    /// Row and column indices along the left and top edges
    fn draw_coordinates(&self, painter: &Painter) {
        let font = FontId::proportional(13.0);
        for i in 0..BOARD_SIZE {
            let offset = (i as f32 + 0.5) * self.cell_size;

            let top = Pos2::new(self.grid_rect.min.x + offset, self.grid_rect.min.y - BOARD_MARGIN * 0.5);
            painter.text(top, Align2::CENTER_CENTER, i, font.clone(), LABEL);

            let left = Pos2::new(self.grid_rect.min.x - BOARD_MARGIN * 0.5, self.grid_rect.min.y + offset);
            painter.text(left, Align2::CENTER_CENTER, i, font.clone(), LABEL);
        }
    }

    fn draw_queen(&self, painter: &Painter, pos: Pos, player: Player, to_move: bool) {
        let center = self.cell_rect(pos).center();
        let radius = self.cell_size * QUEEN_RADIUS_RATIO;
        let fill = match player {
            Player::One => PLAYER_ONE,
            Player::Two => PLAYER_TWO,
        };

        if to_move {
            painter.circle_stroke(center, radius + 5.0, Stroke::new(3.0, TURN_RING));
        }
        painter.circle_filled(center, radius, fill);
        painter.circle_stroke(center, radius, Stroke::new(2.0, QUEEN_OUTLINE));
        painter.text(
            center,
            Align2::CENTER_CENTER,
            player.number(),
            FontId::proportional(radius),
            TEXT_PRIMARY,
        );
    }

    fn draw_hint(&self, painter: &Painter, pos: Pos, color: egui::Color32, ratio: f32) {
        let center = self.cell_rect(pos).center();
        painter.circle_filled(center, self.cell_size * ratio, color);
    }
}

/// Cell under `point`, if it lies on the grid.
fn cell_at_point(grid: Rect, cell_size: f32, point: Pos2) -> Option<Pos> {
    if !grid.contains(point) || cell_size <= 0.0 {
        return None;
    }
    let rel = point - grid.min;
    let col = (rel.x / cell_size).floor() as i32;
    let row = (rel.y / cell_size).floor() as i32;
    Pos::is_valid(row, col).then(|| Pos::new(row as u8, col as u8))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid() -> Rect {
        Rect::from_min_size(Pos2::new(10.0, 20.0), Vec2::splat(60.0 * BOARD_SIZE as f32))
    }

    #[test]
    fn test_click_maps_to_cell() {
        assert_eq!(cell_at_point(grid(), 60.0, Pos2::new(11.0, 21.0)), Some(Pos::new(0, 0)));
        assert_eq!(cell_at_point(grid(), 60.0, Pos2::new(10.0 + 150.0, 20.0 + 70.0)), Some(Pos::new(1, 2)));
        assert_eq!(cell_at_point(grid(), 60.0, Pos2::new(369.0, 379.0)), Some(Pos::new(5, 5)));
    }

    #[test]
    fn test_click_outside_grid() {
        assert_eq!(cell_at_point(grid(), 60.0, Pos2::new(5.0, 30.0)), None);
        assert_eq!(cell_at_point(grid(), 60.0, Pos2::new(30.0, 500.0)), None);
        assert_eq!(cell_at_point(Rect::NOTHING, 0.0, Pos2::new(0.0, 0.0)), None);
    }
}
