//! Main application for the Isolation GUI

use eframe::egui;
use egui::{CentralPanel, Context, CornerRadius, Frame, RichText, SidePanel, TopBottomPanel};
use log::error;

use crate::board::Player;
use crate::engine::{MoveResult, MoveSource};
use crate::session::GameSession;

use super::board_view::BoardView;
use super::theme::*;

/// Main Isolation application
pub struct IsolationApp {
    session: GameSession,
    board_view: BoardView,
    /// Set when the engine should move on the next frame
    engine_due: bool,
    winner: Option<Player>,
    message: Option<String>,
    show_debug: bool,
}

impl IsolationApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, session: GameSession) -> Self {
        Self {
            session,
            board_view: BoardView::default(),
            engine_due: false,
            winner: None,
            message: None,
            show_debug: true,
        }
    }

    fn new_game(&mut self) {
        self.session.restart();
        self.engine_due = false;
        self.winner = None;
        self.message = None;
    }

    /// Refresh the winner after any move
    fn check_game_over(&mut self) {
        match self.session.game_over() {
            Ok(winner) => self.winner = winner,
            Err(err) => {
                error!("{err}");
                self.message = Some(err.to_string());
            }
        }
    }

    fn run_engine_turn(&mut self) {
        self.engine_due = false;
        if let Err(err) = self.session.play_engine_turn() {
            error!("engine move failed: {err}");
            self.message = Some(err.to_string());
        }
        self.check_game_over();
    }

    /// Render the top menu bar
    fn render_menu_bar(&mut self, ctx: &Context) {
        TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("Game", |ui| {
                    if ui.button("New Game (N)").clicked() {
                        self.new_game();
                        ui.close_menu();
                    }
                    if ui.button("Clear Cache").clicked() {
                        self.session.clear_cache();
                        ui.close_menu();
                    }
                });
                ui.menu_button("View", |ui| {
                    ui.checkbox(&mut self.show_debug, "Engine Panel (D)");
                });

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let ai = self.session.ai_player();
                    ui.label(format!(
                        "You: Player {} | Engine: Player {}",
                        ai.opponent().number(),
                        ai.number()
                    ));
                });
            });
        });
    }

    /// Render the side panel with game info
    fn render_side_panel(&mut self, ctx: &Context) {
        SidePanel::right("info_panel")
            .min_width(240.0)
            .max_width(280.0)
            .frame(Frame::new().fill(PANEL_BG))
            .show(ctx, |ui| {
                ui.add_space(12.0);
                ui.horizontal(|ui| {
                    ui.add_space(8.0);
                    ui.label(RichText::new("ISOLATION").size(22.0).strong().color(TEXT_PRIMARY));
                });
                ui.add_space(12.0);

                self.render_turn_card(ui);
                ui.add_space(10.0);

                if self.show_debug {
                    self.render_engine_card(ui);
                    ui.add_space(10.0);
                }

                if let Some(winner) = self.winner {
                    self.render_game_over_card(ui, winner);
                    ui.add_space(10.0);
                }

                if let Some(msg) = &self.message {
                    Frame::new()
                        .fill(MESSAGE_BG)
                        .corner_radius(CornerRadius::same(8))
                        .inner_margin(10.0)
                        .show(ui, |ui| {
                            ui.label(RichText::new(msg).size(11.0).color(TEXT_PRIMARY));
                        });
                }
            });
    }

    /// Helper to create a card frame
    fn card_frame() -> Frame {
        Frame::new()
            .fill(CARD_BG)
            .corner_radius(CornerRadius::same(8))
            .inner_margin(12.0)
    }

    fn render_turn_card(&self, ui: &mut egui::Ui) {
        let board = self.session.board();
        let turn = board.turn();
        let color = match turn {
            Player::One => PLAYER_ONE,
            Player::Two => PLAYER_TWO,
        };

        Self::card_frame().show(ui, |ui| {
            ui.label(RichText::new("TURN").size(10.0).color(TEXT_MUTED));
            ui.add_space(6.0);
            ui.label(
                RichText::new(format!("Player {}", turn.number()))
                    .size(18.0)
                    .strong()
                    .color(color),
            );

            let status = if self.winner.is_some() {
                ("Game over", WIN_HIGHLIGHT)
            } else if self.session.is_ai_turn() {
                ("Engine thinking...", STATUS_BUSY)
            } else {
                ("Your move", STATUS_READY)
            };
            ui.label(RichText::new(status.0).size(12.0).color(status.1));

            ui.add_space(6.0);
            ui.label(
                RichText::new(format!("Moves played: {}", board.move_count()))
                    .size(11.0)
                    .color(TEXT_SECONDARY),
            );
        });
    }

    fn render_engine_card(&self, ui: &mut egui::Ui) {
        Self::card_frame().show(ui, |ui| {
            ui.label(RichText::new("ENGINE").size(10.0).color(TEXT_MUTED));
            ui.add_space(6.0);

            match self.session.last_result() {
                Some(result) => Self::render_result(ui, result),
                None => {
                    ui.label(RichText::new("No engine move yet").size(10.0).color(TEXT_MUTED));
                }
            }

            ui.add_space(4.0);
            ui.label(
                RichText::new(format!(
                    "{} cached positions",
                    self.session.engine().cache().len()
                ))
                .size(10.0)
                .color(TEXT_MUTED),
            );
        });
    }

    fn render_result(ui: &mut egui::Ui, result: &MoveResult) {
        let source = match result.source {
            MoveSource::Cache => "Cache hit",
            MoveSource::Search => "Search",
        };
        ui.label(RichText::new(source).size(11.0).strong().color(STATUS_READY));

        if let Some(score) = result.score {
            ui.label(RichText::new(format!("Score: {score}")).size(10.0).color(TEXT_SECONDARY));
        }
        ui.label(
            RichText::new(format!("{}ms, {} nodes", result.time_ms, result.nodes))
                .size(10.0)
                .color(TEXT_SECONDARY),
        );
        if let Some(pos) = result.best_move {
            ui.label(RichText::new(format!("-> {pos}")).size(12.0).strong().color(WIN_HIGHLIGHT));
        }
    }

    fn render_game_over_card(&mut self, ui: &mut egui::Ui, winner: Player) {
        let text = if winner == self.session.ai_player() {
            format!("Player {} (engine) wins", winner.number())
        } else {
            format!("Player {} (you) win", winner.number())
        };

        Frame::new()
            .fill(WIN_CARD_BG)
            .corner_radius(CornerRadius::same(8))
            .inner_margin(16.0)
            .show(ui, |ui| {
                ui.vertical_centered(|ui| {
                    ui.label(RichText::new("GAME OVER").size(12.0).color(WIN_HIGHLIGHT));
                    ui.add_space(6.0);
                    ui.label(RichText::new(text).size(16.0).strong().color(TEXT_PRIMARY));
                    ui.add_space(10.0);
                    if ui.button("New Game").clicked() {
                        self.new_game();
                    }
                });
            });
    }

    /// Render the board and forward clicks to the session
    fn render_board(&mut self, ctx: &Context) {
        CentralPanel::default().show(ctx, |ui| {
            let clicked = self
                .board_view
                .show(ui, self.session.board(), self.winner.is_some());

            if let Some(pos) = clicked {
                match self.session.human_move(pos) {
                    Ok(()) => {
                        self.message = None;
                        self.check_game_over();
                    }
                    Err(err) => self.message = Some(err.to_string()),
                }
            }
        });
    }

    /// Handle keyboard shortcuts
    fn handle_input(&mut self, ctx: &Context) {
        let (toggle_debug, new_game) =
            ctx.input(|i| (i.key_pressed(egui::Key::D), i.key_pressed(egui::Key::N)));
        if toggle_debug {
            self.show_debug = !self.show_debug;
        }
        if new_game {
            self.new_game();
        }
    }
}

impl eframe::App for IsolationApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        self.handle_input(ctx);

        // Scheduled last frame, so the human move is already on screen
        if self.engine_due {
            self.run_engine_turn();
        }

        self.render_menu_bar(ctx);
        self.render_side_panel(ctx);
        self.render_board(ctx);

        if self.winner.is_none() && self.session.is_ai_turn() && !self.engine_due {
            self.engine_due = true;
            ctx.request_repaint();
        }
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        self.session.shutdown();
    }
}
