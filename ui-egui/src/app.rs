// SPDX-License-Identifier: MIT OR Apache-2.0

//! Top-level eframe application: frame loop, info panel, and overlays.

use crate::board_widget::BoardWidget;
use eframe::egui::{self, Align2, Color32, Id, LayerId, Order, Vec2};
use std::time::{Duration, Instant};
use yesno_core::Game;
use yesno_network::HttpFetchBackend;

pub struct App {
    game: Game,
    board: BoardWidget,
    backend: HttpFetchBackend,
}

impl App {
    pub fn new(game: Game, backend: HttpFetchBackend) -> Self {
        Self {
            game,
            board: BoardWidget::new(),
            backend,
        }
    }

    fn info_panel(&self, ui: &mut egui::Ui) {
        ui.add_space(12.0);
        ui.heading("Yes/No Othello");
        ui.separator();

        let (yes, no) = self.game.scores();
        ui.label(format!("YES: {yes}"));
        ui.label(format!("NO : {no}"));
        ui.add_space(8.0);
        ui.label(format!("TURN : {}", self.game.current_side().label()));
        let stone = self.game.active_stone().map_or("-", |s| s.label());
        ui.label(format!("STONE: {stone}"));
        let answer = self.game.last_answer().map_or("-", |a| a.label());
        ui.label(format!("API  : {answer}"));

        ui.separator();
        ui.label(self.game.status());
        if self.game.awaiting_answer() {
            ui.label("Fetching result...");
        }
        if !self.game.is_running() {
            ui.add_space(12.0);
            ui.heading(self.game.winner_text());
        }
    }

    fn draw_overlays(&self, ctx: &egui::Context) {
        if self.game.maybe_flash_ticks() > 0 {
            let painter =
                ctx.layer_painter(LayerId::new(Order::Foreground, Id::new("maybe_flash")));
            painter.rect_filled(
                ctx.screen_rect(),
                0.0,
                Color32::from_rgba_unmultiplied(255, 210, 0, 60),
            );
        }

        if let Some(overlay) = self.game.overlay() {
            egui::Area::new(Id::new("answer_overlay"))
                .anchor(Align2::CENTER_CENTER, Vec2::ZERO)
                .show(ctx, |ui| {
                    egui::Frame::popup(ui.style()).show(ui, |ui| {
                        ui.vertical_centered(|ui| {
                            ui.heading(format!("API says: {}", overlay.answer.label()));
                            ui.label(format!("Turn: {}", overlay.turn.label()));
                            ui.label(format!("(animation ready, {} KB)", overlay.image.len() / 1024));
                            ui.add_space(8.0);
                            ui.label("Click anywhere to continue");
                        });
                    });
                });
        } else if self.game.banner_active() {
            egui::Area::new(Id::new("turn_banner"))
                .anchor(Align2::CENTER_CENTER, Vec2::ZERO)
                .show(ctx, |ui| {
                    egui::Frame::popup(ui.style()).show(ui, |ui| {
                        ui.vertical_centered(|ui| {
                            ui.heading(format!("{} turn!!", self.game.current_side().label()));
                            ui.label("Get ready...");
                        });
                    });
                });
        }
    }
}

impl eframe::App for App {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = Instant::now();
        self.game.poll(now);
        self.game.ai_act(now);

        // Any click or key dismisses the answer overlay.
        if self.game.overlay().is_some() {
            let dismissed = ctx.input(|i| {
                i.pointer.any_pressed()
                    || i.key_pressed(egui::Key::Space)
                    || i.key_pressed(egui::Key::Enter)
                    || i.key_pressed(egui::Key::Escape)
            });
            if dismissed {
                self.game.dismiss_overlay();
            }
        }

        egui::SidePanel::right("info_panel")
            .exact_width(240.0)
            .resizable(false)
            .show(ctx, |ui| self.info_panel(ui));

        egui::CentralPanel::default().show(ctx, |ui| {
            let human_turn = self.game.ai_side() != Some(self.game.current_side());
            if let Some((row, col)) = self.board.render(ui, &self.game) {
                if human_turn {
                    if let Err(err) = self.game.attempt_placement(row, col) {
                        tracing::debug!(row, col, %err, "placement rejected");
                    }
                }
            }
        });

        self.draw_overlays(ctx);

        if self.game.is_running() {
            ctx.request_repaint_after(Duration::from_millis(16));
        }
    }
}

impl Drop for App {
    fn drop(&mut self) {
        self.backend.shutdown();
    }
}
