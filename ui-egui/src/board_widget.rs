// SPDX-License-Identifier: MIT OR Apache-2.0

//! Othello board widget: grid, stones, hover highlight, click mapping.

use eframe::egui::{self, Align2, Color32, FontId, Pos2, Rect, Sense, Stroke, Vec2};
use yesno_core::{Game, Phase, Side, BOARD_SIZE};

const BOARD_GREEN: Color32 = Color32::from_rgb(0, 128, 72);
const GRID_LINE: Color32 = Color32::from_rgb(0, 96, 52);
const HOVER_FILL: Color32 = Color32::from_rgba_premultiplied(255, 255, 255, 40);

/// Widget for rendering and interacting with the board
pub struct BoardWidget {
    cell_size: f32,
    hover: Option<(usize, usize)>,
}

impl BoardWidget {
    pub fn new() -> Self {
        Self {
            cell_size: 64.0,
            hover: None,
        }
    }

    /// Render the board and return the clicked cell, if any
    pub fn render(&mut self, ui: &mut egui::Ui, game: &Game) -> Option<(usize, usize)> {
        let available = ui.available_size();
        self.cell_size = (available.min_elem() / BOARD_SIZE as f32).clamp(32.0, 72.0);
        let board_px = self.cell_size * BOARD_SIZE as f32;

        let (rect, response) = ui.allocate_exact_size(Vec2::splat(board_px), Sense::click());
        self.hover = response
            .hover_pos()
            .and_then(|pos| pos_to_cell(pos, rect.min, self.cell_size));

        if ui.is_rect_visible(rect) {
            self.paint_board(ui, rect, game);
        }

        if response.clicked() {
            if let Some(pos) = response.interact_pointer_pos() {
                return pos_to_cell(pos, rect.min, self.cell_size);
            }
        }
        None
    }

    fn paint_board(&self, ui: &egui::Ui, rect: Rect, game: &Game) {
        let painter = ui.painter_at(rect);
        painter.rect_filled(rect, 0.0, BOARD_GREEN);

        // Highlight the hovered cell when a human move is currently legal.
        let human_turn = game.ai_side() != Some(game.current_side());
        if human_turn && game.phase() == Phase::ReadyToPlace {
            if let Some((row, col)) = self.hover {
                if game.board().is_valid_move(row, col, game.current_side()) {
                    painter.rect_filled(self.cell_rect(rect, row, col), 0.0, HOVER_FILL);
                }
            }
        }

        let stroke = Stroke::new(2.0, GRID_LINE);
        for i in 1..BOARD_SIZE {
            let offset = i as f32 * self.cell_size;
            painter.line_segment(
                [
                    Pos2::new(rect.min.x + offset, rect.min.y),
                    Pos2::new(rect.min.x + offset, rect.max.y),
                ],
                stroke,
            );
            painter.line_segment(
                [
                    Pos2::new(rect.min.x, rect.min.y + offset),
                    Pos2::new(rect.max.x, rect.min.y + offset),
                ],
                stroke,
            );
        }

        let radius = self.cell_size / 2.0 - 5.0;
        let label_font = FontId::proportional((self.cell_size * 0.32).max(12.0));
        for row in 0..BOARD_SIZE {
            for col in 0..BOARD_SIZE {
                let Some(side) = game.board().get(row, col) else {
                    continue;
                };
                let center = self.cell_rect(rect, row, col).center();
                let (fill, text) = stone_colors(side);
                painter.circle_filled(center, radius, fill);
                painter.circle_stroke(center, radius, Stroke::new(1.0, GRID_LINE));
                painter.text(center, Align2::CENTER_CENTER, side.label(), label_font.clone(), text);
            }
        }
    }

    fn cell_rect(&self, rect: Rect, row: usize, col: usize) -> Rect {
        let min = Pos2::new(
            rect.min.x + col as f32 * self.cell_size,
            rect.min.y + row as f32 * self.cell_size,
        );
        Rect::from_min_size(min, Vec2::splat(self.cell_size))
    }
}

fn stone_colors(side: Side) -> (Color32, Color32) {
    match side {
        Side::Yes => (Color32::from_rgb(245, 245, 240), Color32::from_rgb(30, 30, 30)),
        Side::No => (Color32::from_rgb(30, 30, 30), Color32::from_rgb(245, 245, 240)),
    }
}

/// Map a screen position to (row, col), if it lands inside the board
fn pos_to_cell(pos: Pos2, origin: Pos2, cell_size: f32) -> Option<(usize, usize)> {
    let rel = pos - origin;
    if rel.x < 0.0 || rel.y < 0.0 {
        return None;
    }
    let col = (rel.x / cell_size) as usize;
    let row = (rel.y / cell_size) as usize;
    (row < BOARD_SIZE && col < BOARD_SIZE).then_some((row, col))
}
