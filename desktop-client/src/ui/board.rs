use eframe::egui;
use snake_engine::{DeathReason, Phase, Point, SnakeSnapshot};

use crate::colors;

/// Paints the grid, snake and food, plus the phase overlay. The returned
/// response senses drags so the caller can turn them into swipes.
pub fn render_board(
    ui: &mut egui::Ui,
    snapshot: &SnakeSnapshot,
    cell_size: f32,
    ready_hint: &str,
) -> egui::Response {
    let size = egui::vec2(
        snapshot.grid.width as f32 * cell_size,
        snapshot.grid.height as f32 * cell_size,
    );
    let (rect, response) = ui.allocate_exact_size(size, egui::Sense::click_and_drag());
    let painter = ui.painter_at(rect);

    painter.rect_filled(rect, 6.0, colors::BOARD_BACKGROUND);
    for y in 0..snapshot.grid.height {
        for x in 0..snapshot.grid.width {
            if (x + y) % 2 == 1 {
                painter.rect_filled(cell_rect(rect.min, Point::new(x, y), cell_size), 0.0, colors::BOARD_CHECKER);
            }
        }
    }

    if let Some(food) = snapshot.food {
        let center = cell_rect(rect.min, food, cell_size).center();
        painter.circle_filled(center, cell_size * 0.35, colors::FOOD);
    }

    let length = snapshot.snake.len();
    for (index, segment) in snapshot.snake.iter().enumerate().rev() {
        let segment_rect = cell_rect(rect.min, *segment, cell_size).shrink(1.0);
        painter.rect_filled(segment_rect, cell_size * 0.2, colors::segment_color(index, length));
    }

    render_overlay(&painter, rect, snapshot, ready_hint);

    response
}

fn cell_rect(origin: egui::Pos2, cell: Point, cell_size: f32) -> egui::Rect {
    egui::Rect::from_min_size(
        origin + egui::vec2(cell.x as f32 * cell_size, cell.y as f32 * cell_size),
        egui::vec2(cell_size, cell_size),
    )
}

fn render_overlay(
    painter: &egui::Painter,
    rect: egui::Rect,
    snapshot: &SnakeSnapshot,
    ready_hint: &str,
) {
    let lines: Vec<(String, f32, egui::Color32)> = match snapshot.phase {
        Phase::Playing => return,
        Phase::Ready => vec![
            ("Ready?".to_string(), 36.0, egui::Color32::WHITE),
            ("Arrows / WASD to steer".to_string(), 18.0, egui::Color32::LIGHT_GRAY),
            (ready_hint.to_string(), 14.0, egui::Color32::GRAY),
        ],
        Phase::Paused => vec![
            ("Paused".to_string(), 36.0, egui::Color32::WHITE),
            ("Space or P to resume".to_string(), 16.0, egui::Color32::LIGHT_GRAY),
        ],
        Phase::GameOver => {
            let mut lines = vec![
                ("Game over!".to_string(), 40.0, egui::Color32::WHITE),
                (death_reason_text(snapshot.death_reason).to_string(), 16.0, egui::Color32::LIGHT_GRAY),
                (format!("Score: {}", snapshot.score), 24.0, egui::Color32::WHITE),
            ];
            if snapshot.is_new_high_score() {
                lines.push(("New record!".to_string(), 20.0, colors::HIGHLIGHT));
            }
            lines.push(("Space to play again".to_string(), 14.0, egui::Color32::GRAY));
            lines
        }
    };

    let background = if snapshot.phase == Phase::GameOver {
        colors::GAME_OVER_OVERLAY
    } else {
        colors::OVERLAY
    };
    painter.rect_filled(rect, 6.0, background);

    let total_height: f32 = lines.iter().map(|(_, size, _)| size * 1.4).sum();
    let mut y = rect.center().y - total_height / 2.0;
    for (text, size, color) in lines {
        let line_height = size * 1.4;
        painter.text(
            egui::pos2(rect.center().x, y + line_height / 2.0),
            egui::Align2::CENTER_CENTER,
            text,
            egui::FontId::proportional(size),
            color,
        );
        y += line_height;
    }
}

fn death_reason_text(reason: Option<DeathReason>) -> &'static str {
    match reason {
        Some(DeathReason::WallCollision) => "You hit the wall",
        Some(DeathReason::SelfCollision) => "You bit your own tail",
        Some(DeathReason::BoardFilled) => "The board is full. You win!",
        None => "",
    }
}
