use std::time::Duration;

use eframe::egui;
use snake_engine::input::{primary_action, resolve_swipe};
use snake_engine::{Direction, InputIntent, Phase, SnakeSnapshot, StartPolicy};

use super::board::render_board;
use crate::command_sender::CommandSender;
use crate::config::ClientConfig;
use crate::state::SharedState;

const FALLBACK_REPAINT: Duration = Duration::from_millis(250);

pub struct SnakeApp {
    config: ClientConfig,
    shared_state: SharedState,
    command_sender: CommandSender,
    drag_delta: Option<egui::Vec2>,
}

impl SnakeApp {
    pub fn new(config: ClientConfig, shared_state: SharedState, command_sender: CommandSender) -> Self {
        Self {
            config,
            shared_state,
            command_sender,
            drag_delta: None,
        }
    }

    fn handle_keyboard(&self, ctx: &egui::Context, snapshot: &SnakeSnapshot) {
        let intents: Vec<InputIntent> = ctx.input(|i| {
            let mut intents = Vec::new();
            if i.key_pressed(egui::Key::ArrowUp) || i.key_pressed(egui::Key::W) {
                intents.push(InputIntent::Direction(Direction::Up));
            }
            if i.key_pressed(egui::Key::ArrowDown) || i.key_pressed(egui::Key::S) {
                intents.push(InputIntent::Direction(Direction::Down));
            }
            if i.key_pressed(egui::Key::ArrowLeft) || i.key_pressed(egui::Key::A) {
                intents.push(InputIntent::Direction(Direction::Left));
            }
            if i.key_pressed(egui::Key::ArrowRight) || i.key_pressed(egui::Key::D) {
                intents.push(InputIntent::Direction(Direction::Right));
            }
            if i.key_pressed(egui::Key::Space) {
                intents.push(primary_action(snapshot.phase));
            }
            if i.key_pressed(egui::Key::P) {
                intents.push(InputIntent::TogglePause);
            }
            if i.key_pressed(egui::Key::R) {
                intents.push(InputIntent::Restart);
            }
            intents
        });

        for intent in intents {
            self.command_sender.send_intent(intent);
        }
    }

    /// Accumulates a drag on the board and turns it into a direction once the
    /// pointer is released.
    fn handle_swipe(&mut self, response: &egui::Response) {
        if response.drag_started() {
            self.drag_delta = Some(egui::Vec2::ZERO);
        }
        if response.dragged()
            && let Some(total) = self.drag_delta.as_mut()
        {
            *total += response.drag_delta();
        }
        if response.drag_stopped()
            && let Some(total) = self.drag_delta.take()
            && let Some(direction) = resolve_swipe(total.x, total.y, self.config.swipe_threshold)
        {
            self.command_sender
                .send_intent(InputIntent::Direction(direction));
        }
    }

    fn ready_hint(&self) -> &'static str {
        match self.config.snake.start_policy {
            StartPolicy::ExplicitStart => "Space to start, Space again to pause",
            StartPolicy::FirstDirection => "Press a direction to start",
        }
    }

    fn render_controls(&self, ui: &mut egui::Ui, snapshot: &SnakeSnapshot) {
        ui.horizontal(|ui| {
            match snapshot.phase {
                Phase::Ready => {
                    if ui.button("Start").clicked() {
                        self.command_sender.send_intent(InputIntent::Start);
                    }
                }
                Phase::Playing => {
                    if ui.button("Pause").clicked() {
                        self.command_sender.send_intent(InputIntent::TogglePause);
                    }
                }
                Phase::Paused => {
                    if ui.button("Resume").clicked() {
                        self.command_sender.send_intent(InputIntent::TogglePause);
                    }
                }
                Phase::GameOver => {}
            }
            if ui.button("New game").clicked() {
                self.command_sender.send_intent(InputIntent::Restart);
            }
        });

        ui.add_space(6.0);
        ui.horizontal(|ui| {
            ui.add_space(28.0);
            self.direction_button(ui, "^", Direction::Up);
        });
        ui.horizontal(|ui| {
            self.direction_button(ui, "<", Direction::Left);
            ui.add_space(24.0);
            self.direction_button(ui, ">", Direction::Right);
        });
        ui.horizontal(|ui| {
            ui.add_space(28.0);
            self.direction_button(ui, "v", Direction::Down);
        });
    }

    fn direction_button(&self, ui: &mut egui::Ui, label: &str, direction: Direction) {
        let button = egui::Button::new(label).min_size(egui::vec2(24.0, 24.0));
        if ui.add(button).clicked() {
            self.command_sender
                .send_intent(InputIntent::Direction(direction));
        }
    }
}

impl eframe::App for SnakeApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if !self.shared_state.has_context() {
            self.shared_state.set_context(ctx.clone());
        }

        if self.shared_state.should_close() {
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
        }

        if let Some(error) = self.shared_state.get_error() {
            egui::Window::new("Error")
                .collapsible(false)
                .show(ctx, |ui| {
                    ui.label(&error);
                    if ui.button("OK").clicked() {
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                    }
                });
        }

        let snapshot = self.shared_state.get_snapshot();

        egui::CentralPanel::default().show(ctx, |ui| {
            let Some(snapshot) = snapshot else {
                ui.centered_and_justified(|ui| {
                    ui.label("Starting game...");
                });
                return;
            };

            self.handle_keyboard(ctx, &snapshot);

            ui.vertical_centered(|ui| {
                ui.horizontal(|ui| {
                    ui.heading(format!("Score: {}", snapshot.score));
                    ui.add_space(20.0);
                    ui.heading(format!("Best: {}", snapshot.high_score));
                });
                ui.add_space(8.0);

                let response = render_board(ui, &snapshot, self.config.cell_size, self.ready_hint());
                self.handle_swipe(&response);

                ui.add_space(8.0);
                self.render_controls(ui, &snapshot);
            });
        });

        ctx.request_repaint_after(FALLBACK_REPAINT);
    }
}
