use super::game::SnakeGameUi;
use crate::command_sender::CommandSender;
use crate::config::{Config, ConfigManager, FileContentConfigProvider, YamlConfigSerializer};
use crate::state::{AppState, ClientCommand, SharedState};
use common::games::snake::{GameEndReason, GameOverSummary, SnakeSnapshot};
use common::leaderboard::LeaderboardEntry;
use common::log;
use eframe::egui;
use std::time::Duration;

type ClientConfigManager = ConfigManager<FileContentConfigProvider, Config, YamlConfigSerializer>;

const REPAINT_INTERVAL: Duration = Duration::from_millis(16);

fn end_reason_text(reason: GameEndReason) -> &'static str {
    match reason {
        GameEndReason::WallCollision => "Hit a sealed wall",
        GameEndReason::SelfCollision => "Bit your own tail",
        GameEndReason::ObstacleCollision => "Crashed into an obstacle",
        GameEndReason::BoardFull => "No room left on the board",
    }
}

fn rank_label(index: usize) -> String {
    match index {
        0 => "🥇".to_string(),
        1 => "🥈".to_string(),
        2 => "🥉".to_string(),
        _ => format!("{}.", index + 1),
    }
}

/// Space would type into the name field, so it only starts a run from outside it.
fn start_key_pressed(ctx: &egui::Context, name_has_focus: bool) -> bool {
    ctx.input(|i| {
        i.key_pressed(egui::Key::Enter) || (!name_has_focus && i.key_pressed(egui::Key::Space))
    })
}

pub struct MenuApp {
    shared_state: SharedState,
    command_sender: CommandSender,
    config_manager: ClientConfigManager,
    config: Config,
    player_name_input: String,
    name_focus_requested: bool,
    game_ui: SnakeGameUi,
}

impl MenuApp {
    pub fn new(
        shared_state: SharedState,
        command_sender: CommandSender,
        config_manager: ClientConfigManager,
        config: Config,
    ) -> Self {
        Self {
            shared_state,
            command_sender,
            config_manager,
            player_name_input: config.player_name.clone().unwrap_or_default(),
            config,
            name_focus_requested: false,
            game_ui: SnakeGameUi::new(),
        }
    }

    fn start_game(&mut self) {
        let player_name = self.player_name_input.trim().to_string();

        let saved_name = (!player_name.is_empty()).then(|| player_name.clone());
        if saved_name != self.config.player_name {
            self.config.player_name = saved_name;
            if let Err(e) = self.config_manager.set_config(&self.config) {
                log!("Failed to save config: {}", e);
            }
        }

        self.command_sender.send(ClientCommand::Start { player_name });
    }

    fn render_leaderboard(ui: &mut egui::Ui, entries: &[LeaderboardEntry], highlight: Option<(&str, u32)>) {
        ui.heading("Leaderboard");
        if entries.is_empty() {
            ui.label(egui::RichText::new("No scores yet").color(egui::Color32::GRAY));
            return;
        }

        egui::Grid::new("leaderboard_grid")
            .num_columns(3)
            .striped(true)
            .spacing([24.0, 4.0])
            .show(ui, |ui| {
                for (index, entry) in entries.iter().enumerate() {
                    let text = |value: String| {
                        let rich = egui::RichText::new(value);
                        if highlight == Some((entry.name.as_str(), entry.score)) {
                            rich.strong().color(egui::Color32::from_rgb(0x4a, 0xde, 0x80))
                        } else {
                            rich
                        }
                    };
                    ui.label(text(rank_label(index)));
                    ui.label(text(entry.name.clone()));
                    ui.label(text(entry.score.to_string()));
                    ui.end_row();
                }
            });
    }

    fn render_ready(&mut self, ui: &mut egui::Ui, ctx: &egui::Context, leaderboard: &[LeaderboardEntry]) {
        ui.vertical_centered(|ui| {
            ui.add_space(20.0);
            ui.heading(egui::RichText::new("NEON SNAKE").size(36.0).color(egui::Color32::from_rgb(0x4a, 0xde, 0x80)));
            ui.add_space(20.0);

            ui.label("Your name:");
            let response = ui.add(
                egui::TextEdit::singleline(&mut self.player_name_input)
                    .hint_text("Player")
                    .desired_width(200.0),
            );
            if !self.name_focus_requested {
                response.request_focus();
                self.name_focus_requested = true;
            }

            ui.add_space(10.0);
            let start_clicked = ui.button("Start").clicked();
            let start_pressed = start_key_pressed(ctx, response.has_focus());
            if start_clicked || start_pressed {
                self.start_game();
            }
            ui.label(egui::RichText::new("Enter or Space to start, arrows or WASD to steer").small());

            ui.add_space(20.0);
            Self::render_leaderboard(ui, leaderboard, None);
        });
    }

    fn render_game_over(
        &mut self,
        ui: &mut egui::Ui,
        ctx: &egui::Context,
        summary: &GameOverSummary,
        new_record: bool,
        leaderboard: &[LeaderboardEntry],
        last_snapshot: &Option<SnakeSnapshot>,
    ) {
        ui.vertical_centered(|ui| {
            ui.heading(egui::RichText::new("Game Over").size(32.0).color(egui::Color32::from_rgb(0xef, 0x44, 0x44)));
            ui.label(end_reason_text(summary.reason));
            ui.add_space(10.0);
            ui.heading(format!("Score: {}", summary.score));
            ui.label(format!("Level: {}", summary.level));
            if new_record {
                ui.label(
                    egui::RichText::new("New record!")
                        .size(20.0)
                        .color(egui::Color32::from_rgb(0xfa, 0xcc, 0x15)),
                );
            }

            ui.add_space(10.0);
            Self::render_leaderboard(ui, leaderboard, Some((summary.player_name.as_str(), summary.score)));

            ui.add_space(10.0);
            let restart_clicked = ui.button("Play again").clicked();
            if restart_clicked || ctx.input(|i| i.key_pressed(egui::Key::Enter)) {
                self.command_sender.send(ClientCommand::Restart);
            }
        });

        if let Some(snapshot) = last_snapshot {
            ui.separator();
            egui::ScrollArea::both().show(ui, |ui| {
                SnakeGameUi::render_field(ui, snapshot);
            });
        }
    }
}

impl eframe::App for MenuApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if !self.shared_state.has_context() {
            self.shared_state.set_context(ctx.clone());
        }

        if let Some(error) = self.shared_state.get_error() {
            egui::Window::new("Error")
                .collapsible(false)
                .show(ctx, |ui| {
                    ui.label(&error);
                    if ui.button("OK").clicked() {
                        self.shared_state.clear_error();
                    }
                });
        }

        let current_state = self.shared_state.get_state();
        egui::CentralPanel::default().show(ctx, |ui| {
            match current_state {
                AppState::Ready { leaderboard } => {
                    self.render_ready(ui, ctx, &leaderboard);
                }
                AppState::InGame { snapshot } => {
                    self.name_focus_requested = false;
                    self.game_ui.render_game(ui, ctx, &snapshot, &self.command_sender);
                    ctx.request_repaint_after(REPAINT_INTERVAL);
                }
                AppState::GameOver { summary, new_record, leaderboard, last_snapshot } => {
                    self.render_game_over(ui, ctx, &summary, new_record, &leaderboard, &last_snapshot);
                }
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rank_labels() {
        assert_eq!(rank_label(0), "🥇");
        assert_eq!(rank_label(2), "🥉");
        assert_eq!(rank_label(3), "4.");
        assert_eq!(rank_label(9), "10.");
    }

    fn pressed_with(key: egui::Key, name_has_focus: bool) -> bool {
        let ctx = egui::Context::default();
        let input = egui::RawInput {
            events: vec![egui::Event::Key {
                key,
                physical_key: None,
                pressed: true,
                repeat: false,
                modifiers: egui::Modifiers::default(),
            }],
            ..Default::default()
        };
        let mut pressed = false;
        let _ = ctx.run(input, |ctx| {
            pressed = start_key_pressed(ctx, name_has_focus);
        });
        pressed
    }

    #[test]
    fn test_space_starts_only_outside_name_field() {
        assert!(pressed_with(egui::Key::Space, false));
        assert!(!pressed_with(egui::Key::Space, true));
    }

    #[test]
    fn test_enter_always_starts() {
        assert!(pressed_with(egui::Key::Enter, true));
        assert!(pressed_with(egui::Key::Enter, false));
        assert!(!pressed_with(egui::Key::A, false));
    }
}
