use crate::command_sender::CommandSender;
use crate::state::ClientCommand;
use crate::ui::CELL_SIZE;
use common::games::snake::{Direction, ParticleKind, Point, SnakeSnapshot};
use eframe::egui;
use egui::{Color32, Pos2, Rect, Stroke, Vec2};

const BACKGROUND: Color32 = Color32::from_rgb(0x1e, 0x29, 0x3b);
const FOOD: Color32 = Color32::from_rgb(0xf4, 0x72, 0xb6);
const SNAKE_BODY: Color32 = Color32::from_rgb(0x4a, 0xde, 0x80);
const SNAKE_HEAD: Color32 = Color32::from_rgb(0x86, 0xef, 0xac);
const BONUS: Color32 = Color32::from_rgb(0xfa, 0xcc, 0x15);
const OBSTACLE: Color32 = Color32::from_rgb(0x64, 0x74, 0x8b);
const LEVEL_UP: Color32 = Color32::from_rgb(0x22, 0xd3, 0xee);
const SEALED_WALL: Color32 = Color32::from_rgb(0xef, 0x44, 0x44);

fn particle_color(kind: ParticleKind) -> Color32 {
    match kind {
        ParticleKind::Food => FOOD,
        ParticleKind::Bonus => BONUS,
        ParticleKind::LevelUp => LEVEL_UP,
    }
}

#[derive(Default)]
pub struct SnakeGameUi;

impl SnakeGameUi {
    pub fn new() -> Self {
        Self
    }

    pub fn render_game(
        &mut self,
        ui: &mut egui::Ui,
        ctx: &egui::Context,
        snapshot: &Option<SnakeSnapshot>,
        command_sender: &CommandSender,
    ) {
        let Some(snapshot) = snapshot else {
            ui.centered_and_justified(|ui| {
                ui.spinner();
            });
            return;
        };

        if !snapshot.game_over {
            self.handle_input(ctx, command_sender);
        }

        ui.horizontal(|ui| {
            ui.heading(format!("Score: {}", snapshot.score));
            ui.separator();
            ui.heading(format!("Level: {}", snapshot.level));
            ui.separator();
            ui.label(&snapshot.player_name);
        });
        ui.separator();

        Self::render_field(ui, snapshot);
    }

    pub fn render_field(ui: &mut egui::Ui, snapshot: &SnakeSnapshot) {
        let width = snapshot.field_size.width as f32 * CELL_SIZE;
        let height = snapshot.field_size.height as f32 * CELL_SIZE;
        let (response, painter) =
            ui.allocate_painter(Vec2::new(width, height), egui::Sense::hover());
        let rect = response.rect;
        painter.rect_filled(rect, 0.0, BACKGROUND);

        let cell_rect = |point: &Point| {
            Rect::from_min_size(
                Pos2::new(
                    rect.min.x + point.x as f32 * CELL_SIZE,
                    rect.min.y + point.y as f32 * CELL_SIZE,
                ),
                Vec2::splat(CELL_SIZE),
            )
        };

        for obstacle in &snapshot.obstacles {
            painter.rect_filled(cell_rect(obstacle).shrink(1.0), 3.0, OBSTACLE);
        }

        if let Some(food) = &snapshot.food {
            painter.circle_filled(cell_rect(food).center(), CELL_SIZE / 2.0 - 2.0, FOOD);
        }

        if let Some(bonus) = &snapshot.bonus {
            let center = cell_rect(&bonus.position).center();
            painter.circle_filled(center, CELL_SIZE / 2.0 - 3.0, BONUS);
            Self::draw_timer_ring(&painter, center, CELL_SIZE / 2.0, bonus.remaining_fraction);
        }

        for (index, segment) in snapshot.snake.iter().enumerate() {
            let color = if index == 0 { SNAKE_HEAD } else { SNAKE_BODY };
            painter.rect_filled(cell_rect(segment).shrink(1.0), 2.0, color);
        }

        for particle in &snapshot.particles {
            let center = Pos2::new(
                rect.min.x + particle.x * CELL_SIZE,
                rect.min.y + particle.y * CELL_SIZE,
            );
            let color = particle_color(particle.kind).gamma_multiply(particle.life.clamp(0.0, 1.0));
            painter.circle_filled(center, particle.size * CELL_SIZE, color);
        }

        let stroke = Stroke::new(3.0, SEALED_WALL);
        if snapshot.walls.x_sealed {
            painter.line_segment([rect.left_top(), rect.left_bottom()], stroke);
            painter.line_segment([rect.right_top(), rect.right_bottom()], stroke);
        }
        if snapshot.walls.y_sealed {
            painter.line_segment([rect.left_top(), rect.right_top()], stroke);
            painter.line_segment([rect.left_bottom(), rect.right_bottom()], stroke);
        }
    }

    fn draw_timer_ring(painter: &egui::Painter, center: Pos2, radius: f32, fraction: f32) {
        const SEGMENTS: usize = 32;
        let fraction = fraction.clamp(0.0, 1.0);
        if fraction <= 0.0 {
            return;
        }
        let sweep = std::f32::consts::TAU * fraction;
        let start = -std::f32::consts::FRAC_PI_2;
        let steps = ((SEGMENTS as f32 * fraction).ceil() as usize).max(1);
        let points: Vec<Pos2> = (0..=steps)
            .map(|i| {
                let angle = start + sweep * i as f32 / steps as f32;
                center + Vec2::angled(angle) * radius
            })
            .collect();
        painter.add(egui::Shape::line(points, Stroke::new(2.0, BONUS)));
    }

    fn handle_input(&self, ctx: &egui::Context, command_sender: &CommandSender) {
        let direction = ctx.input(|i| {
            if i.key_pressed(egui::Key::ArrowUp) || i.key_pressed(egui::Key::W) {
                Some(Direction::Up)
            } else if i.key_pressed(egui::Key::ArrowDown) || i.key_pressed(egui::Key::S) {
                Some(Direction::Down)
            } else if i.key_pressed(egui::Key::ArrowLeft) || i.key_pressed(egui::Key::A) {
                Some(Direction::Left)
            } else if i.key_pressed(egui::Key::ArrowRight) || i.key_pressed(egui::Key::D) {
                Some(Direction::Right)
            } else {
                None
            }
        });

        // Reversals are filtered by the session, not here.
        if let Some(direction) = direction {
            command_sender.send(ClientCommand::Turn { direction });
        }
    }
}
