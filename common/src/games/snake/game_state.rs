use std::collections::HashSet;

use crate::config::Validate;
use crate::games::SessionRng;
use crate::log;
use super::grid::FieldSize;
use super::particles::{ParticleField, ParticleKind};
use super::placement::PlacementRequest;
use super::progression::{Progression, WallStage};
use super::settings::SnakeSettings;
use super::snake::Snake;
use super::snapshot::{BonusSnapshot, SnakeSnapshot};
use super::types::{Direction, GameEndReason, Point, RunPhase};

pub const DEFAULT_PLAYER_NAME: &str = "Player";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BonusItem {
    pub position: Point,
    pub remaining_ms: i32,
    pub lifetime_ms: u32,
}

impl BonusItem {
    pub fn remaining_fraction(&self) -> f32 {
        if self.lifetime_ms == 0 {
            return 0.0;
        }
        (self.remaining_ms.max(0) as f32 / self.lifetime_ms as f32).min(1.0)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum GameEvent {
    FoodEaten { at: Point, score: u32 },
    BonusEaten { at: Point, score: u32 },
    LevelUp { level: u32, obstacles: usize },
    WallsChanged(WallStage),
    BonusSpawned { at: Point },
    BonusExpired { at: Point },
    GameOver { reason: GameEndReason, score: u32 },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameOverSummary {
    pub player_name: String,
    pub score: u32,
    pub level: u32,
    pub reason: GameEndReason,
}

/// One run of the game. All mutable simulation state lives here and is
/// only changed through `start`, `tick`, `frame`, `set_direction` and
/// `restart`.
#[derive(Clone, Debug)]
pub struct SnakeGameState {
    settings: SnakeSettings,
    field_size: FieldSize,
    phase: RunPhase,
    player_name: String,
    snake: Snake,
    food: Option<Point>,
    obstacles: HashSet<Point>,
    bonus: Option<BonusItem>,
    score: u32,
    progression: Progression,
    particles: ParticleField,
    end_reason: Option<GameEndReason>,
    since_bonus_attempt_ms: u32,
    tick: u64,
}

impl SnakeGameState {
    pub fn new(settings: SnakeSettings) -> Self {
        let field_size = settings.field_size();
        let snake = Self::initial_snake(&settings, &field_size);
        Self {
            settings,
            field_size,
            phase: RunPhase::Ready,
            player_name: DEFAULT_PLAYER_NAME.to_string(),
            snake,
            food: None,
            obstacles: HashSet::new(),
            bonus: None,
            score: 0,
            progression: Progression::new(),
            particles: ParticleField::new(),
            end_reason: None,
            since_bonus_attempt_ms: 0,
            tick: 0,
        }
    }

    fn initial_snake(settings: &SnakeSettings, field_size: &FieldSize) -> Snake {
        let (head, direction) = settings.start_position();
        Snake::new(head, direction, settings.initial_length as usize, field_size)
    }

    /// Ready -> Running. Rejects invalid settings, then resets the run and
    /// places the first food and obstacles.
    pub fn start(&mut self, player_name: &str, rng: &mut SessionRng) -> Result<(), String> {
        if self.phase != RunPhase::Ready {
            return Err(format!("Cannot start a run from {:?}", self.phase));
        }
        self.settings
            .validate()
            .map_err(|e| format!("Invalid settings: {}", e))?;

        let trimmed = player_name.trim();
        let player_name = if trimmed.is_empty() {
            DEFAULT_PLAYER_NAME
        } else {
            trimmed
        };

        *self = Self::new(self.settings.clone());
        self.player_name = player_name.to_string();

        let food = PlacementRequest::new(&self.field_size)
            .avoid_set(self.snake.cell_set())
            .place(rng)
            .map_err(|e| format!("Failed to place food: {}", e))?;
        self.food = Some(food);
        self.top_up_obstacles(rng);

        self.phase = RunPhase::Running;
        log!(
            "[{}] run started on {}x{} with {} obstacle(s)",
            self.player_name,
            self.field_size.width,
            self.field_size.height,
            self.obstacles.len()
        );
        Ok(())
    }

    /// GameOver -> Ready.
    pub fn restart(&mut self) -> Result<(), String> {
        if self.phase != RunPhase::GameOver {
            return Err(format!("Cannot restart from {:?}", self.phase));
        }
        let player_name = std::mem::take(&mut self.player_name);
        *self = Self::new(self.settings.clone());
        self.player_name = player_name;
        Ok(())
    }

    pub fn set_direction(&mut self, direction: Direction) -> Result<(), String> {
        if self.phase != RunPhase::Running {
            return Err("Run is not active".to_string());
        }
        if !self.snake.buffer_direction(direction) {
            return Err(format!(
                "Cannot turn {:?} while moving {:?}",
                direction,
                self.snake.direction()
            ));
        }
        Ok(())
    }

    /// One movement step. Does nothing unless the run is active.
    pub fn tick(&mut self, rng: &mut SessionRng) -> Vec<GameEvent> {
        let mut events = Vec::new();
        if self.phase != RunPhase::Running {
            return events;
        }
        self.tick += 1;

        let direction = self.snake.adopt_pending_direction();
        let candidate = self.snake.head().offset(direction);
        let policy = self.progression.wall_policy(self.score, &self.settings);

        let Some(next_head) = policy.resolve(&self.field_size, candidate) else {
            self.finish(GameEndReason::WallCollision, &mut events);
            return events;
        };
        if self.snake.contains(&next_head) {
            self.finish(GameEndReason::SelfCollision, &mut events);
            return events;
        }
        if self.obstacles.contains(&next_head) {
            self.finish(GameEndReason::ObstacleCollision, &mut events);
            return events;
        }

        self.snake.push_head(next_head);

        if self.food == Some(next_head) {
            self.eat_food(next_head, rng, &mut events);
        } else if self.bonus.is_some_and(|bonus| bonus.position == next_head) {
            self.eat_bonus(next_head, rng, &mut events);
        } else {
            self.snake.pop_tail();
        }

        events
    }

    /// One step of the frame clock: particle decay, bonus countdown and
    /// bonus spawning. Particles keep fading after the run ends.
    pub fn frame(&mut self, rng: &mut SessionRng) -> Vec<GameEvent> {
        let mut events = Vec::new();
        self.particles.advance();
        if self.phase != RunPhase::Running {
            return events;
        }

        let elapsed = self.settings.frame_interval_ms;
        self.since_bonus_attempt_ms = self.since_bonus_attempt_ms.saturating_add(elapsed);

        if let Some(bonus) = self.bonus.as_mut() {
            bonus.remaining_ms -= elapsed as i32;
            if bonus.remaining_ms <= 0 {
                events.push(GameEvent::BonusExpired { at: bonus.position });
                self.bonus = None;
            }
        } else if self.since_bonus_attempt_ms >= self.settings.bonus_spawn_interval_ms {
            self.since_bonus_attempt_ms = 0;
            if rng.chance(self.settings.bonus_spawn_probability) {
                self.spawn_bonus(rng, &mut events);
            }
        }

        events
    }

    fn eat_food(&mut self, at: Point, rng: &mut SessionRng, events: &mut Vec<GameEvent>) {
        let previous_score = self.score;
        self.score += self.settings.food_score;
        self.burst(at, ParticleKind::Food, rng);
        events.push(GameEvent::FoodEaten {
            at,
            score: self.score,
        });

        if self.progression.on_food_score(self.score, &self.settings) {
            self.burst(at, ParticleKind::LevelUp, rng);
            self.top_up_obstacles(rng);
            log!(
                "[{}] reached level {} ({} obstacles)",
                self.player_name,
                self.progression.level(),
                self.obstacles.len()
            );
            events.push(GameEvent::LevelUp {
                level: self.progression.level(),
                obstacles: self.obstacles.len(),
            });
        }

        self.update_walls(previous_score, rng, events);

        let placed = PlacementRequest::new(&self.field_size)
            .avoid_set(self.snake.cell_set())
            .avoid_set(&self.obstacles)
            .avoid_cell(self.bonus.map(|b| b.position))
            .place(rng);
        match placed {
            Ok(food) => self.food = Some(food),
            Err(e) => {
                log!("[{}] {}", self.player_name, e);
                self.food = None;
                self.finish(GameEndReason::BoardFull, events);
            }
        }
    }

    fn eat_bonus(&mut self, at: Point, rng: &mut SessionRng, events: &mut Vec<GameEvent>) {
        let previous_score = self.score;
        self.score += self.settings.bonus_score;
        self.bonus = None;
        self.burst(at, ParticleKind::Bonus, rng);
        events.push(GameEvent::BonusEaten {
            at,
            score: self.score,
        });
        self.update_walls(previous_score, rng, events);
    }

    fn update_walls(&mut self, previous_score: u32, rng: &mut SessionRng, events: &mut Vec<GameEvent>) {
        if let Some(stage) =
            self.progression
                .update_walls(previous_score, self.score, &self.settings, rng)
        {
            log!("[{}] walls changed: {:?}", self.player_name, stage);
            events.push(GameEvent::WallsChanged(stage));
        }
    }

    fn spawn_bonus(&mut self, rng: &mut SessionRng, events: &mut Vec<GameEvent>) {
        let placed = PlacementRequest::new(&self.field_size)
            .avoid_set(self.snake.cell_set())
            .avoid_set(&self.obstacles)
            .avoid_cell(self.food)
            .place(rng);
        match placed {
            Ok(position) => {
                self.bonus = Some(BonusItem {
                    position,
                    remaining_ms: self.settings.bonus_lifetime_ms as i32,
                    lifetime_ms: self.settings.bonus_lifetime_ms,
                });
                events.push(GameEvent::BonusSpawned { at: position });
            }
            Err(e) => log!("[{}] bonus skipped: {}", self.player_name, e),
        }
    }

    /// Adds obstacles until the level target is met. Existing ones stay.
    fn top_up_obstacles(&mut self, rng: &mut SessionRng) {
        let target = self.progression.obstacle_target();
        let head = self.snake.head();
        while self.obstacles.len() < target {
            let placed = PlacementRequest::new(&self.field_size)
                .avoid_set(self.snake.cell_set())
                .avoid_set(&self.obstacles)
                .avoid_cell(self.food)
                .avoid_cell(self.bonus.map(|b| b.position))
                .keep_away_from(head, self.settings.obstacle_min_head_distance)
                .place(rng);
            match placed {
                Ok(cell) => {
                    self.obstacles.insert(cell);
                }
                Err(e) => {
                    log!(
                        "[{}] placed {} of {} obstacles: {}",
                        self.player_name,
                        self.obstacles.len(),
                        target,
                        e
                    );
                    break;
                }
            }
        }
    }

    fn burst(&mut self, at: Point, kind: ParticleKind, rng: &mut SessionRng) {
        self.particles
            .burst(at, kind, self.settings.particles_per_burst as usize, rng);
    }

    fn finish(&mut self, reason: GameEndReason, events: &mut Vec<GameEvent>) {
        self.phase = RunPhase::GameOver;
        self.end_reason = Some(reason);
        log!(
            "[{}] game over after {} ticks: {:?}, score {}, level {}",
            self.player_name,
            self.tick,
            reason,
            self.score,
            self.progression.level()
        );
        events.push(GameEvent::GameOver {
            reason,
            score: self.score,
        });
    }

    pub fn phase(&self) -> RunPhase {
        self.phase
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == RunPhase::GameOver
    }

    pub fn settings(&self) -> &SnakeSettings {
        &self.settings
    }

    pub fn field_size(&self) -> &FieldSize {
        &self.field_size
    }

    pub fn player_name(&self) -> &str {
        &self.player_name
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn food(&self) -> Option<Point> {
        self.food
    }

    pub fn obstacles(&self) -> &HashSet<Point> {
        &self.obstacles
    }

    pub fn bonus(&self) -> Option<BonusItem> {
        self.bonus
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.progression.level()
    }

    pub fn progression(&self) -> &Progression {
        &self.progression
    }

    pub fn wall_stage(&self) -> WallStage {
        self.progression.wall_stage(self.score, &self.settings)
    }

    pub fn end_reason(&self) -> Option<GameEndReason> {
        self.end_reason
    }

    pub fn summary(&self) -> Option<GameOverSummary> {
        self.end_reason.map(|reason| GameOverSummary {
            player_name: self.player_name.clone(),
            score: self.score,
            level: self.progression.level(),
            reason,
        })
    }

    pub fn snapshot(&self) -> SnakeSnapshot {
        let mut obstacles: Vec<Point> = self.obstacles.iter().copied().collect();
        obstacles.sort_by_key(|p| (p.y, p.x));

        SnakeSnapshot {
            tick: self.tick,
            field_size: self.field_size,
            phase: self.phase,
            player_name: self.player_name.clone(),
            snake: self.snake.cells().copied().collect(),
            direction: self.snake.direction(),
            food: self.food,
            obstacles,
            bonus: self.bonus.map(|bonus| BonusSnapshot {
                position: bonus.position,
                remaining_fraction: bonus.remaining_fraction(),
            }),
            walls: self.wall_stage().policy(),
            score: self.score,
            level: self.progression.level(),
            game_over: self.is_game_over(),
            end_reason: self.end_reason,
            particles: self.particles.particles().to_vec(),
        }
    }

    #[cfg(test)]
    pub(crate) fn set_snake(&mut self, cells: Vec<Point>, direction: Direction) {
        self.snake = Snake::from_cells(cells, direction);
    }

    #[cfg(test)]
    pub(crate) fn set_food(&mut self, food: Point) {
        self.food = Some(food);
    }

    #[cfg(test)]
    pub(crate) fn set_obstacles(&mut self, obstacles: Vec<Point>) {
        self.obstacles = obstacles.into_iter().collect();
    }

    #[cfg(test)]
    pub(crate) fn set_bonus(&mut self, position: Point) {
        self.bonus = Some(BonusItem {
            position,
            remaining_ms: self.settings.bonus_lifetime_ms as i32,
            lifetime_ms: self.settings.bonus_lifetime_ms,
        });
    }

    #[cfg(test)]
    pub(crate) fn set_score(&mut self, score: u32) {
        self.score = score;
    }

    #[cfg(test)]
    pub(crate) fn progression_mut(&mut self) -> &mut Progression {
        &mut self.progression
    }
}
