use serde::{Deserialize, Serialize};

use super::grid::{FieldSize, WallPolicy};
use super::particles::Particle;
use super::types::{Direction, GameEndReason, Point, RunPhase};

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BonusSnapshot {
    pub position: Point,
    /// 1.0 right after spawning, 0.0 when it is about to vanish.
    pub remaining_fraction: f32,
}

/// Everything the presentation layer needs to draw one frame.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SnakeSnapshot {
    pub tick: u64,
    pub field_size: FieldSize,
    pub phase: RunPhase,
    pub player_name: String,
    pub snake: Vec<Point>,
    pub direction: Direction,
    pub food: Option<Point>,
    pub obstacles: Vec<Point>,
    pub bonus: Option<BonusSnapshot>,
    pub walls: WallPolicy,
    pub score: u32,
    pub level: u32,
    pub game_over: bool,
    pub end_reason: Option<GameEndReason>,
    pub particles: Vec<Particle>,
}

impl SnakeSnapshot {
    pub fn head(&self) -> Option<Point> {
        self.snake.first().copied()
    }
}
