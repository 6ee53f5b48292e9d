use serde::{Deserialize, Serialize};

use crate::games::SessionRng;
use super::grid::WallPolicy;
use super::settings::SnakeSettings;
use super::types::Axis;

/// Obstacle target for a level: one per level up to 4, then two per level.
pub fn obstacle_count_for_level(level: u32) -> usize {
    if level <= 4 {
        level as usize
    } else {
        4 + (level as usize - 4) * 2
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum WallStage {
    Open,
    OneSealed(Axis),
    AllSealed,
}

impl WallStage {
    pub fn policy(&self) -> WallPolicy {
        match self {
            WallStage::Open => WallPolicy::OPEN,
            WallStage::OneSealed(axis) => WallPolicy::sealing(*axis),
            WallStage::AllSealed => WallPolicy::SEALED,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Progression {
    level: u32,
    closed_axis: Option<Axis>,
}

impl Default for Progression {
    fn default() -> Self {
        Self::new()
    }
}

impl Progression {
    pub fn new() -> Self {
        Self {
            level: 1,
            closed_axis: None,
        }
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn closed_axis(&self) -> Option<Axis> {
        self.closed_axis
    }

    pub fn obstacle_target(&self) -> usize {
        obstacle_count_for_level(self.level)
    }

    /// Called after a food increment. Returns `true` if the level went up.
    pub fn on_food_score(&mut self, score: u32, settings: &SnakeSettings) -> bool {
        if score > 0 && score % settings.level_score_step == 0 {
            self.level += 1;
            true
        } else {
            false
        }
    }

    /// Picks the closed axis the first time the score reaches the
    /// single-wall threshold. Returns the new stage if the score change
    /// from `previous_score` to `score` moved the walls.
    pub fn update_walls(
        &mut self,
        previous_score: u32,
        score: u32,
        settings: &SnakeSettings,
        rng: &mut SessionRng,
    ) -> Option<WallStage> {
        let before = self.wall_stage(previous_score, settings);

        if self.closed_axis.is_none() && score >= settings.single_wall_score {
            let axis = if rng.random_bool() { Axis::X } else { Axis::Y };
            self.closed_axis = Some(axis);
        }

        let after = self.wall_stage(score, settings);
        (after != before).then_some(after)
    }

    pub fn wall_stage(&self, score: u32, settings: &SnakeSettings) -> WallStage {
        if score >= settings.all_walls_score {
            return WallStage::AllSealed;
        }
        match self.closed_axis {
            Some(axis) if score >= settings.single_wall_score => WallStage::OneSealed(axis),
            _ => WallStage::Open,
        }
    }

    pub fn wall_policy(&self, score: u32, settings: &SnakeSettings) -> WallPolicy {
        self.wall_stage(score, settings).policy()
    }
}
