use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::config::Validate;
use super::grid::FieldSize;
use super::types::{Direction, Point};

/// Rules of a run. Times are in milliseconds of simulation time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SnakeSettings {
    pub field_width: u32,
    pub field_height: u32,
    pub tick_interval_ms: u32,
    /// Cadence of the cosmetic/timer clock (particles, bonus countdown).
    pub frame_interval_ms: u32,
    pub initial_length: u32,
    pub food_score: u32,
    pub bonus_score: u32,
    pub level_score_step: u32,
    pub single_wall_score: u32,
    pub all_walls_score: u32,
    pub bonus_spawn_interval_ms: u32,
    pub bonus_spawn_probability: f32,
    pub bonus_lifetime_ms: u32,
    pub obstacle_min_head_distance: u32,
    pub particles_per_burst: u32,
}

impl Default for SnakeSettings {
    fn default() -> Self {
        Self {
            field_width: 40,
            field_height: 30,
            tick_interval_ms: 100,
            frame_interval_ms: 16,
            initial_length: 3,
            food_score: 10,
            bonus_score: 50,
            level_score_step: 50,
            single_wall_score: 250,
            all_walls_score: 500,
            bonus_spawn_interval_ms: 10_000,
            bonus_spawn_probability: 0.1,
            bonus_lifetime_ms: 5_000,
            obstacle_min_head_distance: 5,
            particles_per_burst: 10,
        }
    }
}

impl SnakeSettings {
    pub fn field_size(&self) -> FieldSize {
        FieldSize::new(self.field_width as i32, self.field_height as i32)
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms as u64)
    }

    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.frame_interval_ms as u64)
    }

    /// A quarter across and a third down, heading right.
    pub fn start_position(&self) -> (Point, Direction) {
        let head = Point::new(
            (self.field_width / 4) as i32,
            (self.field_height / 3) as i32,
        );
        (head, Direction::Right)
    }
}

impl Validate for SnakeSettings {
    fn validate(&self) -> Result<(), String> {
        if !(10..=200).contains(&self.field_width) || !(10..=200).contains(&self.field_height) {
            return Err("field dimensions must be between 10 and 200".to_string());
        }
        if !(20..=2000).contains(&self.tick_interval_ms) {
            return Err("tick_interval_ms must be between 20 and 2000".to_string());
        }
        if !(1..=100).contains(&self.frame_interval_ms) {
            return Err("frame_interval_ms must be between 1 and 100".to_string());
        }
        if self.initial_length < 1 || self.initial_length > self.field_width / 4 {
            return Err("initial_length must be at least 1 and fit behind the start cell".to_string());
        }
        if self.food_score == 0 || self.bonus_score == 0 {
            return Err("food_score and bonus_score must be greater than 0".to_string());
        }
        if self.level_score_step == 0 {
            return Err("level_score_step must be greater than 0".to_string());
        }
        if self.single_wall_score > self.all_walls_score {
            return Err("single_wall_score must not exceed all_walls_score".to_string());
        }
        if !(0.0..=1.0).contains(&self.bonus_spawn_probability) {
            return Err("bonus_spawn_probability must be between 0.0 and 1.0".to_string());
        }
        if self.bonus_lifetime_ms == 0 {
            return Err("bonus_lifetime_ms must be greater than 0".to_string());
        }
        if self.particles_per_burst > 64 {
            return Err("particles_per_burst must not exceed 64".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ConfigSerializer, YamlConfigSerializer};

    #[test]
    fn test_default_settings_are_valid() {
        assert!(SnakeSettings::default().validate().is_ok());
    }

    #[test]
    fn test_default_start_position() {
        let (head, direction) = SnakeSettings::default().start_position();
        assert_eq!(head, Point::new(10, 10));
        assert_eq!(direction, Direction::Right);
    }

    #[test]
    fn test_partial_yaml_fills_defaults() {
        let serializer = YamlConfigSerializer::new();
        let settings: SnakeSettings = serializer
            .deserialize("field_width: 20\ntick_interval_ms: 150\n")
            .unwrap();
        assert_eq!(settings.field_width, 20);
        assert_eq!(settings.tick_interval_ms, 150);
        assert_eq!(settings.field_height, 30);
        assert_eq!(settings.bonus_lifetime_ms, 5_000);
    }

    #[test]
    fn test_invalid_thresholds_rejected() {
        let settings = SnakeSettings {
            single_wall_score: 600,
            ..SnakeSettings::default()
        };
        assert!(settings.validate().is_err());

        let settings = SnakeSettings {
            bonus_spawn_probability: 1.5,
            ..SnakeSettings::default()
        };
        assert!(settings.validate().is_err());
    }
}
