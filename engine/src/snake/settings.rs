use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::config::Validate;
use super::types::{BoundaryPolicy, GridSize, StartPolicy};

pub const FOOD_REWARD: u32 = 10;
pub const INITIAL_SNAKE_LENGTH: usize = 3;
pub const DEFAULT_GRID_SIZE: u32 = 20;
pub const DEFAULT_TICK_INTERVAL_MS: u32 = 150;

const MIN_GRID_SIZE: u32 = 5;
const MAX_GRID_SIZE: u32 = 50;
const MIN_TICK_INTERVAL_MS: u32 = 50;
const MAX_TICK_INTERVAL_MS: u32 = 1000;
const MIN_SPEED_UP_FLOOR_MS: u32 = 20;

/// Shortens the tick interval by `step_ms` for every `every_points` scored,
/// never going below `min_interval_ms`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpeedUpSettings {
    pub every_points: u32,
    pub step_ms: u32,
    pub min_interval_ms: u32,
}

impl Default for SpeedUpSettings {
    fn default() -> Self {
        Self {
            every_points: 50,
            step_ms: 10,
            min_interval_ms: 60,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SnakeSettings {
    pub grid_width: u32,
    pub grid_height: u32,
    #[serde(default)]
    pub boundary_policy: BoundaryPolicy,
    #[serde(default)]
    pub start_policy: StartPolicy,
    pub tick_interval_ms: u32,
    #[serde(default)]
    pub speed_up: Option<SpeedUpSettings>,
}

impl SnakeSettings {
    pub fn grid(&self) -> GridSize {
        GridSize::new(self.grid_width as usize, self.grid_height as usize)
    }

    pub fn initial_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms as u64)
    }

    /// Tick interval that applies once `score` points have been collected.
    pub fn interval_for_score(&self, score: u32) -> Duration {
        let Some(speed_up) = self.speed_up else {
            return self.initial_interval();
        };
        let steps = score / speed_up.every_points.max(1);
        let reduction = steps.saturating_mul(speed_up.step_ms);
        let interval_ms = self
            .tick_interval_ms
            .saturating_sub(reduction)
            .max(speed_up.min_interval_ms);
        Duration::from_millis(interval_ms as u64)
    }
}

impl Default for SnakeSettings {
    fn default() -> Self {
        Self {
            grid_width: DEFAULT_GRID_SIZE,
            grid_height: DEFAULT_GRID_SIZE,
            boundary_policy: BoundaryPolicy::Wrap,
            start_policy: StartPolicy::ExplicitStart,
            tick_interval_ms: DEFAULT_TICK_INTERVAL_MS,
            speed_up: None,
        }
    }
}

impl Validate for SnakeSettings {
    fn validate(&self) -> Result<(), String> {
        if self.grid_width < MIN_GRID_SIZE || self.grid_height < MIN_GRID_SIZE {
            return Err(format!(
                "grid dimensions must be at least {}x{}",
                MIN_GRID_SIZE, MIN_GRID_SIZE
            ));
        }
        if self.grid_width > MAX_GRID_SIZE || self.grid_height > MAX_GRID_SIZE {
            return Err(format!(
                "grid dimensions must not exceed {}x{}",
                MAX_GRID_SIZE, MAX_GRID_SIZE
            ));
        }
        if self.tick_interval_ms < MIN_TICK_INTERVAL_MS {
            return Err(format!("tick_interval_ms must be at least {}", MIN_TICK_INTERVAL_MS));
        }
        if self.tick_interval_ms > MAX_TICK_INTERVAL_MS {
            return Err(format!("tick_interval_ms must not exceed {}", MAX_TICK_INTERVAL_MS));
        }
        if let Some(speed_up) = &self.speed_up {
            if speed_up.every_points == 0 || speed_up.every_points % FOOD_REWARD != 0 {
                return Err(format!(
                    "speed_up.every_points must be a positive multiple of {}",
                    FOOD_REWARD
                ));
            }
            if speed_up.step_ms == 0 {
                return Err("speed_up.step_ms must be greater than 0".to_string());
            }
            if speed_up.min_interval_ms < MIN_SPEED_UP_FLOOR_MS
                || speed_up.min_interval_ms > self.tick_interval_ms
            {
                return Err(format!(
                    "speed_up.min_interval_ms must be between {} and tick_interval_ms",
                    MIN_SPEED_UP_FLOOR_MS
                ));
            }
        }
        Ok(())
    }
}
