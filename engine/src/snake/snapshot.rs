use serde::Serialize;

use super::types::{DeathReason, Direction, GridSize, Phase, Point};

/// Read-only view of the engine handed to renderers after every change.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SnakeSnapshot {
    pub grid: GridSize,
    /// Head first.
    pub snake: Vec<Point>,
    pub food: Option<Point>,
    pub direction: Direction,
    pub phase: Phase,
    pub score: u32,
    pub high_score: u32,
    pub tick_interval_ms: u64,
    pub tick: u64,
    pub death_reason: Option<DeathReason>,
}

impl SnakeSnapshot {
    /// True on the game-over screen when this run set the record.
    pub fn is_new_high_score(&self) -> bool {
        self.phase == Phase::GameOver && self.score > 0 && self.score == self.high_score
    }
}
