mod engine;
mod settings;
mod snake;
mod snapshot;
mod types;

pub use engine::{SnakeEngine, TickEvent};
pub use settings::{
    DEFAULT_GRID_SIZE, DEFAULT_TICK_INTERVAL_MS, FOOD_REWARD, INITIAL_SNAKE_LENGTH, SnakeSettings,
    SpeedUpSettings,
};
pub use snake::Snake;
pub use snapshot::SnakeSnapshot;
pub use types::{BoundaryPolicy, DeathReason, Direction, GridSize, Phase, Point, StartPolicy};
