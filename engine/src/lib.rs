pub mod config;
pub mod high_score;
pub mod input;
pub mod logger;
pub mod session;
pub mod session_rng;
pub mod snake;
pub mod timer;

pub use high_score::{ContentHighScoreStore, FileHighScoreStore, HighScoreStore, MemoryHighScoreStore};
pub use input::InputIntent;
pub use session::{SessionCommand, SessionSummary, SnakeSession, SnapshotBroadcaster};
pub use session_rng::SessionRng;
pub use snake::{
    BoundaryPolicy, DeathReason, Direction, Phase, Point, SnakeEngine, SnakeSettings,
    SnakeSnapshot, SpeedUpSettings, StartPolicy, TickEvent,
};
pub use timer::{TickTimer, TokioTickTimer};
