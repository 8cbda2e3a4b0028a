use crate::snake::{Direction, Phase};

/// Minimum drag distance, in logical pixels, that counts as a swipe.
pub const DEFAULT_SWIPE_THRESHOLD: f32 = 30.0;

/// Source-agnostic player intent. Keys, buttons and swipes all map onto it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputIntent {
    Direction(Direction),
    TogglePause,
    Start,
    Restart,
}

/// The single "action" key: starts from Ready, pauses or resumes while in
/// play, and restarts after game over.
pub fn primary_action(phase: Phase) -> InputIntent {
    match phase {
        Phase::Ready => InputIntent::Start,
        Phase::Playing | Phase::Paused => InputIntent::TogglePause,
        Phase::GameOver => InputIntent::Restart,
    }
}

/// Turns a drag displacement into a direction. The dominant axis wins, ties go
/// to the vertical axis, and anything shorter than `threshold` is ignored.
/// Screen coordinates: positive `dy` points down.
pub fn resolve_swipe(dx: f32, dy: f32, threshold: f32) -> Option<Direction> {
    let abs_x = dx.abs();
    let abs_y = dy.abs();

    let distance = abs_x.max(abs_y);
    if distance.is_nan() || distance < threshold {
        return None;
    }

    if abs_x > abs_y {
        Some(if dx > 0.0 { Direction::Right } else { Direction::Left })
    } else {
        Some(if dy > 0.0 { Direction::Down } else { Direction::Up })
    }
}
