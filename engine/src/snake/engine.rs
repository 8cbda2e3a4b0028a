use std::time::Duration;

use crate::config::Validate;
use crate::high_score::HighScoreStore;
use crate::input::InputIntent;
use crate::session_rng::SessionRng;
use crate::{log, log_warn};
use super::settings::{FOOD_REWARD, INITIAL_SNAKE_LENGTH, SnakeSettings};
use super::snake::Snake;
use super::snapshot::SnakeSnapshot;
use super::types::{BoundaryPolicy, DeathReason, Direction, GridSize, Phase, Point, StartPolicy};

const INITIAL_DIRECTION: Direction = Direction::Right;
const MAX_FOOD_SAMPLING_ATTEMPTS: usize = 256;

/// Outcome of a single `tick`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickEvent {
    /// Not playing; nothing moved.
    Idle,
    Moved,
    Ate { score: u32 },
    /// Food was eaten and the tick interval changed as a result.
    SpeedChanged { score: u32, interval: Duration },
    GameOver {
        reason: DeathReason,
        new_high_score: bool,
    },
}

pub struct SnakeEngine<S: HighScoreStore> {
    settings: SnakeSettings,
    grid: GridSize,
    snake: Snake,
    food: Option<Point>,
    direction: Direction,
    pending_direction: Direction,
    phase: Phase,
    score: u32,
    high_score: u32,
    tick_interval: Duration,
    tick_count: u64,
    death_reason: Option<DeathReason>,
    rng: SessionRng,
    store: S,
}

impl<S: HighScoreStore> SnakeEngine<S> {
    /// Fails when `settings` do not pass validation; the store is not read in
    /// that case.
    pub fn new(settings: SnakeSettings, rng: SessionRng, store: S) -> Result<Self, String> {
        settings.validate()?;
        let grid = settings.grid();
        let high_score = store.load();
        let tick_interval = settings.initial_interval();

        let mut engine = Self {
            snake: initial_snake(grid),
            food: None,
            direction: INITIAL_DIRECTION,
            pending_direction: INITIAL_DIRECTION,
            phase: Phase::Ready,
            score: 0,
            high_score,
            tick_interval,
            tick_count: 0,
            death_reason: None,
            settings,
            grid,
            rng,
            store,
        };
        engine.food = engine.spawn_food();
        Ok(engine)
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn food(&self) -> Option<Point> {
        self.food
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn pending_direction(&self) -> Direction {
        self.pending_direction
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    pub fn tick_interval(&self) -> Duration {
        self.tick_interval
    }

    pub fn death_reason(&self) -> Option<DeathReason> {
        self.death_reason
    }

    pub fn snapshot(&self) -> SnakeSnapshot {
        SnakeSnapshot {
            grid: self.grid,
            snake: self.snake.segments().copied().collect(),
            food: self.food,
            direction: self.direction,
            phase: self.phase,
            score: self.score,
            high_score: self.high_score,
            tick_interval_ms: self.tick_interval.as_millis() as u64,
            tick: self.tick_count,
            death_reason: self.death_reason,
        }
    }

    /// Returns whether the intent changed anything. Rejected intents are not
    /// errors.
    pub fn handle_intent(&mut self, intent: InputIntent) -> bool {
        match intent {
            InputIntent::Direction(direction) => self.request_direction(direction),
            InputIntent::TogglePause => self.toggle_pause(),
            InputIntent::Start => self.start(),
            InputIntent::Restart => {
                self.restart();
                true
            }
        }
    }

    /// Buffers `direction` for the next tick. The reversal check is against the
    /// committed direction, so two quick turns within one tick cannot fold the
    /// snake back onto its neck.
    pub fn request_direction(&mut self, direction: Direction) -> bool {
        let starts_game = match self.phase {
            Phase::Playing => false,
            Phase::Ready if self.settings.start_policy == StartPolicy::FirstDirection => true,
            _ => return false,
        };

        if starts_game {
            self.phase = Phase::Playing;
            log!("Game started by direction input");
        }

        if direction.is_opposite(&self.direction) {
            return starts_game;
        }

        self.pending_direction = direction;
        true
    }

    pub fn toggle_pause(&mut self) -> bool {
        match self.phase {
            Phase::Playing => self.phase = Phase::Paused,
            Phase::Paused => self.phase = Phase::Playing,
            Phase::Ready | Phase::GameOver => return false,
        }
        true
    }

    pub fn start(&mut self) -> bool {
        if self.phase != Phase::Ready {
            return false;
        }
        self.phase = Phase::Playing;
        log!("Game started");
        true
    }

    pub fn restart(&mut self) {
        self.reset();
    }

    /// Back to the starting configuration. The high score is kept.
    pub fn reset(&mut self) {
        self.snake = initial_snake(self.grid);
        self.direction = INITIAL_DIRECTION;
        self.pending_direction = INITIAL_DIRECTION;
        self.phase = Phase::Ready;
        self.score = 0;
        self.tick_interval = self.settings.initial_interval();
        self.tick_count = 0;
        self.death_reason = None;
        self.food = self.spawn_food();
    }

    pub fn tick(&mut self) -> TickEvent {
        if self.phase != Phase::Playing {
            return TickEvent::Idle;
        }

        self.direction = self.pending_direction;
        self.tick_count += 1;

        let next_head = match self.next_head_position() {
            Ok(next_head) => next_head,
            Err(reason) => return self.finish(reason),
        };

        if self.snake.contains(&next_head) {
            return self.finish(DeathReason::SelfCollision);
        }

        self.snake.push_head(next_head);

        if self.food != Some(next_head) {
            self.snake.pop_tail();
            return TickEvent::Moved;
        }

        self.score += FOOD_REWARD;
        log!(
            "Ate food at ({}, {}). Score: {}",
            next_head.x,
            next_head.y,
            self.score
        );

        self.food = self.spawn_food();
        if self.food.is_none() {
            return self.finish(DeathReason::BoardFilled);
        }

        let interval = self.settings.interval_for_score(self.score);
        if interval != self.tick_interval {
            log!(
                "Tick interval {}ms -> {}ms",
                self.tick_interval.as_millis(),
                interval.as_millis()
            );
            self.tick_interval = interval;
            return TickEvent::SpeedChanged {
                score: self.score,
                interval,
            };
        }

        TickEvent::Ate { score: self.score }
    }

    fn next_head_position(&self) -> Result<Point, DeathReason> {
        let head = self.snake.head();
        let GridSize { width, height } = self.grid;

        match self.settings.boundary_policy {
            BoundaryPolicy::Wrap => Ok(match self.direction {
                Direction::Up => Point::new(head.x, wrapping_dec(head.y, height)),
                Direction::Down => Point::new(head.x, wrapping_inc(head.y, height)),
                Direction::Left => Point::new(wrapping_dec(head.x, width), head.y),
                Direction::Right => Point::new(wrapping_inc(head.x, width), head.y),
            }),
            BoundaryPolicy::Collide => {
                let next = match self.direction {
                    Direction::Up => head.y.checked_sub(1).map(|y| Point::new(head.x, y)),
                    Direction::Down => Some(Point::new(head.x, head.y + 1)),
                    Direction::Left => head.x.checked_sub(1).map(|x| Point::new(x, head.y)),
                    Direction::Right => Some(Point::new(head.x + 1, head.y)),
                };
                next.filter(|p| self.grid.contains(*p))
                    .ok_or(DeathReason::WallCollision)
            }
        }
    }

    fn finish(&mut self, reason: DeathReason) -> TickEvent {
        self.phase = Phase::GameOver;
        self.death_reason = Some(reason);
        let new_high_score = self.record_high_score();
        log!(
            "Game over ({:?}). Score: {}, high score: {}",
            reason,
            self.score,
            self.high_score
        );
        TickEvent::GameOver {
            reason,
            new_high_score,
        }
    }

    fn record_high_score(&mut self) -> bool {
        if self.score <= self.high_score {
            return false;
        }
        self.high_score = self.score;
        if let Err(e) = self.store.save(self.high_score) {
            log_warn!("Failed to persist high score {}: {}", self.high_score, e);
        }
        true
    }

    /// Uniform over free cells. Rejection sampling first; a crowded board falls
    /// back to picking among the enumerated free cells.
    fn spawn_food(&mut self) -> Option<Point> {
        let free_cells = self.grid.cell_count().saturating_sub(self.snake.len());
        if free_cells == 0 {
            return None;
        }

        for _ in 0..MAX_FOOD_SAMPLING_ATTEMPTS {
            let candidate = self.rng.random_cell(self.grid.width, self.grid.height);
            if !self.snake.contains(&candidate) {
                return Some(candidate);
            }
        }

        let index = self.rng.random_range(0..free_cells);
        let GridSize { width, height } = self.grid;
        let snake = &self.snake;
        (0..height)
            .flat_map(|y| (0..width).map(move |x| Point::new(x, y)))
            .filter(|p| !snake.contains(p))
            .nth(index)
    }

    #[cfg(test)]
    pub(crate) fn set_board(&mut self, segments: Vec<Point>, food: Option<Point>, direction: Direction) {
        let mut segments = segments.into_iter();
        let head = segments.next().expect("board needs a head");
        self.snake = Snake::from_segments(head, segments);
        self.food = food;
        self.direction = direction;
        self.pending_direction = direction;
    }

    #[cfg(test)]
    pub(crate) fn set_phase(&mut self, phase: Phase) {
        self.phase = phase;
    }

    #[cfg(test)]
    pub(crate) fn set_score(&mut self, score: u32) {
        self.score = score;
    }
}

fn initial_snake(grid: GridSize) -> Snake {
    let head = Point::new(grid.width / 2, grid.height / 2);
    Snake::new(head, INITIAL_DIRECTION, INITIAL_SNAKE_LENGTH, grid)
}

fn wrapping_inc(value: usize, max: usize) -> usize {
    if value + 1 >= max { 0 } else { value + 1 }
}

fn wrapping_dec(value: usize, max: usize) -> usize {
    if value == 0 { max - 1 } else { value - 1 }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::high_score::MemoryHighScoreStore;
    use crate::snake::SpeedUpSettings;

    fn create_engine(settings: SnakeSettings) -> (SnakeEngine<MemoryHighScoreStore>, MemoryHighScoreStore) {
        let store = MemoryHighScoreStore::new(0);
        let engine = SnakeEngine::new(settings, SessionRng::new(42), store.clone()).unwrap();
        (engine, store)
    }

    fn playing_engine() -> SnakeEngine<MemoryHighScoreStore> {
        let (mut engine, _) = create_engine(SnakeSettings::default());
        engine.start();
        engine
    }

    fn segments(engine: &SnakeEngine<MemoryHighScoreStore>) -> Vec<Point> {
        engine.snake().segments().copied().collect()
    }

    fn p(x: usize, y: usize) -> Point {
        Point::new(x, y)
    }

    fn assert_invariants(engine: &SnakeEngine<MemoryHighScoreStore>) {
        let cells = segments(engine);
        let unique: HashSet<Point> = cells.iter().copied().collect();
        if engine.phase() != Phase::GameOver {
            assert_eq!(unique.len(), cells.len(), "segments must be distinct");
        }
        if let Some(food) = engine.food() {
            assert!(!unique.contains(&food), "food must not be on the snake");
        }
        assert_eq!(engine.score() % FOOD_REWARD, 0);
    }

    #[test]
    fn test_new_engine_starting_configuration() {
        let (engine, _) = create_engine(SnakeSettings::default());
        assert_eq!(engine.phase(), Phase::Ready);
        assert_eq!(segments(&engine), vec![p(10, 10), p(9, 10), p(8, 10)]);
        assert_eq!(engine.direction(), Direction::Right);
        assert_eq!(engine.pending_direction(), Direction::Right);
        assert_eq!(engine.score(), 0);
        assert_eq!(engine.tick_interval(), Duration::from_millis(150));
        assert_invariants(&engine);
    }

    #[test]
    fn test_high_score_loaded_from_store() {
        let store = MemoryHighScoreStore::new(250);
        let engine = SnakeEngine::new(SnakeSettings::default(), SessionRng::new(1), store).unwrap();
        assert_eq!(engine.high_score(), 250);
    }

    #[test]
    fn test_invalid_settings_are_rejected() {
        let invalid = [
            SnakeSettings {
                grid_width: 0,
                ..SnakeSettings::default()
            },
            SnakeSettings {
                grid_height: 0,
                ..SnakeSettings::default()
            },
            SnakeSettings {
                tick_interval_ms: 0,
                ..SnakeSettings::default()
            },
        ];
        for settings in invalid {
            let result = SnakeEngine::new(settings, SessionRng::new(3), MemoryHighScoreStore::new(0));
            assert!(result.is_err());
        }
    }

    #[test]
    fn test_tick_is_noop_unless_playing() {
        let (mut engine, _) = create_engine(SnakeSettings::default());
        let before = engine.snapshot();
        assert_eq!(engine.tick(), TickEvent::Idle);
        assert_eq!(engine.snapshot(), before);

        engine.start();
        engine.toggle_pause();
        let paused = engine.snapshot();
        assert_eq!(engine.tick(), TickEvent::Idle);
        assert_eq!(engine.snapshot(), paused);
    }

    #[test]
    fn test_single_cell_snake_eats_food() {
        let mut engine = playing_engine();
        engine.set_board(vec![p(10, 10)], Some(p(11, 10)), Direction::Right);

        assert_eq!(engine.tick(), TickEvent::Ate { score: 10 });
        assert_eq!(segments(&engine), vec![p(11, 10), p(10, 10)]);
        assert_eq!(engine.score(), 10);
        let food = engine.food().unwrap();
        assert_ne!(food, p(11, 10));
        assert_invariants(&engine);
    }

    #[test]
    fn test_move_without_food_keeps_length() {
        let mut engine = playing_engine();
        engine.set_board(vec![p(5, 5), p(4, 5), p(3, 5)], Some(p(0, 0)), Direction::Right);

        assert_eq!(engine.tick(), TickEvent::Moved);
        assert_eq!(segments(&engine), vec![p(6, 5), p(5, 5), p(4, 5)]);
        assert_eq!(engine.score(), 0);
    }

    #[test]
    fn test_wrap_around_right_edge() {
        let mut engine = playing_engine();
        engine.set_board(vec![p(19, 3), p(18, 3)], Some(p(5, 5)), Direction::Right);

        engine.tick();
        assert_eq!(engine.snake().head(), p(0, 3));
        assert_eq!(engine.phase(), Phase::Playing);
    }

    #[test]
    fn test_wrap_around_top_edge() {
        let mut engine = playing_engine();
        engine.set_board(vec![p(7, 0), p(7, 1)], Some(p(5, 5)), Direction::Up);

        engine.tick();
        assert_eq!(engine.snake().head(), p(7, 19));
    }

    #[test]
    fn test_collide_policy_ends_game_at_wall() {
        let (mut engine, _) = create_engine(SnakeSettings {
            boundary_policy: BoundaryPolicy::Collide,
            ..SnakeSettings::default()
        });
        engine.start();
        engine.set_board(vec![p(19, 3), p(18, 3)], Some(p(5, 5)), Direction::Right);

        let event = engine.tick();
        assert_eq!(
            event,
            TickEvent::GameOver {
                reason: DeathReason::WallCollision,
                new_high_score: false
            }
        );
        assert_eq!(engine.phase(), Phase::GameOver);
        assert_eq!(segments(&engine), vec![p(19, 3), p(18, 3)]);
    }

    #[test]
    fn test_collide_policy_top_edge() {
        let (mut engine, _) = create_engine(SnakeSettings {
            boundary_policy: BoundaryPolicy::Collide,
            ..SnakeSettings::default()
        });
        engine.start();
        engine.set_board(vec![p(4, 0), p(4, 1)], Some(p(5, 5)), Direction::Up);

        engine.tick();
        assert_eq!(engine.death_reason(), Some(DeathReason::WallCollision));
    }

    #[test]
    fn test_self_collision_ends_game_and_records_high_score() {
        let (mut engine, store) = create_engine(SnakeSettings::default());
        engine.start();
        // Head at (5,5) heading Down into a U-shaped body.
        let body = vec![p(5, 5), p(6, 5), p(6, 6), p(5, 6), p(4, 6)];
        engine.set_board(body.clone(), Some(p(0, 0)), Direction::Down);
        engine.set_score(40);

        let event = engine.tick();
        assert_eq!(
            event,
            TickEvent::GameOver {
                reason: DeathReason::SelfCollision,
                new_high_score: true
            }
        );
        assert_eq!(engine.phase(), Phase::GameOver);
        assert_eq!(segments(&engine), body);
        assert_eq!(engine.high_score(), 40);
        assert_eq!(store.current(), 40);
    }

    #[test]
    fn test_high_score_not_lowered_by_worse_game() {
        let store = MemoryHighScoreStore::new(100);
        let mut engine = SnakeEngine::new(SnakeSettings::default(), SessionRng::new(5), store.clone()).unwrap();
        engine.start();
        engine.set_board(vec![p(5, 5), p(6, 5), p(6, 6), p(5, 6)], Some(p(0, 0)), Direction::Down);
        engine.set_score(30);

        let event = engine.tick();
        assert_eq!(
            event,
            TickEvent::GameOver {
                reason: DeathReason::SelfCollision,
                new_high_score: false
            }
        );
        assert_eq!(engine.high_score(), 100);
        assert_eq!(store.current(), 100);
    }

    #[test]
    fn test_moving_into_tail_cell_is_a_collision() {
        let mut engine = playing_engine();
        // 2x2 loop: the next head is the current tail.
        engine.set_board(vec![p(5, 5), p(6, 5), p(6, 6), p(5, 6)], Some(p(0, 0)), Direction::Down);

        engine.tick();
        assert_eq!(engine.death_reason(), Some(DeathReason::SelfCollision));
    }

    #[test]
    fn test_reverse_request_rejected() {
        let mut engine = playing_engine();
        assert!(!engine.request_direction(Direction::Left));
        assert_eq!(engine.pending_direction(), Direction::Right);
    }

    #[test]
    fn test_direction_applies_on_next_tick_only() {
        let mut engine = playing_engine();
        engine.set_board(vec![p(5, 5), p(4, 5)], Some(p(0, 0)), Direction::Right);

        assert!(engine.request_direction(Direction::Up));
        assert_eq!(engine.direction(), Direction::Right);
        assert_eq!(engine.pending_direction(), Direction::Up);

        engine.tick();
        assert_eq!(engine.direction(), Direction::Up);
        assert_eq!(engine.snake().head(), p(5, 4));
    }

    #[test]
    fn test_quick_double_turn_cannot_reverse() {
        let mut engine = playing_engine();
        engine.set_board(vec![p(5, 5), p(4, 5), p(3, 5)], Some(p(0, 0)), Direction::Right);

        // Up then Left within one tick: Left is checked against the committed
        // Right and rejected, so the snake turns Up instead of into itself.
        assert!(engine.request_direction(Direction::Up));
        assert!(!engine.request_direction(Direction::Left));
        engine.tick();

        assert_eq!(engine.phase(), Phase::Playing);
        assert_eq!(engine.snake().head(), p(5, 4));
    }

    #[test]
    fn test_last_request_wins() {
        let mut engine = playing_engine();
        engine.set_board(vec![p(5, 5), p(4, 5)], Some(p(0, 0)), Direction::Right);

        engine.request_direction(Direction::Up);
        engine.request_direction(Direction::Down);
        engine.tick();
        assert_eq!(engine.snake().head(), p(5, 6));
    }

    #[test]
    fn test_direction_ignored_outside_play_with_explicit_start() {
        let (mut engine, _) = create_engine(SnakeSettings::default());
        assert!(!engine.request_direction(Direction::Up));
        assert_eq!(engine.phase(), Phase::Ready);
        assert_eq!(engine.pending_direction(), Direction::Right);

        engine.start();
        engine.toggle_pause();
        assert!(!engine.request_direction(Direction::Up));
    }

    #[test]
    fn test_first_direction_starts_game() {
        let (mut engine, _) = create_engine(SnakeSettings {
            start_policy: StartPolicy::FirstDirection,
            ..SnakeSettings::default()
        });
        assert!(engine.request_direction(Direction::Down));
        assert_eq!(engine.phase(), Phase::Playing);
        assert_eq!(engine.pending_direction(), Direction::Down);
    }

    #[test]
    fn test_first_direction_reverse_starts_without_turning() {
        let (mut engine, _) = create_engine(SnakeSettings {
            start_policy: StartPolicy::FirstDirection,
            ..SnakeSettings::default()
        });
        assert!(engine.request_direction(Direction::Left));
        assert_eq!(engine.phase(), Phase::Playing);
        assert_eq!(engine.pending_direction(), Direction::Right);
    }

    #[test]
    fn test_toggle_pause_transitions() {
        let (mut engine, _) = create_engine(SnakeSettings::default());
        assert!(!engine.toggle_pause());
        assert_eq!(engine.phase(), Phase::Ready);

        engine.start();
        assert!(engine.toggle_pause());
        assert_eq!(engine.phase(), Phase::Paused);
        assert!(engine.toggle_pause());
        assert_eq!(engine.phase(), Phase::Playing);

        engine.set_phase(Phase::GameOver);
        assert!(!engine.toggle_pause());
        assert_eq!(engine.phase(), Phase::GameOver);
    }

    #[test]
    fn test_start_only_from_ready() {
        let (mut engine, _) = create_engine(SnakeSettings::default());
        assert!(engine.start());
        assert!(!engine.start());
        engine.toggle_pause();
        assert!(!engine.start());
        assert_eq!(engine.phase(), Phase::Paused);
    }

    #[test]
    fn test_restart_from_ready_resets_and_keeps_high_score() {
        let store = MemoryHighScoreStore::new(300);
        let mut engine = SnakeEngine::new(SnakeSettings::default(), SessionRng::new(9), store).unwrap();
        engine.set_board(vec![p(1, 1)], Some(p(2, 2)), Direction::Up);
        engine.set_score(50);

        engine.restart();
        assert_eq!(engine.phase(), Phase::Ready);
        assert_eq!(segments(&engine), vec![p(10, 10), p(9, 10), p(8, 10)]);
        assert_eq!(engine.direction(), Direction::Right);
        assert_eq!(engine.score(), 0);
        assert_eq!(engine.high_score(), 300);
        assert_invariants(&engine);
    }

    #[test]
    fn test_restart_after_game_over() {
        let mut engine = playing_engine();
        engine.set_board(vec![p(5, 5), p(6, 5), p(6, 6), p(5, 6)], Some(p(0, 0)), Direction::Down);
        engine.set_score(20);
        engine.tick();
        assert_eq!(engine.phase(), Phase::GameOver);

        assert!(engine.handle_intent(InputIntent::Restart));
        assert_eq!(engine.phase(), Phase::Ready);
        assert_eq!(engine.death_reason(), None);
        assert_eq!(engine.high_score(), 20);
        assert_eq!(engine.snapshot().tick, 0);
    }

    #[test]
    fn test_speed_up_after_threshold() {
        let (mut engine, _) = create_engine(SnakeSettings {
            speed_up: Some(SpeedUpSettings {
                every_points: 20,
                step_ms: 30,
                min_interval_ms: 100,
            }),
            ..SnakeSettings::default()
        });
        engine.start();

        engine.set_board(vec![p(1, 1)], Some(p(2, 1)), Direction::Right);
        assert_eq!(engine.tick(), TickEvent::Ate { score: 10 });

        engine.set_board(vec![p(1, 1)], Some(p(2, 1)), Direction::Right);
        assert_eq!(
            engine.tick(),
            TickEvent::SpeedChanged {
                score: 20,
                interval: Duration::from_millis(120)
            }
        );
        assert_eq!(engine.tick_interval(), Duration::from_millis(120));

        engine.set_score(40);
        engine.set_board(vec![p(1, 1)], Some(p(2, 1)), Direction::Right);
        assert_eq!(
            engine.tick(),
            TickEvent::SpeedChanged {
                score: 50,
                interval: Duration::from_millis(100)
            }
        );

        engine.set_board(vec![p(1, 1)], Some(p(2, 1)), Direction::Right);
        assert_eq!(engine.tick(), TickEvent::Ate { score: 60 });
        assert_eq!(engine.tick_interval(), Duration::from_millis(100));

        engine.restart();
        assert_eq!(engine.tick_interval(), Duration::from_millis(150));
    }

    #[test]
    fn test_filling_the_board_ends_the_game() {
        let (mut engine, store) = create_engine(SnakeSettings {
            grid_width: 5,
            grid_height: 5,
            ..SnakeSettings::default()
        });
        engine.start();

        // Every cell but (4,4) is covered; the head wraps left into it.
        let mut body = vec![p(0, 4)];
        body.extend(
            (0..5)
                .flat_map(|y| (0..5).map(move |x| p(x, y)))
                .filter(|c| *c != p(4, 4) && *c != p(0, 4)),
        );
        engine.set_board(body, Some(p(4, 4)), Direction::Left);
        engine.set_score(230);

        let event = engine.tick();
        assert_eq!(
            event,
            TickEvent::GameOver {
                reason: DeathReason::BoardFilled,
                new_high_score: true
            }
        );
        assert_eq!(engine.food(), None);
        assert_eq!(engine.snake().len(), 25);
        assert_eq!(store.current(), 240);
    }

    #[test]
    fn test_food_placed_on_last_free_cell() {
        let (mut engine, _) = create_engine(SnakeSettings {
            grid_width: 5,
            grid_height: 5,
            ..SnakeSettings::default()
        });
        let body: Vec<Point> = (0..5)
            .flat_map(|y| (0..5).map(move |x| p(x, y)))
            .filter(|c| *c != p(3, 3))
            .collect();
        engine.set_board(body, None, Direction::Right);

        assert_eq!(engine.spawn_food(), Some(p(3, 3)));
    }

    #[test]
    fn test_random_play_preserves_invariants() {
        let (mut engine, store) = create_engine(SnakeSettings::default());
        let mut control = SessionRng::new(1234);
        let directions = [Direction::Up, Direction::Down, Direction::Left, Direction::Right];
        let mut best = 0;

        for _ in 0..2000 {
            if engine.phase() == Phase::GameOver {
                engine.restart();
            }
            if engine.phase() == Phase::Ready {
                engine.start();
            }

            let before_len = engine.snake().len();
            let before_food = engine.food();
            let before_score = engine.score();
            engine.request_direction(directions[control.random_range(0..4)]);

            match engine.tick() {
                TickEvent::Moved => {
                    assert_eq!(engine.snake().len(), before_len);
                    assert_ne!(Some(engine.snake().head()), before_food);
                    assert_eq!(engine.score(), before_score);
                }
                TickEvent::Ate { .. } | TickEvent::SpeedChanged { .. } => {
                    assert_eq!(engine.snake().len(), before_len + 1);
                    assert_eq!(Some(engine.snake().head()), before_food);
                    assert_eq!(engine.score(), before_score + FOOD_REWARD);
                }
                TickEvent::GameOver { .. } => {
                    assert_eq!(engine.snake().len(), before_len);
                }
                TickEvent::Idle => panic!("engine should be playing"),
            }

            assert!(engine.high_score() >= best);
            best = engine.high_score();
            assert_invariants(&engine);
        }

        assert_eq!(store.current(), engine.high_score());
    }
}
