use std::future::Future;

use tokio::sync::mpsc;

use crate::high_score::HighScoreStore;
use crate::input::InputIntent;
use crate::log;
use crate::snake::{Phase, SnakeEngine, SnakeSnapshot, TickEvent};
use crate::timer::TickTimer;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionCommand {
    Intent(InputIntent),
    Shutdown,
}

/// Receives a snapshot after every state change.
pub trait SnapshotBroadcaster: Send + Sync + Clone + 'static {
    fn broadcast(&self, snapshot: SnakeSnapshot) -> impl Future<Output = ()> + Send;
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SessionSummary {
    pub games_played: u32,
    pub last_score: u32,
    pub high_score: u32,
    pub ticks: u64,
}

pub struct SnakeSession;

impl SnakeSession {
    /// Drives `engine` until `Shutdown` arrives or every command sender is
    /// dropped. Timer ticks and commands are handled one at a time, in arrival
    /// order.
    pub async fn run<S, T, B>(
        mut engine: SnakeEngine<S>,
        mut timer: T,
        mut commands: mpsc::UnboundedReceiver<SessionCommand>,
        broadcaster: B,
    ) -> SessionSummary
    where
        S: HighScoreStore,
        T: TickTimer,
        B: SnapshotBroadcaster,
    {
        let mut summary = SessionSummary::default();
        sync_timer(&engine, &mut timer);
        broadcaster.broadcast(engine.snapshot()).await;

        loop {
            let changed = tokio::select! {
                _ = timer.next_tick() => {
                    let event = engine.tick();
                    if event != TickEvent::Idle {
                        summary.ticks += 1;
                    }
                    if let TickEvent::GameOver { new_high_score, .. } = event {
                        summary.games_played += 1;
                        if new_high_score {
                            log!("New high score: {}", engine.high_score());
                        }
                    }
                    event != TickEvent::Idle
                }
                command = commands.recv() => {
                    match command {
                        Some(SessionCommand::Intent(intent)) => engine.handle_intent(intent),
                        Some(SessionCommand::Shutdown) | None => break,
                    }
                }
            };

            if changed {
                sync_timer(&engine, &mut timer);
                broadcaster.broadcast(engine.snapshot()).await;
            }
        }

        timer.stop();
        summary.last_score = engine.score();
        summary.high_score = engine.high_score();
        log!(
            "Session finished after {} game(s). High score: {}",
            summary.games_played,
            summary.high_score
        );
        summary
    }
}

/// Runs the timer exactly while the engine is playing, at the engine's current
/// interval.
fn sync_timer<S: HighScoreStore, T: TickTimer>(engine: &SnakeEngine<S>, timer: &mut T) {
    if engine.phase() == Phase::Playing {
        if timer.interval() != Some(engine.tick_interval()) {
            timer.start(engine.tick_interval());
        }
    } else if timer.is_running() {
        timer.stop();
    }
}
