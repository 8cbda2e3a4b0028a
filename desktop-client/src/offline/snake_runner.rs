use std::thread::JoinHandle;

use snake_engine::{
    HighScoreStore, SessionCommand, SnakeEngine, SnakeSession, TokioTickTimer, log, log_warn,
};
use tokio::sync::mpsc;

use crate::state::SharedState;
use super::LocalBroadcaster;

/// Runs the session on its own single-threaded tokio runtime so the UI thread
/// only ever reads snapshots. The UI is asked to close once the session ends.
pub fn spawn_session_thread<S>(
    engine: SnakeEngine<S>,
    command_rx: mpsc::UnboundedReceiver<SessionCommand>,
    shared_state: SharedState,
) -> JoinHandle<()>
where
    S: HighScoreStore + 'static,
{
    std::thread::spawn(move || {
        let runtime = match tokio::runtime::Builder::new_current_thread()
            .enable_time()
            .build()
        {
            Ok(runtime) => runtime,
            Err(e) => {
                log_warn!("Failed to start session runtime: {}", e);
                shared_state.set_error(format!("Failed to start game loop: {}", e));
                return;
            }
        };

        let broadcaster = LocalBroadcaster::new(shared_state.clone());
        let summary = runtime.block_on(SnakeSession::run(
            engine,
            TokioTickTimer::new(),
            command_rx,
            broadcaster,
        ));

        log!(
            "Played {} game(s), last score {}, high score {}",
            summary.games_played,
            summary.last_score,
            summary.high_score
        );
        shared_state.set_should_close();
    })
}
