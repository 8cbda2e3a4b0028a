use eframe::egui;
use snake_engine::SnakeSnapshot;
use std::sync::{Arc, Mutex};

/// State shared between the session thread and the UI thread.
#[derive(Clone, Default)]
pub struct SharedState {
    snapshot: Arc<Mutex<Option<SnakeSnapshot>>>,
    error: Arc<Mutex<Option<String>>>,
    should_close: Arc<Mutex<bool>>,
    context: Arc<Mutex<Option<egui::Context>>>,
}

impl SharedState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_snapshot(&self, snapshot: SnakeSnapshot) {
        if let Ok(mut current) = self.snapshot.lock() {
            *current = Some(snapshot);
        }
        self.request_repaint();
    }

    pub fn get_snapshot(&self) -> Option<SnakeSnapshot> {
        self.snapshot.lock().ok().and_then(|s| s.clone())
    }

    pub fn set_error(&self, error: String) {
        if let Ok(mut current) = self.error.lock() {
            *current = Some(error);
        }
        self.request_repaint();
    }

    pub fn get_error(&self) -> Option<String> {
        self.error.lock().ok().and_then(|e| e.clone())
    }

    pub fn set_should_close(&self) {
        if let Ok(mut flag) = self.should_close.lock() {
            *flag = true;
        }
        self.request_repaint();
    }

    pub fn should_close(&self) -> bool {
        self.should_close.lock().map(|flag| *flag).unwrap_or(true)
    }

    pub fn has_context(&self) -> bool {
        self.context.lock().map(|c| c.is_some()).unwrap_or(false)
    }

    pub fn set_context(&self, ctx: egui::Context) {
        if let Ok(mut current) = self.context.lock() {
            *current = Some(ctx);
        }
    }

    fn request_repaint(&self) {
        if let Ok(current) = self.context.lock()
            && let Some(ctx) = current.as_ref()
        {
            ctx.request_repaint();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use snake_engine::{MemoryHighScoreStore, SessionRng, SnakeEngine, SnakeSettings};

    #[test]
    fn test_clones_see_latest_snapshot() {
        let state = SharedState::new();
        let ui_side = state.clone();
        assert!(ui_side.get_snapshot().is_none());

        let engine = SnakeEngine::new(
            SnakeSettings::default(),
            SessionRng::new(1),
            MemoryHighScoreStore::new(0),
        )
        .unwrap();
        state.set_snapshot(engine.snapshot());
        assert_eq!(ui_side.get_snapshot(), Some(engine.snapshot()));
    }

    #[test]
    fn test_close_flag_and_error() {
        let state = SharedState::new();
        assert!(!state.should_close());
        assert!(state.get_error().is_none());

        state.set_error("boom".to_string());
        state.set_should_close();
        assert!(state.should_close());
        assert_eq!(state.get_error(), Some("boom".to_string()));
    }
}
