use snake_engine::{SnakeSnapshot, SnapshotBroadcaster};

use crate::state::SharedState;

/// Publishes snapshots straight into the UI's shared state.
#[derive(Clone)]
pub struct LocalBroadcaster {
    shared_state: SharedState,
}

impl LocalBroadcaster {
    pub fn new(shared_state: SharedState) -> Self {
        Self { shared_state }
    }
}

impl SnapshotBroadcaster for LocalBroadcaster {
    async fn broadcast(&self, snapshot: SnakeSnapshot) {
        self.shared_state.set_snapshot(snapshot);
    }
}
