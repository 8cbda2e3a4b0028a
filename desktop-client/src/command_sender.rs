use snake_engine::{InputIntent, SessionCommand};
use tokio::sync::mpsc;

#[derive(Clone)]
pub struct CommandSender {
    tx: mpsc::UnboundedSender<SessionCommand>,
}

impl CommandSender {
    pub fn new(tx: mpsc::UnboundedSender<SessionCommand>) -> Self {
        Self { tx }
    }

    pub fn send_intent(&self, intent: InputIntent) {
        self.send(SessionCommand::Intent(intent));
    }

    /// The session may already be gone during shutdown; that is not an error.
    pub fn send(&self, command: SessionCommand) {
        let _ = self.tx.send(command);
    }
}
