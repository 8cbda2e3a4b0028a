use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};

use crate::config::{
    ConfigContentProvider, ConfigSerializer, FileContentConfigProvider, YamlConfigSerializer,
};
use crate::log_warn;

/// Durable storage for the single best score.
///
/// `load` never fails: anything unreadable counts as no record (0).
pub trait HighScoreStore: Send {
    fn load(&self) -> u32;
    fn save(&mut self, score: u32) -> Result<(), String>;
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScoreRecord {
    pub high_score: u32,
}

pub struct ContentHighScoreStore<TProvider, TSerializer = YamlConfigSerializer>
where
    TProvider: ConfigContentProvider,
    TSerializer: ConfigSerializer<HighScoreRecord>,
{
    provider: TProvider,
    serializer: TSerializer,
}

impl<TProvider, TSerializer> ContentHighScoreStore<TProvider, TSerializer>
where
    TProvider: ConfigContentProvider,
    TSerializer: ConfigSerializer<HighScoreRecord>,
{
    pub fn new(provider: TProvider, serializer: TSerializer) -> Self {
        Self {
            provider,
            serializer,
        }
    }
}

pub type FileHighScoreStore = ContentHighScoreStore<FileContentConfigProvider>;

impl FileHighScoreStore {
    pub fn from_file(path: impl Into<PathBuf>) -> Self {
        Self::new(FileContentConfigProvider::new(path), YamlConfigSerializer::new())
    }
}

impl<TProvider, TSerializer> HighScoreStore for ContentHighScoreStore<TProvider, TSerializer>
where
    TProvider: ConfigContentProvider + Send,
    TSerializer: ConfigSerializer<HighScoreRecord> + Send,
{
    fn load(&self) -> u32 {
        let content = match self.provider.get_config_content() {
            Ok(Some(content)) => content,
            Ok(None) => return 0,
            Err(e) => {
                log_warn!("Failed to read high score, starting from 0: {}", e);
                return 0;
            }
        };

        match self.serializer.deserialize(&content) {
            Ok(record) => record.high_score,
            Err(e) => {
                log_warn!("Stored high score is corrupt, starting from 0: {}", e);
                0
            }
        }
    }

    fn save(&mut self, score: u32) -> Result<(), String> {
        let content = self
            .serializer
            .serialize(&HighScoreRecord { high_score: score })?;
        self.provider.set_config_content(&content)
    }
}

/// Non-durable store. Clones share the same value, so a test can keep one
/// handle while the engine owns another.
#[derive(Clone, Default)]
pub struct MemoryHighScoreStore {
    value: Arc<Mutex<u32>>,
}

impl MemoryHighScoreStore {
    pub fn new(initial: u32) -> Self {
        Self {
            value: Arc::new(Mutex::new(initial)),
        }
    }

    pub fn current(&self) -> u32 {
        self.value.lock().map(|v| *v).unwrap_or(0)
    }
}

impl HighScoreStore for MemoryHighScoreStore {
    fn load(&self) -> u32 {
        self.current()
    }

    fn save(&mut self, score: u32) -> Result<(), String> {
        let mut value = self
            .value
            .lock()
            .map_err(|e| format!("High score lock poisoned: {}", e))?;
        *value = score;
        Ok(())
    }
}
