use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use snake_engine::SnakeSettings;
use snake_engine::config::{ConfigManager, FileContentConfigProvider, Validate, YamlConfigSerializer};
use snake_engine::input::DEFAULT_SWIPE_THRESHOLD;

const CONFIG_FILE_NAME: &str = "snake_desktop_config.yaml";
const HIGH_SCORE_FILE_NAME: &str = "snake_high_score.yaml";

/// Resolves a relative file name against the executable's directory. Absolute
/// paths are returned unchanged.
pub fn resolve_beside_exe(file_name: &str) -> PathBuf {
    let path = Path::new(file_name);
    if path.is_absolute() {
        return path.to_path_buf();
    }
    if let Ok(exe_path) = std::env::current_exe()
        && let Some(exe_dir) = exe_path.parent()
    {
        return exe_dir.join(path);
    }
    path.to_path_buf()
}

pub fn default_config_path() -> PathBuf {
    resolve_beside_exe(CONFIG_FILE_NAME)
}

pub fn get_config_manager(
    path: &Path,
) -> ConfigManager<FileContentConfigProvider, ClientConfig, YamlConfigSerializer> {
    ConfigManager::new(
        FileContentConfigProvider::new(path),
        YamlConfigSerializer::new(),
    )
}

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
pub struct ClientConfig {
    pub snake: SnakeSettings,
    pub high_score_file: String,
    #[serde(default = "default_swipe_threshold")]
    pub swipe_threshold: f32,
    #[serde(default = "default_cell_size")]
    pub cell_size: f32,
}

fn default_swipe_threshold() -> f32 {
    DEFAULT_SWIPE_THRESHOLD
}

fn default_cell_size() -> f32 {
    24.0
}

impl ClientConfig {
    pub fn high_score_path(&self) -> PathBuf {
        resolve_beside_exe(&self.high_score_file)
    }
}

impl Validate for ClientConfig {
    fn validate(&self) -> Result<(), String> {
        self.snake.validate()?;
        if self.high_score_file.trim().is_empty() {
            return Err("high_score_file must not be empty".to_string());
        }
        if !(5.0..=200.0).contains(&self.swipe_threshold) {
            return Err("swipe_threshold must be between 5 and 200".to_string());
        }
        if !(8.0..=64.0).contains(&self.cell_size) {
            return Err("cell_size must be between 8 and 64".to_string());
        }
        Ok(())
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            snake: SnakeSettings::default(),
            high_score_file: HIGH_SCORE_FILE_NAME.to_string(),
            swipe_threshold: default_swipe_threshold(),
            cell_size: default_cell_size(),
        }
    }
}
