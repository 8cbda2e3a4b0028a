mod colors;
mod command_sender;
mod config;
mod offline;
mod state;
mod ui;

use std::path::{Path, PathBuf};

use clap::Parser;
use eframe::egui;
use snake_engine::{
    FileHighScoreStore, SessionCommand, SessionRng, SnakeEngine, log, log_warn, logger,
};
use tokio::sync::mpsc;

use command_sender::CommandSender;
use config::{ClientConfig, default_config_path, get_config_manager};
use offline::spawn_session_thread;
use state::SharedState;
use ui::SnakeApp;

const BOARD_MARGIN: f32 = 40.0;
const CONTROLS_HEIGHT: f32 = 180.0;

#[derive(Parser)]
#[command(name = "snake_desktop")]
struct Args {
    /// Config file; defaults to snake_desktop_config.yaml next to the executable.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Fixed seed for food placement.
    #[arg(long)]
    seed: Option<u64>,
    #[arg(long)]
    log_prefix: bool,
}

fn load_config(path: &Path) -> ClientConfig {
    match get_config_manager(path).get_or_create_config() {
        Ok(config) => config,
        Err(e) => {
            log_warn!("Failed to load config from {}: {}, using defaults", path.display(), e);
            ClientConfig::default()
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let prefix = if args.log_prefix {
        Some("Snake".to_string())
    } else {
        None
    };
    logger::init_logger(prefix);

    let config_path = args.config.unwrap_or_else(default_config_path);
    let config = load_config(&config_path);

    let rng = match args.seed {
        Some(seed) => SessionRng::new(seed),
        None => SessionRng::from_random(),
    };
    log!("Starting snake with seed {}", rng.seed());

    let store = FileHighScoreStore::from_file(config.high_score_path());
    let engine = SnakeEngine::new(config.snake.clone(), rng, store)?;

    let shared_state = SharedState::new();
    let (command_tx, command_rx) = mpsc::unbounded_channel();
    let session_thread = spawn_session_thread(engine, command_rx, shared_state.clone());
    let command_sender = CommandSender::new(command_tx);

    let window_width = config.snake.grid_width as f32 * config.cell_size + BOARD_MARGIN;
    let window_height =
        config.snake.grid_height as f32 * config.cell_size + BOARD_MARGIN + CONTROLS_HEIGHT;
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([window_width, window_height])
            .with_title("Snake"),
        ..Default::default()
    };

    let app_sender = command_sender.clone();
    let result = eframe::run_native(
        "Snake",
        options,
        Box::new(move |_cc| Ok(Box::new(SnakeApp::new(config, shared_state, app_sender)))),
    );

    command_sender.send(SessionCommand::Shutdown);
    if session_thread.join().is_err() {
        log_warn!("Session thread panicked");
    }

    result?;
    Ok(())
}
