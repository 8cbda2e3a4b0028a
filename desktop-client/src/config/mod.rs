mod client_config;

pub use client_config::{ClientConfig, default_config_path, get_config_manager};
