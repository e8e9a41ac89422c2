//! Configuration module for endpoint settings and YAML loading
//!
//! This module provides:
//! - Configuration types (`AppConfig`, `BinanceSettings`, `HuobiSettings`, `TransportSettings`)
//! - YAML loading functionality (`load_config`)
//! - Tracing subscriber setup (`init_logging`)

mod loader;
pub mod logging;
mod types;

// Re-export types
pub use types::{
    AppConfig, BinanceSettings, HuobiSettings, TransportSettings, MAX_LEVER_RATE,
    MAX_RECV_WINDOW_MS,
};

// Re-export loader functions
pub use loader::{load_config, load_config_from_str};
pub use logging::init_logging;
