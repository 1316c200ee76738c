//! pipeplay - stream an MP3 over HTTP into a command-line player
//!
//! Fetches the file, pipes the bytes into the stdin of mpg123 (or another
//! player), and waits for the player to exit.
//!
//! # Modules
//!
//! - `stream` - HTTP source, player process, and the copy between them
//! - `models` - Playback report
//! - `config` - Config file and resolved settings
//! - `cli` - Argument parsing and output formatting
//! - `commands` - CLI command handler
//! - `logging` - tracing setup

pub mod cli;
pub mod commands;
pub mod config;
pub mod logging;
pub mod models;
pub mod stream;

// Re-export commonly used types
pub use config::{Config, PlaySettings, DEFAULT_URL};
pub use models::PlayReport;
pub use stream::{play, PlayError, PlayerSpec, PlayerType, StreamPlayer};
