//! Streaming infrastructure
//!
//! - Source: HTTP fetch of the audio file
//! - Player: external player process (mpg123, mpv, ffplay, or custom)
//! - Pipe: copies the body into the player's stdin and waits for it

pub mod pipe;
pub mod player;
pub mod source;

pub use pipe::{play, PlayError, StreamPlayer};
pub use player::{PlayerError, PlayerSpec, PlayerType};
pub use source::{validate_url, HttpSource, SourceError};
