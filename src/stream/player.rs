//! External player processes
//!
//! Describes which command-line player to launch and spawns it with its
//! stdin wired to a pipe we can write the audio stream into.

use std::fmt;
use std::process::Stdio;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::process::{Child, Command};

/// Built-in players that know how to decode MP3 from stdin
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlayerType {
    /// mpg123 (default)
    #[default]
    Mpg123,
    /// mpv media player
    Mpv,
    /// ffplay from FFmpeg
    Ffplay,
}

impl PlayerType {
    /// Get the command name for this player
    pub fn command(&self) -> &'static str {
        match self {
            PlayerType::Mpg123 => "mpg123",
            PlayerType::Mpv => "mpv",
            PlayerType::Ffplay => "ffplay",
        }
    }

    /// Arguments that keep the player quiet and make it read from stdin
    pub fn stdin_args(&self) -> &'static [&'static str] {
        match self {
            PlayerType::Mpg123 => &["--quiet", "-"],
            PlayerType::Mpv => &["--really-quiet", "--no-video", "-"],
            PlayerType::Ffplay => &["-nodisp", "-autoexit", "-loglevel", "quiet", "-"],
        }
    }
}

impl fmt::Display for PlayerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.command())
    }
}

/// Errors from launching the player
#[derive(Debug, Error)]
pub enum PlayerError {
    #[error("Player '{0}' not found. Install it first.")]
    NotFound(String),
    #[error("Failed to start player")]
    StartFailed(#[from] std::io::Error),
}

/// Executable plus the arguments it is launched with
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerSpec {
    executable: String,
    args: Vec<String>,
}

impl PlayerSpec {
    /// Spec for one of the built-in players
    pub fn preset(player_type: PlayerType) -> Self {
        Self {
            executable: player_type.command().to_string(),
            args: player_type
                .stdin_args()
                .iter()
                .map(|a| a.to_string())
                .collect(),
        }
    }

    /// Spec for an arbitrary executable
    pub fn custom(executable: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            executable: executable.into(),
            args,
        }
    }

    /// Replace the argument list
    pub fn with_args(mut self, args: Vec<String>) -> Self {
        self.args = args;
        self
    }

    pub fn executable(&self) -> &str {
        &self.executable
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Launch the player with stdin piped and stdout/stderr inherited.
    ///
    /// The child is killed if its handle is dropped before it exits, so an
    /// abandoned playback never leaves a player running.
    pub fn spawn(&self) -> Result<Child, PlayerError> {
        let mut cmd = Command::new(&self.executable);
        cmd.args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .kill_on_drop(true);

        cmd.spawn().map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                PlayerError::NotFound(self.executable.clone())
            } else {
                PlayerError::StartFailed(e)
            }
        })
    }
}

impl Default for PlayerSpec {
    fn default() -> Self {
        Self::preset(PlayerType::default())
    }
}

impl fmt::Display for PlayerSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.executable)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}
