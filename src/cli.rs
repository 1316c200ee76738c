//! CLI - Command Line Interface for pipeplay
//!
//! One command: fetch a URL and play it through a command-line player.
//! Output is silent on success unless `--json` or `-v` is given.
//!
//! # Examples
//!
//! ```bash
//! # Play the default URL through mpg123
//! pipeplay
//!
//! # Play through mpv, give up after a minute
//! pipeplay http://localhost:8080/mp3/song.mp3 --player mpv --timeout 60
//!
//! # Custom player and arguments
//! pipeplay http://host/a.mp3 --player-cmd madplay -- -q -
//! ```

use clap::{ArgAction, Parser, ValueEnum};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::config::{Config, PlaySettings};
use crate::models::PlayReport;
use crate::stream::{PlayerSpec, PlayerType};

// =============================================================================
// Exit Codes
// =============================================================================

/// Exit codes for CLI operations (semantic for scripting)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Success
    Success = 0,
    /// Playback failed (network, player, pipe, or exit status)
    Error = 1,
    /// Invalid arguments or config
    InvalidArgs = 2,
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> i32 {
        code as i32
    }
}

impl From<ExitCode> for std::process::ExitCode {
    fn from(code: ExitCode) -> std::process::ExitCode {
        std::process::ExitCode::from(code as u8)
    }
}

// =============================================================================
// Main CLI Structure
// =============================================================================

/// pipeplay - stream an MP3 over HTTP into a command-line player
#[derive(Parser, Debug)]
#[command(
    name = "pipeplay",
    version,
    about = "Stream an MP3 over HTTP into a command-line audio player",
    long_about = "Downloads an MP3 and pipes the bytes straight into the stdin of an \
                  external player, then waits for the player to finish.\n\n\
                  Arguments after `--` replace the player's default arguments.",
    after_help = "EXAMPLES:\n\
                  pipeplay                                   Play the default URL\n\
                  pipeplay http://host/a.mp3 -p mpv          Play through mpv\n\
                  pipeplay http://host/a.mp3 --json          Print a JSON report\n\
                  pipeplay URL --player-cmd madplay -- -q -  Custom player"
)]
pub struct Cli {
    /// URL of the MP3 to stream (default from config, then http://localhost:8080/mp3/test.mp3)
    pub url: Option<String>,

    /// Built-in player preset
    #[arg(long, short = 'p', value_enum)]
    pub player: Option<PlayerChoice>,

    /// Custom player executable (takes arguments after `--`)
    #[arg(long, value_name = "PATH", conflicts_with = "player")]
    pub player_cmd: Option<String>,

    /// Give up after this many seconds (default: wait indefinitely)
    #[arg(long, short = 't', value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Stream the body even when the server answers with an error status
    #[arg(long)]
    pub allow_error_status: bool,

    /// Output format as JSON
    #[arg(long, short = 'j')]
    pub json: bool,

    /// Only log errors (a failed play still prints its error line)
    #[arg(long, short = 'q')]
    pub quiet: bool,

    /// Path to config file
    #[arg(long, short = 'c')]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(long, short = 'v', action = ArgAction::Count)]
    pub verbose: u8,

    /// Arguments passed to the player instead of its defaults
    #[arg(last = true, value_name = "PLAYER_ARGS")]
    pub player_args: Vec<String>,
}

impl Cli {
    /// Check if JSON output should be used
    pub fn should_json(&self) -> bool {
        self.json
    }

    /// Merge flags over the config file. Flags win.
    pub fn resolve(&self, config: &Config) -> PlaySettings {
        let base = PlaySettings::from(config);

        let mut player = if let Some(cmd) = &self.player_cmd {
            PlayerSpec::custom(cmd.clone(), Vec::new())
        } else if let Some(choice) = self.player {
            PlayerSpec::preset(choice.into())
        } else {
            base.player
        };
        if !self.player_args.is_empty() {
            player = player.with_args(self.player_args.clone());
        }

        PlaySettings {
            url: self.url.clone().unwrap_or(base.url),
            player,
            timeout: self.timeout.map(Duration::from_secs).or(base.timeout),
            allow_error_status: self.allow_error_status || base.allow_error_status,
        }
    }
}

/// Player selection on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum PlayerChoice {
    /// mpg123 (default)
    #[default]
    Mpg123,
    /// mpv media player
    Mpv,
    /// ffplay from FFmpeg
    Ffplay,
}

impl From<PlayerChoice> for PlayerType {
    fn from(choice: PlayerChoice) -> Self {
        match choice {
            PlayerChoice::Mpg123 => PlayerType::Mpg123,
            PlayerChoice::Mpv => PlayerType::Mpv,
            PlayerChoice::Ffplay => PlayerType::Ffplay,
        }
    }
}

// =============================================================================
// JSON Output Types
// =============================================================================

/// Generic JSON output wrapper with status
#[derive(Debug, Serialize, Deserialize)]
pub struct JsonOutput<T: Serialize> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "is_zero")]
    pub exit_code: i32,
}

fn is_zero(n: &i32) -> bool {
    *n == 0
}

impl<T: Serialize> JsonOutput<T> {
    /// Create success output with data
    pub fn success(data: T) -> Self {
        Self {
            data: Some(data),
            error: None,
            exit_code: 0,
        }
    }

    /// Create error output (no data)
    pub fn error_msg(msg: impl Into<String>, code: ExitCode) -> JsonOutput<()> {
        JsonOutput::<()> {
            data: None,
            error: Some(msg.into()),
            exit_code: code.into(),
        }
    }
}

// =============================================================================
// Output Helpers
// =============================================================================

/// Output handler for consistent formatting
pub struct Output {
    pub json: bool,
}

impl Output {
    pub fn new(cli: &Cli) -> Self {
        Self {
            json: cli.should_json(),
        }
    }

    /// Print the report of a finished play (JSON mode only; human mode stays silent)
    pub fn report(&self, report: &PlayReport) -> anyhow::Result<()> {
        if self.json {
            let output = JsonOutput::success(report);
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        Ok(())
    }

    /// Print error and return exit code. Never suppressed.
    pub fn error(&self, msg: impl Into<String>, code: ExitCode) -> ExitCode {
        eprintln!("{}", self.error_line(&msg.into(), code));
        code
    }

    /// The single line written for a failure
    pub fn error_line(&self, msg: &str, code: ExitCode) -> String {
        if self.json {
            let output = JsonOutput::<()>::error_msg(msg, code);
            if let Ok(json) = serde_json::to_string(&output) {
                return json;
            }
        }
        format!("Error: {}", msg)
    }
}

// =============================================================================
// Tests
// =============================================================================
