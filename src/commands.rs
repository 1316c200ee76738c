//! CLI Command Handlers
//!
//! Resolves settings, runs the play, and maps the outcome to an exit code.

use crate::cli::{Cli, ExitCode, Output};
use crate::config::Config;
use crate::stream::{validate_url, PlayError, StreamPlayer};

/// One line naming the failure and every underlying cause
pub fn failure_message(err: PlayError) -> String {
    format!("{:#}", anyhow::Error::new(err))
}

/// Load the config named on the command line, or the default one
fn load_config(cli: &Cli) -> anyhow::Result<Config> {
    match cli.config.as_deref() {
        Some(path) => Config::load_from(path),
        None => Ok(Config::load()),
    }
}

pub async fn play_cmd(cli: &Cli, output: &Output) -> ExitCode {
    let config = match load_config(cli) {
        Ok(config) => config,
        Err(e) => return output.error(format!("{:#}", e), ExitCode::InvalidArgs),
    };

    let settings = cli.resolve(&config);
    if let Err(e) = validate_url(&settings.url) {
        return output.error(e.to_string(), ExitCode::InvalidArgs);
    }

    tracing::info!(url = %settings.url, player = %settings.player, "playing");
    let player = StreamPlayer::from_settings(&settings);

    match player.play(&settings.url).await {
        Ok(report) => {
            tracing::info!(
                bytes = report.bytes_written,
                elapsed_ms = report.elapsed_ms,
                "playback finished"
            );
            if let Err(e) = output.report(&report) {
                return output.error(format!("Failed to serialize: {}", e), ExitCode::Error);
            }
            ExitCode::Success
        }
        Err(e) => output.error(failure_message(e), ExitCode::Error),
    }
}
