//! Stream player
//!
//! Fetches the audio over HTTP and pipes it into the player's stdin:
//! request, spawn, copy, close stdin, wait. The first failure aborts the
//! remaining steps, except that a spawned player is always waited on.

use std::io;
use std::process::ExitStatus;
use std::time::{Duration, Instant};

use reqwest::Response;
use thiserror::Error;
use tokio::io::AsyncWriteExt;
use tokio::process::ChildStdin;

use super::player::{PlayerError, PlayerSpec};
use super::source::{HttpSource, SourceError};
use crate::config::PlaySettings;
use crate::models::PlayReport;

/// Any failure during a play. All of them end the operation.
#[derive(Debug, Error)]
pub enum PlayError {
    #[error(transparent)]
    Source(#[from] SourceError),
    #[error(transparent)]
    Player(#[from] PlayerError),
    #[error("Stream interrupted")]
    Body(#[source] reqwest::Error),
    #[error("Failed to write to player")]
    Pipe(#[source] io::Error),
    #[error("Failed waiting for player")]
    Wait(#[source] io::Error),
    #[error("Player exited with {0}")]
    Exited(ExitStatus),
    #[error("Playback timed out after {0:?}")]
    TimedOut(Duration),
}

impl PlayError {
    /// True when the player closed its stdin before the stream ended
    pub fn is_broken_pipe(&self) -> bool {
        matches!(self, PlayError::Pipe(e) if e.kind() == io::ErrorKind::BrokenPipe)
    }
}

/// Byte counts from one copy
#[derive(Debug, Default, Clone, Copy)]
struct Transfer {
    fetched: u64,
    written: u64,
}

/// Plays a remote MP3 through an external player
#[derive(Debug, Clone, Default)]
pub struct StreamPlayer {
    source: HttpSource,
    player: PlayerSpec,
    timeout: Option<Duration>,
}

impl StreamPlayer {
    /// Create a player with a default HTTP source and no timeout
    pub fn new(player: PlayerSpec) -> Self {
        Self {
            source: HttpSource::new(),
            player,
            timeout: None,
        }
    }

    /// Build from resolved CLI/config settings
    pub fn from_settings(settings: &PlaySettings) -> Self {
        Self::new(settings.player.clone())
            .with_source(HttpSource::new().allow_error_status(settings.allow_error_status))
            .with_timeout(settings.timeout)
    }

    pub fn with_source(mut self, source: HttpSource) -> Self {
        self.source = source;
        self
    }

    /// Bound the whole play. `None` waits indefinitely.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Stream `url` into the player and wait for it to finish
    pub async fn play(&self, url: &str) -> Result<PlayReport, PlayError> {
        let run = self.run(url);
        match self.timeout {
            // Dropping `run` drops the child, which kills it.
            Some(limit) => tokio::time::timeout(limit, run)
                .await
                .map_err(|_| PlayError::TimedOut(limit))?,
            None => run.await,
        }
    }

    async fn run(&self, url: &str) -> Result<PlayReport, PlayError> {
        let started = Instant::now();

        let response = self.source.open(url).await?;

        tracing::info!(player = %self.player, "starting player");
        let mut child = self.player.spawn()?;

        let copied = match child.stdin.take() {
            Some(stdin) => pump(response, stdin).await,
            None => Err(PlayError::Pipe(io::Error::other("player stdin not captured"))),
        };
        match &copied {
            Err(e) if e.is_broken_pipe() => tracing::debug!("player closed its input early"),
            Err(e) => tracing::debug!(error = %e, "copy to player aborted"),
            Ok(_) => {}
        }

        // stdin is closed by now, so the player sees end of input
        let status = child.wait().await.map_err(PlayError::Wait);

        let transfer = copied?;
        let status = status?;
        tracing::info!(%status, bytes = transfer.written, "player exited");

        if !status.success() {
            return Err(PlayError::Exited(status));
        }

        Ok(PlayReport {
            url: url.to_string(),
            player: self.player.to_string(),
            bytes_fetched: transfer.fetched,
            bytes_written: transfer.written,
            exit_code: status.code(),
            elapsed_ms: started.elapsed().as_millis() as u64,
        })
    }
}

/// Copy the response body into the player's stdin.
///
/// Takes ownership of `stdin`; it is dropped (closing the pipe) when this
/// returns, on success and on every error.
async fn pump(mut response: Response, mut stdin: ChildStdin) -> Result<Transfer, PlayError> {
    let mut transfer = Transfer::default();

    while let Some(chunk) = response.chunk().await.map_err(PlayError::Body)? {
        transfer.fetched += chunk.len() as u64;
        stdin.write_all(&chunk).await.map_err(PlayError::Pipe)?;
        transfer.written += chunk.len() as u64;
    }

    stdin.flush().await.map_err(PlayError::Pipe)?;
    tracing::debug!(bytes = transfer.written, "stream fully copied");
    Ok(transfer)
}

/// One-shot play with an explicit executable and argument list
pub async fn play(
    url: &str,
    player_executable: &str,
    player_args: &[&str],
) -> Result<PlayReport, PlayError> {
    let spec = PlayerSpec::custom(
        player_executable,
        player_args.iter().map(|a| a.to_string()).collect(),
    );
    StreamPlayer::new(spec).play(url).await
}
