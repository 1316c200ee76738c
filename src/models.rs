//! Data returned from a finished playback

use serde::{Deserialize, Serialize};

/// Summary of one successful play
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayReport {
    /// URL that was streamed
    pub url: String,
    /// Player command line
    pub player: String,
    /// Bytes read from the HTTP body
    pub bytes_fetched: u64,
    /// Bytes written into the player's stdin
    pub bytes_written: u64,
    /// Player exit code (None if killed by a signal)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exit_code: Option<i32>,
    /// Wall-clock time from request to player exit
    pub elapsed_ms: u64,
}
