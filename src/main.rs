//! pipeplay - stream an MP3 over HTTP into a command-line player
//!
//! # Usage
//!
//! ```bash
//! # Play the default URL through mpg123
//! pipeplay
//!
//! # Pick the URL and player
//! pipeplay http://localhost:8080/mp3/test.mp3 --player mpv
//!
//! # Machine-readable report
//! pipeplay http://localhost:8080/mp3/test.mp3 --json
//! ```

use clap::Parser;

use pipeplay::cli::{Cli, Output};
use pipeplay::{commands, logging};

#[tokio::main]
async fn main() -> std::process::ExitCode {
    let cli = Cli::parse();

    // Logging is best effort
    let _ = logging::init(cli.verbose, cli.quiet);

    let output = Output::new(&cli);
    commands::play_cmd(&cli, &output).await.into()
}
