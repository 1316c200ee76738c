//! CLI Command Tests
//!
//! Argument parsing, flag/config precedence, and exit codes of the play
//! command against a mocked server.

// =============================================================================
// CLI Argument Parsing Tests
// =============================================================================

mod cli_parsing {
    use clap::Parser;
    use pipeplay::cli::{Cli, PlayerChoice};
    use pipeplay::config::{Config, DEFAULT_URL};
    use pipeplay::stream::PlayerType;
    use std::time::Duration;

    #[test]
    fn test_url_positional() {
        let cli = Cli::parse_from(["pipeplay", "http://music.local/song.mp3"]);
        assert_eq!(cli.url.as_deref(), Some("http://music.local/song.mp3"));
        assert!(cli.player.is_none());
        assert!(!cli.json);
    }

    #[test]
    fn test_player_preset() {
        let cli = Cli::parse_from(["pipeplay", "--player", "ffplay"]);
        assert_eq!(cli.player, Some(PlayerChoice::Ffplay));

        let settings = cli.resolve(&Config::default());
        assert_eq!(settings.player.executable(), "ffplay");
        assert_eq!(
            settings.player.args(),
            ["-nodisp", "-autoexit", "-loglevel", "quiet", "-"]
        );
    }

    #[test]
    fn test_unknown_player_rejected() {
        assert!(Cli::try_parse_from(["pipeplay", "--player", "winamp"]).is_err());
    }

    #[test]
    fn test_global_flags() {
        let cli = Cli::parse_from([
            "pipeplay",
            "--json",
            "--quiet",
            "--timeout",
            "90",
            "--allow-error-status",
            "-vv",
        ]);
        assert!(cli.json);
        assert!(cli.quiet);
        assert!(cli.allow_error_status);
        assert_eq!(cli.timeout, Some(90));
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn test_flags_override_config() {
        let config = Config {
            url: Some("http://config.local/a.mp3".into()),
            player: Some(PlayerType::Mpv),
            timeout_secs: Some(10),
            allow_error_status: Some(false),
            ..Default::default()
        };
        let cli = Cli::parse_from([
            "pipeplay",
            "http://flag.local/b.mp3",
            "-p",
            "mpg123",
            "-t",
            "20",
            "--allow-error-status",
        ]);

        let settings = cli.resolve(&config);
        assert_eq!(settings.url, "http://flag.local/b.mp3");
        assert_eq!(settings.player.to_string(), "mpg123 --quiet -");
        assert_eq!(settings.timeout, Some(Duration::from_secs(20)));
        assert!(settings.allow_error_status);
    }

    #[test]
    fn test_config_fills_missing_flags() {
        let config = Config {
            url: Some("http://config.local/a.mp3".into()),
            player: Some(PlayerType::Mpv),
            timeout_secs: Some(10),
            ..Default::default()
        };
        let cli = Cli::parse_from(["pipeplay"]);

        let settings = cli.resolve(&config);
        assert_eq!(settings.url, "http://config.local/a.mp3");
        assert_eq!(settings.player.executable(), "mpv");
        assert_eq!(settings.timeout, Some(Duration::from_secs(10)));
    }

    #[test]
    fn test_player_args_override_preset_args() {
        let cli = Cli::parse_from(["pipeplay", "-p", "mpv", "--", "--volume=50", "-"]);
        let settings = cli.resolve(&Config::default());
        assert_eq!(settings.player.to_string(), "mpv --volume=50 -");
        assert_eq!(settings.url, DEFAULT_URL);
    }
}

// =============================================================================
// Exit Code Tests
// =============================================================================

#[cfg(unix)]
mod exit_codes {
    use clap::Parser;
    use mockito::Server;
    use pipeplay::cli::{Cli, ExitCode, Output};
    use pipeplay::commands::play_cmd;
    use std::path::PathBuf;
    use tempfile::TempDir;

    /// Empty config file so the user's real config never leaks in
    fn empty_config() -> (TempDir, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "").unwrap();
        (dir, path)
    }

    fn cli_for(url: &str, config: &std::path::Path) -> Cli {
        Cli::parse_from([
            "pipeplay",
            url,
            "-q",
            "-c",
            config.to_str().unwrap(),
            "--player-cmd",
            "sh",
            "--",
            "-c",
            "cat > /dev/null",
        ])
    }

    #[tokio::test]
    async fn test_success_exit_code() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/ok.mp3")
            .with_status(200)
            .with_body(vec![1u8; 8192])
            .create_async()
            .await;

        let (_dir, config) = empty_config();
        let cli = cli_for(&format!("{}/ok.mp3", server.url()), &config);
        assert_eq!(play_cmd(&cli, &Output::new(&cli)).await, ExitCode::Success);
    }

    #[tokio::test]
    async fn test_http_error_exit_code() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/gone.mp3")
            .with_status(500)
            .create_async()
            .await;

        let (_dir, config) = empty_config();
        let cli = cli_for(&format!("{}/gone.mp3", server.url()), &config);
        assert_eq!(play_cmd(&cli, &Output::new(&cli)).await, ExitCode::Error);
    }

    #[tokio::test]
    async fn test_unreachable_exit_code() {
        let (_dir, config) = empty_config();
        let cli = cli_for("http://127.0.0.1:1/mp3/test.mp3", &config);
        assert_eq!(play_cmd(&cli, &Output::new(&cli)).await, ExitCode::Error);
    }

    #[tokio::test]
    async fn test_invalid_url_exit_code() {
        let (_dir, config) = empty_config();
        let cli = cli_for("ftp://music.local/a.mp3", &config);
        assert_eq!(
            play_cmd(&cli, &Output::new(&cli)).await,
            ExitCode::InvalidArgs
        );
    }

    #[tokio::test]
    async fn test_missing_config_exit_code() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        let cli = cli_for("http://127.0.0.1:1/a.mp3", &missing);
        assert_eq!(
            play_cmd(&cli, &Output::new(&cli)).await,
            ExitCode::InvalidArgs
        );
    }
}

// =============================================================================
// Error Line Tests (run the real binary, count stderr lines)
// =============================================================================

#[cfg(unix)]
mod error_line {
    use std::io::{Read, Write};
    use std::net::TcpListener;
    use std::process::{Command, Output};

    fn run(args: &[&str]) -> Output {
        let dir = tempfile::tempdir().unwrap();
        let config = dir.path().join("config.toml");
        std::fs::write(&config, "").unwrap();

        Command::new(env!("CARGO_BIN_EXE_pipeplay"))
            .args(args)
            .arg("-c")
            .arg(&config)
            .args(["--player-cmd", "sh", "--", "-c", "cat > /dev/null"])
            .env_remove("RUST_LOG")
            .output()
            .unwrap()
    }

    fn stderr_lines(output: &Output) -> Vec<String> {
        String::from_utf8_lossy(&output.stderr)
            .lines()
            .map(str::to_string)
            .collect()
    }

    /// Serves one response that ends 99_000 bytes short of its Content-Length
    fn truncating_server() -> String {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        std::thread::spawn(move || {
            let (mut socket, _) = listener.accept().unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = socket.read(&mut buf).unwrap();
                if n == 0 {
                    return;
                }
                request.extend_from_slice(&buf[..n]);
            }
            socket
                .write_all(b"HTTP/1.1 200 OK\r\nContent-Length: 100000\r\n\r\n")
                .unwrap();
            socket.write_all(&[0u8; 1000]).unwrap();
        });
        format!("http://{addr}/mp3/test.mp3")
    }

    #[test]
    fn test_quiet_still_prints_one_error_line() {
        let output = run(&["http://127.0.0.1:1/mp3/test.mp3", "--quiet"]);

        assert_eq!(output.status.code(), Some(1));
        let lines = stderr_lines(&output);
        assert_eq!(lines.len(), 1, "{lines:?}");
        assert!(lines[0].starts_with("Error: Request failed: "), "{lines:?}");
        assert!(
            lines[0].to_lowercase().contains("connection refused"),
            "{lines:?}"
        );
    }

    #[test]
    fn test_dropped_stream_reported_once() {
        let url = truncating_server();
        let output = run(&[url.as_str()]);

        assert_eq!(output.status.code(), Some(1));
        let lines = stderr_lines(&output);
        assert_eq!(lines.len(), 1, "{lines:?}");
        assert!(lines[0].starts_with("Error: Stream interrupted: "), "{lines:?}");
    }

    #[test]
    fn test_json_error_is_one_line() {
        let output = run(&["http://127.0.0.1:1/mp3/test.mp3", "--json"]);

        assert_eq!(output.status.code(), Some(1));
        let lines = stderr_lines(&output);
        assert_eq!(lines.len(), 1, "{lines:?}");
        let json: serde_json::Value = serde_json::from_str(&lines[0]).unwrap();
        assert_eq!(json["exit_code"], 1);
    }
}
