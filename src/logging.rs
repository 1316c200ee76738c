use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Pick the default log level from the command line flags
pub fn default_level(verbosity: u8, quiet: bool) -> &'static str {
    if quiet {
        return "error";
    }
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Initialize tracing for the application
///
/// Uses RUST_LOG if set, otherwise the level from `-v`/`--quiet`.
/// Logs go to stderr so they never mix with JSON on stdout.
///
/// # Errors
/// Returns error if a global subscriber is already installed
pub fn init(verbosity: u8, quiet: bool) -> Result<(), Box<dyn std::error::Error>> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level(verbosity, quiet)));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_level(true),
        )
        .try_init()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_level() {
        assert_eq!(default_level(0, false), "warn");
        assert_eq!(default_level(1, false), "info");
        assert_eq!(default_level(2, false), "debug");
        assert_eq!(default_level(7, false), "trace");
        assert_eq!(default_level(3, true), "error");
    }

    #[test]
    fn test_second_init_is_an_error_not_a_panic() {
        let _ = init(0, false);
        assert!(init(0, false).is_err());
    }
}
