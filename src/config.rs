use std::net::SocketAddr;

use clap::ArgAction;

pub const DEFAULT_BIND: &str = "127.0.0.1:3000";

#[derive(Debug, Clone, clap::Parser)]
#[command(version, about = "Serve the workout tracking API")]
pub struct ServerConfig {
    /// Address to listen on
    #[arg(long, env = "WORKOUT_BIND", default_value = DEFAULT_BIND)]
    pub bind: SocketAddr,

    /// Start with an empty store instead of the two sample workouts
    #[arg(long, env = "WORKOUT_NO_SEED")]
    pub no_seed: bool,

    /// Verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

/// Install the global tracing subscriber. `RUST_LOG` directives are applied
/// on top of the level picked by `verbosity`.
pub fn setup_logging(verbosity: u8) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let level = match verbosity {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };

    let filter = tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into());

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_thread_names(false)
        .with_line_number(false);

    // Both binaries and the tests call this; only the first install wins.
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_defaults() {
        let config = ServerConfig::try_parse_from(["workout-server"]).unwrap();

        assert_eq!(config.bind, DEFAULT_BIND.parse::<SocketAddr>().unwrap());
        assert!(!config.no_seed);
        assert_eq!(config.verbose, 0);
    }

    #[test]
    fn test_flags() {
        let config = ServerConfig::try_parse_from([
            "workout-server",
            "--bind",
            "0.0.0.0:8080",
            "--no-seed",
            "-vv",
        ])
        .unwrap();

        assert_eq!(config.bind.port(), 8080);
        assert!(config.no_seed);
        assert_eq!(config.verbose, 2);
    }

    #[test]
    fn test_setup_logging_twice_is_harmless() {
        setup_logging(0);
        setup_logging(3);
        tracing::info!("still logging after a second install");
    }

    #[test]
    fn test_invalid_bind_rejected() {
        assert!(ServerConfig::try_parse_from(["workout-server", "--bind", "nowhere"]).is_err());
    }
}
