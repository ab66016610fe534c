pub mod aggregate;
pub mod config;
pub mod error;
pub mod etl;
pub mod feed;
pub mod feed_cache;
pub mod managers;
pub mod match_parser;
pub mod model;
pub mod query;
pub mod season_parser;
pub mod snapshot;
pub mod standings;
pub mod team;

pub mod logging {
    use anyhow::{Result, anyhow};

    /// Install the fmt subscriber, filtered by `LFC_LOG` or `default_level`.
    pub fn init_tracing(default_level: &str) -> Result<()> {
        let filter = tracing_subscriber::EnvFilter::try_from_env("LFC_LOG")
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));

        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init()
            .map_err(|error| anyhow!("failed to initialize tracing subscriber: {error}"))
    }
}
