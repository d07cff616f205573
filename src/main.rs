use clap::Parser;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

pub mod api;
pub mod config;
pub mod db;

use config::ServerConfig;

#[derive(Parser, Debug)]
struct CliArgs {
    /// Address to bind to.
    #[clap(long)]
    pub host: Option<String>,

    /// Port to listen on.
    #[clap(long)]
    pub port: Option<u16>,
}

impl CliArgs {
    fn into_config(self) -> ServerConfig {
        let defaults = ServerConfig::default();
        ServerConfig {
            host: self.host.unwrap_or(defaults.host),
            port: self.port.unwrap_or(defaults.port),
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli_args = CliArgs::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .with_env_var("LOG_LEVEL")
                .from_env_lossy(),
        )
        .try_init()?;

    tracing::info!("Starting forum backend...");
    api::server::start_server(&cli_args.into_config()).await
}
