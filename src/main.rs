use std::path::PathBuf;

use clap::Parser;
use objectd::Config;

#[derive(Parser)]
#[command(name = "objectd", about = "objectd — in-memory record store over HTTP")]
struct Cli {
    /// TOML config file layered over the built-in defaults.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Address to bind (overrides `server.host`).
    #[arg(long)]
    host: Option<String>,

    /// Port to listen on (overrides `server.port`).
    #[arg(long)]
    port: Option<u16>,

    /// Start with an empty collection instead of the seed records.
    #[arg(long)]
    no_seed: bool,

    /// Log at debug level unless RUST_LOG says otherwise.
    #[arg(long)]
    debug: bool,
}

impl Cli {
    fn apply(&self, config: &mut Config) {
        if let Some(host) = &self.host {
            config.server.host = host.clone();
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
        if self.no_seed {
            config.store.seed = false;
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.debug { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_env("RUST_LOG")
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .init();

    let mut config = Config::load(cli.config.as_deref())?;
    cli.apply(&mut config);
    tracing::debug!(?config, "configuration loaded");

    objectd::run(config).await
}
