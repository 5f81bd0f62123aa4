use std::path::PathBuf;

use clap::Parser;

use airdrop_check::{env::ENV_CONFIG, log, ServeConfig};

/// Serves the DGN airdrop allocation checker.
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Cli {
    /// Port to listen on, overrides PORT.
    port: Option<u16>,
    /// Host or interface to bind, overrides HOST. A trailing ':' is ignored.
    host: Option<String>,
    /// Genesis export to read balances from, overrides GENESIS_PATH.
    #[clap(long)]
    genesis: Option<PathBuf>,
}

#[tokio::main]
pub async fn main() -> anyhow::Result<()> {
    log::init();

    let cli = Cli::parse();

    let host = cli
        .host
        .map(|host| host.trim_end_matches(':').to_string())
        .filter(|host| !host.is_empty())
        .unwrap_or_else(|| ENV_CONFIG.host.clone());

    let config = ServeConfig {
        accepted_prefixes: ENV_CONFIG.accepted_prefixes.clone(),
        genesis_path: cli
            .genesis
            .unwrap_or_else(|| PathBuf::from(&ENV_CONFIG.genesis_path)),
        host,
        port: cli.port.unwrap_or(ENV_CONFIG.port),
    };

    airdrop_check::start_server(config).await?;

    Ok(())
}
