use clap::Parser;
use dotenv::dotenv;
use env_logger::Env;
use log::{debug, error, info};

use solana_tx_stats::commands::stats;
use solana_tx_stats::config::Config;

#[derive(Parser, Debug)]
#[command(
    name = "solana-tx-stats",
    author = "Your Name <your.email@example.com>",
    version,
    about = "Analyze the recent transaction history of a Solana account",
    long_about = None
)]
struct Cli {}

#[tokio::main]
async fn main() {
    dotenv().ok();
    let _cli = Cli::parse();

    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            // The logger is not up yet, so config failures go straight to stderr.
            eprintln!("Error loading configuration: {}", e);
            std::process::exit(1);
        }
    };

    let default_filter = if config.debug { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(default_filter)).init();

    info!(
        "Starting transaction analysis for account {} on {}",
        config.account, config.network
    );
    debug!("Using history API at {}", config.api_url);

    if let Err(e) = stats::run(&config).await {
        error!("Error fetching and parsing transactions: {}", e);
        std::process::exit(1);
    }
}
