//! Round Claimer CLI
//!
//! Command-line interface for claiming prediction-market winnings.

use clap::{Parser, Subcommand};
use round_claimer::audit::ClaimJournal;
use round_claimer::bridge::{BridgeTransport, BridgeWallet, RpcSigningConnector};
use round_claimer::query::{BatchQueryClient, MarketQuerier};
use round_claimer::wallet::{ProviderSlot, WalletProvider};
use round_claimer::{ClaimSubmitter, Config, Result, SessionManager};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "round-claimer")]
#[command(about = "Claim winnings from a CosmWasm prediction market")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Claim winnings for a finished round
    Claim {
        /// Round id
        #[arg(short, long)]
        round: String,
    },

    /// Show finished rounds
    Round {
        /// Round ids, queried in one batch
        #[arg(required = true)]
        ids: Vec<u64>,
    },

    /// Show an account's live and next positions
    Position {
        /// Account address (defaults to the connected wallet)
        #[arg(short, long)]
        address: Option<String>,
    },

    /// Show contract status
    Status,

    /// Show contract configuration
    ContractConfig,

    /// Show current configuration
    Config,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (ignore if not found)
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    let config = Config::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Claim { round } => run_claim(config, round).await?,
        Commands::Round { ids } => run_rounds(&config, &ids).await?,
        Commands::Position { address } => run_position(&config, address).await?,
        Commands::Status => {
            let status = querier(&config)?.status().await?;
            println!("{}", serde_json::to_string_pretty(&status)?);
        }
        Commands::ContractConfig => {
            let contract_config = querier(&config)?.config().await?;
            println!("{}", serde_json::to_string_pretty(&contract_config)?);
        }
        Commands::Config => {
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
    }

    Ok(())
}

fn querier(config: &Config) -> Result<MarketQuerier> {
    let client = BatchQueryClient::connect(&config.chain.rpc_endpoint)?;
    Ok(MarketQuerier::new(client, &config.chain.contract_address))
}

/// Connect a session through the wallet bridge
///
/// Bridge detection runs alongside `connect`, which waits for it within the
/// configured provider wait window.
async fn open_session(config: &Config) -> Result<SessionManager> {
    let transport = Arc::new(BridgeTransport::from_env(config.bridge.url.clone())?);
    let (slot, injector) = ProviderSlot::pending();
    let mut manager = SessionManager::new(
        config.chain.clone(),
        slot,
        Arc::new(RpcSigningConnector),
    );

    let detect = async move {
        let provider = BridgeWallet::detect(transport)
            .await
            .map(|wallet| Arc::new(wallet) as Arc<dyn WalletProvider>);
        injector.ready(provider);
    };
    let ((), connected) = tokio::join!(detect, manager.connect());
    connected?;

    Ok(manager)
}

async fn run_claim(config: Config, round: String) -> Result<()> {
    let journal = config.audit_log_path.as_deref().map(ClaimJournal::new);
    let submitter = ClaimSubmitter::new(&config.chain);

    let mut manager = open_session(&config).await?;
    let sender = manager.session().wallet_address.clone();

    let outcome = submitter.submit_claim(manager.session(), &round).await;

    if let Some(journal) = &journal {
        let contract = submitter.contract_address();
        match &outcome {
            Ok(result) => {
                journal
                    .record(&round, &sender, contract, Ok(result.transaction_hash.as_str()))
                    .await
            }
            Err(e) => {
                journal
                    .record(&round, &sender, contract, Err(e.to_string().as_str()))
                    .await
            }
        }
    }

    manager.disconnect().await;

    match outcome {
        Ok(result) => {
            println!("Claim submitted");
            println!("  Transaction: {}", result.transaction_hash);
            println!("  Explorer: {}", config.chain.explorer_link(&result.transaction_hash));
            Ok(())
        }
        Err(e) => {
            tracing::error!(error = %e, round = %round, "Claim failed");
            Err(e)
        }
    }
}

async fn run_rounds(config: &Config, ids: &[u64]) -> Result<()> {
    let querier = querier(config)?;
    let rounds = querier.finished_rounds(ids).await?;

    for (id, round) in ids.iter().zip(rounds) {
        match round {
            Ok(round) => println!("{}", serde_json::to_string_pretty(&round)?),
            Err(e) => println!("Round {}: {}", id, e),
        }
    }
    Ok(())
}

async fn run_position(config: &Config, address: Option<String>) -> Result<()> {
    let address = match address {
        Some(address) => address,
        None => {
            let mut manager = open_session(config).await?;
            let address = manager.session().wallet_address.clone();
            manager.disconnect().await;
            address
        }
    };

    tracing::info!(address = %address, "Querying position");
    let position = querier(config)?.my_current_position(&address).await?;
    println!("{}", serde_json::to_string_pretty(&position)?);
    Ok(())
}
