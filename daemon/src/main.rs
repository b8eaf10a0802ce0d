//! dirvote: command-line client for off-chain community directory votes.

mod commands;
mod config;

use std::collections::HashSet;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use dirvote_types::{parse_address, Address, RoomId, SntAmount, TimestampMs, VoteChoice};
use dirvote_typed_data::MessageKind;
use dirvote_utils::{init_logging, LogFormat};
use dirvote_verification::Verifier;
use dirvote_wallet_core::{LocalKeySigner, SigningAuthority, WakuRestTransport};
use serde::Serialize;

use crate::config::ClientConfig;

#[derive(Parser)]
#[command(name = "dirvote", about = "Community directory voting client")]
struct Cli {
    /// Path to a TOML configuration file. File settings are the base;
    /// flags and env vars override them.
    #[arg(long, env = "DIRVOTE_CONFIG")]
    config: Option<PathBuf>,

    /// REST endpoint of a Waku node.
    #[arg(long, env = "DIRVOTE_WAKU_URL")]
    waku_url: Option<String>,

    /// JSON-RPC endpoint of a wallet used for signing.
    #[arg(long, env = "DIRVOTE_RPC_URL")]
    rpc_url: Option<String>,

    #[arg(long, env = "DIRVOTE_CHAIN_ID")]
    chain_id: Option<u64>,

    #[arg(long, env = "DIRVOTE_VOTING_CONTRACT", value_parser = parse_address)]
    voting_contract: Option<Address>,

    /// "human" or "json".
    #[arg(long, env = "DIRVOTE_LOG_FORMAT")]
    log_format: Option<LogFormat>,

    /// Log level: "trace", "debug", "info", "warn", "error".
    #[arg(long, env = "DIRVOTE_LOG_LEVEL")]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Args)]
struct SignerArgs {
    /// Hex secp256k1 key to sign with. Without it, the wallet at
    /// --rpc-url signs.
    #[arg(long, env = "DIRVOTE_PRIVATE_KEY", hide_env_values = true)]
    private_key: Option<String>,

    /// Account to vote as. Defaults to the signer's address.
    #[arg(long, value_parser = parse_address)]
    account: Option<Address>,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum KindArg {
    Vote,
    Feature,
}

impl From<KindArg> for MessageKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Vote => MessageKind::Vote,
            KindArg::Feature => MessageKind::Feature,
        }
    }
}

#[derive(clap::Subcommand)]
enum Command {
    /// Print the checksummed address of a private key.
    Address {
        #[arg(long, env = "DIRVOTE_PRIVATE_KEY", hide_env_values = true)]
        private_key: String,
    },

    /// Sign and publish a vote.
    Vote {
        #[command(flatten)]
        signer: SignerArgs,
        #[arg(long)]
        room: u64,
        /// "yes"/"for" or "no"/"against".
        #[arg(long)]
        choice: VoteChoice,
        /// Raw SNT units, decimal or 0x-hex.
        #[arg(long)]
        amount: SntAmount,
    },

    /// Sign and publish a feature proposal for a community.
    Propose {
        #[command(flatten)]
        signer: SignerArgs,
        #[arg(long)]
        amount: SntAmount,
        /// Community public key, 0x-hex.
        #[arg(long)]
        community_key: String,
    },

    /// Aggregate a room's pending votes into a castVotes batch.
    Batch {
        #[arg(long)]
        room: u64,
        /// Addresses whose vote is already recorded on chain.
        #[arg(long, value_delimiter = ',', value_parser = parse_address)]
        already_voted: Vec<Address>,
    },

    /// List verified feature proposals.
    Features,

    /// Decode a hex payload and check its signature.
    Decode {
        #[arg(long, value_enum)]
        kind: KindArg,
        #[arg(long)]
        payload: String,
        /// Envelope timestamp in milliseconds (feature proposals).
        #[arg(long)]
        timestamp: Option<u64>,
    },

    /// Print the effective configuration as TOML.
    Config,
}

fn load_config(cli: &Cli) -> anyhow::Result<ClientConfig> {
    let mut config = match &cli.config {
        Some(path) => ClientConfig::from_toml_file(path)?,
        None => ClientConfig::default(),
    };
    if let Some(url) = &cli.waku_url {
        config.waku_url = url.clone();
    }
    if let Some(url) = &cli.rpc_url {
        config.rpc_url = Some(url.clone());
    }
    if let Some(chain_id) = cli.chain_id {
        config.chain_id = chain_id;
    }
    if let Some(contract) = cli.voting_contract {
        config.voting_contract = contract;
    }
    if let Some(format) = cli.log_format {
        config.log_format = format;
    }
    if let Some(level) = &cli.log_level {
        config.log_level = level.clone();
    }
    Ok(config)
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = load_config(&cli)?;
    init_logging(config.log_format, &config.log_level);

    if let Some(path) = &cli.config {
        tracing::debug!("loaded config from {}", path.display());
    }

    match cli.command {
        Command::Address { private_key } => {
            let signer = LocalKeySigner::from_hex(&private_key)?;
            println!("{}", dirvote_types::to_checksum(&signer.address()));
        }
        Command::Vote {
            signer,
            room,
            choice,
            amount,
        } => {
            let transport = WakuRestTransport::new(&config.waku_url)?;
            let authority =
                commands::resolve_signer(signer.private_key.as_deref(), config.rpc_url.as_deref())
                    .await?;
            let topic = commands::vote(
                &config,
                &transport,
                authority.as_deref(),
                signer.account,
                RoomId::new(room),
                choice,
                amount,
            )
            .await?;
            println!("published to {topic}");
        }
        Command::Propose {
            signer,
            amount,
            community_key,
        } => {
            let transport = WakuRestTransport::new(&config.waku_url)?;
            let authority =
                commands::resolve_signer(signer.private_key.as_deref(), config.rpc_url.as_deref())
                    .await?;
            let topic = commands::propose(
                &config,
                &transport,
                authority.as_deref(),
                signer.account,
                amount,
                &community_key,
            )
            .await?;
            println!("published to {topic}");
        }
        Command::Batch {
            room,
            already_voted,
        } => {
            let transport = WakuRestTransport::new(&config.waku_url)?;
            let already_voted: HashSet<Address> = already_voted.into_iter().collect();
            let report =
                commands::batch(&config, &transport, RoomId::new(room), &already_voted).await;
            print_json(&report)?;
        }
        Command::Features => {
            let transport = WakuRestTransport::new(&config.waku_url)?;
            print_json(&commands::features(&config, &transport).await)?;
        }
        Command::Decode {
            kind,
            payload,
            timestamp,
        } => {
            let bytes = hex::decode(payload.trim().trim_start_matches("0x"))
                .context("payload is not hex")?;
            let verifier = Verifier::new(config.voting_domain());
            let report = commands::decode_report(
                kind.into(),
                &bytes,
                timestamp.map(TimestampMs::new),
                &verifier,
            );
            print_json(&report)?;
        }
        Command::Config => {
            print!("{}", config.to_toml_string()?);
        }
    }

    Ok(())
}
