// Copyright (c) 2026 ALAS Technology. MIT License.
// See LICENSE for details.

//! # Frontier Block Tool
//!
//! Entry point for the `frontier-tool` binary. Parses CLI arguments,
//! initializes logging, loads protocol parameters, and dispatches to one of
//! the subcommands:
//!
//! - `decode`      — decode a network- or storage-form block
//! - `header-hash` — hash a header in both field sets
//! - `build`       — assemble a fresh block and print its encoding
//! - `version`     — print build version information
//!
//! Results go to stdout, logs to stderr.

mod cli;
mod logging;

use alloy_primitives::{Address, Bytes, B256, U256};
use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use std::path::Path;

use frontier_protocol::{codec, Block, Header, ProtocolParams};

use cli::{BuildArgs, Commands, DecodeArgs, Encoding, FrontierToolCli, InputArgs};
use logging::LogFormat;

fn main() -> Result<()> {
    let cli = FrontierToolCli::parse();

    if let Commands::Version = cli.command {
        print_version();
        return Ok(());
    }

    logging::init_logging(
        "frontier_tool=info,frontier_protocol=info",
        LogFormat::from_flag(cli.json_logs),
    );

    let params = load_params(cli.config.as_deref())?;

    match cli.command {
        Commands::Decode(args) => decode_block(args),
        Commands::HeaderHash(args) => hash_header(args),
        Commands::Build(args) => build_block(args, &params),
        Commands::Version => Ok(()),
    }
}

/// Loads protocol parameters from a JSON file, or mainnet defaults.
fn load_params(path: Option<&Path>) -> Result<ProtocolParams> {
    let Some(path) = path else {
        return Ok(ProtocolParams::default());
    };
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config file: {}", path.display()))?;
    let params = ProtocolParams::from_json_str(&raw)
        .with_context(|| format!("invalid config file: {}", path.display()))?;
    tracing::info!(path = %path.display(), ?params, "protocol parameters loaded");
    Ok(params)
}

/// Reads hex input from the argument or the file, whichever was given.
fn read_input(input: &InputArgs) -> Result<Vec<u8>> {
    let text = match (&input.hex, &input.file) {
        (Some(hex), _) => hex.clone(),
        (None, Some(path)) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read input file: {}", path.display()))?,
        (None, None) => anyhow::bail!("no input given: pass --hex or --file"),
    };
    decode_hex(&text)
}

fn decode_hex(text: &str) -> Result<Vec<u8>> {
    let trimmed = text.trim();
    let digits = trimmed.strip_prefix("0x").unwrap_or(trimmed);
    hex::decode(digits).context("input is not valid hex")
}

/// JSON view of a decoded block.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct BlockSummary {
    hash: B256,
    hash_no_nonce: B256,
    parent_hash: B256,
    number: U256,
    size: usize,
    nonce: u64,
    difficulty: U256,
    total_difficulty: Option<U256>,
    transactions: usize,
    uncles: usize,
    state_root: B256,
    transactions_root: B256,
    receipts_root: B256,
    uncles_hash: B256,
    body_consistent: bool,
}

impl From<&Block> for BlockSummary {
    fn from(block: &Block) -> Self {
        let header = block.header();
        Self {
            hash: block.hash(),
            hash_no_nonce: block.hash_no_nonce(),
            parent_hash: block.parent_hash(),
            number: block.number(),
            size: block.size(),
            nonce: block.nonce(),
            difficulty: block.difficulty(),
            total_difficulty: block.total_difficulty(),
            transactions: block.transactions().len(),
            uncles: block.uncles().len(),
            state_root: header.state_root,
            transactions_root: header.transactions_root,
            receipts_root: header.receipts_root,
            uncles_hash: header.uncles_hash,
            body_consistent: block.verify_body().is_ok(),
        }
    }
}

fn decode_block(args: DecodeArgs) -> Result<()> {
    let bytes = read_input(&args.input)?;
    let block = Block::decode_rlp(&bytes).context("failed to decode block")?;

    if let Err(e) = block.verify_body() {
        tracing::warn!(error = %e, "header roots do not match decoded body");
    }

    let summary = BlockSummary::from(&block);
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct HeaderHashes {
    hash: B256,
    hash_no_nonce: B256,
}

fn hash_header(args: InputArgs) -> Result<()> {
    let bytes = read_input(&args)?;
    let header: Header = codec::decode_exact(&bytes).context("failed to decode header")?;
    let hashes = HeaderHashes { hash: header.hash(), hash_no_nonce: header.hash_no_nonce() };
    println!("{}", serde_json::to_string_pretty(&hashes)?);
    Ok(())
}

/// Assembles a block from the arguments and returns its encoding.
fn assemble(args: &BuildArgs, params: &ProtocolParams) -> Result<Vec<u8>> {
    let parent: B256 = args.parent.parse().context("invalid --parent hash")?;
    let coinbase: Address = args.coinbase.parse().context("invalid --coinbase address")?;
    let state_root: B256 = args.state_root.parse().context("invalid --state-root hash")?;
    let extra = Bytes::from(decode_hex(&args.extra).context("invalid --extra")?);

    params.check_extra_data(&extra)?;

    let difficulty = args.difficulty.unwrap_or(params.genesis_difficulty);
    let gas_limit = args.gas_limit.unwrap_or(params.genesis_gas_limit);
    if gas_limit < params.min_gas_limit {
        anyhow::bail!("gas limit {} below minimum {}", gas_limit, params.min_gas_limit);
    }

    let mut block =
        Block::new(parent, coinbase, state_root, U256::from(difficulty), args.nonce, extra);
    block.set_number(U256::from(args.number));
    block.set_gas_limit(U256::from(gas_limit));
    if let Some(time) = args.time {
        block.set_time(time);
    }
    block.set_total_difficulty(args.td.map(U256::from));

    tracing::info!(
        hash = %block.hash(),
        number = args.number,
        encoding = ?args.encoding,
        "block assembled"
    );

    Ok(match args.encoding {
        Encoding::Network => block.rlp_bytes(),
        Encoding::Storage => block.storage_bytes(),
    })
}

fn build_block(args: BuildArgs, params: &ProtocolParams) -> Result<()> {
    let encoded = assemble(&args, params)?;
    println!("0x{}", hex::encode(encoded));
    Ok(())
}

/// Prints version information to stdout.
fn print_version() {
    println!("frontier-tool {}", env!("CARGO_PKG_VERSION"));
    println!("rustc         {}", rustc_version());
}

/// Returns the Rust compiler version used to build this binary.
fn rustc_version() -> &'static str {
    option_env!("RUSTC_VERSION").unwrap_or("unknown")
}
