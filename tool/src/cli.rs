//! # CLI Interface
//!
//! Defines the command-line argument structure for `frontier-tool` using
//! `clap` derive. Supports four subcommands: `decode`, `header-hash`,
//! `build`, and `version`.

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Frontier block inspection tool.
///
/// Decodes blocks in network or storage form, hashes headers, and assembles
/// fresh blocks from the command line.
#[derive(Parser, Debug)]
#[command(
    name = "frontier-tool",
    about = "Frontier block encoding tool",
    version,
    propagate_version = true
)]
pub struct FrontierToolCli {
    /// Path to a JSON protocol parameters file.
    ///
    /// When omitted, mainnet parameters are used.
    #[arg(long, short = 'c', global = true, env = "FRONTIER_CONFIG")]
    pub config: Option<PathBuf>,

    /// Emit logs as JSON lines instead of human-readable text.
    #[arg(long, global = true)]
    pub json_logs: bool,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Decode a block and print a JSON summary.
    Decode(DecodeArgs),
    /// Decode a header and print its sealed and mining hashes.
    HeaderHash(InputArgs),
    /// Assemble a fresh block and print its encoding in hex.
    Build(BuildArgs),
    /// Print version information and exit.
    Version,
}

/// Where to read hex input from. Exactly one source must be given.
#[derive(Args, Debug)]
#[group(required = true, multiple = false)]
pub struct InputArgs {
    /// Hex-encoded input, with or without a `0x` prefix.
    #[arg(long)]
    pub hex: Option<String>,

    /// File containing hex-encoded input.
    #[arg(long, short = 'f')]
    pub file: Option<PathBuf>,
}

/// Arguments for the `decode` subcommand.
#[derive(Args, Debug)]
pub struct DecodeArgs {
    #[command(flatten)]
    pub input: InputArgs,
}

/// Which of the two block encodings to emit.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Encoding {
    /// `[header, transactions, uncles]`.
    Network,
    /// Network form plus total difficulty when one is given.
    Storage,
}

/// Arguments for the `build` subcommand.
#[derive(Args, Debug)]
pub struct BuildArgs {
    /// Hash of the parent block.
    #[arg(long)]
    pub parent: String,

    /// Beneficiary address.
    #[arg(long)]
    pub coinbase: String,

    /// Post-execution state root.
    #[arg(long)]
    pub state_root: String,

    /// Block difficulty. Defaults to the configured genesis difficulty.
    #[arg(long)]
    pub difficulty: Option<u64>,

    /// Proof-of-work nonce.
    #[arg(long, default_value_t = 0)]
    pub nonce: u64,

    /// Extra data, hex-encoded.
    #[arg(long, default_value = "")]
    pub extra: String,

    /// Block number.
    #[arg(long, default_value_t = 0)]
    pub number: u64,

    /// Gas limit. Defaults to the configured genesis gas limit.
    #[arg(long)]
    pub gas_limit: Option<u64>,

    /// Fixed timestamp in seconds. Defaults to now.
    #[arg(long)]
    pub time: Option<u64>,

    /// Total difficulty to record alongside the block.
    #[arg(long)]
    pub td: Option<u64>,

    /// Output encoding.
    #[arg(long, value_enum, default_value_t = Encoding::Network)]
    pub encoding: Encoding,
}
