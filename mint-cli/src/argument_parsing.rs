//! Mint CLI argument parsing
//!
//! Global options describe the signing domain; subcommands act on keys and
//! vouchers.

use anyhow::Result;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use lib_types::Address;

use crate::commands;
use crate::logic::DomainOverrides;
use crate::output::ConsoleOutput;

/// Mint CLI
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
#[command(name = "mint-cli")]
pub struct MintCli {
    /// Issuer configuration file (TOML)
    #[arg(short, long, env = "MINT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text, env = "MINT_FORMAT")]
    pub format: OutputFormat,

    #[command(flatten)]
    pub domain: DomainArgs,

    #[command(subcommand)]
    pub command: MintCommand,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Signing domain overrides; each wins over the config file
#[derive(Args, Debug, Clone, Default)]
pub struct DomainArgs {
    /// Domain name
    #[arg(long, global = true)]
    pub domain_name: Option<String>,

    /// Domain version
    #[arg(long, global = true)]
    pub domain_version: Option<String>,

    /// Chain id
    #[arg(long, global = true, env = "MINT_CHAIN_ID")]
    pub chain_id: Option<u64>,

    /// Address of the contract the vouchers are bound to
    #[arg(long, global = true, env = "MINT_VERIFYING_CONTRACT")]
    pub verifying_contract: Option<Address>,
}

impl DomainArgs {
    pub fn overrides(&self) -> DomainOverrides {
        DomainOverrides {
            name: self.domain_name.clone(),
            version: self.domain_version.clone(),
            chain_id: self.chain_id,
            verifying_contract: self.verifying_contract,
        }
    }
}

/// Voucher terms
#[derive(Args, Debug, Clone)]
pub struct VoucherArgs {
    /// Price in the smallest unit of value
    #[arg(long, default_value_t = 0)]
    pub price: u128,

    /// Identifier to authorize
    #[arg(long)]
    pub token_id: u64,

    /// Metadata pointer bound to the identifier
    #[arg(long)]
    pub uri: String,
}

#[derive(Subcommand, Debug, Clone)]
pub enum MintCommand {
    /// Generate a fresh principal key
    Keygen,

    /// Print the address controlled by a key
    Address {
        /// Hex-encoded secret key
        #[arg(long, env = "MINT_PRINCIPAL_KEY", hide_env_values = true)]
        key: String,
    },

    /// Print the typed-data digest of a voucher
    Digest(VoucherArgs),

    /// Sign a voucher with the principal key
    Sign {
        #[command(flatten)]
        voucher: VoucherArgs,

        /// Hex-encoded secret key
        #[arg(long, env = "MINT_PRINCIPAL_KEY", hide_env_values = true)]
        key: String,
    },

    /// Recover the signer of a voucher
    Recover {
        #[command(flatten)]
        voucher: VoucherArgs,

        /// Hex-encoded 65-byte signature
        #[arg(long)]
        signature: String,
    },

    /// Check a voucher against a saved contract snapshot
    Check {
        #[command(flatten)]
        voucher: VoucherArgs,

        /// Hex-encoded 65-byte signature
        #[arg(long)]
        signature: String,

        /// Contract snapshot (JSON)
        #[arg(long)]
        snapshot: PathBuf,
    },

    /// Show contract state from a saved snapshot
    Inspect {
        /// Contract snapshot (JSON)
        #[arg(long)]
        snapshot: PathBuf,

        /// Show a single identifier
        #[arg(long)]
        token_id: Option<u64>,
    },
}

/// Parse arguments and run the selected command
pub fn run_cli() -> Result<()> {
    let cli = MintCli::parse();
    let output = ConsoleOutput;
    commands::dispatch(&cli, &output)?;
    Ok(())
}
