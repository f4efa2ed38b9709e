//! Mint CLI Library
//!
//! Off-chain tooling for the principal of an issuance contract: derive the
//! principal address from a key, build and sign vouchers, recover a signer
//! and check a voucher against a saved contract snapshot.
//!
//! ## Architecture
//!
//! - **Functional Core** (`logic/` module): Pure functions, no I/O
//! - **Imperative Shell** (`commands/` module): File access and printing
//! - **Output Abstraction** (`output/` module): Testable printing interface

pub mod argument_parsing;
pub mod commands;
pub mod error;
pub mod logic;
pub mod output;

pub use argument_parsing::{run_cli, MintCli, MintCommand, OutputFormat};
pub use error::{CliError, CliResult};
pub use output::Output;
