//! Imperative shell: file access and printing around the pure logic

pub mod inspect;
pub mod key;
pub mod voucher;

use lib_crypto::Eip712Domain;
use lib_tokens::load_config;

use crate::argument_parsing::{MintCli, MintCommand};
use crate::error::CliResult;
use crate::logic::resolve_domain;
use crate::output::Output;

/// Run the command selected on the command line
pub fn dispatch(cli: &MintCli, output: &dyn Output) -> CliResult<()> {
    match &cli.command {
        MintCommand::Keygen => key::handle_keygen(cli.format, output),
        MintCommand::Address { key } => key::handle_address(key, cli.format, output),
        MintCommand::Digest(terms) => {
            voucher::handle_digest(&signing_domain(cli)?, terms, cli.format, output)
        }
        MintCommand::Sign { voucher: terms, key } => {
            voucher::handle_sign(&signing_domain(cli)?, terms, key, cli.format, output)
        }
        MintCommand::Recover { voucher: terms, signature } => {
            voucher::handle_recover(&signing_domain(cli)?, terms, signature, cli.format, output)
        }
        MintCommand::Check { voucher: terms, signature, snapshot } => {
            voucher::handle_check(terms, signature, snapshot, cli.format, output)
        }
        MintCommand::Inspect { snapshot, token_id } => {
            inspect::handle_inspect(snapshot, *token_id, cli.format, output)
        }
    }
}

/// Domain from the config file, if any, with command-line overrides applied
pub fn signing_domain(cli: &MintCli) -> CliResult<Eip712Domain> {
    let config = match &cli.config {
        Some(path) => Some(load_config(path)?),
        None => None,
    };
    resolve_domain(config.as_ref().map(|c| &c.domain), &cli.domain.overrides())
}
