//! Pure functional business logic
//!
//! Everything here takes inputs and returns outputs: no file access, no
//! printing. Commands in `crate::commands` compose these with I/O.

pub mod domain;
pub mod voucher;

pub use domain::{resolve_domain, DomainOverrides};
pub use voucher::{
    check_voucher, parse_key, parse_signature, recover_voucher_signer, sign_voucher,
    to_hex_prefixed, voucher_digest, CheckOutcome, SignedVoucher,
};
