//! Signer recovery module

pub mod recovery;

pub use recovery::{address_from_verifying_key, recover_signer, SIGNATURE_LEN};
