//! Issuance primitives.
//! Stable, protocol-neutral, behavior-free.

pub mod errors;
pub mod primitives;

pub use errors::PrimitiveError;
pub use primitives::{amount_to_word, Address, Amount, TokenId, ADDRESS_LEN};
