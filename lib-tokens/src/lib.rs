//! Voucher-authorized identifier issuance
//!
//! This crate defines the issuance contract: a single principal either issues
//! non-fungible identifiers directly or signs typed-data vouchers that any
//! redeemer can present, paying the voucher price into custody.
//!
//! # Key Types
//!
//! - [`IssuerContract`]: The contract; every operation takes a [`CallContext`]
//! - [`AuthorizationVerifier`]: Rebuilds voucher digests and recovers signers
//! - [`IdentifierLifecycle`]: Claimed/revoked flags and the floor
//! - [`ContractSnapshot`]: Serializable view of all inspectable state
//!
//! # Execution
//!
//! Every operation validates before it writes. A returned [`IssuanceError`]
//! means nothing changed, no event was appended and no value moved.

pub mod authorization;
pub mod config;
pub mod contract;
pub mod custody;
pub mod errors;
pub mod events;
pub mod issuance;
pub mod lifecycle;
pub mod ownership;
pub mod snapshot;

pub use authorization::{AuthorizationVerifier, IssuanceVoucher, VOUCHER_TYPE};
pub use config::{load_config, parse_config, DomainConfig, IssuerConfig};
pub use contract::{CallContext, IssuerContract};
pub use custody::{PayoutLedger, TransferRejected, Treasury, ValueTransfer};
pub use errors::*;
pub use events::{EventLog, EventRecord, IssuerEvent};
pub use lifecycle::{IdentifierLifecycle, IdentifierState};
pub use ownership::OwnershipLedger;
pub use snapshot::{ClaimedRecord, ContractSnapshot};
