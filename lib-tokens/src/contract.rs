//! IssuerContract
//!
//! Voucher-authorized non-fungible issuance. One fixed principal issues
//! identifiers directly or signs vouchers that anyone may redeem.
//!
//! Every mutating operation validates all of its preconditions before the
//! first write, then commits its writes and appends its events together. A
//! rejected call therefore leaves the contract exactly as it was.

use tracing::{debug, info};

use lib_crypto::Eip712Domain;
use lib_types::{Address, Amount, TokenId};

use crate::authorization::AuthorizationVerifier;
use crate::config::IssuerConfig;
use crate::custody::Treasury;
use crate::errors::{IssuanceError, IssuanceResult};
use crate::events::{EventLog, EventRecord, IssuerEvent};
use crate::lifecycle::{IdentifierLifecycle, IdentifierState};
use crate::ownership::OwnershipLedger;

// =============================================================================
// CALL CONTEXT
// =============================================================================

/// Who is calling and how much value the call carries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallContext {
    pub caller: Address,
    pub value: Amount,
}

impl CallContext {
    /// A call with no attached value
    pub fn new(caller: Address) -> Self {
        Self { caller, value: 0 }
    }

    /// A payable call
    pub fn with_value(caller: Address, value: Amount) -> Self {
        Self { caller, value }
    }
}

// =============================================================================
// ISSUER CONTRACT
// =============================================================================

#[derive(Debug, Clone)]
pub struct IssuerContract {
    // =========================================================================
    // Identity
    // =========================================================================
    pub(crate) name: String,
    pub(crate) symbol: String,
    /// Fixed at creation, compared on every privileged call
    pub(crate) principal: Address,

    // =========================================================================
    // Components
    // =========================================================================
    pub(crate) verifier: AuthorizationVerifier,
    pub(crate) lifecycle: IdentifierLifecycle,
    pub(crate) ownership: OwnershipLedger,
    pub(crate) treasury: Treasury,
    pub(crate) events: EventLog,
}

impl IssuerContract {
    /// Create a contract with an empty lifecycle store and zero balance
    pub fn new(
        name: impl Into<String>,
        symbol: impl Into<String>,
        principal: Address,
        domain: Eip712Domain,
    ) -> Self {
        let contract = Self {
            name: name.into(),
            symbol: symbol.into(),
            principal,
            verifier: AuthorizationVerifier::new(domain),
            lifecycle: IdentifierLifecycle::new(),
            ownership: OwnershipLedger::new(),
            treasury: Treasury::default(),
            events: EventLog::new(),
        };
        info!(
            name = %contract.name,
            principal = %principal,
            chain_id = contract.verifier.domain().chain_id,
            "issuer contract created"
        );
        contract
    }

    pub fn from_config(config: &IssuerConfig) -> Self {
        Self::new(
            config.name.clone(),
            config.symbol.clone(),
            config.principal,
            config.domain.to_domain(),
        )
    }

    // =========================================================================
    // Queries (no authorization required)
    // =========================================================================

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn principal(&self) -> Address {
        self.principal
    }

    pub fn verifier(&self) -> &AuthorizationVerifier {
        &self.verifier
    }

    pub fn domain(&self) -> &Eip712Domain {
        self.verifier.domain()
    }

    pub fn floor(&self) -> u64 {
        self.lifecycle.floor()
    }

    pub fn total_supply(&self) -> u64 {
        self.lifecycle.total_supply()
    }

    pub fn balance(&self) -> Amount {
        self.treasury.balance()
    }

    pub fn is_available(&self, id: TokenId) -> bool {
        self.lifecycle.is_available(id)
    }

    /// Availability with the specific reason on failure
    pub fn ensure_available(&self, id: TokenId) -> IssuanceResult<()> {
        self.lifecycle.ensure_available(id)
    }

    pub fn identifier_state(&self, id: TokenId) -> IdentifierState {
        self.lifecycle.state(id)
    }

    pub fn is_claimed(&self, id: TokenId) -> bool {
        self.lifecycle.is_claimed(id)
    }

    pub fn is_revoked(&self, id: TokenId) -> bool {
        self.lifecycle.is_revoked(id)
    }

    pub fn metadata_pointer(&self, id: TokenId) -> Option<&str> {
        self.lifecycle.metadata_pointer(id)
    }

    pub fn owner_of(&self, id: TokenId) -> Option<Address> {
        self.ownership.owner_of(id)
    }

    pub fn balance_of(&self, holder: &Address) -> u64 {
        self.ownership.balance_of(holder)
    }

    pub fn events(&self) -> &EventLog {
        &self.events
    }

    pub fn events_since(&self, cursor: u64) -> &[EventRecord] {
        self.events.events_since(cursor)
    }

    /// Cross-component invariants: lifecycle invariants plus "an identifier
    /// has an owner exactly when it is claimed"
    pub fn check_invariants(&self) -> IssuanceResult<()> {
        self.lifecycle.check_invariants()?;
        let owned: Vec<TokenId> = self.ownership.entries().map(|(id, _)| id).collect();
        let claimed: Vec<TokenId> = self.lifecycle.claimed_ids().collect();
        if owned != claimed {
            return Err(IssuanceError::InvariantViolated(
                "owned identifiers differ from claimed identifiers".to_string(),
            ));
        }
        Ok(())
    }

    // =========================================================================
    // Privileged lifecycle operations
    // =========================================================================

    pub(crate) fn require_principal(&self, ctx: &CallContext) -> IssuanceResult<()> {
        if ctx.caller != self.principal {
            debug!(caller = %ctx.caller, "rejected privileged call");
            return Err(IssuanceError::Unauthorized { caller: ctx.caller });
        }
        Ok(())
    }

    /// Non-payable operations refuse attached value rather than absorb it
    pub(crate) fn reject_value(&self, ctx: &CallContext) -> IssuanceResult<()> {
        if ctx.value != 0 {
            return Err(IssuanceError::NonPayable { value: ctx.value });
        }
        Ok(())
    }

    /// Permanently bar an available identifier from issuance. Any voucher
    /// already signed for it stops verifying as issuable.
    pub fn revoke(&mut self, ctx: &CallContext, id: TokenId) -> IssuanceResult<()> {
        self.require_principal(ctx)?;
        self.reject_value(ctx)?;
        self.lifecycle.revoke(id)?;

        self.events.append(IssuerEvent::IdentifierRevoked { id });
        info!(%id, "identifier revoked");
        Ok(())
    }

    /// Bulk revocation: every identifier below `new_floor` becomes
    /// unavailable. The floor only moves up.
    pub fn raise_floor(&mut self, ctx: &CallContext, new_floor: u64) -> IssuanceResult<()> {
        self.require_principal(ctx)?;
        self.reject_value(ctx)?;
        self.lifecycle.raise_floor(new_floor)?;

        self.events.append(IssuerEvent::FloorRaised { new_floor });
        info!(new_floor, "floor raised");
        Ok(())
    }

    // =========================================================================
    // Holder operations
    // =========================================================================

    /// Move a claimed identifier to another holder
    pub fn transfer(&mut self, ctx: &CallContext, to: Address, id: TokenId) -> IssuanceResult<()> {
        self.reject_value(ctx)?;
        self.ownership.ensure_holder(id, &ctx.caller)?;
        if to.is_zero() {
            return Err(IssuanceError::ZeroRecipient);
        }

        self.ownership.reassign(id, to);
        self.events.append(IssuerEvent::Transfer {
            from: ctx.caller,
            to,
            id,
        });
        info!(%id, from = %ctx.caller, to = %to, "token transferred");
        Ok(())
    }
}
