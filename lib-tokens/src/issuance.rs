//! Issuance engine
//!
//! Direct issuance by the principal, voucher redemption by anyone, and burn
//! by the holder. Check order is fixed:
//!
//! 1. identifier availability (cheap)
//! 2. input data (metadata pointer, recipient)
//! 3. signer recovery (expensive)
//! 4. commit
//!
//! Nothing is written before step 4, and step 4 itself re-checks
//! availability, so a racing second issuance of the same identifier fails
//! with `AlreadyClaimed` instead of double-issuing.

use tracing::{debug, info};

use lib_types::{Address, Amount, TokenId};

use crate::contract::{CallContext, IssuerContract};
use crate::errors::{IssuanceError, IssuanceResult};
use crate::events::IssuerEvent;

impl IssuerContract {
    /// Issue `id` to `recipient`. Principal only.
    pub fn issue_direct(
        &mut self,
        ctx: &CallContext,
        recipient: Address,
        id: TokenId,
        metadata_pointer: &str,
    ) -> IssuanceResult<()> {
        self.require_principal(ctx)?;
        self.reject_value(ctx)?;
        self.lifecycle.ensure_available(id)?;
        ensure_issuance_data(recipient, metadata_pointer)?;

        self.commit_issuance(recipient, id, metadata_pointer, 0)
    }

    /// Would a voucher with these terms and this signature be redeemable
    /// right now? Read-only and safe to poll; the answer can be stale by the
    /// time a redemption executes.
    pub fn check_issuable(
        &self,
        price: Amount,
        id: TokenId,
        metadata_pointer: &str,
        signature: &[u8],
    ) -> IssuanceResult<()> {
        self.lifecycle.ensure_available(id)?;
        if metadata_pointer.is_empty() {
            return Err(IssuanceError::EmptyMetadataPointer);
        }

        let recovered = self
            .verifier
            .recover_signer(price, id, metadata_pointer, signature)?;
        if recovered != self.principal {
            debug!(%id, recovered = %recovered, "voucher not signed by principal");
            return Err(IssuanceError::SignerMismatch {
                expected: self.principal,
                recovered,
            });
        }
        Ok(())
    }

    /// Redeem a voucher. The attached value is the price the digest is
    /// rebuilt with, so paying anything other than the signed price simply
    /// fails signature verification. The caller receives the identifier and
    /// the value stays in custody.
    pub fn issue_with_authorization(
        &mut self,
        ctx: &CallContext,
        id: TokenId,
        metadata_pointer: &str,
        signature: &[u8],
    ) -> IssuanceResult<()> {
        self.check_issuable(ctx.value, id, metadata_pointer, signature)?;
        ensure_issuance_data(ctx.caller, metadata_pointer)?;

        self.commit_issuance(ctx.caller, id, metadata_pointer, ctx.value)
    }

    /// Destroy a held identifier. It becomes revoked and can never be
    /// issued again.
    pub fn burn(&mut self, ctx: &CallContext, id: TokenId) -> IssuanceResult<()> {
        self.reject_value(ctx)?;
        self.ownership.ensure_holder(id, &ctx.caller)?;
        self.lifecycle.release(id)?;

        self.ownership.remove(id);
        self.events.append(IssuerEvent::Transfer {
            from: ctx.caller,
            to: Address::zero(),
            id,
        });
        info!(%id, holder = %ctx.caller, supply = self.lifecycle.total_supply(), "token burned");
        Ok(())
    }

    fn commit_issuance(
        &mut self,
        recipient: Address,
        id: TokenId,
        metadata_pointer: &str,
        value: Amount,
    ) -> IssuanceResult<()> {
        let new_balance = self.treasury.balance_after_credit(value)?;
        // Last fallible step; it makes no write unless it succeeds
        self.lifecycle.claim(id, metadata_pointer)?;

        self.ownership.assign(id, recipient);
        self.treasury.set_balance(new_balance);
        self.events.append(IssuerEvent::Transfer {
            from: Address::zero(),
            to: recipient,
            id,
        });
        info!(
            %id,
            recipient = %recipient,
            price = value,
            supply = self.lifecycle.total_supply(),
            "token issued"
        );
        Ok(())
    }
}

fn ensure_issuance_data(recipient: Address, metadata_pointer: &str) -> IssuanceResult<()> {
    if metadata_pointer.is_empty() {
        return Err(IssuanceError::EmptyMetadataPointer);
    }
    if recipient.is_zero() {
        return Err(IssuanceError::ZeroRecipient);
    }
    Ok(())
}
