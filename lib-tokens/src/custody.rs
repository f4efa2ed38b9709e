//! Custody and accounting
//!
//! Single balance, single beneficiary. Value arrives either attached to a
//! voucher redemption or as a plain transfer, and leaves only through a
//! full withdrawal to the principal.

use std::collections::BTreeMap;
use thiserror::Error;
use tracing::{info, warn};

use lib_types::{Address, Amount};

use crate::contract::{CallContext, IssuerContract};
use crate::errors::{IssuanceError, IssuanceResult};
use crate::events::IssuerEvent;

/// Rejection reported by a payout mechanism
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct TransferRejected(pub String);

/// Mechanism that moves value out of custody
///
/// Implementations report failure instead of partially paying; the contract
/// only zeroes its balance after `send_value` returns `Ok`.
pub trait ValueTransfer {
    fn send_value(&mut self, to: Address, amount: Amount) -> Result<(), TransferRejected>;
}

/// In-memory payout ledger that credits recipients
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PayoutLedger {
    credited: BTreeMap<Address, Amount>,
}

impl PayoutLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total paid to `to` so far
    pub fn credited(&self, to: &Address) -> Amount {
        self.credited.get(to).copied().unwrap_or(0)
    }
}

impl ValueTransfer for PayoutLedger {
    fn send_value(&mut self, to: Address, amount: Amount) -> Result<(), TransferRejected> {
        let total = self
            .credited(&to)
            .checked_add(amount)
            .ok_or_else(|| TransferRejected("recipient balance overflow".to_string()))?;
        self.credited.insert(to, total);
        Ok(())
    }
}

/// Value held by the contract
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Treasury {
    balance: Amount,
}

impl Treasury {
    pub fn new(balance: Amount) -> Self {
        Self { balance }
    }

    pub fn balance(&self) -> Amount {
        self.balance
    }

    /// Balance after crediting `amount`, without applying it
    pub fn balance_after_credit(&self, amount: Amount) -> IssuanceResult<Amount> {
        self.balance.checked_add(amount).ok_or(IssuanceError::Overflow)
    }

    pub(crate) fn set_balance(&mut self, balance: Amount) {
        self.balance = balance;
    }
}

impl IssuerContract {
    /// Accept a plain value transfer. Never rejects except on overflow.
    pub fn receive_value(&mut self, ctx: &CallContext) -> IssuanceResult<()> {
        let new_balance = self.treasury.balance_after_credit(ctx.value)?;

        self.treasury.set_balance(new_balance);
        self.events.append(IssuerEvent::ValueReceived {
            from: ctx.caller,
            amount: ctx.value,
        });
        info!(from = %ctx.caller, amount = ctx.value, balance = new_balance, "value received");
        Ok(())
    }

    /// Pay the entire balance to the principal
    ///
    /// The balance is cleared only after `payout` succeeds; a rejected
    /// payout leaves it untouched. Returns the amount withdrawn.
    pub fn withdraw(
        &mut self,
        ctx: &CallContext,
        payout: &mut dyn ValueTransfer,
    ) -> IssuanceResult<Amount> {
        self.require_principal(ctx)?;
        self.reject_value(ctx)?;

        let amount = self.treasury.balance();
        if let Err(rejected) = payout.send_value(self.principal, amount) {
            warn!(amount, reason = %rejected, "withdrawal payout rejected");
            return Err(IssuanceError::TransferFailed(rejected.0));
        }

        self.treasury.set_balance(0);
        self.events.append(IssuerEvent::ValueWithdrawn {
            to: self.principal,
            amount,
        });
        info!(to = %self.principal, amount, "value withdrawn");
        Ok(amount)
    }
}
