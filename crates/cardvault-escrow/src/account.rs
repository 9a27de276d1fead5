//! A single per-auction escrow account.
//!
//! The account is pure data plus a pinned logic handle: the (seller, buyer,
//! amount) triple is fixed at creation and every mutation goes through the
//! [`EscrowLogic`] implementation that was current when the factory created
//! the account.

use std::fmt;
use std::sync::Arc;

use cardvault_types::{EscrowId, EscrowState, Notification, PartyId, Result};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::ledger::Ledger;
use crate::logic::EscrowLogic;

/// One escrow account, created by the factory when an auction resolves.
///
/// Never destroyed: after `Complete` (with funds released) or `Canceled`
/// the account stays addressable but permanently inert.
pub struct EscrowAccount {
    pub(crate) id: EscrowId,
    pub(crate) seller: PartyId,
    pub(crate) buyer: PartyId,
    pub(crate) amount: Decimal,
    pub(crate) state: EscrowState,
    /// Value currently held in custody (zero before deposit and after
    /// release/refund).
    pub(crate) held: Decimal,
    /// Set once the seller has withdrawn the funds; a second release is a
    /// state error, not a second transfer.
    pub(crate) funds_released: bool,
    /// Logic pinned at creation. Later factory implementation swaps do not
    /// affect this account.
    pub(crate) logic: Arc<dyn EscrowLogic>,
    pub(crate) created_at: DateTime<Utc>,
}

impl EscrowAccount {
    pub(crate) fn new(
        id: EscrowId,
        seller: PartyId,
        buyer: PartyId,
        amount: Decimal,
        logic: Arc<dyn EscrowLogic>,
    ) -> Self {
        Self {
            id,
            seller,
            buyer,
            amount,
            state: EscrowState::AwaitingPayment,
            held: Decimal::ZERO,
            funds_released: false,
            logic,
            created_at: Utc::now(),
        }
    }

    /// Deposit `value` into custody. Buyer only; exact amount only.
    pub fn deposit(&mut self, ledger: &mut Ledger, caller: PartyId, value: Decimal) -> Result<()> {
        let logic = Arc::clone(&self.logic);
        logic.deposit(self, ledger, caller, value)
    }

    /// Confirm receipt of the traded goods. Buyer only.
    pub fn confirm_receipt(&mut self, caller: PartyId) -> Result<Notification> {
        let logic = Arc::clone(&self.logic);
        logic.confirm_receipt(self, caller)
    }

    /// Release the held funds to the seller. Seller only; `Complete` only.
    /// Returns the released amount.
    pub fn release_funds(&mut self, ledger: &mut Ledger, caller: PartyId) -> Result<Decimal> {
        let logic = Arc::clone(&self.logic);
        logic.release_funds(self, ledger, caller)
    }

    /// Cancel the escrow before completion, refunding any held deposit to
    /// the buyer. Seller only.
    pub fn cancel(&mut self, ledger: &mut Ledger, caller: PartyId) -> Result<Notification> {
        let logic = Arc::clone(&self.logic);
        logic.cancel(self, ledger, caller)
    }

    // -- read-only accessors ------------------------------------------------

    #[must_use]
    pub fn id(&self) -> EscrowId {
        self.id
    }

    #[must_use]
    pub fn seller(&self) -> PartyId {
        self.seller
    }

    #[must_use]
    pub fn buyer(&self) -> PartyId {
        self.buyer
    }

    #[must_use]
    pub fn amount(&self) -> Decimal {
        self.amount
    }

    #[must_use]
    pub fn state(&self) -> EscrowState {
        self.state
    }

    /// Value currently held in custody by this account.
    #[must_use]
    pub fn held(&self) -> Decimal {
        self.held
    }

    #[must_use]
    pub fn funds_released(&self) -> bool {
        self.funds_released
    }

    /// Version of the logic this account was pinned to at creation.
    #[must_use]
    pub fn logic_version(&self) -> u32 {
        self.logic.version()
    }

    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

impl fmt::Debug for EscrowAccount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EscrowAccount")
            .field("id", &self.id)
            .field("seller", &self.seller)
            .field("buyer", &self.buyer)
            .field("amount", &self.amount)
            .field("state", &self.state)
            .field("held", &self.held)
            .field("funds_released", &self.funds_released)
            .field("logic_version", &self.logic.version())
            .finish_non_exhaustive()
    }
}
