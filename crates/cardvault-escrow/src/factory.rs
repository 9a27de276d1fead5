//! Escrow factory — instantiates escrow accounts and routes operations to
//! them by handle.
//!
//! The factory owns every account it creates, keeps the creation-ordered
//! handle list external indexers enumerate, and holds the current
//! [`EscrowLogic`] implementation. Swapping the implementation is an
//! owner-only operation and affects only escrows created afterwards; each
//! existing account keeps the logic it was pinned to at creation.

use std::collections::HashMap;
use std::sync::Arc;

use cardvault_types::{
    CustodyError, EscrowId, Notification, NotificationKind, NotificationLog, Ownable, PartyId,
    Result,
};
use rust_decimal::Decimal;
use tracing::{info, warn};

use crate::account::EscrowAccount;
use crate::ledger::Ledger;
use crate::logic::EscrowLogic;

/// Default capacity of the factory's notification log.
pub const DEFAULT_NOTIFICATION_CAPACITY: usize = 1024;

/// Creates and manages the fleet of escrow accounts.
pub struct EscrowFactory {
    /// Owner-only guard for implementation swaps.
    ownable: Ownable,
    /// Logic bound into accounts created from now on.
    implementation: Arc<dyn EscrowLogic>,
    /// Every escrow ever created, in creation order. Append-only.
    escrows: Vec<EscrowId>,
    /// The accounts themselves, indexed by handle.
    accounts: HashMap<EscrowId, EscrowAccount>,
    /// Observable side channel for external indexers.
    notifications: NotificationLog,
}

impl EscrowFactory {
    /// Create a factory owned by `owner`, issuing escrows on `logic`.
    #[must_use]
    pub fn new(owner: PartyId, logic: Arc<dyn EscrowLogic>) -> Self {
        Self {
            ownable: Ownable::new(owner),
            implementation: logic,
            escrows: Vec::new(),
            accounts: HashMap::new(),
            notifications: NotificationLog::new(DEFAULT_NOTIFICATION_CAPACITY),
        }
    }

    /// Instantiate a new escrow for a resolved auction.
    ///
    /// No caller restriction: creation mirrors an auction that already
    /// resolved off-ledger. The new account is pinned to the factory's
    /// current implementation and appended to the enumeration list.
    ///
    /// # Errors
    /// Returns `InvalidAmount` for a non-positive amount.
    pub fn create_escrow(
        &mut self,
        seller: PartyId,
        buyer: PartyId,
        amount: Decimal,
    ) -> Result<EscrowId> {
        if amount <= Decimal::ZERO {
            return Err(CustodyError::InvalidAmount(amount));
        }

        let index = self.escrows.len() as u64;
        let id = EscrowId::deterministic(index, seller, buyer);
        let account =
            EscrowAccount::new(id, seller, buyer, amount, Arc::clone(&self.implementation));

        self.escrows.push(id);
        self.accounts.insert(id, account);
        self.notifications
            .push(Notification::now(NotificationKind::EscrowCreated {
                escrow: id,
                seller,
                buyer,
                amount,
            }));
        info!(escrow = %id, %seller, %buyer, %amount, "escrow created");
        Ok(id)
    }

    /// Swap the implementation used for future escrows. Owner only.
    ///
    /// # Errors
    /// Returns `UnauthorizedOwner` naming the rejected caller.
    pub fn set_implementation(
        &mut self,
        caller: PartyId,
        logic: Arc<dyn EscrowLogic>,
    ) -> Result<()> {
        self.ownable.ensure_owner(caller).inspect_err(|_| {
            warn!(%caller, "rejected implementation swap by non-owner");
        })?;
        info!(
            from_version = self.implementation.version(),
            to_version = logic.version(),
            "escrow implementation swapped"
        );
        self.implementation = logic;
        Ok(())
    }

    // -- operation routing --------------------------------------------------

    /// Deposit into the escrow identified by `id`.
    pub fn deposit(
        &mut self,
        id: EscrowId,
        caller: PartyId,
        value: Decimal,
        ledger: &mut Ledger,
    ) -> Result<()> {
        let account = self.account_mut(id)?;
        account.deposit(ledger, caller, value)?;
        info!(escrow = %id, %caller, %value, "deposit accepted");
        Ok(())
    }

    /// Confirm receipt for the escrow identified by `id`.
    pub fn confirm_receipt(&mut self, id: EscrowId, caller: PartyId) -> Result<()> {
        let account = self.account_mut(id)?;
        let notification = account.confirm_receipt(caller)?;
        self.notifications.push(notification);
        info!(escrow = %id, by = %caller, "receipt confirmed");
        Ok(())
    }

    /// Release the held funds of the escrow identified by `id` to its
    /// seller. Returns the released amount.
    pub fn release_funds(
        &mut self,
        id: EscrowId,
        caller: PartyId,
        ledger: &mut Ledger,
    ) -> Result<Decimal> {
        let account = self.account_mut(id)?;
        let amount = account.release_funds(ledger, caller)?;
        info!(escrow = %id, %amount, "funds released to seller");
        Ok(amount)
    }

    /// Cancel the escrow identified by `id`, refunding any held deposit.
    pub fn cancel(&mut self, id: EscrowId, caller: PartyId, ledger: &mut Ledger) -> Result<()> {
        let account = self.account_mut(id)?;
        let notification = account.cancel(ledger, caller)?;
        self.notifications.push(notification);
        info!(escrow = %id, by = %caller, "escrow canceled");
        Ok(())
    }

    // -- read-only accessors ------------------------------------------------

    /// The factory owner.
    #[must_use]
    pub fn owner(&self) -> PartyId {
        self.ownable.owner()
    }

    /// Version of the implementation bound into new escrows.
    #[must_use]
    pub fn implementation_version(&self) -> u32 {
        self.implementation.version()
    }

    /// Handle of the i-th escrow ever created.
    #[must_use]
    pub fn escrow_at(&self, index: usize) -> Option<EscrowId> {
        self.escrows.get(index).copied()
    }

    /// Look up an account by handle.
    pub fn escrow(&self, id: EscrowId) -> Result<&EscrowAccount> {
        self.accounts
            .get(&id)
            .ok_or(CustodyError::EscrowNotFound(id))
    }

    /// Number of escrows ever created.
    #[must_use]
    pub fn count(&self) -> usize {
        self.escrows.len()
    }

    /// Total value currently held in custody across all accounts. Feeds
    /// [`Ledger::verify_supply`].
    #[must_use]
    pub fn held_total(&self) -> Decimal {
        self.accounts.values().map(EscrowAccount::held).sum()
    }

    /// The observable notification stream.
    #[must_use]
    pub fn notifications(&self) -> &NotificationLog {
        &self.notifications
    }

    fn account_mut(&mut self, id: EscrowId) -> Result<&mut EscrowAccount> {
        self.accounts
            .get_mut(&id)
            .ok_or(CustodyError::EscrowNotFound(id))
    }
}
