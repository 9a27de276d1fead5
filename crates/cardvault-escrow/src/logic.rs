//! The versioned escrow state-machine logic.
//!
//! Accounts do not embed their transition rules — they hold an
//! `Arc<dyn EscrowLogic>` chosen by the factory at creation time. Swapping
//! the factory's implementation upgrades every *future* escrow while
//! in-flight accounts keep the logic they were created with.
//!
//! Every operation validates **all** of its preconditions before touching
//! any state, so a failed call leaves the account and the ledger exactly as
//! they were. State is committed together with the value movement inside
//! the same exclusive call; notifications are produced only after both.

use cardvault_types::{
    CustodyError, EscrowState, Notification, NotificationKind, PartyId, Result,
};
use rust_decimal::Decimal;

use crate::account::EscrowAccount;
use crate::ledger::Ledger;

/// Strategy implemented by each escrow logic version.
///
/// The account data schema is fixed; logic versions only vary the
/// transition rules. All implementations must keep the checks-then-commit
/// discipline described at module level.
pub trait EscrowLogic: Send + Sync {
    /// Monotonically increasing logic version.
    fn version(&self) -> u32;

    /// `AwaitingPayment` → `AwaitingConfirmation`: the buyer pays exactly
    /// the escrow amount into custody.
    fn deposit(
        &self,
        account: &mut EscrowAccount,
        ledger: &mut Ledger,
        caller: PartyId,
        value: Decimal,
    ) -> Result<()>;

    /// `AwaitingConfirmation` → `Complete`: the buyer confirms receipt.
    fn confirm_receipt(&self, account: &mut EscrowAccount, caller: PartyId)
        -> Result<Notification>;

    /// Transfer the held amount to the seller. Only from `Complete`, only
    /// once.
    fn release_funds(
        &self,
        account: &mut EscrowAccount,
        ledger: &mut Ledger,
        caller: PartyId,
    ) -> Result<Decimal>;

    /// `AwaitingPayment`/`AwaitingConfirmation` → `Canceled`: the seller
    /// withdraws the sale; any held deposit is refunded to the buyer.
    fn cancel(
        &self,
        account: &mut EscrowAccount,
        ledger: &mut Ledger,
        caller: PartyId,
    ) -> Result<Notification>;
}

/// Version 1 of the escrow transition rules.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardEscrowLogic;

impl StandardEscrowLogic {
    fn ensure_buyer(account: &EscrowAccount, caller: PartyId) -> Result<()> {
        if caller == account.buyer {
            Ok(())
        } else {
            Err(CustodyError::NotBuyer { caller })
        }
    }

    fn ensure_seller(account: &EscrowAccount, caller: PartyId) -> Result<()> {
        if caller == account.seller {
            Ok(())
        } else {
            Err(CustodyError::NotSeller { caller })
        }
    }

    fn ensure_state(account: &EscrowAccount, required: EscrowState, op: &str) -> Result<()> {
        if account.state == required {
            Ok(())
        } else {
            Err(CustodyError::InvalidState {
                reason: format!(
                    "{op} requires {required}, escrow {} is {}",
                    account.id, account.state
                ),
            })
        }
    }
}

impl EscrowLogic for StandardEscrowLogic {
    fn version(&self) -> u32 {
        1
    }

    fn deposit(
        &self,
        account: &mut EscrowAccount,
        ledger: &mut Ledger,
        caller: PartyId,
        value: Decimal,
    ) -> Result<()> {
        Self::ensure_buyer(account, caller)?;
        Self::ensure_state(account, EscrowState::AwaitingPayment, "deposit")?;
        if value != account.amount {
            return Err(CustodyError::IncorrectAmount {
                expected: account.amount,
                got: value,
            });
        }

        // The debit is the last fallible step; on success, custody and the
        // state transition commit together within this exclusive call.
        ledger.debit(caller, value)?;
        account.held = value;
        account.state = EscrowState::AwaitingConfirmation;
        Ok(())
    }

    fn confirm_receipt(
        &self,
        account: &mut EscrowAccount,
        caller: PartyId,
    ) -> Result<Notification> {
        Self::ensure_buyer(account, caller)?;
        Self::ensure_state(account, EscrowState::AwaitingConfirmation, "confirm_receipt")?;

        account.state = EscrowState::Complete;
        Ok(Notification::now(NotificationKind::ReceiptConfirmed {
            escrow: account.id,
            by: caller,
        }))
    }

    fn release_funds(
        &self,
        account: &mut EscrowAccount,
        ledger: &mut Ledger,
        caller: PartyId,
    ) -> Result<Decimal> {
        Self::ensure_seller(account, caller)?;
        Self::ensure_state(account, EscrowState::Complete, "release_funds")?;
        if account.funds_released {
            return Err(CustodyError::InvalidState {
                reason: format!("funds already released for escrow {}", account.id),
            });
        }

        let amount = account.held;
        account.held = Decimal::ZERO;
        account.funds_released = true;
        ledger.credit(account.seller, amount);
        Ok(amount)
    }

    fn cancel(
        &self,
        account: &mut EscrowAccount,
        ledger: &mut Ledger,
        caller: PartyId,
    ) -> Result<Notification> {
        Self::ensure_seller(account, caller)?;
        if !account.state.can_transition_to(EscrowState::Canceled) {
            return Err(CustodyError::InvalidState {
                reason: format!(
                    "cancel requires a pre-completion state, escrow {} is {}",
                    account.id, account.state
                ),
            });
        }

        let refund = account.held;
        account.held = Decimal::ZERO;
        account.state = EscrowState::Canceled;
        if refund > Decimal::ZERO {
            ledger.credit(account.buyer, refund);
        }
        Ok(Notification::now(NotificationKind::EscrowCanceled {
            escrow: account.id,
            by: caller,
        }))
    }
}
