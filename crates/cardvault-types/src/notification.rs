//! Notification types for the CardVault observable side channel.
//!
//! Every externally significant mutation (escrow created, receipt
//! confirmed, asset transferred) produces a [`Notification`] that the
//! off-chain service layer and indexers consume to drive UI updates and
//! database writes. Notifications are emitted strictly **after** the state
//! change they describe has been committed.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{EscrowId, PartyId, TokenId};

/// The kind of event a notification describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NotificationKind {
    /// The factory instantiated a new escrow account.
    EscrowCreated {
        escrow: EscrowId,
        seller: PartyId,
        buyer: PartyId,
        amount: Decimal,
    },
    /// The buyer confirmed receipt of the traded goods.
    ReceiptConfirmed { escrow: EscrowId, by: PartyId },
    /// The escrow was canceled before completion.
    EscrowCanceled { escrow: EscrowId, by: PartyId },
    /// Ownership of a token moved. Minting is a transfer from `None`.
    AssetTransferred {
        token: TokenId,
        from: Option<PartyId>,
        to: PartyId,
    },
    /// A provenance record was appended to a token's auction history.
    HistoryAppended {
        token: TokenId,
        seller: PartyId,
        buyer: PartyId,
        price: Decimal,
    },
}

impl std::fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EscrowCreated { .. } => write!(f, "ESCROW_CREATED"),
            Self::ReceiptConfirmed { .. } => write!(f, "RECEIPT_CONFIRMED"),
            Self::EscrowCanceled { .. } => write!(f, "ESCROW_CANCELED"),
            Self::AssetTransferred { .. } => write!(f, "ASSET_TRANSFERRED"),
            Self::HistoryAppended { .. } => write!(f, "HISTORY_APPENDED"),
        }
    }
}

/// A single entry in the observable event stream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    /// What happened.
    pub kind: NotificationKind,
    /// When the emitting component committed the change.
    pub emitted_at: DateTime<Utc>,
}

impl Notification {
    /// Wrap a kind with the current timestamp.
    #[must_use]
    pub fn now(kind: NotificationKind) -> Self {
        Self {
            kind,
            emitted_at: Utc::now(),
        }
    }
}

/// Bounded append-only notification log.
///
/// Entries are kept in emission order. When the log reaches `max_size` the
/// oldest entry is evicted, keeping memory predictable in long-running
/// services; indexers are expected to tail the log promptly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationLog {
    entries: std::collections::VecDeque<Notification>,
    max_size: usize,
}

impl NotificationLog {
    /// Create a log with the given maximum size.
    ///
    /// # Panics
    /// Panics if `max_size` is zero.
    #[must_use]
    pub fn new(max_size: usize) -> Self {
        assert!(max_size > 0, "NotificationLog max_size must be > 0");
        Self {
            entries: std::collections::VecDeque::with_capacity(max_size),
            max_size,
        }
    }

    /// Append a notification, evicting the oldest entry if at capacity.
    pub fn push(&mut self, notification: Notification) {
        if self.entries.len() >= self.max_size {
            self.entries.pop_front();
        }
        self.entries.push_back(notification);
    }

    /// Iterate entries in emission order (oldest first).
    pub fn iter(&self) -> impl Iterator<Item = &Notification> {
        self.entries.iter()
    }

    /// The most recently emitted notification, if any.
    #[must_use]
    pub fn latest(&self) -> Option<&Notification> {
        self.entries.back()
    }

    /// Number of notifications currently retained.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the log holds no notifications.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
