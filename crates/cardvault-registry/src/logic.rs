//! Versioned registry behavior.
//!
//! Logic implementations operate on the fixed [`RegistryStore`] schema and
//! can be swapped behind the registry handle without touching stored data.
//! Minting and history writes are delegated-admin-only: even the owner is
//! rejected, mirroring the split between the marketplace operator and the
//! backend service account.

use cardvault_types::{
    CustodyError, Notification, NotificationKind, PartyId, ProvenanceRecord, Result, TokenId,
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::store::RegistryStore;

/// Behavior contract of one registry logic version.
pub trait RegistryLogic: Send + Sync {
    /// Human-readable logic version marker (e.g. `"V1"`).
    fn version(&self) -> &'static str;

    /// Mint `token` to `to`. Backend admin only; the token id must be
    /// unused.
    fn safe_mint(
        &self,
        store: &mut RegistryStore,
        caller: PartyId,
        to: PartyId,
        token: TokenId,
    ) -> Result<Notification>;

    /// Append one provenance record to `token`'s auction history. Backend
    /// admin only; the token must exist.
    #[allow(clippy::too_many_arguments)]
    fn add_auction_history(
        &self,
        store: &mut RegistryStore,
        caller: PartyId,
        token: TokenId,
        seller: PartyId,
        buyer: PartyId,
        price: Decimal,
        timestamp: DateTime<Utc>,
    ) -> Result<Notification>;
}

fn ensure_backend_admin(store: &RegistryStore, caller: PartyId) -> Result<()> {
    if store.backend_admin == Some(caller) {
        Ok(())
    } else {
        Err(CustodyError::NotBackendAdmin)
    }
}

fn mint(
    store: &mut RegistryStore,
    caller: PartyId,
    to: PartyId,
    token: TokenId,
) -> Result<Notification> {
    ensure_backend_admin(store, caller)?;
    if store.token_exists(token) {
        return Err(CustodyError::TokenAlreadyMinted(token));
    }

    store.owners.insert(token, to);
    Ok(Notification::now(NotificationKind::AssetTransferred {
        token,
        from: None,
        to,
    }))
}

fn append_history(
    store: &mut RegistryStore,
    caller: PartyId,
    token: TokenId,
    seller: PartyId,
    buyer: PartyId,
    price: Decimal,
    timestamp: DateTime<Utc>,
) -> Result<Notification> {
    ensure_backend_admin(store, caller)?;
    // Hardened relative to the legacy behavior: provenance can only be
    // recorded against a minted token.
    if !store.token_exists(token) {
        return Err(CustodyError::TokenNotFound(token));
    }

    store.histories.entry(token).or_default().push(ProvenanceRecord {
        seller,
        buyer,
        price,
        timestamp,
    });
    Ok(Notification::now(NotificationKind::HistoryAppended {
        token,
        seller,
        buyer,
        price,
    }))
}

/// First-generation registry logic.
#[derive(Debug, Clone, Copy, Default)]
pub struct RegistryLogicV1;

impl RegistryLogic for RegistryLogicV1 {
    fn version(&self) -> &'static str {
        "V1"
    }

    fn safe_mint(
        &self,
        store: &mut RegistryStore,
        caller: PartyId,
        to: PartyId,
        token: TokenId,
    ) -> Result<Notification> {
        mint(store, caller, to, token)
    }

    fn add_auction_history(
        &self,
        store: &mut RegistryStore,
        caller: PartyId,
        token: TokenId,
        seller: PartyId,
        buyer: PartyId,
        price: Decimal,
        timestamp: DateTime<Utc>,
    ) -> Result<Notification> {
        append_history(store, caller, token, seller, buyer, price, timestamp)
    }
}

/// Second-generation registry logic. Behaviorally identical to V1 today;
/// its observable novelty is the version marker upgrades are verified
/// against.
#[derive(Debug, Clone, Copy, Default)]
pub struct RegistryLogicV2;

impl RegistryLogic for RegistryLogicV2 {
    fn version(&self) -> &'static str {
        "V2"
    }

    fn safe_mint(
        &self,
        store: &mut RegistryStore,
        caller: PartyId,
        to: PartyId,
        token: TokenId,
    ) -> Result<Notification> {
        mint(store, caller, to, token)
    }

    fn add_auction_history(
        &self,
        store: &mut RegistryStore,
        caller: PartyId,
        token: TokenId,
        seller: PartyId,
        buyer: PartyId,
        price: Decimal,
        timestamp: DateTime<Utc>,
    ) -> Result<Notification> {
        append_history(store, caller, token, seller, buyer, price, timestamp)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn admin_store() -> (RegistryStore, PartyId) {
        let mut store = RegistryStore::new();
        let admin = PartyId::new();
        store.initialized = true;
        store.owner = Some(PartyId::new());
        store.backend_admin = Some(admin);
        (store, admin)
    }

    #[test]
    fn mint_records_ownership() {
        let (mut store, admin) = admin_store();
        let holder = PartyId::new();
        let notification = RegistryLogicV1
            .safe_mint(&mut store, admin, holder, TokenId(1))
            .unwrap();

        assert_eq!(store.owners.get(&TokenId(1)), Some(&holder));
        assert!(matches!(
            notification.kind,
            NotificationKind::AssetTransferred { token, from: None, to }
                if token == TokenId(1) && to == holder
        ));
    }

    #[test]
    fn mint_by_owner_rejected() {
        let (mut store, _) = admin_store();
        let owner = store.owner.unwrap();
        let err = RegistryLogicV1
            .safe_mint(&mut store, owner, PartyId::new(), TokenId(1))
            .unwrap_err();
        assert!(matches!(err, CustodyError::NotBackendAdmin));
        assert!(!store.token_exists(TokenId(1)));
    }

    #[test]
    fn mint_duplicate_token_rejected() {
        let (mut store, admin) = admin_store();
        let holder = PartyId::new();
        RegistryLogicV1
            .safe_mint(&mut store, admin, holder, TokenId(1))
            .unwrap();
        let err = RegistryLogicV1
            .safe_mint(&mut store, admin, PartyId::new(), TokenId(1))
            .unwrap_err();
        assert!(matches!(err, CustodyError::TokenAlreadyMinted(t) if t == TokenId(1)));
        // Original holder unchanged.
        assert_eq!(store.owners.get(&TokenId(1)), Some(&holder));
    }

    #[test]
    fn history_appends_in_order() {
        let (mut store, admin) = admin_store();
        let u1 = PartyId::new();
        let u2 = PartyId::new();
        RegistryLogicV1
            .safe_mint(&mut store, admin, u1, TokenId(1))
            .unwrap();

        RegistryLogicV1
            .add_auction_history(
                &mut store,
                admin,
                TokenId(1),
                u1,
                u2,
                Decimal::ONE,
                Utc::now(),
            )
            .unwrap();
        RegistryLogicV1
            .add_auction_history(
                &mut store,
                admin,
                TokenId(1),
                u2,
                u1,
                Decimal::new(2, 0),
                Utc::now(),
            )
            .unwrap();

        let history = &store.histories[&TokenId(1)];
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].seller, u1);
        assert_eq!(history[1].seller, u2);
    }

    #[test]
    fn history_on_unminted_token_rejected() {
        let (mut store, admin) = admin_store();
        let err = RegistryLogicV1
            .add_auction_history(
                &mut store,
                admin,
                TokenId(999),
                PartyId::new(),
                PartyId::new(),
                Decimal::ONE,
                Utc::now(),
            )
            .unwrap_err();
        assert!(matches!(err, CustodyError::TokenNotFound(t) if t == TokenId(999)));
        assert!(store.histories.is_empty());
    }

    #[test]
    fn history_by_non_admin_rejected() {
        let (mut store, admin) = admin_store();
        RegistryLogicV1
            .safe_mint(&mut store, admin, PartyId::new(), TokenId(1))
            .unwrap();
        let err = RegistryLogicV1
            .add_auction_history(
                &mut store,
                PartyId::new(),
                TokenId(1),
                PartyId::new(),
                PartyId::new(),
                Decimal::ONE,
                Utc::now(),
            )
            .unwrap_err();
        assert!(matches!(err, CustodyError::NotBackendAdmin));
    }

    #[test]
    fn version_markers() {
        assert_eq!(RegistryLogicV1.version(), "V1");
        assert_eq!(RegistryLogicV2.version(), "V2");
    }
}
