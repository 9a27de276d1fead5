//! The stable registry handle.
//!
//! [`AssetRegistry`] is the surface callers keep a reference to across logic
//! upgrades. It owns the [`RegistryStore`] and the current
//! [`RegistryLogic`], delegates every behavioral call to the logic, and
//! gates the administrative operations (initialize, admin rotation,
//! upgrade) on the owner recorded in the store.

use cardvault_types::{
    CustodyError, Notification, NotificationLog, PartyId, ProvenanceRecord, Result, TokenId,
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::logic::{RegistryLogic, RegistryLogicV1};
use crate::store::RegistryStore;

/// Bounded size of the registry's in-memory notification log.
const DEFAULT_NOTIFICATION_CAPACITY: usize = 1024;

/// Upgradeable card registry: fixed handle, swappable logic, stable store.
pub struct AssetRegistry {
    store: RegistryStore,
    logic: Box<dyn RegistryLogic>,
    notifications: NotificationLog,
}

impl AssetRegistry {
    /// Create an uninitialized registry running [`RegistryLogicV1`].
    ///
    /// No operation other than [`initialize`](Self::initialize) succeeds
    /// until the registry has been initialized.
    #[must_use]
    pub fn new() -> Self {
        Self {
            store: RegistryStore::new(),
            logic: Box::new(RegistryLogicV1),
            notifications: NotificationLog::new(DEFAULT_NOTIFICATION_CAPACITY),
        }
    }

    /// One-shot initialization: records `owner` as the administrative
    /// owner. Survives logic upgrades; a second call fails regardless of
    /// caller.
    ///
    /// # Errors
    ///
    /// Returns [`CustodyError::InvalidInitialization`] if the registry has
    /// already been initialized.
    pub fn initialize(&mut self, owner: PartyId) -> Result<()> {
        if self.store.initialized {
            return Err(CustodyError::InvalidInitialization);
        }
        self.store.initialized = true;
        self.store.owner = Some(owner);
        tracing::info!(%owner, "registry initialized");
        Ok(())
    }

    /// Rotate the delegated backend admin. Owner only.
    ///
    /// # Errors
    ///
    /// Returns [`CustodyError::UnauthorizedOwner`] if `caller` is not the
    /// recorded owner.
    pub fn set_backend_admin(&mut self, caller: PartyId, admin: PartyId) -> Result<()> {
        self.ensure_owner(caller)?;
        self.store.backend_admin = Some(admin);
        tracing::info!(%admin, "backend admin rotated");
        Ok(())
    }

    /// Swap the registry logic in place. Owner only. The store is carried
    /// forward untouched.
    ///
    /// # Errors
    ///
    /// Returns [`CustodyError::UnauthorizedOwner`] if `caller` is not the
    /// recorded owner.
    pub fn upgrade_to(&mut self, caller: PartyId, logic: Box<dyn RegistryLogic>) -> Result<()> {
        self.ensure_owner(caller).inspect_err(|_| {
            tracing::warn!(%caller, "rejected registry upgrade from non-owner");
        })?;
        tracing::info!(
            from = self.logic.version(),
            to = logic.version(),
            "registry logic upgraded"
        );
        self.logic = logic;
        Ok(())
    }

    /// Mint `token` to `to`. Backend admin only.
    ///
    /// # Errors
    ///
    /// Returns [`CustodyError::NotBackendAdmin`] for any other caller
    /// (including the owner), or [`CustodyError::TokenAlreadyMinted`] if
    /// the token id is already in use.
    pub fn safe_mint(&mut self, caller: PartyId, to: PartyId, token: TokenId) -> Result<()> {
        let notification = self.logic.safe_mint(&mut self.store, caller, to, token)?;
        tracing::info!(%token, %to, "token minted");
        self.notifications.push(notification);
        Ok(())
    }

    /// Append one auction provenance record to `token`. Backend admin only.
    ///
    /// # Errors
    ///
    /// Returns [`CustodyError::NotBackendAdmin`] for any other caller, or
    /// [`CustodyError::TokenNotFound`] if the token was never minted.
    pub fn add_auction_history(
        &mut self,
        caller: PartyId,
        token: TokenId,
        seller: PartyId,
        buyer: PartyId,
        price: Decimal,
        timestamp: DateTime<Utc>,
    ) -> Result<()> {
        let notification = self.logic.add_auction_history(
            &mut self.store,
            caller,
            token,
            seller,
            buyer,
            price,
            timestamp,
        )?;
        tracing::info!(%token, "auction history appended");
        self.notifications.push(notification);
        Ok(())
    }

    /// Current holder of `token`.
    ///
    /// # Errors
    ///
    /// Returns [`CustodyError::TokenNotFound`] if the token was never
    /// minted.
    pub fn owner_of(&self, token: TokenId) -> Result<PartyId> {
        self.store
            .owners
            .get(&token)
            .copied()
            .ok_or(CustodyError::TokenNotFound(token))
    }

    /// Full auction history of `token`, oldest first. Empty when no
    /// records exist, including for tokens that were never minted.
    #[must_use]
    pub fn auction_histories(&self, token: TokenId) -> &[ProvenanceRecord] {
        self.store
            .histories
            .get(&token)
            .map_or(&[][..], Vec::as_slice)
    }

    /// Version marker of the logic currently in place.
    #[must_use]
    pub fn version(&self) -> &'static str {
        self.logic.version()
    }

    /// Administrative owner, if initialized.
    #[must_use]
    pub fn owner(&self) -> Option<PartyId> {
        self.store.owner
    }

    /// Delegated backend admin, if set.
    #[must_use]
    pub fn backend_admin(&self) -> Option<PartyId> {
        self.store.backend_admin
    }

    /// Number of tokens ever minted.
    #[must_use]
    pub fn total_minted(&self) -> usize {
        self.store.total_minted()
    }

    /// Registry notifications, oldest first.
    pub fn notifications(&self) -> impl Iterator<Item = &Notification> {
        self.notifications.iter()
    }

    fn ensure_owner(&self, caller: PartyId) -> Result<()> {
        match self.store.owner {
            Some(owner) if owner == caller => Ok(()),
            _ => Err(CustodyError::UnauthorizedOwner { caller }),
        }
    }
}

impl Default for AssetRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for AssetRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AssetRegistry")
            .field("version", &self.logic.version())
            .field("initialized", &self.store.initialized)
            .field("total_minted", &self.store.total_minted())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cardvault_types::NotificationKind;

    fn initialized() -> (AssetRegistry, PartyId, PartyId) {
        let mut registry = AssetRegistry::new();
        let owner = PartyId::new();
        let admin = PartyId::new();
        registry.initialize(owner).unwrap();
        registry.set_backend_admin(owner, admin).unwrap();
        (registry, owner, admin)
    }

    #[test]
    fn initialize_runs_exactly_once() {
        let mut registry = AssetRegistry::new();
        let owner = PartyId::new();
        registry.initialize(owner).unwrap();
        assert_eq!(registry.owner(), Some(owner));

        let err = registry.initialize(PartyId::new()).unwrap_err();
        assert!(matches!(err, CustodyError::InvalidInitialization));
        // Even the original owner cannot re-run it.
        let err = registry.initialize(owner).unwrap_err();
        assert!(matches!(err, CustodyError::InvalidInitialization));
        assert_eq!(registry.owner(), Some(owner));
    }

    #[test]
    fn set_backend_admin_is_owner_only() {
        let mut registry = AssetRegistry::new();
        let owner = PartyId::new();
        registry.initialize(owner).unwrap();

        let intruder = PartyId::new();
        let err = registry
            .set_backend_admin(intruder, PartyId::new())
            .unwrap_err();
        assert!(matches!(
            err,
            CustodyError::UnauthorizedOwner { caller } if caller == intruder
        ));
        assert!(registry.backend_admin().is_none());
    }

    #[test]
    fn owner_cannot_mint_directly() {
        let (mut registry, owner, _) = initialized();
        let err = registry
            .safe_mint(owner, PartyId::new(), TokenId(1))
            .unwrap_err();
        assert!(matches!(err, CustodyError::NotBackendAdmin));
        assert_eq!(registry.total_minted(), 0);
    }

    #[test]
    fn mint_then_query_owner() {
        let (mut registry, _, admin) = initialized();
        let holder = PartyId::new();
        registry.safe_mint(admin, holder, TokenId(7)).unwrap();

        assert_eq!(registry.owner_of(TokenId(7)).unwrap(), holder);
        assert_eq!(registry.total_minted(), 1);
        let err = registry.owner_of(TokenId(8)).unwrap_err();
        assert!(matches!(err, CustodyError::TokenNotFound(t) if t == TokenId(8)));
    }

    #[test]
    fn minted_token_starts_with_empty_history() {
        let (mut registry, _, admin) = initialized();
        registry
            .safe_mint(admin, PartyId::new(), TokenId(1))
            .unwrap();
        assert!(registry.auction_histories(TokenId(1)).is_empty());
    }

    #[test]
    fn history_query_is_total() {
        // The read accessor has no precondition: an unknown token reads as
        // an empty history, unlike the write path which rejects it.
        let (registry, _, _) = initialized();
        assert!(registry.auction_histories(TokenId(42)).is_empty());
    }

    #[test]
    fn upgrade_is_owner_only() {
        let (mut registry, _, admin) = initialized();
        let err = registry
            .upgrade_to(admin, Box::new(crate::logic::RegistryLogicV2))
            .unwrap_err();
        assert!(matches!(err, CustodyError::UnauthorizedOwner { .. }));
        assert_eq!(registry.version(), "V1");
    }

    #[test]
    fn mint_pushes_notification() {
        let (mut registry, _, admin) = initialized();
        let holder = PartyId::new();
        registry.safe_mint(admin, holder, TokenId(1)).unwrap();

        let kinds: Vec<_> = registry.notifications().map(|n| &n.kind).collect();
        assert_eq!(kinds.len(), 1);
        assert!(matches!(
            kinds[0],
            NotificationKind::AssetTransferred { token, from: None, to }
                if *token == TokenId(1) && *to == holder
        ));
    }
}
