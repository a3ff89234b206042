//! Lobby facade implementation.

use super::{
    config::LobbyConfig,
    errors::{LobbyError, LobbyResult},
};
use crate::{
    auth::{AuthManager, IdentityProvider, LoginRequest, User},
    deal::{DealOrchestrator, DealOutcome},
    game::SeatLabel,
    session::{SessionError, SessionSelection, SessionSelector},
    storage::KeyValueStore,
    table::{Table, TableError, TableRegistry},
};
use std::{sync::Arc, time::Duration};

/// One client's view of the lobby: who is logged in, where they sit, and
/// the deal trigger.
pub struct Lobby {
    identity: Box<dyn IdentityProvider>,
    selector: SessionSelector,
    dealer: DealOrchestrator,
    deal_delay: Duration,
}

impl Lobby {
    /// Assemble a lobby from its parts
    pub fn new(
        identity: Box<dyn IdentityProvider>,
        selector: SessionSelector,
        dealer: DealOrchestrator,
        deal_delay: Duration,
    ) -> Self {
        Self {
            identity,
            selector,
            dealer,
            deal_delay,
        }
    }

    /// Open a lobby over `store` using the mock identity provider
    ///
    /// # Errors
    ///
    /// * `LobbyError::Table` - Sample tables could not be seeded
    pub fn open(store: Arc<dyn KeyValueStore>, config: &LobbyConfig) -> LobbyResult<Self> {
        let keys = &config.storage;
        let registry =
            TableRegistry::open(store.clone(), keys.tables_key.clone(), config.registry.clone())?;
        let selector =
            SessionSelector::load(registry.clone(), store.clone(), keys.selection_key.clone());
        let dealer = DealOrchestrator::new(registry, store.clone(), keys.deck_color_key.clone());
        let identity = AuthManager::new(store, keys.user_key.clone(), config.login_delay);

        Ok(Self::new(Box::new(identity), selector, dealer, config.deal_delay))
    }

    pub fn current_user(&self) -> Option<&User> {
        self.identity.current_user()
    }

    pub fn selection(&self) -> &SessionSelection {
        self.selector.current()
    }

    /// Table the selection points at, if it still exists
    pub fn current_table(&self) -> Option<Table> {
        self.selector.current_table()
    }

    pub fn get_all_tables(&self) -> Vec<Table> {
        self.selector.registry().get_all_tables()
    }

    pub fn get_table(&self, table_id: &str) -> Option<Table> {
        self.selector.registry().get_table(table_id)
    }

    pub fn is_table_full(&self, table_id: &str) -> bool {
        self.selector.registry().is_full(table_id)
    }

    pub fn get_available_seats(&self, table_id: &str) -> usize {
        self.selector.registry().available_seat_count(table_id)
    }

    fn require_user(&self) -> LobbyResult<String> {
        self.identity
            .current_user()
            .map(|u| u.username.clone())
            .ok_or(LobbyError::NotLoggedIn)
    }

    /// Log in through the identity provider
    pub async fn login(&mut self, username: &str, password: &str) -> LobbyResult<User> {
        let user = self
            .identity
            .login(LoginRequest::new(username, password))
            .await?;
        Ok(user)
    }

    /// Leave the current seat or spectator slot, clear the selection and
    /// log out. A table that no longer exists does not block the logout.
    pub fn logout(&mut self) -> LobbyResult<()> {
        if let Some(user) = self.identity.current_user() {
            let username = user.username.clone();
            match self.selector.leave_current(&username) {
                Ok(_) => {}
                Err(SessionError::Table(TableError::TableNotFound(id))) => {
                    log::debug!("Selected table {} is gone, skipping leave", id);
                }
                Err(e) => return Err(e.into()),
            }
        }

        self.selector.clear()?;
        self.identity.logout()?;
        Ok(())
    }

    /// Create a table
    ///
    /// # Errors
    ///
    /// * `LobbyError::NotLoggedIn` - No user logged in
    /// * `LobbyError::Table` - Name rejected or registry write failed
    pub fn create_table(&self, name: &str) -> LobbyResult<Table> {
        self.require_user()?;
        Ok(self.selector.registry().create_table(name)?)
    }

    /// Sit the current user at `seat`
    pub fn join_seat(&mut self, table_id: &str, seat: SeatLabel) -> LobbyResult<Table> {
        let username = self.require_user()?;
        Ok(self.selector.join_seat(table_id, seat, &username)?)
    }

    /// Watch a table as the current user
    pub fn join_spectator(&mut self, table_id: &str) -> LobbyResult<Table> {
        let username = self.require_user()?;
        Ok(self.selector.join_spectator(table_id, &username)?)
    }

    /// Leave the currently selected seat or spectator slot
    ///
    /// # Returns
    ///
    /// * `LobbyResult<Option<Table>>` - The table left, `None` if nothing
    ///   was selected
    pub fn leave(&mut self) -> LobbyResult<Option<Table>> {
        let username = self.require_user()?;
        Ok(self.selector.leave_current(&username)?)
    }

    /// Deal a new set of hands after the configured cosmetic delay
    ///
    /// # Errors
    ///
    /// * `LobbyError::NotLoggedIn` - No user logged in
    /// * `LobbyError::Deal` - Spectator selection, missing table or storage
    ///   failure
    pub async fn deal(&self) -> LobbyResult<DealOutcome> {
        self.require_user()?;
        let outcome = self
            .dealer
            .deal_after(self.selector.current(), self.deal_delay)
            .await?;
        Ok(outcome)
    }

    /// Remove every table. Admin only.
    ///
    /// The selection is dropped first: if that fails the tables are left
    /// untouched, and if the registry clear then fails the admin is merely
    /// deselected.
    pub fn clear_all_tables(&mut self) -> LobbyResult<()> {
        let is_admin = self
            .identity
            .current_user()
            .ok_or(LobbyError::NotLoggedIn)?
            .is_admin;
        if !is_admin {
            return Err(LobbyError::NotAuthorized);
        }

        self.selector.clear()?;
        self.selector.registry().clear_all_tables()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        deal::DealError,
        storage::{MemoryStore, StorageError, StorageResult},
    };
    use std::sync::atomic::{AtomicBool, Ordering};

    fn lobby() -> Lobby {
        Lobby::open(Arc::new(MemoryStore::new()), &LobbyConfig::instant()).unwrap()
    }

    /// Memory store whose selection record can be made read-only
    #[derive(Default)]
    struct PinnedSelectionStore {
        inner: MemoryStore,
        pinned: AtomicBool,
    }

    impl PinnedSelectionStore {
        fn check(&self, key: &str) -> StorageResult<()> {
            if self.pinned.load(Ordering::SeqCst) && key == "bridge_current_selection" {
                return Err(StorageError::Unavailable("read-only".to_string()));
            }
            Ok(())
        }
    }

    impl KeyValueStore for PinnedSelectionStore {
        fn get(&self, key: &str) -> StorageResult<Option<String>> {
            self.inner.get(key)
        }

        fn set(&self, key: &str, value: &str) -> StorageResult<()> {
            self.check(key)?;
            self.inner.set(key, value)
        }

        fn remove(&self, key: &str) -> StorageResult<()> {
            self.check(key)?;
            self.inner.remove(key)
        }

        fn compare_and_set(
            &self,
            key: &str,
            expected: Option<&str>,
            value: &str,
        ) -> StorageResult<bool> {
            self.check(key)?;
            self.inner.compare_and_set(key, expected, value)
        }
    }

    #[tokio::test]
    async fn test_operations_require_login() {
        let mut lobby = lobby();
        let table_id = lobby.get_all_tables()[0].id.clone();

        assert!(matches!(
            lobby.join_seat(&table_id, SeatLabel::North),
            Err(LobbyError::NotLoggedIn)
        ));
        assert!(matches!(lobby.deal().await, Err(LobbyError::NotLoggedIn)));
        assert!(matches!(lobby.create_table("x"), Err(LobbyError::NotLoggedIn)));
    }

    #[tokio::test]
    async fn test_join_and_deal() {
        let mut lobby = lobby();
        lobby.login("alice", "pw").await.unwrap();
        let table_id = lobby.get_all_tables()[0].id.clone();

        lobby.join_seat(&table_id, SeatLabel::South).unwrap();
        assert_eq!(lobby.get_available_seats(&table_id), 3);

        let outcome = lobby.deal().await.unwrap();
        assert_eq!(outcome.occupant(SeatLabel::South), Some("alice"));
    }

    #[tokio::test]
    async fn test_spectator_cannot_deal() {
        let mut lobby = lobby();
        lobby.login("bob", "pw").await.unwrap();
        let table_id = lobby.get_all_tables()[0].id.clone();
        lobby.join_spectator(&table_id).unwrap();

        assert!(matches!(
            lobby.deal().await,
            Err(LobbyError::Deal(DealError::NotAuthorized))
        ));
    }

    #[tokio::test]
    async fn test_logout_leaves_seat() {
        let mut lobby = lobby();
        lobby.login("alice", "pw").await.unwrap();
        let table_id = lobby.get_all_tables()[0].id.clone();
        lobby.join_seat(&table_id, SeatLabel::East).unwrap();

        lobby.logout().unwrap();
        assert!(lobby.current_user().is_none());
        assert!(!lobby.selection().is_active());
        assert_eq!(lobby.get_available_seats(&table_id), 4);
    }

    #[tokio::test]
    async fn test_clear_all_tables_admin_only() {
        let mut lobby = lobby();
        lobby.login("alice", "pw").await.unwrap();
        assert!(matches!(
            lobby.clear_all_tables(),
            Err(LobbyError::NotAuthorized)
        ));

        lobby.logout().unwrap();
        lobby.login("admin", "pw").await.unwrap();
        lobby.clear_all_tables().unwrap();
        assert!(lobby.get_all_tables().is_empty());
    }

    #[tokio::test]
    async fn test_clear_all_tables_keeps_tables_when_selection_fails() {
        let store = Arc::new(PinnedSelectionStore::default());
        let mut lobby = Lobby::open(store.clone(), &LobbyConfig::instant()).unwrap();
        lobby.login("admin", "pw").await.unwrap();

        store.pinned.store(true, Ordering::SeqCst);
        assert!(matches!(
            lobby.clear_all_tables(),
            Err(LobbyError::Session(SessionError::Storage(_)))
        ));
        assert_eq!(lobby.get_all_tables().len(), 3);
    }
}
