//! Authentication manager implementation.

use super::{
    errors::{AuthError, AuthResult},
    models::{LoginRequest, User},
};
use crate::storage::{KeyValueStore, read_json, write_json};
use async_trait::async_trait;
use std::{sync::Arc, time::Duration};

/// Identity provider consumed by the lobby
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Log in, replacing any current user
    async fn login(&mut self, request: LoginRequest) -> AuthResult<User>;

    /// Forget the current user
    fn logout(&mut self) -> AuthResult<()>;

    fn current_user(&self) -> Option<&User>;
}

/// Mock identity provider accepting any non-blank credentials
pub struct AuthManager {
    store: Arc<dyn KeyValueStore>,
    key: String,
    login_delay: Duration,
    current: Option<User>,
}

impl AuthManager {
    /// Create a new authentication manager
    ///
    /// The persisted user is restored; an unreadable record is removed and
    /// treated as logged out.
    ///
    /// # Arguments
    ///
    /// * `store` - Store holding the current user record
    /// * `key` - Key of the current user record
    /// * `login_delay` - Cosmetic delay before a login completes
    ///
    /// # Returns
    ///
    /// * `AuthManager` - New authentication manager instance
    pub fn new(store: Arc<dyn KeyValueStore>, key: impl Into<String>, login_delay: Duration) -> Self {
        let key = key.into();
        let current = match read_json::<User>(store.as_ref(), &key) {
            Ok(user) => user,
            Err(e) => {
                log::warn!("Discarding unreadable stored user: {}", e);
                if let Err(e) = store.remove(&key) {
                    log::warn!("Failed to remove stored user: {}", e);
                }
                None
            }
        };

        if let Some(user) = &current {
            log::info!("Restored session for {}", user.username);
        }

        Self {
            store,
            key,
            login_delay,
            current,
        }
    }

    pub fn is_logged_in(&self) -> bool {
        self.current.is_some()
    }

    /// Validate and trim credentials
    fn validate(request: &LoginRequest) -> AuthResult<String> {
        let username = request.username.trim();
        if username.is_empty() {
            return Err(AuthError::EmptyUsername);
        }
        if request.password.trim().is_empty() {
            return Err(AuthError::EmptyPassword);
        }
        Ok(username.to_string())
    }
}

#[async_trait]
impl IdentityProvider for AuthManager {
    /// # Errors
    ///
    /// * `AuthError::EmptyUsername` - Username blank after trimming
    /// * `AuthError::EmptyPassword` - Password blank after trimming
    /// * `AuthError::Storage` - User could not be persisted
    async fn login(&mut self, request: LoginRequest) -> AuthResult<User> {
        tokio::time::sleep(self.login_delay).await;

        let username = Self::validate(&request)?;
        let user = User::new(username);
        write_json(self.store.as_ref(), &self.key, &user)?;

        log::info!("Login successful: {} (admin: {})", user.username, user.is_admin);
        self.current = Some(user.clone());
        Ok(user)
    }

    fn logout(&mut self) -> AuthResult<()> {
        self.store.remove(&self.key)?;
        if let Some(user) = self.current.take() {
            log::info!("User logged out: {}", user.username);
        }
        Ok(())
    }

    fn current_user(&self) -> Option<&User> {
        self.current.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    const KEY: &str = "bridge_current_user";

    fn manager(store: Arc<dyn KeyValueStore>) -> AuthManager {
        AuthManager::new(store, KEY, Duration::ZERO)
    }

    #[tokio::test]
    async fn test_login_trims_and_persists() {
        let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
        let mut auth = manager(store.clone());

        let user = auth
            .login(LoginRequest::new("  alice ", "secret"))
            .await
            .unwrap();
        assert_eq!(user.username, "alice");
        assert!(!user.is_admin);
        assert!(auth.is_logged_in());

        let restored = manager(store);
        assert_eq!(restored.current_user(), Some(&user));
    }

    #[tokio::test]
    async fn test_login_rejects_blank_credentials() {
        let mut auth = manager(Arc::new(MemoryStore::new()));
        let err = auth.login(LoginRequest::new("   ", "pw")).await.unwrap_err();
        assert!(matches!(err, AuthError::EmptyUsername));
        let err = auth.login(LoginRequest::new("bob", " ")).await.unwrap_err();
        assert!(matches!(err, AuthError::EmptyPassword));
        assert!(err.is_validation());
        assert!(!auth.is_logged_in());
    }

    #[tokio::test]
    async fn test_admin_login() {
        let mut auth = manager(Arc::new(MemoryStore::new()));
        let user = auth.login(LoginRequest::new("Admin", "pw")).await.unwrap();
        assert!(user.is_admin);
    }

    #[tokio::test]
    async fn test_logout_removes_user() {
        let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
        let mut auth = manager(store.clone());
        auth.login(LoginRequest::new("alice", "pw")).await.unwrap();
        auth.logout().unwrap();

        assert!(auth.current_user().is_none());
        assert_eq!(store.get(KEY).unwrap(), None);
    }

    #[test]
    fn test_unreadable_user_is_discarded() {
        let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
        store.set(KEY, "not json").unwrap();
        let auth = manager(store.clone());
        assert!(!auth.is_logged_in());
        assert_eq!(store.get(KEY).unwrap(), None);
    }

    #[tokio::test]
    async fn test_login_waits_for_delay() {
        let mut auth = AuthManager::new(Arc::new(MemoryStore::new()), KEY, Duration::from_millis(50));
        let started = tokio::time::Instant::now();
        auth.login(LoginRequest::new("alice", "pw")).await.unwrap();
        assert!(started.elapsed() >= Duration::from_millis(50));
    }

    #[tokio::test]
    async fn test_dropped_login_changes_nothing() {
        let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
        let mut auth = AuthManager::new(store.clone(), KEY, Duration::from_secs(60));
        let pending = auth.login(LoginRequest::new("alice", "pw"));
        assert!(tokio::time::timeout(Duration::from_millis(10), pending).await.is_err());
        assert!(!auth.is_logged_in());
        assert_eq!(store.get(KEY).unwrap(), None);
    }
}
