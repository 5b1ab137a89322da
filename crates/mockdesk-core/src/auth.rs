//! Client-side authentication gate.
//!
//! The credential endpoint only hands out known pairs; whether a login
//! succeeds is decided here by comparing against them.

use serde_json::json;
use tracing::{debug, info, instrument, warn};

use crate::error::AuthError;
use crate::traits::{CredentialSource, KeyValueStore};
use crate::validation::schemas;
use crate::{Credentials, Result};

/// Store key holding the persisted authentication flag.
pub const AUTH_KEY: &str = "auth";

/// Number of pairs fetched when checking a login.
pub const DEFAULT_LOOKUP_LIMIT: u32 = 10;

/// Result of a successful [`Authenticator::login`] or
/// [`Authenticator::signup`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginOutcome {
    /// The flag was set by this call.
    Authenticated,
    /// The flag was already set; nothing was sent.
    AlreadyAuthenticated,
}

/// Input of the signup form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignupForm {
    pub username: String,
    pub password: String,
    pub confirm_password: String,
}

impl SignupForm {
    pub fn new(
        username: impl Into<String>,
        password: impl Into<String>,
        confirm_password: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            confirm_password: confirm_password.into(),
        }
    }

    fn credentials(&self) -> Credentials {
        Credentials::new(&self.username, &self.password)
    }
}

/// Owns the authentication flag.
pub struct Authenticator<P, S> {
    source: P,
    store: S,
    persist: bool,
    lookup_limit: u32,
    authenticated: bool,
}

impl<P, S> Authenticator<P, S>
where
    P: CredentialSource,
    S: KeyValueStore,
{
    /// An unauthenticated gate that persists the flag in `store`.
    pub fn new(source: P, store: S) -> Self {
        Self {
            source,
            store,
            persist: true,
            lookup_limit: DEFAULT_LOOKUP_LIMIT,
            authenticated: false,
        }
    }

    /// Keep the flag in memory only.
    pub fn with_persistence(mut self, persist: bool) -> Self {
        self.persist = persist;
        self
    }

    pub fn with_lookup_limit(mut self, limit: u32) -> Self {
        self.lookup_limit = limit;
        self
    }

    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    /// Read the persisted flag. Returns the resulting state.
    pub fn restore(&mut self) -> Result<bool> {
        if !self.persist {
            return Ok(self.authenticated);
        }
        self.authenticated = self.store.get(AUTH_KEY)?.as_deref() == Some("true");
        debug!(authenticated = self.authenticated, "Restored auth flag");
        Ok(self.authenticated)
    }

    /// Check `credentials` against the known pairs.
    ///
    /// # Errors
    ///
    /// Validation errors for malformed input, transport errors from the
    /// credential endpoint, [`AuthError::InvalidCredentials`] when nothing
    /// matches.
    #[instrument(skip(self, credentials), fields(username = %credentials.username()))]
    pub async fn login(&mut self, credentials: &Credentials) -> Result<LoginOutcome> {
        if self.authenticated {
            debug!("Already authenticated");
            return Ok(LoginOutcome::AlreadyAuthenticated);
        }

        schemas::login().validate(&json!({
            "username": credentials.username(),
            "password": credentials.password(),
        }))?;

        let known = self.source.credentials(Some(self.lookup_limit)).await?;
        if !known.iter().any(|pair| pair.matches(credentials)) {
            warn!(checked = known.len(), "No matching credentials");
            return Err(AuthError::InvalidCredentials.into());
        }

        self.set_flag(true)?;
        info!("Logged in");
        Ok(LoginOutcome::Authenticated)
    }

    /// Register a new account and log in with it.
    #[instrument(skip(self, form), fields(username = %form.username))]
    pub async fn signup(&mut self, form: &SignupForm) -> Result<LoginOutcome> {
        if self.authenticated {
            return Ok(LoginOutcome::AlreadyAuthenticated);
        }

        schemas::signup().validate(&json!({
            "username": form.username,
            "password": form.password,
            "confirmPassword": form.confirm_password,
        }))?;

        self.source.register(&form.credentials()).await?;

        self.set_flag(true)?;
        info!("Signed up");
        Ok(LoginOutcome::Authenticated)
    }

    /// Clear the flag and its persisted copy.
    pub fn logout(&mut self) -> Result<()> {
        self.set_flag(false)?;
        info!("Logged out");
        Ok(())
    }

    /// Fails with [`AuthError::NotAuthenticated`] unless logged in.
    pub fn require(&self) -> Result<()> {
        if self.authenticated {
            Ok(())
        } else {
            Err(AuthError::NotAuthenticated.into())
        }
    }

    fn set_flag(&mut self, value: bool) -> Result<()> {
        if self.persist {
            if value {
                self.store.set(AUTH_KEY, "true")?;
            } else {
                self.store.remove(AUTH_KEY)?;
            }
        }
        self.authenticated = value;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;

    use crate::error::{Error, TransportError};
    use crate::store::MemoryStore;

    #[derive(Default)]
    struct FakeSource {
        known: Vec<Credentials>,
        registered: Mutex<Vec<Credentials>>,
        fetches: AtomicUsize,
        offline: bool,
    }

    impl FakeSource {
        fn demo() -> Arc<Self> {
            Arc::new(Self {
                known: vec![
                    Credentials::new("emilys", "emilyspass"),
                    Credentials::new("michaelw", "michaelwpass"),
                ],
                ..Default::default()
            })
        }
    }

    #[async_trait]
    impl CredentialSource for Arc<FakeSource> {
        async fn credentials(&self, limit: Option<u32>) -> Result<Vec<Credentials>> {
            self.fetches.fetch_add(1, Ordering::SeqCst);
            if self.offline {
                return Err(TransportError::Connection {
                    message: "Network Error".to_string(),
                }
                .into());
            }
            let limit = limit.map_or(usize::MAX, |l| l as usize);
            Ok(self.known.iter().take(limit).cloned().collect())
        }

        async fn register(&self, credentials: &Credentials) -> Result<()> {
            self.registered.lock().unwrap().push(credentials.clone());
            Ok(())
        }
    }

    fn gate(source: &Arc<FakeSource>) -> (Authenticator<Arc<FakeSource>, Arc<MemoryStore>>, Arc<MemoryStore>) {
        let store = Arc::new(MemoryStore::new());
        (Authenticator::new(Arc::clone(source), Arc::clone(&store)), store)
    }

    #[tokio::test]
    async fn matching_pair_logs_in_and_persists() {
        let source = FakeSource::demo();
        let (mut auth, store) = gate(&source);

        let outcome = auth
            .login(&Credentials::new("emilys", "emilyspass"))
            .await
            .unwrap();

        assert_eq!(outcome, LoginOutcome::Authenticated);
        assert!(auth.is_authenticated());
        assert_eq!(store.get(AUTH_KEY).unwrap().as_deref(), Some("true"));

        let mut restored = Authenticator::new(Arc::clone(&source), store);
        assert!(restored.restore().unwrap());
    }

    #[tokio::test]
    async fn wrong_password_is_rejected() {
        let source = FakeSource::demo();
        let (mut auth, store) = gate(&source);

        let err = auth
            .login(&Credentials::new("emilys", "wrongpass"))
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Auth(AuthError::InvalidCredentials)));
        assert_eq!(
            err.user_message(),
            "Invalid username or password. Please try again."
        );
        assert!(!auth.is_authenticated());
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn malformed_input_is_not_sent() {
        let source = FakeSource::demo();
        let (mut auth, _store) = gate(&source);

        let err = auth.login(&Credentials::new("ab", "")).await.unwrap_err();
        let Error::Validation(errors) = &err else {
            panic!("expected validation error, got {:?}", err);
        };
        assert!(errors.get("username").is_some());
        assert!(errors.get("password").is_some());
        assert_eq!(source.fetches.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn already_authenticated_skips_remote_call() {
        let source = FakeSource::demo();
        let (mut auth, _store) = gate(&source);
        auth.login(&Credentials::new("emilys", "emilyspass"))
            .await
            .unwrap();

        let outcome = auth
            .login(&Credentials::new("whoever", "whatever"))
            .await
            .unwrap();
        assert_eq!(outcome, LoginOutcome::AlreadyAuthenticated);
        assert_eq!(source.fetches.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn lookup_limit_bounds_the_known_pairs() {
        let source = FakeSource::demo();
        let (auth, _store) = gate(&source);
        let mut auth = auth.with_lookup_limit(1);

        assert!(
            auth.login(&Credentials::new("michaelw", "michaelwpass"))
                .await
                .is_err()
        );
    }

    #[tokio::test]
    async fn transport_failure_leaves_flag_unset() {
        let source = Arc::new(FakeSource {
            offline: true,
            ..Default::default()
        });
        let (mut auth, _store) = gate(&source);

        let err = auth
            .login(&Credentials::new("emilys", "emilyspass"))
            .await
            .unwrap_err();
        assert_eq!(err.user_message(), "Network Error");
        assert!(!auth.is_authenticated());
    }

    #[tokio::test]
    async fn signup_registers_and_logs_in() {
        let source = FakeSource::demo();
        let (mut auth, _store) = gate(&source);

        let outcome = auth
            .signup(&SignupForm::new("newuser1", "secret", "secret"))
            .await
            .unwrap();

        assert_eq!(outcome, LoginOutcome::Authenticated);
        assert!(auth.is_authenticated());
        assert_eq!(
            source.registered.lock().unwrap().as_slice(),
            &[Credentials::new("newuser1", "secret")]
        );
    }

    #[tokio::test]
    async fn signup_requires_matching_passwords() {
        let source = FakeSource::demo();
        let (mut auth, _store) = gate(&source);

        let err = auth
            .signup(&SignupForm::new("newuser1", "secret", "secreT"))
            .await
            .unwrap_err();
        let Error::Validation(errors) = &err else {
            panic!("expected validation error, got {:?}", err);
        };
        assert_eq!(errors.get("confirmPassword"), Some("Passwords must match"));
        assert!(source.registered.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn logout_clears_persisted_flag() {
        let source = FakeSource::demo();
        let (mut auth, store) = gate(&source);
        auth.login(&Credentials::new("emilys", "emilyspass"))
            .await
            .unwrap();

        auth.logout().unwrap();
        assert!(!auth.is_authenticated());
        assert!(auth.require().is_err());
        assert_eq!(store.get(AUTH_KEY).unwrap(), None);
    }

    #[tokio::test]
    async fn memory_only_gate_never_touches_store() {
        let source = FakeSource::demo();
        let (auth, store) = gate(&source);
        let mut auth = auth.with_persistence(false);

        auth.login(&Credentials::new("emilys", "emilyspass"))
            .await
            .unwrap();
        assert!(auth.is_authenticated());
        assert!(store.is_empty());
    }
}
