//! Session manager
//!
//! Owns the console's authentication state. State is rebuilt from persisted
//! storage once per load and changes only through login and logout.

use tracing::{error, info, instrument, warn};

use super::notify::Notifier;
use super::route::Route;
use super::storage::{
    SessionStorage, IMAGE_KEY, REFRESH_TOKEN_KEY, SESSION_KEY, TOKEN_KEY, USER_ID_KEY,
    USER_INFO_KEY, USER_NAME_KEY, USER_TYPE_KEY,
};
use crate::api::Authenticator;
use crate::error::{Error, Result};
use crate::models::{
    Identity, LoginForm, LoginResponse, PersistedSession, SessionState, SESSION_SCHEMA_VERSION,
};

/// Result of a logout
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogoutOutcome {
    pub success: bool,
    pub error: Option<String>,
    pub redirect: Route,
}

pub struct SessionManager<S, N> {
    storage: S,
    notifier: N,
    state: SessionState,
}

impl<S: SessionStorage, N: Notifier> SessionManager<S, N> {
    pub fn new(storage: S, notifier: N) -> Self {
        Self {
            storage,
            notifier,
            state: SessionState::Unverified,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn identity(&self) -> Option<&Identity> {
        self.state.identity()
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.is_valid()
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    /// Rebuild state from persisted data
    ///
    /// Returns the redirect to follow, if any. Only the first call per load
    /// reads storage.
    #[instrument(skip(self))]
    pub fn verify_session(&mut self) -> Option<Route> {
        if self.state != SessionState::Unverified {
            return (!self.state.is_valid()).then_some(Route::Login);
        }

        match self.read_session() {
            Ok(Some(identity)) => {
                info!(user_id = identity.id, username = %identity.username, "Session restored");
                self.state = SessionState::Valid(identity);
                None
            }
            Ok(None) => {
                self.notifier
                    .show_error_message("Sorry", "Session has Expired!");
                self.invalidate();
                Some(Route::Login)
            }
            Err(e) => {
                warn!(error = %e, "Session validation failed");
                self.notifier
                    .show_error_message("Error", "Session validation failed!");
                self.invalidate();
                Some(Route::Login)
            }
        }
    }

    /// Identity from the consolidated record, falling back to legacy keys
    fn read_session(&self) -> Result<Option<Identity>> {
        if let Some(raw) = self.storage.get(SESSION_KEY)? {
            let session: PersistedSession = serde_json::from_str(&raw)
                .map_err(|e| Error::Parse(format!("session record: {}", e)))?;
            if session.version != SESSION_SCHEMA_VERSION {
                return Err(Error::Parse(format!(
                    "unsupported session version {}",
                    session.version
                )));
            }
            if session.token.access.is_empty() {
                return Ok(None);
            }
            return Ok(Some(session.identity));
        }

        let token = self.storage.get(TOKEN_KEY)?.filter(|t| !t.is_empty());
        let user_info = self.storage.get(USER_INFO_KEY)?.filter(|u| !u.is_empty());
        match (token, user_info) {
            (Some(_), Some(blob)) => {
                let identity = serde_json::from_str(&blob)
                    .map_err(|e| Error::Parse(format!("userInfo: {}", e)))?;
                Ok(Some(identity))
            }
            _ => Ok(None),
        }
    }

    fn invalidate(&mut self) {
        if let Err(e) = self.storage.clear() {
            error!(error = %e, "Failed to clear session storage");
        }
        self.state = SessionState::Invalid;
    }

    /// Authenticate and persist a new session
    ///
    /// On success the form's text fields are cleared and the dashboard route
    /// is returned. On failure the state is unchanged and the caller stays
    /// on the login view.
    #[instrument(skip(self, authenticator, form), fields(username = %form.username))]
    pub fn login<A>(&mut self, authenticator: &A, form: &mut LoginForm) -> Result<Route>
    where
        A: Authenticator + ?Sized,
    {
        let outcome = authenticator
            .authenticate(&form.credentials())
            .and_then(|response| self.persist(&response).map(|_| response));

        match outcome {
            Ok(response) => {
                self.notifier
                    .show_success_message("Welcome", "Logged in Successfully");
                info!(user_id = response.id, "Logged in");
                self.state = SessionState::Valid(response.identity());
                form.clear();
                Ok(Route::Home)
            }
            Err(e) => {
                self.notifier.show_error_message("Login Failed", &e.notice());
                Err(e)
            }
        }
    }

    fn persist(&mut self, response: &LoginResponse) -> Result<()> {
        let record = PersistedSession::new(response.token.clone(), response.identity());
        let entries = [
            (SESSION_KEY, serde_json::to_string(&record)?),
            (TOKEN_KEY, response.token.access.clone()),
            (REFRESH_TOKEN_KEY, response.token.refresh.clone()),
            (USER_ID_KEY, response.id.to_string()),
            (USER_NAME_KEY, response.username.clone()),
            (USER_TYPE_KEY, response.user_type.display_name().to_string()),
            (IMAGE_KEY, response.image.clone().unwrap_or_default()),
            (USER_INFO_KEY, serde_json::to_string(response)?),
        ];
        self.storage.set_many(&entries)
    }

    /// Drop the session; the state is `Invalid` afterwards in every case
    #[instrument(skip(self))]
    pub fn logout(&mut self) -> LogoutOutcome {
        let cleared = self.storage.clear();
        self.state = SessionState::Invalid;

        match cleared {
            Ok(()) => {
                info!("Logged out");
                LogoutOutcome {
                    success: true,
                    error: None,
                    redirect: Route::Login,
                }
            }
            Err(e) => {
                error!(error = %e, "Logout error");
                LogoutOutcome {
                    success: false,
                    error: Some(e.to_string()),
                    redirect: Route::Login,
                }
            }
        }
    }

    fn stored(&self, key: &str) -> Result<bool> {
        Ok(self.storage.get(key)?.is_some_and(|v| !v.is_empty()))
    }

    /// Whether a token is persisted, regardless of verified state
    pub fn has_token(&self) -> bool {
        let found = match self.stored(TOKEN_KEY) {
            Ok(true) => Ok(true),
            Ok(false) => self.stored(SESSION_KEY),
            Err(e) => Err(e),
        };
        found.unwrap_or_else(|e| {
            warn!(error = %e, "Token lookup failed");
            false
        })
    }

    /// Login view guard: send an already signed-in user to the dashboard
    pub fn redirect_if_authenticated(&self) -> Option<Route> {
        self.has_token().then_some(Route::Home)
    }

    /// Route actually shown when `route` is requested
    pub fn guard(&self, route: Route) -> Route {
        if route.is_public() {
            return route;
        }
        if !self.has_token() {
            return Route::Login;
        }
        match self.identity().and_then(|i| i.user_type) {
            Some(role) if !route.allows(role) => {
                warn!(route = %route, role = %role, "Section not available to role");
                Route::Home
            }
            _ => route,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::MockApi;
    use crate::models::{Credentials, UserType};
    use crate::session::notify::{MemoryNotifier, NoticeKind};
    use crate::session::storage::{MemoryStorage, SESSION_KEYS};
    use crate::store::DataStore;

    fn manager(storage: MemoryStorage) -> SessionManager<MemoryStorage, MemoryNotifier> {
        SessionManager::new(storage, MemoryNotifier::new())
    }

    /// Storage whose writes always fail
    struct BrokenStorage;

    impl SessionStorage for BrokenStorage {
        fn get(&self, _key: &str) -> Result<Option<String>> {
            Err(Error::Storage("disk unavailable".to_string()))
        }

        fn set_many(&mut self, _entries: &[(&str, String)]) -> Result<()> {
            Err(Error::Storage("disk unavailable".to_string()))
        }

        fn remove(&mut self, _key: &str) -> Result<()> {
            Err(Error::Storage("disk unavailable".to_string()))
        }

        fn clear(&mut self) -> Result<()> {
            Err(Error::Storage("disk unavailable".to_string()))
        }

        fn keys(&self) -> Result<Vec<String>> {
            Ok(Vec::new())
        }
    }

    /// Authenticator that rejects everyone
    struct Rejecting;

    impl Authenticator for Rejecting {
        fn authenticate(&self, _credentials: &Credentials) -> Result<LoginResponse> {
            Err(Error::InvalidCredentials)
        }
    }

    #[test]
    fn test_verify_legacy_session() {
        let storage = MemoryStorage::with_entries([
            (TOKEN_KEY, "t1"),
            (USER_INFO_KEY, r#"{"id":1,"username":"john"}"#),
        ]);
        let mut manager = manager(storage);

        assert_eq!(manager.verify_session(), None);
        let identity = manager.identity().unwrap();
        assert_eq!(identity.id, 1);
        assert_eq!(identity.username, "john");
        assert!(manager.notifier().notices().is_empty());
    }

    #[test]
    fn test_verify_blank_username() {
        let storage = MemoryStorage::with_entries([
            (TOKEN_KEY, "t1"),
            (USER_INFO_KEY, r#"{"id":1,"username":""}"#),
        ]);
        let mut manager = manager(storage);

        assert_eq!(manager.verify_session(), None);
        assert_eq!(manager.identity().unwrap().username, "");
        assert!(manager.notifier().notices().is_empty());
    }

    #[test]
    fn test_verify_unknown_role() {
        let storage = MemoryStorage::with_entries([
            (TOKEN_KEY, "t1"),
            (USER_INFO_KEY, r#"{"id":1,"username":"john","user_type":"Employee"}"#),
        ]);
        let mut manager = manager(storage);

        assert_eq!(manager.verify_session(), None);
        let identity = manager.identity().unwrap();
        assert_eq!(identity.username, "john");
        assert!(identity.user_type.is_none());
        assert_eq!(manager.storage().len(), 2);
    }

    #[test]
    fn test_verify_token_without_user_info() {
        let mut manager = manager(MemoryStorage::with_entries([(TOKEN_KEY, "t1")]));

        assert_eq!(manager.verify_session(), Some(Route::Login));
        assert_eq!(manager.state(), &SessionState::Invalid);
        assert!(manager.storage().is_empty());

        let notice = manager.notifier().last().unwrap();
        assert_eq!(notice.kind, NoticeKind::Error);
        assert_eq!(notice.title, "Sorry");
        assert_eq!(notice.body, "Session has Expired!");
    }

    #[test]
    fn test_verify_empty_storage() {
        let mut manager = manager(MemoryStorage::new());
        assert_eq!(manager.verify_session(), Some(Route::Login));
        assert_eq!(manager.state(), &SessionState::Invalid);
    }

    #[test]
    fn test_verify_malformed_user_info() {
        let storage =
            MemoryStorage::with_entries([(TOKEN_KEY, "t1"), (USER_INFO_KEY, "not json")]);
        let mut manager = manager(storage);

        assert_eq!(manager.verify_session(), Some(Route::Login));
        assert!(manager.storage().is_empty());
        let notice = manager.notifier().last().unwrap();
        assert_eq!(notice.title, "Error");
        assert_eq!(notice.body, "Session validation failed!");
    }

    #[test]
    fn test_verify_malformed_session_record() {
        let storage = MemoryStorage::with_entries([
            (SESSION_KEY, "{broken"),
            (TOKEN_KEY, "t1"),
            (USER_INFO_KEY, r#"{"id":1,"username":"john"}"#),
        ]);
        let mut manager = manager(storage);

        assert_eq!(manager.verify_session(), Some(Route::Login));
        assert_eq!(manager.state(), &SessionState::Invalid);
    }

    #[test]
    fn test_verify_prefers_session_record() {
        let record = PersistedSession::new(
            crate::models::TokenPair {
                access: "a".to_string(),
                refresh: "r".to_string(),
            },
            Identity {
                id: 11,
                username: "security1".to_string(),
                user_type: Some(UserType::SecurityGuard),
                image: None,
            },
        );
        let raw = serde_json::to_string(&record).unwrap();
        let storage = MemoryStorage::with_entries([
            (SESSION_KEY, raw.as_str()),
            (TOKEN_KEY, "t1"),
            (USER_INFO_KEY, r#"{"id":1,"username":"john"}"#),
        ]);
        let mut manager = manager(storage);

        assert_eq!(manager.verify_session(), None);
        assert_eq!(manager.identity().unwrap().username, "security1");
    }

    #[test]
    fn test_verify_runs_once() {
        let mut manager = manager(MemoryStorage::new());
        assert_eq!(manager.verify_session(), Some(Route::Login));
        assert_eq!(manager.verify_session(), Some(Route::Login));
        assert_eq!(manager.notifier().notices().len(), 1);
    }

    #[test]
    fn test_verify_storage_failure() {
        let mut manager = SessionManager::new(BrokenStorage, MemoryNotifier::new());
        assert_eq!(manager.verify_session(), Some(Route::Login));
        assert_eq!(manager.state(), &SessionState::Invalid);
        assert_eq!(manager.notifier().last().unwrap().title, "Error");
    }

    #[test]
    fn test_login_admin_any_password() {
        let mut store = DataStore::seeded();
        let api = MockApi::new(&mut store);
        let mut manager = manager(MemoryStorage::new());
        manager.verify_session();

        let mut form = LoginForm::new("admin", "whatever");
        let route = manager.login(&api, &mut form).unwrap();

        assert_eq!(route, Route::Home);
        assert!(form.username.is_empty());
        assert!(form.password.is_empty());

        let identity = manager.identity().unwrap();
        assert_eq!(identity.id, 1);
        assert_eq!(identity.user_type, Some(UserType::Admin));

        for key in SESSION_KEYS {
            assert!(
                manager.storage().get(key).unwrap().is_some(),
                "{} not persisted",
                key
            );
        }
        assert_eq!(
            manager.storage().get(USER_TYPE_KEY).unwrap().as_deref(),
            Some("Admin")
        );

        let notice = manager.notifier().last().unwrap();
        assert_eq!(notice.kind, NoticeKind::Success);
        assert_eq!(notice.title, "Welcome");
    }

    #[test]
    fn test_login_persists_for_next_load() {
        let mut store = DataStore::seeded();
        let api = MockApi::new(&mut store);
        let mut first = manager(MemoryStorage::new());
        first.login(&api, &mut LoginForm::new("john", "")).unwrap();

        let mut second = manager(first.storage().clone());
        assert_eq!(second.verify_session(), None);
        assert_eq!(second.identity().unwrap().username, "john");
    }

    #[test]
    fn test_login_unknown_user() {
        let mut store = DataStore::seeded();
        let api = MockApi::new(&mut store);
        let mut manager = manager(MemoryStorage::new());
        manager.verify_session();

        let mut form = LoginForm::new("nope", "x");
        let err = manager.login(&api, &mut form).unwrap_err();

        assert!(matches!(err, Error::InvalidCredentials));
        assert_eq!(manager.state(), &SessionState::Invalid);
        assert_eq!(form.username, "nope");
        assert!(manager.storage().is_empty());
        assert_eq!(manager.notifier().last().unwrap().title, "Login Failed");
    }

    #[test]
    fn test_login_failure_keeps_valid_state() {
        let storage = MemoryStorage::with_entries([
            (TOKEN_KEY, "t1"),
            (USER_INFO_KEY, r#"{"id":1,"username":"john"}"#),
        ]);
        let mut manager = manager(storage);
        manager.verify_session();

        assert!(manager.login(&Rejecting, &mut LoginForm::default()).is_err());
        assert!(manager.is_authenticated());
    }

    #[test]
    fn test_login_storage_failure() {
        let mut store = DataStore::seeded();
        let api = MockApi::new(&mut store);
        let mut manager = SessionManager::new(BrokenStorage, MemoryNotifier::new());

        let err = manager
            .login(&api, &mut LoginForm::new("admin", ""))
            .unwrap_err();
        assert!(matches!(err, Error::Storage(_)));
        assert!(!manager.is_authenticated());
        assert_eq!(manager.notifier().last().unwrap().title, "Login Failed");
    }

    #[test]
    fn test_logout_clears_everything() {
        let mut store = DataStore::seeded();
        let api = MockApi::new(&mut store);
        let mut manager = manager(MemoryStorage::new());
        manager.login(&api, &mut LoginForm::new("admin", "")).unwrap();

        let outcome = manager.logout();
        assert!(outcome.success);
        assert_eq!(outcome.redirect, Route::Login);
        assert_eq!(manager.state(), &SessionState::Invalid);
        for key in SESSION_KEYS {
            assert!(manager.storage().get(key).unwrap().is_none());
        }
    }

    #[test]
    fn test_logout_when_already_invalid() {
        let mut manager = manager(MemoryStorage::new());
        manager.verify_session();

        let outcome = manager.logout();
        assert!(outcome.success);
        assert_eq!(manager.state(), &SessionState::Invalid);
    }

    #[test]
    fn test_logout_storage_failure() {
        let mut manager = SessionManager::new(BrokenStorage, MemoryNotifier::new());
        let outcome = manager.logout();

        assert!(!outcome.success);
        assert!(outcome.error.unwrap().contains("disk unavailable"));
        assert_eq!(manager.state(), &SessionState::Invalid);
    }

    #[test]
    fn test_guards() {
        let mut store = DataStore::seeded();
        let api = MockApi::new(&mut store);
        let mut manager = manager(MemoryStorage::new());
        manager.verify_session();

        assert_eq!(manager.redirect_if_authenticated(), None);
        assert_eq!(manager.guard(Route::Visitors), Route::Login);
        assert_eq!(manager.guard(Route::Login), Route::Login);

        manager
            .login(&api, &mut LoginForm::new("security1", ""))
            .unwrap();
        assert_eq!(manager.redirect_if_authenticated(), Some(Route::Home));
        assert_eq!(manager.guard(Route::Visitors), Route::Visitors);
        assert_eq!(manager.guard(Route::Users), Route::Home);
    }
}
