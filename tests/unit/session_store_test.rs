//! Unit tests for the SessionStore over a stub identity provider.
//!
//! The silent read collapses provider failures to "no session"; the
//! strict read (used by the auth callback) surfaces them.

use std::sync::{Arc, Mutex};

use markstash::managers::session_store::SessionStore;
use markstash::services::identity_client::{IdentityProviderTrait, SignInRequest};
use markstash::types::errors::AuthError;
use markstash::types::session::Session;

/// Identity provider stub with scriptable session state and failure mode.
struct StubIdentity {
    session: Mutex<Option<Session>>,
    fail: bool,
    sign_in_requests: Mutex<Vec<SignInRequest>>,
}

impl StubIdentity {
    fn signed_out() -> Self {
        Self {
            session: Mutex::new(None),
            fail: false,
            sign_in_requests: Mutex::new(Vec::new()),
        }
    }

    fn signed_in(session: Session) -> Self {
        Self {
            session: Mutex::new(Some(session)),
            ..Self::signed_out()
        }
    }

    fn failing() -> Self {
        Self {
            fail: true,
            ..Self::signed_out()
        }
    }
}

impl IdentityProviderTrait for StubIdentity {
    fn get_current_session(&self) -> Result<Option<Session>, AuthError> {
        if self.fail {
            return Err(AuthError::Provider("stubbed transport failure".to_string()));
        }
        Ok(self.session.lock().unwrap().clone())
    }

    fn sign_in_with_provider(&self, request: &SignInRequest) -> Result<String, AuthError> {
        self.sign_in_requests.lock().unwrap().push(request.clone());
        Ok(format!(
            "https://id.example.com/oauth/authorize?redirect_to={}",
            request.redirect_to
        ))
    }

    fn sign_out(&self) -> Result<(), AuthError> {
        *self.session.lock().unwrap() = None;
        Ok(())
    }
}

fn demo_session() -> Session {
    Session {
        user_id: "user-1".to_string(),
        email: "user@example.com".to_string(),
        expires_at: None,
    }
}

fn store_over(identity: Arc<StubIdentity>) -> SessionStore {
    SessionStore::new(identity, "google", "http://localhost:3000")
}

#[test]
fn test_current_session_returns_established_session() {
    let store = store_over(Arc::new(StubIdentity::signed_in(demo_session())));
    assert_eq!(store.current_session(), Some(demo_session()));
}

#[test]
fn test_current_session_collapses_failure_to_none() {
    let store = store_over(Arc::new(StubIdentity::failing()));
    assert_eq!(store.current_session(), None);
}

#[test]
fn test_strict_read_surfaces_failure() {
    let store = store_over(Arc::new(StubIdentity::failing()));
    let result = store.current_session_strict();
    assert!(matches!(result, Err(AuthError::Provider(_))));
}

#[test]
fn test_strict_read_passes_through_session() {
    let store = store_over(Arc::new(StubIdentity::signed_in(demo_session())));
    assert_eq!(store.current_session_strict().unwrap(), Some(demo_session()));
}

#[test]
fn test_login_uses_fixed_return_address() {
    let identity = Arc::new(StubIdentity::signed_out());
    let store = store_over(identity.clone());

    store.login().unwrap();

    let requests = identity.sign_in_requests.lock().unwrap();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].provider, "google");
    assert_eq!(
        requests[0].redirect_to,
        "http://localhost:3000/auth/callback"
    );
}

#[test]
fn test_return_url_joins_site_and_callback_path() {
    let store = store_over(Arc::new(StubIdentity::signed_out()));
    assert_eq!(store.return_url(), "http://localhost:3000/auth/callback");
}

#[test]
fn test_logout_invalidates_session() {
    let identity = Arc::new(StubIdentity::signed_in(demo_session()));
    let store = store_over(identity.clone());

    store.logout().unwrap();
    assert!(identity.session.lock().unwrap().is_none());
}
