//! Session Store for Markstash.
//!
//! Holds access to the current authenticated identity via the identity
//! provider. The read path is deliberately asymmetric: `current_session`
//! collapses provider failures to "no session" (with a logged warning)
//! for the landing and bookmark views, while `current_session_strict`
//! surfaces the error for the auth callback view.

use std::sync::Arc;

use crate::services::identity_client::{IdentityProviderTrait, SignInRequest};
use crate::types::errors::AuthError;
use crate::types::route::Route;
use crate::types::session::Session;

/// Session store over the identity provider.
#[derive(Clone)]
pub struct SessionStore {
    identity: Arc<dyn IdentityProviderTrait>,
    provider: String,
    site_url: String,
}

impl SessionStore {
    pub fn new(identity: Arc<dyn IdentityProviderTrait>, provider: &str, site_url: &str) -> Self {
        Self {
            identity,
            provider: provider.to_string(),
            site_url: site_url.to_string(),
        }
    }

    /// The fixed return address the provider redirects back to after
    /// external authentication.
    pub fn return_url(&self) -> String {
        format!("{}{}", self.site_url, Route::AuthCallback.path())
    }

    /// Reads the current session, treating any provider failure as
    /// "no session".
    pub fn current_session(&self) -> Option<Session> {
        match self.identity.get_current_session() {
            Ok(session) => session,
            Err(e) => {
                log::warn!("session check failed, treating as signed out: {}", e);
                None
            }
        }
    }

    /// Reads the current session, surfacing provider failures.
    pub fn current_session_strict(&self) -> Result<Option<Session>, AuthError> {
        self.identity.get_current_session()
    }

    /// Triggers the external OAuth redirect flow with the fixed return
    /// address. Returns the provider URL; navigation leaves the page.
    pub fn login(&self) -> Result<String, AuthError> {
        let request = SignInRequest {
            provider: self.provider.clone(),
            redirect_to: self.return_url(),
        };
        self.identity.sign_in_with_provider(&request)
    }

    /// Invalidates the session via the identity provider. The caller
    /// then navigates to landing.
    pub fn logout(&self) -> Result<(), AuthError> {
        self.identity.sign_out()
    }
}
