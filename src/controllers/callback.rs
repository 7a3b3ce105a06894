//! Auth callback view controller.
//!
//! The identity provider's external redirect lands here. Mount reads the
//! freshly established session exactly once and routes accordingly; this is
//! the only path that surfaces an `AuthError` to the user, shown for a fixed
//! delay before bailing out to landing.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::controllers::navigator::NavigatorTrait;
use crate::managers::session_store::SessionStore;
use crate::types::route::Route;

/// How long the error message stays on screen before the redirect to
/// landing. Wall-clock, not cancellable.
pub const AUTH_ERROR_REDIRECT_DELAY: Duration = Duration::from_secs(3);

/// What the callback page shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallbackView {
    /// Session check in flight ("Logging you in...").
    Authenticating,
    /// The identity provider failed; shown until the redirect timer fires.
    Error(String),
}

pub struct CallbackController {
    session_store: SessionStore,
    navigator: Arc<dyn NavigatorTrait>,
    view: Mutex<CallbackView>,
}

impl CallbackController {
    pub fn new(session_store: SessionStore, navigator: Arc<dyn NavigatorTrait>) -> Self {
        Self {
            session_store,
            navigator,
            view: Mutex::new(CallbackView::Authenticating),
        }
    }

    /// The currently rendered view. Observable while `mount` is parked on
    /// the error-redirect timer.
    pub fn view(&self) -> CallbackView {
        self.view.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Mount: read the session established by the external redirect.
    ///
    /// - session present: navigate to the bookmark view
    /// - no session: navigate to landing
    /// - provider failure: show the error, wait out the fixed delay,
    ///   then navigate to landing
    pub async fn mount(&self) {
        match self.session_store.current_session_strict() {
            Ok(Some(session)) => {
                log::info!("callback resolved session for user {}", session.user_id);
                self.navigator.navigate(Route::Bookmarks);
            }
            Ok(None) => {
                self.navigator.navigate(Route::Landing);
            }
            Err(e) => {
                log::warn!("auth callback failed: {}", e);
                *self.view.lock().unwrap_or_else(|e| e.into_inner()) =
                    CallbackView::Error(e.to_string());
                tokio::time::sleep(AUTH_ERROR_REDIRECT_DELAY).await;
                self.navigator.navigate(Route::Landing);
            }
        }
    }
}
