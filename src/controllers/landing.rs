//! Landing view controller.
//!
//! Mount checks for an existing session and forwards straight to the
//! bookmark view when one is present; otherwise the page renders the login
//! affordance. The login click starts the external OAuth redirect flow and
//! is terminal for this view.

use std::sync::Arc;

use crate::controllers::navigator::NavigatorTrait;
use crate::managers::session_store::SessionStore;
use crate::types::errors::AuthError;
use crate::types::route::Route;

/// What the landing page shows after mount.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LandingView {
    /// A session already exists; the controller navigated to the bookmark view.
    Redirecting,
    /// No session: render the login button.
    LoginPrompt,
}

pub struct LandingController {
    session_store: SessionStore,
    navigator: Arc<dyn NavigatorTrait>,
}

impl LandingController {
    pub fn new(session_store: SessionStore, navigator: Arc<dyn NavigatorTrait>) -> Self {
        Self {
            session_store,
            navigator,
        }
    }

    /// Mount: query the session store. An already-authenticated user goes
    /// straight to the bookmark view; provider failures read as signed
    /// out here.
    pub fn mount(&self) -> LandingView {
        if self.session_store.current_session().is_some() {
            self.navigator.navigate(Route::Bookmarks);
            LandingView::Redirecting
        } else {
            LandingView::LoginPrompt
        }
    }

    /// Login click: trigger the external OAuth redirect flow with the fixed
    /// return address. Returns the provider URL the host environment must
    /// navigate to.
    pub fn on_login_click(&self) -> Result<String, AuthError> {
        self.session_store.login()
    }
}
