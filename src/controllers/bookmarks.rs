//! Bookmark list view controller.
//!
//! Mount gates on the session, fetches the user's list, and opens the change
//! subscription. Change events only raise an invalidation flag; the refetch
//! happens in a separate `refresh`/`poll_changes` step so invalidation and
//! fetch stay observable as distinct transitions. Failed writes surface as a
//! blocking notice; failed reads are logged and the previous list stays up.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::controllers::navigator::NavigatorTrait;
use crate::managers::bookmark_repository::BookmarkRepositoryTrait;
use crate::managers::session_store::SessionStore;
use crate::services::change_feed::SubscriptionHandle;
use crate::types::bookmark::Bookmark;
use crate::types::route::Route;
use crate::types::session::Session;

/// Placeholder shown when the authenticated user has no bookmarks.
pub const EMPTY_LIST_TEXT: &str = "No bookmarks yet. Add your first bookmark!";

/// Phase of the bookmark view's session-gated state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookmarksPhase {
    /// Session check in flight.
    Loading,
    /// No session; the controller navigated to landing.
    Unauthenticated,
    /// Session present; form and list are rendered.
    Authenticated,
}

/// Renderable state of the bookmark view.
#[derive(Debug, Clone, PartialEq)]
pub struct BookmarksView {
    pub phase: BookmarksPhase,
    pub user: Option<Session>,
    pub bookmarks: Vec<Bookmark>,
    pub title_input: String,
    pub url_input: String,
    /// Blocking notification from the last failed or blocked action.
    pub notice: Option<String>,
}

impl BookmarksView {
    fn new() -> Self {
        Self {
            phase: BookmarksPhase::Loading,
            user: None,
            bookmarks: Vec::new(),
            title_input: String::new(),
            url_input: String::new(),
            notice: None,
        }
    }
}

pub struct BookmarksController {
    session_store: SessionStore,
    repository: Arc<dyn BookmarkRepositoryTrait>,
    navigator: Arc<dyn NavigatorTrait>,
    view: BookmarksView,
    subscription: Option<SubscriptionHandle>,
    stale: Arc<AtomicBool>,
}

impl BookmarksController {
    pub fn new(
        session_store: SessionStore,
        repository: Arc<dyn BookmarkRepositoryTrait>,
        navigator: Arc<dyn NavigatorTrait>,
    ) -> Self {
        Self {
            session_store,
            repository,
            navigator,
            view: BookmarksView::new(),
            subscription: None,
            stale: Arc::new(AtomicBool::new(false)),
        }
    }

    /// The currently rendered view state.
    pub fn view(&self) -> &BookmarksView {
        &self.view
    }

    /// Mount: gate on the session, then load the list and open the change
    /// subscription.
    ///
    /// Without a session the controller navigates to landing before any
    /// repository call. The `Loading` phase clears once the session check
    /// resolves — not once the fetch does — so a brief render with an empty
    /// list is possible.
    pub fn mount(&mut self) {
        self.view.phase = BookmarksPhase::Loading;

        match self.session_store.current_session() {
            None => {
                self.navigator.navigate(Route::Landing);
                self.view.phase = BookmarksPhase::Unauthenticated;
            }
            Some(session) => {
                self.view.user = Some(session);
                self.view.phase = BookmarksPhase::Authenticated;

                let stale = Arc::clone(&self.stale);
                self.subscription = Some(self.repository.subscribe_to_changes(Box::new(
                    move |_event| {
                        stale.store(true, Ordering::SeqCst);
                    },
                )));

                self.refresh();
            }
        }
    }

    /// Whether a change notification has invalidated the rendered list.
    pub fn is_stale(&self) -> bool {
        self.stale.load(Ordering::SeqCst)
    }

    /// Re-queries the list for the current user and clears the invalidation
    /// flag. Read failures are logged and otherwise ignored; the previous
    /// list stays on screen.
    pub fn refresh(&mut self) {
        self.stale.store(false, Ordering::SeqCst);
        let Some(user) = &self.view.user else {
            return;
        };
        match self.repository.list(&user.user_id) {
            Ok(bookmarks) => self.view.bookmarks = bookmarks,
            Err(e) => log::error!("failed to fetch bookmarks: {}", e),
        }
    }

    /// Event-loop tick: refetch only when a change event invalidated the
    /// list since the last fetch.
    pub fn poll_changes(&mut self) {
        if self.is_stale() {
            self.refresh();
        }
    }

    pub fn set_title_input(&mut self, value: &str) {
        self.view.title_input = value.to_string();
    }

    pub fn set_url_input(&mut self, value: &str) {
        self.view.url_input = value.to_string();
    }

    /// Add action: validate both inputs are non-empty, normalize the url
    /// scheme, and insert. Success clears the inputs; failure leaves them
    /// unchanged behind a blocking notice.
    pub fn on_add(&mut self) {
        self.view.notice = None;

        if self.view.title_input.is_empty() || self.view.url_input.is_empty() {
            self.view.notice = Some("Please fill in both title and URL".to_string());
            return;
        }

        let Some(user) = self.view.user.clone() else {
            return;
        };

        let url = normalize_url(&self.view.url_input);
        match self
            .repository
            .add(&user.user_id, &self.view.title_input, &url)
        {
            Ok(_) => {
                self.view.title_input.clear();
                self.view.url_input.clear();
            }
            Err(e) => {
                log::error!("failed to add bookmark: {}", e);
                self.view.notice = Some("Error adding bookmark".to_string());
            }
        }
    }

    /// Delete action. No optimistic removal — the visible list changes only
    /// via the next invalidation-triggered refetch or explicit fetch.
    pub fn on_delete(&mut self, id: &str) {
        self.view.notice = None;

        if let Err(e) = self.repository.delete(id) {
            log::error!("failed to delete bookmark: {}", e);
            self.view.notice = Some("Error deleting bookmark".to_string());
        }
    }

    /// Logout action: invalidate the session, then navigate to landing
    /// unconditionally.
    pub fn on_logout(&mut self) {
        if let Err(e) = self.session_store.logout() {
            log::warn!("logout failed: {}", e);
        }
        self.navigator.navigate(Route::Landing);
    }

    /// Teardown: release the change subscription. Idempotent, and safe to
    /// call even when the view unmounts before the first load completed.
    pub fn unmount(&mut self) {
        if let Some(handle) = self.subscription.take() {
            handle.release();
        }
    }
}

impl Drop for BookmarksController {
    fn drop(&mut self) {
        self.unmount();
    }
}

/// Prepends "https://" when the url lacks an explicit scheme; urls already
/// carrying "http://" or "https://" pass through unchanged.
pub fn normalize_url(url: &str) -> String {
    if url.starts_with("http://") || url.starts_with("https://") {
        url.to_string()
    } else {
        format!("https://{}", url)
    }
}
