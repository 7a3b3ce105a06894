//! App core for Markstash.
//!
//! Central struct wiring settings, database, backend clients, and
//! managers, and constructing the per-page controllers. The context is
//! passed explicitly — there are no module-level singletons.

use std::path::Path;
use std::sync::Arc;

use crate::controllers::bookmarks::BookmarksController;
use crate::controllers::callback::CallbackController;
use crate::controllers::landing::LandingController;
use crate::controllers::navigator::NavigatorTrait;
use crate::database::Database;
use crate::managers::bookmark_repository::BookmarkRepository;
use crate::managers::session_store::SessionStore;
use crate::services::change_feed::ChangeFeed;
use crate::services::identity_client::{IdentityClient, IdentityProviderTrait};
use crate::services::settings_engine::AppSettings;

/// Application context: backend clients plus the managers built on top.
///
/// Controllers are created per page view via the `*_controller` methods and
/// receive their dependencies from here.
pub struct App {
    pub settings: AppSettings,
    pub db: Arc<Database>,
    pub feed: Arc<ChangeFeed>,
    pub identity: Arc<IdentityClient>,
    pub session_store: SessionStore,
    pub repository: BookmarkRepository,
}

impl App {
    /// Creates a new App: opens the database (running migrations) and wires
    /// the identity client, change feed, session store, and repository.
    pub fn new(settings: AppSettings) -> Result<Self, Box<dyn std::error::Error>> {
        if let Some(parent) = Path::new(&settings.database_path).parent() {
            std::fs::create_dir_all(parent)?;
        }
        let db = Arc::new(Database::open(&settings.database_path)?);
        let feed = Arc::new(ChangeFeed::new());

        let identity = Arc::new(
            IdentityClient::new(db.clone(), &settings.authorize_url)
                .map_err(|e| format!("IdentityClient init failed: {}", e))?,
        );

        let session_store = SessionStore::new(
            identity.clone() as Arc<dyn IdentityProviderTrait>,
            &settings.provider,
            &settings.site_url,
        );
        let repository = BookmarkRepository::new(db.clone(), feed.clone());

        Ok(Self {
            settings,
            db,
            feed,
            identity,
            session_store,
            repository,
        })
    }

    /// Startup logging: schema version and configured site origin.
    pub fn startup(&self) {
        let version = crate::database::migrations::get_schema_version(self.db.connection());
        log::info!(
            "markstash ready (schema v{}, site {})",
            version,
            self.settings.site_url
        );
    }

    pub fn landing_controller(&self, navigator: Arc<dyn NavigatorTrait>) -> LandingController {
        LandingController::new(self.session_store.clone(), navigator)
    }

    pub fn callback_controller(&self, navigator: Arc<dyn NavigatorTrait>) -> CallbackController {
        CallbackController::new(self.session_store.clone(), navigator)
    }

    pub fn bookmarks_controller(&self, navigator: Arc<dyn NavigatorTrait>) -> BookmarksController {
        BookmarksController::new(
            self.session_store.clone(),
            Arc::new(self.repository.clone()),
            navigator,
        )
    }
}
