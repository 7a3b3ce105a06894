//! Bookmark Repository for Markstash.
//!
//! Implements `BookmarkRepositoryTrait` — per-user bookmark CRUD backed by
//! SQLite via `rusqlite`, plus the change-notification subscription. Writes
//! publish notification-only events on the change feed; ownership is
//! enforced by the `list` query filter, not by client-side checks.

use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use rusqlite::params;
use uuid::Uuid;

use crate::database::Database;
use crate::services::change_feed::{ChangeFeed, SubscriptionHandle};
use crate::types::bookmark::Bookmark;
use crate::types::change::{ChangeEvent, ChangeKind};
use crate::types::errors::RepositoryError;

/// Table the repository operates on; also the change-feed subscription key.
pub const BOOKMARKS_TABLE: &str = "bookmarks";

/// Trait defining bookmark repository operations.
pub trait BookmarkRepositoryTrait {
    /// Lists the user's bookmarks, newest first.
    fn list(&self, user_id: &str) -> Result<Vec<Bookmark>, RepositoryError>;
    /// Inserts one record and returns its assigned id. Title and url
    /// non-emptiness is the caller's responsibility.
    fn add(&self, user_id: &str, title: &str, url: &str) -> Result<String, RepositoryError>;
    /// Removes one record by id. Deleting an id that does not exist is a
    /// no-op, per the backend's delete-by-filter semantics.
    fn delete(&self, id: &str) -> Result<(), RepositoryError>;
    /// Registers interest in every change to the bookmark collection, for
    /// any row and any user. The handle must be released when the owning
    /// view unmounts.
    fn subscribe_to_changes(
        &self,
        callback: Box<dyn Fn(&ChangeEvent) + Send + Sync>,
    ) -> SubscriptionHandle;
}

/// Bookmark repository backed by SQLite and the in-process change feed.
#[derive(Clone)]
pub struct BookmarkRepository {
    db: Arc<Database>,
    feed: Arc<ChangeFeed>,
}

impl BookmarkRepository {
    pub fn new(db: Arc<Database>, feed: Arc<ChangeFeed>) -> Self {
        Self { db, feed }
    }

    fn now() -> i64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs() as i64
    }

    fn row_to_bookmark(row: &rusqlite::Row) -> rusqlite::Result<Bookmark> {
        Ok(Bookmark {
            id: row.get(0)?,
            user_id: row.get(1)?,
            title: row.get(2)?,
            url: row.get(3)?,
            created_at: row.get(4)?,
        })
    }
}

impl BookmarkRepositoryTrait for BookmarkRepository {
    /// Lists bookmarks owned by `user_id`, ordered by creation time
    /// descending. Equal timestamps fall back to insertion order, newest
    /// first, so rapid adds still list deterministically.
    fn list(&self, user_id: &str) -> Result<Vec<Bookmark>, RepositoryError> {
        let conn = self.db.connection();
        let mut stmt = conn
            .prepare(
                "SELECT id, user_id, title, url, created_at FROM bookmarks \
                 WHERE user_id = ?1 ORDER BY created_at DESC, rowid DESC",
            )
            .map_err(|e| RepositoryError::Database(e.to_string()))?;

        let rows = stmt
            .query_map(params![user_id], Self::row_to_bookmark)
            .map_err(|e| RepositoryError::Database(e.to_string()))?;

        let mut results = Vec::new();
        for row in rows {
            results.push(row.map_err(|e| RepositoryError::Database(e.to_string()))?);
        }
        Ok(results)
    }

    /// Adds a new bookmark for the user. Returns the generated bookmark id
    /// and publishes an insert notification.
    fn add(&self, user_id: &str, title: &str, url: &str) -> Result<String, RepositoryError> {
        let id = Uuid::new_v4().to_string();
        let now = Self::now();

        self.db
            .connection()
            .execute(
                "INSERT INTO bookmarks (id, user_id, title, url, created_at) \
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![id, user_id, title, url, now],
            )
            .map_err(|e| RepositoryError::Database(e.to_string()))?;

        self.feed
            .publish(&ChangeEvent::new(BOOKMARKS_TABLE, ChangeKind::Insert));
        Ok(id)
    }

    /// Removes a bookmark by id. Zero affected rows is a success; a delete
    /// notification is published only when a row actually went away.
    fn delete(&self, id: &str) -> Result<(), RepositoryError> {
        let affected = self
            .db
            .connection()
            .execute("DELETE FROM bookmarks WHERE id = ?1", params![id])
            .map_err(|e| RepositoryError::Database(e.to_string()))?;

        if affected > 0 {
            self.feed
                .publish(&ChangeEvent::new(BOOKMARKS_TABLE, ChangeKind::Delete));
        } else {
            log::debug!("delete of missing bookmark {} was a no-op", id);
        }
        Ok(())
    }

    fn subscribe_to_changes(
        &self,
        callback: Box<dyn Fn(&ChangeEvent) + Send + Sync>,
    ) -> SubscriptionHandle {
        self.feed.subscribe(BOOKMARKS_TABLE, callback)
    }
}
