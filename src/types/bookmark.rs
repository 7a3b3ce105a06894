use serde::{Deserialize, Serialize};

/// A user-owned bookmark record.
///
/// Read-only after creation except for deletion. The `id` is assigned by the
/// repository at insert time; `user_id` is the opaque identity of the owner.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Bookmark {
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub url: String,
    pub created_at: i64,
}
