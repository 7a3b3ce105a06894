use serde::{Deserialize, Serialize};

/// An authenticated identity bound to the client for the duration of a login.
///
/// Created by the external identity provider on successful sign-in and cached
/// locally until explicit logout or expiry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Session {
    pub user_id: String,
    pub email: String,
    /// Unix seconds after which the session is no longer valid. `None` means
    /// the provider issued no expiry.
    pub expires_at: Option<i64>,
}

impl Session {
    /// Whether the session is still valid at the given unix timestamp.
    pub fn is_valid_at(&self, now: i64) -> bool {
        match self.expires_at {
            Some(expires_at) => now < expires_at,
            None => true,
        }
    }
}
