//! Identity provider client for Markstash.
//!
//! The in-process side of the external OAuth flow: builds the provider
//! authorize URL for sign-in, caches the established session AES-256-GCM
//! encrypted in the single-row `auth_sessions` table, validates expiry on
//! read, and clears the cache on sign-out. The provider itself (the external
//! redirect and token exchange) stays outside this crate.

use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use rusqlite::params;

use crate::database::Database;
use crate::services::crypto_service::{CryptoService, CryptoServiceTrait};
use crate::types::crypto::EncryptedData;
use crate::types::errors::{AuthError, CryptoError};
use crate::types::session::Session;

/// Internal session-cache encryption key derived from a fixed identifier.
/// In production this would use a machine-specific identifier; for now a
/// fixed passphrase + salt.
const SESSION_KEY_PASSPHRASE: &str = "markstash-session-key-v1";
const SESSION_KEY_SALT: &[u8] = b"markstash-sess01";

/// Random bytes in the OAuth state token.
const STATE_TOKEN_BYTES: usize = 16;

/// A sign-in request forwarded to the external provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignInRequest {
    pub provider: String,
    pub redirect_to: String,
}

/// Trait defining the identity provider contract.
///
/// The provider emits no typed error distinctions beyond a message string.
pub trait IdentityProviderTrait {
    /// Reads the currently established session, if any. An expired cached
    /// session reads as `None`.
    fn get_current_session(&self) -> Result<Option<Session>, AuthError>;

    /// Starts the external OAuth redirect flow. Returns the provider URL the
    /// host environment must navigate to; no navigation happens in-process.
    fn sign_in_with_provider(&self, request: &SignInRequest) -> Result<String, AuthError>;

    /// Invalidates the current session.
    fn sign_out(&self) -> Result<(), AuthError>;
}

/// Identity client backed by SQLite + CryptoService.
pub struct IdentityClient {
    db: Arc<Database>,
    crypto: CryptoService,
    encryption_key: Vec<u8>,
    authorize_url: String,
}

impl IdentityClient {
    /// Creates a new IdentityClient.
    ///
    /// Derives the session-cache encryption key on construction.
    pub fn new(db: Arc<Database>, authorize_url: &str) -> Result<Self, CryptoError> {
        let crypto = CryptoService::new();
        let encryption_key = crypto.derive_key(SESSION_KEY_PASSPHRASE, SESSION_KEY_SALT)?;

        Ok(Self {
            db,
            crypto,
            encryption_key,
            authorize_url: authorize_url.to_string(),
        })
    }

    fn now() -> i64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs() as i64
    }

    /// Persists a session established by the external provider.
    ///
    /// This is the step the hosted platform's SDK performs after the provider
    /// redirect lands: serialize, encrypt, and upsert the single cache row.
    pub fn establish_session(&self, session: &Session) -> Result<(), AuthError> {
        let json = serde_json::to_vec(session).map_err(|e| AuthError::Storage(e.to_string()))?;

        let encrypted = self
            .crypto
            .encrypt_aes256gcm(&json, &self.encryption_key)
            .map_err(|e| AuthError::Crypto(e.to_string()))?;

        self.db
            .connection()
            .execute(
                "INSERT OR REPLACE INTO auth_sessions (id, encrypted_session, iv, auth_tag, updated_at) \
                 VALUES ('current', ?1, ?2, ?3, ?4)",
                params![encrypted.ciphertext, encrypted.iv, encrypted.auth_tag, Self::now()],
            )
            .map_err(|e| AuthError::Storage(e.to_string()))?;

        log::info!("session established for user {}", session.user_id);
        Ok(())
    }
}

impl Drop for IdentityClient {
    fn drop(&mut self) {
        self.crypto.zeroize_memory(&mut self.encryption_key);
    }
}

impl IdentityProviderTrait for IdentityClient {
    fn get_current_session(&self) -> Result<Option<Session>, AuthError> {
        let conn = self.db.connection();

        let result = conn.query_row(
            "SELECT encrypted_session, iv, auth_tag FROM auth_sessions WHERE id = 'current'",
            [],
            |row| {
                Ok(EncryptedData {
                    ciphertext: row.get(0)?,
                    iv: row.get(1)?,
                    auth_tag: row.get(2)?,
                })
            },
        );

        match result {
            Ok(encrypted) => {
                let json = self
                    .crypto
                    .decrypt_aes256gcm(&encrypted, &self.encryption_key)
                    .map_err(|e| AuthError::Crypto(e.to_string()))?;

                let session: Session = serde_json::from_slice(&json)
                    .map_err(|e| AuthError::Storage(e.to_string()))?;

                if !session.is_valid_at(Self::now()) {
                    // Expired: drop the cache row and report no session.
                    self.sign_out()?;
                    return Ok(None);
                }

                Ok(Some(session))
            }
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(AuthError::Storage(e.to_string())),
        }
    }

    fn sign_in_with_provider(&self, request: &SignInRequest) -> Result<String, AuthError> {
        let state = URL_SAFE_NO_PAD.encode(self.crypto.generate_random_bytes(STATE_TOKEN_BYTES));
        let url = format!(
            "{}?provider={}&redirect_to={}&state={}",
            self.authorize_url, request.provider, request.redirect_to, state
        );

        log::info!("starting sign-in with provider {}", request.provider);
        Ok(url)
    }

    fn sign_out(&self) -> Result<(), AuthError> {
        self.db
            .connection()
            .execute("DELETE FROM auth_sessions", [])
            .map_err(|e| AuthError::Storage(e.to_string()))?;
        Ok(())
    }
}
