// Markstash services
// Collaborator clients and ambient infrastructure: crypto at rest, settings,
// the identity client, and the change-notification feed.

pub mod change_feed;
pub mod crypto_service;
pub mod identity_client;
pub mod settings_engine;
