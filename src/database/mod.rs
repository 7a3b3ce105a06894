// Markstash database layer
// SQLite connection management and schema migrations.

pub mod connection;
pub mod migrations;

pub use connection::Database;
