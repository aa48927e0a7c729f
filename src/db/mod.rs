//! SQLite persistence for referrals.

mod repository;
pub mod seed;
mod sqlite;

pub use repository::ReferralRepository;
pub use seed::seed;
pub use sqlite::{open_database, open_memory_database, run_migrations};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// The unique index on `referrals.email` rejected the write.
    #[error("Email already exists")]
    EmailConflict,

    #[error("Migration failed at version {version}: {reason}")]
    MigrationFailed { version: i64, reason: String },

    #[error("Invalid timestamp '{value}' stored for referral {id}")]
    InvalidTimestamp { id: i64, value: String },
}
