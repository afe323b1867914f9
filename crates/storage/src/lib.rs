//! Storage layer for the Clementine storefront.
//!
//! One contract, two interchangeable backends:
//!
//! - [`PgStorage`] - durable `PostgreSQL` backend (the deployment default)
//! - [`MemoryStorage`] - in-process fallback for local development and tests
//!
//! A process selects its backend exactly once at startup via
//! [`selector::init`]: Postgres if a connection can be established, otherwise
//! the in-memory fallback. The chosen [`SharedStorage`] handle is then passed
//! to every caller for the remainder of the process lifetime.
//!
//! # Error taxonomy
//!
//! - Absence ("no such id") is `Ok(None)`, never an error.
//! - [`StorageError::DuplicateSubscriber`] - newsletter email already taken;
//!   no state was mutated.
//! - [`StorageError::Database`] - the backend could not complete the query;
//!   the only class that warrants caller-level retry.
//! - [`StorageError::Configuration`] - connection configuration missing or
//!   invalid; fatal to Postgres construction and handled by the selector.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod backend;
pub mod config;
pub mod memory;
pub mod postgres;
pub mod seed;
pub mod selector;

use thiserror::Error;

pub use backend::{SharedStorage, Storage};
pub use config::{ConfigError, StorageConfig};
pub use memory::MemoryStorage;
pub use postgres::PgStorage;

/// Errors that can occur during storage operations.
///
/// "Not found" is never an error: read and update operations return
/// `Ok(None)` for unknown ids so callers can always distinguish absence
/// from a fault.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Database error from sqlx. The backend is unavailable or the query
    /// could not complete.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// The email address is already subscribed to the newsletter.
    #[error("email already subscribed: {0}")]
    DuplicateSubscriber(String),

    /// Connection configuration is missing or invalid.
    #[error("configuration error: {0}")]
    Configuration(#[from] ConfigError),
}

impl StorageError {
    /// Whether this error is the newsletter uniqueness violation.
    #[must_use]
    pub const fn is_duplicate_subscriber(&self) -> bool {
        matches!(self, Self::DuplicateSubscriber(_))
    }
}
