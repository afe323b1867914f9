//! Process-wide backend selection.
//!
//! Selection happens exactly once per process: the first call to [`init`]
//! attempts the Postgres backend and falls back to in-memory storage on any
//! construction failure (missing `DATABASE_URL`, connection fault, seeding
//! fault). Concurrent first callers share a single selection attempt; the
//! choice is never retried or reversed at runtime.
//!
//! The fallback is the one place a storage fault is deliberately swallowed,
//! and it is always logged.

use std::sync::Arc;

use tokio::sync::OnceCell;

use crate::backend::{SharedStorage, Storage};
use crate::config::StorageConfig;
use crate::memory::MemoryStorage;
use crate::postgres::PgStorage;

static STORAGE: OnceCell<SharedStorage> = OnceCell::const_new();

/// Initialize (or return) the process-wide storage instance.
///
/// Only the first call's `config` is consulted; later calls receive the
/// already-selected backend regardless of what they pass.
pub async fn init(config: StorageConfig) -> SharedStorage {
    STORAGE
        .get_or_init(|| async { select_backend(&config).await })
        .await
        .clone()
}

/// The storage instance, if [`init`] has run.
#[must_use]
pub fn get() -> Option<SharedStorage> {
    STORAGE.get().cloned()
}

/// Choose a backend for the given configuration.
///
/// Tries Postgres first; any construction error selects the in-memory
/// fallback. Unlike [`init`] this performs no process-wide caching, which
/// makes it directly testable.
pub async fn select_backend(config: &StorageConfig) -> SharedStorage {
    match PgStorage::connect(config).await {
        Ok(pg) => {
            tracing::info!(backend = pg.backend_tag(), "using postgres storage");
            Arc::new(pg)
        }
        Err(e) => {
            tracing::warn!(
                error = %e,
                "postgres storage unavailable, falling back to in-memory storage"
            );
            Arc::new(MemoryStorage::new())
        }
    }
}

/// Release the backend's resources. Call once after the shutdown signal;
/// for the Postgres backend this drains and closes the connection pool.
pub async fn shutdown(storage: &SharedStorage) {
    tracing::info!(backend = storage.backend_tag(), "shutting down storage");
    storage.close().await;
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
///
/// Resolves once either signal arrives; callers race their work against
/// this future and then invoke [`shutdown`] so the pool is always drained,
/// interrupted or not.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_select_backend_falls_back_without_database_url() {
        let config = StorageConfig {
            database_url: None,
            ..StorageConfig::default()
        };
        let storage = select_backend(&config).await;
        assert_eq!(storage.backend_tag(), "memory");
    }

    #[tokio::test]
    async fn test_init_returns_the_same_instance() {
        let config = StorageConfig::default();
        let first = init(config.clone()).await;
        let second = init(config).await;
        assert!(Arc::ptr_eq(&first, &second));

        // get() observes the selected backend without re-initializing.
        let observed = get().unwrap();
        assert!(Arc::ptr_eq(&first, &observed));
    }

    #[tokio::test]
    async fn test_shutdown_signal_pends_until_a_signal_arrives() {
        let raced = tokio::time::timeout(
            std::time::Duration::from_millis(50),
            shutdown_signal(),
        )
        .await;
        assert!(raced.is_err());
    }

    #[tokio::test]
    async fn test_shutdown_is_a_noop_for_memory() {
        let config = StorageConfig::default();
        let storage = select_backend(&config).await;
        shutdown(&storage).await;
        // Memory storage stays usable; close() holds no resources.
        assert_eq!(storage.products().await.unwrap().len(), 4);
    }
}
