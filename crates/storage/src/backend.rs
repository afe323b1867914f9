//! The storage contract every backend must satisfy.
//!
//! Callers hold a [`SharedStorage`] handle (selected once at startup, see
//! [`crate::selector`]) and issue operations against this trait. Drafts are
//! assumed pre-validated; entities returned to callers are immutable
//! snapshots - mutating a returned value never affects backend state.

use std::sync::Arc;

use async_trait::async_trait;

use clementine_core::{
    Contact, NewContact, NewOrder, NewProduct, NewSubscriber, NewsletterSubscriber, Order, OrderId,
    OrderStatus, Product, ProductId,
};

use crate::StorageError;

/// The process-wide shared storage handle.
pub type SharedStorage = Arc<dyn Storage>;

/// Storage operations for the storefront.
///
/// Every create/update mutates the backend's authoritative state exactly
/// once per call; no operation has effects outside the backend's own store.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Short identifier for the active backend ("postgres" or "memory"),
    /// used in logs.
    fn backend_tag(&self) -> &'static str;

    /// List all products, ordered by id.
    async fn products(&self) -> Result<Vec<Product>, StorageError>;

    /// Get a product by id. Absence is `Ok(None)`, not an error.
    async fn product(&self, id: ProductId) -> Result<Option<Product>, StorageError>;

    /// Create a product, assigning a fresh id and applying defaults
    /// (`in_stock` defaults to true when the draft omits it).
    async fn create_product(&self, draft: NewProduct) -> Result<Product, StorageError>;

    /// List all orders, ordered by id.
    async fn orders(&self) -> Result<Vec<Order>, StorageError>;

    /// Get an order by id.
    async fn order(&self, id: OrderId) -> Result<Option<Order>, StorageError>;

    /// Capture an order. Status is forced to [`OrderStatus::Pending`] and
    /// `created_at` is assigned by the backend.
    async fn create_order(&self, draft: NewOrder) -> Result<Order, StorageError>;

    /// Replace the status of exactly one order, leaving every other field
    /// untouched. Returns `Ok(None)` when no order has that id.
    async fn update_order_status(
        &self,
        id: OrderId,
        status: OrderStatus,
    ) -> Result<Option<Order>, StorageError>;

    /// List all contact messages, ordered by id.
    async fn contacts(&self) -> Result<Vec<Contact>, StorageError>;

    /// Record a contact message.
    async fn create_contact(&self, draft: NewContact) -> Result<Contact, StorageError>;

    /// List all newsletter subscribers, ordered by id.
    async fn newsletter_subscribers(&self) -> Result<Vec<NewsletterSubscriber>, StorageError>;

    /// Subscribe an email address to the newsletter.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::DuplicateSubscriber`] if the email is
    /// already subscribed; in that case nothing was mutated.
    async fn subscribe_newsletter(
        &self,
        draft: NewSubscriber,
    ) -> Result<NewsletterSubscriber, StorageError>;

    /// Release backend resources. Called exactly once at process shutdown;
    /// a no-op for backends without external resources.
    async fn close(&self) {}
}
