//! In-memory fallback backend.
//!
//! Four keyed collections plus four monotonic id counters behind one
//! `RwLock`. Every operation takes the lock for its whole critical section,
//! so no caller can observe a partially-applied mutation. Reads return
//! snapshots; mutating a returned entity never touches backend state.
//!
//! Construction seeds the first [`crate::seed::MEMORY_SEED_COUNT`] demo
//! products through the same insertion path as `create_product`, so seeded
//! ids and defaults follow the normal rules (ids 1..=4 on a fresh instance).

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use clementine_core::{
    Contact, ContactId, NewContact, NewOrder, NewProduct, NewSubscriber, NewsletterSubscriber,
    Order, OrderId, OrderStatus, Product, ProductId, SubscriberId,
};

use crate::backend::Storage;
use crate::{StorageError, seed};

struct MemState {
    products: HashMap<i32, Product>,
    orders: HashMap<i32, Order>,
    contacts: HashMap<i32, Contact>,
    subscribers: HashMap<i32, NewsletterSubscriber>,
    next_product_id: i32,
    next_order_id: i32,
    next_contact_id: i32,
    next_subscriber_id: i32,
}

impl MemState {
    fn new() -> Self {
        Self {
            products: HashMap::new(),
            orders: HashMap::new(),
            contacts: HashMap::new(),
            subscribers: HashMap::new(),
            next_product_id: 1,
            next_order_id: 1,
            next_contact_id: 1,
            next_subscriber_id: 1,
        }
    }

    fn insert_product(&mut self, draft: NewProduct) -> Product {
        let id = self.next_product_id;
        self.next_product_id += 1;
        let product = Product {
            id: ProductId::new(id),
            name: draft.name,
            description: draft.description,
            price: draft.price,
            original_price: draft.original_price,
            image_url: draft.image_url,
            category: draft.category,
            rating: draft.rating,
            in_stock: draft.in_stock.unwrap_or(true),
        };
        self.products.insert(id, product.clone());
        product
    }
}

/// Map-based storage backend. Holds nothing durable; state lives for the
/// process lifetime only.
pub struct MemoryStorage {
    state: RwLock<MemState>,
}

impl MemoryStorage {
    /// Create a fresh backend seeded with the small demo catalog.
    #[must_use]
    pub fn new() -> Self {
        let mut state = MemState::new();
        for draft in seed::demo_catalog()
            .into_iter()
            .take(seed::MEMORY_SEED_COUNT)
        {
            state.insert_product(draft);
        }
        Self {
            state: RwLock::new(state),
        }
    }
}

impl Default for MemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

/// Snapshot a keyed collection in id order.
fn snapshot<T: Clone>(map: &HashMap<i32, T>) -> Vec<T> {
    let mut ids: Vec<i32> = map.keys().copied().collect();
    ids.sort_unstable();
    ids.iter().filter_map(|id| map.get(id).cloned()).collect()
}

#[async_trait]
impl Storage for MemoryStorage {
    fn backend_tag(&self) -> &'static str {
        "memory"
    }

    async fn products(&self) -> Result<Vec<Product>, StorageError> {
        let state = self.state.read().await;
        Ok(snapshot(&state.products))
    }

    async fn product(&self, id: ProductId) -> Result<Option<Product>, StorageError> {
        let state = self.state.read().await;
        Ok(state.products.get(&id.as_i32()).cloned())
    }

    async fn create_product(&self, draft: NewProduct) -> Result<Product, StorageError> {
        let mut state = self.state.write().await;
        Ok(state.insert_product(draft))
    }

    async fn orders(&self) -> Result<Vec<Order>, StorageError> {
        let state = self.state.read().await;
        Ok(snapshot(&state.orders))
    }

    async fn order(&self, id: OrderId) -> Result<Option<Order>, StorageError> {
        let state = self.state.read().await;
        Ok(state.orders.get(&id.as_i32()).cloned())
    }

    async fn create_order(&self, draft: NewOrder) -> Result<Order, StorageError> {
        let mut state = self.state.write().await;
        let id = state.next_order_id;
        state.next_order_id += 1;
        let order = Order {
            id: OrderId::new(id),
            first_name: draft.first_name,
            last_name: draft.last_name,
            email: draft.email,
            phone: draft.phone,
            address: draft.address,
            city: draft.city,
            state: draft.state,
            zip_code: draft.zip_code,
            country: draft.country,
            payment_method: draft.payment_method,
            notes: draft.notes,
            items: draft.items,
            subtotal: draft.subtotal,
            discount: draft.discount,
            tax: draft.tax,
            shipping: draft.shipping,
            total: draft.total,
            status: OrderStatus::Pending,
            created_at: Utc::now(),
        };
        state.orders.insert(id, order.clone());
        Ok(order)
    }

    async fn update_order_status(
        &self,
        id: OrderId,
        status: OrderStatus,
    ) -> Result<Option<Order>, StorageError> {
        let mut state = self.state.write().await;
        Ok(state.orders.get_mut(&id.as_i32()).map(|order| {
            order.status = status;
            order.clone()
        }))
    }

    async fn contacts(&self) -> Result<Vec<Contact>, StorageError> {
        let state = self.state.read().await;
        Ok(snapshot(&state.contacts))
    }

    async fn create_contact(&self, draft: NewContact) -> Result<Contact, StorageError> {
        let mut state = self.state.write().await;
        let id = state.next_contact_id;
        state.next_contact_id += 1;
        let contact = Contact {
            id: ContactId::new(id),
            name: draft.name,
            email: draft.email,
            phone: draft.phone,
            subject: draft.subject,
            message: draft.message,
            created_at: Utc::now(),
        };
        state.contacts.insert(id, contact.clone());
        Ok(contact)
    }

    async fn newsletter_subscribers(&self) -> Result<Vec<NewsletterSubscriber>, StorageError> {
        let state = self.state.read().await;
        Ok(snapshot(&state.subscribers))
    }

    async fn subscribe_newsletter(
        &self,
        draft: NewSubscriber,
    ) -> Result<NewsletterSubscriber, StorageError> {
        let mut state = self.state.write().await;

        // Check-then-insert is atomic here: the write lock is held across both.
        if state.subscribers.values().any(|s| s.email == draft.email) {
            return Err(StorageError::DuplicateSubscriber(
                draft.email.into_inner(),
            ));
        }

        let id = state.next_subscriber_id;
        state.next_subscriber_id += 1;
        let subscriber = NewsletterSubscriber {
            id: SubscriberId::new(id),
            email: draft.email,
            name: draft.name,
            subscribed: true,
            created_at: Utc::now(),
        };
        state.subscribers.insert(id, subscriber.clone());
        Ok(subscriber)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_fresh_backend_seeds_four_products() {
        let storage = MemoryStorage::new();
        let products = storage.products().await.unwrap();
        assert_eq!(products.len(), 4);
        let ids: Vec<i32> = products.iter().map(|p| p.id.as_i32()).collect();
        assert_eq!(ids, vec![1, 2, 3, 4]);
    }

    #[tokio::test]
    async fn test_seeded_products_follow_draft_defaults() {
        let storage = MemoryStorage::new();
        let products = storage.products().await.unwrap();
        assert!(products.iter().all(|p| p.in_stock));
        // Rating passes through from the draft unchanged on this backend.
        assert!(products.iter().all(|p| p.rating.is_some()));
    }

    #[tokio::test]
    async fn test_ids_are_monotonic_per_entity_set() {
        let storage = MemoryStorage::new();

        let contact = storage
            .create_contact(NewContact {
                name: "Ada".to_owned(),
                email: "ada@example.com".parse().unwrap(),
                phone: None,
                subject: "Hello".to_owned(),
                message: "Just saying hi".to_owned(),
            })
            .await
            .unwrap();

        // Contact ids start at 1 regardless of how many products exist.
        assert_eq!(contact.id.as_i32(), 1);
        assert!(contact.phone.is_none());
    }
}
