//! Contract tests against the in-memory backend.

#![allow(clippy::unwrap_used)]

use rust_decimal::Decimal;
use serde_json::json;

use clementine_core::{
    NewContact, NewOrder, NewProduct, NewSubscriber, OrderId, OrderStatus, PaymentMethod,
    ProductId,
};
use clementine_storage::{MemoryStorage, Storage, StorageError};

fn sample_product() -> NewProduct {
    NewProduct {
        name: "X".to_owned(),
        description: "A thing worth having".to_owned(),
        price: Decimal::new(9_99, 2),
        original_price: None,
        image_url: "https://example.com/x.jpg".to_owned(),
        category: "misc".to_owned(),
        rating: None,
        in_stock: None,
    }
}

fn sample_order() -> NewOrder {
    NewOrder {
        first_name: "Grace".to_owned(),
        last_name: "Hopper".to_owned(),
        email: "grace@example.com".parse().unwrap(),
        phone: "555-0100".to_owned(),
        address: "1 Navy Way".to_owned(),
        city: "Arlington".to_owned(),
        state: "VA".to_owned(),
        zip_code: "22201".to_owned(),
        country: "US".to_owned(),
        payment_method: PaymentMethod::CreditCard,
        notes: None,
        items: json!([{ "product_id": 1, "name": "Wireless Headphones", "quantity": 2 }]),
        subtotal: Decimal::new(399_98, 2),
        discount: Decimal::new(0, 2),
        tax: Decimal::new(32_00, 2),
        shipping: Decimal::new(5_99, 2),
        total: Decimal::new(437_97, 2),
    }
}

#[tokio::test]
async fn seeded_catalog_then_create_assigns_id_five() {
    let storage = MemoryStorage::new();

    let products = storage.products().await.unwrap();
    assert_eq!(products.len(), 4);
    let ids: Vec<i32> = products.iter().map(|p| p.id.as_i32()).collect();
    assert_eq!(ids, vec![1, 2, 3, 4]);

    let created = storage.create_product(sample_product()).await.unwrap();
    assert_eq!(created.id.as_i32(), 5);
    assert_eq!(storage.products().await.unwrap().len(), 5);
}

#[tokio::test]
async fn create_then_get_returns_equal_product() {
    let storage = MemoryStorage::new();

    let created = storage.create_product(sample_product()).await.unwrap();
    let fetched = storage.product(created.id).await.unwrap().unwrap();
    assert_eq!(fetched, created);

    // Backend-applied defaults.
    assert!(fetched.in_stock);
    assert!(fetched.rating.is_none());
    assert!(fetched.original_price.is_none());
}

#[tokio::test]
async fn get_unknown_product_is_absence_not_error() {
    let storage = MemoryStorage::new();
    let result = storage.product(ProductId::new(9_999)).await.unwrap();
    assert!(result.is_none());
}

#[tokio::test]
async fn new_order_starts_pending_and_status_update_touches_nothing_else() {
    let storage = MemoryStorage::new();

    let created = storage.create_order(sample_order()).await.unwrap();
    assert_eq!(created.status, OrderStatus::Pending);
    assert_eq!(created.id.as_i32(), 1);

    let updated = storage
        .update_order_status(created.id, OrderStatus::Shipped)
        .await
        .unwrap()
        .unwrap();

    assert_eq!(updated.status, OrderStatus::Shipped);
    assert_eq!(updated.total, created.total);

    // Everything except status is bit-for-bit identical.
    let mut expected = created.clone();
    expected.status = OrderStatus::Shipped;
    assert_eq!(updated, expected);

    // The stored copy reflects the update too.
    let fetched = storage.order(created.id).await.unwrap().unwrap();
    assert_eq!(fetched, expected);
}

#[tokio::test]
async fn status_update_for_unknown_order_leaves_set_unchanged() {
    let storage = MemoryStorage::new();
    let created = storage.create_order(sample_order()).await.unwrap();

    let result = storage
        .update_order_status(OrderId::new(42), OrderStatus::Cancelled)
        .await
        .unwrap();
    assert!(result.is_none());

    let orders = storage.orders().await.unwrap();
    assert_eq!(orders.len(), 1);
    assert_eq!(orders.first().unwrap(), &created);
}

#[tokio::test]
async fn duplicate_subscription_fails_without_mutation() {
    let storage = MemoryStorage::new();

    let first = storage
        .subscribe_newsletter(NewSubscriber {
            email: "a@x.com".parse().unwrap(),
            name: None,
        })
        .await
        .unwrap();
    assert!(first.subscribed);

    let err = storage
        .subscribe_newsletter(NewSubscriber {
            email: "a@x.com".parse().unwrap(),
            name: Some("Second Try".to_owned()),
        })
        .await
        .unwrap_err();
    assert!(err.is_duplicate_subscriber());
    assert!(matches!(err, StorageError::DuplicateSubscriber(ref email) if email == "a@x.com"));

    let subscribers = storage.newsletter_subscribers().await.unwrap();
    assert_eq!(subscribers.len(), 1);
    assert_eq!(subscribers.first().unwrap(), &first);
}

#[tokio::test]
async fn distinct_emails_both_subscribe() {
    let storage = MemoryStorage::new();

    storage
        .subscribe_newsletter(NewSubscriber {
            email: "a@x.com".parse().unwrap(),
            name: None,
        })
        .await
        .unwrap();
    let second = storage
        .subscribe_newsletter(NewSubscriber {
            email: "b@x.com".parse().unwrap(),
            name: None,
        })
        .await
        .unwrap();

    assert_eq!(second.id.as_i32(), 2);
    assert_eq!(storage.newsletter_subscribers().await.unwrap().len(), 2);
}

#[tokio::test]
async fn contact_defaults_phone_to_absent() {
    let storage = MemoryStorage::new();

    let contact = storage
        .create_contact(NewContact {
            name: "Ada Lovelace".to_owned(),
            email: "ada@example.com".parse().unwrap(),
            phone: None,
            subject: "Shipping question".to_owned(),
            message: "Where is my order?".to_owned(),
        })
        .await
        .unwrap();

    assert!(contact.phone.is_none());
    assert_eq!(storage.contacts().await.unwrap().len(), 1);
}

#[tokio::test]
async fn snapshots_do_not_alias_backend_state() {
    let storage = MemoryStorage::new();

    let mut products = storage.products().await.unwrap();
    products.clear();

    assert_eq!(storage.products().await.unwrap().len(), 4);
}
