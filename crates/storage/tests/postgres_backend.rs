//! Contract tests against a live `PostgreSQL` instance.
//!
//! Ignored by default; run with a scratch database:
//!
//! ```bash
//! DATABASE_URL=postgres://localhost/clementine_test cargo test -p clementine-storage -- --ignored
//! ```

#![allow(clippy::unwrap_used)]

use rust_decimal::Decimal;
use serde_json::json;

use clementine_core::{NewOrder, NewSubscriber, OrderStatus, PaymentMethod};
use clementine_storage::{PgStorage, Storage, StorageConfig, StorageError};

async fn connect() -> PgStorage {
    let config = StorageConfig::from_env().unwrap();
    assert!(
        config.database_url.is_some(),
        "DATABASE_URL must be set for postgres tests"
    );
    PgStorage::connect(&config).await.unwrap()
}

fn sample_order(email: &str) -> NewOrder {
    NewOrder {
        first_name: "Grace".to_owned(),
        last_name: "Hopper".to_owned(),
        email: email.parse().unwrap(),
        phone: "555-0100".to_owned(),
        address: "1 Navy Way".to_owned(),
        city: "Arlington".to_owned(),
        state: "VA".to_owned(),
        zip_code: "22201".to_owned(),
        country: "US".to_owned(),
        payment_method: PaymentMethod::Paypal,
        notes: Some("leave at door".to_owned()),
        items: json!([{ "product_id": 1, "quantity": 1 }]),
        subtotal: Decimal::new(199_99, 2),
        discount: Decimal::new(0, 2),
        tax: Decimal::new(16_00, 2),
        shipping: Decimal::new(0, 2),
        total: Decimal::new(215_99, 2),
    }
}

#[tokio::test]
#[ignore = "requires DATABASE_URL pointing at a scratch database"]
async fn seeding_is_idempotent_across_reconnects() {
    let first = connect().await;
    let count_after_first = first.products().await.unwrap().len();
    assert!(count_after_first >= 8);

    // A second construction against the same store must not seed again.
    let second = connect().await;
    let count_after_second = second.products().await.unwrap().len();
    assert_eq!(count_after_first, count_after_second);

    first.close().await;
    second.close().await;
}

#[tokio::test]
#[ignore = "requires DATABASE_URL pointing at a scratch database"]
async fn order_lifecycle_round_trips() {
    let storage = connect().await;

    let created = storage
        .create_order(sample_order("pg-order@example.com"))
        .await
        .unwrap();
    assert_eq!(created.status, OrderStatus::Pending);

    let updated = storage
        .update_order_status(created.id, OrderStatus::Shipped)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.status, OrderStatus::Shipped);
    assert_eq!(updated.total, created.total);
    assert_eq!(updated.items, created.items);

    let fetched = storage.order(created.id).await.unwrap().unwrap();
    assert_eq!(fetched, updated);

    storage.close().await;
}

#[tokio::test]
#[ignore = "requires DATABASE_URL pointing at a scratch database"]
async fn duplicate_subscription_maps_to_duplicate_error() {
    let storage = connect().await;

    // Unique suffix so reruns against a dirty database still pass.
    let email = format!("pg-{}@example.com", chrono::Utc::now().timestamp_micros());

    storage
        .subscribe_newsletter(NewSubscriber {
            email: email.parse().unwrap(),
            name: None,
        })
        .await
        .unwrap();

    let err = storage
        .subscribe_newsletter(NewSubscriber {
            email: email.parse().unwrap(),
            name: None,
        })
        .await
        .unwrap_err();
    assert!(matches!(err, StorageError::DuplicateSubscriber(_)));

    storage.close().await;
}
