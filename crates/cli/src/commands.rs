//! Command handlers.
//!
//! Each handler issues exactly one storage operation and prints entities
//! as JSON lines. Absence prints a short message and exits cleanly; only
//! storage faults become process failures.

#![allow(clippy::print_stdout)]

use clementine_core::{Email, OrderId, OrderStatus, ProductId};
use clementine_storage::SharedStorage;

type CommandResult = Result<(), Box<dyn std::error::Error>>;

fn print_json<T: serde::Serialize>(value: &T) -> CommandResult {
    println!("{}", serde_json::to_string(value)?);
    Ok(())
}

pub async fn list_products(storage: &SharedStorage) -> CommandResult {
    for product in storage.products().await? {
        print_json(&product)?;
    }
    Ok(())
}

pub async fn get_product(storage: &SharedStorage, id: i32) -> CommandResult {
    match storage.product(ProductId::new(id)).await? {
        Some(product) => print_json(&product),
        None => {
            println!("no product with id {id}");
            Ok(())
        }
    }
}

pub async fn list_orders(storage: &SharedStorage) -> CommandResult {
    for order in storage.orders().await? {
        print_json(&order)?;
    }
    Ok(())
}

pub async fn get_order(storage: &SharedStorage, id: i32) -> CommandResult {
    match storage.order(OrderId::new(id)).await? {
        Some(order) => print_json(&order),
        None => {
            println!("no order with id {id}");
            Ok(())
        }
    }
}

pub async fn set_order_status(storage: &SharedStorage, id: i32, status: &str) -> CommandResult {
    let status: OrderStatus = status.parse()?;
    match storage.update_order_status(OrderId::new(id), status).await? {
        Some(order) => print_json(&order),
        None => {
            println!("no order with id {id}");
            Ok(())
        }
    }
}

pub async fn list_contacts(storage: &SharedStorage) -> CommandResult {
    for contact in storage.contacts().await? {
        print_json(&contact)?;
    }
    Ok(())
}

pub async fn list_subscribers(storage: &SharedStorage) -> CommandResult {
    for subscriber in storage.newsletter_subscribers().await? {
        print_json(&subscriber)?;
    }
    Ok(())
}

pub async fn subscribe(storage: &SharedStorage, email: &str, name: Option<String>) -> CommandResult {
    let email = Email::parse(email)?;
    let subscriber = storage
        .subscribe_newsletter(clementine_core::NewSubscriber { email, name })
        .await?;
    print_json(&subscriber)
}
