//! Order types captured at checkout.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::{Email, OrderId, OrderStatus, PaymentMethod};

/// A captured order.
///
/// Created once at checkout with status [`OrderStatus::Pending`]; only the
/// status field is ever mutated afterwards, via `update_order_status`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    /// Unique order ID, assigned by the backend.
    pub id: OrderId,
    pub first_name: String,
    pub last_name: String,
    pub email: Email,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub country: String,
    /// Payment method selected at checkout.
    pub payment_method: PaymentMethod,
    /// Free-form customer notes.
    pub notes: Option<String>,
    /// Cart line entries as submitted by the client. Opaque to storage:
    /// never inspected or validated at this layer.
    pub items: serde_json::Value,
    pub subtotal: Decimal,
    pub discount: Decimal,
    pub tax: Decimal,
    pub shipping: Decimal,
    pub total: Decimal,
    /// Current workflow status.
    pub status: OrderStatus,
    /// When the order was captured, assigned by the backend.
    pub created_at: DateTime<Utc>,
}

/// Draft for creating an [`Order`].
///
/// Status and creation time are backend-assigned and deliberately absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewOrder {
    pub first_name: String,
    pub last_name: String,
    pub email: Email,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub country: String,
    pub payment_method: PaymentMethod,
    #[serde(default)]
    pub notes: Option<String>,
    pub items: serde_json::Value,
    pub subtotal: Decimal,
    pub discount: Decimal,
    pub tax: Decimal,
    pub shipping: Decimal,
    pub total: Decimal,
}
