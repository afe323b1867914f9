//! Newsletter subscription types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{Email, SubscriberId};

/// A newsletter subscriber.
///
/// Email addresses are globally unique across the subscriber set; backends
/// reject a second subscription for the same address.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsletterSubscriber {
    pub id: SubscriberId,
    pub email: Email,
    pub name: Option<String>,
    /// Active-subscription flag, defaults to `true`.
    pub subscribed: bool,
    pub created_at: DateTime<Utc>,
}

/// Draft for creating a [`NewsletterSubscriber`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewSubscriber {
    pub email: Email,
    #[serde(default)]
    pub name: Option<String>,
}
