//! Entity and draft types.
//!
//! Each entity pairs with a draft (`New*`) type: the caller-supplied,
//! pre-validated payload lacking backend-assigned fields (id, status,
//! timestamps). Backends fill those in on create and return the full entity.

pub mod contact;
pub mod newsletter;
pub mod order;
pub mod product;

pub use contact::{Contact, NewContact};
pub use newsletter::{NewSubscriber, NewsletterSubscriber};
pub use order::{NewOrder, Order};
pub use product::{NewProduct, Product};
