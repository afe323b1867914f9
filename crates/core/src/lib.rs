//! Clementine Core - Shared entity model.
//!
//! This crate provides the domain types shared by all Clementine components:
//! - `storage` - Storage contract and its Postgres/in-memory backends
//! - `cli` - Command-line tools for inspecting and exercising the store
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no database access. Storage
//! backends and callers exchange these values; backends own the authoritative
//! copy and everything returned to a caller is an immutable snapshot.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, emails, and statuses
//! - [`models`] - Entities (Product, Order, Contact, NewsletterSubscriber)
//!   and the drafts callers submit to create them

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod models;
pub mod types;

pub use models::*;
pub use types::*;
