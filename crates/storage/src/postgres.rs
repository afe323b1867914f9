//! Durable `PostgreSQL` backend.
//!
//! Same contract as the in-memory fallback, backed by a shared connection
//! pool. Construction ensures the schema exists and seeds the full demo
//! catalog exactly once (skipped whenever any product already exists).
//!
//! Queries are plain-text sqlx with `RETURNING` on every insert/update, so
//! callers always see the row as stored - including backend-assigned ids,
//! timestamps, and column defaults. Status and payment-method columns are
//! TEXT constrained by CHECK; values that no longer parse surface as
//! [`StorageError::DataCorruption`] rather than being silently coerced.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

use clementine_core::{
    Contact, ContactId, Email, NewContact, NewOrder, NewProduct, NewSubscriber,
    NewsletterSubscriber, Order, OrderId, OrderStatus, Product, ProductId, SubscriberId,
};

use crate::backend::Storage;
use crate::config::{ConfigError, StorageConfig};
use crate::{StorageError, seed};

/// Bootstrap DDL, executed at construction. Idempotent by design; this is
/// schema assurance, not a migration system.
const SCHEMA_DDL: &str = r"
CREATE TABLE IF NOT EXISTS products (
    id SERIAL PRIMARY KEY,
    name TEXT NOT NULL,
    description TEXT NOT NULL,
    price NUMERIC(10, 2) NOT NULL,
    original_price NUMERIC(10, 2),
    image_url TEXT NOT NULL,
    category TEXT NOT NULL,
    rating NUMERIC(2, 1) DEFAULT 0,
    in_stock BOOLEAN NOT NULL DEFAULT TRUE
);

CREATE TABLE IF NOT EXISTS orders (
    id SERIAL PRIMARY KEY,
    first_name TEXT NOT NULL,
    last_name TEXT NOT NULL,
    email TEXT NOT NULL,
    phone TEXT NOT NULL,
    address TEXT NOT NULL,
    city TEXT NOT NULL,
    state TEXT NOT NULL,
    zip_code TEXT NOT NULL,
    country TEXT NOT NULL,
    payment_method TEXT NOT NULL
        CHECK (payment_method IN ('credit_card', 'paypal', 'bank_transfer', 'cash_on_delivery')),
    notes TEXT,
    items JSONB NOT NULL,
    subtotal NUMERIC(10, 2) NOT NULL,
    discount NUMERIC(10, 2) NOT NULL DEFAULT 0,
    tax NUMERIC(10, 2) NOT NULL,
    shipping NUMERIC(10, 2) NOT NULL DEFAULT 0,
    total NUMERIC(10, 2) NOT NULL,
    status TEXT NOT NULL DEFAULT 'pending'
        CHECK (status IN ('pending', 'processing', 'shipped', 'delivered', 'cancelled')),
    created_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

CREATE TABLE IF NOT EXISTS contacts (
    id SERIAL PRIMARY KEY,
    name TEXT NOT NULL,
    email TEXT NOT NULL,
    phone TEXT,
    subject TEXT NOT NULL,
    message TEXT NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

CREATE TABLE IF NOT EXISTS newsletter_subscribers (
    id SERIAL PRIMARY KEY,
    email TEXT NOT NULL,
    name TEXT,
    subscribed BOOLEAN NOT NULL DEFAULT TRUE,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

CREATE UNIQUE INDEX IF NOT EXISTS newsletter_subscribers_email_idx
    ON newsletter_subscribers (email);
";

/// Create a `PostgreSQL` connection pool with the configured limits.
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(
    database_url: &secrecy::SecretString,
    config: &StorageConfig,
) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(2)
        .acquire_timeout(config.acquire_timeout)
        .connect(database_url.expose_secret())
        .await
}

/// `PostgreSQL`-backed storage.
pub struct PgStorage {
    pool: PgPool,
}

impl PgStorage {
    /// Connect, ensure the schema, and seed the catalog if the store is
    /// empty.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Configuration`] when no database URL is
    /// configured, or [`StorageError::Database`] if the pool cannot be
    /// established, the schema cannot be ensured, or seeding fails.
    pub async fn connect(config: &StorageConfig) -> Result<Self, StorageError> {
        let database_url = config
            .database_url
            .as_ref()
            .ok_or(ConfigError::MissingDatabaseUrl)?;

        let pool = create_pool(database_url, config).await?;
        tracing::info!("database pool created");

        sqlx::raw_sql(SCHEMA_DDL).execute(&pool).await?;

        let storage = Self { pool };
        storage.seed_catalog().await?;
        Ok(storage)
    }

    /// Wrap an existing pool. Schema assurance and seeding are skipped;
    /// intended for tests that manage their own database state.
    #[must_use]
    pub const fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    /// The underlying connection pool.
    #[must_use]
    pub const fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Seed the demo catalog at most once: if any product already exists
    /// the whole step is skipped.
    async fn seed_catalog(&self) -> Result<(), StorageError> {
        let existing = self.products().await?;
        if !existing.is_empty() {
            tracing::debug!(count = existing.len(), "catalog already seeded, skipping");
            return Ok(());
        }

        let catalog = seed::demo_catalog();
        tracing::info!(count = catalog.len(), "seeding demo catalog");
        for draft in catalog {
            self.create_product(draft).await?;
        }
        Ok(())
    }
}

#[derive(sqlx::FromRow)]
struct ProductRow {
    id: i32,
    name: String,
    description: String,
    price: Decimal,
    original_price: Option<Decimal>,
    image_url: String,
    category: String,
    rating: Option<Decimal>,
    in_stock: bool,
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        Self {
            id: ProductId::new(row.id),
            name: row.name,
            description: row.description,
            price: row.price,
            original_price: row.original_price,
            image_url: row.image_url,
            category: row.category,
            rating: row.rating,
            in_stock: row.in_stock,
        }
    }
}

#[derive(sqlx::FromRow)]
struct OrderRow {
    id: i32,
    first_name: String,
    last_name: String,
    email: Email,
    phone: String,
    address: String,
    city: String,
    state: String,
    zip_code: String,
    country: String,
    payment_method: String,
    notes: Option<String>,
    items: serde_json::Value,
    subtotal: Decimal,
    discount: Decimal,
    tax: Decimal,
    shipping: Decimal,
    total: Decimal,
    status: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<OrderRow> for Order {
    type Error = StorageError;

    fn try_from(row: OrderRow) -> Result<Self, Self::Error> {
        let status = row.status.parse().map_err(|e| {
            StorageError::DataCorruption(format!("invalid order status in database: {e}"))
        })?;
        let payment_method = row.payment_method.parse().map_err(|e| {
            StorageError::DataCorruption(format!("invalid payment method in database: {e}"))
        })?;

        Ok(Self {
            id: OrderId::new(row.id),
            first_name: row.first_name,
            last_name: row.last_name,
            email: row.email,
            phone: row.phone,
            address: row.address,
            city: row.city,
            state: row.state,
            zip_code: row.zip_code,
            country: row.country,
            payment_method,
            notes: row.notes,
            items: row.items,
            subtotal: row.subtotal,
            discount: row.discount,
            tax: row.tax,
            shipping: row.shipping,
            total: row.total,
            status,
            created_at: row.created_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct ContactRow {
    id: i32,
    name: String,
    email: Email,
    phone: Option<String>,
    subject: String,
    message: String,
    created_at: DateTime<Utc>,
}

impl From<ContactRow> for Contact {
    fn from(row: ContactRow) -> Self {
        Self {
            id: ContactId::new(row.id),
            name: row.name,
            email: row.email,
            phone: row.phone,
            subject: row.subject,
            message: row.message,
            created_at: row.created_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct SubscriberRow {
    id: i32,
    email: Email,
    name: Option<String>,
    subscribed: bool,
    created_at: DateTime<Utc>,
}

impl From<SubscriberRow> for NewsletterSubscriber {
    fn from(row: SubscriberRow) -> Self {
        Self {
            id: SubscriberId::new(row.id),
            email: row.email,
            name: row.name,
            subscribed: row.subscribed,
            created_at: row.created_at,
        }
    }
}

const ORDER_COLUMNS: &str = "id, first_name, last_name, email, phone, address, city, state, \
     zip_code, country, payment_method, notes, items, subtotal, discount, tax, shipping, \
     total, status, created_at";

#[async_trait]
impl Storage for PgStorage {
    fn backend_tag(&self) -> &'static str {
        "postgres"
    }

    async fn products(&self) -> Result<Vec<Product>, StorageError> {
        let rows = sqlx::query_as::<_, ProductRow>(
            "SELECT id, name, description, price, original_price, image_url, category, rating, \
             in_stock FROM products ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Product::from).collect())
    }

    async fn product(&self, id: ProductId) -> Result<Option<Product>, StorageError> {
        let row = sqlx::query_as::<_, ProductRow>(
            "SELECT id, name, description, price, original_price, image_url, category, rating, \
             in_stock FROM products WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Product::from))
    }

    async fn create_product(&self, draft: NewProduct) -> Result<Product, StorageError> {
        // COALESCE applies this backend's absent-rating-becomes-zero policy.
        let row = sqlx::query_as::<_, ProductRow>(
            "INSERT INTO products \
                 (name, description, price, original_price, image_url, category, rating, in_stock) \
             VALUES ($1, $2, $3, $4, $5, $6, COALESCE($7, 0), $8) \
             RETURNING id, name, description, price, original_price, image_url, category, rating, \
                 in_stock",
        )
        .bind(&draft.name)
        .bind(&draft.description)
        .bind(draft.price)
        .bind(draft.original_price)
        .bind(&draft.image_url)
        .bind(&draft.category)
        .bind(draft.rating)
        .bind(draft.in_stock.unwrap_or(true))
        .fetch_one(&self.pool)
        .await?;

        Ok(Product::from(row))
    }

    async fn orders(&self) -> Result<Vec<Order>, StorageError> {
        let rows = sqlx::query_as::<_, OrderRow>(&format!(
            "SELECT {ORDER_COLUMNS} FROM orders ORDER BY id"
        ))
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Order::try_from).collect()
    }

    async fn order(&self, id: OrderId) -> Result<Option<Order>, StorageError> {
        let row = sqlx::query_as::<_, OrderRow>(&format!(
            "SELECT {ORDER_COLUMNS} FROM orders WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(Order::try_from).transpose()
    }

    async fn create_order(&self, draft: NewOrder) -> Result<Order, StorageError> {
        let row = sqlx::query_as::<_, OrderRow>(&format!(
            "INSERT INTO orders \
                 (first_name, last_name, email, phone, address, city, state, zip_code, country, \
                  payment_method, notes, items, subtotal, discount, tax, shipping, total, status) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, \
                 'pending') \
             RETURNING {ORDER_COLUMNS}"
        ))
        .bind(&draft.first_name)
        .bind(&draft.last_name)
        .bind(&draft.email)
        .bind(&draft.phone)
        .bind(&draft.address)
        .bind(&draft.city)
        .bind(&draft.state)
        .bind(&draft.zip_code)
        .bind(&draft.country)
        .bind(draft.payment_method.to_string())
        .bind(&draft.notes)
        .bind(&draft.items)
        .bind(draft.subtotal)
        .bind(draft.discount)
        .bind(draft.tax)
        .bind(draft.shipping)
        .bind(draft.total)
        .fetch_one(&self.pool)
        .await?;

        Order::try_from(row)
    }

    async fn update_order_status(
        &self,
        id: OrderId,
        status: OrderStatus,
    ) -> Result<Option<Order>, StorageError> {
        // Targeted single-field update; zero rows matched means absence.
        let row = sqlx::query_as::<_, OrderRow>(&format!(
            "UPDATE orders SET status = $1 WHERE id = $2 RETURNING {ORDER_COLUMNS}"
        ))
        .bind(status.to_string())
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(Order::try_from).transpose()
    }

    async fn contacts(&self) -> Result<Vec<Contact>, StorageError> {
        let rows = sqlx::query_as::<_, ContactRow>(
            "SELECT id, name, email, phone, subject, message, created_at \
             FROM contacts ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Contact::from).collect())
    }

    async fn create_contact(&self, draft: NewContact) -> Result<Contact, StorageError> {
        let row = sqlx::query_as::<_, ContactRow>(
            "INSERT INTO contacts (name, email, phone, subject, message) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING id, name, email, phone, subject, message, created_at",
        )
        .bind(&draft.name)
        .bind(&draft.email)
        .bind(&draft.phone)
        .bind(&draft.subject)
        .bind(&draft.message)
        .fetch_one(&self.pool)
        .await?;

        Ok(Contact::from(row))
    }

    async fn newsletter_subscribers(&self) -> Result<Vec<NewsletterSubscriber>, StorageError> {
        let rows = sqlx::query_as::<_, SubscriberRow>(
            "SELECT id, email, name, subscribed, created_at \
             FROM newsletter_subscribers ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(NewsletterSubscriber::from).collect())
    }

    async fn subscribe_newsletter(
        &self,
        draft: NewSubscriber,
    ) -> Result<NewsletterSubscriber, StorageError> {
        // Check first so the common duplicate case never attempts an insert;
        // the unique index on email remains as defense in depth underneath.
        let existing = sqlx::query_scalar::<_, i32>(
            "SELECT id FROM newsletter_subscribers WHERE email = $1",
        )
        .bind(&draft.email)
        .fetch_optional(&self.pool)
        .await?;

        if existing.is_some() {
            return Err(StorageError::DuplicateSubscriber(
                draft.email.into_inner(),
            ));
        }

        let row = sqlx::query_as::<_, SubscriberRow>(
            "INSERT INTO newsletter_subscribers (email, name) \
             VALUES ($1, $2) \
             RETURNING id, email, name, subscribed, created_at",
        )
        .bind(&draft.email)
        .bind(&draft.name)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e
                && db_err.is_unique_violation()
            {
                return StorageError::DuplicateSubscriber(draft.email.to_string());
            }
            StorageError::Database(e)
        })?;

        Ok(NewsletterSubscriber::from(row))
    }

    async fn close(&self) {
        tracing::info!("closing database pool");
        self.pool.close().await;
    }
}
