//! Clementine CLI - Storefront inspection and management tools.
//!
//! # Usage
//!
//! ```bash
//! # List the catalog
//! clem products list
//!
//! # Inspect a single order
//! clem orders get 3
//!
//! # Move an order through the workflow
//! clem orders set-status 3 shipped
//!
//! # Subscribe an address to the newsletter
//! clem newsletter subscribe a@x.com --name "Ada"
//! ```
//!
//! The backend is selected once at startup: Postgres when `DATABASE_URL`
//! is set and reachable, otherwise the in-memory fallback (useful for
//! trying commands without a database, though nothing persists).

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

use clementine_storage::{StorageConfig, selector};

mod commands;

#[derive(Parser)]
#[command(name = "clem")]
#[command(author, version, about = "Clementine storefront CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Inspect the product catalog
    Products {
        #[command(subcommand)]
        action: ProductAction,
    },
    /// Inspect and manage orders
    Orders {
        #[command(subcommand)]
        action: OrderAction,
    },
    /// List contact messages
    Contacts,
    /// Manage newsletter subscriptions
    Newsletter {
        #[command(subcommand)]
        action: NewsletterAction,
    },
}

#[derive(Subcommand)]
enum ProductAction {
    /// List all products
    List,
    /// Get a product by id
    Get { id: i32 },
}

#[derive(Subcommand)]
enum OrderAction {
    /// List all orders
    List,
    /// Get an order by id
    Get { id: i32 },
    /// Replace the status of one order
    /// (`pending`, `processing`, `shipped`, `delivered`, `cancelled`)
    SetStatus { id: i32, status: String },
}

#[derive(Subcommand)]
enum NewsletterAction {
    /// List all subscribers
    List,
    /// Subscribe an email address
    Subscribe {
        email: String,

        /// Subscriber display name
        #[arg(short, long)]
        name: Option<String>,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    // Load .env before reading configuration
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = match StorageConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Invalid configuration: {e}");
            std::process::exit(1);
        }
    };

    let storage = selector::init(config).await;
    tracing::debug!(backend = storage.backend_tag(), "storage ready");

    // Race the command against Ctrl+C/SIGTERM so an interrupt still
    // reaches the shutdown path below.
    let result = tokio::select! {
        result = run(cli, &storage) => result,
        () = selector::shutdown_signal() => Ok(()),
    };

    // Release the pool before exiting, success or not.
    selector::shutdown(&storage).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(
    cli: Cli,
    storage: &clementine_storage::SharedStorage,
) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Products { action } => match action {
            ProductAction::List => commands::list_products(storage).await?,
            ProductAction::Get { id } => commands::get_product(storage, id).await?,
        },
        Commands::Orders { action } => match action {
            OrderAction::List => commands::list_orders(storage).await?,
            OrderAction::Get { id } => commands::get_order(storage, id).await?,
            OrderAction::SetStatus { id, status } => {
                commands::set_order_status(storage, id, &status).await?;
            }
        },
        Commands::Contacts => commands::list_contacts(storage).await?,
        Commands::Newsletter { action } => match action {
            NewsletterAction::List => commands::list_subscribers(storage).await?,
            NewsletterAction::Subscribe { email, name } => {
                commands::subscribe(storage, &email, name).await?;
            }
        },
    }
    Ok(())
}
