//! Demo catalog used for one-time seeding.
//!
//! Both backends seed from the same list: Postgres inserts all eight
//! products on first startup against an empty store, while the in-memory
//! fallback takes only the first [`MEMORY_SEED_COUNT`] so local startup
//! stays cheap. The asymmetry is deliberate environment tiering.

use rust_decimal::Decimal;

use clementine_core::NewProduct;

/// How many catalog entries the in-memory backend seeds.
pub const MEMORY_SEED_COUNT: usize = 4;

fn product(
    name: &str,
    description: &str,
    price: Decimal,
    original_price: Option<Decimal>,
    image_url: &str,
    category: &str,
    rating: Decimal,
) -> NewProduct {
    NewProduct {
        name: name.to_owned(),
        description: description.to_owned(),
        price,
        original_price,
        image_url: image_url.to_owned(),
        category: category.to_owned(),
        rating: Some(rating),
        in_stock: Some(true),
    }
}

/// The full demo catalog, in seed order.
#[must_use]
pub fn demo_catalog() -> Vec<NewProduct> {
    vec![
        product(
            "Wireless Headphones",
            "Premium audio experience with noise cancellation",
            Decimal::new(199_99, 2),
            Some(Decimal::new(249_99, 2)),
            "https://images.unsplash.com/photo-1505740420928-5e560c06d30e?ixlib=rb-4.0.3&auto=format&fit=crop&w=400&h=300",
            "electronics",
            Decimal::new(49, 1),
        ),
        product(
            "Smart Watch Pro",
            "Advanced fitness tracking with premium design",
            Decimal::new(349_99, 2),
            None,
            "https://images.unsplash.com/photo-1523275335684-37898b6baf30?ixlib=rb-4.0.3&auto=format&fit=crop&w=400&h=300",
            "electronics",
            Decimal::new(47, 1),
        ),
        product(
            "Leather Handbag",
            "Handcrafted genuine leather with premium finish",
            Decimal::new(159_99, 2),
            None,
            "https://images.unsplash.com/photo-1553062407-98eeb64c6a62?ixlib=rb-4.0.3&auto=format&fit=crop&w=400&h=300",
            "fashion",
            Decimal::new(50, 1),
        ),
        product(
            "Modern Desk Lamp",
            "Adjustable LED lighting for perfect workspace illumination",
            Decimal::new(89_99, 2),
            None,
            "https://images.unsplash.com/photo-1507003211169-0a1dd7228f2d?ixlib=rb-4.0.3&auto=format&fit=crop&w=400&h=300",
            "home",
            Decimal::new(46, 1),
        ),
        product(
            "Camera Lens 50mm",
            "Professional grade lens for stunning photography",
            Decimal::new(599_99, 2),
            None,
            "https://images.unsplash.com/photo-1606983340126-99ab4feaa64a?ixlib=rb-4.0.3&auto=format&fit=crop&w=400&h=300",
            "electronics",
            Decimal::new(48, 1),
        ),
        product(
            "Ceramic Vase",
            "Handcrafted ceramic with modern minimalist design",
            Decimal::new(39_99, 2),
            None,
            "https://images.unsplash.com/photo-1578662996442-48f60103fc96?ixlib=rb-4.0.3&auto=format&fit=crop&w=400&h=300",
            "home",
            Decimal::new(45, 1),
        ),
        product(
            "Coffee Maker Pro",
            "Professional brewing system for perfect coffee every time",
            Decimal::new(279_99, 2),
            None,
            "https://images.unsplash.com/photo-1495474472287-4d71bcdd2085?ixlib=rb-4.0.3&auto=format&fit=crop&w=400&h=300",
            "home",
            Decimal::new(49, 1),
        ),
        product(
            "Wireless Charger",
            "Fast wireless charging with sleek design",
            Decimal::new(49_99, 2),
            None,
            "https://images.unsplash.com/photo-1593642632559-0c6d3fc62b89?ixlib=rb-4.0.3&auto=format&fit=crop&w=400&h=300",
            "electronics",
            Decimal::new(44, 1),
        ),
    ]
}
