//! # Seed Data Generator
//!
//! Populates the database with a demo catalog for development.
//!
//! ## Usage
//! ```bash
//! # Seed ./storefront.db with every demo product
//! cargo run -p storefront-db --bin seed
//!
//! # Fewer products, custom database
//! cargo run -p storefront-db --bin seed -- --count 10 --db ./data/dev.db
//! ```
//!
//! Creates one category per group below and products with prices between
//! $4.99 and $89.99, a pack quantity of 1 and stock between 0 and 24.

use std::env;
use storefront_core::{Money, NewProduct};
use storefront_db::{Database, DbConfig};

/// Demo catalog: (category, brand, products)
const CATALOG: &[(&str, &str, &[&str])] = &[
    (
        "Apparel",
        "Northwind",
        &["Cotton Shirt", "Linen Shirt", "Denim Jacket", "Wool Sweater", "Rain Coat"],
    ),
    (
        "Footwear",
        "Strider",
        &["Trail Runner", "Canvas Sneaker", "Leather Boot", "Sandal"],
    ),
    (
        "Accessories",
        "Keystone",
        &["Leather Belt", "Wool Scarf", "Baseball Cap", "Canvas Tote"],
    ),
    (
        "Electronics",
        "Voltline",
        &["Wireless Earbuds", "Phone Charger", "Bluetooth Speaker", "Smart Watch"],
    ),
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    let mut count: usize = usize::MAX;
    let mut db_path = String::from("./storefront.db");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--count" | "-c" => {
                if i + 1 < args.len() {
                    count = args[i + 1].parse().unwrap_or(usize::MAX);
                    i += 1;
                }
            }
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Storefront Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -c, --count <N>    Maximum number of products (default: all)");
                println!("  -d, --db <PATH>    Database file path (default: ./storefront.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("Storefront Seed Data Generator");
    println!("==============================");
    println!("Database: {}", db_path);
    println!();

    let db = Database::new(DbConfig::new(&db_path)).await?;
    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    let existing = db.products().count().await?;
    if existing > 0 {
        println!("⚠ Database already has {} products", existing);
        println!("  Skipping seed to avoid duplicates.");
        return Ok(());
    }

    let mut generated = 0;
    let mut seed = 0;

    'catalog: for (category_name, brand, products) in CATALOG {
        let category = match db.categories().get_by_name(category_name).await? {
            Some(category) => category,
            None => db.categories().insert(category_name).await?,
        };
        println!("  Category {}", category.name);

        for name in products.iter() {
            if generated >= count {
                break 'catalog;
            }

            let product = generate_product(name, brand, &category.id, seed);
            seed += 1;

            if let Err(e) = db.products().insert(&product).await {
                eprintln!("Failed to insert {}: {}", product.name, e);
                continue;
            }
            generated += 1;
        }
    }

    println!();
    println!("✓ Generated {} products", generated);
    Ok(())
}

/// Builds one demo product.
fn generate_product(name: &str, brand: &str, category_id: &str, seed: usize) -> NewProduct {
    let price_cents = 499 + ((seed * 1733) % 8500) as i64;

    NewProduct {
        name: name.to_string(),
        description: format!("{} by {}.", name, brand),
        // Round to the nearest .99
        price: Money::from_cents(price_cents / 100 * 100 + 99),
        category_id: category_id.to_string(),
        quantity: 1,
        brand: brand.to_string(),
        image: None,
        count_in_stock: (seed * 7 % 25) as i64,
    }
}
