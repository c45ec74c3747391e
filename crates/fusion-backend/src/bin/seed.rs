//! # Seed Catalog Generator
//!
//! Writes a sample catalog snapshot for development.
//!
//! ## Usage
//! ```bash
//! # Write to the configured snapshot path
//! cargo run -p fusion-backend --bin seed
//!
//! # Write somewhere else
//! cargo run -p fusion-backend --bin seed -- --out ./data/catalog.json
//!
//! # Overwrite an existing snapshot
//! cargo run -p fusion-backend --bin seed -- --force
//! ```
//!
//! ## Generated Catalog
//! A handful of restaurants across cuisines, each with a menu stored the
//! way the live catalog stores it: an array whose slot 0 is empty.

use fusion_backend::{BackendConfig, CatalogSource, TreeCatalog, TreeStore};
use serde_json::{json, Value};
use std::env;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// (id, name, cuisine, location, rating, delivery, cost for two, veg, tag)
type Venue = (&'static str, &'static str, &'static str, &'static str, f64, u32, u32, bool, &'static str);

const VENUES: &[Venue] = &[
    ("r1", "Spice Route", "North Indian", "MG Road", 4.4, 30, 500, false, "Bestseller"),
    ("r2", "Green Leaf", "South Indian", "Indiranagar", 4.1, 25, 300, true, "Pure Veg"),
    ("r3", "Pizza Planet", "Italian", "Koramangala", 3.9, 40, 700, false, "Great Offers"),
    ("r4", "Wok This Way", "Chinese", "HSR Layout", 4.2, 35, 600, false, ""),
    ("r5", "Chaat Corner", "Street Food", "Jayanagar", 3.7, 20, 200, true, "New"),
];

/// (name, price, type) per venue id
const DISHES: &[(&str, &[(&str, &str, &str)])] = &[
    (
        "r1",
        &[
            ("Butter Chicken", "320", "Main"),
            ("Paneer Tikka", "240", "Starter"),
            ("Dal Makhani", "210", "Main"),
            ("Garlic Naan", "60", "Bread"),
        ],
    ),
    (
        "r2",
        &[
            ("Masala Dosa", "110", "Main"),
            ("Idli Vada", "80", "Breakfast"),
            ("Filter Coffee", "40", "Drinks"),
        ],
    ),
    (
        "r3",
        &[
            ("Margherita", "10.0", "Pizza"),
            ("Farmhouse", "12.5", "Pizza"),
            ("Garlic Bread", "4.99", "Sides"),
        ],
    ),
    (
        "r4",
        &[
            ("Hakka Noodles", "180", "Main"),
            ("Veg Manchurian", "190", "Starter"),
        ],
    ),
    (
        "r5",
        &[
            ("Pani Puri", "50", "Chaat"),
            ("Sev Puri", "60", "Chaat"),
            ("Lassi", "70", "Drinks"),
        ],
    ),
];

fn build_catalog() -> Value {
    let mut restaurants = serde_json::Map::new();

    for &(id, name, cuisine, location, rating, delivery, cost, veg, tag) in VENUES {
        let mut menu = vec![Value::Null];
        if let Some((_, dishes)) = DISHES.iter().find(|(venue, _)| *venue == id) {
            menu.extend(dishes.iter().map(|(dish, price, kind)| {
                json!({
                    "name": dish,
                    "price": price,
                    "type": kind,
                    "image": format!("https://img.fusioncart.dev/{}/{}.jpg", id, dish.to_lowercase().replace(' ', "-")),
                })
            }));
        }

        restaurants.insert(
            id.to_string(),
            json!({
                "name": name,
                "image": format!("https://img.fusioncart.dev/{}/cover.jpg", id),
                "location": location,
                "rating": rating,
                "cuisine": cuisine,
                "deliveryTime": delivery,
                "costForTwo": cost,
                "isVeg": veg,
                "tag": tag,
                "menu": menu,
            }),
        );
    }

    json!({ "restaurants": restaurants })
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args: Vec<String> = env::args().collect();
    let mut out: Option<PathBuf> = None;
    let mut force = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--out" | "-o" => {
                if i + 1 < args.len() {
                    out = Some(PathBuf::from(&args[i + 1]));
                    i += 1;
                }
            }
            "--force" | "-f" => force = true,
            "--help" | "-h" => {
                println!("FusionCart Seed Catalog Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -o, --out <PATH>   Snapshot file (default: configured snapshot path)");
                println!("  -f, --force        Overwrite an existing snapshot");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    let path = match out {
        Some(path) => path,
        None => BackendConfig::load(None)?
            .snapshot_path()
            .ok_or("No snapshot path available; pass --out")?,
    };

    if path.exists() && !force {
        println!("⚠ {} already exists", path.display());
        println!("  Pass --force to overwrite it.");
        return Ok(());
    }

    let store = Arc::new(TreeStore::from_value(build_catalog()));
    store.write_json_file(&path)?;

    let catalog = TreeCatalog::with_defaults(store);
    let restaurants = catalog.restaurants().await?;
    let mut dishes = 0;
    for restaurant in &restaurants {
        dishes += catalog.menu(&restaurant.id).await?.items.len();
    }

    info!(
        path = %path.display(),
        restaurants = restaurants.len(),
        dishes,
        "Seed complete"
    );
    println!("✓ Wrote {} restaurants and {} dishes to {}", restaurants.len(), dishes, path.display());

    Ok(())
}
