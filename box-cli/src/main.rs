use std::fs::File;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use box_cli::render;
use box_cli::settings::Settings;
use box_cli::utils::parse_accessory_arg;
use box_core::calculations::invoice_totals;
use box_core::{Accessory, EstimatorStore, MemoryStore, NewQuote, NewQuoteLine};
use box_data::CatalogLoader;
use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Corrugated box cost estimator.
///
/// Prices box specifications from a product catalog CSV against material
/// rates from a TOML settings file. The catalog columns and the rates file
/// format are described in the box-data and box-cli crate docs.
#[derive(Parser, Debug)]
#[command(name = "box-estimator")]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the products in a catalog file
    Products {
        /// Path to the catalog CSV file
        #[arg(short, long)]
        catalog: PathBuf,
    },

    /// Show the material rates from a settings file
    Rates {
        /// Path to the settings TOML file
        #[arg(short, long)]
        settings: PathBuf,
    },

    /// Build a quotation for a catalog product
    Quote {
        /// Path to the catalog CSV file
        #[arg(short, long)]
        catalog: PathBuf,

        /// Path to the settings TOML file
        #[arg(short, long)]
        settings: PathBuf,

        /// Product code to quote
        #[arg(short, long)]
        product: String,

        /// Quantity of boxes; omit to see the specification with
        /// placeholder totals
        #[arg(long)]
        pieces: Option<u32>,

        /// Accessory product code, as CODE or CODE:PIECES (quantity
        /// defaults to the main product's). May be repeated.
        #[arg(long = "accessory", value_name = "CODE[:PIECES]")]
        accessories: Vec<String>,

        /// Party name shown on the quote
        #[arg(long, default_value = "Walk-in customer")]
        party: String,

        /// Invoice tax percentage; overrides the settings file
        #[arg(long)]
        tax_percent: Option<Decimal>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Products { catalog } => products(&catalog).await,
        Command::Rates { settings } => rates(&settings),
        Command::Quote {
            catalog,
            settings,
            product,
            pieces,
            accessories,
            party,
            tax_percent,
        } => {
            quote(
                &catalog,
                &settings,
                &product,
                pieces,
                &accessories,
                party,
                tax_percent,
            )
            .await
        }
    }
}

/// Parses a catalog file and loads it into a fresh in-memory store.
async fn load_catalog(path: &Path) -> Result<MemoryStore> {
    let file =
        File::open(path).with_context(|| format!("Failed to open: {}", path.display()))?;

    let records = CatalogLoader::parse(file)
        .with_context(|| format!("Failed to parse catalog: {}", path.display()))?;

    let store = MemoryStore::new();
    let loaded = CatalogLoader::load(&store, &records)
        .await
        .with_context(|| format!("Failed to load catalog: {}", path.display()))?;

    info!(products = loaded, catalog = %path.display(), "catalog loaded");

    Ok(store)
}

async fn products(catalog: &Path) -> Result<()> {
    let store = load_catalog(catalog).await?;
    let products = store
        .list_products()
        .await
        .context("Failed to list products")?;

    print!("{}", render::products_table(&products));

    Ok(())
}

fn rates(settings: &Path) -> Result<()> {
    let settings = Settings::load(settings)?;

    print!(
        "{}",
        render::pricing_block(&settings.currency, &settings.pricing)
    );

    Ok(())
}

async fn quote(
    catalog: &Path,
    settings_path: &Path,
    product_code: &str,
    pieces: Option<u32>,
    accessory_args: &[String],
    party: String,
    tax_percent: Option<Decimal>,
) -> Result<()> {
    let settings = Settings::load(settings_path)?;
    let store = load_catalog(catalog).await?;

    let product = store
        .get_product(product_code)
        .await
        .with_context(|| format!("Product '{}' not found in catalog", product_code))?;

    let mut spec = product.spec.clone();
    match pieces {
        Some(n) => spec.pieces = n,
        None => warn!("no quantity given, totals will show as placeholders"),
    }

    let mut accessories = Vec::new();
    for raw in accessory_args {
        let (code, accessory_pieces) = parse_accessory_arg(raw)?;
        let accessory = store
            .get_product(&code)
            .await
            .with_context(|| format!("Accessory '{}' not found in catalog", code))?;

        let mut accessory_spec = accessory.spec.clone();
        accessory_spec.pieces = accessory_pieces.or(pieces).unwrap_or(0);
        accessories.push(Accessory {
            name: accessory.name,
            spec: accessory_spec,
        });
    }

    let quote = store
        .create_quote(NewQuote {
            party_name: party,
            pricing: settings.pricing.clone(),
            lines: vec![NewQuoteLine {
                product_name: product.name,
                spec,
                accessories,
            }],
        })
        .await
        .context("Failed to create quote")?;

    print!("{}", render::quote_table(&settings.currency, &quote));

    if let Some(tax_percent) = tax_percent.or(settings.tax_percent) {
        let totals = invoice_totals(quote.subtotal(), tax_percent);
        print!("{}", render::totals_block(&settings.currency, &totals));
    }

    Ok(())
}
