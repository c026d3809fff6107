use std::collections::HashSet;
use std::io::Read;

use box_core::{BoxSpecification, EstimatorStore, LayerStack, PaperType, Product, StoreError};
use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;

/// Errors that can occur when loading product catalog data.
#[derive(Debug, Error)]
pub enum CatalogLoaderError {
    #[error("CSV parse error: {0}")]
    CsvParse(String),

    #[error("Unknown paper type '{code}' for product '{product}' (expected K, V or VK)")]
    UnknownPaperType { product: String, code: String },

    #[error("Unsupported ply count {ply} for product '{product}' (expected 3, 5, 7 or 9)")]
    UnsupportedPly { product: String, ply: u32 },

    #[error("Duplicate product code '{0}' in catalog file")]
    DuplicateCode(String),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

impl From<csv::Error> for CatalogLoaderError {
    fn from(err: csv::Error) -> Self {
        CatalogLoaderError::CsvParse(err.to_string())
    }
}

/// A single record from the product catalog CSV file.
///
/// The CSV format mirrors the specification form:
/// - `code`: unique product code, the upsert key
/// - `name`: display name
/// - `length_mm`, `breadth_mm`, `height_mm`: internal box dimensions
/// - `ply`: board ply count (3, 5, 7 or 9)
/// - `paper`: paper type code (K, V or VK)
/// - `wastage_percent`: production wastage, e.g. 3.5
/// - `top` .. `bottom`: per-layer GSM values (empty for unused slots)
/// - `bf`: burst factor of the board (empty if not recorded)
///
/// The quantity is not part of the catalog; it is chosen per quotation.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ProductRecord {
    pub code: String,
    pub name: String,
    pub length_mm: Decimal,
    pub breadth_mm: Decimal,
    pub height_mm: Decimal,
    pub ply: u32,
    pub paper: String,
    pub wastage_percent: Decimal,
    #[serde(deserialize_with = "deserialize_optional_u32")]
    pub top: Option<u32>,
    #[serde(deserialize_with = "deserialize_optional_u32")]
    pub flute1: Option<u32>,
    #[serde(deserialize_with = "deserialize_optional_u32")]
    pub middle: Option<u32>,
    #[serde(deserialize_with = "deserialize_optional_u32")]
    pub liner2: Option<u32>,
    #[serde(deserialize_with = "deserialize_optional_u32")]
    pub flute2: Option<u32>,
    #[serde(deserialize_with = "deserialize_optional_u32")]
    pub liner3: Option<u32>,
    #[serde(deserialize_with = "deserialize_optional_u32")]
    pub flute3: Option<u32>,
    #[serde(deserialize_with = "deserialize_optional_u32")]
    pub liner4: Option<u32>,
    #[serde(deserialize_with = "deserialize_optional_u32")]
    pub flute4: Option<u32>,
    #[serde(deserialize_with = "deserialize_optional_u32")]
    pub bottom: Option<u32>,
    #[serde(deserialize_with = "deserialize_optional_decimal")]
    pub bf: Option<Decimal>,
}

impl ProductRecord {
    /// Converts the record into a catalog [`Product`].
    ///
    /// The quantity is left at zero; quotations set it when a line is
    /// created from the product.
    pub fn to_product(&self) -> Result<Product, CatalogLoaderError> {
        let paper_type = PaperType::parse(&self.paper).ok_or_else(|| {
            CatalogLoaderError::UnknownPaperType {
                product: self.code.clone(),
                code: self.paper.clone(),
            }
        })?;

        if !matches!(self.ply, 3 | 5 | 7 | 9) {
            return Err(CatalogLoaderError::UnsupportedPly {
                product: self.code.clone(),
                ply: self.ply,
            });
        }

        Ok(Product {
            code: self.code.clone(),
            name: self.name.clone(),
            spec: BoxSpecification {
                length_mm: self.length_mm,
                breadth_mm: self.breadth_mm,
                height_mm: self.height_mm,
                ply: self.ply,
                pieces: 0,
                paper_type,
                wastage_percent: self.wastage_percent,
                layers: LayerStack {
                    top: self.top.unwrap_or(0),
                    flute1: self.flute1.unwrap_or(0),
                    middle: self.middle.unwrap_or(0),
                    liner2: self.liner2.unwrap_or(0),
                    flute2: self.flute2.unwrap_or(0),
                    liner3: self.liner3.unwrap_or(0),
                    flute3: self.flute3.unwrap_or(0),
                    liner4: self.liner4.unwrap_or(0),
                    flute4: self.flute4.unwrap_or(0),
                    bottom: self.bottom.unwrap_or(0),
                },
            },
            burst_factor: self.bf,
        })
    }
}

fn deserialize_optional_u32<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    match s {
        Some(s) if s.trim().is_empty() => Ok(None),
        Some(s) => s
            .trim()
            .parse::<u32>()
            .map(Some)
            .map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}

fn deserialize_optional_decimal<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    match s {
        Some(s) if s.trim().is_empty() => Ok(None),
        Some(s) => s
            .trim()
            .parse::<Decimal>()
            .map(Some)
            .map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}

/// Loader for product catalog data from CSV files.
///
/// The loader reads CSV data and upserts it into a store via the
/// [`EstimatorStore`] trait, so it works with any backend. Products are
/// keyed by code, which makes reloading the same file idempotent.
pub struct CatalogLoader;

impl CatalogLoader {
    /// Parse product records from a CSV reader.
    ///
    /// Returns a vector of parsed records. The reader can be any type that
    /// implements `Read`, such as a file or a string slice.
    pub fn parse<R: Read>(reader: R) -> Result<Vec<ProductRecord>, CatalogLoaderError> {
        let mut csv_reader = csv::Reader::from_reader(reader);
        let mut records = Vec::new();

        for result in csv_reader.deserialize() {
            let record: ProductRecord = result?;
            records.push(record);
        }

        Ok(records)
    }

    /// Load product records into a store.
    ///
    /// The whole file is validated before anything is written: duplicate
    /// product codes, unknown paper types and unsupported ply counts all
    /// fail the load without touching the store. Existing products with
    /// matching codes are replaced.
    pub async fn load<S: EstimatorStore>(
        store: &S,
        records: &[ProductRecord],
    ) -> Result<usize, CatalogLoaderError> {
        let mut seen = HashSet::new();
        for record in records {
            if !seen.insert(record.code.as_str()) {
                return Err(CatalogLoaderError::DuplicateCode(record.code.clone()));
            }
        }

        let products = records
            .iter()
            .map(ProductRecord::to_product)
            .collect::<Result<Vec<_>, _>>()?;

        let mut upserted = 0;
        for product in &products {
            store.upsert_product(product).await?;
            upserted += 1;
        }

        Ok(upserted)
    }
}
