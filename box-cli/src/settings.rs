//! Settings file for the estimator CLI.
//!
//! Material rates live in a TOML file so they can be edited without
//! touching the catalog:
//!
//! ```toml
//! currency = "₹"
//! tax_percent = 18
//!
//! [pricing]
//! kraft_cost_per_kg = 30
//! virgin_cost_per_kg = 50
//! conversion_cost_per_kg = 5
//! ```
//!
//! `currency` and `tax_percent` are optional; rates are not.

use std::fs;
use std::path::Path;

use box_core::MaterialPricing;
use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Failed to read settings file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid settings file '{path}': {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub pricing: MaterialPricing,

    /// Currency symbol used for display only.
    #[serde(default = "default_currency")]
    pub currency: String,

    /// Tax percentage applied on estimate invoices when the command line
    /// does not override it.
    #[serde(default)]
    pub tax_percent: Option<Decimal>,
}

fn default_currency() -> String {
    "₹".to_string()
}

impl Settings {
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let raw = fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.display().to_string(),
            source,
        })?;

        toml::from_str(&raw).map_err(|source| SettingsError::Parse {
            path: path.display().to_string(),
            source,
        })
    }
}
