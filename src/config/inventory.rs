//! Inventory thresholds and view settings loaded from a TOML file.
//!
//! The low-stock threshold and both expiry windows are named settings rather than
//! constants because screens disagree on them. A missing key takes its default.

use crate::errors::{Error, Result};
use serde::Deserialize;
use std::path::Path;
use tracing::{debug, info};

/// Environment variable naming the config file.
pub const CONFIG_PATH_ENV: &str = "MEDSTOCK_CONFIG";
/// Config file used when [`CONFIG_PATH_ENV`] is unset.
pub const DEFAULT_CONFIG_PATH: &str = "inventory.toml";

/// Settings that shape the derived views.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct InventoryConfig {
    /// A record is low on stock when its quantity is strictly below this
    pub low_stock_threshold: u32,
    /// Forward-looking expiry window (days) used by the list view and its alert banner
    pub list_expiry_window_days: u32,
    /// Forward-looking expiry window (days) used by the dashboard summary tiles
    pub summary_expiry_window_days: u32,
    /// Whether the search term also matches the manufacturer
    pub search_manufacturer: bool,
    /// Page sizes offered to the user
    pub page_size_options: Vec<usize>,
    /// Page size selected initially
    pub default_page_size: usize,
    /// Whether screens offer barcode/QR lookup
    pub barcode_scanning: bool,
}

impl Default for InventoryConfig {
    fn default() -> Self {
        Self {
            low_stock_threshold: 10,
            list_expiry_window_days: 7,
            summary_expiry_window_days: 30,
            search_manufacturer: false,
            page_size_options: vec![5, 10, 25],
            default_page_size: 10,
            barcode_scanning: false,
        }
    }
}

impl InventoryConfig {
    /// Checks that the settings are usable together.
    ///
    /// # Errors
    /// Returns `Error::Config` for zero page sizes or a default page size missing
    /// from the offered options.
    pub fn validate(&self) -> Result<()> {
        if self.page_size_options.is_empty() || self.page_size_options.contains(&0) {
            return Err(Error::Config {
                message: "page_size_options must be non-empty positive integers".to_string(),
            });
        }
        if !self.page_size_options.contains(&self.default_page_size) {
            return Err(Error::Config {
                message: format!(
                    "default_page_size {} is not one of {:?}",
                    self.default_page_size, self.page_size_options
                ),
            });
        }
        Ok(())
    }
}

/// Parses and validates a config document.
///
/// # Errors
/// Returns `Error::Config` if the TOML is malformed or fails validation.
pub fn parse_config(contents: &str) -> Result<InventoryConfig> {
    let config: InventoryConfig = toml::from_str(contents).map_err(|e| Error::Config {
        message: format!("Failed to parse inventory config: {e}"),
    })?;
    config.validate()?;
    Ok(config)
}

/// Loads inventory configuration from a TOML file.
///
/// # Errors
/// Returns an error if:
/// - The file cannot be read
/// - The TOML syntax is invalid
/// - The settings fail validation
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<InventoryConfig> {
    let path_ref = path.as_ref();
    debug!("Attempting to load inventory configuration from: {:?}", path_ref);
    let contents = std::fs::read_to_string(path_ref).map_err(|e| Error::Config {
        message: format!("Failed to read config file {}: {e}", path_ref.display()),
    })?;
    parse_config(&contents)
}

/// Loads configuration from `MEDSTOCK_CONFIG`, or from `./inventory.toml`.
///
/// Falls back to [`InventoryConfig::default`] only when no path was given and the
/// default file does not exist; an explicitly named file must be readable.
///
/// # Errors
/// Returns an error if the chosen file cannot be read or parsed.
pub fn load_default_config() -> Result<InventoryConfig> {
    match std::env::var(CONFIG_PATH_ENV) {
        Ok(path) => load_config(path),
        Err(_) if Path::new(DEFAULT_CONFIG_PATH).exists() => load_config(DEFAULT_CONFIG_PATH),
        Err(_) => {
            info!("No {DEFAULT_CONFIG_PATH} found, using default inventory settings.");
            Ok(InventoryConfig::default())
        }
    }
}
