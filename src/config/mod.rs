/// Inventory thresholds, expiry windows and paging settings from inventory.toml
pub mod inventory;

pub use inventory::{InventoryConfig, load_config, load_default_config};
