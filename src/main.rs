use chrono::Local;
use dotenvy::dotenv;
use medstock::{
    InventoryView, Result,
    config,
    core::{ExportFormat, ExportPayload},
    errors::Error,
    models::MedicineRecord,
};
use std::env;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file, non-fatal since env vars can be set externally
    dotenv().ok();
    info!("Attempted to load .env file.");

    // 3. Load inventory settings
    let inventory_config = config::load_default_config()
        .inspect_err(|e| error!("Critical error loading inventory configuration: {}", e))?;

    // 4. Load the medicine listing as returned by GET /api/medicines
    let data_path = env::var("MEDSTOCK_DATA")
        .inspect_err(|e| error!("MEDSTOCK_DATA not found: {}", e))
        .map_err(|e| Error::Config {
            message: format!("MEDSTOCK_DATA must point at a medicines JSON file: {e}"),
        })?;
    let body = std::fs::read_to_string(&data_path)?;
    let records = MedicineRecord::list_from_json(&body)?;

    let view = InventoryView::with_records(inventory_config, records)?;
    let today = Local::now().date_naive();

    // 5. Report the dashboard tiles and alerts
    for tile in view.compute_summary(today).tiles() {
        info!("{}: {}", tile.title, tile.value);
    }
    for record in view.expiry_alerts(today) {
        warn!(
            "{} expires on {} ({} units left)",
            record.name, record.expiry_date, record.quantity
        );
    }

    // 6. Optional CSV export
    if let Ok(export_path) = env::var("MEDSTOCK_EXPORT") {
        if let ExportPayload::Csv(text) = view.export_rows(ExportFormat::Csv)? {
            std::fs::write(&export_path, text)
                .inspect(|_| info!("Wrote CSV export to {}", export_path))?;
        }
    }

    Ok(())
}
