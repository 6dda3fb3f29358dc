use narcotk_common::config::Config;
use narcotk_core::{InventoryRepository, SqliteStorage};
use tracing::info;

/// Creates the database file if needed, then its tables.
pub fn setup_db(cfg: &Config) -> anyhow::Result<()> {
    let storage = SqliteStorage::create(&cfg.database)?;
    let mut repo = InventoryRepository::new(storage);
    repo.setup()?;

    info!("Database ready at {}", cfg.database.display());
    Ok(())
}
