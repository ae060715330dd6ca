use crate::config::Config;
use crate::models::country::{is_valid_code, normalize_code, Country};
use crate::services::database::{DatabaseError, DatabaseService};
use anyhow::Context;
use std::path::Path;
use thiserror::Error;
use tracing::{info, warn};

#[derive(Error, Debug)]
pub enum SeedError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
    #[error("Invalid country code in seed file: '{0}'")]
    InvalidCode(String),
    #[error("Database error: {0}")]
    DatabaseError(#[from] DatabaseError),
}

/// Imports countries from a JSON array when the table has no rows yet.
/// Returns how many records were inserted.
pub fn seed_countries(db: &DatabaseService, seed_path: &Path) -> Result<usize, SeedError> {
    if db.count()? > 0 {
        info!("Country table already populated, skipping seed");
        return Ok(0);
    }

    let content = std::fs::read_to_string(seed_path)?;
    let entries: Vec<Country> = serde_json::from_str(&content)?;

    let mut countries = Vec::with_capacity(entries.len());
    for entry in entries {
        let code = normalize_code(&entry.code);
        if !is_valid_code(&code) {
            return Err(SeedError::InvalidCode(entry.code));
        }
        countries.push(Country { code, ..entry });
    }

    db.create_many(&countries)?;

    info!(
        "Seeded {} countries from {}",
        countries.len(),
        seed_path.display()
    );
    Ok(countries.len())
}

/// Opens the store and applies the optional seed file. Any failure here
/// means the tool cannot start.
pub fn ensure_database_is_ready(config: &Config) -> anyhow::Result<DatabaseService> {
    let db = DatabaseService::new(config.database_path()).with_context(|| {
        format!(
            "Failed to open country database at {}",
            config.database_path().display()
        )
    })?;

    if let Some(seed_path) = config.seed_file() {
        if !seed_path.exists() {
            warn!("Seed file {} not found, skipping", seed_path.display());
            return Ok(db);
        }
        seed_countries(&db, seed_path)
            .with_context(|| format!("Failed to seed from {}", seed_path.display()))?;
    }

    Ok(db)
}
