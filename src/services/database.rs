use crate::models::country::Country;
use rusqlite::{params, Connection, ErrorCode, OptionalExtension};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

#[derive(Error, Debug)]
pub enum DatabaseError {
    #[error("Database connection failed: {0}")]
    ConnectionFailed(String),
    #[error("Query failed: {0}")]
    QueryFailed(String),
    #[error("A country with code {0} already exists")]
    DuplicateCode(String),
    #[error("No country found with code {0}")]
    NotFound(String),
    #[error("SQLite error: {0}")]
    SqliteError(#[from] rusqlite::Error),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

const CREATE_COUNTRY_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS country (
    code TEXT PRIMARY KEY NOT NULL CHECK (length(code) = 3),
    name TEXT NOT NULL,
    internet_users REAL,
    adult_literacy_rate REAL
)
"#;

const SELECT_COLUMNS: &str = "SELECT code, name, internet_users, adult_literacy_rate FROM country";

/// Gateway to the country table.
///
/// Holds only the database location; every operation opens its own
/// connection and drops it before returning, so nothing stays open
/// between prompts.
pub struct DatabaseService {
    database_path: PathBuf,
}

impl DatabaseService {
    pub fn new(database_path: &Path) -> Result<Self, DatabaseError> {
        if let Some(parent) = database_path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let service = Self {
            database_path: database_path.to_path_buf(),
        };

        service.create_schema()?;
        info!("Country store ready at {}", database_path.display());

        Ok(service)
    }

    pub fn database_path(&self) -> &Path {
        &self.database_path
    }

    fn connect(&self) -> Result<Connection, DatabaseError> {
        Connection::open(&self.database_path).map_err(|e| {
            DatabaseError::ConnectionFailed(format!("{}: {}", self.database_path.display(), e))
        })
    }

    fn create_schema(&self) -> Result<(), DatabaseError> {
        let conn = self.connect()?;
        conn.execute_batch(CREATE_COUNTRY_TABLE)?;
        Ok(())
    }

    /// Returns every stored country in insertion order.
    pub fn fetch_all(&self) -> Result<Vec<Country>, DatabaseError> {
        let conn = self.connect()?;
        let query_str = format!("{} ORDER BY rowid", SELECT_COLUMNS);

        let mut stmt = conn.prepare(&query_str)?;
        let countries = stmt
            .query_map([], Country::from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        debug!("Fetched {} countries", countries.len());
        Ok(countries)
    }

    pub fn fetch_by_code(&self, code: &str) -> Result<Option<Country>, DatabaseError> {
        let conn = self.connect()?;
        let query_str = format!("{} WHERE code = ?1", SELECT_COLUMNS);

        let country = conn
            .query_row(&query_str, params![code], Country::from_row)
            .optional()?;

        Ok(country)
    }

    pub fn count(&self) -> Result<u64, DatabaseError> {
        let conn = self.connect()?;
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM country", [], |row| row.get(0))?;
        u64::try_from(count)
            .map_err(|_| DatabaseError::QueryFailed(format!("Invalid row count: {}", count)))
    }

    /// Inserts a new country. The code length is expected to be checked by
    /// the caller; the table constraint still rejects anything else.
    pub fn create(&self, country: &Country) -> Result<(), DatabaseError> {
        let mut conn = self.connect()?;
        let tx = conn.transaction()?;

        insert_country(&tx, country)?;

        tx.commit()?;
        info!("Created country {}", country.code);
        Ok(())
    }

    /// Inserts all countries in a single transaction. Nothing is written
    /// unless every insert succeeds.
    pub fn create_many(&self, countries: &[Country]) -> Result<(), DatabaseError> {
        let mut conn = self.connect()?;
        let tx = conn.transaction()?;

        for country in countries {
            insert_country(&tx, country)?;
        }

        tx.commit()?;
        info!("Created {} countries", countries.len());
        Ok(())
    }

    /// Replaces name and both metrics of an existing country.
    pub fn update(&self, country: &Country) -> Result<(), DatabaseError> {
        let mut conn = self.connect()?;
        let tx = conn.transaction()?;

        let changed = tx.execute(
            "UPDATE country SET name = ?1, internet_users = ?2, adult_literacy_rate = ?3 WHERE code = ?4",
            params![
                country.name,
                country.internet_users,
                country.adult_literacy_rate,
                country.code
            ],
        )?;

        if changed == 0 {
            return Err(DatabaseError::NotFound(country.code.clone()));
        }

        tx.commit()?;
        info!("Updated country {}", country.code);
        Ok(())
    }

    /// Removes a country previously resolved through `fetch_by_code`.
    pub fn delete(&self, country: &Country) -> Result<(), DatabaseError> {
        let mut conn = self.connect()?;
        let tx = conn.transaction()?;

        let changed = tx.execute("DELETE FROM country WHERE code = ?1", params![country.code])?;

        if changed == 0 {
            return Err(DatabaseError::NotFound(country.code.clone()));
        }

        tx.commit()?;
        info!("Deleted country {}", country.code);
        Ok(())
    }
}

fn insert_country(conn: &Connection, country: &Country) -> Result<(), DatabaseError> {
    conn.execute(
        "INSERT INTO country (code, name, internet_users, adult_literacy_rate) VALUES (?1, ?2, ?3, ?4)",
        params![
            country.code,
            country.name,
            country.internet_users,
            country.adult_literacy_rate
        ],
    )
    .map_err(|e| map_insert_error(e, &country.code))?;
    Ok(())
}

fn map_insert_error(error: rusqlite::Error, code: &str) -> DatabaseError {
    match &error {
        rusqlite::Error::SqliteFailure(failure, _)
            if failure.code == ErrorCode::ConstraintViolation =>
        {
            if failure.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_PRIMARYKEY {
                DatabaseError::DuplicateCode(code.to_string())
            } else {
                DatabaseError::QueryFailed(error.to_string())
            }
        }
        _ => DatabaseError::SqliteError(error),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn service() -> (DatabaseService, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let service = DatabaseService::new(&temp_dir.path().join("countries.db")).unwrap();
        (service, temp_dir)
    }

    #[test]
    fn creates_missing_parent_directories() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("dir").join("countries.db");

        let service = DatabaseService::new(&path).unwrap();

        assert!(path.exists());
        assert_eq!(service.count().unwrap(), 0);
    }

    #[test]
    fn duplicate_code_is_reported() {
        let (service, _dir) = service();
        let country = Country::new("USA", "United States", Some(87.0), Some(99.0));

        service.create(&country).unwrap();
        let err = service.create(&country).unwrap_err();

        assert!(matches!(err, DatabaseError::DuplicateCode(code) if code == "USA"));
        assert_eq!(service.count().unwrap(), 1);
    }

    #[test]
    fn table_rejects_wrong_length_codes() {
        let (service, _dir) = service();
        let country = Country::new("US", "United States", None, None);

        let err = service.create(&country).unwrap_err();

        assert!(matches!(err, DatabaseError::QueryFailed(_)));
        assert_eq!(service.count().unwrap(), 0);
    }

    #[test]
    fn create_many_rolls_back_on_failure() {
        let (service, _dir) = service();
        let countries = [
            Country::new("FRA", "France", Some(80.5), None),
            Country::new("DEU", "Germany", None, Some(99.0)),
            Country::new("FRA", "France again", None, None),
        ];

        let err = service.create_many(&countries).unwrap_err();

        assert!(matches!(err, DatabaseError::DuplicateCode(code) if code == "FRA"));
        assert_eq!(service.count().unwrap(), 0);
    }

    #[test]
    fn update_of_missing_country_writes_nothing() {
        let (service, _dir) = service();
        let ghost = Country::new("XXX", "Nowhere", Some(1.0), Some(2.0));

        let err = service.update(&ghost).unwrap_err();

        assert!(matches!(err, DatabaseError::NotFound(_)));
        assert!(service.fetch_by_code("XXX").unwrap().is_none());
    }
}
