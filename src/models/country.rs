use rusqlite::Row;
use serde::{Deserialize, Serialize};

/// Length every country code must have.
pub const CODE_LENGTH: usize = 3;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Country {
    pub code: String,
    pub name: String,
    #[serde(default)]
    pub internet_users: Option<f64>,
    #[serde(default)]
    pub adult_literacy_rate: Option<f64>,
}

impl Country {
    pub fn new(
        code: impl Into<String>,
        name: impl Into<String>,
        internet_users: Option<f64>,
        adult_literacy_rate: Option<f64>,
    ) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            internet_users,
            adult_literacy_rate,
        }
    }

    /// Expects the columns in `code, name, internet_users, adult_literacy_rate` order.
    pub fn from_row(row: &Row) -> Result<Self, rusqlite::Error> {
        Ok(Self {
            code: row.get(0)?,
            name: row.get(1)?,
            internet_users: row.get(2)?,
            adult_literacy_rate: row.get(3)?,
        })
    }
}

/// Trims and uppercases user-typed codes so lookups match stored keys.
pub fn normalize_code(input: &str) -> String {
    input.trim().to_uppercase()
}

pub fn is_valid_code(code: &str) -> bool {
    code.chars().count() == CODE_LENGTH
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_codes() {
        assert_eq!(normalize_code("  usa \n"), "USA");
        assert_eq!(normalize_code("afg"), "AFG");
    }

    #[test]
    fn validates_code_length() {
        assert!(is_valid_code("USA"));
        assert!(!is_valid_code("US"));
        assert!(!is_valid_code("USAA"));
        assert!(!is_valid_code(""));
    }

    #[test]
    fn deserializes_seed_entries_with_missing_metrics() {
        let json = r#"{"code":"ARG","name":"Argentina","internetUsers":59.9}"#;
        let country: Country = serde_json::from_str(json).unwrap();

        assert_eq!(
            country,
            Country::new("ARG", "Argentina", Some(59.9), None)
        );
    }
}
