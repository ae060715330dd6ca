use crate::models::country::Country;

/// Aggregates for one optional metric across a set of countries.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricSummary {
    pub average: f64,
    pub max: Option<Country>,
    pub min: Option<Country>,
}

impl MetricSummary {
    pub fn empty() -> Self {
        Self {
            average: 0.0,
            max: None,
            min: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CountryStatistics {
    pub internet_users: MetricSummary,
    pub adult_literacy_rate: MetricSummary,
}
