use crate::models::country::Country;
use crate::models::statistics::{CountryStatistics, MetricSummary};

pub fn compute(countries: &[Country]) -> CountryStatistics {
    CountryStatistics {
        internet_users: summarize(countries, |c| c.internet_users),
        adult_literacy_rate: summarize(countries, |c| c.adult_literacy_rate),
    }
}

/// Summarizes one metric over the countries that report it. On ties the
/// first country encountered keeps the max/min slot.
pub fn summarize<F>(countries: &[Country], metric: F) -> MetricSummary
where
    F: Fn(&Country) -> Option<f64>,
{
    let mut max: Option<(&Country, f64)> = None;
    let mut min: Option<(&Country, f64)> = None;
    let mut sum = 0.0;
    let mut count = 0usize;

    for country in countries {
        let Some(value) = metric(country) else {
            continue;
        };

        sum += value;
        count += 1;

        if max.map_or(true, |(_, current)| value > current) {
            max = Some((country, value));
        }
        if min.map_or(true, |(_, current)| value < current) {
            min = Some((country, value));
        }
    }

    if count == 0 {
        return MetricSummary::empty();
    }

    MetricSummary {
        average: sum / count as f64,
        max: max.map(|(country, _)| country.clone()),
        min: min.map(|(country, _)| country.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<Country> {
        vec![
            Country::new("USA", "United States", Some(87.0), Some(99.0)),
            Country::new("AFG", "Afghanistan", Some(11.0), Some(43.0)),
        ]
    }

    #[test]
    fn computes_average_max_and_min() {
        let stats = compute(&sample());

        assert_eq!(stats.internet_users.average, 49.0);
        assert_eq!(stats.internet_users.max.as_ref().unwrap().code, "USA");
        assert_eq!(stats.internet_users.min.as_ref().unwrap().code, "AFG");
        assert_eq!(stats.adult_literacy_rate.average, 71.0);
        assert_eq!(stats.adult_literacy_rate.max.as_ref().unwrap().code, "USA");
        assert_eq!(stats.adult_literacy_rate.min.as_ref().unwrap().code, "AFG");
    }

    #[test]
    fn empty_input_has_zero_average_and_no_holders() {
        let stats = compute(&[]);

        assert_eq!(stats.internet_users, MetricSummary::empty());
        assert_eq!(stats.adult_literacy_rate, MetricSummary::empty());
    }

    #[test]
    fn all_null_metric_does_not_affect_the_other() {
        let countries = vec![
            Country::new("USA", "United States", Some(87.0), None),
            Country::new("AFG", "Afghanistan", Some(11.0), None),
        ];

        let stats = compute(&countries);

        assert_eq!(stats.adult_literacy_rate, MetricSummary::empty());
        assert_eq!(stats.internet_users.average, 49.0);
    }

    #[test]
    fn null_entries_are_skipped() {
        let countries = vec![
            Country::new("AAA", "Alpha", None, Some(10.0)),
            Country::new("BBB", "Beta", Some(30.0), None),
            Country::new("CCC", "Gamma", Some(10.0), Some(50.0)),
        ];

        let stats = compute(&countries);

        assert_eq!(stats.internet_users.average, 20.0);
        assert_eq!(stats.internet_users.min.unwrap().code, "CCC");
        assert_eq!(stats.adult_literacy_rate.average, 30.0);
        assert_eq!(stats.adult_literacy_rate.max.unwrap().code, "CCC");
    }

    #[test]
    fn ties_keep_the_first_country() {
        let countries = vec![
            Country::new("AAA", "Alpha", Some(50.0), None),
            Country::new("BBB", "Beta", Some(50.0), None),
        ];

        let stats = compute(&countries);

        assert_eq!(stats.internet_users.max.unwrap().code, "AAA");
        assert_eq!(stats.internet_users.min.unwrap().code, "AAA");
    }
}
