use crate::models::country::Country;
use crate::models::statistics::{CountryStatistics, MetricSummary};
use std::fmt::Write;

pub const MISSING_VALUE: &str = "--";
const NO_DATA: &str = "no data";
const NAME_WIDTH: usize = 30;
const LABEL_WIDTH: usize = 22;
const TABLE_RULE: &str =
    "---------------------------------------------------------------------------------------";
const STATS_RULE: &str = "--------------------------------------------------------------------";

/// Two decimals, or the placeholder when the value is missing.
pub fn format_decimal(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{:.2}", v),
        None => MISSING_VALUE.to_string(),
    }
}

fn truncate_name(name: &str) -> String {
    if name.chars().count() > NAME_WIDTH {
        let kept: String = name.chars().take(NAME_WIDTH - 3).collect();
        format!("{}...", kept)
    } else {
        name.to_string()
    }
}

pub fn render_countries(countries: &[Country]) -> String {
    let mut out = String::new();

    let _ = writeln!(out);
    let _ = writeln!(out, "COUNTRIES DATA");
    let _ = writeln!(out, "{}", TABLE_RULE);
    let _ = writeln!(
        out,
        "{:<5} {:>30} {:>25} {:>20}",
        "Code", "Name", "Internet Users", "Literacy Rate"
    );
    let _ = writeln!(out, "{}", TABLE_RULE);

    for country in countries {
        let _ = writeln!(
            out,
            "{:<5} {:>30} {:>25} {:>20}",
            country.code,
            truncate_name(&country.name),
            format_decimal(country.internet_users),
            format_decimal(country.adult_literacy_rate)
        );
    }

    out
}

fn holder_line(label: &str, holder: Option<&Country>, metric: fn(&Country) -> Option<f64>) -> String {
    match holder.and_then(|c| metric(c).map(|value| (c, value))) {
        Some((country, value)) => format!(
            "{:<width$} : {:.2} ({})",
            label,
            value,
            country.name,
            width = LABEL_WIDTH
        ),
        None => format!("{:<width$} : {}", label, NO_DATA, width = LABEL_WIDTH),
    }
}

fn metric_lines(
    out: &mut String,
    labels: [&str; 3],
    summary: &MetricSummary,
    metric: fn(&Country) -> Option<f64>,
) {
    let _ = writeln!(
        out,
        "{:<width$} : {:.2}",
        labels[0],
        summary.average,
        width = LABEL_WIDTH
    );
    let _ = writeln!(out, "{}", holder_line(labels[1], summary.max.as_ref(), metric));
    let _ = writeln!(out, "{}", holder_line(labels[2], summary.min.as_ref(), metric));
}

pub fn render_statistics(stats: &CountryStatistics) -> String {
    let mut out = String::new();

    let _ = writeln!(out);
    let _ = writeln!(out, "Statistics:");
    let _ = writeln!(out, "{}", STATS_RULE);

    metric_lines(
        &mut out,
        [
            "Average internet users",
            "Maximum internet users",
            "Minimum internet users",
        ],
        &stats.internet_users,
        |c| c.internet_users,
    );
    metric_lines(
        &mut out,
        [
            "Average literacy rate",
            "Maximum literacy rate",
            "Minimum literacy rate",
        ],
        &stats.adult_literacy_rate,
        |c| c.adult_literacy_rate,
    );

    out
}

pub fn render_country_details(country: &Country) -> String {
    format!(
        "Name: {}\nInternet Users: {}\nLiteracy Rate: {}\n",
        country.name,
        format_decimal(country.internet_users),
        format_decimal(country.adult_literacy_rate)
    )
}
