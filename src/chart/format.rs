//! Value formatting for tooltips, legends and stat cards

use serde::{Deserialize, Serialize};

/// How a chart renders a numeric value as text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueFormat {
    /// `$12.3K`
    CurrencyThousands,
    /// `1.2K`
    Thousands,
    /// `95%`, value printed as-is
    Percent,
    /// `12.5%` with one decimal
    PercentOneDecimal,
    /// `1.2M`, `3.4K` or a grouped integer below 1000
    Compact,
    /// Rounded integer with thousands separators
    Count,
    /// `$45,000`
    Dollars,
}

impl ValueFormat {
    pub fn format(&self, value: f64) -> String {
        match self {
            ValueFormat::CurrencyThousands => format!("${:.1}K", value / 1000.0),
            ValueFormat::Thousands => format!("{:.1}K", value / 1000.0),
            ValueFormat::Percent => format!("{}%", trim_float(value)),
            ValueFormat::PercentOneDecimal => format!("{:.1}%", value),
            ValueFormat::Compact => format_compact(value),
            ValueFormat::Count => group_thousands(value.round() as i64),
            ValueFormat::Dollars => format!("${}", group_thousands(value.round() as i64)),
        }
    }
}

/// `M`/`K` abbreviation with one decimal, grouped integer below 1000
pub fn format_compact(value: f64) -> String {
    if value >= 1_000_000.0 {
        format!("{:.1}M", value / 1_000_000.0)
    } else if value >= 1_000.0 {
        format!("{:.1}K", value / 1_000.0)
    } else {
        group_thousands(value.round() as i64)
    }
}

/// Integer with `,` thousands separators
pub fn group_thousands(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if value < 0 {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Print a float without a trailing `.0` when it is integral
fn trim_float(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metric_formats() {
        assert_eq!(ValueFormat::CurrencyThousands.format(12_345.0), "$12.3K");
        assert_eq!(ValueFormat::Thousands.format(1_900.0), "1.9K");
        assert_eq!(ValueFormat::Percent.format(95.0), "95%");
        assert_eq!(ValueFormat::Percent.format(82.5), "82.5%");
        assert_eq!(ValueFormat::PercentOneDecimal.format(4.26), "4.3%");
        assert_eq!(ValueFormat::Dollars.format(45_000.0), "$45,000");
    }

    #[test]
    fn test_compact() {
        assert_eq!(format_compact(2_500_000.0), "2.5M");
        assert_eq!(format_compact(12_400.0), "12.4K");
        assert_eq!(format_compact(999.4), "999");
    }

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1_000), "1,000");
        assert_eq!(group_thousands(1_234_567), "1,234,567");
        assert_eq!(group_thousands(-45_000), "-45,000");
    }
}
