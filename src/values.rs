//! Boundary normalization for numeric fields.
//!
//! Dashboard documents carry readings as either JSON numbers or numeric
//! strings (and sometimes nothing at all). They are parsed once here so the
//! rule modules only ever see `Option<f64>`.

use serde::{Deserialize, Serialize};

// ---

/// A numeric field as it arrives from a document or request body.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NumericInput {
    // ---
    Number(f64),
    Text(String),
    #[default]
    Missing,
}

impl NumericInput {
    // ---
    /// Normalize to a finite number, or `None` when the input is absent or
    /// not a number.
    pub fn to_f64(&self) -> Option<f64> {
        // ---
        let value = match self {
            NumericInput::Number(v) => Some(*v),
            NumericInput::Text(s) => s.trim().parse::<f64>().ok(),
            NumericInput::Missing => None,
        };
        value.filter(|v| v.is_finite())
    }
}

impl From<f64> for NumericInput {
    fn from(value: f64) -> Self {
        NumericInput::Number(value)
    }
}

impl From<Option<f64>> for NumericInput {
    fn from(value: Option<f64>) -> Self {
        value.map_or(NumericInput::Missing, NumericInput::Number)
    }
}

impl From<&str> for NumericInput {
    fn from(value: &str) -> Self {
        NumericInput::Text(value.to_string())
    }
}

/// Format a number the way the dashboard displays it: `,` thousands
/// separators and at most three fraction digits, trailing zeros trimmed.
///
/// Non-finite values render as `N/A`.
pub fn format_number(value: f64) -> String {
    // ---
    if !value.is_finite() {
        return "N/A".to_string();
    }

    // Past 1e15 there are no fraction digits left to round, and scaling
    // could overflow
    let rounded = if value.abs() >= 1e15 {
        value
    } else {
        (value * 1000.0).round() / 1000.0
    };
    let text = format!("{:.3}", rounded.abs());
    let (int_part, frac_part) = text.split_once('.').unwrap_or((text.as_str(), ""));
    let frac = frac_part.trim_end_matches('0');

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let mut out = String::with_capacity(grouped.len() + frac.len() + 2);
    if rounded < 0.0 {
        out.push('-');
    }
    out.push_str(&grouped);
    if !frac.is_empty() {
        out.push('.');
        out.push_str(frac);
    }
    out
}

/// Format an optional reading, rendering a missing value as `N/A`.
pub fn format_optional(value: Option<f64>) -> String {
    value.map_or_else(|| "N/A".to_string(), format_number)
}

#[cfg(test)]
mod tests {
    // ---
    use super::*;

    #[test]
    fn test_numeric_input_parsing() {
        // ---
        assert_eq!(NumericInput::from(91000.0).to_f64(), Some(91000.0));
        assert_eq!(NumericInput::from(" 91000.5 ").to_f64(), Some(91000.5));
        assert_eq!(NumericInput::from("abc").to_f64(), None);
        assert_eq!(NumericInput::from("").to_f64(), None);
        assert_eq!(NumericInput::from("NaN").to_f64(), None);
        assert_eq!(NumericInput::Missing.to_f64(), None);
        assert_eq!(NumericInput::from(f64::NAN).to_f64(), None);
    }

    #[test]
    fn test_numeric_input_from_json() {
        // ---
        let values: Vec<NumericInput> =
            serde_json::from_str(r#"[12, 3.5, "42", null, "n/a"]"#).unwrap();
        let parsed: Vec<Option<f64>> = values.iter().map(NumericInput::to_f64).collect();

        assert_eq!(parsed, vec![Some(12.0), Some(3.5), Some(42.0), None, None]);
    }

    #[test]
    fn test_format_number_grouping() {
        // ---
        assert_eq!(format_number(0.0), "0");
        assert_eq!(format_number(999.0), "999");
        assert_eq!(format_number(1000.0), "1,000");
        assert_eq!(format_number(95000.0), "95,000");
        assert_eq!(format_number(1234567.0), "1,234,567");
    }

    #[test]
    fn test_format_number_fractions_and_sign() {
        // ---
        assert_eq!(format_number(95000.5), "95,000.5");
        assert_eq!(format_number(10001.25), "10,001.25");
        assert_eq!(format_number(1.23456), "1.235");
        assert_eq!(format_number(-1200.0), "-1,200");
        assert_eq!(format_number(-0.0001), "0");
    }

    #[test]
    fn test_format_non_finite() {
        // ---
        assert_eq!(format_number(f64::NAN), "N/A");
        assert_eq!(format_number(f64::INFINITY), "N/A");
        assert_eq!(format_optional(None), "N/A");
        assert_eq!(format_optional(Some(14500.0)), "14,500");
    }

    #[test]
    fn test_format_huge_values() {
        // ---
        let huge = format_number(1e306);
        assert!(!huge.contains("inf"));
        assert!(huge.contains(','));
        let digits = huge.chars().filter(char::is_ascii_digit).count();
        assert!((306..=307).contains(&digits));

        assert_eq!(format_number(1e15), "1,000,000,000,000,000");
        assert!(format_number(-f64::MAX).starts_with("-179,769"));
    }
}
