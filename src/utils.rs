//! Shared utilities for formatting and dtype classification.

use polars::prelude::*;

// =============================================================================
// Data Type Utilities
// =============================================================================

/// Check if a DataType is numeric (integer or float).
#[inline]
pub fn is_numeric_dtype(dtype: &DataType) -> bool {
    matches!(
        dtype,
        DataType::Int8
            | DataType::Int16
            | DataType::Int32
            | DataType::Int64
            | DataType::UInt8
            | DataType::UInt16
            | DataType::UInt32
            | DataType::UInt64
            | DataType::Float32
            | DataType::Float64
    )
}

/// Check if a DataType can hold discrete categorical codes.
#[inline]
pub fn is_discrete_dtype(dtype: &DataType) -> bool {
    is_numeric_dtype(dtype) || matches!(dtype, DataType::String | DataType::Boolean)
}

/// Extract an integral code from a scalar value.
///
/// Integers pass through; floats only when they have no fractional part.
/// Everything else (strings, null, booleans) yields `None`.
pub fn integral_code(value: &AnyValue) -> Option<i64> {
    match value {
        AnyValue::Int8(v) => Some(i64::from(*v)),
        AnyValue::Int16(v) => Some(i64::from(*v)),
        AnyValue::Int32(v) => Some(i64::from(*v)),
        AnyValue::Int64(v) => Some(*v),
        AnyValue::UInt8(v) => Some(i64::from(*v)),
        AnyValue::UInt16(v) => Some(i64::from(*v)),
        AnyValue::UInt32(v) => Some(i64::from(*v)),
        AnyValue::UInt64(v) => i64::try_from(*v).ok(),
        AnyValue::Float32(v) if v.fract() == 0.0 => Some(*v as i64),
        AnyValue::Float64(v) if v.fract() == 0.0 => Some(*v as i64),
        _ => None,
    }
}

// =============================================================================
// Number Formatting
// =============================================================================

/// Format an integer with thousands separators: 1234567 -> "1,234,567".
pub fn format_thousands(value: i64) -> String {
    let negative = value < 0;
    let digits = value.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (offset, ch) in digits.chars().enumerate() {
        if offset > 0 && (digits.len() - offset) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if negative { format!("-{grouped}") } else { grouped }
}

/// Format a float as a thousands-grouped integer (rounded to zero decimals).
pub fn format_grouped_round(value: f64) -> String {
    format_thousands(value.round() as i64)
}

/// Format a ratio as a one-decimal percent string: 0.4 -> "40.0%".
pub fn format_percent(ratio: f64) -> String {
    format!("{:.1}%", ratio * 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    // ==================== format_thousands tests ====================

    #[test]
    fn test_format_thousands_small() {
        assert_eq!(format_thousands(0), "0");
        assert_eq!(format_thousands(999), "999");
    }

    #[test]
    fn test_format_thousands_grouping() {
        assert_eq!(format_thousands(1_000), "1,000");
        assert_eq!(format_thousands(1_234_567), "1,234,567");
    }

    #[test]
    fn test_format_thousands_negative() {
        assert_eq!(format_thousands(-1_234), "-1,234");
    }

    #[test]
    fn test_format_grouped_round() {
        assert_eq!(format_grouped_round(167_484.32), "167,484");
        assert_eq!(format_grouped_round(2.5), "3");
    }

    // ==================== format_percent tests ====================

    #[test]
    fn test_format_percent() {
        assert_eq!(format_percent(0.4), "40.0%");
        assert_eq!(format_percent(0.2), "20.0%");
        assert_eq!(format_percent(0.0105), "1.1%");
    }

    // ==================== dtype tests ====================

    #[test]
    fn test_is_numeric_dtype() {
        assert!(is_numeric_dtype(&DataType::Int64));
        assert!(is_numeric_dtype(&DataType::Float32));
        assert!(!is_numeric_dtype(&DataType::String));
    }

    #[test]
    fn test_is_discrete_dtype() {
        assert!(is_discrete_dtype(&DataType::Int64));
        assert!(is_discrete_dtype(&DataType::String));
        assert!(!is_discrete_dtype(&DataType::Date));
    }

    // ==================== integral_code tests ====================

    #[test]
    fn test_integral_code_integers() {
        assert_eq!(integral_code(&AnyValue::Int64(4)), Some(4));
        assert_eq!(integral_code(&AnyValue::Int32(-1)), Some(-1));
        assert_eq!(integral_code(&AnyValue::UInt8(2)), Some(2));
    }

    #[test]
    fn test_integral_code_floats() {
        assert_eq!(integral_code(&AnyValue::Float64(3.0)), Some(3));
        assert_eq!(integral_code(&AnyValue::Float64(3.5)), None);
    }

    #[test]
    fn test_integral_code_non_numeric() {
        assert_eq!(integral_code(&AnyValue::Null), None);
        assert_eq!(integral_code(&AnyValue::String("2")), None);
        assert_eq!(integral_code(&AnyValue::Boolean(true)), None);
    }
}
