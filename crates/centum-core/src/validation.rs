//! # Validation Module
//!
//! Shape and type checks for values arriving through the untyped boundary
//! (attribute maps, JSON documents, hydrators).
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Rust types                                                   │
//! │  ├── Money / DecimalNumber / MoneyCollection APIs take typed values    │
//! │  └── i64 amounts, f64 floats: wrong types cannot be expressed          │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE (serde_json::Value inputs)                        │
//! │  ├── integer vs float vs string distinctions                           │
//! │  └── range checks (fraction digits, finiteness)                        │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Currency registry                                            │
//! │  └── code support, lazily validated table data                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use centum_core::validation::{validate_float, validate_integer};
//! use serde_json::json;
//!
//! assert_eq!(validate_integer("Amount", &json!(1234)).unwrap(), Some(1234));
//! assert_eq!(validate_integer("Amount", &json!(null)).unwrap(), None);
//! assert!(validate_float("Amount", &json!(12)).is_err());
//! ```

use serde_json::Value;

use crate::error::ValidationError;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Largest fraction-digit count a decimal factor can carry.
pub const MAX_FRACTION_DIGITS: u32 = 28;

// =============================================================================
// Type Names
// =============================================================================

/// Returns the type name reported in validation messages.
pub fn value_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) if n.is_f64() => "float",
        Value::Number(_) => "integer",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

// =============================================================================
// Scalar Validators
// =============================================================================

/// Validates an integer-or-null value.
///
/// ## Rules
/// - `null` yields `None` (callers treat it as zero)
/// - Integers must fit in an `i64`
/// - Floats, strings and everything else are rejected
pub fn validate_integer(field: &str, value: &Value) -> ValidationResult<Option<i64>> {
    match value {
        Value::Null => Ok(None),
        Value::Number(n) if n.is_i64() => Ok(n.as_i64()),
        Value::Number(n) if n.is_u64() => Err(ValidationError::TooLarge {
            field: field.to_string(),
            max: i64::MAX,
            given: n.to_string(),
        }),
        other => Err(ValidationError::NotAnInteger {
            field: field.to_string(),
            given: value_type_name(other).to_string(),
        }),
    }
}

/// Validates a genuine floating-point value.
///
/// Integer JSON numbers are rejected so that integer cents are never
/// mistaken for a major-unit float.
///
/// ## Example
/// ```rust
/// use centum_core::validation::validate_float;
/// use serde_json::json;
///
/// assert_eq!(validate_float("Amount", &json!(12.34)).unwrap(), 12.34);
/// assert!(validate_float("Amount", &json!("12.34")).is_err());
/// ```
pub fn validate_float(field: &str, value: &Value) -> ValidationResult<f64> {
    match value {
        Value::Number(n) if n.is_f64() => match n.as_f64() {
            Some(f) => validate_finite(field, f),
            None => Err(not_a_float(field, value)),
        },
        other => Err(not_a_float(field, other)),
    }
}

fn not_a_float(field: &str, value: &Value) -> ValidationError {
    ValidationError::NotAFloat {
        field: field.to_string(),
        given: value_type_name(value).to_string(),
    }
}

/// Rejects NaN and infinities.
pub fn validate_finite(field: &str, value: f64) -> ValidationResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ValidationError::NotFinite {
            field: field.to_string(),
            given: value.to_string(),
        })
    }
}

/// Validates a currency code value (string or null).
///
/// Returns the code untouched; upper-casing and support checks belong to
/// [`crate::money::Money::set_currency`].
pub fn validate_currency_value(value: &Value) -> ValidationResult<Option<&str>> {
    match value {
        Value::Null => Ok(None),
        Value::String(code) => Ok(Some(code.as_str())),
        other => Err(ValidationError::NotAString {
            field: "Currency".to_string(),
            given: value_type_name(other).to_string(),
        }),
    }
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a fraction-digit count.
///
/// ## Rules
/// - Must not be negative
/// - Must not exceed [`MAX_FRACTION_DIGITS`]
///
/// ## Example
/// ```rust
/// use centum_core::validation::validate_fraction_digits;
///
/// assert_eq!(validate_fraction_digits(2).unwrap(), 2);
/// assert!(validate_fraction_digits(-1).is_err());
/// assert!(validate_fraction_digits(29).is_err());
/// ```
pub fn validate_fraction_digits(fraction_digits: i64) -> ValidationResult<u32> {
    if fraction_digits < 0 {
        return Err(ValidationError::Negative {
            field: "Fraction digits".to_string(),
            given: fraction_digits,
        });
    }

    if fraction_digits > i64::from(MAX_FRACTION_DIGITS) {
        return Err(ValidationError::TooLarge {
            field: "Fraction digits".to_string(),
            max: i64::from(MAX_FRACTION_DIGITS),
            given: fraction_digits.to_string(),
        });
    }

    Ok(fraction_digits as u32)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_value_type_name() {
        assert_eq!(value_type_name(&json!(null)), "null");
        assert_eq!(value_type_name(&json!(true)), "boolean");
        assert_eq!(value_type_name(&json!(1)), "integer");
        assert_eq!(value_type_name(&json!(1.5)), "float");
        assert_eq!(value_type_name(&json!("x")), "string");
        assert_eq!(value_type_name(&json!([1])), "array");
        assert_eq!(value_type_name(&json!({"a": 1})), "object");
    }

    #[test]
    fn test_validate_integer() {
        assert_eq!(validate_integer("Amount", &json!(33)).unwrap(), Some(33));
        assert_eq!(validate_integer("Amount", &json!(-7)).unwrap(), Some(-7));
        assert_eq!(validate_integer("Amount", &json!(null)).unwrap(), None);

        let err = validate_integer("Amount", &json!("abc")).unwrap_err();
        assert_eq!(err.to_string(), "Amount must be an integer, \"string\" given");

        assert!(validate_integer("Amount", &json!(1.5)).is_err());
        assert!(matches!(
            validate_integer("Amount", &json!(u64::MAX)),
            Err(ValidationError::TooLarge { .. })
        ));
    }

    #[test]
    fn test_validate_float() {
        assert_eq!(validate_float("Amount", &json!(12.34)).unwrap(), 12.34);
        assert_eq!(validate_float("Amount", &json!(12.0)).unwrap(), 12.0);

        let err = validate_float("Amount", &json!("12.34")).unwrap_err();
        assert_eq!(err.to_string(), "Amount must be a float, string given");

        assert!(validate_float("Amount", &json!(1234)).is_err());
        assert!(validate_float("Amount", &json!(null)).is_err());
    }

    #[test]
    fn test_validate_finite() {
        assert!(validate_finite("factor", 1.5).is_ok());
        assert!(validate_finite("factor", f64::NAN).is_err());
        assert!(validate_finite("factor", f64::INFINITY).is_err());
    }

    #[test]
    fn test_validate_currency_value() {
        assert_eq!(validate_currency_value(&json!("eur")).unwrap(), Some("eur"));
        assert_eq!(validate_currency_value(&json!(null)).unwrap(), None);
        assert!(validate_currency_value(&json!(978)).is_err());
    }

    #[test]
    fn test_validate_fraction_digits() {
        assert_eq!(validate_fraction_digits(0).unwrap(), 0);
        assert_eq!(validate_fraction_digits(28).unwrap(), 28);
        assert!(validate_fraction_digits(-1).is_err());
        assert!(validate_fraction_digits(29).is_err());
    }
}
