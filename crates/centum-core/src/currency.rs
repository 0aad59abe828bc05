//! # Currency Registry
//!
//! ISO 4217 metadata (name, numeric code, fraction digits, sub-unit) keyed by
//! alphabetic code.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Where Currency Data Comes From                       │
//! │                                                                         │
//! │  1. Built-in table (currencies.toml, compiled in)                      │
//! │     Parsed once on first use → CurrencyRegistry::global()              │
//! │     Read-only for the life of the process                              │
//! │                                                                         │
//! │  2. Injected registry (CurrencyRegistry::from_toml_str)                │
//! │     Independent instance, passed explicitly to `*_in` methods          │
//! │     Used for custom tables and fault-injection tests                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Lazy Validation
//! `default_fraction_digits` and `sub_unit` are kept as raw TOML values.
//! A table holding a string where an integer belongs still loads; the
//! problem surfaces as [`ErrorKind::UnexpectedValue`](crate::ErrorKind) only
//! when that value is read.
//!
//! ## Table Format
//! ```toml
//! [[currency]]
//! code = "EUR"
//! name = "Euro"
//! numeric_code = 978
//! default_fraction_digits = 2
//! sub_unit = 100
//! ```

use std::collections::HashMap;
use std::sync::LazyLock;

use serde::Deserialize;
use tracing::{debug, error, info, warn};

use crate::error::{CoreError, CoreResult};

const BUILTIN_TABLE: &str = include_str!("../currencies.toml");

const FRACTION_DIGITS: &str = "default fraction digits";
const SUB_UNITS: &str = "sub-units";

static GLOBAL: LazyLock<CurrencyRegistry> = LazyLock::new(|| {
    match CurrencyRegistry::from_toml_str(BUILTIN_TABLE) {
        Ok(registry) => {
            info!(currencies = registry.len(), "loaded built-in currency table");
            registry
        }
        Err(err) => {
            error!(%err, "built-in currency table is invalid; no currency is supported");
            CurrencyRegistry::default()
        }
    }
});

// =============================================================================
// Currency Entry
// =============================================================================

/// One row of the currency table.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CurrencyEntry {
    /// ISO 4217 alphabetic code (e.g. "EUR").
    pub code: String,

    /// English currency name.
    pub name: String,

    /// ISO 4217 numeric code (e.g. 978).
    pub numeric_code: u16,

    /// Decimal places used for float conversion. Validated on read.
    pub default_fraction_digits: toml::Value,

    /// Minor units per major unit. Validated on read.
    pub sub_unit: toml::Value,
}

#[derive(Deserialize)]
struct CurrencyTable {
    #[serde(default)]
    currency: Vec<CurrencyEntry>,
}

// =============================================================================
// Currency Registry
// =============================================================================

/// Read-only lookup table of supported currencies.
#[derive(Debug, Clone, Default)]
pub struct CurrencyRegistry {
    entries: Vec<CurrencyEntry>,
    index: HashMap<String, usize>,
}

impl CurrencyRegistry {
    /// The process-wide registry built from the compiled-in table.
    pub fn global() -> &'static CurrencyRegistry {
        &GLOBAL
    }

    /// Parses a registry from a TOML table.
    ///
    /// Only the document structure is checked here; fraction digits and
    /// sub-units are validated when read.
    pub fn from_toml_str(table: &str) -> CoreResult<Self> {
        let table: CurrencyTable = toml::from_str(table)?;
        let registry = Self::from_entries(table.currency);
        debug!(currencies = registry.len(), "parsed currency table");
        Ok(registry)
    }

    /// Builds a registry from entries; a repeated code replaces the earlier row.
    pub fn from_entries(entries: impl IntoIterator<Item = CurrencyEntry>) -> Self {
        let mut registry = CurrencyRegistry::default();
        for entry in entries {
            match registry.index.get(&entry.code) {
                Some(&position) => registry.entries[position] = entry,
                None => {
                    registry.index.insert(entry.code.clone(), registry.entries.len());
                    registry.entries.push(entry);
                }
            }
        }
        registry
    }

    /// Number of currencies in the table.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns true if `code` is in the table (exact match).
    pub fn contains(&self, code: &str) -> bool {
        self.index.contains_key(code)
    }

    /// Codes in table order.
    pub fn codes(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.code.as_str())
    }

    /// Returns the raw table row for `code`.
    pub fn entry(&self, code: &str) -> CoreResult<&CurrencyEntry> {
        self.index
            .get(code)
            .map(|&position| &self.entries[position])
            .ok_or_else(|| CoreError::UnsupportedCurrency {
                code: code.to_string(),
            })
    }

    /// Returns the currency name.
    pub fn currency_name(&self, code: &str) -> CoreResult<&str> {
        Ok(self.entry(code)?.name.as_str())
    }

    /// Returns the ISO 4217 numeric code.
    pub fn numeric_code(&self, code: &str) -> CoreResult<u16> {
        Ok(self.entry(code)?.numeric_code)
    }

    /// Returns the number of fraction digits used for float conversion.
    ///
    /// ## Errors
    /// - `UnsupportedCurrency` if `code` is not in the table
    /// - `InvalidCurrencyData` if the stored value is not a non-negative integer
    pub fn default_fraction_digits(&self, code: &str) -> CoreResult<u32> {
        match &self.entry(code)?.default_fraction_digits {
            toml::Value::Integer(digits) => u32::try_from(*digits)
                .map_err(|_| corrupt(code, FRACTION_DIGITS, "greater than 0", digits.to_string())),
            other => Err(corrupt(code, FRACTION_DIGITS, "an integer", other.type_str().to_string())),
        }
    }

    /// Returns the number of minor units per major unit.
    ///
    /// ## Errors
    /// - `UnsupportedCurrency` if `code` is not in the table
    /// - `InvalidCurrencyData` if the stored value is not an integer ≥ 1
    pub fn sub_unit(&self, code: &str) -> CoreResult<i64> {
        match &self.entry(code)?.sub_unit {
            toml::Value::Integer(sub_unit) if *sub_unit >= 1 => Ok(*sub_unit),
            toml::Value::Integer(sub_unit) => {
                Err(corrupt(code, SUB_UNITS, "greater than 0", sub_unit.to_string()))
            }
            other => Err(corrupt(code, SUB_UNITS, "an integer", other.type_str().to_string())),
        }
    }
}

fn corrupt(code: &str, setting: &'static str, requirement: &'static str, given: String) -> CoreError {
    warn!(code, setting, given = %given, "malformed currency data");
    CoreError::InvalidCurrencyData {
        code: code.to_string(),
        setting,
        requirement,
        given,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn fake_registry(fraction_digits: &str, sub_unit: &str) -> CurrencyRegistry {
        let table = format!(
            r#"
            [[currency]]
            code = "ABC"
            name = "ABC fake currency"
            numeric_code = 123
            default_fraction_digits = {fraction_digits}
            sub_unit = {sub_unit}
            "#
        );
        CurrencyRegistry::from_toml_str(&table).unwrap()
    }

    #[test]
    fn test_builtin_table_loads() {
        let registry = CurrencyRegistry::from_toml_str(BUILTIN_TABLE).unwrap();
        assert_eq!(registry.len(), CurrencyRegistry::global().len());
        assert!(registry.contains("EUR"));
        assert!(registry.contains("USD"));
    }

    #[test]
    fn test_all_getters() {
        let registry = CurrencyRegistry::global();
        assert_eq!(registry.currency_name("EUR").unwrap(), "Euro");
        assert_eq!(registry.numeric_code("EUR").unwrap(), 978);
        assert_eq!(registry.default_fraction_digits("EUR").unwrap(), 2);
        assert_eq!(registry.sub_unit("EUR").unwrap(), 100);

        assert_eq!(registry.currency_name("USD").unwrap(), "US Dollar");
        assert_eq!(registry.numeric_code("USD").unwrap(), 840);
        assert_eq!(registry.default_fraction_digits("USD").unwrap(), 2);
        assert_eq!(registry.sub_unit("USD").unwrap(), 100);

        assert_eq!(registry.default_fraction_digits("JPY").unwrap(), 0);
        assert_eq!(registry.sub_unit("JPY").unwrap(), 1);
    }

    #[test]
    fn test_sub_unit_matches_fraction_digits() {
        let registry = CurrencyRegistry::global();
        for code in registry.codes() {
            let digits = registry.default_fraction_digits(code).unwrap();
            assert_eq!(registry.sub_unit(code).unwrap(), 10_i64.pow(digits), "{code}");
        }
    }

    #[test]
    fn test_entry_is_raw_row() {
        let entry = CurrencyRegistry::global().entry("EUR").unwrap();
        assert_eq!(entry.code, "EUR");
        assert_eq!(entry.default_fraction_digits, toml::Value::Integer(2));
    }

    #[test]
    fn test_unsupported_currency() {
        let registry = CurrencyRegistry::global();
        let err = registry.numeric_code("ABCDEFG").unwrap_err();
        assert_eq!(err.to_string(), "\"ABCDEFG\" currency is not supported");
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);

        assert!(registry.currency_name("eur").is_err(), "lookups are exact");
        assert!(registry.sub_unit("").is_err());
    }

    #[test]
    fn test_not_integer_fraction_digits() {
        let registry = fake_registry("\"dfd\"", "2");
        let err = registry.default_fraction_digits("ABC").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnexpectedValue);
        assert_eq!(
            err.to_string(),
            "The currency default fraction digits value must be an integer; \"string\" given"
        );
    }

    #[test]
    fn test_negative_fraction_digits() {
        let registry = fake_registry("-1", "100");
        let err = registry.default_fraction_digits("ABC").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnexpectedValue);
        assert_eq!(
            err.to_string(),
            "The currency default fraction digits value must be greater than 0; \"-1\" given"
        );
    }

    #[test]
    fn test_not_integer_sub_unit() {
        let registry = fake_registry("2", "\"abc\"");
        let err = registry.sub_unit("ABC").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnexpectedValue);
        assert_eq!(
            err.to_string(),
            "The currency sub-units value must be an integer; \"string\" given"
        );
    }

    #[test]
    fn test_sub_unit_less_than_one() {
        for bad in ["-1", "0"] {
            let registry = fake_registry("2", bad);
            let err = registry.sub_unit("ABC").unwrap_err();
            assert_eq!(
                err.to_string(),
                format!("The currency sub-units value must be greater than 0; \"{bad}\" given")
            );
        }
    }

    #[test]
    fn test_corrupt_data_only_fails_when_read() {
        let registry = fake_registry("2.5", "\"abc\"");
        assert_eq!(registry.currency_name("ABC").unwrap(), "ABC fake currency");
        assert_eq!(registry.numeric_code("ABC").unwrap(), 123);
        assert!(registry.default_fraction_digits("ABC").is_err());
    }

    #[test]
    fn test_malformed_table_is_unexpected_value() {
        let err = CurrencyRegistry::from_toml_str("[[currency]]\ncode = 1").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnexpectedValue);
    }

    #[test]
    fn test_repeated_code_replaces_row() {
        let table = r#"
            [[currency]]
            code = "XTS"
            name = "first"
            numeric_code = 963
            default_fraction_digits = 2
            sub_unit = 100

            [[currency]]
            code = "XTS"
            name = "second"
            numeric_code = 963
            default_fraction_digits = 3
            sub_unit = 1000
        "#;
        let registry = CurrencyRegistry::from_toml_str(table).unwrap();
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.currency_name("XTS").unwrap(), "second");
        assert_eq!(registry.sub_unit("XTS").unwrap(), 1000);
    }
}
