//! # Decimal Numbers
//!
//! A scaled-integer decimal: `numeral × 10^-fraction_digits`.
//!
//! Used as an exact multiplication factor for [`Money`](crate::money::Money),
//! e.g. `DecimalNumber::new(5, 1)` is `0.5`.
//!
//! ```text
//! numeral = 1234, fraction_digits = 2   ──►   12.34
//! numeral = 5,    fraction_digits = 1   ──►    0.5
//! numeral = 7,    fraction_digits = 0   ──►    7
//! ```

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::validation::validate_fraction_digits;

/// A decimal number stored as an integer numeral and a fraction-digit count.
///
/// ## Invariant
/// `fraction_digits` is within `0..=28`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "DecimalNumberRecord")]
pub struct DecimalNumber {
    numeral: i64,
    fraction_digits: u32,
}

/// Wire shape; every field may be null or missing.
#[derive(Deserialize)]
struct DecimalNumberRecord {
    #[serde(default)]
    numeral: Option<i64>,
    #[serde(default)]
    fraction_digits: Option<i64>,
}

impl TryFrom<DecimalNumberRecord> for DecimalNumber {
    type Error = CoreError;

    fn try_from(record: DecimalNumberRecord) -> Result<Self, Self::Error> {
        let mut number = DecimalNumber::default();
        number
            .set_numeral(record.numeral)
            .set_fraction_digits(record.fraction_digits)?;
        Ok(number)
    }
}

impl DecimalNumber {
    /// Creates a decimal number.
    ///
    /// ## Example
    /// ```rust
    /// use centum_core::DecimalNumber;
    ///
    /// let n = DecimalNumber::new(1234, 2).unwrap();
    /// assert_eq!(n.to_float(), 12.34);
    /// ```
    pub fn new(numeral: i64, fraction_digits: u32) -> CoreResult<Self> {
        let mut number = DecimalNumber::default();
        number
            .set_numeral(numeral)
            .set_fraction_digits(i64::from(fraction_digits))?;
        Ok(number)
    }

    #[inline]
    pub const fn numeral(&self) -> i64 {
        self.numeral
    }

    #[inline]
    pub const fn fraction_digits(&self) -> u32 {
        self.fraction_digits
    }

    /// Sets the numeral; `None` means zero.
    pub fn set_numeral(&mut self, numeral: impl Into<Option<i64>>) -> &mut Self {
        self.numeral = numeral.into().unwrap_or(0);
        self
    }

    /// Sets the fraction-digit count; `None` means zero.
    ///
    /// Fails with a validation error for negative counts or counts above 28,
    /// leaving the number unchanged.
    pub fn set_fraction_digits(&mut self, fraction_digits: impl Into<Option<i64>>) -> CoreResult<&mut Self> {
        self.fraction_digits = validate_fraction_digits(fraction_digits.into().unwrap_or(0))?;
        Ok(self)
    }

    /// Exact decimal value.
    pub fn to_decimal(&self) -> Decimal {
        Decimal::new(self.numeral, self.fraction_digits)
    }

    /// `round(numeral / 10^fraction_digits, fraction_digits)` as a float.
    pub fn to_float(&self) -> f64 {
        // every Decimal converts; the scale already equals fraction_digits
        self.to_decimal().to_f64().unwrap_or(f64::NAN)
    }
}

impl std::fmt::Display for DecimalNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_decimal())
    }
}

impl From<DecimalNumber> for Decimal {
    fn from(number: DecimalNumber) -> Self {
        number.to_decimal()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
