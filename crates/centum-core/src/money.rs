//! # Money Module
//!
//! Provides the `Money` type: an amount in minor units tied to a currency.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In floating point:                                                     │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Minor Units                                      │
//! │    amount: i64 (cents for EUR/USD, yen for JPY)                        │
//! │    floats only at the edges: from_float() in, to_float() out           │
//! │    every scaling/rounding step runs in exact decimal arithmetic        │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Mutation Model
//! Operations mutate in place and hand back `&mut Self`, so they chain:
//!
//! ```rust
//! use centum_core::{Money, RoundingMode};
//!
//! # fn main() -> centum_core::CoreResult<()> {
//! let fee = Money::new(250, "EUR")?;
//! let mut total = Money::new(1000, "EUR")?;
//! total.add(&fee)?.multiply(2, RoundingMode::HalfUp)?;
//! assert_eq!(total.amount(), 2500);
//!
//! let snapshot = total.copy(); // independent value
//! total.negate()?;
//! assert_eq!(snapshot.amount(), 2500);
//! # Ok(())
//! # }
//! ```
//!
//! ## Amount Range
//! The amount is a 64-bit signed integer. Any result outside
//! `i64::MIN..=i64::MAX` fails with [`CoreError::Overflow`] and leaves the
//! value unchanged.

use std::cmp::Ordering;
use std::fmt;

use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::currency::CurrencyRegistry;
use crate::decimal::DecimalNumber;
use crate::error::{CoreError, CoreResult};
use crate::rounding::RoundingMode;
use crate::validation::{validate_finite, validate_float};

// =============================================================================
// Multiplication Factor
// =============================================================================

/// What [`Money::multiply`] accepts: a float, an integer, or an exact decimal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Factor {
    /// A floating-point factor, converted through its shortest decimal form.
    Float(f64),
    /// An exact decimal factor.
    Decimal(Decimal),
}

impl Factor {
    fn to_decimal(self) -> CoreResult<Decimal> {
        match self {
            Factor::Decimal(d) => Ok(d),
            Factor::Float(f) => {
                let f = validate_finite("Factor", f)?;
                Decimal::from_f64(f).ok_or_else(|| CoreError::overflow(f))
            }
        }
    }
}

impl From<f64> for Factor {
    fn from(factor: f64) -> Self {
        Factor::Float(factor)
    }
}

impl From<i64> for Factor {
    fn from(factor: i64) -> Self {
        Factor::Decimal(Decimal::from(factor))
    }
}

impl From<i32> for Factor {
    fn from(factor: i32) -> Self {
        Factor::Decimal(Decimal::from(factor))
    }
}

impl From<Decimal> for Factor {
    fn from(factor: Decimal) -> Self {
        Factor::Decimal(factor)
    }
}

impl From<DecimalNumber> for Factor {
    fn from(factor: DecimalNumber) -> Self {
        Factor::Decimal(factor.to_decimal())
    }
}

impl From<&DecimalNumber> for Factor {
    fn from(factor: &DecimalNumber) -> Self {
        Factor::Decimal(factor.to_decimal())
    }
}

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest currency unit.
///
/// ## Design Decisions
/// - **i64 (signed)**: negative values for refunds and credits
/// - **Optional currency**: `None` is the "not assigned yet" state of an
///   empty value; operations needing metadata reject it
/// - **Derived metadata**: sub-unit and fraction digits always come from the
///   currency registry, never stored per value
///
/// ## Where Currency Is Checked
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  set_currency ──► registry lookup (unsupported → InvalidArgument)       │
/// │  compare/add/subtract ──► currencies must be identical                  │
/// │  to_float/from_float ──► sub-unit + fraction digits from registry       │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "MoneyRecord")]
pub struct Money {
    amount: i64,
    currency: Option<String>,
}

/// Wire shape; derived keys such as `sub_unit` are ignored.
#[derive(Deserialize)]
struct MoneyRecord {
    #[serde(default)]
    amount: Option<i64>,
    #[serde(default)]
    currency: Option<String>,
}

impl TryFrom<MoneyRecord> for Money {
    type Error = CoreError;

    fn try_from(record: MoneyRecord) -> Result<Self, Self::Error> {
        let mut money = Money::empty();
        money.set_currency(record.currency.as_deref())?;
        money.set_amount(record.amount);
        Ok(money)
    }
}

impl Money {
    /// Largest representable amount in minor units.
    pub const MAX_AMOUNT: i64 = i64::MAX;

    /// Smallest representable amount in minor units.
    pub const MIN_AMOUNT: i64 = i64::MIN;

    /// Creates a Money value from minor units and a currency code.
    ///
    /// The code is upper-cased and must be supported by the global registry.
    ///
    /// ## Example
    /// ```rust
    /// use centum_core::Money;
    ///
    /// let price = Money::new(1099, "usd").unwrap();
    /// assert_eq!(price.amount(), 1099);
    /// assert_eq!(price.currency(), Some("USD"));
    ///
    /// assert!(Money::new(1, "XXX").is_err());
    /// ```
    pub fn new(amount: i64, currency: &str) -> CoreResult<Self> {
        let mut money = Money::empty();
        money.set_currency(Some(currency))?;
        money.set_amount(amount);
        Ok(money)
    }

    /// Zero amount, no currency.
    #[inline]
    pub const fn empty() -> Self {
        Money {
            amount: 0,
            currency: None,
        }
    }

    /// Amount in minor units.
    #[inline]
    pub const fn amount(&self) -> i64 {
        self.amount
    }

    /// Upper-case currency code, if assigned.
    #[inline]
    pub fn currency(&self) -> Option<&str> {
        self.currency.as_deref()
    }

    /// Sets the amount in minor units; `None` means zero.
    pub fn set_amount(&mut self, amount: impl Into<Option<i64>>) -> &mut Self {
        self.amount = amount.into().unwrap_or(0);
        self
    }

    /// Sets or clears the currency using the global registry.
    ///
    /// `None` (or an empty code) clears it. Anything else is upper-cased and
    /// must be supported, otherwise the value keeps its previous currency.
    pub fn set_currency(&mut self, currency: Option<&str>) -> CoreResult<&mut Self> {
        self.set_currency_in(currency, CurrencyRegistry::global())
    }

    /// [`set_currency`](Self::set_currency) against an explicit registry.
    pub fn set_currency_in(
        &mut self,
        currency: Option<&str>,
        registry: &CurrencyRegistry,
    ) -> CoreResult<&mut Self> {
        self.currency = normalize_currency(currency, registry)?;
        Ok(self)
    }

    /// Minor units per major unit, from the registry.
    pub fn sub_unit(&self) -> CoreResult<i64> {
        self.sub_unit_in(CurrencyRegistry::global())
    }

    pub fn sub_unit_in(&self, registry: &CurrencyRegistry) -> CoreResult<i64> {
        registry.sub_unit(self.require_currency()?)
    }

    /// Fraction digits used for float conversion, from the registry.
    pub fn fraction_digits(&self) -> CoreResult<u32> {
        self.fraction_digits_in(CurrencyRegistry::global())
    }

    pub fn fraction_digits_in(&self, registry: &CurrencyRegistry) -> CoreResult<u32> {
        registry.default_fraction_digits(self.require_currency()?)
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.amount == 0
    }

    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.amount > 0
    }

    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.amount < 0
    }

    // =========================================================================
    // Comparison
    // =========================================================================

    /// Compares amounts of two values in the same currency.
    ///
    /// ## Example
    /// ```rust
    /// use centum_core::Money;
    /// use std::cmp::Ordering;
    ///
    /// let a = Money::new(1, "EUR").unwrap();
    /// let b = Money::new(2, "EUR").unwrap();
    /// assert_eq!(a.compare_to(&b).unwrap(), Ordering::Less);
    ///
    /// let c = Money::new(1, "USD").unwrap();
    /// assert!(a.compare_to(&c).is_err());
    /// ```
    pub fn compare_to(&self, other: &Money) -> CoreResult<Ordering> {
        self.ensure_same_currency(other)?;
        Ok(self.amount.cmp(&other.amount))
    }

    /// True when both values have the same currency and amount.
    pub fn equal_to(&self, other: &Money) -> CoreResult<bool> {
        Ok(self.compare_to(other)? == Ordering::Equal)
    }

    // =========================================================================
    // Arithmetic
    // =========================================================================

    /// Makes the amount non-negative.
    pub fn abs(&mut self) -> CoreResult<&mut Self> {
        if self.amount < 0 {
            self.negate()?;
        }
        Ok(self)
    }

    /// Flips the sign of the amount.
    pub fn negate(&mut self) -> CoreResult<&mut Self> {
        self.amount = self
            .amount
            .checked_neg()
            .ok_or_else(|| overflow(-i128::from(self.amount)))?;
        Ok(self)
    }

    /// Adds another value in the same currency.
    ///
    /// Currency and range are checked before anything changes.
    pub fn add(&mut self, other: &Money) -> CoreResult<&mut Self> {
        self.ensure_same_currency(other)?;
        self.amount = self
            .amount
            .checked_add(other.amount)
            .ok_or_else(|| overflow(i128::from(self.amount) + i128::from(other.amount)))?;
        Ok(self)
    }

    /// Subtracts another value in the same currency; `other` is not touched.
    pub fn subtract(&mut self, other: &Money) -> CoreResult<&mut Self> {
        self.ensure_same_currency(other)?;
        self.amount = self
            .amount
            .checked_sub(other.amount)
            .ok_or_else(|| overflow(i128::from(self.amount) - i128::from(other.amount)))?;
        Ok(self)
    }

    /// Multiplies the amount by `factor` and rounds to whole minor units.
    ///
    /// ## Example
    /// ```rust
    /// use centum_core::{DecimalNumber, Money, RoundingMode};
    ///
    /// let mut price = Money::new(100, "EUR").unwrap();
    /// price.multiply(&DecimalNumber::new(5, 1).unwrap(), RoundingMode::HalfUp).unwrap();
    /// assert_eq!(price.amount(), 50);
    ///
    /// let mut odd = Money::new(5, "EUR").unwrap();
    /// odd.multiply(0.5, RoundingMode::HalfEven).unwrap(); // 2.5 → 2
    /// assert_eq!(odd.amount(), 2);
    /// ```
    pub fn multiply(&mut self, factor: impl Into<Factor>, mode: RoundingMode) -> CoreResult<&mut Self> {
        let factor = factor.into().to_decimal()?;
        let product = factor
            .checked_mul(Decimal::from(self.amount))
            .ok_or_else(|| overflow(format!("{factor} * {}", self.amount)))?;
        self.amount = to_amount(mode.round(product, 0))?;
        Ok(self)
    }

    // =========================================================================
    // Float Conversion
    // =========================================================================

    /// Major-unit float: `round(amount / sub_unit, fraction_digits)`.
    ///
    /// ## Example
    /// ```rust
    /// use centum_core::Money;
    ///
    /// assert_eq!(Money::new(1234, "EUR").unwrap().to_float().unwrap(), 12.34);
    /// assert_eq!(Money::new(-5, "USD").unwrap().to_float().unwrap(), -0.05);
    /// ```
    pub fn to_float(&self) -> CoreResult<f64> {
        self.to_float_in(CurrencyRegistry::global())
    }

    pub fn to_float_in(&self, registry: &CurrencyRegistry) -> CoreResult<f64> {
        let code = self.require_currency()?;
        let sub_unit = registry.sub_unit(code)?;
        let fraction_digits = registry.default_fraction_digits(code)?;

        let major = Decimal::from(self.amount)
            .checked_div(Decimal::from(sub_unit))
            .ok_or_else(|| overflow(self.amount))?;
        let major = RoundingMode::HalfUp.round(major, fraction_digits);
        major.to_f64().ok_or_else(|| overflow(major))
    }

    /// Sets the amount from a major-unit float, optionally switching currency.
    ///
    /// The float is snapped to the currency's fraction digits, scaled to
    /// minor units and rounded again (both half-up). On any failure neither
    /// amount nor currency changes.
    ///
    /// ## Example
    /// ```rust
    /// use centum_core::Money;
    ///
    /// let mut money = Money::empty();
    /// money.from_float(12.34, Some("EUR")).unwrap();
    /// assert_eq!(money, Money::new(1234, "EUR").unwrap());
    /// ```
    pub fn from_float(&mut self, amount: f64, currency: Option<&str>) -> CoreResult<&mut Self> {
        self.from_float_in(amount, currency, CurrencyRegistry::global())
    }

    pub fn from_float_in(
        &mut self,
        amount: f64,
        currency: Option<&str>,
        registry: &CurrencyRegistry,
    ) -> CoreResult<&mut Self> {
        let target = match currency {
            Some(code) if !code.is_empty() => normalize_currency(Some(code), registry)?,
            _ => self.currency.clone(),
        };
        let code = target.as_deref().ok_or(CoreError::CurrencyNotSet)?;

        let amount = validate_finite("Amount", amount)?;
        let fraction_digits = registry.default_fraction_digits(code)?;
        let sub_unit = registry.sub_unit(code)?;

        let major = Decimal::from_f64(amount).ok_or_else(|| overflow(amount))?;
        let snapped = RoundingMode::HalfUp.round(major, fraction_digits);
        let minor = snapped
            .checked_mul(Decimal::from(sub_unit))
            .ok_or_else(|| overflow(format!("{snapped} * {sub_unit}")))?;

        self.amount = to_amount(RoundingMode::HalfUp.round(minor, 0))?;
        self.currency = target;
        Ok(self)
    }

    /// [`from_float`](Self::from_float) for an untyped value.
    ///
    /// Only genuine floats are accepted; integers and numeric strings are
    /// rejected so integer cents are never read as a major-unit amount.
    pub fn from_float_value(&mut self, amount: &Value, currency: Option<&str>) -> CoreResult<&mut Self> {
        let amount = validate_float("Amount", amount)?;
        self.from_float(amount, currency)
    }

    /// Independent copy with identical amount and currency.
    pub fn copy(&self) -> Money {
        self.clone()
    }

    // =========================================================================
    // Helpers
    // =========================================================================

    fn require_currency(&self) -> CoreResult<&str> {
        self.currency.as_deref().ok_or(CoreError::CurrencyNotSet)
    }

    fn ensure_same_currency(&self, other: &Money) -> CoreResult<()> {
        if self.currency == other.currency {
            Ok(())
        } else {
            Err(CoreError::mismatch(self.currency(), other.currency()))
        }
    }
}

fn normalize_currency(currency: Option<&str>, registry: &CurrencyRegistry) -> CoreResult<Option<String>> {
    match currency {
        Some(code) if !code.is_empty() => {
            let code = code.to_uppercase();
            registry.numeric_code(&code)?;
            Ok(Some(code))
        }
        _ => Ok(None),
    }
}

/// Overflow-checked cast of a whole decimal to the stored amount.
fn to_amount(value: Decimal) -> CoreResult<i64> {
    value.trunc().to_i64().ok_or_else(|| overflow(value))
}

fn overflow(value: impl fmt::Display) -> CoreError {
    warn!(value = %value, "amount outside the i64 range rejected");
    CoreError::overflow(value)
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Shows the amount in major units with its code, e.g. `12.34 EUR`.
///
/// ## Note
/// This is for debugging and logs, not localized display. Without a
/// currency (or with unreadable metadata) the raw minor-unit amount is shown.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let code = match self.currency() {
            Some(code) => code,
            None => return write!(f, "{}", self.amount),
        };
        let registry = CurrencyRegistry::global();
        match (registry.sub_unit(code), registry.default_fraction_digits(code)) {
            (Ok(sub_unit), Ok(digits)) => {
                let mut major = Decimal::from(self.amount) / Decimal::from(sub_unit);
                major.rescale(digits);
                write!(f, "{major} {code}")
            }
            _ => write!(f, "{} {code}", self.amount),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
