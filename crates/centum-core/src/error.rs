//! # Error Types
//!
//! Domain-specific error types for centum-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  CoreError                              ErrorKind                       │
//! │  ├── UnsupportedCurrency    ──────────► InvalidArgument                 │
//! │  ├── CurrencyMismatch       ──────────► InvalidArgument                 │
//! │  ├── CurrencyNotSet         ──────────► InvalidArgument                 │
//! │  ├── Validation(ValidationError) ─────► InvalidArgument                 │
//! │  ├── InvalidCurrencyData    ──────────► UnexpectedValue                 │
//! │  ├── InvalidCurrencyTable   ──────────► UnexpectedValue                 │
//! │  └── Overflow               ──────────► Overflow                        │
//! │                                                                         │
//! │  Caller bug → InvalidArgument   Table bug → UnexpectedValue             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (currency code, offending value)
//! 3. Every failure happens before the value it guards is mutated

use thiserror::Error;

// =============================================================================
// Error Kind
// =============================================================================

/// Coarse classification of a [`CoreError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The caller passed a wrong type, shape or value.
    InvalidArgument,
    /// The currency table itself holds malformed data.
    UnexpectedValue,
    /// A computed amount does not fit in an `i64`.
    Overflow,
}

// =============================================================================
// Core Error
// =============================================================================

/// Errors raised by money, currency and collection operations.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The currency code is not present in the registry.
    #[error("\"{code}\" currency is not supported")]
    UnsupportedCurrency { code: String },

    /// Two money values with different currencies met in one operation.
    ///
    /// ## When This Occurs
    /// ```text
    /// Money(1, EUR).add(Money(1, USD))
    ///      │
    ///      ▼
    /// CurrencyMismatch { left: Some("EUR"), right: Some("USD") }
    ///      │
    ///      ▼
    /// left operand is untouched
    /// ```
    #[error("Operations between different currencies are not supported")]
    CurrencyMismatch {
        left: Option<String>,
        right: Option<String>,
    },

    /// The operation needs currency metadata but no currency is assigned.
    #[error("No currency assigned to this amount")]
    CurrencyNotSet,

    /// Input shape/type validation failed.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// A registry entry holds a value of the wrong type or out of range.
    #[error("The currency {setting} value must be {requirement}; \"{given}\" given")]
    InvalidCurrencyData {
        code: String,
        setting: &'static str,
        requirement: &'static str,
        given: String,
    },

    /// A currency table could not be parsed.
    #[error("Invalid currency table: {0}")]
    InvalidCurrencyTable(#[from] toml::de::Error),

    /// A computed amount exceeds the i64 minor-unit range.
    #[error("Amount {value} is outside the 64-bit signed integer range")]
    Overflow { value: String },
}

impl CoreError {
    /// Returns the coarse kind callers can branch on.
    pub fn kind(&self) -> ErrorKind {
        match self {
            CoreError::UnsupportedCurrency { .. }
            | CoreError::CurrencyMismatch { .. }
            | CoreError::CurrencyNotSet
            | CoreError::Validation(_) => ErrorKind::InvalidArgument,
            CoreError::InvalidCurrencyData { .. } | CoreError::InvalidCurrencyTable(_) => {
                ErrorKind::UnexpectedValue
            }
            CoreError::Overflow { .. } => ErrorKind::Overflow,
        }
    }

    pub(crate) fn overflow(value: impl ToString) -> Self {
        CoreError::Overflow {
            value: value.to_string(),
        }
    }

    pub(crate) fn mismatch(left: Option<&str>, right: Option<&str>) -> Self {
        CoreError::CurrencyMismatch {
            left: left.map(str::to_owned),
            right: right.map(str::to_owned),
        }
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These occur at the untyped boundary (attribute maps, JSON values) and for
/// setter arguments outside the accepted range.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// Value must be an integer (or null).
    #[error("{field} must be an integer, \"{given}\" given")]
    NotAnInteger { field: String, given: String },

    /// Value must be a genuine floating-point number.
    #[error("{field} must be a float, {given} given")]
    NotAFloat { field: String, given: String },

    /// Value must be a string (or null).
    #[error("{field} must be a string, \"{given}\" given")]
    NotAString { field: String, given: String },

    /// Value must be a finite number.
    #[error("{field} must be a finite number, \"{given}\" given")]
    NotFinite { field: String, given: String },

    /// Value must not be negative.
    #[error("{field} must not be negative, \"{given}\" given")]
    Negative { field: String, given: i64 },

    /// Value exceeds the supported maximum.
    #[error("{field} must be at most {max}, \"{given}\" given")]
    TooLarge {
        field: String,
        max: i64,
        given: String,
    },

    /// Value is not in allowed set.
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },

    /// A collection element is not a money value.
    #[error("Value of type \"{given}\" is invalid for {container}; must be a money map")]
    InvalidElement {
        container: &'static str,
        given: String,
    },

    /// Index assignment past the end of a collection.
    #[error("Index {index} is out of bounds for a collection of {len} elements")]
    IndexOutOfBounds { index: usize, len: usize },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
