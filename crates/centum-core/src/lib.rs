//! # centum-core: Fixed-Point Money
//!
//! Currency amounts as integer minor units, with the currency metadata and
//! collection arithmetic built around them. Pure logic: no I/O beyond the
//! currency table compiled into the crate.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         centum-core                                     │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                MoneyCollection (collection)                     │   │
//! │  │     bulk abs/negate/multiply ── merge ── reduce per currency    │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ owns                                   │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                       Money (money)                             │   │
//! │  │   i64 minor units + currency code, checked arithmetic           │   │
//! │  └───────┬─────────────────────┬───────────────────────┬───────────┘   │
//! │          │ metadata            │ factors               │ ties          │
//! │  ┌───────▼────────┐   ┌────────▼────────┐   ┌──────────▼─────────┐    │
//! │  │ CurrencyRegistry│   │  DecimalNumber  │   │   RoundingMode     │    │
//! │  │   (currency)    │   │   (decimal)     │   │   (rounding)       │    │
//! │  │ currencies.toml │   │ numeral × 10^-n │   │  rust_decimal      │    │
//! │  └────────────────┘   └─────────────────┘   └────────────────────┘    │
//! │                                                                         │
//! │  map: attribute-map views for hydrators (serde_json)                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`money`] - Money type with checked integer arithmetic
//! - [`collection`] - Ordered Money container with per-currency reduction
//! - [`currency`] - Currency registry loaded from the embedded TOML table
//! - [`decimal`] - Exact decimal multiplication factors
//! - [`rounding`] - Rounding modes for multiplication
//! - [`map`] - Attribute-map boundary for untyped data
//! - [`error`] - Domain error types
//! - [`validation`] - Type and range checks for untyped input
//!
//! ## Design Principles
//!
//! 1. **Integer Money**: amounts are minor units (i64); floats only at the edges
//! 2. **Currency Safety**: mixing currencies is an error, never a silent sum
//! 3. **No Partial Updates**: every failing operation leaves its target unchanged
//! 4. **Explicit Errors**: all errors are typed, never strings or panics
//!
//! ## Example Usage
//!
//! ```rust
//! use centum_core::{Money, MoneyCollection, RoundingMode};
//!
//! # fn main() -> centum_core::CoreResult<()> {
//! let mut price = Money::empty();
//! price.from_float(10.99, Some("EUR"))?;
//! assert_eq!(price.amount(), 1099);
//!
//! // 15% discount, ties rounded half-up
//! price.multiply(0.85, RoundingMode::HalfUp)?;
//! assert_eq!(price.amount(), 934);
//!
//! let mut basket = MoneyCollection::from_moneys(vec![price, Money::new(500, "USD")?]);
//! basket.add(&MoneyCollection::from_moneys(vec![Money::new(66, "EUR")?]))?;
//! assert_eq!(basket.get(0), Some(&Money::new(1000, "EUR")?));
//! # Ok(())
//! # }
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod collection;
pub mod currency;
pub mod decimal;
pub mod error;
pub mod map;
pub mod money;
pub mod rounding;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use centum_core::Money` instead of
// `use centum_core::money::Money`

pub use collection::MoneyCollection;
pub use currency::{CurrencyEntry, CurrencyRegistry};
pub use decimal::DecimalNumber;
pub use error::{CoreError, CoreResult, ErrorKind, ValidationError};
pub use map::AttributeMap;
pub use money::{Factor, Money};
pub use rounding::RoundingMode;
