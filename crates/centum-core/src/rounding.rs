//! # Rounding Modes
//!
//! Tie-breaking rules applied when a computed amount falls between two
//! representable values.
//!
//! ## Midpoint Behavior
//! ```text
//! ┌──────────────┬───────┬───────┬───────┬───────┐
//! │ mode         │  2.5  │  3.5  │ -2.5  │  2.4  │
//! ├──────────────┼───────┼───────┼───────┼───────┤
//! │ HalfUp       │   3   │   4   │  -3   │   2   │
//! │ HalfDown     │   2   │   3   │  -2   │   2   │
//! │ HalfEven     │   2   │   4   │  -2   │   2   │
//! │ HalfOdd      │   3   │   3   │  -3   │   2   │
//! │ Ceiling      │   3   │   4   │  -2   │   3   │
//! │ Floor        │   2   │   3   │  -3   │   2   │
//! │ Up           │   3   │   4   │  -3   │   3   │
//! │ Down         │   2   │   3   │  -2   │   2   │
//! └──────────────┴───────┴───────┴───────┴───────┘
//! ```

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Rounding rule for money arithmetic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundingMode {
    /// Ties away from zero.
    #[default]
    HalfUp,
    /// Ties toward zero.
    HalfDown,
    /// Ties to the nearest even digit (banker's rounding).
    HalfEven,
    /// Ties to the nearest odd digit.
    HalfOdd,
    /// Toward positive infinity.
    Ceiling,
    /// Toward negative infinity.
    Floor,
    /// Away from zero.
    Up,
    /// Toward zero (truncation).
    Down,
}

impl RoundingMode {
    /// Every mode, in declaration order.
    pub const ALL: [RoundingMode; 8] = [
        RoundingMode::HalfUp,
        RoundingMode::HalfDown,
        RoundingMode::HalfEven,
        RoundingMode::HalfOdd,
        RoundingMode::Ceiling,
        RoundingMode::Floor,
        RoundingMode::Up,
        RoundingMode::Down,
    ];

    /// The snake_case name used in serialized form.
    pub fn as_str(self) -> &'static str {
        match self {
            RoundingMode::HalfUp => "half_up",
            RoundingMode::HalfDown => "half_down",
            RoundingMode::HalfEven => "half_even",
            RoundingMode::HalfOdd => "half_odd",
            RoundingMode::Ceiling => "ceiling",
            RoundingMode::Floor => "floor",
            RoundingMode::Up => "up",
            RoundingMode::Down => "down",
        }
    }

    /// Rounds `value` to `dp` decimal places.
    pub fn round(self, value: Decimal, dp: u32) -> Decimal {
        match self {
            RoundingMode::HalfOdd => round_half_odd(value, dp),
            other => value.round_dp_with_strategy(dp, other.strategy()),
        }
    }

    fn strategy(self) -> RoundingStrategy {
        match self {
            RoundingMode::HalfUp => RoundingStrategy::MidpointAwayFromZero,
            RoundingMode::HalfDown => RoundingStrategy::MidpointTowardZero,
            RoundingMode::HalfEven | RoundingMode::HalfOdd => RoundingStrategy::MidpointNearestEven,
            RoundingMode::Ceiling => RoundingStrategy::ToPositiveInfinity,
            RoundingMode::Floor => RoundingStrategy::ToNegativeInfinity,
            RoundingMode::Up => RoundingStrategy::AwayFromZero,
            RoundingMode::Down => RoundingStrategy::ToZero,
        }
    }
}

/// rust_decimal has no half-odd strategy: a value is a midpoint exactly when
/// the two half strategies disagree, and then the odd candidate wins.
fn round_half_odd(value: Decimal, dp: u32) -> Decimal {
    let away = value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero);
    let toward = value.round_dp_with_strategy(dp, RoundingStrategy::MidpointTowardZero);
    if away == toward {
        return away;
    }

    let mut probe = away;
    probe.rescale(dp);
    if probe.mantissa() % 2 != 0 {
        away
    } else {
        toward
    }
}

impl std::fmt::Display for RoundingMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for RoundingMode {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace(['-', ' '], "_");
        Self::ALL
            .into_iter()
            .find(|mode| mode.as_str() == normalized)
            .ok_or_else(|| ValidationError::NotAllowed {
                field: "rounding mode".to_string(),
                allowed: Self::ALL.iter().map(|m| m.as_str().to_string()).collect(),
            })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
