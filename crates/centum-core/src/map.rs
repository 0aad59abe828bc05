//! # Attribute Maps
//!
//! Plain key/value views of the value types for hydrators and other
//! serialization layers that work on untyped data.
//!
//! ```text
//! Money          ◄──►  { "amount": 1234, "currency": "EUR" }
//! DecimalNumber  ◄──►  { "numeral": 5, "fraction_digits": 1 }
//! MoneyCollection ──►  [ {money map}, {money map}, ... ]
//! ```
//!
//! Reading a map validates every field the same way the typed setters do:
//! missing or `null` numbers become zero, wrong types are rejected with
//! [`ValidationError`](crate::error::ValidationError), and currency codes
//! must be supported. Derived keys (`sub_unit`, `fraction_digits` on a
//! money map) are ignored.

use serde_json::{Map, Value};

use crate::collection::MoneyCollection;
use crate::decimal::DecimalNumber;
use crate::error::CoreResult;
use crate::money::Money;
use crate::validation::{validate_currency_value, validate_integer};

/// Conversion to and from a flat attribute map.
pub trait AttributeMap: Sized {
    fn to_map(&self) -> Map<String, Value>;

    fn from_map(map: &Map<String, Value>) -> CoreResult<Self>;
}

fn field<'a>(map: &'a Map<String, Value>, key: &str) -> &'a Value {
    map.get(key).unwrap_or(&Value::Null)
}

impl AttributeMap for Money {
    fn to_map(&self) -> Map<String, Value> {
        let mut map = Map::new();
        map.insert("amount".to_string(), Value::from(self.amount()));
        map.insert(
            "currency".to_string(),
            self.currency().map_or(Value::Null, Value::from),
        );
        map
    }

    /// ## Example
    /// ```rust
    /// use centum_core::{AttributeMap, Money};
    /// use serde_json::json;
    ///
    /// let map = json!({"amount": 1234, "currency": "eur"});
    /// let money = Money::from_map(map.as_object().unwrap()).unwrap();
    /// assert_eq!(money, Money::new(1234, "EUR").unwrap());
    /// ```
    fn from_map(map: &Map<String, Value>) -> CoreResult<Self> {
        let amount = validate_integer("Amount", field(map, "amount"))?;
        let currency = validate_currency_value(field(map, "currency"))?;

        let mut money = Money::empty();
        money.set_currency(currency)?.set_amount(amount);
        Ok(money)
    }
}

impl AttributeMap for DecimalNumber {
    fn to_map(&self) -> Map<String, Value> {
        let mut map = Map::new();
        map.insert("numeral".to_string(), Value::from(self.numeral()));
        map.insert(
            "fraction_digits".to_string(),
            Value::from(self.fraction_digits()),
        );
        map
    }

    fn from_map(map: &Map<String, Value>) -> CoreResult<Self> {
        let numeral = validate_integer("Numeral", field(map, "numeral"))?;
        let fraction_digits = validate_integer("Fraction digits", field(map, "fraction_digits"))?;

        let mut number = DecimalNumber::default();
        number
            .set_numeral(numeral)
            .set_fraction_digits(fraction_digits)?;
        Ok(number)
    }
}

impl MoneyCollection {
    /// Array of money maps, in collection order.
    pub fn to_values(&self) -> Vec<Value> {
        self.iter().map(|money| Value::Object(money.to_map())).collect()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
