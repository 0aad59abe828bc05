//! # Money Collection
//!
//! An ordered container of [`Money`] values with bulk arithmetic and
//! per-currency reduction.
//!
//! ## Reduction
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  [ -10 EUR, -10 USD, 100 EUR ]                                          │
//! │           │                                                             │
//! │           ▼  reduce(): sum per currency, first-seen order               │
//! │  [ 90 EUR, -10 USD ]                                                    │
//! │                                                                         │
//! │  • amounts are ADDITIVE within a currency                              │
//! │  • currencies are never merged into each other                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Atomicity
//! Bulk operations compute on a working copy and only replace the stored
//! values once every element succeeded, so an overflow half-way through
//! leaves the collection exactly as it was.
//!
//! ## Example
//! ```rust
//! use centum_core::{Money, MoneyCollection};
//!
//! # fn main() -> centum_core::CoreResult<()> {
//! let mut till = MoneyCollection::from_moneys(vec![
//!     Money::new(-10, "EUR")?,
//!     Money::new(-10, "USD")?,
//!     Money::new(100, "EUR")?,
//! ]);
//! till.reduce()?;
//!
//! assert_eq!(till.len(), 2);
//! assert_eq!(till.get(0), Some(&Money::new(90, "EUR")?));
//! assert_eq!(till.get(1), Some(&Money::new(-10, "USD")?));
//! # Ok(())
//! # }
//! ```

use std::collections::HashMap;
use std::mem;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::error::{CoreResult, ValidationError};
use crate::map::AttributeMap;
use crate::money::{Factor, Money};
use crate::rounding::RoundingMode;
use crate::validation::value_type_name;

const CONTAINER: &str = "MoneyCollection";

/// Ordered sequence of owned [`Money`] values.
///
/// Serializes as a plain array of money maps.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MoneyCollection {
    items: Vec<Money>,
}

impl MoneyCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_moneys(items: Vec<Money>) -> Self {
        MoneyCollection { items }
    }

    /// Builds a collection from untyped values.
    ///
    /// Every element must be a money map; on the first invalid one nothing
    /// is built and the error is returned.
    pub fn try_from_values(values: &[Value]) -> CoreResult<Self> {
        Ok(MoneyCollection {
            items: Self::validate_data(values)?,
        })
    }

    // =========================================================================
    // Element Validation
    // =========================================================================

    /// Checks that `value` can live in the collection and returns it as Money.
    pub fn validate_value(value: &Value) -> CoreResult<Money> {
        match value {
            Value::Object(map) => Money::from_map(map),
            other => Err(ValidationError::InvalidElement {
                container: CONTAINER,
                given: value_type_name(other).to_string(),
            }
            .into()),
        }
    }

    /// [`validate_value`](Self::validate_value) for every element.
    pub fn validate_data(values: &[Value]) -> CoreResult<Vec<Money>> {
        values.iter().map(Self::validate_value).collect()
    }

    // =========================================================================
    // Access
    // =========================================================================

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Money> {
        self.items.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Money> {
        self.items.iter()
    }

    pub fn as_slice(&self) -> &[Money] {
        &self.items
    }

    /// Owned copy of the stored values.
    pub fn to_vec(&self) -> Vec<Money> {
        self.items.clone()
    }

    // =========================================================================
    // Insertion
    // =========================================================================

    pub fn push(&mut self, money: Money) -> &mut Self {
        self.items.push(money);
        self
    }

    /// Replaces the value at `index`, or appends when `index == len()`.
    pub fn set(&mut self, index: usize, money: Money) -> CoreResult<&mut Self> {
        let len = self.items.len();
        match index.cmp(&len) {
            std::cmp::Ordering::Less => self.items[index] = money,
            std::cmp::Ordering::Equal => self.items.push(money),
            std::cmp::Ordering::Greater => {
                return Err(ValidationError::IndexOutOfBounds { index, len }.into())
            }
        }
        Ok(self)
    }

    /// Swaps in new contents and returns the previous ones.
    pub fn exchange(&mut self, items: Vec<Money>) -> Vec<Money> {
        mem::replace(&mut self.items, items)
    }

    /// Appends an untyped value after checking it is a money map.
    pub fn append_value(&mut self, value: &Value) -> CoreResult<&mut Self> {
        let money = Self::validate_value(value)?;
        Ok(self.push(money))
    }

    /// Index assignment for an untyped value.
    pub fn set_value(&mut self, index: usize, value: &Value) -> CoreResult<&mut Self> {
        let money = Self::validate_value(value)?;
        self.set(index, money)
    }

    /// Replaces the contents with untyped values and returns the old ones.
    ///
    /// If any new element is invalid the previous contents are restored
    /// and the validation error is returned.
    pub fn exchange_array(&mut self, values: &[Value]) -> CoreResult<Vec<Money>> {
        let previous = mem::take(&mut self.items);
        match Self::validate_data(values) {
            Ok(items) => {
                self.items = items;
                Ok(previous)
            }
            Err(err) => {
                debug!(error = %err, "Bulk replace rejected, contents restored");
                self.items = previous;
                Err(err)
            }
        }
    }

    // =========================================================================
    // Bulk Arithmetic
    // =========================================================================

    /// [`Money::abs`] on every element.
    pub fn abs(&mut self) -> CoreResult<&mut Self> {
        self.apply(|money| money.abs().map(|_| ()))
    }

    /// [`Money::negate`] on every element.
    pub fn negate(&mut self) -> CoreResult<&mut Self> {
        self.apply(|money| money.negate().map(|_| ()))
    }

    /// [`Money::multiply`] on every element.
    pub fn multiply(&mut self, factor: impl Into<Factor>, mode: RoundingMode) -> CoreResult<&mut Self> {
        let factor = factor.into();
        self.apply(|money| money.multiply(factor, mode).map(|_| ()))
    }

    /// Sums the values per currency, in order of first appearance.
    ///
    /// Values without a currency form their own group.
    pub fn reduce(&mut self) -> CoreResult<&mut Self> {
        let reduced = reduce_by_currency(&self.items)?;
        debug!(
            before = self.items.len(),
            currencies = reduced.len(),
            "Reduced money collection"
        );
        self.items = reduced;
        Ok(self)
    }

    /// Appends clones of every value in `other`, without reducing.
    pub fn merge(&mut self, other: &MoneyCollection) -> &mut Self {
        self.items.extend(other.items.iter().cloned());
        self
    }

    /// Merges `other` and reduces.
    pub fn add(&mut self, other: &MoneyCollection) -> CoreResult<&mut Self> {
        let mut combined = self.items.clone();
        combined.extend(other.items.iter().cloned());
        self.items = reduce_by_currency(&combined)?;
        Ok(self)
    }

    /// Merges negated clones of `other` and reduces.
    pub fn subtract(&mut self, other: &MoneyCollection) -> CoreResult<&mut Self> {
        let mut combined = self.items.clone();
        for money in &other.items {
            let mut negated = money.copy();
            negated.negate()?;
            combined.push(negated);
        }
        self.items = reduce_by_currency(&combined)?;
        Ok(self)
    }

    /// Deep copy; the result shares nothing with `self`.
    pub fn copy(&self) -> MoneyCollection {
        self.clone()
    }

    fn apply<F>(&mut self, mut op: F) -> CoreResult<&mut Self>
    where
        F: FnMut(&mut Money) -> CoreResult<()>,
    {
        let mut working = self.items.clone();
        for money in working.iter_mut() {
            op(money)?;
        }
        self.items = working;
        Ok(self)
    }
}

fn reduce_by_currency(items: &[Money]) -> CoreResult<Vec<Money>> {
    let mut totals: Vec<Money> = Vec::new();
    let mut slots: HashMap<Option<&str>, usize> = HashMap::new();

    for money in items {
        match slots.get(&money.currency()) {
            Some(&slot) => {
                totals[slot].add(money)?;
            }
            None => {
                slots.insert(money.currency(), totals.len());
                totals.push(money.copy());
            }
        }
    }

    Ok(totals)
}

// =============================================================================
// Trait Implementations
// =============================================================================

impl From<Vec<Money>> for MoneyCollection {
    fn from(items: Vec<Money>) -> Self {
        MoneyCollection::from_moneys(items)
    }
}

impl FromIterator<Money> for MoneyCollection {
    fn from_iter<I: IntoIterator<Item = Money>>(iter: I) -> Self {
        MoneyCollection {
            items: iter.into_iter().collect(),
        }
    }
}

impl Extend<Money> for MoneyCollection {
    fn extend<I: IntoIterator<Item = Money>>(&mut self, iter: I) {
        self.items.extend(iter);
    }
}

impl IntoIterator for MoneyCollection {
    type Item = Money;
    type IntoIter = std::vec::IntoIter<Money>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a> IntoIterator for &'a MoneyCollection {
    type Item = &'a Money;
    type IntoIter = std::slice::Iter<'a, Money>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{CoreError, ErrorKind};
    use crate::DecimalNumber;
    use serde_json::json;

    fn money(amount: i64, code: &str) -> Money {
        Money::new(amount, code).unwrap()
    }

    fn mixed() -> MoneyCollection {
        MoneyCollection::from_moneys(vec![
            money(-10, "EUR"),
            money(-10, "USD"),
            money(100, "EUR"),
        ])
    }

    #[test]
    fn test_new_is_empty() {
        let collection = MoneyCollection::new();
        assert!(collection.is_empty());
        assert_eq!(collection.len(), 0);
        assert_eq!(collection.get(0), None);
    }

    #[test]
    fn test_try_from_values() {
        let collection = MoneyCollection::try_from_values(&[
            json!({"amount": 1, "currency": "EUR"}),
            json!({}),
        ])
        .unwrap();
        assert_eq!(collection.to_vec(), vec![money(1, "EUR"), Money::empty()]);

        let err = MoneyCollection::try_from_values(&[json!({"amount": 1}), json!(5)]).unwrap_err();
        assert!(matches!(
            err,
            CoreError::Validation(ValidationError::InvalidElement { ref given, .. }) if given == "integer"
        ));
    }

    #[test]
    fn test_validate_value_message() {
        let err = MoneyCollection::validate_value(&json!("EUR")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        assert_eq!(
            err.to_string(),
            "Value of type \"string\" is invalid for MoneyCollection; must be a money map"
        );
        assert!(MoneyCollection::validate_data(&[json!({}), json!({})]).is_ok());
    }

    #[test]
    fn test_set_and_append() {
        let mut collection = MoneyCollection::new();
        collection.set(0, money(1, "EUR")).unwrap();
        collection.push(money(2, "EUR"));
        collection.set(0, money(3, "USD")).unwrap();
        assert_eq!(collection.to_vec(), vec![money(3, "USD"), money(2, "EUR")]);

        let err = collection.set(5, money(1, "EUR")).unwrap_err();
        assert!(matches!(
            err,
            CoreError::Validation(ValidationError::IndexOutOfBounds { index: 5, len: 2 })
        ));
    }

    #[test]
    fn test_untyped_insert_validates_first() {
        let mut collection = MoneyCollection::from_moneys(vec![money(1, "EUR")]);
        assert!(collection.append_value(&json!([1, 2])).is_err());
        assert!(collection.set_value(0, &json!(null)).is_err());
        assert!(collection
            .append_value(&json!({"amount": 1, "currency": "XXX"}))
            .is_err());
        assert_eq!(collection.to_vec(), vec![money(1, "EUR")]);

        collection
            .append_value(&json!({"amount": 7, "currency": "gbp"}))
            .unwrap();
        assert_eq!(collection.get(1), Some(&money(7, "GBP")));
    }

    #[test]
    fn test_exchange() {
        let mut collection = MoneyCollection::new();
        assert!(collection.exchange(vec![Money::empty()]).is_empty());
        let old = collection.exchange(vec![Money::empty(), Money::empty()]);
        assert_eq!(old, vec![Money::empty()]);
        assert_eq!(collection.len(), 2);
    }

    #[test]
    fn test_exchange_array_rolls_back() {
        let mut collection = mixed();
        let before = collection.to_vec();

        let err = collection
            .exchange_array(&[json!({"amount": 1, "currency": "EUR"}), json!("bad")])
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        assert_eq!(collection.to_vec(), before);

        let old = collection
            .exchange_array(&[json!({"amount": 1, "currency": "EUR"})])
            .unwrap();
        assert_eq!(old, before);
        assert_eq!(collection.to_vec(), vec![money(1, "EUR")]);
    }

    #[test]
    fn test_abs_and_negate() {
        let mut collection = mixed();
        collection.abs().unwrap();
        assert!(collection.iter().all(|m| m.amount() >= 0));

        collection.negate().unwrap();
        let amounts: Vec<i64> = collection.iter().map(Money::amount).collect();
        assert_eq!(amounts, vec![-10, -10, -100]);
    }

    #[test]
    fn test_bulk_overflow_is_atomic() {
        let mut collection = MoneyCollection::from_moneys(vec![
            money(5, "EUR"),
            money(Money::MIN_AMOUNT, "EUR"),
        ]);
        let err = collection.negate().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Overflow);
        assert_eq!(collection.get(0), Some(&money(5, "EUR")));

        let mut big = MoneyCollection::from_moneys(vec![money(1, "USD"), money(Money::MAX_AMOUNT, "USD")]);
        assert!(big.multiply(2, RoundingMode::HalfUp).is_err());
        assert_eq!(big.get(0), Some(&money(1, "USD")));
    }

    #[test]
    fn test_multiply() {
        let mut collection = mixed();
        collection
            .multiply(&DecimalNumber::new(5, 1).unwrap(), RoundingMode::HalfUp)
            .unwrap();
        let amounts: Vec<i64> = collection.iter().map(Money::amount).collect();
        assert_eq!(amounts, vec![-5, -5, 50]);
    }

    #[test]
    fn test_reduce() {
        let mut collection = mixed();
        collection.reduce().unwrap();
        assert_eq!(collection.to_vec(), vec![money(90, "EUR"), money(-10, "USD")]);
    }

    #[test]
    fn test_reduce_keeps_unassigned_group() {
        let mut unassigned = Money::empty();
        unassigned.set_amount(3);
        let mut collection = MoneyCollection::from_moneys(vec![
            unassigned.clone(),
            money(1, "EUR"),
            unassigned,
        ]);
        collection.reduce().unwrap();
        assert_eq!(collection.len(), 2);
        assert_eq!(collection.get(0).map(Money::amount), Some(6));
        assert_eq!(collection.get(0).and_then(Money::currency), None);
    }

    #[test]
    fn test_reduce_overflow_is_atomic() {
        let mut collection = MoneyCollection::from_moneys(vec![
            money(Money::MAX_AMOUNT, "EUR"),
            money(1, "EUR"),
        ]);
        assert!(collection.reduce().is_err());
        assert_eq!(collection.len(), 2);
    }

    #[test]
    fn test_merge_clones() {
        let mut target = MoneyCollection::from_moneys(vec![money(1, "EUR")]);
        let mut source = mixed();
        target.merge(&source);
        source.negate().unwrap();

        assert_eq!(target.len(), 4);
        assert_eq!(target.get(1), Some(&money(-10, "EUR")));
        assert_eq!(target.get(3), Some(&money(100, "EUR")));
    }

    #[test]
    fn test_add() {
        let mut collection = MoneyCollection::from_moneys(vec![money(89, "EUR"), money(150, "GBP")]);
        collection.add(&mixed()).unwrap();
        assert_eq!(
            collection.to_vec(),
            vec![money(179, "EUR"), money(150, "GBP"), money(-10, "USD")]
        );
    }

    #[test]
    fn test_subtract() {
        let mut collection = MoneyCollection::from_moneys(vec![money(89, "EUR"), money(150, "GBP")]);
        let other = mixed();
        collection.subtract(&other).unwrap();
        assert_eq!(
            collection.to_vec(),
            vec![money(-1, "EUR"), money(150, "GBP"), money(10, "USD")]
        );
        assert_eq!(other, mixed(), "subtrahend must not change");
    }

    #[test]
    fn test_copy_is_independent() {
        let original = mixed();
        let mut copy = original.copy();
        assert_eq!(copy, original);

        copy.negate().unwrap().reduce().unwrap();
        assert_eq!(original, mixed());
    }

    #[test]
    fn test_iterators() {
        let collection: MoneyCollection = vec![money(1, "EUR"), money(2, "EUR")].into_iter().collect();
        let total: i64 = (&collection).into_iter().map(Money::amount).sum();
        assert_eq!(total, 3);

        let owned: Vec<Money> = collection.into_iter().collect();
        assert_eq!(owned.len(), 2);
    }

    #[test]
    fn test_serde_is_an_array() {
        let collection = MoneyCollection::from_moneys(vec![money(1, "EUR")]);
        let json = serde_json::to_value(&collection).unwrap();
        assert_eq!(json, json!([{"amount": 1, "currency": "EUR"}]));

        let back: MoneyCollection = serde_json::from_value(json).unwrap();
        assert_eq!(back, collection);
    }
}
