use std::collections::btree_map;
use std::collections::BTreeMap;
use std::fmt;
use std::hash::{Hash, Hasher};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::constants::SHARE_VALUE_UNIT;
use crate::errors::{Error, Result};

/// Aggregation key of a holding: one entry per issuer and currency.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HoldingKey {
    pub issuer_id: String,
    pub currency: String,
}

impl HoldingKey {
    pub fn new(issuer_id: impl Into<String>, currency: impl Into<String>) -> Self {
        HoldingKey {
            issuer_id: issuer_id.into(),
            currency: currency.into(),
        }
    }
}

impl fmt::Display for HoldingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.issuer_id, self.currency)
    }
}

/// One normalized investment line, or the sum/delta of several.
///
/// Equality and hashing only look at the key and the additive values
/// (`nominal_value`, `fair_value`). A missing fair value compares equal to
/// zero. Name, category and share price are descriptive.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct HoldingRecord {
    pub issuer_id: String,
    pub issuer_name: String,
    pub category: String,
    pub currency: String,
    pub nominal_value: Decimal,
    /// Price per 100 units.
    pub share_value: Option<Decimal>,
    /// Market value in absolute currency units.
    pub fair_value: Option<Decimal>,
}

impl HoldingRecord {
    /// Column order used by the report writers.
    pub const FIELD_NAMES: [&'static str; 7] = [
        "issuer_id",
        "issuer_name",
        "category",
        "currency",
        "nominal_value",
        "share_value",
        "fair_value",
    ];

    pub fn new(
        issuer_id: impl Into<String>,
        currency: impl Into<String>,
        nominal_value: Decimal,
    ) -> Self {
        HoldingRecord {
            issuer_id: issuer_id.into(),
            issuer_name: String::new(),
            category: String::new(),
            currency: currency.into(),
            nominal_value,
            share_value: None,
            fair_value: None,
        }
    }

    pub fn with_name(mut self, issuer_name: impl Into<String>) -> Self {
        self.issuer_name = issuer_name.into();
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn with_share_value(mut self, share_value: Decimal) -> Self {
        self.share_value = Some(share_value);
        self
    }

    pub fn with_fair_value(mut self, fair_value: Decimal) -> Self {
        self.fair_value = Some(fair_value);
        self
    }

    pub fn key(&self) -> HoldingKey {
        HoldingKey::new(self.issuer_id.clone(), self.currency.clone())
    }

    /// Same key and descriptive fields, all values zeroed. Seeds an aggregation.
    pub fn zeroed(&self) -> Self {
        HoldingRecord {
            issuer_id: self.issuer_id.clone(),
            issuer_name: self.issuer_name.clone(),
            category: self.category.clone(),
            currency: self.currency.clone(),
            nominal_value: Decimal::ZERO,
            share_value: None,
            fair_value: None,
        }
    }

    /// `share_value * nominal_value / 100`, when a share price is known.
    pub fn computed_fair_value(&self) -> Option<Decimal> {
        self.share_value
            .and_then(|price| price.checked_mul(self.nominal_value))
            .map(|value| value / Decimal::from(SHARE_VALUE_UNIT))
    }

    /// Sums two records of the same holding. The share price is not additive:
    /// the left operand's price wins when both are known.
    pub fn try_add(&self, other: &HoldingRecord) -> Result<HoldingRecord> {
        self.ensure_same_key(other)?;

        let fair_value = match (self.fair_value, other.fair_value) {
            (Some(a), Some(b)) => Some(self.checked(a.checked_add(b), "fair_value")?),
            (a, None) => a,
            (None, b) => b,
        };
        let nominal_value = self.checked(
            self.nominal_value.checked_add(other.nominal_value),
            "nominal_value",
        )?;

        Ok(HoldingRecord {
            nominal_value,
            share_value: self.share_value.or(other.share_value),
            fair_value,
            ..self.clone()
        })
    }

    /// Delta `self - other`. Keeps the left operand's share price.
    pub fn try_sub(&self, other: &HoldingRecord) -> Result<HoldingRecord> {
        self.ensure_same_key(other)?;

        let fair_value = match (self.fair_value, other.fair_value) {
            (Some(a), Some(b)) => Some(self.checked(a.checked_sub(b), "fair_value")?),
            (a, None) => a,
            (None, Some(b)) => Some(-b),
        };
        let nominal_value = self.checked(
            self.nominal_value.checked_sub(other.nominal_value),
            "nominal_value",
        )?;

        Ok(HoldingRecord {
            nominal_value,
            fair_value,
            ..self.clone()
        })
    }

    fn ensure_same_key(&self, other: &HoldingRecord) -> Result<()> {
        if self.issuer_id != other.issuer_id || self.currency != other.currency {
            return Err(Error::MismatchedKey {
                left: self.key(),
                right: other.key(),
            });
        }
        Ok(())
    }

    fn checked(&self, value: Option<Decimal>, field: &'static str) -> Result<Decimal> {
        value.ok_or_else(|| Error::ValueOverflow {
            key: self.key(),
            field,
        })
    }

    fn fair_value_or_zero(&self) -> Decimal {
        self.fair_value.unwrap_or(Decimal::ZERO)
    }
}

impl PartialEq for HoldingRecord {
    fn eq(&self, other: &Self) -> bool {
        self.issuer_id == other.issuer_id
            && self.currency == other.currency
            && self.nominal_value == other.nominal_value
            && self.fair_value_or_zero() == other.fair_value_or_zero()
    }
}

impl Eq for HoldingRecord {}

impl Hash for HoldingRecord {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.issuer_id.hash(state);
        self.currency.hash(state);
        self.nominal_value.hash(state);
        self.fair_value_or_zero().hash(state);
    }
}

impl fmt::Display for HoldingRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.issuer_name.is_empty() {
            write!(f, "<Holding: {}>", self.issuer_id)
        } else {
            write!(f, "<Holding: {} - {}>", self.issuer_name, self.issuer_id)
        }
    }
}

/// Aggregated holdings of one quarter, one record per [`HoldingKey`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Portfolio {
    holdings: BTreeMap<HoldingKey, HoldingRecord>,
}

impl Portfolio {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.holdings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.holdings.is_empty()
    }

    pub fn get(&self, key: &HoldingKey) -> Option<&HoldingRecord> {
        self.holdings.get(key)
    }

    pub fn contains_key(&self, key: &HoldingKey) -> bool {
        self.holdings.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &HoldingKey> {
        self.holdings.keys()
    }

    pub fn values(&self) -> impl Iterator<Item = &HoldingRecord> {
        self.holdings.values()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, HoldingKey, HoldingRecord> {
        self.holdings.iter()
    }

    /// Sum of all nominal values; `None` if it does not fit a `Decimal`.
    pub fn total_nominal_value(&self) -> Option<Decimal> {
        self.holdings
            .values()
            .try_fold(Decimal::ZERO, |total, h| total.checked_add(h.nominal_value))
    }

    /// Inserts a record under its own key, replacing any previous entry.
    pub(crate) fn insert(&mut self, record: HoldingRecord) -> Option<HoldingRecord> {
        self.holdings.insert(record.key(), record)
    }

    pub(crate) fn remove(&mut self, key: &HoldingKey) -> Option<HoldingRecord> {
        self.holdings.remove(key)
    }

    pub(crate) fn entry(
        &mut self,
        key: HoldingKey,
    ) -> btree_map::Entry<'_, HoldingKey, HoldingRecord> {
        self.holdings.entry(key)
    }
}

impl<'a> IntoIterator for &'a Portfolio {
    type Item = (&'a HoldingKey, &'a HoldingRecord);
    type IntoIter = btree_map::Iter<'a, HoldingKey, HoldingRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.holdings.iter()
    }
}
