use crate::error::{PaymentError, Result};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer};
use std::collections::HashMap;

/// A payment method with a spending limit, e.g. a bank card or the loyalty-points account.
///
/// `used` only ever grows, through [`PaymentMethod::consume`], and never exceeds `limit`.
#[derive(Debug, Deserialize, PartialEq, Clone)]
pub struct PaymentMethod {
    pub id: String,
    /// Discount percentage granted by this method (0-100).
    #[serde(deserialize_with = "deserialize_discount")]
    pub discount: u8,
    limit: Decimal,
    #[serde(skip, default)]
    used: Decimal,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawDiscount {
    Number(u64),
    Text(String),
}

fn deserialize_discount<'de, D>(deserializer: D) -> std::result::Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = match RawDiscount::deserialize(deserializer)? {
        RawDiscount::Number(n) => n,
        RawDiscount::Text(s) => s.trim().parse().map_err(serde::de::Error::custom)?,
    };
    u8::try_from(raw).map_err(serde::de::Error::custom)
}

impl PaymentMethod {
    pub fn new(id: impl Into<String>, discount: u8, limit: Decimal) -> Self {
        Self {
            id: id.into(),
            discount,
            limit,
            used: Decimal::ZERO,
        }
    }

    /// Total capacity of the method.
    pub fn limit(&self) -> Decimal {
        self.limit
    }

    /// Amount consumed so far.
    pub fn used(&self) -> Decimal {
        self.used
    }

    /// Capacity left: `limit - used`.
    pub fn available(&self) -> Decimal {
        self.limit - self.used
    }

    pub fn can_afford(&self, amount: Decimal) -> bool {
        self.available() >= amount
    }

    pub fn is_points(&self, points_id: &str) -> bool {
        self.id == points_id
    }

    /// Charges `amount` to this method.
    ///
    /// Fails without touching `used` when the amount is negative or exceeds
    /// the available limit.
    pub fn consume(&mut self, amount: Decimal) -> Result<()> {
        if amount < Decimal::ZERO {
            return Err(PaymentError::InvalidInput(format!(
                "negative charge {amount} for payment method '{}'",
                self.id
            )));
        }
        if !self.can_afford(amount) {
            return Err(PaymentError::InsufficientFunds {
                method: self.id.clone(),
                requested: amount,
                available: self.available(),
            });
        }
        self.used += amount;
        Ok(())
    }
}

/// Payment methods kept in input order, with lookup by id.
///
/// Iteration order is the order methods were supplied in, which makes
/// every "first best" choice reproducible.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct PaymentMethods {
    methods: Vec<PaymentMethod>,
    index: HashMap<String, usize>,
}

impl PaymentMethods {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a method. Ids must be unique.
    pub fn insert(&mut self, method: PaymentMethod) -> Result<()> {
        if self.index.contains_key(&method.id) {
            return Err(PaymentError::InvalidInput(format!(
                "duplicate payment method id '{}'",
                method.id
            )));
        }
        self.index.insert(method.id.clone(), self.methods.len());
        self.methods.push(method);
        Ok(())
    }

    pub fn get(&self, id: &str) -> Option<&PaymentMethod> {
        self.index.get(id).map(|&i| &self.methods[i])
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut PaymentMethod> {
        self.index.get(id).map(|&i| &mut self.methods[i])
    }

    /// Charges `amount` to the method with the given id.
    pub fn consume(&mut self, id: &str, amount: Decimal) -> Result<()> {
        self.get_mut(id)
            .ok_or_else(|| PaymentError::InvalidInput(format!("unknown payment method '{id}'")))?
            .consume(amount)
    }

    pub fn iter(&self) -> impl Iterator<Item = &PaymentMethod> {
        self.methods.iter()
    }

    pub fn len(&self) -> usize {
        self.methods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.methods.is_empty()
    }

    /// Card (any method but the points account) with the highest discount that
    /// can still cover `amount`. Ties go to the method supplied first.
    pub fn best_card_for(&self, amount: Decimal, points_id: &str) -> Option<&PaymentMethod> {
        self.methods
            .iter()
            .filter(|m| !m.is_points(points_id) && m.can_afford(amount))
            .fold(None, |best: Option<&PaymentMethod>, m| match best {
                Some(b) if b.discount >= m.discount => Some(b),
                _ => Some(m),
            })
    }

    /// Sum of `used` across all methods.
    pub fn total_used(&self) -> Decimal {
        self.methods.iter().map(PaymentMethod::used).sum()
    }
}

impl TryFrom<Vec<PaymentMethod>> for PaymentMethods {
    type Error = PaymentError;

    fn try_from(methods: Vec<PaymentMethod>) -> Result<Self> {
        let mut collection = Self::new();
        for method in methods {
            collection.insert(method)?;
        }
        Ok(collection)
    }
}

impl<'a> IntoIterator for &'a PaymentMethods {
    type Item = &'a PaymentMethod;
    type IntoIter = std::slice::Iter<'a, PaymentMethod>;

    fn into_iter(self) -> Self::IntoIter {
        self.methods.iter()
    }
}
