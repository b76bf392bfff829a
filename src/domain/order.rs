use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer};

/// A purchase order waiting to be paid.
///
/// `promotions` lists the ids of payment methods that grant their discount
/// when they pay for the whole order.
#[derive(Debug, Deserialize, PartialEq, Clone)]
pub struct Order {
    pub id: String,
    pub value: Decimal,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub promotions: Vec<String>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

impl Order {
    pub fn new(id: impl Into<String>, value: Decimal, promotions: &[&str]) -> Self {
        Self {
            id: id.into(),
            value,
            promotions: promotions.iter().map(|p| p.to_string()).collect(),
        }
    }
}
