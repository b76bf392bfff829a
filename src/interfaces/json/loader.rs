use crate::domain::order::Order;
use crate::domain::payment_method::{PaymentMethod, PaymentMethods};
use crate::error::{PaymentError, Result};
use serde::de::DeserializeOwned;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Reads orders or payment methods from a JSON array.
///
/// Unknown fields are ignored. A top-level `null` is rejected as missing input
/// rather than treated as an empty list.
pub struct JsonLoader<R: Read> {
    reader: BufReader<R>,
}

impl<R: Read> JsonLoader<R> {
    /// Creates a new `JsonLoader` from any `Read` source (e.g., File, Stdin).
    pub fn new(source: R) -> Self {
        Self {
            reader: BufReader::new(source),
        }
    }

    pub fn orders(self) -> Result<Vec<Order>> {
        self.read_list("order")
    }

    /// Loads payment methods, keeping the order they appear in.
    pub fn payment_methods(self) -> Result<PaymentMethods> {
        let methods: Vec<PaymentMethod> = self.read_list("payment method")?;
        PaymentMethods::try_from(methods)
    }

    fn read_list<T: DeserializeOwned>(self, what: &str) -> Result<Vec<T>> {
        let list: Option<Vec<T>> = serde_json::from_reader(self.reader)?;
        list.ok_or_else(|| PaymentError::InvalidInput(format!("{what} collection is missing")))
    }
}

pub fn load_orders(path: impl AsRef<Path>) -> Result<Vec<Order>> {
    JsonLoader::new(File::open(path)?).orders()
}

pub fn load_payment_methods(path: impl AsRef<Path>) -> Result<PaymentMethods> {
    JsonLoader::new(File::open(path)?).payment_methods()
}
