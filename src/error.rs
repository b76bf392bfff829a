use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PaymentError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error(
        "Insufficient funds for payment method {method}: requested {requested}, available {available}"
    )]
    InsufficientFunds {
        method: String,
        requested: Decimal,
        available: Decimal,
    },
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, PaymentError>;
