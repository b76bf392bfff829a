//! Domain model: orders, payment methods and the money arithmetic between them.

pub mod order;
pub mod payment_method;
pub mod pricing;
