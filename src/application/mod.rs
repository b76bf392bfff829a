//! Application layer containing the allocation logic.
//!
//! This module defines the `PaymentOptimizer`, which takes the loaded orders and
//! payment methods and decides how every order is paid.

pub mod optimizer;
