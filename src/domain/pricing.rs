//! Decimal helpers shared by every allocation phase.
//!
//! All money is handled as `rust_decimal::Decimal` with two fractional digits.
//! Discounted totals round half-up, the minimum points share rounds up.

use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;

/// Identifier of the loyalty-points account.
pub const POINTS_ID: &str = "PUNKTY";

/// Number of fractional digits kept for every monetary amount.
pub const MONEY_SCALE: u32 = 2;

/// Share of an order that must be paid with points to qualify as a mixed payment.
pub const MIN_POINTS_SHARE: Decimal = dec!(0.10);

/// Multiplier applied to an order paid partly with points.
pub const MIXED_PAYMENT_FACTOR: Decimal = dec!(0.90);

const HUNDRED: Decimal = dec!(100);

/// Rounds to two decimals, midpoints away from zero.
pub fn round_half_up(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(MONEY_SCALE, RoundingStrategy::MidpointAwayFromZero)
}

/// Rounds to two decimals towards positive infinity.
pub fn round_ceiling(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(MONEY_SCALE, RoundingStrategy::ToPositiveInfinity)
}

fn rate(discount: u8) -> Decimal {
    Decimal::from(discount) / HUNDRED
}

/// Amount saved when `value` is paid with a method granting `discount` percent.
pub fn discount_amount(value: Decimal, discount: u8) -> Decimal {
    round_half_up(value * rate(discount))
}

/// Amount actually charged for `value` once `discount` percent is taken off.
pub fn after_discount(value: Decimal, discount: u8) -> Decimal {
    round_half_up(value * (Decimal::ONE - rate(discount)))
}

/// Smallest points contribution that still qualifies as a mixed payment.
pub fn min_points(value: Decimal) -> Decimal {
    round_ceiling(value * MIN_POINTS_SHARE)
}

/// Total charged for a mixed points and card payment.
pub fn mixed_total(value: Decimal) -> Decimal {
    round_half_up(value * MIXED_PAYMENT_FACTOR)
}
