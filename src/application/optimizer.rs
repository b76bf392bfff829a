use crate::domain::order::Order;
use crate::domain::payment_method::PaymentMethods;
use crate::domain::pricing::{self, POINTS_ID};
use crate::error::{PaymentError, Result};
use rust_decimal::Decimal;
use std::collections::HashSet;
use tracing::{debug, info, warn};

/// Portion of a mixed payment charged to a card.
#[derive(Debug, Clone, PartialEq)]
pub struct CardCharge {
    pub method: String,
    pub amount: Decimal,
}

/// How a single order ended up being paid.
#[derive(Debug, Clone, PartialEq)]
pub enum Settlement {
    /// Whole order paid by a promotional card at that card's discount.
    Promotion {
        order: String,
        method: String,
        charged: Decimal,
    },
    /// Whole order paid with loyalty points at the points discount.
    FullPoints { order: String, charged: Decimal },
    /// Order paid partly with points at the flat mixed-payment discount.
    ///
    /// `uncharged` is the remainder no card could cover.
    Mixed {
        order: String,
        points: Decimal,
        card: Option<CardCharge>,
        uncharged: Decimal,
    },
    /// Whole order paid by a card without any discount.
    Fallback {
        order: String,
        method: String,
        charged: Decimal,
    },
}

impl Settlement {
    pub fn order_id(&self) -> &str {
        match self {
            Settlement::Promotion { order, .. }
            | Settlement::FullPoints { order, .. }
            | Settlement::Mixed { order, .. }
            | Settlement::Fallback { order, .. } => order,
        }
    }
}

/// Outcome of an optimization run, in the order settlements were applied.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AllocationReport {
    pub settlements: Vec<Settlement>,
    /// Orders no payment method could cover.
    pub unpaid: Vec<String>,
}

impl AllocationReport {
    pub fn settlement_for(&self, order_id: &str) -> Option<&Settlement> {
        self.settlements.iter().find(|s| s.order_id() == order_id)
    }

    pub fn is_fully_paid(&self) -> bool {
        self.unpaid.is_empty() && self.shortfall().is_zero()
    }

    /// Sum of mixed-payment remainders that were never charged.
    pub fn shortfall(&self) -> Decimal {
        self.settlements
            .iter()
            .map(|s| match s {
                Settlement::Mixed { uncharged, .. } => *uncharged,
                _ => Decimal::ZERO,
            })
            .sum()
    }
}

struct PromoCandidate<'a> {
    position: usize,
    method: &'a str,
    discount: u8,
}

/// Assigns payment methods to orders so as to maximize the discount granted.
///
/// Runs three greedy phases in sequence: promotional cards, full points
/// payments, then mixed points-and-card payments with a no-discount fallback.
/// Orders keep their input order throughout, and payment methods are always
/// scanned in the order they were supplied.
#[derive(Debug, Clone)]
pub struct PaymentOptimizer {
    points_id: String,
}

impl Default for PaymentOptimizer {
    fn default() -> Self {
        Self::new()
    }
}

impl PaymentOptimizer {
    pub fn new() -> Self {
        Self::with_points_id(POINTS_ID)
    }

    /// Uses `points_id` as the loyalty-points account instead of the default.
    pub fn with_points_id(points_id: impl Into<String>) -> Self {
        Self {
            points_id: points_id.into(),
        }
    }

    /// Pays for `orders` out of `methods`, increasing each method's used amount.
    ///
    /// Input is validated before anything is charged.
    pub fn optimize(
        &self,
        orders: &[Order],
        methods: &mut PaymentMethods,
    ) -> Result<AllocationReport> {
        validate(orders, methods)?;

        let mut unassigned: Vec<&Order> = orders.iter().collect();
        let mut report = AllocationReport::default();

        self.process_promotional_phase(&mut unassigned, methods, &mut report)?;
        self.process_points_phase(&mut unassigned, methods, &mut report)?;
        self.process_remaining_orders(&unassigned, methods, &mut report)?;

        info!(
            orders = orders.len(),
            settled = report.settlements.len(),
            unpaid = report.unpaid.len(),
            "optimization finished"
        );
        Ok(report)
    }

    fn process_promotional_phase<'a>(
        &self,
        unassigned: &mut Vec<&'a Order>,
        methods: &mut PaymentMethods,
        report: &mut AllocationReport,
    ) -> Result<()> {
        let mut used_promos: HashSet<&'a str> = HashSet::new();

        while let Some(best) = self.find_best_promotion(unassigned, methods, &used_promos) {
            let order = unassigned.remove(best.position);
            let charged = pricing::after_discount(order.value, best.discount);
            methods.consume(best.method, charged)?;
            used_promos.insert(best.method);

            debug!(order = %order.id, method = best.method, %charged, "promotion applied");
            report.settlements.push(Settlement::Promotion {
                order: order.id.clone(),
                method: best.method.to_string(),
                charged,
            });
        }

        info!(promotions = used_promos.len(), "promotional phase done");
        Ok(())
    }

    /// Picks the order/method pair with the largest discount amount.
    ///
    /// Only strictly larger savings replace the current best, so ties go to the
    /// first pair in scan order.
    fn find_best_promotion<'a>(
        &self,
        unassigned: &[&'a Order],
        methods: &PaymentMethods,
        used_promos: &HashSet<&'a str>,
    ) -> Option<PromoCandidate<'a>> {
        let mut best = None;
        let mut best_saving = Decimal::ZERO;

        for (position, &order) in unassigned.iter().enumerate() {
            for promo in &order.promotions {
                if promo == &self.points_id || used_promos.contains(promo.as_str()) {
                    continue;
                }
                let Some(method) = methods.get(promo) else {
                    continue;
                };
                if !method.can_afford(order.value) {
                    continue;
                }

                let saving = pricing::discount_amount(order.value, method.discount);
                if saving > best_saving {
                    best_saving = saving;
                    best = Some(PromoCandidate {
                        position,
                        method: promo.as_str(),
                        discount: method.discount,
                    });
                }
            }
        }
        best
    }

    fn process_points_phase(
        &self,
        unassigned: &mut Vec<&Order>,
        methods: &mut PaymentMethods,
        report: &mut AllocationReport,
    ) -> Result<()> {
        let Some(points) = methods.get_mut(&self.points_id) else {
            debug!(points = %self.points_id, "no points account, skipping points phase");
            return Ok(());
        };

        let mut remaining = Vec::with_capacity(unassigned.len());
        let mut paid = 0usize;
        for order in unassigned.drain(..) {
            if !points.can_afford(order.value) {
                remaining.push(order);
                continue;
            }
            let charged = pricing::after_discount(order.value, points.discount);
            points.consume(charged)?;
            paid += 1;

            debug!(order = %order.id, %charged, "paid with points");
            report.settlements.push(Settlement::FullPoints {
                order: order.id.clone(),
                charged,
            });
        }
        *unassigned = remaining;

        info!(paid, "points phase done");
        Ok(())
    }

    fn process_remaining_orders(
        &self,
        unassigned: &[&Order],
        methods: &mut PaymentMethods,
        report: &mut AllocationReport,
    ) -> Result<()> {
        for order in unassigned {
            if let Some(settlement) = self.try_mixed_payment(order, methods)? {
                report.settlements.push(settlement);
                continue;
            }
            self.process_fallback_payment(order, methods, report)?;
        }
        Ok(())
    }

    /// Pays at least 10% of the order with points and the rest with one card.
    ///
    /// Returns `None` when the points account cannot reach the minimum share.
    fn try_mixed_payment(
        &self,
        order: &Order,
        methods: &mut PaymentMethods,
    ) -> Result<Option<Settlement>> {
        let Some(points) = methods.get_mut(&self.points_id) else {
            return Ok(None);
        };
        let available = points.available();
        if available <= Decimal::ZERO {
            return Ok(None);
        }

        let minimum = pricing::min_points(order.value);
        let points_to_use = available.min(order.value);
        if points_to_use < minimum {
            return Ok(None);
        }

        let total = pricing::mixed_total(order.value);
        points.consume(points_to_use)?;
        let remaining = total - points_to_use;

        let mut card = None;
        let mut uncharged = Decimal::ZERO;
        if remaining > Decimal::ZERO {
            match methods
                .best_card_for(remaining, &self.points_id)
                .map(|m| m.id.clone())
            {
                Some(method) => {
                    methods.consume(&method, remaining)?;
                    card = Some(CardCharge {
                        method,
                        amount: remaining,
                    });
                }
                None => {
                    warn!(order = %order.id, %remaining, "no card covers mixed payment remainder");
                    uncharged = remaining;
                }
            }
        }

        debug!(order = %order.id, points = %points_to_use, %remaining, "mixed payment applied");
        Ok(Some(Settlement::Mixed {
            order: order.id.clone(),
            points: points_to_use,
            card,
            uncharged,
        }))
    }

    fn process_fallback_payment(
        &self,
        order: &Order,
        methods: &mut PaymentMethods,
        report: &mut AllocationReport,
    ) -> Result<()> {
        let Some(method) = methods
            .best_card_for(order.value, &self.points_id)
            .map(|m| m.id.clone())
        else {
            warn!(order = %order.id, value = %order.value, "order left unpaid");
            report.unpaid.push(order.id.clone());
            return Ok(());
        };

        methods.consume(&method, order.value)?;
        debug!(order = %order.id, method = %method, charged = %order.value, "fallback payment applied");
        report.settlements.push(Settlement::Fallback {
            order: order.id.clone(),
            method,
            charged: order.value,
        });
        Ok(())
    }
}

fn validate(orders: &[Order], methods: &PaymentMethods) -> Result<()> {
    if let Some(order) = orders.iter().find(|o| o.value < Decimal::ZERO) {
        return Err(PaymentError::InvalidInput(format!(
            "order '{}' has negative value {}",
            order.id, order.value
        )));
    }
    for method in methods {
        if method.discount > 100 {
            return Err(PaymentError::InvalidInput(format!(
                "payment method '{}' has discount {} outside 0-100",
                method.id, method.discount
            )));
        }
        if method.limit() < Decimal::ZERO {
            return Err(PaymentError::InvalidInput(format!(
                "payment method '{}' has negative limit {}",
                method.id,
                method.limit()
            )));
        }
    }
    Ok(())
}
