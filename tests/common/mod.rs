use payment_optimizer::domain::order::Order;
use payment_optimizer::domain::payment_method::{PaymentMethod, PaymentMethods};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rust_decimal::Decimal;

const CARD_IDS: [&str; 5] = ["mZysk", "BosBankrut", "Citi", "Revolut", "Pekao"];

fn cents(rng: &mut StdRng, max: i64) -> Decimal {
    Decimal::new(rng.gen_range(1..=max), 2)
}

/// Builds a reproducible batch of orders and payment methods from `seed`.
pub fn random_scenario(seed: u64, order_count: usize) -> (Vec<Order>, PaymentMethods) {
    let mut rng = StdRng::seed_from_u64(seed);

    let mut methods = vec![PaymentMethod::new(
        "PUNKTY",
        rng.gen_range(0..=30),
        cents(&mut rng, 50_000),
    )];
    for id in CARD_IDS {
        methods.push(PaymentMethod::new(
            id,
            rng.gen_range(0..=25),
            cents(&mut rng, 100_000),
        ));
    }

    let orders = (1..=order_count)
        .map(|i| {
            let promotions: Vec<&str> = CARD_IDS
                .iter()
                .copied()
                .filter(|_| rng.gen_bool(0.3))
                .collect();
            Order::new(format!("ORDER{i}"), cents(&mut rng, 30_000), &promotions)
        })
        .collect();

    (orders, PaymentMethods::try_from(methods).expect("unique ids"))
}
