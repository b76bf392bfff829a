use assert_cmd::cargo_bin;
use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::io::Write;
use std::process::Command;
use tempfile::NamedTempFile;

fn json_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{content}").unwrap();
    file
}

#[test]
fn test_unpaid_order_is_silent_on_stdout() {
    let orders = json_file(
        r#"[
            {"id": "SMALL", "value": "10.00"},
            {"id": "HUGE", "value": "1000.00"}
        ]"#,
    );
    let methods = json_file(r#"[{"id": "card", "discount": "5", "limit": "50.00"}]"#);

    let mut cmd = Command::new(cargo_bin!("payment-optimizer"));
    cmd.arg(orders.path())
        .arg(methods.path())
        .env_remove("RUST_LOG");

    cmd.assert()
        .success()
        .stdout(predicate::eq("card 10.00\n"))
        .stderr(predicate::str::contains("order left unpaid"));
}

#[test]
fn test_rounding_boundaries() {
    // 10.05 * 0.90 = 9.045 -> 9.05 and 10.05 * 10% = 1.005 -> 1.01 points minimum.
    let orders = json_file(r#"[{"id": "A", "value": "10.05"}]"#);
    let methods = json_file(
        r#"[
            {"id": "PUNKTY", "discount": "15", "limit": "1.01"},
            {"id": "card", "discount": "5", "limit": "100.00"}
        ]"#,
    );

    let mut cmd = Command::new(cargo_bin!("payment-optimizer"));
    cmd.arg(orders.path()).arg(methods.path());

    cmd.assert()
        .success()
        .stdout(predicate::eq("PUNKTY 1.01\ncard 8.04\n"));
}

#[test]
fn test_custom_points_id() {
    let orders = json_file(r#"[{"id": "A", "value": "100.00"}]"#);
    let methods = json_file(
        r#"[
            {"id": "card", "discount": "5", "limit": "500.00"},
            {"id": "POINTS", "discount": "20", "limit": "100.00"}
        ]"#,
    );

    let mut cmd = Command::new(cargo_bin!("payment-optimizer"));
    cmd.arg(orders.path())
        .arg(methods.path())
        .arg("--points-id")
        .arg("POINTS");

    cmd.assert().success().stdout(predicate::eq("POINTS 80.00\n"));
}

#[test]
fn test_no_orders_prints_nothing() {
    let orders = json_file("[]");

    let mut cmd = Command::new(cargo_bin!("payment-optimizer"));
    cmd.arg(orders.path())
        .arg("tests/fixtures/paymentmethods.json");

    cmd.assert().success().stdout(predicate::str::is_empty());
}
