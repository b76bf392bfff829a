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
fn test_missing_arguments_is_usage_error() {
    let mut cmd = Command::new(cargo_bin!("payment-optimizer"));
    cmd.arg("tests/fixtures/orders.json");

    cmd.assert()
        .failure()
        .code(2)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn test_missing_file_fails() {
    let mut cmd = Command::new(cargo_bin!("payment-optimizer"));
    cmd.arg("tests/fixtures/does_not_exist.json")
        .arg("tests/fixtures/paymentmethods.json");

    cmd.assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("IO error"));
}

#[test]
fn test_malformed_json_fails() {
    let orders = json_file(r#"[{"id": "ORDER1", "value": "100.00""#);

    let mut cmd = Command::new(cargo_bin!("payment-optimizer"));
    cmd.arg(orders.path())
        .arg("tests/fixtures/paymentmethods.json");

    cmd.assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("JSON error"));
}

#[test]
fn test_invalid_decimal_fails() {
    let orders = json_file(r#"[{"id": "ORDER1", "value": "one hundred"}]"#);

    let mut cmd = Command::new(cargo_bin!("payment-optimizer"));
    cmd.arg(orders.path())
        .arg("tests/fixtures/paymentmethods.json");

    cmd.assert().failure().stderr(predicate::str::contains("JSON error"));
}

#[test]
fn test_null_collection_fails() {
    let methods = json_file("null");

    let mut cmd = Command::new(cargo_bin!("payment-optimizer"));
    cmd.arg("tests/fixtures/orders.json").arg(methods.path());

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("payment method collection is missing"));
}

#[test]
fn test_duplicate_payment_methods_fail() {
    let methods = json_file(
        r#"[
            {"id": "mZysk", "discount": "10", "limit": "180.00"},
            {"id": "mZysk", "discount": "5", "limit": "200.00"}
        ]"#,
    );

    let mut cmd = Command::new(cargo_bin!("payment-optimizer"));
    cmd.arg("tests/fixtures/orders.json").arg(methods.path());

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("duplicate payment method id"));
}

#[test]
fn test_unknown_fields_are_ignored() {
    let orders = json_file(
        r#"[{"id": "ORDER1", "value": "10.00", "promotions": [], "note": "gift", "tags": [1, 2]}]"#,
    );
    let methods = json_file(
        r#"[{"id": "card", "discount": 5, "limit": "20.00", "issuer": {"name": "bank"}}]"#,
    );

    let mut cmd = Command::new(cargo_bin!("payment-optimizer"));
    cmd.arg(orders.path()).arg(methods.path());

    cmd.assert().success().stdout(predicate::eq("card 10.00\n"));
}
