use crate::domain::payment_method::PaymentMethods;
use rust_decimal::Decimal;
use std::io::{self, Write};

/// Writes the per-method usage summary, one `<id> <used>` line per method.
///
/// Methods that were never charged are left out. Amounts keep their decimal
/// scale, so `165.00` is printed as is.
pub struct UsageWriter<W: Write> {
    writer: W,
}

impl<W: Write> UsageWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn write_usage(&mut self, methods: &PaymentMethods) -> io::Result<()> {
        for method in methods.iter().filter(|m| m.used() > Decimal::ZERO) {
            writeln!(self.writer, "{} {}", method.id, method.used())?;
        }
        self.writer.flush()
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}
