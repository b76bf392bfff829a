use clap::Parser;
use miette::{IntoDiagnostic, Result};
use payment_optimizer::application::optimizer::PaymentOptimizer;
use payment_optimizer::domain::pricing::POINTS_ID;
use payment_optimizer::interfaces::json::loader::{load_orders, load_payment_methods};
use payment_optimizer::interfaces::text::usage_writer::UsageWriter;
use std::io;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Orders JSON file
    orders: PathBuf,

    /// Payment methods JSON file
    payment_methods: PathBuf,

    /// Id of the loyalty-points account
    #[arg(long, default_value = POINTS_ID)]
    points_id: String,

    /// Increase log verbosity on stderr (-v info, -vv debug). RUST_LOG takes precedence.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let orders = load_orders(&cli.orders).into_diagnostic()?;
    let mut methods = load_payment_methods(&cli.payment_methods).into_diagnostic()?;

    let optimizer = PaymentOptimizer::with_points_id(cli.points_id);
    optimizer.optimize(&orders, &mut methods).into_diagnostic()?;

    let stdout = io::stdout();
    let mut writer = UsageWriter::new(stdout.lock());
    writer.write_usage(&methods).into_diagnostic()?;

    Ok(())
}
