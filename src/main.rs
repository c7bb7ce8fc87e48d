//! KVPulse CLI entry point
//!
//! Runs a benchmark session against the built-in simulated store. Pointing
//! the harness at a real deployment means implementing
//! [`kvpulse::client::StoreClient`] over that service's client library and
//! wiring it in here.

use anyhow::Result;
use clap::Parser;
use kvpulse::client::mock::MockStore;
use kvpulse::config::cli::{Cli, ReportFormat};
use kvpulse::config::validator;
use kvpulse::{harness, output};
use std::sync::Arc;
use std::time::Duration;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let session = cli.build_session()?;
    validator::validate_session(&session)?;

    println!("KVPulse v{}", env!("CARGO_PKG_VERSION"));
    println!("Key-value store benchmark harness");
    println!();
    println!(
        "Session: {} x {} B ({}), window {}",
        session.num_messages,
        session.message_size,
        session.kind,
        session
            .max_pending_ops
            .map_or("unlimited".to_string(), |limit| limit.to_string())
    );
    println!(
        "Store: simulated, {}us per operation",
        cli.simulated_delay_us
    );
    println!();

    let store = Arc::new(MockStore::new(Duration::from_micros(
        cli.simulated_delay_us,
    )));
    let outcome = harness::run_session(&session, store)?;

    match cli.output {
        ReportFormat::Text => {
            let ledger = cli.per_message.then_some(&outcome.ledger);
            output::text::print_report(&outcome.report, &session, ledger);
        }
        ReportFormat::Json => {
            println!("{}", output::json::render_report(&outcome.report)?);
        }
    }

    if let Some(path) = &cli.report_file {
        output::json::write_report(&outcome.report, path)?;
        println!();
        println!("Report written to {}", path.display());
    }

    Ok(())
}
