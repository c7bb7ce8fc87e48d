//! Human-readable text output

use crate::config::Session;
use crate::stats::{Ledger, Report};
use crate::util::time::format_bytes;

/// Print session results to the console
///
/// When `ledger` is given, the per-message send/receive/latency table is
/// dumped above the summary.
pub fn print_report(report: &Report, session: &Session, ledger: Option<&Ledger>) {
    if let Some(ledger) = ledger {
        print_per_message(ledger);
    }

    println!("═══════════════════════════════════════════════════════════");
    println!("                   BENCHMARK RESULTS");
    println!("═══════════════════════════════════════════════════════════");
    println!();
    println!(
        "Messages: {} x {} ({}, {} total)",
        report.num_messages,
        format_bytes(report.message_size_bytes as u64),
        session.kind,
        format_bytes(report.total_bytes)
    );
    match session.max_pending_ops {
        Some(limit) => println!("In-flight window: {}", limit),
        None => println!("In-flight window: unlimited"),
    }
    println!("Elapsed Time: {:.3}s", report.elapsed_us as f64 / 1_000_000.0);
    println!();
    println!("Message size (KiB): {:.3}", report.message_size_bytes as f64 / 1024.0);
    println!("Throughput (MiB/s): {:.3}", report.throughput_mib_per_sec);
    println!("Throughput (Ops/s): {:.3}", report.throughput_ops_per_sec);
    println!("Average-Latency (us): {:.3}", report.mean_latency_us);
    println!("Latency-std (us): {:.3}", report.latency_stddev_us);
    println!();
    println!("Latency percentiles (us):");
    println!("  min: {}", report.min_latency_us);
    println!("  p50: {}", report.p50_latency_us);
    println!("  p95: {}", report.p95_latency_us);
    println!("  p99: {}", report.p99_latency_us);
    println!("  max: {}", report.max_latency_us);
}

fn print_per_message(ledger: &Ledger) {
    println!("{:>6} {:>20} {:>20} {:>12}", "msg", "send_us", "recv_us", "latency_us");
    for (i, ((send, recv), latency)) in ledger
        .send_us()
        .iter()
        .zip(ledger.recv_us())
        .zip(ledger.latencies_us())
        .enumerate()
    {
        println!("{:>6} {:>20} {:>20} {:>12}", i, send, recv, latency);
    }
    println!();
}
