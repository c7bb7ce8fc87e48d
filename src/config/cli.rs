//! CLI argument parsing using clap

use super::toml::{parse_session_file, SessionFile};
use super::Session;
use crate::client::MessageKind;
use crate::workload::DEFAULT_MAX_DISTINCT_OBJECTS;
use anyhow::Result;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Report output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    /// Human-readable console report
    Text,
    /// JSON report on stdout
    Json,
}

/// KVPulse - benchmark harness for asynchronous key-value stores
#[derive(Parser, Debug)]
#[command(name = "kvpulse")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// TOML session file; command-line flags override its values
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Number of messages to send
    #[arg(short = 'n', long)]
    pub num_messages: Option<usize>,

    /// Payload size in bytes
    #[arg(short = 's', long)]
    pub message_size: Option<usize>,

    /// Send to the persistent pool instead of the volatile one
    #[arg(long)]
    pub persistent: bool,

    /// Maximum in-flight requests; 0 or negative means unlimited
    #[arg(short = 'p', long, allow_hyphen_values = true)]
    pub max_pending_ops: Option<i64>,

    /// Number of distinct keys to cycle through
    #[arg(long)]
    pub max_distinct_objects: Option<u64>,

    /// Fill payloads with random bytes instead of zeros
    #[arg(long)]
    pub random_payload: bool,

    /// Per-operation completion delay of the built-in simulated store
    #[arg(long, default_value = "100")]
    pub simulated_delay_us: u64,

    /// Report format
    #[arg(long, value_enum, default_value = "text")]
    pub output: ReportFormat,

    /// Dump the per-message send/receive/latency table
    #[arg(long)]
    pub per_message: bool,

    /// Also write the JSON report to this file
    #[arg(long)]
    pub report_file: Option<PathBuf>,
}

impl Cli {
    /// Build the session from the config file (if any) and CLI overrides
    pub fn build_session(&self) -> Result<Session> {
        let file = match &self.config {
            Some(path) => parse_session_file(path)?,
            None => SessionFile::default(),
        };

        let defaults = Session::default();
        let kind = if self.persistent || file.persistent.unwrap_or(false) {
            MessageKind::Persistent
        } else {
            MessageKind::Volatile
        };

        Ok(Session {
            num_messages: self
                .num_messages
                .or(file.num_messages)
                .unwrap_or(defaults.num_messages),
            message_size: self
                .message_size
                .or(file.message_size)
                .unwrap_or(defaults.message_size),
            kind,
            max_pending_ops: self
                .max_pending_ops
                .or(file.max_pending_ops)
                .map_or(defaults.max_pending_ops, Session::pending_limit),
            max_distinct_objects: self
                .max_distinct_objects
                .or(file.max_distinct_objects)
                .unwrap_or(DEFAULT_MAX_DISTINCT_OBJECTS),
            random_payload: self.random_payload || file.random_payload.unwrap_or(false),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::parse_from(std::iter::once("kvpulse").chain(args.iter().copied()))
    }

    #[test]
    fn test_defaults() {
        let session = parse(&[]).build_session().unwrap();
        assert_eq!(session.num_messages, 1000);
        assert_eq!(session.message_size, 1024);
        assert_eq!(session.kind, MessageKind::Volatile);
        assert_eq!(session.max_pending_ops, None);
        assert_eq!(session.max_distinct_objects, 4096);
    }

    #[test]
    fn test_explicit_arguments() {
        let session = parse(&[
            "-n",
            "500",
            "-s",
            "4096",
            "--persistent",
            "-p",
            "8",
            "--max-distinct-objects",
            "64",
        ])
        .build_session()
        .unwrap();
        assert_eq!(session.num_messages, 500);
        assert_eq!(session.message_size, 4096);
        assert_eq!(session.kind, MessageKind::Persistent);
        assert_eq!(session.max_pending_ops, Some(8));
        assert_eq!(session.max_distinct_objects, 64);
    }

    #[test]
    fn test_nonpositive_window_means_unlimited() {
        let session = parse(&["-p", "0"]).build_session().unwrap();
        assert_eq!(session.max_pending_ops, None);
        let session = parse(&["-p", "-1"]).build_session().unwrap();
        assert_eq!(session.max_pending_ops, None);
    }

    #[test]
    fn test_report_format_flag() {
        assert_eq!(parse(&[]).output, ReportFormat::Text);
        assert_eq!(parse(&["--output", "json"]).output, ReportFormat::Json);
    }
}
