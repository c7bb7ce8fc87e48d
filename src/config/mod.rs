//! Configuration module
//!
//! Handles CLI argument parsing, TOML session files, and validation.

pub mod cli;
pub mod toml;
pub mod validator;

use crate::client::MessageKind;
use crate::workload::{self, DEFAULT_MAX_DISTINCT_OBJECTS};

/// Immutable benchmark session parameters
///
/// Created once before the session starts and never mutated afterwards.
#[derive(Debug, Clone)]
pub struct Session {
    /// Number of messages to send
    pub num_messages: usize,
    /// Payload size in bytes
    pub message_size: usize,
    /// Durability class of every message in the session
    pub kind: MessageKind,
    /// Maximum in-flight requests; `None` means unlimited
    pub max_pending_ops: Option<usize>,
    /// Size of the key space the session cycles through
    pub max_distinct_objects: u64,
    /// Fill payloads with random bytes instead of zeros
    pub random_payload: bool,
}

impl Session {
    /// Map a raw pending-op limit onto the internal form
    ///
    /// Zero and negative values mean unlimited, matching the harness's
    /// command-line convention.
    pub fn pending_limit(raw: i64) -> Option<usize> {
        if raw > 0 {
            Some(raw as usize)
        } else {
            None
        }
    }

    /// Build the payload sent with every message
    pub fn build_payload(&self) -> Vec<u8> {
        workload::build_payload(self.message_size, self.random_payload)
    }

    /// Total bytes the session will transfer
    pub fn total_bytes(&self) -> u64 {
        self.num_messages as u64 * self.message_size as u64
    }
}

impl Default for Session {
    fn default() -> Self {
        Self {
            num_messages: 1000,
            message_size: 1024,
            kind: MessageKind::Volatile,
            max_pending_ops: None,
            max_distinct_objects: DEFAULT_MAX_DISTINCT_OBJECTS,
            random_payload: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pending_limit_mapping() {
        assert_eq!(Session::pending_limit(16), Some(16));
        assert_eq!(Session::pending_limit(1), Some(1));
        assert_eq!(Session::pending_limit(0), None);
        assert_eq!(Session::pending_limit(-1), None);
    }

    #[test]
    fn test_total_bytes() {
        let session = Session {
            num_messages: 4,
            message_size: 1024,
            ..Session::default()
        };
        assert_eq!(session.total_bytes(), 4096);
    }

    #[test]
    fn test_payload_matches_message_size() {
        let session = Session {
            message_size: 77,
            ..Session::default()
        };
        assert_eq!(session.build_payload().len(), 77);
    }
}
