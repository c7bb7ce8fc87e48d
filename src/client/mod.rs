//! Store client abstraction
//!
//! This module defines the boundary between the harness and the remote
//! key-value service. The service is an opaque collaborator: `submit`
//! starts an asynchronous put and returns a handle, and resolving the
//! handle blocks until the operation completes on the service side. The
//! harness never inspects the outcome beyond the instant it resolved.
//!
//! Connecting to a real deployment means implementing [`StoreClient`] over
//! that service's client library; the in-tree [`mock::MockStore`] simulates
//! one for tests and self-measurement.

pub mod mock;

use std::fmt;
use thiserror::Error;

/// Errors crossing the store client boundary
#[derive(Debug, Error)]
pub enum ClientError {
    /// The asynchronous submission itself was refused
    #[error("submit failed for key {key}: {reason}")]
    Submit { key: String, reason: String },

    /// The operation was accepted but its resolution reported a failure
    #[error("resolve failed: {0}")]
    Resolve(String),
}

/// Durability class of a message
///
/// Maps onto the volatile and persistent pools of the remote store; the
/// harness treats it as an opaque tag passed through to `submit`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum MessageKind {
    Volatile,
    Persistent,
}

impl MessageKind {
    pub fn as_str(self) -> &'static str {
        match self {
            MessageKind::Volatile => "volatile",
            MessageKind::Persistent => "persistent",
        }
    }
}

impl fmt::Display for MessageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resolvable reference to the outcome of an asynchronous request
///
/// `resolve` blocks the calling thread until the operation has completed
/// remotely. Each handle is resolved exactly once; consuming `self` makes
/// double resolution unrepresentable.
pub trait ResultHandle: Send {
    fn resolve(self: Box<Self>) -> Result<(), ClientError>;
}

/// Client capability for an asynchronous key-value store
///
/// Implementations must be shareable between the driver and collector
/// threads. `submit` must not block on the completion of earlier
/// operations; throttling is the harness's job, not the client's.
pub trait StoreClient: Send + Sync {
    /// Start an asynchronous put and return a handle to its completion
    fn submit(
        &self,
        kind: MessageKind,
        key: &str,
        value: &[u8],
    ) -> Result<Box<dyn ResultHandle>, ClientError>;
}
