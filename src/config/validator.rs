//! Session validation

use super::Session;
use anyhow::Result;

/// Reject invalid sessions before anything is issued
pub fn validate_session(session: &Session) -> Result<()> {
    if session.num_messages == 0 {
        anyhow::bail!("num_messages must be positive");
    }

    if session.max_distinct_objects == 0 {
        anyhow::bail!("max_distinct_objects must be positive");
    }

    if let Some(limit) = session.max_pending_ops {
        // pending_limit() never produces Some(0), but a hand-built Session can
        if limit == 0 {
            anyhow::bail!("max_pending_ops of 0 must be expressed as unlimited (None)");
        }
        if limit > session.num_messages {
            eprintln!(
                "Warning: max_pending_ops ({}) exceeds num_messages ({}); the window will never fill",
                limit, session.num_messages
            );
        }
    }

    Ok(())
}
