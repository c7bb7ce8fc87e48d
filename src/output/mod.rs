//! Report output
//!
//! Human-readable text and machine-readable JSON renderings of a session
//! report.

pub mod json;
pub mod text;
