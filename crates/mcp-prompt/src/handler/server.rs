//! Server-side prompt handling
pub mod prompt;
