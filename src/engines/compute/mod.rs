//! Compute engines
//!
//! The two sequence engines of the crate: frameshift translation of coding
//! sequences and identity-based redundancy removal.

pub mod frameshift;
pub mod identity;
pub mod redundancy;

pub use frameshift::{Direction, FrameshiftEngine, FrameshiftParams, LengthMode, SiteMode};
pub use identity::identity;
pub use redundancy::{RedundancyFilter, DEFAULT_IDENTITY_THRESHOLD};

/// Compute operation result type
pub type ComputeResult<T> = Result<T, ComputeError>;

/// Error types for compute operations
#[derive(Debug, thiserror::Error)]
pub enum ComputeError {
    #[error("Invalid input data: {0}")]
    InvalidInput(String),
}
