//! Processing engines
//!
//! The engines hold the low-level machinery of the crate: buffered I/O and
//! the thread pool (`core`), sequence file formats (`storage`) and the two
//! sequence engines, frameshift translation and redundancy removal
//! (`compute`).

pub mod core;
pub mod compute;
pub mod storage;

use thiserror::Error;

/// Result type for engine operations
pub type EngineResult<T> = Result<T, EngineError>;

/// Error types for engine operations
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid sequence data: {0}")]
    InvalidSequenceData(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Invalid table: {0}")]
    InvalidTable(String),
}
