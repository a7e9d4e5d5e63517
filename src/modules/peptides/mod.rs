//! Peptide records and their collection into the final database

pub mod collector;
pub mod record;

pub use collector::{
    CollectedPeptides, CollectionSummary, NoNameReconciliation, PeptideCollector,
    MIN_PEPTIDE_LENGTH,
};
pub use record::{format_identifier, PeptideRecord, ShiftEvent};
