//! Frameshift peptide generation
//!
//! Simulates ribosomal frameshifting on coding sequences and produces a
//! peptide database for immunopeptidomics searches, with identity-based
//! redundancy removal of the input.

pub mod cli;
pub mod engines;
pub mod modules;
pub mod pipeline;

pub use engines::compute::{
    identity, Direction, FrameshiftEngine, FrameshiftParams, LengthMode, RedundancyFilter,
    SiteMode,
};
pub use modules::peptides::{PeptideCollector, PeptideRecord};
pub use modules::seq::{CodingSequence, Codon, CodonTable, GeneSymbol};
pub use pipeline::{run_pipeline, PipelineConfig, PipelineError, RunSummary};
