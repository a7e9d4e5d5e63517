//! I/O module
//!
//! Reading and writing the files a run touches: FASTA inputs and outputs,
//! and the optional gene list.

pub mod fasta;
pub mod gene_list;

/// Convenience re-exports
pub use fasta::{read_coding_sequences, read_fasta, write_fasta, write_peptides};
pub use gene_list::GeneList;
