//! Sequence module
//!
//! Nucleotide alphabets, codons and the codon table, and the coding
//! sequence type the frameshift engine consumes.

pub mod alphabet;
pub mod codon;
pub mod sequence;

/// Convenience re-exports
pub use alphabet::AlphabetType;
pub use codon::{Codon, CodonTable, STOP_MARKER, UNKNOWN_RESIDUE};
pub use sequence::{CodingSequence, GeneSymbol, SequenceError, SequenceResult, NO_NAME};
