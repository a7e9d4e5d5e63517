//! Storage and data format handling
//!
//! Parsers and writers for the sequence file formats the pipeline reads and
//! writes. Only FASTA is needed: coding sequences come in as FASTA and both
//! the deduplicated intermediate and the peptide database go out as FASTA.

pub mod formats;

pub use formats::{FastaParser, FastaWriter, SequenceParser, SequenceRecord, SequenceWriter};
