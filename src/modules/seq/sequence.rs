//! Coding sequences
//!
//! A `CodingSequence` pairs the nucleotides of one FASTA record with its
//! full header line. The header's first token names the source in peptide
//! identifiers and its `gene_symbol:` tag decides gene-list membership and
//! NoName provenance.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::alphabet::{contains_uracil, AlphabetType};
use super::codon::Codon;
use crate::engines::storage::SequenceRecord;

/// Gene symbol assigned to sources without a `gene_symbol:` tag
pub const NO_NAME: &str = "NoName";

const GENE_SYMBOL_TAG: &str = "gene_symbol:";

/// Error type for sequence operations
#[derive(Error, Debug)]
pub enum SequenceError {
    #[error("Codon '{0}' contains RNA base 'U'. Please provide a DNA codon (A, T, C, G).")]
    RnaBase(String),

    #[error("Invalid codon '{0}': {1}")]
    InvalidCodon(String, String),

    #[error("Codon '{0}' is a stop codon and cannot trigger a frameshift")]
    StopCodon(String),

    #[error("Engine error: {0}")]
    EngineError(#[from] crate::engines::EngineError),
}

/// Result type for sequence operations
pub type SequenceResult<T> = Result<T, SequenceError>;

/// Gene identity of a source sequence
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GeneSymbol {
    /// Symbol taken from a `gene_symbol:<token>` tag
    Named(String),
    /// No usable tag in the header
    NoName,
}

impl GeneSymbol {
    /// Extract the gene symbol from a FASTA header.
    ///
    /// The symbol is the text after the first `gene_symbol:` up to the next
    /// space. A missing tag, or a tag followed directly by a space, yields
    /// [`GeneSymbol::NoName`].
    pub fn from_description(description: &str) -> Self {
        match description.split_once(GENE_SYMBOL_TAG) {
            Some((_, rest)) => match rest.split(' ').next() {
                Some(symbol) if !symbol.is_empty() => GeneSymbol::Named(symbol.to_string()),
                _ => GeneSymbol::NoName,
            },
            None => GeneSymbol::NoName,
        }
    }

    /// The symbol as written in gene lists, `NoName` for anonymous sources
    pub fn as_str(&self) -> &str {
        match self {
            GeneSymbol::Named(symbol) => symbol,
            GeneSymbol::NoName => NO_NAME,
        }
    }

    /// Whether the source has no resolved gene symbol
    pub fn is_no_name(&self) -> bool {
        matches!(self, GeneSymbol::NoName)
    }
}

impl fmt::Display for GeneSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One input coding sequence with its header line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodingSequence {
    description: String,
    bases: Vec<u8>,
    gene: GeneSymbol,
}

impl CodingSequence {
    /// Create a coding sequence; bases are upper-cased
    pub fn new(description: &str, bases: &[u8]) -> Self {
        let bases = bases.to_ascii_uppercase();

        if contains_uracil(&bases) && AlphabetType::Rna.is_valid_sequence(&bases) {
            log::warn!(
                "{} looks like {}; codons holding U end translation",
                description,
                AlphabetType::Rna.name()
            );
        } else if !AlphabetType::Dna.is_valid_sequence(&bases) {
            log::debug!(
                "{} has bases outside the {} alphabet; codons holding them end translation",
                description,
                AlphabetType::Dna.name()
            );
        }

        Self {
            description: description.to_string(),
            gene: GeneSymbol::from_description(description),
            bases,
        }
    }

    /// Build from a parsed FASTA record, keeping the full header line
    pub fn from_record(record: &SequenceRecord) -> Self {
        Self::new(&record.header(), &record.sequence)
    }

    /// Full header line
    pub fn description(&self) -> &str {
        &self.description
    }

    /// First space-delimited token of the header
    pub fn source_id(&self) -> &str {
        self.description.split(' ').next().unwrap_or_default()
    }

    /// Nucleotides
    pub fn bases(&self) -> &[u8] {
        &self.bases
    }

    /// Gene symbol extracted from the header
    pub fn gene(&self) -> &GeneSymbol {
        &self.gene
    }

    /// Whether `codon` occurs anywhere in the sequence, in any frame
    pub fn contains_codon(&self, codon: &Codon) -> bool {
        self.bases
            .windows(3)
            .any(|window| window == codon.as_bytes().as_slice())
    }

    /// Get the sequence length
    pub fn len(&self) -> usize {
        self.bases.len()
    }

    /// Check if the sequence is empty
    pub fn is_empty(&self) -> bool {
        self.bases.is_empty()
    }
}
