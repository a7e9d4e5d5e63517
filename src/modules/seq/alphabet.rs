//! Sequence alphabets

use serde::{Deserialize, Serialize};

/// Sequence alphabet type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AlphabetType {
    /// Unambiguous DNA bases plus `N`
    Dna,
    /// RNA bases, only used to recognise RNA input
    Rna,
}

impl AlphabetType {
    /// Upper-case letters of the alphabet
    pub fn letters(self) -> &'static [u8] {
        match self {
            AlphabetType::Dna => b"ACGTN",
            AlphabetType::Rna => b"ACGUN",
        }
    }

    /// Alphabet name used in log and error messages
    pub fn name(self) -> &'static str {
        match self {
            AlphabetType::Dna => "DNA",
            AlphabetType::Rna => "RNA",
        }
    }

    /// Whether every character of `sequence` belongs to the alphabet
    /// (case-insensitive)
    pub fn is_valid_sequence(self, sequence: &[u8]) -> bool {
        let letters = self.letters();
        sequence
            .iter()
            .all(|c| letters.contains(&c.to_ascii_uppercase()))
    }
}

/// The RNA-only base. Its presence marks input as RNA.
pub const URACIL: u8 = b'U';

/// The four unambiguous DNA bases a codon may be built from
pub const CODON_BASES: &[u8] = b"ACGT";

/// Whether `sequence` contains uracil in either case
pub fn contains_uracil(sequence: &[u8]) -> bool {
    sequence.iter().any(|c| c.to_ascii_uppercase() == URACIL)
}
