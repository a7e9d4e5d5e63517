//! Peptide records and their synthetic identifiers

use itertools::Itertools;
use serde::Serialize;

use crate::engines::compute::frameshift::{Direction, SiteMode};
use crate::engines::storage::SequenceRecord;
use crate::modules::seq::GeneSymbol;

/// Number of downstream residues copied into an identifier
pub const IDENTIFIER_DOWNSTREAM_PREFIX: usize = 14;

/// Everything an identifier encodes about one frameshift event
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShiftEvent<'a> {
    pub direction: Direction,
    pub site: SiteMode,
    /// 1-based occurrence of the slip codon within its source
    pub count: usize,
    /// Amino acid encoded by the slip codon
    pub amino_acid: char,
    /// 1-based codon position of the slip codon
    pub codon_position: usize,
    /// First token of the source header
    pub source_id: &'a str,
    /// Downstream segment; only its first 14 residues are used
    pub downstream: &'a str,
    /// Raw nucleotides around the slip codon
    pub window: &'a str,
}

/// Build the identifier for a frameshift event:
/// `{direction}_{site}_count{n}_{aa}{pos}_{source}_{downstream[..14]}_{window}`
pub fn format_identifier(event: &ShiftEvent<'_>) -> String {
    let downstream_prefix: String = event
        .downstream
        .chars()
        .take(IDENTIFIER_DOWNSTREAM_PREFIX)
        .collect();

    [
        event.direction.to_string(),
        event.site.to_string(),
        format!("count{}", event.count),
        format!("{}{}", event.amino_acid, event.codon_position),
        event.source_id.to_string(),
        downstream_prefix,
        event.window.to_string(),
    ]
    .iter()
    .join("_")
}

/// One shifted peptide
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PeptideRecord {
    /// Synthetic identifier, written as the FASTA header
    pub identifier: String,
    /// Upstream context followed by the shifted downstream segment
    pub sequence: String,
    /// Gene symbol of the source the peptide came from
    pub gene: GeneSymbol,
}

impl PeptideRecord {
    pub fn new(identifier: String, sequence: String, gene: GeneSymbol) -> Self {
        Self {
            identifier,
            sequence,
            gene,
        }
    }

    /// Sequence length in residues
    pub fn len(&self) -> usize {
        self.sequence.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }

    /// Whether the source had no resolved gene symbol
    pub fn is_no_name(&self) -> bool {
        self.gene.is_no_name()
    }

    /// FASTA record with the identifier as the whole header
    pub fn to_sequence_record(&self) -> SequenceRecord {
        SequenceRecord::new(
            self.identifier.clone(),
            None,
            self.sequence.as_bytes().to_vec(),
        )
    }
}
