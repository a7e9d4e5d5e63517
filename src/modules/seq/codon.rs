//! Codons and the standard codon table
//!
//! The table maps the 61 sense codons to their one-letter amino acid. Stop
//! codons are deliberately absent: a lookup miss is how the frameshift scan
//! recognises the end of the reading frame, whether the codon is a real stop
//! or contains an ambiguous base.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

use super::alphabet::{contains_uracil, CODON_BASES};
use super::sequence::{SequenceError, SequenceResult};

/// Marker written for stop codons in a translated frame
pub const STOP_MARKER: u8 = b'*';

/// Residue written for codons with ambiguous bases in a translated frame
pub const UNKNOWN_RESIDUE: u8 = b'X';

const STOP_CODONS: [&[u8; 3]; 3] = [b"TAA", b"TAG", b"TGA"];

const SENSE_CODONS: [(&[u8; 3], u8); 61] = [
    // Phenylalanine
    (b"TTT", b'F'),
    (b"TTC", b'F'),
    // Leucine
    (b"TTA", b'L'),
    (b"TTG", b'L'),
    (b"CTT", b'L'),
    (b"CTC", b'L'),
    (b"CTA", b'L'),
    (b"CTG", b'L'),
    // Isoleucine
    (b"ATT", b'I'),
    (b"ATC", b'I'),
    (b"ATA", b'I'),
    // Methionine
    (b"ATG", b'M'),
    // Valine
    (b"GTT", b'V'),
    (b"GTC", b'V'),
    (b"GTA", b'V'),
    (b"GTG", b'V'),
    // Serine
    (b"TCT", b'S'),
    (b"TCC", b'S'),
    (b"TCA", b'S'),
    (b"TCG", b'S'),
    (b"AGT", b'S'),
    (b"AGC", b'S'),
    // Proline
    (b"CCT", b'P'),
    (b"CCC", b'P'),
    (b"CCA", b'P'),
    (b"CCG", b'P'),
    // Threonine
    (b"ACT", b'T'),
    (b"ACC", b'T'),
    (b"ACA", b'T'),
    (b"ACG", b'T'),
    // Alanine
    (b"GCT", b'A'),
    (b"GCC", b'A'),
    (b"GCA", b'A'),
    (b"GCG", b'A'),
    // Tyrosine
    (b"TAT", b'Y'),
    (b"TAC", b'Y'),
    // Histidine
    (b"CAT", b'H'),
    (b"CAC", b'H'),
    // Glutamine
    (b"CAA", b'Q'),
    (b"CAG", b'Q'),
    // Asparagine
    (b"AAT", b'N'),
    (b"AAC", b'N'),
    // Lysine
    (b"AAA", b'K'),
    (b"AAG", b'K'),
    // Aspartic acid
    (b"GAT", b'D'),
    (b"GAC", b'D'),
    // Glutamic acid
    (b"GAA", b'E'),
    (b"GAG", b'E'),
    // Cysteine
    (b"TGT", b'C'),
    (b"TGC", b'C'),
    // Tryptophan
    (b"TGG", b'W'),
    // Arginine
    (b"CGT", b'R'),
    (b"CGC", b'R'),
    (b"CGA", b'R'),
    (b"CGG", b'R'),
    (b"AGA", b'R'),
    (b"AGG", b'R'),
    // Glycine
    (b"GGT", b'G'),
    (b"GGC", b'G'),
    (b"GGA", b'G'),
    (b"GGG", b'G'),
];

/// A validated DNA codon: three bases from {A, C, G, T}
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Codon([u8; 3]);

impl Codon {
    /// Validate `codon`, upper-casing it first.
    ///
    /// Uracil is rejected with [`SequenceError::RnaBase`] before any other
    /// check so RNA input is always reported as such.
    pub fn parse(codon: &str) -> SequenceResult<Self> {
        let upper = codon.trim().to_ascii_uppercase();
        let bytes = upper.as_bytes();

        if contains_uracil(bytes) {
            return Err(SequenceError::RnaBase(codon.to_string()));
        }

        if bytes.len() != 3 {
            return Err(SequenceError::InvalidCodon(
                codon.to_string(),
                format!("expected 3 bases, found {}", bytes.len()),
            ));
        }

        if let Some(bad) = bytes.iter().find(|b| !CODON_BASES.contains(b)) {
            return Err(SequenceError::InvalidCodon(
                codon.to_string(),
                format!("'{}' is not one of A, C, G, T", *bad as char),
            ));
        }

        Ok(Self([bytes[0], bytes[1], bytes[2]]))
    }

    /// The codon as bytes
    pub fn as_bytes(&self) -> &[u8; 3] {
        &self.0
    }

    /// The codon as a string slice
    pub fn as_str(&self) -> &str {
        // Only ASCII bases survive `parse`.
        std::str::from_utf8(&self.0).unwrap_or_default()
    }
}

impl FromStr for Codon {
    type Err = SequenceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Codon {
    type Error = SequenceError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Codon> for String {
    fn from(codon: Codon) -> Self {
        codon.as_str().to_string()
    }
}

impl fmt::Display for Codon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Read-only codon → amino acid mapping
#[derive(Debug)]
pub struct CodonTable {
    sense: HashMap<[u8; 3], u8>,
}

static STANDARD_TABLE: OnceLock<CodonTable> = OnceLock::new();

impl CodonTable {
    /// The standard genetic code, built on first use
    pub fn standard() -> &'static CodonTable {
        STANDARD_TABLE.get_or_init(|| CodonTable {
            sense: SENSE_CODONS
                .iter()
                .map(|(codon, aa)| (**codon, *aa))
                .collect(),
        })
    }

    /// Amino acid for a sense codon. `None` for stop codons, codons with
    /// ambiguous bases and anything that is not exactly three bytes.
    pub fn get(&self, codon: &[u8]) -> Option<u8> {
        let key: [u8; 3] = codon.try_into().ok()?;
        self.sense.get(&key).copied()
    }

    /// Amino acid encoded by a validated codon, `None` for stop codons
    pub fn amino_acid(&self, codon: &Codon) -> Option<u8> {
        self.sense.get(codon.as_bytes()).copied()
    }

    /// Whether `codon` is one of the three stop codons
    pub fn is_stop(&self, codon: &[u8]) -> bool {
        STOP_CODONS.iter().any(|stop| stop.as_slice() == codon)
    }

    /// Translate a single complete codon, writing [`STOP_MARKER`] for stops
    /// and [`UNKNOWN_RESIDUE`] for codons outside the table
    pub fn translate_codon(&self, codon: &[u8]) -> u8 {
        match self.get(codon) {
            Some(aa) => aa,
            None if self.is_stop(codon) => STOP_MARKER,
            None => UNKNOWN_RESIDUE,
        }
    }

    /// Translate `bases` from its first position; a trailing partial codon
    /// is ignored
    pub fn translate_frame(&self, bases: &[u8]) -> Vec<u8> {
        bases
            .chunks_exact(3)
            .map(|codon| self.translate_codon(codon))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codon_rejects_uracil() {
        for codon in ["UUC", "uuc", "TUC", "AAU"] {
            match Codon::parse(codon) {
                Err(SequenceError::RnaBase(c)) => assert_eq!(c, codon),
                other => panic!("Expected RnaBase error for {}, got {:?}", codon, other),
            }
        }
    }

    #[test]
    fn test_codon_validation() {
        assert_eq!(Codon::parse("ttc").unwrap().as_str(), "TTC");
        assert!(matches!(
            Codon::parse("TT"),
            Err(SequenceError::InvalidCodon(..))
        ));
        assert!(matches!(
            Codon::parse("TTCA"),
            Err(SequenceError::InvalidCodon(..))
        ));
        assert!(matches!(
            Codon::parse("TNC"),
            Err(SequenceError::InvalidCodon(..))
        ));
        assert_eq!("GGA".parse::<Codon>().unwrap().to_string(), "GGA");
    }

    #[test]
    fn test_codon_serde() {
        let codon: Codon = serde_json::from_str("\"TTC\"").unwrap();
        assert_eq!(codon.as_bytes(), b"TTC");
        assert_eq!(serde_json::to_string(&codon).unwrap(), "\"TTC\"");
        assert!(serde_json::from_str::<Codon>("\"UUC\"").is_err());
    }

    #[test]
    fn test_table_lookup() {
        let table = CodonTable::standard();
        assert_eq!(table.get(b"ATG"), Some(b'M'));
        assert_eq!(table.get(b"TTC"), Some(b'F'));
        assert_eq!(table.get(b"TAA"), None);
        assert_eq!(table.get(b"NNN"), None);
        assert_eq!(table.get(b"AT"), None);
        assert_eq!(table.amino_acid(&Codon::parse("TGG").unwrap()), Some(b'W'));
        assert_eq!(table.amino_acid(&Codon::parse("TGA").unwrap()), None);
    }

    #[test]
    fn test_table_is_complete() {
        let table = CodonTable::standard();
        let bases = b"ACGT";
        let mut sense = 0;
        for &a in bases {
            for &b in bases {
                for &c in bases {
                    let codon = [a, b, c];
                    match table.get(&codon) {
                        Some(_) => sense += 1,
                        None => assert!(table.is_stop(&codon)),
                    }
                }
            }
        }
        assert_eq!(sense, 61);
    }

    #[test]
    fn test_translate_frame() {
        let table = CodonTable::standard();
        assert_eq!(table.translate_frame(b"ATGTTCGGAAAATAG"), b"MFGK*");
        assert_eq!(table.translate_frame(b"GAAAATAG"), b"EN");
        assert_eq!(table.translate_frame(b"ATGNNNTGA"), b"MX*");
        assert!(table.translate_frame(b"AT").is_empty());
    }
}
