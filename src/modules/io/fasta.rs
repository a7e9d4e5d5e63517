//! FASTA format I/O
//!
//! Record-level entry points over the storage engine's FASTA parser and
//! writer: raw records for redundancy removal, coding sequences for the
//! frameshift engine, and peptide records for the output database.

use std::path::Path;

use crate::engines::storage::{
    FastaParser, FastaWriter, SequenceParser, SequenceRecord, SequenceWriter,
};
use crate::modules::peptides::PeptideRecord;
use crate::modules::seq::{CodingSequence, SequenceResult};

/// Read all records of a FASTA file
pub fn read_fasta<P: AsRef<Path>>(path: P) -> SequenceResult<Vec<SequenceRecord>> {
    Ok(FastaParser::new().parse_file(path.as_ref())?)
}

/// Read records from FASTA text
pub fn read_fasta_string(content: &str) -> SequenceResult<Vec<SequenceRecord>> {
    Ok(FastaParser::new().parse_string(content)?)
}

/// Write records to a FASTA file, wrapping sequences at 60 columns
pub fn write_fasta<P: AsRef<Path>>(records: &[SequenceRecord], path: P) -> SequenceResult<()> {
    FastaWriter::new().write_file(records, path.as_ref())?;
    Ok(())
}

/// Read a FASTA file as coding sequences
pub fn read_coding_sequences<P: AsRef<Path>>(path: P) -> SequenceResult<Vec<CodingSequence>> {
    let records = read_fasta(path)?;
    Ok(records.iter().map(CodingSequence::from_record).collect())
}

/// Write peptides as two-line FASTA records: `>identifier` then the sequence
pub fn write_peptides<P: AsRef<Path>>(peptides: &[PeptideRecord], path: P) -> SequenceResult<()> {
    let records: Vec<SequenceRecord> = peptides
        .iter()
        .map(PeptideRecord::to_sequence_record)
        .collect();
    FastaWriter::unwrapped().write_file(&records, path.as_ref())?;
    Ok(())
}

/// Peptides as FASTA text, one line per sequence
pub fn write_peptides_string(peptides: &[PeptideRecord]) -> SequenceResult<String> {
    let records: Vec<SequenceRecord> = peptides
        .iter()
        .map(PeptideRecord::to_sequence_record)
        .collect();
    Ok(FastaWriter::unwrapped().write_string(&records)?)
}
