//! Parsers and writers for sequence file formats
//!
//! A FASTA header is split into an identifier (first whitespace-delimited
//! token) and an optional free-text description. `SequenceRecord::header`
//! rebuilds the full line, which is what gene-symbol extraction looks at.

use std::path::Path;

use crate::engines::core::io::{FastReader, FastWriter};
use crate::engines::{EngineError, EngineResult};

/// Trait for sequence record parsers
pub trait SequenceParser: Send + Sync {
    /// Parse a file and create sequence records
    fn parse_file(&self, path: &Path) -> EngineResult<Vec<SequenceRecord>>;

    /// Parse a string and create sequence records
    fn parse_string(&self, content: &str) -> EngineResult<Vec<SequenceRecord>>;
}

/// Trait for sequence record writers
pub trait SequenceWriter: Send + Sync {
    /// Write sequence records to a file
    fn write_file(&self, records: &[SequenceRecord], path: &Path) -> EngineResult<()>;

    /// Write sequence records to a string
    fn write_string(&self, records: &[SequenceRecord]) -> EngineResult<String>;
}

/// A sequence record with ID, description, and sequence data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SequenceRecord {
    /// Sequence identifier
    pub id: String,
    /// Optional sequence description
    pub description: Option<String>,
    /// The sequence data
    pub sequence: Vec<u8>,
}

impl SequenceRecord {
    /// Create a new sequence record
    pub fn new(id: String, description: Option<String>, sequence: Vec<u8>) -> Self {
        Self {
            id,
            description,
            sequence,
        }
    }

    /// Build a record from a header line (without the leading `>`)
    pub fn from_header(header: &str, sequence: Vec<u8>) -> Self {
        let header = header.trim();
        let mut parts = header.splitn(2, char::is_whitespace);
        let id = parts.next().unwrap_or_default().to_string();
        let description = parts
            .next()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string);

        Self::new(id, description, sequence)
    }

    /// The full header line, identifier and description joined by a space
    pub fn header(&self) -> String {
        match &self.description {
            Some(desc) => format!("{} {}", self.id, desc),
            None => self.id.clone(),
        }
    }

    /// Get the length of the sequence
    pub fn len(&self) -> usize {
        self.sequence.len()
    }

    /// Check if the sequence is empty
    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }
}

/// Incremental FASTA record builder shared by the file and string parsers
#[derive(Default)]
struct FastaAccumulator {
    records: Vec<SequenceRecord>,
    header: Option<String>,
    sequence: Vec<u8>,
    line_number: usize,
}

impl FastaAccumulator {
    fn push_line(&mut self, line: &str) -> EngineResult<()> {
        self.line_number += 1;
        let line = line.trim();

        if line.is_empty() {
            return Ok(());
        }

        if let Some(header) = line.strip_prefix('>') {
            self.flush();
            self.header = Some(header.to_string());
        } else if self.header.is_some() {
            self.sequence.extend(line.bytes().filter(|b| !b.is_ascii_whitespace()));
        } else {
            return Err(EngineError::InvalidSequenceData(format!(
                "Sequence data before the first FASTA header at line {}",
                self.line_number
            )));
        }

        Ok(())
    }

    fn flush(&mut self) {
        if let Some(header) = self.header.take() {
            let sequence = std::mem::take(&mut self.sequence);
            self.records.push(SequenceRecord::from_header(&header, sequence));
        }
    }

    fn finish(mut self) -> Vec<SequenceRecord> {
        self.flush();
        self.records
    }
}

/// FASTA format parser
#[derive(Debug, Clone)]
pub struct FastaParser {
    /// Buffer size for reading
    buffer_size: usize,
}

impl FastaParser {
    /// Create a new FASTA parser
    pub fn new() -> Self {
        Self {
            buffer_size: 1024 * 1024, // 1MB
        }
    }
}

impl Default for FastaParser {
    fn default() -> Self {
        Self::new()
    }
}

impl SequenceParser for FastaParser {
    fn parse_file(&self, path: &Path) -> EngineResult<Vec<SequenceRecord>> {
        let mut reader = FastReader::new(path, Some(self.buffer_size))?;
        let mut accumulator = FastaAccumulator::default();

        for line_result in reader.read_lines() {
            accumulator.push_line(&line_result?)?;
        }

        let records = accumulator.finish();
        log::debug!(
            "Parsed {} FASTA records from {}",
            records.len(),
            reader.path()
        );
        Ok(records)
    }

    fn parse_string(&self, content: &str) -> EngineResult<Vec<SequenceRecord>> {
        let mut accumulator = FastaAccumulator::default();

        for line in content.lines() {
            accumulator.push_line(line)?;
        }

        Ok(accumulator.finish())
    }
}

/// FASTA format writer
#[derive(Debug, Clone)]
pub struct FastaWriter {
    /// Line width for sequence output, `0` writes each sequence on one line
    line_width: usize,
    /// Buffer size for writing
    buffer_size: usize,
}

impl FastaWriter {
    /// Create a new FASTA writer with the default line width of 60
    pub fn new() -> Self {
        Self::with_line_width(60)
    }

    /// Create a new FASTA writer with the specified line width
    pub fn with_line_width(line_width: usize) -> Self {
        Self {
            line_width,
            buffer_size: 1024 * 1024, // 1MB
        }
    }

    /// Writer that keeps every sequence on a single line
    pub fn unwrapped() -> Self {
        Self::with_line_width(0)
    }

    fn sequence_lines<'a>(&self, sequence: &'a [u8]) -> Vec<&'a [u8]> {
        if self.line_width == 0 || sequence.len() <= self.line_width {
            vec![sequence]
        } else {
            sequence.chunks(self.line_width).collect()
        }
    }
}

impl Default for FastaWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl SequenceWriter for FastaWriter {
    fn write_file(&self, records: &[SequenceRecord], path: &Path) -> EngineResult<()> {
        let mut writer = FastWriter::new(path, Some(self.buffer_size))?;

        for record in records {
            writer.write_line(&format!(">{}", record.header()))?;
            for line in self.sequence_lines(&record.sequence) {
                writer.write(line)?;
                writer.write(b"\n")?;
            }
        }

        writer.flush()?;
        log::debug!("Wrote {} FASTA records to {}", records.len(), writer.path());
        Ok(())
    }

    fn write_string(&self, records: &[SequenceRecord]) -> EngineResult<String> {
        let mut output = String::new();

        for record in records {
            output.push('>');
            output.push_str(&record.header());
            output.push('\n');
            for line in self.sequence_lines(&record.sequence) {
                output.push_str(&String::from_utf8_lossy(line));
                output.push('\n');
            }
        }

        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_fasta_parsing() -> std::io::Result<()> {
        let dir = tempdir()?;
        let file_path = dir.path().join("test.fasta");
        std::fs::write(
            &file_path,
            ">tx1 gene_symbol:ABC chr1\nATGTTC\nGGA\n\n>tx2\nGTACGTAC\n",
        )?;

        let records = FastaParser::new().parse_file(&file_path).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].id, "tx1");
        assert_eq!(
            records[0].description,
            Some("gene_symbol:ABC chr1".to_string())
        );
        assert_eq!(records[0].sequence, b"ATGTTCGGA");
        assert_eq!(records[0].header(), "tx1 gene_symbol:ABC chr1");

        assert_eq!(records[1].id, "tx2");
        assert_eq!(records[1].description, None);
        assert_eq!(records[1].sequence, b"GTACGTAC");

        Ok(())
    }

    #[test]
    fn test_empty_sequence_is_kept() {
        let records = FastaParser::new()
            .parse_string(">empty\n>full\nACGT\n")
            .unwrap();
        assert_eq!(records.len(), 2);
        assert!(records[0].is_empty());
        assert_eq!(records[1].len(), 4);
    }

    #[test]
    fn test_sequence_before_header_is_rejected() {
        let result = FastaParser::new().parse_string("ACGT\n>seq\nACGT\n");
        match result {
            Err(EngineError::InvalidSequenceData(msg)) => assert!(msg.contains("line 1")),
            other => panic!("Expected InvalidSequenceData, got {:?}", other),
        }
    }

    #[test]
    fn test_fasta_writing_wraps_lines() {
        let records = vec![SequenceRecord::new(
            "seq1".to_string(),
            Some("First sequence".to_string()),
            b"ACGTACGTAC".to_vec(),
        )];

        let wrapped = FastaWriter::with_line_width(4)
            .write_string(&records)
            .unwrap();
        assert_eq!(wrapped, ">seq1 First sequence\nACGT\nACGT\nAC\n");

        let single = FastaWriter::unwrapped().write_string(&records).unwrap();
        assert_eq!(single, ">seq1 First sequence\nACGTACGTAC\n");
    }

    #[test]
    fn test_fasta_file_roundtrip() -> std::io::Result<()> {
        let dir = tempdir()?;
        let file_path = dir.path().join("output.fasta");
        let records = vec![
            SequenceRecord::from_header("P1_Asite_count1_F2_tx1_EN_ATGTTCGGA", b"MFEN".to_vec()),
            SequenceRecord::from_header("tx2 desc", vec![b'A'; 130]),
        ];

        FastaWriter::new().write_file(&records, &file_path).unwrap();
        let content = std::fs::read_to_string(&file_path)?;
        let expected = ">P1_Asite_count1_F2_tx1_EN_ATGTTCGGA\nMFEN\n>tx2 desc\n";
        assert!(content.starts_with(expected));

        let parsed = FastaParser::new().parse_file(&file_path).unwrap();
        assert_eq!(parsed, records);

        Ok(())
    }
}
