//! Gene list filter
//!
//! A CSV table with a `Gene` column restricting which sources are
//! translated. Sources without a gene symbol are matched against the
//! literal `NoName`.

use std::collections::HashSet;
use std::path::Path;

use crate::engines::core::io::FastReader;
use crate::engines::{EngineError, EngineResult};
use crate::modules::seq::GeneSymbol;

/// Name of the column holding gene symbols
pub const GENE_COLUMN: &str = "Gene";

/// Set of gene symbols allowed through to translation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GeneList {
    genes: HashSet<String>,
}

impl GeneList {
    /// Load the `Gene` column of a CSV file. An empty or header-only file,
    /// or one without a `Gene` column, is an error.
    pub fn from_path<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let mut reader = FastReader::new(path.as_ref(), None)?;
        let content = reader.read_to_string()?;

        let list = Self::from_csv(&content).map_err(|e| match e {
            EngineError::InvalidTable(msg) => {
                EngineError::InvalidTable(format!("{}: {}", reader.path(), msg))
            }
            other => other,
        })?;

        log::info!("Loaded {} genes from {}", list.len(), reader.path());
        Ok(list)
    }

    /// Parse CSV text with a header row
    pub fn from_csv(content: &str) -> EngineResult<Self> {
        let mut reader = csv::Reader::from_reader(content.as_bytes());

        let column = reader
            .headers()?
            .iter()
            .position(|h| h.trim() == GENE_COLUMN)
            .ok_or_else(|| {
                EngineError::InvalidTable(format!("missing '{}' column", GENE_COLUMN))
            })?;

        let mut genes = HashSet::new();
        for row in reader.records() {
            let row = row?;
            if let Some(gene) = row.get(column).map(str::trim).filter(|g| !g.is_empty()) {
                genes.insert(gene.to_string());
            }
        }

        if genes.is_empty() {
            return Err(EngineError::InvalidTable("gene list is empty".to_string()));
        }

        Ok(Self { genes })
    }

    /// Whether sources with this gene symbol should be translated
    pub fn contains(&self, gene: &GeneSymbol) -> bool {
        self.genes.contains(gene.as_str())
    }

    pub fn len(&self) -> usize {
        self.genes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.genes.is_empty()
    }
}
