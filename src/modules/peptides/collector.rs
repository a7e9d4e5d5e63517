//! Peptide collection across sources
//!
//! Peptides from named sources are kept as they arrive. Peptides from
//! NoName sources are held back until every source has been translated and
//! only released if no named source produced the same sequence. The minimum
//! length filter runs last, over the combined set.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use super::record::PeptideRecord;

/// Shortest peptide written to the output
pub const MIN_PEPTIDE_LENGTH: usize = 8;

/// Bookkeeping for peptides whose source had no gene symbol
#[derive(Debug, Default)]
pub struct NoNameReconciliation {
    /// NoName peptides grouped by sequence, in first-seen order
    anonymous: Vec<(String, Vec<PeptideRecord>)>,
    index: HashMap<String, usize>,
    /// Sequences produced by at least one named source
    named: HashSet<String>,
}

impl NoNameReconciliation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Track `record`. NoName records are kept for [`resolve`](Self::resolve)
    /// and `None` is returned; named records are noted and handed back.
    pub fn add(&mut self, record: PeptideRecord) -> Option<PeptideRecord> {
        if !record.is_no_name() {
            self.named.insert(record.sequence.clone());
            return Some(record);
        }

        match self.index.get(&record.sequence) {
            Some(&slot) => self.anonymous[slot].1.push(record),
            None => {
                self.index.insert(record.sequence.clone(), self.anonymous.len());
                self.anonymous.push((record.sequence.clone(), vec![record]));
            }
        }

        None
    }

    /// NoName peptides whose sequence no named source produced
    pub fn resolve(self) -> Vec<PeptideRecord> {
        let named = self.named;
        self.anonymous
            .into_iter()
            .filter(|(sequence, _)| !named.contains(sequence))
            .flat_map(|(_, records)| records)
            .collect()
    }
}

/// Counts reported at the end of a collection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionSummary {
    /// Peptides emitted by the frameshift engine
    pub produced: usize,
    /// NoName peptides dropped because a named source had the same sequence
    pub suppressed_no_name: usize,
    /// Peptides dropped by the length filter
    pub too_short: usize,
    /// Peptides written to the output
    pub retained: usize,
}

/// Final peptide set with its counts
#[derive(Debug, Clone)]
pub struct CollectedPeptides {
    pub peptides: Vec<PeptideRecord>,
    pub summary: CollectionSummary,
}

/// Accumulates peptides from every source of one run
#[derive(Debug)]
pub struct PeptideCollector {
    entries: Vec<PeptideRecord>,
    reconciliation: NoNameReconciliation,
    produced: usize,
    min_length: usize,
}

impl Default for PeptideCollector {
    fn default() -> Self {
        Self::new()
    }
}

impl PeptideCollector {
    pub fn new() -> Self {
        Self::with_min_length(MIN_PEPTIDE_LENGTH)
    }

    pub fn with_min_length(min_length: usize) -> Self {
        Self {
            entries: Vec::new(),
            reconciliation: NoNameReconciliation::new(),
            produced: 0,
            min_length,
        }
    }

    /// Add one peptide
    pub fn add(&mut self, record: PeptideRecord) {
        self.produced += 1;
        if let Some(named) = self.reconciliation.add(record) {
            self.entries.push(named);
        }
    }

    /// Number of peptides added so far
    pub fn produced(&self) -> usize {
        self.produced
    }

    /// Reconcile NoName peptides, apply the length filter and report
    pub fn finish(self) -> CollectedPeptides {
        let PeptideCollector {
            mut entries,
            reconciliation,
            produced,
            min_length,
        } = self;

        let anonymous = reconciliation.resolve();
        let suppressed_no_name = produced - entries.len() - anonymous.len();
        entries.extend(anonymous);

        let before_filter = entries.len();
        entries.retain(|peptide| peptide.len() >= min_length);
        let too_short = before_filter - entries.len();

        let summary = CollectionSummary {
            produced,
            suppressed_no_name,
            too_short,
            retained: entries.len(),
        };

        if suppressed_no_name > 0 {
            log::info!(
                "Dropped {} NoName peptides also produced by a named gene",
                suppressed_no_name
            );
        }
        if too_short > 0 {
            log::info!(
                "Removed {} peptides shorter than {} AA",
                too_short,
                min_length
            );
        }
        if produced == 0 {
            log::warn!("No valid peptides were processed. Please check your input data.");
        }
        if entries.is_empty() {
            log::warn!("No peptides met the minimum length threshold. Output FASTA is empty.");
        }

        CollectedPeptides {
            peptides: entries,
            summary,
        }
    }
}

impl Extend<PeptideRecord> for PeptideCollector {
    fn extend<I: IntoIterator<Item = PeptideRecord>>(&mut self, iter: I) {
        for record in iter {
            self.add(record);
        }
    }
}
