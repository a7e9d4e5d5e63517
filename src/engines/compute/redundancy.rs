//! Redundancy removal
//!
//! Greedy first-match deduplication: sequences are taken in input order and
//! each one is kept only if no already-kept sequence reaches the identity
//! threshold against it. The result depends on input order; reordering the
//! input can keep a different representative of a near-duplicate group.
//!
//! Candidate checks against the kept list run through
//! [`any_match`](crate::engines::core::parallel::any_match). Whether a
//! candidate is rejected does not depend on which kept sequence matches
//! first, so the parallel check gives the same result as a sequential scan.

use super::identity::identity;
use super::{ComputeError, ComputeResult};
use crate::engines::core::parallel::any_match;
use crate::engines::storage::SequenceRecord;

/// Identity at or above which two sequences are near-duplicates
pub const DEFAULT_IDENTITY_THRESHOLD: f64 = 0.9;

/// Anything the redundancy filter can compare
pub trait Residues {
    fn residues(&self) -> &[u8];
}

impl Residues for SequenceRecord {
    fn residues(&self) -> &[u8] {
        &self.sequence
    }
}

impl Residues for Vec<u8> {
    fn residues(&self) -> &[u8] {
        self
    }
}

impl Residues for String {
    fn residues(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl Residues for &str {
    fn residues(&self) -> &[u8] {
        self.as_bytes()
    }
}

/// Greedy identity-threshold deduplicator
#[derive(Debug, Clone, Copy)]
pub struct RedundancyFilter {
    threshold: f64,
}

impl Default for RedundancyFilter {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_IDENTITY_THRESHOLD,
        }
    }
}

impl RedundancyFilter {
    /// Create a filter; the threshold must lie in `[0, 1]`
    pub fn new(threshold: f64) -> ComputeResult<Self> {
        if !(0.0..=1.0).contains(&threshold) {
            return Err(ComputeError::InvalidInput(format!(
                "Identity threshold must be between 0 and 1, got {}",
                threshold
            )));
        }

        Ok(Self { threshold })
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Whether `candidate` duplicates any kept sequence
    pub fn is_redundant<T: Residues + Sync>(&self, candidate: &T, kept: &[T]) -> bool {
        any_match(kept, |seen| {
            identity(candidate.residues(), seen.residues()) >= self.threshold
        })
    }

    /// Keep the greedy first-match subset of `items`, in input order
    pub fn filter<T: Residues + Sync>(&self, items: Vec<T>) -> Vec<T> {
        let total = items.len();
        let mut kept: Vec<T> = Vec::new();

        for candidate in items {
            if self.is_redundant(&candidate, &kept) {
                continue;
            }
            kept.push(candidate);
        }

        log::info!(
            "Kept {} of {} sequences at identity threshold {}",
            kept.len(),
            total,
            self.threshold
        );

        kept
    }
}
