//! Frameshift translation engine
//!
//! Walks a coding sequence codon by codon in frame 0, building the protein
//! as it goes. Every time the slip codon is read, the ribosome is assumed to
//! slip: translation resumes in a shifted frame and the peptide is the
//! recent in-frame context (upstream) joined to the shifted translation
//! (downstream). The scan itself never leaves frame 0, so several slip
//! events can be emitted from one source.
//!
//! Where the shifted frame resumes depends on the site mode:
//!
//! | site     | upstream context             | shifted frame starts at        |
//! |----------|------------------------------|--------------------------------|
//! | `emptyA` | protein without the slip aa  | slip codon start + offset      |
//! | `Asite`  | protein with the slip aa     | slip codon end + offset        |
//! | `Psite`  | protein + next codon's aa    | end of next codon + offset     |
//!
//! `Psite` events whose next codon is a stop are dropped. The occurrence
//! counter has already advanced for them, so identifier counts number slip
//! codons seen, not events emitted. That stop is the next in-frame codon, so
//! the scan ends right after a dropped event.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::modules::peptides::record::{format_identifier, PeptideRecord, ShiftEvent};
use crate::modules::seq::{
    CodingSequence, Codon, CodonTable, SequenceError, SequenceResult, STOP_MARKER,
};

/// Default number of upstream residues kept in front of the shifted frame
pub const DEFAULT_UPSTREAM: usize = 13;

// Nucleotides kept before and after the slip codon start in identifiers.
const WINDOW_BEFORE: usize = 4;
const WINDOW_AFTER: usize = 6;

/// Ribosomal site treated as the frameshift trigger point
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
pub enum SiteMode {
    /// P-site codon vacated, the slip codon itself is re-read
    #[serde(rename = "emptyA")]
    #[value(name = "emptyA")]
    EmptyA,
    /// Slip codon decoded in the A site, shift after it
    #[serde(rename = "Asite")]
    #[value(name = "Asite")]
    Asite,
    /// Slip codon in the P site, one more codon decoded before the shift
    #[serde(rename = "Psite")]
    #[value(name = "Psite")]
    Psite,
}

impl fmt::Display for SiteMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SiteMode::EmptyA => "emptyA",
            SiteMode::Asite => "Asite",
            SiteMode::Psite => "Psite",
        })
    }
}

/// Direction and size of the slip
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
pub enum Direction {
    /// -1 nucleotide
    #[value(name = "M1")]
    M1,
    /// +1 nucleotide
    #[value(name = "P1")]
    P1,
    /// -2 nucleotides
    #[value(name = "M2")]
    M2,
}

impl Direction {
    /// Nucleotide offset applied to the resume position
    pub fn offset(self) -> isize {
        match self {
            Direction::M1 => -1,
            Direction::P1 => 1,
            Direction::M2 => -2,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Direction::M1 => "M1",
            Direction::P1 => "P1",
            Direction::M2 => "M2",
        })
    }
}

/// Translation-length mode. Only used for naming output files.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
pub enum LengthMode {
    #[default]
    #[serde(rename = "chimeras")]
    #[value(name = "chimeras")]
    Chimeras,
    #[serde(rename = "OOF")]
    #[value(name = "OOF")]
    Oof,
}

impl fmt::Display for LengthMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            LengthMode::Chimeras => "chimeras",
            LengthMode::Oof => "OOF",
        })
    }
}

/// Parameters of a frameshift run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameshiftParams {
    /// Slip codon
    pub codon: Codon,
    pub site: SiteMode,
    pub direction: Direction,
    /// Maximum number of upstream residues kept
    pub upstream: usize,
    pub length_mode: LengthMode,
    /// Cut the downstream segment at the slip codon's amino acid
    pub stop_at_target: bool,
    /// With `stop_at_target`, keep the target amino acid as the last residue
    pub trim: bool,
}

impl FrameshiftParams {
    pub fn new(codon: Codon, site: SiteMode, direction: Direction) -> Self {
        Self {
            codon,
            site,
            direction,
            upstream: DEFAULT_UPSTREAM,
            length_mode: LengthMode::default(),
            stop_at_target: false,
            trim: false,
        }
    }

    pub fn with_upstream(mut self, upstream: usize) -> Self {
        self.upstream = upstream;
        self
    }

    pub fn with_length_mode(mut self, length_mode: LengthMode) -> Self {
        self.length_mode = length_mode;
        self
    }

    pub fn with_stop_at_target(mut self, stop_at_target: bool) -> Self {
        self.stop_at_target = stop_at_target;
        self
    }

    pub fn with_trim(mut self, trim: bool) -> Self {
        self.trim = trim;
        self
    }
}

/// Frameshift translation engine bound to one parameter set
#[derive(Debug, Clone)]
pub struct FrameshiftEngine {
    params: FrameshiftParams,
    table: &'static CodonTable,
    /// Amino acid encoded by the slip codon
    target: u8,
}

impl FrameshiftEngine {
    /// Create an engine over the standard codon table.
    ///
    /// Fails when the slip codon is a stop codon, which can never be reached
    /// by the scan and has no amino acid to report.
    pub fn new(params: FrameshiftParams) -> SequenceResult<Self> {
        let table = CodonTable::standard();
        let target = table
            .amino_acid(&params.codon)
            .ok_or_else(|| SequenceError::StopCodon(params.codon.to_string()))?;

        Ok(Self {
            params,
            table,
            target,
        })
    }

    pub fn params(&self) -> &FrameshiftParams {
        &self.params
    }

    /// Amino acid encoded by the slip codon
    pub fn target_amino_acid(&self) -> char {
        self.target as char
    }

    /// Emit one peptide per slip event in `cds`.
    ///
    /// Identifiers are unique within one source because each carries its
    /// occurrence count.
    pub fn translate(&self, cds: &CodingSequence) -> Vec<PeptideRecord> {
        let bases = cds.bases();
        let slip = self.params.codon.as_bytes().as_slice();
        let in_frame = bases.len() - bases.len() % 3;

        let mut protein: Vec<u8> = Vec::with_capacity(in_frame / 3);
        let mut count = 0;
        let mut peptides = Vec::new();

        for start in (0..in_frame).step_by(3) {
            let codon = &bases[start..start + 3];
            let Some(aa) = self.table.get(codon) else {
                log::trace!(
                    "{}: no amino acid for {} at {}, ending translation",
                    cds.source_id(),
                    String::from_utf8_lossy(codon),
                    start
                );
                break;
            };
            protein.push(aa);

            if codon != slip {
                continue;
            }

            count += 1;
            log::trace!(
                "{}: slip codon at {} (count {})",
                cds.source_id(),
                start,
                count
            );

            let Some((upstream, resume)) = self.shift_context(bases, start, &protein) else {
                log::debug!(
                    "{}: stop codon after Psite slip at {}, skipping occurrence {}",
                    cds.source_id(),
                    start,
                    count
                );
                continue;
            };

            let upstream = self.trim_upstream(upstream);
            let downstream = self.downstream(bases, resume);
            let window = slip_window(bases, start);

            let upstream = String::from_utf8_lossy(&upstream).into_owned();
            let downstream = String::from_utf8_lossy(&downstream).into_owned();
            let window = String::from_utf8_lossy(window).into_owned();

            let identifier = format_identifier(&ShiftEvent {
                direction: self.params.direction,
                site: self.params.site,
                count,
                amino_acid: self.target as char,
                codon_position: start / 3 + 1,
                source_id: cds.source_id(),
                downstream: &downstream,
                window: &window,
            });

            log::trace!(
                "{}: upstream {} downstream {}",
                identifier,
                upstream,
                downstream
            );

            peptides.push(PeptideRecord::new(
                identifier,
                upstream + &downstream,
                cds.gene().clone(),
            ));
        }

        peptides
    }

    /// Upstream context and the signed position where the shifted frame
    /// resumes. `None` drops the occurrence.
    fn shift_context(
        &self,
        bases: &[u8],
        start: usize,
        protein: &[u8],
    ) -> Option<(Vec<u8>, isize)> {
        let offset = self.params.direction.offset();

        match self.params.site {
            SiteMode::EmptyA => {
                let upstream = protein[..protein.len() - 1].to_vec();
                Some((upstream, start as isize + offset))
            }
            SiteMode::Asite => Some((protein.to_vec(), (start + 3) as isize + offset)),
            SiteMode::Psite => {
                let mut upstream = protein.to_vec();
                if let Some(next) = bases.get(start + 3..start + 6) {
                    let next_aa = self.table.translate_codon(next);
                    if next_aa == STOP_MARKER {
                        return None;
                    }
                    upstream.push(next_aa);
                }
                Some((upstream, (start + 6) as isize + offset))
            }
        }
    }

    fn trim_upstream(&self, mut upstream: Vec<u8>) -> Vec<u8> {
        if upstream.len() > self.params.upstream {
            upstream.drain(..upstream.len() - self.params.upstream);
        }
        upstream
    }

    /// Translation of the shifted frame up to its first stop, then the
    /// optional cut at the target amino acid. A frame that would start
    /// before the sequence yields nothing.
    fn downstream(&self, bases: &[u8], resume: isize) -> Vec<u8> {
        let Ok(resume) = usize::try_from(resume) else {
            return Vec::new();
        };
        let resume = resume.min(bases.len());

        let mut downstream = self.table.translate_frame(&bases[resume..]);
        if let Some(stop) = downstream.iter().position(|&aa| aa == STOP_MARKER) {
            downstream.truncate(stop);
        }

        if self.params.stop_at_target {
            cut_at_target(&mut downstream, self.target, self.params.trim);
        }

        downstream
    }
}

/// Truncate before the first `target`, or just after it when `inclusive`
fn cut_at_target(downstream: &mut Vec<u8>, target: u8, inclusive: bool) {
    if let Some(pos) = downstream.iter().position(|&aa| aa == target) {
        downstream.truncate(if inclusive { pos + 1 } else { pos });
    }
}

/// Raw nucleotides from 4 before to 6 after the slip codon start, clamped
/// to the sequence
fn slip_window(bases: &[u8], start: usize) -> &[u8] {
    let from = start.saturating_sub(WINDOW_BEFORE);
    let to = (start + WINDOW_AFTER).min(bases.len());
    &bases[from..to]
}
