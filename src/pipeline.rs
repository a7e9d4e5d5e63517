//! Run orchestration
//!
//! Ties the engines to the filesystem. `deduplicate_file` runs redundancy
//! removal over a FASTA file, `translate_file` runs the frameshift engine
//! and the peptide collector over one, and `run_pipeline` chains the two
//! through an intermediate deduplicated file.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::engines::compute::{ComputeError, FrameshiftEngine, FrameshiftParams, RedundancyFilter};
use crate::engines::core::parallel::ordered_map;
use crate::engines::EngineError;
use crate::modules::io::{self, GeneList};
use crate::modules::peptides::{CollectedPeptides, CollectionSummary, PeptideCollector};
use crate::modules::seq::{CodingSequence, CodonTable, SequenceError};

/// File name of the intermediate deduplicated input inside the output directory
pub const DEDUPLICATED_FILE_NAME: &str = "deduplicated_sequences.fasta";

/// Extension of peptide output files
pub const OUTPUT_EXTENSION: &str = "fasta";

const DATE_FORMAT: &str = "%m-%d-%Y";

/// Error type for pipeline runs
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error(transparent)]
    Sequence(#[from] SequenceError),

    #[error(transparent)]
    Compute(#[from] ComputeError),

    #[error("Failed to write summary: {0}")]
    Summary(#[from] serde_json::Error),
}

/// Result type for pipeline runs
pub type PipelineResult<T> = Result<T, PipelineError>;

/// Settings of one frameshift translation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranslateConfig {
    /// FASTA file of coding sequences
    pub input: PathBuf,
    /// Output prefix; may include directories
    pub output_prefix: String,
    pub params: FrameshiftParams,
    /// CSV file with a `Gene` column
    pub gene_list: Option<PathBuf>,
    /// Date stamped into the output file name
    pub date: NaiveDate,
}

impl TranslateConfig {
    pub fn new<P: Into<PathBuf>>(input: P, output_prefix: &str, params: FrameshiftParams) -> Self {
        Self {
            input: input.into(),
            output_prefix: output_prefix.to_string(),
            params,
            gene_list: None,
            date: Local::now().date_naive(),
        }
    }

    pub fn with_gene_list<P: Into<PathBuf>>(mut self, gene_list: Option<P>) -> Self {
        self.gene_list = gene_list.map(Into::into);
        self
    }

    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = date;
        self
    }

    /// Path of the peptide FASTA this run writes
    pub fn output_path(&self) -> PathBuf {
        PathBuf::from(format!(
            "{}.{}",
            output_stem(&self.params, &self.output_prefix, self.date),
            OUTPUT_EXTENSION
        ))
    }
}

/// Settings of a full deduplicate-then-translate run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineConfig {
    pub input: PathBuf,
    pub outdir: PathBuf,
    /// File name prefix of the peptide output inside `outdir`
    pub output_prefix: String,
    pub params: FrameshiftParams,
    pub gene_list: Option<PathBuf>,
    pub threshold: f64,
    pub keep_intermediate: bool,
    pub date: NaiveDate,
}

impl PipelineConfig {
    pub fn intermediate_path(&self) -> PathBuf {
        self.outdir.join(DEDUPLICATED_FILE_NAME)
    }

    /// Translation settings reading the intermediate file
    pub fn translate_config(&self) -> TranslateConfig {
        let prefix = self.outdir.join(&self.output_prefix);

        TranslateConfig {
            input: self.intermediate_path(),
            output_prefix: prefix.to_string_lossy().to_string(),
            params: self.params.clone(),
            gene_list: self.gene_list.clone(),
            date: self.date,
        }
    }
}

/// Counts of a redundancy removal run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DedupSummary {
    pub input: PathBuf,
    pub output: PathBuf,
    pub threshold: f64,
    pub records: usize,
    pub retained: usize,
}

/// Counts of a translation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranslateSummary {
    pub input: PathBuf,
    pub output: PathBuf,
    pub params: FrameshiftParams,
    /// Records read from the input
    pub sources: usize,
    /// Sources whose gene is absent from the gene list
    pub skipped_by_gene_list: usize,
    /// Sources that never contain the slip codon
    pub skipped_without_codon: usize,
    /// Sources handed to the frameshift engine
    pub translated: usize,
    pub peptides: CollectionSummary,
}

/// Summary of a full pipeline run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    pub dedup: DedupSummary,
    pub translate: TranslateSummary,
    /// Whether the intermediate deduplicated file was left on disk
    pub kept_intermediate: bool,
}

/// Stem of the peptide output file:
/// `{prefix}_{upstream}_{codon}_{length}__{Stop|NoStop}{aa}{Trimmed_}_{MM-DD-YYYY}`
pub fn output_stem(params: &FrameshiftParams, prefix: &str, date: NaiveDate) -> String {
    let amino_acid = CodonTable::standard()
        .amino_acid(&params.codon)
        .map(|aa| (aa as char).to_string())
        .unwrap_or_else(|| "UNKNOWN".to_string());

    let stop = if params.stop_at_target {
        "_Stop"
    } else {
        "_NoStop"
    };

    format!(
        "{}_{}_{}_{}_{}{}{}_{}",
        prefix,
        params.upstream,
        params.codon,
        params.length_mode,
        stop,
        amino_acid,
        if params.trim { "Trimmed_" } else { "" },
        date.format(DATE_FORMAT)
    )
}

/// Source counts from `translate_sources`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SourceCounts {
    pub sources: usize,
    pub skipped_by_gene_list: usize,
    pub skipped_without_codon: usize,
    pub translated: usize,
}

/// Run the frameshift engine over every selected source and collect the
/// peptides in source order.
///
/// A source is skipped when a gene list is given and its gene is absent
/// from it, or when the slip codon occurs nowhere in its sequence.
pub fn translate_sources(
    engine: &FrameshiftEngine,
    sources: &[CodingSequence],
    gene_list: Option<&GeneList>,
) -> (CollectedPeptides, SourceCounts) {
    let codon = &engine.params().codon;
    let mut counts = SourceCounts {
        sources: sources.len(),
        ..SourceCounts::default()
    };

    let mut selected: Vec<&CodingSequence> = Vec::with_capacity(sources.len());
    for cds in sources {
        if let Some(genes) = gene_list {
            if !genes.contains(cds.gene()) {
                log::debug!("{}: gene {} not in gene list", cds.source_id(), cds.gene());
                counts.skipped_by_gene_list += 1;
                continue;
            }
        }

        if !cds.contains_codon(codon) {
            counts.skipped_without_codon += 1;
            continue;
        }

        selected.push(cds);
    }
    counts.translated = selected.len();

    let per_source = ordered_map(&selected, |cds| engine.translate(cds));

    let mut collector = PeptideCollector::new();
    collector.extend(per_source.into_iter().flatten());

    (collector.finish(), counts)
}

/// Translate a FASTA file of coding sequences into a peptide FASTA
pub fn translate_file(config: &TranslateConfig) -> PipelineResult<TranslateSummary> {
    let engine = FrameshiftEngine::new(config.params.clone())?;
    let gene_list = config
        .gene_list
        .as_ref()
        .map(GeneList::from_path)
        .transpose()?;

    let sources = io::read_coding_sequences(&config.input)?;
    log::info!(
        "Read {} coding sequences from {}",
        sources.len(),
        config.input.display()
    );
    log::info!(
        "Slip codon {} ({}), {} {}, upstream {}",
        config.params.codon,
        engine.target_amino_acid(),
        config.params.site,
        config.params.direction,
        config.params.upstream
    );

    let (collected, counts) = translate_sources(&engine, &sources, gene_list.as_ref());

    let output = config.output_path();
    io::write_peptides(&collected.peptides, &output)?;
    log::info!(
        "Wrote {} peptides to {}",
        collected.summary.retained,
        output.display()
    );

    Ok(TranslateSummary {
        input: config.input.clone(),
        output,
        params: config.params.clone(),
        sources: counts.sources,
        skipped_by_gene_list: counts.skipped_by_gene_list,
        skipped_without_codon: counts.skipped_without_codon,
        translated: counts.translated,
        peptides: collected.summary,
    })
}

/// Remove near-duplicate records from a FASTA file
pub fn deduplicate_file<P: AsRef<Path>, Q: AsRef<Path>>(
    input: P,
    output: Q,
    threshold: f64,
) -> PipelineResult<DedupSummary> {
    let filter = RedundancyFilter::new(threshold)?;

    let records = io::read_fasta(&input)?;
    let total = records.len();
    let unique = filter.filter(records);

    io::write_fasta(&unique, &output)?;
    log::info!(
        "Deduplicated sequences written to {}",
        output.as_ref().display()
    );

    Ok(DedupSummary {
        input: input.as_ref().to_path_buf(),
        output: output.as_ref().to_path_buf(),
        threshold,
        records: total,
        retained: unique.len(),
    })
}

/// Deduplicate the input into the output directory, translate the result,
/// then remove the intermediate file unless asked to keep it.
///
/// The intermediate file is removed whether or not translation succeeds.
/// A failed stage's error takes precedence over a failed removal.
pub fn run_pipeline(config: &PipelineConfig) -> PipelineResult<RunSummary> {
    if !config.outdir.exists() {
        log::info!("Creating output directory: {}", config.outdir.display());
        fs::create_dir_all(&config.outdir)?;
    }

    let intermediate = config.intermediate_path();
    let translate_config = config.translate_config();
    let stages = deduplicate_file(&config.input, &intermediate, config.threshold)
        .and_then(|dedup| Ok((dedup, translate_file(&translate_config)?)));

    let cleanup = if config.keep_intermediate || !intermediate.exists() {
        Ok(())
    } else {
        fs::remove_file(&intermediate)
    };

    let (dedup, translate) = stages?;
    cleanup?;
    if !config.keep_intermediate {
        log::info!("Deleted {} after processing", intermediate.display());
    }

    Ok(RunSummary {
        dedup,
        translate,
        kept_intermediate: config.keep_intermediate,
    })
}

/// Write any serialisable run summary as pretty JSON
pub fn write_summary<T: Serialize, P: AsRef<Path>>(summary: &T, path: P) -> PipelineResult<()> {
    let json = serde_json::to_string_pretty(summary)?;
    fs::write(path, json)?;
    Ok(())
}
