use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::engines::compute::{
    Direction, FrameshiftParams, LengthMode, SiteMode, DEFAULT_IDENTITY_THRESHOLD,
};
use crate::modules::seq::Codon;

#[derive(Debug, Parser)]
#[command(
    name = "fspep",
    about = "Frameshift peptide generator",
    version = env!("CARGO_PKG_VERSION")
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(
        short = 't',
        long = "threads",
        help = "Number of threads",
        value_name = "THREADS",
        default_value_t = num_cpus::get(),
        global = true
    )]
    pub threads: usize,

    #[arg(
        short = 'L',
        long = "level",
        help = "Logging level",
        value_name = "LEVEL",
        default_value_t = log::Level::Info,
        global = true
    )]
    pub level: log::Level,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Translate coding sequences into frameshifted peptides
    Translate(TranslateArgs),

    /// Remove near-duplicate sequences from a FASTA file
    Dedup(DedupArgs),

    /// Deduplicate a FASTA file, then translate it
    Pipeline(PipelineArgs),
}

/// Options shared by `translate` and `pipeline`
#[derive(Debug, Parser)]
pub struct FrameshiftArgs {
    #[arg(
        short = 'c',
        long = "codon",
        required = true,
        help = "Slip codon triggering the frameshift (DNA bases only)"
    )]
    pub codon: Codon,

    #[arg(
        short = 's',
        long = "site",
        required = true,
        help = "Ribosomal site of the frameshift"
    )]
    pub site: SiteMode,

    #[arg(
        short = 'd',
        long = "direction",
        required = true,
        help = "Direction of the frameshift"
    )]
    pub direction: Direction,

    #[arg(
        short = 'u',
        long = "upstream",
        required = false,
        help = "Number of amino acids kept upstream of the shift (13 suits class I, 24 class II)",
        default_value = "13"
    )]
    pub upstream: usize,

    #[arg(
        short = 'l',
        long = "length",
        required = false,
        help = "Translation type, used in the output file name",
        default_value = "chimeras"
    )]
    pub length: LengthMode,

    #[arg(
        long = "stop-aa",
        help = "Cut the shifted frame at the slip codon's amino acid",
        action = clap::ArgAction::SetTrue
    )]
    pub stop_aa: bool,

    #[arg(
        long = "trim",
        help = "With --stop-aa, keep the target amino acid as the last residue",
        action = clap::ArgAction::SetTrue
    )]
    pub trim: bool,

    #[arg(
        short = 'g',
        long = "gene-list",
        required = false,
        help = "Path to a CSV file with a 'Gene' column"
    )]
    pub gene_list: Option<PathBuf>,
}

impl FrameshiftArgs {
    pub fn params(&self) -> FrameshiftParams {
        FrameshiftParams::new(self.codon, self.site, self.direction)
            .with_upstream(self.upstream)
            .with_length_mode(self.length)
            .with_stop_at_target(self.stop_aa)
            .with_trim(self.trim)
    }
}

#[derive(Debug, Parser)]
pub struct TranslateArgs {
    #[arg(
        short = 'f',
        long = "fasta",
        required = true,
        help = "Path to FASTA file with CDS sequences"
    )]
    pub fasta: PathBuf,

    #[command(flatten)]
    pub frameshift: FrameshiftArgs,

    #[arg(
        short = 'o',
        long = "output",
        required = true,
        help = "Output file prefix"
    )]
    pub output: String,

    #[arg(
        long = "summary",
        required = false,
        help = "Write a JSON run summary to this path"
    )]
    pub summary: Option<PathBuf>,
}

#[derive(Debug, Parser)]
pub struct DedupArgs {
    #[arg(help = "Input FASTA file")]
    pub input: PathBuf,

    #[arg(help = "Output FASTA file")]
    pub output: PathBuf,

    #[arg(
        long = "threshold",
        required = false,
        help = "Identity at or above which a sequence is a duplicate",
        default_value_t = DEFAULT_IDENTITY_THRESHOLD
    )]
    pub threshold: f64,
}

#[derive(Debug, Parser)]
pub struct PipelineArgs {
    #[arg(help = "Input FASTA file with CDS sequences")]
    pub input: PathBuf,

    #[arg(
        short = 'o',
        long = "outdir",
        required = false,
        help = "Path to outdir",
        default_value = "."
    )]
    pub outdir: PathBuf,

    #[arg(
        short = 'p',
        long = "prefix",
        required = false,
        help = "Output file prefix inside outdir",
        default_value = "frameshifted"
    )]
    pub prefix: String,

    #[command(flatten)]
    pub frameshift: FrameshiftArgs,

    #[arg(
        long = "threshold",
        required = false,
        help = "Identity at or above which an input sequence is a duplicate",
        default_value_t = DEFAULT_IDENTITY_THRESHOLD
    )]
    pub threshold: f64,

    #[arg(
        long = "keep-intermediate",
        help = "Keep the deduplicated input in outdir",
        action = clap::ArgAction::SetTrue
    )]
    pub keep_intermediate: bool,

    #[arg(
        long = "summary",
        required = false,
        help = "Write a JSON run summary to this path"
    )]
    pub summary: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_consistent() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_parse_translate() {
        let args = Args::parse_from([
            "fspep", "translate", "-f", "cds.fa", "-c", "ttc", "-s", "Asite", "-d", "P1", "-o",
            "out/run", "--stop-aa",
        ]);

        let Commands::Translate(translate) = args.command else {
            panic!("expected translate");
        };
        let params = translate.frameshift.params();
        assert_eq!(params.codon.as_str(), "TTC");
        assert_eq!(params.site, SiteMode::Asite);
        assert_eq!(params.direction, Direction::P1);
        assert_eq!(params.upstream, 13);
        assert_eq!(params.length_mode, LengthMode::Chimeras);
        assert!(params.stop_at_target);
        assert!(!params.trim);
        assert_eq!(args.level, log::Level::Info);
    }

    #[test]
    fn test_rna_codon_is_rejected() {
        let parsed = Args::try_parse_from([
            "fspep", "translate", "-f", "cds.fa", "-c", "UUC", "-s", "Asite", "-d", "P1", "-o",
            "run",
        ]);
        assert!(parsed.is_err());
    }

    #[test]
    fn test_parse_pipeline() {
        let args = Args::parse_from([
            "fspep", "pipeline", "in.fa", "-o", "out", "-c", "GGA", "-s", "Psite", "-d", "M2",
            "-l", "OOF", "--threshold", "0.8", "--keep-intermediate", "-t", "2",
        ]);

        assert_eq!(args.threads, 2);
        let Commands::Pipeline(pipeline) = args.command else {
            panic!("expected pipeline");
        };
        assert_eq!(pipeline.outdir, PathBuf::from("out"));
        assert_eq!(pipeline.prefix, "frameshifted");
        assert_eq!(pipeline.threshold, 0.8);
        assert!(pipeline.keep_intermediate);
        assert_eq!(pipeline.frameshift.params().length_mode, LengthMode::Oof);
    }

    #[test]
    fn test_parse_dedup_default_threshold() {
        let args = Args::parse_from(["fspep", "dedup", "in.fa", "out.fa"]);
        let Commands::Dedup(dedup) = args.command else {
            panic!("expected dedup");
        };
        assert_eq!(dedup.threshold, DEFAULT_IDENTITY_THRESHOLD);
    }
}
