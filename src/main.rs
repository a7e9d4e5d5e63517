use chrono::Local;
use clap::Parser;
use log::{error, info};
use simple_logger::init_with_level;

use frameshift_peptides::{
    cli::{Args, Commands, DedupArgs, PipelineArgs, TranslateArgs},
    engines::core::{io::get_io_stats, parallel::initialize_thread_pool},
    pipeline::{
        deduplicate_file, run_pipeline, translate_file, write_summary, PipelineConfig,
        PipelineResult, TranslateConfig,
    },
};

fn main() {
    let start = std::time::Instant::now();

    let args = Args::parse();

    if let Err(e) = init_with_level(args.level) {
        eprintln!("Failed to initialize logger: {}", e);
    }
    initialize_thread_pool(args.threads);

    let result = match args.command {
        Commands::Translate(args) => run_translate(args),
        Commands::Dedup(args) => run_dedup(args),
        Commands::Pipeline(args) => run_full(args),
    };

    if let Err(e) = result {
        error!("{}", e);
        std::process::exit(1);
    }

    let (read, written) = get_io_stats();
    info!("Read {} bytes, wrote {} bytes", read, written);

    let elapsed = start.elapsed();
    info!("Elapsed time: {:.3?}", elapsed);
}

fn run_translate(args: TranslateArgs) -> PipelineResult<()> {
    let config = TranslateConfig::new(&args.fasta, &args.output, args.frameshift.params())
        .with_gene_list(args.frameshift.gene_list);

    let summary = translate_file(&config)?;
    if let Some(path) = args.summary {
        write_summary(&summary, path)?;
    }
    Ok(())
}

fn run_dedup(args: DedupArgs) -> PipelineResult<()> {
    deduplicate_file(&args.input, &args.output, args.threshold)?;
    Ok(())
}

fn run_full(args: PipelineArgs) -> PipelineResult<()> {
    let config = PipelineConfig {
        params: args.frameshift.params(),
        input: args.input,
        outdir: args.outdir,
        output_prefix: args.prefix,
        gene_list: args.frameshift.gene_list,
        threshold: args.threshold,
        keep_intermediate: args.keep_intermediate,
        date: Local::now().date_naive(),
    };

    let summary = run_pipeline(&config)?;
    if let Some(path) = args.summary {
        write_summary(&summary, path)?;
    }
    Ok(())
}
