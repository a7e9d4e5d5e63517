use std::fs;

use chrono::NaiveDate;
use tempfile::tempdir;

use frameshift_peptides::modules::io::read_fasta;
use frameshift_peptides::pipeline::{
    run_pipeline, translate_file, PipelineConfig, TranslateConfig, DEDUPLICATED_FILE_NAME,
};
use frameshift_peptides::{Codon, Direction, FrameshiftParams, SiteMode};

// Asite/P1 on TTC yields MAAAAF + EKKKKN
const LONG_CDS: &str = "ATGGCCGCCGCCGCCTTCGGAAAAAAAAAAAAAAAATAG";
const OTHER_CDS: &str = "ATGCCCCCCTTCCCCCCCCCCCCCCCCCCCCTAG";

fn date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, 31).unwrap()
}

fn params() -> FrameshiftParams {
    let codon = Codon::parse("TTC").unwrap();
    FrameshiftParams::new(codon, SiteMode::Asite, Direction::P1)
}

#[test]
fn test_named_source_suppresses_anonymous_duplicate() -> std::io::Result<()> {
    let dir = tempdir()?;
    let input = dir.path().join("cds.fasta");
    let records = [
        format!(">anon1 no tag\n{LONG_CDS}\n"),
        format!(">named gene_symbol:AAA extra\n{LONG_CDS}\n"),
        format!(">anon2\n{OTHER_CDS}\n"),
    ];
    fs::write(&input, records.concat())?;

    let prefix = dir.path().join("run").to_string_lossy().to_string();
    let config = TranslateConfig::new(&input, &prefix, params())
        .with_date(date());
    let summary = translate_file(&config).unwrap();

    assert_eq!(summary.peptides.produced, 3);
    assert_eq!(summary.peptides.suppressed_no_name, 1);
    assert_eq!(summary.peptides.too_short, 0);
    assert_eq!(summary.peptides.retained, 2);

    let written = read_fasta(&summary.output).unwrap();
    let ids: Vec<&str> = written.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(
        ids,
        vec![
            "P1_Asite_count1_F6_named_EKKKKN_CGCCTTCGGA",
            "P1_Asite_count1_F4_anon2_PPPPPP_CCCCTTCCCC",
        ]
    );
    assert_eq!(written[0].sequence, b"MAAAAFEKKKKN");
    assert_eq!(written[1].sequence, b"MPPFPPPPPP");

    assert!(summary
        .output
        .to_string_lossy()
        .ends_with("run_13_TTC_chimeras__NoStopF_01-31-2025.fasta"));
    Ok(())
}

#[test]
fn test_pipeline_with_gene_list() -> std::io::Result<()> {
    let dir = tempdir()?;
    let input = dir.path().join("raw.fasta");
    let records = [
        format!(">tx1 gene_symbol:AAA\n{LONG_CDS}\n"),
        format!(">tx1_copy gene_symbol:AAA\n{LONG_CDS}\n"),
        format!(">tx2 gene_symbol:BBB\n{OTHER_CDS}\n"),
    ];
    fs::write(&input, records.concat())?;
    let genes = dir.path().join("genes.csv");
    fs::write(&genes, "Gene,Note\nAAA,kept\n")?;

    let outdir = dir.path().join("out");
    let config = PipelineConfig {
        input,
        outdir: outdir.clone(),
        output_prefix: "peptides".to_string(),
        params: params().with_stop_at_target(true),
        gene_list: Some(genes),
        threshold: 0.9,
        keep_intermediate: false,
        date: date(),
    };

    let summary = run_pipeline(&config).unwrap();

    assert_eq!(summary.dedup.records, 3);
    assert_eq!(summary.dedup.retained, 2);
    assert_eq!(summary.translate.sources, 2);
    assert_eq!(summary.translate.skipped_by_gene_list, 1);
    assert_eq!(summary.translate.translated, 1);
    assert_eq!(summary.translate.peptides.retained, 1);
    assert!(!outdir.join(DEDUPLICATED_FILE_NAME).exists());

    let expected = outdir.join("peptides_13_TTC_chimeras__StopF_01-31-2025.fasta");
    assert_eq!(summary.translate.output, expected);
    let content = fs::read_to_string(expected)?;
    assert_eq!(
        content,
        ">P1_Asite_count1_F6_tx1_EKKKKN_CGCCTTCGGA\nMAAAAFEKKKKN\n"
    );
    Ok(())
}

#[test]
fn test_missing_gene_column_fails_the_run() -> std::io::Result<()> {
    let dir = tempdir()?;
    let input = dir.path().join("cds.fasta");
    fs::write(&input, format!(">tx1\n{LONG_CDS}\n"))?;
    let genes = dir.path().join("genes.csv");
    fs::write(&genes, "Symbol\nAAA\n")?;

    let prefix = dir.path().join("run").to_string_lossy().to_string();
    let config = TranslateConfig::new(&input, &prefix, params())
        .with_gene_list(Some(&genes))
        .with_date(date());

    assert!(translate_file(&config).is_err());
    assert!(!config.output_path().exists());
    Ok(())
}
