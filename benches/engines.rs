use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use frameshift_peptides::engines::compute::{
    identity, Direction, FrameshiftEngine, FrameshiftParams, RedundancyFilter, SiteMode,
};
use frameshift_peptides::modules::seq::{CodingSequence, Codon};
use frameshift_peptides::pipeline::translate_sources;

fn random_dna(rng: &mut StdRng, length: usize) -> Vec<u8> {
    const BASES: &[u8] = b"ACGT";
    (0..length).map(|_| BASES[rng.gen_range(0..4)]).collect()
}

fn bench_identity(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(7);
    let mut group = c.benchmark_group("identity");

    for length in [100, 1_000, 10_000] {
        let a = random_dna(&mut rng, length);
        let b = random_dna(&mut rng, length);
        group.throughput(Throughput::Bytes(length as u64));
        group.bench_with_input(BenchmarkId::from_parameter(length), &length, |bench, _| {
            bench.iter(|| identity(black_box(&a), black_box(&b)));
        });
    }

    group.finish();
}

fn bench_redundancy(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(11);
    let mut group = c.benchmark_group("redundancy_filter");
    group.sample_size(20);

    for count in [100, 500] {
        let sequences: Vec<Vec<u8>> = (0..count).map(|_| random_dna(&mut rng, 300)).collect();
        let filter = RedundancyFilter::default();
        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |bench, _| {
            bench.iter(|| filter.filter(black_box(sequences.clone())));
        });
    }

    group.finish();
}

fn bench_frameshift(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(13);
    let sources: Vec<CodingSequence> = (0..1_000)
        .map(|i| {
            let description = format!("tx{} gene_symbol:G{}", i, i % 50);
            CodingSequence::new(&description, &random_dna(&mut rng, 1_500))
        })
        .collect();

    let mut group = c.benchmark_group("frameshift");
    group.sample_size(20);

    for site in [SiteMode::EmptyA, SiteMode::Asite, SiteMode::Psite] {
        let codon = Codon::parse("TTC").unwrap();
        let params = FrameshiftParams::new(codon, site, Direction::P1);
        let engine = FrameshiftEngine::new(params).unwrap();

        group.bench_function(BenchmarkId::new("translate_sources", site), |bench| {
            bench.iter(|| translate_sources(&engine, black_box(&sources), None));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_identity, bench_redundancy, bench_frameshift);
criterion_main!(benches);
