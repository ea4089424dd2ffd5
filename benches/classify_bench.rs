//! Classification throughput benchmarks

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use quartet::*;

fn quartets() -> Vec<PerMember<Genotype>> {
    let genotypes = [Genotype::hom_ref(), Genotype::het(), Genotype::hom_alt()];
    let mut all = Vec::with_capacity(81);
    for father in genotypes {
        for mother in genotypes {
            for child1 in genotypes {
                for child2 in genotypes {
                    all.push(PerMember::new(father, mother, child1, child2));
                }
            }
        }
    }
    all
}

fn benchmark_pattern_classification(c: &mut Criterion) {
    let quartets = quartets();
    let classifier = PatternClassifier::new();

    c.bench_function("derive_and_classify_81_quartets", |b| {
        b.iter(|| {
            for genotypes in &quartets {
                black_box(classifier.classify_genotypes(black_box(genotypes)).ok());
            }
        });
    });
}

fn benchmark_block_lookup(c: &mut Criterion) {
    let intervals: Vec<_> = (0..10_000u64)
        .map(|i| ScoredInterval::new("chr1", i * 1_000, i * 1_000 + 900, (i % 6) as i32))
        .collect();
    let mut index = match BlockIndex::<QuartetState>::from_scored_intervals(&intervals) {
        Ok(index) => index,
        Err(err) => panic!("benchmark index failed to build: {err}"),
    };
    let candidates = CandidateStates::two(QuartetState::Identical, QuartetState::Paternal);

    c.bench_function("lookup_and_classify_10k_blocks", |b| {
        let mut position = 0u64;
        b.iter(|| {
            position = (position + 7_919) % 10_000_000;
            if let Some(block) = index.lookup_mut("chr1", black_box(position)) {
                black_box(block.classify_candidates(&candidates));
            }
        });
    });
}

criterion_group!(benches, benchmark_pattern_classification, benchmark_block_lookup);
criterion_main!(benches);
