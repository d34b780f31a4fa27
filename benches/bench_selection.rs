use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use std::sync::Arc;

use genevo::{
    chromosome::Chromosome,
    fitness::IdentityScaler,
    gene::DoubleGene,
    genotype::Genotype,
    optimize::Optimize,
    phenotype::Phenotype,
    population::Population,
    rng::{RandomEngine, RandomRegistry},
    selection::{
        BoltzmannSelector, ExponentialRankSelector, LinearRankSelector, RouletteWheelSelector,
        Selector, TournamentSelector, TruncationSelector,
    },
};

fn population(size: usize) -> Population<DoubleGene, f64> {
    let function = Arc::new(|gt: &Genotype<DoubleGene>| gt.chromosome(0).gene(0).value());
    let population: Population<DoubleGene, f64> = (0..size)
        .map(|_| {
            let chromosome = DoubleGene::chromosome(0.0, 1.0, 1).unwrap();
            Phenotype::of(
                Genotype::of(vec![chromosome]).unwrap(),
                1,
                function.clone(),
                Arc::new(IdentityScaler),
            )
        })
        .collect();
    // Selection benchmarks should not pay for evaluation
    population.iter().for_each(|pt| {
        pt.evaluate();
    });
    population
}

fn bench_selectors(c: &mut Criterion) {
    let mut group = c.benchmark_group("selection");
    let selectors: Vec<(&str, Box<dyn Selector<DoubleGene, f64>>)> = vec![
        ("tournament", Box::new(TournamentSelector::default())),
        ("truncation", Box::new(TruncationSelector::new())),
        ("roulette", Box::new(RouletteWheelSelector::new())),
        ("linear_rank", Box::new(LinearRankSelector::default())),
        ("exponential_rank", Box::new(ExponentialRankSelector::default())),
        ("boltzmann", Box::new(BoltzmannSelector::default())),
    ];

    // Test with different population sizes
    for size in [100, 1000, 10000].iter() {
        let population = population(*size);
        for (name, selector) in &selectors {
            group.bench_with_input(BenchmarkId::new(*name, size), &population, |b, population| {
                RandomRegistry::scope(RandomEngine::from_seed(1), || {
                    b.iter(|| {
                        selector
                            .select(black_box(population), population.len(), Optimize::Maximum)
                            .unwrap()
                    })
                })
            });
        }
    }

    group.finish();
}

criterion_group!(benches, bench_selectors);
criterion_main!(benches);
