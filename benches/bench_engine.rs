use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use std::sync::Arc;

use genevo::{
    alteration::{CompositeAlterer, MeanAlterer, Mutator},
    evolution::{EngineOptions, GeneticAlgorithm},
    executor::Executor,
    gene::DoubleGene,
    genotype::Genotype,
    optimize::Optimize,
    selection::TournamentSelector,
};

// Sphere function, minimized at the origin
fn sphere(gt: &Genotype<DoubleGene>) -> f64 {
    gt.chromosome(0)
        .iter()
        .map(|gene| gene.value().powi(2))
        .sum()
}

fn engine(executor: Executor, population_size: usize) -> GeneticAlgorithm<DoubleGene, f64> {
    let factory = Genotype::of(vec![DoubleGene::chromosome(-5.0, 5.0, 20).unwrap()]).unwrap();
    let alterer: CompositeAlterer<DoubleGene, f64> = CompositeAlterer::join(
        Arc::new(MeanAlterer::new(0.3).unwrap()),
        Arc::new(Mutator::new(0.05).unwrap()),
    );
    GeneticAlgorithm::builder()
        .with_factory(factory)
        .with_fitness_function(sphere)
        .with_selector(TournamentSelector::new(3).unwrap())
        .with_alterer(alterer)
        .with_options(
            EngineOptions::builder()
                .population_size(population_size)
                .optimize(Optimize::Minimum)
                .parallel_threshold(1)
                .build()
                .unwrap(),
        )
        .with_executor(executor)
        .build()
        .unwrap()
}

fn bench_generations(c: &mut Criterion) {
    let mut group = c.benchmark_group("evolve_10_generations");
    group.sample_size(20);

    for size in [100, 1000].iter() {
        group.bench_with_input(BenchmarkId::new("inline", size), size, |b, &size| {
            b.iter(|| {
                let engine = engine(Executor::Inline, size);
                engine.setup().unwrap();
                black_box(engine.evolve_n(10).unwrap())
            })
        });

        group.bench_with_input(BenchmarkId::new("rayon", size), size, |b, &size| {
            b.iter(|| {
                let engine = engine(Executor::Global, size);
                engine.setup().unwrap();
                black_box(engine.evolve_n(10).unwrap())
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_generations);
criterion_main!(benches);
