//! # Phenotype
//!
//! A [`Phenotype`] pairs a [`Genotype`] with the generation it was created in
//! and with its fitness, which is computed lazily and cached.
//!
//! The fitness function is invoked at most once per phenotype: the first call
//! to [`Phenotype::fitness`] (or [`Phenotype::evaluate`]) computes the raw
//! fitness and the scaled fitness, every later call returns the cached pair.
//! Phenotypes are cheap handles; clones share the genotype and the cached
//! fitness, so an individual selected twice is still evaluated only once.
//!
//! ## Example
//!
//! ```rust
//! use std::sync::Arc;
//! use genevo::gene::{DoubleGene, Gene};
//! use genevo::genotype::Genotype;
//! use genevo::phenotype::Phenotype;
//!
//! let genotype = Genotype::of(vec![DoubleGene::chromosome(0.0, 1.0, 1).unwrap()]).unwrap();
//! let phenotype: Phenotype<DoubleGene, f64> = Phenotype::of(
//!     genotype,
//!     1,
//!     Arc::new(|gt: &Genotype<DoubleGene>| *gt.gene().allele()),
//!     Arc::new(|fitness: f64| fitness * 2.0),
//! );
//!
//! assert!(!phenotype.is_evaluated());
//! assert_eq!(phenotype.fitness(), 2.0 * phenotype.raw_fitness());
//! assert!(phenotype.is_evaluated());
//! assert_eq!(phenotype.age(5), 4);
//! ```

use std::fmt;
use std::sync::{Arc, OnceLock};

use crate::fitness::{Fitness, FitnessFunction, FitnessScaler};
use crate::gene::Gene;
use crate::genotype::Genotype;

#[derive(Debug, Clone)]
struct Evaluation<C> {
    raw: C,
    scaled: C,
}

struct Inner<G: Gene, C: Fitness> {
    genotype: Genotype<G>,
    generation: u64,
    function: Arc<dyn FitnessFunction<G, C>>,
    scaler: Arc<dyn FitnessScaler<C>>,
    evaluation: OnceLock<Evaluation<C>>,
}

/// An individual of the population: a genotype with its lazily cached fitness.
pub struct Phenotype<G: Gene, C: Fitness> {
    inner: Arc<Inner<G, C>>,
}

impl<G: Gene, C: Fitness> Clone for Phenotype<G, C> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<G: Gene, C: Fitness> Phenotype<G, C> {
    /// Creates a new, not yet evaluated phenotype.
    pub fn of(
        genotype: Genotype<G>,
        generation: u64,
        function: Arc<dyn FitnessFunction<G, C>>,
        scaler: Arc<dyn FitnessScaler<C>>,
    ) -> Self {
        Self {
            inner: Arc::new(Inner {
                genotype,
                generation,
                function,
                scaler,
                evaluation: OnceLock::new(),
            }),
        }
    }

    /// Creates a new phenotype with the same fitness function and scaler.
    ///
    /// The new phenotype is not evaluated.
    pub fn new_instance(&self, genotype: Genotype<G>, generation: u64) -> Self {
        Self::of(
            genotype,
            generation,
            Arc::clone(&self.inner.function),
            Arc::clone(&self.inner.scaler),
        )
    }

    pub fn genotype(&self) -> &Genotype<G> {
        &self.inner.genotype
    }

    /// The generation this phenotype was created in.
    pub fn generation(&self) -> u64 {
        self.inner.generation
    }

    /// Number of generations this phenotype has been alive at `current_generation`.
    pub fn age(&self, current_generation: u64) -> u64 {
        current_generation.saturating_sub(self.inner.generation)
    }

    pub fn is_valid(&self) -> bool {
        self.inner.genotype.is_valid()
    }

    pub fn is_evaluated(&self) -> bool {
        self.inner.evaluation.get().is_some()
    }

    /// Computes and caches the fitness if that has not happened yet.
    pub fn evaluate(&self) -> &Self {
        self.evaluation();
        self
    }

    /// The scaled fitness, evaluated on first access.
    pub fn fitness(&self) -> C {
        self.evaluation().scaled.clone()
    }

    /// The raw fitness, evaluated on first access.
    pub fn raw_fitness(&self) -> C {
        self.evaluation().raw.clone()
    }

    /// Returns `true` if both handles refer to the same phenotype instance.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    fn evaluation(&self) -> &Evaluation<C> {
        self.inner.evaluation.get_or_init(|| {
            let raw = self.inner.function.evaluate(&self.inner.genotype);
            let scaled = self.inner.scaler.scale(raw.clone());
            Evaluation { raw, scaled }
        })
    }
}

impl<G: Gene, C: Fitness> fmt::Debug for Phenotype<G, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Phenotype")
            .field("genotype", &self.inner.genotype)
            .field("generation", &self.inner.generation)
            .field(
                "fitness",
                &self.inner.evaluation.get().map(|e| &e.scaled),
            )
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fitness::IdentityScaler;
    use crate::chromosome::Chromosome;
    use crate::gene::{DoubleGene, IntegerGene};
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn genotype() -> Genotype<DoubleGene> {
        Genotype::of(vec![DoubleGene::chromosome(0.0, 1.0, 3).unwrap()]).unwrap()
    }

    #[test]
    fn test_fitness_is_evaluated_once() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let function = move |gt: &Genotype<DoubleGene>| {
            counter.fetch_add(1, Ordering::SeqCst);
            gt.iter().flat_map(|c| c.iter()).map(|g| g.value()).sum::<f64>()
        };

        let phenotype: Phenotype<DoubleGene, f64> =
            Phenotype::of(genotype(), 1, Arc::new(function), Arc::new(IdentityScaler));
        let copy = phenotype.clone();

        let first = phenotype.fitness();
        let second = phenotype.fitness();
        let third = copy.raw_fitness();

        assert_eq!(first, second);
        assert_eq!(first, third);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_new_instance_is_not_evaluated() {
        let function = |_: &Genotype<DoubleGene>| 1.0;
        let phenotype: Phenotype<DoubleGene, f64> =
            Phenotype::of(genotype(), 1, Arc::new(function), Arc::new(IdentityScaler));
        phenotype.evaluate();

        let other = phenotype.new_instance(genotype(), 4);
        assert!(phenotype.is_evaluated());
        assert!(!other.is_evaluated());
        assert_eq!(other.generation(), 4);
        assert_eq!(other.fitness(), 1.0);
    }

    #[test]
    fn test_age_and_validity() {
        let chromosome = Chromosome::of(vec![IntegerGene::of(10, 0, 5).unwrap()]).unwrap();
        let function = |_: &Genotype<IntegerGene>| 0i64;
        let phenotype: Phenotype<IntegerGene, i64> = Phenotype::of(
            Genotype::of(vec![chromosome]).unwrap(),
            3,
            Arc::new(function),
            Arc::new(IdentityScaler),
        );

        assert!(!phenotype.is_valid());
        assert_eq!(phenotype.age(3), 0);
        assert_eq!(phenotype.age(10), 7);
        assert_eq!(phenotype.age(1), 0);
    }
}
