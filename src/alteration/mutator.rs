//! Gene mutation.
//!
//! A mutation probability `p` is spread over the three levels a mutation
//! passes through (individual, chromosome, gene): each level selects with
//! probability `p^(1/3)`, using an [`IndexStream`] per level.

use std::fmt::Debug;

use crate::alteration::Alterer;
use crate::error::{check_probability, Result};
use crate::fitness::Fitness;
use crate::gene::Gene;
use crate::genotype::Genotype;
use crate::index_stream::IndexStream;
use crate::population::Population;
use crate::seq::MSeq;

/// The gene-level part of a mutation operator.
pub trait GeneMutation<G: Gene>: Debug + Send + Sync {
    /// Mutates the genes of one chromosome, each with probability
    /// `probability`, and returns the number of mutated genes.
    fn mutate_genes(&self, genes: &mut MSeq<G>, probability: f64) -> Result<usize>;
}

/// Applies `mutation` hierarchically to `population`.
///
/// Individuals with at least one mutated gene are replaced by new phenotypes
/// born in `generation`.
pub(crate) fn mutate_population<G, C, M>(
    mutation: &M,
    probability: f64,
    population: &mut Population<G, C>,
    generation: u64,
) -> Result<usize>
where
    G: Gene,
    C: Fitness,
    M: GeneMutation<G> + ?Sized,
{
    let p = probability.cbrt();
    let mut alterations = 0;

    for i in IndexStream::new(population.len(), p)? {
        let phenotype = population[i].clone();
        let genotype = phenotype.genotype();
        let mut chromosomes = genotype.chromosomes().copy();
        let mut mutations = 0;

        for c in IndexStream::new(genotype.len(), p)? {
            let mut genes = chromosomes[c].genes().copy();
            let count = mutation.mutate_genes(&mut genes, p)?;
            if count > 0 {
                let chromosome = chromosomes[c].with_genes(genes.into_iseq())?;
                chromosomes.set(c, chromosome)?;
                mutations += count;
            }
        }

        if mutations > 0 {
            let genotype = Genotype::of(chromosomes.into_iseq())?;
            population.set(i, phenotype.new_instance(genotype, generation))?;
            alterations += mutations;
        }
    }
    Ok(alterations)
}

/// Replaces selected genes by new random instances of themselves.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mutator {
    probability: f64,
}

impl Mutator {
    /// # Errors
    ///
    /// Returns `InvalidArgument` if `probability` is not in `[0, 1]`.
    pub fn new(probability: f64) -> Result<Self> {
        Ok(Self {
            probability: check_probability(probability, "Mutation probability")?,
        })
    }
}

impl Default for Mutator {
    fn default() -> Self {
        Self { probability: 0.01 }
    }
}

impl<G: Gene> GeneMutation<G> for Mutator {
    fn mutate_genes(&self, genes: &mut MSeq<G>, probability: f64) -> Result<usize> {
        let mut count = 0;
        for i in IndexStream::new(genes.len(), probability)? {
            genes[i] = genes[i].new_instance();
            count += 1;
        }
        Ok(count)
    }
}

impl<G: Gene, C: Fitness> Alterer<G, C> for Mutator {
    fn alter(&self, population: &mut Population<G, C>, generation: u64) -> Result<usize> {
        mutate_population(self, self.probability, population, generation)
    }

    fn probability(&self) -> f64 {
        self.probability
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alteration::tests::{double_population, values};
    use crate::rng::{RandomEngine, RandomRegistry};

    #[test]
    fn test_invalid_probability() {
        assert!(Mutator::new(-0.1).is_err());
        assert!(Mutator::new(1.1).is_err());
    }

    #[test]
    fn test_zero_probability_never_mutates() {
        let mut population = double_population(20, 10);
        let before = values(&population);
        let originals: Vec<_> = population.iter().cloned().collect();

        let altered = Mutator::new(0.0).unwrap().alter(&mut population, 2).unwrap();

        assert_eq!(altered, 0);
        assert_eq!(values(&population), before);
        assert!(population
            .iter()
            .zip(&originals)
            .all(|(a, b)| a.ptr_eq(b)));
    }

    #[test]
    fn test_full_probability_mutates_every_gene() {
        let mut population = double_population(20, 10);
        let before = values(&population);

        let altered = RandomRegistry::scope(RandomEngine::from_seed(8), || {
            Mutator::new(1.0).unwrap().alter(&mut population, 2).unwrap()
        });

        assert_eq!(altered, 200);
        let after = values(&population);
        let changed = before
            .iter()
            .flatten()
            .zip(after.iter().flatten())
            .filter(|(a, b)| a != b)
            .count();
        assert!(changed > 190);
        assert!(population.iter().all(|pt| pt.generation() == 2));
    }

    #[test]
    fn test_mutation_rate_is_close_to_probability() {
        let mut population = double_population(1000, 20);
        let altered = RandomRegistry::scope(RandomEngine::from_seed(12), || {
            Mutator::new(0.125).unwrap().alter(&mut population, 2).unwrap()
        });

        // 20_000 genes, expected 2500 mutations with a standard deviation of about 140.
        assert!((1900..3100).contains(&altered), "{} mutations", altered);
    }
}
