use crate::alteration::mutator::{mutate_population, GeneMutation};
use crate::alteration::Alterer;
use crate::error::{check_probability, Result};
use crate::fitness::Fitness;
use crate::gene::Gene;
use crate::index_stream::IndexStream;
use crate::population::Population;
use crate::rng::RandomRegistry;
use crate::seq::MSeq;

/// Swaps selected genes with a randomly chosen gene of the same chromosome.
///
/// The multiset of genes of every chromosome is preserved, which makes this
/// mutator suitable for permutation encodings. Chromosomes with a single
/// gene are never changed.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SwapMutator {
    probability: f64,
}

impl SwapMutator {
    /// # Errors
    ///
    /// Returns `InvalidArgument` if `probability` is not in `[0, 1]`.
    pub fn new(probability: f64) -> Result<Self> {
        Ok(Self {
            probability: check_probability(probability, "Mutation probability")?,
        })
    }
}

impl Default for SwapMutator {
    fn default() -> Self {
        Self { probability: 0.01 }
    }
}

impl<G: Gene> GeneMutation<G> for SwapMutator {
    fn mutate_genes(&self, genes: &mut MSeq<G>, probability: f64) -> Result<usize> {
        if genes.len() < 2 {
            return Ok(0);
        }
        let mut count = 0;
        for i in IndexStream::new(genes.len(), probability)? {
            let j = RandomRegistry::gen_range(0..genes.len());
            genes.swap(i, j)?;
            count += 1;
        }
        Ok(count)
    }
}

impl<G: Gene, C: Fitness> Alterer<G, C> for SwapMutator {
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
    use crate::gene::IntegerGene;
    use crate::rng::RandomEngine;

    #[test]
    fn test_swap_preserves_genes() {
        let mut genes: MSeq<IntegerGene> =
            (0..10).map(|v| IntegerGene::of(v, 0, 9).unwrap()).collect();

        let count = RandomRegistry::scope(RandomEngine::from_seed(6), || {
            SwapMutator::default().mutate_genes(&mut genes, 1.0).unwrap()
        });
        assert_eq!(count, 10);

        let mut alleles: Vec<i64> = genes.iter().map(|g| g.value()).collect();
        alleles.sort_unstable();
        assert_eq!(alleles, (0..10).collect::<Vec<i64>>());
    }

    #[test]
    fn test_single_gene_is_never_swapped() {
        let mut genes: MSeq<IntegerGene> = vec![IntegerGene::of(1, 0, 9).unwrap()].into();
        assert_eq!(SwapMutator::default().mutate_genes(&mut genes, 1.0).unwrap(), 0);
    }

    #[test]
    fn test_alter_keeps_gene_values_per_individual() {
        let mut population = double_population(10, 6);
        let before = values(&population);
        let altered = RandomRegistry::scope(RandomEngine::from_seed(2), || {
            SwapMutator::new(1.0).unwrap().alter(&mut population, 3).unwrap()
        });
        assert_eq!(altered, 60);

        for (mut a, mut b) in before.into_iter().zip(values(&population)) {
            a.sort_by(|x, y| x.partial_cmp(y).unwrap());
            b.sort_by(|x, y| x.partial_cmp(y).unwrap());
            assert_eq!(a, b);
        }
    }
}
