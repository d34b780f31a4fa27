use crate::alteration::recombinator::recombine;
use crate::alteration::Alterer;
use crate::error::{check_probability, GeneticError, Result};
use crate::fitness::Fitness;
use crate::gene::Mean;
use crate::genotype::Genotype;
use crate::population::Population;
use crate::rng::RandomRegistry;
use crate::seq::ISeq;

/// Blend recombination for numeric genes.
///
/// For every selected pair, one chromosome index is drawn and the genes of
/// the first individual's chromosome are replaced by the mean of both
/// parents' genes. Only the first individual is replaced, so every
/// recombination counts as one alteration.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeanAlterer {
    probability: f64,
}

impl MeanAlterer {
    /// # Errors
    ///
    /// Returns `InvalidArgument` if `probability` is not in `[0, 1]`.
    pub fn new(probability: f64) -> Result<Self> {
        Ok(Self {
            probability: check_probability(probability, "Mean alterer probability")?,
        })
    }

    /// Replaces the individual at `first` by its blend with the individual
    /// at `second`, born in `generation`. Returns the number of replaced
    /// individuals.
    ///
    /// # Errors
    ///
    /// Returns `IndexOutOfBounds` if either index is outside the population.
    pub fn mean_at<G: Mean, C: Fitness>(
        population: &mut Population<G, C>,
        first: usize,
        second: usize,
        generation: u64,
    ) -> Result<usize> {
        let length = population.len();
        if first >= length || second >= length {
            return Err(GeneticError::IndexOutOfBounds {
                index: first.max(second),
                length,
            });
        }

        let pt1 = population[first].clone();
        let pt2 = population[second].clone();
        let (gt1, gt2) = (pt1.genotype(), pt2.genotype());

        let index = RandomRegistry::gen_range(0..gt1.len().min(gt2.len()));
        let that = gt1.chromosome(index);
        let other = gt2.chromosome(index);

        // Genes beyond the partner's length are kept as they are.
        let genes: ISeq<_> = that
            .iter()
            .zip(other.iter())
            .map(|(a, b)| a.mean(b))
            .chain(that.iter().skip(other.len()).cloned())
            .collect();

        let mut chromosomes = gt1.chromosomes().copy();
        chromosomes.set(index, that.with_genes(genes)?)?;
        population.set(
            first,
            pt1.new_instance(Genotype::of(chromosomes.into_iseq())?, generation),
        )?;
        Ok(1)
    }
}

impl Default for MeanAlterer {
    fn default() -> Self {
        Self { probability: 0.05 }
    }
}

impl<G: Mean, C: Fitness> Alterer<G, C> for MeanAlterer {
    fn alter(&self, population: &mut Population<G, C>, generation: u64) -> Result<usize> {
        recombine(population, self.probability, |population, first, second| {
            Self::mean_at(population, first, second, generation)
        })
    }

    fn probability(&self) -> f64 {
        self.probability
    }
}
