use crate::alteration::crossover::{crossover_pair, Crossover};
use crate::alteration::recombinator::recombine;
use crate::alteration::Alterer;
use crate::error::{check_probability, GeneticError, Result};
use crate::fitness::Fitness;
use crate::gene::Gene;
use crate::population::Population;
use crate::rng::RandomRegistry;
use crate::seq::MSeq;

/// Single-point crossover.
///
/// A cut index is drawn from `[1, length)` and the gene suffixes of both
/// sequences starting at the cut are swapped:
///
/// ```text
///     -----|-----        ----|++++
///     +++++|+++++   =>   ++++|-----
/// ```
///
/// Sequences with fewer than two genes are never changed.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SinglePointCrossover {
    probability: f64,
}

impl SinglePointCrossover {
    /// # Errors
    ///
    /// Returns `InvalidArgument` if `probability` is not in `[0, 1]`.
    pub fn new(probability: f64) -> Result<Self> {
        Ok(Self {
            probability: check_probability(probability, "Crossover probability")?,
        })
    }

    /// Swaps the genes of `that` and `other` from `index` to the end of the
    /// shorter sequence.
    ///
    /// Cutting at `0` or at the common length leaves both sequences unchanged.
    ///
    /// # Errors
    ///
    /// Returns `IndexOutOfBounds` if `index` exceeds the common length.
    ///
    /// # Examples
    ///
    /// ```
    /// use genevo::alteration::SinglePointCrossover;
    /// use genevo::gene::BitGene;
    /// use genevo::seq::MSeq;
    ///
    /// let mut that: MSeq<BitGene> = vec![BitGene::FALSE; 4].into();
    /// let mut other: MSeq<BitGene> = vec![BitGene::TRUE; 4].into();
    /// SinglePointCrossover::crossover_at(&mut that, &mut other, 3).unwrap();
    ///
    /// let bits: Vec<bool> = that.iter().map(|g| g.bit()).collect();
    /// assert_eq!(bits, vec![false, false, false, true]);
    /// ```
    pub fn crossover_at<G: Gene>(
        that: &mut MSeq<G>,
        other: &mut MSeq<G>,
        index: usize,
    ) -> Result<()> {
        let length = that.len().min(other.len());
        if index > length {
            return Err(GeneticError::IndexOutOfBounds { index, length });
        }
        if index == 0 || index == length {
            return Ok(());
        }
        that.swap_range(index, length, other, index)
    }
}

impl Default for SinglePointCrossover {
    fn default() -> Self {
        Self { probability: 0.05 }
    }
}

/// Draws a cut index from `[1, length)`, or `None` if `length < 2`.
pub(crate) fn random_cut(length: usize) -> Option<usize> {
    if length < 2 {
        None
    } else {
        Some(RandomRegistry::gen_range(1..length))
    }
}

impl<G: Gene> Crossover<G> for SinglePointCrossover {
    fn crossover(&self, that: &mut MSeq<G>, other: &mut MSeq<G>) -> Result<usize> {
        if let Some(index) = random_cut(that.len().min(other.len())) {
            Self::crossover_at(that, other, index)?;
        }
        Ok(2)
    }
}

impl<G: Gene, C: Fitness> Alterer<G, C> for SinglePointCrossover {
    fn alter(&self, population: &mut Population<G, C>, generation: u64) -> Result<usize> {
        recombine(population, self.probability, |population, first, second| {
            crossover_pair(self, population, first, second, generation)
        })
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

    fn seq(values: &[i64]) -> MSeq<IntegerGene> {
        values
            .iter()
            .map(|&v| IntegerGene::of(v, 0, 100).unwrap())
            .collect()
    }

    fn alleles(seq: &MSeq<IntegerGene>) -> Vec<i64> {
        seq.iter().map(|g| g.value()).collect()
    }

    #[test]
    fn test_invalid_probability() {
        assert!(SinglePointCrossover::new(1.5).is_err());
        assert!(SinglePointCrossover::new(-0.5).is_err());
    }

    #[test]
    fn test_crossover_at() {
        let mut that = seq(&[1, 2, 3, 4, 5]);
        let mut other = seq(&[6, 7, 8, 9, 10]);
        SinglePointCrossover::crossover_at(&mut that, &mut other, 2).unwrap();
        assert_eq!(alleles(&that), vec![1, 2, 8, 9, 10]);
        assert_eq!(alleles(&other), vec![6, 7, 3, 4, 5]);
    }

    #[test]
    fn test_crossover_at_edges_is_noop() {
        for index in [0, 5] {
            let mut that = seq(&[1, 2, 3, 4, 5]);
            let mut other = seq(&[6, 7, 8, 9, 10]);
            SinglePointCrossover::crossover_at(&mut that, &mut other, index).unwrap();
            assert_eq!(alleles(&that), vec![1, 2, 3, 4, 5]);
            assert_eq!(alleles(&other), vec![6, 7, 8, 9, 10]);
        }

        let mut that = seq(&[1, 2]);
        let mut other = seq(&[3, 4]);
        assert!(SinglePointCrossover::crossover_at(&mut that, &mut other, 3).is_err());
    }

    #[test]
    fn test_crossover_with_different_lengths() {
        let mut that = seq(&[1, 2, 3, 4, 5]);
        let mut other = seq(&[6, 7, 8]);
        SinglePointCrossover::crossover_at(&mut that, &mut other, 1).unwrap();
        assert_eq!(alleles(&that), vec![1, 7, 8, 4, 5]);
        assert_eq!(alleles(&other), vec![6, 2, 3]);
    }

    #[test]
    fn test_single_gene_is_never_crossed() {
        let mut that = seq(&[1]);
        let mut other = seq(&[2]);
        let altered = SinglePointCrossover::default()
            .crossover(&mut that, &mut other)
            .unwrap();
        assert_eq!(altered, 2);
        assert_eq!(alleles(&that), vec![1]);
    }

    #[test]
    fn test_alter_counts_two_per_pair() {
        let mut population = double_population(10, 5);
        let before = values(&population);
        let crossover = SinglePointCrossover::new(1.0).unwrap();

        let altered = RandomRegistry::scope(RandomEngine::from_seed(17), || {
            crossover.alter(&mut population, 2).unwrap()
        });

        assert_eq!(altered % 2, 0);
        assert!(altered <= 20);
        assert_eq!(population.len(), 10);

        // Crossover only moves genes around.
        let mut genes_before: Vec<f64> = before.into_iter().flatten().collect();
        let mut genes_after: Vec<f64> = values(&population).into_iter().flatten().collect();
        genes_before.sort_by(|a, b| a.partial_cmp(b).unwrap());
        genes_after.sort_by(|a, b| a.partial_cmp(b).unwrap());
        assert_eq!(genes_before, genes_after);
    }

    #[test]
    fn test_full_probability_pairs_half_the_population() {
        let mut population = double_population(1000, 3);
        let crossover = SinglePointCrossover::new(1.0).unwrap();
        let altered = RandomRegistry::scope(RandomEngine::from_seed(1), || {
            crossover.alter(&mut population, 2).unwrap()
        });
        // About 1000 / 2 pairs, two altered individuals each.
        assert!((880..=1120).contains(&altered), "{} alterations", altered);
    }

    #[test]
    fn test_zero_probability_alters_nothing() {
        let mut population = double_population(10, 5);
        let altered = SinglePointCrossover::new(0.0)
            .unwrap()
            .alter(&mut population, 2)
            .unwrap();
        assert_eq!(altered, 0);
        assert!(population.iter().all(|pt| pt.generation() == 1));
    }
}
