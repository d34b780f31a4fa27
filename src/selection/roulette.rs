use crate::error::Result;
use crate::fitness::NumericFitness;
use crate::gene::Gene;
use crate::optimize::Optimize;
use crate::population::Population;
use crate::selection::probability::{select_by_probability, ProbabilitySelector};
use crate::selection::Selector;

/// Fitness-proportional selection.
///
/// Each phenotype is selected with a probability proportional to its fitness.
/// If the population contains negative fitness values, all values are shifted
/// by the smallest one first. If every (shifted) fitness is zero, selection is
/// uniform.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use genevo::fitness::IdentityScaler;
/// use genevo::gene::{Gene, IntegerGene};
/// use genevo::genotype::Genotype;
/// use genevo::optimize::Optimize;
/// use genevo::phenotype::Phenotype;
/// use genevo::population::Population;
/// use genevo::selection::{RouletteWheelSelector, Selector};
///
/// let function = Arc::new(|gt: &Genotype<IntegerGene>| *gt.gene().allele());
/// let population: Population<IntegerGene, i64> = (1..=5)
///     .map(|value| {
///         let chromosome = genevo::chromosome::Chromosome::of(vec![
///             IntegerGene::of(value, 0, 10).unwrap(),
///         ])
///         .unwrap();
///         Phenotype::of(
///             Genotype::of(vec![chromosome]).unwrap(),
///             1,
///             function.clone(),
///             Arc::new(IdentityScaler),
///         )
///     })
///     .collect();
///
/// let selected = RouletteWheelSelector::new()
///     .select(&population, 3, Optimize::Maximum)
///     .unwrap();
/// assert_eq!(selected.len(), 3);
/// ```
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, Default)]
pub struct RouletteWheelSelector;

impl RouletteWheelSelector {
    pub fn new() -> Self {
        Self
    }
}

impl<G: Gene, C: NumericFitness> ProbabilitySelector<G, C> for RouletteWheelSelector {
    fn probabilities(&self, population: &Population<G, C>, _count: usize) -> Result<Vec<f64>> {
        let fitness: Vec<f64> = population.iter().map(|pt| pt.fitness().to_f64()).collect();

        // Negative values would produce negative probabilities.
        let offset = fitness.iter().copied().fold(0.0, f64::min);
        let shifted: Vec<f64> = fitness.iter().map(|f| f - offset).collect();
        let sum: f64 = shifted.iter().sum();

        if sum.is_finite() && sum > 0.0 {
            Ok(shifted.into_iter().map(|f| f / sum).collect())
        } else {
            let uniform = 1.0 / population.len() as f64;
            Ok(vec![uniform; population.len()])
        }
    }
}

impl<G: Gene, C: NumericFitness> Selector<G, C> for RouletteWheelSelector {
    fn select(
        &self,
        population: &Population<G, C>,
        count: usize,
        optimize: Optimize,
    ) -> Result<Population<G, C>> {
        select_by_probability(self, population, count, optimize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gene::IntegerGene;
    use crate::population::tests::population_of;
    use crate::rng::{RandomEngine, RandomRegistry};

    fn probabilities(values: &[i64]) -> Vec<f64> {
        ProbabilitySelector::<IntegerGene, i64>::probabilities(
            &RouletteWheelSelector,
            &population_of(values),
            1,
        )
        .unwrap()
    }

    #[test]
    fn test_probabilities_are_proportional() {
        let p = probabilities(&[1, 3]);
        assert!((p[0] - 0.25).abs() < 1e-12);
        assert!((p[1] - 0.75).abs() < 1e-12);
    }

    #[test]
    fn test_negative_fitness_is_shifted() {
        let p = probabilities(&[-2, 0, 2]);
        assert_eq!(p[0], 0.0);
        assert!((p[1] - 2.0 / 6.0).abs() < 1e-12);
        assert!((p[2] - 4.0 / 6.0).abs() < 1e-12);
    }

    #[test]
    fn test_zero_fitness_is_uniform() {
        let p = probabilities(&[0, 0, 0, 0]);
        assert_eq!(p, vec![0.25; 4]);
    }

    #[test]
    fn test_selection_prefers_fitter() {
        let population = population_of(&[1, 1000]);
        let selected = RandomRegistry::scope(RandomEngine::from_seed(3), || {
            RouletteWheelSelector
                .select(&population, 100, Optimize::Maximum)
                .unwrap()
        });
        let fittest = selected.iter().filter(|pt| pt.fitness() == 1000).count();
        assert!(fittest > 90);

        let selected = RandomRegistry::scope(RandomEngine::from_seed(3), || {
            RouletteWheelSelector
                .select(&population, 100, Optimize::Minimum)
                .unwrap()
        });
        let fittest = selected.iter().filter(|pt| pt.fitness() == 1).count();
        assert!(fittest > 90);
    }

    #[test]
    fn test_zero_count_and_empty_population() {
        let population = population_of(&[1, 2]);
        assert!(RouletteWheelSelector
            .select(&population, 0, Optimize::Maximum)
            .unwrap()
            .is_empty());
        assert!(RouletteWheelSelector
            .select(&population_of(&[]), 2, Optimize::Maximum)
            .is_err());
    }
}
