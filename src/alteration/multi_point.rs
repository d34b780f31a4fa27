use crate::alteration::crossover::{crossover_pair, Crossover};
use crate::alteration::recombinator::recombine;
use crate::alteration::single_point::{random_cut, SinglePointCrossover};
use crate::alteration::Alterer;
use crate::error::{check_probability, GeneticError, Result};
use crate::fitness::Fitness;
use crate::gene::Gene;
use crate::population::Population;
use crate::rng::RandomRegistry;
use crate::seq::MSeq;

/// Multi-point crossover.
///
/// Draws `k = min(length, n)` distinct cut points and swaps every second
/// segment between them. With an odd number of points, the last segment
/// runs to the end of the sequences:
///
/// ```text
///     ---|++++|----|++        ---|----|----|--
///     +++|----|++++|--   =>   +++|++++|++++|++
/// ```
///
/// With `n = 1` this behaves exactly like [`SinglePointCrossover`].
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MultiPointCrossover {
    probability: f64,
    points: usize,
}

impl MultiPointCrossover {
    /// Creates a crossover with at most `points` cut points.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if `probability` is not in `[0, 1]` or
    /// `points` is zero.
    pub fn new(probability: f64, points: usize) -> Result<Self> {
        let probability = check_probability(probability, "Crossover probability")?;
        if points < 1 {
            return Err(GeneticError::InvalidArgument(
                "Multi-point crossover needs at least one cut point".to_string(),
            ));
        }
        Ok(Self { probability, points })
    }

    pub fn points(&self) -> usize {
        self.points
    }

    /// Swaps the segments `[points[0], points[1])`, `[points[2], points[3])`, ...
    /// between `that` and `other`. A trailing unpaired point swaps to the end
    /// of the shorter sequence.
    ///
    /// # Errors
    ///
    /// Returns an error if `points` is not increasing or exceeds the common
    /// length of both sequences.
    pub fn crossover_at<G: Gene>(
        that: &mut MSeq<G>,
        other: &mut MSeq<G>,
        points: &[usize],
    ) -> Result<()> {
        let length = that.len().min(other.len());
        for segment in points.chunks(2) {
            match *segment {
                [start, end] => that.swap_range(start, end, other, start)?,
                [start] => {
                    if start > length {
                        return Err(GeneticError::IndexOutOfBounds {
                            index: start,
                            length,
                        });
                    }
                    that.swap_range(start, length, other, start)?
                }
                _ => {}
            }
        }
        Ok(())
    }
}

impl Default for MultiPointCrossover {
    fn default() -> Self {
        Self {
            probability: 0.05,
            points: 2,
        }
    }
}

impl<G: Gene> Crossover<G> for MultiPointCrossover {
    fn crossover(&self, that: &mut MSeq<G>, other: &mut MSeq<G>) -> Result<usize> {
        let length = that.len().min(other.len());
        match self.points.min(length) {
            0 => {}
            1 => {
                if let Some(index) = random_cut(length) {
                    SinglePointCrossover::crossover_at(that, other, index)?;
                }
            }
            k => {
                let points = RandomRegistry::subset(length, k);
                Self::crossover_at(that, other, &points)?;
            }
        }
        Ok(2)
    }
}

impl<G: Gene, C: Fitness> Alterer<G, C> for MultiPointCrossover {
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
    fn test_invalid_arguments() {
        assert!(MultiPointCrossover::new(0.5, 0).is_err());
        assert!(MultiPointCrossover::new(1.5, 2).is_err());
        assert!(MultiPointCrossover::new(0.5, 1).is_ok());
    }

    #[test]
    fn test_even_number_of_points() {
        let mut that = seq(&[0, 0, 0, 0, 0, 0]);
        let mut other = seq(&[1, 1, 1, 1, 1, 1]);
        MultiPointCrossover::crossover_at(&mut that, &mut other, &[1, 3]).unwrap();
        assert_eq!(alleles(&that), vec![0, 1, 1, 0, 0, 0]);
        assert_eq!(alleles(&other), vec![1, 0, 0, 1, 1, 1]);
    }

    #[test]
    fn test_odd_number_of_points_swaps_to_end() {
        let mut that = seq(&[0, 0, 0, 0, 0, 0]);
        let mut other = seq(&[1, 1, 1, 1, 1, 1]);
        MultiPointCrossover::crossover_at(&mut that, &mut other, &[1, 2, 4]).unwrap();
        assert_eq!(alleles(&that), vec![0, 1, 0, 0, 1, 1]);
        assert_eq!(alleles(&other), vec![1, 0, 1, 1, 0, 0]);
    }

    #[test]
    fn test_invalid_points() {
        let mut that = seq(&[0, 0, 0]);
        let mut other = seq(&[1, 1, 1]);
        assert!(MultiPointCrossover::crossover_at(&mut that, &mut other, &[2, 1]).is_err());
        assert!(MultiPointCrossover::crossover_at(&mut that, &mut other, &[4]).is_err());
    }

    #[test]
    fn test_crossover_preserves_positions() {
        let crossover = MultiPointCrossover::new(1.0, 3).unwrap();
        RandomRegistry::scope(RandomEngine::from_seed(4), || {
            for _ in 0..20 {
                let mut that = seq(&[0; 10]);
                let mut other = seq(&[1; 10]);
                crossover.crossover(&mut that, &mut other).unwrap();
                for (a, b) in alleles(&that).into_iter().zip(alleles(&other)) {
                    assert_eq!(a + b, 1);
                }
            }
        });
    }

    #[test]
    fn test_one_point_matches_single_point() {
        let single = SinglePointCrossover::new(0.7).unwrap();
        let multi = MultiPointCrossover::new(0.7, 1).unwrap();
        let population = double_population(12, 8);

        let mut a = population.clone();
        let mut b = population.clone();
        let altered_a = RandomRegistry::scope(RandomEngine::from_seed(99), || {
            single.alter(&mut a, 2).unwrap()
        });
        let altered_b = RandomRegistry::scope(RandomEngine::from_seed(99), || {
            multi.alter(&mut b, 2).unwrap()
        });

        assert_eq!(altered_a, altered_b);
        assert_eq!(values(&a), values(&b));
    }
}
