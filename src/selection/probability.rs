//! Selection proportional to a per-phenotype probability.
//!
//! A [`ProbabilitySelector`] only computes the probability array; drawing is
//! shared by all implementations:
//!
//! 1. The population is sorted best-first if the selector works on ranks.
//! 2. The probabilities are checked to be non-negative and to sum to one.
//! 3. For minimization problems the probabilities of unsorted selectors are
//!    inverted, so that low fitness values get the high probabilities.
//! 4. The array is turned into its prefix sums and every draw binary-searches
//!    it with a uniform value from `[0, 1)`.

use std::borrow::Cow;
use std::fmt::Debug;

use crate::error::{GeneticError, Result};
use crate::fitness::Fitness;
use crate::gene::Gene;
use crate::optimize::Optimize;
use crate::population::Population;
use crate::rng::RandomRegistry;

/// Largest accepted distance, in units in the last place, between the sum
/// of a probability array and `1.0`.
pub const MAX_ULP_DISTANCE: u64 = 10_000_000_000;

/// A selector defined by the probability of each phenotype to be selected.
pub trait ProbabilitySelector<G: Gene, C: Fitness>: Debug + Send + Sync {
    /// Returns one probability per phenotype of `population`, in population
    /// order. The probabilities must be non-negative and sum to one.
    ///
    /// Higher fitness values must get higher probabilities; minimization is
    /// handled by the caller. If [`sorted`](Self::sorted) returns `true`,
    /// `population` is ordered best-first.
    fn probabilities(&self, population: &Population<G, C>, count: usize) -> Result<Vec<f64>>;

    /// Whether [`probabilities`](Self::probabilities) expects a population
    /// sorted best-first.
    fn sorted(&self) -> bool {
        false
    }
}

/// Draws `count` phenotypes according to the probabilities of `selector`.
pub(crate) fn select_by_probability<G, C, S>(
    selector: &S,
    population: &Population<G, C>,
    count: usize,
    optimize: Optimize,
) -> Result<Population<G, C>>
where
    G: Gene,
    C: Fitness,
    S: ProbabilitySelector<G, C> + ?Sized,
{
    if count == 0 {
        return Ok(Population::new());
    }
    if population.is_empty() {
        return Err(GeneticError::EmptyPopulation);
    }

    let population = if selector.sorted() {
        let mut sorted = population.clone();
        sorted.sort_with(optimize);
        Cow::Owned(sorted)
    } else {
        Cow::Borrowed(population)
    };

    let mut probabilities = selector.probabilities(&population, count)?;
    check_probabilities(&probabilities, population.len())?;

    if optimize == Optimize::Minimum && !selector.sorted() {
        invert(&mut probabilities);
    }
    incremental(&mut probabilities);

    Ok((0..count)
        .map(|_| population[index_of(&probabilities, RandomRegistry::next_f64())].clone())
        .collect())
}

fn check_probabilities(probabilities: &[f64], length: usize) -> Result<()> {
    if probabilities.len() != length {
        return Err(GeneticError::NumericInvariant(format!(
            "Expected {} probabilities, got {}",
            length,
            probabilities.len()
        )));
    }
    if let Some(p) = probabilities.iter().find(|p| !p.is_finite() || **p < 0.0) {
        return Err(GeneticError::NumericInvariant(format!(
            "Probabilities must be finite and non-negative, found {}",
            p
        )));
    }
    let sum: f64 = probabilities.iter().sum();
    if !sum_to_one(sum) {
        return Err(GeneticError::NumericInvariant(format!(
            "Probabilities must sum to one, sum is {}",
            sum
        )));
    }
    Ok(())
}

/// Maps each probability `w` to `(1 - w) / (n - 1)`.
///
/// The result is again a distribution and reverses the order of the weights.
fn invert(probabilities: &mut [f64]) {
    let n = probabilities.len();
    if n == 1 {
        probabilities[0] = 1.0;
        return;
    }
    let divisor = (n - 1) as f64;
    for p in probabilities.iter_mut() {
        *p = (1.0 - *p) / divisor;
    }
}

/// Replaces every value by the sum of itself and all values before it.
fn incremental(values: &mut [f64]) {
    for i in 1..values.len() {
        values[i] += values[i - 1];
    }
}

/// Returns the smallest index `i` with `incremental[i] >= value`, or the last
/// index if there is none.
///
/// `incremental` must be non-empty and non-decreasing. The search takes
/// `O(log n)` steps and is monotonic in `value`.
///
/// # Examples
///
/// ```
/// use genevo::selection::index_of;
///
/// let incremental = [0.1, 0.5, 0.5, 1.0];
/// assert_eq!(index_of(&incremental, 0.05), 0);
/// assert_eq!(index_of(&incremental, 0.3), 1);
/// assert_eq!(index_of(&incremental, 0.7), 3);
/// assert_eq!(index_of(&incremental, 1.5), 3);
/// ```
pub fn index_of(incremental: &[f64], value: f64) -> usize {
    let index = incremental.partition_point(|&c| c < value);
    index.min(incremental.len().saturating_sub(1))
}

/// Position of `value` in the ordered sequence of all `f64` bit patterns.
fn ulp_position(value: f64) -> i64 {
    let bits = value.to_bits() as i64;
    if bits < 0 {
        i64::MIN.wrapping_sub(bits)
    } else {
        bits
    }
}

/// Number of representable `f64` values between `a` and `b`.
pub(crate) fn ulp_distance(a: f64, b: f64) -> u64 {
    let distance = i128::from(ulp_position(a)) - i128::from(ulp_position(b));
    u64::try_from(distance.unsigned_abs()).unwrap_or(u64::MAX)
}

pub(crate) fn sum_to_one(sum: f64) -> bool {
    sum.is_finite() && ulp_distance(sum, 1.0) <= MAX_ULP_DISTANCE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ulp_distance() {
        assert_eq!(ulp_distance(1.0, 1.0), 0);
        assert_eq!(ulp_distance(1.0, 1.0 + f64::EPSILON), 1);
        assert_eq!(ulp_distance(0.0, -0.0), 0);
        assert_eq!(ulp_distance(-1.0, 1.0), ulp_distance(1.0, -1.0));
        assert!(ulp_distance(f64::MIN, f64::MAX) > 0);
    }

    #[test]
    fn test_sum_to_one_tolerates_rounding() {
        let sum: f64 = (0..10).map(|_| 0.1).sum();
        assert_ne!(sum, 1.0);
        assert!(sum_to_one(sum));
        assert!(!sum_to_one(0.9));
        assert!(!sum_to_one(f64::NAN));
    }

    #[test]
    fn test_invert_keeps_distribution() {
        let mut probabilities = vec![0.1, 0.2, 0.3, 0.4];
        invert(&mut probabilities);
        assert!(sum_to_one(probabilities.iter().sum()));
        assert!(probabilities.windows(2).all(|w| w[0] > w[1]));

        let mut single = vec![1.0];
        invert(&mut single);
        assert_eq!(single, vec![1.0]);
    }

    #[test]
    fn test_incremental() {
        let mut values = vec![0.25, 0.25, 0.5];
        incremental(&mut values);
        assert_eq!(values, vec![0.25, 0.5, 1.0]);
    }

    #[test]
    fn test_index_of_picks_first_reaching_bucket() {
        let incremental = [0.2, 0.2, 0.6, 1.0];
        assert_eq!(index_of(&incremental, 0.0), 0);
        assert_eq!(index_of(&incremental, 0.2), 0);
        assert_eq!(index_of(&incremental, 0.21), 2);
        assert_eq!(index_of(&incremental, 0.99), 3);
        assert_eq!(index_of(&incremental, 1.01), 3);
    }

    #[test]
    fn test_check_probabilities() {
        assert!(check_probabilities(&[0.5, 0.5], 2).is_ok());
        assert!(matches!(
            check_probabilities(&[0.5, 0.5], 3),
            Err(GeneticError::NumericInvariant(_))
        ));
        assert!(matches!(
            check_probabilities(&[1.5, -0.5], 2),
            Err(GeneticError::NumericInvariant(_))
        ));
        assert!(matches!(
            check_probabilities(&[0.3, 0.3], 2),
            Err(GeneticError::NumericInvariant(_))
        ));
    }
}
