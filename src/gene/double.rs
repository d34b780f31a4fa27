use std::fmt;

use super::{Gene, Mean};
use crate::chromosome::Chromosome;
use crate::error::{GeneticError, Result};
use crate::rng::RandomRegistry;

/// A floating point gene with random instances drawn from `[min, max)`.
///
/// # Examples
///
/// ```
/// use genevo::gene::{DoubleGene, Gene};
///
/// let gene = DoubleGene::of(0.5, 0.0, 1.0).unwrap();
/// assert!(gene.is_valid());
///
/// let chromosome = DoubleGene::chromosome(0.0, 10.0, 4).unwrap();
/// assert_eq!(chromosome.len(), 4);
/// ```
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DoubleGene {
    value: f64,
    min: f64,
    max: f64,
}

impl DoubleGene {
    /// Creates a gene with the given allele and range.
    ///
    /// The allele itself is not checked against the range; use
    /// [`Gene::is_valid`] for that.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if the range is empty or its width is not a
    /// finite `f64`.
    pub fn of(value: f64, min: f64, max: f64) -> Result<Self> {
        check_range(min, max)?;
        Ok(Self { value, min, max })
    }

    /// Creates a gene with a random allele in `[min, max)`.
    pub fn random(min: f64, max: f64) -> Result<Self> {
        check_range(min, max)?;
        Ok(Self {
            value: RandomRegistry::gen_range(min..max),
            min,
            max,
        })
    }

    /// Creates a chromosome of `length` random genes in `[min, max)`.
    pub fn chromosome(min: f64, max: f64, length: usize) -> Result<Chromosome<DoubleGene>> {
        let genes = (0..length)
            .map(|_| Self::random(min, max))
            .collect::<Result<Vec<_>>>()?;
        Chromosome::of(genes)
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }
}

fn check_range(min: f64, max: f64) -> Result<()> {
    if !min.is_finite() || !max.is_finite() || min >= max || !(max - min).is_finite() {
        return Err(GeneticError::InvalidArgument(format!(
            "Invalid gene range [{}, {})",
            min, max
        )));
    }
    Ok(())
}

impl Gene for DoubleGene {
    type Allele = f64;

    fn allele(&self) -> &f64 {
        &self.value
    }

    fn is_valid(&self) -> bool {
        self.value.is_finite() && self.value >= self.min && self.value <= self.max
    }

    fn new_instance(&self) -> Self {
        Self {
            value: RandomRegistry::gen_range(self.min..self.max),
            min: self.min,
            max: self.max,
        }
    }
}

impl Mean for DoubleGene {
    fn mean(&self, other: &Self) -> Self {
        Self {
            value: self.value / 2.0 + other.value / 2.0,
            min: self.min,
            max: self.max,
        }
    }
}

impl fmt::Display for DoubleGene {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::RandomEngine;

    #[test]
    fn test_invalid_range() {
        assert!(DoubleGene::of(0.0, 1.0, 1.0).is_err());
        assert!(DoubleGene::of(0.0, 2.0, 1.0).is_err());
        assert!(DoubleGene::random(f64::NEG_INFINITY, 1.0).is_err());
    }

    #[test]
    fn test_range_width_must_be_finite() {
        assert!(DoubleGene::of(0.0, -1e308, 1e308).is_err());
        assert!(DoubleGene::random(-1e308, 1e308).is_err());
        assert!(DoubleGene::chromosome(-f64::MAX, f64::MAX, 3).is_err());

        let gene = DoubleGene::random(-1e307, 1e307).unwrap();
        assert!(gene.is_valid());
    }

    #[test]
    fn test_validity() {
        assert!(DoubleGene::of(0.5, 0.0, 1.0).unwrap().is_valid());
        assert!(!DoubleGene::of(1.5, 0.0, 1.0).unwrap().is_valid());
        assert!(!DoubleGene::of(f64::NAN, 0.0, 1.0).unwrap().is_valid());
    }

    #[test]
    fn test_new_instance_keeps_range() {
        RandomRegistry::scope(RandomEngine::from_seed(3), || {
            let gene = DoubleGene::of(0.5, -2.0, 2.0).unwrap();
            for _ in 0..100 {
                let other = gene.new_instance();
                assert!(other.is_valid());
                assert_eq!(other.min(), -2.0);
                assert_eq!(other.max(), 2.0);
            }
        });
    }

    #[test]
    fn test_mean() {
        let a = DoubleGene::of(0.2, 0.0, 1.0).unwrap();
        let b = DoubleGene::of(0.6, 0.0, 1.0).unwrap();
        assert!((a.mean(&b).value() - 0.4).abs() < 1e-12);
    }
}
