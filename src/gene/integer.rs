use super::{Gene, Mean};
use crate::chromosome::Chromosome;
use crate::error::{GeneticError, Result};
use crate::rng::RandomRegistry;

/// An integer gene with random instances drawn from `[min, max]`.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IntegerGene {
    value: i64,
    min: i64,
    max: i64,
}

impl IntegerGene {
    /// # Errors
    ///
    /// Returns `InvalidArgument` if `min > max`.
    pub fn of(value: i64, min: i64, max: i64) -> Result<Self> {
        check_range(min, max)?;
        Ok(Self { value, min, max })
    }

    pub fn random(min: i64, max: i64) -> Result<Self> {
        check_range(min, max)?;
        Ok(Self {
            value: RandomRegistry::gen_range(min..=max),
            min,
            max,
        })
    }

    pub fn chromosome(min: i64, max: i64, length: usize) -> Result<Chromosome<IntegerGene>> {
        let genes = (0..length)
            .map(|_| Self::random(min, max))
            .collect::<Result<Vec<_>>>()?;
        Chromosome::of(genes)
    }

    pub fn value(&self) -> i64 {
        self.value
    }

    pub fn min(&self) -> i64 {
        self.min
    }

    pub fn max(&self) -> i64 {
        self.max
    }
}

fn check_range(min: i64, max: i64) -> Result<()> {
    if min > max {
        return Err(GeneticError::InvalidArgument(format!(
            "Invalid gene range [{}, {}]",
            min, max
        )));
    }
    Ok(())
}

impl Gene for IntegerGene {
    type Allele = i64;

    fn allele(&self) -> &i64 {
        &self.value
    }

    fn is_valid(&self) -> bool {
        (self.min..=self.max).contains(&self.value)
    }

    fn new_instance(&self) -> Self {
        Self {
            value: RandomRegistry::gen_range(self.min..=self.max),
            min: self.min,
            max: self.max,
        }
    }
}

impl Mean for IntegerGene {
    fn mean(&self, other: &Self) -> Self {
        // Widened so the sum cannot overflow.
        let mean = (i128::from(self.value) + i128::from(other.value)) / 2;
        Self {
            value: mean as i64,
            min: self.min,
            max: self.max,
        }
    }
}
