//! Genotypes and genotype factories.

use std::fmt;
use std::sync::OnceLock;

use crate::chromosome::Chromosome;
use crate::error::{GeneticError, Result};
use crate::gene::Gene;
use crate::seq::ISeq;

/// Creates new instances of `T`.
///
/// Implemented for [`Genotype`] (which produces random genotypes of its own
/// shape) and for any `Fn() -> T` closure.
pub trait Factory<T>: Send + Sync {
    fn new_instance(&self) -> T;
}

impl<T, F> Factory<T> for F
where
    F: Fn() -> T + Send + Sync,
{
    fn new_instance(&self) -> T {
        self()
    }
}

/// An immutable, non-empty sequence of chromosomes encoding one candidate
/// solution.
///
/// # Examples
///
/// ```
/// use genevo::gene::DoubleGene;
/// use genevo::genotype::{Factory, Genotype};
///
/// let genotype = Genotype::of(vec![
///     DoubleGene::chromosome(0.0, 1.0, 3).unwrap(),
///     DoubleGene::chromosome(-1.0, 1.0, 2).unwrap(),
/// ])
/// .unwrap();
///
/// let other = genotype.new_instance();
/// assert_eq!(other.len(), 2);
/// assert_eq!(other.gene_count(), 5);
/// ```
#[derive(Clone)]
pub struct Genotype<G: Gene> {
    chromosomes: ISeq<Chromosome<G>>,
    valid: OnceLock<bool>,
}

impl<G: Gene> Genotype<G> {
    /// # Errors
    ///
    /// Returns `InvalidArgument` if `chromosomes` is empty.
    pub fn of(chromosomes: impl Into<ISeq<Chromosome<G>>>) -> Result<Self> {
        let chromosomes = chromosomes.into();
        if chromosomes.is_empty() {
            return Err(GeneticError::InvalidArgument(
                "A genotype must contain at least one chromosome".to_string(),
            ));
        }
        Ok(Self {
            chromosomes,
            valid: OnceLock::new(),
        })
    }

    /// Number of chromosomes.
    pub fn len(&self) -> usize {
        self.chromosomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chromosomes.is_empty()
    }

    /// Total number of genes over all chromosomes.
    pub fn gene_count(&self) -> usize {
        self.chromosomes.iter().map(Chromosome::len).sum()
    }

    /// Returns the chromosome at `index`.
    ///
    /// Panics if `index` is out of bounds.
    pub fn chromosome(&self, index: usize) -> &Chromosome<G> {
        &self.chromosomes[index]
    }

    pub fn get(&self, index: usize) -> Option<&Chromosome<G>> {
        self.chromosomes.get(index)
    }

    /// The first gene of the first chromosome.
    pub fn gene(&self) -> &G {
        self.chromosomes[0].gene(0)
    }

    pub fn chromosomes(&self) -> &ISeq<Chromosome<G>> {
        &self.chromosomes
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Chromosome<G>> {
        self.chromosomes.iter()
    }

    pub fn is_valid(&self) -> bool {
        *self
            .valid
            .get_or_init(|| self.chromosomes.iter().all(Chromosome::is_valid))
    }

    /// Creates a genotype of the same shape with random genes.
    pub fn new_instance(&self) -> Self {
        Self {
            chromosomes: self.chromosomes.map(Chromosome::new_instance),
            valid: OnceLock::new(),
        }
    }
}

impl<G: Gene> Factory<Genotype<G>> for Genotype<G> {
    fn new_instance(&self) -> Genotype<G> {
        Genotype::new_instance(self)
    }
}

impl<G: Gene> PartialEq for Genotype<G> {
    fn eq(&self, other: &Self) -> bool {
        self.chromosomes == other.chromosomes
    }
}

impl<G: Gene> fmt::Debug for Genotype<G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.chromosomes.iter()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gene::{DoubleGene, IntegerGene};
    use crate::rng::{RandomEngine, RandomRegistry};

    #[test]
    fn test_empty_genotype_is_rejected() {
        assert!(Genotype::<DoubleGene>::of(Vec::new()).is_err());
    }

    #[test]
    fn test_validity() {
        let valid = Chromosome::of(vec![IntegerGene::of(1, 0, 2).unwrap()]).unwrap();
        let invalid = Chromosome::of(vec![IntegerGene::of(3, 0, 2).unwrap()]).unwrap();

        assert!(Genotype::of(vec![valid.clone()]).unwrap().is_valid());
        assert!(!Genotype::of(vec![valid, invalid]).unwrap().is_valid());
    }

    #[test]
    fn test_factory_is_reproducible_in_scope() {
        let template = Genotype::of(vec![DoubleGene::chromosome(0.0, 1.0, 4).unwrap()]).unwrap();
        let factory: &dyn Factory<Genotype<DoubleGene>> = &template;

        let a = RandomRegistry::scope(RandomEngine::from_seed(9), || factory.new_instance());
        let b = RandomRegistry::scope(RandomEngine::from_seed(9), || factory.new_instance());
        assert_eq!(a, b);
        assert_ne!(a, template);
    }

    #[test]
    fn test_closure_factory() {
        let factory = || Genotype::of(vec![DoubleGene::chromosome(0.0, 1.0, 1).unwrap()]).unwrap();
        let genotype = Factory::new_instance(&factory);
        assert_eq!(genotype.gene_count(), 1);
    }
}
