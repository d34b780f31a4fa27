//! Chromosomes: fixed-length, immutable sequences of genes of one type.

use std::fmt;
use std::sync::OnceLock;

use crate::error::{GeneticError, Result};
use crate::gene::Gene;
use crate::seq::ISeq;

/// An immutable, non-empty sequence of genes.
///
/// Validity is the conjunction of the genes' validities; it is computed on
/// first request and cached, since the genes never change.
#[derive(Clone)]
pub struct Chromosome<G: Gene> {
    genes: ISeq<G>,
    valid: OnceLock<bool>,
}

impl<G: Gene> Chromosome<G> {
    /// Creates a chromosome from the given genes.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if `genes` is empty.
    pub fn of(genes: impl Into<ISeq<G>>) -> Result<Self> {
        let genes = genes.into();
        if genes.is_empty() {
            return Err(GeneticError::InvalidArgument(
                "A chromosome must contain at least one gene".to_string(),
            ));
        }
        Ok(Self {
            genes,
            valid: OnceLock::new(),
        })
    }

    pub fn len(&self) -> usize {
        self.genes.len()
    }

    /// Always `false`; chromosomes hold at least one gene.
    pub fn is_empty(&self) -> bool {
        self.genes.is_empty()
    }

    /// Returns the gene at `index`.
    ///
    /// Panics if `index` is out of bounds.
    pub fn gene(&self, index: usize) -> &G {
        &self.genes[index]
    }

    pub fn get(&self, index: usize) -> Option<&G> {
        self.genes.get(index)
    }

    pub fn genes(&self) -> &ISeq<G> {
        &self.genes
    }

    pub fn iter(&self) -> std::slice::Iter<'_, G> {
        self.genes.iter()
    }

    pub fn is_valid(&self) -> bool {
        *self
            .valid
            .get_or_init(|| self.genes.iter().all(Gene::is_valid))
    }

    /// Creates a chromosome of the same shape with random genes.
    pub fn new_instance(&self) -> Self {
        Self {
            genes: self.genes.map(Gene::new_instance),
            valid: OnceLock::new(),
        }
    }

    /// Creates a chromosome of the same kind holding `genes`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if `genes` is empty.
    pub fn with_genes(&self, genes: ISeq<G>) -> Result<Self> {
        Self::of(genes)
    }
}

impl<G: Gene> PartialEq for Chromosome<G> {
    fn eq(&self, other: &Self) -> bool {
        self.genes == other.genes
    }
}

impl<G: Gene> fmt::Debug for Chromosome<G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.genes.iter()).finish()
    }
}

impl<'a, G: Gene> IntoIterator for &'a Chromosome<G> {
    type Item = &'a G;
    type IntoIter = std::slice::Iter<'a, G>;

    fn into_iter(self) -> Self::IntoIter {
        self.genes.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gene::{DoubleGene, IntegerGene};

    #[test]
    fn test_empty_chromosome_is_rejected() {
        assert!(Chromosome::<IntegerGene>::of(Vec::new()).is_err());
    }

    #[test]
    fn test_validity_is_conjunction() {
        let valid = Chromosome::of(vec![
            IntegerGene::of(1, 0, 5).unwrap(),
            IntegerGene::of(2, 0, 5).unwrap(),
        ])
        .unwrap();
        assert!(valid.is_valid());

        let invalid = Chromosome::of(vec![
            IntegerGene::of(1, 0, 5).unwrap(),
            IntegerGene::of(9, 0, 5).unwrap(),
        ])
        .unwrap();
        assert!(!invalid.is_valid());
    }

    #[test]
    fn test_new_instance_keeps_shape() {
        let chromosome = DoubleGene::chromosome(0.0, 1.0, 6).unwrap();
        let other = chromosome.new_instance();
        assert_eq!(other.len(), 6);
        assert!(other.is_valid());
    }

    #[test]
    #[should_panic]
    fn test_gene_out_of_bounds_panics() {
        let chromosome = DoubleGene::chromosome(0.0, 1.0, 2).unwrap();
        chromosome.gene(2);
    }
}
