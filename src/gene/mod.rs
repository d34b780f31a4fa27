//! # Genes
//!
//! A gene is the atomic holder of an allele. Every representation implements
//! the same small capability set: read the allele, check validity, and create
//! a fresh random instance of itself. Numeric representations additionally
//! implement [`Mean`], which blend-style recombination relies on.
//!
//! Random instances are drawn from the [`RandomRegistry`](crate::rng::RandomRegistry),
//! so they honour any scoped engine the caller installed.

pub mod bit;
pub mod double;
pub mod integer;

use std::fmt::Debug;

pub use bit::BitGene;
pub use double::DoubleGene;
pub use integer::IntegerGene;

/// The capability set shared by all gene representations.
pub trait Gene: Clone + Debug + PartialEq + Send + Sync + 'static {
    /// The value type held by this gene.
    type Allele: Clone + Debug;

    fn allele(&self) -> &Self::Allele;

    /// Returns `true` if the allele satisfies the gene's constraints.
    fn is_valid(&self) -> bool;

    /// Creates a new gene of the same kind, with the same constraints and a
    /// random allele.
    fn new_instance(&self) -> Self;
}

/// Genes whose alleles can be averaged.
pub trait Mean: Gene {
    /// Returns a gene holding the mean of both alleles, keeping the
    /// constraints of `self`.
    fn mean(&self, other: &Self) -> Self;
}
