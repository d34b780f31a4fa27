//! # Population
//!
//! An ordered, mutable collection of [`Phenotype`]s.

use std::ops::Index;

use rayon::prelude::*;

use crate::error::{GeneticError, Result};
use crate::fitness::Fitness;
use crate::gene::Gene;
use crate::optimize::Optimize;
use crate::phenotype::Phenotype;

/// An ordered collection of phenotypes.
#[derive(Debug)]
pub struct Population<G: Gene, C: Fitness> {
    individuals: Vec<Phenotype<G, C>>,
}

impl<G: Gene, C: Fitness> Clone for Population<G, C> {
    fn clone(&self) -> Self {
        Self {
            individuals: self.individuals.clone(),
        }
    }
}

impl<G: Gene, C: Fitness> Default for Population<G, C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<G: Gene, C: Fitness> Population<G, C> {
    pub fn new() -> Self {
        Self {
            individuals: Vec::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            individuals: Vec::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.individuals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.individuals.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Phenotype<G, C>> {
        self.individuals.get(index)
    }

    /// Replaces the phenotype at `index`, returning the previous one.
    pub fn set(&mut self, index: usize, phenotype: Phenotype<G, C>) -> Result<Phenotype<G, C>> {
        let length = self.individuals.len();
        let slot = self
            .individuals
            .get_mut(index)
            .ok_or(GeneticError::IndexOutOfBounds { index, length })?;
        Ok(std::mem::replace(slot, phenotype))
    }

    pub fn push(&mut self, phenotype: Phenotype<G, C>) {
        self.individuals.push(phenotype);
    }

    /// Appends phenotypes created by `factory` until the population holds `size` individuals.
    pub fn fill<F>(&mut self, mut factory: F, size: usize)
    where
        F: FnMut() -> Phenotype<G, C>,
    {
        while self.individuals.len() < size {
            self.individuals.push(factory());
        }
    }

    pub fn truncate(&mut self, size: usize) {
        self.individuals.truncate(size);
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Phenotype<G, C>> {
        self.individuals.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Phenotype<G, C>> {
        self.individuals.iter_mut()
    }

    pub fn par_iter(&self) -> rayon::slice::Iter<'_, Phenotype<G, C>> {
        self.individuals.par_iter()
    }

    pub fn as_slice(&self) -> &[Phenotype<G, C>] {
        &self.individuals
    }

    /// Stable sort with the best phenotypes first.
    ///
    /// Fitness values not comparable to themselves (NaN) sort last.
    /// Evaluates every phenotype that has not been evaluated yet.
    pub fn sort_with(&mut self, optimize: Optimize) {
        self.individuals
            .sort_by(|a, b| optimize.descending(&a.fitness(), &b.fitness()));
    }

    /// The best phenotype; the first one wins ties.
    pub fn best(&self, optimize: Optimize) -> Option<&Phenotype<G, C>> {
        self.individuals.iter().reduce(|best, pt| {
            if optimize.compare(&pt.fitness(), &best.fitness()) == std::cmp::Ordering::Greater {
                pt
            } else {
                best
            }
        })
    }

    /// The worst phenotype; the first one wins ties.
    pub fn worst(&self, optimize: Optimize) -> Option<&Phenotype<G, C>> {
        self.individuals.iter().reduce(|worst, pt| {
            if optimize.compare(&pt.fitness(), &worst.fitness()) == std::cmp::Ordering::Less {
                pt
            } else {
                worst
            }
        })
    }

    /// Number of phenotypes whose fitness has not been computed yet.
    pub fn unevaluated(&self) -> usize {
        self.individuals.iter().filter(|pt| !pt.is_evaluated()).count()
    }

    pub fn into_vec(self) -> Vec<Phenotype<G, C>> {
        self.individuals
    }
}

impl<G: Gene, C: Fitness> Index<usize> for Population<G, C> {
    type Output = Phenotype<G, C>;

    fn index(&self, index: usize) -> &Phenotype<G, C> {
        &self.individuals[index]
    }
}

impl<G: Gene, C: Fitness> From<Vec<Phenotype<G, C>>> for Population<G, C> {
    fn from(individuals: Vec<Phenotype<G, C>>) -> Self {
        Self { individuals }
    }
}

impl<G: Gene, C: Fitness> FromIterator<Phenotype<G, C>> for Population<G, C> {
    fn from_iter<I: IntoIterator<Item = Phenotype<G, C>>>(iter: I) -> Self {
        Self {
            individuals: iter.into_iter().collect(),
        }
    }
}

impl<G: Gene, C: Fitness> Extend<Phenotype<G, C>> for Population<G, C> {
    fn extend<I: IntoIterator<Item = Phenotype<G, C>>>(&mut self, iter: I) {
        self.individuals.extend(iter);
    }
}

impl<G: Gene, C: Fitness> IntoIterator for Population<G, C> {
    type Item = Phenotype<G, C>;
    type IntoIter = std::vec::IntoIter<Phenotype<G, C>>;

    fn into_iter(self) -> Self::IntoIter {
        self.individuals.into_iter()
    }
}

impl<'a, G: Gene, C: Fitness> IntoIterator for &'a Population<G, C> {
    type Item = &'a Phenotype<G, C>;
    type IntoIter = std::slice::Iter<'a, Phenotype<G, C>>;

    fn into_iter(self) -> Self::IntoIter {
        self.individuals.iter()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::fitness::IdentityScaler;
    use crate::gene::{Gene, IntegerGene};
    use crate::genotype::Genotype;
    use crate::chromosome::Chromosome;
    use std::sync::Arc;

    /// Builds a population of single-gene integer phenotypes with the given
    /// values as fitness.
    pub(crate) fn population_of(values: &[i64]) -> Population<IntegerGene, i64> {
        let function = Arc::new(|gt: &Genotype<IntegerGene>| *gt.gene().allele());
        values
            .iter()
            .map(|&value| {
                let chromosome =
                    Chromosome::of(vec![IntegerGene::of(value, -1000, 1000).unwrap()]).unwrap();
                Phenotype::of(
                    Genotype::of(vec![chromosome]).unwrap(),
                    1,
                    function.clone(),
                    Arc::new(IdentityScaler),
                )
            })
            .collect()
    }

    #[test]
    fn test_sort_with() {
        let mut population = population_of(&[3, 1, 2]);
        population.sort_with(Optimize::Maximum);
        let values: Vec<i64> = population.iter().map(|pt| pt.fitness()).collect();
        assert_eq!(values, vec![3, 2, 1]);

        population.sort_with(Optimize::Minimum);
        let values: Vec<i64> = population.iter().map(|pt| pt.fitness()).collect();
        assert_eq!(values, vec![1, 2, 3]);
    }

    #[test]
    fn test_sort_is_stable() {
        let mut population = population_of(&[1, 2, 1, 2]);
        let first_two = population[1].clone();
        let second_two = population[3].clone();
        population.sort_with(Optimize::Maximum);
        assert!(population[0].ptr_eq(&first_two));
        assert!(population[1].ptr_eq(&second_two));
    }

    #[test]
    fn test_best_and_worst() {
        let population = population_of(&[4, 9, -2, 9]);
        assert_eq!(population.best(Optimize::Maximum).unwrap().fitness(), 9);
        assert!(population
            .best(Optimize::Maximum)
            .unwrap()
            .ptr_eq(&population[1]));
        assert_eq!(population.worst(Optimize::Maximum).unwrap().fitness(), -2);
        assert_eq!(population.best(Optimize::Minimum).unwrap().fitness(), -2);
        assert!(Population::<IntegerGene, i64>::new()
            .best(Optimize::Maximum)
            .is_none());
    }

    #[test]
    fn test_set_and_fill() {
        let mut population = population_of(&[1, 2]);
        let replacement = population_of(&[7])[0].clone();

        assert!(population.set(5, replacement.clone()).is_err());
        let previous = population.set(0, replacement).unwrap();
        assert_eq!(previous.fitness(), 1);
        assert_eq!(population[0].fitness(), 7);

        let template = population[0].clone();
        population.fill(|| template.clone(), 5);
        assert_eq!(population.len(), 5);
    }
}
