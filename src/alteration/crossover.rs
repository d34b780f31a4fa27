use std::fmt::Debug;

use crate::error::Result;
use crate::fitness::Fitness;
use crate::gene::Gene;
use crate::genotype::Genotype;
use crate::population::Population;
use crate::rng::RandomRegistry;
use crate::seq::MSeq;

/// A recombination of two gene sequences.
///
/// Implementations swap genes between `that` and `other` in place. The
/// sequences may differ in length; only the common prefix takes part.
pub trait Crossover<G: Gene>: Debug + Send + Sync {
    /// Performs the crossover and returns the number of altered individuals.
    fn crossover(&self, that: &mut MSeq<G>, other: &mut MSeq<G>) -> Result<usize>;
}

/// Applies `crossover` to one uniformly chosen chromosome of the individuals
/// at `first` and `second`, and replaces both individuals with the results.
pub(crate) fn crossover_pair<G, C, X>(
    crossover: &X,
    population: &mut Population<G, C>,
    first: usize,
    second: usize,
    generation: u64,
) -> Result<usize>
where
    G: Gene,
    C: Fitness,
    X: Crossover<G> + ?Sized,
{
    let pt1 = population[first].clone();
    let pt2 = population[second].clone();
    let (gt1, gt2) = (pt1.genotype(), pt2.genotype());

    let index = RandomRegistry::gen_range(0..gt1.len().min(gt2.len()));
    let mut chromosomes1 = gt1.chromosomes().copy();
    let mut chromosomes2 = gt2.chromosomes().copy();

    let mut genes1 = chromosomes1[index].genes().copy();
    let mut genes2 = chromosomes2[index].genes().copy();
    let altered = crossover.crossover(&mut genes1, &mut genes2)?;

    let chromosome1 = chromosomes1[index].with_genes(genes1.into_iseq())?;
    let chromosome2 = chromosomes2[index].with_genes(genes2.into_iseq())?;
    chromosomes1.set(index, chromosome1)?;
    chromosomes2.set(index, chromosome2)?;

    population.set(
        first,
        pt1.new_instance(Genotype::of(chromosomes1.into_iseq())?, generation),
    )?;
    population.set(
        second,
        pt2.new_instance(Genotype::of(chromosomes2.into_iseq())?, generation),
    )?;
    Ok(altered)
}
