//! Pairing of individuals for recombination.

use crate::error::Result;
use crate::fitness::Fitness;
use crate::gene::Gene;
use crate::index_stream::IndexStream;
use crate::population::Population;
use crate::rng::RandomRegistry;

/// Number of individuals taking part in one recombination.
pub(crate) const ORDER: usize = 2;

/// Picks pair leaders from `population` and pairs each with a uniformly
/// drawn, different partner.
///
/// Every individual leads a pair with probability `probability / ORDER`,
/// so about `probability * len / ORDER` pairs are recombined.
/// `recombine_pair` receives the population and both indices and returns
/// the number of individuals it altered. Populations with fewer than two
/// individuals are left untouched.
pub(crate) fn recombine<G, C, F>(
    population: &mut Population<G, C>,
    probability: f64,
    mut recombine_pair: F,
) -> Result<usize>
where
    G: Gene,
    C: Fitness,
    F: FnMut(&mut Population<G, C>, usize, usize) -> Result<usize>,
{
    let size = population.len();
    if size < 2 {
        return Ok(0);
    }

    let mut alterations = 0;
    for first in IndexStream::new(size, probability / ORDER as f64)? {
        let second = partner_of(first, size);
        alterations += recombine_pair(population, first, second)?;
    }
    Ok(alterations)
}

/// Draws an index from `[0, size)` other than `index`. `size` must be at least 2.
fn partner_of(index: usize, size: usize) -> usize {
    let partner = RandomRegistry::gen_range(0..size - 1);
    if partner >= index {
        partner + 1
    } else {
        partner
    }
}
