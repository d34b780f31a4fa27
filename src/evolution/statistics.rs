//! # Statistics
//!
//! Per-generation aggregates computed by the engine after every `setup` and
//! `evolve` call: fitness extremes, the age distribution of the population,
//! the number of replaced and altered phenotypes, and the time spent in each
//! phase of the generation.

use std::fmt;
use std::time::Duration;

use crate::error::{GeneticError, Result};
use crate::fitness::Fitness;
use crate::gene::Gene;
use crate::optimize::Optimize;
use crate::population::Population;

/// Wall-clock time spent in the phases of one generation.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Timing {
    pub selection: Duration,
    pub alteration: Duration,
    pub combination: Duration,
    pub evaluation: Duration,
    pub statistics: Duration,
    pub total: Duration,
}

impl fmt::Display for Timing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "selection {:?}, alteration {:?}, combination {:?}, evaluation {:?}, total {:?}",
            self.selection, self.alteration, self.combination, self.evaluation, self.total
        )
    }
}

/// Aggregated metrics of one generation.
#[derive(Debug, Clone, PartialEq)]
pub struct Statistics<C: Fitness> {
    generation: u64,
    optimize: Optimize,
    best_fitness: C,
    worst_fitness: C,
    samples: usize,
    age_mean: f64,
    age_variance: f64,
    killed: usize,
    invalid: usize,
    alterations: usize,
    timing: Timing,
}

impl<C: Fitness> Statistics<C> {
    /// Computes the statistics of `population` at `generation`.
    ///
    /// `killed`, `invalid` and `alterations` are the counts of the generation
    /// that produced `population`.
    ///
    /// # Errors
    ///
    /// Returns `EmptyPopulation` if `population` is empty.
    pub fn of<G: Gene>(
        population: &Population<G, C>,
        generation: u64,
        optimize: Optimize,
        killed: usize,
        invalid: usize,
        alterations: usize,
    ) -> Result<Self> {
        let best = population
            .best(optimize)
            .ok_or(GeneticError::EmptyPopulation)?;
        let worst = population
            .worst(optimize)
            .ok_or(GeneticError::EmptyPopulation)?;

        // Welford's online algorithm
        let mut mean = 0.0;
        let mut m2 = 0.0;
        for (i, phenotype) in population.iter().enumerate() {
            let age = phenotype.age(generation) as f64;
            let delta = age - mean;
            mean += delta / (i + 1) as f64;
            m2 += delta * (age - mean);
        }
        let samples = population.len();
        let variance = if samples > 1 {
            m2 / (samples - 1) as f64
        } else {
            0.0
        };

        Ok(Self {
            generation,
            optimize,
            best_fitness: best.fitness(),
            worst_fitness: worst.fitness(),
            samples,
            age_mean: mean,
            age_variance: variance,
            killed,
            invalid,
            alterations,
            timing: Timing::default(),
        })
    }

    pub(crate) fn with_timing(mut self, timing: Timing) -> Self {
        self.timing = timing;
        self
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// The optimization direction the extremes were computed for.
    pub fn optimize(&self) -> Optimize {
        self.optimize
    }

    pub fn best_fitness(&self) -> &C {
        &self.best_fitness
    }

    pub fn worst_fitness(&self) -> &C {
        &self.worst_fitness
    }

    /// Number of phenotypes in the population.
    pub fn samples(&self) -> usize {
        self.samples
    }

    pub fn age_mean(&self) -> f64 {
        self.age_mean
    }

    /// Sample variance of the phenotype ages.
    pub fn age_variance(&self) -> f64 {
        self.age_variance
    }

    /// Survivors replaced because they exceeded the maximal phenotype age.
    pub fn killed(&self) -> usize {
        self.killed
    }

    /// Survivors replaced because their genotype was invalid.
    pub fn invalid(&self) -> usize {
        self.invalid
    }

    pub fn alterations(&self) -> usize {
        self.alterations
    }

    pub fn timing(&self) -> &Timing {
        &self.timing
    }
}

impl<C: Fitness> fmt::Display for Statistics<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "generation {}: best {:?}, worst {:?}, samples {}, age {:.2} ± {:.2}, \
             killed {}, invalid {}, alterations {}",
            self.generation,
            self.best_fitness,
            self.worst_fitness,
            self.samples,
            self.age_mean,
            self.age_variance.sqrt(),
            self.killed,
            self.invalid,
            self.alterations
        )
    }
}
