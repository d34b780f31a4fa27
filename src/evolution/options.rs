//! # EngineOptions
//!
//! The `EngineOptions` struct holds the numeric parameters of the evolution
//! engine: the population size, the fraction of each generation produced by
//! alteration, the maximal phenotype age, the optimization direction and the
//! parallel evaluation threshold.
//!
//! ## Example
//!
//! ```rust
//! use genevo::evolution::options::EngineOptions;
//! use genevo::optimize::Optimize;
//!
//! // Create a new EngineOptions instance with custom parameters
//! let options = EngineOptions::builder()
//!     .population_size(200)
//!     .offspring_fraction(0.3)
//!     .optimize(Optimize::Minimum)
//!     .build()
//!     .unwrap();
//! assert_eq!(options.get_offspring_count(), 60);
//! assert_eq!(options.get_survivor_count(), 140);
//!
//! // Create a new EngineOptions instance with default parameters
//! let default_options = EngineOptions::default();
//! assert_eq!(default_options.get_population_size(), 50);
//! ```
//!
//! ## Parameters
//!
//! - `population_size`: The number of phenotypes in each generation, at least 1.
//! - `offspring_fraction`: The fraction of each generation created by selection
//!   and alteration, in `[0, 1]`. The rest survives from the previous generation.
//! - `maximal_phenotype_age`: Survivors older than this are replaced by new
//!   random phenotypes, at least 1.
//! - `optimize`: Whether fitness is maximized or minimized.
//! - `parallel_threshold`: The minimum number of unevaluated phenotypes for
//!   fitness evaluation to run on the executor.

use crate::error::{check_probability, GeneticError, Result};
use crate::optimize::Optimize;

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct EngineOptions {
    population_size: usize,
    offspring_fraction: f64,
    maximal_phenotype_age: u64,
    optimize: Optimize,
    /// Minimum number of phenotypes to evaluate in parallel
    parallel_threshold: usize,
}

impl EngineOptions {
    /// Creates a new `EngineOptions` instance with all parameters specified.
    ///
    /// # Errors
    ///
    /// Returns an error if any parameter is outside of its valid domain.
    pub fn new(
        population_size: usize,
        offspring_fraction: f64,
        maximal_phenotype_age: u64,
        optimize: Optimize,
        parallel_threshold: usize,
    ) -> Result<Self> {
        Ok(Self {
            population_size: validate_population_size(population_size)?,
            offspring_fraction: check_probability(offspring_fraction, "Offspring fraction")?,
            maximal_phenotype_age: validate_maximal_phenotype_age(maximal_phenotype_age)?,
            optimize,
            parallel_threshold,
        })
    }

    pub fn get_population_size(&self) -> usize {
        self.population_size
    }

    pub fn get_offspring_fraction(&self) -> f64 {
        self.offspring_fraction
    }

    pub fn get_maximal_phenotype_age(&self) -> u64 {
        self.maximal_phenotype_age
    }

    pub fn get_optimize(&self) -> Optimize {
        self.optimize
    }

    /// Returns the minimum number of phenotypes to evaluate in parallel.
    pub fn get_parallel_threshold(&self) -> usize {
        self.parallel_threshold
    }

    /// Number of offspring per generation, `round(offspring_fraction · population_size)`.
    pub fn get_offspring_count(&self) -> usize {
        let count = (self.offspring_fraction * self.population_size as f64).round() as usize;
        count.min(self.population_size)
    }

    /// Number of survivors per generation.
    pub fn get_survivor_count(&self) -> usize {
        self.population_size - self.get_offspring_count()
    }

    /// Sets the population size.
    pub fn set_population_size(&mut self, population_size: usize) -> Result<()> {
        self.population_size = validate_population_size(population_size)?;
        Ok(())
    }

    /// Sets the offspring fraction.
    pub fn set_offspring_fraction(&mut self, offspring_fraction: f64) -> Result<()> {
        self.offspring_fraction = check_probability(offspring_fraction, "Offspring fraction")?;
        Ok(())
    }

    /// Sets the maximal phenotype age.
    pub fn set_maximal_phenotype_age(&mut self, maximal_phenotype_age: u64) -> Result<()> {
        self.maximal_phenotype_age = validate_maximal_phenotype_age(maximal_phenotype_age)?;
        Ok(())
    }

    /// Sets the optimization direction.
    pub fn set_optimize(&mut self, optimize: Optimize) {
        self.optimize = optimize;
    }

    /// Sets the parallel threshold.
    pub fn set_parallel_threshold(&mut self, threshold: usize) {
        self.parallel_threshold = threshold;
    }

    /// Returns a builder for creating an `EngineOptions` instance.
    ///
    /// This provides a more flexible way to configure engine options
    /// with a fluent interface.
    ///
    /// # Example
    ///
    /// ```rust
    /// use genevo::evolution::options::EngineOptions;
    ///
    /// let options = EngineOptions::builder()
    ///     .population_size(100)
    ///     .maximal_phenotype_age(20)
    ///     .parallel_threshold(500)
    ///     .build()
    ///     .unwrap();
    /// assert_eq!(options.get_maximal_phenotype_age(), 20);
    /// ```
    pub fn builder() -> EngineOptionsBuilder {
        EngineOptionsBuilder::default()
    }
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            population_size: 50,
            offspring_fraction: 0.6,
            maximal_phenotype_age: 70,
            optimize: Optimize::Maximum,
            parallel_threshold: 100, // Default parallel threshold
        }
    }
}

fn validate_population_size(population_size: usize) -> Result<usize> {
    if population_size < 1 {
        return Err(GeneticError::InvalidArgument(
            "Population size must be at least 1".to_string(),
        ));
    }
    Ok(population_size)
}

fn validate_maximal_phenotype_age(maximal_phenotype_age: u64) -> Result<u64> {
    if maximal_phenotype_age < 1 {
        return Err(GeneticError::InvalidArgument(
            "Maximal phenotype age must be at least 1".to_string(),
        ));
    }
    Ok(maximal_phenotype_age)
}

/// Builder for `EngineOptions`.
///
/// Provides a fluent interface for constructing `EngineOptions` instances.
/// Unset parameters take their default values.
#[derive(Debug, Clone, Default)]
pub struct EngineOptionsBuilder {
    population_size: Option<usize>,
    offspring_fraction: Option<f64>,
    maximal_phenotype_age: Option<u64>,
    optimize: Option<Optimize>,
    parallel_threshold: Option<usize>,
}

impl EngineOptionsBuilder {
    /// Sets the population size.
    pub fn population_size(mut self, value: usize) -> Self {
        self.population_size = Some(value);
        self
    }

    /// Sets the offspring fraction.
    pub fn offspring_fraction(mut self, value: f64) -> Self {
        self.offspring_fraction = Some(value);
        self
    }

    /// Sets the maximal phenotype age.
    pub fn maximal_phenotype_age(mut self, value: u64) -> Self {
        self.maximal_phenotype_age = Some(value);
        self
    }

    /// Sets the optimization direction.
    pub fn optimize(mut self, value: Optimize) -> Self {
        self.optimize = Some(value);
        self
    }

    /// Sets the parallel threshold.
    pub fn parallel_threshold(mut self, value: usize) -> Self {
        self.parallel_threshold = Some(value);
        self
    }

    /// Builds the `EngineOptions` instance.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if any parameter is outside of its valid domain.
    pub fn build(self) -> Result<EngineOptions> {
        let defaults = EngineOptions::default();
        EngineOptions::new(
            self.population_size.unwrap_or(defaults.population_size),
            self.offspring_fraction
                .unwrap_or(defaults.offspring_fraction),
            self.maximal_phenotype_age
                .unwrap_or(defaults.maximal_phenotype_age),
            self.optimize.unwrap_or(defaults.optimize),
            self.parallel_threshold
                .unwrap_or(defaults.parallel_threshold),
        )
    }
}
