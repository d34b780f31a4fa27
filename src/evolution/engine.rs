//! # GeneticAlgorithm
//!
//! The generational evolution engine. It moves through three states:
//!
//! - **Unset**: created by the builder, no population yet.
//! - **Initialized**: [`setup`](GeneticAlgorithm::setup) created and evaluated
//!   generation 1.
//! - **Evolving**: at least one [`evolve`](GeneticAlgorithm::evolve) call
//!   completed.
//!
//! Every public method holds the engine lock for its whole duration, so a
//! parameter change made from another thread takes effect between two
//! generations, never within one. A failing `evolve` leaves the engine in
//! the state it had before the call.
//!
//! ## Example
//!
//! ```rust
//! use genevo::evolution::GeneticAlgorithm;
//! use genevo::gene::{DoubleGene, Gene};
//! use genevo::genotype::Genotype;
//!
//! let factory = Genotype::of(vec![DoubleGene::chromosome(0.0, 1.0, 1).unwrap()]).unwrap();
//! let engine = GeneticAlgorithm::builder()
//!     .with_factory(factory)
//!     .with_fitness_function(|gt: &Genotype<DoubleGene>| *gt.gene().allele())
//!     .build()
//!     .unwrap();
//!
//! engine.setup().unwrap();
//! let statistics = engine.evolve_n(10).unwrap();
//! assert_eq!(statistics.generation(), 11);
//! ```

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Instant;

use tracing::{debug, info, instrument, trace, warn};

use crate::alteration::Alterer;
use crate::error::{GeneticError, OptionExt, Result};
use crate::evolution::options::EngineOptions;
use crate::evolution::statistics::{Statistics, Timing};
use crate::executor::Executor;
use crate::fitness::{Fitness, FitnessFunction, FitnessScaler};
use crate::gene::Gene;
use crate::genotype::{Factory, Genotype};
use crate::optimize::Optimize;
use crate::phenotype::Phenotype;
use crate::population::Population;
use crate::selection::Selector;

/// The lifecycle state of a [`GeneticAlgorithm`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    Unset,
    Initialized,
    Evolving,
}

/// The replaceable parameters of a running engine.
///
/// Obtained inside [`GeneticAlgorithm::configure`], which applies all
/// changes made to it at once.
pub struct Parameters<G: Gene, C: Fitness> {
    pub(crate) options: EngineOptions,
    pub(crate) survivor_selector: Arc<dyn Selector<G, C>>,
    pub(crate) offspring_selector: Arc<dyn Selector<G, C>>,
    pub(crate) alterer: Arc<dyn Alterer<G, C>>,
}

impl<G: Gene, C: Fitness> Parameters<G, C> {
    pub fn options(&self) -> &EngineOptions {
        &self.options
    }

    pub fn survivor_selector(&self) -> &Arc<dyn Selector<G, C>> {
        &self.survivor_selector
    }

    pub fn offspring_selector(&self) -> &Arc<dyn Selector<G, C>> {
        &self.offspring_selector
    }

    pub fn alterer(&self) -> &Arc<dyn Alterer<G, C>> {
        &self.alterer
    }

    pub fn set_population_size(&mut self, population_size: usize) -> Result<()> {
        self.options.set_population_size(population_size)
    }

    pub fn set_offspring_fraction(&mut self, offspring_fraction: f64) -> Result<()> {
        self.options.set_offspring_fraction(offspring_fraction)
    }

    pub fn set_maximal_phenotype_age(&mut self, maximal_phenotype_age: u64) -> Result<()> {
        self.options.set_maximal_phenotype_age(maximal_phenotype_age)
    }

    pub fn set_optimize(&mut self, optimize: Optimize) {
        self.options.set_optimize(optimize);
    }

    pub fn set_survivor_selector(&mut self, selector: Arc<dyn Selector<G, C>>) {
        self.survivor_selector = selector;
    }

    pub fn set_offspring_selector(&mut self, selector: Arc<dyn Selector<G, C>>) {
        self.offspring_selector = selector;
    }

    pub fn set_alterer(&mut self, alterer: Arc<dyn Alterer<G, C>>) {
        self.alterer = alterer;
    }
}

impl<G: Gene, C: Fitness> Clone for Parameters<G, C> {
    fn clone(&self) -> Self {
        Self {
            options: self.options.clone(),
            survivor_selector: Arc::clone(&self.survivor_selector),
            offspring_selector: Arc::clone(&self.offspring_selector),
            alterer: Arc::clone(&self.alterer),
        }
    }
}

impl<G: Gene, C: Fitness> fmt::Debug for Parameters<G, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Parameters")
            .field("options", &self.options)
            .field("survivor_selector", &self.survivor_selector)
            .field("offspring_selector", &self.offspring_selector)
            .field("alterer", &self.alterer)
            .finish()
    }
}

/// The population of the current generation and what is known about it.
struct Run<G: Gene, C: Fitness> {
    generation: u64,
    population: Population<G, C>,
    best: Phenotype<G, C>,
    statistics: Statistics<C>,
}

struct State<G: Gene, C: Fitness> {
    parameters: Parameters<G, C>,
    run: Option<Run<G, C>>,
    evolved: bool,
    killed: usize,
    invalid: usize,
}

/// A generational genetic algorithm.
///
/// Created with [`GeneticAlgorithm::builder`].
pub struct GeneticAlgorithm<G: Gene, C: Fitness> {
    factory: Arc<dyn Factory<Genotype<G>>>,
    function: Arc<dyn FitnessFunction<G, C>>,
    scaler: Arc<dyn FitnessScaler<C>>,
    executor: Executor,
    state: Mutex<State<G, C>>,
}

impl<G: Gene, C: Fitness> GeneticAlgorithm<G, C> {
    /// Returns a builder for creating a `GeneticAlgorithm`.
    pub fn builder() -> crate::evolution::builder::GeneticAlgorithmBuilder<G, C> {
        crate::evolution::builder::GeneticAlgorithmBuilder::new()
    }

    pub(crate) fn new(
        factory: Arc<dyn Factory<Genotype<G>>>,
        function: Arc<dyn FitnessFunction<G, C>>,
        scaler: Arc<dyn FitnessScaler<C>>,
        executor: Executor,
        parameters: Parameters<G, C>,
    ) -> Self {
        Self {
            factory,
            function,
            scaler,
            executor,
            state: Mutex::new(State {
                parameters,
                run: None,
                evolved: false,
                killed: 0,
                invalid: 0,
            }),
        }
    }

    /// Creates generation 1 from freshly instantiated phenotypes.
    ///
    /// # Errors
    ///
    /// Returns `IllegalState` if the engine has already been set up.
    pub fn setup(&self) -> Result<Statistics<C>> {
        self.setup_with_phenotypes(Vec::new())
    }

    /// Creates generation 1 from `genotypes`, filled up with random phenotypes.
    ///
    /// Genotypes beyond the population size are ignored.
    ///
    /// # Errors
    ///
    /// Returns `IllegalState` if the engine has already been set up.
    pub fn setup_with_genotypes(&self, genotypes: Vec<Genotype<G>>) -> Result<Statistics<C>> {
        let phenotypes = genotypes
            .into_iter()
            .map(|genotype| self.phenotype_of(genotype, 1))
            .collect();
        self.setup_with_phenotypes(phenotypes)
    }

    /// Creates generation 1 from `phenotypes`, filled up with random phenotypes.
    ///
    /// Phenotypes beyond the population size are ignored. Already evaluated
    /// phenotypes keep their fitness.
    ///
    /// # Errors
    ///
    /// Returns `IllegalState` if the engine has already been set up.
    #[instrument(level = "debug", skip_all, fields(seeded = phenotypes.len()))]
    pub fn setup_with_phenotypes(&self, phenotypes: Vec<Phenotype<G, C>>) -> Result<Statistics<C>> {
        let mut state = self.lock();
        if state.run.is_some() {
            return Err(GeneticError::IllegalState(
                "setup() has already been called".to_string(),
            ));
        }

        let started = Instant::now();
        let options = state.parameters.options.clone();
        let size = options.get_population_size();

        let mut population: Population<G, C> = phenotypes.into_iter().collect();
        population.truncate(size);
        population.fill(|| self.phenotype_of(self.factory.new_instance(), 1), size);

        let evaluation = Instant::now();
        self.evaluate(&population, options.get_parallel_threshold());
        let evaluation = evaluation.elapsed();

        let optimize = options.get_optimize();
        let statistics = Statistics::of(&population, 1, optimize, 0, 0, 0)?.with_timing(Timing {
            evaluation,
            total: started.elapsed(),
            ..Timing::default()
        });
        let best = population
            .best(optimize)
            .cloned()
            .ok_or_else_genetic(|| GeneticError::EmptyPopulation)?;

        info!(
            population_size = size,
            best = ?statistics.best_fitness(),
            "Engine initialized"
        );

        state.run = Some(Run {
            generation: 1,
            population,
            best,
            statistics: statistics.clone(),
        });
        Ok(statistics)
    }

    /// Creates the next generation.
    ///
    /// Survivors and offspring are selected from the current population,
    /// the offspring are altered, survivors that are too old or invalid are
    /// replaced, and all new phenotypes are evaluated.
    ///
    /// # Errors
    ///
    /// Returns `IllegalState` if [`setup`](Self::setup) has not been called.
    /// Errors of the selectors and alterer are propagated; the engine keeps
    /// its previous generation in that case.
    #[instrument(level = "debug", skip(self))]
    pub fn evolve(&self) -> Result<Statistics<C>> {
        let mut guard = self.lock();
        let state = &mut *guard;
        let run = state.run.as_mut().ok_or_else_genetic(|| {
            GeneticError::IllegalState("evolve() called before setup()".to_string())
        })?;
        let parameters = &state.parameters;
        let options = &parameters.options;

        let started = Instant::now();
        let generation = run.generation + 1;
        let optimize = options.get_optimize();
        let population_size = options.get_population_size();
        let survivor_count = options.get_survivor_count();
        let offspring_count = options.get_offspring_count();

        // Selection
        let phase = Instant::now();
        let current = &run.population;
        let (survivors, offspring) = self.executor.join(
            || {
                parameters
                    .survivor_selector
                    .select(current, survivor_count, optimize)
            },
            || {
                parameters
                    .offspring_selector
                    .select(current, offspring_count, optimize)
            },
        );
        let (survivors, mut offspring) = (survivors?, offspring?);
        if survivors.len() + offspring.len() != population_size {
            return Err(GeneticError::Evolution(format!(
                "Selected {} survivors and {} offspring for a population of {}",
                survivors.len(),
                offspring.len(),
                population_size
            )));
        }
        let selection = phase.elapsed();

        // Alteration
        let phase = Instant::now();
        let alterations = parameters.alterer.alter(&mut offspring, generation)?;
        let alteration = phase.elapsed();
        trace!(generation, alterations, "Offspring altered");

        // Combination
        let phase = Instant::now();
        let maximal_age = options.get_maximal_phenotype_age();
        let ((survivors, killed, invalid), mut next) = self.executor.join(
            || self.replace_expired(survivors, generation, maximal_age),
            || {
                let mut next = Population::with_capacity(population_size);
                next.extend(offspring);
                next
            },
        );
        next.extend(survivors);
        let combination = phase.elapsed();
        if invalid > 0 {
            warn!(generation, invalid, "Replaced invalid survivors");
        }

        // Evaluation
        let phase = Instant::now();
        self.evaluate(&next, options.get_parallel_threshold());
        let evaluation = phase.elapsed();

        let phase = Instant::now();
        let statistics = Statistics::of(&next, generation, optimize, killed, invalid, alterations)?;
        let best = next
            .best(optimize)
            .cloned()
            .ok_or_else_genetic(|| GeneticError::EmptyPopulation)?;
        let timing = Timing {
            selection,
            alteration,
            combination,
            evaluation,
            statistics: phase.elapsed(),
            total: started.elapsed(),
        };
        let statistics = statistics.with_timing(timing);
        trace!(generation, %timing, "Generation timing");
        debug!(%statistics, "Generation evolved");

        // Commit
        if optimize.compare(&best.fitness(), &run.best.fitness()) == std::cmp::Ordering::Greater {
            run.best = best;
        }
        run.generation = generation;
        run.population = next;
        run.statistics = statistics.clone();
        state.evolved = true;
        state.killed += killed;
        state.invalid += invalid;
        Ok(statistics)
    }

    /// Calls [`evolve`](Self::evolve) `generations` times and returns the
    /// statistics of the last generation.
    ///
    /// # Errors
    ///
    /// Returns `IllegalState` if the engine has not been set up, or the first
    /// error of an `evolve` call.
    pub fn evolve_n(&self, generations: u64) -> Result<Statistics<C>> {
        let mut statistics = self.statistics()?;
        for _ in 0..generations {
            statistics = self.evolve()?;
        }
        Ok(statistics)
    }

    /// Evolves while `predicate` holds for the statistics of the latest
    /// generation, and returns the statistics of the last generation.
    ///
    /// The predicate is first tested against the current generation.
    ///
    /// # Errors
    ///
    /// Returns `IllegalState` if the engine has not been set up, or the first
    /// error of an `evolve` call.
    pub fn evolve_while<P>(&self, mut predicate: P) -> Result<Statistics<C>>
    where
        P: FnMut(&Statistics<C>) -> bool,
    {
        let mut statistics = self.statistics()?;
        while predicate(&statistics) {
            statistics = self.evolve()?;
        }
        Ok(statistics)
    }

    /// Applies the changes `f` makes to the parameters atomically.
    ///
    /// If `f` fails, no change is applied. `f` runs under the engine lock and
    /// must not call back into the engine.
    ///
    /// # Example
    ///
    /// ```rust
    /// # use genevo::evolution::GeneticAlgorithm;
    /// # use genevo::gene::{DoubleGene, Gene};
    /// # use genevo::genotype::Genotype;
    /// # let engine = GeneticAlgorithm::builder()
    /// #     .with_factory(Genotype::of(vec![DoubleGene::chromosome(0.0, 1.0, 1).unwrap()]).unwrap())
    /// #     .with_fitness_function(|gt: &Genotype<DoubleGene>| *gt.gene().allele())
    /// #     .build()
    /// #     .unwrap();
    /// engine
    ///     .configure(|parameters| {
    ///         parameters.set_population_size(80)?;
    ///         parameters.set_offspring_fraction(0.4)
    ///     })
    ///     .unwrap();
    /// assert_eq!(engine.options().get_population_size(), 80);
    ///
    /// assert!(engine
    ///     .configure(|parameters| {
    ///         parameters.set_population_size(10)?;
    ///         parameters.set_offspring_fraction(4.0)
    ///     })
    ///     .is_err());
    /// assert_eq!(engine.options().get_population_size(), 80);
    /// ```
    pub fn configure<F>(&self, f: F) -> Result<()>
    where
        F: FnOnce(&mut Parameters<G, C>) -> Result<()>,
    {
        let mut state = self.lock();
        let mut parameters = state.parameters.clone();
        f(&mut parameters)?;
        state.parameters = parameters;
        Ok(())
    }

    pub fn set_alterer(&self, alterer: Arc<dyn Alterer<G, C>>) {
        self.lock().parameters.set_alterer(alterer);
    }

    pub fn set_survivor_selector(&self, selector: Arc<dyn Selector<G, C>>) {
        self.lock().parameters.set_survivor_selector(selector);
    }

    pub fn set_offspring_selector(&self, selector: Arc<dyn Selector<G, C>>) {
        self.lock().parameters.set_offspring_selector(selector);
    }

    /// Uses `selector` for both survivors and offspring.
    pub fn set_selectors(&self, selector: Arc<dyn Selector<G, C>>) {
        let mut state = self.lock();
        state.parameters.set_survivor_selector(Arc::clone(&selector));
        state.parameters.set_offspring_selector(selector);
    }

    pub fn set_population_size(&self, population_size: usize) -> Result<()> {
        self.lock().parameters.set_population_size(population_size)
    }

    pub fn set_offspring_fraction(&self, offspring_fraction: f64) -> Result<()> {
        self.lock().parameters.set_offspring_fraction(offspring_fraction)
    }

    pub fn set_maximal_phenotype_age(&self, maximal_phenotype_age: u64) -> Result<()> {
        self.lock()
            .parameters
            .set_maximal_phenotype_age(maximal_phenotype_age)
    }

    pub fn state(&self) -> EngineState {
        let state = self.lock();
        match (&state.run, state.evolved) {
            (None, _) => EngineState::Unset,
            (Some(_), false) => EngineState::Initialized,
            (Some(_), true) => EngineState::Evolving,
        }
    }

    /// The current generation, `0` before setup.
    pub fn generation(&self) -> u64 {
        self.lock().run.as_ref().map_or(0, |run| run.generation)
    }

    pub fn options(&self) -> EngineOptions {
        self.lock().parameters.options.clone()
    }

    pub fn parameters(&self) -> Parameters<G, C> {
        self.lock().parameters.clone()
    }

    /// The best phenotype of all generations so far; ties keep the earlier one.
    pub fn best_phenotype(&self) -> Result<Phenotype<G, C>> {
        self.with_run(|run| run.best.clone())
    }

    pub fn population(&self) -> Result<Population<G, C>> {
        self.with_run(|run| run.population.clone())
    }

    /// The statistics of the current generation.
    pub fn statistics(&self) -> Result<Statistics<C>> {
        self.with_run(|run| run.statistics.clone())
    }

    /// Total number of survivors replaced for exceeding the maximal age.
    pub fn killed(&self) -> usize {
        self.lock().killed
    }

    /// Total number of survivors replaced for being invalid.
    pub fn invalid(&self) -> usize {
        self.lock().invalid
    }

    fn with_run<R>(&self, f: impl FnOnce(&Run<G, C>) -> R) -> Result<R> {
        let state = self.lock();
        state
            .run
            .as_ref()
            .map(f)
            .ok_or_else_genetic(|| GeneticError::IllegalState("setup() has not been called".to_string()))
    }

    fn lock(&self) -> MutexGuard<'_, State<G, C>> {
        // State is only committed at the end of a generation.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn phenotype_of(&self, genotype: Genotype<G>, generation: u64) -> Phenotype<G, C> {
        Phenotype::of(
            genotype,
            generation,
            Arc::clone(&self.function),
            Arc::clone(&self.scaler),
        )
    }

    /// Replaces survivors older than `maximal_age` or invalid with new random
    /// phenotypes. Returns the survivors and the killed and invalid counts.
    fn replace_expired(
        &self,
        survivors: Population<G, C>,
        generation: u64,
        maximal_age: u64,
    ) -> (Population<G, C>, usize, usize) {
        let mut killed = 0;
        let mut invalid = 0;
        let survivors = survivors
            .into_iter()
            .map(|phenotype| {
                if phenotype.age(generation) > maximal_age {
                    killed += 1;
                    self.phenotype_of(self.factory.new_instance(), generation)
                } else if !phenotype.is_valid() {
                    invalid += 1;
                    self.phenotype_of(self.factory.new_instance(), generation)
                } else {
                    phenotype
                }
            })
            .collect();
        (survivors, killed, invalid)
    }

    /// Evaluates all phenotypes without cached fitness.
    fn evaluate(&self, population: &Population<G, C>, parallel_threshold: usize) {
        let pending: Vec<&Phenotype<G, C>> =
            population.iter().filter(|pt| !pt.is_evaluated()).collect();
        if pending.len() < parallel_threshold {
            pending.iter().for_each(|pt| {
                pt.evaluate();
            });
        } else {
            self.executor.for_each(&pending, |pt| {
                pt.evaluate();
            });
        }
    }
}

impl<G: Gene, C: Fitness> fmt::Debug for GeneticAlgorithm<G, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.lock();
        f.debug_struct("GeneticAlgorithm")
            .field("executor", &self.executor)
            .field("parameters", &state.parameters)
            .field("generation", &state.run.as_ref().map(|run| run.generation))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gene::IntegerGene;
    use crate::rng::{RandomEngine, RandomRegistry};
    use crate::selection::TruncationSelector;

    fn engine(population_size: usize) -> GeneticAlgorithm<IntegerGene, i64> {
        let factory = Genotype::of(vec![IntegerGene::chromosome(0, 100, 1).unwrap()]).unwrap();
        GeneticAlgorithm::builder()
            .with_factory(factory)
            .with_fitness_function(|gt: &Genotype<IntegerGene>| gt.gene().value())
            .with_options(
                EngineOptions::builder()
                    .population_size(population_size)
                    .build()
                    .unwrap(),
            )
            .with_executor(Executor::Inline)
            .build()
            .unwrap()
    }

    #[test]
    fn test_state_machine() {
        let engine = engine(10);
        assert_eq!(engine.state(), EngineState::Unset);
        assert_eq!(engine.generation(), 0);
        assert!(matches!(engine.evolve(), Err(GeneticError::IllegalState(_))));
        assert!(engine.statistics().is_err());

        engine.setup().unwrap();
        assert_eq!(engine.state(), EngineState::Initialized);
        assert_eq!(engine.generation(), 1);
        assert!(matches!(engine.setup(), Err(GeneticError::IllegalState(_))));

        engine.evolve().unwrap();
        assert_eq!(engine.state(), EngineState::Evolving);
        assert_eq!(engine.generation(), 2);
        assert_eq!(engine.population().unwrap().len(), 10);
    }

    #[test]
    fn test_setup_with_genotypes_truncates_and_fills() {
        let seeds: Vec<Genotype<IntegerGene>> = (0..5)
            .map(|v| {
                Genotype::of(vec![crate::chromosome::Chromosome::of(vec![
                    IntegerGene::of(v, 0, 100).unwrap(),
                ])
                .unwrap()])
                .unwrap()
            })
            .collect();

        let small = engine(3);
        small.setup_with_genotypes(seeds.clone()).unwrap();
        let values: Vec<i64> = small
            .population()
            .unwrap()
            .iter()
            .map(|pt| pt.fitness())
            .collect();
        assert_eq!(values, vec![0, 1, 2]);

        let large = engine(8);
        large.setup_with_genotypes(seeds).unwrap();
        let population = large.population().unwrap();
        assert_eq!(population.len(), 8);
        assert!(population.iter().all(|pt| pt.is_evaluated()));
    }

    #[test]
    fn test_best_phenotype_never_gets_worse() {
        let engine = engine(20);
        RandomRegistry::scope(RandomEngine::from_seed(10), || {
            engine.setup().unwrap();
            let mut best = engine.best_phenotype().unwrap().fitness();
            for _ in 0..20 {
                engine.evolve().unwrap();
                let current = engine.best_phenotype().unwrap().fitness();
                assert!(current >= best);
                best = current;
            }
        });
    }

    #[test]
    fn test_parameter_change_applies_to_next_generation() {
        let engine = engine(10);
        engine.setup().unwrap();
        engine.set_population_size(4).unwrap();
        engine.set_selectors(Arc::new(TruncationSelector::new()));
        let statistics = engine.evolve().unwrap();
        assert_eq!(statistics.samples(), 4);
        assert!(engine.set_offspring_fraction(2.0).is_err());
        assert_eq!(engine.options().get_offspring_fraction(), 0.6);
    }

    #[test]
    fn test_evolve_while() {
        let engine = engine(10);
        engine.setup().unwrap();
        let statistics = engine
            .evolve_while(crate::evolution::termination::generation_limit::<i64>(5))
            .unwrap();
        assert_eq!(statistics.generation(), 5);
        assert_eq!(engine.generation(), 5);
    }
}
