use std::sync::Arc;

use tracing::info;

use crate::alteration::{Alterer, CompositeAlterer, Mutator, SinglePointCrossover};
use crate::error::{GeneticError, Result};
use crate::evolution::engine::{GeneticAlgorithm, Parameters};
use crate::evolution::options::EngineOptions;
use crate::executor::Executor;
use crate::fitness::{Fitness, FitnessFunction, FitnessScaler, IdentityScaler};
use crate::gene::Gene;
use crate::genotype::{Factory, Genotype};
use crate::selection::{Selector, TournamentSelector};

/// Builder for [`GeneticAlgorithm`].
///
/// The genotype factory and the fitness function are required. Everything
/// else has a default:
///
/// | Parameter          | Default                                               |
/// |--------------------|-------------------------------------------------------|
/// | options            | [`EngineOptions::default`]                            |
/// | scaler             | [`IdentityScaler`]                                    |
/// | survivor selector  | [`TournamentSelector`] with sample size 2             |
/// | offspring selector | [`TournamentSelector`] with sample size 2             |
/// | alterer            | [`SinglePointCrossover`] (0.2) then [`Mutator`] (0.15) |
/// | executor           | [`Executor::Global`]                                  |
pub struct GeneticAlgorithmBuilder<G: Gene, C: Fitness> {
    factory: Option<Arc<dyn Factory<Genotype<G>>>>,
    function: Option<Arc<dyn FitnessFunction<G, C>>>,
    scaler: Option<Arc<dyn FitnessScaler<C>>>,
    options: Option<EngineOptions>,
    survivor_selector: Option<Arc<dyn Selector<G, C>>>,
    offspring_selector: Option<Arc<dyn Selector<G, C>>>,
    alterer: Option<Arc<dyn Alterer<G, C>>>,
    executor: Option<Executor>,
}

impl<G: Gene, C: Fitness> GeneticAlgorithmBuilder<G, C> {
    pub fn new() -> Self {
        Self {
            factory: None,
            function: None,
            scaler: None,
            options: None,
            survivor_selector: None,
            offspring_selector: None,
            alterer: None,
            executor: None,
        }
    }

    /// Sets the factory for new genotypes. A [`Genotype`] is its own factory.
    pub fn with_factory(mut self, factory: impl Factory<Genotype<G>> + 'static) -> Self {
        self.factory = Some(Arc::new(factory));
        self
    }

    pub fn with_fitness_function(
        mut self,
        function: impl FitnessFunction<G, C> + 'static,
    ) -> Self {
        self.function = Some(Arc::new(function));
        self
    }

    pub fn with_scaler(mut self, scaler: impl FitnessScaler<C> + 'static) -> Self {
        self.scaler = Some(Arc::new(scaler));
        self
    }

    pub fn with_options(mut self, options: EngineOptions) -> Self {
        self.options = Some(options);
        self
    }

    pub fn with_survivor_selector(mut self, selector: impl Selector<G, C> + 'static) -> Self {
        self.survivor_selector = Some(Arc::new(selector));
        self
    }

    pub fn with_offspring_selector(mut self, selector: impl Selector<G, C> + 'static) -> Self {
        self.offspring_selector = Some(Arc::new(selector));
        self
    }

    /// Uses `selector` for both survivors and offspring.
    pub fn with_selector(mut self, selector: impl Selector<G, C> + 'static) -> Self {
        let selector: Arc<dyn Selector<G, C>> = Arc::new(selector);
        self.survivor_selector = Some(Arc::clone(&selector));
        self.offspring_selector = Some(selector);
        self
    }

    pub fn with_alterer(mut self, alterer: impl Alterer<G, C> + 'static) -> Self {
        self.alterer = Some(Arc::new(alterer));
        self
    }

    pub fn with_executor(mut self, executor: Executor) -> Self {
        self.executor = Some(executor);
        self
    }

    pub fn build(self) -> Result<GeneticAlgorithm<G, C>> {
        let factory = self.factory.ok_or_else(|| {
            GeneticError::Configuration("Genotype factory not specified".to_string())
        })?;

        let function = self.function.ok_or_else(|| {
            GeneticError::Configuration("Fitness function not specified".to_string())
        })?;

        let alterer: Arc<dyn Alterer<G, C>> = match self.alterer {
            Some(alterer) => alterer,
            None => Arc::new(CompositeAlterer::join(
                Arc::new(SinglePointCrossover::new(0.2)?),
                Arc::new(Mutator::new(0.15)?),
            )),
        };

        let parameters = Parameters {
            options: self.options.unwrap_or_default(),
            survivor_selector: self
                .survivor_selector
                .unwrap_or_else(|| Arc::new(TournamentSelector::default())),
            offspring_selector: self
                .offspring_selector
                .unwrap_or_else(|| Arc::new(TournamentSelector::default())),
            alterer,
        };

        let executor = self.executor.unwrap_or_default();
        info!(
            population_size = parameters.options.get_population_size(),
            optimize = ?parameters.options.get_optimize(),
            inline = executor.is_inline(),
            "Engine created"
        );

        Ok(GeneticAlgorithm::new(
            factory,
            function,
            self.scaler.unwrap_or_else(|| Arc::new(IdentityScaler)),
            executor,
            parameters,
        ))
    }
}

impl<G: Gene, C: Fitness> Default for GeneticAlgorithmBuilder<G, C> {
    fn default() -> Self {
        Self::new()
    }
}
