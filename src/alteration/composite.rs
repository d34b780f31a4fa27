use std::fmt;
use std::sync::Arc;

use crate::alteration::Alterer;
use crate::error::Result;
use crate::fitness::Fitness;
use crate::gene::Gene;
use crate::population::Population;

/// Applies a sequence of alterers to the same population.
///
/// Composites never nest: a composite passed to [`CompositeAlterer::of`] is
/// replaced by its leaf alterers, keeping their order.
pub struct CompositeAlterer<G: Gene, C: Fitness> {
    alterers: Vec<Arc<dyn Alterer<G, C>>>,
}

impl<G: Gene, C: Fitness> CompositeAlterer<G, C> {
    pub fn of(alterers: Vec<Arc<dyn Alterer<G, C>>>) -> Self {
        let mut flat = Vec::with_capacity(alterers.len());
        for alterer in alterers {
            match alterer.components() {
                Some(components) => flat.extend(components.iter().cloned()),
                None => flat.push(alterer),
            }
        }
        Self { alterers: flat }
    }

    /// Combines two alterers into one composite.
    pub fn join(first: Arc<dyn Alterer<G, C>>, second: Arc<dyn Alterer<G, C>>) -> Self {
        Self::of(vec![first, second])
    }

    /// The flattened leaf alterers, in application order.
    pub fn alterers(&self) -> &[Arc<dyn Alterer<G, C>>] {
        &self.alterers
    }
}

impl<G: Gene, C: Fitness> Clone for CompositeAlterer<G, C> {
    fn clone(&self) -> Self {
        Self {
            alterers: self.alterers.clone(),
        }
    }
}

impl<G: Gene, C: Fitness> fmt::Debug for CompositeAlterer<G, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.alterers.iter()).finish()
    }
}

impl<G: Gene, C: Fitness> Alterer<G, C> for CompositeAlterer<G, C> {
    fn alter(&self, population: &mut Population<G, C>, generation: u64) -> Result<usize> {
        let mut alterations = 0;
        for alterer in &self.alterers {
            alterations += alterer.alter(population, generation)?;
        }
        Ok(alterations)
    }

    fn probability(&self) -> f64 {
        1.0
    }

    fn components(&self) -> Option<&[Arc<dyn Alterer<G, C>>]> {
        Some(&self.alterers)
    }
}
