//! Predicates for [`GeneticAlgorithm::evolve_while`](crate::evolution::GeneticAlgorithm::evolve_while).
//!
//! Each predicate returns `true` as long as evolution should continue.
//!
//! ```rust
//! use genevo::evolution::termination;
//! # use genevo::evolution::Statistics;
//! # fn check(stats: &Statistics<f64>) -> bool {
//! let mut limit = termination::generation_limit::<f64>(100);
//! limit(stats)
//! # }
//! ```

use std::cmp::Ordering;

use crate::evolution::statistics::Statistics;
use crate::fitness::Fitness;

/// Continues until `generations` generations have been created.
pub fn generation_limit<C: Fitness>(generations: u64) -> impl FnMut(&Statistics<C>) -> bool {
    move |statistics| statistics.generation() < generations
}

/// Continues until the best fitness has not improved for `generations`
/// consecutive generations.
pub fn steady_fitness<C: Fitness>(generations: u64) -> impl FnMut(&Statistics<C>) -> bool {
    let mut best: Option<C> = None;
    let mut stable = 0;
    move |statistics| {
        let improved = match &best {
            Some(best) => {
                statistics
                    .optimize()
                    .compare(statistics.best_fitness(), best)
                    == Ordering::Greater
            }
            None => true,
        };
        if improved {
            best = Some(statistics.best_fitness().clone());
            stable = 0;
        } else {
            stable += 1;
        }
        stable < generations
    }
}

/// Continues until the best fitness reaches `threshold`.
pub fn fitness_threshold<C: Fitness>(threshold: C) -> impl FnMut(&Statistics<C>) -> bool {
    move |statistics| {
        statistics
            .optimize()
            .compare(statistics.best_fitness(), &threshold)
            == Ordering::Less
    }
}
