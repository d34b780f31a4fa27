//! Fitness values, fitness functions and fitness scalers.

use std::fmt::Debug;

use crate::gene::Gene;
use crate::genotype::Genotype;

/// Marker for types usable as fitness values.
///
/// Fitness values must be ordered. A value that is not comparable to itself,
/// such as NaN, ranks below every other value in both optimization
/// directions.
pub trait Fitness: PartialOrd + Clone + Debug + Send + Sync + 'static {}

impl<T> Fitness for T where T: PartialOrd + Clone + Debug + Send + Sync + 'static {}

/// Fitness values that can be converted to `f64`, as required by the
/// fitness-proportional selectors.
pub trait NumericFitness: Fitness {
    fn to_f64(&self) -> f64;
}

macro_rules! numeric_fitness {
    ($($t:ty),*) => {
        $(
            impl NumericFitness for $t {
                fn to_f64(&self) -> f64 {
                    *self as f64
                }
            }
        )*
    };
}

numeric_fitness!(f64, f32, i8, i16, i32, i64, u8, u16, u32, u64, usize, isize);

/// Maps a genotype to its raw fitness.
///
/// The function may be arbitrarily expensive; the engine evaluates it at most
/// once per phenotype. Implemented for every `Fn(&Genotype<G>) -> C` closure.
pub trait FitnessFunction<G: Gene, C: Fitness>: Send + Sync {
    fn evaluate(&self, genotype: &Genotype<G>) -> C;
}

impl<G, C, F> FitnessFunction<G, C> for F
where
    G: Gene,
    C: Fitness,
    F: Fn(&Genotype<G>) -> C + Send + Sync,
{
    fn evaluate(&self, genotype: &Genotype<G>) -> C {
        self(genotype)
    }
}

/// Transforms a raw fitness value before it is used for selection.
pub trait FitnessScaler<C: Fitness>: Send + Sync {
    fn scale(&self, raw: C) -> C;
}

impl<C, F> FitnessScaler<C> for F
where
    C: Fitness,
    F: Fn(C) -> C + Send + Sync,
{
    fn scale(&self, raw: C) -> C {
        self(raw)
    }
}

/// The scaler that returns the raw fitness unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityScaler;

impl<C: Fitness> FitnessScaler<C> for IdentityScaler {
    fn scale(&self, raw: C) -> C {
        raw
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gene::{DoubleGene, Gene};

    #[test]
    fn test_closure_fitness_function() {
        let genotype = Genotype::of(vec![DoubleGene::chromosome(0.0, 1.0, 1).unwrap()]).unwrap();
        let function = |gt: &Genotype<DoubleGene>| *gt.gene().allele();
        assert_eq!(function.evaluate(&genotype), *genotype.gene().allele());
    }

    #[test]
    fn test_scalers() {
        let square = |x: f64| x * x;
        assert_eq!(square.scale(3.0), 9.0);
        assert_eq!(FitnessScaler::<f64>::scale(&IdentityScaler, 3.0), 3.0);
    }

    #[test]
    fn test_numeric_fitness() {
        assert_eq!(7i32.to_f64(), 7.0);
        assert_eq!(2.5f32.to_f64(), 2.5);
    }
}
