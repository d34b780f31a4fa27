use super::Gene;
use crate::chromosome::Chromosome;
use crate::error::Result;
use crate::rng::RandomRegistry;

/// A single bit.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BitGene {
    value: bool,
}

impl BitGene {
    pub const TRUE: BitGene = BitGene { value: true };
    pub const FALSE: BitGene = BitGene { value: false };

    pub fn of(value: bool) -> Self {
        Self { value }
    }

    pub fn bit(&self) -> bool {
        self.value
    }

    /// Creates a chromosome of `length` random bits.
    pub fn chromosome(length: usize) -> Result<Chromosome<BitGene>> {
        Chromosome::of(
            (0..length)
                .map(|_| BitGene::of(RandomRegistry::gen_bool(0.5)))
                .collect::<Vec<_>>(),
        )
    }
}

impl Gene for BitGene {
    type Allele = bool;

    fn allele(&self) -> &bool {
        &self.value
    }

    fn is_valid(&self) -> bool {
        true
    }

    fn new_instance(&self) -> Self {
        Self::of(RandomRegistry::gen_bool(0.5))
    }
}
