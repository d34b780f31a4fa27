//! Sparse stochastic iteration over `[0, n)`.
//!
//! An [`IndexStream`] yields a strictly increasing sequence of indices, each
//! included independently with probability `p`, without materializing a
//! boolean mask. Mutators and recombinators use it to decide which
//! individuals, chromosomes and genes they touch.

use std::iter::FusedIterator;

use crate::error::{check_probability, Result};
use crate::rng::RandomRegistry;

/// `2^32`, the size of the `u32` output range the threshold is mapped onto.
const RANGE: f64 = 4_294_967_296.0;

/// Lazy, finite, non-restartable stream of indices in `[0, n)`.
#[derive(Debug, Clone)]
pub struct IndexStream {
    n: usize,
    threshold: u64,
    position: usize,
}

impl IndexStream {
    /// Creates a stream over `[0, n)` where every index is selected with
    /// probability `probability`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if `probability` is not in `[0, 1]`.
    pub fn new(n: usize, probability: f64) -> Result<Self> {
        let probability = check_probability(probability, "Index probability")?;
        let threshold = (probability * RANGE).round() as u64;
        Ok(Self {
            n,
            threshold,
            // Nothing can ever be selected, so the stream starts exhausted.
            position: if threshold == 0 { n } else { 0 },
        })
    }

    fn selects_all(&self) -> bool {
        self.threshold >= RANGE as u64
    }
}

impl Iterator for IndexStream {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        if self.selects_all() {
            let index = self.position;
            if index < self.n {
                self.position += 1;
                return Some(index);
            }
            return None;
        }

        while self.position < self.n {
            let index = self.position;
            self.position += 1;
            if u64::from(RandomRegistry::next_u32()) < self.threshold {
                return Some(index);
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.n.saturating_sub(self.position);
        if self.selects_all() {
            (remaining, Some(remaining))
        } else {
            (0, Some(remaining))
        }
    }
}

impl FusedIterator for IndexStream {}
