//! # Random Registry
//!
//! Every algorithm in this crate fetches its randomness from the [`RandomRegistry`]
//! at the point of use instead of caching a generator. By default each thread
//! draws from its own `rand::thread_rng()`. A caller can establish a scope with a
//! deterministic [`RandomEngine`]; every random draw made on that thread while
//! the scope is active uses the scoped engine, and leaving the scope restores
//! whatever engine was active before.
//!
//! ## Example
//!
//! ```rust
//! use genevo::rng::{RandomEngine, RandomRegistry};
//!
//! let first = RandomRegistry::scope(RandomEngine::from_seed(7), || {
//!     (0..3).map(|_| RandomRegistry::next_u32()).collect::<Vec<_>>()
//! });
//! let second = RandomRegistry::scope(RandomEngine::from_seed(7), || {
//!     (0..3).map(|_| RandomRegistry::next_u32()).collect::<Vec<_>>()
//! });
//!
//! assert_eq!(first, second);
//! ```
//!
//! ## Thread-safety
//!
//! Scopes are per thread. Work submitted through an [`Executor`](crate::executor::Executor)
//! is forked from the submitting thread's current engine, so a seeded run stays
//! reproducible even when its tasks execute on a thread pool.

use std::cell::RefCell;
use std::sync::OnceLock;

use rand::distributions::uniform::{SampleRange, SampleUniform};
use rand::{rngs::StdRng, thread_rng, Rng, RngCore, SeedableRng};
use thread_local::ThreadLocal;

type EngineStack = RefCell<Vec<RandomEngine>>;

static STACKS: OnceLock<ThreadLocal<EngineStack>> = OnceLock::new();

fn stack() -> &'static EngineStack {
    STACKS
        .get_or_init(ThreadLocal::new)
        .get_or(|| RefCell::new(Vec::new()))
}

/// A seedable random engine that can be installed into the registry.
#[derive(Clone, Debug)]
pub struct RandomEngine {
    rng: StdRng,
}

impl RandomEngine {
    /// Creates a new engine seeded from system entropy.
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Creates a new engine with a specific seed.
    ///
    /// This is useful for reproducible tests and benchmarks.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomEngine {
    fn default() -> Self {
        Self::from_entropy()
    }
}

impl RngCore for RandomEngine {
    fn next_u32(&mut self) -> u32 {
        self.rng.next_u32()
    }

    fn next_u64(&mut self) -> u64 {
        self.rng.next_u64()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        self.rng.fill_bytes(dest)
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> std::result::Result<(), rand::Error> {
        self.rng.try_fill_bytes(dest)
    }
}

/// Thread-aware access point for the random engine currently in effect.
pub struct RandomRegistry;

impl RandomRegistry {
    /// Runs `f` with the engine currently in effect on this thread.
    ///
    /// `f` must not call back into the registry; every helper on this type
    /// borrows the engine for the duration of a single draw.
    pub fn with<R>(f: impl FnOnce(&mut dyn RngCore) -> R) -> R {
        if let Some(engine) = stack().borrow_mut().last_mut() {
            return f(engine);
        }
        f(&mut thread_rng())
    }

    /// Runs `f` with `engine` installed as this thread's random engine.
    ///
    /// Scopes nest: the previously active engine is restored when `f`
    /// returns or unwinds.
    pub fn scope<R>(engine: RandomEngine, f: impl FnOnce() -> R) -> R {
        let stack = stack();
        stack.borrow_mut().push(engine);
        let _guard = ScopeGuard { stack };
        f()
    }

    /// Returns `true` if a scoped engine is active on this thread.
    pub fn is_scoped() -> bool {
        !stack().borrow().is_empty()
    }

    pub fn next_u32() -> u32 {
        Self::with(|rng| rng.next_u32())
    }

    pub fn next_u64() -> u64 {
        Self::with(|rng| rng.next_u64())
    }

    /// Draws a uniform `f64` from `[0, 1)`.
    pub fn next_f64() -> f64 {
        Self::with(|rng| rng.gen::<f64>())
    }

    /// Generates a random value in the given range.
    pub fn gen_range<T, R>(range: R) -> T
    where
        T: SampleUniform,
        R: SampleRange<T>,
    {
        Self::with(|rng| rng.gen_range(range))
    }

    /// Returns `true` with probability `p`. `p` must lie in `[0, 1]`.
    pub fn gen_bool(p: f64) -> bool {
        Self::with(|rng| rng.gen_bool(p))
    }

    /// Draws `k` distinct indices from `[0, n)`, returned in increasing order.
    ///
    /// Panics if `k > n`.
    pub fn subset(n: usize, k: usize) -> Vec<usize> {
        let mut indices = Self::with(|rng| rand::seq::index::sample(rng, n, k).into_vec());
        indices.sort_unstable();
        indices
    }

    /// Creates a new engine seeded from the current engine.
    ///
    /// Used to hand reproducible randomness to work running on another thread.
    pub fn fork() -> RandomEngine {
        RandomEngine::from_seed(Self::next_u64())
    }
}

struct ScopeGuard {
    stack: &'static EngineStack,
}

impl Drop for ScopeGuard {
    fn drop(&mut self) {
        self.stack.borrow_mut().pop();
    }
}
