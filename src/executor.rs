//! # Executor
//!
//! The engine never creates threads itself. It hands closures to an
//! [`Executor`] and blocks until they have completed:
//!
//! - [`Executor::Inline`] runs every task on the calling thread, in submission order.
//! - [`Executor::Global`] uses rayon's global work-stealing pool.
//! - [`Executor::Pool`] uses a dedicated rayon thread pool.
//!
//! Tasks submitted through [`TaskScope::spawn`] and [`Executor::join`] run
//! with their own random engine, forked from the submitting thread's current
//! engine at submission time. A seeded run therefore produces the same
//! results on every executor.
//!
//! ## Example
//!
//! ```rust
//! use genevo::executor::Executor;
//!
//! let executor = Executor::Global;
//! let mut left = 0;
//! let mut right = 0;
//! let (l, r) = (&mut left, &mut right);
//! executor.scope(move |scope| {
//!     scope.spawn(move || *l = 1);
//!     scope.spawn(move || *r = 2);
//! });
//! assert_eq!((left, right), (1, 2));
//! ```

use std::marker::PhantomData;
use std::sync::Arc;

use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};

use crate::error::{Result, ResultExt};
use crate::rng::RandomRegistry;

/// Where the engine's parallel phases run.
#[derive(Debug, Clone, Default)]
pub enum Executor {
    /// Runs all tasks on the calling thread.
    Inline,
    /// Runs tasks on rayon's global pool.
    #[default]
    Global,
    /// Runs tasks on a dedicated rayon pool.
    Pool(Arc<ThreadPool>),
}

impl Executor {
    /// Creates an executor backed by a dedicated pool of `threads` threads.
    ///
    /// # Errors
    ///
    /// Returns an error if the thread pool cannot be built.
    pub fn with_threads(threads: usize) -> Result<Self> {
        let pool = ThreadPoolBuilder::new()
            .num_threads(threads)
            .thread_name(|index| format!("genevo-worker-{}", index))
            .build()
            .context("Failed to build thread pool")?;
        Ok(Executor::Pool(Arc::new(pool)))
    }

    /// Opens a task scope and blocks until every task spawned in it has completed.
    pub fn scope<'scope, F, R>(&self, f: F) -> R
    where
        F: FnOnce(&TaskScope<'_, 'scope>) -> R + Send,
        R: Send,
    {
        match self {
            Executor::Inline => f(&TaskScope {
                kind: ScopeKind::Inline(PhantomData),
            }),
            Executor::Global => rayon::scope(|s| {
                f(&TaskScope {
                    kind: ScopeKind::Rayon(s),
                })
            }),
            Executor::Pool(pool) => pool.scope(|s| {
                f(&TaskScope {
                    kind: ScopeKind::Rayon(s),
                })
            }),
        }
    }

    /// Runs `a` and `b`, potentially in parallel, and returns both results.
    pub fn join<A, B, RA, RB>(&self, a: A, b: B) -> (RA, RB)
    where
        A: FnOnce() -> RA + Send,
        B: FnOnce() -> RB + Send,
        RA: Send,
        RB: Send,
    {
        let (engine_a, engine_b) = (RandomRegistry::fork(), RandomRegistry::fork());
        let a = move || RandomRegistry::scope(engine_a, a);
        let b = move || RandomRegistry::scope(engine_b, b);
        match self {
            Executor::Inline => (a(), b()),
            Executor::Global => rayon::join(a, b),
            Executor::Pool(pool) => pool.join(a, b),
        }
    }

    /// Calls `f` on every item, in parallel unless this is the inline executor.
    pub fn for_each<T, F>(&self, items: &[T], f: F)
    where
        T: Sync,
        F: Fn(&T) + Send + Sync,
    {
        match self {
            Executor::Inline => items.iter().for_each(f),
            Executor::Global => items.par_iter().for_each(f),
            Executor::Pool(pool) => pool.install(|| items.par_iter().for_each(f)),
        }
    }

    pub fn is_inline(&self) -> bool {
        matches!(self, Executor::Inline)
    }
}

/// Handle for spawning tasks inside [`Executor::scope`].
pub struct TaskScope<'a, 'scope> {
    kind: ScopeKind<'a, 'scope>,
}

enum ScopeKind<'a, 'scope> {
    Inline(PhantomData<&'a &'scope ()>),
    Rayon(&'a rayon::Scope<'scope>),
}

impl<'a, 'scope> TaskScope<'a, 'scope> {
    /// Submits `task`. It is guaranteed to have completed when the enclosing
    /// [`Executor::scope`] call returns.
    pub fn spawn<F>(&self, task: F)
    where
        F: FnOnce() + Send + 'scope,
    {
        let engine = RandomRegistry::fork();
        match &self.kind {
            ScopeKind::Inline(_) => RandomRegistry::scope(engine, task),
            ScopeKind::Rayon(scope) => {
                scope.spawn(move |_| RandomRegistry::scope(engine, task));
            }
        }
    }
}
