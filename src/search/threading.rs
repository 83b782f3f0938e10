//! Worker pool for root-parallel search.
//!
//! Root candidates are independent pure computations, so they are mapped over
//! a bounded rayon pool and collected in input order. The pool is optional:
//! with one thread, or when the pool cannot be built, work runs on the
//! calling thread with identical results.

use std::num::NonZeroUsize;
use std::thread;

use log::warn;
use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};

/// Threading configuration owned by the engine instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ThreadingConfig {
    /// Worker count; 0 means one per available hardware thread.
    pub requested_threads: usize,
}

impl ThreadingConfig {
    #[inline]
    pub fn with_threads(requested_threads: usize) -> Self {
        Self { requested_threads }
    }

    /// Effective worker count, always at least one.
    pub fn normalized_threads(self) -> usize {
        if self.requested_threads > 0 {
            return self.requested_threads;
        }
        thread::available_parallelism()
            .map(NonZeroUsize::get)
            .unwrap_or(1)
    }
}

#[derive(Debug)]
pub struct WorkerPool {
    pool: Option<ThreadPool>,
    threads: usize,
}

impl WorkerPool {
    pub fn new(config: ThreadingConfig) -> Self {
        let threads = config.normalized_threads();
        if threads == 1 {
            return Self::sequential();
        }

        match ThreadPoolBuilder::new()
            .num_threads(threads)
            .thread_name(|i| format!("ivory-search-{i}"))
            .build()
        {
            Ok(pool) => Self {
                pool: Some(pool),
                threads,
            },
            Err(err) => {
                warn!("failed to build {threads}-thread search pool ({err}); searching sequentially");
                Self::sequential()
            }
        }
    }

    /// A pool that runs everything on the calling thread.
    pub fn sequential() -> Self {
        Self {
            pool: None,
            threads: 1,
        }
    }

    #[inline]
    pub fn threads(&self) -> usize {
        self.threads
    }

    #[inline]
    pub fn is_parallel(&self) -> bool {
        self.pool.is_some()
    }

    /// Apply `f` to every item and return the results in input order.
    ///
    /// Blocks until every item has been processed.
    pub fn map_collect<T, U, F>(&self, items: &[T], f: F) -> Vec<U>
    where
        T: Sync,
        U: Send,
        F: Fn(&T) -> U + Send + Sync,
    {
        match &self.pool {
            Some(pool) => pool.install(|| items.par_iter().map(&f).collect()),
            None => items.iter().map(f).collect(),
        }
    }
}

impl Default for WorkerPool {
    fn default() -> Self {
        Self::new(ThreadingConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::{ThreadingConfig, WorkerPool};

    #[test]
    fn zero_threads_means_hardware_parallelism() {
        assert!(ThreadingConfig::default().normalized_threads() >= 1);
        assert_eq!(ThreadingConfig::with_threads(3).normalized_threads(), 3);
    }

    #[test]
    fn single_thread_config_is_sequential() {
        let pool = WorkerPool::new(ThreadingConfig::with_threads(1));
        assert!(!pool.is_parallel());
        assert_eq!(pool.threads(), 1);
    }

    #[test]
    fn results_keep_input_order() {
        let items: Vec<u64> = (0..100).collect();
        let parallel = WorkerPool::new(ThreadingConfig::with_threads(4));
        let sequential = WorkerPool::sequential();

        let a = parallel.map_collect(&items, |x| x * x);
        let b = sequential.map_collect(&items, |x| x * x);
        assert_eq!(a, b);
        assert_eq!(a[10], 100);
    }
}
