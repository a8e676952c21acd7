//! Where octave tasks run.

use std::sync::Arc;

use rayon::{ThreadPool, ThreadPoolBuilder};

use crate::error::ConfigError;

/// Worker pool selection for layered generators.
///
/// Cloning a `Dedicated` scheduler shares the pool, so several generators can
/// interleave their octave tasks on the same workers.
#[derive(Clone, Debug, Default)]
pub enum Scheduler {
    /// Rayon's global pool.
    #[default]
    Shared,
    /// A pool owned by the caller.
    Dedicated(Arc<ThreadPool>),
}

impl Scheduler {
    /// Starts a dedicated pool of `threads` workers. Zero picks rayon's default.
    pub fn dedicated(threads: usize) -> Result<Self, ConfigError> {
        let pool = ThreadPoolBuilder::new()
            .num_threads(threads)
            .thread_name(|index| format!("stratum-layer-{index}"))
            .build()?;
        log::debug!(
            "Started dedicated layer pool with {} threads",
            pool.current_num_threads()
        );
        Ok(Self::Dedicated(Arc::new(pool)))
    }

    /// Runs `op` with this scheduler's pool as the target of any parallel iterators inside it.
    pub fn install<OP, R>(&self, op: OP) -> R
    where
        OP: FnOnce() -> R + Send,
        R: Send,
    {
        match self {
            Self::Shared => op(),
            Self::Dedicated(pool) => pool.install(op),
        }
    }

    /// Number of worker threads.
    #[must_use]
    pub fn threads(&self) -> usize {
        match self {
            Self::Shared => rayon::current_num_threads(),
            Self::Dedicated(pool) => pool.current_num_threads(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::thread;

    use super::*;

    #[test]
    fn test_dedicated_pool_size() {
        let scheduler = Scheduler::dedicated(3).expect("pool starts");
        assert_eq!(scheduler.threads(), 3);
        let name = scheduler.install(|| thread::current().name().map(str::to_owned));
        assert!(name.is_some_and(|name| name.starts_with("stratum-layer-")));
    }

    #[test]
    fn test_clone_shares_pool() {
        let scheduler = Scheduler::dedicated(2).expect("pool starts");
        let clone = scheduler.clone();
        match (&scheduler, &clone) {
            (Scheduler::Dedicated(a), Scheduler::Dedicated(b)) => assert!(Arc::ptr_eq(a, b)),
            _ => panic!("expected dedicated schedulers"),
        }
    }

    #[test]
    fn test_shared_runs_inline() {
        assert_eq!(Scheduler::default().install(|| 7), 7);
        assert!(Scheduler::Shared.threads() >= 1);
    }
}
