//! Starting link-processing runs in the background.

use std::thread;

use log::{error, info};

/// A unit of background work.
pub type Task = Box<dyn FnOnce() + Send + 'static>;

/// Runs tasks without waiting for them to finish.
pub trait Spawn: Send + Sync {
    fn spawn(&self, task: Task);
}

/// One OS thread per task, with no limit on how many run at once.
#[derive(Debug, Default)]
pub struct ThreadSpawner;

impl Spawn for ThreadSpawner {
    fn spawn(&self, task: Task) {
        if let Err(e) = thread::Builder::new().name("link".to_string()).spawn(task) {
            error!("Could not start link thread: {e}");
        }
    }
}

/// Fixed-size pool; tasks beyond the pool size wait in its queue.
pub struct PoolSpawner {
    pool: rayon::ThreadPool,
}

impl PoolSpawner {
    pub fn new(max_concurrent: usize) -> Result<Self, rayon::ThreadPoolBuildError> {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(max_concurrent)
            .thread_name(|i| format!("link-{i}"))
            .panic_handler(|_| error!("Link task panicked"))
            .build()?;

        Ok(Self { pool })
    }
}

impl Spawn for PoolSpawner {
    fn spawn(&self, task: Task) {
        self.pool.spawn(task);
    }
}

/// Pool of `limit` threads when a limit is set, a thread per task otherwise.
pub fn spawner(limit: Option<usize>) -> anyhow::Result<Box<dyn Spawn>> {
    match limit {
        Some(0) => anyhow::bail!("dispatch.max_concurrent_links must be at least 1"),
        Some(n) => {
            info!("Processing at most {n} links at once");
            Ok(Box::new(PoolSpawner::new(n)?))
        }
        None => Ok(Box::new(ThreadSpawner)),
    }
}
