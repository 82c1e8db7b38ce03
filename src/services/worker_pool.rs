//! Bounded pool of per-file parsing workers.
//!
//! Every input path gets its own task. A semaphore caps how many of them
//! parse at the same time; the rest wait for a permit. Each worker sends at
//! most one result and drops its sender clone when it exits, so the intake
//! channel closes once the last worker is done.

use crate::error::Result;
use crate::services::parser::RecordParser;
use crate::types::VolatilityResult;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::{mpsc, Semaphore};
use tokio::task::JoinSet;
use tracing::{debug, error, warn};

/// How a single worker ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkerOutcome {
    /// Result handed to the collector.
    Succeeded,
    /// The file could not be turned into a result.
    Failed,
    /// The parser panicked.
    Panicked,
    /// Parsed, but the collector was gone.
    Undelivered,
}

/// Counters for one pool run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PoolStats {
    pub spawned: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub panicked: usize,
    pub undelivered: usize,
}

impl PoolStats {
    fn record(&mut self, outcome: WorkerOutcome) {
        match outcome {
            WorkerOutcome::Succeeded => self.succeeded += 1,
            WorkerOutcome::Failed => self.failed += 1,
            WorkerOutcome::Panicked => self.panicked += 1,
            WorkerOutcome::Undelivered => self.undelivered += 1,
        }
    }
}

/// Runs one [`RecordParser`] per file with a concurrency cap.
pub struct WorkerPool {
    parser: RecordParser,
    permits: Arc<Semaphore>,
    tasks: JoinSet<WorkerOutcome>,
    spawned: usize,
}

impl WorkerPool {
    /// Create a pool that parses at most `max_workers` files at once.
    pub fn new(parser: RecordParser, max_workers: usize) -> Self {
        Self {
            parser,
            permits: Arc::new(Semaphore::new(max_workers.max(1))),
            tasks: JoinSet::new(),
            spawned: 0,
        }
    }

    /// Spawn one worker per path. The pool's own sender is dropped on return.
    pub fn spawn_all<I>(&mut self, paths: I, tx: mpsc::Sender<VolatilityResult>)
    where
        I: IntoIterator<Item = PathBuf>,
    {
        for path in paths {
            self.spawn(path, tx.clone());
        }
    }

    /// Spawn a single worker for `path`.
    pub fn spawn(&mut self, path: PathBuf, tx: mpsc::Sender<VolatilityResult>) {
        let parser = self.parser;
        self.spawn_with(path, tx, move |path| parser.parse_file(path));
    }

    fn spawn_with<F>(&mut self, path: PathBuf, tx: mpsc::Sender<VolatilityResult>, parse: F)
    where
        F: FnOnce(&Path) -> Result<VolatilityResult> + Send + 'static,
    {
        let permits = self.permits.clone();
        self.spawned += 1;

        self.tasks.spawn(async move {
            let Ok(permit) = permits.acquire_owned().await else {
                return WorkerOutcome::Failed;
            };

            let task_path = path.clone();
            let parsed = tokio::task::spawn_blocking(move || parse(&task_path)).await;
            drop(permit);

            match parsed {
                Ok(Ok(result)) => {
                    debug!("{} -> {} {} %", path.display(), result.instrument, result.volatility);
                    if tx.send(result).await.is_err() {
                        warn!("Collector closed before result for {} was delivered", path.display());
                        WorkerOutcome::Undelivered
                    } else {
                        WorkerOutcome::Succeeded
                    }
                }
                Ok(Err(e)) => {
                    warn!("Skipping {}: {}", path.display(), e);
                    WorkerOutcome::Failed
                }
                Err(e) => {
                    error!("Worker for {} panicked: {}", path.display(), e);
                    WorkerOutcome::Panicked
                }
            }
        });
    }

    /// Wait for every worker to finish.
    pub async fn join(mut self) -> PoolStats {
        let mut stats = PoolStats {
            spawned: self.spawned,
            ..PoolStats::default()
        };

        while let Some(joined) = self.tasks.join_next().await {
            match joined {
                Ok(outcome) => stats.record(outcome),
                Err(e) => {
                    error!("Worker task aborted: {}", e);
                    stats.record(WorkerOutcome::Panicked);
                }
            }
        }

        stats
    }
}
