//! End-to-end volatility scan over a list of trade files.

use crate::config::ScannerConfig;
use crate::services::collector::{CollectorStats, ResultCollector};
use crate::services::parser::RecordParser;
use crate::services::ranker::Ranker;
use crate::services::worker_pool::{PoolStats, WorkerPool};
use crate::types::{RankedList, Report, ResultTable};
use std::path::PathBuf;
use std::time::Instant;
use tracing::info;

/// Everything a scan produced.
#[derive(Debug, Clone)]
pub struct ScanOutcome {
    pub table: ResultTable,
    pub ranked: RankedList,
    pub report: Report,
    pub pool: PoolStats,
    pub collector: CollectorStats,
}

/// Wires the worker pool, collector and ranker together.
pub struct VolatilityScanner {
    config: ScannerConfig,
}

impl VolatilityScanner {
    pub fn new(config: ScannerConfig) -> Self {
        Self { config }
    }

    /// Parse every file, collect the results and rank them.
    pub async fn run(&self, paths: Vec<PathBuf>) -> ScanOutcome {
        let started = Instant::now();
        info!(
            "Scanning {} trade files with up to {} workers ({} price tracking)",
            paths.len(),
            self.config.max_workers,
            self.config.price_tracking
        );

        let (tx, collector) = ResultCollector::channel(self.config.channel_capacity);
        let mut pool = WorkerPool::new(
            RecordParser::new(self.config.price_tracking),
            self.config.max_workers,
        );
        pool.spawn_all(paths, tx);

        let (table, collector_stats) = collector.collect().await;
        let pool_stats = pool.join().await;

        let (ranked, report) = Ranker::new(self.config.bucket_size).report(&table);

        info!(
            "Collected {} instruments from {} files ({} failed) in {:?}",
            table.len(),
            pool_stats.spawned,
            pool_stats.failed + pool_stats.panicked,
            started.elapsed()
        );

        ScanOutcome {
            table,
            ranked,
            report,
            pool: pool_stats,
            collector: collector_stats,
        }
    }
}

impl Default for VolatilityScanner {
    fn default() -> Self {
        Self::new(ScannerConfig::default())
    }
}
