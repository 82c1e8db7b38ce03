//! Single-writer result collection.
//!
//! Workers hand results over a bounded channel; only the collector touches
//! the [`ResultTable`]. Collection ends when every sender is dropped.

use crate::types::{ResultTable, VolatilityResult};
use serde::Serialize;
use tokio::sync::mpsc;
use tracing::debug;

/// Default intake channel capacity.
pub const DEFAULT_CHANNEL_CAPACITY: usize = 5;

/// Counters for one collection pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CollectorStats {
    /// Results received from workers.
    pub received: usize,
    /// Results that replaced an earlier one for the same instrument.
    pub overwritten: usize,
}

/// Receiving end of the worker intake channel plus the table it fills.
pub struct ResultCollector {
    rx: mpsc::Receiver<VolatilityResult>,
    table: ResultTable,
    stats: CollectorStats,
}

impl ResultCollector {
    /// Create a bounded intake channel and the collector reading from it.
    pub fn channel(capacity: usize) -> (mpsc::Sender<VolatilityResult>, Self) {
        let (tx, rx) = mpsc::channel(capacity.max(1));
        (
            tx,
            Self {
                rx,
                table: ResultTable::new(),
                stats: CollectorStats::default(),
            },
        )
    }

    /// Record one result. A later result for the same instrument wins.
    pub fn absorb(&mut self, result: VolatilityResult) {
        self.stats.received += 1;
        if let Some(previous) = self.table.insert(result.instrument.clone(), result.volatility) {
            self.stats.overwritten += 1;
            debug!(
                "{} reported twice, {} % replaced by {} %",
                result.instrument, previous, result.volatility
            );
        }
    }

    /// Receive until all senders are gone, then hand back the table.
    pub async fn collect(mut self) -> (ResultTable, CollectorStats) {
        while let Some(result) = self.rx.recv().await {
            self.absorb(result);
        }
        (self.table, self.stats)
    }
}
