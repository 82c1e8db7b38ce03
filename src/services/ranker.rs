//! Ranking and report bucketing.

use crate::types::{RankedEntry, RankedList, Report, ReportBuckets, ResultTable};
use std::cmp::Ordering;

/// Default number of entries in the highest and lowest buckets.
pub const DEFAULT_BUCKET_SIZE: usize = 3;

/// Volatility descending, then instrument ascending.
fn by_volatility_desc(a: &RankedEntry, b: &RankedEntry) -> Ordering {
    b.volatility
        .total_cmp(&a.volatility)
        .then_with(|| a.instrument.cmp(&b.instrument))
}

/// Sort every table entry into ranked order.
pub fn rank(table: &ResultTable) -> RankedList {
    let mut ranked: RankedList = table
        .iter()
        .map(|(instrument, volatility)| RankedEntry::new(instrument.clone(), *volatility))
        .collect();
    ranked.sort_by(by_volatility_desc);
    ranked
}

/// Split a ranked list into report buckets.
///
/// Buckets are only built when there are more than `3 * bucket_size`
/// entries; smaller datasets are reported as the flat list.
pub fn partition(ranked: &[RankedEntry], bucket_size: usize) -> Report {
    if ranked.len() <= bucket_size.saturating_mul(3) {
        return Report::Flat(ranked.to_vec());
    }

    let highest = ranked.iter().take(bucket_size).cloned().collect();

    let mut lowest = Vec::with_capacity(bucket_size);
    let mut zero = Vec::new();
    for entry in ranked.iter().rev() {
        if lowest.len() >= bucket_size {
            break;
        }
        if entry.volatility > 0.0 {
            lowest.push(entry.clone());
        } else if entry.volatility == 0.0 {
            zero.push(entry.instrument.clone());
        }
    }
    lowest.sort_by(by_volatility_desc);
    zero.sort();

    Report::Buckets(ReportBuckets {
        highest,
        lowest,
        zero,
    })
}

/// Ranks a result table and builds its report.
#[derive(Debug, Clone, Copy)]
pub struct Ranker {
    bucket_size: usize,
}

impl Ranker {
    pub fn new(bucket_size: usize) -> Self {
        Self { bucket_size }
    }

    pub fn report(&self, table: &ResultTable) -> (RankedList, Report) {
        let ranked = rank(table);
        let report = partition(&ranked, self.bucket_size);
        (ranked, report)
    }
}

impl Default for Ranker {
    fn default() -> Self {
        Self::new(DEFAULT_BUCKET_SIZE)
    }
}
