use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Instrument name to its latest volatility.
pub type ResultTable = HashMap<String, f64>;

/// A single instrument in ranked order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedEntry {
    pub instrument: String,
    pub volatility: f64,
}

impl RankedEntry {
    pub fn new(instrument: impl Into<String>, volatility: f64) -> Self {
        Self {
            instrument: instrument.into(),
            volatility,
        }
    }
}

/// Entries sorted by volatility descending, ties by instrument ascending.
pub type RankedList = Vec<RankedEntry>;

/// The three report groups.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReportBuckets {
    /// Top N entries, highest first.
    pub highest: Vec<RankedEntry>,
    /// Bottom N entries with non-zero volatility, highest first.
    pub lowest: Vec<RankedEntry>,
    /// Instruments with zero volatility, sorted by name.
    pub zero: Vec<String>,
}

/// Final output of a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "entries", rename_all = "lowercase")]
pub enum Report {
    /// Too few instruments to bucket: the whole ranked list.
    Flat(RankedList),
    /// Highest / lowest / zero groups.
    Buckets(ReportBuckets),
}
