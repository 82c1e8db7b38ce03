use serde::{Deserialize, Serialize};
use std::fmt;

/// One parsed line of a trade log.
///
/// Only `instrument` and `price` are used downstream; `timestamp` and
/// `quantity` are kept as the raw text they were read from.
#[derive(Debug, Clone, PartialEq)]
pub struct TradeRecord {
    pub instrument: String,
    pub timestamp: String,
    pub price: f64,
    pub quantity: String,
}

/// Volatility of a single instrument, produced once per trade file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VolatilityResult {
    pub instrument: String,
    /// Percentage spread, rounded to 2 decimal places.
    pub volatility: f64,
}

impl VolatilityResult {
    pub fn new(instrument: impl Into<String>, volatility: f64) -> Self {
        Self {
            instrument: instrument.into(),
            volatility,
        }
    }
}

/// How the running price range is tracked while a file is parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PriceTracking {
    /// Min and max are updated independently, seeded from the first price.
    #[default]
    Independent,
    /// Zero means "no minimum yet", and the minimum is only checked when the
    /// price does not set a new maximum.
    Legacy,
}

impl PriceTracking {
    /// Parse a tracking mode name.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "independent" => Some(PriceTracking::Independent),
            "legacy" => Some(PriceTracking::Legacy),
            _ => None,
        }
    }
}

impl fmt::Display for PriceTracking {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PriceTracking::Independent => write!(f, "independent"),
            PriceTracking::Legacy => write!(f, "legacy"),
        }
    }
}
