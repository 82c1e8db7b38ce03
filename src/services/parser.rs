//! Trade-log parsing and per-file volatility.
//!
//! A trade log holds one instrument, one trade per line:
//! `instrument,timestamp,price,quantity`. Lines whose price is not a number
//! (withdrawn quotes carry an alphabetic marker there) are skipped.

use crate::error::{Result, VolatilityError};
use crate::types::{PriceTracking, TradeRecord, VolatilityResult};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::debug;

/// Number of comma-separated fields in a well-formed line.
const FIELD_COUNT: usize = 4;

/// Parse a single trade-log line.
///
/// Returns `None` for blank lines, lines with the wrong number of fields and
/// lines whose price is not a finite, non-negative number.
pub fn parse_line(line: &str) -> Option<TradeRecord> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }

    let fields: Vec<&str> = line.split(',').map(str::trim).collect();
    if fields.len() != FIELD_COUNT || fields[0].is_empty() {
        return None;
    }

    let price_field = fields[2];
    if is_alphabetic(price_field) {
        return None;
    }
    let price: f64 = price_field.parse().ok()?;
    if !price.is_finite() || price < 0.0 {
        return None;
    }

    Some(TradeRecord {
        instrument: fields[0].to_string(),
        timestamp: fields[1].to_string(),
        price,
        quantity: fields[3].to_string(),
    })
}

fn is_alphabetic(field: &str) -> bool {
    !field.is_empty() && field.chars().all(char::is_alphabetic)
}

/// Compute the volatility percentage for a price range.
///
/// `((max - min) / ((max + min) / 2)) * 100`, rounded to 2 decimal places.
pub fn volatility(instrument: &str, min: f64, max: f64) -> Result<f64> {
    let midpoint = (max + min) / 2.0;
    if midpoint == 0.0 {
        return Err(VolatilityError::DivisionUndefined {
            instrument: instrument.to_string(),
        });
    }
    Ok(round2((max - min) / midpoint * 100.0))
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Running min/max over the prices of one file.
#[derive(Debug, Clone)]
pub struct PriceRange {
    mode: PriceTracking,
    min: f64,
    max: f64,
    observed: usize,
}

impl PriceRange {
    pub fn new(mode: PriceTracking) -> Self {
        Self {
            mode,
            min: 0.0,
            max: 0.0,
            observed: 0,
        }
    }

    /// Fold one price into the range.
    pub fn observe(&mut self, price: f64) {
        match self.mode {
            PriceTracking::Independent => {
                if self.observed == 0 {
                    self.min = price;
                    self.max = price;
                } else {
                    self.min = self.min.min(price);
                    self.max = self.max.max(price);
                }
            }
            PriceTracking::Legacy => {
                if self.min == 0.0 {
                    self.min = price;
                }
                if price > self.max {
                    self.max = price;
                } else if price < self.min {
                    self.min = price;
                }
            }
        }
        self.observed += 1;
    }

    /// `(min, max)` once at least one price was observed.
    pub fn bounds(&self) -> Option<(f64, f64)> {
        (self.observed > 0).then_some((self.min, self.max))
    }

    pub fn observed(&self) -> usize {
        self.observed
    }
}

/// Reduces one trade log to a single [`VolatilityResult`].
#[derive(Debug, Clone, Copy, Default)]
pub struct RecordParser {
    mode: PriceTracking,
}

impl RecordParser {
    pub fn new(mode: PriceTracking) -> Self {
        Self { mode }
    }

    /// Parse the trade log at `path`.
    pub fn parse_file(&self, path: &Path) -> Result<VolatilityResult> {
        let file = File::open(path).map_err(|source| VolatilityError::UnreadableFile {
            path: path.to_path_buf(),
            source,
        })?;
        self.parse_reader(BufReader::new(file), path)
    }

    /// Parse a trade log from any buffered reader. `source` names the input in errors.
    pub fn parse_reader<R: BufRead>(&self, reader: R, source: &Path) -> Result<VolatilityResult> {
        let mut range = PriceRange::new(self.mode);
        let mut instrument: Option<String> = None;
        let mut skipped = 0usize;

        for line in reader.lines() {
            let line = line.map_err(|source_err| VolatilityError::UnreadableFile {
                path: source.to_path_buf(),
                source: source_err,
            })?;

            match parse_line(&line) {
                Some(record) => {
                    range.observe(record.price);
                    instrument = Some(record.instrument);
                }
                None => skipped += 1,
            }
        }

        let (Some(instrument), Some((min, max))) = (instrument, range.bounds()) else {
            return Err(VolatilityError::EmptyFile(source.to_path_buf()));
        };

        let volatility = volatility(&instrument, min, max)?;
        debug!(
            "{}: {} trades, {} skipped lines, min {} max {} -> {} %",
            instrument,
            range.observed(),
            skipped,
            min,
            max,
            volatility
        );

        Ok(VolatilityResult::new(instrument, volatility))
    }
}
