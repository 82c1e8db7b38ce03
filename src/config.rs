use crate::services::collector::DEFAULT_CHANNEL_CAPACITY;
use crate::services::ranker::DEFAULT_BUCKET_SIZE;
use crate::types::PriceTracking;
use std::env;
use std::path::PathBuf;

/// Default directory scanned for trade logs.
pub const DEFAULT_DIRECTORY: &str = "trades";

/// Default trade log file extension.
pub const DEFAULT_FILE_EXTENSION: &str = "csv";

/// Report output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportFormat {
    #[default]
    Text,
    Json,
}

impl ReportFormat {
    /// Get the format from a string.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "text" => Some(ReportFormat::Text),
            "json" => Some(ReportFormat::Json),
            _ => None,
        }
    }
}

/// Settings for the parsing/collection/ranking pipeline.
#[derive(Debug, Clone)]
pub struct ScannerConfig {
    /// Entries in the highest and lowest buckets.
    pub bucket_size: usize,
    /// Maximum number of files parsed at the same time.
    pub max_workers: usize,
    /// Capacity of the worker-to-collector channel.
    pub channel_capacity: usize,
    /// Min/max tracking mode used by the parser.
    pub price_tracking: PriceTracking,
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            bucket_size: DEFAULT_BUCKET_SIZE,
            max_workers: default_max_workers(),
            channel_capacity: DEFAULT_CHANNEL_CAPACITY,
            price_tracking: PriceTracking::default(),
        }
    }
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory containing trade logs.
    pub directory: PathBuf,
    /// Trade log file extension.
    pub file_extension: String,
    /// Entries in the highest and lowest buckets.
    pub bucket_size: usize,
    /// Maximum number of files parsed at the same time.
    pub max_workers: usize,
    /// Capacity of the worker-to-collector channel.
    pub channel_capacity: usize,
    /// Min/max tracking mode used by the parser.
    pub price_tracking: PriceTracking,
    /// How the report is printed.
    pub report_format: ReportFormat,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self {
            directory: env::var("TRADES_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(DEFAULT_DIRECTORY)),
            file_extension: env::var("FILE_EXTENSION")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_FILE_EXTENSION.to_string()),
            bucket_size: positive_var("BUCKET_SIZE").unwrap_or(DEFAULT_BUCKET_SIZE),
            max_workers: positive_var("MAX_WORKERS").unwrap_or_else(default_max_workers),
            channel_capacity: positive_var("CHANNEL_CAPACITY").unwrap_or(DEFAULT_CHANNEL_CAPACITY),
            price_tracking: env::var("PRICE_TRACKING")
                .ok()
                .and_then(|v| PriceTracking::from_str(&v))
                .unwrap_or_default(),
            report_format: env::var("REPORT_FORMAT")
                .ok()
                .and_then(|v| ReportFormat::from_str(&v))
                .unwrap_or_default(),
        }
    }

    /// Apply command-line arguments. The first positional argument is the directory.
    pub fn with_args<I>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        if let Some(dir) = args.into_iter().next() {
            self.directory = PathBuf::from(dir);
        }
        self
    }

    /// Pipeline settings derived from this configuration.
    pub fn scanner(&self) -> ScannerConfig {
        ScannerConfig {
            bucket_size: self.bucket_size,
            max_workers: self.max_workers,
            channel_capacity: self.channel_capacity,
            price_tracking: self.price_tracking,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

fn positive_var(key: &str) -> Option<usize> {
    env::var(key)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .filter(|v: &usize| *v > 0)
}

fn default_max_workers() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}
