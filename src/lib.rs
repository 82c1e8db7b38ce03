//! volscan - Parallel trade-log volatility scanner

pub mod config;
pub mod error;
pub mod render;
pub mod services;
pub mod types;

// Re-export commonly used types
pub use config::{Config, ReportFormat, ScannerConfig};
pub use error::{Result, VolatilityError};
pub use services::{discover, ScanOutcome, VolatilityScanner};
pub use types::*;
