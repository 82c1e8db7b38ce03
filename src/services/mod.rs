pub mod collector;
pub mod discovery;
pub mod parser;
pub mod ranker;
pub mod scanner;
pub mod worker_pool;

pub use collector::{CollectorStats, ResultCollector};
pub use discovery::discover;
pub use parser::RecordParser;
pub use ranker::Ranker;
pub use scanner::{ScanOutcome, VolatilityScanner};
pub use worker_pool::{PoolStats, WorkerPool};
