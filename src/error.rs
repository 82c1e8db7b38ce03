use std::path::PathBuf;
use thiserror::Error;

/// Scanner error types.
///
/// Directory errors end the run before any file is parsed. Per-file errors
/// are logged by the worker that hit them and drop that file's result.
#[derive(Error, Debug)]
pub enum VolatilityError {
    #[error("No such directory: {}", .0.display())]
    NoSuchDirectory(PathBuf),

    #[error("Directory {} is empty or has no recognized trade files", .0.display())]
    EmptyDirectory(PathBuf),

    #[error("Cannot read {}: {source}", path.display())]
    UnreadableFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("No valid trade records in {}", .0.display())]
    EmptyFile(PathBuf),

    #[error("Volatility undefined for {instrument}: price midpoint is zero")]
    DivisionUndefined { instrument: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    SerdeJson(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, VolatilityError>;
