pub mod report;
pub mod trade;

pub use report::*;
pub use trade::*;
