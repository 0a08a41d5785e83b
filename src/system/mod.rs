pub mod platform;
pub mod snapshot;
pub mod source;

pub use snapshot::CpuTimes;
pub use source::{CpuTimesSource, MemoryLoadSource, OsCpuTimes, OsMemory};

use thiserror::Error;

/// Why an OS counter could not be read.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("counter source is not supported on this platform")]
    Unsupported,

    #[error("failed to read counter source: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed counter data: {0}")]
    Parse(String),

    #[error("OS call failed with code {0}")]
    Os(i64),

    #[error("total physical memory reported as zero")]
    NoMemory,
}
