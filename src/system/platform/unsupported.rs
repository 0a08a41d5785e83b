use super::PlatformCounters;
use crate::system::SourceError;
use crate::system::snapshot::CpuTimes;

pub struct Platform;

impl PlatformCounters for Platform {
    fn cpu_times() -> Result<CpuTimes, SourceError> {
        Err(SourceError::Unsupported)
    }
}
