use sysinfo::System;

use super::platform;
use super::snapshot::CpuTimes;
use super::SourceError;

/// A cumulative processor-time counter, read once per call.
pub trait CpuTimesSource {
    fn read(&mut self) -> Result<CpuTimes, SourceError>;
}

/// A physical-memory load percentage in [0, 100], read once per call.
pub trait MemoryLoadSource {
    fn read(&mut self) -> Result<f64, SourceError>;
}

impl<T: CpuTimesSource + ?Sized> CpuTimesSource for Box<T> {
    fn read(&mut self) -> Result<CpuTimes, SourceError> {
        (**self).read()
    }
}

impl<T: MemoryLoadSource + ?Sized> MemoryLoadSource for Box<T> {
    fn read(&mut self) -> Result<f64, SourceError> {
        (**self).read()
    }
}

/// Processor counters straight from the operating system.
#[derive(Clone, Copy, Debug, Default)]
pub struct OsCpuTimes;

impl CpuTimesSource for OsCpuTimes {
    fn read(&mut self) -> Result<CpuTimes, SourceError> {
        platform::cpu_times()
    }
}

/// Memory occupancy through `sysinfo`.
pub struct OsMemory {
    sys: System,
}

impl Default for OsMemory {
    fn default() -> Self {
        Self::new()
    }
}

impl OsMemory {
    pub fn new() -> Self {
        OsMemory { sys: System::new() }
    }
}

impl MemoryLoadSource for OsMemory {
    fn read(&mut self) -> Result<f64, SourceError> {
        self.sys.refresh_memory();
        load_percent(self.sys.used_memory(), self.sys.total_memory())
    }
}

fn load_percent(used: u64, total: u64) -> Result<f64, SourceError> {
    if total == 0 {
        return Err(SourceError::NoMemory);
    }
    let used = used.min(total);
    Ok(used as f64 / total as f64 * 100.0)
}
