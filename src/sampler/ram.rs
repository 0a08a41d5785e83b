use tracing::debug;

use super::{Sample, Sampler};
use crate::metric::{Labels, unix_timestamp};
use crate::system::{MemoryLoadSource, OsMemory};

/// Absolute memory-occupancy sampler. Keeps no state between calls.
pub struct RamSampler<M = OsMemory> {
    source: M,
    labels: Labels,
}

impl Default for RamSampler<OsMemory> {
    fn default() -> Self {
        Self::new(OsMemory::new())
    }
}

impl<M: MemoryLoadSource> RamSampler<M> {
    pub fn new(source: M) -> Self {
        Self {
            source,
            labels: Labels::ram(),
        }
    }

    pub fn with_labels(mut self, labels: Labels) -> Self {
        self.labels = labels;
        self
    }
}

impl<M: MemoryLoadSource> Sampler for RamSampler<M> {
    fn produce(&mut self) -> Sample {
        let timestamp = unix_timestamp();
        match self.source.read() {
            Ok(load) => Sample::Value(self.labels.stamp(load, timestamp)),
            Err(err) => {
                debug!(error = %err, "memory status unavailable");
                Sample::Unavailable(err)
            }
        }
    }
}
