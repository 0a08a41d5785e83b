use tracing::{debug, error};

use crate::config::Config;
use crate::metric::Metric;
use crate::sampler::{CpuSampler, RamSampler, Sample, Sampler};
use crate::store::{MetricStore, StoreError};
use crate::system::{OsCpuTimes, OsMemory};

/// Counts for one collection tick.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TickReport {
    pub stored: usize,
    pub skipped: usize,
    pub failed: usize,
}

/// Result of [`App::tick`]: what was measured and what happened to it.
#[derive(Debug, Default)]
pub struct Tick {
    pub metrics: Vec<Metric>,
    pub report: TickReport,
}

pub struct App<C: Sampler = CpuSampler, R: Sampler = RamSampler> {
    cpu: C,
    ram: R,
    store: MetricStore,
    ticks: u64,
}

impl App {
    pub fn from_config(config: &Config, store: MetricStore) -> Self {
        let cpu = CpuSampler::new(OsCpuTimes).with_labels(config.labels.cpu());
        let ram = RamSampler::new(OsMemory::new()).with_labels(config.labels.ram());
        App::new(cpu, ram, store)
    }
}

impl<C: Sampler, R: Sampler> App<C, R> {
    pub fn new(cpu: C, ram: R, store: MetricStore) -> Self {
        App {
            cpu,
            ram,
            store,
            ticks: 0,
        }
    }

    pub fn store(&self) -> &MetricStore {
        &self.store
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Samples both sources and stores whatever they produced.
    ///
    /// A failed insert is logged and counted; it never stops the other
    /// sample from being stored.
    pub fn tick(&mut self) -> Tick {
        self.ticks += 1;
        let samples = [("cpu", self.cpu.produce()), ("ram", self.ram.produce())];

        let mut tick = Tick::default();
        for (source, sample) in samples {
            match sample {
                Sample::Value(metric) => match self.store.insert(&metric) {
                    Ok(()) => {
                        tick.report.stored += 1;
                        tick.metrics.push(metric);
                    }
                    Err(err) => {
                        error!(source, error = %err, "failed to store metric");
                        tick.report.failed += 1;
                    }
                },
                Sample::Initializing => {
                    debug!(source, "sampler warming up");
                    tick.report.skipped += 1;
                }
                Sample::Unavailable(err) => {
                    debug!(source, error = %err, "sample skipped");
                    tick.report.skipped += 1;
                }
            }
        }
        tick
    }

    pub fn shutdown(mut self) -> Result<(), StoreError> {
        self.store.close()
    }
}
