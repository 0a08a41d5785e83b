//! Utilization samplers.
//!
//! A sampler turns one read of an OS counter source into a [`Sample`]. The
//! differential [`CpuSampler`] needs two reads before it can report anything;
//! the absolute [`RamSampler`] reports on every successful read.

pub mod cpu;
pub mod ram;

pub use cpu::{CpuSampler, compute_usage};
pub use ram::RamSampler;

use crate::metric::Metric;
use crate::system::SourceError;

#[derive(Debug)]
pub enum Sample {
    /// No baseline to difference against yet; call again next tick.
    Initializing,
    /// The counter source failed. Nothing was measured.
    Unavailable(SourceError),
    Value(Metric),
}

impl Sample {
    pub fn into_metric(self) -> Option<Metric> {
        match self {
            Sample::Value(metric) => Some(metric),
            Sample::Initializing | Sample::Unavailable(_) => None,
        }
    }

    pub fn metric(&self) -> Option<&Metric> {
        match self {
            Sample::Value(metric) => Some(metric),
            _ => None,
        }
    }

    pub fn is_initializing(&self) -> bool {
        matches!(self, Sample::Initializing)
    }

    pub fn is_unavailable(&self) -> bool {
        matches!(self, Sample::Unavailable(_))
    }
}

pub trait Sampler {
    fn produce(&mut self) -> Sample;
}

impl<T: Sampler + ?Sized> Sampler for Box<T> {
    fn produce(&mut self) -> Sample {
        (**self).produce()
    }
}
