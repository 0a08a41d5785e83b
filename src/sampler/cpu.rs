use tracing::{debug, warn};

use super::{Sample, Sampler};
use crate::metric::{Labels, unix_timestamp};
use crate::system::{CpuTimes, CpuTimesSource, OsCpuTimes};

/// Busy percentage between two counter snapshots.
///
/// Returns `None` when a counter went backwards. A zero-length window
/// yields `0.0`. The result is not clamped.
pub fn compute_usage(prev: &CpuTimes, now: &CpuTimes) -> Option<f64> {
    let delta = now.delta_since(prev)?;
    if delta.total == 0 {
        return Some(0.0);
    }
    Some((1.0 - delta.idle as f64 / delta.total as f64) * 100.0)
}

/// Differential processor-utilization sampler.
///
/// Holds the previous counter snapshot as its baseline. Not safe for
/// concurrent `produce` calls; wrap it in a mutex if it must be shared.
pub struct CpuSampler<S = OsCpuTimes> {
    source: S,
    baseline: Option<CpuTimes>,
    labels: Labels,
}

impl Default for CpuSampler<OsCpuTimes> {
    fn default() -> Self {
        Self::new(OsCpuTimes)
    }
}

impl<S: CpuTimesSource> CpuSampler<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            baseline: None,
            labels: Labels::cpu(),
        }
    }

    pub fn with_labels(mut self, labels: Labels) -> Self {
        self.labels = labels;
        self
    }

    pub fn baseline(&self) -> Option<CpuTimes> {
        self.baseline
    }
}

impl<S: CpuTimesSource> Sampler for CpuSampler<S> {
    fn produce(&mut self) -> Sample {
        let timestamp = unix_timestamp();
        let now = match self.source.read() {
            Ok(times) => times,
            Err(err) => {
                debug!(error = %err, "cpu counters unavailable");
                return Sample::Unavailable(err);
            }
        };

        let Some(prev) = self.baseline.replace(now) else {
            debug!(?now, "cpu baseline established");
            return Sample::Initializing;
        };

        let Some(usage) = compute_usage(&prev, &now) else {
            warn!(?prev, ?now, "cpu counters went backwards, re-baselining");
            return Sample::Initializing;
        };

        let value = if (0.0..=100.0).contains(&usage) {
            usage
        } else {
            warn!(usage, "cpu usage outside 0-100, clamping");
            usage.clamp(0.0, 100.0)
        };

        Sample::Value(self.labels.stamp(value, timestamp))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;

    use super::*;
    use crate::system::SourceError;

    struct Scripted(VecDeque<Result<CpuTimes, SourceError>>);

    impl Scripted {
        fn new(readings: Vec<Result<CpuTimes, SourceError>>) -> Self {
            Self(readings.into())
        }
    }

    impl CpuTimesSource for Scripted {
        fn read(&mut self) -> Result<CpuTimes, SourceError> {
            self.0.pop_front().unwrap_or(Err(SourceError::Unsupported))
        }
    }

    fn value(sample: Sample) -> f64 {
        sample.into_metric().expect("expected a metric").value
    }

    #[test]
    fn first_call_sets_baseline_without_value() {
        let first = CpuTimes::new(100, 200, 100);
        let mut sampler = CpuSampler::new(Scripted::new(vec![Ok(first)]));
        assert_eq!(sampler.baseline(), None);
        assert!(sampler.produce().is_initializing());
        assert_eq!(sampler.baseline(), Some(first));
    }

    #[test]
    fn synthetic_ticks_give_expected_usage() {
        let mut sampler = CpuSampler::new(Scripted::new(vec![
            Ok(CpuTimes::new(100, 200, 100)),
            Ok(CpuTimes::new(150, 240, 120)),
        ]));
        sampler.produce();
        let v = value(sampler.produce());
        assert!((v - 16.666_666).abs() < 1e-3, "got {v}");
        assert_eq!(sampler.baseline(), Some(CpuTimes::new(150, 240, 120)));
    }

    #[test]
    fn zero_window_reports_zero() {
        let same = CpuTimes::new(10, 20, 30);
        let mut sampler = CpuSampler::new(Scripted::new(vec![Ok(same), Ok(same)]));
        sampler.produce();
        assert_eq!(value(sampler.produce()), 0.0);
    }

    #[test]
    fn no_idle_is_full_load_and_all_idle_is_zero() {
        let base = CpuTimes::new(100, 200, 100);
        assert_eq!(
            compute_usage(&base, &CpuTimes::new(100, 250, 110)),
            Some(100.0)
        );
        assert_eq!(
            compute_usage(&base, &CpuTimes::new(160, 260, 100)),
            Some(0.0)
        );
    }

    #[test]
    fn source_failure_is_unavailable_and_keeps_baseline() {
        let first = CpuTimes::new(1, 2, 3);
        let mut sampler = CpuSampler::new(Scripted::new(vec![
            Ok(first),
            Err(SourceError::Os(5)),
        ]));
        sampler.produce();
        assert!(sampler.produce().is_unavailable());
        assert_eq!(sampler.baseline(), Some(first));
    }

    #[test]
    fn failure_before_baseline_is_not_initializing() {
        let mut sampler = CpuSampler::new(Scripted::new(vec![Err(SourceError::Unsupported)]));
        let sample = sampler.produce();
        assert!(sample.is_unavailable());
        assert_eq!(sampler.baseline(), None);
    }

    #[test]
    fn backwards_counters_rebaseline() {
        let reset = CpuTimes::new(5, 10, 5);
        let mut sampler = CpuSampler::new(Scripted::new(vec![
            Ok(CpuTimes::new(100, 200, 100)),
            Ok(reset),
            Ok(CpuTimes::new(10, 20, 10)),
        ]));
        sampler.produce();
        assert!(sampler.produce().is_initializing());
        assert_eq!(sampler.baseline(), Some(reset));
        // idle 5/15 of the window
        let v = value(sampler.produce());
        assert!((v - 66.666_666).abs() < 1e-3);
    }

    #[test]
    fn idle_larger_than_window_is_clamped() {
        let mut sampler = CpuSampler::new(Scripted::new(vec![
            Ok(CpuTimes::new(0, 0, 0)),
            Ok(CpuTimes::new(100, 10, 10)),
        ]));
        sampler.produce();
        assert_eq!(value(sampler.produce()), 0.0);
    }

    #[test]
    fn custom_labels_are_stamped() {
        let mut sampler = CpuSampler::new(Scripted::new(vec![
            Ok(CpuTimes::new(0, 0, 0)),
            Ok(CpuTimes::new(0, 10, 10)),
        ]))
        .with_labels(Labels::new("Processor", "Load", "pct"));
        sampler.produce();
        let m = sampler.produce().into_metric().unwrap();
        assert_eq!(m.component, "Processor");
        assert_eq!(m.metric, "Load");
        assert_eq!(m.unit, "pct");
        assert!(m.timestamp > 0);
    }
}
