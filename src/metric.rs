use std::time::{SystemTime, UNIX_EPOCH};

pub const COMPONENT_CPU: &str = "CPU";
pub const COMPONENT_RAM: &str = "RAM";
pub const METRIC_USAGE: &str = "Usage";
pub const UNIT_PERCENT: &str = "%";

/// One timestamped, unit-labeled measurement of a named component.
///
/// `value` is not range-checked here; samplers keep percentages inside
/// [0, 100] and the store only rejects non-finite values.
#[derive(Clone, Debug, PartialEq)]
pub struct Metric {
    pub component: String,
    pub metric: String,
    pub value: f64,
    pub unit: String,
    pub timestamp: i64,
}

impl Metric {
    pub fn new(
        component: impl Into<String>,
        metric: impl Into<String>,
        value: f64,
        unit: impl Into<String>,
        timestamp: i64,
    ) -> Self {
        Self {
            component: component.into(),
            metric: metric.into(),
            value,
            unit: unit.into(),
            timestamp,
        }
    }

    /// Returns the name of the first field that makes this record unfit for storage.
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.component.is_empty() {
            return Err("component");
        }
        if self.metric.is_empty() {
            return Err("metric");
        }
        if !self.value.is_finite() {
            return Err("value");
        }
        if self.unit.is_empty() {
            return Err("unit");
        }
        Ok(())
    }
}

/// Labels stamped onto every metric a sampler produces.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Labels {
    pub component: String,
    pub metric: String,
    pub unit: String,
}

impl Labels {
    pub fn new(
        component: impl Into<String>,
        metric: impl Into<String>,
        unit: impl Into<String>,
    ) -> Self {
        Self {
            component: component.into(),
            metric: metric.into(),
            unit: unit.into(),
        }
    }

    pub fn cpu() -> Self {
        Self::new(COMPONENT_CPU, METRIC_USAGE, UNIT_PERCENT)
    }

    pub fn ram() -> Self {
        Self::new(COMPONENT_RAM, METRIC_USAGE, UNIT_PERCENT)
    }

    pub fn stamp(&self, value: f64, timestamp: i64) -> Metric {
        Metric::new(
            self.component.clone(),
            self.metric.clone(),
            value,
            self.unit.clone(),
            timestamp,
        )
    }
}

/// Wall-clock seconds since the Unix epoch, or 0 if the clock is set before it.
pub fn unix_timestamp() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| i64::try_from(d.as_secs()).unwrap_or(i64::MAX))
        .unwrap_or(0)
}
