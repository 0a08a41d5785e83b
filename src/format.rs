use crate::metric::Metric;

/// `"CPU: 16.7%"`
pub fn format_metric(metric: &Metric) -> String {
    format!("{}: {:.1}{}", metric.component, metric.value, metric.unit)
}

/// One console line for everything stored in a tick, `" | "`-separated.
pub fn format_tick(metrics: &[Metric]) -> String {
    metrics
        .iter()
        .map(format_metric)
        .collect::<Vec<_>>()
        .join(" | ")
}
