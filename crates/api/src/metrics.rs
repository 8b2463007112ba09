//! Prometheus Metric Emission

use metrics::{counter, gauge};
use quake_model::{Alert, Event, Report, SeverityTier};

/// Record one incoming report: occurrence counter plus magnitude, depth,
/// and per-area intensity gauges.
pub fn observe_report(report: &Report) {
    counter!(
        "earthquake_occurrences_total",
        "source" => report.source.clone()
    )
    .increment(1);

    let id = report.id.to_string();
    gauge!(
        "earthquake_magnitude",
        "source" => report.source.clone(),
        "id" => id.clone(),
        "epicenter" => report.epicenter.clone()
    )
    .set(report.magnitude);
    gauge!(
        "earthquake_depth",
        "source" => report.source.clone(),
        "id" => id.clone(),
        "epicenter" => report.epicenter.clone()
    )
    .set(report.focal_depth);

    for area in &report.shaking_area {
        gauge!(
            "earthquake_intensity",
            "source" => report.source.clone(),
            "id" => id.clone(),
            "area" => area.region.to_string()
        )
        .set(area.intensity);
    }
}

/// Record expanded events, by severity tier
pub fn observe_events(events: &[Event]) {
    for event in events {
        counter!(
            "earthquake_events_total",
            "region" => event.region.to_string(),
            "severity" => severity_label(event.severity)
        )
        .increment(1);
    }
}

/// Record newly promoted alerts
pub fn observe_alerts(alerts: &[Alert]) {
    for alert in alerts {
        counter!(
            "earthquake_alerts_total",
            "region" => alert.region.to_string(),
            "severity" => severity_label(alert.severity)
        )
        .increment(1);
    }
}

/// Record one processed alert and its time-to-acknowledge
pub fn observe_processed(alert: &Alert) {
    counter!(
        "earthquake_alerts_processed_total",
        "region" => alert.region.to_string()
    )
    .increment(1);
    gauge!(
        "earthquake_alert_processing_seconds",
        "region" => alert.region.to_string()
    )
    .set(alert.processing_duration as f64);
}

/// Record a sweep result
pub fn observe_autoclosed(count: usize) {
    counter!("earthquake_alerts_autoclosed_total").increment(count as u64);
}

fn severity_label(severity: SeverityTier) -> &'static str {
    match severity {
        SeverityTier::None => "NONE",
        SeverityTier::Tier1 => "TIER1",
        SeverityTier::Tier2 => "TIER2",
    }
}
