use crate::schema::{Alert, AlertKind, KpiSet, Severity};

/// Default revenue-change threshold in percentage points, overridable per
/// call via [`AnalyticsOptions`](crate::schema::AnalyticsOptions).
pub const DEFAULT_ALERT_THRESHOLD: f64 = 10.0;

/// Margin (percent) below which a low-margin warning fires. Fixed,
/// independent of the caller-supplied revenue-change threshold.
pub const LOW_MARGIN_THRESHOLD: f64 = 10.0;

/// Margin (percent) above which a strong-margin notice fires.
pub const STRONG_MARGIN_THRESHOLD: f64 = 30.0;

/// Evaluates a KPI set against the thresholds and emits structured alerts.
///
/// A revenue-change alert fires when the trend magnitude exceeds
/// `threshold` (`info` for growth, `warning` for decline) and is
/// suppressed entirely while the trend is `None` (insufficient history).
/// Each condition fires at most once per evaluation.
pub fn detect(kpis: &KpiSet, threshold: f64) -> Vec<Alert> {
    let mut alerts = Vec::new();

    if let Some(change) = kpis.revenue_change_pct {
        if change.abs() > threshold {
            let (severity, direction) = if change > 0.0 {
                (Severity::Info, "increased")
            } else {
                (Severity::Warning, "decreased")
            };
            alerts.push(Alert {
                kind: AlertKind::RevenueChange,
                severity,
                message: format!(
                    "Revenue {} by {:.1}% over the trailing window",
                    direction,
                    change.abs()
                ),
            });
        }
    }

    if kpis.profit_margin < LOW_MARGIN_THRESHOLD {
        alerts.push(Alert {
            kind: AlertKind::LowMargin,
            severity: Severity::Warning,
            message: format!("Low profit margin: {:.1}%", kpis.profit_margin),
        });
    }

    if kpis.profit_margin > STRONG_MARGIN_THRESHOLD {
        alerts.push(Alert {
            kind: AlertKind::StrongMargin,
            severity: Severity::Info,
            message: format!("Strong profit margin: {:.1}%", kpis.profit_margin),
        });
    }

    alerts
}
