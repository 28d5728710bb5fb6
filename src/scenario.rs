use crate::error::{AnalyticsError, Result};
use crate::kpi;
use crate::schema::{BusinessRecord, ScenarioRecord, ScenarioResult};

pub const MIN_ADJUSTMENT_PCT: f64 = -50.0;
pub const MAX_ADJUSTMENT_PCT: f64 = 50.0;

/// Rejects adjustments outside the inclusive -50..=50 percent range.
pub fn validate_adjustment(adjustment_pct: f64) -> Result<()> {
    if !(MIN_ADJUSTMENT_PCT..=MAX_ADJUSTMENT_PCT).contains(&adjustment_pct) {
        return Err(AnalyticsError::InvalidAdjustment(adjustment_pct));
    }
    Ok(())
}

/// Re-projects the record set under a uniform percentage revenue shift.
///
/// Costs and customer counts are untouched; the scenario KPI set is computed
/// by feeding the adjusted records through the same aggregator as the
/// baseline, so an adjustment of 0 reproduces the baseline KPIs exactly.
pub fn model(records: &[BusinessRecord], adjustment_pct: f64) -> Result<ScenarioResult> {
    validate_adjustment(adjustment_pct)?;

    let factor = 1.0 + adjustment_pct / 100.0;

    let adjusted: Vec<BusinessRecord> = records
        .iter()
        .map(|r| BusinessRecord {
            revenue: r.revenue * factor,
            ..r.clone()
        })
        .collect();
    let kpis = kpi::compute(&adjusted);

    let scenario_records = records
        .iter()
        .map(|r| {
            let scenario_revenue = r.revenue * factor;
            let scenario_profit = scenario_revenue - r.costs;
            let scenario_margin = if scenario_revenue == 0.0 {
                0.0
            } else {
                scenario_profit / scenario_revenue * 100.0
            };
            ScenarioRecord {
                date: r.date,
                revenue: r.revenue,
                scenario_revenue,
                scenario_profit,
                scenario_margin,
            }
        })
        .collect();

    Ok(ScenarioResult {
        adjustment_pct,
        records: scenario_records,
        kpis,
    })
}
