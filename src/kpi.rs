use crate::schema::{BusinessRecord, KpiSet};
use crate::utils::mean;

/// Records per trend comparison window: the trailing window against the
/// window immediately preceding it.
pub const TREND_WINDOW: usize = 3;

/// Computes aggregate KPIs over a chronologically sorted record set.
///
/// Totals are straight sums. The profit margin is defined as 0 (not an
/// error) when total revenue is 0, so a zero-revenue period never crashes a
/// downstream consumer. `avg_customers` averages the records that carry a
/// customer count, 0 when none do.
pub fn compute(records: &[BusinessRecord]) -> KpiSet {
    let total_revenue: f64 = records.iter().map(|r| r.revenue).sum();
    let total_costs: f64 = records.iter().map(|r| r.costs).sum();
    let total_profit = total_revenue - total_costs;

    let profit_margin = if total_revenue == 0.0 {
        0.0
    } else {
        total_profit / total_revenue * 100.0
    };

    let customer_values: Vec<f64> = records
        .iter()
        .filter_map(|r| r.customers.map(|c| c as f64))
        .collect();
    let avg_customers = mean(&customer_values).unwrap_or(0.0);

    KpiSet {
        total_revenue,
        total_costs,
        total_profit,
        profit_margin,
        avg_customers,
        revenue_change_pct: window_change(records, |r| Some(r.revenue)),
        customer_change_pct: window_change(records, |r| r.customers.map(|c| c as f64)),
    }
}

/// Period-over-period change between the trailing [`TREND_WINDOW`] records
/// and the records immediately preceding them.
///
/// `None` means "insufficient history", never a crash: fewer than
/// `TREND_WINDOW + 1` records leaves the previous window empty, a previous
/// mean of exactly zero has no defined relative change, and a window with no
/// present values (missing customer counts) cannot be averaged.
fn window_change<F>(records: &[BusinessRecord], extract: F) -> Option<f64>
where
    F: Fn(&BusinessRecord) -> Option<f64>,
{
    let n = records.len();
    if n < TREND_WINDOW + 1 {
        return None;
    }

    let recent = &records[n - TREND_WINDOW..];
    let previous = &records[n.saturating_sub(2 * TREND_WINDOW)..n - TREND_WINDOW];

    let recent_values: Vec<f64> = recent.iter().filter_map(&extract).collect();
    let previous_values: Vec<f64> = previous.iter().filter_map(&extract).collect();

    let recent_mean = mean(&recent_values)?;
    let previous_mean = mean(&previous_values)?;
    if previous_mean == 0.0 {
        return None;
    }

    Some((recent_mean - previous_mean) / previous_mean * 100.0)
}
