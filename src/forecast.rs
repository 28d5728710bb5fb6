use chrono::Days;

use crate::error::{AnalyticsError, Result};
use crate::schema::{BusinessRecord, ForecastPoint};

pub const DEFAULT_FORECAST_MONTHS: u32 = 3;
pub const MAX_FORECAST_MONTHS: u32 = 12;

/// Days per projected period when extending dates past the last observation.
const PERIOD_DAYS: u64 = 30;

/// An ordinary-least-squares line fitted over the zero-based chronological
/// index of a series.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrendLine {
    pub slope: f64,
    pub intercept: f64,
}

impl TrendLine {
    /// Fits `y = slope * x + intercept` where `x` is the element index.
    /// Returns `None` for fewer than 2 points: the denominator
    /// `sum((x - x_mean)^2)` is 0 there and no line is defined.
    pub fn fit(values: &[f64]) -> Option<Self> {
        let n = values.len();
        if n < 2 {
            return None;
        }

        let x_mean = (n as f64 - 1.0) / 2.0;
        let y_mean = values.iter().sum::<f64>() / n as f64;

        let mut numerator = 0.0;
        let mut denominator = 0.0;
        for (i, &y) in values.iter().enumerate() {
            let dx = i as f64 - x_mean;
            numerator += dx * (y - y_mean);
            denominator += dx * dx;
        }

        let slope = numerator / denominator;
        Some(Self {
            slope,
            intercept: y_mean - slope * x_mean,
        })
    }

    pub fn predict(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }
}

/// Rejects horizons outside 1..=12 periods. Out-of-range values are an
/// error rather than a silent clamp, so caller bugs stay visible.
pub fn validate_horizon(months: u32) -> Result<()> {
    if !(1..=MAX_FORECAST_MONTHS).contains(&months) {
        return Err(AnalyticsError::InvalidForecastHorizon(months));
    }
    Ok(())
}

/// Projects revenue `months` periods past the last observed record.
pub fn forecast(records: &[BusinessRecord], months: u32) -> Result<Vec<ForecastPoint>> {
    forecast_with_scenario(records, months, None)
}

/// Like [`forecast`], additionally carrying each point's revenue under an
/// active what-if adjustment.
///
/// Fewer than 2 records leaves the trend undefined; the forecast is then an
/// empty sequence, a documented output state rather than an error.
/// Predictions are clamped at 0 and dated at 30-day steps past the last
/// observation.
pub fn forecast_with_scenario(
    records: &[BusinessRecord],
    months: u32,
    scenario_adjustment: Option<f64>,
) -> Result<Vec<ForecastPoint>> {
    validate_horizon(months)?;

    let revenues: Vec<f64> = records.iter().map(|r| r.revenue).collect();
    let line = match TrendLine::fit(&revenues) {
        Some(line) => line,
        None => return Ok(Vec::new()),
    };

    // fit() returning Some guarantees at least 2 records
    let last_date = records[records.len() - 1].date;
    let n = records.len();

    let points = (0..months as usize)
        .map(|i| {
            let predicted = line.predict((n + i) as f64).max(0.0);
            ForecastPoint {
                period_index: i + 1,
                date: last_date + Days::new(PERIOD_DAYS * (i as u64 + 1)),
                predicted_revenue: predicted,
                scenario_revenue: scenario_adjustment.map(|adj| predicted * (1.0 + adj / 100.0)),
            }
        })
        .collect();

    Ok(points)
}
