//! # Business Analytics Engine
//!
//! A library for turning tabular business records (date, revenue, costs,
//! customer counts, departments) into a derived analytical view: aggregate
//! KPIs with period-over-period trends, a linear-regression revenue
//! forecast, per-department breakdowns, threshold-based alerts, and
//! parameterized what-if scenario projections.
//!
//! ## Core Concepts
//!
//! - **Raw dataset**: an untyped header-plus-rows table as uploaded, before
//!   column meaning is known
//! - **Normalized records**: the canonical [`BusinessRecord`] shape, sorted
//!   ascending by date, produced once per upload by the validator and
//!   normalizer
//! - **Derived views**: KPIs, forecast, department rollups, alerts and
//!   scenarios are recomputed from the records on every call and never
//!   persisted
//! - **No retained state**: every entry point is a pure function of its
//!   explicit inputs; callers own any caching of the "current" dataset
//!
//! ## Example
//!
//! ```
//! use business_analytics_engine::{analyze_csv, AnalyticsOptions};
//!
//! let csv = "date,revenue,costs,department\n\
//!            2024-01-01,100,60,Sales\n\
//!            2024-02-01,200,60,Marketing\n";
//!
//! let analysis = analyze_csv(csv, &AnalyticsOptions::default()).unwrap();
//! assert_eq!(analysis.report.kpis.total_revenue, 300.0);
//! assert_eq!(analysis.report.departments.len(), 2);
//! ```

pub mod alerts;
pub mod department;
pub mod error;
pub mod forecast;
pub mod ingestion;
pub mod kpi;
pub mod normalizer;
pub mod samples;
pub mod scenario;
pub mod schema;
pub mod utils;
pub mod validator;

pub use alerts::{DEFAULT_ALERT_THRESHOLD, LOW_MARGIN_THRESHOLD, STRONG_MARGIN_THRESHOLD};
pub use error::{AnalyticsError, Result};
pub use forecast::{TrendLine, DEFAULT_FORECAST_MONTHS, MAX_FORECAST_MONTHS};
pub use ingestion::{read_csv, write_csv};
pub use kpi::TREND_WINDOW;
pub use normalizer::{normalize, sort_records, NormalizedDataset};
pub use samples::SampleDataset;
pub use schema::*;
pub use validator::{validate, ColumnMap, ValidationReport};

use log::{debug, info};

pub struct AnalyticsProcessor;

impl AnalyticsProcessor {
    /// Runs the full pipeline over already-typed records: sort, department
    /// filter, KPIs, forecast, department rollup, alerts, and the optional
    /// scenario projection.
    ///
    /// Out-of-range options and an empty (or filtered-to-empty) record set
    /// are fatal for the call; numeric degeneracies inside the components
    /// surface as documented output states instead.
    pub fn run(records: &[BusinessRecord], options: &AnalyticsOptions) -> Result<AnalysisReport> {
        forecast::validate_horizon(options.forecast_months)?;
        if let Some(adjustment) = options.scenario_adjustment {
            scenario::validate_adjustment(adjustment)?;
        }
        if records.is_empty() {
            return Err(AnalyticsError::EmptyInput);
        }

        let sorted = normalizer::sort_records(records.to_vec());
        let filtered: Vec<BusinessRecord> = sorted
            .into_iter()
            .filter(|r| options.department.matches(r.department.as_deref()))
            .collect();
        if filtered.is_empty() {
            return Err(AnalyticsError::EmptyInput);
        }

        info!(
            "Analyzing {} records over a {}-period forecast horizon",
            filtered.len(),
            options.forecast_months
        );

        let kpis = kpi::compute(&filtered);
        let forecast = forecast::forecast_with_scenario(
            &filtered,
            options.forecast_months,
            options.scenario_adjustment,
        )?;
        let departments = department::aggregate(&filtered);
        let alerts = alerts::detect(&kpis, options.alert_threshold);
        let scenario = options
            .scenario_adjustment
            .map(|adjustment| scenario::model(&filtered, adjustment))
            .transpose()?;

        debug!(
            "Derived {} forecast points, {} department rollups, {} alerts",
            forecast.len(),
            departments.len(),
            alerts.len()
        );

        Ok(AnalysisReport {
            record_count: filtered.len(),
            records: filtered,
            kpis,
            forecast,
            departments,
            alerts,
            scenario,
        })
    }
}

/// Runs the analysis pipeline over typed records. See
/// [`AnalyticsProcessor::run`].
pub fn run_analysis(
    records: &[BusinessRecord],
    options: &AnalyticsOptions,
) -> Result<AnalysisReport> {
    AnalyticsProcessor::run(records, options)
}

/// Ingests raw CSV text and runs the analysis pipeline over it: parse,
/// validate, normalize, analyze. Normalization warnings (dropped rows,
/// clamped values) are carried alongside the report.
pub fn analyze_csv(text: &str, options: &AnalyticsOptions) -> Result<CsvAnalysis> {
    let dataset = ingestion::read_csv(text)?;
    let validation = validator::validate(&dataset)?;

    debug!(
        "Validated upload: {} of {} rows usable",
        validation.valid_rows,
        dataset.rows.len()
    );

    let normalized = normalizer::normalize(&dataset, &validation.column_map);
    let report = run_analysis(&normalized.records, options)?;

    Ok(CsvAnalysis {
        report,
        warnings: normalized.warnings,
    })
}
