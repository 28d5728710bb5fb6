use chrono::NaiveDate;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::alerts::DEFAULT_ALERT_THRESHOLD;
use crate::forecast::DEFAULT_FORECAST_MONTHS;

/// One normalized business observation. Produced by the validator/normalizer
/// pair from raw input; consumed read-only by every downstream component.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct BusinessRecord {
    #[schemars(description = "Observation date (ISO-8601, e.g. 2024-01-31)")]
    pub date: NaiveDate,

    #[schemars(description = "Revenue for the period. Non-negative.")]
    pub revenue: f64,

    #[serde(default)]
    #[schemars(description = "Costs for the period. Defaults to 0 when absent.")]
    pub costs: f64,

    #[serde(default)]
    #[schemars(description = "Customer count for the period, if tracked")]
    pub customers: Option<u64>,

    #[serde(default)]
    #[schemars(description = "Department label, if the record belongs to one")]
    pub department: Option<String>,
}

impl BusinessRecord {
    pub fn generate_json_schema() -> schemars::schema::RootSchema {
        schemars::schema_for!(BusinessRecord)
    }

    /// JSON Schema for one input record, for transport layers that want to
    /// validate uploads before handing them to the engine.
    pub fn schema_as_json() -> Result<String, serde_json::Error> {
        let schema = Self::generate_json_schema();
        serde_json::to_string_pretty(&schema)
    }
}

/// An untyped record set as it arrives from an upload: a header row and
/// string cells. Column meaning is resolved once per dataset by
/// [`ColumnMap::detect`](crate::validator::ColumnMap::detect).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct RawDataset {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl RawDataset {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Aggregate KPIs over a record collection. Derived, recomputed on every
/// call, never persisted. Trend fields are `None` when the history is too
/// short to compare windows (fewer than 4 records) or the previous window
/// mean is zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KpiSet {
    pub total_revenue: f64,
    pub total_costs: f64,
    pub total_profit: f64,
    /// Percentage. Defined as 0 when total revenue is 0.
    pub profit_margin: f64,
    pub avg_customers: f64,
    pub revenue_change_pct: Option<f64>,
    pub customer_change_pct: Option<f64>,
}

/// One projected future period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastPoint {
    /// 1-based offset past the last observed record.
    pub period_index: usize,
    /// Projected date, 30-day steps past the last observed date.
    pub date: NaiveDate,
    pub predicted_revenue: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scenario_revenue: Option<f64>,
}

/// Per-department rollup over that department's subset of records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DepartmentMetric {
    pub department: String,
    pub revenue: f64,
    pub costs: f64,
    pub profit: f64,
    pub customers: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Warning,
    Info,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AlertKind {
    RevenueChange,
    LowMargin,
    StrongMargin,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    pub kind: AlertKind,
    pub severity: Severity,
    pub message: String,
}

/// One record under a what-if revenue adjustment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioRecord {
    pub date: NaiveDate,
    pub revenue: f64,
    pub scenario_revenue: f64,
    pub scenario_profit: f64,
    /// Percentage. 0 when the adjusted revenue is 0.
    pub scenario_margin: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioResult {
    pub adjustment_pct: f64,
    pub records: Vec<ScenarioRecord>,
    pub kpis: KpiSet,
}

/// Department filter accepted by the engine entry points: the literal
/// `"all"` (any casing) keeps every record, anything else selects an exact
/// department label.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DepartmentFilter {
    #[default]
    All,
    Named(String),
}

impl DepartmentFilter {
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("all") {
            Self::All
        } else {
            Self::Named(trimmed.to_string())
        }
    }

    pub fn matches(&self, department: Option<&str>) -> bool {
        match self {
            Self::All => true,
            Self::Named(name) => department == Some(name.as_str()),
        }
    }
}

impl From<String> for DepartmentFilter {
    fn from(raw: String) -> Self {
        Self::parse(&raw)
    }
}

impl From<DepartmentFilter> for String {
    fn from(filter: DepartmentFilter) -> Self {
        match filter {
            DepartmentFilter::All => "all".to_string(),
            DepartmentFilter::Named(name) => name,
        }
    }
}

/// Configuration accepted by the engine entry points. Out-of-range values
/// are rejected when the analysis runs, never silently clamped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct AnalyticsOptions {
    #[schemars(
        with = "String",
        description = "Department filter: \"all\" or an exact department label"
    )]
    pub department: DepartmentFilter,

    #[schemars(description = "Forecast horizon in periods, 1 to 12. Defaults to 3.")]
    pub forecast_months: u32,

    #[schemars(
        description = "Revenue-change alert threshold in percentage points. Defaults to 10."
    )]
    pub alert_threshold: f64,

    #[schemars(
        description = "Optional what-if revenue adjustment in percent, -50 to 50 inclusive"
    )]
    pub scenario_adjustment: Option<f64>,
}

impl Default for AnalyticsOptions {
    fn default() -> Self {
        Self {
            department: DepartmentFilter::All,
            forecast_months: DEFAULT_FORECAST_MONTHS,
            alert_threshold: DEFAULT_ALERT_THRESHOLD,
            scenario_adjustment: None,
        }
    }
}

impl AnalyticsOptions {
    pub fn generate_json_schema() -> schemars::schema::RootSchema {
        schemars::schema_for!(AnalyticsOptions)
    }

    pub fn schema_as_json() -> Result<String, serde_json::Error> {
        let schema = Self::generate_json_schema();
        serde_json::to_string_pretty(&schema)
    }
}

/// The orchestrated output of one analysis run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub record_count: usize,
    pub records: Vec<BusinessRecord>,
    pub kpis: KpiSet,
    pub forecast: Vec<ForecastPoint>,
    pub departments: Vec<DepartmentMetric>,
    pub alerts: Vec<Alert>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scenario: Option<ScenarioResult>,
}

/// Analysis of a raw CSV upload: the report plus the non-fatal warnings
/// accumulated while cleaning the rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CsvAnalysis {
    pub report: AnalysisReport,
    pub warnings: Vec<String>,
}
