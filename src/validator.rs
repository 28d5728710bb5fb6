use serde::{Deserialize, Serialize};

use crate::error::{AnalyticsError, Result};
use crate::schema::RawDataset;
use crate::utils::{parse_date, parse_number};

/// Resolved column indexes for the canonical record shape. Built once per
/// dataset, then reused by the normalizer instead of re-matching headers on
/// every access.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnMap {
    pub date: usize,
    pub revenue: usize,
    pub costs: Option<usize>,
    pub customers: Option<usize>,
    pub department: Option<usize>,
}

impl ColumnMap {
    /// Matches headers against the canonical column names, case-insensitively.
    /// An exact match wins over containment, so a `revenue` header beats a
    /// `scenario revenue` one; containment lets `Total Revenue ($)` resolve
    /// to `revenue`.
    pub fn detect(columns: &[String]) -> Result<Self> {
        let date = find_column(columns, "date")
            .ok_or_else(|| AnalyticsError::MissingRequiredColumn("date".to_string()))?;
        let revenue = find_column(columns, "revenue")
            .ok_or_else(|| AnalyticsError::MissingRequiredColumn("revenue".to_string()))?;

        Ok(Self {
            date,
            revenue,
            costs: find_column(columns, "costs"),
            customers: find_column(columns, "customers"),
            department: find_column(columns, "department"),
        })
    }
}

fn find_column(columns: &[String], token: &str) -> Option<usize> {
    let lowered: Vec<String> = columns.iter().map(|c| c.trim().to_lowercase()).collect();

    if let Some(idx) = lowered.iter().position(|c| c == token) {
        return Some(idx);
    }
    lowered.iter().position(|c| c.contains(token))
}

/// Outcome of inspecting a raw dataset: the resolved column map, how many
/// rows pass required-field coercion, and the non-fatal issues found along
/// the way. The input itself is never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub column_map: ColumnMap,
    pub valid_rows: usize,
    pub warnings: Vec<String>,
}

/// Checks a raw dataset against the minimal schema.
///
/// Structural problems (no rows, no date-like or revenue-like column) are
/// errors; row-level problems (a bad date, a non-numeric cell) are
/// accumulated as warnings so a single malformed row never sinks the batch.
pub fn validate(dataset: &RawDataset) -> Result<ValidationReport> {
    if dataset.is_empty() {
        return Err(AnalyticsError::EmptyInput);
    }

    let column_map = ColumnMap::detect(&dataset.columns)?;

    let mut valid_rows = 0;
    let mut bad_dates = 0;
    let mut bad_revenue = 0;
    let mut negative_revenue = 0;
    let mut bad_costs = 0;
    let mut negative_costs = 0;
    let mut bad_customers = 0;

    for row in &dataset.rows {
        let date_ok = parse_date(cell(row, column_map.date)).is_some();
        let revenue = parse_number(cell(row, column_map.revenue));

        if !date_ok {
            bad_dates += 1;
        }
        match revenue {
            None => bad_revenue += 1,
            Some(value) if value < 0.0 => negative_revenue += 1,
            Some(_) => {}
        }
        if date_ok && revenue.is_some() {
            valid_rows += 1;
        }

        if let Some(idx) = column_map.costs {
            let raw = cell(row, idx);
            if !raw.trim().is_empty() {
                match parse_number(raw) {
                    None => bad_costs += 1,
                    Some(value) if value < 0.0 => negative_costs += 1,
                    Some(_) => {}
                }
            }
        }
        if let Some(idx) = column_map.customers {
            let raw = cell(row, idx);
            if !raw.trim().is_empty() && parse_number(raw).is_none() {
                bad_customers += 1;
            }
        }
    }

    let mut warnings = Vec::new();
    if bad_dates > 0 {
        warnings.push(format!("{} rows with unparseable dates will be dropped", bad_dates));
    }
    if bad_revenue > 0 {
        warnings.push(format!(
            "{} rows with invalid revenue values will be dropped",
            bad_revenue
        ));
    }
    if negative_revenue > 0 {
        warnings.push(format!(
            "{} negative revenue values will be set to 0",
            negative_revenue
        ));
    }
    if bad_costs > 0 {
        warnings.push(format!(
            "{} non-numeric cost entries will be treated as 0",
            bad_costs
        ));
    }
    if negative_costs > 0 {
        warnings.push(format!(
            "{} negative cost values will be set to 0",
            negative_costs
        ));
    }
    if bad_customers > 0 {
        warnings.push(format!(
            "{} non-numeric customer counts will be ignored",
            bad_customers
        ));
    }

    Ok(ValidationReport {
        column_map,
        valid_rows,
        warnings,
    })
}

fn cell(row: &[String], idx: usize) -> &str {
    row.get(idx).map(String::as_str).unwrap_or("")
}
