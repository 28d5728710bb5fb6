use log::debug;

use crate::schema::{BusinessRecord, RawDataset};
use crate::utils::{parse_date, parse_number};
use crate::validator::ColumnMap;

/// The cleaned output of normalization: canonical records sorted ascending
/// by date, plus the warnings accumulated while coercing rows.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedDataset {
    pub records: Vec<BusinessRecord>,
    pub warnings: Vec<String>,
}

/// Maps raw rows onto [`BusinessRecord`]s using a previously detected
/// column map.
///
/// Rows whose date or revenue fail to coerce are dropped with a warning,
/// never a fatal error. Negative revenue and cost values are clamped to 0,
/// non-numeric optional cells degrade to their defaults, and blank
/// department labels become `None`. The result is stable-sorted by date, so
/// records sharing a date keep their input order.
pub fn normalize(dataset: &RawDataset, column_map: &ColumnMap) -> NormalizedDataset {
    let mut records = Vec::with_capacity(dataset.rows.len());
    let mut bad_dates = 0;
    let mut bad_revenue = 0;
    let mut negative_revenue = 0;
    let mut bad_costs = 0;
    let mut negative_costs = 0;
    let mut bad_customers = 0;

    for row in &dataset.rows {
        let date = match parse_date(cell(row, column_map.date)) {
            Some(date) => date,
            None => {
                bad_dates += 1;
                continue;
            }
        };

        let revenue = match parse_number(cell(row, column_map.revenue)) {
            Some(value) if value < 0.0 => {
                negative_revenue += 1;
                0.0
            }
            Some(value) => value,
            None => {
                bad_revenue += 1;
                continue;
            }
        };

        let costs = match column_map.costs {
            Some(idx) => {
                let raw = cell(row, idx);
                if raw.trim().is_empty() {
                    0.0
                } else {
                    match parse_number(raw) {
                        Some(value) if value < 0.0 => {
                            negative_costs += 1;
                            0.0
                        }
                        Some(value) => value,
                        None => {
                            bad_costs += 1;
                            0.0
                        }
                    }
                }
            }
            None => 0.0,
        };

        let customers = match column_map.customers {
            Some(idx) => {
                let raw = cell(row, idx);
                if raw.trim().is_empty() {
                    None
                } else {
                    match parse_number(raw) {
                        Some(value) => Some(value.max(0.0).round() as u64),
                        None => {
                            bad_customers += 1;
                            None
                        }
                    }
                }
            }
            None => None,
        };

        let department = column_map
            .department
            .map(|idx| cell(row, idx).trim())
            .filter(|label| !label.is_empty())
            .map(str::to_string);

        records.push(BusinessRecord {
            date,
            revenue,
            costs,
            customers,
            department,
        });
    }

    let dropped = dataset.rows.len() - records.len();
    if dropped > 0 {
        debug!(
            "Dropped {} of {} raw rows during normalization",
            dropped,
            dataset.rows.len()
        );
    }

    let mut warnings = Vec::new();
    if bad_dates > 0 {
        warnings.push(format!("{} rows with unparseable dates were dropped", bad_dates));
    }
    if bad_revenue > 0 {
        warnings.push(format!(
            "{} rows with invalid revenue values were dropped",
            bad_revenue
        ));
    }
    if negative_revenue > 0 {
        warnings.push(format!(
            "{} negative revenue values were set to 0",
            negative_revenue
        ));
    }
    if bad_costs > 0 {
        warnings.push(format!(
            "{} non-numeric cost entries were treated as 0",
            bad_costs
        ));
    }
    if negative_costs > 0 {
        warnings.push(format!("{} negative cost values were set to 0", negative_costs));
    }
    if bad_customers > 0 {
        warnings.push(format!(
            "{} non-numeric customer counts were ignored",
            bad_customers
        ));
    }

    NormalizedDataset {
        records: sort_records(records),
        warnings,
    }
}

/// Sorts already-typed records into the canonical ascending date order.
/// The sort is stable: records sharing a date keep their relative order.
pub fn sort_records(mut records: Vec<BusinessRecord>) -> Vec<BusinessRecord> {
    records.sort_by_key(|r| r.date);
    records
}

fn cell(row: &[String], idx: usize) -> &str {
    row.get(idx).map(String::as_str).unwrap_or("")
}
