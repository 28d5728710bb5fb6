use crate::schema::{BusinessRecord, DepartmentMetric};

/// Rolls the record set up by department, summing revenue, costs and
/// customers and deriving profit per group.
///
/// Records without a department label are excluded rather than pooled into
/// a synthetic bucket. Output keeps first-seen order from the date-sorted
/// record set, so chart legends stay stable across calls with the same
/// input.
pub fn aggregate(records: &[BusinessRecord]) -> Vec<DepartmentMetric> {
    let mut metrics: Vec<DepartmentMetric> = Vec::new();

    for record in records {
        let Some(department) = record.department.as_deref() else {
            continue;
        };

        let idx = match metrics.iter().position(|m| m.department == department) {
            Some(idx) => idx,
            None => {
                metrics.push(DepartmentMetric {
                    department: department.to_string(),
                    revenue: 0.0,
                    costs: 0.0,
                    profit: 0.0,
                    customers: 0,
                });
                metrics.len() - 1
            }
        };

        let metric = &mut metrics[idx];
        metric.revenue += record.revenue;
        metric.costs += record.costs;
        metric.customers += record.customers.unwrap_or(0);
    }

    for metric in &mut metrics {
        metric.profit = metric.revenue - metric.costs;
    }

    metrics
}
