use business_analytics_engine::*;
use chrono::NaiveDate;

fn month(m: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, m, 1).unwrap()
}

fn record(
    m: u32,
    revenue: f64,
    costs: f64,
    customers: Option<u64>,
    department: Option<&str>,
) -> BusinessRecord {
    BusinessRecord {
        date: month(m),
        revenue,
        costs,
        customers,
        department: department.map(str::to_string),
    }
}

#[test]
fn test_messy_upload_end_to_end() -> anyhow::Result<()> {
    let csv = "\
Date,Total Revenue ($),Operating Costs,Customers,Department
2024-03-01,\"$1,500.00\",900,120,Sales
2024-01-01,\"$1,000.00\",600,100,Sales
not-a-date,500,300,50,Marketing
2024-02-01,\"$1,200.00\",abc,110,Marketing
2024-04-01,n/a,700,130,Sales
";

    let analysis = analyze_csv(csv, &AnalyticsOptions::default())?;
    let report = &analysis.report;

    // two rows dropped, one cost entry zeroed
    assert_eq!(report.record_count, 3);
    assert_eq!(analysis.warnings.len(), 3);

    // sorted ascending despite shuffled input
    assert_eq!(report.records[0].date, month(1));
    assert_eq!(report.records[2].date, month(3));

    assert_eq!(report.kpis.total_revenue, 3700.0);
    assert_eq!(report.kpis.total_costs, 1500.0);
    assert_eq!(report.kpis.total_profit, 2200.0);

    // first-seen department order from the sorted records
    let names: Vec<&str> = report
        .departments
        .iter()
        .map(|d| d.department.as_str())
        .collect();
    assert_eq!(names, vec!["Sales", "Marketing"]);

    Ok(())
}

#[test]
fn test_trend_alert_and_forecast_on_growing_business() -> anyhow::Result<()> {
    // six flat months then a sharp step up: recent window mean 2000,
    // previous window mean 1000
    let records = vec![
        record(1, 1000.0, 400.0, Some(100), Some("Sales")),
        record(2, 1000.0, 400.0, Some(100), Some("Sales")),
        record(3, 1000.0, 400.0, Some(105), Some("Marketing")),
        record(4, 2000.0, 500.0, Some(140), Some("Sales")),
        record(5, 2000.0, 500.0, Some(150), Some("Marketing")),
        record(6, 2000.0, 500.0, Some(160), Some("Sales")),
    ];

    let report = run_analysis(&records, &AnalyticsOptions::default())?;

    let revenue_change = report.kpis.revenue_change_pct.unwrap();
    assert!((revenue_change - 100.0).abs() < 1e-9);
    assert!(report.kpis.customer_change_pct.unwrap() > 0.0);

    let growth_alert = report
        .alerts
        .iter()
        .find(|a| a.kind == AlertKind::RevenueChange)
        .unwrap();
    assert_eq!(growth_alert.severity, Severity::Info);
    assert!(growth_alert.message.contains("increased by 100.0%"));

    assert_eq!(report.forecast.len(), 3);
    assert_eq!(report.forecast[0].period_index, 1);
    // upward-sloping fit keeps projecting above the early flat level
    assert!(report.forecast[0].predicted_revenue > 1000.0);

    Ok(())
}

#[test]
fn test_declining_business_warns() {
    let records = vec![
        record(1, 2000.0, 1900.0, None, None),
        record(2, 2000.0, 1900.0, None, None),
        record(3, 2000.0, 1900.0, None, None),
        record(4, 1000.0, 950.0, None, None),
        record(5, 1000.0, 950.0, None, None),
        record(6, 1000.0, 950.0, None, None),
    ];

    let report = run_analysis(&records, &AnalyticsOptions::default()).unwrap();

    let decline = report
        .alerts
        .iter()
        .find(|a| a.kind == AlertKind::RevenueChange)
        .unwrap();
    assert_eq!(decline.severity, Severity::Warning);
    assert!(decline.message.contains("decreased by 50.0%"));

    // margin is 5%: the low-margin warning rides along
    assert!(report
        .alerts
        .iter()
        .any(|a| a.kind == AlertKind::LowMargin && a.severity == Severity::Warning));
}

#[test]
fn test_department_breakdown_covers_labels_exactly_once() {
    let records = vec![
        record(1, 100.0, 10.0, Some(5), Some("Sales")),
        record(2, 200.0, 20.0, Some(6), Some("Marketing")),
        record(3, 300.0, 30.0, Some(7), Some("Sales")),
        record(4, 400.0, 40.0, None, None),
    ];

    let report = run_analysis(&records, &AnalyticsOptions::default()).unwrap();

    let mut names: Vec<&str> = report
        .departments
        .iter()
        .map(|d| d.department.as_str())
        .collect();
    assert_eq!(names.len(), 2);
    names.sort();
    names.dedup();
    assert_eq!(names, vec!["Marketing", "Sales"]);

    // the unlabeled record still counts toward the KPIs
    assert_eq!(report.kpis.total_revenue, 1000.0);
    let breakdown_total: f64 = report.departments.iter().map(|d| d.revenue).sum();
    assert_eq!(breakdown_total, 600.0);
}

#[test]
fn test_scenario_projection_end_to_end() -> anyhow::Result<()> {
    let records = vec![
        record(1, 100.0, 60.0, None, None),
        record(2, 200.0, 60.0, None, None),
    ];
    let options = AnalyticsOptions {
        scenario_adjustment: Some(10.0),
        ..Default::default()
    };

    let report = run_analysis(&records, &options)?;
    let scenario = report.scenario.as_ref().unwrap();

    assert_eq!(scenario.adjustment_pct, 10.0);
    assert!((scenario.records[0].scenario_revenue - 110.0).abs() < 1e-9);
    assert!((scenario.records[0].scenario_profit - 50.0).abs() < 1e-9);
    assert!((scenario.kpis.total_revenue - 330.0).abs() < 1e-9);

    // the forecast carries the adjusted revenue alongside the baseline
    for point in &report.forecast {
        let scenario_revenue = point.scenario_revenue.unwrap();
        assert!((scenario_revenue - point.predicted_revenue * 1.1).abs() < 1e-9);
    }

    Ok(())
}

#[test]
fn test_forecast_continues_linear_series() {
    // revenue[i] = 1000 + 250 * i over 8 months
    let records: Vec<BusinessRecord> = (0..8)
        .map(|i| record(i as u32 + 1, 1000.0 + 250.0 * i as f64, 0.0, None, None))
        .collect();

    let options = AnalyticsOptions {
        forecast_months: 4,
        ..Default::default()
    };
    let report = run_analysis(&records, &options).unwrap();

    assert_eq!(report.forecast.len(), 4);
    for (i, point) in report.forecast.iter().enumerate() {
        let expected = 1000.0 + 250.0 * (8 + i) as f64;
        assert!(
            (point.predicted_revenue - expected).abs() < 1e-6,
            "period {} should predict {}, got {}",
            point.period_index,
            expected,
            point.predicted_revenue
        );
    }
}

#[test]
fn test_sample_dataset_flows_through_pipeline() -> anyhow::Result<()> {
    let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    let records = SampleDataset::Finance.generate(start);

    let report = run_analysis(&records, &AnalyticsOptions::default())?;

    assert_eq!(report.record_count, 12);
    assert_eq!(report.kpis.total_profit, report.kpis.total_revenue - report.kpis.total_costs);
    // 12 records cycling through 5 departments covers all of them
    assert_eq!(report.departments.len(), 5);
    assert_eq!(report.forecast.len(), 3);

    Ok(())
}

#[test]
fn test_exported_csv_reanalyzes_to_same_kpis() -> anyhow::Result<()> {
    let records = vec![
        record(1, 100.0, 60.0, Some(10), Some("Sales")),
        record(2, 200.0, 80.0, None, Some("Marketing")),
        record(3, 150.0, 70.0, Some(12), None),
    ];
    let baseline = run_analysis(&records, &AnalyticsOptions::default())?;

    let exported = write_csv(&baseline.records)?;
    let reanalyzed = analyze_csv(&exported, &AnalyticsOptions::default())?;

    assert!(reanalyzed.warnings.is_empty());
    assert_eq!(reanalyzed.report.kpis, baseline.kpis);
    assert_eq!(reanalyzed.report.departments, baseline.departments);

    Ok(())
}

#[test]
fn test_structural_errors_are_distinguishable() {
    let missing_column = analyze_csv("name,value\nfoo,1\n", &AnalyticsOptions::default());
    match missing_column {
        Err(AnalyticsError::MissingRequiredColumn(name)) => assert_eq!(name, "date"),
        other => panic!("expected MissingRequiredColumn, got {:?}", other),
    }

    let no_rows = analyze_csv("date,revenue\n", &AnalyticsOptions::default());
    assert!(matches!(no_rows, Err(AnalyticsError::EmptyInput)));

    // every raw row failed coercion: the batch is structurally empty too
    let all_dropped = analyze_csv(
        "date,revenue\nbad,worse\nalso bad,nope\n",
        &AnalyticsOptions::default(),
    );
    assert!(matches!(all_dropped, Err(AnalyticsError::EmptyInput)));
}

#[test]
fn test_short_history_degrades_instead_of_crashing() {
    let records = vec![record(1, 500.0, 100.0, Some(10), Some("Sales"))];
    let report = run_analysis(&records, &AnalyticsOptions::default()).unwrap();

    assert_eq!(report.kpis.revenue_change_pct, None);
    assert_eq!(report.kpis.customer_change_pct, None);
    assert!(report.forecast.is_empty());
    assert!(!report
        .alerts
        .iter()
        .any(|a| a.kind == AlertKind::RevenueChange));
}
