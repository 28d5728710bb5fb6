use csv::{ReaderBuilder, Trim, Writer};

use crate::error::Result;
use crate::schema::{BusinessRecord, RawDataset};

/// Parses raw CSV text into an untyped dataset.
///
/// The first row is taken as the header. Rows of uneven length are
/// tolerated; the validator and normalizer treat missing cells as empty.
pub fn read_csv(text: &str) -> Result<RawDataset> {
    let mut reader = ReaderBuilder::new()
        .flexible(true)
        .trim(Trim::All)
        .from_reader(text.as_bytes());

    let columns: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(record.iter().map(str::to_string).collect());
    }

    Ok(RawDataset { columns, rows })
}

/// Serializes normalized records back to CSV text, header row included.
pub fn write_csv(records: &[BusinessRecord]) -> Result<String> {
    let mut writer = Writer::from_writer(Vec::new());
    for record in records {
        writer.serialize(record)?;
    }
    let bytes = writer.into_inner().map_err(|e| e.into_error())?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_read_csv_basic() {
        let text = "date,revenue,department\n2024-01-01,100,Sales\n2024-02-01,200,\n";
        let dataset = read_csv(text).unwrap();

        assert_eq!(dataset.columns, vec!["date", "revenue", "department"]);
        assert_eq!(dataset.rows.len(), 2);
        assert_eq!(dataset.rows[0], vec!["2024-01-01", "100", "Sales"]);
        assert_eq!(dataset.rows[1][2], "");
    }

    #[test]
    fn test_read_csv_trims_and_tolerates_ragged_rows() {
        let text = "Date , Revenue ($) \n 2024-01-01 , 100 \n2024-02-01\n";
        let dataset = read_csv(text).unwrap();

        assert_eq!(dataset.columns, vec!["Date", "Revenue ($)"]);
        assert_eq!(dataset.rows[0], vec!["2024-01-01", "100"]);
        assert_eq!(dataset.rows[1], vec!["2024-02-01"]);
    }

    #[test]
    fn test_read_csv_quoted_cells() {
        let text = "date,revenue,department\n2024-01-01,\"1,200.50\",\"Customer Success\"\n";
        let dataset = read_csv(text).unwrap();
        assert_eq!(dataset.rows[0][1], "1,200.50");
        assert_eq!(dataset.rows[0][2], "Customer Success");
    }

    #[test]
    fn test_write_csv() {
        let records = vec![
            BusinessRecord {
                date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
                revenue: 100.0,
                costs: 60.0,
                customers: Some(42),
                department: Some("Sales".to_string()),
            },
            BusinessRecord {
                date: NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
                revenue: 200.0,
                costs: 0.0,
                customers: None,
                department: None,
            },
        ];

        let text = write_csv(&records).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("date,revenue,costs,customers,department"));
        assert_eq!(lines.next(), Some("2024-01-01,100.0,60.0,42,Sales"));
        assert_eq!(lines.next(), Some("2024-02-01,200.0,0.0,,"));
    }
}
