use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use common::models::{Region, SnapshotRow};
use tracing::{debug, warn};

use crate::error::ReportError;

/// Column headers shared by both sections; the price column is labelled per
/// region.
pub fn header_row(region: Region) -> [&'static str; 7] {
    [
        "Symbol",
        "Name",
        region.price_column(),
        "Previous Close",
        "Change",
        "Change (%)",
        "Latest Price Date",
    ]
}

pub fn report_file_name(date: NaiveDate) -> String {
    format!("stock_report_{}.csv", date.format("%d-%m-%Y"))
}

/// Writes the two-section report into `dir`. An existing report for the same
/// date is overwritten.
pub fn write_report(
    dir: &Path,
    date: NaiveDate,
    usa: &[SnapshotRow],
    india: &[SnapshotRow],
) -> Result<PathBuf, ReportError> {
    std::fs::create_dir_all(dir)?;
    let path = dir.join(report_file_name(date));

    if path.exists() {
        debug!("Overwriting existing report {}", path.display());
    }

    let mut out = BufWriter::new(File::create(&path)?);
    write_sections(&mut out, usa, india)?;
    out.flush()?;

    Ok(path)
}

pub fn write_sections<W: Write>(
    out: &mut W,
    usa: &[SnapshotRow],
    india: &[SnapshotRow],
) -> Result<(), ReportError> {
    write_section(out, Region::Usa, usa)?;
    out.write_all(b"\n")?;
    write_section(out, Region::India, india)?;
    Ok(())
}

fn write_section<W: Write>(
    out: &mut W,
    region: Region,
    rows: &[SnapshotRow],
) -> Result<(), ReportError> {
    writeln!(out, "{}", region.section_title())?;

    let mut wtr = csv::Writer::from_writer(&mut *out);
    wtr.write_record(header_row(region))?;
    for row in rows {
        if row.region() != region {
            warn!("{} row placed in the {} section", row.region(), region);
        }
        wtr.write_record(row.to_record())?;
    }
    wtr.flush()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, TimeZone};
    use common::models::{Bar, PriceSnapshot, ValidatedTicker};

    fn priced(
        symbol: &str,
        name: &str,
        region: Region,
        close: f64,
        prev: Option<f64>,
    ) -> SnapshotRow {
        let tz = FixedOffset::east_opt(19800).unwrap();
        let latest = Bar::from_close(tz.with_ymd_and_hms(2025, 6, 3, 15, 30, 0).unwrap(), close);
        SnapshotRow::Priced(PriceSnapshot::derive(
            &ValidatedTicker::new(symbol, name),
            region,
            &latest,
            prev,
        ))
    }

    #[test]
    fn test_file_name_uses_day_month_year() {
        let date = NaiveDate::from_ymd_opt(2025, 6, 3).unwrap();
        assert_eq!(report_file_name(date), "stock_report_03-06-2025.csv");
    }

    #[test]
    fn test_section_layout() {
        let usa = vec![priced("AAPL", "Apple Inc.", Region::Usa, 150.0, Some(148.0))];
        let india = vec![
            priced(
                "RELIANCE.NS",
                "Reliance Industries Limited",
                Region::India,
                2900.0,
                Some(2950.0),
            ),
            SnapshotRow::unavailable(
                &ValidatedTicker::new("TCS.NS", "Tata Consultancy Services Limited"),
                Region::India,
            ),
        ];

        let mut buf = Vec::new();
        write_sections(&mut buf, &usa, &india).unwrap();
        let text = String::from_utf8(buf).unwrap();

        let expected = "\
USA Stock Info
Symbol,Name,Price (USD),Previous Close,Change,Change (%),Latest Price Date
AAPL,Apple Inc.,150.00,148.00,+2.00,+1.35%,2025-06-03 03:30 PM

INDIA Stock Info
Symbol,Name,Price (INR),Previous Close,Change,Change (%),Latest Price Date
RELIANCE.NS,Reliance Industries Limited,2900.00,2950.00,-50.00,-1.69%,2025-06-03 03:30 PM
TCS.NS,Tata Consultancy Services Limited,N/A,N/A,N/A,N/A,N/A
";
        assert_eq!(text, expected);
    }

    #[test]
    fn test_empty_sections_keep_headers() {
        let mut buf = Vec::new();
        write_sections(&mut buf, &[], &[]).unwrap();
        let text = String::from_utf8(buf).unwrap();

        assert_eq!(text.lines().count(), 5);
        assert!(text.starts_with("USA Stock Info\n"));
        assert!(text.contains("\n\nINDIA Stock Info\n"));
    }

    #[test]
    fn test_same_day_report_is_overwritten() {
        let dir = tempfile::tempdir().unwrap();
        let date = NaiveDate::from_ymd_opt(2025, 6, 3).unwrap();

        let first = write_report(
            dir.path(),
            date,
            &[priced("AAPL", "Apple Inc.", Region::Usa, 150.0, None)],
            &[],
        )
        .unwrap();
        let second = write_report(dir.path(), date, &[], &[]).unwrap();

        assert_eq!(first, second);
        let text = std::fs::read_to_string(&second).unwrap();
        assert!(!text.contains("AAPL"));
    }
}
