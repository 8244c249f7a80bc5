use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use common::models::{Region, SnapshotRow};
use serde::Deserialize;

use crate::error::ReportError;
use crate::report_writer::header_row;

/// One data line of a report section, as rendered.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ReportRecord {
    pub symbol: String,
    pub name: String,
    pub price: String,
    pub previous_close: String,
    pub change: String,
    pub change_pct: String,
    pub latest_price_date: String,
}

impl From<&SnapshotRow> for ReportRecord {
    fn from(row: &SnapshotRow) -> Self {
        let [symbol, name, price, previous_close, change, change_pct, latest_price_date] =
            row.to_record();
        Self {
            symbol,
            name,
            price,
            previous_close,
            change,
            change_pct,
            latest_price_date,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedReport {
    pub usa: Vec<ReportRecord>,
    pub india: Vec<ReportRecord>,
}

impl ParsedReport {
    pub fn section(&self, region: Region) -> &[ReportRecord] {
        match region {
            Region::Usa => &self.usa,
            Region::India => &self.india,
        }
    }
}

pub fn read_report(path: &Path) -> Result<ParsedReport, ReportError> {
    parse_report(BufReader::new(File::open(path)?))
}

/// Parses the two-section layout produced by the writer: USA first, India
/// second, separated by one blank line.
pub fn parse_report<R: BufRead>(reader: R) -> Result<ParsedReport, ReportError> {
    let mut sections: Vec<Vec<String>> = vec![Vec::new()];
    for line in reader.lines() {
        let line = line?;
        let line = line.trim_end_matches('\r');
        if line.is_empty() {
            if sections.last().is_some_and(|s| !s.is_empty()) {
                sections.push(Vec::new());
            }
            continue;
        }
        if let Some(current) = sections.last_mut() {
            current.push(line.to_string());
        }
    }
    sections.retain(|s| !s.is_empty());

    match sections.as_slice() {
        [usa, india] => Ok(ParsedReport {
            usa: parse_section(usa, Region::Usa)?,
            india: parse_section(india, Region::India)?,
        }),
        other => Err(ReportError::Malformed(format!(
            "expected 2 sections, found {}",
            other.len()
        ))),
    }
}

fn parse_section(lines: &[String], region: Region) -> Result<Vec<ReportRecord>, ReportError> {
    let (title, body) = lines
        .split_first()
        .ok_or_else(|| ReportError::Malformed(format!("empty {} section", region)))?;

    if title != region.section_title() {
        return Err(ReportError::Malformed(format!(
            "expected section title {:?}, found {:?}",
            region.section_title(),
            title
        )));
    }

    let joined = body.join("\n");
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(joined.as_bytes());

    let headers = rdr.headers()?;
    let expected = header_row(region);
    if headers.iter().ne(expected.iter().copied()) {
        return Err(ReportError::Malformed(format!(
            "unexpected {} header row: {:?}",
            region, headers
        )));
    }

    let mut records = Vec::new();
    for result in rdr.records() {
        let record = result?;
        records.push(record.deserialize::<ReportRecord>(None)?);
    }

    Ok(records)
}
