//! Header mapping and cell decoding for vacation sheets

use crate::{LoadError, REQUIRED_COLUMNS};
use calamine::{Data, DataType, Range};
use chrono::NaiveDate;
use ferias_core::VacationRecord;

/// Positions of the required columns within a row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnMap {
    pub name: usize,
    pub department: usize,
    pub start: usize,
    pub days: usize,
}

impl ColumnMap {
    /// Locate the required columns in a header row (trimmed, any order)
    pub fn from_header(header: &[Data]) -> Result<Self, LoadError> {
        let labels: Vec<String> = header.iter().map(|c| c.to_string().trim().to_string()).collect();
        let find = |column: &str| labels.iter().position(|l| l == column);

        let missing: Vec<String> = REQUIRED_COLUMNS
            .iter()
            .filter(|&&c| find(c).is_none())
            .map(|&c| c.to_string())
            .collect();
        if !missing.is_empty() {
            return Err(LoadError::MissingColumns(missing));
        }

        let [name, department, start, days] = REQUIRED_COLUMNS.map(|c| find(c).unwrap_or_default());
        Ok(Self {
            name,
            department,
            start,
            days,
        })
    }
}

/// Decode every data row of a worksheet range
pub fn records_from_range(range: &Range<Data>) -> Result<Vec<VacationRecord>, LoadError> {
    // Spreadsheet row number (1-based) of the header
    let header_row = range.start().map_or(1, |(row, _)| row as usize + 1);
    records_from_rows(range.rows(), header_row)
}

/// Decode rows where the first row is the header.
///
/// `header_row` is the 1-based spreadsheet row of the header, used to
/// number errors the way a spreadsheet user sees them.
pub fn records_from_rows<'a>(
    mut rows: impl Iterator<Item = &'a [Data]>,
    header_row: usize,
) -> Result<Vec<VacationRecord>, LoadError> {
    let Some(header) = rows.next() else {
        return Err(LoadError::MissingColumns(
            REQUIRED_COLUMNS.iter().map(|c| (*c).to_string()).collect(),
        ));
    };
    let columns = ColumnMap::from_header(header)?;

    let mut records = Vec::new();
    for (offset, row) in rows.enumerate() {
        if is_blank(row) {
            continue;
        }
        let row_number = header_row + offset + 1;
        let record = decode_row(row, &columns).map_err(|reason| LoadError::InvalidRow {
            row: row_number,
            reason,
        })?;
        records.push(record);
    }
    Ok(records)
}

fn decode_row(row: &[Data], columns: &ColumnMap) -> Result<VacationRecord, String> {
    let cell = |idx: usize| row.get(idx).unwrap_or(&Data::Empty);

    let name = parse_text(cell(columns.name)).ok_or("missing 'Nome'")?;
    let department = parse_text(cell(columns.department)).ok_or("missing 'Area'")?;
    let start = match cell(columns.start) {
        Data::Empty => return Err("missing 'Inicio_Ferias'".into()),
        other => parse_date(other)
            .ok_or_else(|| format!("'Inicio_Ferias' is not a date: '{other}'"))?,
    };
    let days = parse_days(cell(columns.days))?;

    Ok(VacationRecord::new(name, department, start, days))
}

fn is_blank(row: &[Data]) -> bool {
    row.iter().all(|c| match c {
        Data::Empty => true,
        Data::String(s) => s.trim().is_empty(),
        _ => false,
    })
}

/// Text cell; numbers are stringified, blanks are `None`
fn parse_text(cell: &Data) -> Option<String> {
    let text = match cell {
        Data::String(s) => s.trim().to_string(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) => f.to_string(),
        Data::Bool(b) => b.to_string(),
        _ => return None,
    };
    (!text.is_empty()).then_some(text)
}

/// Date from a native date cell, an Excel serial, or an ISO / `dd/mm/yyyy` string
pub fn parse_date(cell: &Data) -> Option<NaiveDate> {
    match cell {
        Data::String(s) | Data::DateTimeIso(s) => parse_date_str(s),
        Data::DateTime(_) | Data::Int(_) | Data::Float(_) => cell.as_date(),
        _ => None,
    }
}

fn parse_date_str(s: &str) -> Option<NaiveDate> {
    // Drop a trailing time part ("2024-01-05 00:00:00", "2024-01-05T00:00:00")
    let date = s.trim().split(['T', ' ']).next()?;
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(date, "%d/%m/%Y"))
        .ok()
}

/// Whole, non-negative day count
pub fn parse_days(cell: &Data) -> Result<u32, String> {
    let value = match cell {
        Data::Int(i) => *i,
        Data::Float(f) if f.is_finite() && f.fract() == 0.0 => *f as i64,
        Data::Float(f) => return Err(format!("'Dias' must be a whole number, got {f}")),
        Data::String(s) => s
            .trim()
            .parse::<i64>()
            .map_err(|_| format!("'Dias' is not a number: '{s}'"))?,
        Data::Empty => return Err("missing 'Dias'".into()),
        other => return Err(format!("'Dias' is not a number: '{other}'")),
    };
    u32::try_from(value).map_err(|_| format!("'Dias' must be zero or positive, got {value}"))
}
