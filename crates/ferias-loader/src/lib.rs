//! # ferias-loader
//!
//! Loads vacation schedules from spreadsheets.
//!
//! The first sheet (or a named one) must have a header row with the columns
//! `Nome`, `Area`, `Inicio_Ferias` and `Dias`. Each following row becomes a
//! [`VacationRecord`](ferias_core::VacationRecord) whose end date is derived
//! as start + days.
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::path::Path;
//!
//! let roster = ferias_loader::load_file(Path::new("ferias.xlsx")).unwrap();
//! println!("{} vacations from {} to {}", roster.len(), roster.min_date(), roster.max_date());
//! ```

pub mod sheet;

use calamine::{open_workbook_auto, Reader};
use ferias_core::Roster;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Columns every vacation sheet must provide
pub const REQUIRED_COLUMNS: [&str; 4] = ["Nome", "Area", "Inicio_Ferias", "Dias"];

/// Loading error; fatal at startup
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("File not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Unsupported file format: {} (expected .xlsx, .xlsm, .xlsb, .xls or .ods)", .0.display())]
    UnsupportedFormat(PathBuf),

    #[error("Failed to read {}: {message}", .path.display())]
    Read { path: PathBuf, message: String },

    #[error("Sheet not found: {0}")]
    SheetNotFound(String),

    #[error("Missing required columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    #[error("Row {row}: {reason}")]
    InvalidRow { row: usize, reason: String },

    #[error("No vacation records in {}", .0.display())]
    Empty(PathBuf),
}

/// Supported spreadsheet formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Xlsx,
    Xlsm,
    Xlsb,
    Xls,
    Ods,
}

/// Detect the spreadsheet format from the file extension
pub fn detect_format(path: &Path) -> Option<FileFormat> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    match ext.as_str() {
        "xlsx" => Some(FileFormat::Xlsx),
        "xlsm" => Some(FileFormat::Xlsm),
        "xlsb" => Some(FileFormat::Xlsb),
        "xls" => Some(FileFormat::Xls),
        "ods" => Some(FileFormat::Ods),
        _ => None,
    }
}

/// Load the first sheet of a spreadsheet
pub fn load_file(path: &Path) -> Result<Roster, LoadError> {
    load_sheet(path, None)
}

/// Load a named sheet, or the first one when `sheet` is `None`
pub fn load_sheet(path: &Path, sheet: Option<&str>) -> Result<Roster, LoadError> {
    if detect_format(path).is_none() {
        return Err(LoadError::UnsupportedFormat(path.to_path_buf()));
    }
    if !path.exists() {
        return Err(LoadError::NotFound(path.to_path_buf()));
    }

    let read_error = |e: calamine::Error| LoadError::Read {
        path: path.to_path_buf(),
        message: e.to_string(),
    };

    let mut workbook = open_workbook_auto(path).map_err(read_error)?;
    let range = match sheet {
        Some(name) => {
            if !workbook.sheet_names().iter().any(|n| n == name) {
                return Err(LoadError::SheetNotFound(name.to_string()));
            }
            workbook.worksheet_range(name).map_err(read_error)?
        }
        None => workbook
            .worksheet_range_at(0)
            .ok_or_else(|| LoadError::Empty(path.to_path_buf()))?
            .map_err(read_error)?,
    };

    let records = sheet::records_from_range(&range)?;
    tracing::debug!(
        path = %path.display(),
        sheet = sheet.unwrap_or("<first>"),
        rows = records.len(),
        "decoded vacation sheet"
    );

    let roster = Roster::new(records).ok_or_else(|| LoadError::Empty(path.to_path_buf()))?;
    tracing::info!(
        path = %path.display(),
        records = roster.len(),
        from = %roster.min_date(),
        to = %roster.max_date(),
        "loaded vacation schedule"
    );
    Ok(roster)
}
