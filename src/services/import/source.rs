//! Tabular input for the import pipeline. Workbooks and CSV uploads are
//! normalized into the same in-memory `Table` shape so the column resolver
//! and row normalizers do not care where the data came from.

use std::io::Cursor;

use calamine::{Data, Reader};
use time::{Date, Duration};

use super::ImportError;

/// Day 0 of the 1900 date system as used by Excel serial numbers.
const EXCEL_EPOCH: (i32, time::Month, u8) = (1899, time::Month::December, 30);

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Cell {
    Empty,
    Text(String),
    Number(f64),
    Bool(bool),
    Date(Date),
}

#[derive(Debug, Clone)]
pub(crate) struct Table {
    pub(crate) headers: Vec<String>,
    pub(crate) rows: Vec<Vec<Cell>>,
}

impl Table {
    pub(crate) fn cell<'a>(&'a self, row: &'a [Cell], index: usize) -> &'a Cell {
        row.get(index).unwrap_or(&Cell::Empty)
    }
}

/// Normalizes raw spreadsheet headers: trimmed, lowercased, separators
/// collapsed to underscores, asterisks stripped.
pub(crate) fn clean_header(raw: &str) -> String {
    raw.trim()
        .to_lowercase()
        .replace([' ', '/', ','], "_")
        .replace('*', "")
}

pub(crate) fn excel_serial_to_date(serial: f64) -> Option<Date> {
    if !serial.is_finite() || serial < 0.0 || serial > 2_958_465.0 {
        return None;
    }
    let (year, month, day) = EXCEL_EPOCH;
    let epoch = Date::from_calendar_date(year, month, day).ok()?;
    epoch.checked_add(Duration::days(serial.trunc() as i64))
}

fn convert(data: &Data) -> Cell {
    match data {
        Data::Empty => Cell::Empty,
        Data::String(value) => {
            if value.trim().is_empty() {
                Cell::Empty
            } else {
                Cell::Text(value.clone())
            }
        }
        Data::Float(value) => Cell::Number(*value),
        Data::Int(value) => Cell::Number(*value as f64),
        Data::Bool(value) => Cell::Bool(*value),
        Data::DateTime(value) => match excel_serial_to_date(value.as_f64()) {
            Some(date) => Cell::Date(date),
            None => Cell::Empty,
        },
        Data::DateTimeIso(value) => Cell::Text(value.clone()),
        Data::DurationIso(value) => Cell::Text(value.clone()),
        Data::Error(_) => Cell::Empty,
    }
}

fn header_text(data: &Data) -> String {
    match data {
        Data::String(value) => value.clone(),
        Data::Float(value) => value.to_string(),
        Data::Int(value) => value.to_string(),
        Data::Bool(value) => value.to_string(),
        _ => String::new(),
    }
}

pub(crate) fn workbook_sheet_names(bytes: &[u8]) -> Result<Vec<String>, ImportError> {
    let workbook = calamine::open_workbook_auto_from_rs(Cursor::new(bytes.to_vec()))
        .map_err(|err| ImportError::InvalidFile(err.to_string()))?;
    Ok(workbook.sheet_names().to_vec())
}

/// Reads one worksheet into a `Table`. The first row is the header row.
pub(crate) fn read_sheet(bytes: &[u8], sheet: &str) -> Result<Table, ImportError> {
    let mut workbook = calamine::open_workbook_auto_from_rs(Cursor::new(bytes.to_vec()))
        .map_err(|err| ImportError::InvalidFile(err.to_string()))?;

    let available = workbook.sheet_names().to_vec();
    let range = workbook.worksheet_range(sheet).map_err(|_| ImportError::MissingSheet {
        expected: sheet.to_string(),
        found: available.clone(),
    })?;

    let mut rows = range.rows();
    let headers: Vec<String> = match rows.next() {
        Some(header_row) => header_row.iter().map(|cell| clean_header(&header_text(cell))).collect(),
        None => Vec::new(),
    };

    let data_rows: Vec<Vec<Cell>> =
        rows.map(|row| row.iter().map(convert).collect::<Vec<Cell>>()).collect();

    Ok(Table { headers, rows: data_rows })
}

/// Reads a CSV upload into a `Table`. Every cell is text; downstream
/// coercions handle booleans and numbers.
pub(crate) fn read_csv(bytes: &[u8]) -> Result<Table, ImportError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(bytes);

    let headers: Vec<String> = reader
        .headers()
        .map_err(|err| ImportError::InvalidFile(err.to_string()))?
        .iter()
        .map(clean_header)
        .collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|err| ImportError::InvalidFile(err.to_string()))?;
        let row: Vec<Cell> = record
            .iter()
            .map(|field| {
                if field.is_empty() {
                    Cell::Empty
                } else {
                    Cell::Text(field.to_string())
                }
            })
            .collect();
        rows.push(row);
    }

    Ok(Table { headers, rows })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_header_normalizes_separators() {
        assert_eq!(clean_header("  Trainer Name "), "trainer_name");
        assert_eq!(clean_header("Skill/Category"), "skill_category");
        assert_eq!(clean_header("Division, Unit"), "division__unit");
        assert_eq!(clean_header("Competency*"), "competency");
    }

    #[test]
    fn clean_header_keeps_dots() {
        assert_eq!(clean_header("No. of Seats"), "no._of_seats");
    }

    #[test]
    fn excel_serial_maps_to_calendar_date() {
        // 45292 is 2024-01-01 in the 1900 date system
        let date = excel_serial_to_date(45292.0).expect("date");
        assert_eq!(date.year(), 2024);
        assert_eq!(date.month(), time::Month::January);
        assert_eq!(date.day(), 1);
    }

    #[test]
    fn excel_serial_rejects_out_of_range() {
        assert!(excel_serial_to_date(-1.0).is_none());
        assert!(excel_serial_to_date(f64::NAN).is_none());
    }

    #[test]
    fn read_csv_trims_and_cleans_headers() {
        let data = b"Manager EmpID, Manager Name ,employee_empid,Employee Name\n\
                     1001, Alice ,2001,Bob\n";
        let table = read_csv(data).expect("csv");
        assert_eq!(
            table.headers,
            vec!["manager_empid", "manager_name", "employee_empid", "employee_name"]
        );
        assert_eq!(table.rows.len(), 1);
        assert_eq!(table.rows[0][0], Cell::Text("1001".to_string()));
        assert_eq!(table.rows[0][1], Cell::Text("Alice".to_string()));
    }

    #[test]
    fn read_csv_maps_empty_fields_to_empty_cells() {
        let data = b"a,b\n1,\n";
        let table = read_csv(data).expect("csv");
        assert_eq!(table.rows[0][1], Cell::Empty);
    }
}
