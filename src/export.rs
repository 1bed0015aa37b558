use chrono::NaiveDate;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::ReportError;
use crate::report::{CellValue, ReportTable};

/// MIME type advertised for the spreadsheet artifact.
pub const REPORT_MIME: &str = "application/vnd.ms-excel";

/// Convert a report table to XLSX format
///
/// Serializes an assembled [`ReportTable`] into a single-worksheet Excel
/// workbook using the rust_xlsxwriter library. Header rows are written the
/// same way as data rows; the distinction is positional only.
///
/// # Arguments
/// * `table` - The assembled report rows, headers first
///
/// # Returns
/// * `Result<Vec<u8>, ReportError>` - XLSX file content as bytes or an error
pub fn to_xlsx(table: &ReportTable) -> Result<Vec<u8>, ReportError> {
    use rust_xlsxwriter::{Workbook, Worksheet};

    let mut workbook = Workbook::new();
    let mut worksheet = Worksheet::new();

    for (r, row) in table.rows.iter().enumerate() {
        for (c, cell) in row.iter().enumerate() {
            match cell {
                CellValue::Text(value) => {
                    worksheet.write_string(r as u32, c as u16, value.as_str())?;
                }
                CellValue::Number(value) => {
                    worksheet.write_number(r as u32, c as u16, *value)?;
                }
            }
        }
    }

    workbook.push_worksheet(worksheet);

    let buffer = workbook.save_to_buffer()?;
    log::debug!("assembled xlsx artifact of {} bytes", buffer.len());

    Ok(buffer)
}

/// Convert a record listing to CSV format
///
/// The header row is taken from the first record's field names; every
/// record contributes one data row. Lines are terminated with `\r\n` and
/// values are written verbatim, without quoting. An empty listing yields
/// an empty string.
///
/// # Arguments
/// * `records` - Records that serialize to JSON objects
///
/// # Returns
/// * `Result<String, ReportError>` - CSV content as a string or an error
pub fn to_csv<T: Serialize>(records: &[T]) -> Result<String, ReportError> {
    let mut csv_string = String::new();
    let Some(first) = records.first() else {
        return Ok(csv_string);
    };

    let first: Map<String, Value> = serde_json::from_value(serde_json::to_value(first)?)?;
    let heading = first.keys().cloned().collect::<Vec<_>>().join(",");
    csv_string.push_str(&heading);
    csv_string.push_str("\r\n");

    for record in records {
        let fields: Map<String, Value> = serde_json::from_value(serde_json::to_value(record)?)?;
        let mut line = String::new();
        for value in fields.values() {
            if !line.is_empty() {
                line.push(',');
            }
            match value {
                Value::String(s) => line.push_str(s),
                Value::Null => {}
                other => line.push_str(&other.to_string()),
            }
        }
        csv_string.push_str(&line);
        csv_string.push_str("\r\n");
    }

    Ok(csv_string)
}

/// Default artifact filename for the given date, e.g. `Mon-Jan-01-2024.xlsx`.
pub fn report_filename(date: NaiveDate) -> String {
    let mut filename = date.format("%a %b %d %Y").to_string().replace(' ', "-");
    filename.push_str(".xlsx");
    filename
}
