use rust_xlsxwriter::Workbook;

use crate::core::error::Result;
use crate::shared::constants::EXPORT_SHEET;

/// Render a header row plus data rows into an xlsx buffer.
///
/// Each column is sized to its longest cell plus two characters.
pub fn write_table(headers: &[&str], rows: &[Vec<String>]) -> Result<Vec<u8>> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(EXPORT_SHEET)?;

    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();

    for (col, header) in headers.iter().enumerate() {
        worksheet.write_string(0, col as u16, *header)?;
    }

    for (i, row) in rows.iter().enumerate() {
        let row_index = (i + 1) as u32;
        for (col, cell) in row.iter().enumerate() {
            worksheet.write_string(row_index, col as u16, cell.as_str())?;
            if let Some(width) = widths.get_mut(col) {
                *width = (*width).max(cell.chars().count());
            }
        }
    }

    for (col, width) in widths.iter().enumerate() {
        worksheet.set_column_width(col as u16, (*width + 2) as f64)?;
    }

    Ok(workbook.save_to_buffer()?)
}
