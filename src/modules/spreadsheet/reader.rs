use std::path::Path;

use calamine::{open_workbook_auto, Data, Range, Reader};
use tracing::debug;

use crate::core::error::{AppError, Result};

/// One data row of an uploaded sheet.
#[derive(Debug, Clone, PartialEq)]
pub struct SheetRow {
    /// 1-based row number as shown by spreadsheet applications
    pub number: usize,
    pub cells: Vec<String>,
}

/// Read the first worksheet, skipping the header row and blank rows.
///
/// Cells are positional from column A even when leading columns are empty.
pub fn read_rows(path: &Path) -> Result<Vec<SheetRow>> {
    let mut workbook = open_workbook_auto(path)?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| AppError::Spreadsheet("Workbook has no worksheet".to_string()))??;

    let rows = collect_rows(&range);
    debug!("Read {} data rows from {}", rows.len(), path.display());
    Ok(rows)
}

fn collect_rows(range: &Range<Data>) -> Vec<SheetRow> {
    let (start_row, start_col) = match range.start() {
        Some(start) => start,
        None => return Vec::new(),
    };

    range
        .rows()
        .enumerate()
        .filter_map(|(i, row)| {
            let absolute = start_row as usize + i;
            if absolute == 0 {
                return None;
            }

            let cells: Vec<String> = std::iter::repeat(String::new())
                .take(start_col as usize)
                .chain(row.iter().map(cell_text))
                .collect();
            if cells.iter().all(|c| c.trim().is_empty()) {
                return None;
            }

            Some(SheetRow {
                number: absolute + 1,
                cells,
            })
        })
        .collect()
}

/// Whole numbers come back from xlsx as floats; render them without `.0` so
/// codes such as `62` survive a round trip.
fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Float(f) if f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", *f as i64),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_text() {
        assert_eq!(cell_text(&Data::Empty), "");
        assert_eq!(cell_text(&Data::Float(62.0)), "62");
        assert_eq!(cell_text(&Data::Float(1.5)), "1.5");
        assert_eq!(cell_text(&Data::Int(7)), "7");
        assert_eq!(cell_text(&Data::String("Jawa".to_string())), "Jawa");
    }

    #[test]
    fn test_collect_rows_skips_header_and_blank_rows() {
        let mut range = Range::new((0, 0), (3, 2));
        range.set_value((0, 0), Data::String("ID".to_string()));
        range.set_value((0, 1), Data::String("Code".to_string()));
        range.set_value((1, 1), Data::String("1".to_string()));
        range.set_value((1, 2), Data::String("Islam".to_string()));
        range.set_value((3, 1), Data::Float(2.0));
        range.set_value((3, 2), Data::String("Kristen".to_string()));

        let rows = collect_rows(&range);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].number, 2);
        assert_eq!(rows[0].cells, vec!["", "1", "Islam"]);
        assert_eq!(rows[1].number, 4);
        assert_eq!(rows[1].cells, vec!["", "2", "Kristen"]);
    }

    #[test]
    fn test_collect_rows_pads_missing_leading_columns() {
        // No id anywhere, so the used range starts at column B.
        let mut range = Range::new((0, 1), (1, 2));
        range.set_value((0, 1), Data::String("Code".to_string()));
        range.set_value((1, 1), Data::String("1".to_string()));
        range.set_value((1, 2), Data::String("Islam".to_string()));

        let rows = collect_rows(&range);
        assert_eq!(rows[0].cells, vec!["", "1", "Islam"]);
    }
}
