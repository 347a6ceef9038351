//! Spreadsheet export of the result table
//!
//! Produces one workbook with the full table plus one sheet per named flag
//! subset. Styling (widths, frozen panes, the 3-color scale on r) lives
//! entirely here; the statistical core never knows about presentation.

use crate::io::configuration::{
    NUMERIC_COLUMN_SPAN, NUMERIC_COLUMN_WIDTH, PAIR_COLUMN_WIDTH, SCALE_HIGH_COLOR,
    SCALE_HIGH_VALUE, SCALE_LOW_COLOR, SCALE_LOW_VALUE, SCALE_MID_COLOR, SCALE_MID_VALUE,
};
use crate::io::error::{CorrError, Result};
use crate::report::records::ResultTable;
use rust_xlsxwriter::{
    Color, ConditionalFormat3ColorScale, ConditionalFormatType, Format, Workbook, Worksheet,
    XlsxError,
};
use std::path::Path;

const HEADERS: [&str; 8] = [
    "pair", "r", "r2", "m", "b", "overlap", "identity", "pigment",
];

/// Write the full table and its named flag subsets to an XLSX workbook
///
/// Sheet order is `correlations` followed by the flag subsets. Each sheet
/// gets a wide pair column, narrow numeric columns, a frozen header row and
/// first column, two-decimal number formatting, and a white/yellow/red
/// 3-color scale on the r column. Undefined values export as blank cells.
///
/// # Errors
///
/// Returns `TableExport` when the workbook cannot be assembled or saved.
pub fn export_xlsx(table: &ResultTable, path: &Path) -> Result<()> {
    let mut workbook = Workbook::new();
    let number_format = Format::new().set_num_format("0.00");

    write_sheet(workbook.add_worksheet(), "correlations", table, &number_format)
        .map_err(|e| export_error(path, e))?;

    for (name, subset) in table.flag_subsets() {
        write_sheet(workbook.add_worksheet(), name, &subset, &number_format)
            .map_err(|e| export_error(path, e))?;
    }

    workbook.save(path).map_err(|e| export_error(path, e))?;
    log::info!("wrote report {}", path.display());
    Ok(())
}

fn write_sheet(
    worksheet: &mut Worksheet,
    name: &str,
    table: &ResultTable,
    number_format: &Format,
) -> std::result::Result<(), XlsxError> {
    worksheet.set_name(name)?;

    for (col, header) in HEADERS.iter().enumerate() {
        worksheet.write_string(0, col as u16, *header)?;
    }

    for (index, record) in table.records().iter().enumerate() {
        let row = index as u32 + 1;
        worksheet.write_string(row, 0, record.pair.as_str())?;
        write_metric(worksheet, row, 1, record.r, number_format)?;
        write_metric(worksheet, row, 2, record.r2, number_format)?;
        write_metric(worksheet, row, 3, record.slope, number_format)?;
        write_metric(worksheet, row, 4, record.intercept, number_format)?;
        write_flag(worksheet, row, 5, record.flags.overlap)?;
        write_flag(worksheet, row, 6, record.flags.identity)?;
        write_flag(worksheet, row, 7, record.flags.pigment)?;
    }

    worksheet.set_column_width(0, PAIR_COLUMN_WIDTH)?;
    for col in 1..=NUMERIC_COLUMN_SPAN {
        worksheet.set_column_width(col, NUMERIC_COLUMN_WIDTH)?;
    }
    worksheet.set_freeze_panes(1, 1)?;

    if !table.is_empty() {
        let scale = ConditionalFormat3ColorScale::new()
            .set_minimum(ConditionalFormatType::Number, SCALE_LOW_VALUE)
            .set_midpoint(ConditionalFormatType::Number, SCALE_MID_VALUE)
            .set_maximum(ConditionalFormatType::Number, SCALE_HIGH_VALUE)
            .set_minimum_color(Color::RGB(SCALE_LOW_COLOR))
            .set_midpoint_color(Color::RGB(SCALE_MID_COLOR))
            .set_maximum_color(Color::RGB(SCALE_HIGH_COLOR));
        worksheet.add_conditional_format(1, 1, table.len() as u32, 1, &scale)?;
    }

    Ok(())
}

// Undefined statistics become blank cells, matching the missing-value
// markers the rest of the report uses
fn write_metric(
    worksheet: &mut Worksheet,
    row: u32,
    col: u16,
    value: f64,
    number_format: &Format,
) -> std::result::Result<(), XlsxError> {
    if value.is_finite() {
        worksheet.write_number_with_format(row, col, value, number_format)?;
    }
    Ok(())
}

fn write_flag(
    worksheet: &mut Worksheet,
    row: u32,
    col: u16,
    flag: Option<bool>,
) -> std::result::Result<(), XlsxError> {
    if let Some(set) = flag {
        worksheet.write_number(row, col, if set { 1.0 } else { 0.0 })?;
    }
    Ok(())
}

fn export_error(path: &Path, source: XlsxError) -> CorrError {
    CorrError::TableExport {
        path: path.to_path_buf(),
        source,
    }
}
