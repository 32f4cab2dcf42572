use rust_xlsxwriter::{Color, Format, FormatAlign, FormatBorder, Workbook, Worksheet};
use std::path::Path;

use super::builder::{Cell, Report, RenderRow, RowKind, Sheet, COLUMN_COUNT};
use crate::error::Result;

/// Column widths, A to E
const COLUMN_WIDTHS: [f64; COLUMN_COUNT as usize] = [14.0, 14.0, 10.0, 14.0, 16.0];

/// Cell formats per row kind
struct Styles {
    title: Format,
    column_titles: Format,
    number: Format,
    split_header: Format,
    detail: Format,
    total: Format,
}

impl Styles {
    fn new() -> Self {
        let base = || {
            Format::new()
                .set_border(FormatBorder::Thin)
                .set_align(FormatAlign::Center)
                .set_align(FormatAlign::VerticalCenter)
        };

        Self {
            title: base().set_bold().set_font_size(14).set_background_color(Color::RGB(0xBDD7EE)),
            column_titles: base().set_bold().set_background_color(Color::RGB(0xDDEBF7)),
            number: base().set_background_color(Color::RGB(0xE2EFDA)),
            split_header: base().set_bold().set_background_color(Color::RGB(0xFFF2CC)),
            detail: base().set_background_color(Color::RGB(0xFCE4D6)),
            total: base().set_bold().set_background_color(Color::RGB(0xD9D9D9)),
        }
    }

    fn for_kind(&self, kind: RowKind) -> &Format {
        match kind {
            RowKind::Title => &self.title,
            RowKind::ColumnTitles => &self.column_titles,
            RowKind::Number => &self.number,
            RowKind::SplitHeader => &self.split_header,
            RowKind::Detail => &self.detail,
            RowKind::Total => &self.total,
        }
    }
}

fn write_cell(worksheet: &mut Worksheet, row: u32, col: u16, cell: &Cell, format: &Format) -> Result<()> {
    match cell {
        Cell::Blank => {
            worksheet.write_blank(row, col, format)?;
        }
        Cell::Text(text) => {
            worksheet.write_string_with_format(row, col, text, format)?;
        }
        Cell::Number(n) => {
            worksheet.write_number_with_format(row, col, *n as f64, format)?;
        }
    }
    Ok(())
}

fn write_row(worksheet: &mut Worksheet, row: u32, render: &RenderRow, styles: &Styles) -> Result<()> {
    let format = styles.for_kind(render.kind);

    if render.kind == RowKind::Title {
        let label = match render.cells.first() {
            Some(Cell::Text(text)) => text.as_str(),
            _ => "",
        };
        worksheet.merge_range(row, 0, row, COLUMN_COUNT - 1, label, format)?;
        return Ok(());
    }

    for (col, cell) in render.cells.iter().enumerate() {
        write_cell(worksheet, row, col as u16, cell, format)?;
    }
    Ok(())
}

fn write_sheet(workbook: &mut Workbook, sheet: &Sheet, styles: &Styles) -> Result<()> {
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(sheet.name)?;

    for (col, width) in COLUMN_WIDTHS.iter().enumerate() {
        worksheet.set_column_width(col as u16, *width)?;
    }

    for (idx, row) in sheet.rows.iter().enumerate() {
        write_row(worksheet, idx as u32, row, styles)?;
    }
    Ok(())
}

/// Write every sheet of the report to an xlsx file, replacing it
pub fn write_report(report: &Report, path: &Path) -> Result<()> {
    let styles = Styles::new();
    let mut workbook = Workbook::new();

    for sheet in &report.sheets {
        write_sheet(&mut workbook, sheet, &styles)?;
    }

    workbook.save(path)?;
    tracing::info!(path = %path.display(), sheets = report.sheets.len(), "report written");
    Ok(())
}
