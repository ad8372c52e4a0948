#![cfg(feature = "spreadsheet")]

//! XLSX renderer.
//!
//! Writes two sheets: one row per year, and the two top-N city lists side by side separated by
//! an empty column. The header row is bold, every cell has a thin border, and each column is as
//! wide as its longest value plus a fixed padding.

use std::path::Path;

use rust_xlsxwriter::{Format, FormatBorder, Workbook, Worksheet};

use crate::error::ReportResult;

use super::{ReportBundle, ReportRenderer};

/// A single sheet cell.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Text(String),
    Integer(i64),
    Number(f64),
    Blank,
}

impl Cell {
    /// Characters needed to display the value.
    pub fn display_len(&self) -> usize {
        match self {
            Cell::Text(s) => s.chars().count(),
            Cell::Integer(v) => v.to_string().len(),
            Cell::Number(v) => v.to_string().len(),
            Cell::Blank => 0,
        }
    }
}

/// Sheet contents before styling.
#[derive(Debug, Clone, PartialEq)]
pub struct SheetTable {
    pub name: String,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

impl SheetTable {
    /// Width of every column: longest header or value plus `padding`.
    pub fn column_widths(&self, padding: usize) -> Vec<f64> {
        (0..self.headers.len())
            .map(|col| {
                let header = self.headers[col].chars().count();
                let longest = self
                    .rows
                    .iter()
                    .filter_map(|row| row.get(col))
                    .map(Cell::display_len)
                    .fold(header, usize::max);
                (longest + padding) as f64
            })
            .collect()
    }
}

/// Year sheet: year, salary, profession salary, count, profession count.
pub fn year_table(bundle: &ReportBundle) -> SheetTable {
    let profession = bundle.profession();
    let rows = bundle
        .years()
        .iter()
        .map(|year| {
            vec![
                Cell::Integer(i64::from(*year)),
                Cell::Integer(bundle.salary_by_year().get(year).copied().unwrap_or(0)),
                Cell::Integer(bundle.profession_salary_by_year().get(year).copied().unwrap_or(0)),
                Cell::Integer(bundle.count_by_year().get(year).copied().unwrap_or(0) as i64),
                Cell::Integer(bundle.profession_count_by_year().get(year).copied().unwrap_or(0) as i64),
            ]
        })
        .collect();

    SheetTable {
        name: "Statistics by year".to_string(),
        headers: vec![
            "Year".to_string(),
            "Average salary".to_string(),
            format!("Average salary - {profession}"),
            "Vacancies".to_string(),
            format!("Vacancies - {profession}"),
        ],
        rows,
    }
}

/// City sheet: top cities by salary and top cities by share as parallel column pairs.
pub fn city_table(bundle: &ReportBundle) -> SheetTable {
    let by_salary: Vec<(&String, &i64)> = bundle.salary_by_city().iter().collect();
    let by_share: Vec<(&String, &f64)> = bundle.share_by_city().iter().collect();
    let len = by_salary.len().max(by_share.len());

    let rows = (0..len)
        .map(|i| {
            let (salary_city, salary) = match by_salary.get(i) {
                Some((city, salary)) => (Cell::Text((*city).clone()), Cell::Integer(**salary)),
                None => (Cell::Blank, Cell::Blank),
            };
            let (share_city, share) = match by_share.get(i) {
                Some((city, share)) => (Cell::Text((*city).clone()), Cell::Number(**share)),
                None => (Cell::Blank, Cell::Blank),
            };
            vec![salary_city, salary, Cell::Blank, share_city, share]
        })
        .collect();

    SheetTable {
        name: "Statistics by city".to_string(),
        headers: vec![
            "City".to_string(),
            "Salary level".to_string(),
            String::new(),
            "City".to_string(),
            "Vacancy share".to_string(),
        ],
        rows,
    }
}

/// Renders a [`ReportBundle`] as an `.xlsx` workbook.
#[derive(Debug, Clone)]
pub struct SpreadsheetRenderer {
    /// Extra characters added to each column's content width.
    pub padding: usize,
}

impl Default for SpreadsheetRenderer {
    fn default() -> Self {
        Self { padding: 3 }
    }
}

impl SpreadsheetRenderer {
    fn write_sheet(&self, sheet: &mut Worksheet, table: &SheetTable) -> ReportResult<()> {
        let header_format = Format::new().set_bold().set_border(FormatBorder::Thin);
        let cell_format = Format::new().set_border(FormatBorder::Thin);

        sheet.set_name(&table.name)?;
        for (col, header) in table.headers.iter().enumerate() {
            if header.is_empty() {
                sheet.write_blank(0, col as u16, &header_format)?;
            } else {
                sheet.write_string_with_format(0, col as u16, header, &header_format)?;
            }
        }

        for (idx, row) in table.rows.iter().enumerate() {
            let r = (idx + 1) as u32;
            for (col, cell) in row.iter().enumerate() {
                let c = col as u16;
                match cell {
                    Cell::Text(s) => sheet.write_string_with_format(r, c, s, &cell_format)?,
                    Cell::Integer(v) => sheet.write_number_with_format(r, c, *v as f64, &cell_format)?,
                    Cell::Number(v) => sheet.write_number_with_format(r, c, *v, &cell_format)?,
                    Cell::Blank => sheet.write_blank(r, c, &cell_format)?,
                };
            }
        }

        for (col, width) in table.column_widths(self.padding).into_iter().enumerate() {
            sheet.set_column_width(col as u16, width)?;
        }
        Ok(())
    }
}

impl ReportRenderer for SpreadsheetRenderer {
    fn render(&self, bundle: &ReportBundle, path: &Path) -> ReportResult<()> {
        let mut workbook = Workbook::new();
        self.write_sheet(workbook.add_worksheet(), &year_table(bundle))?;
        self.write_sheet(workbook.add_worksheet(), &city_table(bundle))?;
        workbook.save(path)?;
        Ok(())
    }
}
