//! Seat occupancy spreadsheet.
//!
//! The report is assembled as a [`SeatReport`] first so its layout can be
//! inspected without touching the filesystem, then written as a single-sheet
//! xlsx workbook.

use std::{fmt, path::Path};

use once_cell::sync::Lazy;
use regex::Regex;
use rust_xlsxwriter::{Format, Workbook, XlsxError};
use tracing::info;

use crate::{error::StoreError, models::Train};

/// File name used when no explicit report file is configured.
pub const DEFAULT_REPORT_FILE: &str = "train_report.xlsx";

/// Column captions, in output order.
pub const HEADERS: [&str; 6] = [
    "Carriage Number",
    "Carriage Type",
    "Seat Number",
    "Seat Type",
    "Class",
    "Status",
];

/// Extra width added to the longest value of every column.
pub const COLUMN_PADDING: usize = 2;

const MAX_SHEET_NAME_CHARS: usize = 31;

static SHEET_NAME_FORBIDDEN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\[\]:*?/\\]").expect("failed to compile sheet name regex"));

/// A single report cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cell {
    /// Written as a numeric cell.
    Number(u32),
    /// Written as a string cell.
    Text(String),
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Number(value) => write!(f, "{value}"),
            Cell::Text(value) => f.write_str(value),
        }
    }
}

/// One row per seat, in carriage-then-seat order.
#[derive(Debug, Clone)]
pub struct SeatReport {
    title: String,
    rows: Vec<[Cell; 6]>,
}

impl SeatReport {
    /// Lay out the report for `train`.
    pub fn build(train: &Train) -> Self {
        let rows = train
            .seats()
            .map(|(carriage, seat)| {
                [
                    Cell::Number(carriage.number()),
                    Cell::Text(carriage.carriage_type().to_string()),
                    Cell::Number(seat.number()),
                    Cell::Text(seat.seat_type().to_string()),
                    Cell::Text(seat.comfort_class().to_string()),
                    Cell::Text(seat.status_label().to_string()),
                ]
            })
            .collect();
        Self {
            title: sheet_title(train.number()),
            rows,
        }
    }

    /// Worksheet name.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Data rows, without the header.
    pub fn rows(&self) -> &[[Cell; 6]] {
        &self.rows
    }

    /// Width of each column: longest rendered value, header included, plus padding.
    pub fn column_widths(&self) -> [usize; 6] {
        let mut widths = HEADERS.map(|header| header.chars().count());
        for row in &self.rows {
            for (width, cell) in widths.iter_mut().zip(row) {
                *width = (*width).max(cell.to_string().chars().count());
            }
        }
        widths.map(|width| width + COLUMN_PADDING)
    }

    /// Write the report as an xlsx workbook.
    pub fn write(&self, path: impl AsRef<Path>) -> Result<(), StoreError> {
        let path = path.as_ref();
        self.write_workbook(path)
            .map_err(|source| StoreError::Report {
                path: path.to_path_buf(),
                source,
            })?;
        info!(path = %path.display(), rows = self.rows.len(), "report written");
        Ok(())
    }

    fn write_workbook(&self, path: &Path) -> Result<(), XlsxError> {
        let mut workbook = Workbook::new();
        let bold = Format::new().set_bold();
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(&self.title)?;

        for (col, header) in (0u16..).zip(HEADERS) {
            worksheet.write_string_with_format(0, col, header, &bold)?;
        }
        for (row, cells) in (1u32..).zip(&self.rows) {
            for (col, cell) in (0u16..).zip(cells) {
                match cell {
                    Cell::Number(value) => worksheet.write_number(row, col, *value)?,
                    Cell::Text(value) => worksheet.write_string(row, col, value)?,
                };
            }
        }
        for (col, width) in (0u16..).zip(self.column_widths()) {
            worksheet.set_column_width(col, width as f64)?;
        }

        workbook.save(path)
    }
}

impl Train {
    /// Write the seat occupancy report for this train to `path`.
    pub fn generate_report(&self, path: impl AsRef<Path>) -> Result<(), StoreError> {
        SeatReport::build(self).write(path)
    }
}

/// `Train {number}`, reduced to a name Excel accepts.
fn sheet_title(number: &str) -> String {
    let raw = format!("Train {number}");
    let cleaned = SHEET_NAME_FORBIDDEN_RE.replace_all(&raw, "");
    let trimmed: String = cleaned
        .trim_matches('\'')
        .trim()
        .chars()
        .take(MAX_SHEET_NAME_CHARS)
        .collect();
    let trimmed = trimmed.trim_end().to_string();
    if trimmed.is_empty() {
        "Train".to_string()
    } else {
        trimmed
    }
}
