use std::collections::HashSet;
use std::path::{Path, PathBuf};

use polars::prelude::*;
use rust_xlsxwriter::{Format, Workbook, Worksheet};
use serde::Serialize;
use tracing::info;

use crate::config::SheetLayout;
use crate::dataset::Dataset;
use crate::error::Result;

/// Name of the sheet written by [`SheetLayout::Single`].
pub const COMBINED_SHEET: &str = "Sheet1";

const MAX_SHEET_NAME: usize = 31;
const FORBIDDEN_SHEET_CHARS: &[char] = &['[', ']', ':', '*', '?', '/', '\\'];

#[derive(Debug, Clone, Serialize)]
pub struct SheetSummary {
    pub name: String,
    pub rows: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct WorkbookSummary {
    pub path: PathBuf,
    pub sheets: Vec<SheetSummary>,
}

/// Writes the dataset to an `.xlsx` file at `path`, replacing anything already there.
pub fn write_workbook(dataset: &Dataset, layout: SheetLayout, path: &Path) -> Result<WorkbookSummary> {
    let mut workbook = Workbook::new();
    let header_format = Format::new().set_bold();
    let mut sheets = Vec::new();

    match layout {
        SheetLayout::Single => {
            let combined = dataset.combined()?;
            let worksheet = workbook.add_worksheet();
            worksheet.set_name(COMBINED_SHEET)?;
            write_frame(worksheet, &combined, &header_format)?;
            sheets.push(SheetSummary {
                name: COMBINED_SHEET.to_string(),
                rows: combined.height(),
            });
        }
        SheetLayout::PerFile => {
            let mut used = HashSet::new();
            for sample in dataset.samples() {
                let name = unique_sheet_name(sample.stem(), &mut used);
                let worksheet = workbook.add_worksheet();
                worksheet.set_name(&name)?;
                write_frame(worksheet, &sample.frame, &header_format)?;
                sheets.push(SheetSummary {
                    name,
                    rows: sample.height(),
                });
            }
        }
    }

    workbook.save(path)?;
    info!(path = %path.display(), sheets = sheets.len(), "Workbook written");

    Ok(WorkbookSummary {
        path: path.to_path_buf(),
        sheets,
    })
}

/// Header row, then one row per record with a zero-based index in the first column.
fn write_frame(worksheet: &mut Worksheet, df: &DataFrame, header_format: &Format) -> Result<()> {
    worksheet.write_string_with_format(0, 0, "", header_format)?;
    for (col_idx, column) in df.get_columns().iter().enumerate() {
        let col = excel_col(col_idx + 1);
        worksheet.write_string_with_format(0, col, column.name().as_str(), header_format)?;
    }

    for row_idx in 0..df.height() {
        worksheet.write_number(excel_row(row_idx + 1), 0, row_idx as f64)?;
    }

    for (col_idx, column) in df.get_columns().iter().enumerate() {
        let col = excel_col(col_idx + 1);
        match column.dtype() {
            DataType::String => {
                for (row_idx, value) in column.str()?.into_iter().enumerate() {
                    if let Some(value) = value {
                        worksheet.write_string(excel_row(row_idx + 1), col, value)?;
                    }
                }
            }
            _ => {
                let values = column.cast(&DataType::Float64)?;
                for (row_idx, value) in values.f64()?.into_iter().enumerate() {
                    if let Some(value) = value {
                        worksheet.write_number(excel_row(row_idx + 1), col, value)?;
                    }
                }
            }
        }
    }

    Ok(())
}

fn excel_row(idx: usize) -> u32 {
    idx as u32
}

fn excel_col(idx: usize) -> u16 {
    idx as u16
}

/// Makes `stem` acceptable as an Excel sheet name and distinct from every name in `used`.
pub fn unique_sheet_name(stem: &str, used: &mut HashSet<String>) -> String {
    let base = sanitize_sheet_name(stem);
    let mut candidate = base.clone();
    let mut counter = 2;
    while used.contains(&candidate.to_lowercase()) {
        let suffix = format!("_{counter}");
        let keep = MAX_SHEET_NAME.saturating_sub(suffix.chars().count());
        candidate = base.chars().take(keep).collect::<String>() + &suffix;
        counter += 1;
    }
    used.insert(candidate.to_lowercase());
    candidate
}

fn sanitize_sheet_name(stem: &str) -> String {
    let cleaned: String = stem
        .chars()
        .map(|ch| if FORBIDDEN_SHEET_CHARS.contains(&ch) { '_' } else { ch })
        .take(MAX_SHEET_NAME)
        .collect();
    // Excel also refuses names that start or end with an apostrophe.
    let trimmed = cleaned.trim_matches('\'');
    if trimmed.trim().is_empty() {
        "sheet".to_string()
    } else {
        trimmed.to_string()
    }
}
