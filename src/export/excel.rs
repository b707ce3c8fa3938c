//! Excel出力
//!
//! 見出し行 + 1結果1行。類似度は数値セル（0.00 書式）で書き込む。

use super::HEADERS;
use crate::error::Result;
use auto_matcher_common::MatchResult;
use rust_xlsxwriter::{Format, FormatAlign, Workbook};
use std::path::Path;

const SHEET_NAME: &str = "Результаты";

const COLUMN_WIDTHS: [f64; 5] = [40.0, 50.0, 15.0, 12.0, 45.0];

pub fn generate_excel(results: &[MatchResult], output_path: &Path) -> Result<()> {
    let mut workbook = Workbook::new();

    let header_format = Format::new()
        .set_bold()
        .set_align(FormatAlign::Center);
    let score_format = Format::new().set_num_format("0.00");

    let worksheet = workbook.add_worksheet();
    worksheet.set_name(SHEET_NAME)?;

    for (col, (header, width)) in HEADERS.iter().zip(COLUMN_WIDTHS).enumerate() {
        let col = col as u16;
        worksheet.write_string_with_format(0, col, *header, &header_format)?;
        worksheet.set_column_width(col, width)?;
    }

    for (i, result) in results.iter().enumerate() {
        let row = (i + 1) as u32;
        worksheet.write_string(row, 0, &result.query)?;
        worksheet.write_string(row, 1, &result.entry_name)?;
        worksheet.write_string(row, 2, &result.entry_code)?;
        worksheet.write_number_with_format(row, 3, result.similarity, &score_format)?;
        worksheet.write_string(row, 4, &result.status_label)?;
    }

    worksheet.set_freeze_panes(1, 0)?;
    workbook.save(output_path)?;

    Ok(())
}
