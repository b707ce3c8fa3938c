//! 表ファイル読み込みモジュール
//!
//! calamine で先頭シートを読み、セルを文字列のグリッドに変換してから
//! カタログ / 注文それぞれの形に組み立てる。

mod catalog;
mod request;

pub use catalog::{catalog_from_grid, load_catalog, CODE_COLUMN, NAME_COLUMN};
pub use request::{find_header_row, load_requests, requests_from_grid, HEADER_KEYWORD};

use crate::error::{MatcherError, Result};
use calamine::{open_workbook_auto, Data, Reader};
use std::path::Path;

/// セル文字列のグリッド（空セルは None）
pub type Grid = Vec<Vec<Option<String>>>;

/// 先頭シートをグリッドとして読み込む
pub fn read_first_sheet(path: &Path) -> Result<Grid> {
    if !path.exists() {
        return Err(MatcherError::FileNotFound(path.display().to_string()));
    }

    let mut workbook = open_workbook_auto(path)?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| {
            MatcherError::SpreadsheetRead(format!("シートがありません: {}", path.display()))
        })??;

    Ok(range
        .rows()
        .map(|row| row.iter().map(cell_to_string).collect())
        .collect())
}

/// セル値を文字列化（整数値の浮動小数は小数部を付けない）
pub fn cell_to_string(cell: &Data) -> Option<String> {
    match cell {
        Data::Empty | Data::Error(_) => None,
        Data::String(s) => {
            if s.trim().is_empty() {
                None
            } else {
                Some(s.clone())
            }
        }
        Data::Float(f) => Some(format_number(*f)),
        Data::Int(i) => Some(i.to_string()),
        Data::Bool(b) => Some(b.to_string()),
        Data::DateTime(dt) => Some(format_number(dt.as_f64())),
        Data::DateTimeIso(s) | Data::DurationIso(s) => Some(s.clone()),
    }
}

fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}

/// 行がすべて空か
fn is_blank_row(row: &[Option<String>]) -> bool {
    row.iter().all(Option::is_none)
}
