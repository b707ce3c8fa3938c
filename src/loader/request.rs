//! クライアント注文の読み込み
//!
//! - 先頭10行から「товар」を含む行をヘッダーとして検出（無ければ1行目）
//! - ヘッダーが空の列（技術列）は無視
//! - 空行を除去し、欠損セルは直前の行の値で埋める

use super::{is_blank_row, read_first_sheet, Grid};
use crate::error::Result;
use auto_matcher_common::{RequestRow, RequestTable};
use std::collections::HashMap;
use std::path::Path;

pub const HEADER_KEYWORD: &str = "товар";

const HEADER_SCAN_ROWS: usize = 10;

pub fn load_requests(path: &Path) -> Result<RequestTable> {
    let grid = read_first_sheet(path)?;
    Ok(requests_from_grid(&grid))
}

/// ヘッダー行の位置
pub fn find_header_row(grid: &Grid) -> usize {
    grid.iter()
        .take(HEADER_SCAN_ROWS)
        .position(|row| {
            row.iter()
                .flatten()
                .any(|cell| cell.to_lowercase().contains(HEADER_KEYWORD))
        })
        .unwrap_or(0)
}

pub fn requests_from_grid(grid: &Grid) -> RequestTable {
    let header_idx = find_header_row(grid);
    let Some(header) = grid.get(header_idx) else {
        return RequestTable::default();
    };

    // (列位置, 列名)。重複した列名には連番を付ける
    let mut seen: HashMap<String, usize> = HashMap::new();
    let columns: Vec<(usize, String)> = header
        .iter()
        .enumerate()
        .filter_map(|(i, cell)| {
            let name = cell.as_deref()?.trim().to_string();
            let count = seen.entry(name.clone()).or_insert(0);
            let unique = if *count == 0 { name } else { format!("{}.{}", name, count) };
            *count += 1;
            Some((i, unique))
        })
        .collect();

    let mut rows = Vec::new();
    let mut previous: HashMap<String, Option<String>> = HashMap::new();

    for raw in grid.iter().skip(header_idx + 1) {
        let cells: Vec<Option<String>> = columns
            .iter()
            .map(|(i, _)| raw.get(*i).cloned().flatten())
            .collect();
        if is_blank_row(&cells) {
            continue;
        }

        let values: HashMap<String, Option<String>> = columns
            .iter()
            .zip(cells)
            .map(|((_, name), cell)| {
                let filled = cell.or_else(|| previous.get(name).cloned().flatten());
                (name.clone(), filled)
            })
            .collect();

        previous = values.clone();
        rows.push(RequestRow { values });
    }

    tracing::debug!(header_row = header_idx, rows = rows.len(), "request loaded");
    RequestTable::new(columns.into_iter().map(|(_, name)| name).collect(), rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(rows: &[&[&str]]) -> Grid {
        rows.iter()
            .map(|row| {
                row.iter()
                    .map(|c| if c.is_empty() { None } else { Some(c.to_string()) })
                    .collect()
            })
            .collect()
    }

    #[test]
    fn test_header_detection() {
        let g = grid(&[
            &["Заявка №15", ""],
            &["", ""],
            &["№", "Наименование товара"],
            &["1", "Ручка"],
        ]);
        assert_eq!(find_header_row(&g), 2);
        let table = requests_from_grid(&g);
        assert_eq!(table.columns, vec!["№", "Наименование товара"]);
        assert_eq!(table.rows.len(), 1);
        assert_eq!(table.rows[0].get("Наименование товара"), Some("Ручка"));
    }

    #[test]
    fn test_header_defaults_to_first_row() {
        let g = grid(&[&["Позиция", "Кол-во"], &["Ручка", "3"]]);
        assert_eq!(find_header_row(&g), 0);
    }

    #[test]
    fn test_unnamed_columns_ignored() {
        let g = grid(&[&["Товар", "", "Цвет"], &["Ручка", "мусор", "синяя"]]);
        let table = requests_from_grid(&g);
        assert_eq!(table.columns, vec!["Товар", "Цвет"]);
        assert!(!table.rows[0].values.values().any(|v| v.as_deref() == Some("мусор")));
    }

    #[test]
    fn test_blank_rows_dropped_and_forward_filled() {
        let g = grid(&[
            &["Заказ", "Товар"],
            &["A-1", "Ручка"],
            &["", ""],
            &["", "Карандаш"],
            &["A-2", ""],
        ]);
        let table = requests_from_grid(&g);
        assert_eq!(table.rows.len(), 3);
        assert_eq!(table.rows[1].get("Заказ"), Some("A-1"));
        assert_eq!(table.rows[1].get("Товар"), Some("Карандаш"));
        assert_eq!(table.rows[2].get("Заказ"), Some("A-2"));
        assert_eq!(table.rows[2].get("Товар"), Some("Карандаш"));
    }

    #[test]
    fn test_duplicate_headers_are_suffixed() {
        let g = grid(&[&["Товар", "Товар"], &["a", "b"]]);
        let table = requests_from_grid(&g);
        assert_eq!(table.columns, vec!["Товар", "Товар.1"]);
    }

    #[test]
    fn test_empty_grid() {
        let table = requests_from_grid(&Vec::new());
        assert!(table.columns.is_empty());
        assert!(table.rows.is_empty());
    }
}
