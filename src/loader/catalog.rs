//! ノメンクラチュアの読み込み

use super::{is_blank_row, read_first_sheet, Grid};
use crate::error::{MatcherError, Result};
use auto_matcher_common::{is_yes, CatalogEntry, StatusFlag};
use std::path::Path;

pub const NAME_COLUMN: &str = "Номенклатура";
pub const CODE_COLUMN: &str = "Код";

pub fn load_catalog(path: &Path) -> Result<Vec<CatalogEntry>> {
    let grid = read_first_sheet(path)?;
    catalog_from_grid(&grid)
}

/// 1行目をヘッダーとしてカタログを組み立てる
///
/// フラグ列が無い場合はすべて「いいえ」として扱い、警告だけ出す。
pub fn catalog_from_grid(grid: &Grid) -> Result<Vec<CatalogEntry>> {
    let Some((header, rows)) = grid.split_first() else {
        return Ok(Vec::new());
    };

    let column_of = |name: &str| {
        header
            .iter()
            .position(|cell| cell.as_deref().map(str::trim) == Some(name))
    };

    let required = |name: &str| {
        column_of(name).ok_or_else(|| MatcherError::MissingColumn(name.to_string()))
    };
    let name_idx = required(NAME_COLUMN)?;
    let code_idx = required(CODE_COLUMN)?;

    let flag_columns: Vec<(StatusFlag, Option<usize>)> = StatusFlag::ALL
        .into_iter()
        .map(|flag| (flag, column_of(flag.column_name())))
        .collect();
    for (flag, idx) in &flag_columns {
        if idx.is_none() {
            tracing::warn!(
                column = flag.column_name(),
                "flag column missing, defaulting to \"Нет\""
            );
        }
    }

    let known: Vec<usize> = [Some(name_idx), Some(code_idx)]
        .into_iter()
        .chain(flag_columns.iter().map(|(_, idx)| *idx))
        .flatten()
        .collect();

    let cell = |row: &[Option<String>], idx: usize| row.get(idx).cloned().flatten();

    let mut entries = Vec::new();
    for row in rows.iter().filter(|row| !is_blank_row(row)) {
        let row = row.as_slice();
        let mut entry = CatalogEntry::new(
            cell(row, name_idx).unwrap_or_default(),
            cell(row, code_idx).unwrap_or_default(),
        );

        for (flag, idx) in &flag_columns {
            let value = idx.and_then(|i| cell(row, i));
            entry.flags.set(*flag, value.as_deref().is_some_and(is_yes));
        }

        entry.extra = header
            .iter()
            .enumerate()
            .filter(|(i, _)| !known.contains(i))
            .filter_map(|(i, name)| Some((name.clone()?, cell(row, i).unwrap_or_default())))
            .collect();

        entries.push(entry);
    }

    tracing::debug!(entries = entries.len(), "catalog loaded");
    Ok(entries)
}
