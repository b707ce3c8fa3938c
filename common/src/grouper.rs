//! クエリのグループ化
//!
//! 選択列の値を " | " で連結したキーで行をまとめ、
//! グループ内の値を初出順・重複なしで空白連結して1つのクエリにする。

use crate::types::RequestRow;
use std::collections::{BTreeMap, HashSet};

pub const GROUP_KEY_SEPARATOR: &str = " | ";

/// 行のグループキー（欠損セルは空文字）
pub fn group_key(row: &RequestRow, columns: &[String]) -> String {
    columns
        .iter()
        .map(|col| row.get(col).unwrap_or(""))
        .collect::<Vec<_>>()
        .join(GROUP_KEY_SEPARATOR)
}

/// グループキー → クエリ文字列（キー順）
pub fn group_queries(rows: &[RequestRow], columns: &[String]) -> BTreeMap<String, String> {
    group_queries_by(rows, columns, columns)
}

/// キー列と値列を分けてグループ化する
pub fn group_queries_by(
    rows: &[RequestRow],
    key_columns: &[String],
    value_columns: &[String],
) -> BTreeMap<String, String> {
    let mut parts_by_key: BTreeMap<String, Vec<&str>> = BTreeMap::new();

    for row in rows {
        let parts = parts_by_key.entry(group_key(row, key_columns)).or_default();
        parts.extend(value_columns.iter().filter_map(|col| row.get(col)));
    }

    parts_by_key
        .into_iter()
        .map(|(key, parts)| (key, unique_in_order(&parts).join(" ")))
        .collect()
}

fn unique_in_order<'a>(parts: &[&'a str]) -> Vec<&'a str> {
    let mut seen = HashSet::new();
    parts.iter().copied().filter(|p| seen.insert(*p)).collect()
}
