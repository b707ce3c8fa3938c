//! 照合条件の対話式選択モジュール
//!
//! 列（複数）・優先フラグ・候補数・グループ化の有無を順に尋ねる。

use crate::error::{MatcherError, Result};
use crate::loader::HEADER_KEYWORD;
use auto_matcher_common::StatusFlag;
use dialoguer::{Confirm, Input, MultiSelect, Select};

/// 対話で決めた照合条件
#[derive(Debug, Clone)]
pub struct Selection {
    pub columns: Vec<String>,
    pub priority: String,
    pub top_n: usize,
    pub grouped: bool,
}

/// 初期選択: 列名に「товар」を含む列
pub fn default_column_marks(columns: &[String]) -> Vec<bool> {
    columns
        .iter()
        .map(|c| c.to_lowercase().contains(HEADER_KEYWORD))
        .collect()
}

/// 優先フラグの初期位置
pub fn priority_position(priority: &str) -> usize {
    StatusFlag::parse(priority)
        .ok()
        .and_then(|flag| StatusFlag::ALL.iter().position(|f| *f == flag))
        .unwrap_or(0)
}

pub fn select_interactive(
    columns: &[String],
    default_priority: &str,
    default_top_n: usize,
) -> Result<Selection> {
    if columns.is_empty() {
        return Err(MatcherError::Prompt("注文ファイルに列がありません".into()));
    }

    println!("\n📋 照合条件を選択してください:\n");

    let picked = MultiSelect::new()
        .with_prompt("照合に使う列（スペースで選択、Enterで確定）")
        .items(columns)
        .defaults(&default_column_marks(columns))
        .interact()?;

    if picked.is_empty() {
        return Err(auto_matcher_common::Error::NoColumnsSelected.into());
    }
    let selected: Vec<String> = picked.into_iter().map(|i| columns[i].clone()).collect();

    let flag_items: Vec<&str> = StatusFlag::ALL.iter().map(|f| f.column_name()).collect();
    let priority_idx = Select::new()
        .with_prompt("優先フラグ")
        .items(&flag_items)
        .default(priority_position(default_priority))
        .interact()?;

    let top_n: usize = Input::new()
        .with_prompt("候補数")
        .default(default_top_n)
        .validate_with(|n: &usize| {
            if *n >= 1 {
                Ok(())
            } else {
                Err("1以上を指定してください")
            }
        })
        .interact_text()?;

    let grouped = Confirm::new()
        .with_prompt("同じ値の行をまとめて照合しますか？")
        .default(selected.len() > 1)
        .interact()?;

    Ok(Selection {
        columns: selected,
        priority: flag_items[priority_idx].to_string(),
        top_n,
        grouped,
    })
}
