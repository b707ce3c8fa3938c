pub mod csv;
pub mod excel;

use crate::cli::OutputFormat;
use crate::error::{MatcherError, Result};
use auto_matcher_common::MatchResult;
use std::path::{Path, PathBuf};

/// 出力列の見出し
pub const HEADERS: [&str; 5] = ["Запрос", "Номенклатура", "Код", "Сходство", "Статус"];

/// 出力先がディレクトリか拡張子なしなら、既定のファイル名を付ける
pub fn output_path_for_format(output: &Path, stem: &str, format: OutputFormat) -> PathBuf {
    if output.is_dir() || output.extension().is_none() {
        output.join(format!("{}.{}", stem, format.extension()))
    } else {
        output.to_path_buf()
    }
}

/// 拡張子に応じて結果を保存する
pub fn save_results(results: &[MatchResult], path: &Path) -> Result<()> {
    let format = OutputFormat::from_path(path)
        .ok_or_else(|| MatcherError::UnsupportedFormat(path.display().to_string()))?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    match format {
        OutputFormat::Excel => excel::generate_excel(results, path)?,
        OutputFormat::Csv => csv::generate_csv(results, path)?,
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(results)?;
            std::fs::write(path, json)?;
        }
    }

    tracing::debug!(path = %path.display(), rows = results.len(), "results saved");
    Ok(())
}
