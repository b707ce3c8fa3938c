//! CSV出力
//!
//! 区切りは ";"、小数点は ","（ロシア語ロケールの Excel で開ける形式）。

use super::HEADERS;
use crate::error::Result;
use auto_matcher_common::MatchResult;
use csv::{Writer, WriterBuilder};
use std::io::Write;
use std::path::Path;

pub const SEPARATOR: u8 = b';';

pub fn generate_csv(results: &[MatchResult], output_path: &Path) -> Result<()> {
    let mut writer = WriterBuilder::new()
        .delimiter(SEPARATOR)
        .from_path(output_path)?;
    write_records(results, &mut writer)?;
    writer.flush()?;
    Ok(())
}

/// 見出し行と結果行を書き込む（引用符の付与は csv に任せる）
pub fn write_records<W: Write>(
    results: &[MatchResult],
    writer: &mut Writer<W>,
) -> csv::Result<()> {
    writer.write_record(HEADERS)?;

    for result in results {
        writer.write_record([
            result.query.as_str(),
            result.entry_name.as_str(),
            result.entry_code.as_str(),
            format_decimal(result.similarity).as_str(),
            result.status_label.as_str(),
        ])?;
    }

    Ok(())
}

/// 小数2桁、小数点はカンマ
pub fn format_decimal(value: f64) -> String {
    format!("{:.2}", value).replace('.', ",")
}
