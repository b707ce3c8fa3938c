//! エラー型定義

use thiserror::Error;

/// 共通エラー型
///
/// すべて前提条件エラーで、照合全体を中断する（部分結果なし）。
#[derive(Error, Debug)]
pub enum Error {
    #[error("data not loaded: {0}")]
    NotLoaded(&'static str),

    #[error("empty corpus: the catalog has no entries")]
    EmptyCorpus,

    #[error("unsupported priority field: {0}")]
    UnsupportedPriorityField(String),

    #[error("no columns selected for matching")]
    NoColumnsSelected,

    #[error("unknown request column: {0}")]
    UnknownColumn(String),

    #[error("invalid BM25 parameter: {0}")]
    InvalidParameter(String),
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_not_loaded() {
        let error = Error::NotLoaded("catalog");
        assert_eq!(format!("{}", error), "data not loaded: catalog");
    }

    #[test]
    fn test_error_display_empty_corpus() {
        let display = format!("{}", Error::EmptyCorpus);
        assert!(display.contains("empty corpus"));
    }

    #[test]
    fn test_error_display_priority() {
        let error = Error::UnsupportedPriorityField("Цена".to_string());
        assert_eq!(format!("{}", error), "unsupported priority field: Цена");
    }

    #[test]
    fn test_error_display_invalid_parameter() {
        let error = Error::InvalidParameter("k1 = -1".to_string());
        assert_eq!(format!("{}", error), "invalid BM25 parameter: k1 = -1");
    }
}
