use thiserror::Error;

#[derive(Error, Debug)]
pub enum MatcherError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("ファイルが見つかりません: {0}")]
    FileNotFound(String),

    #[error("表ファイル読み込みエラー: {0}")]
    SpreadsheetRead(String),

    #[error("必須列がありません: {0}")]
    MissingColumn(String),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error("Excel生成エラー: {0}")]
    ExcelGeneration(String),

    #[error("CSV生成エラー: {0}")]
    Csv(#[from] csv::Error),

    #[error("未対応のファイル形式: {0}（.xlsx / .csv / .json のいずれか）")]
    UnsupportedFormat(String),

    #[error("入力エラー: {0}")]
    Prompt(String),

    #[error("照合スレッドエラー: {0}")]
    Task(String),

    #[error(transparent)]
    Core(#[from] auto_matcher_common::Error),
}

impl From<calamine::Error> for MatcherError {
    fn from(e: calamine::Error) -> Self {
        MatcherError::SpreadsheetRead(e.to_string())
    }
}

impl From<rust_xlsxwriter::XlsxError> for MatcherError {
    fn from(e: rust_xlsxwriter::XlsxError) -> Self {
        MatcherError::ExcelGeneration(e.to_string())
    }
}

impl From<dialoguer::Error> for MatcherError {
    fn from(e: dialoguer::Error) -> Self {
        MatcherError::Prompt(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, MatcherError>;
