use crate::error::{MatcherError, Result};
use auto_matcher_common::{AbbreviationTable, Bm25Params, StatusFlag};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// クエリごとの候補数
    pub default_top_n: usize,
    /// 優先フラグ（列名または英語キー）
    pub default_priority: String,
    pub bm25_k1: f64,
    pub bm25_b: f64,
    pub bm25_epsilon: f64,
    /// 略語テーブルの上書き（None なら組み込み）
    pub abbreviations: Option<AbbreviationTable>,
}

impl Default for Config {
    fn default() -> Self {
        let params = Bm25Params::default();
        Self {
            default_top_n: 5,
            default_priority: StatusFlag::Listed.column_name().into(),
            bm25_k1: params.k1,
            bm25_b: params.b,
            bm25_epsilon: params.epsilon,
            abbreviations: None,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            config.validate()?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| MatcherError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("auto-matcher").join("config.json"))
    }

    /// 設定ファイルの値の検証
    pub fn validate(&self) -> Result<()> {
        if self.default_top_n == 0 {
            return Err(MatcherError::Config("候補数は1以上を指定してください".into()));
        }
        self.bm25_params()
            .validate()
            .map_err(|e| MatcherError::Config(format!("BM25パラメータが不正です: {}", e)))
    }

    pub fn bm25_params(&self) -> Bm25Params {
        Bm25Params {
            k1: self.bm25_k1,
            b: self.bm25_b,
            epsilon: self.bm25_epsilon,
        }
    }

    pub fn abbreviation_table(&self) -> AbbreviationTable {
        self.abbreviations.clone().unwrap_or_default()
    }

    pub fn set_top_n(&mut self, top_n: usize) -> Result<()> {
        if top_n == 0 {
            return Err(MatcherError::Config("候補数は1以上を指定してください".into()));
        }
        self.default_top_n = top_n;
        Ok(())
    }

    pub fn set_priority(&mut self, priority: &str) -> Result<()> {
        let flag = StatusFlag::parse(priority)?;
        self.default_priority = flag.column_name().into();
        Ok(())
    }
}
