//! 照合データの型定義
//!
//! - CatalogEntry: ノメンクラチュア（商品マスタ）の1行
//! - RequestTable / RequestRow: クライアント注文の表
//! - MatchResult: 照合結果（エクスポート用）

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// ステータスフラグ（表示順は固定）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StatusFlag {
    Listed,
    ManufacturerOwnBrand,
    CoreAssortment,
}

impl StatusFlag {
    pub const ALL: [StatusFlag; 3] = [
        StatusFlag::Listed,
        StatusFlag::ManufacturerOwnBrand,
        StatusFlag::CoreAssortment,
    ];

    /// マスタ側の列名
    pub fn column_name(&self) -> &'static str {
        match self {
            StatusFlag::Listed => "Оформлено",
            StatusFlag::ManufacturerOwnBrand => "ТоварПроизводителя",
            StatusFlag::CoreAssortment => "ОсновнойАссортимент",
        }
    }

    pub fn key(&self) -> &'static str {
        match self {
            StatusFlag::Listed => "listed",
            StatusFlag::ManufacturerOwnBrand => "manufacturerOwnBrand",
            StatusFlag::CoreAssortment => "coreAssortment",
        }
    }

    /// ステータス列に表示するラベル
    pub fn label(&self) -> &'static str {
        match self {
            StatusFlag::Listed => "Оформлено",
            StatusFlag::ManufacturerOwnBrand => "Товар Производителя",
            StatusFlag::CoreAssortment => "Основной Ассортимент",
        }
    }

    /// 列名または英語キーから解決（大文字小文字は区別しない）
    pub fn parse(name: &str) -> Result<Self> {
        let wanted = name.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|flag| {
                flag.column_name().to_lowercase() == wanted || flag.key().to_lowercase() == wanted
            })
            .ok_or_else(|| Error::UnsupportedPriorityField(name.to_string()))
    }
}

impl std::fmt::Display for StatusFlag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.column_name())
    }
}

/// セル値が「はい」か判定する（"Да" / "yes"）
pub fn is_yes(value: &str) -> bool {
    let v = value.trim().to_lowercase();
    v == "да" || v == "yes"
}

/// エントリのフラグ集合。列が無い場合は「いいえ」
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StatusFlags {
    pub listed: bool,
    pub manufacturer_own_brand: bool,
    pub core_assortment: bool,
}

impl StatusFlags {
    pub fn get(&self, flag: StatusFlag) -> bool {
        match flag {
            StatusFlag::Listed => self.listed,
            StatusFlag::ManufacturerOwnBrand => self.manufacturer_own_brand,
            StatusFlag::CoreAssortment => self.core_assortment,
        }
    }

    pub fn set(&mut self, flag: StatusFlag, value: bool) {
        match flag {
            StatusFlag::Listed => self.listed = value,
            StatusFlag::ManufacturerOwnBrand => self.manufacturer_own_brand = value,
            StatusFlag::CoreAssortment => self.core_assortment = value,
        }
    }

    /// 立っているフラグのラベルをカンマ区切りで連結。何も無ければ "—"
    pub fn status_label(&self) -> String {
        let labels: Vec<&str> = StatusFlag::ALL
            .into_iter()
            .filter(|flag| self.get(*flag))
            .map(|flag| flag.label())
            .collect();

        if labels.is_empty() {
            "—".to_string()
        } else {
            labels.join(", ")
        }
    }
}

/// ノメンクラチュアの1エントリ
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogEntry {
    pub name: String,

    pub code: String,

    /// 正規化済み名称（セッションがカタログ読み込み時に計算する）
    #[serde(default)]
    pub normalized_name: String,

    #[serde(default)]
    pub flags: StatusFlags,

    /// その他の列（列順を保持）
    #[serde(default)]
    pub extra: Vec<(String, String)>,
}

impl CatalogEntry {
    pub fn new(name: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            code: code.into(),
            ..Default::default()
        }
    }

    pub fn with_flag(mut self, flag: StatusFlag, value: bool) -> Self {
        self.flags.set(flag, value);
        self
    }
}

/// 注文の1行（列名 → セル値、欠損は None）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RequestRow {
    pub values: HashMap<String, Option<String>>,
}

impl RequestRow {
    pub fn from_pairs<'a>(pairs: impl IntoIterator<Item = (&'a str, Option<&'a str>)>) -> Self {
        Self {
            values: pairs
                .into_iter()
                .map(|(k, v)| (k.to_string(), v.map(str::to_string)))
                .collect(),
        }
    }

    /// 欠損・空文字は None として返す
    pub fn get(&self, column: &str) -> Option<&str> {
        self.values
            .get(column)
            .and_then(|v| v.as_deref())
            .filter(|v| !v.is_empty())
    }
}

/// 注文表全体
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RequestTable {
    /// 列名（表示順）
    pub columns: Vec<String>,
    pub rows: Vec<RequestRow>,
}

impl RequestTable {
    pub fn new(columns: Vec<String>, rows: Vec<RequestRow>) -> Self {
        Self { columns, rows }
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.columns.iter().any(|c| c == column)
    }
}

/// 照合結果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    #[serde(rename = "Запрос")]
    pub query: String,

    #[serde(rename = "Номенклатура")]
    pub entry_name: String,

    #[serde(rename = "Код")]
    pub entry_code: String,

    /// 0〜100
    #[serde(rename = "Сходство")]
    pub similarity: f64,

    #[serde(rename = "Статус")]
    pub status_label: String,
}

/// 照合の終了状態
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunStatus {
    Completed,
    /// キャンセルされた（部分結果は有効）
    Cancelled,
}

/// compute_matches の出力
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchOutcome {
    pub results: Vec<MatchResult>,
    pub status: RunStatus,
    /// 処理済みクエリ（グループ）数
    pub processed: usize,
    /// クエリ（グループ）総数
    pub total: usize,
}

impl MatchOutcome {
    pub fn is_cancelled(&self) -> bool {
        self.status == RunStatus::Cancelled
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_flag_parse_column_and_key() {
        assert_eq!(StatusFlag::parse("Оформлено").unwrap(), StatusFlag::Listed);
        assert_eq!(StatusFlag::parse("listed").unwrap(), StatusFlag::Listed);
        assert_eq!(
            StatusFlag::parse("manufacturerownbrand").unwrap(),
            StatusFlag::ManufacturerOwnBrand
        );
        assert_eq!(
            StatusFlag::parse(" ОсновнойАссортимент ").unwrap(),
            StatusFlag::CoreAssortment
        );
    }

    #[test]
    fn test_status_flag_parse_unknown() {
        let err = StatusFlag::parse("Цена").unwrap_err();
        assert!(matches!(err, Error::UnsupportedPriorityField(ref f) if f == "Цена"));
    }

    #[test]
    fn test_is_yes() {
        assert!(is_yes("Да"));
        assert!(is_yes(" да "));
        assert!(is_yes("yes"));
        assert!(!is_yes("Нет"));
        assert!(!is_yes(""));
    }

    #[test]
    fn test_status_label_order() {
        let flags = StatusFlags {
            listed: true,
            manufacturer_own_brand: false,
            core_assortment: true,
        };
        assert_eq!(flags.status_label(), "Оформлено, Основной Ассортимент");
    }

    #[test]
    fn test_status_label_placeholder() {
        assert_eq!(StatusFlags::default().status_label(), "—");
    }

    #[test]
    fn test_request_row_get_skips_empty() {
        let row = RequestRow::from_pairs([
            ("Товар", Some("Ручка")),
            ("Цвет", Some("")),
            ("Кол-во", None),
        ]);
        assert_eq!(row.get("Товар"), Some("Ручка"));
        assert_eq!(row.get("Цвет"), None);
        assert_eq!(row.get("Кол-во"), None);
        assert_eq!(row.get("Нет такого"), None);
    }

    #[test]
    fn test_match_result_serializes_with_export_headers() {
        let result = MatchResult {
            query: "ручка".into(),
            entry_name: "Ручка шариковая".into(),
            entry_code: "A1".into(),
            similarity: 87.5,
            status_label: "—".into(),
        };
        let json = serde_json::to_string(&result).unwrap();
        assert!(json.contains("\"Запрос\""));
        assert!(json.contains("\"Сходство\":87.5"));
    }
}
