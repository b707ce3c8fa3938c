//! テキスト正規化モジュール
//!
//! 1. 小文字化
//! 2. 英数字（キリル文字含む）と空白以外を除去
//! 3. 略語テーブルによる部分文字列置換（宣言順、前の置換結果に後の置換が作用する）

use serde::{Deserialize, Serialize};

/// 置換ルール（完全語 → 略語）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Abbreviation {
    pub full: String,
    pub short: String,
}

/// 略語テーブル。実行中に変更しない
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AbbreviationTable {
    rules: Vec<Abbreviation>,
}

const DEFAULT_RULES: &[(&str, &str)] = &[
    ("перманентный", "перм"),
    ("маркер", "марк"),
    ("мультифора", "файл"),
    ("грузоподъемностью", "груз"),
    ("пластиковый", "пласт"),
    ("металлический", "мет"),
    ("тн", "тонн"),
    ("корректирующее", "корр"),
    ("самоклеящаяся", "самокл"),
    ("гибкая", "гибк"),
    ("регистратор", "регистр"),
    ("кальцинированная", "кальц"),
    ("гост", "стандарт"),
    ("ассорти", "разные цвета"),
    ("арочный", "дуга"),
];

impl Default for AbbreviationTable {
    fn default() -> Self {
        Self::from_pairs(DEFAULT_RULES.iter().copied())
    }
}

impl AbbreviationTable {
    pub fn from_pairs<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        Self {
            rules: pairs
                .into_iter()
                .map(|(full, short)| Abbreviation {
                    full: full.to_string(),
                    short: short.to_string(),
                })
                .collect(),
        }
    }

    pub fn empty() -> Self {
        Self { rules: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// 正規化器
#[derive(Debug, Clone, Default)]
pub struct TextNormalizer {
    table: AbbreviationTable,
}

impl TextNormalizer {
    pub fn new(table: AbbreviationTable) -> Self {
        Self { table }
    }

    pub fn normalize(&self, text: &str) -> String {
        let mut text: String = text
            .to_lowercase()
            .chars()
            .filter(|c| c.is_alphanumeric() || c.is_whitespace())
            .collect();

        // 語境界は見ない（"тн" は他の語の内部でも置換される）
        for rule in &self.table.rules {
            if rule.full.is_empty() {
                continue;
            }
            if text.contains(rule.full.as_str()) {
                text = text.replace(rule.full.as_str(), &rule.short);
            }
        }

        if text.trim().is_empty() {
            return String::new();
        }
        text
    }

    /// 正規化してから空白で分割
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        tokenize(&self.normalize(text))
    }
}

/// 正規化済みテキストを空白で分割する
pub fn tokenize(normalized: &str) -> Vec<String> {
    normalized.split_whitespace().map(str::to_string).collect()
}
