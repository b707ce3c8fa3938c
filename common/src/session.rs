//! 照合セッション
//!
//! カタログと注文を保持し、クエリ（またはグループ）ごとに
//! 正規化 → BM25 → スコア調整 → 選択 を順番に実行する。
//!
//! カタログの正規化名称とインデックスは読み込み時に一度だけ計算し、
//! カタログか略語テーブルが変わったときだけ作り直す。

use crate::cancel::CancellationToken;
use crate::error::{Error, Result};
use crate::grouper::group_queries_by;
use crate::index::{Bm25Params, RelevanceIndex};
use crate::normalizer::{tokenize, AbbreviationTable, TextNormalizer};
use crate::scoring::{apply_prefix_bonus, normalize_scores};
use crate::selector::select_matches;
use crate::types::{CatalogEntry, MatchOutcome, MatchResult, RequestTable, RunStatus, StatusFlag};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// 照合オプション
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchOptions {
    /// 照合（グループ化）に使う注文の列
    pub columns: Vec<String>,
    /// 優先フラグ名（列名または英語キー）
    pub priority: String,
    /// クエリごとの候補数
    pub top_n: usize,
    /// グループ化モード
    pub grouped: bool,
    /// グループキー列。None なら `columns`
    #[serde(default)]
    pub group_by: Option<Vec<String>>,
}

impl MatchOptions {
    pub fn new(columns: Vec<String>, priority: impl Into<String>, top_n: usize) -> Self {
        Self {
            columns,
            priority: priority.into(),
            top_n,
            grouped: false,
            group_by: None,
        }
    }

    pub fn grouped(mut self, grouped: bool) -> Self {
        self.grouped = grouped;
        self
    }

    pub fn group_by(mut self, key_columns: Vec<String>) -> Self {
        self.group_by = Some(key_columns);
        self
    }
}

/// ラベル（結果の query 欄）とクエリ本文
struct Query {
    label: String,
    text: String,
}

#[derive(Debug, Default)]
pub struct MatchSession {
    normalizer: TextNormalizer,
    params: Bm25Params,
    catalog: Option<Vec<CatalogEntry>>,
    index: Option<RelevanceIndex>,
    requests: Option<RequestTable>,
}

impl MatchSession {
    pub fn new(table: AbbreviationTable, params: Bm25Params) -> Self {
        Self {
            normalizer: TextNormalizer::new(table),
            params,
            ..Default::default()
        }
    }

    pub fn catalog(&self) -> Option<&[CatalogEntry]> {
        self.catalog.as_deref()
    }

    /// カタログを読み込み、正規化名称とインデックスを再計算する
    pub fn load_catalog(&mut self, entries: Vec<CatalogEntry>) {
        self.catalog = Some(entries);
        self.rebuild_index();
    }

    pub fn load_requests(&mut self, requests: RequestTable) {
        self.requests = Some(requests);
    }

    /// 略語テーブルを差し替える（カタログの派生データも作り直す）
    pub fn set_abbreviations(&mut self, table: AbbreviationTable) {
        self.normalizer = TextNormalizer::new(table);
        self.rebuild_index();
    }

    fn rebuild_index(&mut self) {
        self.index = None;
        let Some(entries) = self.catalog.as_mut() else {
            return;
        };

        let normalizer = &self.normalizer;
        entries
            .par_iter_mut()
            .for_each(|entry| entry.normalized_name = normalizer.normalize(&entry.name));

        let documents: Vec<Vec<String>> = entries
            .par_iter()
            .map(|entry| tokenize(&entry.normalized_name))
            .collect();

        // 空カタログと不正パラメータは compute_matches 側で報告する
        self.index = RelevanceIndex::build(&documents, self.params).ok();
        tracing::debug!(entries = entries.len(), "catalog index rebuilt");
    }

    /// 全クエリを照合する
    ///
    /// キャンセルはクエリの開始前に確認し、それまでの結果を `Cancelled` として返す。
    /// 前提条件エラーの場合は部分結果を返さない。
    pub fn compute_matches(
        &self,
        options: &MatchOptions,
        cancel: &CancellationToken,
        mut progress: Option<&mut dyn FnMut(usize, usize)>,
    ) -> Result<MatchOutcome> {
        let entries = self.catalog.as_deref().ok_or(Error::NotLoaded("catalog"))?;
        let requests = self.requests.as_ref().ok_or(Error::NotLoaded("requests"))?;
        self.params.validate()?;
        let index = match &self.index {
            Some(index) if !entries.is_empty() => index,
            _ => return Err(Error::EmptyCorpus),
        };
        let priority = StatusFlag::parse(&options.priority)?;
        validate_columns(requests, options)?;

        let queries = build_queries(requests, options);
        let total = queries.len();
        let mut results = Vec::new();
        let mut processed = 0;
        let mut status = RunStatus::Completed;

        for query in &queries {
            if cancel.is_cancelled() {
                status = RunStatus::Cancelled;
                tracing::info!(processed, total, "matching cancelled");
                break;
            }

            results.extend(self.match_query(entries, index, query, priority, options.top_n));
            processed += 1;

            if let Some(callback) = progress.as_mut() {
                callback(processed, total);
            }
        }

        tracing::debug!(processed, total, results = results.len(), "matching finished");

        Ok(MatchOutcome {
            results,
            status,
            processed,
            total,
        })
    }

    fn match_query(
        &self,
        entries: &[CatalogEntry],
        index: &RelevanceIndex,
        query: &Query,
        priority: StatusFlag,
        top_n: usize,
    ) -> Vec<MatchResult> {
        let tokens = self.normalizer.tokenize(&query.text);
        let raw = index.score(&tokens);
        let normalized = normalize_scores(&raw);
        let names: Vec<&str> = entries.iter().map(|e| e.normalized_name.as_str()).collect();
        let adjusted = apply_prefix_bonus(&normalized, &tokens, &names);

        select_matches(&query.label, entries, &adjusted, priority, top_n)
    }
}

fn validate_columns(requests: &RequestTable, options: &MatchOptions) -> Result<()> {
    if options.columns.is_empty() {
        return Err(Error::NoColumnsSelected);
    }

    let key_columns = options.group_by.iter().flatten();
    for column in options.columns.iter().chain(key_columns) {
        if !requests.has_column(column) {
            return Err(Error::UnknownColumn(column.clone()));
        }
    }
    Ok(())
}

fn build_queries(requests: &RequestTable, options: &MatchOptions) -> Vec<Query> {
    if options.grouped {
        let key_columns = options.group_by.as_deref().unwrap_or(&options.columns);
        return group_queries_by(&requests.rows, key_columns, &options.columns)
            .into_iter()
            .map(|(label, text)| Query { label, text })
            .collect();
    }

    // 非グループモードは先頭の選択列のみを使う
    let column = &options.columns[0];
    requests
        .rows
        .iter()
        .map(|row| {
            let text = row.get(column).unwrap_or_default().to_string();
            Query {
                label: text.clone(),
                text,
            }
        })
        .collect()
}
