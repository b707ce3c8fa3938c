//! BM25 関連度インデックス
//!
//! 正規化済みカタログ名称をトークン化した文書集合に対して Okapi BM25 を構築する。
//! カタログが変わったら作り直す（差分更新はしない）。

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// BM25 のパラメータ
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bm25Params {
    /// 語頻度の飽和
    pub k1: f64,
    /// 文書長正規化
    pub b: f64,
    /// 負の IDF を平均 IDF のこの割合で置き換える
    pub epsilon: f64,
}

impl Default for Bm25Params {
    fn default() -> Self {
        Self {
            k1: 1.5,
            b: 0.75,
            epsilon: 0.25,
        }
    }
}

impl Bm25Params {
    /// `k1 >= 0`、`0 <= b <= 1`、`epsilon >= 0`（いずれも有限値）
    ///
    /// 範囲外だと分母が 0 になり NaN スコアが出る。
    pub fn validate(&self) -> Result<()> {
        if !self.k1.is_finite() || self.k1 < 0.0 {
            return Err(Error::InvalidParameter(format!("k1 = {}", self.k1)));
        }
        if !(0.0..=1.0).contains(&self.b) {
            return Err(Error::InvalidParameter(format!("b = {}", self.b)));
        }
        if !self.epsilon.is_finite() || self.epsilon < 0.0 {
            return Err(Error::InvalidParameter(format!("epsilon = {}", self.epsilon)));
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct RelevanceIndex {
    params: Bm25Params,
    /// 文書ごとの語頻度
    term_freqs: Vec<HashMap<String, u32>>,
    doc_lengths: Vec<usize>,
    avg_doc_len: f64,
    idf: HashMap<String, f64>,
}

impl RelevanceIndex {
    /// トークン化済み文書からインデックスを構築
    pub fn build(documents: &[Vec<String>], params: Bm25Params) -> Result<Self> {
        params.validate()?;
        if documents.is_empty() {
            return Err(Error::EmptyCorpus);
        }

        let mut term_freqs = Vec::with_capacity(documents.len());
        let mut doc_lengths = Vec::with_capacity(documents.len());
        let mut doc_freqs: HashMap<String, usize> = HashMap::new();
        let mut total_len = 0usize;

        for doc in documents {
            let mut freqs: HashMap<String, u32> = HashMap::new();
            for token in doc {
                *freqs.entry(token.clone()).or_insert(0) += 1;
            }
            for token in freqs.keys() {
                *doc_freqs.entry(token.clone()).or_insert(0) += 1;
            }
            total_len += doc.len();
            doc_lengths.push(doc.len());
            term_freqs.push(freqs);
        }

        let n = documents.len() as f64;
        let avg_doc_len = total_len as f64 / n;

        let mut idf: HashMap<String, f64> = HashMap::with_capacity(doc_freqs.len());
        let mut idf_sum = 0.0;
        let mut negative = Vec::new();
        for (term, df) in doc_freqs {
            let df = df as f64;
            let value = ((n - df + 0.5) / (df + 0.5)).ln();
            idf_sum += value;
            if value < 0.0 {
                negative.push(term.clone());
            }
            idf.insert(term, value);
        }

        if !idf.is_empty() {
            let floor = params.epsilon * idf_sum / idf.len() as f64;
            for term in negative {
                idf.insert(term, floor);
            }
        }

        Ok(Self {
            params,
            term_freqs,
            doc_lengths,
            avg_doc_len,
            idf,
        })
    }

    pub fn len(&self) -> usize {
        self.doc_lengths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.doc_lengths.is_empty()
    }

    /// 語の IDF（コーパスに無い語は 0）
    pub fn idf(&self, term: &str) -> f64 {
        self.idf.get(term).copied().unwrap_or(0.0)
    }

    /// クエリに対する全文書のスコア（文書順）
    ///
    /// 重複したクエリ語はその回数分加算される。
    pub fn score(&self, query_tokens: &[String]) -> Vec<f64> {
        let Bm25Params { k1, b, .. } = self.params;
        let mut scores = vec![0.0; self.len()];

        for token in query_tokens {
            let idf = self.idf(token);
            if idf == 0.0 {
                continue;
            }
            for (doc_idx, freqs) in self.term_freqs.iter().enumerate() {
                let Some(tf) = freqs.get(token) else {
                    continue;
                };
                let tf = f64::from(*tf);
                let length_ratio = if self.avg_doc_len > 0.0 {
                    self.doc_lengths[doc_idx] as f64 / self.avg_doc_len
                } else {
                    0.0
                };
                let denom = tf + k1 * (1.0 - b + b * length_ratio);
                scores[doc_idx] += idf * (tf * (k1 + 1.0) / denom);
            }
        }

        scores
    }
}
