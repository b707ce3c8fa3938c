//! 候補の並べ替えと上位 N 件の選択

use crate::types::{CatalogEntry, MatchResult, StatusFlag};
use std::collections::HashSet;

/// 並べ替え・重複コード除去・上位 N 件
///
/// 優先フラグ「はい」→ スコア降順 → 元の順序（安定ソート）。
/// 走査するのは並べ替え後の先頭 `2 * top_n` 件のみ。
pub fn select_matches(
    query: &str,
    entries: &[CatalogEntry],
    scores: &[f64],
    priority: StatusFlag,
    top_n: usize,
) -> Vec<MatchResult> {
    let mut order: Vec<usize> = (0..entries.len().min(scores.len())).collect();
    order.sort_by(|&a, &b| {
        let pa = entries[a].flags.get(priority);
        let pb = entries[b].flags.get(priority);
        pb.cmp(&pa).then_with(|| scores[b].total_cmp(&scores[a]))
    });

    let mut seen: HashSet<&str> = HashSet::new();
    let mut results = Vec::with_capacity(top_n);

    for idx in order.into_iter().take(top_n.saturating_mul(2)) {
        if seen.len() >= top_n {
            break;
        }
        let entry = &entries[idx];
        if !seen.insert(entry.code.as_str()) {
            continue;
        }
        results.push(MatchResult {
            query: query.to_string(),
            entry_name: entry.name.clone(),
            entry_code: entry.code.clone(),
            similarity: scores[idx],
            status_label: entry.flags.status_label(),
        });
    }

    results
}
