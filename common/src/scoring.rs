//! スコア調整
//!
//! クエリごとに min-max で 0〜100 に正規化し、先頭一致ボーナスを加算する。

/// 先頭一致ボーナス
pub const PREFIX_BONUS: f64 = 5.0;

pub const MAX_SIMILARITY: f64 = 100.0;

/// 生スコアを 0〜100 に正規化
///
/// 全スコアが等しい場合、正なら全て 100、そうでなければ全て 0。
pub fn normalize_scores(scores: &[f64]) -> Vec<f64> {
    if scores.is_empty() {
        return Vec::new();
    }

    let lo = scores.iter().copied().fold(f64::INFINITY, f64::min);
    let hi = scores.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    if hi == lo {
        let value = if hi > 0.0 { MAX_SIMILARITY } else { 0.0 };
        return vec![value; scores.len()];
    }

    scores
        .iter()
        .map(|s| (s - lo) / (hi - lo) * MAX_SIMILARITY)
        .collect()
}

/// 名称がクエリ語の空白連結で始まるエントリに +5（上限 100）
pub fn apply_prefix_bonus<S: AsRef<str>>(
    normalized: &[f64],
    query_tokens: &[String],
    entry_texts: &[S],
) -> Vec<f64> {
    let prefix = query_tokens.join(" ");

    normalized
        .iter()
        .zip(entry_texts)
        .map(|(score, text)| {
            if text.as_ref().starts_with(&prefix) {
                (score + PREFIX_BONUS).min(MAX_SIMILARITY)
            } else {
                *score
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(text: &str) -> Vec<String> {
        text.split_whitespace().map(str::to_string).collect()
    }

    #[test]
    fn test_normalize_linear() {
        let out = normalize_scores(&[1.0, 3.0, 2.0]);
        assert_eq!(out, vec![0.0, 100.0, 50.0]);
    }

    #[test]
    fn test_normalize_with_negative_scores() {
        let out = normalize_scores(&[-1.0, 1.0]);
        assert_eq!(out, vec![0.0, 100.0]);
    }

    #[test]
    fn test_all_equal_positive_is_100() {
        assert_eq!(normalize_scores(&[0.7, 0.7, 0.7]), vec![100.0; 3]);
    }

    #[test]
    fn test_all_equal_zero_or_negative_is_0() {
        assert_eq!(normalize_scores(&[0.0, 0.0]), vec![0.0; 2]);
        assert_eq!(normalize_scores(&[-0.08, -0.08]), vec![0.0; 2]);
    }

    #[test]
    fn test_normalize_empty() {
        assert!(normalize_scores(&[]).is_empty());
    }

    #[test]
    fn test_prefix_bonus_applied_and_capped() {
        let texts = ["ручка синяя", "ручка синяя гелевая", "синяя ручка"];
        let out = apply_prefix_bonus(&[50.0, 98.0, 100.0], &tokens("ручка синяя"), &texts);
        assert_eq!(out, vec![55.0, 100.0, 100.0]);
    }

    #[test]
    fn test_prefix_bonus_is_exact_prefix() {
        let texts = ["ручки синие"];
        let out = apply_prefix_bonus(&[10.0], &tokens("ручка"), &texts);
        assert_eq!(out, vec![10.0]);
    }

    #[test]
    fn test_empty_query_prefix_matches_everything() {
        let texts = ["а", "б"];
        let out = apply_prefix_bonus(&[0.0, 0.0], &[], &texts);
        assert_eq!(out, vec![5.0, 5.0]);
    }

    #[test]
    fn test_adjusted_always_in_range() {
        let raw = [3.2, -1.0, 0.0, 7.5, 7.5];
        let texts = ["a b", "a", "b", "a b c", "c"];
        let out = apply_prefix_bonus(&normalize_scores(&raw), &tokens("a"), &texts);
        assert!(out.iter().all(|s| (0.0..=100.0).contains(s)));
    }
}
