//! Excel/CSV/JSON出力の統合テスト

use auto_matcher::cli::OutputFormat;
use auto_matcher::export;
use auto_matcher::loader;
use auto_matcher_common::MatchResult;
use tempfile::tempdir;

fn create_test_result(index: usize) -> MatchResult {
    MatchResult {
        query: format!("маркер {}", index),
        entry_name: format!("Маркер перманентный №{}", index),
        entry_code: format!("C{}", index),
        similarity: 100.0 / index as f64,
        status_label: "Оформлено".to_string(),
    }
}

#[test]
fn test_excel_generation_and_read_back() {
    let dir = tempdir().expect("Failed to create temp dir");
    let output_path = dir.path().join("результаты.xlsx");

    let results: Vec<MatchResult> = (1..=3).map(create_test_result).collect();
    let result = export::save_results(&results, &output_path);
    assert!(result.is_ok(), "Excel生成に失敗: {:?}", result.err());

    let grid = loader::read_first_sheet(&output_path).expect("読み戻し失敗");
    assert_eq!(grid.len(), 4);
    assert_eq!(grid[0][0].as_deref(), Some("Запрос"));
    assert_eq!(grid[0][3].as_deref(), Some("Сходство"));
    assert_eq!(grid[1][2].as_deref(), Some("C1"));
    assert_eq!(grid[1][3].as_deref(), Some("100"));
    assert_eq!(grid[2][3].as_deref(), Some("50"));
}

#[test]
fn test_excel_generation_empty_results() {
    let dir = tempdir().expect("Failed to create temp dir");
    let output_path = dir.path().join("empty.xlsx");

    let result = export::save_results(&[], &output_path);
    assert!(result.is_ok(), "空のExcel生成に失敗: {:?}", result.err());
    assert!(output_path.exists());
}

#[test]
fn test_csv_uses_semicolon_and_decimal_comma() {
    let dir = tempdir().expect("Failed to create temp dir");
    let output_path = dir.path().join("out.csv");

    let results: Vec<MatchResult> = (1..=3).map(create_test_result).collect();
    export::save_results(&results, &output_path).expect("CSV生成に失敗");

    let content = std::fs::read_to_string(&output_path).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 4);
    assert_eq!(lines[0], "Запрос;Номенклатура;Код;Сходство;Статус");
    assert_eq!(lines[3], "маркер 3;Маркер перманентный №3;C3;33,33;Оформлено");
}

#[test]
fn test_json_export() {
    let dir = tempdir().expect("Failed to create temp dir");
    let output_path = dir.path().join("nested").join("out.json");

    let results: Vec<MatchResult> = (1..=2).map(create_test_result).collect();
    export::save_results(&results, &output_path).expect("JSON生成に失敗");

    let content = std::fs::read_to_string(&output_path).unwrap();
    let back: Vec<MatchResult> = serde_json::from_str(&content).unwrap();
    assert_eq!(back, results);
    assert!(content.contains("\"Номенклатура\""));
}

#[test]
fn test_output_path_for_directory() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = export::output_path_for_format(dir.path(), "matches", OutputFormat::Csv);
    assert_eq!(path, dir.path().join("matches.csv"));

    let explicit = dir.path().join("x.json");
    let path = export::output_path_for_format(&explicit, "matches", OutputFormat::Excel);
    assert_eq!(path, explicit);
}
