use auto_matcher::{cli, column_selector, config, error, export, loader, progress};
use auto_matcher_common::{CancellationToken, MatchOptions, MatchOutcome, MatchSession};
use clap::Parser;
use cli::{Cli, Commands, OutputFormat};
use config::Config;
use error::{MatcherError, Result};
use progress::MatchProgress;
use std::path::{Path, PathBuf};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let config = Config::load()?;

    match cli.command {
        Commands::Match {
            catalog,
            request,
            columns,
            priority,
            top_n,
            grouped,
            group_by,
            output,
            interactive,
        } => {
            println!("🔎 auto-matcher - 照合\n");

            // 1. ノメンクラチュア読み込み
            println!("[1/4] ノメンクラチュアを読み込み中...");
            let entries = loader::load_catalog(&catalog)?;
            println!("✔ {}件の商品を読み込み\n", entries.len());

            // 2. 注文読み込み
            println!("[2/4] 注文を読み込み中...");
            let requests = loader::load_requests(&request)?;
            println!("✔ {}行 / 列: {}\n", requests.rows.len(), requests.columns.join(", "));

            let options = if interactive {
                let selection = column_selector::select_interactive(
                    &requests.columns,
                    priority.as_deref().unwrap_or(&config.default_priority),
                    top_n.unwrap_or(config.default_top_n),
                )?;
                MatchOptions::new(selection.columns, selection.priority, selection.top_n)
                    .grouped(selection.grouped)
            } else {
                let columns = if columns.is_empty() {
                    default_columns(&requests.columns)
                } else {
                    columns
                };
                MatchOptions::new(
                    columns,
                    priority.unwrap_or_else(|| config.default_priority.clone()),
                    top_n.unwrap_or(config.default_top_n),
                )
                .grouped(grouped)
            };
            let options = if group_by.is_empty() { options } else { options.group_by(group_by) };

            // 3. 照合
            println!(
                "[3/4] 照合中... (列: {}, 優先: {}, 候補数: {}{})",
                options.columns.join(", "),
                options.priority,
                options.top_n,
                if options.grouped { ", グループ化" } else { "" }
            );
            let mut session = MatchSession::new(config.abbreviation_table(), config.bm25_params());
            session.load_catalog(entries);
            session.load_requests(requests);
            let outcome = run_matching(session, options, cli.verbose).await?;

            if outcome.is_cancelled() {
                println!(
                    "⚠ キャンセルされました（{}/{}件まで処理）\n",
                    outcome.processed, outcome.total
                );
            } else {
                println!("✔ {}件の候補\n", outcome.results.len());
            }

            // 4. 保存
            println!("[4/4] 結果を保存中...");
            let output_path = resolve_output_path(output);
            export::save_results(&outcome.results, &output_path)?;
            println!("✔ 結果を保存: {}", output_path.display());

            if outcome.is_cancelled() {
                println!("\n⚠ 部分結果を保存しました");
            } else {
                println!("\n✅ 照合完了");
            }
        }

        Commands::Columns { request } => {
            let requests = loader::load_requests(&request)?;
            println!("列一覧 ({}行):", requests.rows.len());
            for (i, column) in requests.columns.iter().enumerate() {
                println!("  {}) {}", i + 1, column);
            }
        }

        Commands::Config { set_top_n, set_priority, reset, show } => {
            let mut config = if reset { Config::default() } else { config };
            let changed = reset || set_top_n.is_some() || set_priority.is_some();

            if let Some(n) = set_top_n {
                config.set_top_n(n)?;
            }
            if let Some(priority) = set_priority {
                config.set_priority(&priority)?;
            }
            if changed {
                config.save()?;
                println!("✔ 設定を保存しました: {}", Config::config_path()?.display());
            }

            if show || !changed {
                println!("設定:");
                println!("  候補数: {}", config.default_top_n);
                println!("  優先フラグ: {}", config.default_priority);
                println!(
                    "  BM25: k1={} b={} epsilon={}",
                    config.bm25_k1, config.bm25_b, config.bm25_epsilon
                );
                println!("  略語: {}件", config.abbreviation_table().len());
            }
        }
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let level = if verbose { tracing::Level::DEBUG } else { tracing::Level::WARN };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

/// 照合コアを別スレッドで実行し、Ctrl-C でキャンセルする
async fn run_matching(
    session: MatchSession,
    options: MatchOptions,
    verbose: bool,
) -> Result<MatchOutcome> {
    let token = CancellationToken::new();

    let signal_token = token.clone();
    let signal_task = tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            signal_token.cancel();
        }
    });

    let outcome = tokio::task::spawn_blocking(move || {
        let progress = MatchProgress::new(verbose);
        let mut on_progress = |done: usize, total: usize| progress.update(done, total);
        let outcome = session.compute_matches(&options, &token, Some(&mut on_progress));
        match &outcome {
            Ok(o) if o.is_cancelled() => progress.abandon("キャンセル"),
            Ok(_) => progress.finish("完了"),
            Err(_) => progress.abandon("エラー"),
        }
        outcome
    })
    .await
    .map_err(|e| MatcherError::Task(e.to_string()))?;

    signal_task.abort();
    Ok(outcome?)
}

/// 列指定が無い場合は「товар」を含む列を使う
fn default_columns(columns: &[String]) -> Vec<String> {
    columns
        .iter()
        .zip(column_selector::default_column_marks(columns))
        .filter(|(_, marked)| *marked)
        .map(|(c, _)| c.clone())
        .take(1)
        .collect()
}

fn resolve_output_path(output: Option<PathBuf>) -> PathBuf {
    let stem = format!("matches_{}", chrono::Local::now().format("%Y%m%d_%H%M%S"));
    match output {
        Some(path) => export::output_path_for_format(&path, &stem, OutputFormat::Excel),
        None => export::output_path_for_format(Path::new("."), &stem, OutputFormat::Excel),
    }
}
