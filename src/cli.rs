use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "auto-matcher")]
#[command(about = "クライアント注文とノメンクラチュアの自動照合ツール", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 注文をノメンクラチュアと照合して結果を保存
    Match {
        /// ノメンクラチュア（xlsx/xls/ods）
        #[arg(required = true)]
        catalog: PathBuf,

        /// クライアント注文（xlsx/xls/ods）
        #[arg(required = true)]
        request: PathBuf,

        /// 照合に使う列（複数指定可）
        #[arg(short, long = "column")]
        columns: Vec<String>,

        /// 優先フラグ（Оформлено / ТоварПроизводителя / ОсновнойАссортимент）
        #[arg(short, long)]
        priority: Option<String>,

        /// クエリごとの候補数（1以上）
        #[arg(short = 'n', long, value_parser = parse_top_n)]
        top_n: Option<usize>,

        /// 同じキーの行をまとめて1クエリにする
        #[arg(short, long)]
        grouped: bool,

        /// グループキー列（省略時は --column と同じ）
        #[arg(long = "group-by")]
        group_by: Vec<String>,

        /// 出力ファイル（.xlsx / .csv / .json）
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// 列・優先フラグ・候補数を対話的に選択
        #[arg(short, long)]
        interactive: bool,
    },

    /// 注文ファイルの列一覧を表示
    Columns {
        /// クライアント注文（xlsx/xls/ods）
        #[arg(required = true)]
        request: PathBuf,
    },

    /// 設定を表示/編集
    Config {
        /// 既定の候補数を設定
        #[arg(long, value_parser = parse_top_n)]
        set_top_n: Option<usize>,

        /// 既定の優先フラグを設定
        #[arg(long)]
        set_priority: Option<String>,

        /// 設定を初期値に戻す
        #[arg(long)]
        reset: bool,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}

/// 候補数は1以上
pub fn parse_top_n(s: &str) -> Result<usize, String> {
    match s.parse::<usize>() {
        Ok(0) => Err("候補数は1以上を指定してください".to_string()),
        Ok(n) => Ok(n),
        Err(e) => Err(e.to_string()),
    }
}

/// 出力形式（拡張子で判定）
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Excel,
    Csv,
    Json,
}

impl OutputFormat {
    pub fn from_path(path: &std::path::Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_lowercase();
        ext.parse().ok()
    }

    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Excel => "xlsx",
            OutputFormat::Csv => "csv",
            OutputFormat::Json => "json",
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "xlsx" | "excel" => Ok(OutputFormat::Excel),
            "csv" => Ok(OutputFormat::Csv),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Unknown format: {}. Use xlsx, csv, or json", s)),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.extension())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use std::path::Path;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_match_command() {
        let cli = Cli::parse_from([
            "auto-matcher", "match", "nom.xlsx", "req.xlsx",
            "-c", "Товар", "-c", "Описание", "-n", "3", "--grouped",
        ]);
        match cli.command {
            Commands::Match { columns, top_n, grouped, priority, .. } => {
                assert_eq!(columns, vec!["Товар", "Описание"]);
                assert_eq!(top_n, Some(3));
                assert!(grouped);
                assert!(priority.is_none());
            }
            _ => panic!("match コマンドとして解析されていない"),
        }
    }

    #[test]
    fn test_zero_top_n_rejected() {
        let err = Cli::try_parse_from(["auto-matcher", "match", "nom.xlsx", "req.xlsx", "-n", "0"]);
        assert!(err.is_err());
        let err = Cli::try_parse_from(["auto-matcher", "config", "--set-top-n", "0"]);
        assert!(err.is_err());
        assert!(parse_top_n("abc").is_err());
        assert_eq!(parse_top_n("7"), Ok(7));
    }

    #[test]
    fn test_output_format_from_path() {
        assert_eq!(OutputFormat::from_path(Path::new("a/b.XLSX")), Some(OutputFormat::Excel));
        assert_eq!(OutputFormat::from_path(Path::new("out.csv")), Some(OutputFormat::Csv));
        assert_eq!(OutputFormat::from_path(Path::new("out.json")), Some(OutputFormat::Json));
        assert_eq!(OutputFormat::from_path(Path::new("out.txt")), None);
        assert_eq!(OutputFormat::from_path(Path::new("out")), None);
    }
}
