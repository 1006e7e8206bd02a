use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "nutrition-calc")]
#[command(about = "レシピの栄養素を合計する栄養計算ツール", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 対話的に食材を入力して栄養計算
    Interactive {
        /// レポートの保存先（省略時は画面表示のみ）
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// 保存形式 (text/html/json/excel)
        #[arg(short, long, default_value = "text")]
        format: ReportFormat,
    },

    /// 食材を引数またはJSONで指定して栄養計算
    Calc {
        /// 食材 "名前=分量"（複数指定可）
        #[arg(short, long = "ingredient")]
        ingredients: Vec<String>,

        /// レシピJSONファイル（{"食材名": "分量"}）
        #[arg(short, long)]
        recipe: Option<PathBuf>,

        /// 出力形式 (text/html/json/excel)
        #[arg(short, long, default_value = "text")]
        format: ReportFormat,

        /// 出力ファイル/ディレクトリ（省略時は標準出力、excelは必須）
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// 検索に失敗した食材を除外して集計を続ける
        #[arg(long)]
        keep_going: bool,
    },

    /// 栄養素ラベル一覧を表示
    Labels,

    /// 設定を表示/編集
    Config {
        /// アプリケーションIDを設定
        #[arg(long)]
        set_app_id: Option<String>,

        /// アプリケーションキーを設定
        #[arg(long)]
        set_app_key: Option<String>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ReportFormat {
    #[default]
    Text,
    Html,
    Json,
    Excel,
}

impl ReportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ReportFormat::Text => "txt",
            ReportFormat::Html => "html",
            ReportFormat::Json => "json",
            ReportFormat::Excel => "xlsx",
        }
    }
}

impl std::str::FromStr for ReportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Ok(ReportFormat::Text),
            "html" => Ok(ReportFormat::Html),
            "json" => Ok(ReportFormat::Json),
            "excel" | "xlsx" => Ok(ReportFormat::Excel),
            _ => Err(format!("Unknown format: {}. Use text, html, json, or excel", s)),
        }
    }
}

impl std::fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReportFormat::Text => write!(f, "text"),
            ReportFormat::Html => write!(f, "html"),
            ReportFormat::Json => write!(f, "json"),
            ReportFormat::Excel => write!(f, "excel"),
        }
    }
}
