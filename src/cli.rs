use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "food-ai")]
#[command(about = "食品パッケージAI解析・栄養基準チェックツール", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// パッケージ写真を解析してJSONを出力
    Analyze {
        /// パッケージ写真のパス（複数可、並べた順で送信）
        #[arg(required = true)]
        images: Vec<PathBuf>,

        /// 栄養要件ルールセットファイル（省略時は同梱のWHO基準）
        #[arg(short, long)]
        rules: Option<PathBuf>,

        /// 結果JSONの出力先ファイル
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// 解析結果を履歴に保存
        #[arg(short, long)]
        save: bool,

        /// 履歴ストアのディレクトリ（省略時は ~/.config/food-ai/history）
        #[arg(long)]
        store: Option<PathBuf>,
    },

    /// 保存済みの解析履歴を表示・管理
    History {
        /// 指定idのエントリを詳細表示
        #[arg(long)]
        show: Option<String>,

        /// 指定idのエントリを削除（画像コピーも消える）
        #[arg(long)]
        delete: Option<String>,

        /// 削除時の確認をスキップ
        #[arg(short, long)]
        yes: bool,

        /// 履歴ストアのディレクトリ（省略時は ~/.config/food-ai/history）
        #[arg(long)]
        store: Option<PathBuf>,
    },

    /// 設定を表示/編集
    Config {
        /// APIキーを設定
        #[arg(long)]
        set_api_key: Option<String>,

        /// 使用するモデルを設定
        #[arg(long)]
        set_model: Option<String>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}
