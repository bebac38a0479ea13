use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "hair-scan")]
#[command(about = "髪ダメージ画像解析・商品マッチングツール", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// 商品カタログ（設定値より優先）
    #[arg(long, global = true)]
    pub catalog: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 画像1枚を解析
    Analyze {
        /// 画像ファイル
        #[arg(required = true)]
        image: PathBuf,

        /// 履歴に保存
        #[arg(long)]
        save: bool,

        /// 結果JSONの出力先（省略時は標準出力）
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// フォルダ内の画像を一括解析
    Batch {
        /// 画像フォルダ
        #[arg(required = true)]
        folder: PathBuf,

        /// サブフォルダも再帰的にスキャン
        #[arg(short = 'r', long)]
        recursive: bool,

        /// 出力ファイル（.json / .xlsx）
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// 全結果を履歴に保存
        #[arg(long)]
        save: bool,
    },

    /// 髪質・悩み・ダメージから商品を照合しアドバイス用プロンプトを出力
    Advise {
        /// 髪質（例: dry, oily, curly）
        #[arg(long)]
        hair_type: String,

        /// 悩み（例: dryness, frizz）
        #[arg(long)]
        concern: String,

        /// ダメージスコア (0-10)
        #[arg(long)]
        damage_score: f64,

        /// 質問（指定時はプロンプトを出力）
        #[arg(short, long)]
        question: Option<String>,
    },

    /// カタログの内容を表示
    Catalog {
        /// 商品名でシャンプー/コンディショナーを検索
        #[arg(short, long)]
        product: Option<String>,
    },

    /// 履歴を一覧表示
    History,

    /// 履歴の統計を表示
    Stats,

    /// 初回と最新のスキャンを比較
    Compare,

    /// 履歴からインサイトを表示
    Insights,

    /// 履歴をExcelに出力
    Export {
        /// 出力ファイル（.xlsx）
        #[arg(short, long, required = true)]
        output: PathBuf,
    },

    /// 設定を表示/編集
    Config {
        /// 設定を表示
        #[arg(long)]
        show: bool,

        /// 商品カタログのパスを設定
        #[arg(long)]
        set_catalog: Option<PathBuf>,

        /// 履歴ファイルのパスを設定
        #[arg(long)]
        set_history: Option<PathBuf>,

        /// ブランド名を設定
        #[arg(long)]
        set_brand: Option<String>,
    },
}
