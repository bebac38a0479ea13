//! hair-scan: 髪ダメージ画像解析・商品マッチング
//!
//! 画像デコードと特徴量抽出、カタログ読み込み、解析パイプライン、
//! スキャン履歴、Excel出力、設定、CLI定義。

pub mod analyzer;
pub mod catalog_store;
pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod extractor;
pub mod history;
pub mod scanner;
