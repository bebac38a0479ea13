use thiserror::Error;

#[derive(Error, Debug)]
pub enum HairScanError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("ファイルが見つかりません: {0}")]
    FileNotFound(String),

    #[error("フォルダが見つかりません: {0}")]
    FolderNotFound(String),

    #[error("画像をデコードできません: {0}")]
    ImageDecode(String),

    #[error("画像サイズが不正です: {width}x{height}")]
    InvalidImage { width: u32, height: u32 },

    #[error("商品カタログ読み込みエラー: {0}")]
    Catalog(String),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error("Excel生成エラー: {0}")]
    ExcelGeneration(String),

    #[error(transparent)]
    Common(#[from] hair_scan_common::Error),

    #[error("画像が見つかりません: {0}")]
    NoImagesFound(String),
}

impl From<image::ImageError> for HairScanError {
    fn from(err: image::ImageError) -> Self {
        HairScanError::ImageDecode(err.to_string())
    }
}

impl From<rust_xlsxwriter::XlsxError> for HairScanError {
    fn from(err: rust_xlsxwriter::XlsxError) -> Self {
        HairScanError::ExcelGeneration(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, HairScanError>;
