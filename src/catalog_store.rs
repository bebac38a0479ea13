//! 商品カタログの読み込みと共有
//!
//! xlsx/xls/xlsm/xlsb/ods は先頭シートを calamine で、csv は共通ライブラリで読む。
//! 読み込みは初回アクセス時に一度だけ行い、失敗は明示的な reload まで「なし」として保持する。

use crate::error::{HairScanError, Result};
use calamine::{open_workbook_auto, Data, Reader};
use hair_scan_common::ProductCatalog;
use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};

const SPREADSHEET_EXTENSIONS: &[&str] = &["xlsx", "xls", "xlsm", "xlsb", "ods"];

/// 遅延読み込みされる共有カタログ
#[derive(Debug)]
pub struct CatalogStore {
    path: PathBuf,
    catalog: OnceLock<Option<Arc<ProductCatalog>>>,
}

impl CatalogStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            catalog: OnceLock::new(),
        }
    }

    /// 読み込み済みのカタログで初期化
    pub fn with_catalog(path: impl Into<PathBuf>, catalog: ProductCatalog) -> Self {
        let store = Self::new(path);
        let _ = store.catalog.set(Some(Arc::new(catalog)));
        store
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// カタログを取得（None は縮退モード）
    pub fn get(&self) -> Option<Arc<ProductCatalog>> {
        self.catalog
            .get_or_init(|| match load_catalog(&self.path) {
                Ok(catalog) => {
                    tracing::info!(path = %self.path.display(), products = catalog.len(), "商品カタログを読み込みました");
                    Some(Arc::new(catalog))
                }
                Err(e) => {
                    tracing::warn!(path = %self.path.display(), error = %e, "商品カタログを読み込めません。デフォルト商品で代替します");
                    None
                }
            })
            .clone()
    }

    /// 読み込みを試行済みか
    pub fn is_initialized(&self) -> bool {
        self.catalog.get().is_some()
    }

    /// 次回アクセス時に再読み込み
    pub fn invalidate(&mut self) {
        self.catalog = OnceLock::new();
    }

    /// 直ちに再読み込み
    pub fn reload(&mut self) -> Option<Arc<ProductCatalog>> {
        self.invalidate();
        self.get()
    }
}

/// 拡張子で形式を判定して読み込み
pub fn load_catalog(path: &Path) -> Result<ProductCatalog> {
    if !path.exists() {
        return Err(HairScanError::FileNotFound(path.display().to_string()));
    }

    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default();

    if ext == "csv" {
        let content = std::fs::read_to_string(path)?;
        return Ok(ProductCatalog::from_csv_str(&content)?);
    }

    if SPREADSHEET_EXTENSIONS.contains(&ext.as_str()) {
        return load_spreadsheet(path);
    }

    Err(HairScanError::Catalog(format!(
        "未対応のファイル形式です: {}",
        path.display()
    )))
}

fn load_spreadsheet(path: &Path) -> Result<ProductCatalog> {
    let mut workbook =
        open_workbook_auto(path).map_err(|e| HairScanError::Catalog(e.to_string()))?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| HairScanError::Catalog("シートがありません".into()))?
        .map_err(|e| HairScanError::Catalog(e.to_string()))?;

    let mut rows = range
        .rows()
        .map(|row| row.iter().map(cell_to_string).collect::<Vec<_>>());
    let headers = rows
        .next()
        .ok_or_else(|| HairScanError::Catalog("ヘッダー行がありません".into()))?;
    let rows: Vec<Vec<String>> = rows.collect();

    Ok(ProductCatalog::from_table(&headers, &rows)?)
}

/// セル値を文字列化（整数値の浮動小数は "2" のように出力）
fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Float(f) if f.fract() == 0.0 && f.abs() < i64::MAX as f64 => {
            format!("{}", *f as i64)
        }
        Data::Float(f) => f.to_string(),
        Data::Int(i) => i.to_string(),
        Data::Bool(b) => b.to_string(),
        other => other.to_string(),
    }
}
