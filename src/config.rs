use crate::error::{HairScanError, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

const CATALOG_ENV: &str = "HAIR_SCAN_CATALOG";
const HISTORY_ENV: &str = "HAIR_SCAN_HISTORY";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// 商品カタログ（xlsx/xls/xlsm/ods/csv）
    pub catalog_path: PathBuf,
    /// スキャン履歴JSON
    pub history_path: PathBuf,
    /// アドバイス表示名の接頭辞
    #[serde(default = "default_brand")]
    pub brand: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            catalog_path: PathBuf::from("catalog.xlsx"),
            history_path: PathBuf::from("scan_history.json"),
            brand: default_brand(),
        }
    }
}

fn default_brand() -> String {
    "Gliss".into()
}

impl Config {
    /// 設定ファイルを読み込み、環境変数で上書き
    pub fn load() -> Result<Self> {
        Ok(Self::load_file()?.with_env_overrides())
    }

    /// 設定ファイルのみ（環境変数を反映しない、編集用）
    pub fn load_file() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            Ok(serde_json::from_str(&content)?)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| HairScanError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("hair-scan").join("config.json"))
    }

    /// 環境変数を優先
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(
            std::env::var(CATALOG_ENV).ok(),
            std::env::var(HISTORY_ENV).ok(),
        )
    }

    fn with_overrides(mut self, catalog: Option<String>, history: Option<String>) -> Self {
        if let Some(path) = catalog.filter(|p| !p.trim().is_empty()) {
            self.catalog_path = PathBuf::from(path);
        }
        if let Some(path) = history.filter(|p| !p.trim().is_empty()) {
            self.history_path = PathBuf::from(path);
        }
        self
    }

    pub fn set_catalog_path(&mut self, path: PathBuf) -> Result<()> {
        self.catalog_path = path;
        self.save()
    }

    pub fn set_history_path(&mut self, path: PathBuf) -> Result<()> {
        self.history_path = path;
        self.save()
    }

    pub fn set_brand(&mut self, brand: String) -> Result<()> {
        self.brand = brand;
        self.save()
    }
}
