//! スキャン履歴ファイル
//!
//! JSON配列として保存する追記専用ログ（単一ライター、排他制御なし）。
//! 壊れたファイルは空の履歴として扱う。

use crate::error::Result;
use chrono::Utc;
use hair_scan_common::history::{self, Comparison, HistoryStats, InsightSummary, ScanRecord};
use hair_scan_common::AnalysisReport;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct ScanLog {
    path: PathBuf,
}

impl ScanLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// 全記録（挿入順）
    pub fn load(&self) -> Vec<ScanRecord> {
        if !self.path.exists() {
            return Vec::new();
        }

        let file = match File::open(&self.path) {
            Ok(f) => f,
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "履歴ファイルを開けません");
                return Vec::new();
            }
        };

        match serde_json::from_reader(BufReader::new(file)) {
            Ok(records) => records,
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "履歴ファイルが壊れています。空の履歴として扱います");
                Vec::new()
            }
        }
    }

    /// 解析結果を追記（時刻はログ側で付与）
    pub fn save(&self, report: &AnalysisReport) -> Result<ScanRecord> {
        let record = ScanRecord::from_report(report, Utc::now());
        self.append(record.clone())?;
        Ok(record)
    }

    /// 記録を追記
    pub fn append(&self, record: ScanRecord) -> Result<()> {
        let mut records = self.load();
        records.push(record);
        self.write_all(&records)
    }

    fn write_all(&self, records: &[ScanRecord]) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let file = File::create(&self.path)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, records)?;
        writer.flush()?;
        Ok(())
    }

    pub fn stats(&self) -> HistoryStats {
        history::stats(&self.load())
    }

    pub fn comparison(&self) -> Option<Comparison> {
        history::comparison(&self.load())
    }

    pub fn insights(&self) -> InsightSummary {
        history::insights(&self.load())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let log = ScanLog::new(dir.path().join("none.json"));
        assert!(log.load().is_empty());
        assert_eq!(log.stats().total_scans, 0);
        assert!(log.comparison().is_none());
    }

    #[test]
    fn test_save_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let log = ScanLog::new(dir.path().join("nested").join("history.json"));
        log.save(&AnalysisReport::default()).unwrap();
        assert_eq!(log.load().len(), 1);
    }

    #[test]
    fn test_written_file_is_complete_json() {
        let dir = tempfile::tempdir().unwrap();
        let log = ScanLog::new(dir.path().join("history.json"));
        log.save(&AnalysisReport::default()).unwrap();
        log.save(&AnalysisReport::default()).unwrap();

        // ログを介さず直接読んでも配列全体が書き出されている
        let raw = std::fs::read_to_string(log.path()).unwrap();
        let records: Vec<ScanRecord> = serde_json::from_str(&raw).unwrap();
        assert_eq!(records.len(), 2);
    }
}
