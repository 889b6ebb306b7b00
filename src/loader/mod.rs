//! データ読み込みモジュール
//!
//! 拡張子でExcel系ワークブックとJSONを切り替える。
//! どちらも `Dataset`（割り当て一覧 + テキスト行列）を返す。

pub mod workbook;
pub mod json;

pub use json::JsonSource;
pub use workbook::WorkbookSource;

use crate::config::Config;
use crate::error::{LookupError, Result};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tester_lookup_common::{normalize, Column, Dataset};

/// 設定がないときに探すファイル
const CANDIDATE_PATHS: &[&str] = &[
    "data.xlsx",
    "Таблица для загрузки.xlsx",
    "../data.xlsx",
    "../Таблица для загрузки.xlsx",
];

const WORKBOOK_EXTENSIONS: &[&str] = &["xlsx", "xlsm", "xlsb", "xls", "ods"];

/// データの供給元
pub trait DataSource: Send + Sync {
    /// 全データを読み込む
    fn load(&self) -> Result<Dataset>;

    /// シート構成と列の対応を調べる
    fn inspect(&self) -> Result<SourceReport>;

    fn path(&self) -> &Path;
}

/// `inspect` の結果
#[derive(Debug, Clone, Default, Serialize)]
pub struct SourceReport {
    pub path: String,
    pub sheets: Vec<String>,
    pub selection_sheet: Option<String>,
    pub texts_sheet: Option<String>,
    pub selection_header: Vec<String>,
    pub column_mapping: Vec<ColumnMapping>,
    pub assignment_rows: usize,
    pub text_rows: usize,
}

/// 列と実際の見出しの対応
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnMapping {
    pub column: Column,
    pub header: Option<String>,
}

/// 設定から供給元を作る
pub fn open_source(config: &Config) -> Result<Box<dyn DataSource>> {
    let path = resolve_source_path(config.source.as_deref())?;
    source_for_path(&path, config)
}

pub fn source_for_path(path: &Path, config: &Config) -> Result<Box<dyn DataSource>> {
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default();

    if WORKBOOK_EXTENSIONS.contains(&ext.as_str()) {
        Ok(Box::new(WorkbookSource::new(
            path,
            &config.selection_sheet,
            &config.texts_sheet,
        )))
    } else if ext == "json" {
        Ok(Box::new(JsonSource::new(path)))
    } else {
        Err(LookupError::UnsupportedSource(path.display().to_string()))
    }
}

/// データファイルのパスを決める
///
/// 明示されていればその存在を確認し、なければ候補を順に探す。
pub fn resolve_source_path(explicit: Option<&Path>) -> Result<PathBuf> {
    if let Some(path) = explicit {
        if !path.exists() {
            return Err(LookupError::FileNotFound(path.display().to_string()));
        }
        return Ok(path.to_path_buf());
    }

    CANDIDATE_PATHS
        .iter()
        .map(PathBuf::from)
        .find(|p| p.exists())
        .ok_or_else(|| LookupError::NoSourceFound(CANDIDATE_PATHS.join(", ")))
}

/// シート名を探す（完全一致 → 正規化一致 → 正規化部分一致）
pub fn find_sheet_name<'a>(names: &'a [String], target: &str) -> Option<&'a str> {
    if let Some(exact) = names.iter().find(|n| n.as_str() == target) {
        return Some(exact.as_str());
    }

    let key = normalize(target);
    if key.is_empty() {
        return None;
    }

    names
        .iter()
        .find(|n| normalize(n) == key)
        .or_else(|| names.iter().find(|n| normalize(n).contains(&key)))
        .map(String::as_str)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_find_sheet_exact() {
        let sheets = names(&["Тексты", "Выборка"]);
        assert_eq!(find_sheet_name(&sheets, "Выборка"), Some("Выборка"));
    }

    #[test]
    fn test_find_sheet_normalized() {
        let sheets = names(&["ТЕКСТЫ ", "Выборка (волна 1)"]);
        assert_eq!(find_sheet_name(&sheets, "Тексты"), Some("ТЕКСТЫ "));
        assert_eq!(find_sheet_name(&sheets, "Выборка"), Some("Выборка (волна 1)"));
        assert_eq!(find_sheet_name(&sheets, "Итоги"), None);
        assert_eq!(find_sheet_name(&sheets, ""), None);
    }

    #[test]
    fn test_unsupported_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.csv");
        std::fs::write(&path, "a,b").unwrap();
        let result = source_for_path(&path, &Config::default());
        assert!(matches!(result, Err(LookupError::UnsupportedSource(_))));
    }

    #[test]
    fn test_explicit_missing_path() {
        let result = resolve_source_path(Some(Path::new("/nonexistent/data.xlsx")));
        assert!(matches!(result, Err(LookupError::FileNotFound(_))));
    }
}
