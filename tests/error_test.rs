//! エラーケーステスト
//!
//! 読み込み失敗と「見つからない」の区別を検証

use rust_xlsxwriter::Workbook;
use std::path::Path;
use std::time::Duration;
use tempfile::tempdir;
use tester_lookup::cache::DatasetCache;
use tester_lookup::config::Config;
use tester_lookup::error::LookupError;
use tester_lookup::loader::{self, DataSource, JsonSource, WorkbookSource};
use tester_lookup_common::{TextResolution, WaveSpec};

/// 存在しないファイル
#[test]
fn test_nonexistent_workbook() {
    let source = WorkbookSource::new(Path::new("/nonexistent/data.xlsx"), "Выборка", "Тексты");
    let err = source.load().unwrap_err();
    assert!(matches!(err, LookupError::FileNotFound(_)));
}

/// 未対応の拡張子
#[test]
fn test_unsupported_source() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("data.txt");
    std::fs::write(&path, "hello").unwrap();

    let config = Config {
        source: Some(path),
        ..Default::default()
    };
    let result = loader::open_source(&config);
    assert!(matches!(result, Err(LookupError::UnsupportedSource(_))));
}

/// 拡張子は .xlsx だが中身が壊れている
#[test]
fn test_corrupted_workbook() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("data.xlsx");
    std::fs::write(&path, b"not a zip archive").unwrap();

    let err = WorkbookSource::new(&path, "Выборка", "Тексты").load().unwrap_err();
    assert!(matches!(err, LookupError::Workbook(_)));
}

/// ФИО列がないシート
#[test]
fn test_missing_tester_column() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("data.xlsx");

    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name("Выборка").unwrap();
    sheet.write_string(0, 0, "Партнер").unwrap();
    sheet.write_string(0, 1, "№ волны").unwrap();
    sheet.write_string(1, 0, "PartnerX").unwrap();
    workbook.save(&path).unwrap();

    let err = WorkbookSource::new(&path, "Выборка", "Тексты").load().unwrap_err();
    match err {
        LookupError::MissingColumn { sheet, column } => {
            assert_eq!(sheet, "Выборка");
            assert!(column.contains("Тестировщик"));
        }
        other => panic!("MissingColumn になるべき: {:?}", other),
    }
}

/// 読み込めないデータは空の結果として扱う
#[test]
fn test_unavailable_snapshot_is_empty_result() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("missing.json");

    let cache = DatasetCache::new(Box::new(JsonSource::new(&path)), Duration::from_secs(60));
    assert!(cache.find_assignments("Иванов", &WaveSpec::default()).is_empty());
    assert_eq!(cache.resolve_text("PartnerX", "call"), TextResolution::NotFound);
}

/// 2行しかないテキスト行列は「不正な構造」で、NotFound とは区別する
#[test]
fn test_invalid_matrix_distinct_from_not_found() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("data.json");
    std::fs::write(&path, r#"{"texts": [["", "PartnerX"], ["", "call"]]}"#).unwrap();

    let dataset = JsonSource::new(&path).load().unwrap();
    assert_eq!(
        dataset.resolve_text("PartnerX", "call"),
        TextResolution::InvalidStructure { rows: 2 }
    );
}
