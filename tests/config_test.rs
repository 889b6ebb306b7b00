//! 設定ファイルの保存テスト
//!
//! HOME と環境変数を書き換えるため、1つのテスト関数にまとめている。

use std::path::PathBuf;
use tester_lookup::config::Config;

fn read_saved(path: &PathBuf) -> serde_json::Value {
    let content = std::fs::read_to_string(path).expect("設定ファイルがない");
    serde_json::from_str(&content).unwrap()
}

#[test]
fn test_env_overrides_are_not_persisted() {
    let home = tempfile::tempdir().expect("Failed to create temp dir");
    std::env::set_var("HOME", home.path());
    std::env::set_var("TESTER_LOOKUP_SOURCE", "/tmp/session-only.xlsx");
    std::env::set_var("PORT", "9999");

    let path = Config::config_path().unwrap();
    assert!(path.starts_with(home.path()));

    // 実行時の設定には上書きが効いている
    let mut config = Config::load().unwrap();
    assert_eq!(config.source, Some(PathBuf::from("/tmp/session-only.xlsx")));
    assert_eq!(config.port, 9999);

    config.set_target_wave(2).unwrap();
    assert_eq!(config.target_wave, 2);

    let saved = read_saved(&path);
    assert_eq!(saved["target_wave"], 2);
    assert!(saved["source"].is_null());
    assert_eq!(saved["port"], 8000);

    // --source 相当の上書きも保存されない
    config.source = Some(PathBuf::from("/tmp/flag-only.xlsx"));
    config.set_target_wave(3).unwrap();
    let saved = read_saved(&path);
    assert_eq!(saved["target_wave"], 3);
    assert!(saved["source"].is_null());

    // 明示的な set_source は保存される
    config.set_source(PathBuf::from("/data/main.xlsx")).unwrap();
    let stored = Config::load_file().unwrap();
    assert_eq!(stored.source, Some(PathBuf::from("/data/main.xlsx")));
    assert_eq!(stored.target_wave, 3);
    assert_eq!(stored.port, 8000);

    assert!(config.set_target_wave(0).is_err());
    assert_eq!(Config::load_file().unwrap().target_wave, 3);

    std::env::remove_var("TESTER_LOOKUP_SOURCE");
    std::env::remove_var("PORT");
}
