//! バイナリ経由のCLIテスト

use std::process::Command;

#[test]
fn test_find_blank_name_fails_before_opening_source() {
    let home = tempfile::tempdir().expect("Failed to create temp dir");

    let output = Command::new(env!("CARGO_BIN_EXE_tester-lookup"))
        .args(["find", "   ", "--source", "/nonexistent/data.xlsx"])
        .env("HOME", home.path())
        .env_remove("TESTER_LOOKUP_SOURCE")
        .output()
        .expect("起動失敗");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("ФИО не указано"), "{}", stderr);
    assert!(!stderr.contains("データファイルを開けません"), "{}", stderr);
}
