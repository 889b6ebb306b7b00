//! 状態通知の出力先

use tester_lookup_common::StatusSink;

/// 端末に表示する
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleStatus;

impl StatusSink for ConsoleStatus {
    fn on_status(&self, message: &str, is_error: bool) {
        if is_error {
            eprintln!("⚠ {}", message);
        } else {
            println!("✔ {}", message);
        }
    }
}

/// ログに流す（HTTPサーバ用）
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingStatus;

impl StatusSink for TracingStatus {
    fn on_status(&self, message: &str, is_error: bool) {
        if is_error {
            tracing::warn!("{}", message);
        } else {
            tracing::info!("{}", message);
        }
    }
}
