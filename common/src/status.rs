//! 状態通知
//!
//! 照合処理そのものは表示に触れない。呼び出し側がこのトレイト経由で
//! 「見つかった件数」「読み込み失敗」などを通知する。

/// 状態通知の受け口
pub trait StatusSink {
    fn on_status(&self, message: &str, is_error: bool);

    fn success(&self, message: &str) {
        self.on_status(message, false);
    }

    fn error(&self, message: &str) {
        self.on_status(message, true);
    }
}

/// 何もしない通知先
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentStatus;

impl StatusSink for SilentStatus {
    fn on_status(&self, _message: &str, _is_error: bool) {}
}

/// 通知を記録する（テスト用）
#[cfg(any(test, feature = "testing"))]
#[derive(Debug, Default)]
pub struct RecordingStatus {
    messages: std::sync::Mutex<Vec<(String, bool)>>,
}

#[cfg(any(test, feature = "testing"))]
impl RecordingStatus {
    pub fn messages(&self) -> Vec<(String, bool)> {
        self.messages.lock().map(|m| m.clone()).unwrap_or_default()
    }
}

#[cfg(any(test, feature = "testing"))]
impl StatusSink for RecordingStatus {
    fn on_status(&self, message: &str, is_error: bool) {
        if let Ok(mut messages) = self.messages.lock() {
            messages.push((message.to_string(), is_error));
        }
    }
}
