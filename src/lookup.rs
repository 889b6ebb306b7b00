//! 検索の入口
//!
//! CLI・対話モードから共通で使う。入力チェックと状態通知だけを行い、
//! 照合自体は `tester_lookup_common` に任せる。

use crate::cache::DatasetCache;
use crate::error::{LookupError, Result};
use tester_lookup_common::{AssignmentRow, StatusSink, TextResolution, WaveSpec};

/// 前後の空白を除いたФИО（空ならエラー）
pub fn validate_query(raw: &str) -> Result<&str> {
    let query = raw.trim();
    if query.is_empty() {
        return Err(LookupError::EmptyQuery);
    }
    Ok(query)
}

/// ФИОで割り当てを検索し、件数を通知する
pub fn search(
    cache: &DatasetCache,
    raw_query: &str,
    wave: &WaveSpec,
    status: &dyn StatusSink,
) -> Result<Vec<AssignmentRow>> {
    let query = match validate_query(raw_query) {
        Ok(q) => q,
        Err(e) => {
            status.error("Введите ФИО");
            return Err(e);
        }
    };

    let items = cache.find_assignments(query, wave);
    tracing::debug!(query, found = items.len(), "検索完了");

    if items.is_empty() {
        status.error(&format!("Адреса не найдены для этого ФИО в {}", wave));
    } else {
        status.success(&format!("Найдено адресов: {}", items.len()));
    }

    Ok(items)
}

/// 選択された割り当ての指示テキストを引く
///
/// partner/method は行の値をそのまま使う。
pub fn instructions(
    cache: &DatasetCache,
    row: &AssignmentRow,
    status: &dyn StatusSink,
) -> TextResolution {
    let resolution = cache.resolve_text(&row.partner, &row.method);

    match &resolution {
        TextResolution::Found { .. } => status.success("Инструкции готовы"),
        TextResolution::Fallback { .. } => status.success("Инструкции готовы (общий текст)"),
        TextResolution::NotFound => status.error("Текст не найден"),
        TextResolution::InvalidStructure { .. } => status.error("Неверная структура листа \"Тексты\""),
    }

    resolution
}
