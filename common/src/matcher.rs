//! ФИО照合モジュール
//!
//! 入力されたФИОを正規化し、「Тестировщик」列の部分一致と
//! 対象ウェーブの両方を満たす行を元の順序のまま返す。

use crate::normalize::NormalizedKey;
use crate::types::{AssignmentRow, AssignmentSnapshot};
use crate::wave::WaveSpec;
use serde::Serialize;

/// ФИОとウェーブで割り当てを検索する
///
/// 空クエリは呼び出し側で弾く前提。渡された場合は空文字列が何にでも
/// 含まれるので対象ウェーブの全行を返す。ФИОが空の行は空でないクエリには一致しない。
pub fn find_assignments<'a>(
    query: &str,
    snapshot: &'a AssignmentSnapshot,
    wave: &WaveSpec,
) -> Vec<&'a AssignmentRow> {
    find_assignment_indices(query, snapshot, wave)
        .into_iter()
        .map(|idx| &snapshot.rows()[idx])
        .collect()
}

/// 一致した行の位置（スナップショット内の添字、昇順）
pub fn find_assignment_indices(
    query: &str,
    snapshot: &AssignmentSnapshot,
    wave: &WaveSpec,
) -> Vec<usize> {
    let query = NormalizedKey::new(query);

    snapshot
        .iter()
        .enumerate()
        .filter(|(_, row)| is_candidate(row, &query))
        .filter(|(_, row)| wave.matches(&row.wave))
        .map(|(idx, _)| idx)
        .collect()
}

fn is_candidate(row: &AssignmentRow, query: &NormalizedKey) -> bool {
    row.tester_key().contains(query)
}

/// ウェーブ判定の記録（ФИОに一致した行のみ）
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WaveCheck {
    pub row_index: usize,
    pub raw_wave: String,
    pub passes: bool,
}

/// 検索結果が空のときの調査用情報
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchDiagnostics {
    pub normalized_query: String,
    pub total_rows: usize,
    pub name_matches: usize,
    pub wave_checks: Vec<WaveCheck>,
}

/// `find_assignments` と同じ判定を行い、途中経過を返す
pub fn explain_assignments(
    query: &str,
    snapshot: &AssignmentSnapshot,
    wave: &WaveSpec,
) -> MatchDiagnostics {
    let key = NormalizedKey::new(query);

    let wave_checks: Vec<WaveCheck> = snapshot
        .iter()
        .enumerate()
        .filter(|(_, row)| is_candidate(row, &key))
        .map(|(row_index, row)| WaveCheck {
            row_index,
            raw_wave: row.wave.to_string(),
            passes: wave.matches(&row.wave),
        })
        .collect();

    MatchDiagnostics {
        normalized_query: key.to_string(),
        total_rows: snapshot.len(),
        name_matches: wave_checks.len(),
        wave_checks,
    }
}
